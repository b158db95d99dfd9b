// Use cases layer: game session workflows, sync rules, persistence and the
// relay roster.

pub mod persistence;
pub mod relay;
pub mod session;
pub mod sync;
pub mod types;

#[cfg(test)]
pub(crate) mod test_support;

pub use session::{GameSession, SessionPolicy};
pub use types::{FrameReport, GameState, MissionDebrief, RelayEvent, RosterUpdate};
