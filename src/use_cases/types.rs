// Use-case level state and per-frame outputs for a game session.

use crate::domain::catalog::TrophyId;
pub use crate::domain::game_state::GameState;
use crate::domain::mission::MissionProgress;
use crate::domain::state::{PoseSnapshot, RemotePlayer};
use crate::domain::systems::flight::TickEvents;

/// What one call to `GameSession::frame` produced.
#[derive(Debug, Clone, Default)]
pub struct FrameReport {
    /// Set when the game state changed during this frame.
    pub transition: Option<GameState>,
    pub events: TickEvents,
    pub progress: Option<MissionProgress>,
    /// Pose to push to the relay, present on sync frames only.
    pub pose: Option<PoseSnapshot>,
    pub unlocked: Vec<TrophyId>,
}

/// Result of leaving a finished mission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissionDebrief {
    pub reward: u64,
    pub unlocked: Vec<TrophyId>,
}

/// Latest roster handed to the frame loop.
pub type RosterView = std::sync::Arc<Vec<RemotePlayer>>;

/// Inputs flowing from relay connections into the roster task.
#[derive(Debug, Clone)]
pub enum RelayEvent {
    Join { conn_id: u64 },
    Leave { conn_id: u64 },
    Pose { conn_id: u64, pose: RemotePlayer },
}

/// Full roster broadcast to every relay connection.
#[derive(Debug, Clone)]
pub struct RosterUpdate {
    pub tick: u64,
    pub players: Vec<RemotePlayer>,
}
