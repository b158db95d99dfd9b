// Domain layer: flight simulation, missions and player progression.

pub mod avionics;
pub mod catalog;
pub mod controls;
pub mod errors;
pub mod game_state;
pub mod mission;
pub mod ports;
pub mod progression;
pub mod state;
pub mod systems;
pub mod tuning;

pub use avionics::{PlaneSystems, SystemToggle, ToggleOutcome};
pub use controls::{ControlInput, ControlVector, Gesture};
pub use errors::{SessionError, StoreError};
pub use game_state::GameState;
pub use mission::{Mission, MissionProgress};
pub use progression::{ProgressionState, PurchaseOutcome, SaveData};
pub use state::{AircraftState, Attitude, PoseSnapshot, RemotePlayer};
