// Position-sync rules shared by the frame loop and the relay client.

use crate::domain::state::RemotePlayer;

/// Push window: a frame syncs when `elapsed mod SYNC_PERIOD < SYNC_WINDOW`.
pub const SYNC_PERIOD_SECS: f64 = 0.1;
pub const SYNC_WINDOW_SECS: f64 = 0.02;

pub fn is_sync_frame(elapsed_secs: f64) -> bool {
    elapsed_secs.is_finite() && elapsed_secs.rem_euclid(SYNC_PERIOD_SECS) < SYNC_WINDOW_SECS
}

/// Drops the local player from a relay roster.
pub fn filter_roster(players: Vec<RemotePlayer>, own_id: &str) -> Vec<RemotePlayer> {
    players.into_iter().filter(|p| p.id != own_id).collect()
}
