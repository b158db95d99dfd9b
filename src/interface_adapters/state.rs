use crate::use_cases::RelayEvent;
use axum::extract::ws::Utf8Bytes;
use tokio::sync::{broadcast, mpsc};

#[derive(Clone)]
pub struct RelayState {
    // Join/leave/pose events flowing into the roster task.
    pub event_tx: mpsc::Sender<RelayEvent>,
    // Serialized roster snapshots, shared across all connections.
    pub roster_bytes_tx: broadcast::Sender<Utf8Bytes>,
}
