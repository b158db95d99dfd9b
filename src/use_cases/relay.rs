// Relay roster task: collects the latest pose per connection and broadcasts
// the whole roster on a fixed interval.

use super::types::{RelayEvent, RosterUpdate};
use crate::domain::state::RemotePlayer;
use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{Notify, broadcast, mpsc};
use tracing::{debug, info};

#[derive(Debug, Default)]
pub struct Roster {
    connected: BTreeSet<u64>,
    poses: BTreeMap<u64, RemotePlayer>,
}

impl Roster {
    pub fn apply(&mut self, event: RelayEvent) {
        match event {
            RelayEvent::Join { conn_id } => {
                info!(conn_id, "relay peer joined");
                self.connected.insert(conn_id);
            }
            RelayEvent::Leave { conn_id } => {
                info!(conn_id, "relay peer left");
                self.connected.remove(&conn_id);
                self.poses.remove(&conn_id);
            }
            RelayEvent::Pose { conn_id, pose } => {
                // Late poses from a closed connection must not resurrect it.
                if self.connected.contains(&conn_id) {
                    self.poses.insert(conn_id, pose);
                } else {
                    debug!(conn_id, "pose from unknown connection dropped");
                }
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        self.connected.is_empty()
    }

    pub fn snapshot(&self) -> Vec<RemotePlayer> {
        self.poses.values().cloned().collect()
    }
}

pub async fn roster_task(
    mut event_rx: mpsc::Receiver<RelayEvent>,
    roster_tx: broadcast::Sender<RosterUpdate>,
    broadcast_interval: Duration,
    shutdown: Arc<Notify>,
) {
    let mut tick: u64 = 0;
    let mut roster = Roster::default();
    let mut interval = tokio::time::interval(broadcast_interval);

    loop {
        tokio::select! {
            _ = shutdown.notified() => {
                info!("relay roster task stopping");
                break;
            }
            _ = interval.tick() => {}
        }

        while let Ok(event) = event_rx.try_recv() {
            roster.apply(event);
        }

        if roster.is_empty() {
            continue;
        }

        tick += 1;
        let _ = roster_tx.send(RosterUpdate {
            tick,
            players: roster.snapshot(),
        });
    }
}
