// Client side of the relay position-sync protocol.

use crate::domain::state::{PoseSnapshot, RemotePlayer};
use crate::interface_adapters::protocol::{ClientMessage, PlayerPoseDto, ServerMessage};
use crate::use_cases::sync::filter_roster;
use crate::use_cases::types::RosterView;

use futures_util::{SinkExt, StreamExt};
use std::sync::Arc;
use tokio::sync::{Notify, mpsc, watch};
use tokio::task::JoinHandle;
use tokio_tungstenite::{connect_async, tungstenite::Message};
use tracing::{debug, error, info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionStatus {
    Connecting,
    Online,
    Offline,
}

/// Owned by the frame loop. Dropping it closes the socket.
pub struct RelayClient {
    outbound_tx: mpsc::Sender<PoseSnapshot>,
    status_rx: watch::Receiver<ConnectionStatus>,
    roster_rx: watch::Receiver<RosterView>,
    shutdown: Arc<Notify>,
    task: JoinHandle<()>,
}

impl RelayClient {
    /// Starts connecting in the background; gameplay never waits on it.
    pub fn connect(url: impl Into<String>, own_id: impl Into<String>, capacity: usize) -> Self {
        let (outbound_tx, outbound_rx) = mpsc::channel(capacity.max(1));
        let (status_tx, status_rx) = watch::channel(ConnectionStatus::Connecting);
        let (roster_tx, roster_rx) = watch::channel::<RosterView>(Arc::new(Vec::new()));
        let shutdown = Arc::new(Notify::new());

        let task = tokio::spawn(relay_task(
            url.into(),
            own_id.into(),
            outbound_rx,
            status_tx,
            roster_tx,
            shutdown.clone(),
        ));

        Self {
            outbound_tx,
            status_rx,
            roster_rx,
            shutdown,
            task,
        }
    }

    pub fn status(&self) -> ConnectionStatus {
        *self.status_rx.borrow()
    }

    /// Fire-and-forget. Returns false when the pose was dropped.
    pub fn send_pose(&self, pose: PoseSnapshot) -> bool {
        if self.status() != ConnectionStatus::Online {
            return false;
        }
        self.outbound_tx.try_send(pose).is_ok()
    }

    /// Latest roster, already without the local player.
    pub fn roster(&self) -> RosterView {
        self.roster_rx.borrow().clone()
    }

    pub fn subscribe_roster(&self) -> watch::Receiver<RosterView> {
        self.roster_rx.clone()
    }

    pub fn subscribe_status(&self) -> watch::Receiver<ConnectionStatus> {
        self.status_rx.clone()
    }

    pub async fn disconnect(self) {
        self.shutdown.notify_one();
        if let Err(err) = self.task.await {
            warn!(error = ?err, "relay task ended abnormally");
        }
    }
}

async fn relay_task(
    url: String,
    own_id: String,
    mut outbound_rx: mpsc::Receiver<PoseSnapshot>,
    status_tx: watch::Sender<ConnectionStatus>,
    roster_tx: watch::Sender<RosterView>,
    shutdown: Arc<Notify>,
) {
    let connected = tokio::select! {
        _ = shutdown.notified() => {
            status_tx.send_replace(ConnectionStatus::Offline);
            return;
        }
        result = connect_async(url.as_str()) => result,
    };

    let socket = match connected {
        Ok((socket, _response)) => socket,
        Err(err) => {
            // Single report; there is no reconnect.
            warn!(%url, error = %err, "relay unreachable, multiplayer disabled");
            status_tx.send_replace(ConnectionStatus::Offline);
            return;
        }
    };

    info!(%url, "connected to relay");
    status_tx.send_replace(ConnectionStatus::Online);
    let (mut sink, mut stream) = socket.split();

    loop {
        tokio::select! {
            _ = shutdown.notified() => {
                let _ = sink.close().await;
                info!("relay connection closed");
                break;
            }
            pose = outbound_rx.recv() => {
                let Some(pose) = pose else {
                    let _ = sink.close().await;
                    break;
                };
                let msg = ClientMessage::UpdatePos {
                    payload: PlayerPoseDto::from(&pose),
                };
                let txt = match serde_json::to_string(&msg) {
                    Ok(txt) => txt,
                    Err(err) => {
                        error!(error = ?err, "failed to serialize pose");
                        continue;
                    }
                };
                if let Err(err) = sink.send(Message::text(txt)).await {
                    warn!(error = %err, "relay send failed, going offline");
                    break;
                }
            }
            incoming = stream.next() => match incoming {
                Some(Ok(Message::Text(text))) => handle_text(&text, &own_id, &roster_tx),
                Some(Ok(Message::Close(_))) | None => {
                    info!("relay closed the connection");
                    break;
                }
                Some(Ok(_)) => {}
                Some(Err(err)) => {
                    warn!(error = %err, "relay connection error, going offline");
                    break;
                }
            },
        }
    }

    status_tx.send_replace(ConnectionStatus::Offline);
}

fn handle_text(text: &str, own_id: &str, roster_tx: &watch::Sender<RosterView>) {
    match serde_json::from_str::<ServerMessage>(text) {
        Ok(ServerMessage::PlayersUpdate { players }) => {
            let players: Vec<RemotePlayer> = players.into_iter().map(RemotePlayer::from).collect();
            roster_tx.send_replace(Arc::new(filter_roster(players, own_id)));
        }
        Ok(ServerMessage::Unknown) => {}
        Err(err) => debug!(error = %err, "ignoring malformed relay message"),
    }
}
