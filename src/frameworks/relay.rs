// Framework bootstrap for the reference relay server.

use crate::frameworks::config;
use crate::frameworks::runtime::init_runtime;
use crate::interface_adapters::net::{roster_serializer, ws_handler};
use crate::interface_adapters::state::RelayState;
use crate::use_cases::relay::roster_task;
use crate::use_cases::{RelayEvent, RosterUpdate};

use axum::{Router, extract::ws::Utf8Bytes, routing::get};
use std::net::SocketAddr;
use std::{io::Result, sync::Arc};
use tokio::sync::{Notify, broadcast, mpsc};

pub async fn run(listener: tokio::net::TcpListener) -> Result<()> {
    let address = listener.local_addr()?;
    let state = build_state();

    let app = Router::new()
        .route("/ws", get(ws_handler))
        .with_state(state);

    tracing::info!(%address, "relay listening");

    axum::serve(listener, app).await.inspect_err(|e| {
        tracing::error!(error = %e, "relay server error");
    })
}

pub async fn run_with_config() -> Result<()> {
    init_runtime();

    let address = SocketAddr::from(([0, 0, 0, 0], config::relay_port()));
    let listener = tokio::net::TcpListener::bind(address)
        .await
        .inspect_err(|e| {
            tracing::error!(%address, error = %e, "failed to bind");
        })?;

    run(listener).await
}

fn build_state() -> Arc<RelayState> {
    // event_tx/rx: every connection feeds the single roster task.
    let (event_tx, event_rx) = mpsc::channel::<RelayEvent>(config::RELAY_EVENT_CHANNEL_CAPACITY);
    // roster_tx: domain snapshots; roster_bytes_tx: the same, serialized once.
    let (roster_tx, _roster_rx) = broadcast::channel::<RosterUpdate>(config::ROSTER_BROADCAST_CAPACITY);
    let (roster_bytes_tx, _roster_bytes_rx) =
        broadcast::channel::<Utf8Bytes>(config::ROSTER_BROADCAST_CAPACITY);

    // The relay runs until the process exits.
    tokio::spawn(roster_serializer(
        roster_tx.subscribe(),
        roster_bytes_tx.clone(),
    ));
    tokio::spawn(roster_task(
        event_rx,
        roster_tx,
        config::ROSTER_BROADCAST_INTERVAL,
        Arc::new(Notify::new()),
    ));

    Arc::new(RelayState {
        event_tx,
        roster_bytes_tx,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::state::{Attitude, RemotePlayer};
    use glam::Vec3;
    use std::time::Duration;

    #[tokio::test]
    async fn when_a_peer_reports_a_pose_then_serialized_roster_reaches_subscribers() {
        let state = build_state();
        let mut roster_rx = state.roster_bytes_tx.subscribe();

        state.event_tx.send(RelayEvent::Join { conn_id: 1 }).await.unwrap();
        state
            .event_tx
            .send(RelayEvent::Pose {
                conn_id: 1,
                pose: RemotePlayer {
                    id: "abc".to_string(),
                    position: Vec3::new(1.0, 2.0, 3.0),
                    rotation: Attitude::default(),
                    skin: None,
                    name_tag: Some("Ana".to_string()),
                },
            })
            .await
            .unwrap();

        let text = tokio::time::timeout(Duration::from_secs(2), async {
            loop {
                let bytes = roster_rx.recv().await.unwrap();
                if bytes.as_str().contains("\"abc\"") {
                    break bytes;
                }
            }
        })
        .await
        .expect("no roster with the reported pose");
        assert!(text.as_str().contains("PLAYERS_UPDATE"));
        assert!(text.as_str().contains("\"nameTag\":\"Ana\""));
    }
}
