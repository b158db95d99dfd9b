use crate::domain::state::RemotePlayer;
use crate::interface_adapters::protocol::{ClientMessage, PlayerPoseDto, ServerMessage};
use crate::interface_adapters::state::RelayState;
use crate::interface_adapters::utils::rng::rand_id;
use crate::use_cases::{RelayEvent, RosterUpdate};

use axum::{
    extract::{
        State,
        ws::{CloseFrame, Message, Utf8Bytes, WebSocket, WebSocketUpgrade, close_code},
    },
    response::IntoResponse,
};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::{broadcast, mpsc};
use tracing::{Instrument, debug, error, info, info_span, warn};

#[derive(Debug)]
enum NetError {
    #[allow(dead_code)]
    Ws(axum::Error),
    EventsClosed,
    RosterClosed,
}

enum LoopControl {
    Continue,
    Disconnect,
}

const LOG_THROTTLE: Duration = Duration::from_secs(2);
const MAX_INVALID_JSON: u32 = 10;

pub async fn roster_serializer(
    mut roster_rx: broadcast::Receiver<RosterUpdate>,
    roster_bytes_tx: broadcast::Sender<Utf8Bytes>,
) {
    // Serialize each roster once and broadcast the shared bytes.
    loop {
        match roster_rx.recv().await {
            Ok(update) => {
                let msg = ServerMessage::from(&update);
                let txt = match serde_json::to_string(&msg) {
                    Ok(txt) => txt,
                    Err(e) => {
                        error!(error = ?e, "failed to serialize roster");
                        continue;
                    }
                };
                let _ = roster_bytes_tx.send(Utf8Bytes::from(txt));
            }
            Err(broadcast::error::RecvError::Lagged(n)) => {
                warn!(missed = n, "roster serializer lagged; skipping to latest");
            }
            Err(broadcast::error::RecvError::Closed) => {
                warn!("roster channel closed; serializer exiting");
                break;
            }
        }
    }
}

pub async fn ws_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<RelayState>>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| {
        let conn_id = rand_id();
        handle_socket(socket, state, conn_id).instrument(info_span!("conn", conn_id))
    })
}

struct ConnCtx {
    conn_id: u64,
    event_tx: mpsc::Sender<RelayEvent>,
    roster_bytes_rx: broadcast::Receiver<Utf8Bytes>,
    invalid_json: u32,
    msgs_in: u64,
    msgs_out: u64,
    last_full_log: Instant,
    last_invalid_log: Instant,
    close_frame: Option<CloseFrame>,
}

async fn handle_socket(mut socket: WebSocket, state: Arc<RelayState>, conn_id: u64) {
    // Subscribe before announcing the peer so the first roster is not missed.
    let roster_bytes_rx = state.roster_bytes_tx.subscribe();
    if state
        .event_tx
        .send(RelayEvent::Join { conn_id })
        .await
        .is_err()
    {
        error!("roster task unavailable; refusing connection");
        let _ = socket
            .send(Message::Close(Some(CloseFrame {
                code: close_code::ERROR,
                reason: "relay unavailable".into(),
            })))
            .await;
        return;
    }
    info!("client connected");

    let now = Instant::now() - LOG_THROTTLE;
    let mut ctx = ConnCtx {
        conn_id,
        event_tx: state.event_tx.clone(),
        roster_bytes_rx,
        invalid_json: 0,
        msgs_in: 0,
        msgs_out: 0,
        last_full_log: now,
        last_invalid_log: now,
        close_frame: None,
    };

    if let Err(e) = run_client_loop(&mut socket, &mut ctx).await {
        warn!(error = ?e, "client loop exited with error");
    }

    if let Some(frame) = ctx.close_frame.take() {
        let _ = socket.send(Message::Close(Some(frame))).await;
    }
    let _ = ctx.event_tx.send(RelayEvent::Leave { conn_id }).await;
    info!(
        msgs_in = ctx.msgs_in,
        msgs_out = ctx.msgs_out,
        invalid_json = ctx.invalid_json,
        "client disconnected"
    );
}

async fn run_client_loop(socket: &mut WebSocket, ctx: &mut ConnCtx) -> Result<(), NetError> {
    loop {
        let control = tokio::select! {
            incoming = socket.recv() => handle_incoming(incoming, ctx)?,
            roster = ctx.roster_bytes_rx.recv() => match roster {
                Ok(bytes) => match socket.send(Message::Text(bytes)).await {
                    Ok(()) => {
                        ctx.msgs_out += 1;
                        LoopControl::Continue
                    }
                    Err(err) => {
                        debug!(error = ?NetError::Ws(err), "failed to send roster");
                        LoopControl::Disconnect
                    }
                },
                Err(broadcast::error::RecvError::Lagged(n)) => {
                    // The next roster is a full snapshot; nothing to resync.
                    if should_log(&mut ctx.last_full_log) {
                        warn!(missed = n, "roster updates lagged");
                    }
                    LoopControl::Continue
                }
                Err(broadcast::error::RecvError::Closed) => return Err(NetError::RosterClosed),
            },
        };

        if let LoopControl::Disconnect = control {
            return Ok(());
        }
    }
}

fn handle_incoming(
    incoming: Option<Result<Message, axum::Error>>,
    ctx: &mut ConnCtx,
) -> Result<LoopControl, NetError> {
    let msg = match incoming {
        Some(Ok(msg)) => msg,
        Some(Err(e)) => {
            warn!(error = %e, "websocket recv error");
            return Ok(LoopControl::Disconnect);
        }
        None => {
            info!("websocket closed");
            return Ok(LoopControl::Disconnect);
        }
    };

    match msg {
        Message::Text(text) => {
            ctx.msgs_in += 1;
            match serde_json::from_str::<ClientMessage>(&text) {
                Ok(ClientMessage::UpdatePos { payload }) => process_pose(ctx, payload),
                Ok(ClientMessage::Unknown) => Ok(LoopControl::Continue),
                Err(parse_err) => {
                    ctx.invalid_json += 1;
                    if should_log(&mut ctx.last_invalid_log) {
                        warn!(bytes = text.len(), error = %parse_err, "failed to parse client message");
                    }
                    if ctx.invalid_json > MAX_INVALID_JSON {
                        ctx.close_frame = Some(CloseFrame {
                            code: close_code::POLICY,
                            reason: "too many invalid messages".into(),
                        });
                        return Ok(LoopControl::Disconnect);
                    }
                    Ok(LoopControl::Continue)
                }
            }
        }
        Message::Binary(_) => {
            ctx.close_frame = Some(CloseFrame {
                code: close_code::UNSUPPORTED,
                reason: "binary messages not supported".into(),
            });
            Ok(LoopControl::Disconnect)
        }
        Message::Ping(_) | Message::Pong(_) => Ok(LoopControl::Continue),
        Message::Close(_) => Ok(LoopControl::Disconnect),
    }
}

fn process_pose(ctx: &mut ConnCtx, payload: PlayerPoseDto) -> Result<LoopControl, NetError> {
    if !payload.is_finite() {
        if should_log(&mut ctx.last_invalid_log) {
            warn!("invalid pose values (NaN/inf); dropping");
        }
        return Ok(LoopControl::Continue);
    }

    let event = RelayEvent::Pose {
        conn_id: ctx.conn_id,
        pose: RemotePlayer::from(payload),
    };
    match ctx.event_tx.try_send(event) {
        Ok(()) => Ok(LoopControl::Continue),
        Err(mpsc::error::TrySendError::Full(_)) => {
            if should_log(&mut ctx.last_full_log) {
                warn!("relay event channel full; dropping pose");
            }
            Ok(LoopControl::Continue)
        }
        Err(mpsc::error::TrySendError::Closed(_)) => Err(NetError::EventsClosed),
    }
}

fn should_log(last: &mut Instant) -> bool {
    if last.elapsed() >= LOG_THROTTLE {
        *last = Instant::now();
        true
    } else {
        false
    }
}
