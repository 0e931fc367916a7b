//! WebSocket server: accept loop, session tasks, and the dispatcher.
//!
//! This module is responsible for:
//!
//! 1. Binding a TCP listener on the configured address.
//! 2. Accepting incoming connections and upgrading them to WebSocket.
//! 3. Assigning each session an opaque v4 UUID channel id.
//! 4. Running two tasks per session:
//!    - **reader**: parses inbound JSON frames into [`ClientMessage`]s and
//!      forwards them to the dispatcher's event channel.
//!    - **writer**: drains the session's outbound channel into the socket.
//! 5. Running the single **dispatcher** task that owns the
//!    [`GameController`] and consumes events one at a time.
//! 6. Exiting cleanly when the `running` flag is cleared.
//!
//! # Concurrency model
//!
//! Every reader sends into one mpsc channel with a single consumer: the
//! dispatcher. Each event is handled to completion — all state mutation and
//! all notification construction — before the next one is received, so the
//! game state and registry need no locks and can never be observed half
//! updated. The gateway's outbound channels are unbounded and drained by
//! the writer tasks, so a slow client delays only its own socket, never the
//! dispatcher.

use std::net::SocketAddr;
use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};
use std::time::Duration;

use anyhow::Context;
use futures_util::{SinkExt, StreamExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::mpsc;
use tokio::time::timeout;
use tokio_tungstenite::{
    accept_async,
    tungstenite::{Error as WsError, Message as WsMessage},
};
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use gomoku_core::protocol::ClientMessage;
use gomoku_core::SessionId;

use crate::application::{GameController, GameEvent};
use crate::config::ServerConfig;
use crate::infrastructure::gateway::WsGateway;

/// Inbound events queued ahead of the dispatcher; sessions back off
/// (await) when the dispatcher falls this far behind.
const EVENT_QUEUE_DEPTH: usize = 256;

// ── Public API ────────────────────────────────────────────────────────────────

/// Runs the game server until `running` is set to `false`.
///
/// Binds a TCP listener on `config.bind_addr`, spawns the dispatcher task
/// that owns the game controller, and accepts connections in a loop. Each
/// accepted connection gets a dedicated session task so one slow client
/// never blocks others.
///
/// # Errors
///
/// Returns an error if the listener cannot be bound (port in use, missing
/// permission).
pub async fn run_server(config: ServerConfig, running: Arc<AtomicBool>) -> anyhow::Result<()> {
    let listener = TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("failed to bind listener on {}", config.bind_addr))?;

    info!("gomoku server listening on {}", config.bind_addr);

    let gateway = Arc::new(WsGateway::new());
    let (event_tx, event_rx) = mpsc::channel::<GameEvent>(EVENT_QUEUE_DEPTH);

    // The controller is constructed here, once, and moved into the
    // dispatcher task — the single place game state is ever touched.
    let controller = GameController::new(Arc::clone(&gateway));
    tokio::spawn(run_dispatcher(controller, event_rx));

    loop {
        if !running.load(Ordering::Relaxed) {
            info!("shutdown flag set; stopping accept loop");
            break;
        }

        // A short accept timeout lets the loop re-check the shutdown flag
        // even when no clients are connecting.
        let accepted = timeout(Duration::from_millis(200), listener.accept()).await;

        match accepted {
            Ok(Ok((stream, peer_addr))) => {
                debug!("new connection from {peer_addr}");
                let gateway = Arc::clone(&gateway);
                let events = event_tx.clone();
                tokio::spawn(async move {
                    handle_session(stream, peer_addr, gateway, events).await;
                });
            }
            Ok(Err(e)) => {
                // Transient accept error; keep serving.
                error!("accept error: {e}");
            }
            Err(_) => {
                // Timeout — loop back to check the running flag.
            }
        }
    }

    Ok(())
}

// ── Dispatcher ────────────────────────────────────────────────────────────────

/// Consumes inbound events one at a time until every sender is gone.
async fn run_dispatcher(
    mut controller: GameController<Arc<WsGateway>>,
    mut events: mpsc::Receiver<GameEvent>,
) {
    while let Some(event) = events.recv().await {
        controller.dispatch(event);
    }
    debug!("event channel closed; dispatcher stopping");
}

// ── Per-session handler ───────────────────────────────────────────────────────

/// Outer wrapper for a session task: runs the session and logs the outcome.
async fn handle_session(
    raw_stream: TcpStream,
    peer_addr: SocketAddr,
    gateway: Arc<WsGateway>,
    events: mpsc::Sender<GameEvent>,
) {
    match run_session(raw_stream, peer_addr, gateway, events).await {
        Ok(()) => info!("session from {peer_addr} closed normally"),
        Err(e) => warn!("session from {peer_addr} closed with error: {e:#}"),
    }
}

/// Runs the complete lifecycle of one client session.
///
/// Handshake, id assignment, gateway registration, a `Connected` event for
/// the dispatcher, then the reader loop; the writer runs as its own task.
/// On any exit path the session is unregistered and a `Disconnected` event
/// is emitted so the controller can clean up the roster (and reset the game
/// if a player vanished).
async fn run_session(
    raw_stream: TcpStream,
    peer_addr: SocketAddr,
    gateway: Arc<WsGateway>,
    events: mpsc::Sender<GameEvent>,
) -> anyhow::Result<()> {
    let ws_stream = accept_async(raw_stream)
        .await
        .with_context(|| format!("WebSocket handshake failed with {peer_addr}"))?;

    // The opaque channel id all game-level bookkeeping is keyed by.
    let session_id: SessionId = Uuid::new_v4();
    info!("session {session_id} established from {peer_addr}");

    let (mut ws_tx, mut ws_rx) = ws_stream.split();

    // Outbound path: gateway → unbounded channel → writer task → socket.
    let (out_tx, mut out_rx) = mpsc::unbounded_channel::<WsMessage>();
    gateway.register(session_id, out_tx);

    // Register before announcing, so the connect-time roster unicast has a
    // live channel to land on.
    if events.send(GameEvent::Connected(session_id)).await.is_err() {
        gateway.unregister(session_id);
        anyhow::bail!("dispatcher is gone; refusing session {session_id}");
    }

    let writer_task = tokio::spawn(async move {
        while let Some(frame) = out_rx.recv().await {
            if ws_tx.send(frame).await.is_err() {
                debug!("session {session_id}: socket send failed (client disconnected)");
                break;
            }
        }
    });

    // Reader loop: every inbound frame is parsed here, in the session task;
    // the dispatcher only ever sees well-formed `ClientMessage`s.
    while let Some(frame) = ws_rx.next().await {
        let frame = match frame {
            Ok(frame) => frame,
            Err(WsError::ConnectionClosed | WsError::Protocol(_)) => {
                debug!("session {session_id}: socket closed");
                break;
            }
            Err(e) => {
                warn!("session {session_id}: socket error: {e}");
                break;
            }
        };

        match frame {
            WsMessage::Text(text) => {
                let message: ClientMessage = match serde_json::from_str(&text) {
                    Ok(m) => m,
                    Err(e) => {
                        // One malformed message does not end the session.
                        warn!("session {session_id}: invalid message: {e}");
                        continue;
                    }
                };
                if events
                    .send(GameEvent::Inbound(session_id, message))
                    .await
                    .is_err()
                {
                    warn!("session {session_id}: dispatcher is gone");
                    break;
                }
            }
            WsMessage::Binary(_) => {
                // The protocol is JSON text only.
                warn!("session {session_id}: unexpected binary frame (ignored)");
            }
            WsMessage::Ping(_) | WsMessage::Pong(_) => {
                // Protocol-level keepalive; tungstenite answers pings itself.
                debug!("session {session_id}: ws ping/pong");
            }
            WsMessage::Close(_) => {
                debug!("session {session_id}: close frame received");
                break;
            }
            WsMessage::Frame(_) => {
                debug!("session {session_id}: raw frame (ignored)");
            }
        }
    }

    // Teardown, in this order: stop routing to the dead channel, then let
    // the controller update the roster and reset the game if needed.
    gateway.unregister(session_id);
    let _ = events.send(GameEvent::Disconnected(session_id)).await;
    writer_task.abort();

    Ok(())
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use gomoku_core::protocol::ServerMessage;
    use gomoku_core::Role;

    /// The dispatcher wiring end to end: events in through the channel,
    /// notifications out through the gateway's session channels.
    #[tokio::test]
    async fn test_dispatcher_routes_controller_output_through_the_gateway() {
        let gateway = Arc::new(WsGateway::new());
        let (event_tx, event_rx) = mpsc::channel(8);
        let controller = GameController::new(Arc::clone(&gateway));
        let dispatcher = tokio::spawn(run_dispatcher(controller, event_rx));

        let session_id = Uuid::new_v4();
        let (out_tx, mut out_rx) = mpsc::unbounded_channel();
        gateway.register(session_id, out_tx);

        event_tx
            .send(GameEvent::Connected(session_id))
            .await
            .unwrap();
        event_tx
            .send(GameEvent::Inbound(
                session_id,
                ClientMessage::Join {
                    role: Role::Black,
                    name: "alice".to_string(),
                },
            ))
            .await
            .unwrap();

        // Closing the channel lets the dispatcher drain and stop, so all
        // outputs are in the outbound channel once it joins.
        drop(event_tx);
        dispatcher.await.unwrap();

        let mut received = Vec::new();
        while let Ok(frame) = out_rx.try_recv() {
            match frame {
                WsMessage::Text(json) => {
                    received.push(serde_json::from_str::<ServerMessage>(&json).unwrap())
                }
                other => panic!("expected text frame, got {other:?}"),
            }
        }

        // Connect unicast, then the join's roster + game broadcasts.
        assert_eq!(received.len(), 3);
        assert!(matches!(&received[0], ServerMessage::UpdateConnection(r) if r.online_count == 0));
        assert!(matches!(&received[1], ServerMessage::UpdateConnection(r) if r.online_count == 1));
        assert!(matches!(&received[2], ServerMessage::UpdateGame(_)));
    }

    #[tokio::test]
    async fn test_run_server_stops_when_flag_cleared() {
        let config = ServerConfig {
            bind_addr: "127.0.0.1:0".parse().unwrap(),
        };
        let running = Arc::new(AtomicBool::new(false));

        // With the flag already cleared the accept loop must exit at once.
        run_server(config, running).await.unwrap();
    }
}
