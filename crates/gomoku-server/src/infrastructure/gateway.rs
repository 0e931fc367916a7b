//! The WebSocket gateway: fan-out of server messages to session channels.
//!
//! [`WsGateway`] is the transport-side implementation of the
//! [`NotificationSink`] seam. It keeps one unbounded sender per live
//! session; the matching receivers are drained by the per-session writer
//! tasks in [`crate::infrastructure::ws_server`]. Sends never block — the
//! dispatcher task must not wait on a slow client — so the lock below is a
//! plain `std::sync::Mutex` held only for map access, never across an await.
//!
//! Fan-out serializes each message to JSON once and clones the resulting
//! text frame per recipient; this is the only operation in the server whose
//! cost scales with the number of connected sessions.

use std::collections::HashMap;
use std::sync::Mutex;

use tokio::sync::mpsc::UnboundedSender;
use tokio_tungstenite::tungstenite::Message as WsMessage;
use tracing::{debug, error};

use gomoku_core::protocol::ServerMessage;
use gomoku_core::SessionId;

use crate::application::sink::NotificationSink;

/// Routes serialized server messages to per-session outbound channels.
#[derive(Default)]
pub struct WsGateway {
    sessions: Mutex<HashMap<SessionId, UnboundedSender<WsMessage>>>,
}

impl WsGateway {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes a session reachable for `send`/`broadcast`.
    pub fn register(&self, id: SessionId, tx: UnboundedSender<WsMessage>) {
        self.sessions.lock().expect("gateway lock").insert(id, tx);
    }

    /// Drops the session's outbound channel; subsequent sends to this id
    /// are silently ignored.
    pub fn unregister(&self, id: SessionId) {
        self.sessions.lock().expect("gateway lock").remove(&id);
    }

    /// Number of registered outbound channels.
    pub fn session_count(&self) -> usize {
        self.sessions.lock().expect("gateway lock").len()
    }

    fn encode(message: &ServerMessage) -> Option<String> {
        match serde_json::to_string(message) {
            Ok(json) => Some(json),
            Err(e) => {
                // Server-built messages should always serialize; log and
                // drop rather than poison the dispatcher.
                error!("failed to serialize server message: {e}");
                None
            }
        }
    }
}

impl NotificationSink for WsGateway {
    fn send(&self, session: SessionId, message: &ServerMessage) {
        let Some(json) = Self::encode(message) else {
            return;
        };
        let sessions = self.sessions.lock().expect("gateway lock");
        if let Some(tx) = sessions.get(&session) {
            if tx.send(WsMessage::Text(json)).is_err() {
                debug!("session {session}: outbound channel closed, message dropped");
            }
        } else {
            debug!("session {session}: not registered, message dropped");
        }
    }

    fn broadcast(&self, message: &ServerMessage) {
        let Some(json) = Self::encode(message) else {
            return;
        };
        let sessions = self.sessions.lock().expect("gateway lock");
        for (id, tx) in sessions.iter() {
            if tx.send(WsMessage::Text(json.clone())).is_err() {
                debug!("session {id}: outbound channel closed, broadcast skipped");
            }
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
