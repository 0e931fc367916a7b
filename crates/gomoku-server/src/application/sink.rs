//! The notification seam between game orchestration and transport.
//!
//! The controller only ever says "tell this session" or "tell everyone";
//! how those notifications travel is the gateway's concern. Keeping the
//! seam this narrow makes the whole game flow testable with a recording
//! sink and keeps the core transport-agnostic.

use std::sync::Arc;

use gomoku_core::protocol::ServerMessage;
use gomoku_core::SessionId;

/// Delivery interface for outbound notifications.
///
/// Implementations must not block: the controller runs inside the single
/// event-dispatch task, and a slow client must never stall move handling
/// for everyone else.
pub trait NotificationSink {
    /// Delivers a message to one session. Unknown or already-closed
    /// sessions are ignored.
    fn send(&self, session: SessionId, message: &ServerMessage);

    /// Delivers a message to every connected session.
    fn broadcast(&self, message: &ServerMessage);
}

/// Sharing a sink across the dispatcher and transport sides.
impl<T: NotificationSink> NotificationSink for Arc<T> {
    fn send(&self, session: SessionId, message: &ServerMessage) {
        (**self).send(session, message);
    }

    fn broadcast(&self, message: &ServerMessage) {
        (**self).broadcast(message);
    }
}
