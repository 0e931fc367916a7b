//! JSON message types for the client-facing WebSocket protocol.
//!
//! Every message is a JSON object with a `"type"` field identifying the
//! variant; all other fields live in the same object. Serde's
//! `#[serde(tag = "type")]` attribute produces this shape directly:
//!
//! ```json
//! {"type":"Move","row":7,"col":11,"color":"black"}
//! {"type":"UpdateGame","board":[...],"turn":"white","finished":false,"last_move":[7,11]}
//! ```
//!
//! Inbound and outbound traffic use two distinct enums, so it is a
//! compile-time error to send a client-only message to a client or vice
//! versa. Roles and cells travel as closed string enums (`"black"`,
//! `"watcher"`, `"empty"`, …) rather than the signed sentinel integers the
//! protocol historically used.

use serde::{Deserialize, Serialize};

use crate::board::Color;
use crate::registry::{Role, SessionId};
use crate::state::GameSnapshot;

// ── Client → Server messages ──────────────────────────────────────────────────

/// All messages a connected client can send.
///
/// `connect` and `disconnect` are not messages: they are channel lifecycle
/// events observed by the transport layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ClientMessage {
    /// Claim a seat (player color or watcher) under a display name.
    Join { role: Role, name: String },

    /// Place a stone. The server validates turn order, seat ownership,
    /// bounds, and occupancy before applying anything.
    Move { row: usize, col: usize, color: Color },

    /// Voluntarily give up the current seat while staying connected.
    Quit,
}

// ── Server → Client messages ──────────────────────────────────────────────────

/// One row of the roster: a player or watcher entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RosterEntry {
    pub id: SessionId,
    pub role: Role,
    pub name: String,
}

/// The aggregate roster broadcast whenever the set of sessions changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RosterSnapshot {
    pub players: Vec<RosterEntry>,
    pub watchers: Vec<RosterEntry>,
    /// Every registered session, including unassigned ones.
    pub online_count: usize,
}

/// Machine-readable code for a rejected request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RejectReason {
    ColorAlreadyTaken,
    InvalidCoordinate,
    CellOccupied,
    NotYourTurn,
    NotAuthorized,
    GameAlreadyFinished,
}

/// All messages the server sends.
///
/// `Rejected` goes to the originating session only; everything else is
/// either a broadcast or (for the initial roster on connect) a unicast of
/// the same shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ServerMessage {
    /// Roster update: `{players, watchers, online_count}`.
    UpdateConnection(RosterSnapshot),

    /// Game update: `{board, turn, finished, last_move}`.
    UpdateGame(GameSnapshot),

    /// A winning run was completed by the named player.
    Winner { name: String },

    /// The board filled up without a winner.
    Draw,

    /// The sender's request was refused; no state changed.
    Rejected { reason: RejectReason, message: String },
}

// ── Tests ─────────────────────────────────────────────────────────────────────
