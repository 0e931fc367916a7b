//! Rejection taxonomy for inbound events.
//!
//! Every variant is recoverable: the controller reports it to the originating
//! session as a `Rejected` message and leaves all shared state untouched.
//! Nothing here should ever crash the process or disturb other sessions.

use thiserror::Error;

use crate::board::Color;
use crate::protocol::RejectReason;

/// A validation failure for a `join` or `move` request.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GameError {
    /// Another session already holds the requested player color.
    #[error("{0:?} is already picked")]
    ColorAlreadyTaken(Color),

    /// The move targets a position outside the board.
    #[error("({row}, {col}) is outside the board")]
    InvalidCoordinate { row: usize, col: usize },

    /// The move targets a cell that already holds a stone.
    #[error("({row}, {col}) is already occupied")]
    CellOccupied { row: usize, col: usize },

    /// The move was submitted for the color that is not on turn.
    #[error("it is {turn:?}'s turn")]
    NotYourTurn { turn: Color },

    /// The submitting session does not hold the color it tried to move.
    #[error("session does not play this color")]
    NotAuthorized,

    /// A move arrived after the game reached a win or a draw.
    #[error("the game is already finished")]
    GameAlreadyFinished,
}

impl GameError {
    /// The machine-readable reason code carried in a `Rejected` message.
    pub fn reason(&self) -> RejectReason {
        match self {
            GameError::ColorAlreadyTaken(_) => RejectReason::ColorAlreadyTaken,
            GameError::InvalidCoordinate { .. } => RejectReason::InvalidCoordinate,
            GameError::CellOccupied { .. } => RejectReason::CellOccupied,
            GameError::NotYourTurn { .. } => RejectReason::NotYourTurn,
            GameError::NotAuthorized => RejectReason::NotAuthorized,
            GameError::GameAlreadyFinished => RejectReason::GameAlreadyFinished,
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
