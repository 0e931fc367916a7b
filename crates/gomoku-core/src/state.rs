//! The authoritative game state machine.
//!
//! The legacy server tracked completion as a lone `finished` boolean next to
//! a separately mutated turn field, which allows the two to drift apart.
//! Here the phase is a single tagged value: the game is either
//! [`GamePhase::Active`] with the color on turn, or [`GamePhase::Finished`]
//! with its [`Outcome`]. Transitions: `Active → Finished` on a detected win
//! or a full board; `Finished → Active` only through [`GameState::reset`].
//!
//! The wire still speaks the legacy flat shape (`turn` + `finished`), so
//! [`GameState::snapshot`] derives those fields from the phase.

use serde::{Deserialize, Serialize};

use crate::board::{Board, Cell, Color};
use crate::error::GameError;
use crate::rules::has_winner;

/// How a finished game ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Five or more in a row for this color.
    Win(Color),
    /// The board filled up with no winning run.
    Draw,
}

/// The current phase of the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// The game is in progress and `turn` moves next.
    Active { turn: Color },
    /// The game is over; no moves are accepted until the next reset.
    Finished { outcome: Outcome },
}

/// What happened as a result of an accepted move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    /// The game continues; the opponent is on turn.
    Continue,
    /// The placed stone completed a winning run.
    Win,
    /// The board is now full with no winner.
    Draw,
}

/// Flat game snapshot in the shape the clients expect.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub board: Vec<Vec<Cell>>,
    pub turn: Color,
    pub finished: bool,
    pub last_move: Option<(usize, usize)>,
}

/// The single authoritative game instance: board, phase, last move.
///
/// Created once at server start; reset in place whenever a player leaves.
#[derive(Debug, Clone)]
pub struct GameState {
    board: Board,
    phase: GamePhase,
    last_move: Option<(usize, usize)>,
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

impl GameState {
    /// A fresh game: empty board, Black to move, no last move.
    pub fn new() -> Self {
        Self {
            board: Board::new(),
            phase: GamePhase::Active { turn: Color::Black },
            last_move: None,
        }
    }

    /// Re-initializes the game in place (empty board, Black to move).
    ///
    /// Callers must pair this with demoting all session roles — a fresh
    /// board implies the player seats have to be re-claimed.
    pub fn reset(&mut self) {
        self.board.reset();
        self.phase = GamePhase::Active { turn: Color::Black };
        self.last_move = None;
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Validates and applies a move of `color` at `(row, col)`.
    ///
    /// On acceptance the stone is placed, the turn flips, the last move is
    /// recorded, and the win/draw scan runs; a terminal result moves the
    /// phase to [`GamePhase::Finished`].
    ///
    /// # Errors
    ///
    /// [`GameError::GameAlreadyFinished`] when the game is over,
    /// [`GameError::NotYourTurn`] when `color` is not on turn, and the
    /// placement errors from [`Board::place`]. No failure mutates anything.
    pub fn apply_move(
        &mut self,
        row: usize,
        col: usize,
        color: Color,
    ) -> Result<MoveOutcome, GameError> {
        let turn = match self.phase {
            GamePhase::Finished { .. } => return Err(GameError::GameAlreadyFinished),
            GamePhase::Active { turn } => turn,
        };
        if color != turn {
            return Err(GameError::NotYourTurn { turn });
        }

        self.board.place(row, col, color)?;
        self.last_move = Some((row, col));

        let outcome = if has_winner(&self.board, row, col, color) {
            self.phase = GamePhase::Finished {
                outcome: Outcome::Win(color),
            };
            MoveOutcome::Win
        } else if self.board.is_full() {
            self.phase = GamePhase::Finished {
                outcome: Outcome::Draw,
            };
            MoveOutcome::Draw
        } else {
            self.phase = GamePhase::Active {
                turn: color.opponent(),
            };
            MoveOutcome::Continue
        };
        Ok(outcome)
    }

    /// The flat snapshot broadcast to clients after every accepted move.
    ///
    /// `turn` is informational once the game is finished: after a win it is
    /// the loser's color (the legacy server kept flipping the turn field on
    /// the winning move), after a draw it is Black.
    pub fn snapshot(&self) -> GameSnapshot {
        let (turn, finished) = match self.phase {
            GamePhase::Active { turn } => (turn, false),
            GamePhase::Finished {
                outcome: Outcome::Win(winner),
            } => (winner.opponent(), true),
            GamePhase::Finished {
                outcome: Outcome::Draw,
            } => (Color::Black, true),
        };
        GameSnapshot {
            board: self.board.to_rows(),
            turn,
            finished,
            last_move: self.last_move,
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
