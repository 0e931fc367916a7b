//! The game controller: one inbound event in, state transitions and
//! notifications out.
//!
//! The controller owns the only mutable copies of [`GameState`] and
//! [`ConnectionRegistry`] in the process. It is strictly synchronous: the
//! dispatcher task feeds it one [`GameEvent`] at a time and every handler
//! runs to completion — all mutation and all outbound notification
//! construction — before the next event is looked at. That serialization is
//! the whole concurrency model; two join requests for the same color are
//! always processed back to back, so the second one observes the first's
//! seat claim.
//!
//! Validation failures never mutate anything and are reported only to the
//! session that caused them (as a `Rejected` message); successful
//! operations are the only ones that change shared state and broadcast.

use tracing::{debug, info};

use gomoku_core::protocol::{ClientMessage, ServerMessage};
use gomoku_core::state::MoveOutcome;
use gomoku_core::{
    Color, ConnectionRegistry, GameError, GamePhase, GameState, QuitOutcome, Role, Session,
    SessionId,
};

use crate::application::sink::NotificationSink;

/// An inbound event for the controller.
///
/// `Connected` and `Disconnected` are channel lifecycle observations made
/// by the transport; the rest arrive as parsed client messages.
#[derive(Debug)]
pub enum GameEvent {
    /// A new channel was established; no seat has been claimed yet.
    Connected(SessionId),
    /// A parsed message from a connected session.
    Inbound(SessionId, ClientMessage),
    /// The session's channel closed.
    Disconnected(SessionId),
}

/// Orchestrates the single game room.
pub struct GameController<S: NotificationSink> {
    state: GameState,
    registry: ConnectionRegistry,
    sink: S,
}

impl<S: NotificationSink> GameController<S> {
    /// A controller with a fresh board and an empty registry.
    pub fn new(sink: S) -> Self {
        Self {
            state: GameState::new(),
            registry: ConnectionRegistry::new(),
            sink,
        }
    }

    /// Handles one event to completion.
    pub fn dispatch(&mut self, event: GameEvent) {
        match event {
            GameEvent::Connected(id) => self.handle_connect(id),
            GameEvent::Inbound(id, ClientMessage::Join { role, name }) => {
                self.handle_join(id, role, name)
            }
            GameEvent::Inbound(id, ClientMessage::Move { row, col, color }) => {
                self.handle_move(id, row, col, color)
            }
            GameEvent::Inbound(id, ClientMessage::Quit) => self.handle_quit(id),
            GameEvent::Disconnected(id) => self.handle_disconnect(id),
        }
    }

    // ── Event handlers ────────────────────────────────────────────────────────

    /// New channel: the fresh session gets the current roster, nobody else
    /// hears about it until it joins.
    fn handle_connect(&mut self, id: SessionId) {
        debug!("session {id}: connected");
        self.sink
            .send(id, &ServerMessage::UpdateConnection(self.registry.roster()));
    }

    /// Seat claim. A player color that is already held is refused without
    /// any other effect; otherwise the session record is created or updated
    /// in place and everyone gets the new roster plus the game snapshot.
    fn handle_join(&mut self, id: SessionId, role: Role, name: String) {
        if let Some(color) = role.color() {
            if self.registry.is_color_taken(color) {
                debug!("session {id}: join refused, {color:?} already taken");
                self.reject(id, GameError::ColorAlreadyTaken(color));
                return;
            }
        }

        info!("session {id}: joined as {role:?} ({name})");
        self.registry.upsert(Session { id, role, name });
        self.broadcast_roster();
        self.broadcast_game();
    }

    /// Move submission: validate, apply, scan, notify.
    ///
    /// Order of rejection checks: a finished game first (there is no
    /// "current turn" to compare against once the game is over), then seat
    /// ownership, then turn order and board placement inside
    /// [`GameState::apply_move`].
    fn handle_move(&mut self, id: SessionId, row: usize, col: usize, color: Color) {
        if matches!(self.state.phase(), GamePhase::Finished { .. }) {
            self.reject(id, GameError::GameAlreadyFinished);
            return;
        }
        if self.registry.role_of(id).and_then(Role::color) != Some(color) {
            self.reject(id, GameError::NotAuthorized);
            return;
        }

        let outcome = match self.state.apply_move(row, col, color) {
            Ok(outcome) => outcome,
            Err(error) => {
                self.reject(id, error);
                return;
            }
        };

        match outcome {
            MoveOutcome::Win => {
                let name = self
                    .registry
                    .name_of(id)
                    .unwrap_or_default()
                    .to_string();
                info!("session {id}: {color:?} wins at ({row}, {col})");
                self.sink.broadcast(&ServerMessage::Winner { name });
            }
            MoveOutcome::Draw => {
                info!("board full with no winner — draw");
                self.sink.broadcast(&ServerMessage::Draw);
            }
            MoveOutcome::Continue => {
                debug!("session {id}: {color:?} moved to ({row}, {col})");
            }
        }
        // Every accepted move ends with a game broadcast, terminal or not.
        self.broadcast_game();
    }

    /// Voluntary seat release. A quitting player forces a full reset; a
    /// quitting watcher just becomes unassigned and stays connected.
    fn handle_quit(&mut self, id: SessionId) {
        match self.registry.quit(id) {
            QuitOutcome::PlayerLeft => {
                info!("session {id}: player quit — full reset");
                self.full_reset();
            }
            QuitOutcome::Demoted => debug!("session {id}: seat released"),
            QuitOutcome::Unknown => debug!("session {id}: quit from unregistered session"),
        }
        self.broadcast_roster();
    }

    /// Channel teardown. Removing a session that held a player seat resets
    /// the game for everyone, regardless of progress.
    fn handle_disconnect(&mut self, id: SessionId) {
        if let Some(session) = self.registry.remove(id) {
            info!("session {id}: disconnected ({})", session.name);
            if session.role.is_player() {
                self.full_reset();
            }
        } else {
            debug!("session {id}: disconnected before joining");
        }
        self.broadcast_roster();
    }

    // ── Helpers ───────────────────────────────────────────────────────────────

    /// Fresh board, Black to move, and every seat back to unassigned.
    /// The two always happen together: a reset board means the player
    /// seats must be re-claimed.
    fn full_reset(&mut self) {
        self.state.reset();
        self.registry.demote_all();
    }

    fn reject(&self, id: SessionId, error: GameError) {
        self.sink.send(
            id,
            &ServerMessage::Rejected {
                reason: error.reason(),
                message: error.to_string(),
            },
        );
    }

    fn broadcast_roster(&self) {
        self.sink
            .broadcast(&ServerMessage::UpdateConnection(self.registry.roster()));
    }

    fn broadcast_game(&self) {
        self.sink
            .broadcast(&ServerMessage::UpdateGame(self.state.snapshot()));
    }

    /// Read access for tests and diagnostics.
    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn registry(&self) -> &ConnectionRegistry {
        &self.registry
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
