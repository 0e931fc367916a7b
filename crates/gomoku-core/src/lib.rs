//! gomoku-core: pure game logic for the Gomoku server.
//!
//! This crate holds everything the server needs to *decide*, and nothing it
//! needs to *transmit*: the board and its move validation, the win-detection
//! scan, the explicit game state machine, the connection registry, the JSON
//! wire message types, and the rejection taxonomy.
//!
//! # Layer rules
//!
//! - No I/O, no async, no sockets, no framework types anywhere in this crate.
//! - `serde` appears only because the domain types are also the wire types
//!   (the server broadcasts board snapshots and rosters as JSON).
//!
//! Keeping the crate pure means every rule of the game can be unit tested
//! without a runtime or a live connection, and the transport layer in
//! `gomoku-server` can be swapped without touching game semantics.

pub mod board;
pub mod error;
pub mod protocol;
pub mod registry;
pub mod rules;
pub mod state;

pub use board::{Board, Cell, Color, BOARD_SIZE};
pub use error::GameError;
pub use registry::{ConnectionRegistry, QuitOutcome, Role, Session, SessionId};
pub use state::{GamePhase, GameState, Outcome};
