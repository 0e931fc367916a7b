//! Application layer: the game controller and its notification seam.
//!
//! This layer orchestrates the domain types from `gomoku-core`: it receives
//! inbound events, validates and applies them against the game state and the
//! connection registry, and emits outbound notifications through the
//! [`NotificationSink`] abstraction.
//!
//! # What does NOT belong here?
//!
//! - Sockets, WebSocket frames, or tokio task spawning (infrastructure)
//! - Game rules themselves (gomoku-core)

pub mod controller;
pub mod sink;

pub use controller::{GameController, GameEvent};
pub use sink::NotificationSink;
