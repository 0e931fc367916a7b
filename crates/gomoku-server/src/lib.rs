//! gomoku-server library crate.
//!
//! The runnable half of the Gomoku server: it wires the pure game logic
//! from `gomoku-core` to a WebSocket transport.
//!
//! # Architecture
//!
//! ```text
//! Client (JSON over WebSocket)
//!         ↕
//! [gomoku-server]
//!   ├── config.rs        ServerConfig (bind address)
//!   ├── application/     GameController + NotificationSink seam
//!   └── infrastructure/
//!         ├── gateway.rs    WsGateway: per-session outbound channels
//!         └── ws_server.rs  accept loop, session tasks, dispatcher task
//!         ↕
//! gomoku-core  (board, rules, state machine, registry, protocol)
//! ```
//!
//! # Layer rules
//!
//! - `application` never touches sockets; it speaks only through the
//!   [`application::NotificationSink`] trait, so the whole game flow is
//!   unit-testable with a recording sink.
//! - `infrastructure` owns every tokio and tungstenite type and funnels all
//!   inbound traffic into one event channel consumed by a single dispatcher
//!   task. That single consumer is the entire concurrency story: handlers
//!   run to completion one at a time, so game state needs no locks.

pub mod application;
pub mod config;
pub mod infrastructure;
