//! Infrastructure layer: all I/O lives here.
//!
//! # Responsibilities
//!
//! - Binding the TCP listener and completing WebSocket handshakes
//! - Spawning per-session reader/writer tasks
//! - Funneling inbound traffic into the single dispatcher task
//! - Fanning outbound notifications out to per-session channels
//! - Honoring the graceful shutdown flag
//!
//! # What does NOT belong here?
//!
//! - Game orchestration (application layer)
//! - Rules, state, registry, message types (gomoku-core)

pub mod gateway;
pub mod ws_server;

pub use gateway::WsGateway;
pub use ws_server::run_server;
