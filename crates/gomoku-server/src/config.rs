//! Server configuration.
//!
//! A plain struct with no global state and no environment reads of its own:
//! `main.rs` populates it from CLI arguments, tests construct it directly.

use std::net::SocketAddr;

/// All runtime configuration for the game server.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// The address and port the WebSocket listener binds to.
    ///
    /// `0.0.0.0` accepts connections from any interface; use `127.0.0.1`
    /// to restrict the server to local clients.
    pub bind_addr: SocketAddr,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            // Known-valid literal, same port the legacy server used.
            bind_addr: "0.0.0.0:3000".parse().unwrap(),
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
