//! Gomoku game server — entry point.
//!
//! A real-time server for two-player five-in-a-row with spectators. Clients
//! connect over WebSocket; two of them claim the Black and White seats,
//! everyone else watches. The server holds the one authoritative game state
//! and broadcasts every update to all connected sessions.
//!
//! # Usage
//!
//! ```text
//! gomoku-server [OPTIONS]
//!
//! Options:
//!   --host <HOST>   interface to bind [default: 0.0.0.0]
//!   --port <PORT>   WebSocket listener port [default: 3000]
//! ```
//!
//! # Environment variable overrides
//!
//! | Variable      | Default   | Description             |
//! |---------------|-----------|-------------------------|
//! | `GOMOKU_HOST` | `0.0.0.0` | Bind interface          |
//! | `GOMOKU_PORT` | `3000`    | WebSocket listener port |
//!
//! Log verbosity is controlled by `RUST_LOG` (e.g. `RUST_LOG=debug`).

use std::net::SocketAddr;
use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};

use anyhow::Context;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use gomoku_server::config::ServerConfig;
use gomoku_server::infrastructure::run_server;

// ── CLI argument definitions ──────────────────────────────────────────────────

/// Real-time WebSocket server for two-player Gomoku with spectators.
#[derive(Debug, Parser)]
#[command(name = "gomoku-server", version)]
struct Cli {
    /// Interface to bind. `0.0.0.0` accepts connections from any network
    /// interface; `127.0.0.1` restricts the server to local clients.
    #[arg(long, default_value = "0.0.0.0", env = "GOMOKU_HOST")]
    host: String,

    /// TCP port for the WebSocket listener.
    #[arg(long, default_value_t = 3000, env = "GOMOKU_PORT")]
    port: u16,
}

impl Cli {
    /// Converts the parsed arguments into a [`ServerConfig`].
    ///
    /// # Errors
    ///
    /// Returns an error if `--host` is not a valid IP address.
    fn into_server_config(self) -> anyhow::Result<ServerConfig> {
        let bind_addr: SocketAddr = format!("{}:{}", self.host, self.port)
            .parse()
            .with_context(|| format!("invalid bind address: '{}:{}'", self.host, self.port))?;
        Ok(ServerConfig { bind_addr })
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // RUST_LOG controls the filter; absent or invalid falls back to info.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Cli::parse().into_server_config()?;
    info!("gomoku server starting on {}", config.bind_addr);

    // Ctrl+C clears the flag; the accept loop polls it and exits cleanly.
    let running = Arc::new(AtomicBool::new(true));
    let running_signal = Arc::clone(&running);
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                info!("received Ctrl+C — shutting down");
                running_signal.store(false, Ordering::Relaxed);
            }
            Err(e) => {
                tracing::error!("failed to listen for Ctrl+C: {e}");
            }
        }
    });

    run_server(config, running).await?;

    info!("gomoku server stopped");
    Ok(())
}

// ── Tests ─────────────────────────────────────────────────────────────────────
