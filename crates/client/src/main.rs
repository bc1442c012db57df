//! Boomer agent binary.
//!
//! Reads the handshake and per-turn snapshots from stdin and answers each
//! turn with one `MOVE x y` / `BOMB x y` line on stdout. Logs go to stderr.
//!
//! # Examples
//!
//! ```bash
//! # Verbose decision logs, wider target search
//! RUST_LOG=runtime=debug BOOMER_SCAN_RADIUS=6 cargo run -p boomer-client < game.txt
//!
//! # Dump every per-turn map to a log file
//! RUST_LOG=trace BOOMER_LOG_DIR=./logs cargo run -p boomer-client < game.txt
//! ```

use std::io;

use anyhow::Result;
use boomer_client::{ClientConfig, Session, logging};

fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let config = ClientConfig::from_env();
    let _guard = logging::setup_logging(config.log_dir.as_deref())?;

    tracing::info!("Starting Boomer agent");
    tracing::debug!(?config, "Configuration loaded");

    let turns = Session::new(config.engine).run(io::stdin().lock(), io::stdout().lock())?;

    tracing::info!("Session finished after {turns} turns");
    Ok(())
}
