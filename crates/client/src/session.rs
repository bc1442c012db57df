//! One game, from handshake to end of input.
use std::io::{BufRead, Write};

use game_core::{EngineConfig, GameError};
use runtime::Runtime;
use tracing::{debug, error, info};

use crate::error::ClientError;
use crate::protocol;

/// Drives a [`Runtime`] over a line-protocol stream.
#[derive(Clone, Debug, Default)]
pub struct Session {
    config: EngineConfig,
}

impl Session {
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Reads the handshake, then answers every turn with exactly one command
    /// line until the input ends. Returns the number of turns played.
    ///
    /// Output is flushed after each command; the game waits on it.
    pub fn run<R: BufRead, W: Write>(&self, mut reader: R, mut writer: W) -> Result<u64, ClientError> {
        let handshake = protocol::read_handshake(&mut reader)?;
        info!(
            width = handshake.width,
            height = handshake.height,
            self_id = %handshake.self_id,
            "Handshake received"
        );

        let mut runtime = Runtime::builder()
            .config(self.config.clone())
            .handshake(handshake)
            .build()?;

        while let Some(snapshot) = protocol::read_turn(&mut reader, &handshake)? {
            let command = runtime.play_turn(&snapshot).inspect_err(|err| {
                error!(
                    turn = runtime.turn() + 1,
                    code = err.error_code(),
                    "Turn rejected: {err}"
                );
            })?;
            debug!(turn = runtime.turn(), %command, "Command issued");

            writeln!(writer, "{command}").map_err(ClientError::Output)?;
            writer.flush().map_err(ClientError::Output)?;
        }

        info!(turns = runtime.turn(), "Input closed");
        Ok(runtime.turn())
    }
}
