//! Client configuration loaded from the process environment.
use std::env;
use std::path::PathBuf;

use game_core::EngineConfig;

/// Everything the binary needs before the first turn.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ClientConfig {
    pub engine: EngineConfig,
    /// Directory for an additional log file; stderr only when unset.
    pub log_dir: Option<PathBuf>,
}

impl ClientConfig {
    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `BOOMER_BOMB_COUNTDOWN` - Countdown of a freshly placed bomb (default: 8)
    /// - `BOOMER_SCAN_RADIUS` - Target search radius in steps (default: 4)
    /// - `BOOMER_LOOKAHEAD_ITERATIONS` - Bomb simulations per turn, clamped to 1..=5 (default: 3)
    /// - `BOOMER_RETREAT_LOOKAHEAD` - Plan the retreat step after bombing (default: true)
    /// - `BOOMER_LOG_DIR` - Also write logs to `<dir>/boomer.log` (default: unset)
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) with an arbitrary variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(countdown) = read_var::<u32>(&lookup, "BOOMER_BOMB_COUNTDOWN") {
            config.engine.bomb_countdown = countdown.max(1);
        }
        if let Some(radius) = read_var(&lookup, "BOOMER_SCAN_RADIUS") {
            config.engine.scan_radius = radius;
        }
        if let Some(iterations) = read_var(&lookup, "BOOMER_LOOKAHEAD_ITERATIONS") {
            config.engine.lookahead_iterations = iterations;
        }
        if let Some(enable) = read_var(&lookup, "BOOMER_RETREAT_LOOKAHEAD") {
            config.engine.retreat_lookahead = enable;
        }

        config.log_dir = lookup("BOOMER_LOG_DIR")
            .filter(|dir| !dir.trim().is_empty())
            .map(PathBuf::from);

        config
    }
}

fn read_var<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    lookup(key)?.trim().parse().ok()
}
