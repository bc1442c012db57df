/// Engine constants and tunable parameters.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EngineConfig {
    /// Countdown a freshly placed bomb starts with.
    pub bomb_countdown: u32,
    /// Maximum hop distance from the agent considered when choosing a target.
    /// Bounds the per-turn cost of target selection to a small neighbourhood.
    pub scan_radius: u32,
    /// Number of hypothetical "bomb here" re-simulations target selection may
    /// spend per turn. Retreat candidate searches inside a simulation and the
    /// arrival check of a carried-over bomb plan are not counted.
    pub lookahead_iterations: u32,
    /// When set, a concrete retreat neighbour is chosen and walked to right
    /// after bombing instead of leaving the escape to the next turn's fallback.
    pub retreat_lookahead: bool,
}

impl EngineConfig {
    // ===== runtime-tunable defaults =====
    pub const DEFAULT_BOMB_COUNTDOWN: u32 = 8;
    pub const DEFAULT_SCAN_RADIUS: u32 = 4;
    pub const DEFAULT_LOOKAHEAD_ITERATIONS: u32 = 3;

    // ===== hard limits =====
    /// Upper bound on hypothetical re-simulations per turn.
    pub const MAX_LOOKAHEAD_ITERATIONS: u32 = 5;

    pub fn new() -> Self {
        Self {
            bomb_countdown: Self::DEFAULT_BOMB_COUNTDOWN,
            scan_radius: Self::DEFAULT_SCAN_RADIUS,
            lookahead_iterations: Self::DEFAULT_LOOKAHEAD_ITERATIONS,
            retreat_lookahead: true,
        }
    }

    #[must_use]
    pub fn with_bomb_countdown(mut self, bomb_countdown: u32) -> Self {
        self.bomb_countdown = bomb_countdown;
        self
    }

    #[must_use]
    pub fn with_scan_radius(mut self, scan_radius: u32) -> Self {
        self.scan_radius = scan_radius;
        self
    }

    #[must_use]
    pub fn with_lookahead_iterations(mut self, lookahead_iterations: u32) -> Self {
        self.lookahead_iterations = lookahead_iterations;
        self
    }

    #[must_use]
    pub fn with_retreat_lookahead(mut self, retreat_lookahead: bool) -> Self {
        self.retreat_lookahead = retreat_lookahead;
        self
    }

    /// Effective number of lookahead rounds, clamped to `1..=MAX_LOOKAHEAD_ITERATIONS`.
    pub fn lookahead_budget(&self) -> u32 {
        self.lookahead_iterations
            .clamp(1, Self::MAX_LOOKAHEAD_ITERATIONS)
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::new()
    }
}
