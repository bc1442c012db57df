//! Per-turn decision context.
//!
//! [`TurnContext`] is the blackboard shared by the evaluator, the lookahead
//! and the danger check: the validated world, its explosion forecast and the
//! search field from the agent's cell, all computed once per turn.

use game_core::{
    Agent, CellType, EngineConfig, ExplosionForecast, Position, SearchField, WorldState,
};

pub struct TurnContext<'a> {
    /// Tunables for this turn.
    pub config: &'a EngineConfig,

    /// Read-only world as ingested from the snapshot.
    pub world: &'a WorldState,

    /// Explosion timeline of the bombs currently on the board.
    pub forecast: ExplosionForecast,

    /// Distances, safety and utility from the agent's position.
    pub field: SearchField,
}

impl<'a> TurnContext<'a> {
    /// Runs propagation and search for `world`.
    pub fn new(config: &'a EngineConfig, world: &'a WorldState) -> Self {
        let forecast = ExplosionForecast::for_world(world);
        let field = SearchField::for_agent(world, &forecast);
        Self {
            config,
            world,
            forecast,
            field,
        }
    }

    pub fn me(&self) -> &Agent {
        &self.world.me
    }

    pub fn position(&self) -> Position {
        self.world.me.position
    }

    /// Cells never chosen as targets: bomb cells and cells a pending blast
    /// will destroy.
    pub fn is_ignored(&self, position: Position) -> bool {
        self.world.grid.get(position) == Some(CellType::BombOccupied)
            || self.forecast.is_doomed(position)
    }

    pub fn is_passable(&self, position: Position) -> bool {
        self.world
            .grid
            .get(position)
            .is_some_and(CellType::is_passable)
    }
}
