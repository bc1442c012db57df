pub mod cell;
pub mod common;
pub mod entities;
pub mod grid;
pub mod world;

pub use cell::{CellGroup, CellType};
pub use common::{AgentId, Direction, Position};
pub use entities::{Agent, Bomb, BonusKind};
pub use grid::{Grid, Neighbors};
pub use world::WorldState;
