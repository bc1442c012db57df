//! Combined reachability, danger and utility search.
//!
//! One label-correcting pass from an origin yields everything the decision
//! layer needs about the board: how far each cell is, how much time an agent
//! arriving there has left, and how valuable a bomb dropped there would be.
mod field;
mod safety;
pub mod utility;

pub use field::{PathEntry, SearchField};
pub use safety::{DANGER_HORIZON, Safety};
