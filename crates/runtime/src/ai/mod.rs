//! Decision layer: target evaluation, bomb lookahead and danger reactions.
//!
//! - [`TurnContext`]: per-turn blackboard (world, forecast, search field)
//! - [`TargetEvaluator`]: picks the next [`Objective`]
//! - [`Lookahead`]: verifies a self-bomb against a hypothetical board
//! - [`DangerCheck`]: injects dodges and holds ahead of the plan

pub mod context;
pub mod danger;
pub mod evaluator;
pub mod lookahead;
pub mod objective;

pub use context::TurnContext;
pub use danger::{DangerCheck, Reaction};
pub use evaluator::{Candidate, TargetEvaluator};
pub use lookahead::{BombPlan, Lookahead};
pub use objective::Objective;
