//! Decision layer and turn driver for the Boomer agent.
//!
//! This crate turns a per-turn snapshot into exactly one command. It wires
//! the pure board analysis of `game-core` into target evaluation, bomb
//! lookahead, danger reactions and a multi-turn action planner.
//!
//! Modules are organized by responsibility:
//! - [`runtime`] hosts the turn driver and its builder
//! - [`ai`] evaluates targets and reacts to imminent danger
//! - [`planner`] queues and executes multi-turn plans
//! - [`command`] is the output vocabulary
pub mod ai;
pub mod command;
pub mod error;
pub mod planner;
pub mod runtime;

pub use ai::{DangerCheck, Lookahead, Objective, Reaction, TargetEvaluator, TurnContext};
pub use command::{Command, Order};
pub use error::{Result, RuntimeError};
pub use planner::{Action, ActionKind, Planner, Priority};
pub use runtime::{Runtime, RuntimeBuilder};
