//! Per-turn driver.
//!
//! [`Runtime`] owns the only state that survives between turns (the
//! [`Planner`]) and threads every turn through ingestion, propagation,
//! search, evaluation, the danger check and execution. It is synchronous:
//! one call to [`Runtime::play_turn`] per snapshot, one command back.

use game_core::{Agent, EngineConfig, Handshake, TurnSnapshot, WorldState, diagnostics};
use tracing::{Level, debug, enabled, trace, warn};

use crate::ai::{DangerCheck, Lookahead, TargetEvaluator, TurnContext};
use crate::command::Command;
use crate::error::{Result, RuntimeError};
use crate::planner::{Action, ActionKind, Planner, Priority};

pub struct Runtime {
    handshake: Handshake,
    config: EngineConfig,
    planner: Planner,
    turn: u64,
}

impl Runtime {
    pub fn builder() -> RuntimeBuilder {
        RuntimeBuilder::new()
    }

    pub fn handshake(&self) -> &Handshake {
        &self.handshake
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn planner(&self) -> &Planner {
        &self.planner
    }

    /// Number of turns played so far.
    pub fn turn(&self) -> u64 {
        self.turn
    }

    /// Decides this turn's command.
    ///
    /// A rejected snapshot fails the turn before any map is built; otherwise
    /// exactly one command is returned.
    pub fn play_turn(&mut self, snapshot: &TurnSnapshot) -> Result<Command> {
        let world = WorldState::from_snapshot(&self.handshake, snapshot)?;
        self.turn += 1;
        let me = world.me;
        debug!(turn = self.turn, position = %me.position, bombs = me.bombs_available, range = me.explosion_range, "turn start");

        let retired = self.planner.retire_completed(&me);
        if retired > 0 {
            debug!(retired, pending = self.planner.len(), "retired completed actions");
        }

        let ctx = TurnContext::new(&self.config, &world);
        Self::dump_maps(&ctx);

        if self.planner.iter().any(|action| Self::is_stale(action, &ctx)) {
            debug!(dropped = self.planner.len(), "plan no longer reachable; replanning");
            self.planner.clear();
        }

        if self.planner.is_empty() {
            let objective = TargetEvaluator::select(&ctx);
            debug!(%objective, "new objective");
            self.planner.extend(objective.into_actions());
        } else {
            Self::confirm_bomb(&mut self.planner, &ctx, &me);
        }
        if self.planner.is_empty() {
            self.planner.enqueue(Action::wait(Priority::Low, "idle"));
        }

        if let Some(reaction) = DangerCheck::inspect(&ctx) {
            self.planner.enqueue(reaction.into_action());
        }

        if enabled!(Level::TRACE) {
            trace!("pending actions:\n{}", self.planner.render());
        }

        let command = self.planner.execute_next(&me).unwrap_or_else(|| {
            warn!(position = %me.position, "no executable action; waiting");
            Command::wait(me.position, "no executable action")
        });
        debug!(%command, "turn end");
        Ok(command)
    }

    /// Re-checks a carried-over bomb step that fires this turn.
    ///
    /// Remote sites are chosen without a lookahead; on arrival the bomb must
    /// leave an escape like any self-bomb. A site without one drops the plan
    /// and selection runs again from the current cell.
    fn confirm_bomb(planner: &mut Planner, ctx: &TurnContext, me: &Agent) {
        let Some(site) = planner
            .next_executable(me)
            .and_then(|action| action.arming_site(me))
        else {
            return;
        };

        match Lookahead::verify(ctx, site) {
            Some(plan) => {
                debug!(%site, retreat = ?plan.retreat, "planned bomb confirmed");
                if let Some(target) = plan.retreat {
                    let queued = planner
                        .iter()
                        .any(|action| action.kind == ActionKind::Move { target });
                    if !queued {
                        planner.enqueue(Action::move_to(Priority::Normal, target));
                    }
                }
            }
            None => {
                debug!(%site, "planned bomb leaves no escape; replanning");
                planner.clear();
                let objective = TargetEvaluator::select(ctx);
                debug!(%objective, "new objective");
                planner.extend(objective.into_actions());
            }
        }
    }

    /// A plan step whose destination the search can no longer reach.
    fn is_stale(action: &Action, ctx: &TurnContext) -> bool {
        match action.kind {
            ActionKind::Move { target } => !ctx.field.is_reachable(target),
            ActionKind::PlaceBombAndAdvance { site, .. } => !ctx.field.is_reachable(site),
            ActionKind::Wait { .. } => false,
        }
    }

    fn dump_maps(ctx: &TurnContext) {
        if !enabled!(Level::TRACE) {
            return;
        }
        trace!("world:\n{}", diagnostics::render_world(ctx.world));
        trace!("explosions:\n{}", diagnostics::render_explosions(&ctx.forecast));
        trace!("distances:\n{}", diagnostics::render_distances(&ctx.field));
        trace!("safety:\n{}", diagnostics::render_safety(&ctx.field));
        trace!("utility:\n{}", diagnostics::render_utility(&ctx.field));
    }
}

/// Builder for [`Runtime`].
pub struct RuntimeBuilder {
    config: EngineConfig,
    handshake: Option<Handshake>,
}

impl RuntimeBuilder {
    fn new() -> Self {
        Self {
            config: EngineConfig::default(),
            handshake: None,
        }
    }

    /// Override engine configuration
    pub fn config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the session handshake (required)
    pub fn handshake(mut self, handshake: Handshake) -> Self {
        self.handshake = Some(handshake);
        self
    }

    pub fn build(self) -> Result<Runtime> {
        let handshake = self.handshake.ok_or(RuntimeError::MissingHandshake)?;
        debug!(?handshake, config = ?self.config, "runtime ready");
        Ok(Runtime {
            handshake,
            config: self.config,
            planner: Planner::new(),
            turn: 0,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use game_core::{AgentId, EntityRecord, GameError, Position};

    fn runtime(width: u32, height: u32) -> Runtime {
        Runtime::builder()
            .handshake(Handshake::new(width, height, AgentId(0)))
            .build()
            .unwrap()
    }

    #[test]
    fn build_requires_handshake() {
        let err = Runtime::builder().build().err().unwrap();
        assert_eq!(err.error_code(), "RUNTIME_MISSING_HANDSHAKE");
    }

    #[test]
    fn bad_snapshot_fails_the_turn() {
        let mut runtime = runtime(3, 1);
        let snapshot = TurnSnapshot::from_rows(&["..."], vec![]);

        let err = runtime.play_turn(&snapshot).unwrap_err();
        assert!(matches!(err, RuntimeError::Snapshot(_)));
        assert_eq!(err.error_code(), "SNAPSHOT_MISSING_SELF");
        assert_eq!(runtime.turn(), 0);
        assert!(runtime.planner().is_empty());
    }

    #[test]
    fn empty_board_waits_in_place() {
        let mut runtime = runtime(3, 1);
        let snapshot = TurnSnapshot::from_rows(&["..."], vec![EntityRecord::agent(0, 1, 0, 1, 3)]);

        let command = runtime.play_turn(&snapshot).unwrap();
        assert_eq!(command, Command::wait(Position::new(1, 0), "nothing to do"));
        assert!(runtime.planner().is_empty());
    }

    #[test]
    fn plan_survives_across_turns() {
        let mut runtime = runtime(5, 1);
        let agent_at = |x| TurnSnapshot::from_rows(&["...0."], vec![EntityRecord::agent(0, x, 0, 1, 2)]);

        assert_eq!(
            runtime.play_turn(&agent_at(0)).unwrap(),
            Command::move_to(Position::new(1, 0))
        );
        assert_eq!(runtime.planner().len(), 3);
        assert_eq!(
            runtime.play_turn(&agent_at(1)).unwrap(),
            Command::move_to(Position::new(2, 0))
        );
        assert_eq!(
            runtime.play_turn(&agent_at(2)).unwrap(),
            Command::bomb(Position::new(2, 0))
        );
    }

    #[test]
    fn remote_site_without_escape_is_not_bombed() {
        let mut runtime = runtime(3, 4);
        let agent_at = |y| {
            TurnSnapshot::from_rows(
                &["X0X", "X.X", "X.X", "X.X"],
                vec![EntityRecord::agent(0, 1, y, 1, 3)],
            )
        };

        assert_eq!(
            runtime.play_turn(&agent_at(3)).unwrap(),
            Command::move_to(Position::new(1, 2))
        );
        // Bombing (1,2) would cover the whole pocket.
        let command = runtime.play_turn(&agent_at(2)).unwrap();
        assert!(!command.is_bomb(), "{command}");
        assert_eq!(command, Command::move_to(Position::new(1, 1)));
        assert!(
            runtime
                .planner()
                .iter()
                .all(|action| !matches!(action.kind, ActionKind::PlaceBombAndAdvance { site, .. } if site == Position::new(1, 2)))
        );
    }

    #[test]
    fn confirmed_remote_bomb_gets_a_retreat() {
        let mut runtime = runtime(5, 2);
        let agent_at = |x| {
            TurnSnapshot::from_rows(&["...0.", "....."], vec![EntityRecord::agent(0, x, 0, 1, 2)])
        };

        runtime.play_turn(&agent_at(0)).unwrap();
        runtime.play_turn(&agent_at(1)).unwrap();
        assert_eq!(
            runtime.play_turn(&agent_at(2)).unwrap(),
            Command::bomb(Position::new(2, 0))
        );
        let pending: Vec<_> = runtime.planner().iter().map(|action| action.kind.clone()).collect();
        assert_eq!(pending.len(), 1);
        assert!(
            matches!(pending[0], ActionKind::Move { target } if target.manhattan(Position::new(2, 0)) == 1)
        );
    }

    #[test]
    fn blocked_plan_is_replaced() {
        let mut runtime = runtime(5, 2);
        let first = TurnSnapshot::from_rows(
            &["...0.", "....."],
            vec![EntityRecord::agent(0, 0, 0, 1, 2)],
        );
        assert_eq!(
            runtime.play_turn(&first).unwrap(),
            Command::move_to(Position::new(1, 0))
        );

        // Another agent's bomb now sits on the planned bomb site.
        let second = TurnSnapshot::from_rows(
            &["...0.", "....."],
            vec![
                EntityRecord::agent(0, 1, 0, 1, 2),
                EntityRecord::agent(1, 2, 1, 0, 2),
                EntityRecord::bomb(1, 2, 0, 8, 2),
            ],
        );
        let command = runtime.play_turn(&second).unwrap();
        assert_ne!(command, Command::move_to(Position::new(2, 0)));
        assert!(
            runtime
                .planner()
                .iter()
                .all(|action| !matches!(action.kind, ActionKind::PlaceBombAndAdvance { site, .. } if site == Position::new(2, 0)))
        );
    }
}
