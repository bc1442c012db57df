//! Target selection.
//!
//! The evaluator picks the cell the agent should head for and turns it into
//! an [`Objective`]:
//!
//! 1. **Primary selection**: highest-utility cell within the scan radius,
//!    ties to the closer cell, then to the lower row-major index.
//! 2. **Self-bomb verification**: a target under the agent's feet is only
//!    accepted once the [`Lookahead`] confirms an escape; otherwise its
//!    utility is suppressed and selection repeats, within the lookahead
//!    budget.
//! 3. **Fallback**: with no target left, walk to the nearest unthreatened
//!    cell, or wait.

use game_core::{Position, SearchField};
use tracing::{debug, warn};

use super::{Lookahead, Objective, TurnContext};

/// A ranked target candidate.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Candidate {
    pub position: Position,
    pub utility: u32,
    pub distance: u32,
}

pub struct TargetEvaluator;

impl TargetEvaluator {
    /// Chooses the next objective for the agent.
    pub fn select(ctx: &TurnContext) -> Objective {
        let mut field = ctx.field.clone();
        let budget = ctx.config.lookahead_budget();
        let mut rounds = 0;

        while let Some(candidate) = Self::best_candidate(ctx, &field) {
            let site = candidate.position;
            if site != ctx.position() {
                debug!(%site, utility = candidate.utility, distance = candidate.distance, "remote target");
                return Objective::BombAt {
                    site,
                    path: field.path_to(site),
                };
            }

            if rounds == budget {
                debug!(budget, "lookahead budget exhausted");
                break;
            }
            rounds += 1;

            match Lookahead::verify(ctx, site) {
                Some(plan) => {
                    debug!(%site, retreat = ?plan.retreat, "bomb verified");
                    return Objective::BombHere {
                        site,
                        retreat: plan.retreat,
                    };
                }
                None => {
                    debug!(%site, "no escape after bombing; suppressing target");
                    field.suppress(site);
                }
            }
        }

        Self::fallback(ctx)
    }

    /// Highest-utility eligible cell of `field`.
    ///
    /// Eligible cells are reachable within the scan radius, have non-zero
    /// utility, and are not ignored (bombs and cells about to be destroyed).
    pub fn best_candidate(ctx: &TurnContext, field: &SearchField) -> Option<Candidate> {
        let mut best: Option<Candidate> = None;

        for (position, entry) in field.reachable() {
            if entry.distance > ctx.config.scan_radius || ctx.is_ignored(position) {
                continue;
            }
            let utility = field.utility(position);
            if utility == 0 {
                continue;
            }

            let candidate = Candidate {
                position,
                utility,
                distance: entry.distance,
            };
            // Row-major iteration: on a full tie the earlier cell stays.
            let better = best.is_none_or(|current| {
                (candidate.utility, std::cmp::Reverse(candidate.distance))
                    > (current.utility, std::cmp::Reverse(current.distance))
            });
            if better {
                best = Some(candidate);
            }
        }

        debug!(best = ?best, "target scan");
        best
    }

    /// Nearest unthreatened cell, or wait if already on one or none exists.
    pub fn fallback(ctx: &TurnContext) -> Objective {
        let field = &ctx.field;
        if field.safety(ctx.position()).is_unthreatened() {
            return Objective::Wait {
                reason: "nothing to do",
            };
        }

        match field.nearest(|position| field.safety(position).is_unthreatened()) {
            Some(target) => {
                debug!(%target, "retreating to safety");
                Objective::Retreat {
                    target,
                    path: field.path_to(target),
                }
            }
            None => {
                warn!(position = %ctx.position(), "no safe cell reachable");
                Objective::Wait {
                    reason: "no safe cell",
                }
            }
        }
    }
}
