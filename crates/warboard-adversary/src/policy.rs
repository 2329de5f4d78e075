//! Turn decision for a computer-controlled side.
//!
//! Pure functions over plain data. No ECS dependency; the caller builds an
//! `AdversaryContext` from whatever state it has (the engine's battlefield,
//! or a public snapshot for the headless autopilot).

use rand::Rng;

use warboard_core::board::Board;
use warboard_core::config::RulesConfig;
use warboard_core::enums::{SideId, UnitKind};
use warboard_core::types::GridPos;

use crate::{maneuver, targeting};

/// A mobile unit the policy may order forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnitSlot {
    pub pos: GridPos,
    pub kind: UnitKind,
}

/// Everything the policy looks at for one turn.
#[derive(Debug, Clone)]
pub struct AdversaryContext {
    pub side: SideId,
    pub board: Board,
    /// Range in tiles of each inventory missile, by inventory index.
    pub missile_ranges: Vec<u32>,
    pub shots_left: u32,
    /// Own mobile units in placement order.
    pub units: Vec<UnitSlot>,
}

/// Tunables taken from the rules.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PolicyParams {
    /// Probability of trying a strike before falling back to a move.
    pub strike_chance: f64,
    /// Maximum launch tiles evaluated per strike.
    pub launch_samples: usize,
}

impl From<&RulesConfig> for PolicyParams {
    fn from(rules: &RulesConfig) -> Self {
        Self {
            strike_chance: rules.adversary_strike_chance,
            launch_samples: rules.adversary_launch_samples,
        }
    }
}

/// What the side does with its turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    Strike {
        missile: usize,
        launch: GridPos,
        target: GridPos,
    },
    /// Move the unit on `from` through `path` (origin excluded).
    Advance { from: GridPos, path: Vec<GridPos> },
    Pass,
}

/// Pick this turn's action.
pub fn decide<R: Rng>(ctx: &AdversaryContext, params: &PolicyParams, rng: &mut R) -> Decision {
    let wants_strike = rng.gen_bool(params.strike_chance.clamp(0.0, 1.0));
    if wants_strike && ctx.shots_left > 0 && !ctx.missile_ranges.is_empty() {
        let missile = rng.gen_range(0..ctx.missile_ranges.len());
        let range = ctx.missile_ranges[missile];
        if let Some(plan) = targeting::best_strike(&ctx.board, ctx.side, range, params.launch_samples, rng) {
            return Decision::Strike {
                missile,
                launch: plan.launch,
                target: plan.target,
            };
        }
    }

    match maneuver::choose_advance(ctx, rng) {
        Some((from, path)) => Decision::Advance { from, path },
        None => Decision::Pass,
    }
}
