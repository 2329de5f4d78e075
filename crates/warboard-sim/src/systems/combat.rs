//! Combat resolver: move paths, per-step resolution and unit clashes.

use rand::Rng;
use rand_chacha::ChaCha8Rng;

use warboard_core::config::RulesConfig;
use warboard_core::enums::{ClashOutcome, SideId, UnitKind};
use warboard_core::error::RejectReason;
use warboard_core::events::OutcomeEvent;
use warboard_core::types::GridPos;

use crate::action::MoveSequence;
use crate::battlefield::{Battlefield, UnitRecord};
use crate::side::Sides;
use crate::systems::{economy, radar};
use crate::systems::radar::Intel;

/// Greedy L-shaped path from `from` toward `to`: x first, then y, at most
/// `range` tiles. The origin is not part of the path.
pub fn plan_path(from: GridPos, to: GridPos, range: u32) -> Result<Vec<GridPos>, RejectReason> {
    if range == 0 {
        return Err(RejectReason::Immobile);
    }
    if from == to {
        return Err(RejectReason::NoPath);
    }
    let distance = from.manhattan(&to);
    if distance > range {
        return Err(RejectReason::OutOfRange { distance, range });
    }

    let dx = (to.x - from.x).signum();
    let dy = (to.y - from.y).signum();
    let mut cursor = from;
    let mut path = Vec::with_capacity(distance as usize);
    while cursor != to && path.len() < range as usize {
        if cursor.x != to.x {
            cursor.x += dx;
        } else {
            cursor.y += dy;
        }
        path.push(cursor);
    }
    Ok(path)
}

/// Clash between a moving attacker and the unit standing on its next tile.
pub fn resolve_clash(attacker: UnitKind, defender: UnitKind, rng: &mut ChaCha8Rng) -> ClashOutcome {
    use UnitKind::*;

    match (attacker, defender) {
        (Jet, Tank | Troop) => ClashOutcome::AttackerWins,
        (Tank, Troop) => ClashOutcome::AttackerWins,
        (Tank | Troop, Jet) => ClashOutcome::DefenderWins,
        (Troop, Tank) => ClashOutcome::DefenderWins,
        _ => {
            let a = attacker.stats().power as f64 + rng.gen::<f64>();
            let d = defender.stats().power as f64 + rng.gen::<f64>();
            if a >= d {
                ClashOutcome::AttackerWins
            } else {
                ClashOutcome::DefenderWins
            }
        }
    }
}

/// Result of entering one path tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// The mover now stands on the tile.
    Advanced,
    /// The path ends here; the mover is dead or still on its previous tile.
    Halted,
}

/// Resolve `mover` (owned by `side`) entering `tile`.
#[allow(clippy::too_many_arguments)]
pub fn resolve_step(
    field: &mut Battlefield,
    sides: &mut Sides,
    rules: &RulesConfig,
    intel: &mut Intel,
    rng: &mut ChaCha8Rng,
    events: &mut Vec<OutcomeEvent>,
    side: SideId,
    mover: UnitRecord,
    tile: GridPos,
) -> StepOutcome {
    let enemy = side.opponent();

    if mover.kind == UnitKind::Jet {
        let defender = sides.get(enemy);
        let battery = radar::find_interceptor(
            field,
            enemy,
            defender.radar_range(rules),
            defender.aa_range(rules),
            tile,
        );
        if battery.is_some() {
            field.remove(mover.entity);
            let reward = economy::award_jet_kill(sides.get_mut(enemy), rules);
            tracing::info!(?side, at = %tile, reward, "jet shot down");
            events.push(OutcomeEvent::JetShotDown {
                defender: enemy,
                at: tile,
                reward,
            });
            return StepOutcome::Halted;
        }
    }

    if let Some(target) = field.unit_at(enemy, tile) {
        let outcome = resolve_clash(mover.kind, target.kind, rng);
        match outcome {
            ClashOutcome::AttackerWins => {
                field.remove(target.entity);
                intel.reveal(side, tile);
            }
            ClashOutcome::DefenderWins => {
                field.remove(mover.entity);
            }
        }
        tracing::info!(
            ?side,
            attacker = ?mover.kind,
            defender = ?target.kind,
            at = %tile,
            ?outcome,
            "clash"
        );
        events.push(OutcomeEvent::ClashResolved {
            attacker: side,
            attacker_kind: mover.kind,
            defender_kind: target.kind,
            at: tile,
            outcome,
        });
        return StepOutcome::Halted;
    }

    match field.relocate_unit(mover.entity, tile) {
        Ok(()) => StepOutcome::Advanced,
        Err(reason) => {
            tracing::debug!(?side, at = %tile, %reason, "move blocked");
            StepOutcome::Halted
        }
    }
}

/// Advance a move sequence by one tick. Returns true once it has finished.
#[allow(clippy::too_many_arguments)]
pub fn run(
    seq: &mut MoveSequence,
    field: &mut Battlefield,
    sides: &mut Sides,
    rules: &RulesConfig,
    intel: &mut Intel,
    rng: &mut ChaCha8Rng,
    events: &mut Vec<OutcomeEvent>,
) -> bool {
    let side = seq.side;
    let Some(order) = seq.order.as_mut() else {
        return true;
    };
    let Some(mover) = field.unit_record(order.entity) else {
        return true;
    };
    let Some(&tile) = order.path.get(order.next) else {
        return true;
    };

    order.frames = order.frames.saturating_sub(1);
    if order.frames > 0 {
        return false;
    }

    match resolve_step(field, sides, rules, intel, rng, events, side, mover, tile) {
        StepOutcome::Advanced => {
            order.next += 1;
            order.frames = order.kind.stats().step_ticks;
            order.next >= order.path.len()
        }
        StepOutcome::Halted => {
            order.next = order.path.len();
            true
        }
    }
}
