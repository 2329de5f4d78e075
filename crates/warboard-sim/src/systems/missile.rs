//! Missile engine: launch validation, trajectory stepping, interception and
//! splash damage.

use glam::DVec2;
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use warboard_core::board::Board;
use warboard_core::components::MissileSpec;
use warboard_core::config::RulesConfig;
use warboard_core::enums::SideId;
use warboard_core::error::RejectReason;
use warboard_core::events::OutcomeEvent;
use warboard_core::types::GridPos;

use crate::action::{InterceptorFlight, MissileFlight};
use crate::battlefield::Battlefield;
use crate::side::{SideState, Sides};
use crate::systems::radar::{self, Intel};
use crate::systems::economy;

/// Check a launch without touching any state. Returns the missile to fly.
pub fn validate_launch(
    board: &Board,
    rules: &RulesConfig,
    firer: &SideState,
    side: SideId,
    missile: usize,
    launch: GridPos,
    target: GridPos,
) -> Result<MissileSpec, RejectReason> {
    if firer.shots_left == 0 {
        return Err(RejectReason::NoShotsLeft);
    }
    let spec = firer
        .missiles
        .get(missile)
        .ok_or(RejectReason::UnknownMissile(missile))?;
    if !board.is_home(side, launch) {
        return Err(RejectReason::NotHomeTile(launch));
    }
    if !board.is_home(side.opponent(), target) {
        return Err(RejectReason::TargetNotEnemy(target));
    }
    let range = spec.range_tiles(rules);
    let distance = launch.manhattan(&target);
    if distance > range {
        return Err(RejectReason::OutOfRange { distance, range });
    }
    Ok(spec.clone())
}

/// Straight line between tile centres, one point per `missile_px_per_step`
/// pixels but never fewer than `missile_min_steps` segments.
pub fn trajectory(board: &Board, rules: &RulesConfig, from: GridPos, to: GridPos) -> Vec<DVec2> {
    let start = board.tile_center(from);
    let end = board.tile_center(to);
    let distance_px = start.distance(end) * rules.tile_px;
    let steps = ((distance_px / rules.missile_px_per_step).floor() as u32)
        .max(rules.missile_min_steps)
        .max(1);
    (0..=steps)
        .map(|i| start.lerp(end, i as f64 / steps as f64))
        .collect()
}

pub fn launch(
    board: &Board,
    rules: &RulesConfig,
    attacker: SideId,
    missile: MissileSpec,
    launch: GridPos,
    target: GridPos,
) -> MissileFlight {
    MissileFlight {
        attacker,
        missile,
        launch,
        target,
        path: trajectory(board, rules, launch, target),
        step: 0,
        hold: rules.missile_hold_ticks.max(1),
        last_checked: None,
        interceptor: None,
    }
}

/// Interceptor flight time in ticks from `battery` to `aim`.
pub fn interceptor_duration(board: &Board, rules: &RulesConfig, battery: GridPos, aim: DVec2) -> u32 {
    let distance_px = board.tile_center(battery).distance(aim) * rules.tile_px;
    let steps = ((distance_px / rules.interceptor_px_per_step).floor() as u32).max(rules.interceptor_min_steps);
    steps + 1
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlightStatus {
    InFlight,
    /// The interceptor reached the missile. No splash.
    Intercepted,
    /// The missile passed its last point and hits the target.
    Landed,
}

/// Advance a flight by one tick.
///
/// The interceptor moves first, so a missile whose interceptor completes on
/// the same tick it would land is destroyed.
pub fn run(
    flight: &mut MissileFlight,
    field: &Battlefield,
    board: &Board,
    rules: &RulesConfig,
    defender: &SideState,
    events: &mut Vec<OutcomeEvent>,
) -> FlightStatus {
    if let Some(interceptor) = flight.interceptor.as_mut() {
        interceptor.elapsed += 1;
        if interceptor.elapsed >= interceptor.duration {
            return FlightStatus::Intercepted;
        }
    }

    flight.hold = flight.hold.saturating_sub(1);
    if flight.hold > 0 {
        return FlightStatus::InFlight;
    }
    flight.hold = rules.missile_hold_ticks.max(1);
    flight.step += 1;

    let Some(&point) = flight.path.get(flight.step) else {
        return FlightStatus::Landed;
    };
    let tile = board.tile_at(point);
    if flight.interceptor.is_some()
        || flight.missile.anti_radar
        || flight.last_checked == Some(tile)
    {
        return FlightStatus::InFlight;
    }
    flight.last_checked = Some(tile);

    let defending = flight.defender();
    if let Some(battery) = radar::find_interceptor(
        field,
        defending,
        defender.radar_range(rules),
        defender.aa_range(rules),
        tile,
    ) {
        tracing::debug!(defender = ?defending, battery = %battery, at = %tile, "interceptor away");
        flight.interceptor = Some(InterceptorFlight {
            battery,
            origin: board.tile_center(battery),
            aim: point,
            duration: interceptor_duration(board, rules, battery, point),
            elapsed: 0,
        });
        events.push(OutcomeEvent::InterceptorLaunched {
            defender: defending,
            battery,
        });
    }
    FlightStatus::InFlight
}

/// Outcome of a landed missile.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StrikeReport {
    pub damage: u32,
    pub asset_hits: u32,
    pub reward: u32,
}

/// Splash damage on `target`. Destroys every defender asset in the blast,
/// damages the defender and pays the attacker.
#[allow(clippy::too_many_arguments)]
pub fn resolve_strike(
    field: &mut Battlefield,
    board: &Board,
    rules: &RulesConfig,
    sides: &mut Sides,
    intel: &mut Intel,
    rng: &mut ChaCha8Rng,
    attacker: SideId,
    missile: &MissileSpec,
    target: GridPos,
) -> StrikeReport {
    let defender = attacker.opponent();
    let affected = board.tiles_within(target, missile.splash_radius());

    let mut asset_hits: u32 = 0;
    for tile in &affected {
        intel.reveal(attacker, *tile);
        if field.remove_all_at(defender, *tile) > 0 {
            asset_hits += 1;
        }
    }

    let base = if asset_hits > 0 {
        (missile.damage as f64 * rules.strike_damage_factor).floor() as u32
    } else {
        rng.gen_range(0..=1)
    };
    let bonus = asset_hits.saturating_sub(1) * rules.multi_hit_bonus;
    let damage = (base + bonus).min(rules.max_strike_damage);

    let (attacking, defending) = sides.split_mut(attacker);
    defending.apply_damage(damage);
    let reward = economy::award_strike(attacking, rules, damage, asset_hits);

    StrikeReport {
        damage,
        asset_hits,
        reward,
    }
}
