//! Match setup: side creation, facility placement and adversary seeding.

use std::collections::HashSet;
use std::ops::Range;

use rand::seq::SliceRandom;
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use warboard_core::board::Board;
use warboard_core::catalogue::CountryCatalogue;
use warboard_core::config::RulesConfig;
use warboard_core::constants::*;
use warboard_core::enums::*;
use warboard_core::error::RejectReason;
use warboard_core::types::GridPos;

use crate::battlefield::Battlefield;
use crate::side::{SideState, Sides};

/// Build both sides from the catalogue. The player side is human-driven.
pub fn create_sides(
    catalogue: &CountryCatalogue,
    rules: &RulesConfig,
    player: &str,
    adversary: &str,
) -> Result<Sides, RejectReason> {
    if player == adversary {
        return Err(RejectReason::SameCountry);
    }
    let player_profile = catalogue
        .get(player)
        .ok_or_else(|| RejectReason::UnknownCountry(player.to_string()))?;
    let adversary_profile = catalogue
        .get(adversary)
        .ok_or_else(|| RejectReason::UnknownCountry(adversary.to_string()))?;

    Ok(Sides {
        player: SideState::from_profile(player, player_profile, true, rules),
        adversary: SideState::from_profile(adversary, adversary_profile, false, rules),
    })
}

fn random_tile(board: &Board, rng: &mut ChaCha8Rng, columns: &Range<i32>) -> GridPos {
    GridPos::new(
        rng.gen_range(columns.clone()),
        rng.gen_range(0..board.height),
    )
}

/// Place one of each facility on distinct random rear tiles of `side`.
pub fn place_facilities(field: &mut Battlefield, board: &Board, rng: &mut ChaCha8Rng, side: SideId) {
    let rear = board.rear_columns(side);
    if rear.is_empty() {
        return;
    }
    for kind in FacilityKind::ALL {
        for _ in 0..FACILITY_PLACEMENT_ATTEMPTS {
            let pos = random_tile(board, rng, &rear);
            if field.spawn_facility(side, kind, pos).is_ok() {
                break;
            }
        }
    }
}

/// Walk down the column from `pos` (wrapping) to the first unused row.
fn shift_until_free(board: &Board, used: &HashSet<GridPos>, mut pos: GridPos) -> Option<GridPos> {
    for _ in 0..board.height {
        if !used.contains(&pos) {
            return Some(pos);
        }
        pos.y = (pos.y + 1).rem_euclid(board.height);
    }
    None
}

/// Deploy a computer-controlled side's starting forces.
///
/// Mobile units go on random free rear tiles. Radars go in the rear columns
/// nearest the midline. AA batteries cluster around a random radar. Every
/// token used is consumed.
pub fn seed_adversary(
    field: &mut Battlefield,
    board: &Board,
    rng: &mut ChaCha8Rng,
    state: &mut SideState,
    side: SideId,
) {
    let rear = board.rear_columns(side);
    if rear.is_empty() {
        return;
    }
    let mut used: HashSet<GridPos> = HashSet::new();

    for kind in [UnitKind::Tank, UnitKind::Troop, UnitKind::Jet] {
        for _ in 0..state.tokens.get(kind.into()) {
            let free = (0..FACILITY_PLACEMENT_ATTEMPTS)
                .map(|_| random_tile(board, rng, &rear))
                .find(|pos| !used.contains(pos));
            let Some(pos) = free else { continue };
            if field.spawn_unit(side, kind, pos).is_ok() {
                used.insert(pos);
                state.tokens.take(kind.into());
            }
        }
    }

    let band = board.forward_band(side, RADAR_SEED_DEPTH);
    let mut radars = Vec::new();
    for _ in 0..state.tokens.radar.max(1) {
        let Some(pos) = shift_until_free(board, &used, random_tile(board, rng, &band)) else {
            continue;
        };
        if field.spawn_defense(side, DefenseKind::Radar, pos).is_ok() {
            used.insert(pos);
            radars.push(pos);
            state.tokens.take(TokenKind::Radar);
        }
    }

    for _ in 0..(state.tokens.anti_air / 2).max(1) {
        let near = match radars.choose(rng).copied() {
            Some(radar) => GridPos::new(
                (radar.x + rng.gen_range(-AA_SEED_SPREAD..=AA_SEED_SPREAD)).clamp(rear.start, rear.end - 1),
                (radar.y + rng.gen_range(-AA_SEED_SPREAD..=AA_SEED_SPREAD)).clamp(0, board.height - 1),
            ),
            None => random_tile(board, rng, &rear),
        };
        let Some(pos) = shift_until_free(board, &used, near) else {
            continue;
        };
        if field.spawn_defense(side, DefenseKind::AntiAir, pos).is_ok() {
            used.insert(pos);
            state.tokens.take(TokenKind::AntiAir);
        }
    }
}
