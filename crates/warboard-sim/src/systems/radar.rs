//! Radar coverage, enemy reveals and the radar-AA coupling used by every
//! interception.

use std::collections::BTreeSet;

use warboard_core::board::Board;
use warboard_core::config::RulesConfig;
use warboard_core::enums::{DefenseKind, SideId};
use warboard_core::types::GridPos;

use crate::battlefield::Battlefield;
use crate::side::Sides;

/// What one side knows about the other half of the board.
#[derive(Debug, Clone, Default)]
pub struct SideIntel {
    /// Enemy-half tiles inside this side's radar coverage. Rebuilt every tick.
    pub coverage: BTreeSet<GridPos>,
    /// Tiles this side has seen at least once this match.
    pub revealed: BTreeSet<GridPos>,
}

#[derive(Debug, Clone, Default)]
pub struct Intel {
    pub player: SideIntel,
    pub adversary: SideIntel,
}

impl Intel {
    pub fn get(&self, observer: SideId) -> &SideIntel {
        match observer {
            SideId::Player => &self.player,
            SideId::Adversary => &self.adversary,
        }
    }

    pub fn get_mut(&mut self, observer: SideId) -> &mut SideIntel {
        match observer {
            SideId::Player => &mut self.player,
            SideId::Adversary => &mut self.adversary,
        }
    }

    pub fn reveal(&mut self, observer: SideId, tile: GridPos) {
        self.get_mut(observer).revealed.insert(tile);
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Whether an asset owned by `owner` on `pos` is visible to its opponent.
    pub fn is_spotted(&self, owner: SideId, pos: GridPos) -> bool {
        let observer = self.get(owner.opponent());
        observer.coverage.contains(&pos) || observer.revealed.contains(&pos)
    }
}

/// The AA battery `defender` would fire at a threat on `tile`, if any.
///
/// Requires a friendly radar within `radar_range` of the tile; the battery
/// is then the nearest AA within `aa_range`, earliest placed on ties.
pub fn find_interceptor(
    field: &Battlefield,
    defender: SideId,
    radar_range: u32,
    aa_range: u32,
    tile: GridPos,
) -> Option<GridPos> {
    let radar_sees = field
        .defenses(defender, DefenseKind::Radar)
        .iter()
        .any(|radar| radar.within(&tile, radar_range));
    if !radar_sees {
        return None;
    }

    let mut best: Option<(u32, GridPos)> = None;
    for battery in field.defenses(defender, DefenseKind::AntiAir) {
        let d = battery.manhattan(&tile);
        if d <= aa_range && best.map_or(true, |(bd, _)| d < bd) {
            best = Some((d, battery));
        }
    }
    best.map(|(_, battery)| battery)
}

/// Enemy-half tiles within `radar_range` of any of `side`'s radars.
pub fn coverage(
    field: &Battlefield,
    board: &Board,
    side: SideId,
    radar_range: u32,
) -> BTreeSet<GridPos> {
    field
        .defenses(side, DefenseKind::Radar)
        .into_iter()
        .flat_map(|radar| board.tiles_within(radar, radar_range))
        .filter(|tile| board.is_home(side.opponent(), *tile))
        .collect()
}

/// Recompute coverage for both sides and record radar reveals.
///
/// A radar with any enemy unit inside its range gives its own tile away to
/// that enemy for the rest of the match.
pub fn run(field: &Battlefield, board: &Board, sides: &Sides, rules: &RulesConfig, intel: &mut Intel) {
    for side in [SideId::Player, SideId::Adversary] {
        let range = sides.get(side).radar_range(rules);
        intel.get_mut(side).coverage = coverage(field, board, side, range);

        let intruders = field.units(side.opponent());
        for radar in field.defenses(side, DefenseKind::Radar) {
            if intruders.iter().any(|u| u.pos.within(&radar, range)) {
                intel.reveal(side.opponent(), radar);
            }
        }
    }
}
