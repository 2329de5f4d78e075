//! ECS components for hecs entities, plus the plain data they reference.
//!
//! Components are plain data structs. Game logic lives in systems.

use serde::{Deserialize, Serialize};

use crate::config::RulesConfig;
use crate::enums::*;

/// Stable identifier of a board asset, never reused within a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AssetId(pub u32);

/// Which side owns an asset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Owner(pub SideId);

/// A mobile unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Unit {
    pub kind: UnitKind,
    /// +1 faces toward higher columns, -1 toward lower.
    pub facing: i8,
}

/// An immobile radar or AA battery.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StaticDefense {
    pub kind: DefenseKind,
}

/// An infrastructure target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Facility {
    pub kind: FacilityKind,
}

/// Immutable per-kind unit stats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnitStats {
    /// Clash strength and territorial damage per turn.
    pub power: u32,
    /// Max tiles per move order; 0 means immobile.
    pub range: u32,
    /// Ticks spent on each tile step (presentation pacing).
    pub step_ticks: u32,
}

impl UnitKind {
    pub fn stats(self) -> UnitStats {
        match self {
            UnitKind::Tank => UnitStats {
                power: 3,
                range: 4,
                step_ticks: 18,
            },
            UnitKind::Troop => UnitStats {
                power: 1,
                range: 2,
                step_ticks: 26,
            },
            UnitKind::Jet => UnitStats {
                power: 4,
                range: 6,
                step_ticks: 10,
            },
        }
    }
}

/// A missile type in a side's inventory. Firing never consumes it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MissileSpec {
    pub name: String,
    pub range_km: u32,
    /// Rated damage in percent.
    pub damage: u32,
    /// Splash radius in tiles (Manhattan).
    pub radius: u32,
    /// Anti-radar missiles ignore AA interception.
    #[serde(default)]
    pub anti_radar: bool,
}

impl MissileSpec {
    pub fn new(name: impl Into<String>, range_km: u32, damage: u32, radius: u32) -> Self {
        Self {
            name: name.into(),
            range_km,
            damage,
            radius,
            anti_radar: false,
        }
    }

    pub fn anti_radar(mut self) -> Self {
        self.anti_radar = true;
        self
    }

    pub fn range_tiles(&self, rules: &RulesConfig) -> u32 {
        rules.range_tiles(self.range_km)
    }

    /// Blast footprint radius; a zero radius still hits the target's neighbours.
    pub fn splash_radius(&self) -> u32 {
        self.radius.max(1)
    }
}

/// Placeable tokens held in reserve by a side.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenCounts {
    pub tank: u32,
    pub troop: u32,
    pub jet: u32,
    pub anti_air: u32,
    pub radar: u32,
}

impl TokenCounts {
    pub fn get(&self, kind: TokenKind) -> u32 {
        match kind {
            TokenKind::Tank => self.tank,
            TokenKind::Troop => self.troop,
            TokenKind::Jet => self.jet,
            TokenKind::AntiAir => self.anti_air,
            TokenKind::Radar => self.radar,
        }
    }

    fn slot(&mut self, kind: TokenKind) -> &mut u32 {
        match kind {
            TokenKind::Tank => &mut self.tank,
            TokenKind::Troop => &mut self.troop,
            TokenKind::Jet => &mut self.jet,
            TokenKind::AntiAir => &mut self.anti_air,
            TokenKind::Radar => &mut self.radar,
        }
    }

    pub fn add(&mut self, kind: TokenKind, count: u32) {
        *self.slot(kind) += count;
    }

    /// Remove one token. Returns false (and changes nothing) if none are left.
    pub fn take(&mut self, kind: TokenKind) -> bool {
        let slot = self.slot(kind);
        if *slot == 0 {
            return false;
        }
        *slot -= 1;
        true
    }
}
