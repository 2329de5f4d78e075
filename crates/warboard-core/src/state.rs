//! Game state snapshot: the complete visible state sent to the presentation layer each tick.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::board::Board;
use crate::components::{AssetId, MissileSpec, TokenCounts};
use crate::enums::*;
use crate::events::{Alert, OutcomeEvent};
use crate::types::{GridPos, SimTime};

/// Complete game state broadcast after each tick.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GameStateSnapshot {
    pub time: SimTime,
    pub phase: GamePhase,
    pub board: Board,
    /// Actions the human side may still take this turn.
    pub actions_left: u32,
    pub winner: Option<SideId>,
    pub player: Option<SideView>,
    pub adversary: Option<SideView>,
    /// Every asset on the board, both sides, ordered by id.
    pub assets: Vec<AssetView>,
    pub intel: IntelView,
    pub missile: Option<MissileFlightView>,
    pub movement: Option<MoveView>,
    pub events: Vec<OutcomeEvent>,
    pub alerts: Vec<Alert>,
}

/// Economy and inventory of one side.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SideView {
    pub country: String,
    pub is_human: bool,
    pub damage: u32,
    pub money: u32,
    pub strike_tokens: u32,
    pub tokens: TokenCounts,
    pub shots_left: u32,
    pub aa_range_bonus: u32,
    pub radar_range_bonus: u32,
    pub intercept_cash_bonus: u32,
    pub missiles: Vec<MissileView>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MissileView {
    pub spec: MissileSpec,
    pub range_tiles: u32,
}

/// What occupies a tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum AssetKind {
    Unit { kind: UnitKind },
    Defense { kind: DefenseKind },
    Facility { kind: FacilityKind },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssetView {
    pub id: AssetId,
    pub owner: SideId,
    pub pos: GridPos,
    pub kind: AssetKind,
    /// Unit facing; 0 for immobile assets.
    pub facing: i8,
    /// Whether the opponent currently sees this asset (radar coverage or reveal).
    pub spotted: bool,
}

/// Radar coverage and persistent reveals, per observing side.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IntelView {
    pub player_coverage: Vec<GridPos>,
    pub adversary_coverage: Vec<GridPos>,
    pub player_revealed: Vec<GridPos>,
    pub adversary_revealed: Vec<GridPos>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MissileFlightView {
    pub attacker: SideId,
    pub missile: String,
    /// Current point in tile space.
    pub position: DVec2,
    pub tile: GridPos,
    pub target: GridPos,
    pub interceptor: Option<InterceptorView>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InterceptorView {
    pub battery: GridPos,
    pub aim: DVec2,
    pub ticks_remaining: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MoveView {
    pub side: SideId,
    pub unit: AssetId,
    pub kind: UnitKind,
    pub from: GridPos,
    /// Tiles still to be entered.
    pub remaining: Vec<GridPos>,
}
