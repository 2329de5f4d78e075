//! Snapshot system: reads the battlefield and engine state into a
//! `GameStateSnapshot`.
//!
//! This system is read-only.

use warboard_core::board::Board;
use warboard_core::components::*;
use warboard_core::config::RulesConfig;
use warboard_core::enums::*;
use warboard_core::events::{Alert, OutcomeEvent};
use warboard_core::state::*;
use warboard_core::types::{GridPos, SimTime};

use crate::action::{ActiveAction, MissileFlight, MoveSequence};
use crate::battlefield::Battlefield;
use crate::side::Sides;
use crate::systems::radar::Intel;

/// Engine state the snapshot is built from.
pub struct SnapshotInput<'a> {
    pub field: &'a Battlefield,
    pub board: &'a Board,
    pub rules: &'a RulesConfig,
    pub sides: Option<&'a Sides>,
    pub intel: &'a Intel,
    pub active: Option<&'a ActiveAction>,
    pub time: SimTime,
    pub phase: GamePhase,
    pub actions_left: u32,
    pub winner: Option<SideId>,
}

pub fn build_snapshot(
    input: SnapshotInput<'_>,
    events: Vec<OutcomeEvent>,
    alerts: Vec<Alert>,
) -> GameStateSnapshot {
    let (missile, movement) = match input.active {
        Some(ActiveAction::Missile(flight)) => (Some(build_flight(input.board, flight)), None),
        Some(ActiveAction::Moves(seq)) => (None, build_move(input.field, seq)),
        None => (None, None),
    };

    GameStateSnapshot {
        time: input.time,
        phase: input.phase,
        board: *input.board,
        actions_left: input.actions_left,
        winner: input.winner,
        player: input.sides.map(|s| s.player.view(input.rules)),
        adversary: input.sides.map(|s| s.adversary.view(input.rules)),
        assets: build_assets(input.field, input.intel),
        intel: build_intel(input.intel),
        missile,
        movement,
        events,
        alerts,
    }
}

fn build_assets(field: &Battlefield, intel: &Intel) -> Vec<AssetView> {
    let world = field.world();
    let mut assets: Vec<AssetView> = Vec::new();

    for (_, (id, owner, pos, unit)) in world.query::<(&AssetId, &Owner, &GridPos, &Unit)>().iter() {
        assets.push(asset_view(intel, *id, owner.0, *pos, AssetKind::Unit { kind: unit.kind }, unit.facing));
    }
    for (_, (id, owner, pos, defense)) in world
        .query::<(&AssetId, &Owner, &GridPos, &StaticDefense)>()
        .iter()
    {
        assets.push(asset_view(intel, *id, owner.0, *pos, AssetKind::Defense { kind: defense.kind }, 0));
    }
    for (_, (id, owner, pos, facility)) in world
        .query::<(&AssetId, &Owner, &GridPos, &Facility)>()
        .iter()
    {
        assets.push(asset_view(intel, *id, owner.0, *pos, AssetKind::Facility { kind: facility.kind }, 0));
    }

    assets.sort_by_key(|a| a.id);
    assets
}

fn asset_view(
    intel: &Intel,
    id: AssetId,
    owner: SideId,
    pos: GridPos,
    kind: AssetKind,
    facing: i8,
) -> AssetView {
    AssetView {
        id,
        owner,
        pos,
        kind,
        facing,
        spotted: intel.is_spotted(owner, pos),
    }
}

fn build_intel(intel: &Intel) -> IntelView {
    IntelView {
        player_coverage: intel.player.coverage.iter().copied().collect(),
        adversary_coverage: intel.adversary.coverage.iter().copied().collect(),
        player_revealed: intel.player.revealed.iter().copied().collect(),
        adversary_revealed: intel.adversary.revealed.iter().copied().collect(),
    }
}

fn build_flight(board: &Board, flight: &MissileFlight) -> MissileFlightView {
    let position = flight.position();
    MissileFlightView {
        attacker: flight.attacker,
        missile: flight.missile.name.clone(),
        position,
        tile: board.tile_at(position),
        target: flight.target,
        interceptor: flight.interceptor.as_ref().map(|i| InterceptorView {
            battery: i.battery,
            aim: i.aim,
            ticks_remaining: i.ticks_remaining(),
        }),
    }
}

fn build_move(field: &Battlefield, seq: &MoveSequence) -> Option<MoveView> {
    let order = seq.order.as_ref()?;
    let unit = field.unit_record(order.entity)?;
    Some(MoveView {
        side: seq.side,
        unit: unit.id,
        kind: unit.kind,
        from: unit.pos,
        remaining: order.remaining().to_vec(),
    })
}
