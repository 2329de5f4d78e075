//! Multi-tick actions in progress.
//!
//! Stored on the engine, not as ECS entities. At most one action is active
//! at a time.

use glam::DVec2;
use hecs::Entity;

use warboard_core::components::MissileSpec;
use warboard_core::enums::{SideId, UnitKind};
use warboard_core::types::GridPos;

#[derive(Debug, Clone)]
pub enum ActiveAction {
    Missile(MissileFlight),
    Moves(MoveSequence),
}

impl ActiveAction {
    /// The side whose action this is.
    pub fn initiator(&self) -> SideId {
        match self {
            ActiveAction::Missile(flight) => flight.attacker,
            ActiveAction::Moves(seq) => seq.side,
        }
    }
}

/// A missile stepping along its trajectory.
#[derive(Debug, Clone)]
pub struct MissileFlight {
    pub attacker: SideId,
    pub missile: MissileSpec,
    pub launch: GridPos,
    pub target: GridPos,
    /// Trajectory points in tile space, launch centre to target centre.
    pub path: Vec<DVec2>,
    /// Index of the current point; `path.len()` means the missile has landed.
    pub step: usize,
    /// Ticks left before advancing to the next point.
    pub hold: u32,
    /// Last tile the interception check ran on.
    pub last_checked: Option<GridPos>,
    pub interceptor: Option<InterceptorFlight>,
}

impl MissileFlight {
    pub fn defender(&self) -> SideId {
        self.attacker.opponent()
    }

    /// Current point, clamped to the target once landed.
    pub fn position(&self) -> DVec2 {
        let last = self.path.len().saturating_sub(1);
        self.path
            .get(self.step.min(last))
            .copied()
            .unwrap_or_default()
    }
}

/// An AA interceptor closing on a missile.
#[derive(Debug, Clone)]
pub struct InterceptorFlight {
    pub battery: GridPos,
    pub origin: DVec2,
    /// Missile position when the interceptor was fired.
    pub aim: DVec2,
    /// Flight length in ticks; the missile dies when `elapsed` reaches it.
    pub duration: u32,
    pub elapsed: u32,
}

impl InterceptorFlight {
    pub fn ticks_remaining(&self) -> u32 {
        self.duration.saturating_sub(self.elapsed)
    }
}

/// One side's move action. `order` is `None` for a deploy-as-move, which
/// resolves on the next tick with no steps.
#[derive(Debug, Clone)]
pub struct MoveSequence {
    pub side: SideId,
    pub order: Option<MoveOrder>,
}

impl MoveSequence {
    pub fn placement(side: SideId) -> Self {
        Self { side, order: None }
    }

    pub fn new(side: SideId, entity: Entity, kind: UnitKind, path: Vec<GridPos>) -> Self {
        Self {
            side,
            order: Some(MoveOrder {
                entity,
                kind,
                path,
                next: 0,
                frames: kind.stats().step_ticks,
            }),
        }
    }
}

#[derive(Debug, Clone)]
pub struct MoveOrder {
    pub entity: Entity,
    pub kind: UnitKind,
    /// Tiles to enter, in order. Never includes the origin.
    pub path: Vec<GridPos>,
    /// Index of the next tile to enter.
    pub next: usize,
    /// Ticks left before entering `path[next]`.
    pub frames: u32,
}

impl MoveOrder {
    pub fn remaining(&self) -> &[GridPos] {
        self.path.get(self.next..).unwrap_or(&[])
    }
}
