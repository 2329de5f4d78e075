//! The board's occupants: a hecs world plus a spatial index.
//!
//! Every asset entity carries `AssetId`, `Owner`, `GridPos` and exactly one
//! of `Unit`, `StaticDefense` or `Facility`. The index maps
//! `(side, layer, tile)` to the entity occupying it and is kept in step with
//! every spawn, relocation and removal.

use std::collections::HashMap;

use hecs::{Entity, World};

use warboard_core::components::*;
use warboard_core::enums::*;
use warboard_core::error::RejectReason;
use warboard_core::types::GridPos;

/// Occupancy layer. A tile holds at most one entity per side per layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Layer {
    Mobile,
    Defense,
    Facility,
}

impl Layer {
    pub const ALL: [Layer; 3] = [Layer::Mobile, Layer::Defense, Layer::Facility];
}

/// A mobile unit as seen by the resolvers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnitRecord {
    pub entity: Entity,
    pub id: AssetId,
    pub kind: UnitKind,
    pub pos: GridPos,
}

#[derive(Default)]
pub struct Battlefield {
    world: World,
    index: HashMap<(SideId, Layer, GridPos), Entity>,
    next_id: u32,
}

impl Battlefield {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read-only access for snapshot building.
    pub fn world(&self) -> &World {
        &self.world
    }

    /// Drop every asset. Ids keep counting so they are never reused.
    pub fn clear(&mut self) {
        self.world.clear();
        self.index.clear();
    }

    pub fn is_free(&self, side: SideId, layer: Layer, pos: GridPos) -> bool {
        !self.index.contains_key(&(side, layer, pos))
    }

    fn allocate_id(&mut self) -> AssetId {
        let id = AssetId(self.next_id);
        self.next_id += 1;
        id
    }

    fn claim(&mut self, side: SideId, layer: Layer, pos: GridPos) -> Result<AssetId, RejectReason> {
        if !self.is_free(side, layer, pos) {
            return Err(RejectReason::TileOccupied(pos));
        }
        Ok(self.allocate_id())
    }

    pub fn spawn_unit(
        &mut self,
        side: SideId,
        kind: UnitKind,
        pos: GridPos,
    ) -> Result<Entity, RejectReason> {
        let id = self.claim(side, Layer::Mobile, pos)?;
        let unit = Unit {
            kind,
            facing: side.facing(),
        };
        let entity = self.world.spawn((id, Owner(side), pos, unit));
        self.index.insert((side, Layer::Mobile, pos), entity);
        Ok(entity)
    }

    pub fn spawn_defense(
        &mut self,
        side: SideId,
        kind: DefenseKind,
        pos: GridPos,
    ) -> Result<Entity, RejectReason> {
        let id = self.claim(side, Layer::Defense, pos)?;
        let entity = self
            .world
            .spawn((id, Owner(side), pos, StaticDefense { kind }));
        self.index.insert((side, Layer::Defense, pos), entity);
        Ok(entity)
    }

    pub fn spawn_facility(
        &mut self,
        side: SideId,
        kind: FacilityKind,
        pos: GridPos,
    ) -> Result<Entity, RejectReason> {
        let id = self.claim(side, Layer::Facility, pos)?;
        let entity = self.world.spawn((id, Owner(side), pos, Facility { kind }));
        self.index.insert((side, Layer::Facility, pos), entity);
        Ok(entity)
    }

    pub fn entity_at(&self, side: SideId, layer: Layer, pos: GridPos) -> Option<Entity> {
        self.index.get(&(side, layer, pos)).copied()
    }

    pub fn unit_at(&self, side: SideId, pos: GridPos) -> Option<UnitRecord> {
        let entity = self.entity_at(side, Layer::Mobile, pos)?;
        self.unit_record(entity)
    }

    pub fn defense_at(&self, side: SideId, pos: GridPos) -> Option<(Entity, DefenseKind)> {
        let entity = self.entity_at(side, Layer::Defense, pos)?;
        let defense = self.world.get::<&StaticDefense>(entity).ok()?;
        Some((entity, defense.kind))
    }

    pub fn unit_record(&self, entity: Entity) -> Option<UnitRecord> {
        let mut query = self
            .world
            .query_one::<(&AssetId, &GridPos, &Unit)>(entity)
            .ok()?;
        let (id, pos, unit) = query.get()?;
        Some(UnitRecord {
            entity,
            id: *id,
            kind: unit.kind,
            pos: *pos,
        })
    }

    pub fn position(&self, entity: Entity) -> Option<GridPos> {
        self.world.get::<&GridPos>(entity).ok().map(|pos| *pos)
    }

    fn owner_and_layer(&self, entity: Entity) -> Option<(SideId, Layer)> {
        let owner = self.world.get::<&Owner>(entity).ok()?.0;
        let layer = if self.world.get::<&Unit>(entity).is_ok() {
            Layer::Mobile
        } else if self.world.get::<&StaticDefense>(entity).is_ok() {
            Layer::Defense
        } else {
            Layer::Facility
        };
        Some((owner, layer))
    }

    /// Move a unit to `to`. Fails if a friendly unit already stands there.
    pub fn relocate_unit(&mut self, entity: Entity, to: GridPos) -> Result<(), RejectReason> {
        let (owner, layer) = self
            .owner_and_layer(entity)
            .ok_or(RejectReason::NoUnitAt(to))?;
        let from = self.position(entity).ok_or(RejectReason::NoUnitAt(to))?;
        if from == to {
            return Ok(());
        }
        if !self.is_free(owner, layer, to) {
            return Err(RejectReason::TileOccupied(to));
        }
        if let Ok(mut pos) = self.world.get::<&mut GridPos>(entity) {
            *pos = to;
        }
        if let Ok(mut unit) = self.world.get::<&mut Unit>(entity) {
            if to.x != from.x {
                unit.facing = if to.x > from.x { 1 } else { -1 };
            }
        }
        self.index.remove(&(owner, layer, from));
        self.index.insert((owner, layer, to), entity);
        Ok(())
    }

    /// Despawn an asset. Returns false if it was already gone.
    pub fn remove(&mut self, entity: Entity) -> bool {
        let Some((owner, layer)) = self.owner_and_layer(entity) else {
            return false;
        };
        if let Some(pos) = self.position(entity) {
            self.index.remove(&(owner, layer, pos));
        }
        self.world.despawn(entity).is_ok()
    }

    /// Remove every asset `side` has on `pos`. Returns how many were removed.
    pub fn remove_all_at(&mut self, side: SideId, pos: GridPos) -> u32 {
        let mut removed = 0;
        for layer in Layer::ALL {
            if let Some(entity) = self.entity_at(side, layer, pos) {
                if self.remove(entity) {
                    removed += 1;
                }
            }
        }
        removed
    }

    /// Mobile units of a side in placement order.
    pub fn units(&self, side: SideId) -> Vec<UnitRecord> {
        let mut units: Vec<UnitRecord> = self
            .world
            .query::<(&AssetId, &Owner, &GridPos, &Unit)>()
            .iter()
            .filter(|(_, (_, owner, _, _))| owner.0 == side)
            .map(|(entity, (id, _, pos, unit))| UnitRecord {
                entity,
                id: *id,
                kind: unit.kind,
                pos: *pos,
            })
            .collect();
        units.sort_by_key(|u| u.id);
        units
    }

    /// Tiles of a side's static defenses of one kind, in placement order.
    pub fn defenses(&self, side: SideId, kind: DefenseKind) -> Vec<GridPos> {
        let mut found: Vec<(AssetId, GridPos)> = self
            .world
            .query::<(&AssetId, &Owner, &GridPos, &StaticDefense)>()
            .iter()
            .filter(|(_, (_, owner, _, defense))| owner.0 == side && defense.kind == kind)
            .map(|(_, (id, _, pos, _))| (*id, *pos))
            .collect();
        found.sort_by_key(|(id, _)| *id);
        found.into_iter().map(|(_, pos)| pos).collect()
    }

    pub fn facility_count(&self, side: SideId) -> usize {
        self.world
            .query::<(&Owner, &Facility)>()
            .iter()
            .filter(|(_, (owner, _))| owner.0 == side)
            .count()
    }

    /// Number of indexed entries; equals the number of live assets.
    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }
}
