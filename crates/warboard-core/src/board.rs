//! Board geometry: bounds, the midline partition and tile-space helpers.

use std::ops::Range;

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::config::RulesConfig;
use crate::enums::SideId;
use crate::types::GridPos;

/// Board dimensions and midline. Cheap to copy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    pub width: i32,
    pub height: i32,
    /// First column of the adversary's home half.
    pub midline: i32,
}

impl Default for Board {
    fn default() -> Self {
        Self::from_rules(&RulesConfig::default())
    }
}

impl Board {
    pub fn from_rules(rules: &RulesConfig) -> Self {
        Self {
            width: rules.grid_width,
            height: rules.grid_height,
            midline: rules.midline(),
        }
    }

    pub fn contains(&self, pos: GridPos) -> bool {
        (0..self.width).contains(&pos.x) && (0..self.height).contains(&pos.y)
    }

    /// Side whose home half contains the tile.
    pub fn home_side(&self, pos: GridPos) -> SideId {
        if pos.x < self.midline {
            SideId::Player
        } else {
            SideId::Adversary
        }
    }

    pub fn is_home(&self, side: SideId, pos: GridPos) -> bool {
        self.contains(pos) && self.home_side(pos) == side
    }

    pub fn home_columns(&self, side: SideId) -> Range<i32> {
        match side {
            SideId::Player => 0..self.midline,
            SideId::Adversary => self.midline..self.width,
        }
    }

    /// Home columns minus the one touching the midline.
    pub fn rear_columns(&self, side: SideId) -> Range<i32> {
        match side {
            SideId::Player => 0..(self.midline - 1).max(0),
            SideId::Adversary => (self.midline + 1).min(self.width)..self.width,
        }
    }

    /// The home column adjacent to the midline; units advance no further.
    pub fn front_column(&self, side: SideId) -> i32 {
        match side {
            SideId::Player => self.midline - 1,
            SideId::Adversary => self.midline,
        }
    }

    /// The `depth` rear columns closest to the midline.
    pub fn forward_band(&self, side: SideId, depth: i32) -> Range<i32> {
        let rear = self.rear_columns(side);
        match side {
            SideId::Player => (rear.end - depth).max(rear.start)..rear.end,
            SideId::Adversary => rear.start..(rear.start + depth).min(rear.end),
        }
    }

    /// Row at the vertical centre of the board.
    pub fn center_row(&self) -> i32 {
        self.height / 2
    }

    /// All on-board tiles within `radius` (Manhattan) of `center`, column-major.
    pub fn tiles_within(&self, center: GridPos, radius: u32) -> Vec<GridPos> {
        let r = radius as i32;
        let mut tiles = Vec::new();
        for x in (center.x - r).max(0)..(center.x + r + 1).min(self.width) {
            for y in (center.y - r).max(0)..(center.y + r + 1).min(self.height) {
                let pos = GridPos::new(x, y);
                if center.within(&pos, radius) {
                    tiles.push(pos);
                }
            }
        }
        tiles
    }

    /// Centre of a tile in continuous tile space.
    pub fn tile_center(&self, pos: GridPos) -> DVec2 {
        DVec2::new(pos.x as f64 + 0.5, pos.y as f64 + 0.5)
    }

    /// Tile containing a point in tile space, clamped onto the board.
    pub fn tile_at(&self, point: DVec2) -> GridPos {
        let x = (point.x.floor() as i32).clamp(0, self.width - 1);
        let y = (point.y.floor() as i32).clamp(0, self.height - 1);
        GridPos::new(x, y)
    }
}
