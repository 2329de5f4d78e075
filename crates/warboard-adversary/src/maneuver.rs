//! Movement fallback: push a random unit toward the front.

use std::collections::HashSet;

use rand::seq::SliceRandom;
use rand::Rng;

use warboard_core::board::Board;
use warboard_core::enums::SideId;
use warboard_core::types::GridPos;

use crate::policy::{AdversaryContext, UnitSlot};

/// Straight-line advance toward the midline, stopping at the side's front
/// column, before the first friendly-occupied tile, or after `range` tiles.
pub fn advance_path(
    board: &Board,
    side: SideId,
    unit: &UnitSlot,
    occupied: &HashSet<GridPos>,
) -> Vec<GridPos> {
    let dir = side.facing() as i32;
    let front = board.front_column(side);
    let mut path = Vec::new();
    let mut cursor = unit.pos;

    for _ in 0..unit.kind.stats().range {
        let next = GridPos::new(cursor.x + dir, cursor.y);
        let past_front = if dir > 0 { next.x > front } else { next.x < front };
        if past_front || occupied.contains(&next) {
            break;
        }
        path.push(next);
        cursor = next;
    }
    path
}

/// A random unit that can move, with its path.
pub fn choose_advance<R: Rng>(ctx: &AdversaryContext, rng: &mut R) -> Option<(GridPos, Vec<GridPos>)> {
    let occupied: HashSet<GridPos> = ctx.units.iter().map(|u| u.pos).collect();
    let movable: Vec<(GridPos, Vec<GridPos>)> = ctx
        .units
        .iter()
        .map(|u| (u.pos, advance_path(&ctx.board, ctx.side, u, &occupied)))
        .filter(|(_, path)| !path.is_empty())
        .collect();
    movable.choose(rng).cloned()
}
