//! Strike targeting: sample launch tiles, score enemy tiles, keep the best.

use rand::seq::SliceRandom;
use rand::Rng;

use warboard_core::board::Board;
use warboard_core::enums::SideId;
use warboard_core::types::GridPos;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StrikePlan {
    pub launch: GridPos,
    pub target: GridPos,
}

/// Tiles nearer the vertical centre of the board score higher.
pub fn score_tile(board: &Board, tile: GridPos) -> i32 {
    let centre = board.center_row();
    centre - (tile.y - centre).abs()
}

/// One random-row launch tile per rear column, shuffled and capped.
pub fn launch_candidates<R: Rng>(board: &Board, side: SideId, samples: usize, rng: &mut R) -> Vec<GridPos> {
    let mut candidates: Vec<GridPos> = board
        .rear_columns(side)
        .map(|x| GridPos::new(x, rng.gen_range(0..board.height)))
        .collect();
    candidates.shuffle(rng);
    candidates.truncate(samples);
    candidates
}

/// First strictly-best `(launch, target)` pair reachable with `range` tiles.
pub fn best_strike<R: Rng>(
    board: &Board,
    side: SideId,
    range: u32,
    samples: usize,
    rng: &mut R,
) -> Option<StrikePlan> {
    let enemy_columns = board.home_columns(side.opponent());
    let mut best: Option<(i32, StrikePlan)> = None;

    for launch in launch_candidates(board, side, samples, rng) {
        for x in enemy_columns.clone() {
            for y in 0..board.height {
                let target = GridPos::new(x, y);
                if !launch.within(&target, range) {
                    continue;
                }
                let score = score_tile(board, target);
                if best.map_or(true, |(s, _)| score > s) {
                    best = Some((score, StrikePlan { launch, target }));
                }
            }
        }
    }
    best.map(|(_, plan)| plan)
}
