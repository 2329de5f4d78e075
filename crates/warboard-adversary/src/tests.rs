#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    use warboard_core::board::Board;
    use warboard_core::enums::{SideId, UnitKind};
    use warboard_core::types::GridPos;

    use crate::maneuver::{advance_path, choose_advance};
    use crate::policy::{decide, AdversaryContext, Decision, PolicyParams, UnitSlot};
    use crate::targeting::{best_strike, launch_candidates, score_tile};

    fn context(side: SideId, units: Vec<UnitSlot>, missile_ranges: Vec<u32>) -> AdversaryContext {
        AdversaryContext {
            side,
            board: Board::default(),
            missile_ranges,
            shots_left: 1,
            units,
        }
    }

    fn always_strike() -> PolicyParams {
        PolicyParams {
            strike_chance: 1.0,
            launch_samples: 60,
        }
    }

    fn never_strike() -> PolicyParams {
        PolicyParams {
            strike_chance: 0.0,
            launch_samples: 60,
        }
    }

    // ---- Targeting ----

    #[test]
    fn test_centre_row_scores_highest() {
        let board = Board::default();
        assert_eq!(score_tile(&board, GridPos::new(3, 6)), 6);
        assert_eq!(score_tile(&board, GridPos::new(3, 0)), 0);
        assert_eq!(score_tile(&board, GridPos::new(3, 12)), 0);
        assert!(score_tile(&board, GridPos::new(3, 5)) > score_tile(&board, GridPos::new(3, 4)));
    }

    #[test]
    fn test_launch_candidates_one_per_rear_column() {
        let board = Board::default();
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let candidates = launch_candidates(&board, SideId::Adversary, 60, &mut rng);
        assert_eq!(candidates.len(), 13);
        let columns: HashSet<i32> = candidates.iter().map(|c| c.x).collect();
        assert_eq!(columns.len(), 13);
        assert!(candidates.iter().all(|c| c.x >= 15 && (0..13).contains(&c.y)));

        let capped = launch_candidates(&board, SideId::Adversary, 4, &mut rng);
        assert_eq!(capped.len(), 4);
    }

    #[test]
    fn test_best_strike_stays_in_range_and_prefers_centre() {
        let board = Board::default();
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let plan = best_strike(&board, SideId::Adversary, 12, 60, &mut rng).expect("long range reaches");
        assert!(plan.launch.within(&plan.target, 12));
        assert!(board.is_home(SideId::Player, plan.target));
        assert!(board.is_home(SideId::Adversary, plan.launch));
        assert_eq!(plan.target.y, 6);
    }

    #[test]
    fn test_best_strike_none_when_out_of_reach() {
        // Rear columns start at 15; the nearest player tile is column 13.
        let board = Board::default();
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        assert!(best_strike(&board, SideId::Adversary, 1, 60, &mut rng).is_none());
    }

    #[test]
    fn test_player_side_targets_adversary_half() {
        let board = Board::default();
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let plan = best_strike(&board, SideId::Player, 8, 60, &mut rng).unwrap();
        assert!(board.is_home(SideId::Adversary, plan.target));
        assert!(plan.launch.x < 13);
    }

    // ---- Maneuver ----

    #[test]
    fn test_advance_stops_at_midline() {
        let board = Board::default();
        let tank = UnitSlot {
            pos: GridPos::new(16, 4),
            kind: UnitKind::Tank,
        };
        let path = advance_path(&board, SideId::Adversary, &tank, &HashSet::new());
        assert_eq!(path, vec![GridPos::new(15, 4), GridPos::new(14, 4)]);
    }

    #[test]
    fn test_advance_limited_by_range() {
        let board = Board::default();
        let troop = UnitSlot {
            pos: GridPos::new(25, 2),
            kind: UnitKind::Troop,
        };
        let path = advance_path(&board, SideId::Adversary, &troop, &HashSet::new());
        assert_eq!(path, vec![GridPos::new(24, 2), GridPos::new(23, 2)]);
    }

    #[test]
    fn test_advance_stops_before_friendly() {
        let board = Board::default();
        let jet = UnitSlot {
            pos: GridPos::new(20, 8),
            kind: UnitKind::Jet,
        };
        let occupied: HashSet<GridPos> = [GridPos::new(18, 8)].into_iter().collect();
        let path = advance_path(&board, SideId::Adversary, &jet, &occupied);
        assert_eq!(path, vec![GridPos::new(19, 8)]);
    }

    #[test]
    fn test_player_advances_right() {
        let board = Board::default();
        let tank = UnitSlot {
            pos: GridPos::new(11, 0),
            kind: UnitKind::Tank,
        };
        let path = advance_path(&board, SideId::Player, &tank, &HashSet::new());
        assert_eq!(path, vec![GridPos::new(12, 0), GridPos::new(13, 0)]);
    }

    #[test]
    fn test_units_on_front_cannot_advance() {
        let ctx = context(
            SideId::Adversary,
            vec![UnitSlot {
                pos: GridPos::new(14, 3),
                kind: UnitKind::Tank,
            }],
            vec![],
        );
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        assert!(choose_advance(&ctx, &mut rng).is_none());
    }

    // ---- Policy ----

    #[test]
    fn test_passes_with_nothing_to_do() {
        let ctx = context(SideId::Adversary, vec![], vec![]);
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        assert_eq!(decide(&ctx, &always_strike(), &mut rng), Decision::Pass);
    }

    #[test]
    fn test_strikes_when_always_preferred() {
        let ctx = context(SideId::Adversary, vec![], vec![7]);
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        match decide(&ctx, &always_strike(), &mut rng) {
            Decision::Strike { missile, launch, target } => {
                assert_eq!(missile, 0);
                assert!(launch.within(&target, 7));
            }
            other => panic!("expected strike, got {other:?}"),
        }
    }

    #[test]
    fn test_no_shots_means_move() {
        let mut ctx = context(
            SideId::Adversary,
            vec![UnitSlot {
                pos: GridPos::new(20, 5),
                kind: UnitKind::Troop,
            }],
            vec![7],
        );
        ctx.shots_left = 0;
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        assert!(matches!(
            decide(&ctx, &always_strike(), &mut rng),
            Decision::Advance { .. }
        ));
    }

    #[test]
    fn test_unreachable_strike_falls_back_to_move() {
        let ctx = context(
            SideId::Adversary,
            vec![UnitSlot {
                pos: GridPos::new(20, 5),
                kind: UnitKind::Troop,
            }],
            vec![1],
        );
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        assert_eq!(
            decide(&ctx, &always_strike(), &mut rng),
            Decision::Advance {
                from: GridPos::new(20, 5),
                path: vec![GridPos::new(19, 5), GridPos::new(18, 5)],
            }
        );
    }

    #[test]
    fn test_decisions_are_deterministic_per_seed() {
        let ctx = context(
            SideId::Adversary,
            vec![
                UnitSlot {
                    pos: GridPos::new(20, 5),
                    kind: UnitKind::Troop,
                },
                UnitSlot {
                    pos: GridPos::new(22, 9),
                    kind: UnitKind::Tank,
                },
            ],
            vec![3, 7],
        );
        let params = PolicyParams {
            strike_chance: 0.5,
            launch_samples: 60,
        };
        for seed in 0..20 {
            let a = decide(&ctx, &params, &mut ChaCha8Rng::seed_from_u64(seed));
            let b = decide(&ctx, &params, &mut ChaCha8Rng::seed_from_u64(seed));
            assert_eq!(a, b);
        }
        let mut rng = ChaCha8Rng::seed_from_u64(99);
        assert!(matches!(
            decide(&ctx, &never_strike(), &mut rng),
            Decision::Advance { .. }
        ));
    }
}
