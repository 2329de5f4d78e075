#[cfg(test)]
mod tests {
    use crate::board::Board;
    use crate::catalogue::*;
    use crate::commands::PlayerCommand;
    use crate::components::*;
    use crate::config::RulesConfig;
    use crate::enums::*;
    use crate::events::OutcomeEvent;
    use crate::market::{build_market, missile_price, MarketEffect};
    use crate::types::GridPos;

    fn profile(tanks: u32, personnel: u32, fighters: u32, air_defense: f64) -> CountryProfile {
        CountryProfile {
            ground: GroundForces {
                tanks,
                artillery: 0,
                personnel,
            },
            air: AirForces {
                fighters,
                ..Default::default()
            },
            defense: DefenseRating { air_defense },
            ..Default::default()
        }
    }

    // ---- Board ----

    #[test]
    fn test_default_board_dimensions() {
        let board = Board::default();
        assert_eq!(board.width, 28);
        assert_eq!(board.height, 13);
        assert_eq!(board.midline, 14);
    }

    #[test]
    fn test_midline_partition() {
        let board = Board::default();
        assert_eq!(board.home_side(GridPos::new(13, 0)), SideId::Player);
        assert_eq!(board.home_side(GridPos::new(14, 0)), SideId::Adversary);
        assert!(board.is_home(SideId::Player, GridPos::new(0, 12)));
        assert!(!board.is_home(SideId::Player, GridPos::new(-1, 0)));
        assert!(!board.is_home(SideId::Adversary, GridPos::new(28, 3)));
    }

    #[test]
    fn test_rear_and_forward_columns() {
        let board = Board::default();
        assert_eq!(board.rear_columns(SideId::Player), 0..13);
        assert_eq!(board.rear_columns(SideId::Adversary), 15..28);
        assert_eq!(board.forward_band(SideId::Adversary, 4), 15..19);
        assert_eq!(board.forward_band(SideId::Player, 4), 9..13);
        assert_eq!(board.front_column(SideId::Player), 13);
        assert_eq!(board.front_column(SideId::Adversary), 14);
    }

    #[test]
    fn test_tiles_within_is_clipped_diamond() {
        let board = Board::default();
        // Full radius-1 diamond in the interior.
        assert_eq!(board.tiles_within(GridPos::new(5, 5), 1).len(), 5);
        // Corner clips to three tiles.
        let corner = board.tiles_within(GridPos::new(0, 0), 1);
        assert_eq!(corner.len(), 3);
        assert!(corner.iter().all(|p| board.contains(*p)));
        // Radius 2 interior diamond has 13 tiles.
        assert_eq!(board.tiles_within(GridPos::new(10, 6), 2).len(), 13);
    }

    #[test]
    fn test_tile_at_clamps_to_board() {
        let board = Board::default();
        let centre = board.tile_center(GridPos::new(3, 4));
        assert_eq!(board.tile_at(centre), GridPos::new(3, 4));
        assert_eq!(board.tile_at(glam::DVec2::new(-3.0, 99.0)), GridPos::new(0, 12));
    }

    #[test]
    fn test_manhattan_distance() {
        let a = GridPos::new(2, 3);
        let b = GridPos::new(5, 1);
        assert_eq!(a.manhattan(&b), 5);
        assert!(a.within(&b, 5));
        assert!(!a.within(&b, 4));
    }

    // ---- Rules ----

    #[test]
    fn test_range_tiles_never_below_one() {
        let rules = RulesConfig::default();
        assert_eq!(rules.range_tiles(500), 5);
        assert_eq!(rules.range_tiles(599), 5);
        assert_eq!(rules.range_tiles(40), 1);
        assert_eq!(rules.range_tiles(0), 1);
    }

    #[test]
    fn test_rules_missing_keys_use_defaults() {
        let rules: RulesConfig = serde_json::from_str(r#"{ "grid_width": 20 }"#).unwrap();
        assert_eq!(rules.grid_width, 20);
        assert_eq!(rules.midline(), 10);
        assert_eq!(rules.grid_height, 13);
        assert_eq!(rules.intercept_reward, 35);
    }

    #[test]
    fn test_unit_stats() {
        assert_eq!(UnitKind::Tank.stats().power, 3);
        assert_eq!(UnitKind::Troop.stats().range, 2);
        assert_eq!(UnitKind::Jet.stats().range, 6);
        assert_eq!(UnitKind::Jet.stats().step_ticks, 10);
    }

    #[test]
    fn test_splash_radius_minimum_one() {
        assert_eq!(MissileSpec::new("Dud", 100, 10, 0).splash_radius(), 1);
        assert_eq!(MissileSpec::new("Big", 100, 10, 3).splash_radius(), 3);
    }

    // ---- Tokens ----

    #[test]
    fn test_token_take_does_not_underflow() {
        let mut tokens = TokenCounts::default();
        assert!(!tokens.take(TokenKind::Jet));
        tokens.add(TokenKind::Jet, 1);
        assert!(tokens.take(TokenKind::Jet));
        assert_eq!(tokens.get(TokenKind::Jet), 0);
    }

    #[test]
    fn test_starting_tokens_are_clamped() {
        let weak = profile(100, 10_000, 10, 0.1).starting_tokens();
        assert_eq!(weak.tank, 0);
        assert_eq!(weak.troop, 1);
        assert_eq!(weak.jet, 1);
        assert_eq!(weak.anti_air, 1);
        assert_eq!(weak.radar, 1);

        let strong = profile(50_000, 9_000_000, 9_000, 0.9).starting_tokens();
        assert_eq!(strong.tank, 3);
        assert_eq!(strong.troop, 4);
        assert_eq!(strong.jet, 3);
        assert_eq!(strong.anti_air, 3);
    }

    // ---- Catalogue ----

    #[test]
    fn test_builtin_catalogue_loads() {
        let catalogue = CountryCatalogue::builtin();
        assert!(catalogue.len() >= 2);
        let usa = catalogue.get("USA").expect("USA in built-in catalogue");
        let missiles = usa.starting_missiles();
        let last = missiles.last().unwrap();
        assert_eq!(last.name, "AR Missile");
        assert!(last.anti_radar);
        assert_eq!(missiles.len(), usa.missiles.len() + 1);
    }

    #[test]
    fn test_catalogue_missile_defaults() {
        let json = r#"{ "Atlantis": {
            "ground": { "tanks": 3000, "personnel": 500000 },
            "air": { "fighters": 400 },
            "missiles": [ { "name": "Trident", "range_km": 900 } ]
        } }"#;
        let catalogue = CountryCatalogue::from_json_str(json).unwrap();
        let entry = &catalogue.get("Atlantis").unwrap().missiles[0];
        assert_eq!(entry.damage, 25);
        assert_eq!(entry.radius, 1);
    }

    #[test]
    fn test_empty_catalogue_rejected() {
        assert!(matches!(
            CountryCatalogue::from_json_str("{}"),
            Err(crate::error::CatalogueError::Empty)
        ));
        assert!(CountryCatalogue::from_json_str("not json").is_err());
    }

    // ---- Market ----

    #[test]
    fn test_missile_price_formula() {
        // 0.02*500 + 3*26 + 16*1 = 10 + 78 + 16
        assert_eq!(missile_price(500, 26, 1), 104);
        // 0.02*1700 + 3*30 + 16*2 = 34 + 90 + 32
        assert_eq!(missile_price(1700, 30, 2), 156);
    }

    #[test]
    fn test_market_deduplicates_catalogue_missiles() {
        let json = r#"{
            "A": { "ground": { "tanks": 0, "personnel": 0 }, "air": { "fighters": 0 },
                   "missiles": [ { "name": "Shared", "range_km": 300 } ] },
            "B": { "ground": { "tanks": 0, "personnel": 0 }, "air": { "fighters": 0 },
                   "missiles": [ { "name": "Shared", "range_km": 300 },
                                 { "name": "Own", "range_km": 600, "damage": 30 } ] }
        }"#;
        let market = build_market(&CountryCatalogue::from_json_str(json).unwrap());
        let names: Vec<&str> = market.iter().map(|i| i.name.as_str()).collect();
        assert!(names.contains(&"Shared (A)"));
        assert!(!names.contains(&"Shared (B)"));
        assert!(names.contains(&"Own (B)"));
        assert_eq!(market[0].name, "Tank");
        assert!(matches!(market[4].effect, MarketEffect::Radar));
    }

    // ---- Wire format ----

    #[test]
    fn test_command_tagged_json() {
        let cmd = PlayerCommand::FireMissile {
            missile: 1,
            launch: GridPos::new(3, 4),
            target: GridPos::new(16, 4),
        };
        let json = serde_json::to_string(&cmd).unwrap();
        assert!(json.contains(r#""type":"FireMissile""#));
        let back: PlayerCommand = serde_json::from_str(&json).unwrap();
        assert_eq!(cmd, back);
    }

    #[test]
    fn test_event_tagged_json() {
        let event = OutcomeEvent::GameOver {
            winner: SideId::Player,
        };
        let json = serde_json::to_string(&event).unwrap();
        assert_eq!(json, r#"{"type":"GameOver","winner":"Player"}"#);
    }
}
