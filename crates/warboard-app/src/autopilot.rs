//! Autopilot for the human side.
//!
//! Reads only the public snapshot and answers with the same commands a
//! player would send. Deployment is random; turns reuse the adversary policy
//! with the player's side plugged in.

use std::collections::HashSet;

use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use warboard_adversary::{AdversaryContext, Decision, PolicyParams, UnitSlot};
use warboard_core::commands::PlayerCommand;
use warboard_core::enums::{GamePhase, SideId, TokenKind};
use warboard_core::state::{AssetKind, GameStateSnapshot};
use warboard_core::types::GridPos;

const PLACEMENT_ATTEMPTS: u32 = 200;

/// Extra strike attempts when the policy would pass.
const PASS_RETRIES: u32 = 8;

pub struct Autopilot {
    rng: ChaCha8Rng,
    params: PolicyParams,
}

impl Autopilot {
    pub fn new(seed: u64, params: PolicyParams) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            params,
        }
    }

    /// Commands to queue after seeing `snapshot`. Empty when there is nothing
    /// to do (animations, menus) or no legal action was found.
    pub fn commands(&mut self, snapshot: &GameStateSnapshot) -> Vec<PlayerCommand> {
        match snapshot.phase {
            GamePhase::Deploy => self.deploy(snapshot),
            GamePhase::PlayerTurn if snapshot.actions_left > 0 => {
                self.take_turn(snapshot).into_iter().collect()
            }
            _ => Vec::new(),
        }
    }

    /// Place every token on a random free home tile, then start the battle.
    pub fn deploy(&mut self, snapshot: &GameStateSnapshot) -> Vec<PlayerCommand> {
        let Some(player) = snapshot.player.as_ref() else {
            return Vec::new();
        };
        let board = snapshot.board;
        let columns = board.home_columns(SideId::Player);
        let mut used: HashSet<GridPos> = snapshot
            .assets
            .iter()
            .filter(|a| a.owner == SideId::Player && !matches!(a.kind, AssetKind::Facility { .. }))
            .map(|a| a.pos)
            .collect();

        let mut commands = Vec::new();
        for token in [
            TokenKind::Tank,
            TokenKind::Troop,
            TokenKind::Jet,
            TokenKind::Radar,
            TokenKind::AntiAir,
        ] {
            for _ in 0..player.tokens.get(token) {
                let free = (0..PLACEMENT_ATTEMPTS)
                    .map(|_| {
                        GridPos::new(
                            self.rng.gen_range(columns.clone()),
                            self.rng.gen_range(0..board.height),
                        )
                    })
                    .find(|pos| !used.contains(pos));
                if let Some(at) = free {
                    used.insert(at);
                    commands.push(PlayerCommand::PlaceToken { token, at });
                }
            }
        }
        commands.push(PlayerCommand::FinishDeploy);
        commands
    }

    /// One turn action for the player side, if any is available.
    pub fn take_turn(&mut self, snapshot: &GameStateSnapshot) -> Option<PlayerCommand> {
        let ctx = player_context(snapshot)?;
        let mut decision = warboard_adversary::decide(&ctx, &self.params, &mut self.rng);

        let eager = PolicyParams {
            strike_chance: 1.0,
            ..self.params
        };
        let mut retries = 0;
        while decision == Decision::Pass && retries < PASS_RETRIES {
            decision = warboard_adversary::decide(&ctx, &eager, &mut self.rng);
            retries += 1;
        }

        match decision {
            Decision::Strike {
                missile,
                launch,
                target,
            } => Some(PlayerCommand::FireMissile {
                missile,
                launch,
                target,
            }),
            Decision::Advance { from, path } => path
                .last()
                .map(|&to| PlayerCommand::MoveUnit { from, to }),
            Decision::Pass => {
                tracing::debug!(tick = snapshot.time.tick, "autopilot found no action");
                None
            }
        }
    }
}

/// Policy input for the player side, built from public state.
pub fn player_context(snapshot: &GameStateSnapshot) -> Option<AdversaryContext> {
    let player = snapshot.player.as_ref()?;
    let units = snapshot
        .assets
        .iter()
        .filter(|a| a.owner == SideId::Player)
        .filter_map(|a| match a.kind {
            AssetKind::Unit { kind } => Some(UnitSlot { pos: a.pos, kind }),
            _ => None,
        })
        .collect();
    Some(AdversaryContext {
        side: SideId::Player,
        board: snapshot.board,
        missile_ranges: player.missiles.iter().map(|m| m.range_tiles).collect(),
        shots_left: player.shots_left,
        units,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    use warboard_core::config::RulesConfig;
    use warboard_sim::{SimConfig, SimulationEngine};

    fn deploy_snapshot(seed: u64) -> (SimulationEngine, GameStateSnapshot) {
        let mut engine = SimulationEngine::new(SimConfig {
            seed,
            ..Default::default()
        });
        engine.queue_commands([
            PlayerCommand::StartGame,
            PlayerCommand::ConfirmCountries {
                player: "USA".into(),
                adversary: "China".into(),
            },
        ]);
        let snapshot = engine.tick();
        (engine, snapshot)
    }

    #[test]
    fn test_deploy_places_every_token_on_home_half() {
        let (_, snapshot) = deploy_snapshot(3);
        let mut pilot = Autopilot::new(1, PolicyParams::from(&RulesConfig::default()));
        let commands = pilot.deploy(&snapshot);

        let tokens = snapshot.player.as_ref().unwrap().tokens;
        let total = tokens.tank + tokens.troop + tokens.jet + tokens.anti_air + tokens.radar;
        assert_eq!(commands.len() as u32, total + 1);
        assert_eq!(commands.last(), Some(&PlayerCommand::FinishDeploy));

        let mut tiles = HashSet::new();
        for command in &commands[..commands.len() - 1] {
            let PlayerCommand::PlaceToken { at, .. } = command else {
                panic!("unexpected {command:?}");
            };
            assert!(snapshot.board.is_home(SideId::Player, *at));
            assert!(tiles.insert(*at), "tile {at} used twice");
        }
    }

    #[test]
    fn test_deployment_is_accepted_by_engine() {
        let (mut engine, snapshot) = deploy_snapshot(4);
        let mut pilot = Autopilot::new(2, PolicyParams::from(&RulesConfig::default()));
        engine.queue_commands(pilot.commands(&snapshot));
        let snapshot = engine.tick();

        assert!(snapshot.alerts.is_empty(), "{:?}", snapshot.alerts);
        assert_eq!(snapshot.phase, GamePhase::PlayerTurn);
        let tokens = snapshot.player.as_ref().unwrap().tokens;
        assert_eq!(tokens.tank + tokens.troop + tokens.jet + tokens.anti_air + tokens.radar, 0);
    }

    #[test]
    fn test_turn_action_is_legal() {
        let (mut engine, snapshot) = deploy_snapshot(5);
        let mut pilot = Autopilot::new(3, PolicyParams::from(&RulesConfig::default()));
        engine.queue_commands(pilot.commands(&snapshot));
        let snapshot = engine.tick();

        let command = pilot.take_turn(&snapshot).expect("a fresh turn always has an action");
        assert!(matches!(
            command,
            PlayerCommand::FireMissile { .. } | PlayerCommand::MoveUnit { .. }
        ));
        engine.queue_command(command);
        let snapshot = engine.tick();
        assert!(snapshot.alerts.is_empty(), "{:?}", snapshot.alerts);
        assert_eq!(snapshot.actions_left, 0);
    }

    #[test]
    fn test_idle_outside_turns() {
        let mut pilot = Autopilot::new(0, PolicyParams::from(&RulesConfig::default()));
        assert!(pilot.commands(&GameStateSnapshot::default()).is_empty());
    }

    #[test]
    fn test_context_lists_only_own_units() {
        let (_, snapshot) = deploy_snapshot(6);
        let ctx = player_context(&snapshot).unwrap();
        assert_eq!(ctx.side, SideId::Player);
        assert!(ctx.units.is_empty());
        assert_eq!(ctx.missile_ranges.len(), snapshot.player.as_ref().unwrap().missiles.len());
    }
}
