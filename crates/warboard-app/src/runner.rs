//! Full-match runners: headless (as fast as possible) and real-time (through
//! the game loop thread). Both drive the human side with the autopilot.

use std::time::Instant;

use serde::Serialize;

use warboard_adversary::PolicyParams;
use warboard_core::commands::PlayerCommand;
use warboard_core::enums::{GamePhase, SideId};
use warboard_core::state::{AssetKind, GameStateSnapshot, SideView};
use warboard_sim::SimulationEngine;

use crate::autopilot::Autopilot;
use crate::config::AppConfig;
use crate::error::AppError;
use crate::game_loop::TICK_DURATION;
use crate::state::AppState;

/// Keeps the autopilot's stream independent of the engine's.
const AUTOPILOT_SEED_SALT: u64 = 0x5eed_a070;

/// JSON summary printed at the end of a run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchSummary {
    pub seed: u64,
    pub winner: Option<SideId>,
    pub ticks: u64,
    /// True when the autopilot ran out of legal actions.
    pub stalled: bool,
    pub player: SideSummary,
    pub adversary: SideSummary,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SideSummary {
    pub country: String,
    pub damage: u32,
    pub money: u32,
    pub strike_tokens: u32,
    pub units_left: usize,
}

impl SideSummary {
    fn from_snapshot(snapshot: &GameStateSnapshot, side: SideId) -> Self {
        let view: Option<&SideView> = match side {
            SideId::Player => snapshot.player.as_ref(),
            SideId::Adversary => snapshot.adversary.as_ref(),
        };
        let Some(view) = view else {
            return Self::default();
        };
        Self {
            country: view.country.clone(),
            damage: view.damage,
            money: view.money,
            strike_tokens: view.strike_tokens,
            units_left: snapshot
                .assets
                .iter()
                .filter(|a| a.owner == side && matches!(a.kind, AssetKind::Unit { .. }))
                .count(),
        }
    }
}

impl MatchSummary {
    fn new(seed: u64, snapshot: &GameStateSnapshot, stalled: bool) -> Self {
        Self {
            seed,
            winner: snapshot.winner,
            ticks: snapshot.time.tick,
            stalled,
            player: SideSummary::from_snapshot(snapshot, SideId::Player),
            adversary: SideSummary::from_snapshot(snapshot, SideId::Adversary),
        }
    }
}

fn opening(config: &AppConfig) -> [PlayerCommand; 2] {
    [
        PlayerCommand::StartGame,
        PlayerCommand::ConfirmCountries {
            player: config.matchup.player.clone(),
            adversary: config.matchup.adversary.clone(),
        },
    ]
}

fn autopilot(config: &AppConfig) -> Autopilot {
    Autopilot::new(
        config.matchup.seed ^ AUTOPILOT_SEED_SALT,
        PolicyParams::from(&config.rules),
    )
}

/// Play one match on the calling thread until game over or `max_ticks`.
pub fn run_headless(config: &AppConfig) -> Result<MatchSummary, AppError> {
    let mut engine = SimulationEngine::new(config.sim_config()?);
    let mut pilot = autopilot(config);
    let started = Instant::now();

    engine.queue_commands(opening(config));
    let mut snapshot = engine.tick();
    if snapshot.phase != GamePhase::Deploy {
        for alert in &snapshot.alerts {
            tracing::warn!(message = %alert.message, "match setup refused");
        }
        return Ok(MatchSummary::new(config.matchup.seed, &snapshot, true));
    }

    let mut stalled = false;
    while snapshot.winner.is_none() && snapshot.time.tick < config.matchup.max_ticks {
        let commands = pilot.commands(&snapshot);
        if commands.is_empty() && snapshot.phase == GamePhase::PlayerTurn && snapshot.actions_left > 0 {
            stalled = true;
            break;
        }
        engine.queue_commands(commands);
        snapshot = engine.tick();
    }

    tracing::info!(
        winner = ?snapshot.winner,
        ticks = snapshot.time.tick,
        elapsed_ms = started.elapsed().as_millis() as u64,
        "headless match finished"
    );
    Ok(MatchSummary::new(config.matchup.seed, &snapshot, stalled))
}

/// Play one match through the game loop thread at real-time pace.
pub fn run_realtime(config: &AppConfig) -> Result<MatchSummary, AppError> {
    let state = AppState::new();
    state.start(config.sim_config()?)?;
    let mut pilot = autopilot(config);

    for command in opening(config) {
        state.send(command)?;
    }

    // Tick on which commands were last sent; wait for a newer snapshot.
    let mut awaiting: Option<u64> = None;
    let (last, stalled) = loop {
        std::thread::sleep(TICK_DURATION / 2);
        let Some(snapshot) = state.snapshot() else {
            continue;
        };
        let tick = snapshot.time.tick;
        if snapshot.winner.is_some() || tick >= config.matchup.max_ticks {
            break (snapshot, false);
        }
        if awaiting.is_some_and(|sent| tick <= sent) {
            continue;
        }
        let commands = pilot.commands(&snapshot);
        if commands.is_empty() {
            if snapshot.phase == GamePhase::PlayerTurn && snapshot.actions_left > 0 {
                break (snapshot, true);
            }
            continue;
        }
        for command in commands {
            state.send(command)?;
        }
        awaiting = Some(tick);
    };
    state.shutdown();

    tracing::info!(winner = ?last.winner, ticks = last.time.tick, "real-time match finished");
    Ok(MatchSummary::new(config.matchup.seed, &last, stalled))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quick_config(seed: u64) -> AppConfig {
        let mut config = AppConfig::default();
        config.matchup.seed = seed;
        config.matchup.player = "India".into();
        config.matchup.adversary = "China".into();
        config.matchup.max_ticks = 60_000;
        config
    }

    #[test]
    fn test_headless_run_is_deterministic() {
        let a = run_headless(&quick_config(11)).unwrap();
        let b = run_headless(&quick_config(11)).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.player.country, "India");
        assert_eq!(a.adversary.country, "China");
    }

    #[test]
    fn test_headless_run_ends_in_a_result() {
        let summary = run_headless(&quick_config(3)).unwrap();
        assert!(!summary.stalled);
        assert!(summary.ticks <= 60_000);
        if let Some(winner) = summary.winner {
            let loser = match winner.opponent() {
                SideId::Player => &summary.player,
                SideId::Adversary => &summary.adversary,
            };
            assert_eq!(loser.damage, 100);
        }
    }

    #[test]
    fn test_bad_countries_stop_before_deploy() {
        let mut config = quick_config(1);
        config.matchup.adversary = "India".into();
        let summary = run_headless(&config).unwrap();
        assert!(summary.stalled);
        assert_eq!(summary.winner, None);
        assert_eq!(summary.player, SideSummary::default());
    }

    #[test]
    fn test_summary_serializes() {
        let summary = run_headless(&quick_config(5)).unwrap();
        let json = serde_json::to_value(&summary).unwrap();
        assert!(json.get("winner").is_some());
        assert!(json["player"]["money"].is_u64());
    }
}
