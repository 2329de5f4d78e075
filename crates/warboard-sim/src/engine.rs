//! Simulation engine, the core of the game.
//!
//! `SimulationEngine` owns the battlefield, both side states and the seeded
//! RNG. It processes player commands, steps whichever action is in flight,
//! runs the adversary's turn and produces `GameStateSnapshot`s. Completely
//! headless, enabling deterministic testing.

use std::collections::VecDeque;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use warboard_adversary::{AdversaryContext, Decision, PolicyParams, UnitSlot};
use warboard_core::board::Board;
use warboard_core::catalogue::CountryCatalogue;
use warboard_core::commands::PlayerCommand;
use warboard_core::config::RulesConfig;
use warboard_core::enums::*;
use warboard_core::error::RejectReason;
use warboard_core::events::{Alert, OutcomeEvent};
use warboard_core::market::{build_market, MarketItem};
use warboard_core::state::GameStateSnapshot;
use warboard_core::types::{GridPos, SimTime};

use crate::action::{ActiveAction, MissileFlight, MoveSequence};
use crate::battlefield::{Battlefield, Layer, UnitRecord};
use crate::phase::{self, PhaseEvent};
use crate::side::Sides;
use crate::systems;
use crate::systems::missile::FlightStatus;
use crate::systems::radar::Intel;
use crate::systems::snapshot::SnapshotInput;
use crate::world_setup;

/// Configuration for starting a new simulation.
pub struct SimConfig {
    /// RNG seed for determinism. Same seed = same simulation.
    pub seed: u64,
    pub rules: RulesConfig,
    pub catalogue: CountryCatalogue,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            rules: RulesConfig::default(),
            catalogue: CountryCatalogue::builtin(),
        }
    }
}

/// The simulation engine. Owns the battlefield and all match state.
pub struct SimulationEngine {
    rules: RulesConfig,
    board: Board,
    catalogue: CountryCatalogue,
    market: Vec<MarketItem>,
    field: Battlefield,
    sides: Option<Sides>,
    intel: Intel,
    time: SimTime,
    phase: GamePhase,
    rng: ChaCha8Rng,
    command_queue: VecDeque<PlayerCommand>,
    /// Actions the human side has left this turn.
    actions_left: u32,
    active: Option<ActiveAction>,
    winner: Option<SideId>,
    game_over_ticks: u32,
    events: Vec<OutcomeEvent>,
    alerts: Vec<Alert>,
}

impl SimulationEngine {
    /// Create a new simulation engine with the given config.
    pub fn new(config: SimConfig) -> Self {
        let board = Board::from_rules(&config.rules);
        let market = build_market(&config.catalogue);
        Self {
            rules: config.rules,
            board,
            catalogue: config.catalogue,
            market,
            field: Battlefield::new(),
            sides: None,
            intel: Intel::default(),
            time: SimTime::default(),
            phase: GamePhase::default(),
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            command_queue: VecDeque::new(),
            actions_left: 0,
            active: None,
            winner: None,
            game_over_ticks: 0,
            events: Vec::new(),
            alerts: Vec::new(),
        }
    }

    /// Queue a player command for processing at the next tick boundary.
    pub fn queue_command(&mut self, command: PlayerCommand) {
        self.command_queue.push_back(command);
    }

    /// Queue multiple commands.
    pub fn queue_commands(&mut self, commands: impl IntoIterator<Item = PlayerCommand>) {
        self.command_queue.extend(commands);
    }

    /// Advance the simulation by one tick and return the resulting snapshot.
    pub fn tick(&mut self) -> GameStateSnapshot {
        self.process_commands();
        self.run_systems();
        self.time.advance();

        let events = std::mem::take(&mut self.events);
        let alerts = std::mem::take(&mut self.alerts);
        systems::snapshot::build_snapshot(
            SnapshotInput {
                field: &self.field,
                board: &self.board,
                rules: &self.rules,
                sides: self.sides.as_ref(),
                intel: &self.intel,
                active: self.active.as_ref(),
                time: self.time,
                phase: self.phase,
                actions_left: self.actions_left,
                winner: self.winner,
            },
            events,
            alerts,
        )
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn time(&self) -> SimTime {
        self.time
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn rules(&self) -> &RulesConfig {
        &self.rules
    }

    pub fn catalogue(&self) -> &CountryCatalogue {
        &self.catalogue
    }

    /// Items on sale, indexed as `PlayerCommand::Purchase` expects.
    pub fn market(&self) -> &[MarketItem] {
        &self.market
    }

    pub fn sides(&self) -> Option<&Sides> {
        self.sides.as_ref()
    }

    pub fn battlefield(&self) -> &Battlefield {
        &self.field
    }

    pub fn winner(&self) -> Option<SideId> {
        self.winner
    }

    pub fn actions_left(&self) -> u32 {
        self.actions_left
    }

    #[cfg(test)]
    pub fn battlefield_mut(&mut self) -> &mut Battlefield {
        &mut self.field
    }

    #[cfg(test)]
    pub fn sides_mut(&mut self) -> Option<&mut Sides> {
        self.sides.as_mut()
    }

    #[cfg(test)]
    pub fn intel(&self) -> &Intel {
        &self.intel
    }

    #[cfg(test)]
    pub fn active(&self) -> Option<&ActiveAction> {
        self.active.as_ref()
    }

    /// Start a match on an empty board (no facilities, no seeding) with the
    /// human side to act.
    #[cfg(test)]
    pub fn start_empty_match(&mut self, player: &str, adversary: &str) {
        let sides = world_setup::create_sides(&self.catalogue, &self.rules, player, adversary)
            .expect("test countries exist");
        self.field.clear();
        self.intel.clear();
        self.sides = Some(sides);
        self.winner = None;
        self.active = None;
        self.phase = GamePhase::PlayerTurn;
        self.begin_player_turn();
    }

    // --- Command processing ---

    /// Process all queued commands.
    fn process_commands(&mut self) {
        while let Some(command) = self.command_queue.pop_front() {
            if let Err(reason) = self.handle_command(command.clone()) {
                self.reject(&command, reason);
            }
        }
    }

    fn reject(&mut self, command: &PlayerCommand, reason: RejectReason) {
        tracing::debug!(?command, %reason, "command rejected");
        self.alerts.push(Alert {
            level: AlertLevel::Info,
            message: reason.to_string(),
            tick: self.time.tick,
        });
    }

    fn require_phase(&self, allowed: &[GamePhase]) -> Result<(), RejectReason> {
        if allowed.contains(&self.phase) {
            Ok(())
        } else {
            Err(RejectReason::WrongPhase(self.phase))
        }
    }

    fn require_action(&self) -> Result<(), RejectReason> {
        self.require_phase(&[GamePhase::PlayerTurn])?;
        if self.actions_left == 0 {
            return Err(RejectReason::NoActionLeft);
        }
        Ok(())
    }

    fn sides_mut_or_reject(&mut self) -> Result<&mut Sides, RejectReason> {
        let phase = self.phase;
        self.sides.as_mut().ok_or(RejectReason::WrongPhase(phase))
    }

    /// Handle a single player command. Nothing is mutated on `Err`.
    fn handle_command(&mut self, command: PlayerCommand) -> Result<(), RejectReason> {
        match command {
            PlayerCommand::StartGame => {
                self.require_phase(&[GamePhase::Menu])?;
                self.transition(PhaseEvent::StartGame);
            }
            PlayerCommand::ConfirmCountries { player, adversary } => {
                self.require_phase(&[GamePhase::CountrySelect])?;
                self.start_match(&player, &adversary)?;
            }
            PlayerCommand::ReturnToMenu => self.reset(PhaseEvent::ReturnToMenu),
            PlayerCommand::PlaceToken { token, at } => self.place_token(token, at)?,
            PlayerCommand::Retract { at } => self.retract(at)?,
            PlayerCommand::FinishDeploy => {
                self.require_phase(&[GamePhase::Deploy])?;
                self.transition(PhaseEvent::DeployFinished);
                self.begin_player_turn();
            }
            PlayerCommand::MoveUnit { from, to } => {
                self.require_action()?;
                if !self.board.contains(to) {
                    return Err(RejectReason::OffBoard(to));
                }
                let unit = self
                    .field
                    .unit_at(SideId::Player, from)
                    .ok_or(RejectReason::NoUnitAt(from))?;
                let path = systems::combat::plan_path(from, to, unit.kind.stats().range)?;
                self.actions_left -= 1;
                self.commit_move(SideId::Player, unit, path);
            }
            PlayerCommand::FireMissile {
                missile,
                launch,
                target,
            } => {
                self.require_action()?;
                self.launch_missile(SideId::Player, missile, launch, target)?;
                self.actions_left -= 1;
            }
            PlayerCommand::Purchase { item } => {
                self.require_phase(&[
                    GamePhase::Deploy,
                    GamePhase::PlayerTurn,
                    GamePhase::MissileAnimation,
                    GamePhase::MoveAnimation,
                ])?;
                let item = self
                    .market
                    .get(item)
                    .cloned()
                    .ok_or(RejectReason::UnknownItem(item))?;
                let sides = self.sides_mut_or_reject()?;
                systems::economy::purchase(&mut sides.player, &item)?;
                tracing::debug!(item = %item.name, price = item.price, "purchase");
                self.events.push(OutcomeEvent::ItemPurchased {
                    item: item.name,
                    price: item.price,
                });
            }
        }
        Ok(())
    }

    fn start_match(&mut self, player: &str, adversary: &str) -> Result<(), RejectReason> {
        let mut sides = world_setup::create_sides(&self.catalogue, &self.rules, player, adversary)?;

        self.field.clear();
        self.intel.clear();
        world_setup::place_facilities(&mut self.field, &self.board, &mut self.rng, SideId::Player);
        world_setup::place_facilities(&mut self.field, &self.board, &mut self.rng, SideId::Adversary);
        world_setup::seed_adversary(
            &mut self.field,
            &self.board,
            &mut self.rng,
            &mut sides.adversary,
            SideId::Adversary,
        );

        self.sides = Some(sides);
        self.winner = None;
        self.active = None;
        self.actions_left = 0;
        self.transition(PhaseEvent::CountriesConfirmed);
        tracing::info!(player, adversary, assets = self.field.len(), "match started");
        Ok(())
    }

    fn place_token(&mut self, token: TokenKind, at: GridPos) -> Result<(), RejectReason> {
        self.require_phase(&[GamePhase::Deploy, GamePhase::PlayerTurn])?;
        let in_turn = self.phase == GamePhase::PlayerTurn;
        if in_turn && self.actions_left == 0 {
            return Err(RejectReason::NoActionLeft);
        }
        if !self.board.contains(at) {
            return Err(RejectReason::OffBoard(at));
        }
        if !self.board.is_home(SideId::Player, at) {
            return Err(RejectReason::NotHomeTile(at));
        }
        if !self.field.is_free(SideId::Player, Layer::Mobile, at)
            || !self.field.is_free(SideId::Player, Layer::Defense, at)
        {
            return Err(RejectReason::TileOccupied(at));
        }

        let sides = self.sides.as_mut().ok_or(RejectReason::WrongPhase(self.phase))?;
        if sides.player.tokens.get(token) == 0 {
            return Err(RejectReason::OutOfTokens(token));
        }
        match (token.unit_kind(), token.defense_kind()) {
            (Some(kind), _) => self.field.spawn_unit(SideId::Player, kind, at)?,
            (None, Some(kind)) => self.field.spawn_defense(SideId::Player, kind, at)?,
            (None, None) => return Err(RejectReason::OutOfTokens(token)),
        };
        sides.player.tokens.take(token);
        self.events.push(OutcomeEvent::UnitPlaced {
            side: SideId::Player,
            token,
            at,
        });

        if in_turn {
            self.actions_left -= 1;
            self.active = Some(ActiveAction::Moves(MoveSequence::placement(SideId::Player)));
            self.transition(PhaseEvent::MoveCommitted);
        }
        Ok(())
    }

    fn retract(&mut self, at: GridPos) -> Result<(), RejectReason> {
        self.require_phase(&[GamePhase::Deploy])?;
        let (entity, token) = if let Some(unit) = self.field.unit_at(SideId::Player, at) {
            (unit.entity, TokenKind::from(unit.kind))
        } else if let Some((entity, kind)) = self.field.defense_at(SideId::Player, at) {
            (entity, TokenKind::from(kind))
        } else {
            return Err(RejectReason::NothingToRetract(at));
        };

        let sides = self.sides_mut_or_reject()?;
        sides.player.tokens.add(token, 1);
        self.field.remove(entity);
        self.events.push(OutcomeEvent::UnitRetracted {
            side: SideId::Player,
            token,
            at,
        });
        Ok(())
    }

    // --- Actions ---

    /// Validate and launch a missile for `side`. Consumes one shot.
    fn launch_missile(
        &mut self,
        side: SideId,
        missile: usize,
        launch: GridPos,
        target: GridPos,
    ) -> Result<(), RejectReason> {
        let phase = self.phase;
        let sides = self.sides.as_mut().ok_or(RejectReason::WrongPhase(phase))?;
        let firer = sides.get_mut(side);
        let spec = systems::missile::validate_launch(
            &self.board,
            &self.rules,
            firer,
            side,
            missile,
            launch,
            target,
        )?;
        firer.shots_left -= 1;

        tracing::info!(?side, missile = %spec.name, %launch, %target, "missile launched");
        self.events.push(OutcomeEvent::MissileLaunched {
            side,
            missile: spec.name.clone(),
            launch,
            target,
        });
        self.active = Some(ActiveAction::Missile(systems::missile::launch(
            &self.board,
            &self.rules,
            side,
            spec,
            launch,
            target,
        )));
        self.transition(PhaseEvent::MissileLaunched);
        Ok(())
    }

    fn commit_move(&mut self, side: SideId, unit: UnitRecord, path: Vec<GridPos>) {
        tracing::debug!(?side, kind = ?unit.kind, from = %unit.pos, steps = path.len(), "move committed");
        self.active = Some(ActiveAction::Moves(MoveSequence::new(
            side,
            unit.entity,
            unit.kind,
            path,
        )));
        self.transition(PhaseEvent::MoveCommitted);
    }

    /// Run all per-tick systems for the current phase.
    fn run_systems(&mut self) {
        match self.phase {
            GamePhase::MissileAnimation | GamePhase::MoveAnimation => self.step_action(),
            GamePhase::GameOver => {
                self.game_over_ticks = self.game_over_ticks.saturating_sub(1);
                if self.game_over_ticks == 0 {
                    self.reset(PhaseEvent::GameOverExpired);
                }
            }
            _ => {}
        }

        if let Some(sides) = self.sides.as_ref() {
            systems::radar::run(&self.field, &self.board, sides, &self.rules, &mut self.intel);
        }
    }

    fn step_action(&mut self) {
        let Some(mut action) = self.active.take() else {
            return;
        };
        let finished = match &mut action {
            ActiveAction::Missile(flight) => self.step_missile(flight),
            ActiveAction::Moves(seq) => self.step_moves(seq),
        };
        if finished {
            self.finish_action(action.initiator());
        } else {
            self.active = Some(action);
        }
    }

    fn step_missile(&mut self, flight: &mut MissileFlight) -> bool {
        let Some(sides) = self.sides.as_mut() else {
            return true;
        };
        let defender = flight.defender();
        let status = systems::missile::run(
            flight,
            &self.field,
            &self.board,
            &self.rules,
            sides.get(defender),
            &mut self.events,
        );

        match status {
            FlightStatus::InFlight => false,
            FlightStatus::Intercepted => {
                let reward = systems::economy::award_interception(sides.get_mut(defender), &self.rules);
                tracing::info!(?defender, missile = %flight.missile.name, reward, "missile intercepted");
                self.events
                    .push(OutcomeEvent::MissileIntercepted { defender, reward });
                true
            }
            FlightStatus::Landed => {
                let report = systems::missile::resolve_strike(
                    &mut self.field,
                    &self.board,
                    &self.rules,
                    sides,
                    &mut self.intel,
                    &mut self.rng,
                    flight.attacker,
                    &flight.missile,
                    flight.target,
                );
                tracing::info!(
                    attacker = ?flight.attacker,
                    missile = %flight.missile.name,
                    target = %flight.target,
                    damage = report.damage,
                    hits = report.asset_hits,
                    "strike resolved"
                );
                self.events.push(OutcomeEvent::StrikeResolved {
                    attacker: flight.attacker,
                    missile: flight.missile.name.clone(),
                    target: flight.target,
                    damage: report.damage,
                    asset_hits: report.asset_hits,
                    reward: report.reward,
                });
                true
            }
        }
    }

    fn step_moves(&mut self, seq: &mut MoveSequence) -> bool {
        let Some(sides) = self.sides.as_mut() else {
            return true;
        };
        let done = systems::combat::run(
            seq,
            &mut self.field,
            sides,
            &self.rules,
            &mut self.intel,
            &mut self.rng,
            &mut self.events,
        );
        if done {
            systems::territory::run(&self.field, &self.board, sides, &mut self.events);
        }
        done
    }

    /// Settle the phase after an action and hand the turn over.
    fn finish_action(&mut self, initiator: SideId) {
        if self.check_game_over() {
            return;
        }
        self.transition(PhaseEvent::ActionComplete);
        match phase::next_actor(initiator) {
            SideId::Adversary => self.run_adversary_turn(),
            SideId::Player => self.begin_player_turn(),
        }
    }

    fn begin_player_turn(&mut self) {
        self.actions_left = 1;
        if let Some(sides) = self.sides.as_mut() {
            sides.player.shots_left = 1;
        }
    }

    // --- Adversary ---

    /// Policy input for `side`, built from the engine's own state.
    fn adversary_context(&self, side: SideId) -> Option<AdversaryContext> {
        let state = self.sides.as_ref()?.get(side);
        Some(AdversaryContext {
            side,
            board: self.board,
            missile_ranges: state
                .missiles
                .iter()
                .map(|m| m.range_tiles(&self.rules))
                .collect(),
            shots_left: state.shots_left,
            units: self
                .field
                .units(side)
                .into_iter()
                .map(|u| UnitSlot {
                    pos: u.pos,
                    kind: u.kind,
                })
                .collect(),
        })
    }

    fn run_adversary_turn(&mut self) {
        let Some(sides) = self.sides.as_mut() else {
            return;
        };
        sides.adversary.shots_left = 1;
        let Some(ctx) = self.adversary_context(SideId::Adversary) else {
            return;
        };
        let params = PolicyParams::from(&self.rules);
        let decision = warboard_adversary::decide(&ctx, &params, &mut self.rng);
        tracing::debug!(?decision, "adversary turn");

        let result = match decision {
            Decision::Strike {
                missile,
                launch,
                target,
            } => self.launch_missile(SideId::Adversary, missile, launch, target),
            Decision::Advance { from, path } => match self.field.unit_at(SideId::Adversary, from) {
                Some(unit) => {
                    self.commit_move(SideId::Adversary, unit, path);
                    Ok(())
                }
                None => Err(RejectReason::NoUnitAt(from)),
            },
            Decision::Pass => {
                self.adversary_passes();
                return;
            }
        };
        if let Err(reason) = result {
            tracing::debug!(%reason, "adversary action refused");
            self.adversary_passes();
        }
    }

    fn adversary_passes(&mut self) {
        self.events.push(OutcomeEvent::AdversaryPassed);
        self.begin_player_turn();
    }

    // --- Phase ---

    /// Apply a phase event. Returns false if the current phase ignores it.
    fn transition(&mut self, event: PhaseEvent) -> bool {
        match phase::next_phase(self.phase, event) {
            Some(next) => {
                tracing::debug!(from = ?self.phase, to = ?next, ?event, "phase transition");
                self.phase = next;
                true
            }
            None => false,
        }
    }

    /// Enter GameOver if either side is destroyed.
    fn check_game_over(&mut self) -> bool {
        let Some(loser) = self.sides.as_ref().and_then(Sides::loser) else {
            return false;
        };
        if !self.transition(PhaseEvent::SideDestroyed) {
            return false;
        }
        let winner = loser.opponent();
        self.winner = Some(winner);
        self.active = None;
        self.actions_left = 0;
        self.game_over_ticks = self.rules.game_over_display_ticks.max(1);

        tracing::info!(?winner, tick = self.time.tick, "game over");
        self.events.push(OutcomeEvent::GameOver { winner });
        self.alerts.push(Alert {
            level: AlertLevel::Warning,
            message: format!("{winner:?} wins"),
            tick: self.time.tick,
        });
        true
    }

    /// Drop the match and return to the menu.
    fn reset(&mut self, event: PhaseEvent) {
        self.field.clear();
        self.intel.clear();
        self.sides = None;
        self.active = None;
        self.winner = None;
        self.actions_left = 0;
        self.game_over_ticks = 0;
        self.transition(event);
    }
}
