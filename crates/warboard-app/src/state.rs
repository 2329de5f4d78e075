//! Host state shared between the caller and the game loop thread.

use std::sync::mpsc;
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;

use warboard_core::commands::PlayerCommand;
use warboard_core::state::GameStateSnapshot;
use warboard_sim::SimConfig;

use crate::error::AppError;
use crate::game_loop;

/// Commands sent from the host to the game loop thread.
#[derive(Debug)]
pub enum GameLoopCommand {
    /// A player command to forward to the simulation engine.
    PlayerCommand(PlayerCommand),
    /// Shut down the game loop thread gracefully.
    Shutdown,
}

/// Handle on a running game loop.
///
/// - `command_tx` is `None` until `start` is called.
/// - `latest_snapshot` is shared with the loop thread and replaced every tick.
#[derive(Default)]
pub struct AppState {
    command_tx: Mutex<Option<mpsc::Sender<GameLoopCommand>>>,
    latest_snapshot: Arc<Mutex<Option<GameStateSnapshot>>>,
    handle: Mutex<Option<JoinHandle<()>>>,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Spawn the game loop thread with a fresh engine.
    pub fn start(&self, config: SimConfig) -> Result<(), AppError> {
        let mut tx_lock = self.command_tx.lock().map_err(|_| AppError::LoopStopped)?;
        if tx_lock.is_some() {
            return Err(AppError::AlreadyRunning);
        }
        let (cmd_tx, handle) = game_loop::spawn_game_loop(config, self.latest_snapshot.clone())?;
        *tx_lock = Some(cmd_tx);
        if let Ok(mut slot) = self.handle.lock() {
            *slot = Some(handle);
        }
        Ok(())
    }

    pub fn is_running(&self) -> bool {
        self.command_tx.lock().map(|tx| tx.is_some()).unwrap_or(false)
    }

    /// Forward a player command to the loop.
    pub fn send(&self, command: PlayerCommand) -> Result<(), AppError> {
        let tx_lock = self.command_tx.lock().map_err(|_| AppError::LoopStopped)?;
        let tx = tx_lock.as_ref().ok_or(AppError::NotStarted)?;
        tx.send(GameLoopCommand::PlayerCommand(command))
            .map_err(|_| AppError::LoopStopped)
    }

    /// Latest snapshot, if the loop has ticked at least once.
    pub fn snapshot(&self) -> Option<GameStateSnapshot> {
        self.latest_snapshot.lock().ok().and_then(|lock| lock.clone())
    }

    /// Stop the loop and wait for its thread to exit.
    pub fn shutdown(&self) {
        if let Ok(mut tx_lock) = self.command_tx.lock() {
            if let Some(tx) = tx_lock.take() {
                let _ = tx.send(GameLoopCommand::Shutdown);
            }
        }
        let handle = self.handle.lock().ok().and_then(|mut slot| slot.take());
        if let Some(handle) = handle {
            if handle.join().is_err() {
                tracing::warn!("game loop thread panicked");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_state_creation() {
        let state = AppState::new();
        assert!(!state.is_running());
        assert!(state.snapshot().is_none());
    }

    #[test]
    fn test_send_before_start() {
        let state = AppState::new();
        assert!(matches!(
            state.send(PlayerCommand::StartGame),
            Err(AppError::NotStarted)
        ));
    }

    #[test]
    fn test_start_twice_rejected() {
        let state = AppState::new();
        state.start(SimConfig::default()).unwrap();
        assert!(matches!(
            state.start(SimConfig::default()),
            Err(AppError::AlreadyRunning)
        ));
        state.shutdown();
        assert!(!state.is_running());
    }
}
