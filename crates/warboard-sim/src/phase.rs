//! Turn/phase state machine.
//!
//! Transitions are a pure table lookup; the engine feeds events in and
//! applies whatever phase comes back. Completing an action does not call
//! into the next actor directly: `next_actor` names who acts next and the
//! engine dispatches within the same tick.

use warboard_core::enums::{GamePhase, SideId};

/// Something that may move the match to another phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhaseEvent {
    StartGame,
    CountriesConfirmed,
    DeployFinished,
    MissileLaunched,
    MoveCommitted,
    /// The in-flight missile or move sequence has fully resolved.
    ActionComplete,
    /// A side reached 100 % damage.
    SideDestroyed,
    GameOverExpired,
    ReturnToMenu,
}

/// `(phase, event) -> phase`. `None` means the event is not accepted now.
pub fn next_phase(phase: GamePhase, event: PhaseEvent) -> Option<GamePhase> {
    use GamePhase::*;
    use PhaseEvent::*;

    match (phase, event) {
        (_, ReturnToMenu) => Some(Menu),
        (Menu, StartGame) => Some(CountrySelect),
        (CountrySelect, CountriesConfirmed) => Some(Deploy),
        (Deploy, DeployFinished) => Some(PlayerTurn),
        // The adversary acts in the tick the previous animation ends, before
        // the phase has settled back on PlayerTurn.
        (PlayerTurn | MissileAnimation | MoveAnimation, MissileLaunched) => Some(MissileAnimation),
        (PlayerTurn | MissileAnimation | MoveAnimation, MoveCommitted) => Some(MoveAnimation),
        (MissileAnimation | MoveAnimation, ActionComplete) => Some(PlayerTurn),
        (Deploy | PlayerTurn | MissileAnimation | MoveAnimation, SideDestroyed) => Some(GameOver),
        (GameOver, GameOverExpired) => Some(Menu),
        _ => None,
    }
}

/// Who acts after `initiator`'s action has resolved.
pub fn next_actor(initiator: SideId) -> SideId {
    initiator.opponent()
}
