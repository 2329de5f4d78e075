//! Player commands sent from the presentation layer to the simulation.
//!
//! Commands are queued and processed at the next tick boundary. Invalid
//! commands are ignored apart from an informational alert.

use serde::{Deserialize, Serialize};

use crate::enums::TokenKind;
use crate::types::GridPos;

/// All possible human-side actions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PlayerCommand {
    // --- Menus ---
    /// Leave the menu for country selection.
    StartGame,
    /// Create both sides and enter deployment.
    ConfirmCountries { player: String, adversary: String },
    /// Abandon the match from any state.
    ReturnToMenu,

    // --- Deployment ---
    /// Place a token on a home tile. Costs the turn's action outside Deploy.
    PlaceToken { token: TokenKind, at: GridPos },
    /// Return a placed unit or defense to the token pool (Deploy only).
    Retract { at: GridPos },
    /// End deployment and start the first turn.
    FinishDeploy,

    // --- Turn actions ---
    /// Move the unit standing on `from` toward `to`.
    MoveUnit { from: GridPos, to: GridPos },
    /// Fire inventory missile `missile` from `launch` at `target`.
    FireMissile {
        missile: usize,
        launch: GridPos,
        target: GridPos,
    },

    // --- Market ---
    /// Buy market item `item` (index into the market list).
    Purchase { item: usize },
}
