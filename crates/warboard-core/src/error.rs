//! Error types.
//!
//! `RejectReason` is not fatal: a rejected command leaves the simulation
//! untouched and is surfaced to the player as an informational alert.

use thiserror::Error;

use crate::enums::{GamePhase, TokenKind};
use crate::types::GridPos;

/// Why a command was refused.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RejectReason {
    // --- Invalid action ---
    #[error("not allowed during {0:?}")]
    WrongPhase(GamePhase),
    #[error("no action left this turn")]
    NoActionLeft,
    #[error("no shots left this turn")]
    NoShotsLeft,
    #[error("unknown missile #{0}")]
    UnknownMissile(usize),
    #[error("tile {0} is not on your half")]
    NotHomeTile(GridPos),
    #[error("target {0} is not on the enemy half")]
    TargetNotEnemy(GridPos),
    #[error("target is {distance} tiles away, missile reaches {range}")]
    OutOfRange { distance: u32, range: u32 },
    #[error("tile {0} is off the board")]
    OffBoard(GridPos),
    #[error("no unit of yours at {0}")]
    NoUnitAt(GridPos),
    #[error("this unit cannot move")]
    Immobile,
    #[error("destination is the unit's own tile")]
    NoPath,
    #[error("tile {0} is already occupied")]
    TileOccupied(GridPos),
    #[error("nothing to retract at {0}")]
    NothingToRetract(GridPos),
    #[error("unknown country {0:?}")]
    UnknownCountry(String),
    #[error("pick two different countries")]
    SameCountry,
    #[error("unknown market item #{0}")]
    UnknownItem(usize),

    // --- Resource exhaustion ---
    #[error("no {0:?} tokens left")]
    OutOfTokens(TokenKind),
    #[error("not enough money: have {have}, need {need}")]
    InsufficientFunds { have: u32, need: u32 },
}

/// Failure to load a country catalogue.
#[derive(Debug, Error)]
pub enum CatalogueError {
    #[error("catalogue JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("catalogue contains no countries")]
    Empty,
}
