//! Outcome events emitted by the simulation for status display.

use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::types::GridPos;

/// One resolved happening, reported in the snapshot of the tick it occurred.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum OutcomeEvent {
    MissileLaunched {
        side: SideId,
        missile: String,
        launch: GridPos,
        target: GridPos,
    },
    /// The defender's AA committed to an interception.
    InterceptorLaunched { defender: SideId, battery: GridPos },
    MissileIntercepted { defender: SideId, reward: u32 },
    StrikeResolved {
        attacker: SideId,
        missile: String,
        target: GridPos,
        damage: u32,
        asset_hits: u32,
        reward: u32,
    },
    JetShotDown {
        defender: SideId,
        at: GridPos,
        reward: u32,
    },
    ClashResolved {
        attacker: SideId,
        attacker_kind: UnitKind,
        defender_kind: UnitKind,
        at: GridPos,
        outcome: ClashOutcome,
    },
    /// Units parked in enemy territory at the end of a move.
    TerritoryDamage { victim: SideId, damage: u32 },
    UnitPlaced {
        side: SideId,
        token: TokenKind,
        at: GridPos,
    },
    UnitRetracted {
        side: SideId,
        token: TokenKind,
        at: GridPos,
    },
    ItemPurchased { item: String, price: u32 },
    AdversaryPassed,
    GameOver { winner: SideId },
}

/// Alert for the UI status line.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Alert {
    pub level: AlertLevel,
    pub message: String,
    pub tick: u64,
}
