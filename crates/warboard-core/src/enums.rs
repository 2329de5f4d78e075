//! Enumeration types used throughout the simulation.

use serde::{Deserialize, Serialize};

/// One of the two belligerents.
///
/// `Player` holds the columns left of the midline, `Adversary` the rest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum SideId {
    Player,
    Adversary,
}

impl SideId {
    pub fn opponent(self) -> SideId {
        match self {
            SideId::Player => SideId::Adversary,
            SideId::Adversary => SideId::Player,
        }
    }

    /// Direction units of this side face (+1 = toward higher columns).
    pub fn facing(self) -> i8 {
        match self {
            SideId::Player => 1,
            SideId::Adversary => -1,
        }
    }
}

/// Mobile unit kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UnitKind {
    Tank,
    Troop,
    Jet,
}

/// Static defense kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DefenseKind {
    /// Grants detection coverage and enables nearby AntiAir.
    Radar,
    /// Intercepts missiles and jets inside friendly radar coverage.
    AntiAir,
}

/// Infrastructure placed at match start. Pure strike targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FacilityKind {
    PowerGrid,
    NuclearPlant,
    Stockpile,
    WeaponsDepot,
    RadarStation,
}

impl FacilityKind {
    pub const ALL: [FacilityKind; 5] = [
        FacilityKind::PowerGrid,
        FacilityKind::NuclearPlant,
        FacilityKind::Stockpile,
        FacilityKind::WeaponsDepot,
        FacilityKind::RadarStation,
    ];
}

/// A placeable token held by a side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TokenKind {
    Tank,
    Troop,
    Jet,
    AntiAir,
    Radar,
}

impl TokenKind {
    /// The mobile unit this token deploys, if it is a unit token.
    pub fn unit_kind(self) -> Option<UnitKind> {
        match self {
            TokenKind::Tank => Some(UnitKind::Tank),
            TokenKind::Troop => Some(UnitKind::Troop),
            TokenKind::Jet => Some(UnitKind::Jet),
            TokenKind::AntiAir | TokenKind::Radar => None,
        }
    }

    /// The static defense this token deploys, if it is a defense token.
    pub fn defense_kind(self) -> Option<DefenseKind> {
        match self {
            TokenKind::AntiAir => Some(DefenseKind::AntiAir),
            TokenKind::Radar => Some(DefenseKind::Radar),
            _ => None,
        }
    }
}

impl From<UnitKind> for TokenKind {
    fn from(kind: UnitKind) -> Self {
        match kind {
            UnitKind::Tank => TokenKind::Tank,
            UnitKind::Troop => TokenKind::Troop,
            UnitKind::Jet => TokenKind::Jet,
        }
    }
}

impl From<DefenseKind> for TokenKind {
    fn from(kind: DefenseKind) -> Self {
        match kind {
            DefenseKind::Radar => TokenKind::Radar,
            DefenseKind::AntiAir => TokenKind::AntiAir,
        }
    }
}

/// Perk attached to a purchased AA battery.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AaPerk {
    /// +5 cash per interception.
    Akash,
    /// +1 AA range.
    S400,
    /// +10 cash per interception.
    Patriot,
    /// +8 cash per interception.
    IronDome,
}

/// Result of a unit-vs-unit clash.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ClashOutcome {
    AttackerWins,
    DefenderWins,
}

/// Game phase (top-level state).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    #[default]
    Menu,
    CountrySelect,
    /// Free placement and retraction before the battle starts.
    Deploy,
    /// The human side may take exactly one action.
    PlayerTurn,
    /// A missile (and possibly its interceptor) is in flight.
    MissileAnimation,
    /// A unit is stepping along its path.
    MoveAnimation,
    GameOver,
}

impl GamePhase {
    /// Phases in which both sides exist on the board.
    pub fn in_match(self) -> bool {
        matches!(
            self,
            GamePhase::Deploy
                | GamePhase::PlayerTurn
                | GamePhase::MissileAnimation
                | GamePhase::MoveAnimation
        )
    }

    pub fn is_animating(self) -> bool {
        matches!(self, GamePhase::MissileAnimation | GamePhase::MoveAnimation)
    }
}

/// Alert severity level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum AlertLevel {
    Info,
    Warning,
}
