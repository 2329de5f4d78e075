//! Per-side mutable state: economy, inventory and damage.
//!
//! Board assets live in the `Battlefield`; everything else a side owns lives
//! here, outside the ECS.

use warboard_core::catalogue::CountryProfile;
use warboard_core::components::{MissileSpec, TokenCounts};
use warboard_core::config::RulesConfig;
use warboard_core::constants::MAX_DAMAGE;
use warboard_core::enums::SideId;
use warboard_core::state::{MissileView, SideView};

#[derive(Debug, Clone)]
pub struct SideState {
    pub country: String,
    pub is_human: bool,
    damage: u32,
    pub missiles: Vec<MissileSpec>,
    pub money: u32,
    pub strike_tokens: u32,
    pub tokens: TokenCounts,
    pub shots_left: u32,
    pub aa_range_bonus: u32,
    pub radar_range_bonus: u32,
    pub intercept_cash_bonus: u32,
}

impl SideState {
    pub fn from_profile(
        country: &str,
        profile: &CountryProfile,
        is_human: bool,
        rules: &RulesConfig,
    ) -> Self {
        Self {
            country: country.to_string(),
            is_human,
            damage: 0,
            missiles: profile.starting_missiles(),
            money: rules.starting_money,
            strike_tokens: 0,
            tokens: profile.starting_tokens(),
            shots_left: 1,
            aa_range_bonus: 0,
            radar_range_bonus: 0,
            intercept_cash_bonus: 0,
        }
    }

    /// Damage in percent, 0..=100.
    pub fn damage(&self) -> u32 {
        self.damage
    }

    /// Add damage, saturating at 100. Returns the new total.
    pub fn apply_damage(&mut self, amount: u32) -> u32 {
        self.damage = self.damage.saturating_add(amount).min(MAX_DAMAGE);
        self.damage
    }

    pub fn is_destroyed(&self) -> bool {
        self.damage >= MAX_DAMAGE
    }

    pub fn radar_range(&self, rules: &RulesConfig) -> u32 {
        rules.radar_range_base + self.radar_range_bonus
    }

    pub fn aa_range(&self, rules: &RulesConfig) -> u32 {
        rules.aa_range_base + self.aa_range_bonus
    }

    pub fn view(&self, rules: &RulesConfig) -> SideView {
        SideView {
            country: self.country.clone(),
            is_human: self.is_human,
            damage: self.damage,
            money: self.money,
            strike_tokens: self.strike_tokens,
            tokens: self.tokens,
            shots_left: self.shots_left,
            aa_range_bonus: self.aa_range_bonus,
            radar_range_bonus: self.radar_range_bonus,
            intercept_cash_bonus: self.intercept_cash_bonus,
            missiles: self
                .missiles
                .iter()
                .map(|spec| MissileView {
                    spec: spec.clone(),
                    range_tiles: spec.range_tiles(rules),
                })
                .collect(),
        }
    }
}

/// Both belligerents.
#[derive(Debug, Clone)]
pub struct Sides {
    pub player: SideState,
    pub adversary: SideState,
}

impl Sides {
    pub fn get(&self, side: SideId) -> &SideState {
        match side {
            SideId::Player => &self.player,
            SideId::Adversary => &self.adversary,
        }
    }

    pub fn get_mut(&mut self, side: SideId) -> &mut SideState {
        match side {
            SideId::Player => &mut self.player,
            SideId::Adversary => &mut self.adversary,
        }
    }

    /// `(side, its opponent)` borrowed mutably at once.
    pub fn split_mut(&mut self, side: SideId) -> (&mut SideState, &mut SideState) {
        match side {
            SideId::Player => (&mut self.player, &mut self.adversary),
            SideId::Adversary => (&mut self.adversary, &mut self.player),
        }
    }

    /// The first destroyed side, player checked first.
    pub fn loser(&self) -> Option<SideId> {
        [SideId::Player, SideId::Adversary]
            .into_iter()
            .find(|side| self.get(*side).is_destroyed())
    }
}
