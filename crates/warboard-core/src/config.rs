//! Immutable rules configuration handed to the engine at construction.

use serde::{Deserialize, Serialize};

use crate::constants::*;

/// Every tunable rule of a match. Missing keys deserialize to the defaults
/// in `constants.rs`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RulesConfig {
    pub grid_width: i32,
    pub grid_height: i32,
    pub km_per_tile: u32,
    pub tile_px: f64,

    pub radar_range_base: u32,
    pub aa_range_base: u32,

    pub starting_money: u32,
    pub intercept_reward: u32,
    pub jet_kill_reward: u32,
    pub money_per_damage: u32,
    pub money_per_asset_hit: u32,

    pub strike_damage_factor: f64,
    pub multi_hit_bonus: u32,
    pub max_strike_damage: u32,

    pub missile_hold_ticks: u32,
    pub missile_min_steps: u32,
    pub missile_px_per_step: f64,
    pub interceptor_min_steps: u32,
    pub interceptor_px_per_step: f64,
    pub game_over_display_ticks: u32,

    pub adversary_strike_chance: f64,
    pub adversary_launch_samples: usize,
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self {
            grid_width: GRID_WIDTH,
            grid_height: GRID_HEIGHT,
            km_per_tile: KM_PER_TILE,
            tile_px: TILE_PX,
            radar_range_base: RADAR_RANGE_BASE,
            aa_range_base: AA_RANGE_BASE,
            starting_money: STARTING_MONEY,
            intercept_reward: INTERCEPT_REWARD,
            jet_kill_reward: JET_KILL_REWARD,
            money_per_damage: MONEY_PER_DAMAGE,
            money_per_asset_hit: MONEY_PER_ASSET_HIT,
            strike_damage_factor: STRIKE_DAMAGE_FACTOR,
            multi_hit_bonus: MULTI_HIT_BONUS,
            max_strike_damage: MAX_STRIKE_DAMAGE,
            missile_hold_ticks: MISSILE_HOLD_TICKS,
            missile_min_steps: MISSILE_MIN_STEPS,
            missile_px_per_step: MISSILE_PX_PER_STEP,
            interceptor_min_steps: INTERCEPTOR_MIN_STEPS,
            interceptor_px_per_step: INTERCEPTOR_PX_PER_STEP,
            game_over_display_ticks: GAME_OVER_DISPLAY_TICKS,
            adversary_strike_chance: ADVERSARY_STRIKE_CHANCE,
            adversary_launch_samples: ADVERSARY_LAUNCH_SAMPLES,
        }
    }
}

impl RulesConfig {
    /// Column splitting the two home halves.
    pub fn midline(&self) -> i32 {
        self.grid_width / 2
    }

    /// Missile range in tiles, never below one.
    pub fn range_tiles(&self, range_km: u32) -> u32 {
        (range_km / self.km_per_tile.max(1)).max(1)
    }
}
