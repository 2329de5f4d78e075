//! Host configuration loaded from TOML.
//!
//! ```toml
//! [rules]
//! adversary_strike_chance = 0.7
//!
//! [match]
//! player = "India"
//! adversary = "China"
//! seed = 7
//! ```
//!
//! Every key is optional; missing ones fall back to the built-in defaults.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use warboard_core::catalogue::CountryCatalogue;
use warboard_core::config::RulesConfig;
use warboard_sim::SimConfig;

use crate::error::AppError;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub rules: RulesConfig,
    #[serde(rename = "match")]
    pub matchup: MatchConfig,
}

/// Narrowest board that still leaves each side a rear and a front column.
pub const MIN_GRID_WIDTH: i32 = 4;

/// Who plays, on which seed, for how long.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchConfig {
    pub player: String,
    pub adversary: String,
    pub seed: u64,
    /// Hard stop for runs that never reach game over.
    pub max_ticks: u64,
    /// JSON country catalogue; the built-in one when unset.
    pub catalogue: Option<PathBuf>,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            player: "USA".into(),
            adversary: "Russia".into(),
            seed: 42,
            max_ticks: 200_000,
            catalogue: None,
        }
    }
}

impl AppConfig {
    pub fn from_toml_str(contents: &str) -> Result<Self, AppError> {
        let config: Self = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject board sizes the engine cannot lay out.
    pub fn validate(&self) -> Result<(), AppError> {
        let rules = &self.rules;
        if rules.grid_width < MIN_GRID_WIDTH {
            return Err(AppError::InvalidRules(format!(
                "grid_width must be at least {MIN_GRID_WIDTH}, got {}",
                rules.grid_width
            )));
        }
        if rules.grid_height <= 0 {
            return Err(AppError::InvalidRules(format!(
                "grid_height must be positive, got {}",
                rules.grid_height
            )));
        }
        Ok(())
    }

    pub fn load(path: &Path) -> Result<Self, AppError> {
        let contents = std::fs::read_to_string(path)?;
        let config = Self::from_toml_str(&contents)?;
        tracing::debug!(path = %path.display(), "config loaded");
        Ok(config)
    }

    pub fn load_catalogue(&self) -> Result<CountryCatalogue, AppError> {
        match &self.matchup.catalogue {
            Some(path) => {
                let json = std::fs::read_to_string(path)?;
                Ok(CountryCatalogue::from_json_str(&json)?)
            }
            None => Ok(CountryCatalogue::builtin()),
        }
    }

    /// Engine configuration for this match.
    pub fn sim_config(&self) -> Result<SimConfig, AppError> {
        self.validate()?;
        Ok(SimConfig {
            seed: self.matchup.seed,
            rules: self.rules.clone(),
            catalogue: self.load_catalogue()?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_is_default() {
        let config = AppConfig::from_toml_str("").unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.matchup.seed, 42);
    }

    #[test]
    fn test_partial_tables() {
        let config = AppConfig::from_toml_str(
            r#"
            [rules]
            adversary_strike_chance = 0.9
            starting_money = 300

            [match]
            player = "India"
            seed = 7
            "#,
        )
        .unwrap();
        assert_eq!(config.rules.adversary_strike_chance, 0.9);
        assert_eq!(config.rules.starting_money, 300);
        assert_eq!(config.rules.grid_width, 28);
        assert_eq!(config.matchup.player, "India");
        assert_eq!(config.matchup.adversary, "Russia");
        assert_eq!(config.matchup.seed, 7);
    }

    #[test]
    fn test_bad_toml_is_a_config_error() {
        let err = AppConfig::from_toml_str("[rules\nseed = ").unwrap_err();
        assert!(matches!(err, AppError::Config(_)));
    }

    #[test]
    fn test_degenerate_board_rejected() {
        for rules in ["grid_height = 0", "grid_height = -3", "grid_width = 3"] {
            let err = AppConfig::from_toml_str(&format!("[rules]\n{rules}")).unwrap_err();
            assert!(matches!(err, AppError::InvalidRules(_)), "{rules}: {err}");
        }
        let config = AppConfig::from_toml_str("[rules]\ngrid_width = 4\ngrid_height = 1").unwrap();
        assert_eq!(config.rules.grid_width, 4);
    }

    #[test]
    fn test_sim_config_refuses_invalid_rules() {
        let mut config = AppConfig::default();
        config.rules.grid_height = 0;
        assert!(matches!(config.sim_config(), Err(AppError::InvalidRules(_))));
    }

    #[test]
    fn test_missing_catalogue_file() {
        let mut config = AppConfig::default();
        config.matchup.catalogue = Some(PathBuf::from("/nonexistent/countries.json"));
        assert!(matches!(config.load_catalogue(), Err(AppError::Io(_))));
    }

    #[test]
    fn test_sim_config_carries_seed_and_rules() {
        let mut config = AppConfig::default();
        config.matchup.seed = 99;
        config.rules.radar_range_base = 6;
        let sim = config.sim_config().unwrap();
        assert_eq!(sim.seed, 99);
        assert_eq!(sim.rules.radar_range_base, 6);
        assert!(sim.catalogue.get("USA").is_some());
    }
}
