//! Country catalogue: the immutable lookup table sides are built from.
//!
//! Loaded once from JSON. A built-in catalogue ships with the crate.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::components::{MissileSpec, TokenCounts};
use crate::constants::*;
use crate::error::CatalogueError;

const BUILTIN_COUNTRIES: &str = include_str!("../data/countries.json");

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GroundForces {
    pub tanks: u32,
    #[serde(default)]
    pub artillery: u32,
    pub personnel: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AirForces {
    #[serde(default)]
    pub aircraft_total: u32,
    pub fighters: u32,
    #[serde(default)]
    pub bombers: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NavalForces {
    #[serde(default)]
    pub ships: u32,
    #[serde(default)]
    pub carriers: u32,
    #[serde(default)]
    pub subs: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DefenseRating {
    /// 0.0 – 1.0 rating; drives the starting AA token count.
    #[serde(default = "default_air_defense")]
    pub air_defense: f64,
}

impl Default for DefenseRating {
    fn default() -> Self {
        Self {
            air_defense: default_air_defense(),
        }
    }
}

fn default_air_defense() -> f64 {
    0.4
}

fn default_missile_damage() -> u32 {
    DEFAULT_MISSILE_DAMAGE
}

fn default_missile_radius() -> u32 {
    DEFAULT_MISSILE_RADIUS
}

/// A native missile as listed in the catalogue.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MissileEntry {
    pub name: String,
    pub range_km: u32,
    #[serde(default = "default_missile_damage")]
    pub damage: u32,
    #[serde(default = "default_missile_radius")]
    pub radius: u32,
}

impl MissileEntry {
    pub fn to_spec(&self) -> MissileSpec {
        MissileSpec::new(self.name.clone(), self.range_km, self.damage, self.radius)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CountryProfile {
    #[serde(default)]
    pub build_points: u32,
    pub ground: GroundForces,
    pub air: AirForces,
    #[serde(default)]
    pub naval: NavalForces,
    #[serde(default)]
    pub defense: DefenseRating,
    #[serde(default)]
    pub missiles: Vec<MissileEntry>,
}

impl CountryProfile {
    /// Tokens a side built from this profile starts with.
    pub fn starting_tokens(&self) -> TokenCounts {
        TokenCounts {
            tank: (self.ground.tanks / 3000).min(3),
            troop: (self.ground.personnel / 500_000).clamp(1, 4),
            jet: (self.air.fighters / 400).clamp(1, 3),
            anti_air: ((self.defense.air_defense * 4.0).floor().max(0.0) as u32).max(1),
            radar: 1,
        }
    }

    /// Native missiles plus the anti-radar missile every side receives.
    pub fn starting_missiles(&self) -> Vec<MissileSpec> {
        let mut missiles: Vec<MissileSpec> = self.missiles.iter().map(MissileEntry::to_spec).collect();
        missiles.push(default_anti_radar_missile());
        missiles
    }
}

pub fn default_anti_radar_missile() -> MissileSpec {
    MissileSpec::new(AR_MISSILE_NAME, AR_MISSILE_RANGE_KM, AR_MISSILE_DAMAGE, 1).anti_radar()
}

/// Country name → profile, ordered by name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CountryCatalogue {
    countries: BTreeMap<String, CountryProfile>,
}

impl CountryCatalogue {
    pub fn from_json_str(json: &str) -> Result<Self, CatalogueError> {
        let catalogue: CountryCatalogue = serde_json::from_str(json)?;
        if catalogue.countries.is_empty() {
            return Err(CatalogueError::Empty);
        }
        Ok(catalogue)
    }

    /// The catalogue embedded in this crate.
    pub fn builtin() -> Self {
        Self::from_json_str(BUILTIN_COUNTRIES).expect("built-in country catalogue is valid")
    }

    pub fn get(&self, name: &str) -> Option<&CountryProfile> {
        self.countries.get(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.countries.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &CountryProfile)> {
        self.countries.iter().map(|(name, profile)| (name.as_str(), profile))
    }

    pub fn len(&self) -> usize {
        self.countries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.countries.is_empty()
    }
}
