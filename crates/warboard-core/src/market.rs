//! The purchasable-items catalogue.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::catalogue::CountryCatalogue;
use crate::components::MissileSpec;
use crate::enums::{AaPerk, TokenKind};

/// What buying an item does to the buyer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum MarketEffect {
    /// One placeable unit token.
    Token { token: TokenKind },
    /// One AA token, optionally with a side-wide perk.
    AntiAir { perk: Option<AaPerk> },
    /// One radar token and +1 radar range for the whole side.
    Radar,
    /// Adds a missile type to the inventory.
    Missile { missile: MissileSpec },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketItem {
    pub name: String,
    pub price: u32,
    pub effect: MarketEffect,
}

impl MarketItem {
    fn new(name: impl Into<String>, price: u32, effect: MarketEffect) -> Self {
        Self {
            name: name.into(),
            price,
            effect,
        }
    }
}

/// Fixed stock followed by every distinct catalogue missile.
pub fn build_market(catalogue: &CountryCatalogue) -> Vec<MarketItem> {
    let mut items = vec![
        MarketItem::new("Tank", 90, MarketEffect::Token { token: TokenKind::Tank }),
        MarketItem::new("Troop", 40, MarketEffect::Token { token: TokenKind::Troop }),
        MarketItem::new("Jet", 140, MarketEffect::Token { token: TokenKind::Jet }),
        MarketItem::new("AA Battery", 70, MarketEffect::AntiAir { perk: None }),
        MarketItem::new("Radar Station", 80, MarketEffect::Radar),
        MarketItem::new(
            "Anti-Radar Missile (ARM)",
            130,
            MarketEffect::Missile {
                missile: MissileSpec::new("ARM", 800, 14, 1).anti_radar(),
            },
        ),
        MarketItem::new(
            "Anti-Radar (AR) Missile",
            110,
            MarketEffect::Missile {
                missile: crate::catalogue::default_anti_radar_missile(),
            },
        ),
        MarketItem::new(
            "Akash Battery (India)",
            85,
            MarketEffect::AntiAir {
                perk: Some(AaPerk::Akash),
            },
        ),
        MarketItem::new(
            "S-400 Battery (Russia)",
            120,
            MarketEffect::AntiAir {
                perk: Some(AaPerk::S400),
            },
        ),
        MarketItem::new(
            "Patriot PAC-3 (USA)",
            115,
            MarketEffect::AntiAir {
                perk: Some(AaPerk::Patriot),
            },
        ),
        MarketItem::new(
            "Iron Dome Launcher (Israel)",
            95,
            MarketEffect::AntiAir {
                perk: Some(AaPerk::IronDome),
            },
        ),
    ];

    let mut seen = HashSet::new();
    for (country, profile) in catalogue.iter() {
        for entry in &profile.missiles {
            if !seen.insert(entry.clone()) {
                continue;
            }
            items.push(MarketItem::new(
                format!("{} ({})", entry.name, country),
                missile_price(entry.range_km, entry.damage, entry.radius),
                MarketEffect::Missile {
                    missile: entry.to_spec(),
                },
            ));
        }
    }
    items
}

/// `floor(0.02 * range + 3 * damage + 16 * radius)`.
pub fn missile_price(range_km: u32, damage: u32, radius: u32) -> u32 {
    (0.02 * range_km as f64 + 3.0 * damage as f64 + 16.0 * radius as f64) as u32
}
