//! Money in and out: market purchases and combat rewards.

use warboard_core::config::RulesConfig;
use warboard_core::enums::{AaPerk, TokenKind};
use warboard_core::error::RejectReason;
use warboard_core::market::{MarketEffect, MarketItem};

use crate::side::SideState;

/// Cash added to every future interception by a perk battery.
fn perk_cash_bonus(perk: AaPerk) -> u32 {
    match perk {
        AaPerk::Akash => 5,
        AaPerk::Patriot => 10,
        AaPerk::IronDome => 8,
        AaPerk::S400 => 0,
    }
}

/// Buy one market item. Nothing changes unless the buyer can afford it.
pub fn purchase(buyer: &mut SideState, item: &MarketItem) -> Result<(), RejectReason> {
    if buyer.money < item.price {
        return Err(RejectReason::InsufficientFunds {
            have: buyer.money,
            need: item.price,
        });
    }
    buyer.money -= item.price;

    match &item.effect {
        MarketEffect::Token { token } => buyer.tokens.add(*token, 1),
        MarketEffect::AntiAir { perk } => {
            buyer.tokens.add(TokenKind::AntiAir, 1);
            if let Some(perk) = perk {
                if *perk == AaPerk::S400 {
                    buyer.aa_range_bonus += 1;
                }
                buyer.intercept_cash_bonus += perk_cash_bonus(*perk);
            }
        }
        MarketEffect::Radar => {
            buyer.tokens.add(TokenKind::Radar, 1);
            buyer.radar_range_bonus += 1;
        }
        MarketEffect::Missile { missile } => buyer.missiles.push(missile.clone()),
    }
    Ok(())
}

/// Pay the defender for destroying a missile. Returns the amount paid.
pub fn award_interception(defender: &mut SideState, rules: &RulesConfig) -> u32 {
    let reward = rules.intercept_reward + defender.intercept_cash_bonus;
    defender.money += reward;
    reward
}

/// Pay the defender for shooting down a jet. Returns the amount paid.
pub fn award_jet_kill(defender: &mut SideState, rules: &RulesConfig) -> u32 {
    let reward = rules.jet_kill_reward + defender.intercept_cash_bonus;
    defender.money += reward;
    reward
}

/// Strike reward: money for damage dealt and assets hit, plus strike tokens.
pub fn award_strike(attacker: &mut SideState, rules: &RulesConfig, damage: u32, asset_hits: u32) -> u32 {
    let reward = rules.money_per_damage * damage + rules.money_per_asset_hit * asset_hits;
    attacker.money += reward;
    attacker.strike_tokens += asset_hits;
    reward
}
