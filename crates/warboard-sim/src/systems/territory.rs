//! Occupation damage applied at the end of every move action.

use warboard_core::board::Board;
use warboard_core::enums::SideId;
use warboard_core::events::OutcomeEvent;

use crate::battlefield::Battlefield;
use crate::side::Sides;

/// Summed power of `side`'s units standing in the opponent's home half.
pub fn occupation_damage(field: &Battlefield, board: &Board, side: SideId) -> u32 {
    field
        .units(side)
        .iter()
        .filter(|u| board.is_home(side.opponent(), u.pos))
        .map(|u| u.kind.stats().power)
        .sum()
}

/// Charge each side for the enemy units occupying its half, whichever side
/// moved. Returns the total damage dealt.
pub fn run(
    field: &Battlefield,
    board: &Board,
    sides: &mut Sides,
    events: &mut Vec<OutcomeEvent>,
) -> u32 {
    let mut dealt = 0;
    for occupier in [SideId::Player, SideId::Adversary] {
        let damage = occupation_damage(field, board, occupier);
        if damage == 0 {
            continue;
        }
        let victim = occupier.opponent();
        let total = sides.get_mut(victim).apply_damage(damage);
        tracing::info!(?victim, damage, total, "territorial damage");
        events.push(OutcomeEvent::TerritoryDamage { victim, damage });
        dealt += damage;
    }
    dealt
}
