//! Moves whose damage ignores the formula.

use super::formula::poke_round;
use super::trace::{ModifierTrace, Role};
use super::Damage;
use crate::entities::Pokemon;
use crate::field::{ChromaticField, Field};
use crate::moves::Move;

/// Damage of Seismic Toss, Night Shade, Dragon Rage and Sonic Boom.
pub(super) fn level_or_constant(attacker: &Pokemon, mv: &Move) -> Option<u32> {
    match mv.name.as_str() {
        "Seismic Toss" | "Night Shade" => Some(attacker.level),
        "Dragon Rage" => Some(40),
        "Sonic Boom" => Some(20),
        _ => None,
    }
}

/// Check if a move deals fixed damage (not affected by stats or rolls).
///
/// Returns `Some(damage)` for fixed damage moves, `None` otherwise. Runs
/// after immunities, so a Ghost is still safe from Seismic Toss.
pub fn get_fixed_damage(
    attacker: &Pokemon,
    defender: &Pokemon,
    mv: &Move,
    field: &Field,
    trace: &mut ModifierTrace,
) -> Option<Damage> {
    let protected = field.defender_side.is_protected;

    // ====================================================================
    // Level-based and constant damage
    // ====================================================================

    if let Some(mut damage) = level_or_constant(attacker, mv) {
        if field.is_field(ChromaticField::HauntedGraveyard) && mv.named(&["Night Shade"]) {
            damage = poke_round(damage as f64 * 3.0 / 2.0) as u32;
            trace.push_field(field.chromatic_field);
        }
        if attacker.has_ability(&["Parental Bond"]) {
            trace.push_ability(Role::Attacker, attacker);
            return Some(Damage::FixedPair(damage, damage));
        }
        return Some(Damage::Fixed(damage));
    }

    // ====================================================================
    // HP-based damage
    // ====================================================================

    match mv.name.as_str() {
        "Final Gambit" => Some(Damage::Fixed(attacker.cur_hp())),
        "Guardian of Alola" => {
            let mut lost = defender.cur_hp() * 3 / 4;
            if protected && attacker.item_name().contains(" Z") {
                lost = (lost as f64 / 4.0 - 0.5).ceil() as u32;
            }
            Some(Damage::Fixed(lost))
        }
        "Nature's Madness" => Some(Damage::Fixed(if protected { 0 } else { defender.cur_hp() / 2 })),
        _ => None,
    }
}

/// HP Pain Split takes from the defender: the gap down to the shared average.
pub fn pain_split(attacker: &Pokemon, defender: &Pokemon) -> u32 {
    let average = (attacker.cur_hp() + defender.cur_hp()) / 2;
    defender.cur_hp().saturating_sub(average)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::PokemonSet;
    use crate::moves::MoveSet;
    use crate::stats::StatsTable;
    use crate::types::Type;

    fn mon(ability: &str, level: u8, cur_hp: Option<u32>) -> Pokemon {
        Pokemon::from_set(PokemonSet {
            name: "Chansey".into(),
            types: vec![Type::Normal],
            base_stats: StatsTable { hp: 250, atk: 5, def: 5, spa: 35, spd: 105, spe: 50 },
            level,
            ability: Some(ability.into()),
            cur_hp,
            ..Default::default()
        })
        .unwrap()
    }

    fn named(name: &str) -> Move {
        Move::from_set(MoveSet { name: name.into(), ..Default::default() }).unwrap()
    }

    #[test]
    fn test_level_damage() {
        let mut trace = ModifierTrace::new();
        let attacker = mon("Natural Cure", 50, None);
        let defender = mon("Natural Cure", 100, None);
        let field = Field::default();
        assert_eq!(
            get_fixed_damage(&attacker, &defender, &named("Seismic Toss"), &field, &mut trace),
            Some(Damage::Fixed(50))
        );
        assert_eq!(
            get_fixed_damage(&attacker, &defender, &named("Dragon Rage"), &field, &mut trace),
            Some(Damage::Fixed(40))
        );
        assert_eq!(get_fixed_damage(&attacker, &defender, &named("Tackle"), &field, &mut trace), None);
    }

    #[test]
    fn test_graveyard_night_shade_and_parental_bond() {
        let mut trace = ModifierTrace::new();
        let field = Field { chromatic_field: Some(ChromaticField::HauntedGraveyard), ..Default::default() };
        let defender = mon("Natural Cure", 100, None);
        let attacker = mon("Parental Bond", 100, None);
        assert_eq!(
            get_fixed_damage(&attacker, &defender, &named("Night Shade"), &field, &mut trace),
            Some(Damage::FixedPair(150, 150))
        );
        assert!(trace.has_ability(Role::Attacker, "Parental Bond"));
    }

    #[test]
    fn test_hp_based_damage() {
        let mut trace = ModifierTrace::new();
        let attacker = mon("Natural Cure", 100, Some(123));
        let defender = mon("Natural Cure", 100, Some(401));
        let mut field = Field::default();
        assert_eq!(
            get_fixed_damage(&attacker, &defender, &named("Final Gambit"), &field, &mut trace),
            Some(Damage::Fixed(123))
        );
        assert_eq!(
            get_fixed_damage(&attacker, &defender, &named("Guardian of Alola"), &field, &mut trace),
            Some(Damage::Fixed(300))
        );
        assert_eq!(
            get_fixed_damage(&attacker, &defender, &named("Nature's Madness"), &field, &mut trace),
            Some(Damage::Fixed(200))
        );
        field.defender_side.is_protected = true;
        assert_eq!(
            get_fixed_damage(&attacker, &defender, &named("Nature's Madness"), &field, &mut trace),
            Some(Damage::Fixed(0))
        );
    }

    #[test]
    fn test_pain_split() {
        assert_eq!(pain_split(&mon("Natural Cure", 100, Some(100)), &mon("Natural Cure", 100, Some(300))), 100);
        assert_eq!(pain_split(&mon("Natural Cure", 100, Some(300)), &mon("Natural Cure", 100, Some(100))), 0);
    }
}
