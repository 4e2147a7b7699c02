//! Same-type attack bonus.
//!
//! STAB is returned in 4096-scale. Terastallization and Adaptability stack
//! on top of the natural bonus; the Stellar tera type replaces it with a
//! one-off boost on the first use of each type.

use super::crest;
use super::stats::get_mimicry_type;
use super::trace::{ModifierTrace, Role, TraceEvent};
use crate::entities::Pokemon;
use crate::field::{ChromaticField, Field, Side};
use crate::moves::Move;
use crate::types::Type;

const STAB: u32 = 2048;

/// Stellar boost for a move type the user never had.
const STELLAR_OFF_TYPE: u32 = 4915;

/// STAB from typing, type-changing abilities, Terastallization and Adaptability.
pub fn get_stab_mod(attacker: &Pokemon, mv: &Move, field: &Field, side: &Side, trace: &mut ModifierTrace) -> u32 {
    let mut stab = 4096;
    if side.is_soak {
        if mv.has_type(Type::Water) {
            stab += STAB;
        }
        trace.push(TraceEvent::SideCondition { role: Role::Attacker, name: "Soak" });
    } else if attacker.has_ability(&["Mimicry"]) {
        let mimicry = get_mimicry_type(field);
        if mimicry == mv.move_type {
            stab += STAB;
        }
        trace.push_ability(Role::Attacker, attacker);
        trace.push(TraceEvent::TypeChange { role: Role::Attacker, to: mimicry });
    } else if attacker.has_ability(&["Victory Star"]) && field.is_field(ChromaticField::StarlightArena) {
        // Primary type becomes Fairy
        if mv.has_type(Type::Fairy) {
            stab += STAB;
            trace.push_ability(Role::Attacker, attacker);
            trace.push_field(field.chromatic_field);
        } else if attacker.types.first() != Some(&mv.move_type) && attacker.has_original_type(mv.move_type) {
            stab += STAB;
        }
    } else if attacker.has_original_type(mv.move_type) {
        stab += STAB;
    } else if (attacker.has_ability(&["Protean", "Libero"]) || attacker.named(&["Boltund-Crest"]))
        && attacker.tera_type.is_none()
    {
        stab += STAB;
        trace.push_ability(Role::Attacker, attacker);
    } else if crest::grants_stab(attacker, mv) {
        stab += STAB;
    }

    let tera = attacker.tera_type;
    if let Some(tera) = tera.filter(|&t| t == mv.move_type && t != Type::Stellar) {
        stab += STAB;
        trace.push(TraceEvent::Tera { role: Role::Attacker, tera });
    }

    if attacker.has_ability(&["Adaptability"]) && attacker.has_type(mv.move_type) {
        stab += if tera.is_some_and(|t| attacker.has_original_type(t)) { 1024 } else { STAB };
        trace.push_ability(Role::Attacker, attacker);
    }
    stab
}

/// Apply the Stellar boost on top of `stab`.
///
/// `turns` counts uses already made; the boost only lands on the first
/// unless the user is Terapagos-Stellar. Pixilate on the Starlight Arena
/// terastallizes the user into Stellar for the opening turn.
pub fn get_stellar_stab_mod(
    attacker: &Pokemon,
    mv: &Move,
    field: &Field,
    stab: u32,
    turns: u8,
    trace: &mut ModifierTrace,
) -> u32 {
    let stellar = attacker.tera_type == Some(Type::Stellar)
        && ((mv.is_stellar_first_use && turns == 0) || attacker.named(&["Terapagos-Stellar"]));
    let starlight_pixilate =
        turns == 0 && attacker.has_ability(&["Pixilate"]) && field.is_field(ChromaticField::StarlightArena);

    if !stellar && !starlight_pixilate {
        return stab;
    }
    if !stellar {
        trace.push(TraceEvent::Tera { role: Role::Attacker, tera: Type::Stellar });
        trace.push_field(field.chromatic_field);
    }
    if attacker.has_original_type(mv.move_type) {
        stab + STAB
    } else {
        STELLAR_OFF_TYPE
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::PokemonSet;
    use crate::moves::MoveSet;
    use rstest::rstest;

    fn mon(types: Vec<Type>, ability: &str, tera: Option<Type>) -> Pokemon {
        Pokemon::from_set(PokemonSet {
            name: "Porygon-Z".into(),
            types,
            ability: Some(ability.into()),
            tera_type: tera,
            ..Default::default()
        })
        .unwrap()
    }

    fn mv(move_type: Type) -> Move {
        Move::from_set(MoveSet { name: "Test Move".into(), bp: 80, move_type, ..Default::default() }).unwrap()
    }

    #[rstest]
    #[case(vec![Type::Normal], "Download", None, Type::Normal, 6144)]
    #[case(vec![Type::Normal], "Download", None, Type::Ghost, 4096)]
    #[case(vec![Type::Normal], "Adaptability", None, Type::Normal, 8192)]
    #[case(vec![Type::Normal], "Download", Some(Type::Normal), Type::Normal, 8192)]
    #[case(vec![Type::Normal], "Download", Some(Type::Ghost), Type::Ghost, 6144)]
    #[case(vec![Type::Normal], "Adaptability", Some(Type::Normal), Type::Normal, 9216)]
    #[case(vec![Type::Water], "Protean", None, Type::Ice, 6144)]
    fn test_stab_sources(
        #[case] types: Vec<Type>,
        #[case] ability: &str,
        #[case] tera: Option<Type>,
        #[case] move_type: Type,
        #[case] expected: u32,
    ) {
        let attacker = mon(types, ability, tera);
        let mut trace = ModifierTrace::new();
        let stab = get_stab_mod(&attacker, &mv(move_type), &Field::default(), &Side::default(), &mut trace);
        assert_eq!(stab, expected);
    }

    #[rstest]
    #[case("Empoleon-Crest", Type::Ice, 6144)]
    #[case("Luxray-Crest", Type::Dark, 6144)]
    #[case("Electric Nose", Type::Electric, 6144)]
    #[case("Simisear-Crest", Type::Water, 6144)]
    #[case("Simisear-Crest", Type::Fire, 4096)]
    #[case("Boltund-Crest", Type::Fire, 6144)]
    fn test_crest_stab(#[case] name: &str, #[case] move_type: Type, #[case] expected: u32) {
        let mut attacker = mon(vec![Type::Normal], "Download", None);
        attacker.name = name.into();
        let mut trace = ModifierTrace::new();
        let stab = get_stab_mod(&attacker, &mv(move_type), &Field::default(), &Side::default(), &mut trace);
        assert_eq!(stab, expected);
    }

    #[test]
    fn test_soak_grants_water_stab() {
        let attacker = mon(vec![Type::Fire], "Blaze", None);
        let side = Side { is_soak: true, ..Default::default() };
        let mut trace = ModifierTrace::new();
        assert_eq!(get_stab_mod(&attacker, &mv(Type::Water), &Field::default(), &side, &mut trace), 6144);
        assert_eq!(get_stab_mod(&attacker, &mv(Type::Fire), &Field::default(), &side, &mut trace), 4096);
        assert!(trace.has_condition("Soak"));
    }

    #[test]
    fn test_stellar_first_use() {
        let attacker = mon(vec![Type::Normal], "Download", Some(Type::Stellar));
        let field = Field::default();
        let mut trace = ModifierTrace::new();
        assert_eq!(get_stellar_stab_mod(&attacker, &mv(Type::Normal), &field, 6144, 0, &mut trace), 8192);
        assert_eq!(get_stellar_stab_mod(&attacker, &mv(Type::Fire), &field, 4096, 0, &mut trace), 4915);
        // Later turns keep the unboosted value
        assert_eq!(get_stellar_stab_mod(&attacker, &mv(Type::Fire), &field, 4096, 1, &mut trace), 4096);
    }
}
