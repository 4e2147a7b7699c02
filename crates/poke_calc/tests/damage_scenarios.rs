//! End-to-end damage calculations through the public API.

mod common;

use common::*;
use poke_calc::damage::{chain_mods, get_base_damage, poke_round};
use poke_calc::{calculate, Damage, DamageResult, Field, Generation, MoveCategory, MoveSet, Type};
use pretty_assertions::assert_eq;
use rstest::rstest;

fn rolls(result: &DamageResult) -> Vec<u32> {
    match &result.damage {
        Damage::Rolls(rolls) => rolls.clone(),
        other => panic!("expected 16 rolls, got {other:?}"),
    }
}

// 35 base damage before the random roll
const TACKLE_STAB: [u32; 16] = [43, 45, 45, 45, 46, 46, 46, 48, 48, 48, 49, 49, 49, 51, 51, 52];

#[test]
fn test_formula_primitives() {
    assert_eq!(get_base_damage(100, 40, 236, 236), 35);
    assert_eq!(chain_mods(&[6144, 6144], 41, 131072), 9216);
    assert_eq!(poke_round(2.5), 2.0);
    assert_eq!(poke_round(2.51), 3.0);
}

#[test]
fn test_neutral_stab_tackle() {
    let attacker = pokemon("Snorlax", &[Type::Normal], "Pressure");
    let defender = pokemon("Ursaring", &[Type::Normal], "Pressure");
    let result = calculate(Generation::default(), &attacker, &defender, &tackle(), &Field::default());
    assert_eq!(rolls(&result), TACKLE_STAB.to_vec());
    assert_eq!(result.range(), (43, 52));
}

#[test]
fn test_double_resisted_tackle() {
    let attacker = pokemon("Snorlax", &[Type::Normal], "Pressure");
    let defender = pokemon("Probopass", &[Type::Rock, Type::Steel], "Pressure");
    let result = calculate(Generation::default(), &attacker, &defender, &tackle(), &Field::default());
    assert_eq!(rolls(&result), vec![10, 11, 11, 11, 11, 11, 11, 12, 12, 12, 12, 12, 12, 12, 12, 13]);
}

#[test]
fn test_super_effective_without_stab() {
    let attacker = pokemon("Snorlax", &[Type::Normal], "Pressure");
    let defender = pokemon("Tangrowth", &[Type::Grass], "Pressure");
    let ember = build(special("Ember", 40, Type::Fire));
    let result = calculate(Generation::default(), &attacker, &defender, &ember, &Field::default());
    assert_eq!(rolls(&result), vec![58, 60, 60, 60, 62, 62, 62, 64, 64, 64, 66, 66, 66, 68, 68, 70]);
}

#[test]
fn test_burn_halves_physical_damage() {
    let attacker = with(set("Snorlax", &[Type::Normal], "Pressure"), |s| s.status = Some("brn".into()));
    let defender = pokemon("Ursaring", &[Type::Normal], "Pressure");
    let result = calculate(Generation::default(), &attacker, &defender, &tackle(), &Field::default());
    let halved: Vec<u32> = TACKLE_STAB.iter().map(|d| d / 2).collect();
    assert_eq!(rolls(&result), halved);
}

#[rstest]
#[case("Seismic Toss", Type::Fighting, 100)]
#[case("Night Shade", Type::Ghost, 100)]
#[case("Dragon Rage", Type::Dragon, 40)]
#[case("Sonic Boom", Type::Normal, 20)]
fn test_fixed_damage(#[case] name: &str, #[case] move_type: Type, #[case] expected: u32) {
    let attacker = pokemon("Chansey", &[Type::Normal], "Natural Cure");
    let defender = pokemon("Mew", &[Type::Psychic], "Synchronize");
    let mv = build(special(name, 0, move_type));
    let result = calculate(Generation::default(), &attacker, &defender, &mv, &Field::default());
    assert_eq!(result.damage, Damage::Fixed(expected));
}

#[test]
fn test_fixed_damage_respects_immunity() {
    let attacker = pokemon("Chansey", &[Type::Normal], "Natural Cure");
    let defender = pokemon("Gengar", &[Type::Ghost, Type::Poison], "Cursed Body");
    let seismic_toss = build(physical("Seismic Toss", 0, Type::Fighting));
    let result = calculate(Generation::default(), &attacker, &defender, &seismic_toss, &Field::default());
    assert!(result.damage.is_zero());
}

#[test]
fn test_status_and_powerless_moves_exit_early() {
    let attacker = pokemon("Snorlax", &[Type::Normal], "Pressure");
    let defender = pokemon("Ursaring", &[Type::Normal], "Pressure");
    let gen = Generation::default();

    let growl = build(MoveSet { name: "Growl".into(), category: MoveCategory::Status, ..Default::default() });
    let result = calculate(gen, &attacker, &defender, &growl, &Field::default());
    assert_eq!(result.damage, Damage::Fixed(0));
    assert_eq!(result.attack_stat, None);

    let powerless = build(physical("Splash Kick", 0, Type::Normal));
    assert!(calculate(gen, &attacker, &defender, &powerless, &Field::default()).damage.is_zero());
}

#[rstest]
#[case(1)]
#[case(2)]
#[case(6)]
fn test_attack_boosts_never_lower_damage(#[case] stages: i8) {
    let plain = pokemon("Snorlax", &[Type::Normal], "Pressure");
    let boosted = with(set("Snorlax", &[Type::Normal], "Pressure"), |s| s.boosts.atk = Some(stages));
    let defender = pokemon("Ursaring", &[Type::Normal], "Pressure");
    let gen = Generation::default();
    let before = rolls(&calculate(gen, &plain, &defender, &tackle(), &Field::default()));
    let after = rolls(&calculate(gen, &boosted, &defender, &tackle(), &Field::default()));
    assert!(before.iter().zip(&after).all(|(b, a)| a > b));
    assert!(after.windows(2).all(|w| w[0] <= w[1]));
}

#[test]
fn test_supported_generations_only() {
    assert!(Generation::from_num(9).is_ok());
    assert!(Generation::from_num(7).is_ok());
    assert!(Generation::from_num(3).is_err());
}
