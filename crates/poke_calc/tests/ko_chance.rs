//! KO estimates and text reports for complete calculations.

mod common;

use common::*;
use poke_calc::{
    calculate, display, display_move, get_ko_chance, Field, Generation, KoChance, Notation, Side, Type,
};
use pretty_assertions::assert_eq;

fn ko_for(field: &Field, defender_item: Option<&str>) -> KoChance {
    let gen = Generation::default();
    let attacker = pokemon("Snorlax", &[Type::Normal], "Pressure");
    let defender = with(set("Ursaring", &[Type::Normal], "Pressure"), |s| s.item = defender_item.map(Into::into));
    let result = calculate(gen, &attacker, &defender, &tackle(), field);
    get_ko_chance(gen, &result.attacker, &result.defender, &result.mv, &result.field, &result.damage, true)
}

#[test]
fn test_tackle_is_a_possible_seven_hit_ko() {
    // 43-52 against 341 HP
    let ko = ko_for(&Field::default(), None);
    assert_eq!(ko, KoChance { chance: None, n: 7, text: "possible 7HKO".into() });
}

#[test]
fn test_stealth_rock_shortens_the_count() {
    let field = Field { defender_side: Side { is_sr: true, ..Default::default() }, ..Default::default() };
    let ko = ko_for(&field, None);
    assert_eq!((ko.n, ko.text.as_str()), (6, "possible 6HKO"));
}

#[test]
fn test_leftovers_outheals_the_count() {
    let ko = ko_for(&Field::default(), Some("Leftovers"));
    assert_eq!(ko.text, "");
    assert_eq!(ko.n, 0);
}

#[test]
fn test_display_reports_range_and_ko() {
    let gen = Generation::default();
    let attacker = pokemon("Snorlax", &[Type::Normal], "Pressure");
    let defender = pokemon("Ursaring", &[Type::Normal], "Pressure");
    let result = calculate(gen, &attacker, &defender, &tackle(), &Field::default());

    let text = display(gen, &result, Notation::Percent, true);
    assert!(text.ends_with(": 43-52 (12.6 - 15.2%) -- possible 7HKO"), "{text}");
    assert!(text.contains("Snorlax Tackle"), "{text}");
    assert!(text.contains("vs. 0 HP / 0 Def "), "{text}");

    let pixels = display(gen, &result, Notation::Pixels, true);
    assert!(pixels.ends_with("(6 - 7px) -- possible 7HKO"), "{pixels}");

    assert_eq!(display_move(gen, &result, Notation::Percent), "12.6 - 15.2%");
}

#[test]
fn test_drain_move_reports_recovery() {
    let gen = Generation::default();
    let attacker = pokemon("Venusaur", &[Type::Grass], "Overgrow");
    let defender = pokemon("Ursaring", &[Type::Normal], "Pressure");
    let mut drain = special("Giga Drain", 75, Type::Grass);
    drain.drain = Some([1, 2]);
    let result = calculate(gen, &attacker, &defender, &build(drain), &Field::default());
    let text = display_move(gen, &result, Notation::Percent);
    assert!(text.ends_with("% recovered)"), "{text}");
}

#[test]
fn test_more_hp_never_raises_the_chance() {
    use poke_calc::ko::compute_ko_chance;

    let damage: Vec<u32> = (0..16).map(|i| 90 + i * 2).collect();
    for hits in 1..=3 {
        let chances: Vec<f64> =
            (150..=320).step_by(10).map(|hp| compute_ko_chance(&damage, hp, 0, hits, 1, hp, 0)).collect();
        assert!(chances.windows(2).all(|w| w[1] <= w[0]), "{hits} hits: {chances:?}");
    }
}
