//! Stat resolution shared by every stage: final stats, speed, grounding,
//! weight and Protosynthesis / Quark Drive selection.

use super::crest;
use super::formula::{chain_mods, get_modified_stat, of32, poke_round};
use super::generations::{GenMechanics, Generation};
use super::modifier::Modifier;
use super::trace::{ModifierTrace, Role};
use crate::entities::{BoostedStat, Pokemon, Status};
use crate::field::{ChromaticField, Field, Side, Terrain, Weather};
use crate::moves::MoveCategory;
use crate::stats::{StatId, StatsTable};
use crate::types::Type;

/// Items that halve Speed and are never disabled by Klutz.
pub const EV_ITEMS: [&str; 7] = [
    "Macho Brace",
    "Power Anklet",
    "Power Band",
    "Power Belt",
    "Power Bracer",
    "Power Lens",
    "Power Weight",
];

pub fn is_grounded(pokemon: &Pokemon, field: &Field, side: &Side) -> bool {
    field.is_gravity
        || pokemon.has_item(&["Iron Ball"])
        || side.is_ingrain
        || (!side.is_magnet_rise
            && !pokemon.has_type(Type::Flying)
            && !pokemon.has_ability(&["Levitate"])
            && !pokemon.named(&["Probopass-Crest"])
            && !pokemon.has_item(&["Air Balloon"]))
}

/// Stat raised by Protosynthesis or Quark Drive.
///
/// An explicit choice always wins. Otherwise the highest boosted stat is
/// picked, ties resolved in Atk, Def, SpA, SpD, Spe order.
pub fn get_qp_boosted_stat(pokemon: &Pokemon, gen: u8) -> StatId {
    if let Some(BoostedStat::Stat(stat)) = pokemon.boosted_stat {
        return stat;
    }
    let value = |stat: StatId| get_modified_stat(pokemon.raw_stats[stat], pokemon.boosts[stat], gen);
    let mut best = StatId::Atk;
    for stat in [StatId::Def, StatId::Spa, StatId::Spd, StatId::Spe] {
        if value(stat) > value(best) {
            best = stat;
        }
    }
    best
}

pub fn is_qp_active(pokemon: &Pokemon, field: &Field) -> bool {
    let Some(boosted) = pokemon.boosted_stat else {
        return false;
    };
    let booster = pokemon.has_item(&["Booster Energy"]);
    (pokemon.has_ability(&["Protosynthesis"]) && (field.has_weather(&[Weather::Sun, Weather::HarshSun]) || booster))
        || (pokemon.has_ability(&["Quark Drive"]) && (field.has_terrain(Terrain::Electric) || booster))
        || boosted != BoostedStat::Auto
}

pub fn get_final_speed(gen: Generation, pokemon: &Pokemon, field: &Field, side: &Side) -> u32 {
    let mut speed = get_modified_stat(pokemon.raw_stats.spe, pokemon.boosts.spe, gen.num());
    let mut mods: Vec<u16> = Vec::new();

    if side.is_tailwind {
        mods.push(Modifier::DOUBLE.val());
    }

    let quick_feet = pokemon.has_ability(&["Quick Feet"])
        || (pokemon.has_ability(&["Chlorophyll"]) && field.is_field(ChromaticField::FlowerGarden));

    if (pokemon.has_ability(&["Unburden"]) && pokemon.ability_on)
        || (pokemon.has_ability(&["Chlorophyll"]) && field.has_weather(&[Weather::Sun, Weather::HarshSun]))
        || (pokemon.has_ability(&["Sand Rush"]) && field.has_weather(&[Weather::Sand]))
        || (pokemon.has_ability(&["Swift Swim"]) && field.has_weather(&[Weather::Rain, Weather::HeavyRain]))
        || ((pokemon.has_ability(&["Slush Rush"]) || pokemon.named(&["Empoleon-Crest"]))
            && field.has_weather(&[Weather::Hail, Weather::Snow]))
        || (pokemon.has_ability(&["Surge Surfer"]) && field.has_terrain(Terrain::Electric))
    {
        mods.push(Modifier::DOUBLE.val());
    } else if quick_feet && pokemon.is_statused() {
        mods.push(Modifier::ONE_POINT_FIVE.val());
    } else if pokemon.has_ability(&["Slow Start"]) && pokemon.ability_on {
        mods.push(Modifier::HALF.val());
    } else if is_qp_active(pokemon, field) && get_qp_boosted_stat(pokemon, gen.num()) == StatId::Spe {
        mods.push(Modifier::ONE_POINT_FIVE.val());
    }

    if pokemon.has_item(&["Choice Scarf"]) {
        mods.push(Modifier::ONE_POINT_FIVE.val());
    } else if pokemon.has_item(&["Iron Ball"]) || pokemon.has_item(&EV_ITEMS) {
        mods.push(Modifier::HALF.val());
    } else if pokemon.has_item(&["Quick Powder"]) && pokemon.named(&["Ditto"]) {
        mods.push(Modifier::DOUBLE.val());
    }

    if field.is_field(ChromaticField::Cave) && pokemon.has_item(&["Float Stone"]) {
        mods.push(5120);
    }

    // Non-Water Pokémon are slowed underwater
    if field.is_field(ChromaticField::Underwater)
        && !pokemon.has_type(Type::Water)
        && !pokemon.has_ability(&["Swift Swim", "Steelworker", "Levitate", "Magic Guard"])
        && !(side.is_soak && pokemon.tera_type.is_none())
    {
        mods.push(Modifier::THREE_QUARTERS.val());
    }

    crest::speed_mods(pokemon, &mut mods);
    if pokemon.named(&["Magcargo-Crest"]) {
        speed = get_modified_stat(pokemon.raw_stats.def, pokemon.boosts.def, gen.num());
    }

    let chained = chain_mods(&mods, 410, 131072);
    speed = of32(poke_round(speed as f64 * chained as f64 / 4096.0) as u64) as u32;

    if pokemon.has_status(&[Status::Paralysis]) && !quick_feet {
        speed = (of32(speed as u64 * 50) / 100) as u32;
    }
    speed += crest::cryogonal_bonus(pokemon);

    speed.min(10000)
}

/// Resolve the boosted stats of both combatants.
///
/// Defensive stats go first so Download-style reads see final values.
pub fn compute_final_stats(gen: Generation, attacker: &mut Pokemon, defender: &mut Pokemon, field: &Field) {
    const ORDER: [StatId; 5] = [StatId::Def, StatId::Spd, StatId::Spe, StatId::Atk, StatId::Spa];
    for (pokemon, side) in [(attacker, &field.attacker_side), (defender, &field.defender_side)] {
        for stat in ORDER {
            pokemon.stats[stat] = if stat == StatId::Spe {
                get_final_speed(gen, pokemon, field, side)
            } else {
                get_modified_stat(pokemon.raw_stats[stat], pokemon.boosts[stat], gen.num())
            };
        }
    }
}

/// Sum of positive boost stages.
pub fn count_boosts(gen: u8, boosts: &StatsTable<i8>) -> u32 {
    StatId::BOOSTABLE
        .iter()
        .filter(|&&stat| !(gen == 1 && stat == StatId::Spd))
        .map(|&stat| boosts[stat].max(0) as u32)
        .sum()
}

/// Weight in kg after Heavy Metal, Light Metal and Float Stone.
pub fn get_weight(pokemon: &Pokemon, role: Role, trace: &mut ModifierTrace) -> f64 {
    let mut hectograms = pokemon.weightkg * 10.0;
    let factor = if pokemon.has_ability(&["Heavy Metal"]) {
        2.0
    } else if pokemon.has_ability(&["Light Metal"]) {
        0.5
    } else {
        1.0
    };
    if factor != 1.0 {
        hectograms = (hectograms * factor).trunc().max(1.0);
        trace.push(ModifierTrace::ability(role, pokemon.ability_name()));
    }
    if pokemon.has_item(&["Float Stone"]) {
        hectograms = (hectograms * 0.5).trunc().max(1.0);
        trace.push(ModifierTrace::item(role, pokemon.item_name()));
    }
    hectograms / 10.0
}

pub fn get_shell_side_arm_category(source: &Pokemon, target: &Pokemon) -> MoveCategory {
    let physical = source.stats.atk as f64 / target.stats.def as f64;
    let special = source.stats.spa as f64 / target.stats.spd as f64;
    if physical > special {
        MoveCategory::Physical
    } else {
        MoveCategory::Special
    }
}

/// Type Mimicry takes on; [`Type::Typeless`] when nothing applies.
pub fn get_mimicry_type(field: &Field) -> Type {
    match field.terrain {
        Some(Terrain::Electric) => return Type::Electric,
        Some(Terrain::Grassy) => return Type::Grass,
        Some(Terrain::Misty) => return Type::Fairy,
        Some(Terrain::Psychic) => return Type::Psychic,
        None => {}
    }
    use ChromaticField::*;
    match field.chromatic_field {
        Some(Jungle) => Type::Bug,
        Some(Eclipse) => Type::Dark,
        Some(DragonsDen) => Type::Dragon,
        Some(ThunderingPlateau) => Type::Electric,
        Some(StarlightArena) => Type::Fairy,
        Some(RingArena) => Type::Fighting,
        Some(VolcanicTop) => Type::Fire,
        Some(Sky) => Type::Flying,
        Some(HauntedGraveyard) => Type::Ghost,
        Some(FlowerGarden) => Type::Grass,
        Some(Desert) => Type::Ground,
        Some(SnowyPeaks) => Type::Ice,
        Some(BlessedSanctum) => Type::Normal,
        Some(AcidicWasteland) => Type::Poison,
        Some(AncientRuins) => Type::Psychic,
        Some(Cave) => Type::Rock,
        Some(Factory) => Type::Steel,
        Some(WatersSurface | Underwater) => Type::Water,
        Some(Rainbow | Undercolony | Inverse) | None => Type::Typeless,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::PokemonSet;

    fn mon(spe: u32) -> Pokemon {
        Pokemon::from_set(PokemonSet {
            name: "Jolteon".into(),
            types: vec![Type::Electric],
            base_stats: StatsTable { hp: 65, atk: 65, def: 60, spa: 110, spd: 95, spe },
            weightkg: 24.5,
            ..Default::default()
        })
        .unwrap()
    }

    #[test]
    fn test_final_speed_modifiers() {
        let gen = Generation::default();
        let field = Field::default();
        let mut jolteon = mon(130);
        assert_eq!(jolteon.raw_stats.spe, 296);
        assert_eq!(get_final_speed(gen, &jolteon, &field, &Side::default()), 296);

        jolteon.item = Some("Choice Scarf".into());
        assert_eq!(get_final_speed(gen, &jolteon, &field, &Side::default()), 444);

        let tailwind = Side { is_tailwind: true, ..Default::default() };
        assert_eq!(get_final_speed(gen, &jolteon, &field, &tailwind), 888);

        // paralysis halves after the chain
        jolteon.item = None;
        jolteon.status = Status::Paralysis;
        assert_eq!(get_final_speed(gen, &jolteon, &field, &Side::default()), 148);
    }

    #[test]
    fn test_crest_speed() {
        let gen = Generation::default();
        let field = Field::default();
        let side = Side::default();
        let mut jolteon = mon(130);

        jolteon.name = "Seviper-Crest".into();
        assert_eq!(get_final_speed(gen, &jolteon, &field, &side), 444);

        // Magcargo runs on its Defense
        jolteon.name = "Magcargo-Crest".into();
        assert_eq!(get_final_speed(gen, &jolteon, &field, &side), jolteon.raw_stats.def);

        jolteon.name = "Cryogonal-Crest".into();
        jolteon.stats.spd = 226;
        assert_eq!(get_final_speed(gen, &jolteon, &field, &side), 296 + 27);
    }

    #[test]
    fn test_grounded() {
        let field = Field::default();
        let mut jolteon = mon(130);
        assert!(is_grounded(&jolteon, &field, &Side::default()));
        jolteon.item = Some("Air Balloon".into());
        assert!(!is_grounded(&jolteon, &field, &Side::default()));
        let gravity = Field { is_gravity: true, ..Default::default() };
        assert!(is_grounded(&jolteon, &gravity, &Side::default()));
    }

    #[test]
    fn test_weight_modifiers() {
        let mut jolteon = mon(130);
        let mut trace = ModifierTrace::new();
        assert_eq!(get_weight(&jolteon, Role::Defender, &mut trace), 24.5);
        assert!(trace.is_empty());

        jolteon.ability = Some("Heavy Metal".into());
        jolteon.item = Some("Float Stone".into());
        assert_eq!(get_weight(&jolteon, Role::Defender, &mut trace), 24.5);
        assert!(trace.has_ability(Role::Defender, "Heavy Metal"));
        assert!(trace.has_item(Role::Defender, "Float Stone"));
    }

    #[test]
    fn test_qp_selection() {
        let mut jolteon = mon(130);
        jolteon.ability = Some("Quark Drive".into());
        let field = Field::default();
        assert!(!is_qp_active(&jolteon, &field));

        jolteon.boosted_stat = Some(BoostedStat::Auto);
        assert!(!is_qp_active(&jolteon, &field));
        let electric = Field { terrain: Some(Terrain::Electric), ..Default::default() };
        assert!(is_qp_active(&jolteon, &electric));
        assert_eq!(get_qp_boosted_stat(&jolteon, 9), StatId::Spe);

        jolteon.boosted_stat = Some(BoostedStat::Stat(StatId::Spa));
        assert!(is_qp_active(&jolteon, &field));
        assert_eq!(get_qp_boosted_stat(&jolteon, 9), StatId::Spa);
    }

    #[test]
    fn test_count_boosts() {
        let boosts = StatsTable { hp: 0, atk: 2, def: -1, spa: 0, spd: 1, spe: 6 };
        assert_eq!(count_boosts(9, &boosts), 9);
        assert_eq!(count_boosts(1, &boosts), 8);
    }

    #[test]
    fn test_mimicry_type() {
        let mut field = Field { chromatic_field: Some(ChromaticField::Cave), ..Default::default() };
        assert_eq!(get_mimicry_type(&field), Type::Rock);
        field.terrain = Some(Terrain::Misty);
        assert_eq!(get_mimicry_type(&field), Type::Fairy);
        assert_eq!(get_mimicry_type(&Field::default()), Type::Typeless);
    }
}
