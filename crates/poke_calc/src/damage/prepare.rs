//! Switch-in effects resolved before any damage math.
//!
//! Both combatants are treated as having just entered the field, in a
//! fixed order: weather and item suppression first, then stat-stage
//! changes from items, abilities, hazards and the chromatic field, then
//! the final stats of both sides.

use super::crest;
use super::generations::{GenMechanics, Generation};
use super::stats::{compute_final_stats, EV_ITEMS};
use crate::entities::Pokemon;
use crate::field::{ChromaticField, Field, Side, Terrain, Weather};
use crate::moves::Move;
use crate::stats::StatId;
use crate::types::Type;

/// A terrain seed eaten on entry.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConsumedSeed {
    pub item: String,
    pub stat: StatId,
}

/// What the entry pass consumed, for the trace.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Entry {
    pub defender_seed: Option<ConsumedSeed>,
}

/// Shift a boost stage, clamped to ±6.
pub(crate) fn shift(pokemon: &mut Pokemon, stat: StatId, delta: i8) {
    pokemon.boosts[stat] = (pokemon.boosts[stat] + delta).clamp(-6, 6);
}

/// Run every entry effect, then resolve the final stats of both sides.
pub fn apply_entry_effects(
    gen: Generation,
    attacker: &mut Pokemon,
    defender: &mut Pokemon,
    mv: &Move,
    field: &mut Field,
) -> Entry {
    for pokemon in [&*attacker, &*defender] {
        if pokemon.has_ability(&["Air Lock", "Cloud Nine"]) {
            field.weather = None;
        }
    }
    for pokemon in [&*attacker, &*defender] {
        if pokemon.has_ability(&["Teraform Zero"]) && pokemon.ability_on {
            field.weather = None;
            field.terrain = None;
        }
    }

    for pokemon in [&mut *attacker, &mut *defender] {
        check_forecast(pokemon, field.weather);
    }
    for pokemon in [&mut *attacker, &mut *defender] {
        if (pokemon.has_ability(&["Klutz"]) && !pokemon.has_item(&EV_ITEMS)) || field.is_magic_room {
            pokemon.disable_item();
        }
    }
    if field.is_wonder_room {
        for pokemon in [&mut *attacker, &mut *defender] {
            let raw = &mut pokemon.raw_stats;
            std::mem::swap(&mut raw.def, &mut raw.spd);
        }
    }

    let _ = check_seed_boost(attacker, field);
    let defender_seed = check_seed_boost(defender, field);

    for pokemon in [&mut *attacker, &mut *defender] {
        if gen.has_entry_boost_abilities() && pokemon.has_ability(&["Dauntless Shield"]) {
            shift(pokemon, StatId::Def, 1);
        }
    }
    for pokemon in [&mut *attacker, &mut *defender] {
        if gen.has_embody_aspect() {
            check_embody_aspect(pokemon);
        }
    }

    check_intimidate(gen, attacker, defender, field);
    check_intimidate(gen, defender, attacker, field);
    check_download(attacker, defender, field);
    check_download(defender, attacker, field);

    for pokemon in [&mut *attacker, &mut *defender] {
        if gen.has_entry_boost_abilities() && pokemon.has_ability(&["Intrepid Sword"]) {
            shift(pokemon, StatId::Atk, 1);
        }
    }
    check_sticky_web(attacker, field, &field.attacker_side);
    check_sticky_web(defender, field, &field.defender_side);
    crest::check_entry(gen, attacker, defender, field);
    crest::check_entry(gen, defender, attacker, field);

    check_field_entry(attacker, field);
    check_field_entry(defender, field);

    if attacker.has_ability(&["Wind Rider"]) && field.attacker_side.is_tailwind {
        shift(attacker, StatId::Atk, 1);
    }
    if defender.has_ability(&["Wind Rider"]) && field.defender_side.is_tailwind {
        shift(defender, StatId::Atk, 1);
    }

    // Charge turn boost
    if mv.named(&["Meteor Beam", "Electro Shot"]) {
        let delta = if attacker.has_ability(&["Simple"]) {
            2
        } else if attacker.has_ability(&["Contrary"]) {
            -1
        } else {
            1
        };
        shift(attacker, StatId::Spa, delta);
    }

    compute_final_stats(gen, attacker, defender, field);

    if attacker.has_ability(&["Infiltrator"]) {
        clear_screens(&mut field.defender_side);
    }
    if defender.has_ability(&["Infiltrator"]) {
        clear_screens(&mut field.attacker_side);
    }

    Entry { defender_seed }
}

fn check_forecast(pokemon: &mut Pokemon, weather: Option<Weather>) {
    if !(pokemon.has_ability(&["Forecast"]) && pokemon.named(&["Castform"])) {
        return;
    }
    let form = match weather {
        Some(Weather::Sun | Weather::HarshSun) => Type::Fire,
        Some(Weather::Rain | Weather::HeavyRain) => Type::Water,
        Some(Weather::Hail | Weather::Snow) => Type::Ice,
        _ => Type::Normal,
    };
    pokemon.types = vec![form];
}

/// Eat a seed matching the active terrain.
fn check_seed_boost(pokemon: &mut Pokemon, field: &Field) -> Option<ConsumedSeed> {
    let item = pokemon.item.as_deref()?;
    let (terrain, stat) = match item {
        "Electric Seed" => (Terrain::Electric, StatId::Def),
        "Grassy Seed" => (Terrain::Grassy, StatId::Def),
        "Misty Seed" => (Terrain::Misty, StatId::Spd),
        "Psychic Seed" => (Terrain::Psychic, StatId::Spd),
        _ => return None,
    };
    if !field.has_terrain(terrain) {
        return None;
    }
    let delta = if pokemon.has_ability(&["Contrary"]) { -1 } else { 1 };
    shift(pokemon, stat, delta);
    pokemon.item.take().map(|item| ConsumedSeed { item, stat })
}

fn check_embody_aspect(pokemon: &mut Pokemon) {
    let stat = match pokemon.ability_name() {
        "Embody Aspect (Cornerstone)" => StatId::Def,
        "Embody Aspect (Hearthflame)" => StatId::Atk,
        "Embody Aspect (Teal)" => StatId::Spe,
        "Embody Aspect (Wellspring)" => StatId::Spd,
        _ => return,
    };
    shift(pokemon, stat, 1);
}

/// Whether the target shrugs off an Intimidate-style stat drop on entry.
pub(crate) fn intimidation_blocked(gen: Generation, target: &Pokemon, field: &Field) -> bool {
    target.has_ability(&["Clear Body", "White Smoke", "Hyper Cutter", "Full Metal Body"])
        || (gen.focus_blocks_intimidate() && target.has_ability(&["Inner Focus", "Own Tempo", "Oblivious", "Scrappy"]))
        // Cave Sturdy acts as Clear Body
        || (target.has_ability(&["Sturdy"]) && field.is_field(ChromaticField::Cave))
        || target.has_item(&["Clear Amulet"])
}

fn check_intimidate(gen: Generation, source: &Pokemon, target: &mut Pokemon, field: &Field) {
    if !(source.has_ability(&["Intimidate"]) && source.ability_on) || intimidation_blocked(gen, target, field) {
        return;
    }

    if target.has_ability(&["Contrary", "Defiant", "Guard Dog"])
        || (target.has_ability(&["Steadfast"]) && field.is_field(ChromaticField::RingArena))
    {
        shift(target, StatId::Atk, 1);
    } else if target.has_ability(&["Simple"]) {
        shift(target, StatId::Atk, -2);
    } else {
        shift(target, StatId::Atk, -1);
    }
    if target.has_ability(&["Competitive"]) {
        shift(target, StatId::Spa, 2);
    }
}

fn check_download(source: &mut Pokemon, target: &Pokemon, field: &Field) {
    if !source.has_ability(&["Download"]) {
        return;
    }
    // Download compares the unswapped stats
    let (mut def, mut spd) = (target.stats.def, target.stats.spd);
    if field.is_wonder_room {
        std::mem::swap(&mut def, &mut spd);
    }
    let stages = if field.is_field(ChromaticField::Factory) { 2 } else { 1 };
    let stat = if spd <= def { StatId::Spa } else { StatId::Atk };
    shift(source, stat, stages);
}

fn check_sticky_web(pokemon: &mut Pokemon, field: &Field, side: &Side) {
    if side.is_sticky_web
        && !pokemon.has_item(&["Heavy-Duty Boots"])
        && !pokemon.has_ability(&["Clear Body", "White Smoke", "Full Metal Body"])
    {
        let stages = if field.is_field(ChromaticField::Jungle) { 2 } else { 1 };
        shift(pokemon, StatId::Spe, -stages);
    }
}

/// Stat stages a chromatic field grants on entry.
fn check_field_entry(pokemon: &mut Pokemon, field: &Field) {
    use ChromaticField::*;
    let Some(chromatic) = field.chromatic_field else {
        return;
    };
    let prism = pokemon.has_item(&["Prism Scale"]);

    match chromatic {
        DragonsDen if prism => shift(pokemon, StatId::Spe, 1),
        ThunderingPlateau => {
            if prism {
                shift(pokemon, StatId::Spd, 1);
            }
            if pokemon.has_ability(&["Motor Drive"]) {
                shift(pokemon, StatId::Spe, 1);
            } else if pokemon.has_ability(&["Lightning Rod"]) {
                shift(pokemon, StatId::Spa, 1);
            }
        }
        StarlightArena => {
            if pokemon.has_ability(&["Illuminate"]) {
                shift(pokemon, StatId::Spa, 1);
            } else if pokemon.has_ability(&["Aroma Veil", "Pastel Veil", "Sweet Veil"]) {
                shift(pokemon, StatId::Spd, 1);
            }
        }
        VolcanicTop => {
            if prism {
                shift(pokemon, StatId::Spa, 1);
            }
            if pokemon.has_ability(&["Magma Armor"]) {
                shift(pokemon, StatId::Def, 1);
                shift(pokemon, StatId::Spd, 1);
            }
        }
        Sky => {
            if prism {
                shift(pokemon, StatId::Def, -1);
                shift(pokemon, StatId::Spd, -1);
            }
            if pokemon.has_ability(&["Early Bird"]) {
                shift(pokemon, StatId::Spe, 1);
            }
        }
        HauntedGraveyard if prism => shift(pokemon, StatId::Spd, 1),
        Desert if prism => shift(pokemon, StatId::Atk, 1),
        SnowyPeaks if prism => shift(pokemon, StatId::Spe, 2),
        BlessedSanctum => {
            if pokemon.has_ability(&["Fluffy", "Fur Coat"]) {
                shift(pokemon, StatId::Def, 1);
            } else if pokemon.has_ability(&["Run Away"]) {
                shift(pokemon, StatId::Spe, 1);
            }
        }
        AncientRuins if pokemon.has_ability(&["Anticipation", "Forewarn"]) => shift(pokemon, StatId::Spa, 1),
        Cave => {
            if prism {
                shift(pokemon, StatId::Def, 1);
            }
            if pokemon.has_ability(&["Steam Engine"]) {
                shift(pokemon, StatId::Spe, 2);
            } else if pokemon.has_ability(&["Battle Armor", "Shell Armor"]) {
                shift(pokemon, StatId::Def, 1);
            }
        }
        Factory => {
            if pokemon.has_ability(&["Heavy Metal"]) {
                shift(pokemon, StatId::Spe, -1);
                shift(pokemon, StatId::Def, 1);
            } else if pokemon.has_ability(&["Light Metal"]) {
                shift(pokemon, StatId::Spe, 1);
                shift(pokemon, StatId::Def, -1);
            }
        }
        WatersSurface if pokemon.has_ability(&["Water Compaction"]) => shift(pokemon, StatId::Def, 2),
        Underwater if prism => shift(pokemon, StatId::Spe, 1),
        _ => {}
    }
}

fn clear_screens(side: &mut Side) {
    side.is_reflect = false;
    side.is_light_screen = false;
    side.is_aurora_veil = false;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::PokemonSet;
    use crate::moves::MoveSet;
    use crate::stats::StatsTable;
    use pretty_assertions::assert_eq;

    fn mon(name: &str, ability: &str, item: Option<&str>) -> Pokemon {
        Pokemon::from_set(PokemonSet {
            name: name.into(),
            types: vec![Type::Normal],
            base_stats: StatsTable { hp: 80, atk: 100, def: 90, spa: 80, spd: 70, spe: 60 },
            ability: Some(ability.into()),
            ability_on: true,
            item: item.map(Into::into),
            ..Default::default()
        })
        .unwrap()
    }

    fn tackle() -> Move {
        Move::from_set(MoveSet { name: "Tackle".into(), bp: 40, ..Default::default() }).unwrap()
    }

    #[test]
    fn test_intimidate_reactions() {
        let mut field = Field::default();
        let mut attacker = mon("Gyarados", "Intimidate", None);
        let mut defender = mon("Kingambit", "Defiant", None);
        apply_entry_effects(Generation::default(), &mut attacker, &mut defender, &tackle(), &mut field);
        assert_eq!(defender.boosts.atk, 1);

        let mut attacker = mon("Gyarados", "Intimidate", None);
        let mut defender = mon("Milotic", "Competitive", None);
        apply_entry_effects(Generation::default(), &mut attacker, &mut defender, &tackle(), &mut field);
        assert_eq!((defender.boosts.atk, defender.boosts.spa), (-1, 2));

        let mut attacker = mon("Gyarados", "Intimidate", None);
        let mut defender = mon("Gallade", "Inner Focus", None);
        apply_entry_effects(Generation::from_num(7).unwrap(), &mut attacker, &mut defender, &tackle(), &mut field);
        assert_eq!(defender.boosts.atk, -1, "Inner Focus only blocks from gen 8");
    }

    #[test]
    fn test_seed_consumed_in_matching_terrain() {
        let mut field = Field { terrain: Some(Terrain::Grassy), ..Default::default() };
        let mut attacker = mon("Rillaboom", "Grassy Surge", None);
        let mut defender = mon("Amoonguss", "Regenerator", Some("Grassy Seed"));
        let entry = apply_entry_effects(Generation::default(), &mut attacker, &mut defender, &tackle(), &mut field);
        assert_eq!(entry.defender_seed, Some(ConsumedSeed { item: "Grassy Seed".into(), stat: StatId::Def }));
        assert_eq!(defender.boosts.def, 1);
        assert_eq!(defender.item, None);
        assert_eq!(defender.stats.def, defender.raw_stats.def * 3 / 2);
    }

    #[test]
    fn test_download_picks_weaker_defense() {
        let mut field = Field::default();
        let mut attacker = mon("Porygon-Z", "Download", None);
        let mut defender = mon("Blissey", "Natural Cure", None);
        apply_entry_effects(Generation::default(), &mut attacker, &mut defender, &tackle(), &mut field);
        // SpD is the weaker side
        assert_eq!((attacker.boosts.atk, attacker.boosts.spa), (0, 1));
    }

    #[test]
    fn test_weather_and_screens_cleared() {
        let mut field = Field { weather: Some(Weather::Rain), ..Default::default() };
        field.defender_side.is_reflect = true;
        let mut attacker = mon("Rayquaza", "Air Lock", None);
        let mut defender = mon("Castform", "Forecast", None);
        apply_entry_effects(Generation::default(), &mut attacker, &mut defender, &tackle(), &mut field);
        assert_eq!(field.weather, None);
        assert_eq!(defender.types, vec![Type::Normal]);
        assert!(field.defender_side.is_reflect);

        let mut attacker = mon("Dragapult", "Infiltrator", None);
        let mut defender = mon("Grimmsnarl", "Prankster", None);
        apply_entry_effects(Generation::default(), &mut attacker, &mut defender, &tackle(), &mut field);
        assert!(!field.defender_side.is_reflect);
    }

    #[test]
    fn test_field_entry_boosts() {
        let mut field = Field { chromatic_field: Some(ChromaticField::Cave), ..Default::default() };
        let mut attacker = mon("Coalossal", "Steam Engine", Some("Prism Scale"));
        let mut defender = mon("Shuckle", "Shell Armor", None);
        apply_entry_effects(Generation::default(), &mut attacker, &mut defender, &tackle(), &mut field);
        assert_eq!((attacker.boosts.def, attacker.boosts.spe), (1, 2));
        assert_eq!(defender.boosts.def, 1);
    }

    #[test]
    fn test_thievul_crest_steals_on_entry() {
        let mut field = Field::default();
        let mut attacker = mon("Thievul-Crest", "Run Away", None);
        let mut defender = mon("Alakazam", "Magic Guard", None);
        apply_entry_effects(Generation::default(), &mut attacker, &mut defender, &tackle(), &mut field);
        assert_eq!((attacker.boosts.spa, defender.boosts.spa), (1, -1));
        assert_eq!(attacker.stats.spa, attacker.raw_stats.spa * 3 / 2);

        let mut attacker = mon("Gengar", "Cursed Body", None);
        let mut defender = mon("Thievul-Crest", "Run Away", None);
        let mut field = Field::default();
        apply_entry_effects(Generation::default(), &mut attacker, &mut defender, &tackle(), &mut field);
        assert_eq!((attacker.boosts.spa, defender.boosts.spa), (-1, 1));
    }
}
