//! Recurring HP change applied to the defender at the end of every turn.

use crate::damage::{is_grounded, Generation, Guards, VOLCANIC_ERUPTION};
use crate::entities::{Pokemon, Status};
use crate::field::{ChromaticField, Field, Terrain, Weather};
use crate::moves::Move;
use crate::types::{type_chart, Type};

/// Moves that bind the target for several turns.
const TRAPPING: &[&str] = &[
    "Bind", "Clamp", "Fire Spin", "Infestation", "Magma Storm", "Sand Tomb",
    "Thunder Cage", "Whirlpool", "Wrap", "G-Max Sandblast", "G-Max Centiferno",
];

/// Moves that infest the target in the Jungle.
const TRAPPING_JUNGLE: &[&str] = &["Fell Stinger", "Silver Wind", "Steamroller"];

const SEA_OF_FIRE: &[&str] = &["Fire Pledge (Grass Pledge Boosted)", "Grass Pledge (Fire Pledge Boosted)"];

/// Net HP change per turn (positive heals) and what caused it.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EndOfTurn {
    pub damage: i64,
    pub texts: Vec<String>,
}

impl EndOfTurn {
    fn heal(&mut self, amount: u32, text: impl Into<String>) {
        self.damage += amount as i64;
        self.texts.push(text.into());
    }

    fn hurt(&mut self, amount: u32, text: impl Into<String>) {
        self.damage -= amount as i64;
        self.texts.push(text.into());
    }
}

fn big_root(pokemon: &Pokemon, recovery: u32) -> u32 {
    if pokemon.has_item(&["Big Root"]) {
        recovery * 5324 / 4096
    } else {
        recovery
    }
}

fn is_asleep(pokemon: &Pokemon) -> bool {
    pokemon.has_status(&[Status::Sleep]) || pokemon.has_ability(&["Comatose"])
}

fn has_poison_heal(pokemon: &Pokemon, field: &Field) -> bool {
    pokemon.has_ability(&["Poison Heal"])
        || pokemon.named(&["Zangoose-Crest"])
        || (pokemon.named(&["Umbreon"]) && field.is_field(ChromaticField::Rainbow))
}

fn is_trapping(attacker: &Pokemon, mv: &Move, field: &Field) -> bool {
    mv.named(TRAPPING)
        || (mv.named(&["Attack Order"]) && attacker.named(&["Vespiquen-Crest-Offense"]))
        || (mv.named(TRAPPING_JUNGLE) && field.is_field(ChromaticField::Jungle))
        || (mv.named(&["Leaf Tornado"]) && field.is_field(ChromaticField::FlowerGarden))
        || (mv.named(&["Sandsear Storm"]) && field.is_field(ChromaticField::Desert))
}

/// Weather residuals, and abilities that settle on the weather.
fn weather_effects(eot: &mut EndOfTurn, defender: &Pokemon, field: &Field, guards: &Guards) {
    let max_hp = defender.max_hp();
    let heal_block = guards.heal_block;
    let magic_guard = guards.defender_magic_guard;

    if field.has_weather(&[Weather::Sun, Weather::HarshSun]) {
        if defender.has_ability(&["Dry Skin", "Solar Power"]) {
            eot.hurt(max_hp / 8, format!("{} damage", defender.ability_name()));
        } else if defender.named(&["Druddigon-Crest"]) && !heal_block {
            eot.heal(max_hp / 8, "Crest recovery");
        }
    } else if field.has_weather(&[Weather::Rain, Weather::HeavyRain]) {
        if !heal_block {
            if defender.has_ability(&["Dry Skin"]) {
                eot.heal(max_hp / 8, "Dry Skin recovery");
            } else if defender.has_ability(&["Rain Dish"]) {
                eot.heal(max_hp / 16, "Rain Dish recovery");
            }
        }
    } else if field.has_weather(&[Weather::Sand]) {
        if !defender.has_any_type(&[Type::Rock, Type::Ground, Type::Steel])
            && !defender.has_ability(&["Overcoat", "Sand Force", "Sand Rush", "Sand Veil"])
            && !defender.has_item(&["Safety Goggles"])
            && !magic_guard
        {
            eot.hurt(max_hp / 16, "sandstorm damage");
        }
    } else if field.has_weather(&[Weather::Hail, Weather::Snow]) {
        if defender.has_ability(&["Ice Body"]) {
            if !heal_block {
                eot.heal(max_hp / 16, "Ice Body recovery");
            }
        } else if !defender.has_type(Type::Ice)
            && !defender.has_ability(&["Overcoat", "Snow Cloak"])
            && !defender.named(&["Empoleon-Crest"])
            && !magic_guard
            && !defender.has_item(&["Safety Goggles"])
        {
            // Snowy Peaks makes snow hurt like sand
            let text = if field.has_weather(&[Weather::Snow]) && field.is_field(ChromaticField::SnowyPeaks) {
                "snow damage"
            } else {
                "hail damage"
            };
            eot.hurt(max_hp / 16, text);
        }
    }

    // Abilities the chromatic fields switch on without the weather
    if defender.has_ability(&["Solar Power"])
        && !field.has_weather(&[Weather::Sun, Weather::HarshSun])
        && field.is_field(ChromaticField::VolcanicTop)
    {
        eot.hurt(max_hp / 8, "Solar Power damage");
    }
    if defender.has_ability(&["Ice Body"])
        && !field.has_weather(&[Weather::Hail, Weather::Snow])
        && field.is_field(ChromaticField::SnowyPeaks)
        && !heal_block
    {
        eot.heal(max_hp / 16, "Ice Body recovery");
    }
    if defender.has_ability(&["Rain Dish"])
        && !field.has_weather(&[Weather::Rain, Weather::HeavyRain])
        && field.is_field(ChromaticField::WatersSurface)
        && !heal_block
    {
        eot.heal(max_hp / 16, "Rain Dish recovery");
    }
    if defender.has_ability(&["Dry Skin", "Water Absorb"]) && field.is_field(ChromaticField::Underwater) && !heal_block {
        eot.heal(max_hp / 8, format!("{} recovery", defender.ability_name()));
    }
}

/// Item, rooting and seeding residuals.
fn item_and_side_effects(eot: &mut EndOfTurn, attacker: &Pokemon, defender: &Pokemon, mv: &Move, field: &Field, guards: &Guards) {
    let max_hp = defender.max_hp();
    let heal_block = guards.heal_block;
    let magic_guard = guards.defender_magic_guard;
    let loses_item = mv.named(&["Knock Off"]) && !defender.has_ability(&["Sticky Hold"]);

    if defender.has_item(&["Leftovers"]) && !loses_item && !heal_block {
        eot.heal(max_hp / 16, "Leftovers recovery");
    } else if defender.has_item(&["Black Sludge"]) && !loses_item {
        if defender.has_type(Type::Poison) {
            if !heal_block {
                eot.heal(max_hp / 16, "Black Sludge recovery");
            }
        } else if !defender.has_ability(&["Klutz"]) && !magic_guard {
            eot.hurt(max_hp / 8, "Black Sludge damage");
        }
    } else if defender.has_item(&["Sticky Barb"]) {
        eot.hurt(max_hp / 8, "Sticky Barb damage");
    }

    let side = &field.defender_side;
    if side.is_ingrain && !heal_block {
        let divisor = if field.is_field(ChromaticField::FlowerGarden) { 8 } else { 16 };
        eot.heal(big_root(defender, max_hp / divisor), "Ingrain recovery");
    }
    if (side.is_aqua_ring || defender.named(&["Phione-Crest"])) && !heal_block {
        let divisor = if field.is_field(ChromaticField::WatersSurface) { 10 } else { 16 };
        eot.heal(big_root(defender, max_hp / divisor), "Aqua Ring recovery");
    }

    if side.is_seeded && !magic_guard {
        eot.hurt(max_hp / 8, "Leech Seed damage");
    }
    if field.attacker_side.is_seeded && !magic_guard {
        let recovery = big_root(defender, attacker.max_hp() / 8);
        if attacker.has_ability(&["Liquid Ooze"]) {
            eot.hurt(recovery, "Liquid Ooze damage");
        } else if !heal_block {
            eot.heal(recovery, "Leech Seed recovery");
        }
    }

    // Flower Garden restricts the terrain's healing to Grass types
    if field.has_terrain(Terrain::Grassy)
        && is_grounded(defender, field, side)
        && !(field.is_field(ChromaticField::FlowerGarden) && !defender.has_type(Type::Grass))
        && !heal_block
    {
        eot.heal(max_hp / 16, "Grassy Terrain recovery");
    }
}

fn status_effects(eot: &mut EndOfTurn, attacker: &Pokemon, defender: &Pokemon, field: &Field, guards: &Guards) {
    let max_hp = defender.max_hp();
    let heal_block = guards.heal_block;
    let magic_guard = guards.defender_magic_guard;

    match defender.status {
        Status::Poison | Status::Toxic if has_poison_heal(defender, field) => {
            if !heal_block {
                eot.heal(max_hp / 8, "Poison Heal");
            }
        }
        Status::Poison if !magic_guard => eot.hurt(max_hp / 8, "poison damage"),
        // The growing toxic damage is counted by the KO estimator
        Status::Toxic if !magic_guard => eot.texts.push("toxic damage".to_string()),
        Status::Poison | Status::Toxic => {}
        Status::Burn if !magic_guard => {
            let mut modifier = 1;
            if defender.has_ability(&["Heatproof"]) {
                modifier *= 2;
            }
            if field.is_field(ChromaticField::WatersSurface) {
                modifier *= 2;
            }
            let text = if modifier > 1 { "reduced burn damage" } else { "burn damage" };
            eot.hurt(max_hp / (16 * modifier), text);
        }
        _ if is_asleep(defender)
            && (attacker.has_ability(&["Bad Dreams"]) || field.is_field(ChromaticField::HauntedGraveyard))
            && !magic_guard =>
        {
            eot.hurt(max_hp / 8, "Bad Dreams");
        }
        _ if field.is_field(ChromaticField::AcidicWasteland) => {
            if defender.has_ability(&["Poison Heal"]) || defender.named(&["Zangoose-Crest"]) {
                if !heal_block {
                    eot.heal(max_hp / 8, "Poison Heal");
                }
            } else if defender.has_ability(&["Liquid Ooze"]) && !heal_block {
                eot.heal(max_hp / 16, "Liquid Ooze recovery");
            }
        }
        _ => {}
    }
}

/// Residuals the move and the held conditions inflict.
fn move_effects(eot: &mut EndOfTurn, attacker: &Pokemon, defender: &Pokemon, mv: &Move, field: &Field, guards: &Guards) {
    let max_hp = defender.max_hp();
    let side = &field.defender_side;
    if guards.defender_magic_guard {
        return;
    }

    if is_trapping(attacker, mv, field) {
        let binding = attacker.has_item(&["Binding Band"])
            || (mv.named(&["Whirlpool"]) && field.is_field(ChromaticField::Underwater));
        eot.hurt(max_hp / if binding { 6 } else { 8 }, "trapping damage");
    }

    if side.is_salt_cured {
        let water_or_steel = defender.has_any_type(&[Type::Water, Type::Steel])
            || matches!(defender.tera_type, Some(Type::Water | Type::Steel));
        eot.hurt(max_hp / if water_or_steel { 4 } else { 8 }, "Salt Cure");
    }

    if !defender.has_type(Type::Fire) && mv.named(SEA_OF_FIRE) {
        eot.hurt(max_hp / 8, "Sea of Fire damage");
    }

    let gmax = [
        (side.vinelash, "G-Max Vine Lash", Type::Grass, "Vine Lash damage"),
        (side.wildfire, "G-Max Wildfire", Type::Fire, "Wildfire damage"),
        (side.cannonade, "G-Max Cannonade", Type::Water, "Cannonade damage"),
        (side.volcalith, "G-Max Volcalith", Type::Rock, "Volcalith damage"),
    ];
    for (active, move_name, immune, text) in gmax {
        if !defender.has_type(immune) && (active || mv.named(&[move_name])) {
            eot.hurt(max_hp / 6, text);
        }
    }

    if side.is_nightmare && is_asleep(defender) {
        let divisor = if field.is_field(ChromaticField::HauntedGraveyard) { 3 } else { 4 };
        eot.hurt(max_hp / divisor, "Nightmare");
    }
}

/// Residual healing and chip from crests.
fn crest_effects(eot: &mut EndOfTurn, attacker: &Pokemon, defender: &Pokemon, guards: &Guards) {
    let max_hp = defender.max_hp();
    let heal_block = guards.heal_block;

    if defender.named(&["Gothitelle-Crest", "Meganium-Crest", "Vespiquen-Crest-Defense"]) && !heal_block {
        eot.heal(max_hp / 16, "Crest recovery");
    }
    if attacker.named(&["Shiinotic-Crest"]) && defender.is_statused() && !guards.defender_magic_guard {
        eot.hurt(max_hp / 16, "Crest damage");
    }
    if defender.named(&["Shiinotic-Crest"]) && attacker.is_statused() && !guards.attacker_magic_guard && !heal_block {
        eot.heal(attacker.max_hp() / 16, "Crest recovery");
    }
    if defender.named(&["Spiritomb-Crest"]) && defender.allies_fainted > 0 && !heal_block {
        let fainted = defender.allies_fainted.min(5);
        let allies = if fainted == 1 { "ally" } else { "allies" };
        eot.heal(max_hp * fainted as u32 / 32, format!("Crest recovery ({fainted} {allies} fainted)"));
    }
}

/// Net HP change `defender` sees at the end of each turn `mv` is used.
///
/// Hazards are not included; see [`super::get_hazards`].
pub fn get_end_of_turn(_gen: Generation, attacker: &Pokemon, defender: &Pokemon, mv: &Move, field: &Field) -> EndOfTurn {
    let guards = Guards::compute(attacker, defender, mv, field);
    let mut eot = EndOfTurn::default();
    let max_hp = defender.max_hp();

    weather_effects(&mut eot, defender, field, &guards);
    item_and_side_effects(&mut eot, attacker, defender, mv, field, &guards);
    status_effects(&mut eot, attacker, defender, field, &guards);
    move_effects(&mut eot, attacker, defender, mv, field, &guards);
    crest_effects(&mut eot, attacker, defender, &guards);

    if field.is_field(ChromaticField::ThunderingPlateau) && defender.has_ability(&["Volt Absorb"]) && !guards.heal_block {
        eot.heal(max_hp / 16, "Volt Absorb recovery");
    }

    let eruption = mv.named(&VOLCANIC_ERUPTION) || (mv.named(&["Nature Power"]) && field.terrain.is_none());
    if field.is_field(ChromaticField::VolcanicTop)
        && eruption
        && !defender.has_ability(&["Flash Fire", "Well-Baked Body"])
        && !guards.defender_magic_guard
    {
        let mut effectiveness: f64 = defender.types.iter().map(|&t| type_chart(Type::Fire, t).multiplier()).product();
        if defender.named(&["Leafeon-Crest"]) {
            effectiveness = effectiveness.min(0.5);
        }
        if defender.named(&["Torterra-Crest"]) {
            effectiveness = 1.0 / effectiveness;
        }
        let amount = (effectiveness * max_hp as f64 / 8.0).floor() as i64;
        eot.damage -= amount;
        eot.texts.push("Volcanic Eruption damage".to_string());
    }

    eot
}
