//! Type effectiveness and the immunities that end a calculation early.

use super::context::Guards;
use super::crest;
use super::stats::{get_mimicry_type, is_grounded, is_qp_active};
use super::trace::{ModifierTrace, Role, TraceEvent};
use crate::entities::{Pokemon, Status};
use crate::field::{ChromaticField, Field, Terrain, Weather};
use crate::moves::{Move, MoveFlags};
use crate::types::{type_chart, Type};

/// Moves that carry an extra Grass typing in the Jungle.
pub const JUNGLE_GRASS_MOVES: [&str; 6] = ["Air Cutter", "Air Slash", "Cut", "Fury Cutter", "Psycho Cut", "Slash"];

pub(crate) const VOLCANIC_ERUPTION: [&str; 7] =
    ["Bulldoze", "Earthquake", "Eruption", "Lava Plume", "Magma Storm", "Magnitude", "Stomping Tantrum"];

/// Types a Steel typing resists, granted by Steelworker underwater.
const STEEL_RESISTS: [Type; 10] = [
    Type::Normal,
    Type::Flying,
    Type::Rock,
    Type::Bug,
    Type::Steel,
    Type::Grass,
    Type::Psychic,
    Type::Ice,
    Type::Dragon,
    Type::Fairy,
];

#[inline]
fn chart(attacking: Type, defending: Type) -> f64 {
    type_chart(attacking, defending).multiplier()
}

#[inline]
fn invert(effectiveness: f64) -> f64 {
    if effectiveness == 0.0 {
        2.0
    } else {
        1.0 / effectiveness
    }
}

/// Effectiveness of `mv` against a single defending type.
pub fn get_move_effectiveness(
    mv: &Move,
    target: Type,
    field: &Field,
    ghost_revealed: bool,
    gravity: bool,
    ring_target: bool,
) -> f64 {
    use ChromaticField::*;

    if ghost_revealed && target == Type::Ghost && (mv.has_type(Type::Normal) || mv.has_type(Type::Fighting)) {
        1.0
    } else if gravity && target == Type::Flying && mv.has_type(Type::Ground) {
        1.0
    } else if mv.named(&["Freeze-Dry"]) && target == Type::Water {
        2.0
    } else if field.is_field(Jungle) && mv.named(&JUNGLE_GRASS_MOVES) {
        chart(mv.move_type, target) * chart(Type::Grass, target)
    } else if field.is_field(DragonsDen) && mv.named(&["Dragon Pulse"]) && target == Type::Fairy {
        0.5
    } else if field.is_field(Underwater)
        && (mv.named(&["Dive"]) || (mv.named(&["Nature Power"]) && field.terrain.is_none()))
        && target == Type::Water
    {
        2.0
    } else if field.is_field(Undercolony) && mv.named(&["Rock Throw"]) && target == Type::Ground {
        2.0
    } else {
        let mut effectiveness = chart(mv.move_type, target);
        if effectiveness == 0.0 && ring_target {
            effectiveness = 1.0;
        }
        if mv.named(&["Flying Press"]) {
            effectiveness *= chart(Type::Flying, target);
        }
        effectiveness
    }
}

/// Resolved effectiveness of a damaging move.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Effectiveness {
    /// Applied to the first use, with Tera Shell folded in
    pub first: f64,
    /// Applied to later uses of a move used several times in a row
    pub later: f64,
}

/// Defending typing after Soak, Mimicry and Victory Star.
fn defender_types(defender: &Pokemon, field: &Field, trace: &mut ModifierTrace) -> (Type, Option<Type>) {
    let mut type1 = defender.types[0];
    let mut type2 = defender.types.get(1).copied();

    if field.defender_side.is_soak {
        type1 = Type::Water;
        type2 = None;
        trace.push(TraceEvent::SideCondition { role: Role::Defender, name: "Soak" });
        trace.push(TraceEvent::TypeChange { role: Role::Defender, to: type1 });
    } else if defender.has_ability(&["Mimicry"]) && get_mimicry_type(field) != Type::Typeless {
        type1 = get_mimicry_type(field);
        type2 = None;
        trace.push_ability(Role::Defender, defender);
        trace.push(TraceEvent::TypeChange { role: Role::Defender, to: type1 });
    }

    if defender.has_ability(&["Victory Star"]) && field.is_field(ChromaticField::StarlightArena) {
        type1 = Type::Fairy;
        trace.push_field(field.chromatic_field);
        trace.push_ability(Role::Defender, defender);
        trace.push(TraceEvent::TypeChange { role: Role::Defender, to: type1 });
    }
    (type1, type2)
}

/// Chart effectiveness with every typing, item and field override applied.
///
/// Zero means the target is immune.
fn chart_effectiveness(attacker: &Pokemon, defender: &Pokemon, mv: &Move, field: &Field, trace: &mut ModifierTrace) -> f64 {
    use ChromaticField::*;

    let ghost_revealed =
        attacker.has_ability(&["Scrappy", "Mind's Eye"]) || field.defender_side.is_foresight;
    let ring_target = defender.has_item(&["Ring Target"]) && !defender.has_ability(&["Klutz"]);
    let gravity = field.is_gravity;
    let inverse = crest::inverts_chart(defender, field);

    let (type1, type2) = defender_types(defender, field, trace);
    let single = |t: Type| {
        let e = get_move_effectiveness(mv, t, field, ghost_revealed, gravity, ring_target);
        if inverse {
            invert(e)
        } else {
            e
        }
    };

    let mut effectiveness = single(type1) * type2.map_or(1.0, single);

    if let Some(tera) = defender.tera_type.filter(|&t| t != Type::Stellar) {
        effectiveness = single(tera);
    }

    if field.is_field(Inverse) && mv.has_type(Type::Normal) {
        effectiveness = 1.0;
    }

    if field.is_field(Underwater) && defender.has_ability(&["Steelworker"]) {
        if STEEL_RESISTS.contains(&mv.move_type) {
            effectiveness *= 0.5;
        }
        if mv.has_type(Type::Poison) {
            effectiveness = 0.0;
        }
    }

    if field.is_field(Undercolony)
        && defender.has_ability(&["Shell Armor", "Battle Armor"])
        && mv.has_type(Type::Rock)
        && effectiveness > 0.5
    {
        effectiveness = 0.5;
        trace.push_ability(Role::Defender, defender);
        trace.push_field(field.chromatic_field);
    }

    effectiveness = crest::adjust_effectiveness(defender, mv, effectiveness);

    if effectiveness == 0.0 {
        if mv.has_type(Type::Ground) && defender.has_item(&["Iron Ball"]) && !defender.has_ability(&["Klutz"]) {
            effectiveness = 1.0;
        } else if mv.named(&["Thousand Arrows"]) {
            effectiveness = 1.0;
        } else if field.is_field(Desert) && mv.named(&["Bulldoze"]) {
            effectiveness = 1.0;
            trace.push_field(field.chromatic_field);
        }
    }
    effectiveness
}

/// Move-specific failure conditions checked after effectiveness.
fn move_fails(attacker: &Pokemon, defender: &Pokemon, mv: &Move, field: &Field) -> bool {
    let sky_drop = mv.named(&["Sky Drop"])
        && (defender.has_type(Type::Flying) || defender.weightkg >= 200.0 || field.is_gravity);
    let synchronoise = mv.named(&["Synchronoise"])
        && !defender.has_type(attacker.types[0])
        && attacker.types.get(1).map_or(true, |&t| !defender.has_type(t));
    let dream_eater = mv.named(&["Dream Eater"])
        && !(defender.has_status(&[Status::Sleep])
            || defender.has_ability(&["Comatose"])
            || field.is_field(ChromaticField::HauntedGraveyard));
    let steel_roller = mv.named(&["Steel Roller"]) && field.terrain.is_none();
    let poltergeist = mv.named(&["Poltergeist"]) && (defender.item.is_none() || is_qp_active(defender, field));

    sky_drop || synchronoise || dream_eater || steel_roller || poltergeist
}

/// Chromatic-field interactions worth reporting even when they do not
/// change this hit's numbers.
fn note_field_interactions(attacker: &Pokemon, defender: &Pokemon, mv: &Move, field: &Field, trace: &mut ModifierTrace) {
    use ChromaticField::*;

    let Some(chromatic) = field.chromatic_field else {
        return;
    };
    let guards = Guards::compute(attacker, defender, mv, field);
    let magic_guard = guards.defender_magic_guard;
    let heal_block = guards.heal_block;
    let prism = |p: &Pokemon| p.has_item(&["Prism Scale"]);
    let asleep = defender.has_status(&[Status::Sleep]) || defender.has_ability(&["Comatose"]);

    let mut noted = false;

    match chromatic {
        Jungle => {
            noted = (mv.named(&["Fell Stinger", "Silver Wind", "Steamroller"]) && !magic_guard)
                || mv.named(&JUNGLE_GRASS_MOVES);
        }
        DragonsDen => noted = mv.named(&["Dragon Pulse"]) && defender.has_type(Type::Fairy),
        ThunderingPlateau => {
            if prism(defender) && mv.is_special() {
                trace.push_item(Role::Defender, defender);
                noted = true;
            }
            noted |= defender.has_ability(&["Volt Absorb"]) && !heal_block;
        }
        VolcanicTop => {
            if prism(attacker) && mv.is_special() {
                trace.push_item(Role::Attacker, attacker);
                noted = true;
            }
            noted |= ((mv.named(&VOLCANIC_ERUPTION) || (mv.named(&["Nature Power"]) && field.terrain.is_none()))
                && !defender.has_ability(&["Flash Fire", "Well-Baked Body"])
                && !magic_guard)
                || defender.has_ability(&["Solar Power"]);
        }
        Sky => {
            if prism(defender) && mv.bp != 0 {
                trace.push_item(Role::Defender, defender);
                noted = true;
            }
        }
        HauntedGraveyard => {
            noted = (asleep && !magic_guard && !attacker.has_ability(&["Bad Dreams"]))
                || (mv.named(&["Dream Eater"]) && !asleep);
            if prism(defender) && mv.is_special() && !mv.named(&["Nature Power"]) {
                trace.push_item(Role::Defender, defender);
                noted = true;
            }
        }
        FlowerGarden => {
            if prism(defender) && field.defender_side.is_ingrain && !heal_block {
                trace.push_item(Role::Defender, defender);
                noted = true;
            }
            noted |= mv.named(&["Leaf Tornado"]) && !magic_guard;
        }
        Desert => {
            if prism(attacker) && mv.is_physical() {
                trace.push_item(Role::Attacker, attacker);
                noted = true;
            }
            noted |= mv.named(&["Sandsear Storm"]) && !magic_guard;
        }
        SnowyPeaks => {
            noted = (field.has_weather(&[Weather::Snow])
                && !defender.has_type(Type::Ice)
                && !defender.has_ability(&["Overcoat", "Snow Cloak"])
                && !defender.has_item(&["Safety Goggles"])
                && !magic_guard)
                || (defender.has_ability(&["Ice Body"]) && !field.has_weather(&[Weather::Hail, Weather::Snow]) && !heal_block)
                || (field.defender_side.is_sr
                    && defender.has_type(Type::Ice)
                    && !defender.has_item(&["Heavy-Duty Boots"])
                    && !defender.has_ability(&["Mountaineer"])
                    && !magic_guard);
        }
        AcidicWasteland => {
            let poisoned = |p: &Pokemon| p.has_status(&[Status::Poison, Status::Toxic]);
            noted = (attacker.has_ability(&["Toxic Boost"]) && mv.is_physical() && !poisoned(attacker))
                || (((defender.has_ability(&["Poison Heal"]) && !poisoned(defender))
                    || defender.has_ability(&["Liquid Ooze"]))
                    && !heal_block);
        }
        Cave => {
            noted = (field.defender_side.is_sr
                && !defender.has_item(&["Heavy-Duty Boots"])
                && !defender.has_ability(&["Magic Guard", "Mountaineer"]))
                || (mv.named(&["Power Gem"]) && defender.stats.def < defender.stats.spd);
        }
        WatersSurface => {
            noted = (defender.has_status(&[Status::Burn]) && !magic_guard)
                || (((defender.has_ability(&["Rain Dish"]) && !field.has_weather(&[Weather::Rain, Weather::HeavyRain]))
                    || field.defender_side.is_aqua_ring)
                    && !heal_block);
        }
        Underwater => {
            if prism(attacker) && field.attacker_side.is_soak && mv.bp != 0 {
                trace.push_item(Role::Attacker, attacker);
                noted = true;
            }
            if prism(defender) && field.defender_side.is_soak && mv.bp != 0 {
                trace.push_item(Role::Defender, defender);
                noted = true;
            }
            if defender.has_ability(&["Steelworker"])
                && (STEEL_RESISTS.contains(&mv.move_type) || mv.has_type(Type::Poison))
            {
                trace.push_ability(Role::Defender, defender);
                noted = true;
            }
            noted |= ((mv.named(&["Dive"]) || (mv.named(&["Nature Power"]) && field.terrain.is_none()))
                && defender.has_type(Type::Water))
                || (defender.has_ability(&["Dry Skin", "Water Absorb"]) && !heal_block);
        }
        Undercolony => noted = mv.named(&["Rock Throw"]) && defender.has_type(Type::Ground),
        Inverse => noted = true,
        _ => {}
    }

    if noted {
        trace.push(TraceEvent::ChromaticField(chromatic));
    }
}

/// Whether a hazard would chip the defender on entry, which breaks Tera
/// Shell, Multiscale and Shadow Shield.
pub fn entry_hazard_free(defender: &Pokemon, field: &Field) -> bool {
    let side = &field.defender_side;
    let flying = defender.has_type(Type::Flying);
    (!side.is_sr
        && (side.spikes == 0 || flying)
        && !(side.is_sticky_web && flying && field.is_field(ChromaticField::Jungle)))
        || defender.has_item(&["Heavy-Duty Boots"])
}

/// Abilities that make the defender immune to this move.
fn ability_immune(attacker: &Pokemon, defender: &Pokemon, mv: &Move, field: &Field, effectiveness: f64) -> bool {
    let grounded_by_move = mv.named(&["Thousand Arrows"]) || (mv.named(&["Bulldoze"]) && field.is_field(ChromaticField::Desert));
    (defender.has_ability(&["Wonder Guard"]) && effectiveness <= 1.0)
        || (mv.has_type(Type::Grass) && defender.has_ability(&["Sap Sipper"]))
        || (mv.has_type(Type::Fire) && defender.has_ability(&["Flash Fire", "Well-Baked Body"]))
        || (mv.has_type(Type::Water) && defender.has_ability(&["Dry Skin", "Storm Drain", "Water Absorb"]))
        || (mv.has_type(Type::Electric) && defender.has_ability(&["Lightning Rod", "Motor Drive", "Volt Absorb"]))
        || (mv.has_type(Type::Ground)
            && !field.is_gravity
            && !grounded_by_move
            && !defender.has_item(&["Iron Ball"])
            && (defender.has_ability(&["Levitate"]) || defender.named(&["Probopass-Crest"])))
        || (mv.has_flag(MoveFlags::BULLET) && defender.has_ability(&["Bulletproof"]))
        || (mv.has_flag(MoveFlags::SOUND) && !mv.named(&["Clangorous Soul"]) && defender.has_ability(&["Soundproof"]))
        || (mv.priority > 0 && defender.has_ability(&["Queenly Majesty", "Dazzling", "Armor Tail"]))
        || (mv.priority > 0 && attacker.name_contains("Espeon") && field.is_field(ChromaticField::Rainbow))
        || (mv.has_type(Type::Ground) && defender.has_ability(&["Earth Eater"]))
        || (mv.has_flag(MoveFlags::WIND) && defender.has_ability(&["Wind Rider"]))
}

/// Resolve effectiveness for a damaging move.
///
/// Returns `None` when the move cannot damage the defender: a type or
/// ability immunity, a failing move, a weather or terrain block, or a
/// field rule.
pub fn resolve_effectiveness(
    attacker: &Pokemon,
    defender: &Pokemon,
    mv: &Move,
    field: &Field,
    trace: &mut ModifierTrace,
) -> Option<Effectiveness> {
    let mut effectiveness = chart_effectiveness(attacker, defender, mv, field, trace);
    if effectiveness == 0.0 {
        log::debug!("{} is immune to {}", defender.name, mv.name);
        return None;
    }

    if move_fails(attacker, defender, mv, field) {
        log::debug!("{} fails against {}", mv.name, defender.name);
        return None;
    }

    if (field.has_weather(&[Weather::HarshSun]) && mv.has_type(Type::Water))
        || (field.has_weather(&[Weather::HeavyRain]) && mv.has_type(Type::Fire))
    {
        trace.push_weather(field.weather);
        return None;
    }

    if field.has_weather(&[Weather::StrongWinds])
        && defender.has_type(Type::Flying)
        && chart(mv.move_type, Type::Flying) > 1.0
    {
        effectiveness /= 2.0;
        trace.push_weather(field.weather);
    }

    note_field_interactions(attacker, defender, mv, field, trace);

    if field.is_field(ChromaticField::Eclipse) && mv.named(&["Solar Beam", "Solar Blade"]) {
        trace.push_field(field.chromatic_field);
        return None;
    }
    if field.is_field(ChromaticField::Factory) && defender.has_ability(&["Heatproof"]) && mv.has_type(Type::Fire) {
        trace.push_ability(Role::Defender, defender);
        trace.push_field(field.chromatic_field);
        return None;
    }

    if mv.has_type(Type::Stellar) {
        if let Some(tera) = defender.tera_type {
            trace.push(TraceEvent::Tera { role: Role::Defender, tera });
        }
        effectiveness = if defender.tera_type.is_some() { 2.0 } else { 1.0 };
    }

    let later = effectiveness;

    if defender.has_ability(&["Tera Shell"])
        && defender.cur_hp() == defender.max_hp()
        && entry_hazard_free(defender, field)
    {
        effectiveness = 0.5;
        trace.push_ability(Role::Defender, defender);
    }

    if ability_immune(attacker, defender, mv, field, effectiveness) {
        trace.push_ability(Role::Defender, defender);
        return None;
    }

    let grounded_by_move = mv.named(&["Thousand Arrows"]) || (mv.named(&["Bulldoze"]) && field.is_field(ChromaticField::Desert));
    if mv.has_type(Type::Ground) && !grounded_by_move && !field.is_gravity && defender.has_item(&["Air Balloon"]) {
        trace.push_item(Role::Defender, defender);
        return None;
    }

    if mv.priority > 0
        && field.has_terrain(Terrain::Psychic)
        && is_grounded(defender, field, &field.defender_side)
    {
        trace.push_terrain(field.terrain);
        return None;
    }

    if defender.is_dynamaxed && mv.named(&["Heat Crash", "Heavy Slam", "Low Kick", "Grass Knot"]) {
        return None;
    }

    Some(Effectiveness { first: effectiveness, later })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::PokemonSet;
    use crate::moves::{MoveCategory, MoveSet};
    use pretty_assertions::assert_eq;

    fn mon(name: &str, types: Vec<Type>, ability: &str) -> Pokemon {
        Pokemon::from_set(PokemonSet {
            name: name.into(),
            types,
            ability: Some(ability.into()),
            ..Default::default()
        })
        .unwrap()
    }

    fn mv(name: &str, move_type: Type) -> Move {
        Move::from_set(MoveSet { name: name.into(), bp: 80, move_type, category: MoveCategory::Special, ..Default::default() })
            .unwrap()
    }

    #[test]
    fn test_single_type_overrides() {
        let field = Field::default();
        assert_eq!(get_move_effectiveness(&mv("Freeze-Dry", Type::Ice), Type::Water, &field, false, false, false), 2.0);
        assert_eq!(get_move_effectiveness(&mv("Tackle", Type::Normal), Type::Ghost, &field, true, false, false), 1.0);
        assert_eq!(get_move_effectiveness(&mv("Earthquake", Type::Ground), Type::Flying, &field, false, true, false), 1.0);
        assert_eq!(get_move_effectiveness(&mv("Earthquake", Type::Ground), Type::Flying, &field, false, false, true), 1.0);
        assert_eq!(get_move_effectiveness(&mv("Flying Press", Type::Fighting), Type::Grass, &field, false, false, false), 2.0);

        let jungle = Field { chromatic_field: Some(ChromaticField::Jungle), ..Default::default() };
        // Flying x Grass against Water: 1 * 2
        assert_eq!(get_move_effectiveness(&mv("Air Slash", Type::Flying), Type::Water, &jungle, false, false, false), 2.0);
    }

    #[test]
    fn test_inverse_and_tera() {
        let inverse = Field { chromatic_field: Some(ChromaticField::Inverse), ..Default::default() };
        let gengar = mon("Gengar", vec![Type::Ghost, Type::Poison], "Cursed Body");
        let attacker = mon("Lucario", vec![Type::Fighting, Type::Steel], "Inner Focus");
        let mut trace = ModifierTrace::new();

        // Ghost immunity becomes 2x, Poison resist becomes 2x
        let e = resolve_effectiveness(&attacker, &gengar, &mv("Aura Sphere", Type::Fighting), &inverse, &mut trace).unwrap();
        assert_eq!(e.first, 4.0);
        assert!(trace.contains(&TraceEvent::ChromaticField(ChromaticField::Inverse)));

        let mut tera = gengar.clone();
        tera.tera_type = Some(Type::Normal);
        let e = resolve_effectiveness(&attacker, &tera, &mv("Aura Sphere", Type::Fighting), &Field::default(), &mut trace)
            .unwrap();
        assert_eq!(e.first, 2.0);
    }

    #[test]
    fn test_crest_effectiveness() {
        let attacker = mon("Lucario", vec![Type::Fighting, Type::Steel], "Inner Focus");
        let mut trace = ModifierTrace::new();

        // Torterra flips the chart outside the Inverse field and cancels it inside
        let torterra = mon("Torterra-Crest", vec![Type::Grass, Type::Ground], "Overgrow");
        let ice = mv("Ice Beam", Type::Ice);
        let e = resolve_effectiveness(&attacker, &torterra, &ice, &Field::default(), &mut trace).unwrap();
        assert_eq!(e.first, 0.25);
        let inverse = Field { chromatic_field: Some(ChromaticField::Inverse), ..Default::default() };
        let e = resolve_effectiveness(&attacker, &torterra, &ice, &inverse, &mut trace).unwrap();
        assert_eq!(e.first, 4.0);

        let druddigon = mon("Druddigon-Crest", vec![Type::Dragon], "Rough Skin");
        assert_eq!(resolve_effectiveness(&attacker, &druddigon, &mv("Flamethrower", Type::Fire), &Field::default(), &mut trace), None);

        let probopass = mon("Probopass-Crest", vec![Type::Rock, Type::Steel], "Sturdy");
        assert_eq!(resolve_effectiveness(&attacker, &probopass, &mv("Earth Power", Type::Ground), &Field::default(), &mut trace), None);
    }

    #[test]
    fn test_immunities_exit() {
        let field = Field::default();
        let attacker = mon("Raichu", vec![Type::Electric], "Static");
        let mut trace = ModifierTrace::new();

        let lanturn = mon("Lanturn", vec![Type::Water, Type::Electric], "Volt Absorb");
        assert!(resolve_effectiveness(&attacker, &lanturn, &mv("Thunderbolt", Type::Electric), &field, &mut trace).is_none());
        assert!(trace.has_ability(Role::Defender, "Volt Absorb"));

        let garchomp = mon("Garchomp", vec![Type::Dragon, Type::Ground], "Rough Skin");
        assert!(resolve_effectiveness(&attacker, &garchomp, &mv("Thunderbolt", Type::Electric), &field, &mut trace).is_none());

        let heavy_rain = Field { weather: Some(Weather::HeavyRain), ..Default::default() };
        let target = mon("Snorlax", vec![Type::Normal], "Thick Fat");
        assert!(resolve_effectiveness(&attacker, &target, &mv("Flamethrower", Type::Fire), &heavy_rain, &mut trace).is_none());
    }

    #[test]
    fn test_ground_rescues() {
        let field = Field::default();
        let attacker = mon("Garchomp", vec![Type::Dragon, Type::Ground], "Rough Skin");
        let mut trace = ModifierTrace::new();
        let mut skarmory = mon("Skarmory", vec![Type::Steel, Type::Flying], "Sturdy");
        assert!(resolve_effectiveness(&attacker, &skarmory, &mv("Earthquake", Type::Ground), &field, &mut trace).is_none());

        let e = resolve_effectiveness(&attacker, &skarmory, &mv("Thousand Arrows", Type::Ground), &field, &mut trace);
        assert_eq!(e.map(|e| e.first), Some(1.0));

        skarmory.item = Some("Iron Ball".into());
        let e = resolve_effectiveness(&attacker, &skarmory, &mv("Earthquake", Type::Ground), &field, &mut trace);
        assert_eq!(e.map(|e| e.first), Some(1.0));
    }

    #[test]
    fn test_tera_shell_full_hp() {
        let field = Field::default();
        let attacker = mon("Kingambit", vec![Type::Dark, Type::Steel], "Supreme Overlord");
        let terapagos = mon("Terapagos-Terastal", vec![Type::Normal], "Tera Shell");
        let mut trace = ModifierTrace::new();
        let e = resolve_effectiveness(&attacker, &terapagos, &mv("Close Combat", Type::Fighting), &field, &mut trace)
            .unwrap();
        assert_eq!(e, Effectiveness { first: 0.5, later: 2.0 });

        let rocks = Field { defender_side: crate::field::Side { is_sr: true, ..Default::default() }, ..Default::default() };
        let e = resolve_effectiveness(&attacker, &terapagos, &mv("Close Combat", Type::Fighting), &rocks, &mut trace)
            .unwrap();
        assert_eq!(e.first, 2.0);
    }

    #[test]
    fn test_strong_winds_and_steel_roller() {
        let winds = Field { weather: Some(Weather::StrongWinds), ..Default::default() };
        let attacker = mon("Glaceon", vec![Type::Ice], "Ice Body");
        let rayquaza = mon("Rayquaza-Mega", vec![Type::Dragon, Type::Flying], "Delta Stream");
        let mut trace = ModifierTrace::new();
        let e = resolve_effectiveness(&attacker, &rayquaza, &mv("Ice Beam", Type::Ice), &winds, &mut trace).unwrap();
        assert_eq!(e.first, 2.0);
        assert!(trace.contains(&TraceEvent::Weather(Weather::StrongWinds)));

        assert!(resolve_effectiveness(&attacker, &rayquaza, &mv("Steel Roller", Type::Steel), &Field::default(), &mut trace)
            .is_none());
    }
}
