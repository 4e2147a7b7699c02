//! Move type, target and priority resolution.
//!
//! Runs once per calculation on the effective move, before effectiveness
//! is resolved. Type-changing moves are matched on their original name so a
//! renamed Max or Z move still resolves the way its base move would.

use super::crest;
use super::stats::is_grounded;
use super::trace::{ModifierTrace, Role, TraceEvent};
use crate::entities::Pokemon;
use crate::field::{ChromaticField, Field, Side, Terrain, Weather};
use crate::items::{drive_type, memory_type, natural_gift, plate_type};
use crate::moves::{Move, MoveFlags, MoveTarget};
use crate::types::Type;

const MULTIPULSE_MOVES: [&str; 3] = ["Hyper Voice", "Tri Attack", "Echoed Voice"];

const EEVEELUTIONS: [&str; 9] =
    ["Umbreon", "Espeon", "Flareon", "Vaporeon", "Jolteon", "Glaceon", "Leafeon", "Sylveon", "Eevee"];

/// Moves whose type an -ate ability never changes.
const NO_TYPE_CHANGE: [&str; 9] = [
    "Revelation Dance",
    "Judgment",
    "Nature Power",
    "Techno Blast",
    "Multi-Attack",
    "Natural Gift",
    "Weather Ball",
    "Terrain Pulse",
    "Struggle",
];

fn clear_screens(side: &mut Side) {
    side.is_reflect = false;
    side.is_light_screen = false;
    side.is_aurora_veil = false;
}

/// Type of a terrain-driven move under the active terrain.
pub fn terrain_type(field: &Field) -> Type {
    match field.terrain {
        Some(Terrain::Electric) => Type::Electric,
        Some(Terrain::Grassy) => Type::Grass,
        Some(Terrain::Misty) => Type::Fairy,
        Some(Terrain::Psychic) => Type::Psychic,
        None => Type::Normal,
    }
}

/// Type Nature Power takes on a chromatic field when no terrain is up.
pub fn nature_power_field_type(attacker: &Pokemon, field: &Field) -> Type {
    use ChromaticField::*;
    match field.chromatic_field {
        Some(Jungle | Undercolony) => Type::Bug,
        Some(Eclipse) => Type::Dark,
        Some(DragonsDen | Factory) => Type::Steel,
        Some(ThunderingPlateau) => Type::Electric,
        Some(StarlightArena) => Type::Fairy,
        Some(RingArena) => Type::Fighting,
        Some(VolcanicTop) => Type::Fire,
        Some(Sky) => Type::Flying,
        Some(HauntedGraveyard) => Type::Ghost,
        Some(FlowerGarden) => Type::Grass,
        Some(Desert) => Type::Ground,
        Some(SnowyPeaks) => Type::Ice,
        Some(BlessedSanctum) => attacker.item.as_deref().and_then(plate_type).unwrap_or(Type::Normal),
        Some(AcidicWasteland) => Type::Poison,
        Some(AncientRuins | Inverse) => Type::Psychic,
        Some(Cave) => Type::Rock,
        Some(WatersSurface | Underwater) => Type::Water,
        Some(Rainbow) | None => Type::Normal,
    }
}

fn weather_ball_type(attacker: &Pokemon, field: &Field, trace: &mut ModifierTrace) -> Type {
    let umbrella = attacker.has_item(&["Utility Umbrella"]);
    let mut move_type = if field.has_weather(&[Weather::Sun, Weather::HarshSun]) && !umbrella {
        Type::Fire
    } else if field.has_weather(&[Weather::Rain, Weather::HeavyRain]) && !umbrella {
        Type::Water
    } else if field.has_weather(&[Weather::Sand]) {
        Type::Rock
    } else if field.has_weather(&[Weather::Hail, Weather::Snow]) {
        Type::Ice
    } else {
        Type::Normal
    };
    if move_type == Type::Normal && field.attacker_side.is_tailwind && field.is_field(ChromaticField::Sky) {
        move_type = Type::Flying;
        trace.push(TraceEvent::SideCondition { role: Role::Attacker, name: "Tailwind" });
        trace.push_field(field.chromatic_field);
    } else {
        trace.push_weather(field.weather);
    }
    trace.push(TraceEvent::MoveType(move_type));
    move_type
}

fn nature_power_type(attacker: &Pokemon, defender: &Pokemon, mv: &Move, field: &Field, trace: &mut ModifierTrace) -> Type {
    let mut move_type = terrain_type(field);
    if mv.named(&["Nature Power"]) && move_type == Type::Normal {
        move_type = nature_power_field_type(attacker, field);
        if move_type != Type::Normal || field.is_field(ChromaticField::BlessedSanctum) {
            trace.push_field(field.chromatic_field);
        }
    } else {
        trace.push_terrain(field.terrain);
    }

    if mv.is_max {
        trace.push(TraceEvent::MoveType(move_type));
    }

    let prankster = (mv.named(&["Nature Power"]) && attacker.has_ability(&["Prankster"]))
        || (attacker.has_ability(&["Telepathy"]) && field.is_field(ChromaticField::AncientRuins));
    let blocked_target = defender.types.contains(&Type::Dark)
        || (field.has_terrain(Terrain::Psychic) && is_grounded(defender, field, &field.defender_side));
    if !prankster && blocked_target {
        trace.push(TraceEvent::MoveType(move_type));
    }
    move_type
}

/// Type and target changes keyed on the move itself. Screen-breaking moves
/// clear the defender's screens on `field`.
fn move_specific_type(
    attacker: &Pokemon,
    defender: &Pokemon,
    mv: &mut Move,
    field: &mut Field,
    trace: &mut ModifierTrace,
) -> Type {
    let item = attacker.item.as_deref().unwrap_or("");
    let original = mv.original_name.as_str();
    let mut move_type = mv.move_type;

    if original == "Weather Ball" {
        move_type = weather_ball_type(attacker, field, trace);
    } else if mv.named(&["Judgment"]) && plate_type(item).is_some() {
        move_type = plate_type(item).unwrap_or(move_type);
    } else if mv.named(&MULTIPULSE_MOVES) && field.is_field(ChromaticField::BlessedSanctum) && plate_type(item).is_some() {
        move_type = plate_type(item).unwrap_or(move_type);
    } else if original == "Techno Blast" && drive_type(item).is_some() {
        move_type = drive_type(item).unwrap_or(move_type);
        trace.push(TraceEvent::MoveType(move_type));
    } else if original == "Multi-Attack" {
        if let Some(memory) = memory_type(item).or_else(|| crest::silvally_type(attacker)) {
            move_type = memory;
            trace.push(TraceEvent::MoveType(move_type));
        }
    } else if mv.named(&["Natural Gift"]) && item.ends_with("Berry") {
        if let Some((gift, _)) = natural_gift(item) {
            move_type = gift;
            trace.push(TraceEvent::MoveType(move_type));
            trace.push_item(Role::Attacker, attacker);
        }
    } else if mv.named(&["Nature Power"])
        || (original == "Terrain Pulse" && is_grounded(attacker, field, &field.attacker_side))
    {
        move_type = nature_power_type(attacker, defender, mv, field, trace);
    } else if original == "Revelation Dance" {
        move_type = attacker.tera_type.unwrap_or(attacker.types[0]);
    } else if mv.named(&["Aura Wheel"]) {
        if attacker.named(&["Morpeko"]) {
            move_type = Type::Electric;
        } else if attacker.named(&["Morpeko-Hangry"]) {
            move_type = Type::Dark;
        }
    } else if mv.named(&["Raging Bull"]) {
        if attacker.named(&["Tauros-Paldea-Combat"]) {
            move_type = Type::Fighting;
        } else if attacker.named(&["Tauros-Paldea-Blaze"]) {
            move_type = Type::Fire;
        } else if attacker.named(&["Tauros-Paldea-Aqua"]) {
            move_type = Type::Water;
        }
        clear_screens(&mut field.defender_side);
    } else if mv.named(&["Ivy Cudgel"]) {
        if attacker.name_contains("Ogerpon-Cornerstone") {
            move_type = Type::Rock;
        } else if attacker.name_contains("Ogerpon-Hearthflame") {
            move_type = Type::Fire;
        } else if attacker.name_contains("Ogerpon-Wellspring") {
            move_type = Type::Water;
        }
    } else if mv.named(&["Tera Starstorm"]) && attacker.named(&["Terapagos-Stellar"]) {
        mv.target = MoveTarget::AllAdjacentFoes;
        move_type = Type::Stellar;
    } else if mv.named(&["Brick Break", "Psychic Fangs"])
        || (mv.named(&["X-Scissor"]) && field.is_field(ChromaticField::Jungle))
    {
        clear_screens(&mut field.defender_side);
    }
    move_type
}

/// Apply -ate abilities and their field analogues. Returns whether the
/// change carries the -ate power boost.
fn ate_type(attacker: &Pokemon, mv: &Move, field: &Field, move_type: &mut Type, trace: &mut ModifierTrace) -> bool {
    let tera_blast = mv.named(&["Tera Blast"]) && attacker.tera_type.is_some();
    let multipulse = mv.named(&MULTIPULSE_MOVES) && field.is_field(ChromaticField::BlessedSanctum);
    if mv.is_z || mv.named(&NO_TYPE_CHANGE) || tera_blast || multipulse {
        return false;
    }

    let normal = *move_type == Type::Normal;
    if attacker.has_ability(&["Aerilate"]) && normal {
        *move_type = Type::Flying;
    } else if (attacker.has_ability(&["Galvanize"]) || attacker.named(&["Luxray-Crest"])) && normal {
        *move_type = Type::Electric;
    } else if attacker.has_ability(&["Liquid Voice"]) && mv.has_flag(MoveFlags::SOUND) {
        *move_type = Type::Water;
        trace.push_ability(Role::Attacker, attacker);
        return false;
    } else if attacker.has_ability(&["Pixilate"]) && normal {
        *move_type = Type::Fairy;
    } else if attacker.has_ability(&["Refrigerate"]) && normal {
        *move_type = Type::Ice;
    } else if attacker.has_ability(&["Normalize"]) {
        *move_type = Type::Normal;
    } else if let Some((converted, boosted)) = crest::ate_type(attacker).filter(|_| normal) {
        *move_type = converted;
        return boosted;
    } else if attacker.has_ability(&["Intimidate"]) && normal && field.is_field(ChromaticField::DragonsDen) {
        *move_type = Type::Dragon;
        trace.push_ability(Role::Attacker, attacker);
        trace.push(TraceEvent::MoveType(Type::Dragon));
        trace.push_field(field.chromatic_field);
        return true;
    } else {
        if EEVEELUTIONS.iter().any(|name| attacker.name_contains(name))
            && field.is_field(ChromaticField::Rainbow)
            && mv.named(&["Quick Attack"])
        {
            *move_type = attacker.types[0];
        }
        return false;
    }
    trace.push_ability(Role::Attacker, attacker);
    true
}

/// Resolve the effective move's type, target and priority.
///
/// Returns whether an -ate ability changed the type.
pub fn resolve_move_type(
    attacker: &Pokemon,
    defender: &Pokemon,
    mv: &mut Move,
    field: &mut Field,
    trace: &mut ModifierTrace,
) -> bool {
    let mut move_type = move_specific_type(attacker, defender, mv, field, trace);
    let has_ate_boost = ate_type(attacker, mv, field, &mut move_type, trace);

    if mv.named(&["Tera Blast"]) {
        if let Some(tera) = attacker.tera_type {
            move_type = tera;
        }
    }
    mv.move_type = move_type;

    let triage = (attacker.has_ability(&["Triage"]) || attacker.named(&["Cherrim-Crest", "Cherrim-Crest-Sunshine"]))
        && mv.drain.is_some();
    let gale_wings = attacker.has_ability(&["Gale Wings"])
        && mv.has_type(Type::Flying)
        && (attacker.cur_hp() == attacker.max_hp() || field.is_field(ChromaticField::Sky));
    let grassy_glide = mv.named(&["Grassy Glide"])
        && (field.has_terrain(Terrain::Grassy) || field.is_field(ChromaticField::FlowerGarden));
    if triage || gale_wings || grassy_glide {
        mv.priority = 1;
        trace.push_ability(Role::Attacker, attacker);
    }

    log::debug!("{} resolved to {} (ate boost: {has_ate_boost})", mv.name, mv.move_type);
    has_ate_boost
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::PokemonSet;
    use crate::moves::MoveSet;
    use rstest::rstest;

    fn mon(name: &str, ability: &str, item: Option<&str>) -> Pokemon {
        Pokemon::from_set(PokemonSet {
            name: name.into(),
            types: vec![Type::Normal],
            ability: Some(ability.into()),
            item: item.map(Into::into),
            ..Default::default()
        })
        .unwrap()
    }

    fn mv(name: &str, move_type: Type) -> Move {
        Move::from_set(MoveSet { name: name.into(), bp: 50, move_type, ..Default::default() }).unwrap()
    }

    #[rstest]
    #[case(Some(Weather::Sun), None, Type::Fire)]
    #[case(Some(Weather::Sun), Some("Utility Umbrella"), Type::Normal)]
    #[case(Some(Weather::Sand), Some("Utility Umbrella"), Type::Rock)]
    #[case(Some(Weather::Snow), None, Type::Ice)]
    #[case(None, None, Type::Normal)]
    fn test_weather_ball(#[case] weather: Option<Weather>, #[case] item: Option<&str>, #[case] expected: Type) {
        let attacker = mon("Castform", "Forecast", item);
        let defender = mon("Snorlax", "Thick Fat", None);
        let mut field = Field { weather, ..Default::default() };
        let mut weather_ball = mv("Weather Ball", Type::Normal);
        let mut trace = ModifierTrace::new();
        resolve_move_type(&attacker, &defender, &mut weather_ball, &mut field, &mut trace);
        assert_eq!(weather_ball.move_type, expected);
        assert!(trace.contains(&TraceEvent::MoveType(expected)));
    }

    #[test]
    fn test_ate_abilities() {
        let defender = mon("Snorlax", "Thick Fat", None);
        let mut field = Field::default();
        let mut trace = ModifierTrace::new();

        let sylveon = mon("Sylveon", "Pixilate", None);
        let mut voice = mv("Hyper Voice", Type::Normal);
        assert!(resolve_move_type(&sylveon, &defender, &mut voice, &mut field, &mut trace));
        assert_eq!(voice.move_type, Type::Fairy);
        assert!(trace.has_ability(Role::Attacker, "Pixilate"));

        // only Normal moves convert
        let mut moonblast = mv("Moonblast", Type::Fairy);
        assert!(!resolve_move_type(&sylveon, &defender, &mut moonblast, &mut field, &mut trace));

        let primarina = mon("Primarina", "Liquid Voice", None);
        let mut sparkling = Move::from_set(MoveSet {
            name: "Hyper Voice".into(),
            bp: 90,
            flags: crate::moves::MoveFlagSet { sound: true, ..Default::default() },
            ..Default::default()
        })
        .unwrap();
        assert!(!resolve_move_type(&primarina, &defender, &mut sparkling, &mut field, &mut trace));
        assert_eq!(sparkling.move_type, Type::Water);
    }

    #[test]
    fn test_crest_type_changes() {
        let defender = mon("Snorlax", "Thick Fat", None);
        let mut field = Field::default();
        let mut trace = ModifierTrace::new();

        let luxray = mon("Luxray-Crest", "Intimidate", None);
        let mut tackle = mv("Tackle", Type::Normal);
        assert!(resolve_move_type(&luxray, &defender, &mut tackle, &mut field, &mut trace));
        assert_eq!(tackle.move_type, Type::Electric);

        let mut sawsbuck = mon("Sawsbuck-Crest-Summer", "Sap Sipper", None);
        sawsbuck.types = vec![Type::Grass, Type::Normal];
        let mut tackle = mv("Tackle", Type::Normal);
        assert!(resolve_move_type(&sawsbuck, &defender, &mut tackle, &mut field, &mut trace));
        assert_eq!(tackle.move_type, Type::Grass);

        // the Simian conversion carries no power boost
        let simisage = mon("Simisage-Crest", "Gluttony", None);
        let mut tackle = mv("Tackle", Type::Normal);
        assert!(!resolve_move_type(&simisage, &defender, &mut tackle, &mut field, &mut trace));
        assert_eq!(tackle.move_type, Type::Fire);

        let silvally = mon("Silvally-Crest-Ghost", "RKS System", None);
        let mut multi_attack = mv("Multi-Attack", Type::Normal);
        resolve_move_type(&silvally, &defender, &mut multi_attack, &mut field, &mut trace);
        assert_eq!(multi_attack.move_type, Type::Ghost);
    }

    #[test]
    fn test_screen_breakers_and_priority() {
        let attacker = mon("Tauros-Paldea-Blaze", "Intimidate", None);
        let defender = mon("Snorlax", "Thick Fat", None);
        let mut field = Field::default();
        field.defender_side.is_reflect = true;
        field.defender_side.is_aurora_veil = true;
        let mut trace = ModifierTrace::new();
        let mut bull = mv("Raging Bull", Type::Normal);
        resolve_move_type(&attacker, &defender, &mut bull, &mut field, &mut trace);
        assert_eq!(bull.move_type, Type::Fire);
        assert!(!field.defender_side.is_reflect && !field.defender_side.is_aurora_veil);

        let grassy = mon("Rillaboom", "Grassy Surge", None);
        let mut glide = mv("Grassy Glide", Type::Grass);
        let mut field = Field { terrain: Some(Terrain::Grassy), ..Default::default() };
        resolve_move_type(&grassy, &defender, &mut glide, &mut field, &mut trace);
        assert_eq!(glide.priority, 1);
    }

    #[test]
    fn test_nature_power_on_fields() {
        let attacker = mon("Shiinotic", "Effect Spore", None);
        let defender = mon("Snorlax", "Thick Fat", None);
        let mut trace = ModifierTrace::new();
        let mut field = Field { chromatic_field: Some(ChromaticField::Cave), ..Default::default() };
        let mut nature_power = mv("Nature Power", Type::Normal);
        resolve_move_type(&attacker, &defender, &mut nature_power, &mut field, &mut trace);
        assert_eq!(nature_power.move_type, Type::Rock);
        assert!(trace.contains(&TraceEvent::ChromaticField(ChromaticField::Cave)));

        let mut field = Field { terrain: Some(Terrain::Misty), chromatic_field: Some(ChromaticField::Cave), ..Default::default() };
        let mut nature_power = mv("Nature Power", Type::Normal);
        resolve_move_type(&attacker, &defender, &mut nature_power, &mut field, &mut trace);
        assert_eq!(nature_power.move_type, Type::Fairy);
    }
}
