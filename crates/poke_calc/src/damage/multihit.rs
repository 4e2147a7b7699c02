//! State changes between the hits of a multi-hit or repeated move.

use super::formula::get_modified_stat;
use super::generations::{GenMechanics, Generation};
use super::prepare::shift;
use super::stats::get_final_speed;
use super::trace::{ModifierTrace, Role, TraceEvent};
use crate::entities::Pokemon;
use crate::field::{ChromaticField, Field, Terrain, Weather};
use crate::moves::{Move, MoveFlags};
use crate::stats::StatId;
use crate::types::Type;

/// Whether each side's White Herb (or boosting berry) is already spent.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct UsedItems {
    pub attacker: bool,
    pub defender: bool,
}

fn refresh(gen: Generation, pokemon: &mut Pokemon, stat: StatId) {
    pokemon.stats[stat] = get_modified_stat(pokemon.raw_stats[stat], pokemon.boosts[stat], gen.num());
}

/// Apply the guaranteed, damage-relevant effects of one landed hit.
///
/// Only effects that change the next hit's numbers are modelled.
pub fn check_multihit_boost(
    gen: Generation,
    attacker: &mut Pokemon,
    defender: &mut Pokemon,
    mv: &Move,
    field: &mut Field,
    trace: &mut ModifierTrace,
    mut used: UsedItems,
) -> UsedItems {
    // Only Parental Bond makes these hit twice, so contact is guaranteed
    if mv.named(&["Gyro Ball", "Electro Ball"]) && defender.has_ability(&["Gooey", "Tangling Hair"]) {
        if attacker.has_item(&["White Herb"]) && !used.attacker {
            trace.push_item(Role::Attacker, attacker);
            used.attacker = true;
        } else {
            shift(attacker, StatId::Spe, -1);
            attacker.stats.spe = get_final_speed(gen, attacker, field, &field.attacker_side);
            trace.push_ability(Role::Defender, defender);
        }
    } else if mv.named(&["Power-Up Punch"]) {
        shift(attacker, StatId::Atk, 1);
        refresh(gen, attacker, StatId::Atk);
    }

    let attacker_simple = if attacker.has_ability(&["Simple"]) { 2 } else { 1 };
    let defender_simple = if defender.has_ability(&["Simple"]) { 2 } else { 1 };
    let attacker_unaware = attacker.has_ability(&["Unaware"]);

    // The spent-item guard binds only to Luminous Moss
    let berry_boost = (!used.defender && defender.has_item(&["Luminous Moss"]) && mv.has_type(Type::Water))
        || (defender.has_item(&["Maranga Berry"]) && mv.is_special())
        || (defender.has_item(&["Kee Berry"]) && mv.is_physical());
    if berry_boost {
        let stat = if defender.has_item(&["Kee Berry"]) { StatId::Def } else { StatId::Spd };
        if attacker_unaware {
            trace.push_ability(Role::Attacker, attacker);
        } else {
            if defender.has_ability(&["Contrary"]) {
                trace.push_ability(Role::Defender, defender);
                if defender.has_item(&["White Herb"]) && !used.defender {
                    trace.push_item(Role::Defender, defender);
                    used.defender = true;
                } else {
                    shift(defender, stat, -defender_simple);
                }
            } else {
                shift(defender, stat, defender_simple);
            }
            if defender_simple == 2 {
                trace.push_ability(Role::Defender, defender);
            }
            refresh(gen, defender, stat);
            trace.push_item(Role::Defender, defender);
            used.defender = true;
        }
    }

    if defender.has_ability(&["Seed Sower"]) {
        field.terrain = Some(Terrain::Grassy);
    }
    if defender.has_ability(&["Sand Spit"]) {
        field.weather = Some(Weather::Sand);
    }

    if defender.has_ability(&["Stamina"]) || (defender.has_ability(&["Water Compaction"]) && mv.has_type(Type::Water)) {
        if attacker_unaware {
            trace.push_ability(Role::Attacker, attacker);
        } else {
            let stages = if defender.has_ability(&["Stamina"]) { 1 } else { 2 };
            shift(defender, StatId::Def, stages);
            refresh(gen, defender, StatId::Def);
            trace.push_ability(Role::Defender, defender);
        }
    } else if defender.has_ability(&["Weak Armor"]) {
        if attacker_unaware {
            trace.push_ability(Role::Attacker, attacker);
        } else {
            if defender.has_item(&["White Herb"]) && !used.defender && defender.boosts.def == 0 {
                trace.push_item(Role::Defender, defender);
                used.defender = true;
            } else {
                shift(defender, StatId::Def, -1);
                refresh(gen, defender, StatId::Def);
            }
            trace.push_ability(Role::Defender, defender);
        }
        shift(defender, StatId::Spe, 2);
        defender.stats.spe = get_final_speed(gen, defender, field, &field.defender_side);
    }

    if mv.self_drops > 0 {
        if attacker_unaware {
            trace.push_ability(Role::Attacker, attacker);
        } else {
            apply_self_drops(gen, attacker, mv, field, trace, attacker_simple, &mut used);
        }
    }

    // Ability changes land after every other effect
    if defender.has_ability(&["Mummy", "Wandering Spirit", "Lingering Aroma"]) && mv.has_flag(MoveFlags::CONTACT) {
        let old = attacker.ability.replace(defender.ability_name().to_string());
        let attacker_noted = trace.events().iter().any(|e| matches!(e, TraceEvent::Ability { role: Role::Attacker, .. }));
        if attacker_noted {
            trace.push_ability(Role::Defender, defender);
        }
        if defender.has_ability(&["Wandering Spirit"]) {
            defender.ability = old;
        }
    }

    used
}

fn apply_self_drops(
    gen: Generation,
    attacker: &mut Pokemon,
    mv: &Move,
    field: &Field,
    trace: &mut ModifierTrace,
    simple: i8,
    used: &mut UsedItems,
) {
    let stat = if mv.is_special() { StatId::Spa } else { StatId::Atk };
    let mut drops = mv.self_drops as i8;
    // Dragon's Den softens Draco Meteor
    if field.is_field(ChromaticField::DragonsDen) && mv.named(&["Draco Meteor"]) {
        drops = 1;
        trace.push_field(field.chromatic_field);
    }

    let before = attacker.boosts[stat];
    let mut boost = if attacker.has_ability(&["Contrary"]) {
        trace.push_ability(Role::Attacker, attacker);
        (before + drops).min(6)
    } else {
        (before - drops * simple).max(-6)
    };
    if simple == 2 {
        trace.push_ability(Role::Attacker, attacker);
    }
    if attacker.has_item(&["White Herb"]) && before < 0 && !used.attacker {
        boost += drops * simple;
        trace.push_item(Role::Attacker, attacker);
        used.attacker = true;
    }

    attacker.boosts[stat] = boost;
    refresh(gen, attacker, stat);
}
