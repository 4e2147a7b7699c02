//! Crests.
//!
//! A crest is a held item bound to one species. Its holder is recognised by
//! the forme suffix in its name ("Luxray-Crest", "Vespiquen-Crest-Offense"),
//! so every check here keys on the name rather than the item slot. The
//! modifier-chain crests live with their chains; this module holds the
//! adjustments applied directly to stats, types and effectiveness.

use super::context::HitContext;
use super::fixed::level_or_constant;
use super::formula::{get_modified_stat, poke_round};
use super::generations::Generation;
use super::prepare::{intimidation_blocked, shift};
use super::trace::{ModifierTrace, Role, TraceEvent};
use crate::entities::Pokemon;
use crate::field::{ChromaticField, Field};
use crate::moves::{Move, MoveFlags};
use crate::stats::StatId;
use crate::types::Type;

/// Ability given to the weaker contact follow-up of the Typhlosion Crest.
pub const TYPHLOSION_CHILD: &str = "Parental Bond (Typhlosion)";

const ORICORIO: [&str; 4] = ["Oricorio-Crest-Baile", "Oricorio-Crest-Pa'u", "Oricorio-Crest-Pom-Pom", "Oricorio-Crest-Sensu"];

const SIMIANS: [&str; 3] = ["Simipour-Crest", "Simisage-Crest", "Simisear-Crest"];

/// Moves that already hit several times, left alone by the Cinccino Crest.
const CINCCINO_EXEMPT: [&str; 5] = ["Tail Slap", "Bullet Seed", "Triple Axel", "Double Slap", "Rock Blast"];

/// The "noses" a Probopass Crest fires after each single-hit attack.
pub const PROBOPASS_NOSES: [(&str, Type); 3] =
    [("Electric Nose", Type::Electric), ("Rock Nose", Type::Rock), ("Steel Nose", Type::Steel)];

fn scaled(value: u32, numerator: u32, denominator: u32) -> u32 {
    poke_round(value as f64 * numerator as f64 / denominator as f64) as u32
}

// ============================================================================
// Entry
// ============================================================================

/// Thievul Crest: steal a Special Attack stage from the target on entry.
pub fn check_entry(gen: Generation, source: &mut Pokemon, target: &mut Pokemon, field: &Field) {
    if !source.named(&["Thievul-Crest"]) || intimidation_blocked(gen, target, field) {
        return;
    }
    if target.has_ability(&["Contrary", "Competitive"]) {
        shift(target, StatId::Spa, 1);
    } else if target.has_ability(&["Simple"]) {
        shift(target, StatId::Spa, -2);
    } else if target.has_ability(&["Defiant"])
        || (target.has_ability(&["Steadfast"]) && field.is_field(ChromaticField::RingArena))
    {
        shift(target, StatId::Spa, -1);
        shift(target, StatId::Atk, 2);
    } else {
        shift(target, StatId::Spa, -1);
    }
    let stolen = if source.has_ability(&["Simple"]) { 2 } else { 1 };
    shift(source, StatId::Spa, stolen);
}

// ============================================================================
// Move resolution
// ============================================================================

/// Ariados and Samurott crests that turn a hit into a critical one.
pub fn forces_crit(attacker: &Pokemon, defender: &Pokemon, mv: &Move) -> bool {
    (attacker.named(&["Ariados-Crest"]) && (defender.is_statused() || defender.boosts.spe < 0))
        || (attacker.named(&["Samurott-Crest"]) && mv.has_flag(MoveFlags::SLICING))
}

/// Normal-type conversions. Returns the new type and whether it carries the
/// -ate power boost.
pub fn ate_type(attacker: &Pokemon) -> Option<(Type, bool)> {
    if attacker.name_contains("Sawsbuck-Crest-") {
        return attacker.types.first().map(|&t| (t, true));
    }
    let converted = match attacker.name.as_str() {
        "Simipour-Crest" => Type::Grass,
        "Simisage-Crest" => Type::Fire,
        "Simisear-Crest" => Type::Water,
        _ => return None,
    };
    Some((converted, false))
}

/// Whether an -ate style boost survives between hits of a multi-hit move.
pub fn keeps_ate_boost(attacker: &Pokemon) -> bool {
    attacker.named(&["Luxray-Crest"]) || attacker.name_contains("Sawsbuck-Crest-")
}

/// Multi-Attack follows a Silvally Crest forme without its Memory.
pub fn silvally_type(attacker: &Pokemon) -> Option<Type> {
    attacker.name.strip_prefix("Silvally-Crest-").and_then(|suffix| suffix.parse().ok())
}

/// Cinccino and Luvdisc rewrite the power the move formula produced.
pub fn adjust_base_power(attacker: &Pokemon, mv: &Move, bp: f64, trace: &mut ModifierTrace) -> f64 {
    let mut bp = bp;
    if attacker.named(&["Cinccino-Crest"]) && level_or_constant(attacker, mv).is_none() && !mv.named(&CINCCINO_EXEMPT) {
        bp *= 0.35;
        trace.push(TraceEvent::BasePower(poke_round(bp * 10.0) / 10.0));
    }
    if attacker.named(&["Luvdisc-Crest"]) && bp != 0.0 {
        bp = 250.0;
    }
    bp
}

/// Chart effectiveness after the crest resistances and immunities.
pub fn adjust_effectiveness(defender: &Pokemon, mv: &Move, effectiveness: f64) -> f64 {
    let resists = |types: &[Type]| types.contains(&mv.move_type);
    let mut effectiveness = effectiveness;
    match defender.name.as_str() {
        "Druddigon-Crest" if resists(&[Type::Fire]) => effectiveness = 0.0,
        "Glaceon-Crest" if resists(&[Type::Fighting, Type::Rock]) => effectiveness = effectiveness.min(0.5),
        "Leafeon-Crest" if resists(&[Type::Fire, Type::Flying]) => effectiveness = effectiveness.min(0.5),
        "Luxray-Crest" if resists(&[Type::Dark, Type::Ghost]) => effectiveness *= 0.5,
        "Samurott-Crest" if resists(&[Type::Dark, Type::Bug, Type::Rock]) => effectiveness *= 0.5,
        "Simipour-Crest" if resists(&[Type::Grass, Type::Water, Type::Ground, Type::Electric]) => effectiveness *= 0.5,
        "Simisage-Crest" if resists(&[Type::Grass, Type::Fire, Type::Bug, Type::Ice, Type::Steel, Type::Fairy]) => {
            effectiveness *= 0.5
        }
        "Simisear-Crest" if resists(&[Type::Fire, Type::Water, Type::Ice, Type::Steel]) => effectiveness *= 0.5,
        "Skuntank-Crest" if resists(&[Type::Ground]) => effectiveness = 0.0,
        "Whiscash-Crest" if resists(&[Type::Grass]) => effectiveness = 0.0,
        _ => {}
    }
    effectiveness
}

/// Whether the Torterra Crest flips the chart; it cancels the Inverse field.
pub fn inverts_chart(defender: &Pokemon, field: &Field) -> bool {
    defender.named(&["Torterra-Crest"]) != field.is_field(ChromaticField::Inverse)
}

/// Extra STAB types a crest grants.
pub fn grants_stab(attacker: &Pokemon, mv: &Move) -> bool {
    let stab_type = match attacker.name.as_str() {
        "Empoleon-Crest" => Type::Ice,
        "Luxray-Crest" => Type::Dark,
        "Probopass-Crest" | "Electric Nose" => Type::Electric,
        "Samurott-Crest" => Type::Fighting,
        "Simipour-Crest" => Type::Grass,
        "Simisage-Crest" => Type::Fire,
        "Simisear-Crest" => Type::Water,
        _ => return false,
    };
    mv.has_type(stab_type)
}

// ============================================================================
// Stats
// ============================================================================

/// A tenth of the Cryogonal Crest holder's boosted Special Defense.
pub fn cryogonal_bonus(pokemon: &Pokemon) -> u32 {
    if pokemon.named(&["Cryogonal-Crest"]) {
        pokemon.stats.spd * 6 / 5 / 10
    } else {
        0
    }
}

/// Stat a crested attacker hits with in place of its usual one.
pub fn attack_stat(attacker: &Pokemon, mv: &Move) -> Option<StatId> {
    let special = mv.is_special();
    match attacker.name.as_str() {
        "Claydol-Crest" if special => Some(StatId::Def),
        "Dedenne-Crest" => Some(StatId::Spe),
        "Infernape-Crest" => Some(if special { StatId::Spd } else { StatId::Def }),
        "Reuniclus-Crest-Fighting" => Some(if special { StatId::Atk } else { StatId::Spa }),
        "Typhlosion-Crest" if mv.is_physical() => Some(StatId::Spa),
        _ => None,
    }
}

/// Claydol and Dedenne keep the stages of the stat they replace.
pub fn borrowed_boost(attacker: &Pokemon, mv: &Move) -> Option<StatId> {
    match attacker.name.as_str() {
        "Claydol-Crest" if mv.is_special() => Some(StatId::Spa),
        "Dedenne-Crest" => Some(if mv.is_special() { StatId::Spa } else { StatId::Atk }),
        _ => None,
    }
}

/// Claydol or Dedenne attack: the replacement stat under the borrowed stages.
pub fn borrowed_attack(ctx: &HitContext<'_>, stat: StatId, boost_stat: StatId, trace: &mut ModifierTrace) -> u32 {
    let attacker = ctx.attacker;
    let stage = attacker.boosts[boost_stat];
    if stage != 0 {
        trace.push(TraceEvent::Boost { role: Role::Attacker, stat: boost_stat, stage });
    }
    get_modified_stat(attacker.raw_stats[stat], stage, ctx.gen_num())
}

/// Attack increases applied after Hustle, outside the chain.
pub fn boost_attack(ctx: &HitContext<'_>, attack: u32, trace: &mut ModifierTrace) -> u32 {
    let (attacker, mv) = (ctx.attacker, ctx.mv);
    let (physical, special) = (mv.is_physical(), mv.is_special());
    let mut attack = attack;

    if attacker.named(&["Ampharos-Aevian-Crest"]) && mv.move_slot == 1 {
        attack = if attacker.has_type(mv.move_type) { scaled(attack, 6, 5) } else { scaled(attack, 3, 2) };
        trace.push(TraceEvent::MoveSlot(mv.move_slot));
    }
    if attacker.named(&["Cofagrigus-Crest"]) && special {
        attack = scaled(attack, 5, 4);
    }
    if attacker.named(&["Crabominable-Crest"]) && mv.named(&["Body Press"]) {
        attack = scaled(attack, 6, 5);
    }
    attack += cryogonal_bonus(attacker);
    if attacker.named(&["Dusknoir-Crest"]) && physical {
        attack = scaled(attack, 5, 4);
    }
    if attacker.named(&["Hypno-Crest"]) && special {
        attack = scaled(attack, 3, 2);
    }
    if attacker.named(&["Magcargo-Crest"]) && special {
        attack = scaled(attack, 13, 10);
    }
    if attacker.named(&ORICORIO) && special {
        attack = scaled(attack, 5, 4);
    }
    if attacker.named(&["Relicanth-Crest"]) {
        let turns = attacker.relicanth_turns;
        attack = scaled(attack, 125 + 10 * turns as u32, 100);
        if turns > 0 {
            trace.push(TraceEvent::RelicanthTurns { role: Role::Attacker, turns });
        }
    }
    if attacker.named(&SIMIANS) || attacker.named(&["Skuntank-Crest"]) {
        attack = scaled(attack, 6, 5);
    }
    if attacker.named(&["Spiritomb-Crest"]) && attacker.foes_fainted > 0 {
        attack = scaled(attack, 5 + attacker.foes_fainted as u32, 5);
        trace.push(TraceEvent::FoesFainted(attacker.foes_fainted));
    }
    if attacker.named(&["Stantler-Crest", "Wyrdeer-Crest"]) && physical {
        attack = scaled(attack, 3, 2);
    }
    if attacker.named(&["Vespiquen-Crest-Offense"]) {
        attack = scaled(attack, 3, 2);
    }
    if attacker.named(&["Whiscash-Crest"]) {
        attack = scaled(attack, 6, 5);
    }
    attack
}

/// Stat a crested defender takes the hit on in place of its usual one.
pub fn defense_stat(defender: &Pokemon, mv: &Move, physical: bool) -> Option<StatId> {
    match defender.name.as_str() {
        "Infernape-Crest" => Some(if mv.is_special() { StatId::Spa } else { StatId::Atk }),
        "Magcargo-Crest" if physical => Some(StatId::Spe),
        _ => None,
    }
}

/// Defense increases applied after the weather boosts, outside the chain.
pub fn boost_defense(ctx: &HitContext<'_>, defense: u32, trace: &mut ModifierTrace) -> u32 {
    let (defender, mv) = (ctx.defender, ctx.mv);
    let mut defense = defense;

    if defender.named(&["Cofagrigus-Crest"]) && mv.is_special() {
        defense = scaled(defense, 5, 4);
    }
    if defender.named(&["Crabominable-Crest", "Meganium-Crest"]) {
        defense = scaled(defense, 6, 5);
    }
    if defender.named(&["Noctowl-Crest"]) && mv.is_physical() {
        defense = scaled(defense, 6, 5);
    }
    if defender.named(&["Phione-Crest"]) {
        defense = scaled(defense, 3, 2);
    }
    if defender.named(&["Relicanth-Crest"]) && mv.is_special() {
        let turns = defender.relicanth_turns;
        defense = scaled(defense, 125 + 10 * turns as u32, 100);
        if turns > 0 {
            trace.push(TraceEvent::RelicanthTurns { role: Role::Defender, turns });
        }
    }
    if defender.named(&["Vespiquen-Crest-Defense"]) {
        defense = scaled(defense, 3, 2);
    }
    defense
}

/// Cryogonal Crest defense, applied once the chain is known.
pub fn cryogonal_defense(defender: &Pokemon, mv: &Move, defense: u32) -> u32 {
    if !defender.named(&["Cryogonal-Crest"]) {
        defense
    } else if mv.is_special() {
        scaled(defense, 6, 5)
    } else {
        defense + cryogonal_bonus(defender)
    }
}

/// Speed modifiers a crest adds to the speed chain.
pub fn speed_mods(pokemon: &Pokemon, mods: &mut Vec<u16>) {
    if pokemon.named(&["Ariados-Crest", "Seviper-Crest"]) {
        mods.push(6144);
    }
    if pokemon.named(&ORICORIO) {
        mods.push(5120);
    }
}

// ============================================================================
// Follow-up strikes
// ============================================================================

/// A second strike a crest adds to a single-hit move.
#[derive(Clone, Debug, PartialEq)]
pub enum FollowUp {
    /// Three 20 BP special noses, one per type
    Noses,
    /// Swalot Crest: Belch casts Spit Up
    SpitUp,
    /// Typhlosion Crest: a contact move lands again at reduced power
    Typhlosion,
}

/// Which follow-up strike, if any, the attacker's crest adds.
pub fn follow_up(attacker: &Pokemon, mv: &Move, field: &Field) -> Option<FollowUp> {
    let spread = field.is_doubles() && mv.is_spread();
    if mv.hits != 1 {
        return None;
    }
    if attacker.named(&["Probopass-Crest"]) {
        Some(FollowUp::Noses)
    } else if attacker.named(&["Swalot-Crest"]) && mv.named(&["Belch"]) && mv.stockpiles > 0 && !spread {
        Some(FollowUp::SpitUp)
    } else if attacker.named(&["Typhlosion-Crest"])
        && !attacker.has_ability(&[TYPHLOSION_CHILD])
        && mv.has_flag(MoveFlags::CONTACT)
        && level_or_constant(attacker, mv).is_none()
        && !spread
    {
        Some(FollowUp::Typhlosion)
    } else {
        None
    }
}
