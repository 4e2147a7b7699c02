//! The complete calculation for one attacker, defender, move and field.
//!
//! # Architecture
//!
//! 1. **Entry pass** - [`apply_entry_effects`] on private copies of the inputs
//! 2. **Early exits** - status moves, Protect, Pain Split
//! 3. **Suppression** - Mold Breaker, Neutralizing Gas, Ability Shield
//! 4. **Move resolution** - overrides, type, effectiveness, fixed damage
//! 5. **First hit** - base power, attack, defense, base damage, final mods
//! 6. **Rolls** - 16 rolls, then every later hit or use summed per roll
//!
//! The caller's values are never mutated. A Parental Bond child strike, or
//! the follow-up strike of a crest, recurses into the same resolution on its
//! own copies.

use super::base_power::{apply_move_overrides, calculate_base_power};
use super::chains::{calculate_attack, calculate_defense, final_mods_chain, hits_physical, AttackStat};
use super::context::{HitContext, PARENTAL_BOND_CHILD};
use super::crest::{self, FollowUp, TYPHLOSION_CHILD};
use super::effectiveness::resolve_effectiveness;
use super::fixed::{get_fixed_damage, pain_split};
use super::formula::{get_base_damage, get_final_damage, get_modified_stat, of32, of32_f, poke_round};
use super::generations::{GenMechanics, Generation};
use super::move_type::resolve_move_type;
use super::multihit::{check_multihit_boost, UsedItems};
use super::prepare::{apply_entry_effects, ConsumedSeed};
use super::stab::{get_stab_mod, get_stellar_stab_mod};
use super::stats::get_shell_side_arm_category;
use super::trace::{ModifierTrace, Role, TraceEvent};
use super::{Damage, DamageResult};
use crate::entities::{Pokemon, Status};
use crate::field::{ChromaticField, Field, Weather};
use crate::moves::{Move, MoveCategory, MoveFlags};
use crate::stats::StatId;
use crate::types::Type;

/// Defender abilities that Mold Breaker and its kin ignore.
const IGNORABLE_ABILITIES: &[&str] = &[
    "Armor Tail", "Aroma Veil", "Aura Break", "Battle Armor",
    "Big Pecks", "Bulletproof", "Clear Body", "Contrary",
    "Cute Charm", "Damp", "Dazzling", "Disguise", "Dry Skin",
    "Earth Eater", "Filter", "Flash Fire", "Flower Gift",
    "Flower Veil", "Fluffy", "Friend Guard", "Fur Coat",
    "Good as Gold", "Grass Pelt", "Guard Dog", "Heatproof",
    "Heavy Metal", "Hyper Cutter", "Ice Face", "Ice Scales",
    "Illuminate", "Immunity", "Inner Focus", "Insomnia",
    "Keen Eye", "Leaf Guard", "Levitate", "Light Metal",
    "Lightning Rod", "Limber", "Magic Bounce", "Magma Armor",
    "Marvel Scale", "Mind's Eye", "Mirror Armor", "Motor Drive",
    "Multiscale", "Oblivious", "Overcoat", "Own Tempo",
    "Pastel Veil", "Punk Rock", "Purifying Salt", "Queenly Majesty",
    "Sand Veil", "Sap Sipper", "Shell Armor", "Shield Dust",
    "Simple", "Snow Cloak", "Solid Rock", "Soundproof",
    "Sticky Hold", "Storm Drain", "Sturdy", "Suction Cups",
    "Sweet Veil", "Tangled Feet", "Telepathy", "Tera Shell",
    "Thermal Exchange", "Thick Fat", "Unaware", "Vital Spirit",
    "Volt Absorb", "Water Absorb", "Water Bubble", "Water Veil",
    "Well-Baked Body", "White Smoke", "Wind Rider", "Wonder Guard",
    "Wonder Skin",
];

/// Moves that ignore the target's ability on their own.
const ABILITY_IGNORING_MOVES: &[&str] = &[
    "G-Max Drum Solo",
    "G-Max Fire Ball",
    "G-Max Hydrosnipe",
    "Light That Burns the Sky",
    "Menacing Moonraze Maelstrom",
    "Moongeist Beam",
    "Photon Geyser",
    "Searing Sunraze Smash",
    "Sunsteel Strike",
];

/// Abilities Neutralizing Gas cannot switch off.
const NEUTRALIZING_GAS_EXEMPT: &[&str] = &[
    "As One (Glastrier)", "As One (Spectrier)", "Battle Bond", "Comatose",
    "Disguise", "Gulp Missile", "Ice Face", "Multitype", "Neutralizing Gas",
    "Power Construct", "RKS System", "Schooling", "Shields Down",
    "Stance Change", "Tera Shift", "Zen Mode", "Zero to Hero",
];

/// -ate abilities whose boost survives between hits.
const ATE_ABILITIES: &[&str] = &["Aerilate", "Galvanize", "Pixilate", "Refrigerate", "Normalize"];

/// Calculate the damage `attacker` deals to `defender` with `mv` on `field`.
///
/// Never fails: moves that cannot deal damage return `Damage::Fixed(0)`
/// together with the trace explaining why.
pub fn calculate(gen: Generation, attacker: &Pokemon, defender: &Pokemon, mv: &Move, field: &Field) -> DamageResult {
    let mut attacker = attacker.clone();
    let mut defender = defender.clone();
    let mut field = field.clone();
    let entry = apply_entry_effects(gen, &mut attacker, &mut defender, mv, &mut field);
    resolve(gen, attacker, defender, mv.clone(), field, entry.defender_seed)
}

/// Numbers of one hit, ready for the rolls.
struct HitNumbers {
    base_damage: u32,
    final_mod: u32,
    attack_stat: AttackStat,
    defense_stat: StatId,
}

fn resolve(
    gen: Generation,
    mut attacker: Pokemon,
    mut defender: Pokemon,
    mut mv: Move,
    mut field: Field,
    seed: Option<ConsumedSeed>,
) -> DamageResult {
    let mut trace = ModifierTrace::new();
    let input_move = mv.clone();

    record_tera(&attacker, &defender, &mv, &mut trace);

    if mv.named(&["Photon Geyser", "Light That Burns the Sky"]) || (mv.named(&["Tera Blast"]) && attacker.tera_type.is_some())
    {
        mv.category = if attacker.stats.atk > attacker.stats.spa { MoveCategory::Physical } else { MoveCategory::Special };
    }

    if mv.category == MoveCategory::Status && !mv.named(&["Nature Power"]) {
        log::debug!("{} is a status move", mv.name);
        return DamageResult::early(Damage::zero(), attacker, defender, mv, field, trace);
    }

    // ========================================================================
    // Contact and Protect
    // ========================================================================

    if mv.has_flag(MoveFlags::PUNCH) && attacker.has_item(&["Punching Glove"]) {
        trace.push_item(Role::Attacker, &attacker);
        mv.flags.remove(MoveFlags::CONTACT);
    }
    if mv.named(&["Shell Side Arm"]) && get_shell_side_arm_category(&attacker, &defender) == MoveCategory::Physical {
        mv.flags.insert(MoveFlags::CONTACT);
    }

    let breaks_protect = mv.breaks_protect
        || mv.is_z
        || attacker.is_dynamaxed
        || (attacker.has_ability(&["Unseen Fist"]) && mv.has_flag(MoveFlags::CONTACT));
    if field.defender_side.is_protected && !breaks_protect {
        trace.push(TraceEvent::Condition("Protected"));
        return DamageResult::early(Damage::zero(), attacker, defender, mv, field, trace);
    }

    if mv.named(&["Pain Split"]) {
        let lost = pain_split(&attacker, &defender);
        return DamageResult::early(Damage::Fixed(lost), attacker, defender, mv, field, trace);
    }

    // ========================================================================
    // Ability suppression and critical hits
    // ========================================================================

    suppress_abilities(&mut attacker, &mut defender, &mv, &field, &mut trace);
    let is_crit = resolve_crit(&attacker, &defender, &mv, &field, &mut trace);

    // ========================================================================
    // Move resolution
    // ========================================================================

    apply_move_overrides(&attacker, &defender, &mut mv, &field, &mut trace);
    let has_ate_boost = resolve_move_type(&attacker, &defender, &mut mv, &mut field, &mut trace);
    let Some(effectiveness) = resolve_effectiveness(&attacker, &defender, &mv, &field, &mut trace) else {
        return DamageResult::early(Damage::zero(), attacker, defender, mv, field, trace);
    };

    if let Some(damage) = get_fixed_damage(&attacker, &defender, &mv, &field, &mut trace) {
        return DamageResult::early(damage, attacker, defender, mv, field, trace);
    }

    if mv.named(&["Spectral Thief"]) {
        steal_boosts(gen, &mut attacker, &mut defender);
    }
    if mv.hits > 1 {
        trace.push(TraceEvent::Hits(mv.hits));
    }

    // ========================================================================
    // First hit
    // ========================================================================

    let first = {
        let mut ctx = HitContext {
            is_crit,
            effectiveness: effectiveness.first,
            has_ate_boost,
            hits_physical: hits_physical(&attacker, &defender, &mv, &field),
            ..HitContext::new(gen, &attacker, &defender, &mv, &field)
        };
        compute_hit(&mut ctx, &mut trace)
    };
    let Some(first) = first else {
        return DamageResult::early(Damage::zero(), attacker, defender, mv, field, trace);
    };

    if let Some(seed) = seed.filter(|seed| seed.stat == first.defense_stat) {
        trace.push(ModifierTrace::item(Role::Defender, &seed.item));
    }

    let stab = get_stab_mod(&attacker, &mv, &field, &field.attacker_side, &mut trace);
    let mut stab = get_stellar_stab_mod(&attacker, &mv, &field, stab, 0, &mut trace);

    let burned = attacker.has_status(&[Status::Burn])
        && mv.is_physical()
        && !attacker.has_ability(&["Guts"])
        && !mv.named(&["Facade"]);
    if burned {
        trace.push(TraceEvent::Condition("Burned"));
    }

    // Z-Moves and Max Moves land through Protect at a quarter
    let protect = field.defender_side.is_protected
        && (attacker.is_dynamaxed || (mv.is_z && attacker.item_name().contains(" Z")));
    if protect {
        trace.push(TraceEvent::Condition("Protected"));
    }

    let parental_bond =
        attacker.has_ability(&["Parental Bond"]) && mv.hits == 1 && !(field.is_doubles() && mv.is_spread());
    let child = if parental_bond {
        let mut child = attacker.clone();
        child.ability = Some(PARENTAL_BOND_CHILD.to_string());
        let mut child_defender = defender.clone();
        let mut child_field = field.clone();
        check_multihit_boost(gen, &mut child, &mut child_defender, &mv, &mut child_field, &mut trace, UsedItems::default());
        let result = resolve(gen, child, child_defender, input_move, child_field, None);
        trace.push_ability(Role::Attacker, &attacker);
        Some(into_rolls(result.damage))
    } else {
        crest::follow_up(&attacker, &mv, &field)
            .map(|follow_up| follow_up_rolls(gen, follow_up, &attacker, &defender, &input_move, &field))
    };

    // ========================================================================
    // Rolls
    // ========================================================================

    let mut damage: Vec<u32> = (0..16)
        .map(|roll| get_final_damage(first.base_damage, roll, effectiveness.first, burned, stab, first.final_mod, protect))
        .collect();
    log::trace!("{} rolls: {:?}", mv.name, damage);

    if mv.times_used > 1 || mv.hits > 1 {
        let repeated = mv.times_used > 1;
        let uses = if repeated {
            trace.push(TraceEvent::Turns(mv.times_used));
            mv.times_used
        } else {
            mv.hits
        };

        let mut used = UsedItems::default();
        let mut has_ate_boost = has_ate_boost;
        let mut current_effectiveness = effectiveness.first;
        for times in 1..uses {
            // Stage changes between hits stay out of the final trace
            let mut scratch = trace.clone();
            let before = scratch.len();

            used = check_multihit_boost(gen, &mut attacker, &mut defender, &mv, &mut field, &mut scratch, used);
            has_ate_boost =
                has_ate_boost && (attacker.has_ability(ATE_ABILITIES) || crest::keeps_ate_boost(&attacker));
            if repeated {
                let natural = get_stab_mod(&attacker, &mv, &field, &field.attacker_side, &mut scratch);
                stab = get_stellar_stab_mod(&attacker, &mv, &field, natural, times, &mut scratch);
                current_effectiveness = effectiveness.later;
            }

            let next = {
                let mut ctx = HitContext {
                    is_crit,
                    effectiveness: current_effectiveness,
                    has_ate_boost,
                    hit: times + 1,
                    hits_physical: hits_physical(&attacker, &defender, &mv, &field),
                    ..HitContext::new(gen, &attacker, &defender, &mv, &field)
                };
                compute_hit(&mut ctx, &mut scratch)
            };
            match next {
                Some(next) => {
                    for (roll, amount) in damage.iter_mut().enumerate() {
                        *amount += get_final_damage(
                            next.base_damage,
                            roll,
                            current_effectiveness,
                            burned,
                            stab,
                            next.final_mod,
                            protect,
                        );
                    }
                }
                None => log::debug!("hit {} of {} has no base power", times + 1, mv.name),
            }

            let events = scratch.events()[before..].iter().filter(|e| !matches!(e, TraceEvent::Boost { .. }));
            trace.extend(events.cloned());
        }
        log::trace!("{} summed over {} uses: {:?}", mv.name, uses, damage);
    }

    let damage = match child {
        Some(child) => Damage::Pair(damage, child),
        None => Damage::Rolls(damage),
    };
    DamageResult {
        damage,
        trace,
        attacker,
        defender,
        mv,
        field,
        attack_stat: Some(first.attack_stat),
        defense_stat: Some(first.defense_stat),
    }
}

/// Base power, both stats, base damage and the final chain of one hit.
///
/// Returns `None` when the hit has no base power.
fn compute_hit(ctx: &mut HitContext<'_>, trace: &mut ModifierTrace) -> Option<HitNumbers> {
    let base_power = calculate_base_power(ctx, trace);
    if base_power == 0 {
        return None;
    }
    let (attack, attack_stat) = calculate_attack(ctx, trace);
    let (defense, defense_stat) = calculate_defense(ctx, trace);
    let base_damage = calculate_base_damage(ctx, base_power, attack, defense, trace);

    let chain = final_mods_chain(ctx);
    let final_mod = chain.compose(41, 131072);
    log::debug!("{} hit {}: base damage {}, final mod {}", ctx.mv.name, ctx.hit, base_damage, final_mod);
    trace.extend(chain.into_events());

    Some(HitNumbers { base_damage, final_mod, attack_stat, defense_stat })
}

fn scale(amount: u64, modifier: u64) -> u64 {
    poke_round(of32(amount * modifier) as f64 / 4096.0) as u64
}

/// Base damage with spread, Parental Bond, weather and crit applied.
fn calculate_base_damage(
    ctx: &HitContext<'_>,
    base_power: u32,
    attack: u32,
    defense: u32,
    trace: &mut ModifierTrace,
) -> u32 {
    let (attacker, defender, mv, field) = (ctx.attacker, ctx.defender, ctx.mv, ctx.field);
    let mut damage = get_base_damage(attacker.level, base_power, attack, defense) as u64;

    if field.is_doubles() && mv.is_spread() {
        damage = scale(damage, 3072);
    }
    if ctx.is_child() {
        damage = scale(damage, 1024);
    } else if attacker.has_ability(&[TYPHLOSION_CHILD]) {
        damage = scale(damage, 1229);
    }

    if field.has_weather(&[Weather::Sun]) && mv.named(&["Hydro Steam"]) && !attacker.has_item(&["Utility Umbrella"]) {
        damage = scale(damage, 6144);
        trace.push_weather(field.weather);
    } else if !defender.has_item(&["Utility Umbrella"]) {
        let sunny = field.has_weather(&[Weather::Sun, Weather::HarshSun]);
        let rainy = field.has_weather(&[Weather::Rain, Weather::HeavyRain]);
        if (sunny && mv.has_type(Type::Fire)) || (rainy && mv.has_type(Type::Water)) {
            let mut modifier = 6144;
            if rainy && field.is_field(ChromaticField::WatersSurface) {
                modifier = 6554;
                trace.push_field(field.chromatic_field);
            }
            damage = scale(damage, modifier);
            trace.push_weather(field.weather);
        } else if (field.has_weather(&[Weather::Sun]) && mv.has_type(Type::Water))
            || (field.has_weather(&[Weather::Rain]) && mv.has_type(Type::Fire))
        {
            damage = scale(damage, 2048);
            trace.push_weather(field.weather);
        }
    }

    if ctx.is_crit {
        damage = of32_f(damage as f64 * 1.5).floor() as u64;
        trace.push(TraceEvent::Condition("Critical Hit"));
    }
    damage as u32
}

fn record_tera(attacker: &Pokemon, defender: &Pokemon, mv: &Move, trace: &mut ModifierTrace) {
    if let Some(tera) = attacker.tera_type {
        if tera != Type::Stellar || mv.named(&["Tera Blast"]) || mv.is_stellar_first_use {
            trace.push(TraceEvent::Tera { role: Role::Attacker, tera });
        }
    }
    if let Some(tera) = defender.tera_type.filter(|&tera| tera != Type::Stellar) {
        trace.push(TraceEvent::Tera { role: Role::Defender, tera });
    }
}

/// Clear `pokemon`'s ability unless it holds an Ability Shield.
fn lose_ability(pokemon: &mut Pokemon, role: Role, trace: &mut ModifierTrace) {
    if pokemon.has_item(&["Ability Shield"]) {
        trace.push_item(role, pokemon);
    } else {
        pokemon.ability = None;
    }
}

fn suppress_abilities(
    attacker: &mut Pokemon,
    defender: &mut Pokemon,
    mv: &Move,
    field: &Field,
    trace: &mut ModifierTrace,
) {
    let attacker_ignores = attacker.has_ability(&["Mold Breaker", "Teravolt", "Turboblaze"]);
    let move_ignores = mv.named(ABILITY_IGNORING_MOVES)
        || (field.is_field(ChromaticField::Underwater) && mv.named(&["Wave Crash"]));
    if defender.has_ability(IGNORABLE_ABILITIES) && (attacker_ignores || move_ignores) {
        if attacker_ignores {
            trace.push_ability(Role::Attacker, attacker);
        }
        lose_ability(defender, Role::Defender, trace);
    }

    if attacker.has_ability(&["Neutralizing Gas"]) && !NEUTRALIZING_GAS_EXEMPT.contains(&defender.ability_name()) {
        trace.push_ability(Role::Attacker, attacker);
        lose_ability(defender, Role::Defender, trace);
    }
    if defender.has_ability(&["Neutralizing Gas"]) && !NEUTRALIZING_GAS_EXEMPT.contains(&attacker.ability_name()) {
        trace.push_ability(Role::Defender, defender);
        lose_ability(attacker, Role::Attacker, trace);
    }
}

fn resolve_crit(attacker: &Pokemon, defender: &Pokemon, mv: &Move, field: &Field, trace: &mut ModifierTrace) -> bool {
    // Battle Armor and Shell Armor only cancel a requested crit
    let requested = mv.is_crit || crest::forces_crit(attacker, defender, mv);
    if !defender.has_ability(&["Battle Armor", "Shell Armor"]) && requested && mv.times_used == 1 {
        return true;
    }
    if attacker.has_ability(&["Merciless"]) {
        if defender.has_status(&[Status::Poison, Status::Toxic]) {
            trace.push_ability(Role::Attacker, attacker);
            return true;
        }
        if field.is_field(ChromaticField::AcidicWasteland) {
            trace.push_ability(Role::Attacker, attacker);
            trace.push_field(field.chromatic_field);
            return true;
        }
    }
    if attacker.grit_stages >= 3 {
        trace.push(TraceEvent::GritStages(attacker.grit_stages));
        trace.push_field(field.chromatic_field);
        return true;
    }
    false
}

/// Spectral Thief: take every positive stage before hitting.
fn steal_boosts(gen: Generation, attacker: &mut Pokemon, defender: &mut Pokemon) {
    for stat in StatId::BOOSTABLE {
        let stolen = defender.boosts[stat];
        if stolen <= 0 {
            continue;
        }
        let delta = if attacker.has_ability(&["Contrary"]) { -stolen } else { stolen };
        attacker.boosts[stat] = (attacker.boosts[stat] + delta).clamp(-6, 6);
        attacker.stats[stat] = get_modified_stat(attacker.raw_stats[stat], attacker.boosts[stat], gen.num());
        defender.boosts[stat] = 0;
        defender.stats[stat] = defender.raw_stats[stat];
    }
}

/// Special move a crest casts after the main hit.
fn crest_move(base: &Move, name: &str, move_type: Type, bp: u32) -> Move {
    Move {
        name: name.to_string(),
        original_name: name.to_string(),
        bp,
        move_type,
        category: MoveCategory::Special,
        flags: MoveFlags::empty(),
        hits: 1,
        times_used: 1,
        priority: 0,
        is_z: false,
        is_max: false,
        is_crit: false,
        drain: None,
        recoil: None,
        ..base.clone()
    }
}

/// Rolls of the strike a crest adds after the main hit.
fn follow_up_rolls(
    gen: Generation,
    follow_up: FollowUp,
    attacker: &Pokemon,
    defender: &Pokemon,
    mv: &Move,
    field: &Field,
) -> Vec<u32> {
    let strike = |striker: Pokemon, strike_move: Move| {
        let mut striker = striker;
        let mut target = defender.clone();
        let mut strike_field = field.clone();
        let mut scratch = ModifierTrace::new();
        check_multihit_boost(gen, &mut striker, &mut target, mv, &mut strike_field, &mut scratch, UsedItems::default());
        into_rolls(resolve(gen, striker, target, strike_move, strike_field, None).damage)
    };

    match follow_up {
        FollowUp::Noses => {
            let mut total = vec![0; 16];
            for (name, nose_type) in crest::PROBOPASS_NOSES {
                let mut nose = attacker.clone();
                nose.name = name.to_string();
                let rolls = strike(nose, crest_move(mv, name, nose_type, 20));
                for (sum, roll) in total.iter_mut().zip(rolls) {
                    *sum += roll;
                }
            }
            log::debug!("{} noses: {:?}", attacker.name, total);
            total
        }
        FollowUp::SpitUp => strike(attacker.clone(), crest_move(mv, "Spit Up", Type::Normal, 0)),
        FollowUp::Typhlosion => {
            let mut child = attacker.clone();
            child.ability = Some(TYPHLOSION_CHILD.to_string());
            strike(child, mv.clone())
        }
    }
}

/// A child strike's damage as 16 rolls.
fn into_rolls(damage: Damage) -> Vec<u32> {
    match damage {
        Damage::Rolls(rolls) => rolls,
        other => vec![other.range().1; 16],
    }
}
