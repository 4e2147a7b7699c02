//! Final modifier chain, applied to every roll after type effectiveness.

use super::{
    attacker_ability, attacker_item, defender_ability, defender_item, field_event, push_with, run, weather_event,
    ChainRule, Step,
};
use crate::damage::context::HitContext;
use crate::damage::effectiveness::entry_hazard_free;
use crate::damage::formula::poke_round;
use crate::damage::modifier::{Chain, Modifier};
use crate::damage::trace::{Role, TraceEvent};
use crate::field::{ChromaticField, Weather};
use crate::items::berry_resist_type;
use crate::moves::MoveFlags;
use crate::types::{type_chart, Type};

fn screen_modifier(ctx: &HitContext<'_>) -> Modifier {
    if ctx.field.is_doubles() {
        Modifier::SCREENS_DOUBLES
    } else {
        Modifier::HALF
    }
}

// ============================================================================
// Screens
// ============================================================================

fn reflect(ctx: &HitContext<'_>, chain: &mut Chain) -> bool {
    let side = &ctx.field.defender_side;
    let applies = side.is_reflect && ctx.mv.is_physical() && !ctx.is_crit && !side.is_aurora_veil;
    if applies {
        chain.push(screen_modifier(ctx), TraceEvent::SideCondition { role: Role::Defender, name: "Reflect" });
    }
    applies
}

fn light_screen(ctx: &HitContext<'_>, chain: &mut Chain) -> bool {
    let side = &ctx.field.defender_side;
    let applies = side.is_light_screen && ctx.mv.is_special() && !ctx.is_crit && !side.is_aurora_veil;
    if applies {
        chain.push(screen_modifier(ctx), TraceEvent::SideCondition { role: Role::Defender, name: "Light Screen" });
    }
    applies
}

fn aurora_veil(ctx: &HitContext<'_>, chain: &mut Chain) -> bool {
    let applies = ctx.field.defender_side.is_aurora_veil && !ctx.is_crit;
    if applies {
        chain.push(screen_modifier(ctx), TraceEvent::SideCondition { role: Role::Defender, name: "Aurora Veil" });
    }
    applies
}

fn arenite_wall(ctx: &HitContext<'_>, chain: &mut Chain) -> bool {
    let applies = ctx.field.defender_side.is_arenite_wall && ctx.effectiveness > 1.0;
    if applies {
        chain.push(Modifier::HALF, TraceEvent::SideCondition { role: Role::Defender, name: "Arenite Wall" });
    }
    applies
}

// ============================================================================
// Attacker abilities (exclusive)
// ============================================================================

fn neuroforce(ctx: &HitContext<'_>, chain: &mut Chain) -> bool {
    let applies = ctx.attacker.has_ability(&["Neuroforce"]) && ctx.effectiveness > 1.0;
    if applies {
        push_with(chain, 5120u16, [attacker_ability(ctx)]);
    }
    applies
}

fn sniper(ctx: &HitContext<'_>, chain: &mut Chain) -> bool {
    let applies = ctx.attacker.has_ability(&["Sniper"]) && ctx.is_crit;
    if applies {
        push_with(chain, Modifier::ONE_POINT_FIVE, [attacker_ability(ctx)]);
    }
    applies
}

fn tinted_lens(ctx: &HitContext<'_>, chain: &mut Chain) -> bool {
    let attacker = ctx.attacker;
    let resisted = ctx.effectiveness < 1.0;
    // Glaceon gains Tinted Lens on Rainbow
    let applies = resisted
        && (attacker.has_ability(&["Tinted Lens"])
            || (attacker.name_contains("Glaceon") && ctx.is_field(ChromaticField::Rainbow)));
    if applies {
        push_with(chain, Modifier::DOUBLE, [attacker_ability(ctx)]);
    }
    applies
}

fn starstruck(ctx: &HitContext<'_>, chain: &mut Chain) -> bool {
    let applies = ctx.attacker.is_starstruck && ctx.effectiveness < 1.0;
    if applies {
        push_with(chain, Modifier::DOUBLE, [Some(TraceEvent::Condition("Starstruck")), field_event(ctx)]);
    }
    applies
}

fn anti_dynamax(ctx: &HitContext<'_>, chain: &mut Chain) -> bool {
    let applies =
        ctx.defender.is_dynamaxed && ctx.mv.named(&["Dynamax Cannon", "Behemoth Blade", "Behemoth Bash"]);
    if applies {
        chain.push_mod(Modifier::DOUBLE);
    }
    applies
}

// ============================================================================
// Defender abilities
// ============================================================================

/// HP the defender keeps after hazards on entry, as Dragon's Den computes it.
fn hp_after_hazards(ctx: &HitContext<'_>) -> f64 {
    let (defender, side) = (ctx.defender, &ctx.field.defender_side);
    let max = defender.max_hp() as f64;
    let mut hp = defender.cur_hp() as f64;
    if defender.has_item(&["Heavy-Duty Boots"]) {
        return hp;
    }
    if side.spikes > 0 && !defender.has_type(Type::Flying) {
        hp -= max / (10.0 - side.spikes as f64 * 2.0);
    }
    if side.is_sr {
        let mut effectiveness: f64 =
            defender.types.iter().map(|&t| type_chart(Type::Rock, t).multiplier()).product();
        if defender.named(&["Torterra-Crest"]) {
            effectiveness = 1.0 / effectiveness;
        }
        hp -= (effectiveness * max / 8.0).floor();
    }
    hp
}

fn multiscale(ctx: &HitContext<'_>, chain: &mut Chain) -> bool {
    let defender = ctx.defender;
    let holder = defender.has_ability(&["Multiscale", "Shadow Shield"])
        || (defender.has_ability(&["Cute Charm"]) && ctx.is_field(ChromaticField::BlessedSanctum));
    if !holder {
        return false;
    }
    let untouched = defender.cur_hp() == defender.max_hp()
        && ctx.hit_count() == 0
        && entry_hazard_free(defender, ctx.field)
        && !ctx.is_child();
    if untouched {
        push_with(chain, Modifier::HALF, [defender_ability(ctx)]);
        return true;
    }
    // Dragon's Den keeps Multiscale up until 75% HP
    if defender.has_ability(&["Multiscale"]) && ctx.is_field(ChromaticField::DragonsDen) {
        let threshold = poke_round(defender.max_hp() as f64 * 3.0 / 4.0);
        if hp_after_hazards(ctx) >= threshold {
            push_with(chain, Modifier::HALF, [defender_ability(ctx), field_event(ctx)]);
            return true;
        }
    }
    false
}

fn fluffy_contact(ctx: &HitContext<'_>, chain: &mut Chain) -> bool {
    let applies = ctx.defender.has_ability(&["Fluffy"])
        && ctx.mv.has_flag(MoveFlags::CONTACT)
        && !ctx.attacker.has_ability(&["Long Reach"]);
    if applies {
        push_with(chain, Modifier::HALF, [defender_ability(ctx)]);
    }
    applies
}

fn punk_rock_ice_scales(ctx: &HitContext<'_>, chain: &mut Chain) -> bool {
    let (defender, mv) = (ctx.defender, ctx.mv);
    let applies = (defender.has_ability(&["Punk Rock"]) && mv.has_flag(MoveFlags::SOUND))
        || (defender.has_ability(&["Ice Scales"]) && mv.is_special());
    if applies {
        push_with(chain, Modifier::HALF, [defender_ability(ctx)]);
    }
    applies
}

fn filter(ctx: &HitContext<'_>, chain: &mut Chain) -> bool {
    let applies = ctx.defender.has_ability(&["Solid Rock", "Filter", "Prism Armor"]) && ctx.effectiveness > 1.0;
    if applies {
        push_with(chain, Modifier::THREE_QUARTERS, [defender_ability(ctx)]);
    }
    applies
}

fn ampharos_crest(ctx: &HitContext<'_>, chain: &mut Chain) -> bool {
    let applies = ctx.defender.named(&["Ampharos-Aevian-Crest"]) && ctx.effectiveness > 1.0;
    if applies {
        chain.push_mod(2867u16);
    }
    applies
}

fn friend_guard(ctx: &HitContext<'_>, chain: &mut Chain) -> bool {
    let applies = ctx.field.defender_side.is_friend_guard;
    if applies {
        chain.push(Modifier::THREE_QUARTERS, TraceEvent::SideCondition { role: Role::Defender, name: "Friend Guard" });
    }
    applies
}

fn fluffy_fire(ctx: &HitContext<'_>, chain: &mut Chain) -> bool {
    let applies = ctx.defender.has_ability(&["Fluffy"]) && ctx.mv.has_type(Type::Fire);
    if applies {
        push_with(chain, Modifier::DOUBLE, [defender_ability(ctx)]);
    }
    applies
}

// ============================================================================
// Items
// ============================================================================

fn expert_belt(ctx: &HitContext<'_>, chain: &mut Chain) -> bool {
    let applies = ctx.attacker.has_item(&["Expert Belt"]) && ctx.effectiveness > 1.0 && !ctx.mv.is_z;
    if applies {
        push_with(chain, Modifier::ONE_POINT_TWO, [attacker_item(ctx)]);
    }
    applies
}

fn life_orb(ctx: &HitContext<'_>, chain: &mut Chain) -> bool {
    let applies = ctx.attacker.has_item(&["Life Orb"]);
    if applies {
        push_with(chain, Modifier::LIFE_ORB, [attacker_item(ctx)]);
    }
    applies
}

fn metronome(ctx: &HitContext<'_>, chain: &mut Chain) -> bool {
    let used = ctx.mv.times_used_with_metronome;
    if !ctx.attacker.has_item(&["Metronome"]) || used == 0 {
        return false;
    }
    let modifier = if used <= 4 { 4096 + used as u16 * 819 } else { 8192 };
    push_with(chain, modifier, [attacker_item(ctx)]);
    true
}

fn resist_berry(ctx: &HitContext<'_>, chain: &mut Chain) -> bool {
    let (attacker, defender, mv) = (ctx.attacker, ctx.defender, ctx.mv);
    let Some(resisted) = berry_resist_type(defender.item_name()) else {
        return false;
    };
    let applies = mv.has_type(resisted)
        && (ctx.effectiveness > 1.0 || mv.has_type(Type::Normal))
        && ctx.hit_count() == 0
        && !attacker.has_ability(&["Unnerve", "As One (Glastrier)", "As One (Spectrier)"]);
    if applies {
        let modifier = if defender.has_ability(&["Ripen"]) { 1024 } else { Modifier::HALF.0 };
        push_with(chain, modifier, [defender_item(ctx)]);
    }
    applies
}

fn desert_sand_veil(ctx: &HitContext<'_>, chain: &mut Chain) -> bool {
    let applies = ctx.is_field(ChromaticField::Desert)
        && ctx.defender.has_ability(&["Sand Veil"])
        && ctx.field.has_weather(&[Weather::Sand]);
    if applies {
        push_with(chain, Modifier::THREE_QUARTERS, [defender_ability(ctx), weather_event(ctx), field_event(ctx)]);
    }
    applies
}

const SCREENS: &[ChainRule] = &[reflect, light_screen];
const ATTACKER_ABILITIES: &[ChainRule] = &[neuroforce, sniper, tinted_lens, starstruck];
const DAMPENING_ABILITIES: &[ChainRule] = &[fluffy_contact, punk_rock_ice_scales];
const ATTACKER_ITEMS: &[ChainRule] = &[expert_belt, life_orb, metronome];

static FINAL_STEPS: [Step; 14] = [
    Step::FirstOf(SCREENS),
    Step::Each(aurora_veil),
    Step::Each(arenite_wall),
    Step::FirstOf(ATTACKER_ABILITIES),
    Step::Each(anti_dynamax),
    Step::Each(multiscale),
    Step::FirstOf(DAMPENING_ABILITIES),
    Step::Each(filter),
    Step::Each(ampharos_crest),
    Step::Each(friend_guard),
    Step::Each(fluffy_fire),
    Step::FirstOf(ATTACKER_ITEMS),
    Step::Each(resist_berry),
    Step::Each(desert_sand_veil),
];

/// Collect the final modifiers; `ctx.effectiveness` must already be resolved.
pub fn final_mods_chain(ctx: &HitContext<'_>) -> Chain {
    let chain = run(&FINAL_STEPS, ctx);
    log::debug!("final mods for {}: {:?}", ctx.mv.name, chain.mods());
    chain
}
