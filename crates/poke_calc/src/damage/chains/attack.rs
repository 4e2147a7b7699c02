//! Attack stat resolution and the attack modifier chain.

use super::{
    attacker_ability, attacker_item, defender_ability, field_boost, field_event, push_with, run, weather_event,
    ChainRule, Step,
};
use crate::damage::context::HitContext;
use crate::damage::crest;
use crate::damage::formula::{get_modified_stat, of16, poke_round};
use crate::damage::generations::GenMechanics;
use crate::damage::modifier::{Chain, Modifier};
use crate::damage::stats::{get_qp_boosted_stat, get_shell_side_arm_category, is_qp_active};
use crate::damage::trace::{ModifierTrace, Role, TraceEvent};
use crate::field::{ChromaticField, Terrain, Weather};
use crate::moves::{MoveCategory, MoveFlags};
use crate::stats::StatId;
use crate::types::Type;

/// Stat the attack is computed from, and whose stat it is.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AttackStat {
    pub stat: StatId,
    /// Foul Play reads the target's stat
    pub from_defender: bool,
}

impl AttackStat {
    pub fn select(ctx: &HitContext<'_>) -> Self {
        let mv = ctx.mv;
        let stat = if mv.named(&["Shell Side Arm"])
            && get_shell_side_arm_category(ctx.attacker, ctx.defender) == MoveCategory::Physical
        {
            StatId::Atk
        } else if mv.named(&["Body Press"]) {
            StatId::Def
        } else if let Some(stat) = crest::attack_stat(ctx.attacker, mv) {
            stat
        } else if mv.is_special() {
            StatId::Spa
        } else {
            StatId::Atk
        };
        Self { stat, from_defender: mv.named(&["Foul Play"]) }
    }
}

/// Final attack stat for one hit.
pub fn calculate_attack(ctx: &HitContext<'_>, trace: &mut ModifierTrace) -> (u32, AttackStat) {
    let (attacker, defender) = (ctx.attacker, ctx.defender);
    let selected = AttackStat::select(ctx);
    let source = if selected.from_defender { defender } else { attacker };
    let raw = source.raw_stats[selected.stat];
    let boost = source.boosts[selected.stat];

    let mut attack = if let Some(borrowed) = crest::borrowed_boost(attacker, ctx.mv) {
        crest::borrowed_attack(ctx, selected.stat, borrowed, trace)
    } else if boost == 0 || (ctx.is_crit && boost < 0) {
        raw
    } else if defender.has_ability(&["Unaware"]) || (defender.named(&["Sylbeon"]) && ctx.is_field(ChromaticField::Rainbow))
    {
        trace.push_ability(Role::Defender, defender);
        raw
    } else {
        trace.push(TraceEvent::Boost { role: Role::Attacker, stat: selected.stat, stage: boost });
        get_modified_stat(raw, boost, ctx.gen_num())
    };

    // Hustle applies outside the chain
    if attacker.has_ability(&["Hustle"]) && ctx.mv.is_physical() {
        attack = poke_round(attack as f64 * 3.0 / 2.0) as u32;
        trace.push_ability(Role::Attacker, attacker);
    }
    let attack = crest::boost_attack(ctx, attack, trace);

    let chain = attack_chain(ctx);
    let modifier = chain.compose(410, 131072);
    trace.extend(chain.into_events());
    let attack = of16(poke_round(attack as f64 * modifier as f64 / 4096.0).max(1.0) as u64) as u32;
    log::debug!("attack for {}: {} (chain {})", ctx.mv.name, attack, modifier);
    (attack, selected)
}

// ============================================================================
// Attacker abilities (exclusive ladder)
// ============================================================================

fn halving_ability(ctx: &HitContext<'_>, chain: &mut Chain) -> bool {
    let (attacker, mv) = (ctx.attacker, ctx.mv);
    let applies = (attacker.has_ability(&["Slow Start"])
        && attacker.ability_on
        && (mv.is_physical() || (mv.is_special() && mv.is_z)))
        || (attacker.has_ability(&["Defeatist"]) && attacker.cur_hp() * 2 <= attacker.max_hp());
    if applies {
        push_with(chain, Modifier::HALF, [attacker_ability(ctx)]);
    }
    applies
}

fn sun_ability(ctx: &HitContext<'_>, chain: &mut Chain) -> bool {
    let (attacker, mv) = (ctx.attacker, ctx.mv);
    let sunny = ctx.field.has_weather(&[Weather::Sun, Weather::HarshSun]);
    let applies = sunny
        && ((attacker.has_ability(&["Solar Power"]) && mv.is_special())
            || (attacker.named(&["Cherrim"]) && attacker.has_ability(&["Flower Gift"]) && mv.is_physical()));
    if applies {
        push_with(chain, Modifier::ONE_POINT_FIVE, [attacker_ability(ctx), weather_event(ctx)]);
    }
    applies
}

fn garden_flower_gift(ctx: &HitContext<'_>, chain: &mut Chain) -> bool {
    let attacker = ctx.attacker;
    let applies = attacker.named(&["Cherrim"])
        && attacker.has_ability(&["Flower Gift"])
        && ctx.is_field(ChromaticField::FlowerGarden)
        && ctx.mv.is_physical();
    if applies {
        push_with(chain, Modifier::ONE_POINT_FIVE, [attacker_ability(ctx), field_event(ctx)]);
    }
    applies
}

fn gorilla_tactics(ctx: &HitContext<'_>, chain: &mut Chain) -> bool {
    let attacker = ctx.attacker;
    let applies = attacker.has_ability(&["Gorilla Tactics"]) && ctx.mv.is_physical() && !attacker.is_dynamaxed;
    if applies {
        push_with(chain, Modifier::ONE_POINT_FIVE, [attacker_ability(ctx)]);
    }
    applies
}

fn pinch_ability(ctx: &HitContext<'_>, chain: &mut Chain) -> bool {
    let (attacker, mv) = (ctx.attacker, ctx.mv);
    let pinched = attacker.cur_hp() as f64 <= attacker.max_hp() as f64 / 3.0;
    let applies = (attacker.has_ability(&["Guts"]) && attacker.is_statused() && mv.is_physical())
        || (pinched
            && ((attacker.has_ability(&["Overgrow"]) && mv.has_type(Type::Grass))
                || (attacker.has_ability(&["Blaze"]) && mv.has_type(Type::Fire))
                || (attacker.has_ability(&["Torrent"]) && mv.has_type(Type::Water))
                || (attacker.has_ability(&["Swarm"]) && mv.has_type(Type::Bug))))
        || (mv.is_special() && attacker.ability_on && attacker.has_ability(&["Plus", "Minus"]));
    if applies {
        push_with(chain, Modifier::ONE_POINT_FIVE, [attacker_ability(ctx)]);
    }
    applies
}

/// Chromatic fields that switch on an ability without its usual trigger.
fn field_activated_ability(ctx: &HitContext<'_>, chain: &mut Chain) -> bool {
    let (attacker, mv) = (ctx.attacker, ctx.mv);
    let Some(field) = ctx.field.chromatic_field else {
        return false;
    };
    let applies = match field {
        ChromaticField::Jungle => attacker.has_ability(&["Swarm"]) && mv.has_type(Type::Bug),
        ChromaticField::ThunderingPlateau => attacker.has_ability(&["Plus", "Minus"]) && mv.is_special(),
        ChromaticField::VolcanicTop => {
            attacker.has_ability(&["Solar Power"]) || (attacker.has_ability(&["Blaze"]) && mv.has_type(Type::Fire))
        }
        ChromaticField::FlowerGarden => attacker.has_ability(&["Overgrow"]) && mv.has_type(Type::Grass),
        ChromaticField::WatersSurface => attacker.has_ability(&["Torrent"]) && mv.has_type(Type::Water),
        _ => false,
    };
    if applies {
        push_with(chain, Modifier::ONE_POINT_FIVE, [attacker_ability(ctx), field_event(ctx)]);
    }
    applies
}

fn flash_fire(ctx: &HitContext<'_>, chain: &mut Chain) -> bool {
    let attacker = ctx.attacker;
    let applies = attacker.has_ability(&["Flash Fire"]) && attacker.ability_on && ctx.mv.has_type(Type::Fire);
    if applies {
        push_with(chain, Modifier::ONE_POINT_FIVE, [attacker_ability(ctx)]);
    }
    applies
}

fn type_ability(ctx: &HitContext<'_>, chain: &mut Chain) -> bool {
    let (attacker, mv) = (ctx.attacker, ctx.mv);
    let applies = (attacker.has_ability(&["Steelworker"]) && mv.has_type(Type::Steel))
        || (attacker.has_ability(&["Dragon's Maw"]) && mv.has_type(Type::Dragon))
        || (attacker.has_ability(&["Rocky Payload"]) && mv.has_type(Type::Rock));
    if applies {
        push_with(chain, Modifier::ONE_POINT_FIVE, [attacker_ability(ctx)]);
    }
    applies
}

fn transistor(ctx: &HitContext<'_>, chain: &mut Chain) -> bool {
    let applies = ctx.attacker.has_ability(&["Transistor"]) && ctx.mv.has_type(Type::Electric);
    if applies {
        push_with(chain, ctx.gen.transistor_boost(), [attacker_ability(ctx)]);
    }
    applies
}

fn stakeout(ctx: &HitContext<'_>, chain: &mut Chain) -> bool {
    let applies = ctx.attacker.has_ability(&["Stakeout"]) && ctx.attacker.ability_on;
    if applies {
        push_with(chain, Modifier::DOUBLE, [attacker_ability(ctx)]);
    }
    applies
}

fn water_bubble(ctx: &HitContext<'_>, chain: &mut Chain) -> bool {
    let applies = ctx.attacker.has_ability(&["Water Bubble"]) && ctx.mv.has_type(Type::Water);
    if applies {
        push_with(chain, Modifier::DOUBLE, [attacker_ability(ctx)]);
    }
    applies
}

fn huge_power(ctx: &HitContext<'_>, chain: &mut Chain) -> bool {
    let (attacker, mv) = (ctx.attacker, ctx.mv);
    if !attacker.has_ability(&["Huge Power", "Pure Power"]) {
        return false;
    }
    // Ancient Ruins doubles whichever attacking stat is higher
    if ctx.is_field(ChromaticField::AncientRuins) {
        let higher =
            if attacker.stats.atk > attacker.stats.spa { MoveCategory::Physical } else { MoveCategory::Special };
        if mv.category == higher {
            push_with(chain, Modifier::DOUBLE, [attacker_ability(ctx), field_event(ctx)]);
        }
    } else if mv.is_physical() {
        push_with(chain, Modifier::DOUBLE, [attacker_ability(ctx)]);
    }
    true
}

// ============================================================================
// Allies, defender and field
// ============================================================================

fn ally_flower_gift(ctx: &HitContext<'_>, chain: &mut Chain) -> bool {
    let applies = ctx.field.attacker_side.is_flower_gift
        && !ctx.attacker.has_ability(&["Flower Gift"])
        && ctx.field.has_weather(&[Weather::Sun, Weather::HarshSun])
        && ctx.mv.is_physical();
    if applies {
        push_with(
            chain,
            Modifier::ONE_POINT_FIVE,
            [weather_event(ctx), Some(TraceEvent::SideCondition { role: Role::Attacker, name: "Flower Gift" })],
        );
    }
    applies
}

fn ally_steely_spirit(ctx: &HitContext<'_>, chain: &mut Chain) -> bool {
    let applies = ctx.field.attacker_side.is_steely_spirit && ctx.mv.has_type(Type::Steel);
    if applies {
        chain.push(Modifier::ONE_POINT_FIVE, TraceEvent::SideCondition { role: Role::Attacker, name: "Steely Spirit" });
    }
    applies
}

fn defender_resist_ability(ctx: &HitContext<'_>, chain: &mut Chain) -> bool {
    let (defender, mv) = (ctx.defender, ctx.mv);
    let applies = (defender.has_ability(&["Thick Fat"]) && (mv.has_type(Type::Fire) || mv.has_type(Type::Ice)))
        || (defender.has_ability(&["Water Bubble"]) && mv.has_type(Type::Fire))
        || (defender.has_ability(&["Purifying Salt"]) && mv.has_type(Type::Ghost));
    if applies {
        push_with(chain, Modifier::HALF, [defender_ability(ctx)]);
    }
    applies
}

fn heatproof(ctx: &HitContext<'_>, chain: &mut Chain) -> bool {
    let applies =
        ctx.gen.heatproof_in_attack_chain() && ctx.defender.has_ability(&["Heatproof"]) && ctx.mv.has_type(Type::Fire);
    if applies {
        push_with(chain, Modifier::HALF, [defender_ability(ctx)]);
    }
    applies
}

fn ruin(ctx: &HitContext<'_>, chain: &mut Chain) -> bool {
    let (attacker, defender, mv, field) = (ctx.attacker, ctx.defender, ctx.mv, ctx.field);
    let tablets = (defender.has_ability(&["Tablets of Ruin"]) || field.is_tablets_of_ruin)
        && !attacker.has_ability(&["Tablets of Ruin"]);
    let vessel = (defender.has_ability(&["Vessel of Ruin"]) || field.is_vessel_of_ruin)
        && !attacker.has_ability(&["Vessel of Ruin"]);
    if !((tablets && mv.is_physical()) || (vessel && mv.is_special())) {
        return false;
    }
    let event = if defender.has_ability(&["Tablets of Ruin", "Vessel of Ruin"]) {
        defender_ability(ctx)
    } else if mv.is_special() {
        Some(TraceEvent::Condition("Vessel of Ruin"))
    } else {
        Some(TraceEvent::Condition("Tablets of Ruin"))
    };
    push_with(chain, Modifier::THREE_QUARTERS, [event]);
    true
}

fn ring_arena_guts(ctx: &HitContext<'_>, chain: &mut Chain) -> bool {
    let defender = ctx.defender;
    let applies = defender.has_ability(&["Guts"]) && defender.is_statused() && ctx.mv.is_special();
    if ctx.is_field(ChromaticField::RingArena) && applies {
        push_with(chain, 2867u16, [defender_ability(ctx), field_event(ctx)]);
        return true;
    }
    false
}

fn protosynthesis(ctx: &HitContext<'_>, chain: &mut Chain) -> bool {
    let (attacker, mv) = (ctx.attacker, ctx.mv);
    if !is_qp_active(attacker, ctx.field) {
        return false;
    }
    let boosted = get_qp_boosted_stat(attacker, ctx.gen_num());
    let applies = (mv.is_physical() && boosted == StatId::Atk) || (mv.is_special() && boosted == StatId::Spa);
    if applies {
        push_with(chain, Modifier::ONE_POINT_THREE, [attacker_ability(ctx)]);
    }
    applies
}

fn hadron_orichalcum(ctx: &HitContext<'_>, chain: &mut Chain) -> bool {
    let (attacker, mv, field) = (ctx.attacker, ctx.mv, ctx.field);
    let applies = (attacker.has_ability(&["Hadron Engine"]) && mv.is_special() && field.has_terrain(Terrain::Electric))
        || (attacker.has_ability(&["Orichalcum Pulse"])
            && mv.is_physical()
            && field.has_weather(&[Weather::Sun, Weather::HarshSun])
            && !attacker.has_item(&["Utility Umbrella"]));
    if applies {
        push_with(chain, 5461u16, [attacker_ability(ctx)]);
    }
    applies
}

// ============================================================================
// Items (exclusive)
// ============================================================================

fn species_item(ctx: &HitContext<'_>, chain: &mut Chain) -> bool {
    let (attacker, mv) = (ctx.attacker, ctx.mv);
    let applies = (attacker.has_item(&["Thick Club"])
        && attacker.named(&["Cubone", "Marowak", "Marowak-Alola", "Marowak-Alola-Totem"])
        && mv.is_physical())
        || (attacker.has_item(&["Deep Sea Tooth"]) && attacker.named(&["Clamperl"]) && mv.is_special())
        || (attacker.has_item(&["Light Ball"]) && attacker.name_contains("Pikachu") && !mv.is_z);
    if applies {
        push_with(chain, Modifier::DOUBLE, [attacker_item(ctx)]);
    }
    applies
}

fn choice_item(ctx: &HitContext<'_>, chain: &mut Chain) -> bool {
    let (attacker, mv) = (ctx.attacker, ctx.mv);
    let applies = !mv.is_z
        && !mv.is_max
        && ((attacker.has_item(&["Choice Band"]) && mv.is_physical())
            || (attacker.has_item(&["Choice Specs"]) && mv.is_special()));
    if applies {
        push_with(chain, Modifier::ONE_POINT_FIVE, [attacker_item(ctx)]);
    }
    applies
}

// ============================================================================
// Chromatic field move boosts
// ============================================================================

fn graveyard_moves(ctx: &HitContext<'_>, chain: &mut Chain) -> bool {
    let applies = ctx.mv.named(&["Dazzling Gleam", "Draining Kiss", "Foul Play", "Spirit Break"]);
    field_boost(ctx, chain, ChromaticField::HauntedGraveyard, applies, Modifier::ONE_POINT_TWO.0)
}

fn garden_moves(ctx: &HitContext<'_>, chain: &mut Chain) -> bool {
    let mv = ctx.mv;
    field_boost(ctx, chain, ChromaticField::FlowerGarden, mv.named(&["Horn Leech", "Seed Bomb"]), Modifier::LIFE_ORB.0)
        || field_boost(
            ctx,
            chain,
            ChromaticField::FlowerGarden,
            mv.named(&["Leafage", "Leaf Blade", "Magical Leaf", "Razor Leaf"]),
            Modifier::ONE_POINT_TWO.0,
        )
}

fn desert_moves(ctx: &HitContext<'_>, chain: &mut Chain) -> bool {
    field_boost(ctx, chain, ChromaticField::Desert, ctx.mv.named(&["Scald", "Steam Eruption"]), 4505)
}

fn sanctum_moves(ctx: &HitContext<'_>, chain: &mut Chain) -> bool {
    let applies = ctx.mv.named(&["Multi-Attack", "Mystical Fire", "Sacred Fire", "Ancient Power"]);
    field_boost(ctx, chain, ChromaticField::BlessedSanctum, applies, Modifier::ONE_POINT_TWO.0)
}

fn wasteland_moves(ctx: &HitContext<'_>, chain: &mut Chain) -> bool {
    let applies = ctx.mv.named(&["Mud Bomb", "Mud Shot", "Mud-Slap", "Muddy Water"]);
    field_boost(ctx, chain, ChromaticField::AcidicWasteland, applies, Modifier::LIFE_ORB.0)
}

fn ruins_moves(ctx: &HitContext<'_>, chain: &mut Chain) -> bool {
    let mv = ctx.mv;
    let modifier = if mv.named(&["Aura Sphere"]) {
        4505
    } else if mv.named(&["Mystical Fire"]) {
        Modifier::ONE_POINT_TWO.0
    } else if mv.named(&["Magical Leaf"]) {
        Modifier::LIFE_ORB.0
    } else {
        return false;
    };
    field_boost(ctx, chain, ChromaticField::AncientRuins, true, modifier)
}

fn cave_sound(ctx: &HitContext<'_>, chain: &mut Chain) -> bool {
    field_boost(ctx, chain, ChromaticField::Cave, ctx.mv.has_flag(MoveFlags::SOUND), Modifier::LIFE_ORB.0)
}

fn factory_discharge(ctx: &HitContext<'_>, chain: &mut Chain) -> bool {
    field_boost(ctx, chain, ChromaticField::Factory, ctx.mv.named(&["Discharge"]), 4505)
}

fn factory_lock_on(ctx: &HitContext<'_>, chain: &mut Chain) -> bool {
    if ctx.is_field(ChromaticField::Factory) && ctx.attacker.is_lock_on {
        push_with(chain, 10240u16, [Some(TraceEvent::Condition("Lock On")), field_event(ctx)]);
        return true;
    }
    false
}

fn surface_moves(ctx: &HitContext<'_>, chain: &mut Chain) -> bool {
    let mv = ctx.mv;
    let electric = mv.named(&["Discharge", "Parabolic Charge", "Shock Wave"]);
    field_boost(ctx, chain, ChromaticField::WatersSurface, electric, Modifier::LIFE_ORB.0)
        || field_boost(ctx, chain, ChromaticField::WatersSurface, mv.named(&["Dive"]), Modifier::ONE_POINT_TWO.0)
}

fn underwater_moves(ctx: &HitContext<'_>, chain: &mut Chain) -> bool {
    let applies = ctx.mv.named(&[
        "Anchor Shot",
        "Discharge",
        "Parabolic Charge",
        "Shock Wave",
        "Sludge Wave",
        "Triple Dive",
        "Water Pulse",
    ]);
    field_boost(ctx, chain, ChromaticField::Underwater, applies, Modifier::LIFE_ORB.0)
}

fn rainbow_moves(ctx: &HitContext<'_>, chain: &mut Chain) -> bool {
    let applies = ctx.mv.named(&[
        "Prismatic Laser",
        "Sparkling Aria",
        "Mist Ball",
        "Secret Power",
        "Hidden Power",
        "Relic Song",
        "Judgement",
        "Aurora Beam",
        "Mystical Fire",
        "Tri Attack",
        "Grass Pledge",
        "Water Pledge",
        "Fire Pledge",
        "Sacred Fire",
    ]);
    field_boost(ctx, chain, ChromaticField::Rainbow, applies, Modifier::LIFE_ORB.0)
}

fn broken_carapace(ctx: &HitContext<'_>, chain: &mut Chain) -> bool {
    let attacker = ctx.attacker;
    let applies = (attacker.has_type(Type::Bug) || attacker.has_type(Type::Rock))
        && (attacker.cur_hp() as f64) < attacker.max_hp() as f64 / 2.0;
    if ctx.is_field(ChromaticField::Undercolony) && applies {
        push_with(chain, Modifier::ONE_POINT_TWO, [Some(TraceEvent::Condition("Broken Carapace")), field_event(ctx)]);
        return true;
    }
    false
}

fn inverse_prism_scale(ctx: &HitContext<'_>, chain: &mut Chain) -> bool {
    let applies = ctx.attacker.has_item(&["Prism Scale"])
        && ctx.is_field(ChromaticField::Inverse)
        && ctx.mv.has_type(Type::Typeless);
    if applies {
        push_with(chain, Modifier::ONE_POINT_FIVE, [attacker_item(ctx)]);
    }
    applies
}

/// Seviper Crest: up to half again, scaled by the target's remaining HP.
fn seviper_crest(ctx: &HitContext<'_>, chain: &mut Chain) -> bool {
    let defender = ctx.defender;
    if !ctx.attacker.named(&["Seviper-Crest"]) || defender.max_hp() == 0 {
        return false;
    }
    let remaining = (defender.cur_hp() as u64 * 4096 / defender.max_hp() as u64) as f64;
    chain.push_mod(4096 + poke_round(remaining / 2.0) as u16);
    true
}

const ATTACKER_ABILITIES: &[ChainRule] = &[
    halving_ability,
    sun_ability,
    garden_flower_gift,
    gorilla_tactics,
    pinch_ability,
    field_activated_ability,
    flash_fire,
    type_ability,
    transistor,
    stakeout,
    water_bubble,
    huge_power,
];
const ITEMS: &[ChainRule] = &[species_item, choice_item];

static ATTACK_STEPS: [Step; 25] = [
    Step::FirstOf(ATTACKER_ABILITIES),
    Step::Each(ally_flower_gift),
    Step::Each(ally_steely_spirit),
    Step::Each(defender_resist_ability),
    Step::Each(heatproof),
    Step::Each(ruin),
    Step::Each(ring_arena_guts),
    Step::Each(protosynthesis),
    Step::Each(hadron_orichalcum),
    Step::FirstOf(ITEMS),
    Step::Each(graveyard_moves),
    Step::Each(garden_moves),
    Step::Each(desert_moves),
    Step::Each(sanctum_moves),
    Step::Each(wasteland_moves),
    Step::Each(ruins_moves),
    Step::Each(cave_sound),
    Step::Each(factory_discharge),
    Step::Each(factory_lock_on),
    Step::Each(surface_moves),
    Step::Each(underwater_moves),
    Step::Each(rainbow_moves),
    Step::Each(broken_carapace),
    Step::Each(inverse_prism_scale),
    Step::Each(seviper_crest),
];

pub fn attack_chain(ctx: &HitContext<'_>) -> Chain {
    run(&ATTACK_STEPS, ctx)
}
