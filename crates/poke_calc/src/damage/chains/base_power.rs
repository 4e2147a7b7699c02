//! Base power modifier chain, applied on top of the move-specific power.

use super::{
    attacker_ability, attacker_item, defender_ability, field_boost, field_event, push_with, run, weather_event,
    ChainRule, Step,
};
use crate::damage::context::{HitContext, TurnOrder};
use crate::damage::effectiveness::get_move_effectiveness;
use crate::damage::generations::GenMechanics;
use crate::damage::modifier::{Chain, Modifier};
use crate::damage::stats::is_qp_active;
use crate::damage::trace::{Role, TraceEvent};
use crate::entities::{Gender, Status};
use crate::field::{ChromaticField, Switching, Terrain, Weather};
use crate::items::{item_boost_type, is_mega_stone_for};
use crate::moves::MoveFlags;
use crate::stats::StatId;
use crate::types::Type;

const SUPREME_OVERLORD: [u16; 6] = [4096, 4506, 4915, 5325, 5734, 6144];

/// Knock Off gets no boost against items that cannot be removed.
pub fn knock_off_resisted(ctx: &HitContext<'_>) -> bool {
    let defender = ctx.defender;
    let item = defender.item.as_deref().or(defender.disabled_item.as_deref());
    let Some(item) = item else {
        return true;
    };
    let holds = |species: &str, held: &str| defender.named(&[species]) && item == held;
    let unremovable = is_qp_active(defender, ctx.field)
        || holds("Dialga-Origin", "Adamant Crystal")
        || holds("Palkia-Origin", "Lustrous Globe")
        || (defender.name_contains("Giratina-Origin") && item.contains("Griseous"))
        || (defender.name_contains("Arceus") && item.contains("Plate"))
        || (defender.name_contains("Genesect") && item.contains("Drive"))
        || (defender.named(&["Groudon", "Groudon-Primal"]) && item == "Red Orb")
        || (defender.named(&["Kyogre", "Kyogre-Primal"]) && item == "Blue Orb")
        || (defender.name_contains("Silvally") && item.contains("Memory"))
        || item.contains(" Z")
        || holds("Zacian", "Rusted Sword")
        || holds("Zamazenta", "Rusted Shield")
        || (defender.name_contains("Ogerpon-Cornerstone") && item == "Cornerstone Mask")
        || (defender.name_contains("Ogerpon-Hearthflame") && item == "Hearthflame Mask")
        || (defender.name_contains("Ogerpon-Wellspring") && item == "Wellspring Mask")
        || holds("Venomicon-Epilogue", "Vile Vial")
        || is_mega_stone_for(item, &defender.name)
        || (item == "Up-Grade" && defender.name_contains("-Crest"));
    // a second hit finds the item already gone
    unremovable || (ctx.hit > 1 && !defender.has_ability(&["Sticky Hold"]))
}

// ============================================================================
// Move-specific boosts (exclusive)
// ============================================================================

fn doubled_by_condition(ctx: &HitContext<'_>, chain: &mut Chain) -> bool {
    let (attacker, defender, mv) = (ctx.attacker, ctx.defender, ctx.mv);
    // Lash Out never qualifies: boosts are counted as a non-negative sum
    let applies = (mv.named(&["Facade"])
        && attacker.has_status(&[Status::Burn, Status::Paralysis, Status::Poison, Status::Toxic]))
        || (mv.named(&["Brine"]) && defender.cur_hp() * 2 <= defender.max_hp())
        || (mv.named(&["Venoshock"]) && defender.has_status(&[Status::Poison, Status::Toxic]));
    if applies {
        chain.push(Modifier::DOUBLE, TraceEvent::BasePower(ctx.base_power * 2.0));
    }
    applies
}

fn expanding_force(ctx: &HitContext<'_>, chain: &mut Chain) -> bool {
    let applies =
        ctx.mv.named(&["Expanding Force"]) && ctx.attacker_grounded() && ctx.field.has_terrain(Terrain::Psychic);
    if applies {
        chain.push(Modifier::ONE_POINT_FIVE, TraceEvent::BasePower(ctx.base_power * 1.5));
    }
    applies
}

fn conditional_one_point_five(ctx: &HitContext<'_>, chain: &mut Chain) -> bool {
    let (mv, field) = (ctx.mv, ctx.field);
    let applies = (mv.named(&["Knock Off"]) && !knock_off_resisted(ctx))
        || (mv.named(&["Misty Explosion"]) && ctx.attacker_grounded() && field.has_terrain(Terrain::Misty))
        || (mv.named(&["Grav Apple"]) && field.is_gravity);
    if applies {
        chain.push(Modifier::ONE_POINT_FIVE, TraceEvent::BasePower(ctx.base_power * 1.5));
    }
    applies
}

fn solar_in_bad_weather(ctx: &HitContext<'_>, chain: &mut Chain) -> bool {
    let applies = ctx.mv.named(&["Solar Beam", "Solar Blade"])
        && ctx.field.has_weather(&[Weather::Rain, Weather::HeavyRain, Weather::Sand, Weather::Hail, Weather::Snow]);
    if applies {
        chain.push(Modifier::HALF, TraceEvent::BasePower(ctx.base_power / 2.0));
        if let Some(event) = weather_event(ctx) {
            chain.note(event);
        }
    }
    applies
}

fn super_effective_boost(ctx: &HitContext<'_>, chain: &mut Chain) -> bool {
    let (attacker, defender, mv, field) = (ctx.attacker, ctx.defender, ctx.mv, ctx.field);
    if !mv.named(&["Collision Course", "Electro Drift"]) {
        return false;
    }
    let ghost_revealed =
        attacker.has_ability(&["Scrappy", "Mind's Eye"]) || field.defender_side.is_foresight;
    let ring_target = defender.has_item(&["Ring Target"]) && !defender.has_ability(&["Klutz"]);
    let types: Vec<Type> = match defender.tera_type {
        Some(tera) if tera != Type::Stellar => vec![tera],
        _ => defender.types.clone(),
    };
    let product: f64 = types
        .iter()
        .map(|&t| get_move_effectiveness(mv, t, field, ghost_revealed, field.is_gravity, ring_target))
        .product();
    if product >= 2.0 {
        chain.push(5461u16, TraceEvent::BasePower(ctx.base_power * 5461.0 / 4096.0));
        return true;
    }
    // matched the move, so no later rule in the ladder applies
    true
}

// ============================================================================
// Side and field
// ============================================================================

fn helping_hand(ctx: &HitContext<'_>, chain: &mut Chain) -> bool {
    if ctx.field.attacker_side.is_helping_hand {
        chain.push(Modifier::ONE_POINT_FIVE, TraceEvent::SideCondition { role: Role::Attacker, name: "Helping Hand" });
        return true;
    }
    false
}

fn terrain_boost(ctx: &HitContext<'_>, chain: &mut Chain) -> bool {
    let (mv, field) = (ctx.mv, ctx.field);
    let applies = ctx.attacker_grounded()
        && ((field.has_terrain(Terrain::Electric) && mv.has_type(Type::Electric))
            || (field.has_terrain(Terrain::Grassy) && mv.has_type(Type::Grass))
            || (field.has_terrain(Terrain::Psychic) && mv.has_type(Type::Psychic)));
    if let (true, Some(terrain)) = (applies, field.terrain) {
        chain.push(ctx.gen.terrain_boost(), TraceEvent::Terrain(terrain));
        return true;
    }
    false
}

fn terrain_weaken(ctx: &HitContext<'_>, chain: &mut Chain) -> bool {
    let (mv, field) = (ctx.mv, ctx.field);
    let applies = ctx.defender_grounded()
        && ((field.has_terrain(Terrain::Misty) && mv.has_type(Type::Dragon))
            || (field.has_terrain(Terrain::Grassy) && mv.named(&["Bulldoze", "Earthquake"])));
    if let (true, Some(terrain)) = (applies, field.terrain) {
        chain.push(Modifier::HALF, TraceEvent::Terrain(terrain));
        return true;
    }
    false
}

fn eclipse(ctx: &HitContext<'_>, chain: &mut Chain) -> bool {
    let dropped = StatId::BOOSTABLE
        .iter()
        .any(|&stat| ctx.defender.boosts[stat] < 0 || ctx.attacker.boosts[stat] < 0);
    field_boost(ctx, chain, ChromaticField::Eclipse, ctx.attacker.has_type(Type::Dark) && dropped, Modifier::LIFE_ORB.0)
}

fn grit(ctx: &HitContext<'_>, chain: &mut Chain) -> bool {
    let stages = ctx.attacker.grit_stages;
    if stages >= 5 {
        push_with(chain, Modifier::ONE_POINT_FIVE, [Some(TraceEvent::GritStages(stages)), field_event(ctx)]);
        return true;
    }
    false
}

// ============================================================================
// Abilities
// ============================================================================

fn ability_one_point_five(ctx: &HitContext<'_>, chain: &mut Chain) -> bool {
    let (attacker, mv) = (ctx.attacker, ctx.mv);
    let applies = (attacker.has_ability(&["Flare Boost"]) && attacker.has_status(&[Status::Burn]) && mv.is_special())
        || (attacker.has_ability(&["Toxic Boost"])
            && (attacker.has_status(&[Status::Poison, Status::Toxic]) || ctx.is_field(ChromaticField::AcidicWasteland))
            && mv.is_physical())
        || (attacker.has_ability(&["Mega Launcher"]) && mv.has_flag(MoveFlags::PULSE))
        || ((attacker.has_ability(&["Strong Jaw"]) || attacker.named(&["Feraligatr-Crest"])) && mv.has_flag(MoveFlags::BITE))
        || (attacker.has_ability(&["Steely Spirit"]) && mv.has_type(Type::Steel))
        || (attacker.has_ability(&["Sharpness"]) && mv.has_flag(MoveFlags::SLICING));
    if applies {
        push_with(chain, Modifier::ONE_POINT_FIVE, [attacker_ability(ctx)]);
    }
    applies
}

fn technician(ctx: &HitContext<'_>, chain: &mut Chain) -> bool {
    if !(ctx.attacker.has_ability(&["Technician"]) || ctx.attacker.named(&["Dusknoir-Crest"])) {
        return false;
    }
    if ctx.base_power <= 60.0 {
        push_with(chain, Modifier::ONE_POINT_FIVE, [attacker_ability(ctx)]);
        return true;
    }
    // Factory raises the threshold to 70
    if ctx.is_field(ChromaticField::Factory) && ctx.base_power <= 70.0 {
        push_with(chain, Modifier::ONE_POINT_FIVE, [attacker_ability(ctx), field_event(ctx)]);
        return true;
    }
    false
}

fn aura(ctx: &HitContext<'_>, chain: &mut Chain) -> bool {
    let (attacker, defender, mv, field) = (ctx.attacker, ctx.defender, ctx.mv, ctx.field);
    let aura = format!("{} Aura", mv.move_type);
    let attacker_aura = attacker.has_ability(&[aura.as_str()]);
    let defender_aura = defender.has_ability(&[aura.as_str()]);
    let field_aura =
        (field.is_fairy_aura && mv.has_type(Type::Fairy)) || (field.is_dark_aura && mv.has_type(Type::Dark));
    if !(attacker_aura || defender_aura || field_aura) {
        return false;
    }
    let aura_break =
        field.is_aura_break || attacker.has_ability(&["Aura Break"]) || defender.has_ability(&["Aura Break"]);
    if aura_break {
        push_with(chain, Modifier::THREE_QUARTERS, [attacker_ability(ctx), defender_ability(ctx)]);
    } else {
        push_with(
            chain,
            5448u16,
            [attacker_ability(ctx).filter(|_| attacker_aura), defender_ability(ctx).filter(|_| defender_aura)],
        );
    }
    true
}

fn one_point_three_ability(ctx: &HitContext<'_>, chain: &mut Chain) -> bool {
    let (attacker, mv, field) = (ctx.attacker, ctx.mv, ctx.field);
    let switching_out = field.defender_side.is_switching == Some(Switching::Out);
    let applies = (attacker.has_ability(&["Sheer Force"]) && (mv.secondaries || mv.named(&["Order Up"])) && !mv.is_max)
        || (attacker.has_ability(&["Sand Force"])
            && field.has_weather(&[Weather::Sand])
            && (mv.has_type(Type::Rock) || mv.has_type(Type::Ground) || mv.has_type(Type::Steel)))
        || (attacker.has_ability(&["Analytic"]) && (ctx.turn_order != TurnOrder::First || switching_out))
        || (attacker.has_ability(&["Tough Claws"]) && mv.has_flag(MoveFlags::CONTACT))
        || (attacker.has_ability(&["Punk Rock"]) && mv.has_flag(MoveFlags::SOUND));
    if applies {
        push_with(chain, Modifier::ONE_POINT_THREE, [attacker_ability(ctx)]);
    }
    applies
}

fn desert_sand_force(ctx: &HitContext<'_>, chain: &mut Chain) -> bool {
    let mv = ctx.mv;
    let applies = ctx.attacker.has_ability(&["Sand Force"])
        && ctx.is_field(ChromaticField::Desert)
        && (mv.has_type(Type::Rock) || mv.has_type(Type::Ground) || mv.has_type(Type::Steel));
    if applies {
        push_with(chain, Modifier::ONE_POINT_THREE, [attacker_ability(ctx), field_event(ctx)]);
    }
    applies
}

fn battery(ctx: &HitContext<'_>, chain: &mut Chain) -> bool {
    if ctx.field.attacker_side.is_battery && ctx.mv.is_special() {
        chain.push(Modifier::ONE_POINT_THREE, TraceEvent::SideCondition { role: Role::Attacker, name: "Battery" });
        return true;
    }
    false
}

fn power_spot(ctx: &HitContext<'_>, chain: &mut Chain) -> bool {
    if ctx.field.attacker_side.is_power_spot {
        chain.push(Modifier::ONE_POINT_THREE, TraceEvent::SideCondition { role: Role::Attacker, name: "Power Spot" });
        return true;
    }
    false
}

fn rivalry(ctx: &HitContext<'_>, chain: &mut Chain) -> bool {
    let (attacker, defender) = (ctx.attacker, ctx.defender);
    if !attacker.has_ability(&["Rivalry"]) || attacker.gender == Gender::N || defender.gender == Gender::N {
        return false;
    }
    if attacker.gender == defender.gender {
        push_with(chain, 5120u16, [Some(TraceEvent::Condition("buffed")), attacker_ability(ctx)]);
    } else {
        push_with(chain, Modifier::THREE_QUARTERS, [Some(TraceEvent::Condition("nerfed")), attacker_ability(ctx)]);
    }
    true
}

/// The -ate abilities already changed the type and recorded themselves.
fn ate_boost(ctx: &HitContext<'_>, chain: &mut Chain) -> bool {
    if ctx.mv.is_max || !ctx.has_ate_boost {
        return false;
    }
    if ctx.attacker.has_ability(&["Refrigerate"]) && ctx.is_field(ChromaticField::SnowyPeaks) {
        push_with(chain, Modifier::ONE_POINT_FIVE, [field_event(ctx)]);
    } else {
        chain.push_mod(Modifier::ONE_POINT_TWO);
    }
    true
}

fn reckless_iron_fist(ctx: &HitContext<'_>, chain: &mut Chain) -> bool {
    let (attacker, mv) = (ctx.attacker, ctx.mv);
    let recoils = mv.recoil.is_some() || mv.has_crash_damage;
    let applies = (attacker.has_ability(&["Reckless"]) && recoils)
        || (attacker.has_ability(&["Iron Fist"]) && mv.has_flag(MoveFlags::PUNCH));
    if applies {
        push_with(chain, Modifier::ONE_POINT_TWO, [attacker_ability(ctx)]);
    }
    applies
}

fn undercolony_rock_head(ctx: &HitContext<'_>, chain: &mut Chain) -> bool {
    let mv = ctx.mv;
    let applies = ctx.attacker.has_ability(&["Rock Head"])
        && ctx.is_field(ChromaticField::Undercolony)
        && (mv.recoil.is_some() || mv.has_crash_damage);
    if applies {
        push_with(chain, Modifier::ONE_POINT_TWO, [attacker_ability(ctx), field_event(ctx)]);
    }
    applies
}

fn heatproof(ctx: &HitContext<'_>, chain: &mut Chain) -> bool {
    let applies = !ctx.gen.heatproof_in_attack_chain()
        && ctx.defender.has_ability(&["Heatproof"])
        && ctx.mv.has_type(Type::Fire);
    if applies {
        push_with(chain, Modifier::HALF, [defender_ability(ctx)]);
    }
    applies
}

fn dry_skin(ctx: &HitContext<'_>, chain: &mut Chain) -> bool {
    let applies = ctx.defender.has_ability(&["Dry Skin"]) && ctx.mv.has_type(Type::Fire);
    if applies {
        push_with(chain, 5120u16, [defender_ability(ctx)]);
    }
    applies
}

fn supreme_overlord(ctx: &HitContext<'_>, chain: &mut Chain) -> bool {
    let fainted = ctx.attacker.allies_fainted;
    if !ctx.attacker.has_ability(&["Supreme Overlord"]) || fainted == 0 {
        return false;
    }
    let modifier = SUPREME_OVERLORD[fainted.min(5) as usize];
    push_with(chain, modifier, [attacker_ability(ctx), Some(TraceEvent::AlliesFainted(fainted))]);
    true
}

// ============================================================================
// Items (exclusive)
// ============================================================================

fn gem(ctx: &HitContext<'_>, chain: &mut Chain) -> bool {
    let gem = format!("{} Gem", ctx.mv.move_type);
    if ctx.attacker.has_item(&[gem.as_str()]) {
        push_with(chain, Modifier::ONE_POINT_THREE, [attacker_item(ctx)]);
        return true;
    }
    false
}

fn type_boosting_item(ctx: &HitContext<'_>, chain: &mut Chain) -> bool {
    let (attacker, mv) = (ctx.attacker, ctx.mv);
    let item = attacker.item_name();
    let types = |a: Type, b: Type| mv.has_type(a) || mv.has_type(b);
    let applies = (((item == "Adamant Crystal" && attacker.named(&["Dialga-Origin"]))
        || (item == "Adamant Orb" && attacker.named(&["Dialga"])))
        && types(Type::Steel, Type::Dragon))
        || (((item == "Lustrous Orb" && attacker.named(&["Palkia"]))
            || (item == "Lustrous Globe" && attacker.named(&["Palkia-Origin"])))
            && types(Type::Water, Type::Dragon))
        || ((item == "Griseous Orb" || item == "Griseous Core")
            && attacker.named(&["Giratina-Origin", "Giratina"])
            && types(Type::Ghost, Type::Dragon))
        || (item == "Vile Vial" && attacker.named(&["Venomicon-Epilogue"]) && types(Type::Poison, Type::Flying))
        || (item == "Soul Dew"
            && attacker.named(&["Latios", "Latias", "Latios-Mega", "Latias-Mega"])
            && types(Type::Psychic, Type::Dragon))
        || item_boost_type(item).is_some_and(|t| mv.has_type(t))
        || (attacker.name_contains("Ogerpon-Cornerstone") && item == "Cornerstone Mask")
        || (attacker.name_contains("Ogerpon-Hearthflame") && item == "Hearthflame Mask")
        || (attacker.name_contains("Ogerpon-Wellspring") && item == "Wellspring Mask");
    if applies {
        push_with(chain, Modifier::ONE_POINT_TWO, [attacker_item(ctx)]);
    }
    applies
}

fn category_item(ctx: &HitContext<'_>, chain: &mut Chain) -> bool {
    let (attacker, mv) = (ctx.attacker, ctx.mv);
    let applies = (attacker.has_item(&["Muscle Band"]) && mv.is_physical())
        || (attacker.has_item(&["Wise Glasses"]) && mv.is_special());
    if applies {
        push_with(chain, 4505u16, [attacker_item(ctx)]);
    }
    applies
}

fn punching_glove(ctx: &HitContext<'_>, chain: &mut Chain) -> bool {
    let applies = ctx.attacker.has_item(&["Punching Glove"]) && ctx.mv.has_flag(MoveFlags::PUNCH);
    if applies {
        chain.push_mod(4506u16);
    }
    applies
}

// ============================================================================
// Crests
// ============================================================================

fn beheeyem_crest(ctx: &HitContext<'_>, chain: &mut Chain) -> bool {
    let applies = ctx.defender.named(&["Beheeyem-Crest"]) && ctx.defender.stats.spe <= ctx.attacker.stats.spe;
    if applies {
        chain.push_mod(2732u16);
    }
    applies
}

fn boltund_crest(ctx: &HitContext<'_>, chain: &mut Chain) -> bool {
    let applies = ctx.attacker.named(&["Boltund-Crest"])
        && ctx.mv.has_flag(MoveFlags::BITE)
        && ctx.attacker.stats.spe >= ctx.defender.stats.spe;
    if applies {
        chain.push_mod(5324u16);
    }
    applies
}

fn claydol_crest(ctx: &HitContext<'_>, chain: &mut Chain) -> bool {
    let applies = ctx.attacker.named(&["Claydol-Crest"]) && ctx.mv.has_flag(MoveFlags::BEAM);
    if applies {
        chain.push_mod(Modifier::ONE_POINT_FIVE);
    }
    applies
}

fn druddigon_crest(ctx: &HitContext<'_>, chain: &mut Chain) -> bool {
    let applies =
        ctx.attacker.named(&["Druddigon-Crest"]) && (ctx.mv.has_type(Type::Fire) || ctx.mv.has_type(Type::Dragon));
    if applies {
        chain.push_mod(5324u16);
    }
    applies
}

fn fearow_crest(ctx: &HitContext<'_>, chain: &mut Chain) -> bool {
    let applies = ctx.attacker.named(&["Fearow-Crest"]) && ctx.mv.has_flag(MoveFlags::STABBING);
    if applies {
        chain.push_mod(Modifier::ONE_POINT_FIVE);
    }
    applies
}

const MOVE_BOOSTS: &[ChainRule] =
    &[doubled_by_condition, expanding_force, conditional_one_point_five, solar_in_bad_weather, super_effective_boost];
const ONE_POINT_THREE_ABILITIES: &[ChainRule] = &[one_point_three_ability, desert_sand_force];
const RECOIL_PUNCH: &[ChainRule] = &[reckless_iron_fist, undercolony_rock_head];
const FIRE_RESIST: &[ChainRule] = &[heatproof, dry_skin];
const ITEMS: &[ChainRule] = &[gem, type_boosting_item, category_item, punching_glove];

static BASE_POWER_STEPS: [Step; 23] = [
    Step::FirstOf(MOVE_BOOSTS),
    Step::Each(helping_hand),
    Step::Each(terrain_boost),
    Step::Each(terrain_weaken),
    Step::Each(eclipse),
    Step::Each(grit),
    Step::Each(ability_one_point_five),
    Step::Each(technician),
    Step::Each(aura),
    Step::FirstOf(ONE_POINT_THREE_ABILITIES),
    Step::Each(battery),
    Step::Each(power_spot),
    Step::Each(rivalry),
    Step::Each(ate_boost),
    Step::FirstOf(RECOIL_PUNCH),
    Step::FirstOf(FIRE_RESIST),
    Step::Each(supreme_overlord),
    Step::FirstOf(ITEMS),
    Step::Each(beheeyem_crest),
    Step::Each(boltund_crest),
    Step::Each(claydol_crest),
    Step::Each(druddigon_crest),
    Step::Each(fearow_crest),
];

/// Collect the base power modifiers for one hit.
pub fn base_power_chain(ctx: &HitContext<'_>) -> Chain {
    let chain = run(&BASE_POWER_STEPS, ctx);
    log::debug!("base power mods for {}: {:?}", ctx.mv.name, chain.mods());
    chain
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::damage::generations::Generation;
    use crate::entities::{Pokemon, PokemonSet};
    use crate::field::Field;
    use crate::moves::{Move, MoveSet};

    fn mon(name: &str, types: Vec<Type>, ability: Option<&str>, item: Option<&str>) -> Pokemon {
        Pokemon::from_set(PokemonSet {
            name: name.into(),
            types,
            ability: ability.map(Into::into),
            item: item.map(Into::into),
            ..Default::default()
        })
        .unwrap()
    }

    fn mv(set: MoveSet) -> Move {
        Move::from_set(set).unwrap()
    }

    #[test]
    fn test_knock_off_resistance() {
        let attacker = mon("Weavile", vec![Type::Dark, Type::Ice], None, None);
        let knock_off = mv(MoveSet { name: "Knock Off".into(), bp: 65, move_type: Type::Dark, ..Default::default() });
        let field = Field::default();

        let leftovers = mon("Toxapex", vec![Type::Poison, Type::Water], None, Some("Leftovers"));
        let ctx = HitContext::new(Generation::default(), &attacker, &leftovers, &knock_off, &field);
        assert!(!knock_off_resisted(&ctx));
        assert_eq!(base_power_chain(&ctx).mods(), &[6144]);

        let mega = mon("Garchomp-Mega", vec![Type::Dragon, Type::Ground], None, Some("Garchompite"));
        let ctx = HitContext::new(Generation::default(), &attacker, &mega, &knock_off, &field);
        assert!(knock_off_resisted(&ctx));

        let second = HitContext { hit: 2, ..HitContext::new(Generation::default(), &attacker, &leftovers, &knock_off, &field) };
        assert!(knock_off_resisted(&second));
    }

    #[test]
    fn test_ladder_and_items_chain_in_order() {
        let attacker = mon("Conkeldurr", vec![Type::Fighting], Some("Iron Fist"), Some("Black Belt"));
        let defender = mon("Blissey", vec![Type::Normal], None, None);
        let drain_punch = mv(MoveSet {
            name: "Drain Punch".into(),
            bp: 75,
            move_type: Type::Fighting,
            flags: crate::moves::MoveFlagSet { contact: true, punch: true, ..Default::default() },
            ..Default::default()
        });
        let mut field = Field::default();
        field.attacker_side.is_helping_hand = true;
        let ctx = HitContext::new(Generation::default(), &attacker, &defender, &drain_punch, &field);
        let chain = base_power_chain(&ctx);
        assert_eq!(chain.mods(), &[6144, 4915, 4915]);
        let events = chain.into_events();
        assert!(events.contains(&TraceEvent::SideCondition { role: Role::Attacker, name: "Helping Hand" }));
        assert!(events.contains(&TraceEvent::Item { role: Role::Attacker, name: "Black Belt".into() }));
    }

    #[test]
    fn test_terrain_boost_by_generation() {
        let attacker = mon("Tapu Koko", vec![Type::Electric, Type::Fairy], None, None);
        let defender = mon("Blissey", vec![Type::Normal], None, None);
        let thunderbolt = mv(MoveSet { name: "Thunderbolt".into(), bp: 90, move_type: Type::Electric, ..Default::default() });
        let field = Field { terrain: Some(Terrain::Electric), ..Default::default() };

        let gen7 = Generation::from_num(7).unwrap();
        assert_eq!(base_power_chain(&HitContext::new(gen7, &attacker, &defender, &thunderbolt, &field)).mods(), &[6144]);
        let gen9 = Generation::default();
        assert_eq!(base_power_chain(&HitContext::new(gen9, &attacker, &defender, &thunderbolt, &field)).mods(), &[5325]);
    }

    #[test]
    fn test_crest_power_boosts() {
        let defender = mon("Blissey", vec![Type::Normal], None, None);
        let field = Field::default();

        let feraligatr = mon("Feraligatr-Crest", vec![Type::Water], None, None);
        let crunch = mv(MoveSet {
            name: "Crunch".into(),
            bp: 80,
            move_type: Type::Dark,
            flags: crate::moves::MoveFlagSet { bite: true, contact: true, ..Default::default() },
            ..Default::default()
        });
        let ctx = HitContext::new(Generation::default(), &feraligatr, &defender, &crunch, &field);
        assert_eq!(base_power_chain(&ctx).mods(), &[6144]);

        let fearow = mon("Fearow-Crest", vec![Type::Normal, Type::Flying], None, None);
        let drill_peck = mv(MoveSet {
            name: "Drill Peck".into(),
            bp: 80,
            move_type: Type::Flying,
            flags: crate::moves::MoveFlagSet { stabbing: true, contact: true, ..Default::default() },
            ..Default::default()
        });
        let ctx = HitContext::new(Generation::default(), &fearow, &defender, &drill_peck, &field);
        assert_eq!(base_power_chain(&ctx).mods(), &[6144]);

        let druddigon = mon("Druddigon-Crest", vec![Type::Dragon], None, None);
        let outrage = mv(MoveSet { name: "Outrage".into(), bp: 120, move_type: Type::Dragon, ..Default::default() });
        let ctx = HitContext::new(Generation::default(), &druddigon, &defender, &outrage, &field);
        assert_eq!(base_power_chain(&ctx).mods(), &[5324]);

        // equal speed counts as outsped
        let beheeyem = mon("Beheeyem-Crest", vec![Type::Psychic], None, None);
        let ctx = HitContext::new(Generation::default(), &druddigon, &beheeyem, &outrage, &field);
        assert_eq!(base_power_chain(&ctx).mods(), &[5324, 2732]);
    }

    #[test]
    fn test_aura_break() {
        let attacker = mon("Xerneas", vec![Type::Fairy], Some("Fairy Aura"), None);
        let defender = mon("Zygarde", vec![Type::Dragon, Type::Ground], Some("Aura Break"), None);
        let moonblast = mv(MoveSet { name: "Moonblast".into(), bp: 95, move_type: Type::Fairy, ..Default::default() });
        let field = Field::default();
        let ctx = HitContext::new(Generation::default(), &attacker, &defender, &moonblast, &field);
        assert_eq!(base_power_chain(&ctx).mods(), &[3072]);

        let neutral = mon("Blissey", vec![Type::Normal], None, None);
        let ctx = HitContext::new(Generation::default(), &attacker, &neutral, &moonblast, &field);
        assert_eq!(base_power_chain(&ctx).mods(), &[5448]);
    }

    #[test]
    fn test_vile_vial_stays_with_its_holder() {
        let attacker = mon("Weavile", vec![Type::Dark, Type::Ice], None, None);
        let knock_off = mv(MoveSet { name: "Knock Off".into(), bp: 65, move_type: Type::Dark, ..Default::default() });
        let field = Field::default();

        let venomicon = mon("Venomicon-Epilogue", vec![Type::Poison, Type::Flying], None, Some("Vile Vial"));
        let ctx = HitContext::new(Generation::default(), &attacker, &venomicon, &knock_off, &field);
        assert!(knock_off_resisted(&ctx));
        assert!(base_power_chain(&ctx).is_empty());

        // only the matching species keeps it
        let other = mon("Toxapex", vec![Type::Poison, Type::Water], None, Some("Vile Vial"));
        let ctx = HitContext::new(Generation::default(), &attacker, &other, &knock_off, &field);
        assert!(!knock_off_resisted(&ctx));

        let crested = mon("Probopass-Crest", vec![Type::Rock, Type::Steel], None, Some("Up-Grade"));
        let ctx = HitContext::new(Generation::default(), &attacker, &crested, &knock_off, &field);
        assert!(knock_off_resisted(&ctx));
    }

    #[test]
    fn test_vile_vial_boosts_poison_and_flying() {
        let attacker = mon("Venomicon-Epilogue", vec![Type::Poison, Type::Flying], None, Some("Vile Vial"));
        let defender = mon("Blissey", vec![Type::Normal], None, None);
        let field = Field::default();
        for (name, move_type) in [("Sludge Bomb", Type::Poison), ("Hurricane", Type::Flying)] {
            let attack = mv(MoveSet { name: name.into(), bp: 90, move_type, ..Default::default() });
            let ctx = HitContext::new(Generation::default(), &attacker, &defender, &attack, &field);
            let chain = base_power_chain(&ctx);
            assert_eq!(chain.mods(), &[4915], "{name}");
            assert!(chain.into_events().contains(&TraceEvent::Item { role: Role::Attacker, name: "Vile Vial".into() }));
        }

        let psychic = mv(MoveSet { name: "Psychic".into(), bp: 90, move_type: Type::Psychic, ..Default::default() });
        let ctx = HitContext::new(Generation::default(), &attacker, &defender, &psychic, &field);
        assert!(base_power_chain(&ctx).is_empty());
    }
}
