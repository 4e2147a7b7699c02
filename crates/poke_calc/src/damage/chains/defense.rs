//! Defense stat resolution and the defense modifier chain.

use super::{
    attacker_ability, defender_ability, defender_item, field_event, push_with, run, weather_event, ChainRule, Step,
};
use crate::damage::context::HitContext;
use crate::damage::crest;
use crate::damage::formula::{get_modified_stat, of16, poke_round};
use crate::damage::modifier::{Chain, Modifier};
use crate::damage::stats::{get_qp_boosted_stat, get_shell_side_arm_category, is_qp_active};
use crate::damage::trace::{ModifierTrace, Role, TraceEvent};
use crate::entities::Pokemon;
use crate::field::{ChromaticField, Field, Terrain, Weather};
use crate::moves::{Move, MoveCategory};
use crate::stats::StatId;
use crate::types::Type;

/// Whether the move is checked against Defense rather than Special Defense.
pub fn hits_physical(attacker: &Pokemon, defender: &Pokemon, mv: &Move, field: &Field) -> bool {
    mv.is_physical()
        || mv.named(&["Psyshock", "Psystrike", "Secret Sword"])
        || (mv.named(&["Shell Side Arm"]) && get_shell_side_arm_category(attacker, defender) == MoveCategory::Physical)
        // Cave Power Gem targets the lower of the two
        || (mv.named(&["Power Gem"])
            && field.is_field(ChromaticField::Cave)
            && defender.stats.def < defender.stats.spd)
}

/// Final defense stat for one hit, with the stat it was read from.
pub fn calculate_defense(ctx: &HitContext<'_>, trace: &mut ModifierTrace) -> (u32, StatId) {
    let (attacker, defender, field) = (ctx.attacker, ctx.defender, ctx.field);
    let physical = ctx.hits_physical;
    let natural = if physical { StatId::Def } else { StatId::Spd };
    let stat = crest::defense_stat(defender, ctx.mv, physical).unwrap_or(natural);
    let raw = defender.raw_stats[stat];
    let boost = defender.boosts[stat];

    let mut defense = if boost == 0 || (ctx.is_crit && boost > 0) || ctx.mv.ignore_defensive {
        raw
    } else if attacker.has_ability(&["Unaware"]) || (defender.named(&["Sylbeon"]) && ctx.is_field(ChromaticField::Rainbow))
    {
        trace.push_ability(Role::Attacker, attacker);
        raw
    } else if attacker.grit_stages >= 1 {
        // first grit stage ignores the target's stat changes
        trace.push(TraceEvent::GritStages(attacker.grit_stages));
        trace.push_field(field.chromatic_field);
        raw
    } else {
        trace.push(TraceEvent::Boost { role: Role::Defender, stat, stage: boost });
        get_modified_stat(raw, boost, ctx.gen_num())
    };

    // Weather boosts apply outside the chain
    if field.has_weather(&[Weather::Sand]) && defender.has_type(Type::Rock) {
        if !physical {
            defense = poke_round(defense as f64 * 3.0 / 2.0) as u32;
            trace.push_weather(field.weather);
        } else if ctx.is_field(ChromaticField::Cave) {
            defense = poke_round(defense as f64 * 6.0 / 5.0) as u32;
            trace.push_weather(field.weather);
            trace.push_field(field.chromatic_field);
        }
    }
    if field.has_weather(&[Weather::Snow])
        && (defender.has_type(Type::Ice) || defender.named(&["Empoleon-Crest"]))
        && physical
    {
        defense = poke_round(defense as f64 * 3.0 / 2.0) as u32;
        trace.push_weather(field.weather);
    }

    let defense = crest::boost_defense(ctx, defense, trace);

    let chain = defense_chain(ctx);
    let modifier = chain.compose(410, 131072);
    trace.extend(chain.into_events());
    let defense = crest::cryogonal_defense(defender, ctx.mv, defense);
    let defense = of16(poke_round(defense as f64 * modifier as f64 / 4096.0).max(1.0) as u64) as u32;
    log::debug!("defense for {}: {} (chain {})", ctx.mv.name, defense, modifier);
    (defense, stat)
}

// The defensive ability ladder nests: once a holder matches an outer
// condition, the later branches are skipped even if nothing fired.

fn marvel_scale(ctx: &HitContext<'_>, chain: &mut Chain) -> bool {
    let defender = ctx.defender;
    if !(defender.has_ability(&["Marvel Scale"]) && ctx.hits_physical) {
        return false;
    }
    if defender.is_statused() {
        push_with(chain, Modifier::ONE_POINT_FIVE, [defender_ability(ctx)]);
    } else if ctx.is_field(ChromaticField::DragonsDen) {
        push_with(chain, Modifier::ONE_POINT_FIVE, [defender_ability(ctx), field_event(ctx)]);
    }
    true
}

fn flower_gift(ctx: &HitContext<'_>, chain: &mut Chain) -> bool {
    let defender = ctx.defender;
    if !(defender.named(&["Cherrim"]) && defender.has_ability(&["Flower Gift"]) && !ctx.hits_physical) {
        return false;
    }
    if ctx.field.has_weather(&[Weather::Sun, Weather::HarshSun]) {
        push_with(chain, Modifier::ONE_POINT_FIVE, [defender_ability(ctx), weather_event(ctx)]);
    } else if ctx.is_field(ChromaticField::FlowerGarden) {
        push_with(chain, Modifier::ONE_POINT_FIVE, [defender_ability(ctx), field_event(ctx)]);
    }
    true
}

fn ally_flower_gift(ctx: &HitContext<'_>, chain: &mut Chain) -> bool {
    let applies = ctx.field.defender_side.is_flower_gift
        && ctx.field.has_weather(&[Weather::Sun, Weather::HarshSun])
        && !ctx.hits_physical;
    if applies {
        push_with(
            chain,
            Modifier::ONE_POINT_FIVE,
            [weather_event(ctx), Some(TraceEvent::SideCondition { role: Role::Defender, name: "Flower Gift" })],
        );
    }
    applies
}

fn grass_pelt(ctx: &HitContext<'_>, chain: &mut Chain) -> bool {
    if !(ctx.defender.has_ability(&["Grass Pelt"]) && ctx.hits_physical) {
        return false;
    }
    if ctx.is_field(ChromaticField::FlowerGarden) {
        push_with(chain, Modifier::DOUBLE, [defender_ability(ctx), field_event(ctx)]);
    } else if ctx.field.has_terrain(Terrain::Grassy) {
        push_with(chain, Modifier::ONE_POINT_FIVE, [defender_ability(ctx)]);
    }
    true
}

fn fur_coat(ctx: &HitContext<'_>, chain: &mut Chain) -> bool {
    let applies = ctx.defender.has_ability(&["Fur Coat"]) && ctx.hits_physical;
    if applies {
        push_with(chain, Modifier::DOUBLE, [defender_ability(ctx)]);
    }
    applies
}

fn ruin(ctx: &HitContext<'_>, chain: &mut Chain) -> bool {
    let (attacker, defender, field) = (ctx.attacker, ctx.defender, ctx.field);
    let sword =
        (attacker.has_ability(&["Sword of Ruin"]) || field.is_sword_of_ruin) && !defender.has_ability(&["Sword of Ruin"]);
    let beads =
        (attacker.has_ability(&["Beads of Ruin"]) || field.is_beads_of_ruin) && !defender.has_ability(&["Beads of Ruin"]);
    if !((sword && ctx.hits_physical) || (beads && !ctx.hits_physical)) {
        return false;
    }
    let event = if attacker.has_ability(&["Sword of Ruin", "Beads of Ruin"]) {
        attacker_ability(ctx)
    } else if ctx.hits_physical {
        Some(TraceEvent::Condition("Sword of Ruin"))
    } else {
        Some(TraceEvent::Condition("Beads of Ruin"))
    };
    push_with(chain, Modifier::THREE_QUARTERS, [event]);
    true
}

fn quark_drive(ctx: &HitContext<'_>, chain: &mut Chain) -> bool {
    let defender = ctx.defender;
    if !is_qp_active(defender, ctx.field) {
        return false;
    }
    let boosted = get_qp_boosted_stat(defender, ctx.gen_num());
    let applies = (ctx.hits_physical && boosted == StatId::Def) || (!ctx.hits_physical && boosted == StatId::Spd);
    if applies {
        push_with(chain, Modifier::LIFE_ORB, [defender_ability(ctx)]);
    }
    applies
}

fn eviolite_vest(ctx: &HitContext<'_>, chain: &mut Chain) -> bool {
    let defender = ctx.defender;
    let applies = (defender.has_item(&["Eviolite"]) && (defender.named(&["Dipplin"]) || defender.nfe))
        || (!ctx.hits_physical && defender.has_item(&["Assault Vest"]));
    if applies {
        push_with(chain, Modifier::ONE_POINT_FIVE, [defender_item(ctx)]);
    }
    applies
}

fn species_item(ctx: &HitContext<'_>, chain: &mut Chain) -> bool {
    let defender = ctx.defender;
    let applies = (defender.has_item(&["Metal Powder"]) && defender.named(&["Ditto"]) && ctx.hits_physical)
        || (defender.has_item(&["Deep Sea Scale"]) && defender.named(&["Clamperl"]) && !ctx.hits_physical);
    if applies {
        push_with(chain, Modifier::DOUBLE, [defender_item(ctx)]);
    }
    applies
}

fn ring_arena_pads(ctx: &HitContext<'_>, chain: &mut Chain) -> bool {
    let applies =
        ctx.defender.has_item(&["Protective Pads"]) && ctx.is_field(ChromaticField::RingArena) && !ctx.hits_physical;
    if applies {
        push_with(chain, Modifier::LIFE_ORB, [defender_item(ctx), field_event(ctx)]);
    }
    applies
}

fn electrode_crest(ctx: &HitContext<'_>, chain: &mut Chain) -> bool {
    let applies = ctx.attacker.named(&["Electrode-Crest"]) && ctx.hits_physical;
    if applies {
        chain.push_mod(Modifier::HALF);
    }
    applies
}

const DEFENDER_ABILITIES: &[ChainRule] = &[marvel_scale, flower_gift, ally_flower_gift, grass_pelt, fur_coat];
const ITEMS: &[ChainRule] = &[eviolite_vest, species_item];

static DEFENSE_STEPS: [Step; 6] = [
    Step::FirstOf(DEFENDER_ABILITIES),
    Step::Each(ruin),
    Step::Each(quark_drive),
    Step::FirstOf(ITEMS),
    Step::Each(ring_arena_pads),
    Step::Each(electrode_crest),
];

pub fn defense_chain(ctx: &HitContext<'_>) -> Chain {
    run(&DEFENSE_STEPS, ctx)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::damage::generations::Generation;
    use crate::entities::PokemonSet;
    use crate::stats::StatsTable;
    use crate::moves::MoveSet;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn set(name: &str, types: Vec<Type>, ability: Option<&str>, item: Option<&str>) -> PokemonSet {
        PokemonSet {
            name: name.into(),
            types,
            base_stats: StatsTable { hp: 100, atk: 100, def: 100, spa: 100, spd: 100, spe: 100 },
            ability: ability.map(Into::into),
            item: item.map(Into::into),
            ..Default::default()
        }
    }

    fn special(name: &str, move_type: Type) -> Move {
        Move::from_set(MoveSet { name: name.into(), bp: 90, move_type, category: MoveCategory::Special, ..Default::default() })
            .unwrap()
    }

    #[test]
    fn test_sand_boosts_rock_special_defense() {
        let attacker = Pokemon::from_set(set("Starmie", vec![Type::Water], None, None)).unwrap();
        let defender = Pokemon::from_set(set("Tyranitar", vec![Type::Rock, Type::Dark], None, None)).unwrap();
        let surf = special("Surf", Type::Water);
        let field = Field { weather: Some(Weather::Sand), ..Default::default() };
        let mut ctx = HitContext::new(Generation::default(), &attacker, &defender, &surf, &field);
        ctx.hits_physical = hits_physical(&attacker, &defender, &surf, &field);
        let mut trace = ModifierTrace::new();
        let (defense, stat) = calculate_defense(&ctx, &mut trace);
        assert_eq!(stat, StatId::Spd);
        assert_eq!(defense, 354);
        assert!(trace.contains(&TraceEvent::Weather(Weather::Sand)));
    }

    #[test]
    fn test_crit_ignores_defense_boost() {
        let attacker = Pokemon::from_set(set("Starmie", vec![Type::Water], None, None)).unwrap();
        let mut boosted = set("Blissey", vec![Type::Normal], None, None);
        boosted.boosts.spd = Some(2);
        let defender = Pokemon::from_set(boosted).unwrap();
        let surf = special("Surf", Type::Water);
        let field = Field::default();
        let ctx = HitContext { is_crit: true, hits_physical: false, ..HitContext::new(Generation::default(), &attacker, &defender, &surf, &field) };
        assert_eq!(calculate_defense(&ctx, &mut ModifierTrace::new()).0, 236);
        let ctx = HitContext { hits_physical: false, ..HitContext::new(Generation::default(), &attacker, &defender, &surf, &field) };
        assert_eq!(calculate_defense(&ctx, &mut ModifierTrace::new()).0, 472);
    }

    #[rstest]
    #[case(Some("Assault Vest"), false, &[6144])]
    #[case(Some("Assault Vest"), true, &[])]
    #[case(Some("Eviolite"), true, &[6144])]
    fn test_defensive_items(#[case] item: Option<&str>, #[case] physical: bool, #[case] expected: &[u16]) {
        let attacker = Pokemon::from_set(set("Starmie", vec![Type::Water], None, None)).unwrap();
        let mut bag = set("Chansey", vec![Type::Normal], None, item);
        bag.nfe = true;
        let defender = Pokemon::from_set(bag).unwrap();
        let surf = special("Surf", Type::Water);
        let field = Field::default();
        let ctx = HitContext { hits_physical: physical, ..HitContext::new(Generation::default(), &attacker, &defender, &surf, &field) };
        assert_eq!(defense_chain(&ctx).mods(), expected);
    }

    #[test]
    fn test_marvel_scale_blocks_later_branches() {
        let attacker = Pokemon::from_set(set("Machamp", vec![Type::Fighting], None, None)).unwrap();
        let defender = Pokemon::from_set(set("Milotic", vec![Type::Water], Some("Marvel Scale"), None)).unwrap();
        let mv = special("Close Combat", Type::Fighting);
        let field = Field::default();
        let ctx = HitContext { hits_physical: true, ..HitContext::new(Generation::default(), &attacker, &defender, &mv, &field) };
        assert!(defense_chain(&ctx).is_empty());
    }

    #[test]
    fn test_crest_defenses() {
        let attacker = Pokemon::from_set(set("Starmie", vec![Type::Water], None, None)).unwrap();
        let surf = special("Surf", Type::Water);
        let field = Field::default();

        // Infernape takes special hits on its Special Attack
        let mut bag = set("Infernape-Crest", vec![Type::Fire, Type::Fighting], None, None);
        bag.base_stats.spa = 150;
        let infernape = Pokemon::from_set(bag).unwrap();
        let ctx = HitContext { hits_physical: false, ..HitContext::new(Generation::default(), &attacker, &infernape, &surf, &field) };
        let (defense, stat) = calculate_defense(&ctx, &mut ModifierTrace::new());
        assert_eq!((defense, stat), (336, StatId::Spa));

        let phione = Pokemon::from_set(set("Phione-Crest", vec![Type::Water], None, None)).unwrap();
        let ctx = HitContext { hits_physical: false, ..HitContext::new(Generation::default(), &attacker, &phione, &surf, &field) };
        assert_eq!(calculate_defense(&ctx, &mut ModifierTrace::new()).0, 354);

        let mut relicanth = Pokemon::from_set(set("Relicanth-Crest", vec![Type::Water, Type::Rock], None, None)).unwrap();
        relicanth.relicanth_turns = 1;
        let ctx = HitContext { hits_physical: false, ..HitContext::new(Generation::default(), &attacker, &relicanth, &surf, &field) };
        let mut trace = ModifierTrace::new();
        // 236 * 135 / 100
        assert_eq!(calculate_defense(&ctx, &mut trace).0, 319);
        assert!(trace.contains(&TraceEvent::RelicanthTurns { role: Role::Defender, turns: 1 }));
    }

    #[test]
    fn test_electrode_crest_halves_physical_defense() {
        let attacker = Pokemon::from_set(set("Electrode-Crest", vec![Type::Electric], None, None)).unwrap();
        let defender = Pokemon::from_set(set("Skarmory", vec![Type::Steel, Type::Flying], None, None)).unwrap();
        let mv = special("Tackle", Type::Normal);
        let field = Field::default();
        let physical = HitContext { hits_physical: true, ..HitContext::new(Generation::default(), &attacker, &defender, &mv, &field) };
        assert_eq!(defense_chain(&physical).mods(), &[2048]);
        let special = HitContext { hits_physical: false, ..HitContext::new(Generation::default(), &attacker, &defender, &mv, &field) };
        assert!(defense_chain(&special).is_empty());
    }
}
