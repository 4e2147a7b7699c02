//! Move-specific base power.
//!
//! Variable-power moves are looked up in [`BP_FORMULAS`]; everything else
//! keeps its listed power. Chromatic fields then adjust a handful of moves
//! before the base power modifier chain runs.

use phf::phf_map;

use super::chains;
use super::crest;
use super::context::{HitContext, TurnOrder};
use super::formula::{of16, poke_round};
use super::generations::GenMechanics;
use super::stats::{count_boosts, get_weight, is_grounded, is_qp_active};
use super::trace::{ModifierTrace, Role, TraceEvent};
use crate::entities::{Pokemon, Status};
use crate::field::{ChromaticField, Field, Switching, Terrain, Weather};
use crate::items::{fling_power, natural_gift};
use crate::moves::{Move, MoveCategory, MoveTarget};
use crate::types::Type;

const MULTIPULSE_MOVES: [&str; 3] = ["Hyper Voice", "Tri Attack", "Echoed Voice"];

const HP_SCALED_MOVES: [&str; 3] = ["Dragon Energy", "Eruption", "Water Spout"];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum BasePowerFormula {
    Payback,
    BoltBeak,
    Pursuit,
    ElectroBall,
    GyroBall,
    Punishment,
    WeightBased,
    WeightRatio,
    Hex,
    BarbBarrage,
    StoredPower,
    Acrobatics,
    Assurance,
    WakeUpSlap,
    SmellingSalts,
    WeatherBall,
    TerrainPulse,
    RisingVoltage,
    Psyblade,
    Fling,
    HpScaled,
    Flail,
    NaturalGift,
    NaturePower,
    WaterShuriken,
    TripleAxel,
    TripleKick,
    CrushGrip,
    HardPress,
    TeraBlast,
    SpitUp,
}

static BP_FORMULAS: phf::Map<&'static str, BasePowerFormula> = phf_map! {
    "Payback" => BasePowerFormula::Payback,
    "Bolt Beak" => BasePowerFormula::BoltBeak,
    "Fishious Rend" => BasePowerFormula::BoltBeak,
    "Pursuit" => BasePowerFormula::Pursuit,
    "Electro Ball" => BasePowerFormula::ElectroBall,
    "Gyro Ball" => BasePowerFormula::GyroBall,
    "Punishment" => BasePowerFormula::Punishment,
    "Low Kick" => BasePowerFormula::WeightBased,
    "Grass Knot" => BasePowerFormula::WeightBased,
    "Heavy Slam" => BasePowerFormula::WeightRatio,
    "Heat Crash" => BasePowerFormula::WeightRatio,
    "Hex" => BasePowerFormula::Hex,
    "Infernal Parade" => BasePowerFormula::Hex,
    "Barb Barrage" => BasePowerFormula::BarbBarrage,
    "Stored Power" => BasePowerFormula::StoredPower,
    "Power Trip" => BasePowerFormula::StoredPower,
    "Acrobatics" => BasePowerFormula::Acrobatics,
    "Assurance" => BasePowerFormula::Assurance,
    "Wake-Up Slap" => BasePowerFormula::WakeUpSlap,
    "Smelling Salts" => BasePowerFormula::SmellingSalts,
    "Weather Ball" => BasePowerFormula::WeatherBall,
    "Terrain Pulse" => BasePowerFormula::TerrainPulse,
    "Rising Voltage" => BasePowerFormula::RisingVoltage,
    "Psyblade" => BasePowerFormula::Psyblade,
    "Fling" => BasePowerFormula::Fling,
    "Dragon Energy" => BasePowerFormula::HpScaled,
    "Eruption" => BasePowerFormula::HpScaled,
    "Water Spout" => BasePowerFormula::HpScaled,
    "Flail" => BasePowerFormula::Flail,
    "Reversal" => BasePowerFormula::Flail,
    "Natural Gift" => BasePowerFormula::NaturalGift,
    "Nature Power" => BasePowerFormula::NaturePower,
    "Water Shuriken" => BasePowerFormula::WaterShuriken,
    "Triple Axel" => BasePowerFormula::TripleAxel,
    "Triple Kick" => BasePowerFormula::TripleKick,
    "Crush Grip" => BasePowerFormula::CrushGrip,
    "Wring Out" => BasePowerFormula::CrushGrip,
    "Hard Press" => BasePowerFormula::HardPress,
    "Tera Blast" => BasePowerFormula::TeraBlast,
    "Spit Up" => BasePowerFormula::SpitUp,
};

/// The move Nature Power turns into.
#[derive(Clone, Debug, PartialEq)]
pub struct NaturePower {
    /// Name of the called move; `None` when Nature Power fails outright
    pub name: Option<&'static str>,
    pub bp: u32,
    pub category: MoveCategory,
    pub hits: u8,
    pub drain: Option<(u32, u32)>,
}

fn prankster_blocked_by(attacker: &Pokemon) -> bool {
    attacker.has_ability(&["Prankster"])
}

/// Resolve the move called by Nature Power from terrain, then chromatic field.
pub fn resolve_nature_power(attacker: &Pokemon, defender: &Pokemon, field: &Field) -> NaturePower {
    let mut called = NaturePower { name: None, bp: 0, category: MoveCategory::Special, hits: 1, drain: None };

    let telepathy = attacker.has_ability(&["Telepathy"]) && field.is_field(ChromaticField::AncientRuins);
    // A Prankster-boosted status move cannot affect Dark types
    if prankster_blocked_by(attacker) && (defender.types.contains(&Type::Dark) || telepathy) {
        return called;
    }

    let (bp, name) = match field.terrain {
        Some(Terrain::Electric) => (90, "Thunderbolt"),
        Some(Terrain::Grassy) => (90, "Energy Ball"),
        Some(Terrain::Misty) => (95, "Moonblast"),
        Some(Terrain::Psychic) => {
            if is_grounded(defender, field, &field.defender_side) && (prankster_blocked_by(attacker) || telepathy) {
                return called;
            }
            (90, "Psychic")
        }
        None => (80, "Tri Attack"),
    };
    called.bp = bp;
    called.name = Some(name);
    if name != "Tri Attack" {
        return called;
    }

    use ChromaticField::*;
    let Some(chromatic) = field.chromatic_field else {
        return called;
    };
    let (bp, name, category) = match chromatic {
        Jungle => (90, "Bug Buzz", MoveCategory::Special),
        Eclipse => (80, "Dark Pulse", MoveCategory::Special),
        DragonsDen => (120, "Make It Rain", MoveCategory::Special),
        ThunderingPlateau => (60, "Shock Wave", MoveCategory::Special),
        StarlightArena => (0, "Lunar Dance", MoveCategory::Special),
        RingArena => (120, "Close Combat", MoveCategory::Physical),
        VolcanicTop => (eruption_power(attacker), "Eruption", MoveCategory::Special),
        Sky => (100, "Bleakwind Storm", MoveCategory::Special),
        HauntedGraveyard => (90, "Phantom Force", MoveCategory::Physical),
        FlowerGarden => (90, "Petal Blizzard", MoveCategory::Special),
        Desert => (90, "Thousand Waves", MoveCategory::Physical),
        SnowyPeaks => (120, "Avalanche", MoveCategory::Physical),
        BlessedSanctum => (100, "Judgment", MoveCategory::Special),
        AcidicWasteland => (90, "Sludge Bomb", MoveCategory::Special),
        AncientRuins => (80, "Eerie Spell", MoveCategory::Special),
        Cave => (75, "Rock Slide", MoveCategory::Physical),
        Factory => (50, "Gear Grind", MoveCategory::Physical),
        WatersSurface => (90, "Surf", MoveCategory::Special),
        Underwater => (80, "Dive", MoveCategory::Physical),
        Rainbow => (100, "Jungdement", MoveCategory::Physical),
        Undercolony => (80, "Leech Life", MoveCategory::Physical),
        Inverse => (0, "Trick Room", MoveCategory::Special),
    };
    called.bp = bp;
    called.name = Some(name);
    called.category = category;
    if chromatic == Factory {
        called.hits = 2;
    } else if chromatic == Undercolony {
        called.drain = Some((1, 2));
    }
    called
}

fn eruption_power(attacker: &Pokemon) -> u32 {
    (150 * attacker.cur_hp() / attacker.max_hp().max(1)).max(1)
}

/// Category, target and hit changes that later stages read from the move.
///
/// Applied to the effective move once per calculation, before any base
/// power is computed.
pub fn apply_move_overrides(attacker: &Pokemon, defender: &Pokemon, mv: &mut Move, field: &Field, trace: &mut ModifierTrace) {
    if mv.named(&["Nature Power"]) {
        let called = resolve_nature_power(attacker, defender, field);
        mv.category = called.category;
        mv.secondaries = true;
        mv.hits = called.hits;
        if called.drain.is_some() {
            mv.drain = called.drain;
        }
        if called.hits > 1 {
            trace.push(TraceEvent::Hits(called.hits));
        }
    }

    if mv.named(&["Magnet Bomb"]) && field.is_field(ChromaticField::Factory) {
        mv.category = MoveCategory::Special;
        trace.push_field(field.chromatic_field);
    }

    if mv.named(&["Expanding Force"])
        && is_grounded(attacker, field, &field.attacker_side)
        && field.has_terrain(Terrain::Psychic)
    {
        mv.target = MoveTarget::AllAdjacentFoes;
    }
}

fn hp_thresholds(percent: u32, table: &[(u32, u32)], fallback: u32) -> u32 {
    table.iter().find(|&&(limit, _)| percent <= limit).map_or(fallback, |&(_, bp)| bp)
}

/// `max(1, floor(floor((mult * x + 2047) / 4096) / 100))` where x scales the
/// defender's remaining HP to 409600.
fn remaining_hp_power(defender: &Pokemon, mult: u64) -> u32 {
    let x = 100 * (defender.cur_hp() as u64 * 4096 / defender.max_hp().max(1) as u64);
    let bp = ((mult * x + 2047) / 4096 / 100) as u32;
    if bp == 0 {
        1
    } else {
        bp
    }
}

/// Base power from the move's own formula, before field adjustments.
///
/// Most formulas record the computed power in the trace.
fn formula_power(ctx: &HitContext<'_>, formula: BasePowerFormula, trace: &mut ModifierTrace) -> u32 {
    use BasePowerFormula as F;
    let (attacker, defender, mv, field) = (ctx.attacker, ctx.defender, ctx.mv, ctx.field);
    let doubled_if = |cond: bool| if cond { mv.bp * 2 } else { mv.bp };

    let bp = match formula {
        F::Payback => doubled_if(ctx.turn_order == TurnOrder::Last),
        F::BoltBeak => doubled_if(ctx.turn_order != TurnOrder::Last),
        F::Pursuit => {
            let switching = field.defender_side.is_switching == Some(Switching::Out);
            if switching {
                trace.push(TraceEvent::SideCondition { role: Role::Defender, name: "Switching Out" });
            }
            doubled_if(switching)
        }
        F::ElectroBall => {
            if defender.stats.spe == 0 {
                40
            } else {
                match attacker.stats.spe / defender.stats.spe {
                    r if r >= 4 => 150,
                    3 => 120,
                    2 => 80,
                    1 => 60,
                    _ => 40,
                }
            }
        }
        F::GyroBall => {
            if attacker.stats.spe == 0 {
                1
            } else {
                (25 * defender.stats.spe / attacker.stats.spe + 1).min(150)
            }
        }
        F::Punishment => (60 + 20 * count_boosts(ctx.gen_num(), &defender.boosts)).min(200),
        F::WeightBased => {
            let w = get_weight(defender, Role::Defender, trace);
            match w {
                w if w >= 200.0 => 120,
                w if w >= 100.0 => 100,
                w if w >= 50.0 => 80,
                w if w >= 25.0 => 60,
                w if w >= 10.0 => 40,
                _ => 20,
            }
        }
        F::WeightRatio => {
            let ratio = get_weight(attacker, Role::Attacker, trace) / get_weight(defender, Role::Defender, trace);
            match ratio {
                r if r >= 5.0 => 120,
                r if r >= 4.0 => 100,
                r if r >= 3.0 => 80,
                r if r >= 2.0 => 60,
                _ => 40,
            }
        }
        F::Hex => doubled_if(defender.is_statused() || defender.has_ability(&["Comatose"])),
        F::BarbBarrage => doubled_if(defender.has_status(&[Status::Poison, Status::Toxic])),
        F::StoredPower => 20 + 20 * count_boosts(ctx.gen_num(), &attacker.boosts),
        F::Acrobatics => {
            let mut bp = doubled_if(
                attacker.has_item(&["Flying Gem"]) || attacker.item.is_none() || is_qp_active(attacker, field),
            );
            // Ring Arena treats the user as holding nothing
            if ctx.is_field(ChromaticField::RingArena) && bp == mv.bp {
                bp *= 2;
                trace.push_field(field.chromatic_field);
            }
            bp
        }
        // The Parental Bond event already explains the doubled second strike
        F::Assurance => return doubled_if(ctx.is_child()),
        F::WakeUpSlap => doubled_if(defender.has_status(&[Status::Sleep]) || defender.has_ability(&["Comatose"])),
        F::SmellingSalts => doubled_if(defender.has_status(&[Status::Paralysis])),
        F::WeatherBall => {
            let mut bp = doubled_if(
                (field.weather.is_some() && !field.has_weather(&[Weather::StrongWinds]))
                    || (field.attacker_side.is_tailwind && ctx.is_field(ChromaticField::Sky)),
            );
            if field.has_weather(&[Weather::Sun, Weather::HarshSun, Weather::Rain, Weather::HeavyRain])
                && attacker.has_item(&["Utility Umbrella"])
                && !field.attacker_side.is_tailwind
            {
                bp = mv.bp;
            }
            bp
        }
        F::TerrainPulse => doubled_if(ctx.attacker_grounded() && field.terrain.is_some()),
        F::RisingVoltage => doubled_if(ctx.defender_grounded() && field.has_terrain(Terrain::Electric)),
        F::Psyblade => {
            if !field.has_terrain(Terrain::Electric) {
                return mv.bp;
            }
            trace.push_terrain(field.terrain);
            mv.bp * 3 / 2
        }
        F::Fling => {
            trace.push_item(Role::Attacker, attacker);
            fling_power(attacker.item_name())
        }
        F::HpScaled => eruption_power(attacker),
        F::Flail => {
            let p = 48 * attacker.cur_hp() / attacker.max_hp().max(1);
            hp_thresholds(p, &[(1, 200), (4, 150), (9, 100), (16, 80), (32, 40)], 20)
        }
        F::NaturalGift => {
            let gift = attacker.item.as_deref().filter(|item| item.ends_with("Berry")).and_then(natural_gift);
            let Some((_, power)) = gift else {
                return mv.bp;
            };
            trace.push_item(Role::Attacker, attacker);
            trace.push(TraceEvent::BasePower(mv.bp as f64));
            return power;
        }
        F::NaturePower => {
            let called = resolve_nature_power(attacker, defender, field);
            match called.name {
                Some(name) => trace.push(TraceEvent::MoveName(name.to_string())),
                None => {
                    trace.push(TraceEvent::MoveName(mv.name.clone()));
                    trace.push_ability(Role::Attacker, attacker);
                }
            }
            if field.is_field(ChromaticField::SnowyPeaks) && called.name == Some("Avalanche") {
                trace.push(TraceEvent::BasePower(called.bp as f64));
            }
            return called.bp;
        }
        F::WaterShuriken => {
            if attacker.named(&["Greninja-Ash"]) && attacker.has_ability(&["Battle Bond"]) {
                20
            } else {
                15
            }
        }
        F::TripleAxel | F::TripleKick => {
            let step = if formula == F::TripleAxel { 20 } else { 10 };
            let shown = match mv.hits {
                2 => step * 3,
                3 => step * 6,
                _ => step,
            };
            trace.push(TraceEvent::BasePower(shown as f64));
            return ctx.hit as u32 * step;
        }
        F::CrushGrip => remaining_hp_power(defender, 120),
        F::HardPress => remaining_hp_power(defender, 100),
        F::TeraBlast => {
            if attacker.tera_type == Some(Type::Stellar) {
                100
            } else {
                80
            }
        }
        F::SpitUp => mv.stockpiles as u32 * 100,
    };
    trace.push(TraceEvent::BasePower(bp as f64));
    bp
}

/// Base power before the modifier chain: formula first, then field tweaks.
pub fn move_base_power(ctx: &HitContext<'_>, trace: &mut ModifierTrace) -> u32 {
    let (attacker, mv, field) = (ctx.attacker, ctx.mv, ctx.field);
    let mut bp = match BP_FORMULAS.get(mv.name.as_str()) {
        Some(&formula) => formula_power(ctx, formula, trace),
        None => mv.bp,
    };

    let field_note = |bp: u32, trace: &mut ModifierTrace| {
        trace.push(TraceEvent::BasePower(bp as f64));
        trace.push_field(field.chromatic_field);
        bp
    };
    if ctx.is_field(ChromaticField::Desert) && mv.named(&["Dig"]) {
        bp = field_note(100, trace);
    }
    if ctx.is_field(ChromaticField::SnowyPeaks) && mv.named(&["Avalanche"]) {
        bp = field_note(mv.bp * 2, trace);
    }
    if ctx.is_field(ChromaticField::BlessedSanctum) && mv.named(&MULTIPULSE_MOVES) {
        bp = 100;
        trace.push(TraceEvent::MoveName("Judgment".to_string()));
    }
    if ctx.is_field(ChromaticField::Undercolony) && mv.named(&["Silver Wind"]) {
        bp = field_note(mv.bp + 10 * count_boosts(ctx.gen_num(), &attacker.boosts), trace);
    }
    bp
}

/// Final base power for one hit, or 0 when the move deals no damage.
///
/// Stores the pre-chain power in `ctx.base_power` for the chain rules
/// that inspect it (Technician).
pub fn calculate_base_power(ctx: &mut HitContext<'_>, trace: &mut ModifierTrace) -> u32 {
    let bp = crest::adjust_base_power(ctx.attacker, ctx.mv, move_base_power(ctx, trace) as f64, trace);
    if bp == 0.0 {
        log::debug!("{} has no base power", ctx.mv.name);
        return 0;
    }
    if ctx.mv.is_z || ctx.mv.is_max {
        trace.push(TraceEvent::BasePower(ctx.mv.bp as f64));
    }
    ctx.base_power = bp;

    let chain = chains::base_power_chain(ctx);
    let modifier = chain.compose(41, 2097152);
    trace.extend(chain.into_events());
    let mut bp = of16(poke_round(bp * modifier as f64 / 4096.0).max(1.0) as u64) as u32;

    let (attacker, mv) = (ctx.attacker, ctx.mv);
    let tera_floor = ctx.gen.has_terastallization()
        && attacker.tera_type.is_some_and(|tera| mv.move_type == tera && attacker.has_type(tera))
        && mv.hits == 1
        && mv.priority <= 0
        && mv.bp > 0
        && !mv.named(&HP_SCALED_MOVES)
        && bp < 60;
    if tera_floor {
        bp = 60;
        trace.push(TraceEvent::BasePower(60.0));
    }
    bp
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::damage::generations::Generation;
    use crate::entities::PokemonSet;
    use crate::moves::MoveSet;
    use crate::stats::StatsTable;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn mon(name: &str, types: Vec<Type>, spe: u32, weightkg: f64) -> Pokemon {
        Pokemon::from_set(PokemonSet {
            name: name.into(),
            types,
            base_stats: StatsTable { hp: 80, atk: 100, def: 80, spa: 80, spd: 80, spe },
            weightkg,
            ..Default::default()
        })
        .unwrap()
    }

    fn mv(name: &str, bp: u32, move_type: Type) -> Move {
        Move::from_set(MoveSet { name: name.into(), bp, move_type, ..Default::default() }).unwrap()
    }

    fn ctx<'a>(attacker: &'a Pokemon, defender: &'a Pokemon, mv: &'a Move, field: &'a Field) -> HitContext<'a> {
        HitContext::new(Generation::default(), attacker, defender, mv, field)
    }

    #[rstest]
    #[case(250.0, 120)]
    #[case(100.0, 100)]
    #[case(60.0, 80)]
    #[case(9.9, 20)]
    fn test_low_kick_weight(#[case] weightkg: f64, #[case] expected: u32) {
        let attacker = mon("Conkeldurr", vec![Type::Fighting], 45, 87.0);
        let defender = mon("Target", vec![Type::Normal], 45, weightkg);
        let low_kick = mv("Low Kick", 0, Type::Fighting);
        let field = Field::default();
        let mut trace = ModifierTrace::new();
        assert_eq!(move_base_power(&ctx(&attacker, &defender, &low_kick, &field), &mut trace), expected);
        assert!(trace.contains(&TraceEvent::BasePower(expected as f64)));
    }

    #[test]
    fn test_speed_formulas() {
        let fast = mon("Jolteon", vec![Type::Electric], 130, 24.5);
        let slow = mon("Ferrothorn", vec![Type::Grass, Type::Steel], 20, 110.0);
        let field = Field::default();
        let mut trace = ModifierTrace::new();

        let electro_ball = mv("Electro Ball", 0, Type::Electric);
        // floor(296 / 76) = 3
        assert_eq!(move_base_power(&ctx(&fast, &slow, &electro_ball, &field), &mut trace), 120);

        // floor(25 * 296 / 76) + 1 = 98
        let gyro_ball = mv("Gyro Ball", 0, Type::Steel);
        assert_eq!(move_base_power(&ctx(&slow, &fast, &gyro_ball, &field), &mut trace), 98);

        let payback = mv("Payback", 50, Type::Dark);
        assert_eq!(move_base_power(&ctx(&slow, &fast, &payback, &field), &mut trace), 100);
        assert_eq!(move_base_power(&ctx(&fast, &slow, &payback, &field), &mut trace), 50);
    }

    #[test]
    fn test_hp_formulas() {
        let mut attacker = mon("Typhlosion", vec![Type::Fire], 100, 79.5);
        let mut defender = mon("Blissey", vec![Type::Normal], 55, 46.8);
        let field = Field::default();
        let mut trace = ModifierTrace::new();

        let eruption = mv("Eruption", 150, Type::Fire);
        // floor(150 * 150 / 301)
        attacker.original_cur_hp = 150;
        assert_eq!(move_base_power(&ctx(&attacker, &defender, &eruption, &field), &mut trace), 74);

        let flail = mv("Flail", 0, Type::Normal);
        attacker.original_cur_hp = 1;
        assert_eq!(move_base_power(&ctx(&attacker, &defender, &flail, &field), &mut trace), 200);

        let crush_grip = mv("Crush Grip", 0, Type::Normal);
        assert_eq!(move_base_power(&ctx(&attacker, &defender, &crush_grip, &field), &mut trace), 120);
        defender.original_cur_hp = 1;
        assert_eq!(move_base_power(&ctx(&attacker, &defender, &crush_grip, &field), &mut trace), 1);
    }

    #[test]
    fn test_nature_power_resolution() {
        let attacker = mon("Smeargle", vec![Type::Normal], 75, 58.0);
        let defender = mon("Gengar", vec![Type::Ghost, Type::Poison], 110, 40.5);

        let electric = Field { terrain: Some(Terrain::Electric), ..Default::default() };
        let called = resolve_nature_power(&attacker, &defender, &electric);
        assert_eq!(called.name, Some("Thunderbolt"));
        assert_eq!(called.bp, 90);

        let factory = Field { chromatic_field: Some(ChromaticField::Factory), ..Default::default() };
        let called = resolve_nature_power(&attacker, &defender, &factory);
        assert_eq!(called.name, Some("Gear Grind"));
        assert_eq!(called.category, MoveCategory::Physical);
        assert_eq!(called.hits, 2);

        let mut pranked = attacker.clone();
        pranked.ability = Some("Prankster".into());
        let dark = mon("Umbreon", vec![Type::Dark], 65, 27.0);
        assert_eq!(resolve_nature_power(&pranked, &dark, &Field::default()).bp, 0);
    }

    #[test]
    fn test_move_overrides() {
        let attacker = mon("Smeargle", vec![Type::Normal], 75, 58.0);
        let defender = mon("Gengar", vec![Type::Ghost, Type::Poison], 110, 40.5);
        let undercolony = Field { chromatic_field: Some(ChromaticField::Undercolony), ..Default::default() };
        let mut nature_power = mv("Nature Power", 0, Type::Normal);
        let mut trace = ModifierTrace::new();
        apply_move_overrides(&attacker, &defender, &mut nature_power, &undercolony, &mut trace);
        assert_eq!(nature_power.category, MoveCategory::Physical);
        assert_eq!(nature_power.drain, Some((1, 2)));

        let psychic = Field { terrain: Some(Terrain::Psychic), ..Default::default() };
        let mut expanding_force = mv("Expanding Force", 80, Type::Psychic);
        apply_move_overrides(&attacker, &defender, &mut expanding_force, &psychic, &mut trace);
        assert_eq!(expanding_force.target, MoveTarget::AllAdjacentFoes);
    }

    #[test]
    fn test_technician_and_tera_floor() {
        let mut attacker = mon("Scizor", vec![Type::Bug, Type::Steel], 65, 118.0);
        attacker.ability = Some("Technician".into());
        let defender = mon("Blissey", vec![Type::Normal], 55, 46.8);
        let field = Field::default();
        let bullet_punch = Move { priority: 1, ..mv("Bullet Punch", 40, Type::Steel) };
        let mut trace = ModifierTrace::new();
        let mut hit = ctx(&attacker, &defender, &bullet_punch, &field);
        assert_eq!(calculate_base_power(&mut hit, &mut trace), 60);
        assert!(trace.has_ability(Role::Attacker, "Technician"));

        let mut tera = mon("Dragonite", vec![Type::Dragon, Type::Flying], 80, 210.0);
        tera.tera_type = Some(Type::Normal);
        let rapid_spin = mv("Rapid Spin", 50, Type::Normal);
        let mut trace = ModifierTrace::new();
        let mut hit = ctx(&tera, &defender, &rapid_spin, &field);
        assert_eq!(calculate_base_power(&mut hit, &mut trace), 60);
        assert!(trace.contains(&TraceEvent::BasePower(60.0)));
    }

    #[test]
    fn test_field_tweaks() {
        let attacker = mon("Beautifly", vec![Type::Bug, Type::Flying], 65, 28.4);
        let defender = mon("Blissey", vec![Type::Normal], 55, 46.8);
        let mut boosted = attacker.clone();
        boosted.boosts.spa = 2;
        boosted.boosts.spe = 1;
        let undercolony = Field { chromatic_field: Some(ChromaticField::Undercolony), ..Default::default() };
        let silver_wind = mv("Silver Wind", 60, Type::Bug);
        let mut trace = ModifierTrace::new();
        assert_eq!(move_base_power(&ctx(&boosted, &defender, &silver_wind, &undercolony), &mut trace), 90);
        assert!(trace.contains(&TraceEvent::ChromaticField(ChromaticField::Undercolony)));
    }
}
