//! Text reports of a finished calculation.
//!
//! The description is rebuilt from the [`ModifierTrace`]: each recorded
//! event contributes its words in a fixed position, so the report names
//! exactly the modifiers that changed the numbers.
//!
//! ```ignore
//! let result = calculate(gen, &attacker, &defender, &mv, &field);
//! println!("{}", display(gen, &result, Notation::Percent, true));
//! // "252+ Atk Life Orb Garchomp Earthquake vs. 4 HP / 0 Def Heatran: 296-350 (89.4 - 105.7%) -- 37.5% chance to OHKO"
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::damage::{DamageResult, Generation, ModifierTrace, Role, TraceEvent};
use crate::entities::Pokemon;
use crate::field::{ChromaticField, Field, Terrain};
use crate::ko::get_ko_chance;
use crate::moves::MoveCategory;
use crate::recovery::{get_recoil, get_recovery};
use crate::stats::StatId;

/// How HP amounts are reported.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Notation {
    /// Percent of max HP, to one decimal
    #[default]
    #[serde(rename = "%")]
    Percent,
    /// Pixels of a 48-pixel HP bar
    #[serde(rename = "px")]
    Pixels,
}

impl fmt::Display for Notation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Notation::Percent => "%",
            Notation::Pixels => "px",
        })
    }
}

/// `a` out of `b` in `notation`, with `a` pre-scaled by `f`.
pub fn to_display(notation: Notation, a: f64, b: f64, f: f64) -> f64 {
    match notation {
        Notation::Percent => (a * (1000.0 / f) / b).floor() / 10.0,
        Notation::Pixels => (a * (48.0 / f) / b).floor(),
    }
}

/// Join phrases as "a", "a and b" or "a, b, and c".
pub fn serialize_text(texts: &[String]) -> String {
    match texts {
        [] => String::new(),
        [only] => only.clone(),
        [first, second] => format!("{first} and {second}"),
        [rest @ .., last] => {
            let mut text: String = rest.iter().map(|t| format!("{t}, ")).collect();
            text.push_str("and ");
            text.push_str(last);
            text
        }
    }
}

fn terrain_name(terrain: Terrain) -> &'static str {
    match terrain {
        Terrain::Electric => "Electric",
        Terrain::Grassy => "Grassy",
        Terrain::Psychic => "Psychic",
        Terrain::Misty => "Misty",
    }
}

fn field_label(field: ChromaticField) -> &'static str {
    use ChromaticField::*;
    match field {
        Jungle => "Jungle Field",
        Eclipse => "Eclipse Field",
        Sky => "Sky Field",
        Desert => "Desert Field",
        Factory => "Factory Field",
        Inverse => "Inverse Field",
        DragonsDen => "Dragon's Den",
        ThunderingPlateau => "Thundering Plateau",
        StarlightArena => "Starlight Arena",
        RingArena => "Ring Arena",
        VolcanicTop => "Volcanic Top",
        HauntedGraveyard => "Haunted Graveyard",
        FlowerGarden => "Flower Garden",
        SnowyPeaks => "Snowy Peaks",
        BlessedSanctum => "Blessed Sanctum",
        AcidicWasteland => "Acidic Wasteland",
        AncientRuins => "Ancient Ruins",
        WatersSurface => "Water's Surface",
        Cave => "Cave",
        Underwater => "Underwater",
        Rainbow => "Rainbow",
        Undercolony => "Undercolony",
    }
}

/// "252+ Atk": invested EVs and the nature's effect on `stat`.
fn ev_text(pokemon: &Pokemon, stat: StatId) -> String {
    let sign = if pokemon.nature.plus() == Some(stat) {
        "+"
    } else if pokemon.nature.minus() == Some(stat) {
        "-"
    } else {
        ""
    };
    format!("{}{sign} {stat}", pokemon.evs[stat])
}

/// Level labels; common formats leave matching levels out.
fn levels(attacker: &Pokemon, defender: &Pokemon) -> (String, String) {
    let label = |level: u32| if level == 100 { String::new() } else { format!("Lvl {level}") };
    if attacker.level != defender.level {
        (label(attacker.level), label(defender.level))
    } else if [100, 50, 5].contains(&attacker.level) {
        (String::new(), String::new())
    } else {
        let level = format!("Lvl {}", attacker.level);
        (level.clone(), level)
    }
}

struct Words(String);

impl Words {
    fn push(&mut self, word: impl AsRef<str>) {
        let word = word.as_ref();
        if !word.is_empty() {
            self.0.push_str(word);
            self.0.push(' ');
        }
    }
}

fn boost(trace: &ModifierTrace, role: Role) -> Option<i8> {
    trace.events().iter().find_map(|e| match e {
        TraceEvent::Boost { role: r, stage, .. } if *r == role && *stage != 0 => Some(*stage),
        _ => None,
    })
}

fn item(trace: &ModifierTrace, role: Role) -> Option<&str> {
    trace.events().iter().find_map(|e| match e {
        TraceEvent::Item { role: r, name } if *r == role => Some(name.as_str()),
        _ => None,
    })
}

fn ability(trace: &ModifierTrace, role: Role) -> Option<&str> {
    trace.events().iter().find_map(|e| match e {
        TraceEvent::Ability { role: r, name } if *r == role => Some(name.as_str()),
        _ => None,
    })
}

/// "Tera Fire", "Soak", or the typing a combatant was changed to.
fn typing(trace: &ModifierTrace, role: Role) -> Option<String> {
    let events = trace.events();
    events
        .iter()
        .find_map(|e| match e {
            TraceEvent::Tera { role: r, tera } if *r == role => Some(format!("Tera {tera}")),
            _ => None,
        })
        .or_else(|| {
            events.iter().any(|e| matches!(e, TraceEvent::SideCondition { role: r, name: "Soak" } if *r == role)).then(|| "Soak".to_string())
        })
        .or_else(|| {
            events.iter().find_map(|e| match e {
                TraceEvent::TypeChange { role: r, to } if *r == role => Some(to.to_string()),
                _ => None,
            })
        })
}

fn turns_text(turns: u8) -> String {
    format!("{} {}", turns.min(10), if turns == 1 { "Turn" } else { "Turns" })
}

fn side_condition(trace: &ModifierTrace, role: Role, name: &str) -> bool {
    trace.events().iter().any(|e| matches!(e, TraceEvent::SideCondition { role: r, name: n } if *r == role && *n == name))
}

/// Describe the matchup and every modifier the trace recorded.
pub fn describe(result: &DamageResult) -> String {
    let trace = &result.trace;
    let (attacker, defender, field) = (&result.attacker, &result.defender, &result.field);
    let (attacker_level, defender_level) = levels(attacker, defender);
    let mut out = Words(String::new());

    if let Some(stage) = boost(trace, Role::Attacker) {
        out.push(format!("{stage:+}"));
    }
    out.push(&attacker_level);
    if let Some(stat) = result.attack_stat {
        let source = if stat.from_defender { defender } else { attacker };
        out.push(ev_text(source, stat.stat));
    }
    out.push(item(trace, Role::Attacker).unwrap_or(""));
    out.push(ability(trace, Role::Attacker).unwrap_or(""));
    if trace.has_condition("Burned") {
        out.push("burned");
    }
    for event in trace.events() {
        match event {
            TraceEvent::GritStages(n) => out.push(format!("{} Grit Stages", (*n).min(5))),
            TraceEvent::AlliesFainted(n) => {
                out.push(format!("{} {} fainted", (*n).min(5), if *n == 1 { "ally" } else { "allies" }))
            }
            TraceEvent::FoesFainted(n) => {
                out.push(format!("{} {} fainted", (*n).min(5), if *n == 1 { "foe" } else { "foes" }))
            }
            TraceEvent::RelicanthTurns { role: Role::Attacker, turns } => out.push(turns_text(*turns)),
            _ => {}
        }
    }
    if let Some(typing) = typing(trace, Role::Attacker) {
        out.push(typing);
    }
    for ruin in ["Beads of Ruin", "Sword of Ruin"] {
        if trace.has_condition(ruin) {
            out.push(ruin);
        }
    }
    out.push(&attacker.name);

    if trace.has_condition("Helping Hand") {
        out.push("Helping Hand");
    }
    if side_condition(trace, Role::Attacker, "Flower Gift") {
        out.push("with an ally's Flower Gift");
    }
    if side_condition(trace, Role::Attacker, "Steely Spirit") {
        out.push("with an ally's Steely Spirit");
    }
    for (name, text) in [("Battery", "Battery boosted"), ("Power Spot", "Power Spot boosted")] {
        if side_condition(trace, Role::Attacker, name) {
            out.push(text);
        }
    }

    if let Some(slot) = trace.events().iter().find_map(|e| match e {
        TraceEvent::MoveSlot(slot) => Some(*slot),
        _ => None,
    }) {
        out.push(format!("move slot {slot}"));
    }

    let move_name = trace
        .events()
        .iter()
        .find_map(|e| match e {
            TraceEvent::MoveName(name) => Some(name.as_str()),
            _ => None,
        })
        .unwrap_or(result.mv.name.as_str());
    out.push(move_name);
    let bp = trace.events().iter().find_map(|e| match e {
        TraceEvent::BasePower(bp) => Some(*bp),
        _ => None,
    });
    let move_type = trace.events().iter().find_map(|e| match e {
        TraceEvent::MoveType(t) => Some(*t),
        _ => None,
    });
    match (bp, move_type) {
        (Some(bp), Some(t)) => out.push(format!("({bp} BP {t})")),
        (Some(bp), None) => out.push(format!("({bp} BP)")),
        (None, Some(t)) => out.push(format!("({t})")),
        (None, None) => {}
    }
    for event in trace.events() {
        match event {
            TraceEvent::Hits(n) => out.push(format!("({n} hits)")),
            TraceEvent::Turns(n) => out.push(format!("over {n} turns")),
            _ => {}
        }
    }

    out.push("vs.");
    if let Some(stage) = boost(trace, Role::Defender) {
        out.push(format!("{stage:+}"));
    }
    out.push(&defender_level);
    if let Some(stat) = result.defense_stat {
        out.push(format!("{} HP / {}", defender.evs.hp, ev_text(defender, stat)));
    }
    out.push(item(trace, Role::Defender).unwrap_or(""));
    out.push(ability(trace, Role::Defender).unwrap_or(""));
    for event in trace.events() {
        if let TraceEvent::RelicanthTurns { role: Role::Defender, turns } = event {
            out.push(turns_text(*turns));
        }
    }
    for ruin in ["Tablets of Ruin", "Vessel of Ruin"] {
        if trace.has_condition(ruin) {
            out.push(ruin);
        }
    }
    if trace.has_condition("Protected") {
        out.push("protected");
    }
    if defender.is_dynamaxed {
        out.push("Dynamax");
    }
    if let Some(typing) = typing(trace, Role::Defender) {
        out.push(typing);
    }

    let mut text = out.0;
    text.push_str(&defender.name);
    append_surroundings(&mut text, trace, field);
    text
}

fn append_surroundings(text: &mut String, trace: &ModifierTrace, field: &Field) {
    let weather = trace.events().iter().find_map(|e| match e {
        TraceEvent::Weather(w) => Some(*w),
        _ => None,
    });
    let terrain = trace.events().iter().find_map(|e| match e {
        TraceEvent::Terrain(t) => Some(*t),
        _ => None,
    });
    match (weather, terrain) {
        (Some(_), Some(_)) => {}
        (Some(weather), None) => text.push_str(&format!(" in {}", weather.name())),
        (None, Some(terrain)) => text.push_str(&format!(" in {} Terrain", terrain_name(terrain))),
        (None, None) if side_condition(trace, Role::Attacker, "Tailwind") => text.push_str(" in Tailwind"),
        (None, None) => {}
    }
    if let Some(chromatic) = trace.events().iter().find_map(|e| match e {
        TraceEvent::ChromaticField(f) => Some(*f),
        _ => None,
    }) {
        text.push_str(" on ");
        text.push_str(field_label(chromatic));
    }

    if side_condition(trace, Role::Defender, "Reflect") {
        text.push_str(" through Reflect");
    } else if side_condition(trace, Role::Defender, "Light Screen") {
        text.push_str(" through Light Screen");
    }
    for name in ["Flower Gift", "Friend Guard", "Aurora Veil", "Arenite Wall"] {
        if side_condition(trace, Role::Defender, name) {
            text.push_str(&format!(" with an ally's {name}"));
        }
    }
    if trace.has_condition("Critical Hit") {
        text.push_str(" on a critical hit");
    }
    if field.is_wonder_room {
        text.push_str(" in Wonder Room");
    }
}

/// Full report: description, damage range and KO chance.
pub fn display(gen: Generation, result: &DamageResult, notation: Notation, err: bool) -> String {
    let (min, max) = result.range();
    let defender_max = result.defender.max_hp() as f64;
    let min_display = to_display(notation, min as f64, defender_max, 1.0);
    let max_display = to_display(notation, max as f64, defender_max, 1.0);

    let desc = describe(result);
    let damage_text = format!("{min}-{max} ({min_display} - {max_display}{notation})");

    let mv = &result.mv;
    if mv.category == MoveCategory::Status && !mv.named(&["Nature Power"]) {
        return format!("{desc}: {damage_text}");
    }
    let ko = get_ko_chance(gen, &result.attacker, &result.defender, mv, &result.field, &result.damage, err);
    if ko.text.is_empty() {
        format!("{desc}: {damage_text}")
    } else {
        format!("{desc}: {damage_text} -- {}", ko.text)
    }
}

/// Short report: damage range with recovery and recoil.
pub fn display_move(gen: Generation, result: &DamageResult, notation: Notation) -> String {
    let (min, max) = result.range();
    let defender_max = result.defender.max_hp() as f64;
    let min_display = to_display(notation, min as f64, defender_max, 1.0);
    let max_display = to_display(notation, max as f64, defender_max, 1.0);

    let (attacker, defender, mv) = (&result.attacker, &result.defender, &result.mv);
    let recovery = get_recovery(gen, attacker, defender, mv, &result.damage, notation).text;
    let recoil = get_recoil(gen, attacker, defender, mv, &result.damage, &result.field, notation).text;

    let mut text = format!("{min_display} - {max_display}{notation}");
    for extra in [recovery, recoil] {
        if !extra.is_empty() {
            text.push_str(&format!(" ({extra})"));
        }
    }
    text
}
