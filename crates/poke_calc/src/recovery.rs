//! HP the attacker regains or loses because of the hit it dealt.
//!
//! Both reports read the per-hit bounds of a finished [`Damage`] result and
//! never change the damage itself.

use crate::damage::{Damage, Generation};
use crate::display::{to_display, Notation};
use crate::entities::Pokemon;
use crate::field::{ChromaticField, Field};
use crate::moves::Move;

/// Lowest and highest HP regained (negative when Pain Split costs HP).
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Recovery {
    pub recovery: [i64; 2],
    pub text: String,
}

/// Lowest and highest recoil, already in the display notation.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Recoil {
    pub recoil: [f64; 2],
    pub text: String,
}

fn round(x: f64) -> i64 {
    (x + 0.5).floor() as i64
}

/// Add the share of each hit a draining effect returns, capped per part.
fn drain(recovery: &mut [i64; 2], mins: &[u32], maxs: &[u32], share: f64, hits: i64, cap: i64, big_root: bool) {
    for (&min, &max) in mins.iter().zip(maxs) {
        for (slot, dealt) in recovery.iter_mut().zip([min, max]) {
            let mut drained = round(dealt as f64 * share);
            if big_root {
                drained = drained * 5324 / 4096;
            }
            *slot += (drained * hits).min(cap);
        }
    }
}

/// HP the attacker recovers from `damage`.
pub fn get_recovery(_gen: Generation, attacker: &Pokemon, defender: &Pokemon, mv: &Move, damage: &Damage, notation: Notation) -> Recovery {
    let (mins, maxs) = damage.per_hit_range();
    let hits = mv.hits as i64;
    let defender_max = defender.max_hp() as f64;
    let mut recovery = [0i64; 2];

    if attacker.has_item(&["Shell Bell"]) {
        let cap = round(defender_max / 8.0);
        for (&min, &max) in mins.iter().zip(&maxs) {
            recovery[0] += round(min as f64 * hits as f64 / 8.0).min(cap);
            recovery[1] += round(max as f64 * hits as f64 / 8.0).min(cap);
        }
    }

    if mv.named(&["G-Max Finale"]) {
        let healed = round(attacker.max_hp() as f64 / 6.0);
        recovery = [healed; 2];
    }

    if mv.named(&["Pain Split"]) {
        let attacker_hp = attacker.cur_hp() as i64;
        let average = (attacker_hp + defender.cur_hp() as i64) / 2;
        recovery = [average - attacker_hp; 2];
    }

    if let Some((num, den)) = mv.drain {
        let share = num as f64 / den as f64;
        let cap = round(defender_max * share);
        let big_root = attacker.has_item(&["Big Root"]) || attacker.named(&["Shiinotic-Crest"]);
        drain(&mut recovery, &mins, &maxs, share, hits, cap, big_root);
    }

    // Ring Arena grit drains a sixth of the damage
    if attacker.grit_stages >= 2 {
        let share = 1.0 / 6.0;
        drain(&mut recovery, &mins, &maxs, share, hits, round(defender_max * share), false);
    }

    let crest_share = if attacker.named(&["Dusknoir-Crest"]) && mv.named(&["Shadow Punch"]) {
        0.5
    } else if attacker.named(&["Gothitelle-Crest-Dark"]) {
        0.25
    } else {
        0.0
    };
    if crest_share > 0.0 {
        let cap = round(defender_max * crest_share);
        drain(&mut recovery, &mins, &maxs, crest_share, hits, cap, attacker.has_item(&["Big Root"]));
    }

    if recovery[1] == 0 {
        return Recovery { recovery, text: String::new() };
    }

    let attacker_max = attacker.max_hp() as f64;
    let min = to_display(notation, recovery[0] as f64, attacker_max, 1.0);
    let max = to_display(notation, recovery[1] as f64, attacker_max, 1.0);
    let change = if recovery[0] > 0 { "recovered" } else { "lost" };
    Recovery { recovery, text: format!("{min} - {max}{notation} {change}") }
}

/// Recoil the attacker takes for dealing `damage`.
pub fn get_recoil(
    _gen: Generation,
    attacker: &Pokemon,
    defender: &Pokemon,
    mv: &Move,
    damage: &Damage,
    field: &Field,
    notation: Notation,
) -> Recoil {
    let (mins, maxs) = damage.per_hit_range();
    let hits = mv.hits as f64;
    let min = mins.iter().sum::<u32>() as f64 * hits;
    let max = maxs.iter().sum::<u32>() as f64 * hits;
    let defender_hp = defender.cur_hp() as f64;
    let attacker_max = attacker.max_hp() as f64;

    // A single hit that overflows recoils off the remaining HP only
    let overflow = maxs.len() == 1 && maxs[0] as f64 > defender_hp;
    let undercolony_megahorn = mv.named(&["Megahorn"]) && field.is_field(ChromaticField::Undercolony);

    let bastiodon = defender.named(&["Bastiodon-Crest"]);

    if mv.recoil.is_some() || bastiodon || undercolony_megahorn {
        let mut share = 0.0;
        if let Some((num, den)) = mv.recoil {
            share += num as f64 / den as f64 * 100.0;
        }
        if bastiodon {
            share += 50.0;
        }
        if undercolony_megahorn {
            share += 100.0 / 3.0;
        }
        let (low, high) = if overflow { (defender_hp, defender_hp) } else { (min.min(defender_hp), max.min(defender_hp)) };
        let low = to_display(notation, low * share, attacker_max, 100.0);
        let high = to_display(notation, high * share, attacker_max, 100.0);
        if attacker.has_ability(&["Rock Head"]) || attacker.named(&["Rampardos-Crest"]) {
            return Recoil::default();
        }
        return Recoil { recoil: [low, high], text: format!("{low} - {high}{notation} recoil damage") };
    }

    let fixed = |percent: f64, text: &str| Recoil { recoil: [percent; 2], text: text.to_string() };
    if mv.has_crash_damage {
        fixed(if notation == Notation::Percent { 24.0 } else { 50.0 }, "50% crash damage")
    } else if mv.struggle_recoil {
        fixed(if notation == Notation::Percent { 12.0 } else { 25.0 }, "25% struggle damage")
    } else if mv.mind_blown_recoil {
        fixed(if notation == Notation::Percent { 24.0 } else { 50.0 }, "50% recoil damage")
    } else {
        Recoil::default()
    }
}
