//! Knockout-chance estimation.
//!
//! Turns a damage distribution into the chance of knocking the defender
//! out, with the text the calculator shows for it.
//!
//! # Architecture
//!
//! 1. **Combine**: the [`Damage`] result becomes one sorted distribution
//! 2. **Residuals**: entry hazards are taken once, end-of-turn effects
//!    apply after every hit but the last, toxic damage grows each turn
//! 3. **Exact chances**: one to four hits are convolved exactly
//! 4. **Reachability**: five to nine hits only compare the lowest and
//!    highest possible totals
//! 5. **Wording**: the first matching hit count is worded by [`KoWording`]
//!
//! # Usage
//!
//! ```ignore
//! use poke_calc::ko::get_ko_chance;
//!
//! let result = calculate(gen, &attacker, &defender, &mv, &field);
//! let ko = get_ko_chance(gen, &result.attacker, &result.defender, &result.mv, &result.field, &result.damage, true);
//! println!("{}", ko.text); // "guaranteed 2HKO after Stealth Rock"
//! ```

mod compute;
mod end_of_turn;
mod hazards;
mod squash;
mod text;

pub use compute::{compute_ko_chance, predict_total, toxic_damage};
pub use end_of_turn::{get_end_of_turn, EndOfTurn};
pub use hazards::{get_hazards, Hazards};
pub use squash::squash_multihit;
pub use text::round_chance;

pub(crate) use text::KoWording;

use serde::Serialize;

use crate::damage::{has_magic_guard, Damage, Generation};
use crate::entities::{Pokemon, Status};
use crate::error::soft_error;
use crate::field::Field;
use crate::moves::Move;

/// Chance to knock out in `n` hits or turns.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct KoChance {
    /// `None` when the KO is reachable but has no concrete probability
    pub chance: Option<f64>,
    pub n: u8,
    pub text: String,
}

impl KoChance {
    fn none() -> Self {
        Self { chance: Some(0.0), n: 0, text: String::new() }
    }
}

/// Flatten a damage result into one ascending distribution.
///
/// Parental Bond roll pairs become all 256 sums.
pub fn combine(damage: &Damage) -> Vec<u32> {
    match damage {
        Damage::Fixed(d) => vec![*d],
        Damage::FixedPair(a, b) => vec![a + b],
        Damage::Rolls(rolls) => {
            let mut rolls = rolls.clone();
            if rolls.first() > rolls.last() {
                rolls.sort_unstable();
            }
            rolls
        }
        Damage::Pair(parent, child) => {
            let mut combined: Vec<u32> = parent.iter().flat_map(|p| child.iter().map(move |c| p + c)).collect();
            combined.sort_unstable();
            combined
        }
    }
}

/// Chance that `damage` knocks `defender` out, with the calculator's wording.
///
/// `err` selects how loudly a malformed distribution is reported; either
/// way the answer degrades to a zero chance with no text.
pub fn get_ko_chance(
    gen: Generation,
    attacker: &Pokemon,
    defender: &Pokemon,
    mv: &Move,
    field: &Field,
    damage: &Damage,
    err: bool,
) -> KoChance {
    let damage = combine(damage);
    let (first, last) = match (damage.first(), damage.last()) {
        (Some(&first), Some(&last)) => (first as i64, last as i64),
        _ => {
            soft_error(err, "damage: empty distribution");
            return KoChance::none();
        }
    };
    if last == 0 {
        soft_error(err, "damage: highest roll is 0");
        return KoChance::none();
    }

    let times_used = mv.times_used.max(1);
    let metronome = mv.times_used_with_metronome.max(1);
    let max_hp = defender.max_hp() as i64;
    let cur_hp = defender.cur_hp() as i64;

    if first >= max_hp && times_used == 1 && metronome == 1 {
        return KoChance { chance: Some(1.0), n: 1, text: "guaranteed OHKO".to_string() };
    }

    let hazards = get_hazards(gen, defender, &field.defender_side, field);
    let eot = get_end_of_turn(gen, attacker, defender, mv, field);
    let toxic_counter = if defender.has_status(&[Status::Toxic])
        && !(has_magic_guard(defender, field) || defender.has_ability(&["Poison Heal"]))
    {
        defender.toxic_counter as i64
    } else {
        0
    };

    let mut wording = KoWording::new(&hazards.texts, &eot.texts, mv.hits > 1);
    let hp = cur_hp - hazards.damage;
    log::debug!(
        "KO chance: hp {hp} of {max_hp}, eot {}, toxic counter {toxic_counter}, {} rolls",
        eot.damage,
        damage.len()
    );

    if (times_used == 1 && metronome == 1) || mv.is_z {
        let chance = compute_ko_chance(&damage, hp, 0, 1, 1, max_hp, 0);
        let with_eot = compute_ko_chance(&damage, hp, eot.damage, 1, 1, max_hp, toxic_counter);
        if chance + with_eot > 0.0 {
            return wording.chance(Some(chance), Some(with_eot), 1, false);
        }

        // Parental Bond sums are only exact for the first turn
        if damage.len() == 256 {
            wording.qualifier = "approx. ";
        }

        for hits in 2..=4u8 {
            let chance = compute_ko_chance(&damage, hp, eot.damage, hits as u32, 1, max_hp, toxic_counter);
            if chance > 0.0 {
                return wording.chance(Some(0.0), Some(chance), hits, false);
            }
        }

        for hits in 5..=9u8 {
            if predict_total(first, eot.damage, hits as u32, 1, toxic_counter, max_hp) >= hp {
                return wording.chance(Some(0.0), Some(1.0), hits, false);
            }
            if predict_total(last, eot.damage, hits as u32, 1, toxic_counter, max_hp) >= hp {
                return wording.chance(None, None, hits, false);
            }
        }
        return KoChance::none();
    }

    let uses = times_used as u32;
    let chance = compute_ko_chance(&damage, max_hp - hazards.damage, eot.damage, mv.hits.max(1) as u32, uses, max_hp, toxic_counter);
    if chance > 0.0 {
        return wording.chance(Some(0.0), Some(chance), times_used, chance == 1.0);
    }
    if predict_total(first, eot.damage, 1, uses, toxic_counter, max_hp) >= hp {
        wording.chance(Some(0.0), Some(1.0), times_used, true)
    } else if predict_total(last, eot.damage, 1, uses, toxic_counter, max_hp) >= hp {
        wording.chance(None, None, times_used, true)
    } else {
        wording.chance(Some(0.0), Some(0.0), times_used, false)
    }
}
