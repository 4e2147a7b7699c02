//! Damage calculation pipeline.
//!
//! This module implements a pipeline-style damage calculator for the
//! Generation 7-9 rules, extended with the chromatic battlefields.
//!
//! # Architecture
//!
//! The damage calculation follows the official Pokémon damage formula:
//! 1. **Entry pass**: switch-in abilities, items and hazards settle the boosts
//! 2. **Move resolution**: effective type, category, target and effectiveness
//! 3. **Base Damage**: `floor((floor(2 * Level / 5 + 2) * Power * Atk / Def) / 50) + 2`
//! 4. **Modifier Chains**: base power, attack, defense and final 4096-scale
//!    multipliers applied in strict order
//! 5. **Rolls**: 16 random rolls (85-100%), summed across hits and uses
//!
//! Every special case that fires is recorded in a [`ModifierTrace`].
//!
//! # Usage
//!
//! ```ignore
//! use poke_calc::damage::{calculate, Generation};
//!
//! let result = calculate(Generation::default(), &attacker, &defender, &mv, &field);
//!
//! // result.damage holds the 16 rolls, or a compound multi-hit result
//! let (min, max) = result.damage.range();
//! ```

mod base_power;
mod chains;
mod context;
mod crest;
mod effectiveness;
mod fixed;
mod formula;
pub mod generations;
mod modifier;
mod move_type;
mod multihit;
mod pipeline;
mod prepare;
mod stab;
mod stats;
mod trace;

pub use chains::AttackStat;
pub use context::{has_magic_guard, Guards, HitContext, TurnOrder, PARENTAL_BOND_CHILD};
pub use effectiveness::{get_move_effectiveness, Effectiveness};
pub use formula::{
    chain_mods, get_base_damage, get_final_damage, get_modified_stat, of16, of32, poke_round, pokeround,
};
pub use generations::{GenMechanics, Generation};
pub use modifier::{Chain, Modifier};
pub use pipeline::calculate;
pub use stats::{compute_final_stats, get_final_speed, is_grounded};
pub use trace::{ModifierTrace, Role, TraceEvent};

pub(crate) use effectiveness::VOLCANIC_ERUPTION;
pub(crate) use formula::of32_f;
pub(crate) use move_type::terrain_type;
pub(crate) use stab::get_stab_mod;

use serde::{Deserialize, Serialize};

use crate::entities::Pokemon;
use crate::field::Field;
use crate::moves::Move;
use crate::stats::StatId;

/// Damage a calculation produced.
///
/// Serializes the way the calculator's JSON does: a bare number, a pair of
/// numbers, an array of rolls, or a pair of roll arrays.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Damage {
    /// A single exact amount (fixed damage, or no damage at all)
    Fixed(u32),
    /// Two exact hits (fixed damage under Parental Bond)
    FixedPair(u32, u32),
    /// 16 rolls, or a longer distribution from an outer combination
    Rolls(Vec<u32>),
    /// Two independent roll sets (Parental Bond parent and child)
    Pair(Vec<u32>, Vec<u32>),
}

impl Damage {
    pub fn zero() -> Self {
        Damage::Fixed(0)
    }

    /// Per-hit lowest and highest values, one entry per independent hit.
    pub fn per_hit_range(&self) -> (Vec<u32>, Vec<u32>) {
        fn bounds(rolls: &[u32]) -> (u32, u32) {
            match (rolls.first(), rolls.last()) {
                (Some(&first), Some(&last)) if first <= last => (first, last),
                (Some(_), Some(_)) => {
                    let min = rolls.iter().copied().min().unwrap_or(0);
                    let max = rolls.iter().copied().max().unwrap_or(0);
                    (min, max)
                }
                _ => (0, 0),
            }
        }
        match self {
            Damage::Fixed(d) => (vec![*d], vec![*d]),
            Damage::FixedPair(a, b) => (vec![*a, *b], vec![*a, *b]),
            Damage::Rolls(rolls) => {
                let (min, max) = bounds(rolls);
                (vec![min], vec![max])
            }
            Damage::Pair(parent, child) => {
                let (pmin, pmax) = bounds(parent);
                let (cmin, cmax) = bounds(child);
                (vec![pmin, cmin], vec![pmax, cmax])
            }
        }
    }

    /// Total lowest and highest damage.
    pub fn range(&self) -> (u32, u32) {
        let (min, max) = self.per_hit_range();
        (min.iter().sum(), max.iter().sum())
    }

    pub fn is_zero(&self) -> bool {
        self.range().1 == 0
    }
}

/// Result of a damage calculation.
#[derive(Clone, Debug)]
pub struct DamageResult {
    pub damage: Damage,

    /// Every modifier and special case that fired, in order
    pub trace: ModifierTrace,

    /// Attacker after entry effects, suppression and between-hit changes
    pub attacker: Pokemon,

    pub defender: Pokemon,

    /// Effective move: resolved type, category, flags and hits
    pub mv: Move,

    /// Field after weather, terrain and screen changes
    pub field: Field,

    /// Stat the attack came from; `None` when no formula ran
    pub attack_stat: Option<AttackStat>,

    /// Stat the defense came from; `None` when no formula ran
    pub defense_stat: Option<StatId>,
}

impl DamageResult {
    /// Result with no stat information, for early exits.
    pub(crate) fn early(
        damage: Damage,
        attacker: Pokemon,
        defender: Pokemon,
        mv: Move,
        field: Field,
        trace: ModifierTrace,
    ) -> Self {
        Self { damage, trace, attacker, defender, mv, field, attack_stat: None, defense_stat: None }
    }

    pub fn range(&self) -> (u32, u32) {
        self.damage.range()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_damage_ranges() {
        assert_eq!(Damage::Fixed(40).range(), (40, 40));
        assert_eq!(Damage::FixedPair(100, 100).range(), (200, 200));
        assert_eq!(Damage::Rolls(vec![10, 11, 12]).range(), (10, 12));
        assert_eq!(Damage::Rolls(vec![12, 10, 11]).range(), (10, 12));
        assert_eq!(Damage::Pair(vec![80, 90], vec![20, 24]).per_hit_range(), (vec![80, 20], vec![90, 24]));
        assert!(Damage::zero().is_zero());
    }

    #[test]
    fn test_damage_json_shapes() {
        assert_eq!(serde_json::to_string(&Damage::Fixed(7)).unwrap(), "7");
        assert_eq!(serde_json::to_string(&Damage::FixedPair(1, 2)).unwrap(), "[1,2]");
        assert_eq!(serde_json::to_string(&Damage::Pair(vec![1], vec![2])).unwrap(), "[[1],[2]]");
        let parsed: Damage = serde_json::from_str("[1,2,3]").unwrap();
        assert_eq!(parsed, Damage::Rolls(vec![1, 2, 3]));
    }
}
