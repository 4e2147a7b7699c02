//! Per-hit calculation context.
//!
//! A [`HitContext`] is a read-only view over the effective combatants, move
//! and field, plus the values the earlier stages resolved. The modifier
//! chains only ever read from it.

use super::generations::{GenMechanics, Generation};
use super::stats::is_grounded;
use crate::entities::Pokemon;
use crate::field::{ChromaticField, Field};
use crate::moves::Move;

/// Ability given to the weaker second strike of Parental Bond.
pub const PARENTAL_BOND_CHILD: &str = "Parental Bond (Child)";

/// Whether the attacker moves before or after the defender.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TurnOrder {
    First,
    Last,
}

/// Context for a single hit of a move.
pub struct HitContext<'a> {
    /// Generation mechanics
    pub gen: Generation,

    // ========================================================================
    // Participants
    // ========================================================================

    pub attacker: &'a Pokemon,
    pub defender: &'a Pokemon,

    /// Effective move: type, category and target already resolved
    pub mv: &'a Move,

    pub field: &'a Field,

    // ========================================================================
    // Resolved State
    // ========================================================================

    pub is_crit: bool,

    /// Combined type effectiveness
    pub effectiveness: f64,

    /// 1-based hit number within a multi-hit move
    pub hit: u8,

    /// Whether an -ate ability changed the move's type
    pub has_ate_boost: bool,

    /// Base power after the move-specific formula, before the modifier chain
    pub base_power: f64,

    pub turn_order: TurnOrder,

    /// Whether the move targets the physical defense stat
    pub hits_physical: bool,
}

impl<'a> HitContext<'a> {
    /// Context for the first hit, with nothing resolved yet.
    pub fn new(gen: Generation, attacker: &'a Pokemon, defender: &'a Pokemon, mv: &'a Move, field: &'a Field) -> Self {
        let turn_order = if attacker.stats.spe > defender.stats.spe { TurnOrder::First } else { TurnOrder::Last };
        Self {
            gen,
            attacker,
            defender,
            mv,
            field,
            is_crit: mv.is_crit,
            effectiveness: 1.0,
            hit: 1,
            has_ate_boost: false,
            base_power: mv.bp as f64,
            turn_order,
            hits_physical: mv.is_physical(),
        }
    }

    pub fn gen_num(&self) -> u8 {
        self.gen.num()
    }

    pub fn attacker_grounded(&self) -> bool {
        is_grounded(self.attacker, self.field, &self.field.attacker_side)
    }

    pub fn defender_grounded(&self) -> bool {
        is_grounded(self.defender, self.field, &self.field.defender_side)
    }

    /// Number of hits already landed before this one.
    pub fn hit_count(&self) -> u8 {
        self.hit.saturating_sub(1)
    }

    pub fn is_child(&self) -> bool {
        self.attacker.has_ability(&[PARENTAL_BOND_CHILD])
    }

    pub fn is_field(&self, field: ChromaticField) -> bool {
        self.field.is_field(field)
    }
}

/// HP-protection flags shared by hazards, residual damage and recovery.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Guards {
    pub attacker_magic_guard: bool,
    pub defender_magic_guard: bool,
    /// The move prevents the target from healing
    pub heal_block: bool,
}

impl Guards {
    pub fn compute(attacker: &Pokemon, defender: &Pokemon, mv: &Move, field: &Field) -> Self {
        let heal_block = (mv.named(&["Psychic Noise"])
            || (mv.named(&["Shock Wave", "Nature Power"]) && field.is_field(ChromaticField::ThunderingPlateau)))
            && !(attacker.has_ability(&["Sheer Force"])
                || defender.has_item(&["Covert Cloak"])
                || defender.has_ability(&["Shield Dust", "Aroma Veil"]));
        Self {
            attacker_magic_guard: has_magic_guard(attacker, field),
            defender_magic_guard: has_magic_guard(defender, field),
            heal_block,
        }
    }
}

/// Magic Guard, including the field grants of Jungle and Rainbow.
pub fn has_magic_guard(pokemon: &Pokemon, field: &Field) -> bool {
    pokemon.has_ability(&["Magic Guard"])
        || (pokemon.has_ability(&["Shield Dust"]) && field.is_field(ChromaticField::Jungle))
        || (pokemon.named(&["Flareon"]) && field.is_field(ChromaticField::Rainbow))
}
