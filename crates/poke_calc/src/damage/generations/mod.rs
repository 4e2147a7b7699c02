//! Generation-specific mechanics abstraction.
//!
//! Each generation implements the `GenMechanics` trait, providing constants
//! and behaviors specific to that generation. Gen 9 is the "canonical"
//! implementation; older generations are defined as deltas from their successor.
//!
//! Only Gens 7-9 run the full damage pipeline. Legacy boost tables and
//! multi-hit squashing for older generations live in the standalone
//! primitives, which take a raw generation number.

mod gen7;
mod gen8;
mod gen9;

pub use gen7::Gen7;
pub use gen8::Gen8;
pub use gen9::Gen9;

use crate::damage::Modifier;
use crate::error::{CalcError, Result};

/// Generation-specific mechanics trait.
///
/// Default implementations reflect Gen 9 (Scarlet/Violet) mechanics.
pub trait GenMechanics: Copy + Clone + Send + Sync + 'static {
    /// Generation number
    const GEN: u8;

    fn num(&self) -> u8 {
        Self::GEN
    }

    // ========================================================================
    // Modifiers
    // ========================================================================

    /// Electric/Grassy/Psychic Terrain boost for a grounded attacker.
    fn terrain_boost(&self) -> Modifier {
        Modifier::ONE_POINT_THREE
    }

    /// Transistor boost to Electric moves.
    fn transistor_boost(&self) -> Modifier {
        Modifier::ONE_POINT_THREE
    }

    /// Whether Heatproof halves the attacker's stat (Gen 9) rather than base power.
    fn heatproof_in_attack_chain(&self) -> bool {
        true
    }

    // ========================================================================
    // Mechanical Differences
    // ========================================================================

    /// Whether Terastallization exists.
    fn has_terastallization(&self) -> bool {
        Self::GEN >= 9
    }

    /// Whether Inner Focus, Own Tempo, Oblivious and Scrappy block Intimidate.
    fn focus_blocks_intimidate(&self) -> bool {
        Self::GEN >= 8
    }

    /// Whether Intrepid Sword / Dauntless Shield boost on entry.
    fn has_entry_boost_abilities(&self) -> bool {
        Self::GEN >= 8
    }

    /// Whether Embody Aspect exists.
    fn has_embody_aspect(&self) -> bool {
        Self::GEN >= 9
    }
}

/// Runtime generation selection for when the generation isn't known at compile time.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Generation {
    Gen7(Gen7),
    Gen8(Gen8),
    Gen9(Gen9),
}

impl Default for Generation {
    fn default() -> Self {
        Generation::Gen9(Gen9)
    }
}

impl Generation {
    /// Create a Generation from a numeric value.
    pub fn from_num(gen: u8) -> Result<Self> {
        match gen {
            7 => Ok(Generation::Gen7(Gen7)),
            8 => Ok(Generation::Gen8(Gen8)),
            9 => Ok(Generation::Gen9(Gen9)),
            other => Err(CalcError::UnsupportedGeneration(other)),
        }
    }
}

macro_rules! delegate {
    ($self:ident, $method:ident) => {
        match $self {
            Generation::Gen7(g) => g.$method(),
            Generation::Gen8(g) => g.$method(),
            Generation::Gen9(g) => g.$method(),
        }
    };
}

// Implement GenMechanics for the enum by delegating
impl GenMechanics for Generation {
    const GEN: u8 = 0; // Runtime determined

    fn num(&self) -> u8 {
        delegate!(self, num)
    }

    fn terrain_boost(&self) -> Modifier {
        delegate!(self, terrain_boost)
    }

    fn transistor_boost(&self) -> Modifier {
        delegate!(self, transistor_boost)
    }

    fn heatproof_in_attack_chain(&self) -> bool {
        delegate!(self, heatproof_in_attack_chain)
    }

    fn has_terastallization(&self) -> bool {
        delegate!(self, has_terastallization)
    }

    fn focus_blocks_intimidate(&self) -> bool {
        delegate!(self, focus_blocks_intimidate)
    }

    fn has_entry_boost_abilities(&self) -> bool {
        delegate!(self, has_entry_boost_abilities)
    }

    fn has_embody_aspect(&self) -> bool {
        delegate!(self, has_embody_aspect)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_num() {
        assert_eq!(Generation::from_num(8).map(|g| g.num()), Ok(8));
        assert_eq!(Generation::from_num(4), Err(CalcError::UnsupportedGeneration(4)));
        assert_eq!(Generation::default().num(), 9);
    }

    #[test]
    fn test_enum_delegates() {
        let gen7 = Generation::from_num(7).unwrap();
        assert_eq!(gen7.terrain_boost(), Modifier::ONE_POINT_FIVE);
        assert!(!gen7.has_entry_boost_abilities());
        let gen9 = Generation::default();
        assert!(gen9.has_terastallization());
        assert_eq!(gen9.transistor_boost(), Modifier::ONE_POINT_THREE);
    }
}
