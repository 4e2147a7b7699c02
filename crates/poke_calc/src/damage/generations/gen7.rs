//! Generation 7 (Sun/Moon, Ultra Sun/Ultra Moon) mechanics.

use super::GenMechanics;
use crate::damage::Modifier;

/// Generation 7 mechanics (Pokémon Sun/Moon/USUM).
///
/// Key differences from Gen 8:
/// - Z-Moves instead of Dynamax
/// - Terrain boost was 1.5x
/// - No Intrepid Sword / Dauntless Shield, and Intimidate ignores focus abilities
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Gen7;

impl GenMechanics for Gen7 {
    const GEN: u8 = 7;

    // Terrain was 1.5x in Gen 7
    fn terrain_boost(&self) -> Modifier {
        Modifier::ONE_POINT_FIVE
    }

    fn transistor_boost(&self) -> Modifier {
        Modifier::ONE_POINT_FIVE
    }

    fn heatproof_in_attack_chain(&self) -> bool {
        false
    }

    fn focus_blocks_intimidate(&self) -> bool {
        false
    }

    fn has_entry_boost_abilities(&self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gen7_terrain() {
        let gen = Gen7;
        assert_eq!(gen.terrain_boost(), Modifier::ONE_POINT_FIVE);
        assert!(!gen.focus_blocks_intimidate());
        assert!(!gen.heatproof_in_attack_chain());
    }
}
