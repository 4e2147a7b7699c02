//! Generation 9 (Scarlet/Violet) mechanics.
//!
//! This is the canonical, default implementation. All trait defaults
//! in `GenMechanics` reflect Gen 9 behavior.

use super::GenMechanics;

/// Generation 9 mechanics (Pokémon Scarlet/Violet).
///
/// Key features:
/// - Terastallization
/// - 1.3x terrain boost
/// - Transistor reduced to 1.3x
/// - Heatproof halves the attacking stat
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Gen9;

impl GenMechanics for Gen9 {
    const GEN: u8 = 9;

    // All defaults match Gen 9, so no overrides needed.
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::damage::Modifier;

    #[test]
    fn test_gen9_defaults() {
        let gen = Gen9;
        assert_eq!(gen.num(), 9);
        assert_eq!(gen.terrain_boost(), Modifier::ONE_POINT_THREE);
        assert!(gen.heatproof_in_attack_chain());
        assert!(gen.has_embody_aspect());
        assert!(gen.focus_blocks_intimidate());
    }
}
