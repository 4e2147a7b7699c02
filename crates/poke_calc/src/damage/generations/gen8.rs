//! Generation 8 (Sword/Shield) mechanics.

use super::GenMechanics;
use crate::damage::Modifier;

/// Generation 8 mechanics (Pokémon Sword/Shield).
///
/// Key differences from Gen 9:
/// - Dynamax instead of Terastallization
/// - Transistor is still 1.5x
/// - Heatproof halves base power instead of the attacking stat
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Gen8;

impl GenMechanics for Gen8 {
    const GEN: u8 = 8;

    fn transistor_boost(&self) -> Modifier {
        Modifier::ONE_POINT_FIVE
    }

    fn heatproof_in_attack_chain(&self) -> bool {
        false
    }
}
