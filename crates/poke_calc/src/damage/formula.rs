//! Core damage formula and math utilities.
//!
//! This module contains the fundamental damage calculation math,
//! including Game Freak's specific rounding and overflow behaviors.

/// 16-bit overflow wrapping (simulates hardware behavior).
/// Values that exceed 65535 wrap around.
#[inline]
pub const fn of16(value: u64) -> u64 {
    value & 0xFFFF
}

/// 32-bit overflow wrapping (simulates hardware behavior).
/// Values that exceed u32::MAX wrap around.
#[inline]
pub const fn of32(value: u64) -> u64 {
    value & 0xFFFF_FFFF
}

/// [`of32`] for intermediate values that carry a fractional part.
#[inline]
pub fn of32_f(value: f64) -> f64 {
    if value > 4_294_967_295.0 {
        value % 4_294_967_296.0
    } else {
        value
    }
}

/// [`of16`] for intermediate values that carry a fractional part.
#[inline]
pub fn of16_f(value: f64) -> f64 {
    if value > 65_535.0 {
        value % 65_536.0
    } else {
        value
    }
}

/// Game Freak's rounding function ("pokeRound").
///
/// The fractional part > 0.5 rounds up, otherwise rounds down, so exactly
/// 0.5 rounds toward zero. Negative inputs mirror positive ones.
#[inline]
pub fn poke_round(value: f64) -> f64 {
    if value < 0.0 {
        return -poke_round(-value);
    }
    if value.fract() > 0.5 {
        value.ceil()
    } else {
        value.floor()
    }
}

/// Integer pokeRound of `value / divisor`.
#[inline]
pub fn pokeround(value: u64, divisor: u64) -> u64 {
    // We round up only if remainder > divisor/2 (strictly greater)
    let quotient = value / divisor;
    let remainder = value % divisor;
    if remainder > divisor / 2 {
        quotient + 1
    } else {
        quotient
    }
}

/// Apply a 4096-scale modifier with proper pokeRound.
///
/// This performs: `pokeround(value * modifier / 4096)`
#[inline]
pub fn apply_modifier(value: u64, modifier: u32) -> u64 {
    if modifier == 4096 {
        return value;
    }
    pokeround(value * modifier as u64, 4096)
}

/// Chain multiple 4096-scale modifiers together.
///
/// Starts at 4096 (1.0x) and folds each non-neutral modifier in with
/// `(acc * m + 2048) >> 12`, then clamps to `[lower, upper]`.
pub fn chain_mods(modifiers: &[u16], lower: u32, upper: u32) -> u32 {
    let mut result: u64 = 4096;

    for &modifier in modifiers {
        if modifier != 4096 {
            result = (result * modifier as u64 + 2048) >> 12;
        }
    }

    (result as u32).clamp(lower, upper)
}

/// Calculate base damage before modifiers.
///
/// Formula: `floor(floor(floor(2 * Level / 5 + 2) * BasePower * Attack / Defense) / 50) + 2`
///
/// Each intermediate product passes through 32-bit overflow.
///
/// # Arguments
/// * `level` - Attacker's level (1-100)
/// * `base_power` - Move's base power after BP modifiers
/// * `attack` - Effective attack stat (after boosts and modifiers)
/// * `defense` - Effective defense stat (after boosts and modifiers)
pub fn get_base_damage(level: u32, base_power: u32, attack: u32, defense: u32) -> u32 {
    if defense == 0 {
        return 0;
    }

    let level_factor = (2 * level / 5 + 2) as u64;
    let numerator = of32(of32(level_factor * base_power as u64) * attack as u64);
    let after_defense = numerator / defense as u64;

    of32(after_defense / 50 + 2) as u32
}

/// Damage for one random roll.
///
/// # Arguments
/// * `base_amount` - Base damage after spread, weather and crit
/// * `roll` - Roll index 0..=15 (85%..=100%)
/// * `effectiveness` - Combined type effectiveness
/// * `is_burned` - Halve for a burned physical attacker
/// * `stab_mod` - STAB in 4096-scale; exactly 4096 is skipped
/// * `final_mod` - Composed final modifier chain
/// * `protect` - Quarter damage through Protect (Z-Moves, Max Moves)
pub fn get_final_damage(
    base_amount: u32,
    roll: usize,
    effectiveness: f64,
    is_burned: bool,
    stab_mod: u32,
    final_mod: u32,
    protect: bool,
) -> u32 {
    let rolled = of32(base_amount as u64 * (85 + roll as u64)) / 100;
    // Applying a neutral STAB would still pass through OF32 and can change overflow results.
    let mut amount = rolled as f64;
    if stab_mod != 4096 {
        amount = of32(rolled * stab_mod as u64) as f64 / 4096.0;
    }
    let mut amount = of32_f(poke_round(amount) * effectiveness).floor();

    if is_burned {
        amount = (amount / 2.0).floor();
    }
    if protect {
        amount = poke_round(of32_f(amount * 1024.0) / 4096.0);
    }
    let scaled = (of32_f(amount * final_mod as f64) / 4096.0).max(1.0);
    of16_f(poke_round(scaled)) as u32
}

/// Boost multiplier table.
///
/// Index by `boost + 6` to get (numerator, denominator).
const BOOST_TABLE: [(u32, u32); 13] = [
    (2, 8), // -6: 2/8 = 0.25x
    (2, 7), // -5: 2/7 = 0.286x
    (2, 6), // -4: 2/6 = 0.333x
    (2, 5), // -3: 2/5 = 0.4x
    (2, 4), // -2: 2/4 = 0.5x
    (2, 3), // -1: 2/3 = 0.667x
    (2, 2), //  0: 2/2 = 1.0x
    (3, 2), // +1: 3/2 = 1.5x
    (4, 2), // +2: 4/2 = 2.0x
    (5, 2), // +3: 5/2 = 2.5x
    (6, 2), // +4: 6/2 = 3.0x
    (7, 2), // +5: 7/2 = 3.5x
    (8, 2), // +6: 8/2 = 4.0x
];

/// Gen 1-2 positive boost multipliers, stored in tenths.
const LEGACY_POSITIVE: [u32; 7] = [10, 15, 20, 25, 30, 35, 40];
/// Gen 1-2 negative boost numerators (percent).
const LEGACY_NEGATIVE: [u32; 7] = [100, 66, 50, 40, 33, 28, 25];

/// Apply a boost stage to a stat.
///
/// Gens 1-2 use their own tables and clamp to `1..=999`; later gens wrap
/// the multiplication at 16 bits and are otherwise unclamped.
pub fn get_modified_stat(stat: u32, boost: i8, gen: u8) -> u32 {
    let boost = boost.clamp(-6, 6);
    if gen < 3 {
        let value = if boost >= 0 {
            stat * LEGACY_POSITIVE[boost as usize] / 10
        } else {
            stat * LEGACY_NEGATIVE[(-boost) as usize] / 100
        };
        return value.clamp(1, 999);
    }

    let (num, den) = BOOST_TABLE[(boost + 6) as usize];
    of16(stat as u64 * num as u64) as u32 / den
}
