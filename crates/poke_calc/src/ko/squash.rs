//! Reduce a multi-hit distribution back to 16 representative totals.
//!
//! Each supported shape uses a fixed table of roll indices, so the result
//! is deterministic: the lowest and highest totals are exact and the
//! interior points are sampled from the combined distribution.

use crate::error::soft_error;

/// Totals for `hits` hits of a 16-roll distribution.
fn squash_sixteen(d: &[u32], hits: u8) -> Option<Vec<u32>> {
    let squashed = match hits {
        2 => vec![
            2 * d[0], d[2] + d[3], d[4] + d[4], d[4] + d[5], d[5] + d[6], d[6] + d[6],
            d[6] + d[7], d[7] + d[7], d[8] + d[8], d[8] + d[9], d[9] + d[9], d[9] + d[10],
            d[10] + d[11], d[11] + d[11], d[12] + d[13], 2 * d[15],
        ],
        3 => vec![
            3 * d[0], d[3] + d[3] + d[4], d[4] + d[4] + d[5], d[5] + d[5] + d[6],
            d[5] + d[6] + d[6], d[6] + d[6] + d[7], d[6] + d[7] + d[7], d[7] + d[7] + d[8],
            d[7] + d[8] + d[8], d[8] + d[8] + d[9], d[8] + d[9] + d[9], d[9] + d[9] + d[10],
            d[9] + d[10] + d[10], d[10] + d[11] + d[11], d[11] + d[12] + d[12], 3 * d[15],
        ],
        4 => vec![
            4 * d[0], 4 * d[4], d[4] + d[5] + d[5] + d[5], d[5] + d[5] + d[6] + d[6],
            4 * d[6], d[6] + d[6] + d[7] + d[7], 4 * d[7], d[7] + d[7] + d[7] + d[8],
            d[7] + d[8] + d[8] + d[8], 4 * d[8], d[8] + d[8] + d[9] + d[9], 4 * d[9],
            d[9] + d[9] + d[10] + d[10], d[10] + d[10] + d[10] + d[11], 4 * d[11], 4 * d[15],
        ],
        5 => vec![
            5 * d[0], d[4] + d[4] + d[4] + d[5] + d[5], d[5] + d[5] + d[5] + d[5] + d[6],
            d[5] + d[6] + d[6] + d[6] + d[6], d[6] + d[6] + d[6] + d[6] + d[7],
            d[6] + d[6] + d[7] + d[7] + d[7], 5 * d[7], d[7] + d[7] + d[7] + d[8] + d[8],
            d[7] + d[7] + d[8] + d[8] + d[8], 5 * d[8], d[8] + d[8] + d[8] + d[9] + d[9],
            d[8] + d[9] + d[9] + d[9] + d[9], d[9] + d[9] + d[9] + d[9] + d[10],
            d[9] + d[10] + d[10] + d[10] + d[10], d[10] + d[10] + d[11] + d[11] + d[11], 5 * d[15],
        ],
        10 => vec![
            10 * d[0], 10 * d[4], 3 * d[4] + 7 * d[5], 5 * d[5] + 5 * d[6], 10 * d[6],
            5 * d[6] + 5 * d[7], 10 * d[7], 7 * d[7] + 3 * d[8], 3 * d[7] + 7 * d[8], 10 * d[8],
            5 * d[8] + 5 * d[9], 10 * d[9], 5 * d[9] + 5 * d[10], 7 * d[10] + 3 * d[11], 10 * d[11],
            10 * d[15],
        ],
        _ => return None,
    };
    Some(squashed)
}

/// Totals for `hits` hits of a 39-roll distribution.
fn squash_thirty_nine(d: &[u32], hits: u8) -> Option<Vec<u32>> {
    let squashed = match hits {
        2 => vec![
            2 * d[0], 2 * d[7], 2 * d[10], 2 * d[12], 2 * d[14], d[15] + d[16],
            2 * d[17], d[18] + d[19], d[19] + d[20], 2 * d[21], d[22] + d[23],
            2 * d[24], 2 * d[26], 2 * d[28], 2 * d[31], 2 * d[38],
        ],
        3 => [0, 9, 12, 13, 15, 16, 17, 18, 20, 21, 22, 23, 25, 26, 29, 38].iter().map(|&i| 3 * d[i]).collect(),
        4 => vec![
            4 * d[0], 2 * d[10] + 2 * d[11], 4 * d[13], 4 * d[14], 2 * d[15] + 2 * d[16],
            2 * d[16] + 2 * d[17], 2 * d[17] + 2 * d[18], 2 * d[18] + 2 * d[19],
            2 * d[19] + 2 * d[20], 2 * d[20] + 2 * d[21], 2 * d[21] + 2 * d[22],
            2 * d[22] + 2 * d[23], 4 * d[24], 4 * d[25], 2 * d[27] + 2 * d[28], 4 * d[38],
        ],
        5 | 10 => {
            let k = hits as u32;
            [0, 11, 13, 15, 16, 17, 18, 19, 19, 20, 21, 22, 23, 25, 27, 38].iter().map(|&i| k * d[i]).collect()
        }
        _ => return None,
    };
    Some(squashed)
}

/// Reduce the damage of `hits` identical hits to 16 totals.
///
/// Supports 16- and 39-roll single-hit distributions with 2, 3, 4, 5 or 10
/// hits, and the 256-point Parental Bond combination. Anything else is
/// reported through [`soft_error`] and returned unchanged.
pub fn squash_multihit(gen: u8, d: &[u32], hits: u8, err: bool) -> Vec<u32> {
    if d.len() == 1 {
        return vec![d[0] * hits as u32];
    }
    if gen == 1 {
        return d.iter().map(|&x| x * hits as u32).collect();
    }

    let squashed = match d.len() {
        16 => squash_sixteen(d, hits),
        39 => squash_thirty_nine(d, hits),
        256 => {
            if hits > 1 {
                soft_error(err, &format!("Unexpected # of hits for Parental Bond: {hits}"));
            }
            // Sliding 16-point windows, rounded half up
            let averaged = (0..16).map(|i| (d[i..i + 16].iter().sum::<u32>() + 8) / 16).collect();
            return averaged;
        }
        len => {
            soft_error(err, &format!("Unexpected # of possible damage values: {len}"));
            return d.to_vec();
        }
    };
    squashed.unwrap_or_else(|| {
        soft_error(err, &format!("Unexpected # of hits: {hits}"));
        d.to_vec()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sixteen() -> Vec<u32> {
        (0..16).map(|i| 100 + i).collect()
    }

    #[test]
    fn test_fixed_damage_multiplies() {
        assert_eq!(squash_multihit(9, &[40], 3, true), vec![120]);
    }

    #[test]
    fn test_endpoints_are_exact() {
        let d = sixteen();
        for hits in [2, 3, 4, 5, 10] {
            let squashed = squash_multihit(9, &d, hits, true);
            assert_eq!(squashed.len(), 16);
            assert_eq!(squashed[0], d[0] * hits as u32);
            assert_eq!(squashed[15], d[15] * hits as u32);
            assert!(squashed.windows(2).all(|w| w[0] <= w[1]), "{hits} hits: {squashed:?}");
        }
    }

    #[test]
    fn test_two_hit_table() {
        let squashed = squash_multihit(9, &sixteen(), 2, true);
        assert_eq!(&squashed[..4], &[200, 205, 208, 209]);
    }

    #[test]
    fn test_unsupported_shapes_pass_through() {
        let d = sixteen();
        assert_eq!(squash_multihit(9, &d, 7, false), d);
        let odd: Vec<u32> = (0..20).collect();
        assert_eq!(squash_multihit(9, &odd, 2, false), odd);
    }

    #[test]
    fn test_parental_bond_windows() {
        let d = vec![10; 256];
        assert_eq!(squash_multihit(9, &d, 1, true), vec![10; 16]);
    }

    #[test]
    fn test_thirty_nine_rolls() {
        let d: Vec<u32> = (0..39).map(|i| 50 + i).collect();
        let squashed = squash_multihit(9, &d, 3, true);
        assert_eq!((squashed[0], squashed[1], squashed[15]), (150, 177, 264));
    }

    #[test]
    fn test_ten_hit_midpoint_uses_ten_copies() {
        let d = sixteen();
        let squashed = squash_multihit(9, &d, 10, true);
        assert_eq!(&squashed[10..13], &[1085, 1090, 1095]);
        assert_eq!(squashed[11], 10 * d[9]);
    }
}
