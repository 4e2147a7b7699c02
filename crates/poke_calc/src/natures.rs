//! Natures and their stat modifiers.

use std::str::FromStr;

use crate::error::CalcError;
use crate::stats::StatId;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Nature {
    #[default]
    Hardy,
    Lonely,
    Brave,
    Adamant,
    Naughty,
    Bold,
    Docile,
    Relaxed,
    Impish,
    Lax,
    Timid,
    Hasty,
    Serious,
    Jolly,
    Naive,
    Modest,
    Mild,
    Quiet,
    Bashful,
    Rash,
    Calm,
    Gentle,
    Sassy,
    Careful,
    Quirky,
}

const NATURE_NAMES: [(&str, Nature); 25] = [
    ("hardy", Nature::Hardy),
    ("lonely", Nature::Lonely),
    ("brave", Nature::Brave),
    ("adamant", Nature::Adamant),
    ("naughty", Nature::Naughty),
    ("bold", Nature::Bold),
    ("docile", Nature::Docile),
    ("relaxed", Nature::Relaxed),
    ("impish", Nature::Impish),
    ("lax", Nature::Lax),
    ("timid", Nature::Timid),
    ("hasty", Nature::Hasty),
    ("serious", Nature::Serious),
    ("jolly", Nature::Jolly),
    ("naive", Nature::Naive),
    ("modest", Nature::Modest),
    ("mild", Nature::Mild),
    ("quiet", Nature::Quiet),
    ("bashful", Nature::Bashful),
    ("rash", Nature::Rash),
    ("calm", Nature::Calm),
    ("gentle", Nature::Gentle),
    ("sassy", Nature::Sassy),
    ("careful", Nature::Careful),
    ("quirky", Nature::Quirky),
];

/// Row and column order of the nature grid.
const GRID_STATS: [StatId; 5] = [StatId::Atk, StatId::Def, StatId::Spe, StatId::Spa, StatId::Spd];

impl Nature {
    /// Natures are laid out as a 5x5 grid of (raised, lowered) stats.
    fn grid(self) -> (usize, usize) {
        let index = self as usize;
        (index / 5, index % 5)
    }

    /// The stat raised by 10%, if the nature is not neutral.
    pub fn plus(self) -> Option<StatId> {
        let (plus, minus) = self.grid();
        (plus != minus).then(|| GRID_STATS[plus])
    }

    /// The stat lowered by 10%, if the nature is not neutral.
    pub fn minus(self) -> Option<StatId> {
        let (plus, minus) = self.grid();
        (plus != minus).then(|| GRID_STATS[minus])
    }
}

impl FromStr for Nature {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        NATURE_NAMES
            .iter()
            .find(|(name, _)| *name == lower)
            .map(|(_, nature)| *nature)
            .ok_or_else(|| CalcError::UnknownNature(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nature_grid() {
        assert_eq!(Nature::Adamant.plus(), Some(StatId::Atk));
        assert_eq!(Nature::Adamant.minus(), Some(StatId::Spa));
        assert_eq!(Nature::Timid.plus(), Some(StatId::Spe));
        assert_eq!(Nature::Timid.minus(), Some(StatId::Atk));
        assert_eq!(Nature::Careful.plus(), Some(StatId::Spd));
        assert_eq!(Nature::Careful.minus(), Some(StatId::Spa));
        assert_eq!(Nature::Brave.minus(), Some(StatId::Spe));
        assert_eq!(Nature::Serious.plus(), None);
    }

    #[test]
    fn test_nature_parse() {
        assert_eq!("Jolly".parse::<Nature>(), Ok(Nature::Jolly));
        assert!("Grumpy".parse::<Nature>().is_err());
    }
}
