//! Stat identifiers, stat tables and the stat formula.

use std::fmt;
use std::ops::{Index, IndexMut};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CalcError;
use crate::natures::Nature;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatId {
    Hp,
    Atk,
    Def,
    Spa,
    Spd,
    Spe,
}

impl StatId {
    pub const ALL: [StatId; 6] = [
        StatId::Hp,
        StatId::Atk,
        StatId::Def,
        StatId::Spa,
        StatId::Spd,
        StatId::Spe,
    ];

    /// Battle stats in the order boost-counting and Quark Drive selection read them.
    pub const BOOSTABLE: [StatId; 5] = [StatId::Atk, StatId::Def, StatId::Spa, StatId::Spd, StatId::Spe];

    pub const fn short_name(self) -> &'static str {
        match self {
            StatId::Hp => "hp",
            StatId::Atk => "atk",
            StatId::Def => "def",
            StatId::Spa => "spa",
            StatId::Spd => "spd",
            StatId::Spe => "spe",
        }
    }

    pub const fn display_name(self) -> &'static str {
        match self {
            StatId::Hp => "HP",
            StatId::Atk => "Atk",
            StatId::Def => "Def",
            StatId::Spa => "SpA",
            StatId::Spd => "SpD",
            StatId::Spe => "Spe",
        }
    }
}

impl fmt::Display for StatId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for StatId {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        StatId::ALL
            .iter()
            .copied()
            .find(|stat| stat.short_name().eq_ignore_ascii_case(s) || stat.display_name().eq_ignore_ascii_case(s))
            .ok_or_else(|| CalcError::UnknownStat(s.to_string()))
    }
}

/// One value per stat.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StatsTable<T> {
    pub hp: T,
    pub atk: T,
    pub def: T,
    pub spa: T,
    pub spd: T,
    pub spe: T,
}

impl<T: Copy> StatsTable<T> {
    pub const fn splat(value: T) -> Self {
        Self { hp: value, atk: value, def: value, spa: value, spd: value, spe: value }
    }
}

impl<T> Index<StatId> for StatsTable<T> {
    type Output = T;

    fn index(&self, stat: StatId) -> &T {
        match stat {
            StatId::Hp => &self.hp,
            StatId::Atk => &self.atk,
            StatId::Def => &self.def,
            StatId::Spa => &self.spa,
            StatId::Spd => &self.spd,
            StatId::Spe => &self.spe,
        }
    }
}

impl<T> IndexMut<StatId> for StatsTable<T> {
    fn index_mut(&mut self, stat: StatId) -> &mut T {
        match stat {
            StatId::Hp => &mut self.hp,
            StatId::Atk => &mut self.atk,
            StatId::Def => &mut self.def,
            StatId::Spa => &mut self.spa,
            StatId::Spd => &mut self.spd,
            StatId::Spe => &mut self.spe,
        }
    }
}

/// Compute a stat from its base value, IV, EV, level and nature.
///
/// Shedinja-style fixed HP is left to the caller.
pub fn calc_stat(stat: StatId, base: u32, iv: u32, ev: u32, level: u32, nature: Nature) -> u32 {
    let core = (2 * base + iv + ev / 4) * level / 100;
    if stat == StatId::Hp {
        return core + level + 10;
    }
    let value = core + 5;
    if nature.plus() == Some(stat) {
        value * 110 / 100
    } else if nature.minus() == Some(stat) {
        value * 90 / 100
    } else {
        value
    }
}
