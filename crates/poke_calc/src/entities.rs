//! Pokémon entity and its attribute bag.
//!
//! A [`Pokemon`] is rebuilt from a [`PokemonSet`] for every calculation.
//! Species data (types, base stats, weight) travels inside the bag; the
//! calculator does not own a species table.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{CalcError, Result};
use crate::natures::Nature;
use crate::stats::{calc_stat, StatId, StatsTable};
use crate::types::Type;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Status {
    #[default]
    None,
    Burn,
    Paralysis,
    Poison,
    Toxic,
    Sleep,
    Freeze,
}

impl FromStr for Status {
    type Err = CalcError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "" | "healthy" => Ok(Status::None),
            "brn" => Ok(Status::Burn),
            "par" => Ok(Status::Paralysis),
            "psn" => Ok(Status::Poison),
            "tox" => Ok(Status::Toxic),
            "slp" => Ok(Status::Sleep),
            "frz" => Ok(Status::Freeze),
            other => Err(CalcError::UnknownStatus(other.to_string())),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Gender {
    M,
    F,
    #[default]
    N,
}

/// Stat chosen by Protosynthesis / Quark Drive.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BoostedStat {
    Auto,
    Stat(StatId),
}

/// Plain attribute bag used to build a [`Pokemon`].
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PokemonSet {
    pub name: String,
    pub types: Vec<Type>,
    pub base_stats: StatsTable<u32>,
    pub weightkg: f64,
    pub nfe: bool,
    pub level: u8,
    pub ability: Option<String>,
    pub ability_on: bool,
    pub is_dynamaxed: bool,
    pub dynamax_level: Option<u8>,
    pub is_starstruck: bool,
    pub is_lock_on: bool,
    pub grit_stages: u8,
    pub allies_fainted: u8,
    pub foes_fainted: u8,
    pub relicanth_turns: u8,
    pub boosted_stat: Option<String>,
    pub item: Option<String>,
    pub gender: Option<Gender>,
    pub nature: Option<String>,
    pub ivs: StatsTable<Option<u32>>,
    pub evs: StatsTable<Option<u32>>,
    pub boosts: StatsTable<Option<i8>>,
    #[serde(rename = "curHP")]
    pub cur_hp: Option<u32>,
    pub status: Option<String>,
    pub tera_type: Option<Type>,
    pub toxic_counter: u8,
}

impl Default for PokemonSet {
    fn default() -> Self {
        Self {
            name: String::new(),
            types: Vec::new(),
            base_stats: StatsTable::splat(0),
            weightkg: 0.0,
            nfe: false,
            level: 100,
            ability: None,
            ability_on: false,
            is_dynamaxed: false,
            dynamax_level: None,
            is_starstruck: false,
            is_lock_on: false,
            grit_stages: 0,
            allies_fainted: 0,
            foes_fainted: 0,
            relicanth_turns: 0,
            boosted_stat: None,
            item: None,
            gender: None,
            nature: None,
            ivs: StatsTable::default(),
            evs: StatsTable::default(),
            boosts: StatsTable::default(),
            cur_hp: None,
            status: None,
            tera_type: None,
            toxic_counter: 0,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Pokemon {
    pub name: String,
    pub types: Vec<Type>,
    pub level: u32,
    pub base_stats: StatsTable<u32>,
    pub weightkg: f64,
    pub nfe: bool,
    pub gender: Gender,
    pub ability: Option<String>,
    pub ability_on: bool,
    pub item: Option<String>,
    pub disabled_item: Option<String>,
    pub nature: Nature,
    pub ivs: StatsTable<u32>,
    pub evs: StatsTable<u32>,
    pub boosts: StatsTable<i8>,
    /// Stats before boosts.
    pub raw_stats: StatsTable<u32>,
    /// Stats after boosts and speed modifiers, filled by the final-stats pass.
    pub stats: StatsTable<u32>,
    pub original_cur_hp: u32,
    pub status: Status,
    pub tera_type: Option<Type>,
    pub toxic_counter: u8,
    pub is_dynamaxed: bool,
    pub dynamax_level: u8,
    pub is_starstruck: bool,
    pub is_lock_on: bool,
    pub grit_stages: u8,
    pub allies_fainted: u8,
    pub foes_fainted: u8,
    /// Consecutive turns a Relicanth Crest holder has stayed in
    pub relicanth_turns: u8,
    pub boosted_stat: Option<BoostedStat>,
}

impl Pokemon {
    pub fn from_set(set: PokemonSet) -> Result<Self> {
        if set.types.is_empty() || set.types.len() > 2 {
            return Err(CalcError::InvalidSet { field: "types", reason: format!("expected 1 or 2, got {}", set.types.len()) });
        }
        if !(1..=100).contains(&set.level) {
            return Err(CalcError::InvalidSet { field: "level", reason: set.level.to_string() });
        }
        let nature = match set.nature.as_deref() {
            Some(name) => name.parse()?,
            None => Nature::Hardy,
        };
        let status = match set.status.as_deref() {
            Some(name) => name.parse()?,
            None => Status::None,
        };
        let boosted_stat = match set.boosted_stat.as_deref() {
            None => None,
            Some("auto") => Some(BoostedStat::Auto),
            Some(name) => Some(BoostedStat::Stat(name.parse()?)),
        };

        let mut ivs = StatsTable::splat(31);
        let mut evs = StatsTable::splat(0);
        let mut boosts = StatsTable::splat(0i8);
        for stat in StatId::ALL {
            if let Some(iv) = set.ivs[stat] {
                ivs[stat] = iv.min(31);
            }
            if let Some(ev) = set.evs[stat] {
                evs[stat] = ev.min(252);
            }
            if let Some(boost) = set.boosts[stat] {
                boosts[stat] = boost.clamp(-6, 6);
            }
        }

        let level = set.level as u32;
        let mut raw_stats = StatsTable::splat(0);
        for stat in StatId::ALL {
            raw_stats[stat] = calc_stat(stat, set.base_stats[stat], ivs[stat], evs[stat], level, nature);
        }
        // Shedinja
        if set.base_stats.hp == 1 {
            raw_stats.hp = 1;
        }

        let original_cur_hp = set.cur_hp.map_or(raw_stats.hp, |hp| hp.min(raw_stats.hp));

        Ok(Self {
            name: set.name,
            types: set.types,
            level,
            base_stats: set.base_stats,
            weightkg: set.weightkg,
            nfe: set.nfe,
            gender: set.gender.unwrap_or_default(),
            ability: set.ability.filter(|a| !a.is_empty()),
            ability_on: set.ability_on,
            item: set.item.filter(|i| !i.is_empty()),
            disabled_item: None,
            nature,
            ivs,
            evs,
            boosts,
            stats: raw_stats,
            raw_stats,
            original_cur_hp,
            status,
            tera_type: set.tera_type,
            toxic_counter: set.toxic_counter,
            is_dynamaxed: set.is_dynamaxed,
            dynamax_level: set.dynamax_level.unwrap_or(10).min(10),
            is_starstruck: set.is_starstruck,
            is_lock_on: set.is_lock_on,
            grit_stages: set.grit_stages,
            allies_fainted: set.allies_fainted,
            foes_fainted: set.foes_fainted,
            relicanth_turns: set.relicanth_turns,
            boosted_stat,
        })
    }

    /// Maximum HP, scaled while Dynamaxed.
    pub fn max_hp(&self) -> u32 {
        if self.is_dynamaxed && self.base_stats.hp != 1 {
            self.raw_stats.hp * (150 + 5 * self.dynamax_level as u32) / 100
        } else {
            self.raw_stats.hp
        }
    }

    /// Current HP, scaled while Dynamaxed.
    pub fn cur_hp(&self) -> u32 {
        if self.is_dynamaxed && self.base_stats.hp != 1 {
            (self.original_cur_hp * (150 + 5 * self.dynamax_level as u32)).div_ceil(100)
        } else {
            self.original_cur_hp
        }
    }

    pub fn ability_name(&self) -> &str {
        self.ability.as_deref().unwrap_or("")
    }

    pub fn item_name(&self) -> &str {
        self.item.as_deref().unwrap_or("")
    }

    pub fn has_ability(&self, names: &[&str]) -> bool {
        self.ability.as_deref().is_some_and(|a| names.contains(&a))
    }

    pub fn has_item(&self, names: &[&str]) -> bool {
        self.item.as_deref().is_some_and(|i| names.contains(&i))
    }

    pub fn has_status(&self, statuses: &[Status]) -> bool {
        statuses.contains(&self.status)
    }

    pub fn is_statused(&self) -> bool {
        self.status != Status::None
    }

    /// Type check that respects Terastallization (Stellar keeps the natural types).
    pub fn has_type(&self, t: Type) -> bool {
        match self.tera_type {
            Some(tera) if tera != Type::Stellar => tera == t,
            _ => self.types.contains(&t),
        }
    }

    pub fn has_any_type(&self, types: &[Type]) -> bool {
        types.iter().any(|&t| self.has_type(t))
    }

    pub fn has_original_type(&self, t: Type) -> bool {
        self.types.contains(&t)
    }

    pub fn named(&self, names: &[&str]) -> bool {
        names.contains(&self.name.as_str())
    }

    pub fn name_contains(&self, fragment: &str) -> bool {
        self.name.contains(fragment)
    }

    pub fn is_terastallized(&self) -> bool {
        self.tera_type.is_some()
    }

    /// Disable the held item, remembering it for effects that read the original.
    pub fn disable_item(&mut self) {
        if let Some(item) = self.item.take() {
            self.disabled_item = Some(item);
        }
    }

    pub fn reset_stats(&mut self) {
        self.stats = self.raw_stats;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn garchomp() -> PokemonSet {
        PokemonSet {
            name: "Garchomp".into(),
            types: vec![Type::Dragon, Type::Ground],
            base_stats: StatsTable { hp: 108, atk: 130, def: 95, spa: 80, spd: 85, spe: 102 },
            weightkg: 95.0,
            ..Default::default()
        }
    }

    #[test]
    fn test_from_set_defaults() {
        let mon = Pokemon::from_set(garchomp()).unwrap();
        assert_eq!(mon.level, 100);
        assert_eq!(mon.raw_stats.hp, 357);
        assert_eq!(mon.raw_stats.atk, 296);
        assert_eq!(mon.cur_hp(), 357);
        assert_eq!(mon.gender, Gender::N);
    }

    #[test]
    fn test_dynamax_hp() {
        let mut set = garchomp();
        set.is_dynamaxed = true;
        set.cur_hp = Some(100);
        let mon = Pokemon::from_set(set).unwrap();
        assert_eq!(mon.max_hp(), 714);
        assert_eq!(mon.cur_hp(), 200);
    }

    #[test]
    fn test_tera_type_queries() {
        let mut set = garchomp();
        set.tera_type = Some(Type::Steel);
        let mon = Pokemon::from_set(set).unwrap();
        assert!(mon.has_type(Type::Steel));
        assert!(!mon.has_type(Type::Dragon));
        assert!(mon.has_original_type(Type::Dragon));

        let mut stellar = garchomp();
        stellar.tera_type = Some(Type::Stellar);
        let mon = Pokemon::from_set(stellar).unwrap();
        assert!(mon.has_type(Type::Ground));
    }

    #[test]
    fn test_rejects_bad_bags() {
        let mut set = garchomp();
        set.types.clear();
        assert!(Pokemon::from_set(set).is_err());

        let mut set = garchomp();
        set.status = Some("zzz".into());
        assert_eq!(Pokemon::from_set(set), Err(CalcError::UnknownStatus("zzz".into())));
    }
}
