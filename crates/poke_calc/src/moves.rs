//! Move entity and its attribute bag.

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

use crate::error::{CalcError, Result};
use crate::types::Type;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MoveCategory {
    #[default]
    Physical,
    Special,
    Status,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MoveTarget {
    #[default]
    Normal,
    AllAdjacent,
    AllAdjacentFoes,
    #[serde(rename = "self")]
    User,
    Any,
    All,
}

bitflags! {
    /// Boolean move properties read by abilities and items.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct MoveFlags: u16 {
        const CONTACT = 1 << 0;
        const SOUND   = 1 << 1;
        const BULLET  = 1 << 2;
        const PULSE   = 1 << 3;
        const PUNCH   = 1 << 4;
        const BITE    = 1 << 5;
        const WIND    = 1 << 6;
        const SLICING = 1 << 7;
        const BEAM     = 1 << 8;
        const STABBING = 1 << 9;
    }
}

/// Flag set as it appears in the JSON attribute bag.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MoveFlagSet {
    pub contact: bool,
    pub sound: bool,
    pub bullet: bool,
    pub pulse: bool,
    pub punch: bool,
    pub bite: bool,
    pub wind: bool,
    pub slicing: bool,
    pub beam: bool,
    pub stabbing: bool,
}

impl From<MoveFlagSet> for MoveFlags {
    fn from(set: MoveFlagSet) -> Self {
        let mut flags = MoveFlags::empty();
        flags.set(MoveFlags::CONTACT, set.contact);
        flags.set(MoveFlags::SOUND, set.sound);
        flags.set(MoveFlags::BULLET, set.bullet);
        flags.set(MoveFlags::PULSE, set.pulse);
        flags.set(MoveFlags::PUNCH, set.punch);
        flags.set(MoveFlags::BITE, set.bite);
        flags.set(MoveFlags::WIND, set.wind);
        flags.set(MoveFlags::SLICING, set.slicing);
        flags.set(MoveFlags::BEAM, set.beam);
        flags.set(MoveFlags::STABBING, set.stabbing);
        flags
    }
}

/// Plain attribute bag a [`Move`] is built from.
///
/// Numeric move data (power, type, category, flags) comes from the caller's
/// move table; battle-time options mirror the calculator's move state.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MoveSet {
    pub name: String,
    pub bp: u32,
    #[serde(rename = "type")]
    pub move_type: Type,
    pub category: MoveCategory,
    pub flags: MoveFlagSet,
    pub priority: i8,
    pub target: MoveTarget,
    pub hits: Option<u8>,
    pub times_used: Option<u8>,
    pub times_used_with_metronome: Option<u8>,
    pub stockpiles: u8,
    pub move_slot: Option<u8>,
    pub is_crit: bool,
    pub will_crit: bool,
    pub use_z: bool,
    pub use_max: bool,
    pub is_stellar_first_use: Option<bool>,
    pub breaks_protect: bool,
    pub secondaries: bool,
    pub drain: Option<[u32; 2]>,
    pub recoil: Option<[u32; 2]>,
    pub has_crash_damage: bool,
    pub mind_blown_recoil: bool,
    pub struggle_recoil: bool,
    pub ignore_defensive: bool,
    /// Stages of the user's attacking stat lost after each use.
    pub self_drops: u8,
}

impl Default for MoveSet {
    fn default() -> Self {
        Self {
            name: String::new(),
            bp: 0,
            move_type: Type::Normal,
            category: MoveCategory::Physical,
            flags: MoveFlagSet::default(),
            priority: 0,
            target: MoveTarget::Normal,
            hits: None,
            times_used: None,
            times_used_with_metronome: None,
            stockpiles: 0,
            move_slot: None,
            is_crit: false,
            will_crit: false,
            use_z: false,
            use_max: false,
            is_stellar_first_use: None,
            breaks_protect: false,
            secondaries: false,
            drain: None,
            recoil: None,
            has_crash_damage: false,
            mind_blown_recoil: false,
            struggle_recoil: false,
            ignore_defensive: false,
            self_drops: 0,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Move {
    pub name: String,
    /// Name before Nature Power (or similar) resolves into another move.
    pub original_name: String,
    pub bp: u32,
    pub move_type: Type,
    pub category: MoveCategory,
    pub flags: MoveFlags,
    pub priority: i8,
    pub target: MoveTarget,
    pub hits: u8,
    pub times_used: u8,
    pub times_used_with_metronome: u8,
    pub stockpiles: u8,
    pub move_slot: u8,
    pub is_crit: bool,
    pub is_z: bool,
    pub is_max: bool,
    pub is_stellar_first_use: bool,
    pub breaks_protect: bool,
    pub secondaries: bool,
    pub drain: Option<(u32, u32)>,
    pub recoil: Option<(u32, u32)>,
    pub has_crash_damage: bool,
    pub mind_blown_recoil: bool,
    pub struggle_recoil: bool,
    pub ignore_defensive: bool,
    pub self_drops: u8,
}

impl Move {
    pub fn from_set(set: MoveSet) -> Result<Self> {
        if set.name.trim().is_empty() {
            return Err(CalcError::InvalidSet { field: "move.name", reason: "empty".into() });
        }
        let ratio = |field: &'static str, value: Option<[u32; 2]>| -> Result<Option<(u32, u32)>> {
            match value {
                Some([_, 0]) => Err(CalcError::InvalidSet { field, reason: "zero denominator".into() }),
                Some([n, d]) => Ok(Some((n, d))),
                None => Ok(None),
            }
        };
        Ok(Self {
            drain: ratio("move.drain", set.drain)?,
            recoil: ratio("move.recoil", set.recoil)?,
            original_name: set.name.clone(),
            name: set.name,
            bp: set.bp,
            move_type: set.move_type,
            category: set.category,
            flags: set.flags.into(),
            priority: set.priority,
            target: set.target,
            hits: set.hits.unwrap_or(1).max(1),
            times_used: set.times_used.unwrap_or(1).max(1),
            times_used_with_metronome: set.times_used_with_metronome.unwrap_or(0),
            stockpiles: set.stockpiles,
            move_slot: set.move_slot.unwrap_or(1),
            is_crit: set.is_crit || set.will_crit,
            is_z: set.use_z,
            is_max: set.use_max,
            is_stellar_first_use: set.is_stellar_first_use.unwrap_or(true),
            breaks_protect: set.breaks_protect,
            secondaries: set.secondaries,
            has_crash_damage: set.has_crash_damage,
            mind_blown_recoil: set.mind_blown_recoil,
            struggle_recoil: set.struggle_recoil,
            ignore_defensive: set.ignore_defensive,
            self_drops: set.self_drops,
        })
    }

    pub fn named(&self, names: &[&str]) -> bool {
        names.contains(&self.name.as_str())
    }

    pub fn has_type(&self, t: Type) -> bool {
        self.move_type == t
    }

    pub fn has_flag(&self, flag: MoveFlags) -> bool {
        self.flags.contains(flag)
    }

    pub fn is_physical(&self) -> bool {
        self.category == MoveCategory::Physical
    }

    pub fn is_special(&self) -> bool {
        self.category == MoveCategory::Special
    }

    pub fn is_spread(&self) -> bool {
        matches!(self.target, MoveTarget::AllAdjacent | MoveTarget::AllAdjacentFoes)
    }
}
