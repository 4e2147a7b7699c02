//! Builders shared by the integration tests.

#![allow(dead_code)]

use poke_calc::moves::MoveFlagSet;
use poke_calc::{Move, MoveCategory, MoveSet, Pokemon, PokemonSet, StatsTable, Type};

/// Base 100 across the board: 341 HP and 236 in every other stat at level 100.
pub const EVEN_STATS: StatsTable<u32> = StatsTable { hp: 100, atk: 100, def: 100, spa: 100, spd: 100, spe: 100 };

pub fn set(name: &str, types: &[Type], ability: &str) -> PokemonSet {
    PokemonSet {
        name: name.into(),
        types: types.to_vec(),
        base_stats: EVEN_STATS,
        ability: Some(ability.into()),
        ..Default::default()
    }
}

pub fn pokemon(name: &str, types: &[Type], ability: &str) -> Pokemon {
    Pokemon::from_set(set(name, types, ability)).expect("valid set")
}

pub fn with(set: PokemonSet, edit: impl FnOnce(&mut PokemonSet)) -> Pokemon {
    let mut set = set;
    edit(&mut set);
    Pokemon::from_set(set).expect("valid set")
}

pub fn physical(name: &str, bp: u32, move_type: Type) -> MoveSet {
    MoveSet { name: name.into(), bp, move_type, category: MoveCategory::Physical, ..Default::default() }
}

pub fn special(name: &str, bp: u32, move_type: Type) -> MoveSet {
    MoveSet { name: name.into(), bp, move_type, category: MoveCategory::Special, ..Default::default() }
}

pub fn contact(mut set: MoveSet) -> MoveSet {
    set.flags = MoveFlagSet { contact: true, ..set.flags };
    set
}

pub fn build(set: MoveSet) -> Move {
    Move::from_set(set).expect("valid move")
}

pub fn tackle() -> Move {
    build(contact(physical("Tackle", 40, Type::Normal)))
}
