//! Elemental types and the type chart.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CalcError;

/// A Pokémon or move type.
///
/// `Typeless` is the `???` type and `Stellar` is the Tera-only sentinel.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
#[repr(u8)]
pub enum Type {
    Normal,
    Fire,
    Water,
    Electric,
    Grass,
    Ice,
    Fighting,
    Poison,
    Ground,
    Flying,
    Psychic,
    Bug,
    Rock,
    Ghost,
    Dragon,
    Dark,
    Steel,
    Fairy,
    Stellar,
    Typeless,
}

impl Type {
    pub const ALL: [Type; 18] = [
        Type::Normal,
        Type::Fire,
        Type::Water,
        Type::Electric,
        Type::Grass,
        Type::Ice,
        Type::Fighting,
        Type::Poison,
        Type::Ground,
        Type::Flying,
        Type::Psychic,
        Type::Bug,
        Type::Rock,
        Type::Ghost,
        Type::Dragon,
        Type::Dark,
        Type::Steel,
        Type::Fairy,
    ];

    pub const fn name(self) -> &'static str {
        match self {
            Type::Normal => "Normal",
            Type::Fire => "Fire",
            Type::Water => "Water",
            Type::Electric => "Electric",
            Type::Grass => "Grass",
            Type::Ice => "Ice",
            Type::Fighting => "Fighting",
            Type::Poison => "Poison",
            Type::Ground => "Ground",
            Type::Flying => "Flying",
            Type::Psychic => "Psychic",
            Type::Bug => "Bug",
            Type::Rock => "Rock",
            Type::Ghost => "Ghost",
            Type::Dragon => "Dragon",
            Type::Dark => "Dark",
            Type::Steel => "Steel",
            Type::Fairy => "Fairy",
            Type::Stellar => "Stellar",
            Type::Typeless => "???",
        }
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Type {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed == "???" {
            return Ok(Type::Typeless);
        }
        let lower = trimmed.to_ascii_lowercase();
        if lower == "stellar" {
            return Ok(Type::Stellar);
        }
        Type::ALL
            .iter()
            .copied()
            .find(|t| t.name().eq_ignore_ascii_case(&lower))
            .ok_or_else(|| CalcError::UnknownType(trimmed.to_string()))
    }
}

impl TryFrom<String> for Type {
    type Error = CalcError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Type> for String {
    fn from(value: Type) -> Self {
        value.name().to_string()
    }
}

/// One cell of the type chart.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TypeEffectiveness {
    Immune,
    NotVeryEffective,
    Normal,
    SuperEffective,
}

impl TypeEffectiveness {
    pub const fn multiplier(self) -> f64 {
        match self {
            TypeEffectiveness::Immune => 0.0,
            TypeEffectiveness::NotVeryEffective => 0.5,
            TypeEffectiveness::Normal => 1.0,
            TypeEffectiveness::SuperEffective => 2.0,
        }
    }
}

/// Look up the chart entry for an attacking type against one defending type.
///
/// `???` and `Stellar` are neutral on both sides of the chart.
pub const fn type_chart(attacking: Type, defending: Type) -> TypeEffectiveness {
    use Type::*;
    use TypeEffectiveness::{Immune as X, NotVeryEffective as H, SuperEffective as S};

    match (attacking, defending) {
        (Normal, Rock | Steel) => H,
        (Normal, Ghost) => X,

        (Fire, Fire | Water | Rock | Dragon) => H,
        (Fire, Grass | Ice | Bug | Steel) => S,

        (Water, Water | Grass | Dragon) => H,
        (Water, Fire | Ground | Rock) => S,

        (Electric, Electric | Grass | Dragon) => H,
        (Electric, Ground) => X,
        (Electric, Water | Flying) => S,

        (Grass, Fire | Grass | Poison | Flying | Bug | Dragon | Steel) => H,
        (Grass, Water | Ground | Rock) => S,

        (Ice, Fire | Water | Ice | Steel) => H,
        (Ice, Grass | Ground | Flying | Dragon) => S,

        (Fighting, Poison | Flying | Psychic | Bug | Fairy) => H,
        (Fighting, Ghost) => X,
        (Fighting, Normal | Ice | Rock | Dark | Steel) => S,

        (Poison, Poison | Ground | Rock | Ghost) => H,
        (Poison, Steel) => X,
        (Poison, Grass | Fairy) => S,

        (Ground, Grass | Bug) => H,
        (Ground, Flying) => X,
        (Ground, Fire | Electric | Poison | Rock | Steel) => S,

        (Flying, Electric | Rock | Steel) => H,
        (Flying, Grass | Fighting | Bug) => S,

        (Psychic, Psychic | Steel) => H,
        (Psychic, Dark) => X,
        (Psychic, Fighting | Poison) => S,

        (Bug, Fire | Fighting | Poison | Flying | Ghost | Steel | Fairy) => H,
        (Bug, Grass | Psychic | Dark) => S,

        (Rock, Fighting | Ground | Steel) => H,
        (Rock, Fire | Ice | Flying | Bug) => S,

        (Ghost, Dark) => H,
        (Ghost, Normal) => X,
        (Ghost, Psychic | Ghost) => S,

        (Dragon, Steel) => H,
        (Dragon, Fairy) => X,
        (Dragon, Dragon) => S,

        (Dark, Fighting | Dark | Fairy) => H,
        (Dark, Psychic | Ghost) => S,

        (Steel, Fire | Water | Electric | Steel) => H,
        (Steel, Ice | Rock | Fairy) => S,

        (Fairy, Fire | Poison | Steel) => H,
        (Fairy, Fighting | Dragon | Dark) => S,

        _ => TypeEffectiveness::Normal,
    }
}
