//! poke_calc - Pokémon damage calculator core
//!
//! This library turns an attacker, a defender, a move and a battlefield into
//! the 16-roll damage distribution, the chance to knock out, and the
//! residual effects around the hit. Every input is a plain attribute bag;
//! the calculator owns no species or move tables.

/// Type definitions and type chart
pub mod types;

/// Nature definitions and stat modifiers
pub mod natures;

/// Stat identifiers and the stat formula
pub mod stats;

/// Pokémon entity and attribute bag
pub mod entities;

/// Move entity and attribute bag
pub mod moves;

/// Held item metadata
pub mod items;

/// Weather, terrain, chromatic fields and side conditions
pub mod field;

pub mod error;

/// Damage pipeline
pub mod damage;

/// Knockout chance, hazards and end-of-turn effects
pub mod ko;

pub mod recovery;

pub mod display;

// Re-export commonly used types
pub use damage::{calculate, Damage, DamageResult, Generation, ModifierTrace, TraceEvent};
pub use display::{display, display_move, Notation};
pub use entities::{Pokemon, PokemonSet, Status};
pub use error::{CalcError, Result};
pub use field::{ChromaticField, Field, Side, Terrain, Weather};
pub use ko::{get_ko_chance, KoChance};
pub use moves::{Move, MoveCategory, MoveSet};
pub use recovery::{get_recoil, get_recovery};
pub use stats::{StatId, StatsTable};
pub use types::Type;
