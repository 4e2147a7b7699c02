//! Ordered record of every modifier and special case that fired.
//!
//! The numeric pipeline never formats text. Instead each activated branch
//! pushes a [`TraceEvent`]; description layers read the finished trace.

use crate::entities::Pokemon;
use crate::field::{ChromaticField, Terrain, Weather};
use crate::stats::StatId;
use crate::types::Type;

/// Which combatant an event belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Role {
    Attacker,
    Defender,
}

#[derive(Clone, Debug, PartialEq)]
pub enum TraceEvent {
    Ability { role: Role, name: String },
    Item { role: Role, name: String },
    Weather(Weather),
    Terrain(Terrain),
    ChromaticField(ChromaticField),
    /// A side condition such as Reflect or Helping Hand.
    SideCondition { role: Role, name: &'static str },
    /// A named global or move condition such as Gravity or a critical hit.
    Condition(&'static str),
    /// Displayed base power; may carry a fraction after a boost.
    BasePower(f64),
    MoveType(Type),
    /// The move resolved into another move (Nature Power).
    MoveName(String),
    Boost { role: Role, stat: StatId, stage: i8 },
    Tera { role: Role, tera: Type },
    Hits(u8),
    /// A multi-turn calculation spanning this many uses.
    Turns(u8),
    AlliesFainted(u8),
    FoesFainted(u8),
    /// Turns a Relicanth Crest holder has stayed in.
    RelicanthTurns { role: Role, turns: u8 },
    /// The move's slot, for effects keyed on the first slot.
    MoveSlot(u8),
    Weight { role: Role, kg: f64 },
    /// The combatant's typing was replaced (Soak, Mimicry, Victory Star).
    TypeChange { role: Role, to: Type },
    /// Ring Arena grit stages held by the attacker.
    GritStages(u8),
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ModifierTrace {
    events: Vec<TraceEvent>,
}

impl ModifierTrace {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an event. An event already present is not repeated.
    pub fn push(&mut self, event: TraceEvent) {
        if !self.events.contains(&event) {
            self.events.push(event);
        }
    }

    pub fn extend(&mut self, events: impl IntoIterator<Item = TraceEvent>) {
        for event in events {
            self.push(event);
        }
    }

    pub fn events(&self) -> &[TraceEvent] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn contains(&self, event: &TraceEvent) -> bool {
        self.events.contains(event)
    }

    pub fn has_ability(&self, role: Role, name: &str) -> bool {
        self.events.iter().any(|e| matches!(e, TraceEvent::Ability { role: r, name: n } if *r == role && n == name))
    }

    pub fn has_item(&self, role: Role, name: &str) -> bool {
        self.events.iter().any(|e| matches!(e, TraceEvent::Item { role: r, name: n } if *r == role && n == name))
    }

    pub fn has_condition(&self, name: &str) -> bool {
        self.events.iter().any(|e| match e {
            TraceEvent::Condition(c) => *c == name,
            TraceEvent::SideCondition { name: c, .. } => *c == name,
            _ => false,
        })
    }

    pub fn ability(role: Role, name: &str) -> TraceEvent {
        TraceEvent::Ability { role, name: name.to_string() }
    }

    pub fn item(role: Role, name: &str) -> TraceEvent {
        TraceEvent::Item { role, name: name.to_string() }
    }

    /// Record the combatant's current ability.
    pub fn push_ability(&mut self, role: Role, pokemon: &Pokemon) {
        if let Some(ability) = &pokemon.ability {
            self.push(TraceEvent::Ability { role, name: ability.clone() });
        }
    }

    /// Record the combatant's current held item.
    pub fn push_item(&mut self, role: Role, pokemon: &Pokemon) {
        if let Some(item) = &pokemon.item {
            self.push(TraceEvent::Item { role, name: item.clone() });
        }
    }

    /// Record the active chromatic field, if any.
    pub fn push_field(&mut self, field: Option<ChromaticField>) {
        if let Some(field) = field {
            self.push(TraceEvent::ChromaticField(field));
        }
    }

    pub fn push_weather(&mut self, weather: Option<Weather>) {
        if let Some(weather) = weather {
            self.push(TraceEvent::Weather(weather));
        }
    }

    pub fn push_terrain(&mut self, terrain: Option<Terrain>) {
        if let Some(terrain) = terrain {
            self.push(TraceEvent::Terrain(terrain));
        }
    }
}

impl IntoIterator for ModifierTrace {
    type Item = TraceEvent;
    type IntoIter = std::vec::IntoIter<TraceEvent>;

    fn into_iter(self) -> Self::IntoIter {
        self.events.into_iter()
    }
}
