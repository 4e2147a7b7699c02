//! The four modifier chains: base power, attack, defense and final.
//!
//! Each chain is an ordered table of [`Step`]s. A [`ChainRule`] inspects the
//! hit context and, when it applies, pushes its modifier together with the
//! trace events that explain it, then reports that it fired. Rules grouped
//! in a [`Step::FirstOf`] are exclusive: the first rule that fires ends the
//! group. Table order is the order modifiers enter the chain, which matters
//! because every step of [`chain_mods`](super::formula::chain_mods) rounds.

mod attack;
mod base_power;
mod defense;
mod final_mods;

pub use attack::{attack_chain, calculate_attack, AttackStat};
pub use base_power::{base_power_chain, knock_off_resisted};
pub use defense::{calculate_defense, defense_chain, hits_physical};
pub use final_mods::final_mods_chain;

use super::context::HitContext;
use super::modifier::Chain;
use super::trace::{Role, TraceEvent};
use crate::entities::Pokemon;
use crate::field::ChromaticField;

/// A single modifier rule. Returns whether it fired.
pub type ChainRule = fn(&HitContext<'_>, &mut Chain) -> bool;

pub enum Step {
    /// Evaluated on its own.
    Each(ChainRule),
    /// Only the first rule that fires contributes.
    FirstOf(&'static [ChainRule]),
}

/// Evaluate a rule table against one hit.
pub fn run(steps: &[Step], ctx: &HitContext<'_>) -> Chain {
    let mut chain = Chain::new();
    for step in steps {
        match step {
            Step::Each(rule) => {
                rule(ctx, &mut chain);
            }
            Step::FirstOf(rules) => {
                let _ = rules.iter().any(|rule| rule(ctx, &mut chain));
            }
        }
    }
    chain
}

// ============================================================================
// Event helpers
// ============================================================================

fn ability_of(role: Role, pokemon: &Pokemon) -> Option<TraceEvent> {
    pokemon.ability.as_ref().map(|name| TraceEvent::Ability { role, name: name.clone() })
}

fn item_of(role: Role, pokemon: &Pokemon) -> Option<TraceEvent> {
    pokemon.item.as_ref().map(|name| TraceEvent::Item { role, name: name.clone() })
}

/// Push `modifier`, noting each present event.
fn push_with(chain: &mut Chain, modifier: impl Into<u16>, events: impl IntoIterator<Item = Option<TraceEvent>>) {
    chain.push_mod(modifier);
    for event in events.into_iter().flatten() {
        chain.note(event);
    }
}

fn attacker_ability(ctx: &HitContext<'_>) -> Option<TraceEvent> {
    ability_of(Role::Attacker, ctx.attacker)
}

fn defender_ability(ctx: &HitContext<'_>) -> Option<TraceEvent> {
    ability_of(Role::Defender, ctx.defender)
}

fn attacker_item(ctx: &HitContext<'_>) -> Option<TraceEvent> {
    item_of(Role::Attacker, ctx.attacker)
}

fn defender_item(ctx: &HitContext<'_>) -> Option<TraceEvent> {
    item_of(Role::Defender, ctx.defender)
}

fn field_event(ctx: &HitContext<'_>) -> Option<TraceEvent> {
    ctx.field.chromatic_field.map(TraceEvent::ChromaticField)
}

fn weather_event(ctx: &HitContext<'_>) -> Option<TraceEvent> {
    ctx.field.weather.map(TraceEvent::Weather)
}

/// Fire `modifier` with a field event when the chromatic field matches.
fn field_boost(ctx: &HitContext<'_>, chain: &mut Chain, field: ChromaticField, applies: bool, modifier: u16) -> bool {
    if ctx.is_field(field) && applies {
        push_with(chain, modifier, [field_event(ctx)]);
        return true;
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    fn always(_: &HitContext<'_>, chain: &mut Chain) -> bool {
        chain.push_mod(6144u16);
        true
    }

    fn never(_: &HitContext<'_>, _: &mut Chain) -> bool {
        false
    }

    #[test]
    fn test_first_of_stops_at_first_rule() {
        use crate::damage::generations::Generation;
        use crate::entities::PokemonSet;
        use crate::field::Field;
        use crate::moves::{Move, MoveSet};
        use crate::types::Type;

        let mon = Pokemon::from_set(PokemonSet { name: "Mew".into(), types: vec![Type::Psychic], ..Default::default() })
            .unwrap();
        let mv = Move::from_set(MoveSet { name: "Psychic".into(), bp: 90, ..Default::default() }).unwrap();
        let field = Field::default();
        let ctx = HitContext::new(Generation::default(), &mon, &mon, &mv, &field);

        const GROUP: &[ChainRule] = &[never, always, always];
        let steps = [Step::FirstOf(GROUP), Step::Each(always), Step::Each(never)];
        assert_eq!(run(&steps, &ctx).mods(), &[6144, 6144]);
    }
}
