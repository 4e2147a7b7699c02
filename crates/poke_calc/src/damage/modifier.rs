//! Type-safe damage modifiers and the modifier chain builder.

use super::formula::chain_mods;
use super::trace::TraceEvent;

/// A fixed-point damage modifier (4096 scale).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct Modifier(pub u16);

impl Modifier {
    /// 1.0x modifier (4096).
    pub const ONE: Self = Self(4096);

    /// 0.5x modifier (2048).
    pub const HALF: Self = Self(2048);

    /// 0.75x modifier (3072). Filter, Solid Rock, Ruin abilities.
    pub const THREE_QUARTERS: Self = Self(3072);

    /// 2.0x modifier (8192).
    pub const DOUBLE: Self = Self(8192);

    /// 1.5x modifier (6144).
    pub const ONE_POINT_FIVE: Self = Self(6144);

    /// 1.2x modifier (4915).
    pub const ONE_POINT_TWO: Self = Self(4915);

    /// 1.3x modifier (5325).
    /// Note: This is the standard 1.3x used by Sheer Force, Tough Claws, etc.
    /// Life Orb uses a slightly different value (5324).
    pub const ONE_POINT_THREE: Self = Self(5325);

    /// Life Orb modifier (5324, approx 1.3x).
    pub const LIFE_ORB: Self = Self(5324);

    /// Screens in Doubles (Reflect/Light Screen/Aurora Veil).
    /// Value is 2732 (approx 2/3).
    pub const SCREENS_DOUBLES: Self = Self(2732);

    /// Create a new modifier from a raw u16 value.
    pub const fn new(val: u16) -> Self {
        Self(val)
    }

    /// Get the raw u16 value.
    pub const fn val(self) -> u16 {
        self.0
    }
}

impl From<Modifier> for u16 {
    fn from(m: Modifier) -> Self {
        m.0
    }
}

/// Macro to create a Modifier from a float literal at compile time.
///
/// Rounds to the nearest integer: `round(val * 4096)`.
///
/// # Example
/// ```rust
/// use poke_calc::modifier;
/// const MOD: poke_calc::damage::Modifier = modifier!(1.5); // Modifier(6144)
/// ```
#[macro_export]
macro_rules! modifier {
    ($val:expr) => {
        $crate::damage::Modifier::new(($val * 4096.0 + 0.5) as u16)
    };
}

/// Modifiers collected for one stage, with the trace events that justified them.
#[derive(Clone, Debug, Default)]
pub struct Chain {
    mods: Vec<u16>,
    events: Vec<TraceEvent>,
}

impl Chain {
    pub fn new() -> Self {
        Self::default()
    }

    /// Push a modifier together with the event that explains it.
    pub fn push(&mut self, modifier: impl Into<u16>, event: TraceEvent) {
        self.mods.push(modifier.into());
        self.events.push(event);
    }

    /// Push a modifier whose cause is already recorded elsewhere.
    pub fn push_mod(&mut self, modifier: impl Into<u16>) {
        self.mods.push(modifier.into());
    }

    /// Record an event that does not contribute a modifier.
    pub fn note(&mut self, event: TraceEvent) {
        self.events.push(event);
    }

    pub fn mods(&self) -> &[u16] {
        &self.mods
    }

    pub fn is_empty(&self) -> bool {
        self.mods.is_empty()
    }

    /// Compose the collected modifiers with [`chain_mods`].
    pub fn compose(&self, lower: u32, upper: u32) -> u32 {
        chain_mods(&self.mods, lower, upper)
    }

    pub fn into_events(self) -> Vec<TraceEvent> {
        self.events
    }
}
