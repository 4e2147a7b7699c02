//! Battlefield state: weather, terrain, rooms, chromatic fields and sides.
//!
//! `Field` and `Side` deserialize directly from the calculator's JSON
//! vocabulary; every field is optional and defaults to "absent".

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameType {
    #[default]
    Singles,
    Doubles,
}

/// Weather conditions
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Weather {
    Sun,
    Rain,
    Sand,
    Hail,
    Snow,          // Gen 9 replaced Hail with Snow
    #[serde(rename = "Harsh Sunshine")]
    HarshSun,      // Primal Groudon
    #[serde(rename = "Heavy Rain")]
    HeavyRain,     // Primal Kyogre
    #[serde(rename = "Strong Winds")]
    StrongWinds,   // Mega Rayquaza
}

impl Weather {
    pub const fn name(self) -> &'static str {
        match self {
            Weather::Sun => "Sun",
            Weather::Rain => "Rain",
            Weather::Sand => "Sand",
            Weather::Hail => "Hail",
            Weather::Snow => "Snow",
            Weather::HarshSun => "Harsh Sunshine",
            Weather::HeavyRain => "Heavy Rain",
            Weather::StrongWinds => "Strong Winds",
        }
    }
}

/// Terrain types
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Terrain {
    Electric,
    Grassy,
    Psychic,
    Misty,
}

/// Custom battlefields that layer extra rules over the standard mechanics.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChromaticField {
    Jungle,
    Eclipse,
    #[serde(rename = "Dragons-Den")]
    DragonsDen,
    #[serde(rename = "Thundering-Plateau")]
    ThunderingPlateau,
    #[serde(rename = "Starlight-Arena")]
    StarlightArena,
    #[serde(rename = "Ring-Arena")]
    RingArena,
    #[serde(rename = "Volcanic-Top")]
    VolcanicTop,
    Sky,
    #[serde(rename = "Haunted-Graveyard")]
    HauntedGraveyard,
    #[serde(rename = "Flower-Garden")]
    FlowerGarden,
    Desert,
    #[serde(rename = "Snowy-Peaks")]
    SnowyPeaks,
    #[serde(rename = "Blessed-Sanctum")]
    BlessedSanctum,
    #[serde(rename = "Acidic-Wasteland")]
    AcidicWasteland,
    #[serde(rename = "Ancient-Ruins")]
    AncientRuins,
    Cave,
    Factory,
    #[serde(rename = "Waters-Surface")]
    WatersSurface,
    Underwater,
    Rainbow,
    Undercolony,
    Inverse,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Switching {
    Out,
    In,
}

/// Conditions on one side of the field.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Side {
    pub spikes: u8,
    pub steelsurge: bool,
    pub vinelash: bool,
    pub wildfire: bool,
    pub cannonade: bool,
    pub volcalith: bool,
    #[serde(rename = "isSR")]
    pub is_sr: bool,
    pub is_reflect: bool,
    pub is_light_screen: bool,
    pub is_sticky_web: bool,
    pub is_protected: bool,
    pub is_seeded: bool,
    pub is_ingrain: bool,
    pub is_aqua_ring: bool,
    pub is_nightmare: bool,
    pub is_salt_cured: bool,
    pub is_foresight: bool,
    pub is_soak: bool,
    pub is_tailwind: bool,
    pub is_magnet_rise: bool,
    pub is_helping_hand: bool,
    pub is_flower_gift: bool,
    pub is_friend_guard: bool,
    pub is_aurora_veil: bool,
    pub is_arenite_wall: bool,
    pub is_battery: bool,
    pub is_power_spot: bool,
    pub is_steely_spirit: bool,
    pub is_switching: Option<Switching>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Field {
    pub game_type: GameType,
    pub weather: Option<Weather>,
    pub terrain: Option<Terrain>,
    pub chromatic_field: Option<ChromaticField>,
    pub is_magic_room: bool,
    pub is_wonder_room: bool,
    pub is_gravity: bool,
    pub is_aura_break: bool,
    pub is_fairy_aura: bool,
    pub is_dark_aura: bool,
    pub is_beads_of_ruin: bool,
    pub is_sword_of_ruin: bool,
    pub is_tablets_of_ruin: bool,
    pub is_vessel_of_ruin: bool,
    pub attacker_side: Side,
    pub defender_side: Side,
}

impl Field {
    pub fn has_weather(&self, weathers: &[Weather]) -> bool {
        self.weather.is_some_and(|w| weathers.contains(&w))
    }

    pub fn has_terrain(&self, terrain: Terrain) -> bool {
        self.terrain == Some(terrain)
    }

    pub fn is_field(&self, field: ChromaticField) -> bool {
        self.chromatic_field == Some(field)
    }

    /// Exchange attacker and defender sides, for calculating the reverse matchup.
    pub fn swap(&mut self) -> &mut Self {
        std::mem::swap(&mut self.attacker_side, &mut self.defender_side);
        self
    }

    pub fn is_doubles(&self) -> bool {
        self.game_type != GameType::Singles
    }
}
