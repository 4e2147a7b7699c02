//! Read-only held item metadata.
//!
//! Everything here is keyed by the item's display name and resolved through
//! compile-time `phf` maps.

use phf::phf_map;

use crate::types::Type;

/// Items that raise the power of moves of one type by 20%.
static ITEM_BOOST_TYPES: phf::Map<&'static str, Type> = phf_map! {
    "Silk Scarf" => Type::Normal,
    "Charcoal" => Type::Fire,
    "Mystic Water" => Type::Water,
    "Magnet" => Type::Electric,
    "Miracle Seed" => Type::Grass,
    "Never-Melt Ice" => Type::Ice,
    "Black Belt" => Type::Fighting,
    "Poison Barb" => Type::Poison,
    "Soft Sand" => Type::Ground,
    "Sharp Beak" => Type::Flying,
    "Twisted Spoon" => Type::Psychic,
    "Silver Powder" => Type::Bug,
    "Hard Stone" => Type::Rock,
    "Spell Tag" => Type::Ghost,
    "Dragon Fang" => Type::Dragon,
    "Black Glasses" => Type::Dark,
    "Metal Coat" => Type::Steel,
    "Fairy Feather" => Type::Fairy,
    "Flame Plate" => Type::Fire,
    "Splash Plate" => Type::Water,
    "Zap Plate" => Type::Electric,
    "Meadow Plate" => Type::Grass,
    "Icicle Plate" => Type::Ice,
    "Fist Plate" => Type::Fighting,
    "Toxic Plate" => Type::Poison,
    "Earth Plate" => Type::Ground,
    "Sky Plate" => Type::Flying,
    "Mind Plate" => Type::Psychic,
    "Insect Plate" => Type::Bug,
    "Stone Plate" => Type::Rock,
    "Spooky Plate" => Type::Ghost,
    "Draco Plate" => Type::Dragon,
    "Dread Plate" => Type::Dark,
    "Iron Plate" => Type::Steel,
    "Pixie Plate" => Type::Fairy,
    "Sea Incense" => Type::Water,
    "Wave Incense" => Type::Water,
    "Odd Incense" => Type::Psychic,
    "Rock Incense" => Type::Rock,
    "Rose Incense" => Type::Grass,
};

static DRIVE_TYPES: phf::Map<&'static str, Type> = phf_map! {
    "Burn Drive" => Type::Fire,
    "Chill Drive" => Type::Ice,
    "Douse Drive" => Type::Water,
    "Shock Drive" => Type::Electric,
};

static RESIST_BERRIES: phf::Map<&'static str, Type> = phf_map! {
    "Chilan Berry" => Type::Normal,
    "Occa Berry" => Type::Fire,
    "Passho Berry" => Type::Water,
    "Wacan Berry" => Type::Electric,
    "Rindo Berry" => Type::Grass,
    "Yache Berry" => Type::Ice,
    "Chople Berry" => Type::Fighting,
    "Kebia Berry" => Type::Poison,
    "Shuca Berry" => Type::Ground,
    "Coba Berry" => Type::Flying,
    "Payapa Berry" => Type::Psychic,
    "Tanga Berry" => Type::Bug,
    "Charti Berry" => Type::Rock,
    "Kasib Berry" => Type::Ghost,
    "Haban Berry" => Type::Dragon,
    "Colbur Berry" => Type::Dark,
    "Babiri Berry" => Type::Steel,
    "Roseli Berry" => Type::Fairy,
};

/// Natural Gift type and power per berry (Gen 6+ powers).
static NATURAL_GIFT: phf::Map<&'static str, (Type, u32)> = phf_map! {
    "Cheri Berry" => (Type::Fire, 80),
    "Chesto Berry" => (Type::Water, 80),
    "Pecha Berry" => (Type::Electric, 80),
    "Rawst Berry" => (Type::Grass, 80),
    "Aspear Berry" => (Type::Ice, 80),
    "Leppa Berry" => (Type::Fighting, 80),
    "Oran Berry" => (Type::Poison, 80),
    "Persim Berry" => (Type::Ground, 80),
    "Lum Berry" => (Type::Flying, 80),
    "Sitrus Berry" => (Type::Psychic, 80),
    "Figy Berry" => (Type::Bug, 80),
    "Wiki Berry" => (Type::Rock, 80),
    "Mago Berry" => (Type::Ghost, 80),
    "Aguav Berry" => (Type::Dragon, 80),
    "Iapapa Berry" => (Type::Dark, 80),
    "Razz Berry" => (Type::Steel, 80),
    "Bluk Berry" => (Type::Fire, 90),
    "Nanab Berry" => (Type::Water, 90),
    "Wepear Berry" => (Type::Electric, 90),
    "Pinap Berry" => (Type::Grass, 90),
    "Pomeg Berry" => (Type::Ice, 90),
    "Kelpsy Berry" => (Type::Fighting, 90),
    "Qualot Berry" => (Type::Poison, 90),
    "Hondew Berry" => (Type::Ground, 90),
    "Grepa Berry" => (Type::Flying, 90),
    "Tamato Berry" => (Type::Psychic, 90),
    "Cornn Berry" => (Type::Bug, 90),
    "Magost Berry" => (Type::Rock, 90),
    "Rabuta Berry" => (Type::Ghost, 90),
    "Nomel Berry" => (Type::Dragon, 90),
    "Spelon Berry" => (Type::Dark, 90),
    "Pamtre Berry" => (Type::Steel, 90),
    "Watmel Berry" => (Type::Fire, 100),
    "Durin Berry" => (Type::Water, 100),
    "Belue Berry" => (Type::Electric, 100),
    "Occa Berry" => (Type::Fire, 80),
    "Passho Berry" => (Type::Water, 80),
    "Wacan Berry" => (Type::Electric, 80),
    "Rindo Berry" => (Type::Grass, 80),
    "Yache Berry" => (Type::Ice, 80),
    "Chople Berry" => (Type::Fighting, 80),
    "Kebia Berry" => (Type::Poison, 80),
    "Shuca Berry" => (Type::Ground, 80),
    "Coba Berry" => (Type::Flying, 80),
    "Payapa Berry" => (Type::Psychic, 80),
    "Tanga Berry" => (Type::Bug, 80),
    "Charti Berry" => (Type::Rock, 80),
    "Kasib Berry" => (Type::Ghost, 80),
    "Haban Berry" => (Type::Dragon, 80),
    "Colbur Berry" => (Type::Dark, 80),
    "Babiri Berry" => (Type::Steel, 80),
    "Chilan Berry" => (Type::Normal, 80),
    "Roseli Berry" => (Type::Fairy, 80),
    "Liechi Berry" => (Type::Grass, 100),
    "Ganlon Berry" => (Type::Ice, 100),
    "Salac Berry" => (Type::Fighting, 100),
    "Petaya Berry" => (Type::Poison, 100),
    "Apicot Berry" => (Type::Ground, 100),
    "Lansat Berry" => (Type::Flying, 100),
    "Starf Berry" => (Type::Psychic, 100),
    "Enigma Berry" => (Type::Bug, 100),
    "Micle Berry" => (Type::Rock, 100),
    "Custap Berry" => (Type::Ghost, 100),
    "Jaboca Berry" => (Type::Dragon, 100),
    "Rowap Berry" => (Type::Dark, 100),
    "Kee Berry" => (Type::Fairy, 100),
    "Maranga Berry" => (Type::Dark, 100),
};

/// Fling power for items that do not use the default of 10.
static FLING_POWER: phf::Map<&'static str, u32> = phf_map! {
    "Iron Ball" => 130,
    "Big Nugget" => 130,
    "Hard Stone" => 100,
    "Rare Bone" => 100,
    "Room Service" => 100,
    "Deep Sea Tooth" => 90,
    "Thick Club" => 90,
    "Assault Vest" => 80,
    "Blunder Policy" => 80,
    "Heavy-Duty Boots" => 80,
    "Quick Claw" => 80,
    "Razor Claw" => 80,
    "Safety Goggles" => 80,
    "Sticky Barb" => 80,
    "Weakness Policy" => 80,
    "Dragon Fang" => 70,
    "Poison Barb" => 70,
    "Power Anklet" => 70,
    "Power Band" => 70,
    "Power Belt" => 70,
    "Power Bracer" => 70,
    "Power Lens" => 70,
    "Power Weight" => 70,
    "Adamant Orb" => 60,
    "Damp Rock" => 60,
    "Griseous Orb" => 60,
    "Heat Rock" => 60,
    "Leek" => 60,
    "Lustrous Orb" => 60,
    "Macho Brace" => 60,
    "Rocky Helmet" => 60,
    "Utility Umbrella" => 60,
    "Terrain Extender" => 60,
    "Eject Pack" => 50,
    "Sharp Beak" => 50,
    "Dubious Disc" => 50,
    "Eviolite" => 40,
    "Icy Rock" => 40,
    "Lucky Punch" => 40,
    "Black Belt" => 30,
    "Black Glasses" => 30,
    "Black Sludge" => 30,
    "Charcoal" => 30,
    "Flame Orb" => 30,
    "Light Ball" => 30,
    "Life Orb" => 30,
    "Magnet" => 30,
    "Metal Coat" => 30,
    "Miracle Seed" => 30,
    "Mystic Water" => 30,
    "Never-Melt Ice" => 30,
    "Protective Pads" => 30,
    "Spell Tag" => 30,
    "Toxic Orb" => 30,
    "Twisted Spoon" => 30,
};

/// Mega Stones and the species line that can use them.
static MEGA_STONES: phf::Map<&'static str, &'static str> = phf_map! {
    "Abomasite" => "Abomasnow",
    "Absolite" => "Absol",
    "Aerodactylite" => "Aerodactyl",
    "Aggronite" => "Aggron",
    "Alakazite" => "Alakazam",
    "Altarianite" => "Altaria",
    "Ampharosite" => "Ampharos",
    "Audinite" => "Audino",
    "Banettite" => "Banette",
    "Beedrillite" => "Beedrill",
    "Blastoisinite" => "Blastoise",
    "Blazikenite" => "Blaziken",
    "Cameruptite" => "Camerupt",
    "Charizardite X" => "Charizard",
    "Charizardite Y" => "Charizard",
    "Diancite" => "Diancie",
    "Galladite" => "Gallade",
    "Garchompite" => "Garchomp",
    "Gardevoirite" => "Gardevoir",
    "Gengarite" => "Gengar",
    "Glalitite" => "Glalie",
    "Gyaradosite" => "Gyarados",
    "Heracronite" => "Heracross",
    "Houndoominite" => "Houndoom",
    "Kangaskhanite" => "Kangaskhan",
    "Latiasite" => "Latias",
    "Latiosite" => "Latios",
    "Lopunnite" => "Lopunny",
    "Lucarionite" => "Lucario",
    "Manectite" => "Manectric",
    "Mawilite" => "Mawile",
    "Medichamite" => "Medicham",
    "Metagrossite" => "Metagross",
    "Mewtwonite X" => "Mewtwo",
    "Mewtwonite Y" => "Mewtwo",
    "Pidgeotite" => "Pidgeot",
    "Pinsirite" => "Pinsir",
    "Sablenite" => "Sableye",
    "Salamencite" => "Salamence",
    "Sceptilite" => "Sceptile",
    "Scizorite" => "Scizor",
    "Sharpedonite" => "Sharpedo",
    "Slowbronite" => "Slowbro",
    "Steelixite" => "Steelix",
    "Swampertite" => "Swampert",
    "Tyranitarite" => "Tyranitar",
    "Venusaurite" => "Venusaur",
};

pub fn item_boost_type(item: &str) -> Option<Type> {
    ITEM_BOOST_TYPES.get(item).copied()
}

/// Type granted to Judgment (and Multitype) by a Plate.
pub fn plate_type(item: &str) -> Option<Type> {
    if item.ends_with(" Plate") {
        item_boost_type(item)
    } else {
        None
    }
}

pub fn drive_type(item: &str) -> Option<Type> {
    DRIVE_TYPES.get(item).copied()
}

/// Type granted to Multi-Attack by a Memory.
pub fn memory_type(item: &str) -> Option<Type> {
    item.strip_suffix(" Memory").and_then(|name| name.parse().ok())
}

pub fn berry_resist_type(item: &str) -> Option<Type> {
    RESIST_BERRIES.get(item).copied()
}

pub fn natural_gift(item: &str) -> Option<(Type, u32)> {
    NATURAL_GIFT.get(item).copied()
}

pub fn is_berry(item: &str) -> bool {
    item.ends_with(" Berry")
}

pub fn fling_power(item: &str) -> u32 {
    if item.is_empty() || item.contains(" Z") {
        return 0;
    }
    if let Some(&power) = FLING_POWER.get(item) {
        return power;
    }
    if item.ends_with(" Plate") {
        return 90;
    }
    10
}

pub fn is_mega_stone_for(item: &str, species: &str) -> bool {
    MEGA_STONES.get(item).is_some_and(|base| species.starts_with(base))
}
