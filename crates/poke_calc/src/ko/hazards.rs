//! Entry hazard damage taken on switching in.

use crate::damage::{has_magic_guard, Generation};
use crate::entities::Pokemon;
use crate::field::{ChromaticField, Field, Side};
use crate::types::{type_chart, Type};

/// HP lost once before the first hit, with a description per source.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Hazards {
    pub damage: i64,
    pub texts: Vec<String>,
}

impl Hazards {
    fn add(&mut self, damage: i64, text: &str) {
        self.damage += damage;
        self.texts.push(text.to_string());
    }
}

/// Chart effectiveness of `attacking` against the natural typing.
fn natural_effectiveness(attacking: Type, pokemon: &Pokemon) -> f64 {
    pokemon.types.iter().map(|&t| type_chart(attacking, t).multiplier()).product()
}

fn immune_to_ground_hazards(pokemon: &Pokemon) -> bool {
    pokemon.has_type(Type::Flying)
        || pokemon.has_ability(&["Levitate"])
        || pokemon.has_item(&["Air Balloon"])
        || pokemon.named(&["Probopass-Crest"])
}

fn portion(max_hp: u32, effectiveness: f64, divisor: f64) -> i64 {
    (effectiveness * max_hp as f64 / divisor).floor() as i64
}

/// Hazard damage `defender` takes on entering `side`.
pub fn get_hazards(_gen: Generation, defender: &Pokemon, side: &Side, field: &Field) -> Hazards {
    let mut hazards = Hazards::default();
    let max_hp = defender.max_hp();

    // Acidic Wasteland regurgitates hazards as an attack
    if field.is_field(ChromaticField::AcidicWasteland) {
        if side.is_sr {
            let mut effectiveness = natural_effectiveness(Type::Rock, defender);
            if defender.named(&["Torterra-Crest"]) {
                effectiveness = 1.0 / effectiveness;
            }
            hazards.add(portion(max_hp, effectiveness, 4.0), "regurgitated Stealth Rock");
        }
        if side.spikes != 0 && !immune_to_ground_hazards(defender) {
            hazards.add((max_hp / 3) as i64, "regurgitated Spikes");
        }
        return hazards;
    }

    if defender.has_item(&["Heavy-Duty Boots"]) || has_magic_guard(defender, field) {
        return hazards;
    }

    // Torterra's crest flips the chart, cancelling out an inverse field
    let inverse = defender.named(&["Torterra-Crest"]) != field.is_field(ChromaticField::Inverse);
    let absorbs_rocks = defender.has_type(Type::Rock) && field.is_field(ChromaticField::Undercolony);
    if side.is_sr && !defender.has_ability(&["Mountaineer"]) && !absorbs_rocks {
        let mut effectiveness = natural_effectiveness(Type::Rock, defender);
        if defender.named(&["Glaceon-Crest"]) {
            effectiveness = effectiveness.min(0.5);
        } else if defender.has_type(Type::Ice) && field.is_field(ChromaticField::SnowyPeaks) {
            effectiveness /= 2.0;
        }
        if defender.has_type(Type::Rock) && field.is_field(ChromaticField::Cave) && effectiveness > 0.5 {
            effectiveness = 0.5;
        }
        if inverse {
            effectiveness = 1.0 / effectiveness;
        }
        if field.is_field(ChromaticField::Cave) && !defender.has_type(Type::Rock) && effectiveness < 1.0 {
            effectiveness = 1.0;
        }
        if field.is_field(ChromaticField::Undercolony)
            && defender.has_ability(&["Shell Armor", "Battle Armor"])
            && effectiveness > 0.5
        {
            effectiveness = 0.5;
        }
        hazards.add(portion(max_hp, effectiveness, 8.0), "Stealth Rock");
    }

    if side.steelsurge && !defender.has_ability(&["Mountaineer"]) {
        let mut effectiveness = natural_effectiveness(Type::Steel, defender);
        if inverse {
            effectiveness = 1.0 / effectiveness;
        }
        hazards.add(portion(max_hp, effectiveness, 8.0), "Steelsurge");
    }

    if !immune_to_ground_hazards(defender) {
        match side.spikes {
            1 => hazards.add((max_hp / 8) as i64, "1 layer of Spikes"),
            2 => hazards.add((max_hp / 6) as i64, "2 layers of Spikes"),
            3 => hazards.add((max_hp / 4) as i64, "3 layers of Spikes"),
            _ => {}
        }
    }

    // Jungle webs cut Flying types
    if defender.has_type(Type::Flying) && field.is_field(ChromaticField::Jungle) {
        hazards.add((max_hp / 8) as i64, "Sticky Web");
    }

    hazards
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::PokemonSet;
    use crate::stats::StatsTable;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn mon(types: Vec<Type>, ability: &str, item: Option<&str>) -> Pokemon {
        Pokemon::from_set(PokemonSet {
            name: "Test".into(),
            types,
            base_stats: StatsTable { hp: 100, atk: 100, def: 100, spa: 100, spd: 100, spe: 100 },
            ability: Some(ability.into()),
            item: item.map(Into::into),
            ..Default::default()
        })
        .unwrap()
    }

    fn rocks_and_spikes(spikes: u8) -> Side {
        Side { is_sr: true, spikes, ..Default::default() }
    }

    #[rstest]
    #[case(vec![Type::Normal], 0, 4)]
    #[case(vec![Type::Fire, Type::Flying], 0, 1)]
    #[case(vec![Type::Steel, Type::Ground], 0, 32)]
    #[case(vec![Type::Normal], 3, 1)]
    fn test_stealth_rock_and_spikes(#[case] types: Vec<Type>, #[case] spikes: u8, #[case] expected_share: i64) {
        let pokemon = mon(types, "Pressure", None);
        let max = pokemon.max_hp() as i64;
        let hazards = get_hazards(Generation::default(), &pokemon, &rocks_and_spikes(spikes), &Field::default());
        let rocks = match expected_share {
            4 => max / 8,
            1 if spikes == 0 => max / 2,
            1 => max / 8 + max / 4,
            32 => max / 32,
            _ => unreachable!(),
        };
        assert_eq!(hazards.damage, rocks);
    }

    #[test]
    fn test_boots_and_magic_guard() {
        let side = rocks_and_spikes(3);
        let field = Field::default();
        let booted = mon(vec![Type::Normal], "Pressure", Some("Heavy-Duty Boots"));
        assert_eq!(get_hazards(Generation::default(), &booted, &side, &field), Hazards::default());
        let guarded = mon(vec![Type::Normal], "Magic Guard", None);
        assert_eq!(get_hazards(Generation::default(), &guarded, &side, &field).damage, 0);
    }

    #[test]
    fn test_texts() {
        let pokemon = mon(vec![Type::Normal], "Pressure", None);
        let hazards = get_hazards(Generation::default(), &pokemon, &rocks_and_spikes(2), &Field::default());
        assert_eq!(hazards.texts, vec!["Stealth Rock".to_string(), "2 layers of Spikes".to_string()]);
    }

    #[test]
    fn test_acidic_wasteland_regurgitates() {
        let pokemon = mon(vec![Type::Normal], "Pressure", Some("Heavy-Duty Boots"));
        let field = Field { chromatic_field: Some(ChromaticField::AcidicWasteland), ..Default::default() };
        let hazards = get_hazards(Generation::default(), &pokemon, &rocks_and_spikes(1), &field);
        let max = pokemon.max_hp() as i64;
        assert_eq!(hazards.damage, max / 4 + max / 3);
        assert_eq!(hazards.texts[0], "regurgitated Stealth Rock");
    }

    fn crested(name: &str, types: Vec<Type>) -> Pokemon {
        let mut pokemon = mon(types, "Pressure", None);
        pokemon.name = name.into();
        pokemon
    }

    #[test]
    fn test_probopass_crest_floats_over_spikes() {
        let probopass = crested("Probopass-Crest", vec![Type::Rock, Type::Steel]);
        let side = Side { spikes: 3, ..Default::default() };
        assert_eq!(get_hazards(Generation::default(), &probopass, &side, &Field::default()), Hazards::default());
    }

    #[rstest]
    #[case(None, 170)]
    #[case(Some(ChromaticField::Inverse), 10)]
    fn test_torterra_crest_inverts_stealth_rock(#[case] chromatic_field: Option<ChromaticField>, #[case] expected: i64) {
        // Grass/Ground resists Rock twice over; the crest turns that into a weakness
        let torterra = crested("Torterra-Crest", vec![Type::Grass, Type::Ground]);
        let field = Field { chromatic_field, ..Default::default() };
        let side = Side { is_sr: true, ..Default::default() };
        assert_eq!(get_hazards(Generation::default(), &torterra, &side, &field).damage, expected);
    }

    #[test]
    fn test_glaceon_crest_resists_stealth_rock() {
        let glaceon = crested("Glaceon-Crest", vec![Type::Ice]);
        let side = Side { is_sr: true, ..Default::default() };
        // 341 * 0.5 / 8
        assert_eq!(get_hazards(Generation::default(), &glaceon, &side, &Field::default()).damage, 21);
    }
}
