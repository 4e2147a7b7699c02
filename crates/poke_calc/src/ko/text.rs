//! Wording of a KO estimate.

use crate::display::serialize_text;

use super::KoChance;

/// Rounded percentage, never shown as a misleading 0% or 100%.
pub fn round_chance(chance: f64) -> f64 {
    (chance * 1000.0).round().clamp(1.0, 999.0) / 10.0
}

/// The residual-effect phrases one estimate is worded with.
#[derive(Clone, Debug, Default)]
pub(crate) struct KoWording {
    /// `"approx. "` when the distribution is an approximation
    pub qualifier: &'static str,
    /// `" after <hazards>"`
    pub hazards: String,
    /// `" after <hazards and end-of-turn effects>"`
    pub after: String,
    /// `" after <end-of-turn effects>"`
    pub after_no_hazards: String,
}

fn after(texts: &[String]) -> String {
    if texts.is_empty() {
        String::new()
    } else {
        format!(" after {}", serialize_text(texts))
    }
}

impl KoWording {
    pub fn new(hazards: &[String], eot: &[String], approximate: bool) -> Self {
        let all: Vec<String> = hazards.iter().chain(eot).cloned().collect();
        Self {
            qualifier: if approximate { "approx. " } else { "" },
            hazards: after(hazards),
            after: after(&all),
            after_no_hazards: after(eot),
        }
    }

    /// Word a KO in `n` hits (or turns).
    ///
    /// `without_eot` is the chance before any end-of-turn effect resolves;
    /// later hits only know the chance with them and pass `Some(0.0)`.
    /// `None` for either means the KO is possible but has no concrete chance.
    pub fn chance(&self, without_eot: Option<f64>, with_eot: Option<f64>, n: u8, multiple_turns: bool) -> KoChance {
        let ko = match (n, multiple_turns) {
            (1, _) => "OHKO".to_string(),
            (n, true) => format!("KO in {n} turns"),
            (n, false) => format!("{n}HKO"),
        };
        let q = self.qualifier;
        let guaranteed = if q.is_empty() { "guaranteed " } else { "" };

        let (chance, body) = match (without_eot, with_eot) {
            (Some(without), Some(with)) if without + with == 0.0 => (Some(0.0), "not a KO".to_string()),
            (Some(without), Some(_)) if without == 1.0 => (Some(without), format!("{guaranteed}OHKO{}", self.hazards)),
            (Some(without), Some(with)) if without > 0.0 => {
                let first = format!("{}% chance to {ko}{}", round_chance(without), self.hazards);
                let body = if with == 1.0 {
                    format!("{first} (guaranteed {ko}{})", self.after_no_hazards)
                } else if with > without {
                    format!("{first} ({q}{}% chance to {ko}{})", round_chance(with), self.after_no_hazards)
                } else {
                    first
                };
                (Some(with), body)
            }
            (Some(_), Some(with)) if with == 1.0 => (Some(with), format!("{guaranteed}{ko}{}", self.after)),
            (Some(_), Some(with)) if with > 0.0 => {
                (Some(with), format!("{}% chance to {ko}{}", round_chance(with), self.after))
            }
            (Some(_), Some(with)) => (Some(with), String::new()),
            _ => (None, format!("possible {ko}")),
        };
        KoChance { chance, n, text: format!("{q}{body}") }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case(0.375, 37.5)]
    #[case(1.0, 99.9)]
    #[case(0.0001, 0.1)]
    #[case(0.5, 50.0)]
    fn test_round_chance(#[case] chance: f64, #[case] expected: f64) {
        assert_eq!(round_chance(chance), expected);
    }

    fn plain() -> KoWording {
        KoWording::new(&[], &[], false)
    }

    #[test]
    fn test_guaranteed_and_not_a_ko() {
        assert_eq!(plain().chance(Some(1.0), Some(1.0), 1, false).text, "guaranteed OHKO");
        let none = plain().chance(Some(0.0), Some(0.0), 1, false);
        assert_eq!((none.chance, none.text.as_str()), (Some(0.0), "not a KO"));
    }

    #[test]
    fn test_chance_with_residuals() {
        let wording = KoWording::new(&["Stealth Rock".into()], &["Leftovers recovery".into()], false);
        assert_eq!(wording.chance(Some(0.5), Some(0.5), 1, false).text, "50% chance to OHKO after Stealth Rock");
        assert_eq!(wording.chance(Some(0.0), Some(1.0), 2, false).text, "guaranteed 2HKO after Stealth Rock and Leftovers recovery");

        let wording = KoWording::new(&[], &["burn damage".into()], false);
        assert_eq!(
            wording.chance(Some(0.25), Some(1.0), 1, false).text,
            "25% chance to OHKO (guaranteed OHKO after burn damage)"
        );
        assert_eq!(
            wording.chance(Some(0.25), Some(0.375), 1, false).text,
            "25% chance to OHKO (37.5% chance to OHKO after burn damage)"
        );
    }

    #[test]
    fn test_approximate_and_possible() {
        let wording = KoWording::new(&[], &[], true);
        assert_eq!(wording.chance(Some(0.0), Some(1.0), 3, false).text, "approx. 3HKO");
        let possible = plain().chance(None, None, 6, false);
        assert_eq!((possible.chance, possible.text.as_str()), (None, "possible 6HKO"));
        assert_eq!(plain().chance(Some(0.0), Some(1.0), 2, true).text, "guaranteed KO in 2 turns");
    }
}
