//! Value grammars of the valued atoms.
//!
//! Every grammar is anchored on the whole string and goes through
//! [`total_match`], so an ill-formed value always yields the same
//! [`OahError::InvalidValue`] shape quoting the raw string and the option.

use std::sync::OnceLock;

use num_rational::Rational64;
use regex::{Captures, Regex};

use crate::error::{OahError, Result};
use crate::values::{Length, LengthUnit, MidiTempo, RgbColor};

fn regex(pattern: &str) -> Regex {
    Regex::new(pattern).expect("valid regex literal")
}

fn regex_natural() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| regex(r"^([0-9]+)$"))
}

fn regex_two_integers() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| regex(r"^([0-9]+)\s+([0-9]+)$"))
}

fn regex_float() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| regex(r"^([0-9]+(?:\.[0-9]+)?)$"))
}

fn regex_rational() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| regex(r"^\s*([0-9]+)\s*/\s*([0-9]+)\s*$"))
}

fn regex_word_and_integer() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| regex(r"^\s*([[:word:]-]+)\s+([0-9]+)\s*$"))
}

fn regex_string_and_integer() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    // greedy: the string runs up to the last whitespace-digits boundary
    RE.get_or_init(|| regex(r"^(.+)\s+([0-9]+)$"))
}

fn regex_string_and_two_integers() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| regex(r"^([[:word:]-]+)\s+([0-9]+)\s+([0-9]+)$"))
}

fn regex_midi_tempo() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| regex(r"^\s*([0-9]+\.*)\s*=\s*([0-9]+)\s*$"))
}

fn regex_length() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| regex(r"^([0-9]+(?:\.[0-9]+)?)\s*([a-zA-Z]+)$"))
}

fn regex_rgb_triple() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        regex(r"^\s*([0-9]*\.?[0-9]+)\s*,\s*([0-9]*\.?[0-9]+)\s*,\s*([0-9]*\.?[0-9]+)\s*$")
    })
}

/// Match `raw` against `re` as a whole, or fail naming `option`.
pub(crate) fn total_match<'t>(
    re: &Regex,
    raw: &'t str,
    option: &str,
    expected: &str,
) -> Result<Captures<'t>> {
    re.captures(raw)
        .filter(|caps| {
            caps.get(0)
                .is_some_and(|whole| whole.start() == 0 && whole.end() == raw.len())
        })
        .ok_or_else(|| invalid(raw, option, expected))
}

pub(crate) fn invalid(raw: &str, option: &str, expected: &str) -> OahError {
    OahError::InvalidValue {
        option: option.to_string(),
        value: raw.to_string(),
        expected: expected.to_string(),
    }
}

fn number<T: std::str::FromStr>(digits: &str, raw: &str, option: &str, expected: &str) -> Result<T> {
    digits.parse::<T>().map_err(|_| invalid(raw, option, expected))
}

fn capture<'t>(caps: &Captures<'t>, index: usize) -> &'t str {
    caps.get(index).map_or("", |m| m.as_str())
}

pub fn parse_integer(raw: &str, option: &str) -> Result<i64> {
    const EXPECTED: &str = "an integer such as 12";
    let caps = total_match(regex_natural(), raw, option, EXPECTED)?;
    number(capture(&caps, 1), raw, option, EXPECTED)
}

pub fn parse_natural(raw: &str, option: &str) -> Result<u64> {
    const EXPECTED: &str = "a natural number such as 7";
    let caps = total_match(regex_natural(), raw, option, EXPECTED)?;
    number(capture(&caps, 1), raw, option, EXPECTED)
}

pub fn parse_two_integers(raw: &str, option: &str) -> Result<(i64, i64)> {
    const EXPECTED: &str = "two integers separated by spaces, such as '3 4'";
    let caps = total_match(regex_two_integers(), raw, option, EXPECTED)?;
    Ok((
        number(capture(&caps, 1), raw, option, EXPECTED)?,
        number(capture(&caps, 2), raw, option, EXPECTED)?,
    ))
}

pub fn parse_float(raw: &str, option: &str) -> Result<f64> {
    const EXPECTED: &str = "a number such as 20 or 17.5";
    let caps = total_match(regex_float(), raw, option, EXPECTED)?;
    number(capture(&caps, 1), raw, option, EXPECTED)
}

/// `n/d`, reduced. A zero denominator is rejected.
pub fn parse_rational(raw: &str, option: &str) -> Result<Rational64> {
    const EXPECTED: &str = "a rational such as '3/4'";
    let caps = total_match(regex_rational(), raw, option, EXPECTED)?;
    let numerator: i64 = number(capture(&caps, 1), raw, option, EXPECTED)?;
    let denominator: i64 = number(capture(&caps, 2), raw, option, EXPECTED)?;
    if denominator == 0 {
        return Err(invalid(raw, option, "a rational with a non-zero denominator"));
    }
    Ok(Rational64::new(numerator, denominator))
}

/// Comma-separated `word digits` pairs, e.g. `'P1 2, P3 1'`.
pub fn parse_string_to_int_pairs(raw: &str, option: &str) -> Result<Vec<(String, i64)>> {
    const EXPECTED: &str = "'word number' pairs separated by commas, such as 'P1 2, P2 1'";
    raw.split(',')
        .map(|pair| -> Result<(String, i64)> {
            let caps = total_match(regex_word_and_integer(), pair, option, EXPECTED)
                .map_err(|_| invalid(raw, option, EXPECTED))?;
            Ok((
                capture(&caps, 1).to_string(),
                number(capture(&caps, 2), raw, option, EXPECTED)?,
            ))
        })
        .collect()
}

pub fn parse_string_and_integer(raw: &str, option: &str) -> Result<(String, i64)> {
    const EXPECTED: &str = "a string followed by spaces and an integer, such as 'fl 2'";
    let caps = total_match(regex_string_and_integer(), raw, option, EXPECTED)?;
    Ok((
        capture(&caps, 1).trim_end().to_string(),
        number(capture(&caps, 2), raw, option, EXPECTED)?,
    ))
}

pub fn parse_string_and_two_integers(raw: &str, option: &str) -> Result<(String, i64, i64)> {
    const EXPECTED: &str = "a word followed by two integers, such as 'P1 2 5'";
    let caps = total_match(regex_string_and_two_integers(), raw, option, EXPECTED)?;
    Ok((
        capture(&caps, 1).to_string(),
        number(capture(&caps, 2), raw, option, EXPECTED)?,
        number(capture(&caps, 3), raw, option, EXPECTED)?,
    ))
}

pub fn parse_midi_tempo(raw: &str, option: &str) -> Result<MidiTempo> {
    const EXPECTED: &str = "a duration and a tempo such as '8.=90'";
    let caps = total_match(regex_midi_tempo(), raw, option, EXPECTED)?;
    Ok(MidiTempo::new(
        capture(&caps, 1),
        number(capture(&caps, 2), raw, option, EXPECTED)?,
    ))
}

pub fn parse_length_unit(raw: &str, option: &str) -> Result<LengthUnit> {
    LengthUnit::from_key(raw).ok_or_else(|| unknown_choice(raw, option, &LengthUnit::known_keys()))
}

pub fn parse_length(raw: &str, option: &str) -> Result<Length> {
    const EXPECTED: &str = "a number followed by a unit, such as '12.5mm'";
    let caps = total_match(regex_length(), raw, option, EXPECTED)?;
    let value: f64 = number(capture(&caps, 1), raw, option, EXPECTED)?;
    let unit = parse_length_unit(capture(&caps, 2), option)?;
    Ok(Length::new(value, unit))
}

/// A color name from the table, or an `r,g,b` triple of fractions.
pub fn parse_rgb_color(raw: &str, option: &str) -> Result<RgbColor> {
    if let Some(color) = RgbColor::from_name(raw) {
        return Ok(color);
    }
    let caps = total_match(regex_rgb_triple(), raw, option, "")
        .map_err(|_| unknown_choice(raw, option, &rgb_keys()))?;
    let component = |index: usize| -> Result<f64> {
        let value: f64 = number(capture(&caps, index), raw, option, "fractions in [0, 1]")?;
        if (0.0..=1.0).contains(&value) {
            Ok(value)
        } else {
            Err(invalid(raw, option, "color components between 0 and 1"))
        }
    };
    Ok(RgbColor::new(component(1)?, component(2)?, component(3)?))
}

fn rgb_keys() -> Vec<&'static str> {
    let mut keys = RgbColor::known_names();
    keys.push("r,g,b");
    keys
}

/// Exact key lookup in a static table.
pub fn parse_choice<'c>(raw: &str, option: &str, choices: &'c [&'c str]) -> Result<&'c str> {
    choices
        .iter()
        .copied()
        .find(|choice| *choice == raw)
        .ok_or_else(|| unknown_choice(raw, option, choices))
}

pub(crate) fn unknown_choice(raw: &str, option: &str, known: &[&str]) -> OahError {
    OahError::UnknownChoice {
        option: option.to_string(),
        value: raw.to_string(),
        count: known.len(),
        known: known.join(", "),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const OPT: &str = "-x";

    #[test]
    fn integers_are_total_matches() {
        assert_eq!(parse_integer("12", OPT).unwrap(), 12);
        assert!(matches!(
            parse_integer("12x", OPT),
            Err(OahError::InvalidValue { value, .. }) if value == "12x"
        ));
        assert!(parse_integer("-3", OPT).is_err());
        assert!(parse_integer("", OPT).is_err());
        assert!(parse_integer("99999999999999999999999", OPT).is_err());
    }

    #[test]
    fn two_integers_need_whitespace() {
        assert_eq!(parse_two_integers("3 4", OPT).unwrap(), (3, 4));
        assert_eq!(parse_two_integers("3    4", OPT).unwrap(), (3, 4));
        assert!(parse_two_integers("34", OPT).is_err());
        assert!(parse_two_integers("3 4 5", OPT).is_err());
    }

    #[test]
    fn floats() {
        assert_eq!(parse_float("20", OPT).unwrap(), 20.0);
        assert_eq!(parse_float("17.5", OPT).unwrap(), 17.5);
        assert!(parse_float("17.", OPT).is_err());
        assert!(parse_float(".5", OPT).is_err());
    }

    #[test]
    fn rationals_with_and_without_spaces() {
        assert_eq!(parse_rational("3/4", OPT).unwrap(), Rational64::new(3, 4));
        assert_eq!(parse_rational("3 / 4", OPT).unwrap(), Rational64::new(3, 4));
        let reduced = parse_rational("6/8", OPT).unwrap();
        assert_eq!((*reduced.numer(), *reduced.denom()), (3, 4));
    }

    #[test]
    fn rational_zero_denominator_is_rejected() {
        assert!(matches!(
            parse_rational("3/0", OPT),
            Err(OahError::InvalidValue { value, .. }) if value == "3/0"
        ));
    }

    #[test]
    fn string_and_integer_is_greedy() {
        assert_eq!(
            parse_string_and_integer("Violin 1 part 3", OPT).unwrap(),
            ("Violin 1 part".to_string(), 3)
        );
        assert!(parse_string_and_integer("Violin", OPT).is_err());
    }

    #[test]
    fn string_and_two_integers() {
        assert_eq!(
            parse_string_and_two_integers("P1 2 5", OPT).unwrap(),
            ("P1".to_string(), 2, 5)
        );
        assert!(parse_string_and_two_integers("P1 2", OPT).is_err());
    }

    #[test]
    fn string_to_int_pairs() {
        assert_eq!(
            parse_string_to_int_pairs("P1 2, P2 1", OPT).unwrap(),
            vec![("P1".to_string(), 2), ("P2".to_string(), 1)]
        );
        assert!(parse_string_to_int_pairs("P1 2, P2", OPT).is_err());
    }

    #[test]
    fn midi_tempos() {
        assert_eq!(parse_midi_tempo("4=120", OPT).unwrap(), MidiTempo::new("4", 120));
        assert_eq!(parse_midi_tempo("8. = 90", OPT).unwrap(), MidiTempo::new("8.", 90));
        assert!(parse_midi_tempo("4=", OPT).is_err());
        assert!(parse_midi_tempo("q=120", OPT).is_err());
    }

    #[test]
    fn lengths_check_units() {
        assert_eq!(
            parse_length("12.5mm", OPT).unwrap(),
            Length::new(12.5, LengthUnit::Millimeter)
        );
        assert_eq!(
            parse_length("8 in", OPT).unwrap(),
            Length::new(8.0, LengthUnit::Inch)
        );
        match parse_length("3furlong", OPT) {
            Err(OahError::UnknownChoice { known, count, .. }) => {
                assert_eq!(count, 4);
                assert_eq!(known, "in, cm, mm, pt");
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn colors_by_name_or_triple() {
        assert_eq!(parse_rgb_color("blue", OPT).unwrap(), RgbColor::new(0.0, 0.0, 1.0));
        assert_eq!(
            parse_rgb_color("0.5,0.25,1", OPT).unwrap(),
            RgbColor::new(0.5, 0.25, 1.0)
        );
        assert!(matches!(
            parse_rgb_color("mauve", OPT),
            Err(OahError::UnknownChoice { .. })
        ));
        assert!(matches!(
            parse_rgb_color("2,0,0", OPT),
            Err(OahError::InvalidValue { .. })
        ));
    }

    #[test]
    fn choices_are_exact() {
        let choices = ["relative", "absolute", "fixed"];
        assert_eq!(parse_choice("fixed", OPT, &choices).unwrap(), "fixed");
        assert!(parse_choice("Fixed", OPT, &choices).is_err());
        assert!(parse_choice("fix", OPT, &choices).is_err());
    }
}
