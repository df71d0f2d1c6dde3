//! Valued atoms: typed storage plus the grammar that fills it.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use num_rational::Rational64;
use serde::Serialize;

use crate::element::ValueExpected;
use crate::error::{OahError, Result};
use crate::grammar;
use crate::values::{Length, LengthUnit, MidiTempo, RgbColor};

/// The typed cell of a valued atom.
///
/// Set-like and map-like values accumulate over repeated invocations;
/// every other kind is overwritten.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum AtomValue {
    Integer(i64),
    TwoIntegers(i64, i64),
    Float(f64),
    String(String),
    StringWithDefault { value: String, default: String },
    Rational(Rational64),
    NaturalNumbersSet(BTreeSet<u64>),
    StringSet(BTreeSet<String>),
    StringToIntMap(BTreeMap<String, i64>),
    StringAndInteger(String, i64),
    StringAndTwoIntegers(String, i64, i64),
    MidiTempo(MidiTempo),
    Length(Length),
    LengthUnit(LengthUnit),
    Color(RgbColor),
    Choice {
        selected: String,
        #[serde(skip)]
        choices: &'static [&'static str],
    },
}

impl AtomValue {
    pub fn value_expected(&self) -> ValueExpected {
        match self {
            AtomValue::StringWithDefault { .. } => ValueExpected::Optional,
            _ => ValueExpected::Yes,
        }
    }

    /// Parse `raw` with this kind's grammar and store it.
    pub fn assign(&mut self, raw: &str, option: &str) -> Result<()> {
        match self {
            AtomValue::Integer(value) => *value = grammar::parse_integer(raw, option)?,
            AtomValue::TwoIntegers(first, second) => {
                (*first, *second) = grammar::parse_two_integers(raw, option)?;
            }
            AtomValue::Float(value) => *value = grammar::parse_float(raw, option)?,
            AtomValue::String(value) => *value = raw.to_string(),
            AtomValue::StringWithDefault { value, .. } => *value = raw.to_string(),
            AtomValue::Rational(value) => *value = grammar::parse_rational(raw, option)?,
            AtomValue::NaturalNumbersSet(set) => {
                set.insert(grammar::parse_natural(raw, option)?);
            }
            AtomValue::StringSet(set) => {
                if !set.insert(raw.to_string()) {
                    return Err(OahError::DuplicateSetEntry {
                        option: option.to_string(),
                        value: raw.to_string(),
                    });
                }
            }
            AtomValue::StringToIntMap(map) => {
                for (key, value) in grammar::parse_string_to_int_pairs(raw, option)? {
                    map.insert(key, value);
                }
            }
            AtomValue::StringAndInteger(string, integer) => {
                (*string, *integer) = grammar::parse_string_and_integer(raw, option)?;
            }
            AtomValue::StringAndTwoIntegers(string, first, second) => {
                (*string, *first, *second) = grammar::parse_string_and_two_integers(raw, option)?;
            }
            AtomValue::MidiTempo(tempo) => *tempo = grammar::parse_midi_tempo(raw, option)?,
            AtomValue::Length(length) => *length = grammar::parse_length(raw, option)?,
            AtomValue::LengthUnit(unit) => *unit = grammar::parse_length_unit(raw, option)?,
            AtomValue::Color(color) => *color = grammar::parse_rgb_color(raw, option)?,
            AtomValue::Choice { selected, choices } => {
                *selected = grammar::parse_choice(raw, option, *choices)?.to_string();
            }
        }
        Ok(())
    }

    /// Store the default of an optional-value atom. Returns false for kinds
    /// that have no default.
    pub fn assign_default(&mut self) -> bool {
        match self {
            AtomValue::StringWithDefault { value, default } => {
                *value = default.clone();
                true
            }
            _ => false,
        }
    }

    /// Placeholder shown after the option names in help, e.g. `NUMBER`.
    pub fn default_value_name(&self) -> &'static str {
        match self {
            AtomValue::Integer(_) => "INTEGER",
            AtomValue::TwoIntegers(..) => "'INTEGER INTEGER'",
            AtomValue::Float(_) => "FLOAT",
            AtomValue::String(_) | AtomValue::StringWithDefault { .. } => "STRING",
            AtomValue::Rational(_) => "N/D",
            AtomValue::NaturalNumbersSet(_) => "NUMBER",
            AtomValue::StringSet(_) => "STRING",
            AtomValue::StringToIntMap(_) => "'NAME NUMBER'",
            AtomValue::StringAndInteger(..) => "'STRING NUMBER'",
            AtomValue::StringAndTwoIntegers(..) => "'STRING NUMBER NUMBER'",
            AtomValue::MidiTempo(_) => "MIDI_TEMPO",
            AtomValue::Length(_) => "LENGTH",
            AtomValue::LengthUnit(_) => "UNIT",
            AtomValue::Color(_) => "COLOR",
            AtomValue::Choice { .. } => "KEY",
        }
    }

    /// Keys accepted by table-driven kinds, for help output.
    pub fn known_keys(&self) -> Option<Vec<&'static str>> {
        match self {
            AtomValue::LengthUnit(_) => Some(LengthUnit::known_keys()),
            AtomValue::Length(_) => Some(LengthUnit::known_keys()),
            AtomValue::Color(_) => Some(RgbColor::known_names()),
            AtomValue::Choice { choices, .. } => Some(choices.to_vec()),
            _ => None,
        }
    }
}

impl fmt::Display for AtomValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AtomValue::Integer(value) => write!(f, "{value}"),
            AtomValue::TwoIntegers(first, second) => write!(f, "{first} {second}"),
            AtomValue::Float(value) => write!(f, "{value}"),
            AtomValue::String(value) => write!(f, "\"{value}\""),
            AtomValue::StringWithDefault { value, .. } => write!(f, "\"{value}\""),
            AtomValue::Rational(value) => write!(f, "{}/{}", value.numer(), value.denom()),
            AtomValue::NaturalNumbersSet(set) => {
                let items: Vec<String> = set.iter().map(u64::to_string).collect();
                write!(f, "[{}]", items.join(", "))
            }
            AtomValue::StringSet(set) => {
                let items: Vec<String> = set.iter().map(|s| format!("\"{s}\"")).collect();
                write!(f, "[{}]", items.join(", "))
            }
            AtomValue::StringToIntMap(map) => {
                let items: Vec<String> = map.iter().map(|(k, v)| format!("{k}: {v}")).collect();
                write!(f, "{{{}}}", items.join(", "))
            }
            AtomValue::StringAndInteger(string, integer) => write!(f, "\"{string}\" {integer}"),
            AtomValue::StringAndTwoIntegers(string, first, second) => {
                write!(f, "\"{string}\" {first} {second}")
            }
            AtomValue::MidiTempo(tempo) => write!(f, "{tempo}"),
            AtomValue::Length(length) => write!(f, "{length}"),
            AtomValue::LengthUnit(unit) => write!(f, "{unit}"),
            AtomValue::Color(color) => write!(f, "{color}"),
            AtomValue::Choice { selected, .. } => f.write_str(selected),
        }
    }
}

/// A value-taking atom.
#[derive(Debug, Clone, PartialEq)]
pub struct ValuedAtom {
    pub value_name: String,
    pub value: AtomValue,
}

impl ValuedAtom {
    pub fn new(value: AtomValue) -> Self {
        Self {
            value_name: value.default_value_name().to_string(),
            value,
        }
    }

    pub fn with_value_name(mut self, value_name: &str) -> Self {
        self.value_name = value_name.to_string();
        self
    }
}
