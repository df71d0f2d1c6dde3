//! Domain value types carried by valued atoms.

use std::fmt;

use serde::Serialize;

/// A MIDI tempo such as `8.=180`: a duration token and beats per minute.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MidiTempo {
    pub duration: String,
    pub per_second: u32,
}

impl MidiTempo {
    pub fn new(duration: &str, per_second: u32) -> Self {
        Self {
            duration: duration.to_string(),
            per_second,
        }
    }
}

impl fmt::Display for MidiTempo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.duration, self.per_second)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum LengthUnit {
    Inch,
    Centimeter,
    Millimeter,
    Point,
}

/// Unit keys accepted on the command line, in help order.
pub const LENGTH_UNITS: &[(&str, LengthUnit)] = &[
    ("in", LengthUnit::Inch),
    ("cm", LengthUnit::Centimeter),
    ("mm", LengthUnit::Millimeter),
    ("pt", LengthUnit::Point),
];

impl LengthUnit {
    pub fn from_key(key: &str) -> Option<Self> {
        LENGTH_UNITS
            .iter()
            .find(|(name, _)| *name == key)
            .map(|(_, unit)| *unit)
    }

    pub fn key(self) -> &'static str {
        LENGTH_UNITS
            .iter()
            .find(|(_, unit)| *unit == self)
            .map(|(name, _)| *name)
            .unwrap_or("?")
    }

    pub fn known_keys() -> Vec<&'static str> {
        LENGTH_UNITS.iter().map(|(name, _)| *name).collect()
    }

    fn millimeters(self) -> f64 {
        match self {
            LengthUnit::Inch => 25.4,
            LengthUnit::Centimeter => 10.0,
            LengthUnit::Millimeter => 1.0,
            LengthUnit::Point => 25.4 / 72.27,
        }
    }
}

impl fmt::Display for LengthUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Length {
    pub value: f64,
    pub unit: LengthUnit,
}

impl Length {
    pub fn new(value: f64, unit: LengthUnit) -> Self {
        Self { value, unit }
    }

    pub fn convert_to(self, unit: LengthUnit) -> Self {
        Self {
            value: self.value * self.unit.millimeters() / unit.millimeters(),
            unit,
        }
    }
}

impl fmt::Display for Length {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.value, self.unit)
    }
}

/// Color components as fractions in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RgbColor {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

pub const NAMED_COLORS: &[(&str, RgbColor)] = &[
    ("black", RgbColor::new(0.0, 0.0, 0.0)),
    ("white", RgbColor::new(1.0, 1.0, 1.0)),
    ("red", RgbColor::new(1.0, 0.0, 0.0)),
    ("green", RgbColor::new(0.0, 1.0, 0.0)),
    ("blue", RgbColor::new(0.0, 0.0, 1.0)),
    ("grey", RgbColor::new(0.5, 0.5, 0.5)),
    ("darkred", RgbColor::new(0.5, 0.0, 0.0)),
    ("darkgreen", RgbColor::new(0.0, 0.5, 0.0)),
    ("darkblue", RgbColor::new(0.0, 0.0, 0.5)),
];

impl RgbColor {
    pub const fn new(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        NAMED_COLORS
            .iter()
            .find(|(key, _)| *key == name)
            .map(|(_, color)| *color)
    }

    pub fn known_names() -> Vec<&'static str> {
        NAMED_COLORS.iter().map(|(name, _)| *name).collect()
    }
}

impl fmt::Display for RgbColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{},{}", self.r, self.g, self.b)
    }
}
