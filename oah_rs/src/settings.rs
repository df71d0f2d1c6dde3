//! Typed views of the standard groups, read from a parsed handler.
//!
//! These are what the translation passes consume; the binaries print them
//! as JSON.

use std::collections::{BTreeMap, BTreeSet};

use num_rational::Rational64;
use serde::Serialize;

use crate::atom::AtomValue;
use crate::handler::Handler;
use crate::values::{Length, LengthUnit, MidiTempo, RgbColor};

fn flag(handler: &Handler, name: &str) -> bool {
    handler.boolean(name).unwrap_or_default()
}

fn text(handler: &Handler, name: &str) -> String {
    handler.string(name).unwrap_or_default().to_string()
}

fn string_set(handler: &Handler, name: &str) -> BTreeSet<String> {
    match handler.value(name) {
        Some(AtomValue::StringSet(set)) => set.clone(),
        _ => BTreeSet::new(),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MsrSettings {
    pub trace_notes: bool,
    pub trace_parts: bool,
    pub trace_measures: bool,
    pub trace_voices: bool,
    pub omit_part_ids: BTreeSet<String>,
    pub keep_part_ids: BTreeSet<String>,
    pub part_staves_count: BTreeMap<String, i64>,
    pub pitches_language: String,
    pub duration_scale: Rational64,
    pub ties: bool,
    pub display_msr: bool,
    pub display_msr_summary: bool,
}

impl MsrSettings {
    pub fn from_handler(handler: &Handler) -> Self {
        Self {
            trace_notes: flag(handler, "trace-notes"),
            trace_parts: flag(handler, "trace-parts"),
            trace_measures: flag(handler, "trace-measures"),
            trace_voices: flag(handler, "trace-voices"),
            omit_part_ids: string_set(handler, "omit-part-id"),
            keep_part_ids: string_set(handler, "keep-part-id"),
            part_staves_count: match handler.value("part-staves-count") {
                Some(AtomValue::StringToIntMap(map)) => map.clone(),
                _ => BTreeMap::new(),
            },
            pitches_language: text(handler, "msr-pitches-language"),
            duration_scale: match handler.value("duration-scale") {
                Some(AtomValue::Rational(scale)) => *scale,
                _ => Rational64::from_integer(1),
            },
            ties: flag(handler, "no-ties"),
            display_msr: flag(handler, "display-msr"),
            display_msr_summary: flag(handler, "display-msr-summary"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PartMeasuresRange {
    pub part_id: String,
    pub first: i64,
    pub last: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LilypondSettings {
    pub octave_entry: String,
    pub lilypond_version: String,
    pub global_staff_size: f64,
    pub paper_width: Length,
    pub length_unit: LengthUnit,
    pub ledger_lines_color: RgbColor,
    pub midi_tempo: MidiTempo,
    pub midi: bool,
    pub break_line_after_measures: BTreeSet<u64>,
    pub part_staff_size: Option<(String, i64)>,
    pub part_measures_range: Option<PartMeasuresRange>,
    pub composer: Option<String>,
}

impl LilypondSettings {
    pub fn from_handler(handler: &Handler) -> Self {
        let length_unit = match handler.value("length-unit") {
            Some(AtomValue::LengthUnit(unit)) => *unit,
            _ => LengthUnit::Millimeter,
        };
        Self {
            octave_entry: text(handler, "octave-entry"),
            lilypond_version: text(handler, "lilypond-version"),
            global_staff_size: handler.float("global-staff-size").unwrap_or(20.0),
            paper_width: match handler.value("paper-width") {
                Some(AtomValue::Length(length)) => length.convert_to(length_unit),
                _ => Length::new(210.0, LengthUnit::Millimeter).convert_to(length_unit),
            },
            length_unit,
            ledger_lines_color: match handler.value("ledger-lines-color") {
                Some(AtomValue::Color(color)) => *color,
                _ => RgbColor::new(0.0, 0.0, 0.0),
            },
            midi_tempo: match handler.value("midi-tempo") {
                Some(AtomValue::MidiTempo(tempo)) => tempo.clone(),
                _ => MidiTempo::new("4", 90),
            },
            midi: !flag(handler, "no-midi"),
            break_line_after_measures: match handler.value("break-line-after-measure") {
                Some(AtomValue::NaturalNumbersSet(set)) => set.clone(),
                _ => BTreeSet::new(),
            },
            part_staff_size: match handler.value("part-staff-size") {
                Some(AtomValue::StringAndInteger(part, size))
                    if handler.has_been_set("part-staff-size") =>
                {
                    Some((part.clone(), *size))
                }
                _ => None,
            },
            part_measures_range: match handler.value("part-measures-range") {
                Some(AtomValue::StringAndTwoIntegers(part_id, first, last))
                    if handler.has_been_set("part-measures-range") =>
                {
                    Some(PartMeasuresRange {
                        part_id: part_id.clone(),
                        first: *first,
                        last: *last,
                    })
                }
                _ => None,
            },
            composer: handler
                .has_been_set("header-composer")
                .then(|| text(handler, "header-composer")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BrailleSettings {
    pub cells_per_line: i64,
    pub lines_per_page: i64,
    pub page_margins: (i64, i64),
    pub page_numbers: bool,
    pub output_kind: String,
    pub byte_order_mark: bool,
    pub lyrics: bool,
}

impl BrailleSettings {
    pub fn from_handler(handler: &Handler) -> Self {
        Self {
            cells_per_line: handler.integer("cells-per-line").unwrap_or(30),
            lines_per_page: handler.integer("lines-per-page").unwrap_or(27),
            page_margins: match handler.value("page-margins") {
                Some(AtomValue::TwoIntegers(left, right)) => (*left, *right),
                _ => (0, 0),
            },
            page_numbers: flag(handler, "no-page-numbers"),
            output_kind: text(handler, "braille-output-kind"),
            byte_order_mark: flag(handler, "braille-byte-order-mark"),
            lyrics: !flag(handler, "no-braille-lyrics"),
        }
    }
}
