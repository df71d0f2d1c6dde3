use crate::atom::{AtomDef, AtomValue};
use crate::element::GroupId;
use crate::error::Result;
use crate::group::ContainerDef;
use crate::handler::Handler;
use crate::values::{Length, LengthUnit, MidiTempo, RgbColor};

pub const OCTAVE_ENTRY_KINDS: &[&str] = &["relative", "absolute", "fixed"];

/// LilyPond generation.
pub fn create_lpsr_group(handler: &mut Handler) -> Result<GroupId> {
    let group = handler.add_group(ContainerDef::new(
        "LilyPond",
        "lpsr",
        "lpsr-group",
        "Options about the generated LilyPond code.",
    ))?;

    let engraving =
        handler.add_subgroup(group, ContainerDef::new("Engraving", "", "lily-engraving", ""))?;
    handler.add_atom(
        engraving,
        AtomDef::choice(
            "oe",
            "octave-entry",
            "Use KIND octave entry in the generated code.",
            OCTAVE_ENTRY_KINDS,
            "absolute",
        )
        .with_value_name("KIND"),
    )?;
    handler.add_atom(
        engraving,
        AtomDef::string(
            "lpv",
            "lilypond-version",
            "Version written in the \\version command.",
            "2.24.0",
        )
        .with_value_name("VERSION"),
    )?;
    handler.add_atom(
        engraving,
        AtomDef::float("gss", "global-staff-size", "Set the global staff size.", 20.0),
    )?;
    handler.add_atom(
        engraving,
        AtomDef::valued(
            "pw",
            "paper-width",
            "Set the paper width, e.g. '21cm'.",
            AtomValue::Length(Length::new(21.0, LengthUnit::Centimeter)),
        ),
    )?;
    handler.add_atom(
        engraving,
        AtomDef::valued(
            "lu",
            "length-unit",
            "Unit used for lengths in the generated code.",
            AtomValue::LengthUnit(LengthUnit::Millimeter),
        ),
    )?;
    handler.add_atom(
        engraving,
        AtomDef::valued(
            "llc",
            "ledger-lines-color",
            "Color ledger lines, by name or as 'r,g,b' fractions.",
            AtomValue::Color(RgbColor::new(0.0, 0.0, 0.0)),
        ),
    )?;

    let midi = handler.add_subgroup(group, ContainerDef::new("MIDI", "", "lily-midi", ""))?;
    handler.add_atom(
        midi,
        AtomDef::valued(
            "mt",
            "midi-tempo",
            "Set the MIDI tempo, e.g. '4=90' or '8.=60'.",
            AtomValue::MidiTempo(MidiTempo::new("4", 90)),
        ),
    )?;
    handler.add_atom(
        midi,
        AtomDef::boolean("", "no-midi", "Do not generate a \\midi block."),
    )?;

    let measures =
        handler.add_subgroup(group, ContainerDef::new("Measures", "", "lily-measures", ""))?;
    handler.add_atom(
        measures,
        AtomDef::valued(
            "blam",
            "break-line-after-measure",
            "Break the line after measure NUMBER. May be used several times.",
            AtomValue::NaturalNumbersSet(Default::default()),
        ),
    )?;
    handler.add_atom(
        measures,
        AtomDef::valued(
            "pss",
            "part-staff-size",
            "Staff size of one part, e.g. 'P2 16'.",
            AtomValue::StringAndInteger(String::new(), 0),
        )
        .with_value_name("'PART_ID SIZE'"),
    )?;
    handler.add_atom(
        measures,
        AtomDef::valued(
            "pmr",
            "part-measures-range",
            "Only generate measures FIRST to LAST of a part, e.g. 'P1 3 12'.",
            AtomValue::StringAndTwoIntegers(String::new(), 0, 0),
        )
        .with_value_name("'PART_ID FIRST LAST'"),
    )?;

    let header = handler.add_subgroup(group, ContainerDef::new("Header", "", "lily-header", ""))?;
    handler.add_atom(
        header,
        AtomDef::string_with_default(
            "",
            "header-composer",
            "Set the composer in the \\header block.\nWithout a value, 'Anonymous' is used.",
            "Anonymous",
        )
        .with_value_name("COMPOSER"),
    )?;

    Ok(group)
}
