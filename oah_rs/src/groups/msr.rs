use num_rational::Rational64;

use crate::atom::{AtomDef, AtomValue};
use crate::element::GroupId;
use crate::error::Result;
use crate::group::ContainerDef;
use crate::handler::Handler;
use crate::prefix::Prefix;

pub const PITCHES_LANGUAGES: &[&str] = &[
    "nederlands",
    "catalan",
    "deutsch",
    "english",
    "espanol",
    "francais",
    "italiano",
    "norsk",
    "portugues",
    "suomi",
    "svenska",
    "vlaams",
];

/// Score representation: tracing, part filtering, notes.
pub fn create_msr_group(handler: &mut Handler) -> Result<GroupId> {
    handler.add_prefix(Prefix::new("t", "t", "Short trace prefix: -t=notes,parts"))?;
    handler.add_prefix(Prefix::new(
        "trace",
        "trace-",
        "Long trace prefix: -trace=notes,parts",
    ))?;

    let group = handler.add_group(ContainerDef::new(
        "MSR",
        "msr",
        "msr-group",
        "Options about the music score representation.",
    ))?;

    let trace = handler.add_subgroup(group, ContainerDef::new("Trace", "", "msr-trace", ""))?;
    for (short, long, description) in [
        ("tnotes", "trace-notes", "Trace notes."),
        ("tparts", "trace-parts", "Trace parts."),
        ("tmeasures", "trace-measures", "Trace measures."),
        ("tvoices", "trace-voices", "Trace voices."),
    ] {
        handler.add_atom(trace, AtomDef::boolean(short, long, description))?;
    }
    handler.add_atom(
        trace,
        AtomDef::multiplex(
            "Trace SHORT_NAME/LONG_NAME.",
            "t",
            "trace",
            "SHORT_NAME",
            "LONG_NAME",
            &["trace-notes", "trace-parts", "trace-measures", "trace-voices"],
        ),
    )?;
    handler.add_atom(
        trace,
        AtomDef::combined(
            "tall",
            "trace-all",
            "Trace notes, parts, measures and voices.",
            &["trace-notes", "trace-parts", "trace-measures", "trace-voices"],
        ),
    )?;

    let parts = handler.add_subgroup(group, ContainerDef::new("Parts", "", "msr-parts", ""))?;
    handler.add_atom(
        parts,
        AtomDef::valued(
            "opi",
            "omit-part-id",
            "Omit the part with ID PART_ID. May be used several times.",
            AtomValue::StringSet(Default::default()),
        )
        .with_value_name("PART_ID"),
    )?;
    handler.add_atom(
        parts,
        AtomDef::valued(
            "kpi",
            "keep-part-id",
            "Keep only the parts with ID PART_ID. May be used several times.",
            AtomValue::StringSet(Default::default()),
        )
        .with_value_name("PART_ID"),
    )?;
    handler.add_atom(
        parts,
        AtomDef::valued(
            "psc",
            "part-staves-count",
            "Force the number of staves of parts, e.g. 'P1 2,P2 1'.",
            AtomValue::StringToIntMap(Default::default()),
        ),
    )?;

    let notes = handler.add_subgroup(group, ContainerDef::new("Notes", "", "msr-notes", ""))?;
    handler.add_atom(
        notes,
        AtomDef::choice(
            "mplang",
            "msr-pitches-language",
            "Use LANGUAGE to name pitches in the score representation.",
            PITCHES_LANGUAGES,
            "nederlands",
        )
        .with_value_name("LANGUAGE"),
    )?;
    handler.add_atom(
        notes,
        AtomDef::synonym(
            "",
            "pitches-language",
            "Same as -msr-pitches-language.",
            "msr-pitches-language",
        ),
    )?;
    handler.add_atom(
        notes,
        AtomDef::valued(
            "dsc",
            "duration-scale",
            "Multiply every duration by N/D.",
            AtomValue::Rational(Rational64::from_integer(1)),
        ),
    )?;
    handler.add_atom(
        notes,
        AtomDef::false_boolean("nt", "no-ties", "Do not keep ties between notes."),
    )?;

    let display =
        handler.add_subgroup(group, ContainerDef::new("Display", "", "msr-display", ""))?;
    handler.add_atom(
        display,
        AtomDef::boolean("d", "display-msr", "Write the score representation to standard error."),
    )?;
    handler.add_atom(
        display,
        AtomDef::boolean("s", "display-msr-summary", "Write a summary of the score representation."),
    )?;

    Ok(group)
}
