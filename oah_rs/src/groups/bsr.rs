use crate::atom::{AtomDef, AtomValue};
use crate::element::GroupId;
use crate::error::Result;
use crate::group::ContainerDef;
use crate::handler::Handler;

pub const BRAILLE_OUTPUT_KINDS: &[&str] = &["ascii", "utf8", "utf8d", "utf16"];

const MIN_CELLS_PER_LINE: i64 = 12;
const MIN_LINES_PER_PAGE: i64 = 4;

/// Braille generation.
pub fn create_bsr_group(handler: &mut Handler) -> Result<GroupId> {
    let group = handler.add_group(
        ContainerDef::new(
            "Braille",
            "bsr",
            "bsr-group",
            "Options about the generated braille music.",
        )
        .with_consistency_check(check_page_layout),
    )?;

    let layout =
        handler.add_subgroup(group, ContainerDef::new("Layout", "", "braille-layout", ""))?;
    handler.add_atom(
        layout,
        AtomDef::integer("cpl", "cells-per-line", "Number of cells per braille line.", 30),
    )?;
    handler.add_atom(
        layout,
        AtomDef::integer("lpp", "lines-per-page", "Number of lines per braille page.", 27),
    )?;
    handler.add_atom(
        layout,
        AtomDef::valued(
            "",
            "page-margins",
            "Blank cells left and right of each line, e.g. '1 1'.",
            AtomValue::TwoIntegers(0, 0),
        ),
    )?;
    handler.add_atom(
        layout,
        AtomDef::false_boolean("npn", "no-page-numbers", "Do not number braille pages."),
    )?;

    let output =
        handler.add_subgroup(group, ContainerDef::new("Output", "", "braille-output", ""))?;
    handler.add_atom(
        output,
        AtomDef::choice(
            "bok",
            "braille-output-kind",
            "Write braille cells as KIND.",
            BRAILLE_OUTPUT_KINDS,
            "ascii",
        )
        .with_value_name("KIND"),
    )?;
    handler.add_atom(
        output,
        AtomDef::boolean("", "braille-byte-order-mark", "Start UTF output with a byte order mark."),
    )?;
    handler.add_atom(
        output,
        AtomDef::boolean("", "no-braille-lyrics", "Do not write lyrics."),
    )?;

    Ok(group)
}

fn check_page_layout(handler: &Handler) -> std::result::Result<(), String> {
    let cells = handler.integer("cells-per-line").unwrap_or_default();
    if cells < MIN_CELLS_PER_LINE {
        return Err(format!(
            "cells per line is {cells}, at least {MIN_CELLS_PER_LINE} are needed"
        ));
    }
    let lines = handler.integer("lines-per-page").unwrap_or_default();
    if lines < MIN_LINES_PER_PAGE {
        return Err(format!(
            "lines per page is {lines}, at least {MIN_LINES_PER_PAGE} are needed"
        ));
    }
    if let Some(AtomValue::TwoIntegers(left, right)) = handler.value("page-margins") {
        if left.checked_add(*right).is_none_or(|margins| margins >= cells) {
            return Err(format!(
                "page margins {left} and {right} leave no room on {cells} cells"
            ));
        }
    }
    Ok(())
}
