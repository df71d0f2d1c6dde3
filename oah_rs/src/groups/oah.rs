use crate::atom::{AtomDef, ControlKind, HelpKind};
use crate::element::GroupId;
use crate::error::Result;
use crate::group::ContainerDef;
use crate::handler::Handler;

/// Help, introspection and handler control.
pub fn create_oah_group(handler: &mut Handler) -> Result<GroupId> {
    let group = handler.add_group(ContainerDef::new(
        "Options and help",
        "",
        "oah-group",
        "Options about the options themselves.",
    ))?;

    let help = handler.add_subgroup(
        group,
        ContainerDef::new("Help", "", "help-options", ""),
    )?;
    handler.add_atom(
        help,
        AtomDef::help("h", "help", "Display the full help and exit.", HelpKind::Usage),
    )?;
    handler.add_atom(
        help,
        AtomDef::help(
            "hs",
            "help-summary",
            "Display the groups and subgroups, without their options.",
            HelpKind::Summary,
        ),
    )?;
    handler.add_atom(
        help,
        AtomDef::option_name_help(
            "onh",
            "option-name-help",
            "Display the help for OPTION_NAME.\nWithout a value, explain this option itself.",
        ),
    )?;
    handler.add_atom(
        help,
        AtomDef::find_string(
            "",
            "find",
            "Display the options whose names or descriptions contain STRING, ignoring case.",
        ),
    )?;
    handler.add_atom(
        help,
        AtomDef::help("", "version", "Display the version.", HelpKind::Version),
    )?;
    handler.add_atom(
        help,
        AtomDef::help("", "about", "Display what this program does.", HelpKind::About),
    )?;
    handler.add_atom(
        help,
        AtomDef::help("", "contact", "Display how to report issues.", HelpKind::Contact),
    )?;

    let display = handler.add_subgroup(
        group,
        ContainerDef::new("Display", "", "display-options", ""),
    )?;
    handler.add_atom(
        display,
        AtomDef::help(
            "",
            "display-prefixes",
            "Display the option prefixes and what they expand to.",
            HelpKind::DisplayPrefixes,
        ),
    )?;
    handler.add_atom(
        display,
        AtomDef::help(
            "",
            "display-single-character-options",
            "Display the single-character options, which can be clustered.",
            HelpKind::DisplaySingleCharacterOptions,
        ),
    )?;
    handler.add_atom(
        display,
        AtomDef::control(
            "dov",
            "display-options-values",
            "Display the value of every option once the command line is handled.",
            ControlKind::DisplayOptionsValues,
        ),
    )?;
    handler.add_atom(
        display,
        AtomDef::control(
            "soa",
            "show-options-and-arguments",
            "Display the options and arguments once the command line is handled.",
            ControlKind::ShowOptionsAndArguments,
        ),
    )?;

    let control = handler.add_subgroup(
        group,
        ContainerDef::new("Handling", "", "oah-handling", ""),
    )?;
    handler.add_atom(
        control,
        AtomDef::control(
            "",
            "include",
            "Read options and arguments from FILE, JSON or one option per line.",
            ControlKind::IncludeOptionsFile,
        ),
    )?;
    handler.add_atom(
        control,
        AtomDef::control(
            "toah",
            "trace-oah",
            "Log how the options and arguments are handled.",
            ControlKind::TraceOah,
        ),
    )?;

    Ok(group)
}
