//! Help rendering: full usage, summaries, per-element help, introspection.
//!
//! Every renderer writes to a caller-supplied sink. Visibility only filters
//! elements reached while listing their parent; an element asked for by
//! name is always shown in full.

use std::io::Write;

use crate::atom::{Atom, AtomKind};
use crate::element::{AtomId, ElementRef, GroupId, SubGroupId, Visibility};
use crate::error::Result;
use crate::handler::{Handler, Widths};

const INDENT: &str = "  ";

impl Handler {
    /// Full help of the handler: usage line, then every visible group.
    pub fn print_help(&self, out: &mut dyn Write) -> Result<()> {
        writeln!(out, "{}", self.info.header)?;
        writeln!(out, "{}", self.info.usage)?;
        for id in self.group_ids() {
            writeln!(out)?;
            self.write_group(id, false, out)?;
        }
        Ok(())
    }

    pub fn print_group_help(&self, id: GroupId, out: &mut dyn Write) -> Result<()> {
        self.write_group(id, true, out)
    }

    /// `asked` is true when the subgroup was named on the command line, in
    /// which case its group header is shown for context.
    pub fn print_subgroup_help(&self, id: SubGroupId, asked: bool, out: &mut dyn Write) -> Result<()> {
        if asked {
            let group = self.group(self.subgroup(id).group);
            writeln!(out, "{} ({}):", group.header, group.names.fetch_names())?;
        }
        self.write_subgroup(id, asked, out)
    }

    fn write_group(&self, id: GroupId, asked: bool, out: &mut dyn Write) -> Result<()> {
        let group = self.group(id);
        if !asked && group.visibility == Visibility::Hidden {
            return Ok(());
        }
        writeln!(out, "{} ({}):", group.header, group.names.fetch_names())?;
        if !asked && group.visibility == Visibility::HeaderOnly {
            writeln!(
                out,
                "{INDENT}use {} to show the contents of this group",
                group.names.fetch_names_between_quotes()
            )?;
            return Ok(());
        }
        if !group.names.description.is_empty() {
            writeln!(out, "{}", group.names.description)?;
        }
        for subgroup in &group.subgroups {
            self.write_subgroup(*subgroup, false, out)?;
        }
        Ok(())
    }

    fn write_subgroup(&self, id: SubGroupId, asked: bool, out: &mut dyn Write) -> Result<()> {
        let subgroup = self.subgroup(id);
        if !asked && subgroup.visibility == Visibility::Hidden {
            return Ok(());
        }
        let widths = self.help_widths();
        writeln!(
            out,
            "{INDENT}{:<width$} ({}):",
            subgroup.header,
            subgroup.names.fetch_names(),
            width = widths.subgroup_header
        )?;
        if !asked && subgroup.visibility == Visibility::HeaderOnly {
            writeln!(
                out,
                "{INDENT}{INDENT}use {} to show the contents of this subgroup",
                subgroup.names.fetch_names_between_quotes()
            )?;
            return Ok(());
        }
        for atom in &subgroup.atoms {
            if self.atom(*atom).visibility != Visibility::Hidden {
                self.write_atom(*atom, out)?;
            }
        }
        Ok(())
    }

    fn help_widths(&self) -> Widths {
        self.registry().map(|registry| registry.widths()).unwrap_or_default()
    }

    fn atom_names_column(atom: &Atom) -> String {
        match atom.value_name() {
            Some(value_name) => format!("{} {value_name}", atom.names.fetch_names()),
            None => atom.names.fetch_names(),
        }
    }

    fn write_atom(&self, id: AtomId, out: &mut dyn Write) -> Result<()> {
        let atom = self.atom(id);
        let widths = self.help_widths();
        let column = widths.short_name + widths.long_name + 5;
        let names = Self::atom_names_column(atom);
        let mut description = atom.names.description.lines();
        match description.next() {
            Some(first) if names.chars().count() < column => {
                writeln!(out, "{INDENT}{INDENT}{names:<column$} {first}")?;
            }
            Some(first) => {
                writeln!(out, "{INDENT}{INDENT}{names}")?;
                writeln!(out, "{INDENT}{INDENT}{:column$} {first}", "")?;
            }
            None => writeln!(out, "{INDENT}{INDENT}{names}")?,
        }
        let pad = format!("{INDENT}{INDENT}{:column$} ", "");
        for line in description {
            writeln!(out, "{pad}{line}")?;
        }
        self.write_atom_extras(atom, &pad, out)
    }

    fn write_atom_extras(&self, atom: &Atom, pad: &str, out: &mut dyn Write) -> Result<()> {
        match &atom.kind {
            AtomKind::Valued(valued) => {
                if let Some(keys) = valued.value.known_keys() {
                    writeln!(
                        out,
                        "{pad}{} is one of the {} values: {}",
                        valued.value_name,
                        keys.len(),
                        keys.join(", ")
                    )?;
                }
            }
            AtomKind::Multiplex(multiplex) => {
                writeln!(
                    out,
                    "{pad}{} is one of: {}",
                    multiplex.short_suffix_descriptor,
                    multiplex.short_suffixes.join(", ")
                )?;
                writeln!(
                    out,
                    "{pad}{} is one of: {}",
                    multiplex.long_suffix_descriptor,
                    multiplex.long_suffixes.join(", ")
                )?;
            }
            AtomKind::Combined(members) => {
                let names: Vec<String> = members
                    .iter()
                    .map(|member| format!("-{}", self.atom(*member).names.canonical()))
                    .collect();
                writeln!(out, "{pad}sets: {}", names.join(", "))?;
            }
            AtomKind::Synonym(original) => {
                writeln!(
                    out,
                    "{pad}synonym of {}",
                    self.atom(*original).names.fetch_names_between_quotes()
                )?;
            }
            _ => {}
        }
        Ok(())
    }

    /// Help for a single atom, with its location in the tree.
    pub fn print_atom_help(&self, id: AtomId, out: &mut dyn Write) -> Result<()> {
        let atom = self.atom(id);
        let subgroup = self.subgroup(atom.subgroup);
        let group = self.group(subgroup.group);
        writeln!(
            out,
            "--- Help for {} in subgroup \"{}\" of group \"{}\" ---",
            self.describe_element(ElementRef::Atom(id)),
            subgroup.header,
            group.header
        )?;
        writeln!(out, "{INDENT}{}", Self::atom_names_column(atom))?;
        let pad = format!("{INDENT}{INDENT}");
        for line in atom.names.description.lines() {
            writeln!(out, "{pad}{line}")?;
        }
        self.write_atom_extras(atom, &pad, out)
    }

    /// Groups and subgroups only.
    pub fn print_summary(&self, out: &mut dyn Write) -> Result<()> {
        writeln!(out, "{}", self.info.header)?;
        writeln!(out, "{}", self.info.usage)?;
        for group in &self.groups {
            if group.visibility == Visibility::Hidden {
                continue;
            }
            writeln!(out)?;
            writeln!(out, "{} ({})", group.header, group.names.fetch_names())?;
            for subgroup in &group.subgroups {
                let subgroup = self.subgroup(*subgroup);
                if subgroup.visibility != Visibility::Hidden {
                    writeln!(out, "{INDENT}{} ({})", subgroup.header, subgroup.names.fetch_names())?;
                }
            }
        }
        Ok(())
    }

    /// Help for whatever element or prefix `name` designates. Unknown names
    /// are reported on `out`, they are not an error.
    pub fn print_option_name_help(&self, name: &str, out: &mut dyn Write) -> Result<()> {
        let name = name.trim_start_matches('-');
        match self.fetch_element_by_name(name) {
            Some(ElementRef::Handler) => self.print_help(out),
            Some(ElementRef::Group(id)) => {
                writeln!(out, "--- Help for group {} ---", self.group(id).names.fetch_names())?;
                self.print_group_help(id, out)
            }
            Some(ElementRef::SubGroup(id)) => {
                writeln!(
                    out,
                    "--- Help for subgroup {} ---",
                    self.subgroup(id).names.fetch_names()
                )?;
                self.print_subgroup_help(id, true, out)
            }
            Some(ElementRef::Atom(id)) => self.print_atom_help(id, out),
            None => match self.prefixes.get(name) {
                Some(prefix) => {
                    writeln!(out, "--- Help for prefix \"{}\" ---", prefix.name)?;
                    writeln!(out, "{INDENT}-{}=<suffixes> stands for -{}<suffix>...", prefix.name, prefix.ersatz)?;
                    if !prefix.description.is_empty() {
                        writeln!(out, "{INDENT}{}", prefix.description)?;
                    }
                    Ok(())
                }
                None => Ok(writeln!(out, "option name \"{name}\" is unknown")?),
            },
        }
    }

    /// Case-insensitive search over element names and descriptions.
    pub fn print_find(&self, needle: &str, out: &mut dyn Write) -> Result<()> {
        let lowered = needle.to_lowercase();
        let hit = |text: &str| text.to_lowercase().contains(&lowered);

        let mut found: Vec<(String, String)> = Vec::new();
        let mut consider = |names: &crate::element::ElementNames| {
            if names.names().any(|name| hit(name)) || hit(&names.description) {
                found.push((names.fetch_names(), names.description.clone()));
            }
        };
        for group in &self.groups {
            consider(&group.names);
            for subgroup in &group.subgroups {
                let subgroup = self.subgroup(*subgroup);
                consider(&subgroup.names);
                for atom in &subgroup.atoms {
                    consider(&self.atom(*atom).names);
                }
            }
        }
        for prefix in self.prefixes.values() {
            if hit(&prefix.name) || hit(&prefix.ersatz) || hit(&prefix.description) {
                found.push((
                    format!("-{}=  (prefix for -{})", prefix.name, prefix.ersatz),
                    prefix.description.clone(),
                ));
            }
        }

        match found.len() {
            0 => writeln!(out, "no occurrence of string \"{needle}\" has been found")?,
            1 => writeln!(out, "1 occurrence of string \"{needle}\" has been found:")?,
            count => writeln!(out, "{count} occurrences of string \"{needle}\" have been found:")?,
        }
        for (index, (names, description)) in found.iter().enumerate() {
            writeln!(out, "{INDENT}{}: {names}", index + 1)?;
            if !description.is_empty() {
                writeln!(out, "{INDENT}{INDENT}{INDENT}{description}")?;
            }
        }
        Ok(())
    }

    pub fn print_prefixes(&self, out: &mut dyn Write) -> Result<()> {
        match self.prefixes.len() {
            0 => writeln!(out, "There are no prefixes")?,
            count => writeln!(out, "The {count} known prefixes are:")?,
        }
        for prefix in self.prefixes.values() {
            writeln!(out, "{INDENT}-{}=  stands for -{}", prefix.name, prefix.ersatz)?;
            if !prefix.description.is_empty() {
                writeln!(out, "{INDENT}{INDENT}{}", prefix.description)?;
            }
        }
        Ok(())
    }

    pub fn print_single_character_options(&self, out: &mut dyn Write) -> Result<()> {
        let names: Vec<String> = self
            .registry()
            .map(|registry| {
                registry
                    .single_character_names()
                    .iter()
                    .map(|c| format!("-{c}"))
                    .collect()
            })
            .unwrap_or_default();
        match names.len() {
            0 => writeln!(out, "There are no single-character options")?,
            count => writeln!(
                out,
                "The {count} single-character options, usable in clusters, are:"
            )?,
        }
        if !names.is_empty() {
            writeln!(out, "{INDENT}{}", names.join(" "))?;
        }
        Ok(())
    }

    /// Value of every boolean and valued atom; those set by the user are
    /// marked with `***`.
    pub fn print_options_values(&self, out: &mut dyn Write) -> Result<()> {
        writeln!(out, "The options values are:")?;
        for group in &self.groups {
            writeln!(
                out,
                "{INDENT}{} ({}), {} chosen:",
                group.header,
                group.names.fetch_names(),
                group.chosen_atoms
            )?;
            for subgroup in &group.subgroups {
                let subgroup = self.subgroup(*subgroup);
                let rows: Vec<(&Atom, String)> = subgroup
                    .atoms
                    .iter()
                    .map(|id| self.atom(*id))
                    .filter_map(|atom| match &atom.kind {
                        AtomKind::Boolean(boolean) => Some((atom, boolean.value.to_string())),
                        AtomKind::Valued(valued) => Some((atom, valued.value.to_string())),
                        _ => None,
                    })
                    .collect();
                if rows.is_empty() {
                    continue;
                }
                writeln!(
                    out,
                    "{INDENT}{INDENT}{}, {} chosen:",
                    subgroup.header, subgroup.chosen_atoms
                )?;
                let width = rows
                    .iter()
                    .map(|(atom, _)| atom.names.canonical().chars().count())
                    .max()
                    .unwrap_or(0);
                for (atom, value) in rows {
                    let marker = if atom.has_been_set { "  ***" } else { "" };
                    writeln!(
                        out,
                        "{INDENT}{INDENT}{INDENT}{:<width$} : {value}{marker}",
                        atom.names.canonical()
                    )?;
                }
            }
        }
        Ok(())
    }

    pub fn print_options_and_arguments(&self, out: &mut dyn Write) -> Result<()> {
        let recorded = self.options_and_arguments();
        writeln!(out, "The command line is:")?;
        writeln!(out, "{INDENT}{} {recorded}", self.info.program())?;
        match recorded.options.len() {
            0 => writeln!(out, "There are no options")?,
            count => writeln!(out, "The {count} options used are:")?,
        }
        for option in &recorded.options {
            if option.value.is_empty() {
                writeln!(out, "{INDENT}-{}", option.name)?;
            } else {
                writeln!(out, "{INDENT}-{} {}", option.name, option.value)?;
            }
        }
        match recorded.arguments.len() {
            0 => writeln!(out, "There are no arguments")?,
            count => writeln!(out, "The {count} arguments are:")?,
        }
        for argument in &recorded.arguments {
            writeln!(out, "{INDENT}{argument}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::atom::{AtomDef, HelpKind};
    use crate::element::Visibility;
    use crate::group::ContainerDef;
    use crate::handler::{Handler, HandlerInfo};
    use crate::prefix::Prefix;

    fn handler() -> Handler {
        let mut handler = Handler::new(HandlerInfo::new("prog", "Prog converts things"));
        handler.add_prefix(Prefix::new("t", "t", "trace short")).unwrap();
        handler.add_prefix(Prefix::new("trace", "trace-", "trace long")).unwrap();

        let group = handler
            .add_group(ContainerDef::new("Main", "mg", "main-group", ""))
            .unwrap();
        let sub = handler
            .add_subgroup(group, ContainerDef::new("Display", "ds", "display", ""))
            .unwrap();
        handler
            .add_atom(sub, AtomDef::boolean("v", "verbose", "Be verbose about the conversion."))
            .unwrap();
        handler
            .add_atom(sub, AtomDef::help("h", "help", "Show help.", HelpKind::Usage))
            .unwrap();
        handler
            .add_atom(sub, AtomDef::boolean("tnotes", "trace-notes", "Trace notes."))
            .unwrap();
        handler
            .add_atom(sub, AtomDef::boolean("tparts", "trace-parts", "Trace parts."))
            .unwrap();
        handler
            .add_atom(
                sub,
                AtomDef::multiplex(
                    "Trace SHORT_NAME/LONG_NAME.",
                    "t",
                    "trace",
                    "SHORT_NAME",
                    "LONG_NAME",
                    &["tnotes", "tparts"],
                ),
            )
            .unwrap();

        let secret = handler
            .add_group(
                ContainerDef::new("Secret", "sec", "secret", "")
                    .with_visibility(Visibility::HeaderOnly),
            )
            .unwrap();
        let hidden = handler
            .add_subgroup(secret, ContainerDef::new("Hidden", "hid", "hidden", ""))
            .unwrap();
        handler
            .add_atom(hidden, AtomDef::boolean("", "quiet-magic", "Magic."))
            .unwrap();
        handler.register().unwrap();
        handler
    }

    fn render(f: impl FnOnce(&Handler, &mut Vec<u8>)) -> String {
        let handler = handler();
        let mut out = Vec::new();
        f(&handler, &mut out);
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn full_help_hides_multiplex_members_and_header_only_contents() {
        let text = render(|h, out| h.print_help(out).unwrap());
        assert!(text.contains("-v, -verbose"));
        assert!(text.contains("-t=<SHORT_NAME>, -trace=<LONG_NAME>"));
        assert!(text.contains("SHORT_NAME is one of: notes, parts"));
        assert!(!text.contains("-tnotes"));
        assert!(text.contains("Secret (-sec, -secret):"));
        assert!(text.contains("use \"-sec, -secret\" to show the contents"));
        assert!(!text.contains("quiet-magic"));
    }

    #[test]
    fn asked_group_is_shown_in_full() {
        let text = render(|h, out| {
            h.print_group_help(crate::element::GroupId(1), out).unwrap()
        });
        assert!(text.contains("-quiet-magic"));
    }

    #[test]
    fn option_name_help_covers_atoms_prefixes_and_unknowns() {
        let text = render(|h, out| h.print_option_name_help("verbose", out).unwrap());
        assert!(text.contains("boolean atom -v, -verbose"));
        assert!(text.contains("Be verbose"));

        let text = render(|h, out| h.print_option_name_help("trace", out).unwrap());
        assert!(text.contains("prefix \"trace\""));

        let text = render(|h, out| h.print_option_name_help("sometopic", out).unwrap());
        assert!(text.contains("\"sometopic\" is unknown"));
    }

    #[test]
    fn find_is_case_insensitive() {
        let text = render(|h, out| h.print_find("VERBOSE", out).unwrap());
        assert!(text.contains("1 occurrence"));
        assert!(text.contains("-v, -verbose"));

        let text = render(|h, out| h.print_find("nothing-like-this", out).unwrap());
        assert!(text.contains("no occurrence"));
    }

    #[test]
    fn summary_lists_containers_only() {
        let text = render(|h, out| h.print_summary(out).unwrap());
        assert!(text.contains("Main (-mg, -main-group)"));
        assert!(text.contains("Display (-ds, -display)"));
        assert!(!text.contains("-verbose"));
    }

    #[test]
    fn introspection_lists_prefixes_and_single_characters() {
        let text = render(|h, out| h.print_prefixes(out).unwrap());
        assert!(text.contains("The 2 known prefixes are:"));
        assert!(text.contains("-trace=  stands for -trace-"));

        let text = render(|h, out| h.print_single_character_options(out).unwrap());
        assert!(text.contains("-h -v"));
    }
}
