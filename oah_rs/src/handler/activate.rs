//! Per-kind behavior of atoms: activation, value application, defaults.

use std::io::Write;

use crate::atom::{AtomKind, ControlKind, HelpKind, QueryKind};
use crate::element::{AtomId, ElementRef, OptionalValuesStyle, ValueExpected};
use crate::error::{OahError, Result};
use crate::options_vector::OptionsAndArguments;

use super::Handler;
use super::dispatch::MAX_INCLUDE_DEPTH;

/// What the dispatcher does after an atom has been activated by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Activation {
    Done,
    /// The next non-option token is this atom's value.
    NeedsValue,
}

impl Handler {
    pub(crate) fn activate(
        &mut self,
        id: AtomId,
        invoked: &str,
        out: &mut dyn Write,
    ) -> Result<Activation> {
        self.trace(|| format!("activating {}", self.describe_element(ElementRef::Atom(id))));

        let kind = self.atoms[id.0].kind.clone();
        match kind {
            AtomKind::Boolean(_) => self.set_boolean(id),
            AtomKind::Combined(members) => {
                for member in members {
                    self.set_boolean(member);
                }
                self.atoms[id.0].has_been_set = true;
            }
            AtomKind::Multiplex(multiplex) => {
                for member in multiplex.members {
                    self.set_boolean(member);
                }
                self.atoms[id.0].has_been_set = true;
            }
            AtomKind::Synonym(original) => return self.activate(original, invoked, out),
            AtomKind::Valued(valued) => match valued.value.value_expected() {
                ValueExpected::Optional if self.style == OptionalValuesStyle::Gnu => {
                    self.store_default(id, invoked, out)?;
                }
                _ => return Ok(Activation::NeedsValue),
            },
            AtomKind::Help(kind) => {
                self.print_for_help_kind(kind, out)?;
                self.session.help_found = true;
            }
            AtomKind::Query(QueryKind::OptionNameHelp { .. }) => {
                if self.style == OptionalValuesStyle::Gnu {
                    self.store_default(id, invoked, out)?;
                } else {
                    return Ok(Activation::NeedsValue);
                }
            }
            AtomKind::Query(QueryKind::FindString) => return Ok(Activation::NeedsValue),
            AtomKind::Control(control) => match control {
                ControlKind::TraceOah => {
                    self.session.trace = true;
                    self.trace(|| "tracing of options and arguments handling is on".to_string());
                }
                ControlKind::DisplayOptionsValues => self.session.display_options_values = true,
                ControlKind::ShowOptionsAndArguments => {
                    self.session.show_options_and_arguments = true;
                }
                ControlKind::IncludeOptionsFile => return Ok(Activation::NeedsValue),
            },
        }
        Ok(Activation::Done)
    }

    fn set_boolean(&mut self, id: AtomId) {
        let atom = &mut self.atoms[id.0];
        if let AtomKind::Boolean(boolean) = &mut atom.kind {
            boolean.value = boolean.stores;
            atom.has_been_set = true;
        }
    }

    fn print_for_help_kind(&self, kind: HelpKind, out: &mut dyn Write) -> Result<()> {
        match kind {
            HelpKind::Usage => self.print_help(out),
            HelpKind::Summary => self.print_summary(out),
            HelpKind::Version => Ok(writeln!(out, "{}", self.info.version)?),
            HelpKind::About => Ok(writeln!(out, "{}", self.info.about)?),
            HelpKind::Contact => Ok(writeln!(out, "{}", self.info.contact)?),
            HelpKind::DisplayPrefixes => self.print_prefixes(out),
            HelpKind::DisplaySingleCharacterOptions => self.print_single_character_options(out),
        }
    }

    /// Hand `value` to the atom and record the pair.
    pub(crate) fn apply_value(
        &mut self,
        id: AtomId,
        invoked: &str,
        value: &str,
        out: &mut dyn Write,
    ) -> Result<()> {
        let id = self.original_atom(id);
        self.trace(|| format!("option \"-{invoked}\" gets value \"{value}\""));
        self.record_option(invoked, value);

        let kind = self.atoms[id.0].kind.clone();
        match kind {
            AtomKind::Valued(_) => {
                let option = self.atoms[id.0].names.fetch_names();
                let atom = &mut self.atoms[id.0];
                if let AtomKind::Valued(valued) = &mut atom.kind {
                    valued.value.assign(value, &option)?;
                }
                atom.has_been_set = true;
            }
            AtomKind::Query(QueryKind::OptionNameHelp { .. }) => {
                self.print_option_name_help(value, out)?;
                self.session.help_found = true;
            }
            AtomKind::Query(QueryKind::FindString) => {
                self.print_find(value, out)?;
                self.session.help_found = true;
            }
            AtomKind::Control(ControlKind::IncludeOptionsFile) => {
                self.include_options_file(value, out)?;
            }
            _ => {
                return Err(OahError::ValueNotAllowed {
                    option: self.atoms[id.0].names.fetch_names(),
                    value: value.to_string(),
                });
            }
        }
        Ok(())
    }

    /// Apply the default of an optional-value atom used without a value.
    pub(crate) fn apply_default(
        &mut self,
        id: AtomId,
        invoked: &str,
        out: &mut dyn Write,
    ) -> Result<()> {
        self.store_default(id, invoked, out)?;
        self.record_option(invoked, "");
        Ok(())
    }

    fn store_default(&mut self, id: AtomId, invoked: &str, out: &mut dyn Write) -> Result<()> {
        let id = self.original_atom(id);
        self.trace(|| format!("option \"-{invoked}\" gets its default value"));

        let kind = self.atoms[id.0].kind.clone();
        match kind {
            AtomKind::Valued(_) => {
                let atom = &mut self.atoms[id.0];
                let applied = match &mut atom.kind {
                    AtomKind::Valued(valued) => valued.value.assign_default(),
                    _ => false,
                };
                if !applied {
                    return Err(OahError::MissingValue {
                        option: format!("-{invoked}"),
                    });
                }
                atom.has_been_set = true;
            }
            AtomKind::Query(QueryKind::OptionNameHelp { default_name }) => {
                self.print_option_name_help(&default_name, out)?;
                self.session.help_found = true;
            }
            _ => {
                return Err(OahError::MissingValue {
                    option: format!("-{invoked}"),
                });
            }
        }
        Ok(())
    }

    fn include_options_file(&mut self, path: &str, out: &mut dyn Write) -> Result<()> {
        if self.session.include_depth >= MAX_INCLUDE_DEPTH {
            return Err(OahError::IncludeDepthExceeded {
                path: path.to_string(),
                max: MAX_INCLUDE_DEPTH,
            });
        }

        let included = OptionsAndArguments::load(path)?;
        self.trace(|| {
            format!(
                "including \"{path}\": {} options, {} arguments",
                included.options.len(),
                included.arguments.len()
            )
        });

        self.session.include_depth += 1;
        let result = included
            .options
            .iter()
            .try_for_each(|option| self.handle_option_and_value(&option.name, &option.value, out));
        self.session.include_depth -= 1;
        result?;

        self.session.recorded.arguments.extend(included.arguments);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::atom::{AtomDef, AtomValue};
    use crate::group::ContainerDef;
    use crate::handler::{HandlerInfo, HelpUsage};

    fn handler(style: OptionalValuesStyle) -> Handler {
        let mut handler = Handler::new(HandlerInfo::new("prog", "test"));
        handler.set_optional_values_style(style);
        let group = handler
            .add_group(ContainerDef::new("Group", "g", "group", ""))
            .unwrap();
        let sub = handler
            .add_subgroup(group, ContainerDef::new("Sub", "sg", "subgroup", ""))
            .unwrap();
        for def in [
            AtomDef::boolean("", "beams", ""),
            AtomDef::false_boolean("", "no-slurs", ""),
            AtomDef::combined("", "cubase", "", &["beams", "no-slurs"]),
            AtomDef::string_with_default("", "title", "", "untitled"),
            AtomDef::option_name_help("onh", "option-name-help", ""),
            AtomDef::valued("", "scale", "", AtomValue::Rational(num_rational::Rational64::from_integer(1))),
        ] {
            handler.add_atom(sub, def).unwrap();
        }
        handler
    }

    fn run(handler: &mut Handler, args: &[&str]) -> (Result<HelpUsage>, String) {
        let mut argv = vec!["prog"];
        argv.extend_from_slice(args);
        let mut out = Vec::new();
        let result = handler.apply_options_and_arguments_from_argv(&argv, &mut out);
        (result, String::from_utf8_lossy(&out).into_owned())
    }

    #[test]
    fn combined_sets_every_member() {
        let mut handler = handler(OptionalValuesStyle::Oah);
        assert_eq!(handler.boolean("no-slurs"), Some(true));
        run(&mut handler, &["-cubase"]).0.unwrap();
        assert_eq!(handler.boolean("beams"), Some(true));
        assert_eq!(handler.boolean("no-slurs"), Some(false));
        assert!(handler.has_been_set("no-slurs"));
    }

    #[test]
    fn optional_value_consumes_next_token_in_oah_style() {
        let mut handler = handler(OptionalValuesStyle::Oah);
        run(&mut handler, &["-title", "Ode", "x.xml"]).0.unwrap();
        assert_eq!(handler.string("title"), Some("Ode"));
        assert_eq!(handler.arguments(), ["x.xml"]);
    }

    #[test]
    fn optional_value_defaults_in_gnu_style() {
        let mut handler = handler(OptionalValuesStyle::Gnu);
        run(&mut handler, &["-title", "Ode"]).0.unwrap();
        assert_eq!(handler.string("title"), Some("untitled"));
        assert_eq!(handler.arguments(), ["Ode"]);

        run(&mut handler, &["-title=Ode"]).0.unwrap();
        assert_eq!(handler.string("title"), Some("Ode"));
    }

    #[test]
    fn option_name_help_without_value_explains_itself() {
        let mut handler = handler(OptionalValuesStyle::Oah);
        let (result, out) = run(&mut handler, &["-onh"]);
        assert_eq!(result.unwrap(), HelpUsage::HelpOptionsHaveBeenUsed);
        assert!(out.contains("-onh, -option-name-help"));
    }

    #[test]
    fn option_name_help_takes_equals_value_in_gnu_style() {
        let mut gnu = handler(OptionalValuesStyle::Gnu);
        let (result, out) = run(&mut gnu, &["-onh=beams"]);
        assert_eq!(result.unwrap(), HelpUsage::HelpOptionsHaveBeenUsed);
        assert!(out.contains("boolean atom -beams"));

        let mut oah = handler(OptionalValuesStyle::Oah);
        assert!(matches!(
            run(&mut oah, &["-onh=beams"]).0,
            Err(OahError::EqualsNotUsable { .. })
        ));
    }

    #[test]
    fn rational_values_are_parsed() {
        let mut handler = handler(OptionalValuesStyle::Oah);
        run(&mut handler, &["-scale", " 3 / 4 "]).0.unwrap();
        assert_eq!(
            handler.value("scale"),
            Some(&AtomValue::Rational(num_rational::Rational64::new(3, 4)))
        );
        assert!(matches!(
            run(&mut handler, &["-scale", "3/0"]).0,
            Err(OahError::InvalidValue { .. })
        ));
    }

    #[test]
    fn recorded_options_list_values() {
        let mut handler = handler(OptionalValuesStyle::Oah);
        run(&mut handler, &["-beams", "-title", "Ode"]).0.unwrap();
        let recorded = handler.options_and_arguments();
        assert_eq!(recorded.options.len(), 2);
        assert_eq!(recorded.options[0].name, "beams");
        assert_eq!(recorded.options[1].name, "title");
        assert_eq!(recorded.options[1].value, "Ode");
    }
}
