//! Token state machine turning a command line into element activations.
//!
//! Per token, in order:
//! 1. after `--`, everything is an argument;
//! 2. `-` alone is the stdin placeholder, an argument;
//! 3. a `-`-prefixed token is deciphered: `name=value` (prefix or
//!    optional-value atom), known element, single-character cluster;
//! 4. anything else is the value of the pending atom, or an argument.
//!
//! A pending atom is resolved with its default (optional values) or rejected
//! (required values) when the next option or the end of input arrives.

use std::io::Write;

use crate::atom::AtomKind;
use crate::element::{AtomId, ElementRef, OptionalValuesStyle, ValueExpected};
use crate::error::{OahError, Result};
use crate::options_vector::OptionAndValue;

use super::activate::Activation;
use super::{Handler, HelpUsage, PendingValue, Session};

/// Cap for nested `-include` files.
pub(crate) const MAX_INCLUDE_DEPTH: usize = 8;

impl Handler {
    /// Parse `argv`, whose first item is the program name.
    pub fn apply_options_and_arguments_from_argv<S: AsRef<str>>(
        &mut self,
        argv: &[S],
        out: &mut dyn Write,
    ) -> Result<HelpUsage> {
        self.begin_run()?;
        for token in argv.iter().skip(1) {
            self.handle_token(token.as_ref(), out)?;
        }
        self.finish_run(out)
    }

    /// Parse `(name, value)` pairs and free arguments, bypassing tokenization.
    /// Names may be given with or without their leading dash.
    pub fn apply_options_vector(
        &mut self,
        options: &[(String, String)],
        arguments: &[String],
        out: &mut dyn Write,
    ) -> Result<HelpUsage> {
        self.begin_run()?;
        for (name, value) in options {
            self.handle_option_and_value(name, value, out)?;
        }
        for argument in arguments {
            self.push_argument(argument);
        }
        self.finish_run(out)
    }

    fn begin_run(&mut self) -> Result<()> {
        self.ensure_registered()?;
        self.session = Session::default();
        for group in &mut self.groups {
            group.chosen_atoms = 0;
        }
        for subgroup in &mut self.subgroups {
            subgroup.chosen_atoms = 0;
        }
        Ok(())
    }

    fn finish_run(&mut self, out: &mut dyn Write) -> Result<HelpUsage> {
        self.resolve_pending(out)?;

        if self.session.help_found {
            tracing::debug!("help options have been used, skipping consistency checks");
            return Ok(HelpUsage::HelpOptionsHaveBeenUsed);
        }

        self.check_groups_consistency()?;

        if self.session.display_options_values {
            self.print_options_values(out)?;
        }
        if self.session.show_options_and_arguments {
            self.print_options_and_arguments(out)?;
        }
        Ok(HelpUsage::HelpOptionsHaveNotBeenUsed)
    }

    fn check_groups_consistency(&self) -> Result<()> {
        for group in &self.groups {
            if let Some(check) = group.consistency_check {
                check(self).map_err(|reason| OahError::Inconsistent {
                    group: group.names.fetch_names(),
                    reason,
                })?;
            }
        }
        Ok(())
    }

    pub(crate) fn trace(&self, message: impl FnOnce() -> String) {
        if self.session.trace {
            tracing::info!(target: "oah", "{}", message());
        } else {
            tracing::trace!(target: "oah", "{}", message());
        }
    }

    fn push_argument(&mut self, argument: &str) {
        self.trace(|| format!("argument \"{argument}\""));
        self.session.recorded.arguments.push(argument.to_string());
    }

    // ------------------------------------------------------------------
    // Tokens
    // ------------------------------------------------------------------

    fn handle_token(&mut self, token: &str, out: &mut dyn Write) -> Result<()> {
        if self.session.everything_is_an_argument {
            self.push_argument(token);
            return Ok(());
        }

        if token == "-" {
            self.push_argument(token);
            return Ok(());
        }

        if let Some(rest) = token.strip_prefix('-') {
            if rest == "-" {
                self.resolve_pending(out)?;
                self.trace(|| "'--' seen, now everything is an argument".to_string());
                self.session.everything_is_an_argument = true;
                return Ok(());
            }
            let name = rest.strip_prefix('-').unwrap_or(rest);
            return self.decipher_option(name, token, out);
        }

        match self.session.pending.take() {
            Some(pending) => self.apply_value(pending.atom, &pending.invoked, token, out),
            None => {
                self.push_argument(token);
                Ok(())
            }
        }
    }

    /// `name` is the option name without its dashes, `token` what was typed.
    fn decipher_option(&mut self, name: &str, token: &str, out: &mut dyn Write) -> Result<()> {
        self.resolve_pending(out)?;
        self.trace(|| format!("deciphering option \"{name}\""));

        if let Some(position) = name.find('=') {
            return self.handle_name_and_equals_value(&name[..position], &name[position + 1..], out);
        }

        if let Some(element) = self.lookup(name) {
            return self.handle_known_element(element, name, out);
        }

        let cluster = self.registry.as_ref().and_then(|registry| registry.cluster(name));
        if let Some(chars) = cluster {
            self.trace(|| format!("\"{name}\" is a cluster of single-character options"));
            for single in chars {
                let single = single.to_string();
                self.resolve_pending(out)?;
                if let Some(element) = self.lookup(&single) {
                    self.handle_known_element(element, &single, out)?;
                }
            }
            return Ok(());
        }

        if name == "insider" {
            self.push_argument(token);
            return Ok(());
        }

        Err(self.unknown_option(name))
    }

    fn lookup(&self, name: &str) -> Option<ElementRef> {
        self.registry.as_ref().and_then(|registry| registry.lookup(name))
    }

    fn unknown_option(&self, name: &str) -> OahError {
        let suggestion = self.registry.as_ref().and_then(|registry| {
            registry
                .names()
                .into_iter()
                .filter(|known| !known.contains('='))
                .map(|known| (strsim::levenshtein(name, known), known))
                .filter(|(distance, _)| *distance <= 2)
                .min()
                .map(|(_, known)| known.to_string())
        });
        OahError::UnknownOption {
            name: name.to_string(),
            suggestion,
        }
    }

    /// `-left=right`: prefix expansion first, then optional-value atoms.
    fn handle_name_and_equals_value(
        &mut self,
        left: &str,
        right: &str,
        out: &mut dyn Write,
    ) -> Result<()> {
        if let Some(prefix) = self.prefixes.get(left).cloned() {
            let expanded = prefix.expand(right);
            if expanded.is_empty() {
                return Err(OahError::EmptyPrefixExpansion {
                    name: left.to_string(),
                });
            }
            self.trace(|| format!("prefix \"{left}\" expands to {expanded:?}"));
            for name in expanded {
                self.decipher_option(&name, &format!("-{name}"), out)?;
            }
            return Ok(());
        }

        match self.lookup(left) {
            Some(ElementRef::Atom(id)) => {
                let original = self.original_atom(id);
                let optional = self.atoms[original.0].value_expected() == ValueExpected::Optional;
                if optional && self.style == OptionalValuesStyle::Gnu {
                    self.handle_atom_name_and_value(id, left, right, out)
                } else {
                    Err(OahError::EqualsNotUsable {
                        name: left.to_string(),
                    })
                }
            }
            Some(_) => Err(OahError::EqualsNotUsable {
                name: left.to_string(),
            }),
            None => Err(OahError::UnknownPrefix {
                name: left.to_string(),
            }),
        }
    }

    /// One entry of an options vector or of an included options file.
    pub(crate) fn handle_option_and_value(
        &mut self,
        name: &str,
        value: &str,
        out: &mut dyn Write,
    ) -> Result<()> {
        self.resolve_pending(out)?;
        let name = name.trim_start_matches('-');

        if let Some(position) = name.find('=') {
            if !value.is_empty() {
                return Err(OahError::ValueNotAllowed {
                    option: format!("-{name}"),
                    value: value.to_string(),
                });
            }
            return self.handle_name_and_equals_value(&name[..position], &name[position + 1..], out);
        }

        match self.lookup(name) {
            Some(ElementRef::Atom(id)) => self.handle_atom_name_and_value(id, name, value, out),
            Some(element) => {
                if !value.is_empty() {
                    return Err(OahError::ValueNotAllowed {
                        option: self.element_names(element).fetch_names(),
                        value: value.to_string(),
                    });
                }
                self.handle_known_element(element, name, out)
            }
            None => match self.prefixes.get(name).cloned() {
                Some(prefix) if !value.is_empty() => {
                    for expanded in prefix.expand(value) {
                        self.handle_option_and_value(&expanded, "", out)?;
                    }
                    Ok(())
                }
                _ => Err(self.unknown_option(name)),
            },
        }
    }

    // ------------------------------------------------------------------
    // Elements
    // ------------------------------------------------------------------

    fn handle_known_element(
        &mut self,
        element: ElementRef,
        name: &str,
        out: &mut dyn Write,
    ) -> Result<()> {
        match element {
            ElementRef::Handler => {
                self.register_usage(element, name);
                self.print_help(out)?;
                self.session.help_found = true;
            }
            ElementRef::Group(id) => {
                self.register_usage(element, name);
                self.print_group_help(id, out)?;
                self.session.help_found = true;
            }
            ElementRef::SubGroup(id) => {
                self.register_usage(element, name);
                self.print_subgroup_help(id, true, out)?;
                self.session.help_found = true;
            }
            ElementRef::Atom(id) => self.handle_atom_name(id, name, out)?,
        }
        Ok(())
    }

    fn handle_atom_name(&mut self, id: AtomId, invoked: &str, out: &mut dyn Write) -> Result<()> {
        if let AtomKind::Synonym(original) = self.atoms[id.0].kind {
            return self.handle_atom_name(original, invoked, out);
        }

        self.register_usage(ElementRef::Atom(id), invoked);
        match self.activate(id, invoked, out)? {
            Activation::Done => self.record_option(invoked, ""),
            Activation::NeedsValue => {
                self.trace(|| format!("option \"{invoked}\" is waiting for its value"));
                self.session.pending = Some(PendingValue {
                    atom: id,
                    invoked: invoked.to_string(),
                });
            }
        }
        Ok(())
    }

    fn handle_atom_name_and_value(
        &mut self,
        id: AtomId,
        invoked: &str,
        value: &str,
        out: &mut dyn Write,
    ) -> Result<()> {
        if let AtomKind::Synonym(original) = self.atoms[id.0].kind {
            return self.handle_atom_name_and_value(original, invoked, value, out);
        }

        self.register_usage(ElementRef::Atom(id), invoked);
        match self.atoms[id.0].value_expected() {
            ValueExpected::No => {
                if !value.is_empty() {
                    return Err(OahError::ValueNotAllowed {
                        option: format!("-{invoked}"),
                        value: value.to_string(),
                    });
                }
                self.activate(id, invoked, out)?;
                self.record_option(invoked, "");
                Ok(())
            }
            ValueExpected::Yes if value.is_empty() => Err(OahError::MissingValue {
                option: format!("-{invoked}"),
            }),
            ValueExpected::Optional if value.is_empty() => self.apply_default(id, invoked, out),
            ValueExpected::Yes | ValueExpected::Optional => {
                self.apply_value(id, invoked, value, out)
            }
        }
    }

    /// Settle a pending atom before the next option or at end of input.
    fn resolve_pending(&mut self, out: &mut dyn Write) -> Result<()> {
        let Some(pending) = self.session.pending.take() else {
            return Ok(());
        };
        match self.atoms[pending.atom.0].value_expected() {
            ValueExpected::Optional => self.apply_default(pending.atom, &pending.invoked, out),
            _ => Err(OahError::MissingValue {
                option: format!("-{}", pending.invoked),
            }),
        }
    }

    /// Count an occurrence, warning on repeats that are not allowed.
    fn register_usage(&mut self, element: ElementRef, invoked: &str) {
        let count = {
            let count = self.session.occurrences.entry(element).or_insert(0);
            *count += 1;
            *count
        };
        self.session.command_line_elements.push(element);

        let multiple_allowed = match element {
            ElementRef::Atom(id) => self.atoms[id.0].multiple_occurrences_allowed,
            _ => false,
        };
        if count > 1 && !multiple_allowed {
            let warning = format!(
                "option {} has been used {count} times, only the last occurrence \"-{invoked}\" is relevant",
                self.element_names(element).fetch_names(),
            );
            tracing::warn!("{warning}");
            self.session.warnings.push(warning);
        }

        if let ElementRef::Atom(id) = element {
            let subgroup = self.atoms[id.0].subgroup;
            self.subgroups[subgroup.0].chosen_atoms += 1;
            let group = self.subgroups[subgroup.0].group;
            self.groups[group.0].chosen_atoms += 1;
        }
    }

    pub(crate) fn record_option(&mut self, name: &str, value: &str) {
        self.session.recorded.options.push(OptionAndValue::new(name, value));
    }
}
