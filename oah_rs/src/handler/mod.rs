//! The handler: owner of an option tree and dispatcher of command lines.
//!
//! # Architecture
//!
//! ```text
//! Handler ── groups[] ── subgroups[] ── atoms[]      (arenas, owned)
//!    │            ▲            ▲            │
//!    │            └── ids ─────┴── uplinks ─┘
//!    ├── prefixes        name -> Prefix
//!    ├── registry        name -> ElementRef, single-character names, widths
//!    └── session         pending atom, arguments, usage multiset, warnings
//! ```
//!
//! The tree is built with [`Handler::add_group`], [`Handler::add_subgroup`],
//! [`Handler::add_atom`] and [`Handler::add_prefix`]. The registry is built
//! once by [`Handler::register`] (implicitly on the first parse) and dropped
//! again whenever the tree changes.
//!
//! # Module Structure
//!
//! - [`registry`] - registration pass and name lookup tables
//! - `dispatch` - token state machine and per-kind dispatch
//! - `activate` - what each atom kind does when activated or given a value

mod activate;
mod dispatch;
pub mod registry;

use std::collections::{BTreeMap, HashMap};

use serde::Serialize;

use crate::atom::{Atom, AtomDef, AtomDefKind, AtomKind, AtomValue, BooleanAtom, MultiplexAtom};
use crate::element::{
    AtomId, ElementNames, ElementRef, GroupId, OptionalValuesStyle, SubGroupId, Visibility,
};
use crate::error::{OahError, Result};
use crate::group::{ContainerDef, Group, SubGroup};
use crate::options_vector::OptionsAndArguments;
use crate::prefix::Prefix;

pub use registry::{Registry, Widths};

/// Outcome of a parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum HelpUsage {
    /// Help was printed; the caller should exit without running its pipeline.
    HelpOptionsHaveBeenUsed,
    HelpOptionsHaveNotBeenUsed,
}

/// Texts describing the program a handler belongs to.
#[derive(Debug, Clone)]
pub struct HandlerInfo {
    /// Names under which the handler's own full help is reachable.
    pub names: ElementNames,
    pub header: String,
    pub usage: String,
    pub version: String,
    pub about: String,
    pub contact: String,
}

impl HandlerInfo {
    pub fn new(program: &str, header: &str) -> Self {
        Self {
            names: ElementNames::new("", program, header),
            header: header.to_string(),
            usage: format!("Usage: {program} [option]* [file|-] [option]*"),
            version: format!("{program} {}", env!("CARGO_PKG_VERSION")),
            about: String::new(),
            contact: String::new(),
        }
    }

    pub fn program(&self) -> &str {
        self.names.canonical()
    }
}

#[derive(Debug, Clone)]
pub(crate) struct PendingValue {
    pub atom: AtomId,
    pub invoked: String,
}

/// Mutable state of one parse.
#[derive(Debug, Default)]
pub(crate) struct Session {
    pub pending: Option<PendingValue>,
    pub everything_is_an_argument: bool,
    pub help_found: bool,
    pub trace: bool,
    pub display_options_values: bool,
    pub show_options_and_arguments: bool,
    pub include_depth: usize,
    pub command_line_elements: Vec<ElementRef>,
    pub occurrences: HashMap<ElementRef, usize>,
    pub recorded: OptionsAndArguments,
    pub warnings: Vec<String>,
}

pub struct Handler {
    pub(crate) info: HandlerInfo,
    pub(crate) style: OptionalValuesStyle,
    pub(crate) groups: Vec<Group>,
    pub(crate) subgroups: Vec<SubGroup>,
    pub(crate) atoms: Vec<Atom>,
    pub(crate) prefixes: BTreeMap<String, Prefix>,
    pub(crate) registry: Option<Registry>,
    pub(crate) session: Session,
}

impl Handler {
    pub fn new(info: HandlerInfo) -> Self {
        Self {
            info,
            style: OptionalValuesStyle::default(),
            groups: Vec::new(),
            subgroups: Vec::new(),
            atoms: Vec::new(),
            prefixes: BTreeMap::new(),
            registry: None,
            session: Session::default(),
        }
    }

    pub fn info(&self) -> &HandlerInfo {
        &self.info
    }

    pub fn optional_values_style(&self) -> OptionalValuesStyle {
        self.style
    }

    pub fn set_optional_values_style(&mut self, style: OptionalValuesStyle) {
        self.style = style;
    }

    // ------------------------------------------------------------------
    // Tree construction
    // ------------------------------------------------------------------

    pub fn add_group(&mut self, def: ContainerDef) -> Result<GroupId> {
        def.names.validate()?;
        let id = GroupId(self.groups.len());
        self.groups.push(Group::from_def(def));
        self.registry = None;
        Ok(id)
    }

    pub fn add_subgroup(&mut self, group: GroupId, def: ContainerDef) -> Result<SubGroupId> {
        def.names.validate()?;
        let id = SubGroupId(self.subgroups.len());
        self.subgroups.push(SubGroup::from_def(def, group));
        self.groups[group.0].subgroups.push(id);
        self.registry = None;
        Ok(id)
    }

    pub fn add_prefix(&mut self, prefix: Prefix) -> Result<()> {
        if self.prefixes.contains_key(&prefix.name) {
            return Err(OahError::DuplicatePrefix { name: prefix.name });
        }
        tracing::debug!(prefix = %prefix.name, ersatz = %prefix.ersatz, "registering prefix");
        self.prefixes.insert(prefix.name.clone(), prefix);
        Ok(())
    }

    /// Append an atom to a subgroup, resolving the atoms it refers to.
    pub fn add_atom(&mut self, subgroup: SubGroupId, def: AtomDef) -> Result<AtomId> {
        def.names.validate()?;
        let names = def.names;
        let mut multiple_occurrences_allowed = def.multiple_occurrences_allowed;

        let kind = match def.kind {
            AtomDefKind::Boolean { stores } => AtomKind::Boolean(BooleanAtom {
                value: !stores,
                stores,
            }),
            AtomDefKind::Valued(valued) => {
                if matches!(
                    valued.value,
                    AtomValue::NaturalNumbersSet(_)
                        | AtomValue::StringSet(_)
                        | AtomValue::StringToIntMap(_)
                ) {
                    multiple_occurrences_allowed = true;
                }
                AtomKind::Valued(valued)
            }
            AtomDefKind::Combined { members } => {
                AtomKind::Combined(self.resolve_booleans(&names, &members)?)
            }
            AtomDefKind::Multiplex {
                short_prefix,
                long_prefix,
                short_suffix_descriptor,
                long_suffix_descriptor,
                members,
            } => {
                let multiplex = self.resolve_multiplex(
                    &names,
                    short_prefix,
                    long_prefix,
                    short_suffix_descriptor,
                    long_suffix_descriptor,
                    &members,
                )?;
                for member in &multiplex.members {
                    self.atoms[member.0].visibility = Visibility::Hidden;
                }
                AtomKind::Multiplex(multiplex)
            }
            AtomDefKind::Synonym { original } => {
                AtomKind::Synonym(self.resolve_reference(&names, &original)?)
            }
            AtomDefKind::Help(kind) => AtomKind::Help(kind),
            AtomDefKind::Query(kind) => AtomKind::Query(kind),
            AtomDefKind::Control(kind) => AtomKind::Control(kind),
        };

        let id = AtomId(self.atoms.len());
        self.atoms.push(Atom {
            names,
            visibility: def.visibility,
            multiple_occurrences_allowed,
            subgroup,
            kind,
            has_been_set: false,
        });
        self.subgroups[subgroup.0].atoms.push(id);
        self.registry = None;
        Ok(id)
    }

    /// Atom `target` names, following synonyms to the atom they stand for.
    fn resolve_reference(&self, names: &ElementNames, target: &str) -> Result<AtomId> {
        match self.fetch_element_in_tree(target) {
            Some(ElementRef::Atom(id)) => Ok(self.original_atom(id)),
            _ => Err(OahError::UnresolvedReference {
                atom: names.fetch_names(),
                target: target.to_string(),
            }),
        }
    }

    fn resolve_booleans(&self, names: &ElementNames, members: &[String]) -> Result<Vec<AtomId>> {
        members
            .iter()
            .map(|member| -> Result<AtomId> {
                let id = self.resolve_reference(names, member)?;
                match self.atoms[id.0].kind {
                    AtomKind::Boolean(_) => Ok(id),
                    _ => Err(OahError::NotABooleanAtom {
                        atom: names.fetch_names(),
                        target: member.clone(),
                    }),
                }
            })
            .collect()
    }

    fn resolve_multiplex(
        &self,
        names: &ElementNames,
        short_prefix: String,
        long_prefix: String,
        short_suffix_descriptor: String,
        long_suffix_descriptor: String,
        members: &[String],
    ) -> Result<MultiplexAtom> {
        let lookup_prefix = |name: &str| {
            self.prefixes
                .get(name)
                .ok_or_else(|| OahError::UnknownPrefixDefinition {
                    name: name.to_string(),
                    atom: names.fetch_names(),
                })
        };
        let short = lookup_prefix(&short_prefix)?;
        let long = lookup_prefix(&long_prefix)?;

        let ids = self.resolve_booleans(names, members)?;
        let mut short_suffixes = Vec::new();
        let mut long_suffixes = Vec::new();
        for id in &ids {
            let member = &self.atoms[id.0].names;
            for (name, prefix, suffixes) in [
                (&member.short, short, &mut short_suffixes),
                (&member.long, long, &mut long_suffixes),
            ] {
                if name.is_empty() {
                    continue;
                }
                let suffix = prefix
                    .suffix_of(name)
                    .ok_or_else(|| OahError::MultiplexNameMismatch {
                        name: name.clone(),
                        atom: names.fetch_names(),
                        prefix: prefix.ersatz.clone(),
                    })?;
                suffixes.push(suffix.to_string());
            }
        }

        Ok(MultiplexAtom {
            short_prefix,
            long_prefix,
            short_suffix_descriptor,
            long_suffix_descriptor,
            members: ids,
            short_suffixes,
            long_suffixes,
        })
    }

    // ------------------------------------------------------------------
    // Registration
    // ------------------------------------------------------------------

    /// Build the lookup tables. Fails on the first definition error.
    pub fn register(&mut self) -> Result<()> {
        let registry = Registry::build(self)?;
        tracing::debug!(
            elements = registry.len(),
            single_characters = registry.single_character_names().len(),
            "handler registered"
        );
        self.registry = Some(registry);
        Ok(())
    }

    pub(crate) fn ensure_registered(&mut self) -> Result<()> {
        if self.registry.is_none() {
            self.register()?;
        }
        Ok(())
    }

    pub fn registry(&self) -> Option<&Registry> {
        self.registry.as_ref()
    }

    // ------------------------------------------------------------------
    // Lookup
    // ------------------------------------------------------------------

    /// Depth-first search of the tree: handler, then each group, its
    /// subgroups and their atoms, in insertion order.
    pub fn fetch_element_in_tree(&self, name: &str) -> Option<ElementRef> {
        if self.info.names.matches(name) {
            return Some(ElementRef::Handler);
        }
        for (group_index, group) in self.groups.iter().enumerate() {
            if group.names.matches(name) {
                return Some(ElementRef::Group(GroupId(group_index)));
            }
            for subgroup_id in &group.subgroups {
                let subgroup = &self.subgroups[subgroup_id.0];
                if subgroup.names.matches(name) {
                    return Some(ElementRef::SubGroup(*subgroup_id));
                }
                for atom_id in &subgroup.atoms {
                    if self.atoms[atom_id.0].names.matches(name) {
                        return Some(ElementRef::Atom(*atom_id));
                    }
                }
            }
        }
        None
    }

    /// Registry lookup when registered, tree search otherwise.
    pub fn fetch_element_by_name(&self, name: &str) -> Option<ElementRef> {
        match &self.registry {
            Some(registry) => registry.lookup(name),
            None => self.fetch_element_in_tree(name),
        }
    }

    pub fn fetch_atom_by_name(&self, name: &str) -> Option<AtomId> {
        match self.fetch_element_by_name(name) {
            Some(ElementRef::Atom(id)) => Some(id),
            _ => None,
        }
    }

    /// Follow synonyms to the atom that holds the behavior.
    pub fn original_atom(&self, mut id: AtomId) -> AtomId {
        while let AtomKind::Synonym(original) = self.atoms[id.0].kind {
            id = original;
        }
        id
    }

    pub fn element_names(&self, element: ElementRef) -> &ElementNames {
        match element {
            ElementRef::Handler => &self.info.names,
            ElementRef::Group(id) => &self.groups[id.0].names,
            ElementRef::SubGroup(id) => &self.subgroups[id.0].names,
            ElementRef::Atom(id) => &self.atoms[id.0].names,
        }
    }

    pub(crate) fn describe_element(&self, element: ElementRef) -> String {
        let kind = match element {
            ElementRef::Handler => "handler",
            ElementRef::Group(_) => "group",
            ElementRef::SubGroup(_) => "subgroup",
            ElementRef::Atom(id) => self.atoms[id.0].kind.kind_name(),
        };
        format!("{kind} {}", self.element_names(element).fetch_names())
    }

    pub fn group(&self, id: GroupId) -> &Group {
        &self.groups[id.0]
    }

    pub fn subgroup(&self, id: SubGroupId) -> &SubGroup {
        &self.subgroups[id.0]
    }

    pub fn atom(&self, id: AtomId) -> &Atom {
        &self.atoms[id.0]
    }

    pub fn group_ids(&self) -> impl Iterator<Item = GroupId> {
        (0..self.groups.len()).map(GroupId)
    }

    pub fn subgroup_ids(&self) -> impl Iterator<Item = SubGroupId> {
        (0..self.subgroups.len()).map(SubGroupId)
    }

    pub fn prefixes(&self) -> impl Iterator<Item = &Prefix> {
        self.prefixes.values()
    }

    // ------------------------------------------------------------------
    // Values
    // ------------------------------------------------------------------

    fn stored_atom(&self, name: &str) -> Option<&Atom> {
        self.fetch_atom_by_name(name)
            .map(|id| &self.atoms[self.original_atom(id).0])
    }

    pub fn value(&self, name: &str) -> Option<&AtomValue> {
        match &self.stored_atom(name)?.kind {
            AtomKind::Valued(valued) => Some(&valued.value),
            _ => None,
        }
    }

    pub fn boolean(&self, name: &str) -> Option<bool> {
        match &self.stored_atom(name)?.kind {
            AtomKind::Boolean(boolean) => Some(boolean.value),
            _ => None,
        }
    }

    pub fn integer(&self, name: &str) -> Option<i64> {
        match self.value(name)? {
            AtomValue::Integer(value) => Some(*value),
            _ => None,
        }
    }

    pub fn float(&self, name: &str) -> Option<f64> {
        match self.value(name)? {
            AtomValue::Float(value) => Some(*value),
            _ => None,
        }
    }

    pub fn string(&self, name: &str) -> Option<&str> {
        match self.value(name)? {
            AtomValue::String(value) | AtomValue::StringWithDefault { value, .. } => Some(value),
            AtomValue::Choice { selected, .. } => Some(selected),
            _ => None,
        }
    }

    pub fn has_been_set(&self, name: &str) -> bool {
        self.stored_atom(name).is_some_and(|atom| atom.has_been_set)
    }

    // ------------------------------------------------------------------
    // Session results
    // ------------------------------------------------------------------

    pub fn arguments(&self) -> &[String] {
        &self.session.recorded.arguments
    }

    pub fn warnings(&self) -> &[String] {
        &self.session.warnings
    }

    pub fn help_found(&self) -> bool {
        self.session.help_found
    }

    /// Elements in invocation order.
    pub fn command_line_elements(&self) -> &[ElementRef] {
        &self.session.command_line_elements
    }

    pub fn options_and_arguments(&self) -> &OptionsAndArguments {
        &self.session.recorded
    }

    pub fn trace_oah(&self) -> bool {
        self.session.trace
    }
}
