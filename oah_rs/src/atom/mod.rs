//! Atoms: the leaf options that do something when activated.
//!
//! Atoms are described with an [`AtomDef`] and appended to a subgroup with
//! [`Handler::add_atom`](crate::Handler::add_atom). Appending resolves name
//! references (synonyms, combined and multiplex atoms) against the atoms
//! already in the tree and turns the definition into a stored [`Atom`].

pub mod help;
pub mod valued;

use crate::element::{AtomId, ElementNames, SubGroupId, ValueExpected, Visibility};

pub use help::{ControlKind, HelpKind, QueryKind};
pub use valued::{AtomValue, ValuedAtom};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BooleanAtom {
    pub value: bool,
    /// What activation stores: `true` for ordinary flags, `false` for
    /// `-no-...` style atoms.
    pub stores: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MultiplexAtom {
    pub short_prefix: String,
    pub long_prefix: String,
    pub short_suffix_descriptor: String,
    pub long_suffix_descriptor: String,
    pub members: Vec<AtomId>,
    pub short_suffixes: Vec<String>,
    pub long_suffixes: Vec<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum AtomKind {
    Boolean(BooleanAtom),
    Valued(ValuedAtom),
    /// Activates every member boolean atom.
    Combined(Vec<AtomId>),
    Multiplex(MultiplexAtom),
    /// Forwards everything to the original atom.
    Synonym(AtomId),
    Help(HelpKind),
    Query(QueryKind),
    Control(ControlKind),
}

impl AtomKind {
    pub fn value_expected(&self) -> ValueExpected {
        match self {
            AtomKind::Valued(valued) => valued.value.value_expected(),
            AtomKind::Query(query) => query.value_expected(),
            AtomKind::Control(control) => control.value_expected(),
            AtomKind::Boolean(_)
            | AtomKind::Combined(_)
            | AtomKind::Multiplex(_)
            | AtomKind::Synonym(_)
            | AtomKind::Help(_) => ValueExpected::No,
        }
    }

    pub fn is_help(&self) -> bool {
        matches!(self, AtomKind::Help(_) | AtomKind::Query(_))
    }

    pub fn kind_name(&self) -> &'static str {
        match self {
            AtomKind::Boolean(_) => "boolean atom",
            AtomKind::Valued(_) => "valued atom",
            AtomKind::Combined(_) => "combined booleans atom",
            AtomKind::Multiplex(_) => "multiplex booleans atom",
            AtomKind::Synonym(_) => "atom synonym",
            AtomKind::Help(_) => "help atom",
            AtomKind::Query(_) => "query help atom",
            AtomKind::Control(_) => "control atom",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Atom {
    pub names: ElementNames,
    pub visibility: Visibility,
    pub multiple_occurrences_allowed: bool,
    pub subgroup: SubGroupId,
    pub kind: AtomKind,
    /// Diagnostics only: the value was set from the command line.
    pub has_been_set: bool,
}

impl Atom {
    pub fn value_expected(&self) -> ValueExpected {
        self.kind.value_expected()
    }

    /// Text after the names in help output, e.g. `NUMBER`.
    pub fn value_name(&self) -> Option<&str> {
        match &self.kind {
            AtomKind::Valued(valued) => Some(&valued.value_name),
            AtomKind::Query(query) => Some(query.value_name()),
            AtomKind::Control(ControlKind::IncludeOptionsFile) => Some("FILE"),
            _ => None,
        }
    }
}

/// Unresolved kind of an atom definition.
#[derive(Debug, Clone, PartialEq)]
pub enum AtomDefKind {
    Boolean { stores: bool },
    Valued(ValuedAtom),
    Combined { members: Vec<String> },
    Multiplex {
        short_prefix: String,
        long_prefix: String,
        short_suffix_descriptor: String,
        long_suffix_descriptor: String,
        members: Vec<String>,
    },
    Synonym { original: String },
    Help(HelpKind),
    Query(QueryKind),
    Control(ControlKind),
}

/// Definition of an atom, before it is appended to a subgroup.
#[derive(Debug, Clone, PartialEq)]
pub struct AtomDef {
    pub names: ElementNames,
    pub visibility: Visibility,
    pub multiple_occurrences_allowed: bool,
    pub kind: AtomDefKind,
}

impl AtomDef {
    fn new(short: &str, long: &str, description: &str, kind: AtomDefKind) -> Self {
        Self {
            names: ElementNames::new(short, long, description),
            visibility: Visibility::Whole,
            multiple_occurrences_allowed: false,
            kind,
        }
    }

    pub fn boolean(short: &str, long: &str, description: &str) -> Self {
        Self::new(short, long, description, AtomDefKind::Boolean { stores: true })
    }

    /// A boolean atom whose activation stores `false`.
    pub fn false_boolean(short: &str, long: &str, description: &str) -> Self {
        Self::new(short, long, description, AtomDefKind::Boolean { stores: false })
    }

    pub fn valued(short: &str, long: &str, description: &str, value: AtomValue) -> Self {
        Self::new(
            short,
            long,
            description,
            AtomDefKind::Valued(ValuedAtom::new(value)),
        )
    }

    pub fn integer(short: &str, long: &str, description: &str, initial: i64) -> Self {
        Self::valued(short, long, description, AtomValue::Integer(initial))
    }

    pub fn float(short: &str, long: &str, description: &str, initial: f64) -> Self {
        Self::valued(short, long, description, AtomValue::Float(initial))
    }

    pub fn string(short: &str, long: &str, description: &str, initial: &str) -> Self {
        Self::valued(short, long, description, AtomValue::String(initial.to_string()))
    }

    /// A string atom whose value may be omitted, in which case `default` is stored.
    pub fn string_with_default(short: &str, long: &str, description: &str, default: &str) -> Self {
        Self::valued(
            short,
            long,
            description,
            AtomValue::StringWithDefault {
                value: String::new(),
                default: default.to_string(),
            },
        )
    }

    pub fn choice(
        short: &str,
        long: &str,
        description: &str,
        choices: &'static [&'static str],
        initial: &str,
    ) -> Self {
        Self::valued(
            short,
            long,
            description,
            AtomValue::Choice {
                selected: initial.to_string(),
                choices,
            },
        )
    }

    pub fn combined(short: &str, long: &str, description: &str, members: &[&str]) -> Self {
        Self::new(
            short,
            long,
            description,
            AtomDefKind::Combined {
                members: members.iter().map(|m| m.to_string()).collect(),
            },
        )
    }

    /// A multiplex atom over boolean atoms reachable through a short and a
    /// long prefix. Its own names are synthetic and only shown in help.
    pub fn multiplex(
        description: &str,
        short_prefix: &str,
        long_prefix: &str,
        short_suffix_descriptor: &str,
        long_suffix_descriptor: &str,
        members: &[&str],
    ) -> Self {
        Self::new(
            &format!("{short_prefix}=<{short_suffix_descriptor}>"),
            &format!("{long_prefix}=<{long_suffix_descriptor}>"),
            description,
            AtomDefKind::Multiplex {
                short_prefix: short_prefix.to_string(),
                long_prefix: long_prefix.to_string(),
                short_suffix_descriptor: short_suffix_descriptor.to_string(),
                long_suffix_descriptor: long_suffix_descriptor.to_string(),
                members: members.iter().map(|m| m.to_string()).collect(),
            },
        )
    }

    pub fn synonym(short: &str, long: &str, description: &str, original: &str) -> Self {
        Self::new(
            short,
            long,
            description,
            AtomDefKind::Synonym {
                original: original.to_string(),
            },
        )
    }

    pub fn help(short: &str, long: &str, description: &str, kind: HelpKind) -> Self {
        Self::new(short, long, description, AtomDefKind::Help(kind))
    }

    pub fn option_name_help(short: &str, long: &str, description: &str) -> Self {
        let default_name = if long.is_empty() { short } else { long };
        Self::new(
            short,
            long,
            description,
            AtomDefKind::Query(QueryKind::OptionNameHelp {
                default_name: default_name.to_string(),
            }),
        )
    }

    pub fn find_string(short: &str, long: &str, description: &str) -> Self {
        Self::new(short, long, description, AtomDefKind::Query(QueryKind::FindString))
    }

    pub fn control(short: &str, long: &str, description: &str, kind: ControlKind) -> Self {
        Self::new(short, long, description, AtomDefKind::Control(kind))
    }

    pub fn with_value_name(mut self, value_name: &str) -> Self {
        if let AtomDefKind::Valued(valued) = &mut self.kind {
            valued.value_name = value_name.to_string();
        }
        self
    }

    pub fn with_visibility(mut self, visibility: Visibility) -> Self {
        self.visibility = visibility;
        self
    }

    pub fn multiple_occurrences_allowed(mut self) -> Self {
        self.multiple_occurrences_allowed = true;
        self
    }
}
