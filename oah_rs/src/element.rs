//! Identity shared by every command-line addressable element.
//!
//! Handlers, groups, subgroups and atoms all carry an [`ElementNames`]:
//! a short name, a long name and a description. Names are typed by the user
//! with a single leading dash, whatever their length.

use std::fmt;

use serde::Serialize;

use crate::error::{OahError, Result};

/// Whether an element consumes a value token when activated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ValueExpected {
    Yes,
    No,
    Optional,
}

/// How much of an element the help system shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum Visibility {
    #[default]
    Whole,
    /// Only the header line; the contents are shown when the element
    /// itself is asked for.
    HeaderOnly,
    /// Never listed in help or summaries, still dispatchable by name.
    Hidden,
}

/// How values of optional-value atoms may be attached on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum OptionalValuesStyle {
    /// `-name=value` only; a following token is never consumed. Applies to
    /// string-with-default atoms and to option-name help.
    Gnu,
    /// `-name value` only; `=` is rejected.
    #[default]
    Oah,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GroupId(pub(crate) usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubGroupId(pub(crate) usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AtomId(pub(crate) usize);

/// Non-owning reference to any element of a handler's tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ElementRef {
    Handler,
    Group(GroupId),
    SubGroup(SubGroupId),
    Atom(AtomId),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementNames {
    pub short: String,
    pub long: String,
    pub description: String,
}

impl ElementNames {
    pub fn new(short: &str, long: &str, description: &str) -> Self {
        Self {
            short: short.to_string(),
            long: long.to_string(),
            description: description.to_string(),
        }
    }

    /// At least one name, and two distinct names when both are present.
    pub fn validate(&self) -> Result<()> {
        if self.short.is_empty() && self.long.is_empty() {
            return Err(OahError::EmptyNames {
                description: self.description.clone(),
            });
        }
        if self.short == self.long {
            return Err(OahError::SameShortAndLongName {
                name: self.short.clone(),
            });
        }
        Ok(())
    }

    /// The non-empty names, short first.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        [self.short.as_str(), self.long.as_str()]
            .into_iter()
            .filter(|name| !name.is_empty())
    }

    pub fn matches(&self, name: &str) -> bool {
        !name.is_empty() && (self.short == name || self.long == name)
    }

    /// Long name when there is one, short name otherwise.
    pub fn canonical(&self) -> &str {
        if self.long.is_empty() {
            &self.short
        } else {
            &self.long
        }
    }

    /// `-short, -long`, or whichever of the two exists.
    pub fn fetch_names(&self) -> String {
        self.names()
            .map(|name| format!("-{name}"))
            .collect::<Vec<_>>()
            .join(", ")
    }

    pub fn fetch_names_between_quotes(&self) -> String {
        format!("\"{}\"", self.fetch_names())
    }
}

impl fmt::Display for ElementNames {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.fetch_names())
    }
}
