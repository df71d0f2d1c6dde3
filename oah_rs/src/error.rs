//! Error taxonomy for option definition and option dispatch.
//!
//! Definition errors are programmer mistakes in a static option tree and are
//! caught while the tree is built or registered, before any user input is read.
//! User-input errors are raised by the dispatcher at the offending token.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, OahError>;

#[derive(Debug, Error)]
pub enum OahError {
    // ------------------------------------------------------------------
    // Definition errors
    // ------------------------------------------------------------------
    #[error("element with description \"{description}\" has neither a short nor a long name")]
    EmptyNames { description: String },

    #[error("element short name and long name are both \"{name}\"")]
    SameShortAndLongName { name: String },

    #[error("option name \"{name}\" is already used by {existing}")]
    DuplicateName { name: String, existing: String },

    #[error("prefix \"{name}\" is already registered")]
    DuplicatePrefix { name: String },

    #[error("prefix \"{name}\" used by {atom} has not been registered")]
    UnknownPrefixDefinition { name: String, atom: String },

    #[error("{atom} refers to \"{target}\", which is not a known atom")]
    UnresolvedReference { atom: String, target: String },

    #[error("{atom} can only group boolean atoms, \"{target}\" is not one")]
    NotABooleanAtom { atom: String, target: String },

    #[error("name \"{name}\" of {atom} does not start with prefix \"{prefix}\"")]
    MultiplexNameMismatch {
        name: String,
        atom: String,
        prefix: String,
    },

    // ------------------------------------------------------------------
    // User-input errors
    // ------------------------------------------------------------------
    #[error("option \"{name}\" is unknown{}", suggestion_suffix(.suggestion))]
    UnknownOption {
        name: String,
        suggestion: Option<String>,
    },

    #[error("option prefix \"{name}\" is unknown")]
    UnknownPrefix { name: String },

    #[error("prefix \"{name}\" needs at least one suffix after '='")]
    EmptyPrefixExpansion { name: String },

    #[error("value \"{value}\" for option {option} is ill-formed, expected {expected}")]
    InvalidValue {
        option: String,
        value: String,
        expected: String,
    },

    #[error("value \"{value}\" for option {option} is unknown, the {count} known values are: {known}")]
    UnknownChoice {
        option: String,
        value: String,
        count: usize,
        known: String,
    },

    #[error("option {option} does not take a value, got \"{value}\"")]
    ValueNotAllowed { option: String, value: String },

    #[error("option \"{name}\" is not usable with '='")]
    EqualsNotUsable { name: String },

    #[error("option {option} expects a value")]
    MissingValue { option: String },

    #[error("value \"{value}\" has already been supplied to option {option}")]
    DuplicateSetEntry { option: String, value: String },

    #[error("options file \"{path}\" is included more than {max} levels deep")]
    IncludeDepthExceeded { path: String, max: usize },

    #[error("inconsistent options in group {group}: {reason}")]
    Inconsistent { group: String, reason: String },

    // ------------------------------------------------------------------
    // Wrapped errors
    // ------------------------------------------------------------------
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("options file is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

fn suggestion_suffix(suggestion: &Option<String>) -> String {
    match suggestion {
        Some(name) => format!(", did you mean \"-{name}\"?"),
        None => String::new(),
    }
}

impl OahError {
    /// True for errors in the option tree itself rather than in user input.
    pub fn is_definition_error(&self) -> bool {
        matches!(
            self,
            OahError::EmptyNames { .. }
                | OahError::SameShortAndLongName { .. }
                | OahError::DuplicateName { .. }
                | OahError::DuplicatePrefix { .. }
                | OahError::UnknownPrefixDefinition { .. }
                | OahError::UnresolvedReference { .. }
                | OahError::NotABooleanAtom { .. }
                | OahError::MultiplexNameMismatch { .. }
        )
    }
}
