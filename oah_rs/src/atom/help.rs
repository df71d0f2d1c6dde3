//! Pure-help and handler-control atom kinds.
//!
//! Help atoms print something and mark the run as a help run. Control atoms
//! change how the handler itself behaves for the rest of the run.

use crate::element::ValueExpected;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HelpKind {
    /// Full help of the handler.
    Usage,
    /// Groups and subgroups, without atoms.
    Summary,
    Version,
    About,
    Contact,
    DisplayPrefixes,
    DisplaySingleCharacterOptions,
}

/// Help atoms that need a value to know what to explain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryKind {
    /// Help for one element by name. The value is optional; without one
    /// the atom explains itself.
    OptionNameHelp { default_name: String },
    /// Case-insensitive search over names and descriptions.
    FindString,
}

impl QueryKind {
    pub fn value_expected(&self) -> ValueExpected {
        match self {
            QueryKind::OptionNameHelp { .. } => ValueExpected::Optional,
            QueryKind::FindString => ValueExpected::Yes,
        }
    }

    pub fn value_name(&self) -> &'static str {
        match self {
            QueryKind::OptionNameHelp { .. } => "OPTION_NAME",
            QueryKind::FindString => "STRING",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlKind {
    /// Log every dispatch decision.
    TraceOah,
    /// Print all atom values once the command line is processed.
    DisplayOptionsValues,
    /// Echo the recorded options and arguments once the command line is processed.
    ShowOptionsAndArguments,
    /// Read more options and arguments from a file.
    IncludeOptionsFile,
}

impl ControlKind {
    pub fn value_expected(self) -> ValueExpected {
        match self {
            ControlKind::IncludeOptionsFile => ValueExpected::Yes,
            _ => ValueExpected::No,
        }
    }
}
