//! # oah
//!
//! **Options and arguments handling** for the music notation translators
//! (`xml2ly`, `xml2brl`): a self-describing tree of command-line options.
//!
//! Options live in a hierarchy handler → groups → subgroups → atoms. Every
//! element is addressable by a short and a long name, typed with one leading
//! dash. On top of plain flags and values the handler supports:
//!
//! - **Prefixes** - `-t=notes,parts` expands to `-tnotes -tparts`
//! - **Clusters** - `-vac` stands for `-v -a -c` when all three exist
//! - **Synonyms, combined and multiplex atoms** - one name, many effects
//! - **Typed values** - integers, rationals, sets, maps, lengths, colors, MIDI tempi
//! - **Introspection** - help for any element by name, search, summaries
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use oah::{AtomDef, ContainerDef, Handler, HandlerInfo, HelpUsage};
//!
//! let mut handler = Handler::new(HandlerInfo::new("prog", "prog does things"));
//! let group = handler.add_group(ContainerDef::new("Main", "", "main-group", ""))?;
//! let sub = handler.add_subgroup(group, ContainerDef::new("Basics", "", "basics", ""))?;
//! handler.add_atom(sub, AtomDef::boolean("v", "verbose", "Be verbose."))?;
//! handler.add_atom(sub, AtomDef::integer("n", "number", "How many.", 1))?;
//!
//! let argv = ["prog", "-v", "-n", "3", "score.xml"];
//! let usage = handler.apply_options_and_arguments_from_argv(&argv, &mut std::io::stdout())?;
//! if usage == HelpUsage::HelpOptionsHaveNotBeenUsed {
//!     assert_eq!(handler.integer("number"), Some(3));
//!     assert_eq!(handler.arguments(), ["score.xml"]);
//! }
//! # Ok::<(), oah::OahError>(())
//! ```

// ============================================================================
// Option tree
// ============================================================================

pub mod atom;
pub mod element;
pub mod group;
pub mod prefix;

// ============================================================================
// Values
// ============================================================================

/// Value grammars shared by the valued atoms.
pub mod grammar;
pub mod values;

// ============================================================================
// Handling
// ============================================================================

pub mod error;
/// Arena owner, registration, dispatch state machine.
///
/// # Submodules
///
/// - [`handler::registry`] - name lookup tables and help column widths
pub mod handler;
/// Help and introspection renderers, all `impl Handler`.
pub mod help;
pub mod options_vector;

// ============================================================================
// Translators
// ============================================================================

/// Standard groups: `oah`, `msr`, `lpsr`, `bsr`.
pub mod groups;
pub mod settings;
/// Shared `main()` of the binaries.
pub mod cli;

pub use atom::{Atom, AtomDef, AtomKind, AtomValue, ControlKind, HelpKind, QueryKind};
pub use element::{
    AtomId, ElementNames, ElementRef, GroupId, OptionalValuesStyle, SubGroupId, ValueExpected,
    Visibility,
};
pub use error::{OahError, Result};
pub use group::{ContainerDef, Group, SubGroup};
pub use handler::{Handler, HandlerInfo, HelpUsage};
pub use options_vector::{OptionAndValue, OptionsAndArguments};
pub use prefix::Prefix;
