//! Parse the command line with a standard handler, then report the resolved
//! settings as JSON on stdout.
//!
//! Help runs print their help and exit successfully without a report.
//! Option errors are printed as `error: <message>` and exit with status 1.

use std::ffi::OsString;
use std::io::{self, Write};

use anyhow::Context;
use serde_json::{Value, json};

use crate::handler::{Handler, HelpUsage};

/// Options controlling binary-specific behavior.
pub struct EntryOptions {
    /// Program name, also the handler's own help name.
    pub binary_name: &'static str,
    /// Builds and registers the handler with the groups of this binary.
    pub build_handler: fn() -> crate::Result<Handler>,
    /// Settings of this binary's groups, read once the command line is handled.
    pub settings: fn(&Handler) -> Value,
}

/// Run the CLI with the given options. This is the shared main() body.
pub fn run(opts: &EntryOptions) -> anyhow::Result<()> {
    super::init_tracing();

    let mut handler = match (opts.build_handler)() {
        Ok(handler) => handler,
        Err(err) => {
            // broken option tree, not a user mistake
            eprintln!("{}: internal error: {err}", opts.binary_name);
            std::process::exit(2);
        }
    };

    let mut argv = match utf8_arguments(std::env::args_os()) {
        Ok(argv) => argv,
        Err(argument) => {
            eprintln!("error: argument \"{}\" is not valid UTF-8", argument.to_string_lossy());
            std::process::exit(1);
        }
    };
    if argv.is_empty() {
        argv.push(opts.binary_name.to_string());
    }

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let usage = match handler.apply_options_and_arguments_from_argv(&argv, &mut out) {
        Ok(usage) => usage,
        Err(err) => {
            out.flush().ok();
            eprintln!("error: {err}");
            std::process::exit(1);
        }
    };

    if usage == HelpUsage::HelpOptionsHaveBeenUsed {
        out.flush()?;
        return Ok(());
    }

    let report = json!({
        "program": opts.binary_name,
        "settings": (opts.settings)(&handler),
        "arguments": handler.arguments(),
        "warnings": handler.warnings(),
    });
    let rendered = serde_json::to_string_pretty(&report).context("rendering the settings report")?;
    writeln!(out, "{rendered}")?;
    out.flush()?;
    Ok(())
}

/// Arguments as strings, or the first one that is not UTF-8.
fn utf8_arguments(args: impl IntoIterator<Item = OsString>) -> Result<Vec<String>, OsString> {
    args.into_iter().map(OsString::into_string).collect()
}
