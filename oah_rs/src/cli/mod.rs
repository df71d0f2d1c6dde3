//! Shared entry point of the `xml2ly` and `xml2brl` binaries.

pub mod entrypoint;

use std::any::Any;
use std::panic;

pub use entrypoint::{EntryOptions, run};

/// Exit quietly when stdout is closed early, e.g. when piping help to `head`.
pub fn install_broken_pipe_handler() {
    let default_hook = panic::take_hook();
    panic::set_hook(Box::new(move |info| {
        let payload = info.payload();
        let is_broken = <dyn Any>::downcast_ref::<&str>(payload)
            .is_some_and(|s| s.contains("Broken pipe"))
            || <dyn Any>::downcast_ref::<String>(payload)
                .is_some_and(|s| s.contains("Broken pipe"));

        if is_broken {
            std::process::exit(0);
        }

        default_hook(info);
    }));
}

pub fn init_tracing() {
    // `oah=info` lets -trace-oah output through without RUST_LOG
    let _ = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn,oah=info")),
        )
        .try_init();
}
