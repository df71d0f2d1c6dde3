use oah::cli::{EntryOptions, install_broken_pipe_handler, run};
use oah::groups::xml2brl_handler;
use oah::settings::{BrailleSettings, MsrSettings};
use oah::Handler;

fn settings(handler: &Handler) -> serde_json::Value {
    serde_json::json!({
        "msr": MsrSettings::from_handler(handler),
        "braille": BrailleSettings::from_handler(handler),
    })
}

fn main() -> anyhow::Result<()> {
    install_broken_pipe_handler();

    run(&EntryOptions {
        binary_name: "xml2brl",
        build_handler: xml2brl_handler,
        settings,
    })
}
