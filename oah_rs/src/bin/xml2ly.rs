use oah::cli::{EntryOptions, install_broken_pipe_handler, run};
use oah::groups::xml2ly_handler;
use oah::settings::{LilypondSettings, MsrSettings};
use oah::Handler;

fn settings(handler: &Handler) -> serde_json::Value {
    serde_json::json!({
        "msr": MsrSettings::from_handler(handler),
        "lilypond": LilypondSettings::from_handler(handler),
    })
}

fn main() -> anyhow::Result<()> {
    install_broken_pipe_handler();

    run(&EntryOptions {
        binary_name: "xml2ly",
        build_handler: xml2ly_handler,
        settings,
    })
}
