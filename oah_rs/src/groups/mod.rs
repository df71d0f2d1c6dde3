//! Standard option groups and the handlers assembled from them.
//!
//! - [`oah`] - help, introspection and handler control, in every handler
//! - [`msr`] - score representation tracing and part filtering
//! - [`lpsr`] - LilyPond generation settings
//! - [`bsr`] - braille generation settings

pub mod bsr;
pub mod lpsr;
pub mod msr;
pub mod oah;

use crate::error::Result;
use crate::handler::{Handler, HandlerInfo};

pub use bsr::create_bsr_group;
pub use lpsr::create_lpsr_group;
pub use msr::create_msr_group;
pub use oah::create_oah_group;

const CONTACT: &str = "Report issues at the project's issue tracker.";

fn handler_info(program: &str, header: &str, about: &str) -> HandlerInfo {
    let mut info = HandlerInfo::new(program, header);
    info.about = about.to_string();
    info.contact = CONTACT.to_string();
    info
}

/// MusicXML to LilyPond: OAH, MSR and LPSR groups.
pub fn xml2ly_handler() -> Result<Handler> {
    let mut handler = Handler::new(handler_info(
        "xml2ly",
        "xml2ly converts MusicXML scores to LilyPond source.",
        "xml2ly reads MusicXML, builds a score representation and emits LilyPond code.",
    ));
    create_oah_group(&mut handler)?;
    create_msr_group(&mut handler)?;
    create_lpsr_group(&mut handler)?;
    handler.register()?;
    Ok(handler)
}

/// MusicXML to braille: OAH, MSR and BSR groups.
pub fn xml2brl_handler() -> Result<Handler> {
    let mut handler = Handler::new(handler_info(
        "xml2brl",
        "xml2brl converts MusicXML scores to braille music.",
        "xml2brl reads MusicXML, builds a score representation and emits braille cells.",
    ));
    create_oah_group(&mut handler)?;
    create_msr_group(&mut handler)?;
    create_bsr_group(&mut handler)?;
    handler.register()?;
    Ok(handler)
}
