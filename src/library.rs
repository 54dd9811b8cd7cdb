//! Track model and directory scanning into a playlist.
//!
//! Scanning is the transport's only playlist collaborator: it walks a
//! directory, turns file names into display metadata and hands the
//! controller a completed track list.

mod model;
mod parse;
mod scan;

pub use model::Track;
pub use parse::{ParsedName, UNKNOWN_TITLE, make_display, parse_stem};
pub use scan::scan;
