use std::path::PathBuf;
use std::time::Duration;

/// One playable item: display metadata plus the opaque source locator.
/// Immutable once produced by the scanner.
#[derive(Clone, Debug)]
pub struct Track {
    pub path: PathBuf,
    pub title: String,
    pub artist: Option<String>,
    pub duration: Option<Duration>,
    pub display: String,
}
