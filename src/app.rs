//! Application module: exposes the UI-side model.
//!
//! The `App` model lives in `app::model` and holds the track list, cursor
//! and display labels. Playback state itself is mirrored out of the
//! transport controller; nothing here owns the media handle.

mod model;

pub use model::*;

#[cfg(test)]
mod tests;
