//! Transport controller: the component that owns the playlist, the current
//! track index and the single media handle.
//!
//! Every mutating operation ends by mirroring the new state to the registered
//! listener, so any rendering layer (the TUI, the MPRIS bridge, a test) can
//! subscribe uniformly.

mod controller;
mod format;
mod sink;
mod state;

pub use controller::TransportController;
pub use format::{format_duration_mmss, format_mmss};
pub use sink::{MediaSink, RodioSink};
pub use state::{PlaybackState, TransportPhase};

#[cfg(test)]
mod tests;
