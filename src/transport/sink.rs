//! The seam between transport logic and audio output.
//!
//! [`MediaSink`] is what the controller needs from a backend; [`RodioSink`]
//! implements it over `rodio`. Tests substitute a recording fake.

use std::fs::File;
use std::io::BufReader;
use std::time::Duration;

use rodio::{Decoder, OutputStream, OutputStreamBuilder, Sink, Source};

use crate::library::Track;

/// Operations the transport controller performs on its single media handle.
pub trait MediaSink {
    /// Load `track` paused at offset `start_at`, releasing any previously
    /// loaded source.
    fn load(&mut self, track: &Track, start_at: Duration);
    fn play(&mut self);
    fn pause(&mut self);
    /// Stop and release the loaded source.
    fn stop(&mut self);
    fn set_volume(&mut self, volume: f32);
    /// True once the loaded source has been fully consumed.
    fn finished(&self) -> bool;
}

/// Production sink backed by a `rodio` output stream.
pub struct RodioSink {
    stream: OutputStream,
    sink: Option<Sink>,
    volume: f32,
}

impl RodioSink {
    pub fn new() -> Self {
        let mut stream =
            OutputStreamBuilder::open_default_stream().expect("ERR: No audio output device");
        // rodio logs to stderr when OutputStream is dropped. That's useful in
        // debugging, but noisy for a TUI app.
        stream.log_on_drop(false);

        Self {
            stream,
            sink: None,
            volume: 1.0,
        }
    }
}

impl MediaSink for RodioSink {
    fn load(&mut self, track: &Track, start_at: Duration) {
        if let Some(s) = self.sink.take() {
            s.stop();
        }

        // A missing or undecodable file degrades to a silent sink; the
        // transport state still advances and the UI keeps working.
        let file = match File::open(&track.path) {
            Ok(f) => f,
            Err(e) => {
                eprintln!("attacca: failed to open {:?}: {e}", track.path);
                return;
            }
        };
        let source = match Decoder::new(BufReader::new(file)) {
            Ok(s) => s.skip_duration(start_at),
            Err(e) => {
                eprintln!("attacca: failed to decode {:?}: {e}", track.path);
                return;
            }
        };

        let sink = Sink::connect_new(self.stream.mixer());
        sink.append(source);
        sink.pause();
        sink.set_volume(self.volume);
        self.sink = Some(sink);
    }

    fn play(&mut self) {
        if let Some(s) = &self.sink {
            s.play();
        }
    }

    fn pause(&mut self) {
        if let Some(s) = &self.sink {
            s.pause();
        }
    }

    fn stop(&mut self) {
        if let Some(s) = self.sink.take() {
            s.stop();
        }
    }

    fn set_volume(&mut self, volume: f32) {
        self.volume = volume;
        if let Some(s) = &self.sink {
            s.set_volume(volume);
        }
    }

    fn finished(&self) -> bool {
        self.sink.as_ref().map(|s| s.empty()).unwrap_or(false)
    }
}
