//! `MM:SS` time formatting for the status line and seek bar label.

use std::time::Duration;

/// Format a second count as zero-padded `MM:SS`.
///
/// Negative, NaN or otherwise non-finite input renders as `00:00`, matching
/// what a seek bar should show before a duration is known.
pub fn format_mmss(secs: f64) -> String {
    if !secs.is_finite() || secs < 0.0 {
        return "00:00".to_string();
    }
    let total = secs.floor() as u64;
    format!("{:02}:{:02}", total / 60, total % 60)
}

/// Format a `Duration` as `MM:SS`.
pub fn format_duration_mmss(d: Duration) -> String {
    format_mmss(d.as_secs_f64())
}
