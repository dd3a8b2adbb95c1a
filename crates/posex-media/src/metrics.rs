//! Analysis counters.
//!
//! Recorded through the `metrics` facade; installing an exporter is up to the
//! embedding binary.

use metrics::counter;
use posex_models::SignalUnit;

/// Metric names as constants for consistency.
pub mod names {
    pub const FRAMES_PROCESSED_TOTAL: &str = "posex_frames_processed_total";
    pub const FRAMES_MISSING_TOTAL: &str = "posex_frames_missing_total";
    pub const DETECTION_FAILURES_TOTAL: &str = "posex_detection_failures_total";
    pub const SIGNALS_BANDED_TOTAL: &str = "posex_signals_banded_total";
}

/// Record a frame with usable keypoints.
pub fn record_frame_processed() {
    counter!(names::FRAMES_PROCESSED_TOTAL).increment(1);
}

/// Record a frame that yielded no derived data.
pub fn record_frame_missing(reason: &'static str) {
    let labels = [("reason", reason)];
    counter!(names::FRAMES_MISSING_TOTAL, &labels).increment(1);
}

/// Record a detector error.
pub fn record_detection_failure() {
    counter!(names::DETECTION_FAILURES_TOTAL).increment(1);
}

/// Record a banded signal.
pub fn record_signal_banded(unit: SignalUnit) {
    let labels = [("unit", unit.as_str())];
    counter!(names::SIGNALS_BANDED_TOTAL, &labels).increment(1);
}
