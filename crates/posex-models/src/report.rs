//! Serializable summary of one analysis session.

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use crate::{BandCounts, BandLabelSeries, BandThresholds, Point2, TimeSeries, TrackedPoint};

/// Unique identifier for an analysis session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(transparent)]
pub struct SessionId(pub Uuid);

impl SessionId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Result of banding one signal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum BandingOutcome {
    /// Bands aligned with the signal's samples.
    Banded {
        thresholds: BandThresholds,
        /// Smoothed acceleration magnitude per sample.
        smoothed_acceleration: Vec<f64>,
        bands: BandLabelSeries,
        counts: BandCounts,
    },
    /// Too few samples to band.
    InsufficientSamples { samples: usize, required: usize },
    /// Banding disabled for this signal.
    Disabled,
}

impl BandingOutcome {
    pub fn bands(&self) -> Option<&BandLabelSeries> {
        match self {
            BandingOutcome::Banded { bands, .. } => Some(bands),
            _ => None,
        }
    }
}

/// Derived data for one scalar signal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct SignalReport {
    pub series: TimeSeries,
    pub velocity: Vec<f64>,
    pub acceleration: Vec<f64>,
    pub banding: BandingOutcome,
}

impl SignalReport {
    pub fn name(&self) -> &str {
        &self.series.name
    }
}

/// Centre-of-mass proxy for one detected frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ComSample {
    pub frame_index: usize,
    pub point: Point2,
}

/// Final contents of one trail.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct TrailReport {
    pub tracked: TrackedPoint,
    pub capacity: usize,
    pub points: Vec<Point2>,
}

/// Everything derived from one pass over a source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct AnalysisReport {
    pub session_id: SessionId,
    pub created_at: DateTime<Utc>,
    pub sample_rate: f64,
    /// Frames read from the source (after the frame cap).
    pub frames_seen: usize,
    /// Frames with a usable detection.
    pub frames_detected: usize,
    /// Frame indices that produced no derived data.
    pub skipped_frames: Vec<usize>,
    /// One entry per joint angle, in reporting order.
    pub angles: Vec<SignalReport>,
    /// Centre-of-mass x and y signals.
    pub center_of_mass_signals: Vec<SignalReport>,
    pub center_of_mass: Vec<ComSample>,
    pub trails: Vec<TrailReport>,
}

impl AnalysisReport {
    /// Look up an angle signal by name.
    pub fn angle(&self, name: &str) -> Option<&SignalReport> {
        self.angles.iter().find(|s| s.name() == name)
    }

    /// Signals that produced bands.
    pub fn banded_signals(&self) -> impl Iterator<Item = &SignalReport> {
        self.angles
            .iter()
            .chain(self.center_of_mass_signals.iter())
            .filter(|s| s.banding.bands().is_some())
    }

    /// Fraction of frames with a detection.
    pub fn detection_rate(&self) -> f64 {
        if self.frames_seen == 0 {
            return 0.0;
        }
        self.frames_detected as f64 / self.frames_seen as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{SignalUnit, StabilityBand};

    fn sample_report() -> AnalysisReport {
        let series = TimeSeries::from_samples("L_ELBOW", SignalUnit::Degrees, 30.0, vec![90.0; 5]);
        let bands = BandLabelSeries::new(vec![StabilityBand::Green; 5]);
        AnalysisReport {
            session_id: SessionId::new(),
            created_at: Utc::now(),
            sample_rate: 30.0,
            frames_seen: 6,
            frames_detected: 5,
            skipped_frames: vec![3],
            angles: vec![SignalReport {
                series,
                velocity: vec![0.0; 5],
                acceleration: vec![0.0; 5],
                banding: BandingOutcome::Banded {
                    thresholds: BandThresholds::default(),
                    smoothed_acceleration: vec![0.0; 5],
                    counts: bands.counts(),
                    bands,
                },
            }],
            center_of_mass_signals: Vec::new(),
            center_of_mass: Vec::new(),
            trails: Vec::new(),
        }
    }

    #[test]
    fn test_report_roundtrip() {
        let report = sample_report();
        let json = serde_json::to_string(&report).unwrap();
        assert!(json.contains(r#""status":"banded""#));
        let parsed: AnalysisReport = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, report);
    }

    #[test]
    fn test_report_lookups() {
        let report = sample_report();
        assert!(report.angle("L_ELBOW").is_some());
        assert!(report.angle("R_KNEE").is_none());
        assert_eq!(report.banded_signals().count(), 1);
        assert!((report.detection_rate() - 5.0 / 6.0).abs() < 1e-12);
    }
}
