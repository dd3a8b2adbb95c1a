//! Scalar time series assembled from per-frame outputs.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{ModelError, ModelResult};

/// Unit of a scalar signal.
///
/// Derivative quantities use the same unit per second (velocity) or per
/// second squared (acceleration).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum SignalUnit {
    Degrees,
    Pixels,
}

impl SignalUnit {
    pub fn as_str(&self) -> &'static str {
        match self {
            SignalUnit::Degrees => "deg",
            SignalUnit::Pixels => "px",
        }
    }

    /// Unit label for accelerations of this signal.
    pub fn acceleration_label(&self) -> &'static str {
        match self {
            SignalUnit::Degrees => "deg/s^2",
            SignalUnit::Pixels => "px/s^2",
        }
    }
}

impl fmt::Display for SignalUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Ordered scalar samples at a fixed sample rate.
///
/// `frame_indices[i]` is the source frame that produced `samples[i]`. Frames
/// without a detection contribute nothing, so indices may have gaps.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct TimeSeries {
    pub name: String,
    pub unit: SignalUnit,
    /// Samples per second.
    pub sample_rate: f64,
    pub samples: Vec<f64>,
    pub frame_indices: Vec<usize>,
}

impl TimeSeries {
    /// Create an empty series.
    pub fn new(name: impl Into<String>, unit: SignalUnit, sample_rate: f64) -> Self {
        Self {
            name: name.into(),
            unit,
            sample_rate,
            samples: Vec::new(),
            frame_indices: Vec::new(),
        }
    }

    /// Create a series from contiguous samples (frame indices 0..n).
    pub fn from_samples(
        name: impl Into<String>,
        unit: SignalUnit,
        sample_rate: f64,
        samples: Vec<f64>,
    ) -> Self {
        let frame_indices = (0..samples.len()).collect();
        Self {
            name: name.into(),
            unit,
            sample_rate,
            samples,
            frame_indices,
        }
    }

    /// Append one sample produced by `frame_index`.
    pub fn push(&mut self, frame_index: usize, value: f64) {
        self.frame_indices.push(frame_index);
        self.samples.push(value);
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Check the sample rate and the sample/index alignment.
    pub fn validate(&self) -> ModelResult<()> {
        if !(self.sample_rate.is_finite() && self.sample_rate > 0.0) {
            return Err(ModelError::InvalidSampleRate(self.sample_rate));
        }
        if self.samples.len() != self.frame_indices.len() {
            return Err(ModelError::SeriesMisaligned {
                samples: self.samples.len(),
                frame_indices: self.frame_indices.len(),
            });
        }
        Ok(())
    }

    /// Whether any frames were skipped between consecutive samples.
    pub fn has_gaps(&self) -> bool {
        self.frame_indices.windows(2).any(|w| w[1] != w[0] + 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_tracks_frame_indices() {
        let mut series = TimeSeries::new("L_ELBOW", SignalUnit::Degrees, 30.0);
        series.push(0, 90.0);
        series.push(2, 91.0);
        assert_eq!(series.len(), 2);
        assert_eq!(series.frame_indices, vec![0, 2]);
        assert!(series.has_gaps());
        assert!(series.validate().is_ok());
    }

    #[test]
    fn test_from_samples_is_contiguous() {
        let series = TimeSeries::from_samples("x", SignalUnit::Pixels, 25.0, vec![1.0, 2.0, 3.0]);
        assert_eq!(series.frame_indices, vec![0, 1, 2]);
        assert!(!series.has_gaps());
    }

    #[test]
    fn test_validate_rejects_bad_rate() {
        let series = TimeSeries::new("x", SignalUnit::Pixels, 0.0);
        assert!(matches!(series.validate(), Err(ModelError::InvalidSampleRate(_))));
    }

    #[test]
    fn test_unit_labels() {
        assert_eq!(SignalUnit::Degrees.acceleration_label(), "deg/s^2");
        assert_eq!(SignalUnit::Pixels.to_string(), "px");
    }
}
