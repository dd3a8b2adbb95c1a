//! Validation errors for model types.

use thiserror::Error;

pub type ModelResult<T> = Result<T, ModelError>;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("Keypoint array length mismatch: {field} has {actual} entries, expected {expected}")]
    LengthMismatch {
        field: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("Time series length mismatch: {samples} samples but {frame_indices} frame indices")]
    SeriesMisaligned {
        samples: usize,
        frame_indices: usize,
    },

    #[error("Invalid sample rate: {0}")]
    InvalidSampleRate(f64),

    #[error("Invalid band thresholds: amber {amber} must not exceed red {red}")]
    InvalidThresholds { amber: f64, red: f64 },

    #[error("Unknown joint name: {0}")]
    UnknownJoint(String),
}
