//! Error types for motion analysis.

use posex_models::{ModelError, SignalUnit};
use thiserror::Error;

/// Result type for media operations.
pub type MediaResult<T> = Result<T, MediaError>;

/// Errors that can occur while reading sources or deriving signals.
///
/// Per-frame numerical work never fails; missing detections are data, not
/// errors. The only fatal condition for a session is an unreadable source.
#[derive(Debug, Error)]
pub enum MediaError {
    #[error("Cannot open source: {0}")]
    SourceUnavailable(String),

    #[error("Failed to read frame {index}: {message}")]
    FrameRead { index: usize, message: String },

    #[error("Pose detection failed: {0}")]
    DetectionFailed(String),

    #[error("Signal unit {signal} does not match threshold unit {thresholds}")]
    UnitMismatch {
        signal: SignalUnit,
        thresholds: SignalUnit,
    },

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Model error: {0}")]
    Model(#[from] ModelError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed record at line {line}: {source}")]
    MalformedRecord {
        line: usize,
        #[source]
        source: serde_json::Error,
    },

    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    #[cfg(feature = "opencv")]
    #[error("OpenCV error: {0}")]
    OpenCv(#[from] opencv::Error),
}

impl MediaError {
    /// Create a source-unavailable error.
    pub fn source_unavailable(message: impl Into<String>) -> Self {
        Self::SourceUnavailable(message.into())
    }

    /// Create a detection failure error.
    pub fn detection_failed(message: impl Into<String>) -> Self {
        Self::DetectionFailed(message.into())
    }

    /// Create a frame read error.
    pub fn frame_read(index: usize, message: impl Into<String>) -> Self {
        Self::FrameRead {
            index,
            message: message.into(),
        }
    }

    /// Create an invalid-input error.
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }
}
