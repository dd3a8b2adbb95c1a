//! Shared data models for Pose Explorer.
//!
//! This crate provides Serde-serializable types for:
//! - Detector keypoint frames and the named landmark table
//! - Joint angle sets and scalar time series
//! - Stability bands and their thresholds
//! - Analysis session reports

pub mod band;
pub mod error;
pub mod geometry;
pub mod joint;
pub mod keypoints;
pub mod landmark;
pub mod report;
pub mod signal;

// Re-export common types
pub use band::{BandCounts, BandLabelSeries, BandThresholds, StabilityBand};
pub use error::{ModelError, ModelResult};
pub use geometry::{Point2, Point3};
pub use joint::{JointAngleSet, JointName};
pub use keypoints::{FrameResult, KeypointFrame};
pub use landmark::{Landmark, LandmarkScheme, TrackedPoint};
pub use report::{
    AnalysisReport, BandingOutcome, ComSample, SessionId, SignalReport, TrailReport,
};
pub use signal::{SignalUnit, TimeSeries};
