#![deny(unreachable_patterns)]
//! Kinematic analysis of pose keypoint sequences.
//!
//! This crate provides:
//! - Joint angles, centre-of-mass proxy and motion trails per frame
//! - Velocity/acceleration by finite differences
//! - Green/amber/red stability banding of smoothed acceleration
//! - Frame source and pose detector seams, with a keypoint replay source
//! - The pipeline driver that turns a source into an [`AnalysisReport`]
//! - Band timeline rendering
//!
//! [`AnalysisReport`]: posex_models::AnalysisReport

pub mod detector;
pub mod error;
pub mod kinematics;
pub mod metrics;
pub mod pipeline;
pub mod source;
pub mod timeline;

pub use detector::{PoseDetector, ReplayDetector};
pub use error::{MediaError, MediaResult};
pub use kinematics::{
    AngleEngine, CenterOfMassEstimator, KinematicsConfig, MotionDynamics, StabilityBander,
    StabilityConfig, TrailSet, TrailTracker,
};
pub use pipeline::{analyze, FrameAnalysis, PoseAnalyzer};
pub use source::{FrameSource, RecordedFrame, ReplaySource, SourceFrame};
#[cfg(feature = "opencv")]
pub use source::VideoSource;
pub use timeline::{render_band_timeline, save_band_timeline};
