//! Kinematic signal derivation from pose keypoints.
//!
//! # Architecture
//!
//! ```text
//! KeypointFrame (per frame)
//!     │
//!     ├──► AngleEngine ──────────► 8 joint angles
//!     ├──► CenterOfMassEstimator ► CoM point
//!     └──► TrailSet ─────────────► wrist / ankle trails
//!
//! Assembled TimeSeries (post-pass)
//!     │
//!     ├──► MotionDynamics ───────► velocity, acceleration
//!     └──► StabilityBander ──────► green / amber / red per sample
//! ```

pub mod angles;
pub mod center_of_mass;
pub mod config;
pub mod dynamics;
pub mod smoothing_utils;
pub mod stability;
pub mod trail;

pub use angles::{interior_angle, AngleEngine, ANGLE_EPSILON};
pub use center_of_mass::{CenterOfMassEstimator, COM_LANDMARKS};
pub use config::{KinematicsConfig, StabilityConfig};
pub use dynamics::MotionDynamics;
pub use smoothing_utils::{centered_moving_average, window_samples};
pub use stability::StabilityBander;
pub use trail::{TrailSet, TrailTracker};
