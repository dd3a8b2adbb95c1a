//! Configuration for kinematic signal derivation.

use posex_models::{BandThresholds, LandmarkScheme, ModelResult};
use serde::{Deserialize, Serialize};

/// Settings for the stability bander.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StabilityConfig {
    /// Moving-average window duration in seconds (default: 0.4)
    pub window_seconds: f64,

    /// Acceleration thresholds (default: 150 / 400 deg/s^2)
    pub thresholds: BandThresholds,
}

impl Default for StabilityConfig {
    fn default() -> Self {
        Self {
            window_seconds: 0.4,
            thresholds: BandThresholds::default(),
        }
    }
}

/// Configuration for a full analysis pass.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KinematicsConfig {
    /// Keypoint index table of the detector in use.
    pub landmark_scheme: LandmarkScheme,

    /// Moving-average window duration in seconds (default: 0.4)
    pub window_seconds: f64,

    /// Thresholds for joint-angle signals, in deg/s^2 (default: 150 / 400)
    pub angle_thresholds: BandThresholds,

    /// Thresholds for centre-of-mass coordinates, in px/s^2.
    /// Centre-of-mass banding is skipped when unset (default).
    pub com_thresholds: Option<BandThresholds>,

    /// Trail capacity in frames (default: 40)
    pub trail_len: usize,

    /// Minimum samples a signal needs before it is banded (default: 5)
    pub min_series_len: usize,

    /// Sample rate used when the source does not report one (default: 30.0)
    pub fallback_sample_rate: f64,
}

impl Default for KinematicsConfig {
    fn default() -> Self {
        Self {
            landmark_scheme: LandmarkScheme::MEDIAPIPE_POSE,
            window_seconds: 0.4,
            angle_thresholds: BandThresholds::default(),
            com_thresholds: None,
            trail_len: 40,
            min_series_len: 5,
            fallback_sample_rate: 30.0,
        }
    }
}

impl KinematicsConfig {
    /// Looser angle thresholds (120 / 300 deg/s^2).
    pub fn lenient() -> Self {
        Self {
            angle_thresholds: BandThresholds {
                amber: 120.0,
                red: 300.0,
                ..BandThresholds::default()
            },
            ..Default::default()
        }
    }

    /// Bander settings for joint-angle signals.
    pub fn angle_stability(&self) -> StabilityConfig {
        StabilityConfig {
            window_seconds: self.window_seconds,
            thresholds: self.angle_thresholds,
        }
    }

    /// Bander settings for centre-of-mass signals, if enabled.
    pub fn com_stability(&self) -> Option<StabilityConfig> {
        self.com_thresholds.map(|thresholds| StabilityConfig {
            window_seconds: self.window_seconds,
            thresholds,
        })
    }

    /// Check threshold ordering.
    pub fn validate(&self) -> ModelResult<()> {
        self.angle_thresholds.validate()?;
        if let Some(t) = &self.com_thresholds {
            t.validate()?;
        }
        Ok(())
    }
}
