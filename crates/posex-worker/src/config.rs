//! Worker configuration.

use std::path::PathBuf;

use posex_media::KinematicsConfig;
use posex_models::BandThresholds;

use crate::error::{WorkerError, WorkerResult};

/// Longest trail the worker accepts, in frames.
pub const MAX_TRAIL_LEN: usize = 10_000;

/// Worker configuration.
#[derive(Debug, Clone)]
pub struct WorkerConfig {
    /// Keypoint recording to analyze
    pub input: Option<PathBuf>,
    /// Directory receiving one sub-directory per session
    pub output_dir: PathBuf,
    /// Frame cap; 0 disables it
    pub max_frames: usize,
    /// Trail capacity in frames
    pub trail_len: usize,
    /// Acceleration smoothing window in seconds
    pub window_seconds: f64,
    /// Amber threshold for joint angles (deg/s^2)
    pub amber_threshold: f64,
    /// Red threshold for joint angles (deg/s^2)
    pub red_threshold: f64,
    /// Rate assumed when the recording carries none
    pub fallback_sample_rate: f64,
    /// Timeline image width in pixels
    pub timeline_width: u32,
    /// Timeline image height in pixels
    pub timeline_height: u32,
}

impl Default for WorkerConfig {
    fn default() -> Self {
        Self {
            input: None,
            output_dir: PathBuf::from("./posex-output"),
            max_frames: 900,
            trail_len: 40,
            window_seconds: 0.4,
            amber_threshold: 120.0,
            red_threshold: 300.0,
            fallback_sample_rate: 30.0,
            timeline_width: 420,
            timeline_height: 40,
        }
    }
}

impl WorkerConfig {
    /// Create config from environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Create config from an arbitrary variable lookup.
    ///
    /// Unset or unparsable values fall back to the defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        Self {
            input: lookup("POSEX_INPUT")
                .filter(|s| !s.trim().is_empty())
                .map(PathBuf::from),
            output_dir: lookup("POSEX_OUTPUT_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.output_dir),
            max_frames: lookup("POSEX_MAX_FRAMES")
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.max_frames),
            trail_len: lookup("POSEX_TRAIL_LEN")
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.trail_len),
            window_seconds: lookup("POSEX_WINDOW_SECONDS")
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.window_seconds),
            amber_threshold: lookup("POSEX_AMBER_THRESHOLD")
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.amber_threshold),
            red_threshold: lookup("POSEX_RED_THRESHOLD")
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.red_threshold),
            fallback_sample_rate: lookup("POSEX_FALLBACK_FPS")
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.fallback_sample_rate),
            timeline_width: lookup("POSEX_TIMELINE_WIDTH")
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.timeline_width),
            timeline_height: lookup("POSEX_TIMELINE_HEIGHT")
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.timeline_height),
        }
    }

    /// Override the input path, e.g. from the command line.
    pub fn with_input(mut self, input: impl Into<PathBuf>) -> Self {
        self.input = Some(input.into());
        self
    }

    /// Frame cap for the analysis, if any.
    pub fn frame_cap(&self) -> Option<usize> {
        (self.max_frames > 0).then_some(self.max_frames)
    }

    /// Analysis settings derived from this config.
    pub fn kinematics(&self) -> WorkerResult<KinematicsConfig> {
        if !(self.window_seconds.is_finite() && self.window_seconds > 0.0) {
            return Err(WorkerError::config_error(format!(
                "POSEX_WINDOW_SECONDS must be positive, got {}",
                self.window_seconds
            )));
        }
        if self.trail_len > MAX_TRAIL_LEN {
            return Err(WorkerError::config_error(format!(
                "POSEX_TRAIL_LEN must be at most {}, got {}",
                MAX_TRAIL_LEN, self.trail_len
            )));
        }
        if self.timeline_width == 0 || self.timeline_height == 0 {
            return Err(WorkerError::config_error("Timeline size must be non-zero"));
        }

        let angle_thresholds = BandThresholds::degrees(self.amber_threshold, self.red_threshold)
            .map_err(|e| WorkerError::config_error(e.to_string()))?;
        Ok(KinematicsConfig {
            window_seconds: self.window_seconds,
            angle_thresholds,
            trail_len: self.trail_len,
            fallback_sample_rate: self.fallback_sample_rate,
            ..KinematicsConfig::default()
        })
    }
}
