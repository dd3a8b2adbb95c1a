//! Green/amber/red stability banding of scalar signals.
//!
//! 1. Acceleration by two finite-difference passes at the sample rate
//! 2. Absolute value per sample
//! 3. Centered moving average over `window_seconds`
//! 4. Two thresholds split the smoothed magnitude into bands
//!
//! High smoothed acceleration marks jittery or unstable motion.

use posex_models::{BandLabelSeries, BandThresholds, TimeSeries};
use tracing::debug;

use super::config::StabilityConfig;
use super::dynamics::MotionDynamics;
use super::smoothing_utils::{centered_moving_average, window_samples};
use crate::error::{MediaError, MediaResult};

/// Classifies each sample of a series by local acceleration magnitude.
#[derive(Debug, Clone, Copy, Default)]
pub struct StabilityBander {
    config: StabilityConfig,
}

impl StabilityBander {
    pub fn new(config: StabilityConfig) -> Self {
        Self { config }
    }

    /// Bander with default window and the given thresholds.
    pub fn with_thresholds(thresholds: BandThresholds) -> Self {
        Self::new(StabilityConfig {
            thresholds,
            ..Default::default()
        })
    }

    pub fn config(&self) -> &StabilityConfig {
        &self.config
    }

    /// Smoothing window length in samples at `sample_rate`.
    pub fn window_len(&self, sample_rate: f64) -> usize {
        window_samples(self.config.window_seconds, sample_rate)
    }

    /// Smoothed acceleration magnitude, same length as `samples`.
    pub fn smoothed_acceleration(&self, samples: &[f64], sample_rate: f64) -> Vec<f64> {
        let magnitude: Vec<f64> = MotionDynamics::new(sample_rate)
            .acceleration(samples)
            .into_iter()
            .map(f64::abs)
            .collect();
        centered_moving_average(&magnitude, self.window_len(sample_rate))
    }

    /// Band labels for `samples`, one per sample.
    pub fn classify(&self, samples: &[f64], sample_rate: f64) -> BandLabelSeries {
        self.label(&self.smoothed_acceleration(samples, sample_rate))
    }

    /// Band labels for precomputed smoothed magnitudes.
    pub fn label(&self, smoothed: &[f64]) -> BandLabelSeries {
        let thresholds = &self.config.thresholds;
        BandLabelSeries::new(smoothed.iter().map(|&m| thresholds.classify(m)).collect())
    }

    /// Band a time series, checking that its unit matches the thresholds.
    pub fn band_series(&self, series: &TimeSeries) -> MediaResult<BandLabelSeries> {
        self.check_unit(series)?;
        series.validate()?;
        let bands = self.classify(&series.samples, series.sample_rate);
        debug!(
            signal = %series.name,
            samples = series.len(),
            window = self.window_len(series.sample_rate),
            "Banded signal"
        );
        Ok(bands)
    }

    /// Fail if `series` is not in the thresholds' unit.
    pub fn check_unit(&self, series: &TimeSeries) -> MediaResult<()> {
        let thresholds = self.config.thresholds.unit;
        if series.unit != thresholds {
            return Err(MediaError::UnitMismatch {
                signal: series.unit,
                thresholds,
            });
        }
        Ok(())
    }
}
