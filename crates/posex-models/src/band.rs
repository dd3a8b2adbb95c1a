//! Stability bands derived from smoothed acceleration magnitude.
//!
//! - `green`: below the amber threshold
//! - `amber`: at or above amber, below red
//! - `red`: at or above the red threshold
//!
//! Bands flag jittery or unstable motion segments. They carry no notion of
//! "correct" movement.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{ModelError, ModelResult};
use crate::SignalUnit;

/// Stability tier of one sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, JsonSchema, Default)]
#[serde(rename_all = "snake_case")]
pub enum StabilityBand {
    #[default]
    Green,
    Amber,
    Red,
}

impl StabilityBand {
    pub const ALL: [StabilityBand; 3] = [StabilityBand::Green, StabilityBand::Amber, StabilityBand::Red];

    pub fn as_str(&self) -> &'static str {
        match self {
            StabilityBand::Green => "green",
            StabilityBand::Amber => "amber",
            StabilityBand::Red => "red",
        }
    }

    /// Display colour as RGB.
    pub fn rgb(&self) -> [u8; 3] {
        match self {
            StabilityBand::Green => [60, 180, 75],
            StabilityBand::Amber => [255, 225, 25],
            StabilityBand::Red => [230, 25, 75],
        }
    }
}

impl fmt::Display for StabilityBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Acceleration thresholds separating the bands.
///
/// Values are in the signal's unit per second squared.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct BandThresholds {
    pub amber: f64,
    pub red: f64,
    pub unit: SignalUnit,
}

impl BandThresholds {
    pub fn new(amber: f64, red: f64, unit: SignalUnit) -> ModelResult<Self> {
        let thresholds = Self { amber, red, unit };
        thresholds.validate()?;
        Ok(thresholds)
    }

    /// Angle thresholds in deg/s^2.
    pub fn degrees(amber: f64, red: f64) -> ModelResult<Self> {
        Self::new(amber, red, SignalUnit::Degrees)
    }

    /// Position thresholds in px/s^2.
    pub fn pixels(amber: f64, red: f64) -> ModelResult<Self> {
        Self::new(amber, red, SignalUnit::Pixels)
    }

    pub fn validate(&self) -> ModelResult<()> {
        let ordered = self.amber <= self.red;
        if !ordered {
            return Err(ModelError::InvalidThresholds {
                amber: self.amber,
                red: self.red,
            });
        }
        Ok(())
    }

    /// Band for one smoothed acceleration magnitude.
    #[inline]
    pub fn classify(&self, magnitude: f64) -> StabilityBand {
        if magnitude >= self.red {
            StabilityBand::Red
        } else if magnitude >= self.amber {
            StabilityBand::Amber
        } else {
            StabilityBand::Green
        }
    }
}

impl Default for BandThresholds {
    fn default() -> Self {
        Self {
            amber: 150.0,
            red: 400.0,
            unit: SignalUnit::Degrees,
        }
    }
}

/// Band labels aligned index-for-index with a source time series.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(transparent)]
pub struct BandLabelSeries(Vec<StabilityBand>);

impl BandLabelSeries {
    pub fn new(labels: Vec<StabilityBand>) -> Self {
        Self(labels)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn labels(&self) -> &[StabilityBand] {
        &self.0
    }

    pub fn get(&self, index: usize) -> Option<StabilityBand> {
        self.0.get(index).copied()
    }

    /// Number of samples in `band`.
    pub fn count(&self, band: StabilityBand) -> usize {
        self.0.iter().filter(|&&b| b == band).count()
    }

    pub fn counts(&self) -> BandCounts {
        BandCounts {
            green: self.count(StabilityBand::Green),
            amber: self.count(StabilityBand::Amber),
            red: self.count(StabilityBand::Red),
        }
    }
}

/// Per-band sample counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
pub struct BandCounts {
    pub green: usize,
    pub amber: usize,
    pub red: usize,
}
