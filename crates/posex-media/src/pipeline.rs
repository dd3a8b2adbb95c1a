//! Pipeline driver: per-frame derivation, then the post-pass.
//!
//! ```text
//! FrameSource ──► PoseDetector ──► PoseAnalyzer::process (per frame)
//!                                        │
//!                                        ▼
//!                                 PoseAnalyzer::finish
//!                            (derivatives + stability bands)
//! ```
//!
//! Frames are consumed strictly in order. A frame without a usable detection
//! contributes nothing to the series; its index is recorded in
//! `skipped_frames` and every sample keeps the index of the frame it came from.

use chrono::Utc;
use posex_models::{
    AnalysisReport, BandingOutcome, ComSample, FrameResult, JointAngleSet, JointName,
    KeypointFrame, Point2, SessionId, SignalReport, SignalUnit, TimeSeries,
};
use tracing::{debug, info, warn};

use crate::detector::PoseDetector;
use crate::error::{MediaError, MediaResult};
use crate::kinematics::{
    AngleEngine, CenterOfMassEstimator, KinematicsConfig, MotionDynamics, StabilityBander,
    StabilityConfig, TrailSet,
};
use crate::metrics;
use crate::source::FrameSource;

/// Derived data for one detected frame.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameAnalysis {
    pub frame_index: usize,
    pub angles: JointAngleSet,
    pub center_of_mass: Point2,
    /// Points added to the trails, ordered as `TrackedPoint::ALL`.
    pub trail_heads: [Point2; 4],
}

/// Accumulates per-frame outputs and produces the session report.
#[derive(Debug, Clone)]
pub struct PoseAnalyzer {
    config: KinematicsConfig,
    angles: AngleEngine,
    com: CenterOfMassEstimator,
    trails: TrailSet,
    angle_series: Vec<TimeSeries>,
    com_x: TimeSeries,
    com_y: TimeSeries,
    com_track: Vec<ComSample>,
    sample_rate: Option<f64>,
    frames_seen: usize,
    skipped_frames: Vec<usize>,
}

impl PoseAnalyzer {
    /// Create an analyzer.
    ///
    /// Fails if the thresholds are unordered or in the wrong unit for the
    /// signals they band.
    pub fn new(config: KinematicsConfig) -> MediaResult<Self> {
        config.validate()?;
        if config.angle_thresholds.unit != SignalUnit::Degrees {
            return Err(MediaError::UnitMismatch {
                signal: SignalUnit::Degrees,
                thresholds: config.angle_thresholds.unit,
            });
        }
        if let Some(t) = &config.com_thresholds {
            if t.unit != SignalUnit::Pixels {
                return Err(MediaError::UnitMismatch {
                    signal: SignalUnit::Pixels,
                    thresholds: t.unit,
                });
            }
        }

        let scheme = config.landmark_scheme;
        let rate = config.fallback_sample_rate;
        Ok(Self {
            angles: AngleEngine::new(scheme),
            com: CenterOfMassEstimator::new(scheme),
            trails: TrailSet::new(scheme, config.trail_len),
            angle_series: JointName::ALL
                .iter()
                .map(|joint| TimeSeries::new(joint.as_str(), SignalUnit::Degrees, rate))
                .collect(),
            com_x: TimeSeries::new("COM_X", SignalUnit::Pixels, rate),
            com_y: TimeSeries::new("COM_Y", SignalUnit::Pixels, rate),
            com_track: Vec::new(),
            sample_rate: None,
            frames_seen: 0,
            skipped_frames: Vec::new(),
            config,
        })
    }

    pub fn config(&self) -> &KinematicsConfig {
        &self.config
    }

    pub fn trails(&self) -> &TrailSet {
        &self.trails
    }

    pub fn frames_seen(&self) -> usize {
        self.frames_seen
    }

    /// Session sample rate: the first rate seen, or the fallback.
    pub fn sample_rate(&self) -> f64 {
        self.sample_rate.unwrap_or(self.config.fallback_sample_rate)
    }

    /// Consume one frame's detection result.
    ///
    /// Returns `None` when the frame yields no derived data.
    pub fn process(
        &mut self,
        frame_index: usize,
        sample_rate: f64,
        result: FrameResult,
    ) -> Option<FrameAnalysis> {
        self.frames_seen += 1;
        if self.sample_rate.is_none() {
            let rate = if sample_rate.is_finite() && sample_rate > 0.0 {
                sample_rate
            } else {
                warn!(
                    reported = sample_rate,
                    fallback = self.config.fallback_sample_rate,
                    "Source reported no usable sample rate"
                );
                self.config.fallback_sample_rate
            };
            self.sample_rate = Some(rate);
        }

        match result {
            FrameResult::NotDetected => {
                debug!(frame = frame_index, "No pose detected");
                self.skip(frame_index, "not_detected");
                None
            }
            FrameResult::Detected(frame) if !self.config.landmark_scheme.covers(&frame) => {
                warn!(
                    frame = frame_index,
                    keypoints = frame.len(),
                    required = self.config.landmark_scheme.num_points,
                    "Keypoint frame does not cover the landmark scheme"
                );
                self.skip(frame_index, "incomplete");
                None
            }
            FrameResult::Detected(frame) => Some(self.derive(frame_index, &frame)),
        }
    }

    /// Record a frame that produced no keypoints.
    fn skip(&mut self, frame_index: usize, reason: &'static str) {
        self.skipped_frames.push(frame_index);
        metrics::record_frame_missing(reason);
    }

    fn derive(&mut self, frame_index: usize, frame: &KeypointFrame) -> FrameAnalysis {
        let trail_heads = self.trails.push_frame(frame);
        let angles = self.angles.compute(frame);
        for (series, (_, angle)) in self.angle_series.iter_mut().zip(angles.iter()) {
            series.push(frame_index, angle);
        }

        let center_of_mass = self.com.estimate(frame);
        self.com_x.push(frame_index, center_of_mass.x);
        self.com_y.push(frame_index, center_of_mass.y);
        self.com_track.push(ComSample {
            frame_index,
            point: center_of_mass,
        });

        metrics::record_frame_processed();
        FrameAnalysis {
            frame_index,
            angles,
            center_of_mass,
            trail_heads,
        }
    }

    /// Run the post-pass and build the session report.
    pub fn finish(self) -> MediaResult<AnalysisReport> {
        let sample_rate = self.sample_rate();
        let min_len = self.config.min_series_len;
        let angle_stability = Some(self.config.angle_stability());
        let com_stability = self.config.com_stability();

        let angles = self
            .angle_series
            .into_iter()
            .map(|series| signal_report(series, sample_rate, angle_stability, min_len))
            .collect::<MediaResult<Vec<_>>>()?;
        let center_of_mass_signals = [self.com_x, self.com_y]
            .into_iter()
            .map(|series| signal_report(series, sample_rate, com_stability, min_len))
            .collect::<MediaResult<Vec<_>>>()?;

        let frames_detected = self.com_track.len();
        info!(
            frames_seen = self.frames_seen,
            frames_detected,
            skipped = self.skipped_frames.len(),
            sample_rate,
            "Analysis complete"
        );

        Ok(AnalysisReport {
            session_id: SessionId::new(),
            created_at: Utc::now(),
            sample_rate,
            frames_seen: self.frames_seen,
            frames_detected,
            skipped_frames: self.skipped_frames,
            angles,
            center_of_mass_signals,
            center_of_mass: self.com_track,
            trails: self.trails.reports(),
        })
    }
}

/// Derivatives and, when enabled and long enough, bands for one series.
fn signal_report(
    mut series: TimeSeries,
    sample_rate: f64,
    stability: Option<StabilityConfig>,
    min_len: usize,
) -> MediaResult<SignalReport> {
    series.sample_rate = sample_rate;
    let (velocity, acceleration) = MotionDynamics::new(sample_rate).derivatives(&series.samples);

    let banding = match stability {
        None => BandingOutcome::Disabled,
        Some(_) if series.len() < min_len => {
            debug!(
                signal = %series.name,
                samples = series.len(),
                required = min_len,
                "Too few samples to band"
            );
            BandingOutcome::InsufficientSamples {
                samples: series.len(),
                required: min_len,
            }
        }
        Some(config) => {
            let bander = StabilityBander::new(config);
            let bands = bander.band_series(&series)?;
            metrics::record_signal_banded(series.unit);
            BandingOutcome::Banded {
                thresholds: config.thresholds,
                smoothed_acceleration: bander.smoothed_acceleration(&series.samples, sample_rate),
                counts: bands.counts(),
                bands,
            }
        }
    };

    Ok(SignalReport {
        series,
        velocity,
        acceleration,
        banding,
    })
}

/// Drive a source through a detector and analyze the result.
///
/// Stops after `max_frames` frames when given. Detector errors count as
/// missing detections; source errors end the session.
pub fn analyze<S, D>(
    source: &mut S,
    detector: &mut D,
    config: KinematicsConfig,
    max_frames: Option<usize>,
) -> MediaResult<AnalysisReport>
where
    S: FrameSource,
    D: PoseDetector<S::Frame>,
{
    let mut analyzer = PoseAnalyzer::new(config)?;

    while max_frames.map_or(true, |max| analyzer.frames_seen() < max) {
        let Some(frame) = source.next_frame()? else {
            break;
        };

        let result = match detector.detect(&frame.frame) {
            Ok(result) => result,
            Err(e) => {
                warn!(frame = frame.index, error = %e, "Pose detector failed, skipping frame");
                metrics::record_detection_failure();
                FrameResult::NotDetected
            }
        };
        analyzer.process(frame.index, frame.sample_rate, result);
    }

    if let Some(max) = max_frames {
        if analyzer.frames_seen() >= max {
            debug!(max_frames = max, "Frame cap reached");
        }
    }

    analyzer.finish()
}
