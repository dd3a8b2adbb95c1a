//! Session processing: recording in, report and timelines out.
//!
//! Output layout under `output_dir/<session_id>/`:
//! - `report.json`: the full [`AnalysisReport`]
//! - `timeline_<SIGNAL>.png`: one band timeline per banded signal

use std::path::{Path, PathBuf};

use chrono::Utc;
use metrics::counter;
use posex_media::{analyze, save_band_timeline, KinematicsConfig, ReplayDetector, ReplaySource};
use posex_models::{AnalysisReport, SessionId, StabilityBand};
use tracing::{debug, Instrument};

use crate::config::WorkerConfig;
use crate::error::{WorkerError, WorkerResult};
use crate::logging::SessionLogger;

const SESSIONS_COMPLETED_TOTAL: &str = "posex_sessions_completed_total";
const SESSIONS_FAILED_TOTAL: &str = "posex_sessions_failed_total";

/// Files written for one session.
#[derive(Debug, Clone)]
pub struct SessionOutcome {
    pub session_id: SessionId,
    pub session_dir: PathBuf,
    pub report_path: PathBuf,
    pub timelines: Vec<PathBuf>,
    pub report: AnalysisReport,
}

/// Runs analysis sessions with a fixed configuration.
#[derive(Debug, Clone)]
pub struct SessionProcessor {
    config: WorkerConfig,
    kinematics: KinematicsConfig,
}

impl SessionProcessor {
    pub fn new(config: WorkerConfig) -> WorkerResult<Self> {
        let kinematics = config.kinematics()?;
        kinematics.validate()?;
        Ok(Self { config, kinematics })
    }

    pub fn config(&self) -> &WorkerConfig {
        &self.config
    }

    /// Analyze the configured input.
    pub async fn run_configured(&self) -> WorkerResult<SessionOutcome> {
        let input = self.config.input.clone().ok_or_else(|| {
            WorkerError::config_error("No input given (set POSEX_INPUT or pass a path)")
        })?;
        self.run(&input).await
    }

    /// Analyze one keypoint recording and write its outputs.
    pub async fn run(&self, input: &Path) -> WorkerResult<SessionOutcome> {
        let session_id = SessionId::new();
        let logger = SessionLogger::new(&session_id, "pose_analysis");
        let span = logger.create_span();

        let result = self
            .run_session(session_id, input, &logger)
            .instrument(span)
            .await;
        match &result {
            Ok(_) => counter!(SESSIONS_COMPLETED_TOTAL).increment(1),
            Err(e) => {
                logger.log_error(&e.to_string());
                counter!(SESSIONS_FAILED_TOTAL).increment(1);
            }
        }
        result
    }

    async fn run_session(
        &self,
        session_id: SessionId,
        input: &Path,
        logger: &SessionLogger,
    ) -> WorkerResult<SessionOutcome> {
        let started = Utc::now();
        check_input(input)?;
        logger.log_start(&format!("analyzing {}", input.display()));

        let mut report = self.analyze_blocking(input.to_path_buf()).await?;
        report.session_id = session_id;

        if !report.skipped_frames.is_empty() {
            logger.log_warning(&format!(
                "{} of {} frames had no usable detection",
                report.skipped_frames.len(),
                report.frames_seen
            ));
        }
        for signal in report.banded_signals() {
            if let Some(bands) = signal.banding.bands() {
                debug!(
                    signal = %signal.name(),
                    amber = bands.count(StabilityBand::Amber),
                    red = bands.count(StabilityBand::Red),
                    "Signal bands"
                );
            }
        }

        let session_dir = self.config.output_dir.join(session_id.to_string());
        tokio::fs::create_dir_all(&session_dir).await?;

        let report_path = session_dir.join("report.json");
        tokio::fs::write(&report_path, serde_json::to_vec_pretty(&report)?).await?;
        logger.log_progress(&format!("wrote {}", report_path.display()));

        let timelines = self.write_timelines(&report, &session_dir).await?;

        let elapsed_ms = (Utc::now() - started).num_milliseconds();
        logger.log_completion(&format!(
            "{} frames, {} timelines in {} ms",
            report.frames_seen,
            timelines.len(),
            elapsed_ms
        ));

        Ok(SessionOutcome {
            session_id,
            session_dir,
            report_path,
            timelines,
            report,
        })
    }

    /// Run the synchronous analysis off the async runtime.
    async fn analyze_blocking(&self, input: PathBuf) -> WorkerResult<AnalysisReport> {
        let kinematics = self.kinematics.clone();
        let max_frames = self.config.frame_cap();

        tokio::task::spawn_blocking(move || {
            let mut source = ReplaySource::from_jsonl(&input, kinematics.fallback_sample_rate)?;
            let report = analyze(&mut source, &mut ReplayDetector, kinematics, max_frames)?;
            Ok::<_, WorkerError>(report)
        })
        .await
        .map_err(|e| WorkerError::processing_failed(format!("Analysis task failed: {}", e)))?
    }

    async fn write_timelines(
        &self,
        report: &AnalysisReport,
        session_dir: &Path,
    ) -> WorkerResult<Vec<PathBuf>> {
        let jobs: Vec<(PathBuf, _)> = report
            .banded_signals()
            .filter_map(|signal| {
                let bands = signal.banding.bands()?.clone();
                let path = session_dir.join(format!("timeline_{}.png", signal.name()));
                Some((path, bands))
            })
            .collect();
        let (width, height) = (self.config.timeline_width, self.config.timeline_height);

        tokio::task::spawn_blocking(move || {
            jobs.into_iter()
                .map(|(path, bands)| {
                    save_band_timeline(&path, &bands, width, height)?;
                    Ok::<_, WorkerError>(path)
                })
                .collect::<WorkerResult<Vec<_>>>()
        })
        .await
        .map_err(|e| WorkerError::processing_failed(format!("Timeline task failed: {}", e)))?
    }
}

/// Only keypoint recordings are accepted; pose detection runs upstream.
fn check_input(input: &Path) -> WorkerResult<()> {
    match input.extension().and_then(|ext| ext.to_str()) {
        Some("jsonl") | Some("ndjson") => Ok(()),
        _ => Err(WorkerError::unsupported_input(format!(
            "{}: expected a .jsonl keypoint recording",
            input.display()
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use posex_media::RecordedFrame;
    use posex_models::{KeypointFrame, Point2};
    use std::io::Write;

    fn write_recording(dir: &Path, frames: usize, missing: &[usize]) -> PathBuf {
        let path = dir.join("session.jsonl");
        let mut file = std::fs::File::create(&path).unwrap();
        for i in 0..frames {
            let record = if missing.contains(&i) {
                RecordedFrame::missing(i)
            } else {
                let points = (0..33)
                    .map(|k| Point2::new(100.0 + 7.0 * k as f64, 50.0 + 11.0 * k as f64))
                    .collect();
                RecordedFrame::detected(i, KeypointFrame::from_points(points))
            };
            writeln!(file, "{}", serde_json::to_string(&record).unwrap()).unwrap();
        }
        path
    }

    fn processor(output_dir: &Path) -> SessionProcessor {
        SessionProcessor::new(WorkerConfig {
            output_dir: output_dir.to_path_buf(),
            timeline_width: 50,
            timeline_height: 4,
            ..Default::default()
        })
        .unwrap()
    }

    #[tokio::test]
    async fn test_run_writes_report_and_timelines() {
        let dir = tempfile::tempdir().unwrap();
        let input = write_recording(dir.path(), 12, &[4]);
        let outcome = processor(&dir.path().join("out")).run(&input).await.unwrap();

        assert_eq!(outcome.report.frames_seen, 12);
        assert_eq!(outcome.report.skipped_frames, vec![4]);
        assert!(outcome.report_path.exists());
        assert_eq!(outcome.timelines.len(), 8);
        assert!(outcome
            .timelines
            .iter()
            .any(|p| p.ends_with("timeline_L_ELBOW.png")));

        let written: AnalysisReport =
            serde_json::from_slice(&std::fs::read(&outcome.report_path).unwrap()).unwrap();
        assert_eq!(written.session_id, outcome.session_id);
        assert_eq!(written.angles.len(), 8);
    }

    #[tokio::test]
    async fn test_short_recording_has_no_timelines() {
        let dir = tempfile::tempdir().unwrap();
        let input = write_recording(dir.path(), 3, &[1]);
        let outcome = processor(dir.path()).run(&input).await.unwrap();
        assert!(outcome.timelines.is_empty());
        assert_eq!(outcome.report.frames_detected, 2);
    }

    #[tokio::test]
    async fn test_missing_recording_fails() {
        let dir = tempfile::tempdir().unwrap();
        let err = processor(dir.path())
            .run(&dir.path().join("absent.jsonl"))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            WorkerError::Media(posex_media::MediaError::SourceUnavailable(_))
        ));
    }

    #[test]
    fn test_rejects_video_input() {
        let err = tokio_test::block_on(processor(Path::new("/tmp")).run(Path::new("dance.mp4")))
            .unwrap_err();
        assert!(matches!(err, WorkerError::UnsupportedInput(_)));
    }

    #[tokio::test]
    async fn test_run_configured_requires_input() {
        let err = processor(Path::new("/tmp")).run_configured().await.unwrap_err();
        assert!(matches!(err, WorkerError::ConfigError(_)));
    }
}
