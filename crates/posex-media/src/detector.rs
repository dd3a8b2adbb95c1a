//! Pose detector seam.
//!
//! Detection itself lives outside this crate. A detector maps one frame to a
//! complete keypoint frame or an explicit "not detected".

use posex_models::FrameResult;
use tracing::warn;

use crate::error::{MediaError, MediaResult};
use crate::source::RecordedFrame;

/// Maps a frame to keypoints.
///
/// `Err` means the detector itself broke on this frame; the pipeline treats
/// it like a missing detection and moves on.
#[cfg_attr(test, mockall::automock)]
pub trait PoseDetector<F> {
    fn detect(&mut self, frame: &F) -> MediaResult<FrameResult>;
}

/// Detector for recorded output: returns whatever was recorded.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReplayDetector;

impl PoseDetector<RecordedFrame> for ReplayDetector {
    fn detect(&mut self, frame: &RecordedFrame) -> MediaResult<FrameResult> {
        match &frame.keypoints {
            Some(keypoints) => {
                if let Err(e) = keypoints.validate() {
                    warn!(frame = frame.frame_index, error = %e, "Discarding inconsistent keypoints");
                    return Err(MediaError::detection_failed(e.to_string()));
                }
                Ok(FrameResult::Detected(keypoints.clone()))
            }
            None => Ok(FrameResult::NotDetected),
        }
    }
}
