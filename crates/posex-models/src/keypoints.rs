//! Per-frame pose detector output.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::{ModelError, ModelResult};
use crate::{Landmark, LandmarkScheme, Point2, Point3};

/// One detector output for a single video frame.
///
/// `points`, `visibility` and (when present) `points_3d` are parallel arrays
/// sharing index-to-landmark correspondence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct KeypointFrame {
    /// Keypoints in pixel coordinates.
    pub points: Vec<Point2>,
    /// Per-keypoint confidence in [0, 1].
    pub visibility: Vec<f64>,
    /// Normalized 3D coordinates, if the detector provides them.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub points_3d: Option<Vec<Point3>>,
}

impl KeypointFrame {
    /// Create a frame, checking that all arrays have the same length.
    pub fn new(
        points: Vec<Point2>,
        visibility: Vec<f64>,
        points_3d: Option<Vec<Point3>>,
    ) -> ModelResult<Self> {
        let frame = Self {
            points,
            visibility,
            points_3d,
        };
        frame.validate()?;
        Ok(frame)
    }

    /// Frame with full confidence on every point and no 3D data.
    pub fn from_points(points: Vec<Point2>) -> Self {
        let visibility = vec![1.0; points.len()];
        Self {
            points,
            visibility,
            points_3d: None,
        }
    }

    /// Check the parallel-array invariant.
    ///
    /// Needed after deserializing, since serde fills the fields directly.
    pub fn validate(&self) -> ModelResult<()> {
        let expected = self.points.len();
        if self.visibility.len() != expected {
            return Err(ModelError::LengthMismatch {
                field: "visibility",
                expected,
                actual: self.visibility.len(),
            });
        }
        if let Some(points_3d) = &self.points_3d {
            if points_3d.len() != expected {
                return Err(ModelError::LengthMismatch {
                    field: "points_3d",
                    expected,
                    actual: points_3d.len(),
                });
            }
        }
        Ok(())
    }

    /// Number of keypoints.
    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Pixel position of a named landmark.
    ///
    /// Panics if the frame does not cover the scheme; check with
    /// [`LandmarkScheme::covers`] first.
    #[inline]
    pub fn landmark(&self, scheme: &LandmarkScheme, landmark: Landmark) -> Point2 {
        self.points[scheme.index(landmark)]
    }
}

/// Outcome of running the pose detector on one frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "status", content = "keypoints", rename_all = "snake_case")]
pub enum FrameResult {
    Detected(KeypointFrame),
    NotDetected,
}

impl FrameResult {
    pub fn is_detected(&self) -> bool {
        matches!(self, FrameResult::Detected(_))
    }
}

impl From<Option<KeypointFrame>> for FrameResult {
    fn from(value: Option<KeypointFrame>) -> Self {
        match value {
            Some(frame) => FrameResult::Detected(frame),
            None => FrameResult::NotDetected,
        }
    }
}
