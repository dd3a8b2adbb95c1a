//! Named landmark lookup for the detector's keypoint scheme.
//!
//! The reference scheme is MediaPipe Pose (BlazePose, 33 keypoints):
//!
//! - 0: Nose
//! - 11/12: Left/right shoulder
//! - 13/14: Left/right elbow
//! - 15/16: Left/right wrist
//! - 23/24: Left/right hip
//! - 25/26: Left/right knee
//! - 27/28: Left/right ankle

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::KeypointFrame;

/// Anatomical landmarks the analysis refers to by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Landmark {
    Nose,
    LShoulder,
    RShoulder,
    LElbow,
    RElbow,
    LWrist,
    RWrist,
    LHip,
    RHip,
    LKnee,
    RKnee,
    LAnkle,
    RAnkle,
}

impl Landmark {
    /// All named landmarks.
    pub const ALL: &'static [Landmark] = &[
        Landmark::Nose,
        Landmark::LShoulder,
        Landmark::RShoulder,
        Landmark::LElbow,
        Landmark::RElbow,
        Landmark::LWrist,
        Landmark::RWrist,
        Landmark::LHip,
        Landmark::RHip,
        Landmark::LKnee,
        Landmark::RKnee,
        Landmark::LAnkle,
        Landmark::RAnkle,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Landmark::Nose => "NOSE",
            Landmark::LShoulder => "L_SHOULDER",
            Landmark::RShoulder => "R_SHOULDER",
            Landmark::LElbow => "L_ELBOW",
            Landmark::RElbow => "R_ELBOW",
            Landmark::LWrist => "L_WRIST",
            Landmark::RWrist => "R_WRIST",
            Landmark::LHip => "L_HIP",
            Landmark::RHip => "R_HIP",
            Landmark::LKnee => "L_KNEE",
            Landmark::RKnee => "R_KNEE",
            Landmark::LAnkle => "L_ANKLE",
            Landmark::RAnkle => "R_ANKLE",
        }
    }
}

impl fmt::Display for Landmark {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Immutable index table mapping named landmarks to detector keypoint indices.
///
/// Constructed once and handed to the engines that read keypoints; never
/// mutated at runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct LandmarkScheme {
    /// Number of keypoints the detector emits per frame.
    pub num_points: usize,
    pub nose: usize,
    pub l_shoulder: usize,
    pub r_shoulder: usize,
    pub l_elbow: usize,
    pub r_elbow: usize,
    pub l_wrist: usize,
    pub r_wrist: usize,
    pub l_hip: usize,
    pub r_hip: usize,
    pub l_knee: usize,
    pub r_knee: usize,
    pub l_ankle: usize,
    pub r_ankle: usize,
}

impl LandmarkScheme {
    /// MediaPipe Pose 33-keypoint layout.
    pub const MEDIAPIPE_POSE: LandmarkScheme = LandmarkScheme {
        num_points: 33,
        nose: 0,
        l_shoulder: 11,
        r_shoulder: 12,
        l_elbow: 13,
        r_elbow: 14,
        l_wrist: 15,
        r_wrist: 16,
        l_hip: 23,
        r_hip: 24,
        l_knee: 25,
        r_knee: 26,
        l_ankle: 27,
        r_ankle: 28,
    };

    /// Keypoint index for a named landmark.
    pub fn index(&self, landmark: Landmark) -> usize {
        match landmark {
            Landmark::Nose => self.nose,
            Landmark::LShoulder => self.l_shoulder,
            Landmark::RShoulder => self.r_shoulder,
            Landmark::LElbow => self.l_elbow,
            Landmark::RElbow => self.r_elbow,
            Landmark::LWrist => self.l_wrist,
            Landmark::RWrist => self.r_wrist,
            Landmark::LHip => self.l_hip,
            Landmark::RHip => self.r_hip,
            Landmark::LKnee => self.l_knee,
            Landmark::RKnee => self.r_knee,
            Landmark::LAnkle => self.l_ankle,
            Landmark::RAnkle => self.r_ankle,
        }
    }

    /// Highest index referenced by the table.
    pub fn max_index(&self) -> usize {
        Landmark::ALL
            .iter()
            .map(|&l| self.index(l))
            .max()
            .unwrap_or(0)
    }

    /// Whether a frame has every keypoint this table refers to.
    pub fn covers(&self, frame: &KeypointFrame) -> bool {
        frame.len() > self.max_index()
    }
}

impl Default for LandmarkScheme {
    fn default() -> Self {
        Self::MEDIAPIPE_POSE
    }
}

/// Points whose recent path is kept for trail overlays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum TrackedPoint {
    LeftWrist,
    RightWrist,
    LeftAnkle,
    RightAnkle,
}

impl TrackedPoint {
    pub const ALL: [TrackedPoint; 4] = [
        TrackedPoint::LeftWrist,
        TrackedPoint::RightWrist,
        TrackedPoint::LeftAnkle,
        TrackedPoint::RightAnkle,
    ];

    /// The landmark this trail follows.
    pub fn landmark(&self) -> Landmark {
        match self {
            TrackedPoint::LeftWrist => Landmark::LWrist,
            TrackedPoint::RightWrist => Landmark::RWrist,
            TrackedPoint::LeftAnkle => Landmark::LAnkle,
            TrackedPoint::RightAnkle => Landmark::RAnkle,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TrackedPoint::LeftWrist => "left_wrist",
            TrackedPoint::RightWrist => "right_wrist",
            TrackedPoint::LeftAnkle => "left_ankle",
            TrackedPoint::RightAnkle => "right_ankle",
        }
    }
}

impl fmt::Display for TrackedPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
