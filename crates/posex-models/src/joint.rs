//! Named joint angles.
//!
//! Eight interior angles are tracked per frame. Each is defined by a vertex
//! landmark and its two neighbours along the skeleton:
//!
//! - Elbow: shoulder, elbow, wrist
//! - Knee: hip, knee, ankle
//! - Hip: shoulder, hip, knee (flexion proxy, not the anatomical hip angle)
//! - Shoulder: elbow, shoulder, hip

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ModelError;
use crate::Landmark;

/// Joints with a tracked interior angle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum JointName {
    LElbow,
    RElbow,
    LKnee,
    RKnee,
    LHip,
    RHip,
    LShoulder,
    RShoulder,
}

impl JointName {
    /// All joints, in reporting order.
    pub const ALL: [JointName; 8] = [
        JointName::LElbow,
        JointName::RElbow,
        JointName::LKnee,
        JointName::RKnee,
        JointName::LHip,
        JointName::RHip,
        JointName::LShoulder,
        JointName::RShoulder,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            JointName::LElbow => "L_ELBOW",
            JointName::RElbow => "R_ELBOW",
            JointName::LKnee => "L_KNEE",
            JointName::RKnee => "R_KNEE",
            JointName::LHip => "L_HIP",
            JointName::RHip => "R_HIP",
            JointName::LShoulder => "L_SHOULDER",
            JointName::RShoulder => "R_SHOULDER",
        }
    }

    /// Position of this joint in [`JointName::ALL`].
    #[inline]
    pub fn ordinal(&self) -> usize {
        *self as usize
    }

    /// Landmarks `(a, vertex, c)` whose angle at `vertex` defines this joint.
    pub fn triplet(&self) -> (Landmark, Landmark, Landmark) {
        use Landmark::*;
        match self {
            JointName::LElbow => (LShoulder, LElbow, LWrist),
            JointName::RElbow => (RShoulder, RElbow, RWrist),
            JointName::LKnee => (LHip, LKnee, LAnkle),
            JointName::RKnee => (RHip, RKnee, RAnkle),
            JointName::LHip => (LShoulder, LHip, LKnee),
            JointName::RHip => (RShoulder, RHip, RKnee),
            JointName::LShoulder => (LElbow, LShoulder, LHip),
            JointName::RShoulder => (RElbow, RShoulder, RHip),
        }
    }
}

impl fmt::Display for JointName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for JointName {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        JointName::ALL
            .iter()
            .copied()
            .find(|j| j.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| ModelError::UnknownJoint(s.to_string()))
    }
}

/// The eight joint angles of one frame, in degrees.
///
/// Always complete; immutable once produced.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct JointAngleSet {
    angles: [f64; 8],
}

impl JointAngleSet {
    /// Build a set from angles ordered as [`JointName::ALL`].
    pub fn from_array(angles: [f64; 8]) -> Self {
        Self { angles }
    }

    /// Build a set by evaluating `f` for every joint.
    pub fn from_fn(mut f: impl FnMut(JointName) -> f64) -> Self {
        let mut angles = [0.0; 8];
        for joint in JointName::ALL {
            angles[joint.ordinal()] = f(joint);
        }
        Self { angles }
    }

    #[inline]
    pub fn get(&self, joint: JointName) -> f64 {
        self.angles[joint.ordinal()]
    }

    /// `(joint, degrees)` pairs in reporting order.
    pub fn iter(&self) -> impl Iterator<Item = (JointName, f64)> + '_ {
        JointName::ALL.iter().map(move |&j| (j, self.get(j)))
    }

    pub fn as_array(&self) -> &[f64; 8] {
        &self.angles
    }
}
