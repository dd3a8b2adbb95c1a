//! Joint angle computation from one keypoint frame.
//!
//! Each angle is the interior angle at a vertex keypoint B between the
//! segments to its neighbours A and C:
//!
//! ```text
//! cos(θ) = (BA · BC) / (|BA| |BC| + ε)
//! ```
//!
//! The cosine is clamped to [-1, 1] before `acos`, so results are always in
//! [0°, 180°]. ε keeps degenerate (zero-length) segments finite.

use posex_models::{JointAngleSet, JointName, KeypointFrame, LandmarkScheme, Point2};

/// Guard added to the magnitude product.
pub const ANGLE_EPSILON: f64 = 1e-8;

/// Interior angle at `b` formed by `a` and `c`, in degrees.
pub fn interior_angle(a: Point2, b: Point2, c: Point2) -> f64 {
    let ba = a - b;
    let bc = c - b;
    let cos = ba.dot(&bc) / (ba.norm() * bc.norm() + ANGLE_EPSILON);
    cos.clamp(-1.0, 1.0).acos().to_degrees()
}

/// Computes the fixed set of named joint angles.
#[derive(Debug, Clone, Copy, Default)]
pub struct AngleEngine {
    scheme: LandmarkScheme,
}

impl AngleEngine {
    /// Create an engine for a detector landmark scheme.
    pub fn new(scheme: LandmarkScheme) -> Self {
        Self { scheme }
    }

    pub fn scheme(&self) -> &LandmarkScheme {
        &self.scheme
    }

    /// Angle of a single joint.
    ///
    /// The frame must cover the engine's scheme.
    pub fn joint_angle(&self, frame: &KeypointFrame, joint: JointName) -> f64 {
        let (a, b, c) = joint.triplet();
        interior_angle(
            frame.landmark(&self.scheme, a),
            frame.landmark(&self.scheme, b),
            frame.landmark(&self.scheme, c),
        )
    }

    /// All eight joint angles of a frame.
    ///
    /// The frame must cover the engine's scheme (see
    /// [`LandmarkScheme::covers`]).
    pub fn compute(&self, frame: &KeypointFrame) -> JointAngleSet {
        JointAngleSet::from_fn(|joint| self.joint_angle(frame, joint))
    }
}
