//! Centre-of-mass proxy.
//!
//! Not a mass-weighted centroid: the unweighted mean of shoulders, hips,
//! knees and ankles.

use posex_models::{KeypointFrame, Landmark, LandmarkScheme, Point2};

use super::smoothing_utils::mean;

/// Landmarks averaged into the centre-of-mass proxy.
pub const COM_LANDMARKS: [Landmark; 8] = [
    Landmark::LShoulder,
    Landmark::RShoulder,
    Landmark::LHip,
    Landmark::RHip,
    Landmark::LKnee,
    Landmark::RKnee,
    Landmark::LAnkle,
    Landmark::RAnkle,
];

#[derive(Debug, Clone, Copy, Default)]
pub struct CenterOfMassEstimator {
    scheme: LandmarkScheme,
}

impl CenterOfMassEstimator {
    pub fn new(scheme: LandmarkScheme) -> Self {
        Self { scheme }
    }

    /// Mean of the eight body landmarks. The frame must cover the scheme.
    pub fn estimate(&self, frame: &KeypointFrame) -> Point2 {
        let (xs, ys): (Vec<f64>, Vec<f64>) = COM_LANDMARKS
            .iter()
            .map(|&l| {
                let p = frame.landmark(&self.scheme, l);
                (p.x, p.y)
            })
            .unzip();
        Point2::new(mean(&xs), mean(&ys))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mean_of_body_points() {
        let scheme = LandmarkScheme::MEDIAPIPE_POSE;
        let mut points = vec![Point2::new(9999.0, 9999.0); 33];
        for (i, &l) in COM_LANDMARKS.iter().enumerate() {
            points[scheme.index(l)] = Point2::new(i as f64 * 10.0, 100.0 + i as f64);
        }
        let com = CenterOfMassEstimator::new(scheme).estimate(&KeypointFrame::from_points(points));
        // x: mean of 0..70 step 10, y: mean of 100..107
        assert!((com.x - 35.0).abs() < 1e-9);
        assert!((com.y - 103.5).abs() < 1e-9);
    }

    #[test]
    fn test_ignores_other_landmarks() {
        let scheme = LandmarkScheme::MEDIAPIPE_POSE;
        let mut points = vec![Point2::new(50.0, 60.0); 33];
        points[scheme.index(Landmark::Nose)] = Point2::new(-1000.0, -1000.0);
        points[scheme.index(Landmark::LWrist)] = Point2::new(1000.0, 1000.0);
        let com = CenterOfMassEstimator::default().estimate(&KeypointFrame::from_points(points));
        assert_eq!(com, Point2::new(50.0, 60.0));
    }
}
