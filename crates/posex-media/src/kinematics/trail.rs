//! Bounded recent-position history for trail overlays.

use std::collections::VecDeque;

use posex_models::{KeypointFrame, LandmarkScheme, Point2, TrackedPoint, TrailReport};

/// Upper bound on the points reserved up front; longer trails grow on push.
const PREALLOCATE_MAX: usize = 256;

/// FIFO of the most recent positions of one point.
#[derive(Debug, Clone)]
pub struct TrailTracker {
    /// Oldest point at the front.
    points: VecDeque<Point2>,
    maxlen: usize,
}

impl TrailTracker {
    /// Create a tracker that keeps at most `maxlen` points.
    pub fn new(maxlen: usize) -> Self {
        Self {
            points: VecDeque::with_capacity(maxlen.min(PREALLOCATE_MAX)),
            maxlen,
        }
    }

    /// Append a point, evicting the oldest once over capacity.
    pub fn push(&mut self, point: Point2) {
        self.points.push_back(point);
        while self.points.len() > self.maxlen {
            self.points.pop_front();
        }
    }

    /// Retained points in push order.
    pub fn points(&self) -> Vec<Point2> {
        self.points.iter().copied().collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Point2> {
        self.points.iter()
    }

    /// Most recent point.
    pub fn head(&self) -> Option<Point2> {
        self.points.back().copied()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.maxlen
    }

    pub fn clear(&mut self) {
        self.points.clear();
    }
}

/// The four trails drawn over the video: both wrists and both ankles.
#[derive(Debug, Clone)]
pub struct TrailSet {
    scheme: LandmarkScheme,
    trails: [TrailTracker; 4],
}

impl TrailSet {
    pub fn new(scheme: LandmarkScheme, maxlen: usize) -> Self {
        Self {
            scheme,
            trails: std::array::from_fn(|_| TrailTracker::new(maxlen)),
        }
    }

    fn slot(tracked: TrackedPoint) -> usize {
        match tracked {
            TrackedPoint::LeftWrist => 0,
            TrackedPoint::RightWrist => 1,
            TrackedPoint::LeftAnkle => 2,
            TrackedPoint::RightAnkle => 3,
        }
    }

    /// Push the tracked points of a frame onto their trails.
    ///
    /// Returns the points added, ordered as [`TrackedPoint::ALL`]. The frame
    /// must cover the scheme.
    pub fn push_frame(&mut self, frame: &KeypointFrame) -> [Point2; 4] {
        TrackedPoint::ALL.map(|tracked| {
            let point = frame.landmark(&self.scheme, tracked.landmark());
            self.trails[Self::slot(tracked)].push(point);
            point
        })
    }

    pub fn get(&self, tracked: TrackedPoint) -> &TrailTracker {
        &self.trails[Self::slot(tracked)]
    }

    /// Snapshot of every trail.
    pub fn reports(&self) -> Vec<TrailReport> {
        TrackedPoint::ALL
            .iter()
            .map(|&tracked| {
                let trail = self.get(tracked);
                TrailReport {
                    tracked,
                    capacity: trail.capacity(),
                    points: trail.points(),
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use posex_models::Landmark;

    fn pt(i: usize) -> Point2 {
        Point2::new(i as f64, 2.0 * i as f64)
    }

    #[test]
    fn test_keeps_last_maxlen_in_order() {
        for k in [0usize, 1, 7, 40] {
            let maxlen = 5;
            let mut trail = TrailTracker::new(maxlen);
            for i in 0..maxlen + k {
                trail.push(pt(i));
            }
            let expected: Vec<Point2> = (k..maxlen + k).map(pt).collect();
            assert_eq!(trail.len(), maxlen);
            assert_eq!(trail.points(), expected);
        }
    }

    #[test]
    fn test_under_capacity() {
        let mut trail = TrailTracker::new(40);
        trail.push(pt(1));
        trail.push(pt(2));
        assert_eq!(trail.points(), vec![pt(1), pt(2)]);
        assert_eq!(trail.head(), Some(pt(2)));
        trail.clear();
        assert!(trail.is_empty());
    }

    #[test]
    fn test_huge_capacity_allocates_lazily() {
        for maxlen in [usize::MAX, 1 << 60] {
            let mut trail = TrailTracker::new(maxlen);
            for i in 0..300 {
                trail.push(pt(i));
            }
            assert_eq!(trail.len(), 300);
            assert_eq!(trail.capacity(), maxlen);
            assert_eq!(trail.head(), Some(pt(299)));
        }
    }

    #[test]
    fn test_zero_capacity_holds_nothing() {
        let mut trail = TrailTracker::new(0);
        trail.push(pt(1));
        assert!(trail.is_empty());
    }

    #[test]
    fn test_trail_set_tracks_wrists_and_ankles() {
        let scheme = LandmarkScheme::MEDIAPIPE_POSE;
        let mut set = TrailSet::new(scheme, 3);
        for frame_no in 0..5 {
            let mut points = vec![Point2::default(); 33];
            points[scheme.index(Landmark::LWrist)] = Point2::new(frame_no as f64, 0.0);
            points[scheme.index(Landmark::RAnkle)] = Point2::new(0.0, frame_no as f64);
            let added = set.push_frame(&KeypointFrame::from_points(points));
            assert_eq!(added[0], Point2::new(frame_no as f64, 0.0));
        }

        let left_wrist = set.get(TrackedPoint::LeftWrist).points();
        assert_eq!(
            left_wrist,
            vec![Point2::new(2.0, 0.0), Point2::new(3.0, 0.0), Point2::new(4.0, 0.0)]
        );
        let right_ankle = set.get(TrackedPoint::RightAnkle).points();
        assert_eq!(right_ankle.last(), Some(&Point2::new(0.0, 4.0)));

        let reports = set.reports();
        assert_eq!(reports.len(), 4);
        assert!(reports.iter().all(|r| r.capacity == 3 && r.points.len() == 3));
    }
}
