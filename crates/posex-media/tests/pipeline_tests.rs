//! End-to-end analysis over synthetic keypoint recordings.

use std::f64::consts::PI;
use std::io::Write;

use posex_media::{
    analyze, KinematicsConfig, MediaError, PoseAnalyzer, RecordedFrame, ReplayDetector,
    ReplaySource,
};
use posex_models::{
    BandingOutcome, FrameResult, JointName, KeypointFrame, Landmark, LandmarkScheme, Point2,
    StabilityBand,
};

const SCHEME: LandmarkScheme = LandmarkScheme::MEDIAPIPE_POSE;

/// Upright pose with the left upper arm hanging straight down.
fn base_pose() -> Vec<Point2> {
    let mut points = vec![Point2::new(200.0, 60.0); 33];
    for (landmark, (x, y)) in [
        (Landmark::LShoulder, (200.0, 100.0)),
        (Landmark::RShoulder, (260.0, 100.0)),
        (Landmark::LElbow, (200.0, 200.0)),
        (Landmark::RElbow, (280.0, 190.0)),
        (Landmark::LWrist, (200.0, 300.0)),
        (Landmark::RWrist, (300.0, 270.0)),
        (Landmark::LHip, (210.0, 260.0)),
        (Landmark::RHip, (250.0, 260.0)),
        (Landmark::LKnee, (205.0, 350.0)),
        (Landmark::RKnee, (255.0, 350.0)),
        (Landmark::LAnkle, (205.0, 440.0)),
        (Landmark::RAnkle, (255.0, 440.0)),
    ] {
        points[SCHEME.index(landmark)] = Point2::new(x, y);
    }
    points
}

/// Pose whose left elbow angle is `theta` degrees.
fn pose_with_elbow_angle(theta: f64) -> KeypointFrame {
    let mut points = base_pose();
    let elbow = points[SCHEME.index(Landmark::LElbow)];
    let rad = theta.to_radians();
    points[SCHEME.index(Landmark::LWrist)] =
        elbow + Point2::new(100.0 * rad.sin(), -100.0 * rad.cos());
    KeypointFrame::from_points(points)
}

/// Left elbow oscillating around 90 degrees at 2 Hz, sampled at 30 fps.
fn elbow_oscillation(amplitude: f64, frames: usize) -> Vec<RecordedFrame> {
    (0..frames)
        .map(|i| {
            let theta = 90.0 + amplitude * (2.0 * PI * 2.0 * i as f64 / 30.0).sin();
            RecordedFrame::detected(i, pose_with_elbow_angle(theta))
        })
        .collect()
}

fn run(records: Vec<RecordedFrame>) -> posex_models::AnalysisReport {
    let mut source = ReplaySource::from_records(records, 30.0);
    analyze(&mut source, &mut ReplayDetector, KinematicsConfig::default(), None).unwrap()
}

#[test]
fn static_pose_is_constant_and_green() {
    let frame = KeypointFrame::from_points(base_pose());
    let records = (0..10)
        .map(|i| RecordedFrame::detected(i, frame.clone()))
        .collect();
    let report = run(records);

    assert_eq!(report.angles.len(), 8);
    for signal in &report.angles {
        let first = signal.series.samples[0];
        assert_eq!(signal.series.len(), 10);
        assert!(signal.series.samples.iter().all(|&a| (a - first).abs() < 1e-9));
        assert!(signal.acceleration.iter().all(|a| a.abs() < 1e-6));
        let bands = signal.banding.bands().unwrap();
        assert_eq!(bands.count(StabilityBand::Green), 10);
    }
}

#[test]
fn elbow_angle_follows_geometry() {
    let mut analyzer = PoseAnalyzer::new(KinematicsConfig::default()).unwrap();
    let analysis = analyzer
        .process(0, 30.0, FrameResult::Detected(pose_with_elbow_angle(120.0)))
        .unwrap();
    assert!((analysis.angles.get(JointName::LElbow) - 120.0).abs() < 1e-6);
}

#[test]
fn violent_oscillation_is_red() {
    let report = run(elbow_oscillation(30.0, 60));
    let elbow = report.angle("L_ELBOW").unwrap();
    let bands = elbow.banding.bands().unwrap();
    assert_eq!(bands.len(), 60);
    assert_eq!(bands.count(StabilityBand::Red), 60);

    // The other arm never moves.
    let right = report.angle("R_ELBOW").unwrap();
    assert_eq!(right.banding.bands().unwrap().count(StabilityBand::Green), 60);
}

#[test]
fn moderate_oscillation_is_amber() {
    let report = run(elbow_oscillation(2.5, 60));
    let elbow = report.angle("L_ELBOW").unwrap();
    assert_eq!(elbow.banding.bands().unwrap().count(StabilityBand::Amber), 60);
}

#[test]
fn missing_middle_frame_is_skipped() {
    let frame = KeypointFrame::from_points(base_pose());
    let records = vec![
        RecordedFrame::detected(0, frame.clone()),
        RecordedFrame::missing(1),
        RecordedFrame::detected(2, frame),
    ];
    let report = run(records);

    assert_eq!(report.frames_seen, 3);
    assert_eq!(report.frames_detected, 2);
    assert_eq!(report.skipped_frames, vec![1]);
    for signal in &report.angles {
        assert_eq!(signal.series.samples.len(), 2);
        assert_eq!(signal.series.frame_indices, vec![0, 2]);
        assert!(signal.series.has_gaps());
        assert!(matches!(
            signal.banding,
            BandingOutcome::InsufficientSamples { samples: 2, .. }
        ));
    }
    assert_eq!(report.center_of_mass.len(), 2);
}

#[test]
fn trails_keep_last_positions() {
    let config = KinematicsConfig {
        trail_len: 5,
        ..Default::default()
    };
    let mut source = ReplaySource::from_records(elbow_oscillation(10.0, 12), 30.0);
    let report = analyze(&mut source, &mut ReplayDetector, config, None).unwrap();

    assert_eq!(report.trails.len(), 4);
    let left_wrist = &report.trails[0];
    assert_eq!(left_wrist.points.len(), 5);
    let expected: Vec<Point2> = elbow_oscillation(10.0, 12)[7..]
        .iter()
        .filter_map(|r| r.keypoints.as_ref())
        .map(|k| k.landmark(&SCHEME, Landmark::LWrist))
        .collect();
    assert_eq!(left_wrist.points, expected);
}

#[test]
fn replay_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    for record in elbow_oscillation(30.0, 20) {
        writeln!(file, "{}", serde_json::to_string(&record).unwrap()).unwrap();
    }

    let mut source = ReplaySource::from_jsonl(file.path(), 30.0).unwrap();
    let report = analyze(&mut source, &mut ReplayDetector, KinematicsConfig::default(), Some(15))
        .unwrap();
    assert_eq!(report.frames_seen, 15);
    assert_eq!(report.angle("L_ELBOW").unwrap().series.len(), 15);

    let json = serde_json::to_string(&report).unwrap();
    assert!(json.contains("\"L_ELBOW\""));
}

#[test]
fn malformed_line_past_frame_cap_is_never_read() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    for record in elbow_oscillation(30.0, 6) {
        writeln!(file, "{}", serde_json::to_string(&record).unwrap()).unwrap();
    }
    writeln!(file, "{{truncated record").unwrap();

    let mut source = ReplaySource::from_jsonl(file.path(), 30.0).unwrap();
    let report =
        analyze(&mut source, &mut ReplayDetector, KinematicsConfig::default(), Some(5)).unwrap();
    assert_eq!(report.frames_seen, 5);
    assert_eq!(source.frames_read(), 5);

    let mut source = ReplaySource::from_jsonl(file.path(), 30.0).unwrap();
    let err = analyze(&mut source, &mut ReplayDetector, KinematicsConfig::default(), None)
        .unwrap_err();
    assert!(matches!(err, MediaError::MalformedRecord { line: 7, .. }));
}

#[test]
fn unreadable_source_is_fatal() {
    let err = ReplaySource::from_jsonl("/nonexistent/session.jsonl", 30.0).unwrap_err();
    assert!(matches!(err, MediaError::SourceUnavailable(_)));
}
