//! Frame sources feeding the analysis.
//!
//! A source yields frames lazily, in order, each tagged with its index and
//! the sample rate. Two sources ship with the crate:
//! - [`ReplaySource`]: JSON-lines dump of detector output, one record per frame
//! - `VideoSource` (feature `opencv`): raster frames from a video file

use std::collections::VecDeque;
use std::fs::File;
use std::io::{BufRead, BufReader, Lines};
use std::path::{Path, PathBuf};

use posex_models::KeypointFrame;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{MediaError, MediaResult};

/// One frame from a source.
#[derive(Debug, Clone)]
pub struct SourceFrame<F> {
    pub frame: F,
    pub index: usize,
    /// Frames per second of the source.
    pub sample_rate: f64,
}

/// Ordered, finite producer of frames.
pub trait FrameSource {
    type Frame;

    /// Next frame, or `None` once the source is exhausted.
    fn next_frame(&mut self) -> MediaResult<Option<SourceFrame<Self::Frame>>>;
}

/// Detector output recorded for one frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordedFrame {
    pub frame_index: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sample_rate: Option<f64>,
    /// `None` when the detector found no pose.
    #[serde(default)]
    pub keypoints: Option<KeypointFrame>,
}

impl RecordedFrame {
    pub fn detected(frame_index: usize, keypoints: KeypointFrame) -> Self {
        Self {
            frame_index,
            sample_rate: None,
            keypoints: Some(keypoints),
        }
    }

    pub fn missing(frame_index: usize) -> Self {
        Self {
            frame_index,
            sample_rate: None,
            keypoints: None,
        }
    }
}

/// Where replayed records come from.
#[derive(Debug)]
enum Records {
    Memory(VecDeque<RecordedFrame>),
    /// Parsed one line at a time as frames are requested.
    Jsonl {
        path: PathBuf,
        lines: Lines<BufReader<File>>,
        line_no: usize,
    },
}

/// Replays recorded detector output.
///
/// The session sample rate is the first record's rate when it carries a
/// positive one, otherwise the default given at construction.
#[derive(Debug)]
pub struct ReplaySource {
    records: Records,
    /// First record, read ahead to learn the sample rate.
    peeked: Option<RecordedFrame>,
    sample_rate: f64,
    frames_read: usize,
}

impl ReplaySource {
    /// Replay in-memory records.
    pub fn from_records(records: Vec<RecordedFrame>, default_sample_rate: f64) -> Self {
        let sample_rate = records
            .first()
            .and_then(|r| usable_rate(r.sample_rate))
            .unwrap_or(default_sample_rate);
        Self {
            records: Records::Memory(records.into()),
            peeked: None,
            sample_rate,
            frames_read: 0,
        }
    }

    /// Open a JSON-lines recording. Blank lines are skipped.
    ///
    /// Fails with [`MediaError::SourceUnavailable`] if the file cannot be
    /// opened. Only the first record is parsed here; later lines are parsed
    /// as frames are requested, so a malformed line surfaces as
    /// [`MediaError::MalformedRecord`] only once it is reached.
    pub fn from_jsonl<P: AsRef<Path>>(path: P, default_sample_rate: f64) -> MediaResult<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| {
            MediaError::source_unavailable(format!("{}: {}", path.display(), e))
        })?;

        let mut source = Self {
            records: Records::Jsonl {
                path: path.to_path_buf(),
                lines: BufReader::new(file).lines(),
                line_no: 0,
            },
            peeked: None,
            sample_rate: default_sample_rate,
            frames_read: 0,
        };
        source.peeked = source.read_record()?;
        if let Some(rate) = source.peeked.as_ref().and_then(|r| usable_rate(r.sample_rate)) {
            source.sample_rate = rate;
        }

        debug!(
            path = %path.display(),
            sample_rate = source.sample_rate,
            empty = source.peeked.is_none(),
            "Opened keypoint recording"
        );
        Ok(source)
    }

    pub fn sample_rate(&self) -> f64 {
        self.sample_rate
    }

    /// Frames handed out so far.
    pub fn frames_read(&self) -> usize {
        self.frames_read
    }

    fn read_record(&mut self) -> MediaResult<Option<RecordedFrame>> {
        if let Some(record) = self.peeked.take() {
            return Ok(Some(record));
        }

        match &mut self.records {
            Records::Memory(records) => Ok(records.pop_front()),
            Records::Jsonl {
                path,
                lines,
                line_no,
            } => {
                for line in lines.by_ref() {
                    *line_no += 1;
                    let line = line?;
                    if line.trim().is_empty() {
                        continue;
                    }
                    return serde_json::from_str(&line).map(Some).map_err(|source| {
                        warn!(path = %path.display(), line = *line_no, "Malformed keypoint record");
                        MediaError::MalformedRecord {
                            line: *line_no,
                            source,
                        }
                    });
                }
                Ok(None)
            }
        }
    }
}

fn usable_rate(rate: Option<f64>) -> Option<f64> {
    rate.filter(|r| r.is_finite() && *r > 0.0)
}

impl FrameSource for ReplaySource {
    type Frame = RecordedFrame;

    fn next_frame(&mut self) -> MediaResult<Option<SourceFrame<RecordedFrame>>> {
        let Some(record) = self.read_record()? else {
            return Ok(None);
        };
        self.frames_read += 1;
        Ok(Some(SourceFrame {
            index: record.frame_index,
            sample_rate: self.sample_rate,
            frame: record,
        }))
    }
}

#[cfg(feature = "opencv")]
pub use video::VideoSource;

#[cfg(feature = "opencv")]
mod video {
    use opencv::core::Mat;
    use opencv::prelude::{MatTraitConst, VideoCaptureTrait, VideoCaptureTraitConst};
    use opencv::videoio::{VideoCapture, CAP_ANY, CAP_PROP_FPS};
    use std::path::Path;
    use tracing::info;

    use super::{FrameSource, SourceFrame};
    use crate::error::{MediaError, MediaResult};

    /// BGR frames decoded from a video file with OpenCV.
    pub struct VideoSource {
        cap: VideoCapture,
        sample_rate: f64,
        next_index: usize,
        finished: bool,
    }

    impl VideoSource {
        /// Open a video. Unreadable files are [`MediaError::SourceUnavailable`].
        pub fn open<P: AsRef<Path>>(path: P, fallback_sample_rate: f64) -> MediaResult<Self> {
            let path = path.as_ref();
            let path_str = path.to_str().unwrap_or("");
            if path_str.is_empty() {
                return Err(MediaError::source_unavailable("Empty video path"));
            }

            let cap = VideoCapture::from_file(path_str, CAP_ANY).map_err(|e| {
                MediaError::source_unavailable(format!("Failed to open video: {}", e))
            })?;
            if !cap.is_opened().unwrap_or(false) {
                return Err(MediaError::source_unavailable(format!(
                    "Failed to open video file: {}",
                    path_str
                )));
            }

            let fps = cap.get(CAP_PROP_FPS).unwrap_or(0.0);
            let sample_rate = if fps.is_finite() && fps > 0.0 {
                fps
            } else {
                fallback_sample_rate
            };
            info!(path = %path.display(), fps = sample_rate, "Opened video source");

            Ok(Self {
                cap,
                sample_rate,
                next_index: 0,
                finished: false,
            })
        }

        pub fn sample_rate(&self) -> f64 {
            self.sample_rate
        }
    }

    impl FrameSource for VideoSource {
        type Frame = Mat;

        fn next_frame(&mut self) -> MediaResult<Option<SourceFrame<Mat>>> {
            if self.finished {
                return Ok(None);
            }

            let mut frame = Mat::default();
            let ok = self
                .cap
                .read(&mut frame)
                .map_err(|e| MediaError::frame_read(self.next_index, e.to_string()))?;
            if !ok || frame.empty() {
                self.finished = true;
                return Ok(None);
            }

            let index = self.next_index;
            self.next_index += 1;
            Ok(Some(SourceFrame {
                frame,
                index,
                sample_rate: self.sample_rate,
            }))
        }
    }
}
