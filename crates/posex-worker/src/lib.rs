//! Pose analysis worker.
//!
//! This crate provides:
//! - Environment-driven configuration
//! - Session processing: keypoint recording in, report and band timelines out
//! - Structured session logging

pub mod config;
pub mod error;
pub mod logging;
pub mod processor;

pub use config::WorkerConfig;
pub use error::{WorkerError, WorkerResult};
pub use logging::SessionLogger;
pub use processor::{SessionOutcome, SessionProcessor};
