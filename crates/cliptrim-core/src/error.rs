//! Error types for ClipTrim.

use thiserror::Error;

/// Main error type for ClipTrim operations.
#[derive(Error, Debug)]
pub enum TrimError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Segment index {index} out of range (len {len})")]
    SegmentIndexOutOfRange { index: usize, len: usize },

    #[error("Invalid media duration: {0}")]
    InvalidDuration(f64),

    #[error("Invalid segment: start {start}, end {end}")]
    InvalidSegment { start: f64, end: f64 },

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Result type alias for ClipTrim operations.
pub type Result<T> = std::result::Result<T, TrimError>;
