//! ClipTrim Core - Foundation types for segment trimming
//!
//! This crate provides the fundamental types used throughout ClipTrim:
//! - Segment representation (`Segment`) in absolute seconds
//! - Clamp/snap helpers shared by every boundary edit
//! - Human-readable time formatting for handle labels
//! - Editor configuration (`TrimConfig`)

pub mod config;
pub mod error;
pub mod time;

pub use config::TrimConfig;
pub use error::{Result, TrimError};
pub use time::{clamp, format_time, snap_threshold, snap_to_reference, validate_duration, Segment};

/// Default tuning constants for the trim editor.
pub mod defaults {
    /// Shortest segment a resize may produce, in seconds.
    pub const MIN_DURATION: f64 = 1.0;

    /// Snap tolerance as a fraction of the media duration.
    pub const SNAP_FACTOR: f64 = 0.02;

    /// Offset past a dragged left boundary used for the preview frame.
    pub const SEEK_EPSILON: f64 = 0.01;

    /// Maximum undo history depth.
    pub const UNDO_DEPTH: usize = 200;
}
