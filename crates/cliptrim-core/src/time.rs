//! Segment representation and numeric helpers for boundary editing.
//!
//! All times are absolute seconds (`f64`) measured from the start of the
//! media. Pixel positions never leak into this module; the timeline surface
//! converts pointer positions to seconds before calling in.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{Result, TrimError};

/// A selected time interval `(start, end)` within the media.
///
/// A valid segment satisfies `0 <= start < end <= duration`.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct Segment {
    /// Start time in seconds (inclusive)
    pub start: f64,
    /// End time in seconds (exclusive)
    pub end: f64,
}

impl Segment {
    /// Create a new segment from start and end times.
    #[inline]
    pub const fn new(start: f64, end: f64) -> Self {
        Self { start, end }
    }

    /// Segment spanning the whole media.
    #[inline]
    pub const fn full(duration: f64) -> Self {
        Self::new(0.0, duration)
    }

    /// Length of the segment in seconds.
    #[inline]
    pub fn duration(self) -> f64 {
        self.end - self.start
    }

    /// Point halfway between start and end.
    #[inline]
    pub fn midpoint(self) -> f64 {
        (self.start + self.end) / 2.0
    }

    /// Check if two segments share any time.
    pub fn overlaps(self, other: Self) -> bool {
        self.start < other.end && other.start < self.end
    }

    /// Shift both bounds by `delta` seconds.
    #[inline]
    pub fn translate(self, delta: f64) -> Self {
        Self::new(self.start + delta, self.end + delta)
    }

    /// Check the segment lies within `[0, duration]` with a positive length.
    pub fn is_within(self, duration: f64) -> bool {
        self.start >= 0.0 && self.start < self.end && self.end <= duration
    }

    /// Validate the segment against the media duration.
    pub fn validate(self, duration: f64) -> Result<Self> {
        if self.is_within(duration) {
            Ok(self)
        } else {
            Err(TrimError::InvalidSegment {
                start: self.start,
                end: self.end,
            })
        }
    }
}

impl From<(f64, f64)> for Segment {
    fn from((start, end): (f64, f64)) -> Self {
        Self::new(start, end)
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{:.3}s, {:.3}s]", self.start, self.end)
    }
}

/// Reject durations that would make fractional timeline math non-finite.
pub fn validate_duration(duration: f64) -> Result<f64> {
    if duration.is_finite() && duration > 0.0 {
        Ok(duration)
    } else {
        Err(TrimError::InvalidDuration(duration))
    }
}

/// Bound `value` to `[min, max]`. Requires `min <= max`.
#[inline]
pub fn clamp(value: f64, min: f64, max: f64) -> f64 {
    debug_assert!(min <= max, "clamp called with min {min} > max {max}");
    value.max(min).min(max)
}

/// Return `reference` when `candidate` is within `threshold` of it,
/// otherwise `candidate` unchanged.
#[inline]
pub fn snap_to_reference(candidate: f64, reference: f64, threshold: f64) -> f64 {
    if (candidate - reference).abs() <= threshold {
        reference
    } else {
        candidate
    }
}

/// Snap tolerance for a clip of the given length.
#[inline]
pub fn snap_threshold(duration: f64, factor: f64) -> f64 {
    duration * factor
}

/// Format seconds as a clock string for handle labels.
///
/// `M:SS.cc` below one hour, `H:MM:SS.cc` from one hour up. Negative and
/// non-finite inputs render as zero.
///
/// ```
/// use cliptrim_core::format_time;
/// assert_eq!(format_time(0.0), "0:00.00");
/// assert_eq!(format_time(61.5), "1:01.50");
/// assert_eq!(format_time(3723.25), "1:02:03.25");
/// ```
pub fn format_time(seconds: f64) -> String {
    let seconds = if seconds.is_finite() {
        seconds.max(0.0)
    } else {
        0.0
    };
    let centis = (seconds * 100.0).round() as u64;
    let cc = centis % 100;
    let total_secs = centis / 100;
    let h = total_secs / 3600;
    let m = (total_secs % 3600) / 60;
    let s = total_secs % 60;
    if h > 0 {
        format!("{h}:{m:02}:{s:02}.{cc:02}")
    } else {
        format!("{m}:{s:02}.{cc:02}")
    }
}
