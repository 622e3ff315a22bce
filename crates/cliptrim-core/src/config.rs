//! Editor configuration.
//!
//! Loaded from JSON; every field has a default so partial files are valid.

use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::info;

use crate::defaults;
use crate::error::{Result, TrimError};

/// Tuning knobs for the trim editor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrimConfig {
    /// Shortest segment a resize may produce, in seconds.
    pub min_duration: f64,
    /// Snap tolerance as a fraction of the media duration.
    pub snap_factor: f64,
    /// Preview offset past a dragged left boundary, in seconds.
    pub seek_epsilon: f64,
    /// Maximum undo history depth.
    pub undo_depth: usize,
    /// Seek back to the first segment's start when playback ends.
    pub rewind_on_end: bool,
}

impl Default for TrimConfig {
    fn default() -> Self {
        Self {
            min_duration: defaults::MIN_DURATION,
            snap_factor: defaults::SNAP_FACTOR,
            seek_epsilon: defaults::SEEK_EPSILON,
            undo_depth: defaults::UNDO_DEPTH,
            rewind_on_end: true,
        }
    }
}

impl TrimConfig {
    /// Check that the values describe a usable editor.
    pub fn validate(self) -> Result<Self> {
        if !(self.min_duration.is_finite() && self.min_duration > 0.0) {
            return Err(TrimError::InvalidParameter(format!(
                "min_duration must be positive, got {}",
                self.min_duration
            )));
        }
        if !(self.snap_factor.is_finite() && self.snap_factor >= 0.0) {
            return Err(TrimError::InvalidParameter(format!(
                "snap_factor must be non-negative, got {}",
                self.snap_factor
            )));
        }
        if !(self.seek_epsilon.is_finite() && self.seek_epsilon >= 0.0) {
            return Err(TrimError::InvalidParameter(format!(
                "seek_epsilon must be non-negative, got {}",
                self.seek_epsilon
            )));
        }
        Ok(self)
    }

    /// Deserialize from JSON bytes and validate.
    pub fn from_json(data: &[u8]) -> Result<Self> {
        let config: Self = serde_json::from_slice(data)
            .map_err(|e| TrimError::Serialization(format!("Invalid config: {}", e)))?;
        config.validate()
    }

    /// Load configuration from a file path.
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let data = std::fs::read(path)?;
        let config = Self::from_json(&data)?;
        info!(path = %path.display(), "Loaded trim config");
        Ok(config)
    }
}
