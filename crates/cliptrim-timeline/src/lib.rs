//! ClipTrim Timeline - Segment list model
//!
//! Implements the data side of the trim editor:
//! - Pure interval operations (split, delete, fill-first-gap)
//! - Validation and overlap reporting
//! - Export normalisation for downstream consumers
//! - Edit commands with undo/redo

pub mod edit;
pub mod segments;

pub use edit::{EditCommand, UndoStack};
pub use segments::{
    default_segments, delete, export_ranges, fill_first_gap, overlapping_pairs, split, validate,
};
