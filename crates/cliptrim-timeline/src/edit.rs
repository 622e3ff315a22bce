//! Reversible edits of the segment list and the bounded history that
//! records them.
//!
//! The session applies an `EditCommand`, then hands it to `UndoStack`;
//! undo returns the command's inverse for the session to apply in turn.

use std::collections::VecDeque;

use cliptrim_core::{Result, Segment, TrimError};

use crate::segments;

// ── Edit commands ───────────────────────────────────────────────

/// A reversible edit of a segment list.
#[derive(Debug, Clone, PartialEq)]
pub enum EditCommand {
    /// Split the segment at `index` in half.
    Split { index: usize },
    /// Join `index` and `index + 1` back into one segment.
    Merge { index: usize },
    /// Insert `segment` at `index`.
    Insert { index: usize, segment: Segment },
    /// Remove the segment at `index`. `segment` is kept for undo.
    Delete { index: usize, segment: Segment },
    /// Replace the bounds of one segment (a completed drag session).
    Replace {
        index: usize,
        before: Segment,
        after: Segment,
    },
    /// Replace the whole list (fill-gap sorts, reset discards).
    SetAll {
        before: Vec<Segment>,
        after: Vec<Segment>,
    },
}

impl EditCommand {
    /// Build a `Delete` for `index`, capturing the removed segment.
    pub fn delete(list: &[Segment], index: usize) -> Result<Self> {
        let segment = *list.get(index).ok_or(TrimError::SegmentIndexOutOfRange {
            index,
            len: list.len(),
        })?;
        Ok(Self::Delete { index, segment })
    }

    /// Apply this command to a segment list, mutating it in place.
    ///
    /// On error the list is left unchanged.
    pub fn apply(&self, list: &mut Vec<Segment>) -> Result<()> {
        match self {
            Self::Split { index } => {
                *list = segments::split(list, *index)?;
            }
            Self::Merge { index } => {
                let len = list.len();
                if *index + 1 >= len {
                    return Err(TrimError::SegmentIndexOutOfRange { index: *index, len });
                }
                let right = list.remove(*index + 1);
                list[*index].end = right.end;
            }
            Self::Insert { index, segment } => {
                if *index > list.len() {
                    return Err(TrimError::SegmentIndexOutOfRange {
                        index: *index,
                        len: list.len(),
                    });
                }
                list.insert(*index, *segment);
            }
            Self::Delete { index, .. } => {
                *list = segments::delete(list, *index)?;
            }
            Self::Replace { index, after, .. } => {
                let len = list.len();
                let slot = list
                    .get_mut(*index)
                    .ok_or(TrimError::SegmentIndexOutOfRange { index: *index, len })?;
                *slot = *after;
            }
            Self::SetAll { after, .. } => {
                *list = after.clone();
            }
        }
        Ok(())
    }

    /// Produce the inverse command (for undo).
    pub fn inverse(&self) -> Self {
        match self {
            Self::Split { index } => Self::Merge { index: *index },
            Self::Merge { index } => Self::Split { index: *index },
            Self::Insert { index, segment } => Self::Delete {
                index: *index,
                segment: *segment,
            },
            Self::Delete { index, segment } => Self::Insert {
                index: *index,
                segment: *segment,
            },
            Self::Replace {
                index,
                before,
                after,
            } => Self::Replace {
                index: *index,
                before: *after,
                after: *before,
            },
            Self::SetAll { before, after } => Self::SetAll {
                before: after.clone(),
                after: before.clone(),
            },
        }
    }

    /// Short name for logging.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Split { .. } => "split",
            Self::Merge { .. } => "merge",
            Self::Insert { .. } => "insert",
            Self::Delete { .. } => "delete",
            Self::Replace { .. } => "replace",
            Self::SetAll { .. } => "set_all",
        }
    }
}

// ── History ─────────────────────────────────────────────────────

/// Bounded edit history.
///
/// `done` holds applied commands, oldest first; once it reaches `depth`
/// the oldest is dropped. `undone` is emptied by every new edit.
#[derive(Debug)]
pub struct UndoStack {
    done: VecDeque<EditCommand>,
    undone: Vec<EditCommand>,
    depth: usize,
}

impl UndoStack {
    pub fn new(depth: usize) -> Self {
        Self {
            done: VecDeque::with_capacity(depth.min(64)),
            undone: Vec::new(),
            depth,
        }
    }

    /// Record a command the caller has already applied.
    pub fn push(&mut self, command: EditCommand) {
        self.undone.clear();
        if self.depth == 0 {
            return;
        }
        if self.done.len() == self.depth {
            self.done.pop_front();
        }
        self.done.push_back(command);
    }

    /// Inverse of the latest applied command, for the caller to apply.
    pub fn undo(&mut self) -> Option<EditCommand> {
        let command = self.done.pop_back()?;
        let inverse = command.inverse();
        self.undone.push(command);
        Some(inverse)
    }

    /// Latest undone command, for the caller to apply again.
    pub fn redo(&mut self) -> Option<EditCommand> {
        let command = self.undone.pop()?;
        self.done.push_back(command.clone());
        Some(command)
    }

    pub fn can_undo(&self) -> bool {
        !self.done.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.undone.is_empty()
    }
}

// ── Tests ───────────────────────────────────────────────────────
