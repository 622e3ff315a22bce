//! Integration tests for the segment model.
//!
//! Exercises cliptrim-core types through cliptrim-timeline operations and
//! the edit history.

use cliptrim_core::Segment;
use cliptrim_timeline::{
    delete, export_ranges, fill_first_gap, split, validate, EditCommand, UndoStack,
};

// ── Helpers ────────────────────────────────────────────────────

fn segs(pairs: &[(f64, f64)]) -> Vec<Segment> {
    pairs.iter().copied().map(Segment::from).collect()
}

// ── Gap filling ────────────────────────────────────────────────

#[test]
fn fill_first_gap_documented_cases() {
    assert_eq!(fill_first_gap(&[], 10.0), segs(&[(0.0, 10.0)]));
    assert_eq!(
        fill_first_gap(&segs(&[(0.0, 3.0), (5.0, 8.0)]), 10.0),
        segs(&[(0.0, 3.0), (3.0, 5.0), (5.0, 8.0)])
    );
    assert_eq!(
        fill_first_gap(&segs(&[(0.0, 10.0)]), 10.0),
        segs(&[(0.0, 10.0)])
    );
}

#[test]
fn repeated_fill_covers_timeline() {
    let mut list = segs(&[(2.0, 5.0)]);
    list = fill_first_gap(&list, 10.0);
    assert_eq!(list, segs(&[(0.0, 2.0), (2.0, 5.0)]));
    list = fill_first_gap(&list, 10.0);
    assert_eq!(list, segs(&[(0.0, 2.0), (2.0, 5.0), (5.0, 10.0)]));

    let covered = fill_first_gap(&list, 10.0);
    assert_eq!(covered.len(), list.len());
    assert_eq!(export_ranges(&covered, 10.0), segs(&[(0.0, 10.0)]));
}

// ── Split / delete with history ────────────────────────────────

#[test]
fn split_then_delete_and_undo_both() {
    let mut list = segs(&[(0.0, 8.0)]);
    let mut undo = UndoStack::new(100);

    let cmd = EditCommand::Split { index: 0 };
    cmd.apply(&mut list).unwrap();
    undo.push(cmd);
    assert_eq!(list, split(&segs(&[(0.0, 8.0)]), 0).unwrap());

    let cmd = EditCommand::delete(&list, 0).unwrap();
    cmd.apply(&mut list).unwrap();
    undo.push(cmd);
    assert_eq!(list, segs(&[(4.0, 8.0)]));

    while let Some(inverse) = undo.undo() {
        inverse.apply(&mut list).unwrap();
    }
    assert_eq!(list, segs(&[(0.0, 8.0)]));

    let mut redone = 0;
    while let Some(cmd) = undo.redo() {
        cmd.apply(&mut list).unwrap();
        redone += 1;
    }
    assert_eq!(redone, 2);
    assert_eq!(list, segs(&[(4.0, 8.0)]));
}

#[test]
fn pure_operations_leave_input_untouched() {
    let input = segs(&[(5.0, 7.0), (1.0, 3.0)]);
    let _ = split(&input, 0).unwrap();
    let _ = delete(&input, 1).unwrap();
    let _ = fill_first_gap(&input, 10.0);
    assert_eq!(input, segs(&[(5.0, 7.0), (1.0, 3.0)]));
}

#[test]
fn split_halves_stay_within_media() {
    let list = split(&segs(&[(0.0, 1.5), (7.0, 10.0)]), 1).unwrap();
    assert!(validate(&list, 10.0).is_ok());
    assert!(validate(&list, 9.0).is_err());
}

// ── Export ─────────────────────────────────────────────────────

#[test]
fn export_serializes_as_ordered_ranges() {
    let list = segs(&[(6.0, 9.0), (0.0, 2.0), (1.0, 3.0)]);
    let ranges = export_ranges(&list, 10.0);
    let json = serde_json::to_string(&ranges).unwrap();
    assert_eq!(
        json,
        r#"[{"start":0.0,"end":3.0},{"start":6.0,"end":9.0}]"#
    );
}
