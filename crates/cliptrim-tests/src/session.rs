//! End-to-end gesture scenarios.
//!
//! Drives a `TrimSession` over a clock playback handle with the same
//! action stream the timeline surface produces.

use cliptrim_core::{Segment, TrimConfig};
use cliptrim_ui::{
    ClockPlayback, DragTarget, PlaybackHandle, PointerInput, TimelineAction, TrimSession,
};
use std::cell::RefCell;
use std::rc::Rc;

// ── Helpers ────────────────────────────────────────────────────

const WIDTH: f32 = 500.0;

fn at(time: f64, duration: f64) -> PointerInput {
    PointerInput::new(20.0 + (time / duration * f64::from(WIDTH)) as f32, 20.0, WIDTH)
}

fn session(duration: f64, segments: &[Segment]) -> TrimSession<ClockPlayback> {
    TrimSession::new(
        ClockPlayback::new(duration),
        Some(segments),
        TrimConfig::default(),
    )
    .unwrap()
}

fn drag(s: &mut TrimSession<ClockPlayback>, target: DragTarget, from: f64, path: &[f64]) {
    let d = s.duration();
    s.handle(TimelineAction::DragStart {
        target,
        pointer: at(from, d),
    });
    for &t in path {
        s.handle(TimelineAction::DragMove { pointer: at(t, d) });
    }
    s.handle(TimelineAction::DragEnd);
}

// ── Scenarios ──────────────────────────────────────────────────

#[test]
fn resize_while_playing_resumes_at_saved_time() {
    let mut s = session(30.0, &[Segment::new(5.0, 20.0)]);
    s.handle(TimelineAction::Click {
        target: DragTarget::Seek,
        pointer: at(10.0, 30.0),
    });
    s.toggle_play();
    s.pump();
    let before = s.current_time();

    s.handle(TimelineAction::DragStart {
        target: DragTarget::Left(0),
        pointer: at(5.0, 30.0),
    });
    assert!(s.playback().is_paused());
    s.handle(TimelineAction::DragMove {
        pointer: at(7.0, 30.0),
    });
    // Preview follows the boundary while the local time holds still
    assert!((s.playback().current_time() - (s.segments()[0].start + 0.01)).abs() < 1e-9);
    s.pump();
    assert_eq!(s.current_time(), before);

    s.handle(TimelineAction::DragEnd);
    s.pump();
    assert!(!s.playback().is_paused());
    assert_eq!(s.playback().current_time(), before);
    assert!((s.segments()[0].start - 7.0).abs() < 1e-4);
}

#[test]
fn resize_cannot_collapse_segment() {
    let mut s = session(30.0, &[Segment::new(5.0, 20.0)]);
    drag(&mut s, DragTarget::Left(0), 5.0, &[12.0, 25.0, 30.0]);
    let seg = s.segments()[0];
    assert_eq!(seg.start, 19.0);
    assert_eq!(seg.end, 20.0);

    drag(&mut s, DragTarget::Right(0), 20.0, &[0.0]);
    let seg = s.segments()[0];
    assert_eq!(seg.end, 20.0);
}

#[test]
fn move_is_clamped_to_media() {
    let mut s = session(30.0, &[Segment::new(5.0, 10.0)]);
    drag(&mut s, DragTarget::Move(0), 7.0, &[0.0]);
    assert_eq!(s.segments()[0], Segment::new(0.0, 5.0));

    drag(&mut s, DragTarget::Move(0), 2.0, &[30.0]);
    assert_eq!(s.segments()[0], Segment::new(25.0, 30.0));
}

#[test]
fn every_move_step_reaches_owner() {
    let mut s = session(30.0, &[Segment::new(5.0, 10.0)]);
    let log = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&log);
    s.on_change(move |list| sink.borrow_mut().push(list[0]));

    drag(&mut s, DragTarget::Move(0), 6.0, &[7.0, 8.0, 9.0]);
    let starts: Vec<f64> = log.borrow().iter().map(|seg| seg.start).collect();
    assert_eq!(starts.len(), 3);
    for (got, want) in starts.iter().zip([6.0, 7.0, 8.0]) {
        assert!((got - want).abs() < 1e-4);
    }
}

#[test]
fn seek_drag_does_not_resume_paused_playback() {
    let mut s = session(30.0, &[]);
    drag(&mut s, DragTarget::Seek, 3.0, &[4.0, 12.0]);
    assert!(s.playback().is_paused());
    assert!((s.current_time() - 12.0).abs() < 1e-4);
}

#[test]
fn split_delete_add_cycle() {
    let mut s = session(20.0, &[]);
    s.handle(TimelineAction::Split(0));
    s.handle(TimelineAction::Split(1));
    assert_eq!(
        s.segments(),
        &[
            Segment::new(0.0, 10.0),
            Segment::new(10.0, 15.0),
            Segment::new(15.0, 20.0)
        ]
    );

    s.handle(TimelineAction::Delete(1));
    s.handle(TimelineAction::AddSegment);
    assert_eq!(
        s.segments(),
        &[
            Segment::new(0.0, 10.0),
            Segment::new(10.0, 15.0),
            Segment::new(15.0, 20.0)
        ]
    );
    assert_eq!(s.export(), vec![Segment::new(0.0, 20.0)]);
}

#[test]
fn overlapping_move_is_kept_and_merged_on_export() {
    let mut s = session(30.0, &[Segment::new(0.0, 5.0), Segment::new(10.0, 15.0)]);
    drag(&mut s, DragTarget::Move(1), 12.0, &[6.0]);
    assert_eq!(s.view().overlaps, vec![(0, 1)]);
    let exported = s.export();
    assert_eq!(exported.len(), 1);
    assert_eq!(exported[0].start, 0.0);
    assert!((exported[0].end - 9.0).abs() < 1e-4);
}

#[test]
fn undo_walks_back_through_drags_and_splits() {
    let mut s = session(30.0, &[Segment::new(5.0, 10.0)]);
    drag(&mut s, DragTarget::Right(0), 10.0, &[14.0]);
    s.handle(TimelineAction::Split(0));
    assert_eq!(s.segments().len(), 2);

    s.handle(TimelineAction::Undo);
    assert_eq!(s.segments().len(), 1);
    s.handle(TimelineAction::Undo);
    assert_eq!(s.segments(), &[Segment::new(5.0, 10.0)]);
    assert!(!s.can_undo());

    s.handle(TimelineAction::Redo);
    assert!((s.segments()[0].end - 14.0).abs() < 1e-4);
}

#[test]
fn playback_end_rewinds_to_first_segment() {
    let mut s = session(8.0, &[Segment::new(2.5, 6.0)]);
    s.handle(TimelineAction::TogglePlay);
    s.playback_mut().advance(3.0);
    s.pump();
    assert!(s.is_playing());
    s.playback_mut().advance(10.0);
    s.pump();
    assert!(!s.is_playing());
    assert_eq!(s.current_time(), 2.5);
}
