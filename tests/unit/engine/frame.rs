use super::*;

fn table() -> SegmentTable<&'static str> {
    SegmentTable::new([("a", 0.0, 0.25), ("b", 0.25, 0.75), ("c", 0.75, 1.0)]).unwrap()
}

#[test]
fn frame_exposes_active_and_locals() {
    let t = table();
    let f = ProgressFrame::new(&t, Progress::new(0.5), ReducedMotion::OFF);
    assert!(f.is_active(&"b"));
    assert_eq!(f.local(&"a"), 1.0);
    assert_eq!(f.local(&"b"), 0.5);
    assert_eq!(f.local(&"c"), 0.0);
    assert_eq!(f.motion_progress(), f.progress());
    assert_eq!(f.mount_window().range(), 0..3);
}

#[test]
fn reduced_motion_snaps_to_segment_end_state() {
    let t = table();
    let f = ProgressFrame::new(&t, Progress::new(0.3), ReducedMotion::ON);
    assert_eq!(f.motion_progress().get(), 0.75);
    assert_eq!(f.motion_local(&"a"), 1.0);
    assert_eq!(f.motion_local(&"b"), 1.0);
    assert_eq!(f.motion_local(&"c"), 0.0);
    // Raw values are untouched for discrete decisions.
    assert_eq!(f.progress().get(), 0.3);
    assert!((f.local(&"b") - 0.1).abs() < 1e-12);
}

#[test]
fn span_uses_motion_progress() {
    let t = table();
    let f = ProgressFrame::new(&t, Progress::new(0.5), ReducedMotion::OFF);
    assert!((f.span(&"a", &"b") - 0.5 / 0.75).abs() < 1e-12);
    let f = ProgressFrame::new(&t, Progress::new(0.5), ReducedMotion::ON);
    assert_eq!(f.span(&"a", &"b"), 1.0);
}
