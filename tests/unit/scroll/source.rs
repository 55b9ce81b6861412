use super::*;
use crate::scroll::host::SimulatedPage;

fn page() -> (SimulatedPage, ContainerId) {
    let mut page = SimulatedPage::new(1000.0);
    page.push_spacer(1000.0);
    let c = page.push_container(3000.0);
    page.push_spacer(1000.0);
    (page, c)
}

#[test]
fn progress_formula() {
    // top at viewport bottom -> 0
    assert_eq!(container_progress(Rect::new(0.0, 1000.0, 0.0, 4000.0), 1000.0).get(), 0.0);
    // bottom at viewport top -> 1
    assert_eq!(container_progress(Rect::new(0.0, -3000.0, 0.0, 0.0), 1000.0).get(), 1.0);
    // halfway: scroll range is 4000, we've moved 2000
    assert_eq!(container_progress(Rect::new(0.0, -1000.0, 0.0, 2000.0), 1000.0).get(), 0.5);
    // beyond either end clamps
    assert_eq!(container_progress(Rect::new(0.0, 5000.0, 0.0, 8000.0), 1000.0).get(), 0.0);
    assert_eq!(container_progress(Rect::new(0.0, -9000.0, 0.0, -6000.0), 1000.0).get(), 1.0);
}

#[test]
fn degenerate_range_reports_zero() {
    assert_eq!(container_progress(Rect::new(0.0, 10.0, 0.0, 10.0), 0.0).get(), 0.0);
}

#[test]
fn in_view_is_strict() {
    assert!(!container_in_view(Rect::new(0.0, 1000.0, 0.0, 4000.0), 1000.0));
    assert!(container_in_view(Rect::new(0.0, 999.0, 0.0, 4000.0), 1000.0));
    assert!(!container_in_view(Rect::new(0.0, -3000.0, 0.0, 0.0), 1000.0));
}

#[test]
fn page_progress_handles_short_documents() {
    assert_eq!(page_progress(500.0, 2000.0, 1000.0).get(), 0.5);
    assert_eq!(page_progress(0.0, 800.0, 1000.0).get(), 0.0);
}

#[test]
fn scroll_events_coalesce_into_one_frame() {
    let (mut page, c) = page();
    let mut src = ProgressSource::new(c);
    src.attach(&mut page);
    assert_eq!(page.pending_frames(), 1);

    // More scroll events before the frame fires request nothing new.
    page.scroll_to(100.0);
    assert!(!src.on_scroll(&mut page));
    page.scroll_to(200.0);
    assert!(!src.on_scroll(&mut page));
    assert_eq!(page.pending_frames(), 1);

    page.take_frames();
    let s = src.on_frame(&page);
    assert_eq!(s.scroll_y, 200.0);
    assert!(!src.has_pending_frame());

    assert!(src.on_scroll(&mut page));
}

#[test]
fn measurement_reads_current_layout() {
    let (mut page, c) = page();
    let mut src = ProgressSource::new(c);
    src.attach(&mut page);

    page.scroll_to(2000.0);
    let s = src.on_frame(&page);
    assert_eq!(s.progress.get(), 0.5);
    assert!(s.in_view);
    assert_eq!(s.direction, Some(Direction::Down));

    page.scroll_to(1000.0);
    src.on_scroll(&mut page);
    let s = src.on_frame(&page);
    assert_eq!(s.progress.get(), 0.25);
    assert_eq!(s.direction, Some(Direction::Up));
}

#[test]
fn equal_samples_keep_previous_direction() {
    let (mut page, c) = page();
    let mut src = ProgressSource::new(c);
    src.attach(&mut page);
    assert_eq!(src.on_frame(&page).direction, None);

    page.scroll_to(500.0);
    src.on_scroll(&mut page);
    assert_eq!(src.on_frame(&page).direction, Some(Direction::Down));

    src.on_scroll(&mut page);
    assert_eq!(src.on_frame(&page).direction, Some(Direction::Down));
}

#[test]
fn unattached_container_is_a_silent_no_op() {
    let (mut page, c) = page();
    page.set_attached(c, false);
    let mut src = ProgressSource::new(c);
    src.attach(&mut page);
    page.scroll_to(3000.0);
    let s = src.on_frame(&page);
    assert_eq!(s.progress, Progress::ZERO);
    assert!(!s.in_view);
}

#[test]
fn detach_releases_listener_and_frame() {
    let (mut page, c) = page();
    let mut src = ProgressSource::new(c);
    src.attach(&mut page);
    src.attach(&mut page);
    assert_eq!(page.listener_count(), 1);
    assert_eq!(page.pending_frames(), 1);

    src.detach(&mut page);
    assert_eq!(page.listener_count(), 0);
    assert_eq!(page.pending_frames(), 0);
    assert!(!src.on_scroll(&mut page));

    src.detach(&mut page);
    assert_eq!(page.listener_count(), 0);
}
