use super::*;

#[test]
fn window_is_active_plus_minus_one() {
    let w = MountWindow::new(4, 11);
    assert_eq!(w.range(), 3..6);
    assert!(w.contains(3) && w.contains(4) && w.contains(5));
    assert!(!w.contains(2) && !w.contains(6));
}

#[test]
fn window_is_clipped_at_the_edges() {
    assert_eq!(MountWindow::new(0, 7).range(), 0..2);
    assert_eq!(MountWindow::new(6, 7).range(), 5..7);
    assert!(!MountWindow::new(6, 7).contains(7));
    assert_eq!(MountWindow::new(0, 1).range(), 0..1);
}

#[test]
fn diff_reports_enter_and_leave() {
    let first = MountWindow::new(0, 5).diff(None);
    assert_eq!(first.mounted, vec![0, 1]);
    assert!(first.unmounted.is_empty());

    let step = MountWindow::new(1, 5).diff(Some(MountWindow::new(0, 5)));
    assert_eq!(step.mounted, vec![2]);
    assert!(step.unmounted.is_empty());

    let jump = MountWindow::new(4, 5).diff(Some(MountWindow::new(1, 5)));
    assert_eq!(jump.mounted, vec![3, 4]);
    assert_eq!(jump.unmounted, vec![0, 1, 2]);

    assert!(MountWindow::new(2, 5).diff(Some(MountWindow::new(2, 5))).is_empty());
}
