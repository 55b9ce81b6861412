use super::*;

#[test]
fn progress_clamps_drift() {
    assert_eq!(Progress::new(-1e-12).get(), 0.0);
    assert_eq!(Progress::new(1.000_000_1).get(), 1.0);
    assert_eq!(Progress::new(0.25).get(), 0.25);
    assert_eq!(Progress::new(f64::NAN).get(), 0.0);
    assert_eq!(Progress::new(f64::INFINITY).get(), 1.0);
}

#[test]
fn progress_deserializes_clamped() {
    let p: Progress = serde_json::from_str("1.5").unwrap();
    assert_eq!(p, Progress::ONE);
    assert_eq!(serde_json::to_string(&Progress::new(0.5)).unwrap(), "0.5");
}

#[test]
fn direction_only_on_strict_change() {
    assert_eq!(Direction::between(10.0, 20.0), Some(Direction::Down));
    assert_eq!(Direction::between(20.0, 10.0), Some(Direction::Up));
    assert_eq!(Direction::between(10.0, 10.0), None);
}
