use super::*;

fn anomaly() -> Series {
    Series::new(vec![
        KeyPoint::new(1900.0, 0.0),
        KeyPoint::new(2000.0, 0.8),
        KeyPoint::new(2024.0, 1.6),
    ])
    .unwrap()
}

#[test]
fn midpoint_interpolates() {
    assert!((anomaly().lookup(1950.0) - 0.4).abs() < 1e-12);
}

#[test]
fn clamps_outside_domain() {
    assert_eq!(anomaly().lookup(1800.0), 0.0);
    assert_eq!(anomaly().lookup(2100.0), 1.6);
}

#[test]
fn exact_key_hits_return_key_value() {
    let s = anomaly();
    assert_eq!(s.lookup(1900.0), 0.0);
    assert_eq!(s.lookup(2000.0), 0.8);
    assert_eq!(s.lookup(2024.0), 1.6);
}

#[test]
fn duplicate_x_returns_left_value() {
    let pts = [
        KeyPoint::new(0.0, 0.0),
        KeyPoint::new(1.0, 1.0),
        KeyPoint::new(1.0, 5.0),
        KeyPoint::new(2.0, 6.0),
    ];
    assert_eq!(piecewise_lookup(&pts, 1.0), 1.0);
    assert!((piecewise_lookup(&pts, 1.5) - 5.5).abs() < 1e-12);
    assert!(piecewise_lookup(&pts, 1.0).is_finite());
}

#[test]
fn empty_and_nan_inputs_are_quiet() {
    assert_eq!(piecewise_lookup(&[], 3.0), 0.0);
    assert_eq!(anomaly().lookup(f64::NAN), 0.0);
}

#[test]
fn construction_rejects_bad_series() {
    assert!(Series::new(vec![]).is_err());
    assert!(Series::new(vec![KeyPoint::new(2.0, 0.0), KeyPoint::new(1.0, 0.0)]).is_err());
    assert!(Series::new(vec![KeyPoint::new(f64::NAN, 0.0)]).is_err());
}

#[test]
fn deserialization_validates() {
    let ok: Series = serde_json::from_str(r#"[{"x":0,"y":1},{"x":1,"y":2}]"#).unwrap();
    assert_eq!(ok.domain(), (0.0, 1.0));
    assert_eq!(ok.max_y(), 2.0);
    assert!(serde_json::from_str::<Series>(r#"[{"x":1,"y":1},{"x":0,"y":2}]"#).is_err());
}
