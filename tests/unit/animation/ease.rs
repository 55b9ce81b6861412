use super::*;

const ALL: [Ease; 3] = [Ease::Linear, Ease::OutCubic, Ease::InOutCubic];

#[test]
fn endpoints_are_stable() {
    for ease in ALL {
        assert_eq!(ease.apply(0.0), 0.0);
        assert_eq!(ease.apply(1.0), 1.0);
    }
}

#[test]
fn monotonic_spot_check() {
    for ease in ALL {
        let a = ease.apply(0.25);
        let b = ease.apply(0.5);
        let c = ease.apply(0.75);
        assert!(a < b);
        assert!(b < c);
    }
}

#[test]
fn input_is_clamped() {
    for ease in ALL {
        assert_eq!(ease.apply(-3.0), 0.0);
        assert_eq!(ease.apply(7.0), 1.0);
        assert_eq!(ease.apply(f64::NAN), 0.0);
    }
}

#[test]
fn in_out_cubic_is_continuous_at_midpoint() {
    let below = ease_in_out_cubic(0.5 - 1e-9);
    let at = ease_in_out_cubic(0.5);
    assert!((below - at).abs() < 1e-6);
    assert_eq!(at, 0.5);
}

#[test]
fn out_cubic_front_loads() {
    assert!((Ease::OutCubic.apply(0.5) - 0.875).abs() < 1e-12);
}
