use super::*;

#[test]
fn clamped_linear_exact_bounds() {
    assert_eq!(clamped_linear(-5.0, 0.2, 0.6), 0.0);
    assert_eq!(clamped_linear(0.2, 0.2, 0.6), 0.0);
    assert_eq!(clamped_linear(0.6, 0.2, 0.6), 1.0);
    assert_eq!(clamped_linear(9.0, 0.2, 0.6), 1.0);
    assert!((clamped_linear(0.4, 0.2, 0.6) - 0.5).abs() < 1e-12);
}

#[test]
fn clamped_linear_degenerate_range_is_a_step() {
    assert_eq!(clamped_linear(0.49, 0.5, 0.5), 0.0);
    assert_eq!(clamped_linear(0.5, 0.5, 0.5), 1.0);
    assert_eq!(clamped_linear(0.9, 0.5, 0.5), 1.0);
    assert_eq!(clamped_linear(f64::NAN, 0.0, 1.0), 0.0);
}

#[test]
fn remap_interpolates_vectors() {
    let v = remap(0.5, 0.0, 1.0, &Vec2::new(0.0, 30.0), &Vec2::ZERO);
    assert_eq!(v, Vec2::new(0.0, 15.0));
}

#[test]
fn stagger_fans_out_items() {
    // First item: full at progress 0.5.
    assert_eq!(stagger(0, 0.2, 0.5), 1.0);
    assert_eq!(stagger(0, 0.2, 0.25), 0.5);
    // Second item starts at 0.2.
    assert_eq!(stagger(1, 0.2, 0.2), 0.0);
    assert!((stagger(1, 0.2, 0.4) - 0.5).abs() < 1e-12);
    assert_eq!(stagger(1, 0.2, 1.0), 1.0);
}

#[test]
fn stagger_past_the_end_never_appears() {
    assert_eq!(stagger(5, 0.2, 1.0), 0.0);
    assert_eq!(stagger(9, 0.2, 0.99), 0.0);
}

#[test]
fn vec2_lerp_goes_through_the_trait() {
    let a = Vec2::new(0.0, 30.0);
    let b = Vec2::new(10.0, 0.0);
    assert_eq!(<Vec2 as Lerp>::lerp(&a, &b, 0.0), a);
    assert_eq!(<Vec2 as Lerp>::lerp(&a, &b, 0.5), Vec2::new(5.0, 15.0));
    assert_eq!(<Vec2 as Lerp>::lerp(&a, &b, 1.0), b);
}
