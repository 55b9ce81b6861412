use super::*;
use crate::engine::signals::discontinuities;
use crate::foundation::core::Progress;
use crate::scroll::motion::ReducedMotion;

fn state_at(p: f64, motion: ReducedMotion) -> Act1State {
    let t = table().unwrap();
    let r = resolver(&StoryData::default()).unwrap();
    r.evaluate(&ProgressFrame::new(&t, Progress::new(p), motion), &())
}

fn at(p: f64) -> Act1State {
    state_at(p, ReducedMotion::OFF)
}

#[test]
fn starts_cold_and_dark() {
    let s = at(0.0);
    assert_eq!(s.intro_opacity, 0.0);
    assert_eq!(s.temperature_progress, 0.0);
    assert_eq!(s.current_year, 1900.0);
    assert_eq!(s.temperature_anomaly, 0.0);
    assert_eq!(s.stripes_opacity, 0.0);
    assert_eq!(s.callout_opacity, [0.0; CALLOUTS]);
    assert_eq!(s.temperature_color, COOL);
}

#[test]
fn temperature_holds_after_the_plateau_point() {
    let s = at(0.30);
    assert_eq!(s.temperature_progress, 1.0);
    assert_eq!(s.current_year, 2024.0);
    assert_eq!(s.temperature_anomaly, 1.6);
    assert_eq!(s.thermometer_fill, 1.0);
    assert_eq!(s.temperature_color, HOT);

    // Still scrolling through the section; nothing moves.
    assert_eq!(at(0.31).temperature_progress, 1.0);

    let mid = at(0.10 + 0.22 * 0.4);
    assert!(mid.temperature_progress > 0.45 && mid.temperature_progress < 0.55);
    assert!(mid.current_year > 1950.0 && mid.current_year < 1970.0);
}

#[test]
fn present_dwell_uses_raw_progress() {
    assert!(!at(0.40).in_plateau);
    let s = at(0.46);
    assert!(s.in_plateau);
    assert!(s.plateau_progress > 0.0 && s.plateau_progress < 1.0);

    let after = at(0.55);
    assert!(!after.in_plateau);
    assert_eq!(after.plateau_progress, 1.0);
    assert!(after.glow.abs() < 1e-12);
}

#[test]
fn stripes_dim_then_leave() {
    assert_eq!(at(0.40).stripes_opacity, 1.0);
    assert!((at(0.60).stripes_opacity - 0.4).abs() < 1e-12);
    assert_eq!(at(0.94).stripes_opacity, 0.0);
}

#[test]
fn callouts_fan_out_in_order() {
    let s = at(0.60 + 0.26 * 0.3);
    assert!(s.callout_opacity[0] > s.callout_opacity[1]);
    assert!(s.callout_opacity[1] > s.callout_opacity[2]);
    assert_eq!(s.callout_opacity[3], 0.0);
    assert_eq!(at(0.86).callout_opacity, [1.0; CALLOUTS]);
}

#[test]
fn reduced_motion_shows_section_end_states() {
    let s = state_at(0.15, ReducedMotion::ON);
    assert_eq!(s.intro_opacity, 1.0);
    assert_eq!(s.temperature_progress, 1.0);
    assert_eq!(s.stripes_opacity, 1.0);
    assert!(!s.in_plateau);

    let s = state_at(0.44, ReducedMotion::ON);
    assert!(s.in_plateau);
    assert_eq!(s.plateau_progress, 1.0);
}

#[test]
fn signals_are_continuous_at_every_boundary() {
    let t = table().unwrap();
    let r = resolver(&StoryData::default()).unwrap();
    let bad = discontinuities(&t, &r, &(), 1e-9, 1e-6);
    assert!(bad.is_empty(), "{bad:?}");
}

#[test]
fn act_assembles_and_renders_the_window() {
    let mut act = build(&StoryData::default()).unwrap();
    let f = act.step(Progress::new(0.02), ReducedMotion::OFF);
    assert_eq!(f.active, Act1Section::Arrival);
    assert_eq!(f.sections.len(), 2);
    // Arrival fades in with the act intro.
    assert!(f.sections[0].style.opacity < 1.0);

    let f = act.step(Progress::new(0.7), ReducedMotion::OFF);
    assert_eq!(f.active, Act1Section::Impacts);
    let impacts = f
        .sections
        .iter()
        .find(|s| s.id == Act1Section::Impacts)
        .unwrap();
    assert_eq!(impacts.items.len(), CALLOUTS);
}

#[test]
fn cooling_series_is_refused() {
    let data = StoryData {
        temperature: Series::new(vec![
            crate::animation::series::KeyPoint::new(1900.0, -0.6),
            crate::animation::series::KeyPoint::new(2024.0, -0.1),
        ])
        .unwrap(),
        ..StoryData::default()
    };
    assert!(resolver(&data).is_err());
    assert!(build(&data).is_err());
}

#[test]
fn hue_moves_smoothly_inside_sections() {
    let mut prev = at(0.0).temperature_color.h;
    for i in 1..=2000 {
        let h = at(i as f64 / 2000.0).temperature_color.h;
        assert!((h - prev).abs() < 5.0, "hue jump at {}: {prev} -> {h}", i as f64 / 2000.0);
        prev = h;
    }
}

#[test]
fn headline_rides_the_present_dwell() {
    assert_eq!(at(0.40).headline_opacity, 0.0);
    assert_eq!(at(0.46).headline_opacity, 1.0);
    let fading = at(0.43).headline_opacity;
    assert!(fading > 0.0 && fading < 1.0);
    assert!(at(0.5 - 1e-9).headline_opacity < 1e-6);
    assert_eq!(at(0.5).headline_opacity, 0.0);

    assert_eq!(state_at(0.44, ReducedMotion::ON).headline_opacity, 1.0);
    assert_eq!(state_at(0.35, ReducedMotion::ON).headline_opacity, 0.0);
}
