use crate::foundation::core::Vec2;

/// Interpolation contract for visual value types.
pub trait Lerp: Sized {
    /// Interpolate from `a` to `b` with normalized factor `t` in `[0, 1]`.
    fn lerp(a: &Self, b: &Self, t: f64) -> Self;
}

impl Lerp for f64 {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        a + (b - a) * t
    }
}

impl Lerp for Vec2 {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        Vec2::new(a.x + (b.x - a.x) * t, a.y + (b.y - a.y) * t)
    }
}

/// Remap `x` from `[start, end]` to `[0, 1]` and clamp.
///
/// Returns exactly `0.0` at or below `start` and exactly `1.0` at or above `end`. A degenerate
/// range (`start >= end`) becomes a step at `end`: `0.0` below, `1.0` at/above. NaN maps to `0.0`.
pub fn clamped_linear(x: f64, start: f64, end: f64) -> f64 {
    if x.is_nan() {
        return 0.0;
    }
    if end <= start {
        return if x >= end { 1.0 } else { 0.0 };
    }
    if x <= start {
        0.0
    } else if x >= end {
        1.0
    } else {
        ((x - start) / (end - start)).clamp(0.0, 1.0)
    }
}

/// Remap then interpolate between `from` and `to`.
pub fn remap<T: Lerp>(x: f64, start: f64, end: f64, from: &T, to: &T) -> T {
    T::lerp(from, to, clamped_linear(x, start, end))
}

/// Fan out the appearance of N items across one progress range.
///
/// Item `index` starts at `index * delay_per_item` and reaches full visibility halfway through
/// its remaining span. Items whose offset is at or past `1.0` never appear.
pub fn stagger(index: usize, delay_per_item: f64, progress: f64) -> f64 {
    let offset = index as f64 * delay_per_item;
    if offset >= 1.0 {
        return 0.0;
    }
    (clamped_linear(progress, offset, 1.0) * 2.0).min(1.0)
}

#[cfg(test)]
#[path = "../../tests/unit/animation/interp.rs"]
mod tests;
