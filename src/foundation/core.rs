pub use kurbo::{Rect, Vec2};

/// Normalized scroll progress, always inside `[0, 1]`.
///
/// Construction clamps silently; NaN collapses to `0`. Nothing downstream ever observes an
/// out-of-range value.
#[derive(Clone, Copy, Debug, Default, PartialEq, PartialOrd, serde::Serialize, serde::Deserialize)]
#[serde(from = "f64", into = "f64")]
pub struct Progress(f64);

impl Progress {
    /// Start of the range.
    pub const ZERO: Self = Self(0.0);
    /// End of the range.
    pub const ONE: Self = Self(1.0);

    /// Clamp `v` into `[0, 1]`.
    pub fn new(v: f64) -> Self {
        if v.is_nan() {
            return Self::ZERO;
        }
        Self(v.clamp(0.0, 1.0))
    }

    /// Raw value.
    pub fn get(self) -> f64 {
        self.0
    }

    /// Bit pattern, used as a memo key.
    pub(crate) fn to_bits(self) -> u64 {
        self.0.to_bits()
    }
}

impl From<f64> for Progress {
    fn from(v: f64) -> Self {
        Self::new(v)
    }
}

impl From<Progress> for f64 {
    fn from(p: Progress) -> Self {
        p.0
    }
}

/// Scroll direction between two consecutive samples.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    /// `scroll_y` decreased.
    Up,
    /// `scroll_y` increased.
    Down,
}

impl Direction {
    /// Compare two samples. Equal samples report nothing.
    pub fn between(prev_scroll_y: f64, scroll_y: f64) -> Option<Self> {
        if scroll_y > prev_scroll_y {
            Some(Self::Down)
        } else if scroll_y < prev_scroll_y {
            Some(Self::Up)
        } else {
            None
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
