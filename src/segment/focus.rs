use std::fmt;

use crate::foundation::core::Progress;
use crate::foundation::error::{StoryError, StoryResult};

/// Ordered, disjoint `[start, end)` ranges each emphasizing one item.
///
/// At most one item is focused for a given progress; `None` means "show everything at equal
/// weight".
#[derive(Clone, Debug, PartialEq)]
pub struct FocusRanges<T> {
    ranges: Vec<(f64, f64, T)>,
}

impl<T> FocusRanges<T>
where
    T: Copy + fmt::Debug,
{
    /// Validate that ranges are well-formed, sorted and pairwise disjoint.
    pub fn new(ranges: Vec<(f64, f64, T)>) -> StoryResult<Self> {
        for (start, end, item) in &ranges {
            if !start.is_finite() || !end.is_finite() || start >= end {
                return Err(StoryError::config(format!(
                    "focus range for {item:?} must satisfy start < end (got [{start}, {end}))"
                )));
            }
        }
        for w in ranges.windows(2) {
            if w[1].0 < w[0].1 {
                return Err(StoryError::config(format!(
                    "focus ranges for {:?} and {:?} overlap or are out of order",
                    w[0].2, w[1].2
                )));
            }
        }
        Ok(Self { ranges })
    }

    /// Item whose range contains `progress`, tested in declaration order.
    pub fn select(&self, progress: Progress) -> Option<T> {
        let p = progress.get();
        self.ranges
            .iter()
            .find(|(start, end, _)| *start <= p && p < *end)
            .map(|(_, _, item)| *item)
    }
}

/// A content clamp that finishes early and then holds.
///
/// `hold_at` is the fraction of the underlying progress at which the content reaches its
/// terminal value; the rest of the range is a dwell where nothing changes.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Plateau {
    /// Fraction in `(0, 1]` at which content progress saturates.
    pub hold_at: f64,
}

impl Plateau {
    /// Validate `hold_at` in `(0, 1]`.
    pub fn new(hold_at: f64) -> StoryResult<Self> {
        if !(hold_at > 0.0 && hold_at <= 1.0) {
            return Err(StoryError::config(format!(
                "plateau hold point must be in (0, 1] (got {hold_at})"
            )));
        }
        Ok(Self { hold_at })
    }

    /// Content progress: reaches `1` at `hold_at` and stays there.
    pub fn content(self, local: f64) -> f64 {
        crate::animation::interp::clamped_linear(local, 0.0, self.hold_at)
    }

    /// Whether `local` is inside the dwell.
    pub fn is_dwelling(self, local: f64) -> bool {
        local >= self.hold_at
    }

    /// Progress through the dwell itself, `0` until `hold_at`.
    pub fn dwell(self, local: f64) -> f64 {
        crate::animation::interp::clamped_linear(local, self.hold_at, 1.0)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/segment/focus.rs"]
mod tests;
