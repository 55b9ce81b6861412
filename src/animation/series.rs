use crate::foundation::error::{StoryError, StoryResult};

/// One sample of a static time series (e.g. year → temperature anomaly).
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct KeyPoint {
    /// Domain coordinate.
    pub x: f64,
    /// Value at `x`.
    pub y: f64,
}

impl KeyPoint {
    /// Shorthand constructor.
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// A validated, x-sorted series of [`KeyPoint`]s.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "Vec<KeyPoint>", into = "Vec<KeyPoint>")]
pub struct Series {
    points: Vec<KeyPoint>,
}

impl Series {
    /// Validate and wrap `points`: non-empty, finite, sorted by `x` (duplicates allowed).
    pub fn new(points: Vec<KeyPoint>) -> StoryResult<Self> {
        if points.is_empty() {
            return Err(StoryError::config("series must have at least one point"));
        }
        if let Some(p) = points.iter().find(|p| !p.x.is_finite() || !p.y.is_finite()) {
            return Err(StoryError::config(format!(
                "series point ({}, {}) is not finite",
                p.x, p.y
            )));
        }
        if !points.windows(2).all(|w| w[0].x <= w[1].x) {
            return Err(StoryError::config("series points must be sorted by x"));
        }
        Ok(Self { points })
    }

    /// Wrap points already known to be valid (built-in tables).
    pub(crate) fn from_sorted(points: Vec<KeyPoint>) -> Self {
        debug_assert!(!points.is_empty());
        debug_assert!(points.windows(2).all(|w| w[0].x <= w[1].x));
        Self { points }
    }

    /// Interpolated value at `x`. See [`piecewise_lookup`].
    pub fn lookup(&self, x: f64) -> f64 {
        piecewise_lookup(&self.points, x)
    }

    /// Underlying points.
    pub fn points(&self) -> &[KeyPoint] {
        &self.points
    }

    /// `(first.x, last.x)`.
    pub fn domain(&self) -> (f64, f64) {
        let first = self.points[0].x;
        let last = self.points[self.points.len() - 1].x;
        (first, last)
    }

    /// Largest `y` in the series.
    pub fn max_y(&self) -> f64 {
        self.points
            .iter()
            .map(|p| p.y)
            .fold(f64::NEG_INFINITY, f64::max)
    }
}

impl TryFrom<Vec<KeyPoint>> for Series {
    type Error = StoryError;

    fn try_from(points: Vec<KeyPoint>) -> StoryResult<Self> {
        Self::new(points)
    }
}

impl From<Series> for Vec<KeyPoint> {
    fn from(s: Series) -> Self {
        s.points
    }
}

/// Linear interpolation over x-sorted `series`.
///
/// Clamps to the first/last `y` outside the domain. When `x` lands on a duplicated coordinate the
/// leftmost point wins, so a zero-width step never divides by zero. Empty input yields `0.0`.
pub fn piecewise_lookup(series: &[KeyPoint], x: f64) -> f64 {
    let Some(first) = series.first() else {
        return 0.0;
    };
    let idx = series.partition_point(|k| k.x < x);
    if idx == 0 {
        return first.y;
    }
    if idx >= series.len() {
        return series[series.len() - 1].y;
    }

    let b = &series[idx];
    if b.x == x {
        return b.y;
    }
    let a = &series[idx - 1];
    let denom = b.x - a.x;
    if denom <= 0.0 {
        return a.y;
    }
    let t = (x - a.x) / denom;
    a.y + (b.y - a.y) * t
}

#[cfg(test)]
#[path = "../../tests/unit/animation/series.rs"]
mod tests;
