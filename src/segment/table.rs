use std::fmt;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::animation::ease::Ease;
use crate::animation::interp::clamped_linear;
use crate::foundation::core::Progress;
use crate::foundation::error::{StoryError, StoryResult};

/// Largest tolerated gap or overlap between consecutive segments.
pub const COVERAGE_EPSILON: f64 = 1e-9;

/// A named `[start, end)` slice of an act's progress range.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct Segment<S> {
    /// Section identifier.
    pub id: S,
    /// Inclusive start.
    pub start: f64,
    /// Exclusive end (inclusive for the last segment, see [`SegmentTable::active`]).
    pub end: f64,
    /// Position in declaration order.
    pub index: usize,
}

impl<S> Segment<S> {
    /// Half-open containment test.
    pub fn contains(&self, progress: f64) -> bool {
        self.start <= progress && progress < self.end
    }

    /// Progress renormalized into this segment: `0` before, `1` after, linear inside.
    pub fn local(&self, progress: f64) -> f64 {
        clamped_linear(progress, self.start, self.end)
    }

    /// Width of the segment.
    pub fn width(&self) -> f64 {
        self.end - self.start
    }
}

/// Static, validated, ordered segment table for one act.
///
/// Construction rejects anything that would make segment selection ambiguous: empty tables,
/// non-finite or out-of-range bounds, `start >= end`, gaps/overlaps larger than
/// [`COVERAGE_EPSILON`], tables not spanning `[0, 1]`, and duplicate ids.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct SegmentTable<S> {
    segments: Vec<Segment<S>>,
}

impl<S> SegmentTable<S>
where
    S: Clone + PartialEq + fmt::Debug,
{
    /// Build and validate a table from `(id, start, end)` spans in declaration order.
    #[tracing::instrument(skip_all)]
    pub fn new(spans: impl IntoIterator<Item = (S, f64, f64)>) -> StoryResult<Self> {
        let mut segments: Vec<Segment<S>> = spans
            .into_iter()
            .enumerate()
            .map(|(index, (id, start, end))| Segment {
                id,
                start,
                end,
                index,
            })
            .collect();
        validate(&segments)?;
        for s in &mut segments {
            s.start = s.start.clamp(0.0, 1.0);
            s.end = s.end.clamp(0.0, 1.0);
        }
        tracing::debug!(len = segments.len(), "segment table validated");
        Ok(Self { segments })
    }

    /// First segment whose `[start, end)` contains `progress`, falling back to the last one.
    ///
    /// The fallback makes `progress = 1.0` (and any float drift past the final bound) resolve to
    /// the final section instead of blanking the screen.
    pub fn active(&self, progress: Progress) -> &Segment<S> {
        let p = progress.get();
        self.segments
            .iter()
            .find(|s| s.contains(p))
            .unwrap_or_else(|| self.last())
    }

    /// Local progress for `id`. Unknown ids report `0`.
    pub fn local_progress(&self, id: &S, progress: Progress) -> f64 {
        self.get(id).map_or(0.0, |s| s.local(progress.get()))
    }

    /// [`Self::local_progress`] passed through `ease`.
    pub fn local_progress_eased(&self, id: &S, progress: Progress, ease: Ease) -> f64 {
        ease.apply(self.local_progress(id, progress))
    }

    /// Progress renormalized across the span from the start of `from` to the end of `to`.
    pub fn span_progress(&self, from: &S, to: &S, progress: Progress) -> f64 {
        match (self.get(from), self.get(to)) {
            (Some(a), Some(b)) => clamped_linear(progress.get(), a.start, b.end),
            _ => 0.0,
        }
    }

    /// Look up a segment by id.
    pub fn get(&self, id: &S) -> Option<&Segment<S>> {
        self.segments.iter().find(|s| &s.id == id)
    }

    /// Declaration index of `id`.
    pub fn index_of(&self, id: &S) -> Option<usize> {
        self.get(id).map(|s| s.index)
    }

    /// Segment at declaration index `index`.
    pub fn at(&self, index: usize) -> Option<&Segment<S>> {
        self.segments.get(index)
    }
}

impl<S> SegmentTable<S> {
    /// Number of segments (never zero).
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Always `false`; present for API symmetry.
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Segments in declaration order.
    pub fn iter(&self) -> std::slice::Iter<'_, Segment<S>> {
        self.segments.iter()
    }

    /// Final segment.
    pub fn last(&self) -> &Segment<S> {
        &self.segments[self.segments.len() - 1]
    }

    /// Interior boundaries (`end` of every segment but the last).
    pub fn boundaries(&self) -> impl Iterator<Item = f64> + '_ {
        self.segments[..self.segments.len() - 1].iter().map(|s| s.end)
    }
}

fn validate<S: PartialEq + fmt::Debug>(segments: &[Segment<S>]) -> StoryResult<()> {
    let Some(first) = segments.first() else {
        return Err(StoryError::config("segment table must not be empty"));
    };

    for s in segments {
        if !s.start.is_finite() || !s.end.is_finite() {
            return Err(StoryError::config(format!(
                "segment {:?} has non-finite bounds",
                s.id
            )));
        }
        if s.start < -COVERAGE_EPSILON || s.end > 1.0 + COVERAGE_EPSILON {
            return Err(StoryError::config(format!(
                "segment {:?} [{}, {}) lies outside [0, 1]",
                s.id, s.start, s.end
            )));
        }
        if s.start >= s.end {
            return Err(StoryError::config(format!(
                "segment {:?} must have start < end (got [{}, {}))",
                s.id, s.start, s.end
            )));
        }
    }

    if first.start.abs() > COVERAGE_EPSILON {
        return Err(StoryError::config(format!(
            "first segment {:?} must start at 0 (got {})",
            first.id, first.start
        )));
    }
    let last = &segments[segments.len() - 1];
    if (last.end - 1.0).abs() > COVERAGE_EPSILON {
        return Err(StoryError::config(format!(
            "last segment {:?} must end at 1 (got {})",
            last.id, last.end
        )));
    }

    for w in segments.windows(2) {
        let (a, b) = (&w[0], &w[1]);
        if (b.start - a.end).abs() > COVERAGE_EPSILON {
            let what = if b.start > a.end { "gap" } else { "overlap" };
            return Err(StoryError::config(format!(
                "{what} between segments {:?} (ends {}) and {:?} (starts {})",
                a.id, a.end, b.id, b.start
            )));
        }
    }

    for (i, a) in segments.iter().enumerate() {
        if segments[i + 1..].iter().any(|b| b.id == a.id) {
            return Err(StoryError::config(format!(
                "duplicate segment id {:?}",
                a.id
            )));
        }
    }

    Ok(())
}

/// JSON form of a segment table with string ids.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct SegmentTableDef {
    /// Spans in declaration order.
    pub segments: Vec<SegmentDef>,
}

/// One span of a [`SegmentTableDef`].
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct SegmentDef {
    /// Section name.
    pub name: String,
    /// Inclusive start.
    pub start: f64,
    /// Exclusive end.
    pub end: f64,
}

impl SegmentTableDef {
    /// Parse from a JSON reader (no validation yet).
    pub fn from_reader<R: std::io::Read>(r: R) -> StoryResult<Self> {
        serde_json::from_reader(r)
            .map_err(|e| StoryError::serde(format!("parse segment table JSON: {e}")))
    }

    /// Parse from a JSON file on disk (no validation yet).
    pub fn from_path(path: impl AsRef<Path>) -> StoryResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            StoryError::config(format!("open segment table '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    /// Validate into a [`SegmentTable`].
    pub fn build(self) -> StoryResult<SegmentTable<String>> {
        SegmentTable::new(self.segments.into_iter().map(|s| (s.name, s.start, s.end)))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/segment/table.rs"]
mod tests;
