use std::fmt;

use crate::engine::frame::ProgressFrame;
use crate::engine::resolver::Resolver;
use crate::foundation::core::Progress;
use crate::scroll::motion::ReducedMotion;
use crate::segment::table::SegmentTable;

/// Visual state that can enumerate its continuous numeric signals.
///
/// Discrete values (focus selection, booleans, carry-over state) are left out: only signals
/// that must be continuous in progress belong here.
pub trait Signals {
    /// `(name, value)` for every continuous signal.
    fn signals(&self) -> Vec<(&'static str, f64)>;
}

/// A discontinuity found at a segment boundary.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct Jump {
    /// Boundary progress (end of one segment, start of the next).
    pub boundary: f64,
    /// Offending signal.
    pub signal: &'static str,
    /// Value just before the boundary.
    pub before: f64,
    /// Value at the boundary.
    pub after: f64,
}

impl Jump {
    /// Absolute difference.
    pub fn size(&self) -> f64 {
        (self.after - self.before).abs()
    }
}

/// Compare every signal just before (`boundary - epsilon`) and at each interior boundary.
///
/// Returns one [`Jump`] per signal per boundary, sorted largest first. Motion is never
/// reduced here; reduced motion is a step function by definition.
pub fn boundary_jumps<S, C, V>(
    table: &SegmentTable<S>,
    resolver: &Resolver<S, C, V>,
    carry: &C,
    epsilon: f64,
) -> Vec<Jump>
where
    S: Clone + PartialEq + fmt::Debug,
    V: Signals,
{
    let mut out = Vec::new();
    for boundary in table.boundaries() {
        let before = resolver
            .evaluate(
                &ProgressFrame::new(table, Progress::new(boundary - epsilon), ReducedMotion::OFF),
                carry,
            )
            .signals();
        let after = resolver
            .evaluate(
                &ProgressFrame::new(table, Progress::new(boundary), ReducedMotion::OFF),
                carry,
            )
            .signals();

        for ((signal, b), (_, a)) in before.into_iter().zip(after) {
            out.push(Jump {
                boundary,
                signal,
                before: b,
                after: a,
            });
        }
    }
    out.sort_by(|x, y| y.size().total_cmp(&x.size()));
    out
}

/// Jumps larger than `tolerance`.
pub fn discontinuities<S, C, V>(
    table: &SegmentTable<S>,
    resolver: &Resolver<S, C, V>,
    carry: &C,
    epsilon: f64,
    tolerance: f64,
) -> Vec<Jump>
where
    S: Clone + PartialEq + fmt::Debug,
    V: Signals,
{
    boundary_jumps(table, resolver, carry, epsilon)
        .into_iter()
        .filter(|j| !(j.size() <= tolerance))
        .collect()
}

#[cfg(test)]
#[path = "../../tests/unit/engine/signals.rs"]
mod tests;
