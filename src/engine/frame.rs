use std::fmt;

use crate::engine::mount::MountWindow;
use crate::foundation::core::Progress;
use crate::scroll::motion::ReducedMotion;
use crate::segment::table::{Segment, SegmentTable};

/// Everything derived from one progress value: active segment, local progress, motion mode.
///
/// Built once per recompute and handed by reference to signal derivation and renderers.
#[derive(Clone, Copy, Debug)]
pub struct ProgressFrame<'a, S> {
    table: &'a SegmentTable<S>,
    active: &'a Segment<S>,
    progress: Progress,
    motion: ReducedMotion,
}

impl<'a, S> ProgressFrame<'a, S>
where
    S: Clone + PartialEq + fmt::Debug,
{
    /// Resolve the active segment for `progress`.
    pub fn new(table: &'a SegmentTable<S>, progress: Progress, motion: ReducedMotion) -> Self {
        Self {
            table,
            active: table.active(progress),
            progress,
            motion,
        }
    }

    /// Raw scroll progress. Use this for discrete selections (focus, thresholds).
    pub fn progress(&self) -> Progress {
        self.progress
    }

    /// Progress that drives continuous signals.
    ///
    /// Equal to [`Self::progress`] normally; with reduced motion it snaps to the end of the active
    /// segment so every signal shows that segment's end state.
    pub fn motion_progress(&self) -> Progress {
        if self.motion.is_reduced() {
            Progress::new(self.active.end)
        } else {
            self.progress
        }
    }

    /// The active segment.
    pub fn active(&self) -> &'a Segment<S> {
        self.active
    }

    /// Whether `id` is the active segment.
    pub fn is_active(&self, id: &S) -> bool {
        &self.active.id == id
    }

    /// Raw local progress of `id`.
    pub fn local(&self, id: &S) -> f64 {
        self.table.local_progress(id, self.progress)
    }

    /// Local progress of `id` under the current motion mode: `1` for the active and earlier
    /// segments, `0` for later ones when motion is reduced.
    pub fn motion_local(&self, id: &S) -> f64 {
        if !self.motion.is_reduced() {
            return self.local(id);
        }
        match self.table.index_of(id) {
            Some(i) if i <= self.active.index => 1.0,
            _ => 0.0,
        }
    }

    /// [`SegmentTable::span_progress`] evaluated at [`Self::motion_progress`].
    pub fn span(&self, from: &S, to: &S) -> f64 {
        self.table.span_progress(from, to, self.motion_progress())
    }

    /// Segment bounds for `id`, if declared.
    pub fn segment(&self, id: &S) -> Option<&'a Segment<S>> {
        self.table.get(id)
    }

    /// Motion mode this frame was built with.
    pub fn reduced_motion(&self) -> ReducedMotion {
        self.motion
    }

    /// Mount window around the active segment.
    pub fn mount_window(&self) -> MountWindow {
        MountWindow::new(self.active.index, self.table.len())
    }

    /// The table this frame was derived from.
    pub fn table(&self) -> &'a SegmentTable<S> {
        self.table
    }
}

#[cfg(test)]
#[path = "../../tests/unit/engine/frame.rs"]
mod tests;
