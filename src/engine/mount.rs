use std::ops::Range;

/// Sections eligible for rendering: the active one and its immediate neighbours.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub struct MountWindow {
    /// Active segment index.
    pub active: usize,
    /// Number of segments in the act.
    pub len: usize,
}

impl MountWindow {
    /// Window around `active` in a table of `len` segments.
    pub fn new(active: usize, len: usize) -> Self {
        Self { active, len }
    }

    /// Whether `index` should be mounted.
    pub fn contains(self, index: usize) -> bool {
        index < self.len && index.abs_diff(self.active) <= 1
    }

    /// Mounted indices as a half-open range.
    pub fn range(self) -> Range<usize> {
        let start = self.active.saturating_sub(1);
        let end = (self.active + 2).min(self.len);
        start..end
    }

    /// Indices entering and leaving when moving from `prev` to `self`.
    pub fn diff(self, prev: Option<Self>) -> MountDiff {
        let mut out = MountDiff::default();
        match prev {
            None => out.mounted.extend(self.range()),
            Some(prev) => {
                out.unmounted
                    .extend(prev.range().filter(|&i| !self.contains(i)));
                out.mounted.extend(self.range().filter(|&i| !prev.contains(i)));
            }
        }
        out
    }
}

/// Result of [`MountWindow::diff`], in ascending index order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MountDiff {
    /// Newly mounted indices.
    pub mounted: Vec<usize>,
    /// Indices that must be torn down now.
    pub unmounted: Vec<usize>,
}

impl MountDiff {
    /// `true` when nothing changes.
    pub fn is_empty(&self) -> bool {
        self.mounted.is_empty() && self.unmounted.is_empty()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/engine/mount.rs"]
mod tests;
