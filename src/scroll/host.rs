use std::collections::BTreeSet;

use crate::foundation::core::Rect;

/// Handle for a scrollable act container owned by the host.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ContainerId(pub u32);

/// Registration handle returned by the host for event listeners.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(pub u64);

/// Handle for a pending animation-frame callback.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FrameRequestId(pub u64);

/// The page environment: layout reads, scroll position, listener and frame scheduling.
///
/// Everything the engine needs from a browser goes through this trait, so the engine itself is
/// pure and single-threaded. Layout reads must reflect the current layout, never a cached one.
pub trait Host {
    /// Current viewport height in CSS pixels.
    fn viewport_height(&self) -> f64;

    /// Current document scroll offset.
    fn scroll_y(&self) -> f64;

    /// Full scrollable height of the document.
    fn document_height(&self) -> f64;

    /// Bounding rect of `id` relative to the viewport, or `None` when not attached yet.
    fn container_rect(&self, id: ContainerId) -> Option<Rect>;

    /// Current `prefers-reduced-motion` media-query value.
    fn prefers_reduced_motion(&self) -> bool;

    /// Register a passive scroll listener.
    fn add_scroll_listener(&mut self) -> ListenerId;

    /// Register a reduced-motion media-query change listener.
    fn add_motion_listener(&mut self) -> ListenerId;

    /// Remove a listener registered by either `add_*` call.
    fn remove_listener(&mut self, id: ListenerId);

    /// Schedule a callback for the next animation frame.
    fn request_frame(&mut self) -> FrameRequestId;

    /// Cancel a pending frame callback.
    fn cancel_frame(&mut self, id: FrameRequestId);
}

#[derive(Clone, Copy, Debug)]
struct PageBlock {
    doc_top: f64,
    height: f64,
    attached: bool,
}

/// An in-memory page: containers stacked vertically in a document with a scrolling viewport.
///
/// Used by the CLI to drive acts end to end and by tests to check listener/frame bookkeeping.
#[derive(Clone, Debug)]
pub struct SimulatedPage {
    viewport_height: f64,
    scroll_y: f64,
    blocks: Vec<PageBlock>,
    reduced_motion: bool,
    next_handle: u64,
    listeners: BTreeSet<ListenerId>,
    frames: BTreeSet<FrameRequestId>,
}

impl SimulatedPage {
    /// Empty document with the given viewport height.
    pub fn new(viewport_height: f64) -> Self {
        Self {
            viewport_height: viewport_height.max(1.0),
            scroll_y: 0.0,
            blocks: Vec::new(),
            reduced_motion: false,
            next_handle: 1,
            listeners: BTreeSet::new(),
            frames: BTreeSet::new(),
        }
    }

    /// Append a non-observed block (hero, footer, ...) of `height` pixels.
    pub fn push_spacer(&mut self, height: f64) {
        self.push_block(height, false);
    }

    /// Append an act container of `height` pixels and return its handle.
    pub fn push_container(&mut self, height: f64) -> ContainerId {
        let id = ContainerId(self.blocks.len() as u32);
        self.push_block(height, true);
        id
    }

    fn push_block(&mut self, height: f64, attached: bool) {
        let doc_top = self.document_height();
        self.blocks.push(PageBlock {
            doc_top,
            height: height.max(0.0),
            attached,
        });
    }

    /// Simulate the container ref going away (or never having been attached).
    pub fn set_attached(&mut self, id: ContainerId, attached: bool) {
        if let Some(b) = self.blocks.get_mut(id.0 as usize) {
            b.attached = attached;
        }
    }

    /// Largest reachable scroll offset.
    pub fn max_scroll(&self) -> f64 {
        (self.document_height() - self.viewport_height).max(0.0)
    }

    /// Move the viewport, clamped to the document.
    pub fn scroll_to(&mut self, y: f64) {
        self.scroll_y = y.clamp(0.0, self.max_scroll());
    }

    /// Flip the reduced-motion preference. Returns `true` when the value changed.
    pub fn set_reduced_motion(&mut self, reduced: bool) -> bool {
        let changed = self.reduced_motion != reduced;
        self.reduced_motion = reduced;
        changed
    }

    /// Number of live listeners (scroll + media query).
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    /// Number of frame callbacks waiting to run.
    pub fn pending_frames(&self) -> usize {
        self.frames.len()
    }

    /// Drain pending frame callbacks, as the browser does at the start of a frame.
    pub fn take_frames(&mut self) -> Vec<FrameRequestId> {
        std::mem::take(&mut self.frames).into_iter().collect()
    }

    fn next(&mut self) -> u64 {
        let h = self.next_handle;
        self.next_handle += 1;
        h
    }
}

impl Host for SimulatedPage {
    fn viewport_height(&self) -> f64 {
        self.viewport_height
    }

    fn scroll_y(&self) -> f64 {
        self.scroll_y
    }

    fn document_height(&self) -> f64 {
        self.blocks.iter().map(|b| b.height).sum()
    }

    fn container_rect(&self, id: ContainerId) -> Option<Rect> {
        let b = self.blocks.get(id.0 as usize)?;
        if !b.attached {
            return None;
        }
        let top = b.doc_top - self.scroll_y;
        Some(Rect::new(0.0, top, 0.0, top + b.height))
    }

    fn prefers_reduced_motion(&self) -> bool {
        self.reduced_motion
    }

    fn add_scroll_listener(&mut self) -> ListenerId {
        let id = ListenerId(self.next());
        self.listeners.insert(id);
        id
    }

    fn add_motion_listener(&mut self) -> ListenerId {
        let id = ListenerId(self.next());
        self.listeners.insert(id);
        id
    }

    fn remove_listener(&mut self, id: ListenerId) {
        self.listeners.remove(&id);
    }

    fn request_frame(&mut self) -> FrameRequestId {
        let id = FrameRequestId(self.next());
        self.frames.insert(id);
        id
    }

    fn cancel_frame(&mut self, id: FrameRequestId) {
        self.frames.remove(&id);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scroll/host.rs"]
mod tests;
