use crate::foundation::core::{Direction, Progress, Rect};
use crate::scroll::host::{ContainerId, FrameRequestId, Host, ListenerId};

/// One measurement of an act container against the viewport.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize)]
pub struct ScrollSample {
    /// How far the container has been scrolled through, `[0, 1]`.
    pub progress: Progress,
    /// Whether any part of the container intersects the viewport.
    pub in_view: bool,
    /// Document scroll offset at measurement time.
    pub scroll_y: f64,
    /// Last strict scroll direction; `None` until the first movement.
    pub direction: Option<Direction>,
}

/// Progress of a container whose top is `rect.y0` and bottom `rect.y1`, relative to the viewport.
///
/// Progress is `0` when the container's top touches the viewport bottom and `1` when its bottom
/// leaves the viewport top. A zero-length scroll range reports `0`.
pub fn container_progress(rect: Rect, viewport_height: f64) -> Progress {
    let scroll_start = rect.y0 - viewport_height;
    let scroll_end = rect.y1;
    let range = scroll_end - scroll_start;
    if range.is_nan() || range <= 0.0 {
        return Progress::ZERO;
    }
    Progress::new(-scroll_start / range)
}

/// `true` when the rect intersects `[0, viewport_height)`.
pub fn container_in_view(rect: Rect, viewport_height: f64) -> bool {
    rect.y0 < viewport_height && rect.y1 > 0.0
}

/// Document-wide progress for the page progress bar.
pub fn page_progress(scroll_y: f64, document_height: f64, viewport_height: f64) -> Progress {
    let scrollable = document_height - viewport_height;
    if scrollable.is_nan() || scrollable <= 0.0 {
        return Progress::ZERO;
    }
    Progress::new(scroll_y / scrollable)
}

/// Tracks one act container and produces at most one [`ScrollSample`] per animation frame.
///
/// Scroll events only schedule work; measurement happens in [`ProgressSource::on_frame`], against
/// the layout as it is at that moment.
#[derive(Debug)]
pub struct ProgressSource {
    container: ContainerId,
    listener: Option<ListenerId>,
    pending: Option<FrameRequestId>,
    last_scroll_y: f64,
    sample: ScrollSample,
}

impl ProgressSource {
    /// Create a detached source for `container`.
    pub fn new(container: ContainerId) -> Self {
        Self {
            container,
            listener: None,
            pending: None,
            last_scroll_y: 0.0,
            sample: ScrollSample::default(),
        }
    }

    /// The observed container.
    pub fn container(&self) -> ContainerId {
        self.container
    }

    /// Register the scroll listener and schedule the initial measurement. Idempotent.
    pub fn attach(&mut self, host: &mut impl Host) {
        if self.listener.is_some() {
            return;
        }
        self.listener = Some(host.add_scroll_listener());
        self.last_scroll_y = host.scroll_y();
        self.on_scroll(host);
    }

    /// Whether a listener is registered.
    pub fn is_attached(&self) -> bool {
        self.listener.is_some()
    }

    /// Whether a frame callback is outstanding.
    pub fn has_pending_frame(&self) -> bool {
        self.pending.is_some()
    }

    /// Handle a scroll event. Returns `true` when a new frame was requested; further events
    /// before that frame runs are coalesced into it.
    pub fn on_scroll(&mut self, host: &mut impl Host) -> bool {
        if self.listener.is_none() || self.pending.is_some() {
            return false;
        }
        self.pending = Some(host.request_frame());
        true
    }

    /// Run the scheduled measurement.
    ///
    /// An unattached container leaves the previous sample untouched (progress `0` before the first
    /// successful measurement).
    pub fn on_frame(&mut self, host: &impl Host) -> ScrollSample {
        self.pending = None;
        let Some(rect) = host.container_rect(self.container) else {
            tracing::trace!(container = self.container.0, "container not attached; skipping");
            return self.sample;
        };

        let vh = host.viewport_height();
        let scroll_y = host.scroll_y();
        let direction = Direction::between(self.last_scroll_y, scroll_y).or(self.sample.direction);
        self.last_scroll_y = scroll_y;

        self.sample = ScrollSample {
            progress: container_progress(rect, vh),
            in_view: container_in_view(rect, vh),
            scroll_y,
            direction,
        };
        self.sample
    }

    /// Latest sample.
    pub fn sample(&self) -> ScrollSample {
        self.sample
    }

    /// Cancel any pending frame and remove the listener. Idempotent.
    pub fn detach(&mut self, host: &mut impl Host) {
        if let Some(frame) = self.pending.take() {
            host.cancel_frame(frame);
        }
        if let Some(listener) = self.listener.take() {
            host.remove_listener(listener);
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scroll/source.rs"]
mod tests;
