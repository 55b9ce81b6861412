use crate::animation::curve::{Reveal, Style};
use crate::animation::interp::clamped_linear;
use crate::foundation::core::Vec2;
use crate::scroll::motion::ReducedMotion;

/// Inputs handed to a mounted section for one frame.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct SectionProps {
    /// Declaration index of the section.
    pub index: usize,
    /// Local progress of the section's own segment.
    pub local_progress: f64,
    /// Whether the section's segment is active.
    pub is_active: bool,
    /// Local progress of the next segment, set only for the section just before the active one.
    pub handoff: Option<f64>,
    /// Process-wide motion preference for this frame.
    pub reduced_motion: ReducedMotion,
}

impl SectionProps {
    /// Resolve a style under the current motion mode.
    ///
    /// With reduced motion an active section gets `live(1.0)` (its end state) and anything else
    /// is hidden, so no intermediate value is ever produced.
    pub fn style(&self, live: impl FnOnce(f64) -> Style) -> Style {
        if self.reduced_motion.is_reduced() {
            return if self.is_active {
                live(1.0)
            } else {
                Style::HIDDEN
            };
        }
        live(self.local_progress)
    }
}

/// What a section produced for one frame.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct SectionFrame<S> {
    /// Section id.
    pub id: S,
    /// Whether its segment is active.
    pub is_active: bool,
    /// Container style.
    pub style: Style,
    /// Per-item styles for staggered children.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub items: Vec<Style>,
}

/// A presentational leaf. Holds no timers; anything per-mount is released in `on_unmount`.
pub trait SectionRenderer<S, V> {
    /// Section id; must match the segment at the same index.
    fn id(&self) -> &S;

    /// Called when the section enters the mount window.
    fn on_mount(&mut self) {}

    /// Called synchronously, in the same frame, when the section leaves the mount window.
    fn on_unmount(&mut self) {}

    /// Produce this frame's output.
    fn render(&mut self, props: &SectionProps, state: &V) -> SectionFrame<S>;
}

/// Staggered children revealed across the section's local progress.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ItemStagger {
    /// Number of items.
    pub count: usize,
    /// Local progress at which item 0 starts.
    pub first: f64,
    /// Offset between consecutive item starts.
    pub delay: f64,
    /// Ramp width of each item.
    pub span: f64,
    /// Slide-in offset.
    pub offset: Vec2,
}

impl ItemStagger {
    fn reveal(&self, index: usize) -> Reveal {
        let start = self.first + index as f64 * self.delay;
        Reveal::fade(start, start + self.span).with_offset(self.offset)
    }
}

/// The common section shape: reveal on entry, cross-fade out during the next segment, optional
/// staggered children, optional opacity gain read from the act's visual state.
pub struct StagedSection<S, V> {
    id: S,
    enter: Reveal,
    exit_span: f64,
    items: Option<ItemStagger>,
    gain: Option<fn(&V) -> f64>,
    mounted: bool,
    mounts: u32,
}

impl<S: Clone, V> StagedSection<S, V> {
    /// Section that fades in over the first fifth of its segment and hands off over the first
    /// fifth of the next one.
    pub fn new(id: S) -> Self {
        Self {
            id,
            enter: Reveal::fade(0.0, 0.2),
            exit_span: 0.2,
            items: None,
            gain: None,
            mounted: false,
            mounts: 0,
        }
    }

    /// Replace the entry reveal.
    pub fn enter(mut self, enter: Reveal) -> Self {
        self.enter = enter;
        self
    }

    /// Fraction of the next segment over which this section fades out.
    pub fn exit_span(mut self, span: f64) -> Self {
        self.exit_span = span;
        self
    }

    /// Add staggered children.
    pub fn items(mut self, items: ItemStagger) -> Self {
        self.items = Some(items);
        self
    }

    /// Multiply container opacity by a value read from visual state.
    pub fn gain(mut self, gain: fn(&V) -> f64) -> Self {
        self.gain = Some(gain);
        self
    }

    /// Erase into a trait object for an act's section list.
    pub fn boxed(self) -> Box<dyn SectionRenderer<S, V>>
    where
        S: 'static,
        V: 'static,
    {
        Box::new(self)
    }

    /// Whether the section is currently mounted.
    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    /// Total number of mounts so far.
    pub fn mount_count(&self) -> u32 {
        self.mounts
    }

    fn container(&self, props: &SectionProps) -> Style {
        let enter = self.enter;
        let exit_span = self.exit_span;
        let handoff = props.handoff;
        props.style(move |local| match handoff {
            Some(next) => Style {
                opacity: 1.0 - clamped_linear(next, 0.0, exit_span),
                translate: Vec2::ZERO,
            },
            None => enter.sample(local),
        })
    }
}

impl<S: Clone, V> SectionRenderer<S, V> for StagedSection<S, V> {
    fn id(&self) -> &S {
        &self.id
    }

    fn on_mount(&mut self) {
        self.mounted = true;
        self.mounts += 1;
    }

    fn on_unmount(&mut self) {
        self.mounted = false;
    }

    fn render(&mut self, props: &SectionProps, state: &V) -> SectionFrame<S> {
        let mut style = self.container(props);
        if let Some(gain) = self.gain {
            style.opacity *= gain(state).clamp(0.0, 1.0);
        }

        let items = match &self.items {
            Some(st) => (0..st.count)
                .map(|i| {
                    let reveal = st.reveal(i);
                    props.style(|local| reveal.sample(local))
                })
                .collect(),
            None => Vec::new(),
        };

        SectionFrame {
            id: self.id.clone(),
            is_active: props.is_active,
            style,
            items,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/act/section.rs"]
mod tests;
