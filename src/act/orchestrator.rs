use std::fmt;

use crate::act::section::{SectionFrame, SectionProps, SectionRenderer};
use crate::engine::frame::ProgressFrame;
use crate::engine::mount::MountWindow;
use crate::engine::resolver::{Carry, Resolver};
use crate::foundation::core::Progress;
use crate::foundation::error::{StoryError, StoryResult};
use crate::scroll::host::{ContainerId, Host};
use crate::scroll::motion::ReducedMotion;
use crate::scroll::source::{ProgressSource, ScrollSample};
use crate::segment::table::SegmentTable;

/// Edge-triggered carry update, run before derivation with the previous frame's raw progress.
///
/// Implementations must only call [`Carry::update`] when something actually changes.
pub type CarryHook<S, C> = Box<dyn FnMut(&mut Carry<C>, &ProgressFrame<'_, S>, Option<Progress>)>;

/// Everything one act produced for one frame.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct ActFrame<S, V> {
    /// Act name.
    pub act: &'static str,
    /// Raw progress the frame was built from.
    pub progress: Progress,
    /// Active section.
    pub active: S,
    /// Mounted index window.
    pub window: MountWindow,
    /// Motion mode used.
    pub reduced_motion: ReducedMotion,
    /// Derived visual state.
    pub state: V,
    /// Output of every mounted section, in declaration order.
    pub sections: Vec<SectionFrame<S>>,
}

/// Owns one act: its progress source, segment table, resolver, carry-over state and sections.
///
/// Each frame flows one way: progress, then active segment and local progress, then visual
/// state, then the mounted sections. Only the sections inside the mount window are rendered.
pub struct ActOrchestrator<S, C, V> {
    name: &'static str,
    table: SegmentTable<S>,
    resolver: Resolver<S, C, V>,
    carry: Carry<C>,
    hook: Option<CarryHook<S, C>>,
    renderers: Vec<Box<dyn SectionRenderer<S, V>>>,
    source: Option<ProgressSource>,
    window: Option<MountWindow>,
    last_progress: Option<Progress>,
}

impl<S, C, V> ActOrchestrator<S, C, V>
where
    S: Clone + PartialEq + fmt::Debug,
    V: Clone,
{
    /// Assemble an act. `renderers` must list one section per segment, in table order.
    #[tracing::instrument(skip_all, fields(act = name))]
    pub fn new(
        name: &'static str,
        table: SegmentTable<S>,
        resolver: Resolver<S, C, V>,
        carry: C,
        renderers: Vec<Box<dyn SectionRenderer<S, V>>>,
    ) -> StoryResult<Self> {
        if renderers.len() != table.len() {
            return Err(StoryError::config(format!(
                "act '{name}': {} sections for {} segments",
                renderers.len(),
                table.len()
            )));
        }
        for (seg, r) in table.iter().zip(&renderers) {
            if r.id() != &seg.id {
                return Err(StoryError::config(format!(
                    "act '{name}': section {:?} declared where segment {:?} is expected",
                    r.id(),
                    seg.id
                )));
            }
        }
        tracing::debug!(sections = table.len(), "act assembled");

        Ok(Self {
            name,
            table,
            resolver,
            carry: Carry::new(carry),
            hook: None,
            renderers,
            source: None,
            window: None,
            last_progress: None,
        })
    }

    /// Builder: install an edge-triggered carry hook.
    pub fn with_carry_hook(
        mut self,
        hook: impl FnMut(&mut Carry<C>, &ProgressFrame<'_, S>, Option<Progress>) + 'static,
    ) -> Self {
        self.hook = Some(Box::new(hook));
        self
    }

    /// Act name used in logs and CLI output.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Segment table driving this act.
    pub fn table(&self) -> &SegmentTable<S> {
        &self.table
    }

    /// State derivation, for uncached evaluation.
    pub fn resolver(&self) -> &Resolver<S, C, V> {
        &self.resolver
    }

    /// Current carry-over state.
    pub fn carry(&self) -> &C {
        self.carry.get()
    }

    /// Apply a user interaction to the carry-over state. Takes effect on the next frame.
    pub fn interact<R>(&mut self, f: impl FnOnce(&mut C) -> R) -> R {
        let out = self.carry.update(f);
        tracing::debug!(act = self.name, revision = self.carry.revision(), "carry updated");
        out
    }

    /// Current mount window, `None` before the first frame or after detach.
    pub fn mount_window(&self) -> Option<MountWindow> {
        self.window
    }

    /// Bind to a host container and start listening for scroll.
    ///
    /// Re-attaching to a different container drops the old source (detaching it first).
    pub fn attach(&mut self, host: &mut impl Host, container: ContainerId) {
        if let Some(old) = self.source.as_mut().filter(|s| s.container() != container) {
            old.detach(host);
            self.source = None;
        }
        let source = self
            .source
            .get_or_insert_with(|| ProgressSource::new(container));
        source.attach(host);
        tracing::debug!(act = self.name, ?container, "act attached");
    }

    /// Whether a progress source is listening.
    pub fn is_attached(&self) -> bool {
        self.source.as_ref().is_some_and(ProgressSource::is_attached)
    }

    /// Forward a scroll event. Returns `true` if a frame was requested.
    pub fn on_scroll(&mut self, host: &mut impl Host) -> bool {
        match &mut self.source {
            Some(source) => source.on_scroll(host),
            None => false,
        }
    }

    /// Whether a frame is requested and not yet delivered.
    pub fn has_pending_frame(&self) -> bool {
        self.source
            .as_ref()
            .is_some_and(ProgressSource::has_pending_frame)
    }

    /// Latest measurement, if attached.
    pub fn sample(&self) -> Option<ScrollSample> {
        self.source.as_ref().map(ProgressSource::sample)
    }

    /// Measure and render. `None` when not attached.
    pub fn on_frame(&mut self, host: &impl Host, motion: ReducedMotion) -> Option<ActFrame<S, V>> {
        let source = self.source.as_mut().filter(|s| s.is_attached())?;
        let sample = source.on_frame(host);
        Some(self.step(sample.progress, motion))
    }

    /// Run one frame at `progress`.
    pub fn step(&mut self, progress: Progress, motion: ReducedMotion) -> ActFrame<S, V> {
        let frame = ProgressFrame::new(&self.table, progress, motion);
        if let Some(hook) = self.hook.as_mut() {
            hook(&mut self.carry, &frame, self.last_progress);
        }
        self.last_progress = Some(progress);

        let window = frame.mount_window();
        if self.window.map(|w| w.active) != Some(window.active) {
            tracing::debug!(
                act = self.name,
                active = ?frame.active().id,
                progress = progress.get(),
                "active section changed"
            );
        }
        let diff = window.diff(self.window);
        for &i in &diff.unmounted {
            self.renderers[i].on_unmount();
        }
        for &i in &diff.mounted {
            self.renderers[i].on_mount();
        }
        if !diff.is_empty() {
            tracing::trace!(act = self.name, mounted = ?diff.mounted, unmounted = ?diff.unmounted, "mount window moved");
        }
        self.window = Some(window);

        let state = self.resolver.resolve(&frame, &self.carry).clone();

        let active = frame.active();
        let mut sections = Vec::with_capacity(window.range().len());
        for i in window.range() {
            let Some(seg) = self.table.at(i) else {
                continue;
            };
            let handoff = (i + 1 == active.index).then(|| active.local(progress.get()));
            let props = SectionProps {
                index: i,
                local_progress: seg.local(progress.get()),
                is_active: i == active.index,
                handoff,
                reduced_motion: motion,
            };
            sections.push(self.renderers[i].render(&props, &state));
        }

        ActFrame {
            act: self.name,
            progress,
            active: active.id.clone(),
            window,
            reduced_motion: motion,
            state,
            sections,
        }
    }

    /// Stop listening and unmount everything synchronously. Idempotent.
    pub fn detach(&mut self, host: &mut impl Host) {
        if let Some(source) = self.source.as_mut() {
            source.detach(host);
        }
        if let Some(window) = self.window.take() {
            for i in window.range() {
                self.renderers[i].on_unmount();
            }
            tracing::debug!(act = self.name, "act detached");
        }
    }
}

impl<S: fmt::Debug, C, V> fmt::Debug for ActOrchestrator<S, C, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ActOrchestrator")
            .field("name", &self.name)
            .field("sections", &self.renderers.len())
            .field("window", &self.window)
            .field("attached", &self.source.is_some())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/act/orchestrator.rs"]
mod tests;
