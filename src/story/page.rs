use crate::act::orchestrator::ActFrame;
use crate::foundation::core::Progress;
use crate::foundation::error::StoryResult;
use crate::scroll::host::{ContainerId, Host};
use crate::scroll::motion::{MotionPreference, ReducedMotion};
use crate::scroll::source::page_progress;
use crate::story::act1::{self, Act1, Act1Section, Act1State};
use crate::story::act2::{self, Act2, Act2Section, Act2State, Region};
use crate::story::act3::{self, Act3, Act3Section, Act3State, Solution};
use crate::story::data::StoryData;

/// Containers the three acts are bound to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ActContainers {
    pub act1: ContainerId,
    pub act2: ContainerId,
    pub act3: ContainerId,
}

/// Output of one animation frame. Acts that had no pending frame report `None`.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct StoryFrame {
    /// Whole-document progress for the page progress bar.
    pub page_progress: Progress,
    pub reduced_motion: ReducedMotion,
    pub act1: Option<ActFrame<Act1Section, Act1State>>,
    pub act2: Option<ActFrame<Act2Section, Act2State>>,
    pub act3: Option<ActFrame<Act3Section, Act3State>>,
}

/// The whole page: three acts sharing one reduced-motion preference.
#[derive(Debug)]
pub struct Story {
    act1: Act1,
    act2: Act2,
    act3: Act3,
    motion: MotionPreference,
}

impl Story {
    /// Build all acts. Motion starts as `motion` until [`Story::attach`] subscribes to the host.
    #[tracing::instrument(skip_all)]
    pub fn new(data: &StoryData, motion: MotionPreference) -> StoryResult<Self> {
        Ok(Self {
            act1: act1::build(data)?,
            act2: act2::build(data)?,
            act3: act3::build()?,
            motion,
        })
    }

    pub fn act1(&mut self) -> &mut Act1 {
        &mut self.act1
    }

    pub fn act2(&mut self) -> &mut Act2 {
        &mut self.act2
    }

    pub fn act3(&mut self) -> &mut Act3 {
        &mut self.act3
    }

    pub fn reduced_motion(&self) -> ReducedMotion {
        self.motion.current()
    }

    /// Subscribe to the motion preference and bind every act to its container.
    pub fn attach(&mut self, host: &mut impl Host, containers: ActContainers) {
        if !self.motion.is_subscribed() {
            self.motion = MotionPreference::init(host);
        }
        self.act1.attach(host, containers.act1);
        self.act2.attach(host, containers.act2);
        self.act3.attach(host, containers.act3);
    }

    /// Forward a scroll event to every act. Returns `true` if any frame was requested.
    pub fn on_scroll(&mut self, host: &mut impl Host) -> bool {
        let a = self.act1.on_scroll(host);
        let b = self.act2.on_scroll(host);
        let c = self.act3.on_scroll(host);
        a || b || c
    }

    /// Media-query change: record it and re-render every act with the new value.
    pub fn on_motion_change(&mut self, host: &mut impl Host, matches: bool) {
        self.motion.on_change(matches);
        self.on_scroll(host);
    }

    /// Run the pending measurements. The motion value is read once and passed to every act.
    pub fn on_frame(&mut self, host: &impl Host) -> StoryFrame {
        let motion = self.motion.current();
        let page_progress = page_progress(
            host.scroll_y(),
            host.document_height(),
            host.viewport_height(),
        );

        let mut frame = StoryFrame {
            page_progress,
            reduced_motion: motion,
            act1: None,
            act2: None,
            act3: None,
        };
        if self.act1.has_pending_frame() {
            frame.act1 = self.act1.on_frame(host, motion);
        }
        if self.act2.has_pending_frame() {
            frame.act2 = self.act2.on_frame(host, motion);
        }
        if self.act3.has_pending_frame() {
            frame.act3 = self.act3.on_frame(host, motion);
        }
        frame
    }

    pub fn select_region(&mut self, region: Region) {
        act2::select_region(&mut self.act2, region);
    }

    pub fn toggle_tile(&mut self, s: Solution) -> bool {
        act3::toggle_tile(&mut self.act3, s)
    }

    /// Drop every listener and pending frame and unmount all sections.
    pub fn detach(&mut self, host: &mut impl Host) {
        self.act1.detach(host);
        self.act2.detach(host);
        self.act3.detach(host);
        self.motion.teardown(host);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/story/page.rs"]
mod tests;
