use crate::scroll::host::{Host, ListenerId};

/// Snapshot of the reduced-motion preference, threaded by value into every consumer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct ReducedMotion(pub bool);

impl ReducedMotion {
    /// Full animation.
    pub const OFF: Self = Self(false);
    /// Step-function rendering.
    pub const ON: Self = Self(true);

    /// Whether interpolation should collapse to end states.
    pub fn is_reduced(self) -> bool {
        self.0
    }
}

/// The single process-wide reduced-motion state.
///
/// Lifecycle: [`MotionPreference::init`] reads the media query once and installs one change
/// listener; the host forwards changes to [`MotionPreference::on_change`];
/// [`MotionPreference::teardown`] removes the listener. Consumers never query it implicitly: the
/// owner reads [`MotionPreference::current`] once per frame and passes the value down.
#[derive(Debug, Default)]
pub struct MotionPreference {
    reduced: bool,
    listener: Option<ListenerId>,
}

impl MotionPreference {
    /// A preference not tied to any host (CLI sampling, tests).
    pub fn fixed(reduced: bool) -> Self {
        Self {
            reduced,
            listener: None,
        }
    }

    /// Read the current media-query value and subscribe to changes.
    pub fn init(host: &mut impl Host) -> Self {
        let reduced = host.prefers_reduced_motion();
        let listener = Some(host.add_motion_listener());
        tracing::debug!(reduced, "reduced-motion preference initialised");
        Self { reduced, listener }
    }

    /// Media-query change callback.
    pub fn on_change(&mut self, matches: bool) {
        if self.reduced != matches {
            tracing::debug!(reduced = matches, "reduced-motion preference changed");
        }
        self.reduced = matches;
    }

    /// Current value.
    pub fn current(&self) -> ReducedMotion {
        ReducedMotion(self.reduced)
    }

    /// Whether a media-query listener is installed.
    pub fn is_subscribed(&self) -> bool {
        self.listener.is_some()
    }

    /// Remove the media-query listener. Idempotent.
    pub fn teardown(&mut self, host: &mut impl Host) {
        if let Some(l) = self.listener.take() {
            host.remove_listener(l);
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scroll/motion.rs"]
mod tests;
