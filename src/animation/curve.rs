use crate::animation::ease::Ease;
use crate::animation::interp::{Lerp, clamped_linear};
use crate::foundation::core::Vec2;

/// Opacity and translate offset handed to a presentational leaf.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct Style {
    /// `0.0` (hidden) to `1.0` (fully visible).
    pub opacity: f64,
    /// Offset from the resting position, in CSS pixels.
    pub translate: Vec2,
}

impl Style {
    /// Fully visible at rest.
    pub const SHOWN: Self = Self {
        opacity: 1.0,
        translate: Vec2::ZERO,
    };
    /// Invisible at rest.
    pub const HIDDEN: Self = Self {
        opacity: 0.0,
        translate: Vec2::ZERO,
    };
}

/// Fade in while sliding from `offset` to rest over `[start, end]` of a progress value.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Reveal {
    /// Progress at which the item starts to appear.
    pub start: f64,
    /// Progress at which it is fully visible.
    pub end: f64,
    /// Easing applied to the remapped progress.
    #[serde(default)]
    pub ease: Ease,
    /// Starting offset; shrinks to zero as opacity reaches one.
    #[serde(default)]
    pub offset: Vec2,
}

impl Reveal {
    /// A plain opacity ramp with no motion.
    pub fn fade(start: f64, end: f64) -> Self {
        Self {
            start,
            end,
            ease: Ease::Linear,
            offset: Vec2::ZERO,
        }
    }

    /// Builder: slide in from `offset`.
    pub fn with_offset(mut self, offset: Vec2) -> Self {
        self.offset = offset;
        self
    }

    /// Builder: ease the ramp.
    pub fn with_ease(mut self, ease: Ease) -> Self {
        self.ease = ease;
        self
    }

    /// Style at `progress`.
    pub fn sample(&self, progress: f64) -> Style {
        let t = self.ease.apply(clamped_linear(progress, self.start, self.end));
        Style {
            opacity: t,
            translate: self.offset * (1.0 - t),
        }
    }
}

/// Visible only inside `[start, end)`, with eased fades at both edges.
///
/// `fade` is the fraction of the window spent fading in (and, symmetrically, out).
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct FadeWindow {
    /// Window start.
    pub start: f64,
    /// Window end (exclusive).
    pub end: f64,
    /// Fraction of the window used by each fade, clamped to `[0, 0.5]`.
    pub fade: f64,
}

impl FadeWindow {
    /// Opacity at `progress`.
    pub fn opacity(&self, progress: f64) -> f64 {
        if progress < self.start || progress >= self.end {
            return 0.0;
        }
        let len = self.end - self.start;
        let fade = self.fade.clamp(0.0, 0.5) * len;
        let fade_in_end = self.start + fade;
        let fade_out_start = self.end - fade;

        if progress < fade_in_end {
            return Ease::OutCubic.apply(clamped_linear(progress, self.start, fade_in_end));
        }
        if progress > fade_out_start {
            return 1.0 - Ease::OutCubic.apply(clamped_linear(progress, fade_out_start, self.end));
        }
        1.0
    }
}

/// Progress-driven pulse in `[0, 1]`: zero at `progress = 0` and after every whole cycle.
///
/// Replaces clock-driven glows so the same scroll position always renders the same frame.
pub fn pulse(progress: f64, cycles: f64) -> f64 {
    let phase = progress * cycles * std::f64::consts::TAU;
    0.5 - 0.5 * phase.cos()
}

/// HSL colour; hue in degrees, saturation and lightness in percent.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Hsl {
    /// Hue, degrees.
    pub h: f64,
    /// Saturation, percent.
    pub s: f64,
    /// Lightness, percent.
    pub l: f64,
}

impl Hsl {
    /// Shorthand constructor.
    pub const fn new(h: f64, s: f64, l: f64) -> Self {
        Self { h, s, l }
    }
}

impl Lerp for Hsl {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        Self {
            h: a.h + (b.h - a.h) * t,
            s: a.s + (b.s - a.s) * t,
            l: a.l + (b.l - a.l) * t,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/curve.rs"]
mod tests;
