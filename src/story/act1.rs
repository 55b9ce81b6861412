//! Act 1: a century of warming, told through a thermometer and climate stripes.

use crate::act::orchestrator::ActOrchestrator;
use crate::act::section::{ItemStagger, SectionRenderer, StagedSection};
use crate::animation::curve::{FadeWindow, Hsl, Reveal, pulse};
use crate::animation::ease::{Ease, ease_out_cubic};
use crate::animation::interp::{Lerp, clamped_linear, remap, stagger};
use crate::animation::series::Series;
use crate::engine::frame::ProgressFrame;
use crate::engine::resolver::Resolver;
use crate::engine::signals::Signals;
use crate::foundation::core::Vec2;
use crate::foundation::error::StoryResult;
use crate::segment::focus::Plateau;
use crate::segment::table::SegmentTable;
use crate::story::data::StoryData;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Act1Section {
    Arrival,
    TimeBegins,
    Present,
    Average,
    Impacts,
    Landing,
    Transition,
}

/// Section boundaries as fractions of the act's scroll range.
pub const SECTIONS: [(Act1Section, f64, f64); 7] = [
    (Act1Section::Arrival, 0.0, 0.10),
    (Act1Section::TimeBegins, 0.10, 0.32),
    (Act1Section::Present, 0.32, 0.50),
    (Act1Section::Average, 0.50, 0.60),
    (Act1Section::Impacts, 0.60, 0.86),
    (Act1Section::Landing, 0.86, 0.94),
    (Act1Section::Transition, 0.94, 1.0),
];

/// Act fades in from the hero over this much progress.
pub const INTRO_FADE: f64 = 0.05;
/// Fraction of `TimeBegins` at which the temperature readout reaches today's value.
pub const TEMPERATURE_HOLD: f64 = 0.8;
/// Fraction of `Present` at which the dwell begins (0.42 of the act).
pub const PRESENT_HOLD: f64 = 0.10 / 0.18;
/// Number of heat-impact callouts.
pub const CALLOUTS: usize = 4;

const COOL: Hsl = Hsl::new(210.0, 70.0, 55.0);
const HOT: Hsl = Hsl::new(0.0, 90.0, 45.0);
const STRIPES_DIMMED: f64 = 0.4;
/// Present-day headline: shown through the dwell, gone by the end of `Present`.
const HEADLINE: FadeWindow = FadeWindow {
    start: PRESENT_HOLD,
    end: 1.0,
    fade: 0.2,
};

/// Cross-section state for Act 1.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct Act1State {
    pub intro_opacity: f64,
    /// Content progress of the timeline; saturates early, then holds.
    pub temperature_progress: f64,
    /// Continuous year; round for display only.
    pub current_year: f64,
    pub temperature_anomaly: f64,
    /// Thermometer fill, `anomaly / max anomaly`.
    pub thermometer_fill: f64,
    pub temperature_color: Hsl,
    pub stripes_opacity: f64,
    /// Raw-progress flag: inside the present-day dwell.
    pub in_plateau: bool,
    pub plateau_progress: f64,
    pub glow: f64,
    /// Opacity of the present-day headline over the dwell.
    pub headline_opacity: f64,
    pub callout_opacity: [f64; CALLOUTS],
}

impl Signals for Act1State {
    fn signals(&self) -> Vec<(&'static str, f64)> {
        let mut out = vec![
            ("intro_opacity", self.intro_opacity),
            ("temperature_progress", self.temperature_progress),
            ("current_year", self.current_year),
            ("temperature_anomaly", self.temperature_anomaly),
            ("thermometer_fill", self.thermometer_fill),
            ("temperature_hue", self.temperature_color.h),
            ("stripes_opacity", self.stripes_opacity),
            ("plateau_progress", self.plateau_progress),
            ("glow", self.glow),
            ("headline_opacity", self.headline_opacity),
        ];
        const NAMES: [&str; CALLOUTS] = ["callout_0", "callout_1", "callout_2", "callout_3"];
        out.extend(NAMES.iter().copied().zip(self.callout_opacity));
        out
    }
}

struct Params {
    temperature: Series,
    temperature_hold: Plateau,
    present_hold: Plateau,
}

fn derive(frame: &ProgressFrame<'_, Act1Section>, params: &Params) -> Act1State {
    use Act1Section::*;

    let p = frame.motion_progress().get();
    let intro_opacity = ease_out_cubic((p / INTRO_FADE).min(1.0));

    let temperature_progress = params
        .temperature_hold
        .content(frame.span(&TimeBegins, &TimeBegins));
    let (first_year, last_year) = params.temperature.domain();
    let current_year = f64::lerp(&first_year, &last_year, temperature_progress);
    let temperature_anomaly = params.temperature.lookup(current_year);
    let max = params.temperature.max_y();
    let thermometer_fill = if max > 0.0 {
        (temperature_anomaly / max).clamp(0.0, 1.0)
    } else {
        0.0
    };
    let temperature_color = remap(temperature_anomaly, 0.0, max, &COOL, &HOT);

    let stripes_in = clamped_linear(frame.motion_local(&TimeBegins), 0.3, 0.6);
    let stripes_dim = f64::lerp(&1.0, &STRIPES_DIMMED, frame.motion_local(&Average));
    let stripes_out = 1.0 - frame.motion_local(&Landing);
    let stripes_opacity = stripes_in * stripes_dim * stripes_out;

    let in_plateau =
        frame.is_active(&Present) && params.present_hold.is_dwelling(frame.local(&Present));
    let plateau_progress = params.present_hold.dwell(frame.motion_local(&Present));
    let glow = pulse(plateau_progress, 2.0);
    let headline_opacity = if frame.reduced_motion().is_reduced() {
        if in_plateau { 1.0 } else { 0.0 }
    } else {
        HEADLINE.opacity(frame.local(&Present))
    };

    let impacts = frame.motion_local(&Impacts);
    let callout_opacity = std::array::from_fn(|i| stagger(i, 0.2, impacts));

    Act1State {
        intro_opacity,
        temperature_progress,
        current_year,
        temperature_anomaly,
        thermometer_fill,
        temperature_color,
        stripes_opacity,
        in_plateau,
        plateau_progress,
        glow,
        headline_opacity,
        callout_opacity,
    }
}

/// Validated table over [`SECTIONS`].
pub fn table() -> StoryResult<SegmentTable<Act1Section>> {
    SegmentTable::new(SECTIONS)
}

/// Memoized state derivation over `data`'s temperature series.
///
/// Fails when `data` does not validate: colours scale from zero to a positive series peak.
pub fn resolver(data: &StoryData) -> StoryResult<Resolver<Act1Section, (), Act1State>> {
    data.validate()?;
    let params = Params {
        temperature: data.temperature.clone(),
        temperature_hold: Plateau::new(TEMPERATURE_HOLD)?,
        present_hold: Plateau::new(PRESENT_HOLD)?,
    };
    Ok(Resolver::new(move |frame, _: &()| derive(frame, &params)))
}

fn sections() -> Vec<Box<dyn SectionRenderer<Act1Section, Act1State>>> {
    use Act1Section::*;

    let rise = Vec2::new(0.0, 20.0);
    vec![
        StagedSection::new(Arrival)
            .gain(|s: &Act1State| s.intro_opacity)
            .boxed(),
        StagedSection::new(TimeBegins)
            .enter(Reveal::fade(0.0, 0.1))
            .boxed(),
        StagedSection::new(Present)
            .enter(Reveal::fade(0.0, 0.25).with_offset(rise).with_ease(Ease::OutCubic))
            .boxed(),
        StagedSection::new(Average).boxed(),
        StagedSection::new(Impacts)
            .items(ItemStagger {
                count: CALLOUTS,
                first: 0.0,
                delay: 0.2,
                span: 0.3,
                offset: Vec2::new(0.0, 30.0),
            })
            .boxed(),
        StagedSection::new(Landing).exit_span(0.5).boxed(),
        StagedSection::new(Transition)
            .enter(Reveal::fade(0.0, 0.5))
            .boxed(),
    ]
}

pub type Act1 = ActOrchestrator<Act1Section, (), Act1State>;

/// Assemble the act.
pub fn build(data: &StoryData) -> StoryResult<Act1> {
    ActOrchestrator::new("act1", table()?, resolver(data)?, (), sections())
}

#[cfg(test)]
#[path = "../../tests/unit/story/act1.rs"]
mod tests;
