//! Act 2: where emissions come from, with a World/Brazil comparison that persists once chosen.

use crate::act::orchestrator::ActOrchestrator;
use crate::act::section::{ItemStagger, SectionRenderer, StagedSection};
use crate::animation::curve::Reveal;
use crate::animation::ease::{ease_in_out_cubic, ease_out_cubic};
use crate::engine::frame::ProgressFrame;
use crate::engine::resolver::Resolver;
use crate::engine::signals::Signals;
use crate::foundation::core::Vec2;
use crate::foundation::error::StoryResult;
use crate::segment::focus::FocusRanges;
use crate::segment::table::SegmentTable;
use crate::story::bounds;
use crate::story::data::{Emissions, Shares, Source, StoryData};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Act2Section {
    Entry,
    Activities,
    Emissions,
    Atmosphere,
    Global,
    Toggle,
    Deforestation,
    Agriculture,
    Systemic,
    BrazilMatters,
    Transition,
}

pub const SECTIONS: [(Act2Section, f64, f64); 11] = [
    (Act2Section::Entry, 0.0, 0.06),
    (Act2Section::Activities, 0.06, 0.14),
    (Act2Section::Emissions, 0.14, 0.24),
    (Act2Section::Atmosphere, 0.24, 0.32),
    (Act2Section::Global, 0.32, 0.42),
    (Act2Section::Toggle, 0.42, 0.56),
    (Act2Section::Deforestation, 0.56, 0.64),
    (Act2Section::Agriculture, 0.64, 0.72),
    (Act2Section::Systemic, 0.72, 0.80),
    (Act2Section::BrazilMatters, 0.80, 0.90),
    (Act2Section::Transition, 0.90, 1.0),
];

/// Region shown by the comparison toggle. Set by the user, never derived from progress.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Region {
    #[default]
    World,
    Brazil,
}

impl Region {
    pub fn other(self) -> Self {
        match self {
            Self::World => Self::Brazil,
            Self::Brazil => Self::World,
        }
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct Act2State {
    /// Flow diagram presence, entry through emissions.
    pub flow_visibility: f64,
    pub activities_opacity: f64,
    pub atmosphere_thickness: f64,
    /// Kicks in once the atmosphere is more than half built.
    pub heat_shimmer: f64,
    pub background_darkness: f64,
    /// Emission source singled out by the deforestation/agriculture sections.
    pub focused_source: Option<Source>,
    pub past_toggle: bool,
    /// The user's selection.
    pub region: Region,
    /// Region the flow diagram shows; always the world before the toggle section.
    pub shown_region: Region,
    pub shares: Shares,
}

impl Act2State {
    /// Percentage share of `source` in the region being shown.
    pub fn share_of(&self, source: Source) -> f64 {
        self.shares.get(source)
    }
}

impl Signals for Act2State {
    fn signals(&self) -> Vec<(&'static str, f64)> {
        vec![
            ("flow_visibility", self.flow_visibility),
            ("activities_opacity", self.activities_opacity),
            ("atmosphere_thickness", self.atmosphere_thickness),
            ("heat_shimmer", self.heat_shimmer),
            ("background_darkness", self.background_darkness),
        ]
    }
}

struct Params {
    emissions: Emissions,
    focus: FocusRanges<Source>,
    toggle: (f64, f64),
}

fn derive(frame: &ProgressFrame<'_, Act2Section>, params: &Params, region: Region) -> Act2State {
    use Act2Section::*;

    let flow_visibility = ease_out_cubic(frame.span(&Entry, &Emissions));
    let activities_opacity = ease_out_cubic(frame.span(&Activities, &Activities));
    let atmosphere_thickness = ease_in_out_cubic(frame.span(&Atmosphere, &Atmosphere));
    let heat_shimmer = if atmosphere_thickness > 0.5 {
        (atmosphere_thickness - 0.5) * 2.0
    } else {
        0.0
    };
    let background_darkness = (atmosphere_thickness * 0.15).min(0.15);

    let p = frame.progress().get();
    let (toggle_start, toggle_end) = params.toggle;
    let shown_region = if p >= toggle_start {
        region
    } else {
        Region::World
    };
    let shares = match shown_region {
        Region::World => params.emissions.world,
        Region::Brazil => params.emissions.brazil,
    };

    Act2State {
        flow_visibility,
        activities_opacity,
        atmosphere_thickness,
        heat_shimmer,
        background_darkness,
        focused_source: params.focus.select(frame.progress()),
        past_toggle: p >= toggle_end,
        region,
        shown_region,
        shares,
    }
}

/// Validated table over [`SECTIONS`].
pub fn table() -> StoryResult<SegmentTable<Act2Section>> {
    SegmentTable::new(SECTIONS)
}

/// Memoized state derivation for this act.
pub fn resolver(
    table: &SegmentTable<Act2Section>,
    data: &StoryData,
) -> StoryResult<Resolver<Act2Section, Region, Act2State>> {
    use Act2Section::*;

    let (d0, d1) = bounds(table, &Deforestation)?;
    let (a0, a1) = bounds(table, &Agriculture)?;
    let params = Params {
        emissions: data.emissions,
        focus: FocusRanges::new(vec![
            (d0, d1, Source::Deforestation),
            (a0, a1, Source::Agriculture),
        ])?,
        toggle: bounds(table, &Toggle)?,
    };
    Ok(Resolver::new(move |frame, region: &Region| {
        derive(frame, &params, *region)
    }))
}

fn sections() -> Vec<Box<dyn SectionRenderer<Act2Section, Act2State>>> {
    use Act2Section::*;

    let rise = Vec2::new(0.0, 24.0);
    vec![
        StagedSection::new(Entry).enter(Reveal::fade(0.0, 0.3)).boxed(),
        StagedSection::new(Activities)
            .items(ItemStagger {
                count: 4,
                first: 0.1,
                delay: 0.15,
                span: 0.25,
                offset: rise,
            })
            .boxed(),
        StagedSection::new(Emissions)
            .gain(|s: &Act2State| s.flow_visibility)
            .boxed(),
        StagedSection::new(Atmosphere).boxed(),
        StagedSection::new(Global)
            .items(ItemStagger {
                count: Source::ALL.len(),
                first: 0.0,
                delay: 0.1,
                span: 0.3,
                offset: Vec2::new(-24.0, 0.0),
            })
            .boxed(),
        StagedSection::new(Toggle).boxed(),
        StagedSection::new(Deforestation)
            .enter(Reveal::fade(0.0, 0.2).with_offset(rise))
            .boxed(),
        StagedSection::new(Agriculture)
            .enter(Reveal::fade(0.0, 0.2).with_offset(rise))
            .boxed(),
        StagedSection::new(Systemic).boxed(),
        StagedSection::new(BrazilMatters).boxed(),
        StagedSection::new(Transition)
            .enter(Reveal::fade(0.0, 0.5))
            .boxed(),
    ]
}

pub type Act2 = ActOrchestrator<Act2Section, Region, Act2State>;

/// Assemble the act.
pub fn build(data: &StoryData) -> StoryResult<Act2> {
    let table = table()?;
    let resolver = resolver(&table, data)?;
    ActOrchestrator::new("act2", table, resolver, Region::default(), sections())
}

/// User picked a region in the comparison toggle.
pub fn select_region(act: &mut Act2, region: Region) {
    if *act.carry() != region {
        act.interact(|r| *r = region);
        tracing::debug!(?region, "region selected");
    }
}

#[cfg(test)]
#[path = "../../tests/unit/story/act2.rs"]
mod tests;
