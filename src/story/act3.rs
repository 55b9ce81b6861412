//! Act 3: the solutions toolkit. Tiles switch on as their sections are reached and stay on.

use std::collections::BTreeSet;

use crate::act::orchestrator::ActOrchestrator;
use crate::act::section::{ItemStagger, SectionRenderer, StagedSection};
use crate::animation::curve::Reveal;
use crate::animation::ease::ease_out_cubic;
use crate::engine::frame::ProgressFrame;
use crate::engine::resolver::{Carry, Resolver};
use crate::engine::signals::Signals;
use crate::foundation::core::{Progress, Vec2};
use crate::foundation::error::StoryResult;
use crate::segment::focus::FocusRanges;
use crate::segment::table::SegmentTable;
use crate::story::bounds;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Act3Section {
    Entry,
    Scale,
    Toolkit,
    Forests,
    Indigenous,
    Systems,
    CleanEnergy,
    Efficiency,
    Transport,
    Agriculture,
    Pattern,
    BrazilCentral,
    Transition,
}

pub const SECTIONS: [(Act3Section, f64, f64); 13] = [
    (Act3Section::Entry, 0.0, 0.06),
    (Act3Section::Scale, 0.06, 0.12),
    (Act3Section::Toolkit, 0.12, 0.20),
    (Act3Section::Forests, 0.20, 0.28),
    (Act3Section::Indigenous, 0.28, 0.38),
    (Act3Section::Systems, 0.38, 0.44),
    (Act3Section::CleanEnergy, 0.44, 0.50),
    (Act3Section::Efficiency, 0.50, 0.56),
    (Act3Section::Transport, 0.56, 0.62),
    (Act3Section::Agriculture, 0.62, 0.76),
    (Act3Section::Pattern, 0.76, 0.82),
    (Act3Section::BrazilCentral, 0.82, 0.90),
    (Act3Section::Transition, 0.90, 1.0),
];

/// One tile of the solutions toolkit.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Solution {
    Forests,
    Indigenous,
    CleanEnergy,
    Efficiency,
    Transport,
    Agriculture,
}

impl Solution {
    pub const ALL: [Self; 6] = [
        Self::Forests,
        Self::Indigenous,
        Self::CleanEnergy,
        Self::Efficiency,
        Self::Transport,
        Self::Agriculture,
    ];

    /// Section that introduces this solution.
    pub fn section(self) -> Act3Section {
        match self {
            Self::Forests => Act3Section::Forests,
            Self::Indigenous => Act3Section::Indigenous,
            Self::CleanEnergy => Act3Section::CleanEnergy,
            Self::Efficiency => Act3Section::Efficiency,
            Self::Transport => Act3Section::Transport,
            Self::Agriculture => Act3Section::Agriculture,
        }
    }
}

/// Toolkit tile state carried across sections.
///
/// `revealed` remembers which tiles were already switched on by scrolling, so a tile the user
/// turned off is not switched back on when its section is crossed again.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize)]
pub struct Toolkit {
    active: BTreeSet<Solution>,
    revealed: BTreeSet<Solution>,
}

impl Toolkit {
    pub fn is_active(&self, s: Solution) -> bool {
        self.active.contains(&s)
    }

    pub fn is_revealed(&self, s: Solution) -> bool {
        self.revealed.contains(&s)
    }

    /// Active tiles in display order.
    pub fn active(&self) -> impl Iterator<Item = Solution> + '_ {
        self.active.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.active.len()
    }

    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }

    /// Flip a tile. Returns the new state.
    pub fn toggle(&mut self, s: Solution) -> bool {
        if !self.active.remove(&s) {
            self.active.insert(s);
            return true;
        }
        false
    }

    fn reveal(&mut self, s: Solution) {
        if self.revealed.insert(s) {
            self.active.insert(s);
        }
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct Act3State {
    /// Progress from the toolkit section to the end of the last solution.
    pub solution_progress: f64,
    pub hope_intensity: f64,
    pub green_tint: f64,
    /// Share of tiles switched on, `0` to `1`.
    pub cumulative_impact: f64,
    pub focused_solution: Option<Solution>,
    pub active_tiles: Vec<Solution>,
}

impl Signals for Act3State {
    fn signals(&self) -> Vec<(&'static str, f64)> {
        vec![
            ("solution_progress", self.solution_progress),
            ("hope_intensity", self.hope_intensity),
            ("green_tint", self.green_tint),
        ]
    }
}

fn derive(
    frame: &ProgressFrame<'_, Act3Section>,
    focus: &FocusRanges<Solution>,
    toolkit: &Toolkit,
) -> Act3State {
    let solution_progress = frame.span(&Act3Section::Toolkit, &Act3Section::Agriculture);
    Act3State {
        solution_progress,
        hope_intensity: ease_out_cubic(solution_progress),
        green_tint: (solution_progress * 0.1).min(0.1),
        cumulative_impact: toolkit.len() as f64 / Solution::ALL.len() as f64,
        focused_solution: focus.select(frame.progress()),
        active_tiles: toolkit.active().collect(),
    }
}

/// Validated table over [`SECTIONS`].
pub fn table() -> StoryResult<SegmentTable<Act3Section>> {
    SegmentTable::new(SECTIONS)
}

/// Memoized state derivation for this act.
pub fn resolver(
    table: &SegmentTable<Act3Section>,
) -> StoryResult<Resolver<Act3Section, Toolkit, Act3State>> {
    let mut ranges = Vec::with_capacity(Solution::ALL.len());
    for s in Solution::ALL {
        let (start, mut end) = bounds(table, &s.section())?;
        // Indigenous stewardship stays highlighted through the systems section.
        if s == Solution::Indigenous {
            end = bounds(table, &Act3Section::Systems)?.1;
        }
        ranges.push((start, end, s));
    }
    let focus = FocusRanges::new(ranges)?;
    Ok(Resolver::new(move |frame, toolkit: &Toolkit| {
        derive(frame, &focus, toolkit)
    }))
}

/// Edge-triggered tile activation: a tile switches on the first time progress moves forward
/// across its section start.
fn reveal_hook(
    table: &SegmentTable<Act3Section>,
) -> StoryResult<impl FnMut(&mut Carry<Toolkit>, &ProgressFrame<'_, Act3Section>, Option<Progress>) + 'static>
{
    let starts = Solution::ALL
        .into_iter()
        .map(|s| Ok((s, bounds(table, &s.section())?.0)))
        .collect::<StoryResult<Vec<_>>>()?;

    Ok(
        move |carry: &mut Carry<Toolkit>,
              frame: &ProgressFrame<'_, Act3Section>,
              prev: Option<Progress>| {
            let now = frame.progress().get();
            let from = prev.map_or(f64::NEG_INFINITY, Progress::get);
            let crossed: Vec<Solution> = starts
                .iter()
                .filter(|(s, start)| {
                    from < *start && *start <= now && !carry.get().is_revealed(*s)
                })
                .map(|(s, _)| *s)
                .collect();
            if crossed.is_empty() {
                return;
            }
            tracing::debug!(?crossed, progress = now, "toolkit tiles revealed");
            carry.update(|t| crossed.into_iter().for_each(|s| t.reveal(s)));
        },
    )
}

fn sections() -> Vec<Box<dyn SectionRenderer<Act3Section, Act3State>>> {
    use Act3Section::{
        Agriculture, BrazilCentral, CleanEnergy, Efficiency, Entry, Forests, Indigenous, Pattern,
        Scale, Systems, Transition, Transport,
    };

    let rise = Vec2::new(0.0, 20.0);
    let solution = |id: Act3Section| {
        StagedSection::new(id)
            .enter(Reveal::fade(0.0, 0.25).with_offset(rise))
            .boxed()
    };
    vec![
        StagedSection::new(Entry).enter(Reveal::fade(0.0, 0.3)).boxed(),
        StagedSection::new(Scale).boxed(),
        StagedSection::new(Act3Section::Toolkit)
            .items(ItemStagger {
                count: Solution::ALL.len(),
                first: 0.2,
                delay: 0.1,
                span: 0.15,
                offset: rise,
            })
            .boxed(),
        solution(Forests),
        solution(Indigenous),
        StagedSection::new(Systems).boxed(),
        solution(CleanEnergy),
        solution(Efficiency),
        solution(Transport),
        solution(Agriculture),
        StagedSection::new(Pattern)
            .gain(|s: &Act3State| s.hope_intensity)
            .boxed(),
        StagedSection::new(BrazilCentral).boxed(),
        StagedSection::new(Transition)
            .enter(Reveal::fade(0.0, 0.5))
            .boxed(),
    ]
}

pub type Act3 = ActOrchestrator<Act3Section, Toolkit, Act3State>;

/// Assemble the act.
pub fn build() -> StoryResult<Act3> {
    let table = table()?;
    let resolver = resolver(&table)?;
    let hook = reveal_hook(&table)?;
    Ok(
        ActOrchestrator::new("act3", table, resolver, Toolkit::default(), sections())?
            .with_carry_hook(hook),
    )
}

/// User clicked a tile. Returns whether it is now active.
pub fn toggle_tile(act: &mut Act3, s: Solution) -> bool {
    act.interact(|t| t.toggle(s))
}

#[cfg(test)]
#[path = "../../tests/unit/story/act3.rs"]
mod tests;
