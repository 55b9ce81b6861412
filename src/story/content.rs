use std::collections::BTreeMap;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::foundation::error::{StoryError, StoryResult};
use crate::story::act1::Act1Section;
use crate::story::act2::{Act2Section, Region};
use crate::story::act3::{Act3Section, Solution};
use crate::story::data::Source;

/// Every piece of copy the acts display. Closed: a catalog must define all of them.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum ContentKey {
    Act1Title,
    Act1PresentHeadline,
    Act1AverageNote,
    Act1LandingLine,
    Act2Title,
    Act2ToggleWorld,
    Act2ToggleBrazil,
    Act2SourceEnergy,
    Act2SourceTransport,
    Act2SourceIndustry,
    Act2SourceAgriculture,
    Act2SourceDeforestation,
    Act3Title,
    Act3ToolkitHint,
    Act3SolutionForests,
    Act3SolutionIndigenous,
    Act3SolutionCleanEnergy,
    Act3SolutionEfficiency,
    Act3SolutionTransport,
    Act3SolutionAgriculture,
}

impl ContentKey {
    pub const ALL: [Self; 20] = [
        Self::Act1Title,
        Self::Act1PresentHeadline,
        Self::Act1AverageNote,
        Self::Act1LandingLine,
        Self::Act2Title,
        Self::Act2ToggleWorld,
        Self::Act2ToggleBrazil,
        Self::Act2SourceEnergy,
        Self::Act2SourceTransport,
        Self::Act2SourceIndustry,
        Self::Act2SourceAgriculture,
        Self::Act2SourceDeforestation,
        Self::Act3Title,
        Self::Act3ToolkitHint,
        Self::Act3SolutionForests,
        Self::Act3SolutionIndigenous,
        Self::Act3SolutionCleanEnergy,
        Self::Act3SolutionEfficiency,
        Self::Act3SolutionTransport,
        Self::Act3SolutionAgriculture,
    ];
}

impl From<Source> for ContentKey {
    fn from(s: Source) -> Self {
        match s {
            Source::Energy => Self::Act2SourceEnergy,
            Source::Transport => Self::Act2SourceTransport,
            Source::Industry => Self::Act2SourceIndustry,
            Source::Agriculture => Self::Act2SourceAgriculture,
            Source::Deforestation => Self::Act2SourceDeforestation,
        }
    }
}

impl From<Solution> for ContentKey {
    fn from(s: Solution) -> Self {
        match s {
            Solution::Forests => Self::Act3SolutionForests,
            Solution::Indigenous => Self::Act3SolutionIndigenous,
            Solution::CleanEnergy => Self::Act3SolutionCleanEnergy,
            Solution::Efficiency => Self::Act3SolutionEfficiency,
            Solution::Transport => Self::Act3SolutionTransport,
            Solution::Agriculture => Self::Act3SolutionAgriculture,
        }
    }
}

impl From<Region> for ContentKey {
    fn from(r: Region) -> Self {
        match r {
            Region::World => Self::Act2ToggleWorld,
            Region::Brazil => Self::Act2ToggleBrazil,
        }
    }
}

/// Copy a section displays while it is mounted.
pub trait Captions {
    fn captions(&self) -> &'static [ContentKey];
}

impl Captions for Act1Section {
    fn captions(&self) -> &'static [ContentKey] {
        match self {
            Self::Arrival => &[ContentKey::Act1Title],
            Self::Present => &[ContentKey::Act1PresentHeadline],
            Self::Average => &[ContentKey::Act1AverageNote],
            Self::Landing => &[ContentKey::Act1LandingLine],
            Self::TimeBegins | Self::Impacts | Self::Transition => &[],
        }
    }
}

impl Captions for Act2Section {
    fn captions(&self) -> &'static [ContentKey] {
        match self {
            Self::Entry => &[ContentKey::Act2Title],
            Self::Emissions => &[
                ContentKey::Act2SourceEnergy,
                ContentKey::Act2SourceTransport,
                ContentKey::Act2SourceIndustry,
                ContentKey::Act2SourceAgriculture,
                ContentKey::Act2SourceDeforestation,
            ],
            Self::Toggle => &[ContentKey::Act2ToggleWorld, ContentKey::Act2ToggleBrazil],
            Self::Deforestation => &[ContentKey::Act2SourceDeforestation],
            Self::Agriculture => &[ContentKey::Act2SourceAgriculture],
            _ => &[],
        }
    }
}

impl Captions for Act3Section {
    fn captions(&self) -> &'static [ContentKey] {
        match self {
            Self::Entry => &[ContentKey::Act3Title],
            Self::Toolkit => &[ContentKey::Act3ToolkitHint],
            Self::Forests => &[ContentKey::Act3SolutionForests],
            Self::Indigenous => &[ContentKey::Act3SolutionIndigenous],
            Self::CleanEnergy => &[ContentKey::Act3SolutionCleanEnergy],
            Self::Efficiency => &[ContentKey::Act3SolutionEfficiency],
            Self::Transport => &[ContentKey::Act3SolutionTransport],
            Self::Agriculture => &[ContentKey::Act3SolutionAgriculture],
            _ => &[],
        }
    }
}

/// Typed copy for one language, validated once at load time.
///
/// Lookups cannot fail: a catalog that exists has a non-empty string for every [`ContentKey`].
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
pub struct ContentCatalog {
    entries: BTreeMap<ContentKey, String>,
}

impl ContentCatalog {
    /// Validate a key → text map.
    pub fn new(entries: BTreeMap<ContentKey, String>) -> StoryResult<Self> {
        let missing: Vec<_> = ContentKey::ALL
            .into_iter()
            .filter(|k| !entries.contains_key(k))
            .collect();
        if !missing.is_empty() {
            return Err(StoryError::validation(format!(
                "content catalog is missing {missing:?}"
            )));
        }
        if let Some((k, _)) = entries.iter().find(|(_, v)| v.trim().is_empty()) {
            return Err(StoryError::validation(format!(
                "content for {k:?} is empty"
            )));
        }
        Ok(Self { entries })
    }

    /// Parse and validate a JSON object of `key: text`.
    pub fn from_reader<R: std::io::Read>(r: R) -> StoryResult<Self> {
        let entries: BTreeMap<ContentKey, String> = serde_json::from_reader(r)
            .map_err(|e| StoryError::serde(format!("parse content catalog JSON: {e}")))?;
        Self::new(entries)
    }

    /// Load and validate a JSON file.
    #[tracing::instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn from_path(path: impl AsRef<Path>) -> StoryResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            StoryError::config(format!("open content catalog '{}': {e}", path.display()))
        })?;
        let catalog = Self::from_reader(BufReader::new(f))?;
        tracing::debug!(entries = catalog.entries.len(), "content catalog loaded");
        Ok(catalog)
    }

    /// Text for `key`.
    pub fn get(&self, key: impl Into<ContentKey>) -> &str {
        self.entries
            .get(&key.into())
            .map(String::as_str)
            .unwrap_or_default()
    }

    /// Copy for every section in `sections`, keyed and deduplicated.
    pub fn captions<'a, S: Captions + 'a>(
        &self,
        sections: impl IntoIterator<Item = &'a S>,
    ) -> BTreeMap<ContentKey, &str> {
        sections
            .into_iter()
            .flat_map(|s| s.captions().iter().copied())
            .map(|k| (k, self.get(k)))
            .collect()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/story/content.rs"]
mod tests;
