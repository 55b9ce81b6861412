use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::animation::series::{KeyPoint, Series};
use crate::foundation::error::{StoryError, StoryResult};

/// Global temperature anomaly (°C above the early-20th-century baseline), by year.
pub const TEMPERATURE_ANOMALY: [KeyPoint; 9] = [
    KeyPoint::new(1900.0, 0.0),
    KeyPoint::new(1920.0, 0.1),
    KeyPoint::new(1940.0, 0.15),
    KeyPoint::new(1960.0, 0.2),
    KeyPoint::new(1980.0, 0.4),
    KeyPoint::new(2000.0, 0.8),
    KeyPoint::new(2010.0, 1.1),
    KeyPoint::new(2020.0, 1.4),
    KeyPoint::new(2024.0, 1.6),
];

/// Emission source categories shown in the flow diagram.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Source {
    Energy,
    Transport,
    Industry,
    Agriculture,
    Deforestation,
}

impl Source {
    /// Every source, in display order.
    pub const ALL: [Self; 5] = [
        Self::Energy,
        Self::Transport,
        Self::Industry,
        Self::Agriculture,
        Self::Deforestation,
    ];
}

/// Percentage share of each source; the five values sum to 100.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Shares {
    pub energy: f64,
    pub transport: f64,
    pub industry: f64,
    pub agriculture: f64,
    pub deforestation: f64,
}

impl Shares {
    /// Global breakdown (WRI/IPCC sectors).
    pub const WORLD: Self = Self {
        energy: 31.0,
        transport: 16.0,
        industry: 21.0,
        agriculture: 14.0,
        deforestation: 18.0,
    };

    /// Brazil (SEEG); land use dominates.
    pub const BRAZIL: Self = Self {
        energy: 18.0,
        transport: 4.0,
        industry: 5.0,
        agriculture: 27.0,
        deforestation: 46.0,
    };

    pub fn get(&self, source: Source) -> f64 {
        match source {
            Source::Energy => self.energy,
            Source::Transport => self.transport,
            Source::Industry => self.industry,
            Source::Agriculture => self.agriculture,
            Source::Deforestation => self.deforestation,
        }
    }

    fn validate(&self, label: &str) -> StoryResult<()> {
        let mut total = 0.0;
        for s in Source::ALL {
            let v = self.get(s);
            if !v.is_finite() || v < 0.0 {
                return Err(StoryError::validation(format!(
                    "{label}: share for {s:?} must be a non-negative number, got {v}"
                )));
            }
            total += v;
        }
        if (total - 100.0).abs() > 0.5 {
            return Err(StoryError::validation(format!(
                "{label}: shares must sum to 100, got {total}"
            )));
        }
        Ok(())
    }
}

/// Emission breakdowns for both regions of the comparison toggle.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Emissions {
    pub world: Shares,
    pub brazil: Shares,
}

impl Default for Emissions {
    fn default() -> Self {
        Self {
            world: Shares::WORLD,
            brazil: Shares::BRAZIL,
        }
    }
}

/// Static data tables consumed by the acts.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StoryData {
    /// Year → anomaly.
    #[serde(default = "default_temperature")]
    pub temperature: Series,
    /// Emission shares by region.
    #[serde(default)]
    pub emissions: Emissions,
}

fn default_temperature() -> Series {
    Series::from_sorted(TEMPERATURE_ANOMALY.to_vec())
}

impl Default for StoryData {
    fn default() -> Self {
        Self {
            temperature: default_temperature(),
            emissions: Emissions::default(),
        }
    }
}

impl StoryData {
    /// Parse and validate JSON. Missing fields fall back to the built-in tables.
    pub fn from_reader<R: std::io::Read>(r: R) -> StoryResult<Self> {
        let data: Self = serde_json::from_reader(r)
            .map_err(|e| StoryError::serde(format!("parse story data JSON: {e}")))?;
        data.validate()?;
        Ok(data)
    }

    /// Load and validate a JSON file.
    #[tracing::instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn from_path(path: impl AsRef<Path>) -> StoryResult<Self> {
        let path = path.as_ref();
        let f = File::open(path)
            .map_err(|e| StoryError::config(format!("open story data '{}': {e}", path.display())))?;
        let data = Self::from_reader(BufReader::new(f))?;
        tracing::debug!(points = data.temperature.points().len(), "story data loaded");
        Ok(data)
    }

    /// Checks that serde alone cannot express.
    pub fn validate(&self) -> StoryResult<()> {
        let (lo, hi) = self.temperature.domain();
        if hi <= lo {
            return Err(StoryError::validation(
                "temperature series must span more than one year",
            ));
        }
        let peak = self.temperature.max_y();
        if peak <= 0.0 {
            return Err(StoryError::validation(format!(
                "temperature series must reach a positive anomaly (peak {peak})"
            )));
        }
        self.emissions.world.validate("emissions.world")?;
        self.emissions.brazil.validate("emissions.brazil")?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/story/data.rs"]
mod tests;
