/// Result alias used across the crate.
pub type StoryResult<T> = Result<T, StoryError>;

/// Construction-time and load-time failures.
///
/// Per-frame evaluation never produces these: out-of-range numbers are clamped instead.
#[derive(thiserror::Error, Debug)]
pub enum StoryError {
    /// Malformed static configuration (segment tables, series, focus ranges).
    #[error("config error: {0}")]
    Config(String),

    /// Loaded content failed validation.
    #[error("validation error: {0}")]
    Validation(String),

    /// JSON could not be parsed.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Anything else, with its source preserved.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl StoryError {
    /// Build a [`StoryError::Config`].
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Build a [`StoryError::Validation`].
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`StoryError::Serde`].
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

impl From<serde_json::Error> for StoryError {
    fn from(e: serde_json::Error) -> Self {
        Self::serde(e.to_string())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
