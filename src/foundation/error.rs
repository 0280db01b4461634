/// Convenience result type used across scrubline.
pub type ScrublineResult<T> = Result<T, ScrublineError>;

/// Top-level error taxonomy for construction-time failures.
///
/// Frame-time faults (degenerate regions, broken motion paths, missing targets) never surface
/// here; they degrade locally to a fully revealed state.
#[derive(thiserror::Error, Debug)]
pub enum ScrublineError {
    /// Invalid stage, timeline, or section data.
    #[error("validation error: {0}")]
    Validation(String),

    /// Region geometry that cannot be turned into a scroll boundary.
    #[error("geometry error: {0}")]
    Geometry(String),

    /// Motion path data that cannot be parsed or measured.
    #[error("path error: {0}")]
    Path(String),

    /// Invalid engine or scene configuration.
    #[error("config error: {0}")]
    Config(String),

    /// Errors when serializing or deserializing scene files.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ScrublineError {
    /// Build a [`ScrublineError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`ScrublineError::Geometry`] value.
    pub fn geometry(msg: impl Into<String>) -> Self {
        Self::Geometry(msg.into())
    }

    /// Build a [`ScrublineError::Path`] value.
    pub fn path(msg: impl Into<String>) -> Self {
        Self::Path(msg.into())
    }

    /// Build a [`ScrublineError::Config`] value.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Build a [`ScrublineError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
