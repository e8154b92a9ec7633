/// Convenience result type used across Retrospect.
pub type RetrospectResult<T> = Result<T, RetrospectError>;

/// Top-level error taxonomy.
///
/// The backdrop renderer and the visibility observer never surface errors for degenerate input;
/// these variants belong to raster setup, configuration and the waitlist flow.
#[derive(thiserror::Error, Debug)]
pub enum RetrospectError {
    /// Malformed user-provided data (email syntax, selectors, config values).
    #[error("validation error: {0}")]
    Validation(String),

    /// The email address is already on the waitlist.
    #[error("duplicate error: {0}")]
    Duplicate(String),

    /// A submission request could not be delivered or answered.
    #[error("transport error: {0}")]
    Transport(String),

    /// Raster surface setup failures.
    #[error("render error: {0}")]
    Render(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl RetrospectError {
    /// Build a [`RetrospectError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`RetrospectError::Duplicate`] value.
    pub fn duplicate(msg: impl Into<String>) -> Self {
        Self::Duplicate(msg.into())
    }

    /// Build a [`RetrospectError::Transport`] value.
    pub fn transport(msg: impl Into<String>) -> Self {
        Self::Transport(msg.into())
    }

    /// Build a [`RetrospectError::Render`] value.
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Build a [`RetrospectError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
