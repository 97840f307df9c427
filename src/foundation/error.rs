/// Convenience result type used across atomreel.
pub type ReelResult<T> = Result<T, ReelError>;

/// Top-level error taxonomy.
///
/// Every variant is terminal: the pipeline never retries a failed stage.
#[derive(thiserror::Error, Debug)]
pub enum ReelError {
    /// Invalid configuration or caller-provided values.
    #[error("validation error: {0}")]
    Validation(String),

    /// Missing, unreadable or undecodable background audio.
    #[error("audio error: {0}")]
    Audio(String),

    /// Errors raised while turning a scene into pixels.
    #[error("render error: {0}")]
    Render(String),

    /// External encoder failures (missing executable, non-zero exit, broken pipe).
    #[error("encode error: {0}")]
    Encode(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ReelError {
    /// Build a [`ReelError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`ReelError::Audio`] value.
    pub fn audio(msg: impl Into<String>) -> Self {
        Self::Audio(msg.into())
    }

    /// Build a [`ReelError::Render`] value.
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Build a [`ReelError::Encode`] value.
    pub fn encode(msg: impl Into<String>) -> Self {
        Self::Encode(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
