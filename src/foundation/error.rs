/// Convenience result type used across flamekit.
pub type FlameResult<T> = Result<T, FlameError>;

/// Top-level error taxonomy used by document and model APIs.
#[derive(thiserror::Error, Debug)]
pub enum FlameError {
    /// Unrecognized document structure or a malformed mandatory token.
    #[error("format error: {0}")]
    Format(String),

    /// Structurally valid input that violates a model invariant.
    #[error("validation error: {0}")]
    Validation(String),

    /// A constructor was given an unusable combination of sources.
    #[error("construction error: {0}")]
    Construction(String),

    /// Wrapped lower-level error from IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl FlameError {
    /// Build a [`FlameError::Format`] value.
    pub fn format(msg: impl Into<String>) -> Self {
        Self::Format(msg.into())
    }

    /// Build a [`FlameError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`FlameError::Construction`] value.
    pub fn construction(msg: impl Into<String>) -> Self {
        Self::Construction(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
