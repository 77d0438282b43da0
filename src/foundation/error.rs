/// Convenience result type used across maskblend.
pub type MaskblendResult<T> = Result<T, MaskblendError>;

/// Top-level error taxonomy used by compositing APIs.
///
/// Numeric edge cases inside the pipeline never produce errors; they are clamped.
/// Errors only surface at the boundary: malformed buffers, unusable configuration and IO.
#[derive(thiserror::Error, Debug)]
pub enum MaskblendError {
    /// Input images or buffers violate a precondition (e.g. mismatched dimensions).
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Configuration values that cannot be clamped into a usable state.
    #[error("validation error: {0}")]
    Validation(String),

    /// Errors when serializing or deserializing parameter documents.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl MaskblendError {
    /// Build a [`MaskblendError::InvalidInput`] value.
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Build a [`MaskblendError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`MaskblendError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

impl From<serde_json::Error> for MaskblendError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serde(err.to_string())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
