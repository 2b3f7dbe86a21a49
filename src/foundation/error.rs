/// Convenience result type used across sealgen.
pub type SealResult<T> = Result<T, SealError>;

/// Top-level error taxonomy used by the rendering APIs.
#[derive(thiserror::Error, Debug)]
pub enum SealError {
    /// Invalid user-provided configuration.
    #[error("validation error: {0}")]
    Validation(String),

    /// Font bytes could not be read or parsed.
    #[error("font error: {0}")]
    Font(String),

    /// Surface or pixel buffer inconsistencies while rendering.
    #[error("render error: {0}")]
    Render(String),

    /// Errors while encoding the final raster.
    #[error("encode error: {0}")]
    Encode(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl SealError {
    /// Build a [`SealError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`SealError::Font`] value.
    pub fn font(msg: impl Into<String>) -> Self {
        Self::Font(msg.into())
    }

    /// Build a [`SealError::Render`] value.
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Build a [`SealError::Encode`] value.
    pub fn encode(msg: impl Into<String>) -> Self {
        Self::Encode(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
