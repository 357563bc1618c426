/// Convenience result type used across leatherband.
pub type BandResult<T> = Result<T, BandError>;

/// Top-level error taxonomy used by engine APIs.
///
/// Only [`BandError::MissingBackground`] aborts a render. Badge-level failures are
/// absorbed by the composer and surfaced as [`crate::BandWarning`] values.
#[derive(thiserror::Error, Debug)]
pub enum BandError {
    /// The background is unset, absent, or undecodable.
    #[error("missing background: {0}")]
    MissingBackground(String),

    /// A badge or row member image is absent or undecodable.
    #[error("missing badge source: {0}")]
    MissingBadgeSource(String),

    /// Invalid user-provided or raster data.
    #[error("validation error: {0}")]
    Validation(String),

    /// Font registration or glyph rasterization failed.
    #[error("text error: {0}")]
    Text(String),

    /// Errors when serializing or deserializing presets.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl BandError {
    /// Build a [`BandError::MissingBackground`] value.
    pub fn missing_background(msg: impl Into<String>) -> Self {
        Self::MissingBackground(msg.into())
    }

    /// Build a [`BandError::MissingBadgeSource`] value.
    pub fn missing_badge_source(msg: impl Into<String>) -> Self {
        Self::MissingBadgeSource(msg.into())
    }

    /// Build a [`BandError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`BandError::Text`] value.
    pub fn text(msg: impl Into<String>) -> Self {
        Self::Text(msg.into())
    }

    /// Build a [`BandError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
