/// Convenience result type used across cardsmith.
pub type CardResult<T> = Result<T, CardError>;

/// Top-level error taxonomy for card generation.
///
/// Every variant is fatal to the request that raised it: the compositor never substitutes a
/// placeholder and never retries.
#[derive(thiserror::Error, Debug)]
pub enum CardError {
    /// A template asset (background, gradient, logo) or font file is missing or corrupt.
    #[error("asset load error: {0}")]
    AssetLoad(String),

    /// The user-supplied photo could not be decoded.
    #[error("image decode error: {0}")]
    ImageDecode(String),

    /// Producing or persisting the output raster failed.
    #[error("encode error: {0}")]
    Encode(String),

    /// Invalid configuration or request data.
    #[error("validation error: {0}")]
    Validation(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl CardError {
    /// Build a [`CardError::AssetLoad`] value.
    pub fn asset_load(msg: impl Into<String>) -> Self {
        Self::AssetLoad(msg.into())
    }

    /// Build a [`CardError::ImageDecode`] value.
    pub fn image_decode(msg: impl Into<String>) -> Self {
        Self::ImageDecode(msg.into())
    }

    /// Build a [`CardError::Encode`] value.
    pub fn encode(msg: impl Into<String>) -> Self {
        Self::Encode(msg.into())
    }

    /// Build a [`CardError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Wrap an `anyhow` chain as [`CardError::AssetLoad`], keeping the full context in the message.
    pub(crate) fn asset_load_from(err: anyhow::Error) -> Self {
        Self::AssetLoad(format!("{err:#}"))
    }

    /// Wrap an `anyhow` chain as [`CardError::ImageDecode`].
    pub(crate) fn image_decode_from(err: anyhow::Error) -> Self {
        Self::ImageDecode(format!("{err:#}"))
    }

    /// Wrap an `anyhow` chain as [`CardError::Encode`].
    pub(crate) fn encode_from(err: anyhow::Error) -> Self {
        Self::Encode(format!("{err:#}"))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
