/// Convenience result type used across pixmix.
pub type PixmixResult<T> = Result<T, PixmixError>;

/// Top-level error taxonomy used by compositor APIs.
#[derive(thiserror::Error, Debug)]
pub enum PixmixError {
    /// A construction parameter is unusable (for example a NaN lerp weight).
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// A persisted shader record could not be reconstructed.
    #[error("malformed data: {0}")]
    MalformedData(String),

    /// A shader refused to append its stages in the current pipeline configuration.
    #[error("stage append error: {0}")]
    StageAppend(String),

    /// Invalid user-provided options or scene data.
    #[error("validation error: {0}")]
    Validation(String),

    /// Errors when serializing or deserializing JSON documents.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl PixmixError {
    /// Build a [`PixmixError::InvalidParameter`] value.
    pub fn invalid_parameter(msg: impl Into<String>) -> Self {
        Self::InvalidParameter(msg.into())
    }

    /// Build a [`PixmixError::MalformedData`] value.
    pub fn malformed(msg: impl Into<String>) -> Self {
        Self::MalformedData(msg.into())
    }

    /// Build a [`PixmixError::StageAppend`] value.
    pub fn stage_append(msg: impl Into<String>) -> Self {
        Self::StageAppend(msg.into())
    }

    /// Build a [`PixmixError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`PixmixError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }

    /// Same kind and message; a wrapped `anyhow` error keeps its rendered chain.
    pub(crate) fn duplicate(&self) -> Self {
        match self {
            Self::InvalidParameter(m) => Self::InvalidParameter(m.clone()),
            Self::MalformedData(m) => Self::MalformedData(m.clone()),
            Self::StageAppend(m) => Self::StageAppend(m.clone()),
            Self::Validation(m) => Self::Validation(m.clone()),
            Self::Serde(m) => Self::Serde(m.clone()),
            Self::Other(e) => Self::Other(anyhow::anyhow!("{e:#}")),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
