//! Error types for SnapLens

/// Result type alias using SnapLens's Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for SnapLens operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Model artifact could not be fetched or loaded. Fatal to the session:
    /// no prediction can proceed until the model is available.
    #[error("model unavailable: {0}")]
    ModelUnavailable(String),

    /// Caller-side contract violation (e.g. mismatched label/probability lengths)
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Supplied image bytes could not be decoded
    #[error("unreadable image: {0}")]
    DecodeFailure(String),

    /// Configuration errors
    #[error("configuration error: {0}")]
    Config(String),

    /// Network/IO errors
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic internal errors
    #[error("internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Create a new model-unavailable error
    pub fn model_unavailable(msg: impl Into<String>) -> Self {
        Self::ModelUnavailable(msg.into())
    }

    /// Create a new invalid-input error
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Create a new decode-failure error
    pub fn decode_failure(msg: impl Into<String>) -> Self {
        Self::DecodeFailure(msg.into())
    }

    /// Create a new configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a new internal error
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }
}
