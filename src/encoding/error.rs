//! Encoder error types.

use thiserror::Error;

/// Errors raised by the encoder registry and by encoders.
#[derive(Debug, Error)]
pub enum EncoderError {
    /// A named encoder was requested that has no configuration.
    #[error("encoder '{name}' is not configured")]
    UnknownEncoder { name: String },

    #[error("document depth {depth} exceeds the configured limit of {limit}")]
    DepthExceeded { depth: usize, limit: usize },

    #[error("resource of type '{type_id}' must serialize to a JSON object")]
    NotAnObject { type_id: String },

    #[error("resource of type '{type_id}' has no usable '{field}' identifier")]
    MissingId { type_id: String, field: String },

    #[error("serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
}
