//! Service Layer Error Types
//!
//! Error types for graph-engine operations. The engine is deliberately
//! forgiving: malformed notes default, unknown pointer targets are logged
//! no-ops. Errors are reserved for failures the host must see, such as
//! share-configuration serialization.

use thiserror::Error;

/// Graph engine operation errors
#[derive(Error, Debug)]
pub enum GraphEngineError {
    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    /// A share configuration could not be decoded
    #[error("Invalid share configuration: {context}")]
    InvalidShareConfig { context: String },
}

impl GraphEngineError {
    /// Create an invalid share configuration error
    pub fn invalid_share_config(context: impl Into<String>) -> Self {
        Self::InvalidShareConfig {
            context: context.into(),
        }
    }
}
