//! Error types for the grain-state store.

use thiserror::Error;

/// Result type alias for store operations.
pub type StateResult<T> = Result<T, StateError>;

/// Errors that can occur during grain-state persistence.
#[derive(Debug, Error)]
pub enum StateError {
    /// Required options were missing or malformed at init.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// The encoded payload needs more segments than the naming scheme
    /// can address.
    #[error("payload needs {required} segments, naming scheme caps at {max}")]
    Capacity {
        /// Segments the payload would need.
        required: usize,
        /// Hard limit of the naming scheme.
        max: usize,
    },

    /// State could not be encoded for storage.
    #[error("serialization error: {0}")]
    Serialize(String),

    /// Stored bytes could not be decoded back into state.
    #[error("deserialization error: {0}")]
    Deserialize(String),

    /// The underlying store call failed.
    #[error("storage error: {0}")]
    Storage(String),

    /// A conditional write or delete lost a concurrency check.
    #[error("concurrency conflict: {0}")]
    Conflict(String),

    /// No row exists at the given coordinates.
    ///
    /// Reads treat an absent row as empty state; deletes surface it as
    /// this error. That asymmetry is deliberate and part of the contract.
    #[error("row not found: {partition_key}/{row_key}")]
    NotFound {
        /// Partition key of the missing row.
        partition_key: String,
        /// Row key of the missing row.
        row_key: String,
    },
}
