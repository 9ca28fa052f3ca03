//! Error types for Cartonize.

use thiserror::Error;

/// Result type alias for Cartonize operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur during packing/allocation operations.
#[derive(Debug, Error)]
pub enum Error {
    /// Invalid item provided.
    #[error("Invalid item '{id}': {reason}")]
    InvalidItem {
        /// Identifier of the offending item.
        id: String,
        /// Human-readable description of the problem.
        reason: String,
    },

    /// Invalid container provided.
    #[error("Invalid container '{id}': {reason}")]
    InvalidContainer {
        /// Identifier of the offending container.
        id: String,
        /// Human-readable description of the problem.
        reason: String,
    },

    /// No packable container available in the catalog.
    #[error("No packable container available in the catalog")]
    EmptyCatalog,

    /// A strategy could not place every item.
    #[error("Allocation exhausted: {unplaced} item(s) could not be placed in any container")]
    AllocationExhausted {
        /// Number of items left without a placement.
        unplaced: usize,
    },

    /// A compatibility group could not be packed.
    #[error("Packing failed for compatibility group {group_index} ({group_size} item(s))")]
    GroupPackingFailed {
        /// Zero-based index of the failing group.
        group_index: usize,
        /// Number of items in the failing group.
        group_size: usize,
    },

    /// Serialization error.
    #[cfg(feature = "serde")]
    #[error("Serialization error: {0}")]
    SerializationError(String),
}
