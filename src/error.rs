//! Error types for the similarity index

use thiserror::Error;

/// Failures reported by the store and the index.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IndexError {
    /// A vector's length differs from the configured dimension
    #[error("Dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    /// Parallel vector and identifier inputs disagree in length
    #[error("Length mismatch: {vectors} vectors for {identifiers} identifiers")]
    LengthMismatch { vectors: usize, identifiers: usize },
}

pub type Result<T> = std::result::Result<T, IndexError>;
