//! Error types for rotation math
//!
//! The numerical routines never fail: degenerate input produces NaN or a
//! meaningless rotation. Only indexing, slice import and weighted blending
//! report errors.

use thiserror::Error;

/// Transform errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransformError {
    /// Matrix row index past the last row
    #[error("Row index out of range: {row}")]
    RowOutOfRange { row: usize },

    /// Matrix column index past the last column
    #[error("Column index out of range: {column}")]
    ColumnOutOfRange { column: usize },

    /// Flat scalar slice has the wrong length
    #[error("Expected {expected} scalars, found {found}")]
    LengthMismatch { expected: usize, found: usize },

    /// Blending needs at least one quaternion
    #[error("Cannot blend an empty set of rotations")]
    EmptyInput,

    /// One weight is required per quaternion
    #[error("Got {weights} weights for {quaternions} quaternions")]
    WeightCountMismatch { quaternions: usize, weights: usize },
}

/// Result type for transform operations
pub type Result<T> = std::result::Result<T, TransformError>;
