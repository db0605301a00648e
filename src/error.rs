//! Error types for the TSP solvers.
//!
//! Core solver failures ([`TspError`]) are kept apart from failures of reading
//! instances from disk ([`LoadError`]): the former signal a malformed caller
//! input, the latter an I/O or format problem.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for solver operations.
pub type TspResult<T> = Result<T, TspError>;

/// Errors raised by the algorithmic core.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TspError {
    /// The matrix has no vertices.
    #[error("distance matrix is empty")]
    EmptyMatrix,

    /// A row or a tour does not have the expected length.
    #[error("dimension mismatch: expected {expected} entries, found {found}")]
    DimensionMismatch {
        /// Expected length.
        expected: usize,
        /// Actual length.
        found: usize,
    },

    /// A vertex index lies outside `[0, size)`.
    #[error("vertex index {index} out of range for {size} vertices")]
    InvalidIndex {
        /// Offending index.
        index: usize,
        /// Number of vertices.
        size: usize,
    },

    /// Row count differs from column count.
    #[error("matrix is not square: {rows} rows, {columns} columns")]
    NonSquareMatrix {
        /// Number of rows.
        rows: usize,
        /// Number of columns.
        columns: usize,
    },
}

/// Errors raised while loading an instance from an external representation.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The instance file does not exist.
    #[error("file not found: {}", .0.display())]
    FileNotFound(PathBuf),

    /// The content could not be interpreted as a distance matrix.
    #[error("malformed input at line {line}: {message}")]
    MalformedInput {
        /// 1-based line number (0 when the problem concerns the whole input).
        line: usize,
        /// Description of the problem.
        message: String,
    },

    /// The rows parsed but do not form a valid matrix.
    #[error("invalid matrix shape: {0}")]
    Shape(#[from] TspError),

    /// Any other read failure.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl LoadError {
    pub(crate) fn malformed(line: usize, message: impl Into<String>) -> Self {
        LoadError::MalformedInput {
            line,
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = TspError::InvalidIndex { index: 7, size: 3 };
        assert_eq!(err.to_string(), "vertex index 7 out of range for 3 vertices");

        let err = LoadError::malformed(2, "bad token 'x'");
        assert_eq!(err.to_string(), "malformed input at line 2: bad token 'x'");
    }

    #[test]
    fn test_shape_error_converts() {
        let err: LoadError = TspError::NonSquareMatrix { rows: 2, columns: 3 }.into();
        assert!(matches!(err, LoadError::Shape(TspError::NonSquareMatrix { .. })));
    }
}
