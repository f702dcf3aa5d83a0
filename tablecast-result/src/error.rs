use std::fmt;

use thiserror::Error;

/// Unified error type for all tablecast operations.
///
/// Every failure mode across the stack is represented here, from selection
/// validation in the mapping core to Arrow assembly in the gather layer.
/// Each variant carries a message describing what went wrong and, where it
/// helps diagnosis, the offending column or dimension.
///
/// # Error Handling Strategy
///
/// Errors propagate upward through the call stack using Rust's `?` operator.
/// Mapping construction performs all validation up front, so a mapping either
/// constructs fully or returns one of these variants; iteration over a
/// constructed mapping cannot fail.
///
/// # Thread Safety
///
/// `Error` implements `Send` and `Sync`, allowing errors to be passed between
/// threads when mappings are built on worker pools.
#[derive(Error, Debug)]
pub enum Error {
    /// Invalid user input or API parameter.
    ///
    /// Raised when a selection id exceeds a dimension bound, when a selection
    /// names more dimensions than the column has, or when a slicer is
    /// malformed. These errors are recoverable: fix the selection and retry.
    #[error("Invalid argument: {0}")]
    InvalidArgumentError(String),

    /// The column data uses a feature the mapping core does not support.
    ///
    /// Raised when a row in scope is undefined in the store, or when a
    /// declared-variable column stores cells whose number of dimensions
    /// varies row by row.
    #[error("Not implemented: {0}")]
    NotImplemented(String),

    /// A single dimension size was requested where none exists.
    ///
    /// Raised when a varying dimension has no selection and no uniform
    /// per-row size, so no scalar extent can be reported for it.
    #[error("Index error: {0}")]
    IndexError(String),

    /// Range planning produced a degenerate result.
    ///
    /// This indicates a zero-dimension column reached the planner; the
    /// mapping core always exposes at least the row dimension.
    #[error("Execution error: {0}")]
    ExecutionError(String),

    /// Arrow library error during array assembly.
    ///
    /// Surfaces failures from building Arrow arrays out of gathered cell
    /// data, typically offset/child length mismatches.
    #[error("Arrow error: {0}")]
    Arrow(#[from] arrow::error::ArrowError),

    /// Internal error indicating a bug or unexpected state.
    ///
    /// This should never occur during normal operation. The message includes
    /// the violated invariant.
    #[error("An internal operation failed: {0}")]
    Internal(String),
}

impl Error {
    /// Create an [`Error::InvalidArgumentError`] from any displayable value.
    #[inline]
    pub fn invalid_arg<E: fmt::Display>(err: E) -> Self {
        Error::InvalidArgumentError(err.to_string())
    }

    /// Create an [`Error::Internal`] from any displayable value.
    #[inline]
    pub fn internal<E: fmt::Display>(err: E) -> Self {
        Error::Internal(err.to_string())
    }
}
