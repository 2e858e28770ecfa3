//! Error taxonomy for LCS computations.
//!
//! Two families exist:
//! - *invalid input*, detected before the table is touched and reported to
//!   the caller as a rejected computation;
//! - *precondition violations*, raised by the fill primitive when a scheduler
//!   asks for a block outside the table. These indicate a scheduler bug and
//!   abort the computation in progress.

use thiserror::Error;

/// Errors produced while configuring or running an LCS computation.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum LcsError {
    /// A sequence is longer than the configured capacity, or the table
    /// would not fit in the address space.
    #[error("input too large: lengths {len_a} x {len_b} exceed limit {max}")]
    InputTooLarge {
        len_a: usize,
        len_b: usize,
        max: usize,
    },

    /// Requested degree of parallelism was zero.
    #[error("parallelism must be at least 1, got {0}")]
    InvalidParallelism(usize),

    /// The worker pool could not be created.
    #[error("failed to build worker pool: {0}")]
    ThreadPool(String),

    /// A fill was issued outside the table, or against a table whose shape
    /// does not match the input sequences.
    #[error(
        "fill precondition violated: rows [{row_start}, {row_end}] x cols [{col_start}, {col_end}] \
         on a {table_rows}x{table_cols} table"
    )]
    PreconditionViolation {
        row_start: usize,
        row_end: usize,
        col_start: usize,
        col_end: usize,
        table_rows: usize,
        table_cols: usize,
    },
}

impl LcsError {
    /// True for errors caused by the caller's inputs or configuration.
    pub fn is_invalid_input(&self) -> bool {
        matches!(
            self,
            LcsError::InputTooLarge { .. } | LcsError::InvalidParallelism(_)
        )
    }
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, LcsError>;
