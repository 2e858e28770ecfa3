//! The scheduler seam.
//!
//! Both schedulers expose the same entry point so callers can swap one for
//! the other when comparing or benchmarking. A scheduler decides *which*
//! blocks of the table are filled and in what order; the recurrence itself
//! lives in [`crate::fill`].

use crate::error::Result;

/// Strategy for driving the fill primitive over a whole DP table.
///
/// Implementations must:
/// - reject invalid input before allocating or touching a table;
/// - allocate one exactly-sized table per call and never share it with
///   another computation;
/// - only fill a block once every cell it reads outside itself is final;
/// - return `table[len_a][len_b]` after the last fill has completed.
///
/// Every implementation must return the same length for the same inputs.
pub trait LcsScheduler {
    /// Short name used in logs and reports.
    fn name(&self) -> &'static str;

    /// Length of the longest common subsequence of `a` and `b`.
    fn lcs_length<T: Eq + Sync>(&self, a: &[T], b: &[T]) -> Result<usize>;
}
