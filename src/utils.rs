//! Input and configuration checks shared by the schedulers and the builder.

use crate::error::{LcsError, Result};

/// Reject sequences longer than `max_len`, if a limit is configured.
pub fn check_capacity(len_a: usize, len_b: usize, max_len: Option<usize>) -> Result<()> {
    match max_len {
        Some(max) if len_a > max || len_b > max => Err(LcsError::InputTooLarge { len_a, len_b, max }),
        _ => Ok(()),
    }
}

/// Validate a requested degree of parallelism.
pub fn check_parallelism(workers: usize) -> Result<usize> {
    if workers == 0 {
        Err(LcsError::InvalidParallelism(workers))
    } else {
        Ok(workers)
    }
}
