//! Longest Common Subsequence length with a parallel quadrant schedule.
//!
//! This crate fills the classic LCS dynamic-programming table in two ways:
//! - [`serial_lcs`]: one row-major pass over the whole table;
//! - [`parallel_lcs`]: four quadrants split at the midpoints of both
//!   sequences, with the two off-diagonal quadrants filled concurrently.
//!
//! ## Why the quadrants may run in parallel
//! Cell `(i, j)` depends on `(i-1, j-1)`, `(i-1, j)` and `(i, j-1)`. After
//! the top-left quadrant (I) is final, the bottom-left (II) and top-right
//! (III) quadrants each depend only on I and on the zero border, and they
//! write disjoint cells. The bottom-right quadrant (IV) waits for both.
//! That fork-join order is the whole correctness argument; the table itself
//! takes no locks.
//!
//! ## Quick start
//! ```
//! use quadrant_lcs::{parallel_lcs, serial_lcs};
//!
//! let a = "AGCAT".as_bytes();
//! let b = "GAC".as_bytes();
//! assert_eq!(serial_lcs(a, b).unwrap(), 2);
//! assert_eq!(parallel_lcs(a, b).unwrap(), 2);
//! ```
//!
//! Use [`LcsEngineBuilder`] to pin the worker count, cap input lengths or
//! apply the quadrant split recursively.
//!
//! ## Features
//! - `parallel` (default): fork the middle quadrants with `rayon`.
//! - `tracing`: emit spans for every computation and block fill.

pub mod blocks;
pub mod builder;
pub mod engine;
pub mod error;
pub mod fill;
pub mod table;
pub mod traits;
pub mod utils;

pub use crate::builder::{LcsConfig, LcsEngineBuilder};
pub use crate::engine::{
    parallel_lcs, serial_lcs, LcsComparison, LcsEngine, QuadrantScheduler, SerialScheduler,
};
pub use crate::error::{LcsError, Result};
pub use crate::traits::LcsScheduler;
