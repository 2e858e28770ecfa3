//! Serial and parallel schedulers over the shared DP table.
//!
//! The serial scheduler fills the whole table with one call to the fill
//! primitive and is the correctness reference. The quadrant scheduler splits
//! the table at `len_a / 2`, `len_b / 2` and runs:
//! 1. quadrant I on the calling task,
//! 2. quadrants II and III as a fork-join pair,
//! 3. quadrant IV after both have joined.
//!
//! II and III write disjoint cells and read only the zero border and cells
//! written by I, so they share `&DpTable` without locking. The join is the
//! only suspension point and also orders every write of II and III before
//! every read of IV.
//!
//! ```
//! use quadrant_lcs::{parallel_lcs, serial_lcs};
//!
//! let a = b"ABCBDAB";
//! let b = b"BDCABA";
//! assert_eq!(serial_lcs(a, b).unwrap(), 4);
//! assert_eq!(parallel_lcs(a, b).unwrap(), 4);
//! ```

use std::time::{Duration, Instant};

use crate::blocks::{Block, QuadrantPlan};
use crate::builder::{LcsConfig, LcsEngineBuilder};
use crate::error::Result;
use crate::fill::fill_block;
use crate::table::DpTable;
use crate::traits::LcsScheduler;
use crate::utils::{check_capacity, check_parallelism};

/// LCS length computed by one full-table fill.
pub fn serial_lcs<T: Eq>(a: &[T], b: &[T]) -> Result<usize> {
    Ok(serial_table(a, b)?.corner() as usize)
}

/// LCS length computed by the four-quadrant fork-join schedule on rayon's
/// global pool.
pub fn parallel_lcs<T: Eq + Sync>(a: &[T], b: &[T]) -> Result<usize> {
    QuadrantScheduler::new(LcsConfig::default())?.lcs_length(a, b)
}

fn serial_table<T: Eq>(a: &[T], b: &[T]) -> Result<DpTable> {
    #[cfg(feature = "tracing")]
    let span = tracing::info_span!("serial_lcs", len_a = a.len(), len_b = b.len());
    #[cfg(feature = "tracing")]
    let _enter = span.enter();

    let table = DpTable::new(a.len(), b.len())?;
    fill_traced(&Block::full(a.len(), b.len()), a, b, &table)?;
    Ok(table)
}

fn fill_traced<T: Eq>(block: &Block, a: &[T], b: &[T], table: &DpTable) -> Result<()> {
    #[cfg(feature = "tracing")]
    let span = tracing::trace_span!(
        "fill_block",
        row_start = block.row_start,
        row_end = block.row_end,
        col_start = block.col_start,
        col_end = block.col_end
    );
    #[cfg(feature = "tracing")]
    let _enter = span.enter();
    fill_block(block, a, b, table)
}

/// Run a quadrant plan: I, then II and III forked, then IV after the join.
///
/// Both forked results are inspected only after the join, so a failing
/// quadrant never leaves its sibling running.
fn run_plan<F>(plan: &QuadrantPlan, fill: F) -> Result<()>
where
    F: Fn(&Block) -> Result<()> + Sync,
{
    fill(&plan.first)?;
    let (second, third) = fork_join(|| fill(&plan.second), || fill(&plan.third));
    second?;
    third?;
    fill(&plan.fourth)
}

#[cfg(feature = "parallel")]
fn fork_join<A, B, RA, RB>(left: A, right: B) -> (RA, RB)
where
    A: FnOnce() -> RA + Send,
    B: FnOnce() -> RB + Send,
    RA: Send,
    RB: Send,
{
    rayon::join(left, right)
}

#[cfg(not(feature = "parallel"))]
fn fork_join<A, B, RA, RB>(left: A, right: B) -> (RA, RB)
where
    A: FnOnce() -> RA,
    B: FnOnce() -> RB,
{
    (left(), right())
}

#[cfg(feature = "parallel")]
fn build_pool(workers: usize) -> Result<rayon::ThreadPool> {
    rayon::ThreadPoolBuilder::new()
        .num_threads(workers)
        .thread_name(|i| format!("lcs-worker-{i}"))
        .build()
        .map_err(|e| crate::error::LcsError::ThreadPool(e.to_string()))
}

/// Smallest block side the recursive tiling will split.
const MIN_SPLITTABLE: usize = 2;

/// Single-pass scheduler; the reference every other scheduler must match.
#[derive(Debug, Clone, Default)]
pub struct SerialScheduler {
    max_len: Option<usize>,
}

impl SerialScheduler {
    pub fn new(max_len: Option<usize>) -> Self {
        Self { max_len }
    }

    /// Fill and return the whole table for `a` and `b`.
    pub fn table<T: Eq>(&self, a: &[T], b: &[T]) -> Result<DpTable> {
        check_capacity(a.len(), b.len(), self.max_len)?;
        serial_table(a, b)
    }
}

impl LcsScheduler for SerialScheduler {
    fn name(&self) -> &'static str {
        "serial"
    }

    fn lcs_length<T: Eq + Sync>(&self, a: &[T], b: &[T]) -> Result<usize> {
        Ok(self.table(a, b)?.corner() as usize)
    }
}

/// Fork-join scheduler filling the table quadrant by quadrant.
///
/// With a configured worker count the scheduler owns a dedicated rayon pool;
/// otherwise it forks onto rayon's global pool. Without the `parallel`
/// feature the same order runs on the calling thread.
#[derive(Debug)]
pub struct QuadrantScheduler {
    config: LcsConfig,
    #[cfg(feature = "parallel")]
    pool: Option<rayon::ThreadPool>,
}

impl QuadrantScheduler {
    pub fn new(config: LcsConfig) -> Result<Self> {
        if let Some(workers) = config.parallelism {
            check_parallelism(workers)?;
        }
        #[cfg(feature = "parallel")]
        let pool = match config.parallelism {
            Some(workers) => Some(build_pool(workers)?),
            None => None,
        };
        Ok(Self {
            config,
            #[cfg(feature = "parallel")]
            pool,
        })
    }

    pub fn config(&self) -> &LcsConfig {
        &self.config
    }

    /// Number of workers the forked quadrants may run on.
    #[cfg(feature = "parallel")]
    pub fn workers(&self) -> usize {
        match &self.pool {
            Some(pool) => pool.current_num_threads(),
            None => rayon::current_num_threads(),
        }
    }

    #[cfg(not(feature = "parallel"))]
    pub fn workers(&self) -> usize {
        1
    }

    /// Fill and return the whole table for `a` and `b`.
    pub fn table<T: Eq + Sync>(&self, a: &[T], b: &[T]) -> Result<DpTable> {
        check_capacity(a.len(), b.len(), self.config.max_len)?;

        #[cfg(feature = "tracing")]
        let span = tracing::info_span!(
            "parallel_lcs",
            len_a = a.len(),
            len_b = b.len(),
            workers = self.workers(),
            depth = self.config.split_depth
        );
        #[cfg(feature = "tracing")]
        let _enter = span.enter();

        let table = DpTable::new(a.len(), b.len())?;
        self.install(|| self.fill_table(a, b, &table))?;
        Ok(table)
    }

    fn fill_table<T: Eq + Sync>(&self, a: &[T], b: &[T], table: &DpTable) -> Result<()> {
        let depth = self.config.split_depth;
        if depth == 0 {
            return fill_traced(&Block::full(a.len(), b.len()), a, b, table);
        }
        let plan = QuadrantPlan::for_lengths(a.len(), b.len());
        run_plan(&plan, |block| self.fill_tiled(block, depth - 1, a, b, table))
    }

    /// Fill `block`, splitting it into quadrants again while `depth` remains
    /// and both sides are at least `min_block`.
    ///
    /// Blocks narrower than 2 on either axis are never split: their fourth
    /// quadrant would be the block itself. Every split therefore shrinks both
    /// sides, which bounds the recursion by `log2` of the longer input no
    /// matter how large `split_depth` is.
    fn fill_tiled<T: Eq + Sync>(
        &self,
        block: &Block,
        depth: usize,
        a: &[T],
        b: &[T],
        table: &DpTable,
    ) -> Result<()> {
        if block.is_empty() {
            return Ok(());
        }
        let min = self.config.min_block.max(MIN_SPLITTABLE);
        if depth == 0 || block.height() < min || block.width() < min {
            return fill_traced(block, a, b, table);
        }
        run_plan(&block.quadrants(), |q| self.fill_tiled(q, depth - 1, a, b, table))
    }

    #[cfg(feature = "parallel")]
    fn install<R, OP>(&self, op: OP) -> R
    where
        OP: FnOnce() -> R + Send,
        R: Send,
    {
        match &self.pool {
            Some(pool) => pool.install(op),
            None => op(),
        }
    }

    #[cfg(not(feature = "parallel"))]
    fn install<R, OP>(&self, op: OP) -> R
    where
        OP: FnOnce() -> R,
    {
        op()
    }
}

impl LcsScheduler for QuadrantScheduler {
    fn name(&self) -> &'static str {
        "quadrant"
    }

    fn lcs_length<T: Eq + Sync>(&self, a: &[T], b: &[T]) -> Result<usize> {
        Ok(self.table(a, b)?.corner() as usize)
    }
}

/// Outcome of running both schedulers on the same input.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LcsComparison {
    pub serial: usize,
    pub parallel: usize,
    pub serial_elapsed: Duration,
    pub parallel_elapsed: Duration,
}

impl LcsComparison {
    /// True if both schedulers produced the same length.
    pub fn agrees(&self) -> bool {
        self.serial == self.parallel
    }

    /// Serial time divided by parallel time, or `None` if the parallel run
    /// was too fast to measure.
    pub fn speedup(&self) -> Option<f64> {
        let parallel = self.parallel_elapsed.as_secs_f64();
        (parallel > 0.0).then(|| self.serial_elapsed.as_secs_f64() / parallel)
    }
}

/// Both schedulers behind one validated configuration.
///
/// ```
/// use quadrant_lcs::LcsEngineBuilder;
///
/// let engine = LcsEngineBuilder::new().with_parallelism(2).build().unwrap();
/// let report = engine.compare(b"AGCAT", b"GAC").unwrap();
/// assert_eq!(report.parallel, 2);
/// assert!(report.agrees());
/// ```
#[derive(Debug)]
pub struct LcsEngine {
    serial: SerialScheduler,
    parallel: QuadrantScheduler,
}

impl LcsEngine {
    /// Engine with the default configuration.
    pub fn new() -> Result<Self> {
        LcsEngineBuilder::new().build()
    }

    pub fn with_config(config: LcsConfig) -> Result<Self> {
        Ok(Self {
            serial: SerialScheduler::new(config.max_len),
            parallel: QuadrantScheduler::new(config)?,
        })
    }

    pub fn config(&self) -> &LcsConfig {
        self.parallel.config()
    }

    pub fn workers(&self) -> usize {
        self.parallel.workers()
    }

    pub fn serial_scheduler(&self) -> &SerialScheduler {
        &self.serial
    }

    pub fn quadrant_scheduler(&self) -> &QuadrantScheduler {
        &self.parallel
    }

    pub fn serial<T: Eq + Sync>(&self, a: &[T], b: &[T]) -> Result<usize> {
        self.serial.lcs_length(a, b)
    }

    pub fn parallel<T: Eq + Sync>(&self, a: &[T], b: &[T]) -> Result<usize> {
        self.parallel.lcs_length(a, b)
    }

    /// Run the serial then the parallel scheduler and time each.
    pub fn compare<T: Eq + Sync>(&self, a: &[T], b: &[T]) -> Result<LcsComparison> {
        let (serial, serial_elapsed) = timed(|| self.serial(a, b))?;
        let (parallel, parallel_elapsed) = timed(|| self.parallel(a, b))?;

        #[cfg(feature = "tracing")]
        tracing::debug!(
            serial,
            parallel,
            serial_us = serial_elapsed.as_micros() as u64,
            parallel_us = parallel_elapsed.as_micros() as u64,
            "compared schedulers"
        );

        Ok(LcsComparison {
            serial,
            parallel,
            serial_elapsed,
            parallel_elapsed,
        })
    }
}

fn timed<R>(f: impl FnOnce() -> Result<R>) -> Result<(R, Duration)> {
    let start = Instant::now();
    let value = f()?;
    Ok((value, start.elapsed()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LcsError;

    const SCENARIOS: &[(&str, &str, usize)] = &[
        ("ABCBDAB", "BDCABA", 4),
        ("AGCAT", "GAC", 2),
        ("", "ANY", 0),
        ("X", "X", 1),
        ("ABC", "DEF", 0),
    ];

    #[test]
    fn serial_known_answers() {
        for &(a, b, expected) in SCENARIOS {
            assert_eq!(serial_lcs(a.as_bytes(), b.as_bytes()).unwrap(), expected, "{a} / {b}");
        }
    }

    #[test]
    fn parallel_known_answers() {
        for &(a, b, expected) in SCENARIOS {
            assert_eq!(parallel_lcs(a.as_bytes(), b.as_bytes()).unwrap(), expected, "{a} / {b}");
        }
    }

    #[test]
    fn quadrant_table_equals_serial_table() {
        let a = b"ACCGGTCGAGTGCGCGGAAGCCGGCCGAA";
        let b = b"GTCGTTCGGAATGCCGTTGCTCTGTAAA";
        let serial = SerialScheduler::default().table(a, b).unwrap();
        for workers in 1..=4 {
            let config = LcsConfig {
                parallelism: Some(workers),
                ..LcsConfig::default()
            };
            let quadrant = QuadrantScheduler::new(config).unwrap().table(a, b).unwrap();
            assert_eq!(quadrant.to_rows(), serial.to_rows(), "workers={workers}");
        }
        assert_eq!(serial.corner(), 20);
    }

    #[test]
    fn recursive_tiling_matches_serial() {
        let a: Vec<u8> = (0..97u32).map(|i| b"ACGT"[(i * 7 % 11 % 4) as usize]).collect();
        let b: Vec<u8> = (0..83u32).map(|i| b"ACGT"[(i * 5 % 13 % 4) as usize]).collect();
        let expected = serial_lcs(&a, &b).unwrap();
        for depth in 0..=4 {
            let engine = LcsEngineBuilder::new()
                .with_parallelism(3)
                .with_split_depth(depth)
                .with_min_block(4)
                .build()
                .unwrap();
            assert_eq!(engine.parallel(&a, &b).unwrap(), expected, "depth={depth}");
        }
    }

    #[test]
    fn deep_split_of_unit_blocks_terminates() {
        let engine = LcsEngineBuilder::new()
            .with_parallelism(2)
            .with_min_block(1)
            .with_split_depth(1_000_000)
            .build()
            .unwrap();
        assert_eq!(engine.parallel(b"A", b"A").unwrap(), 1);
        assert_eq!(engine.parallel(b"ABCBDAB", b"BDCABA").unwrap(), 4);

        let a: Vec<u8> = (0..300u32).map(|i| b"ACGT"[(i * 3 % 7 % 4) as usize]).collect();
        let b: Vec<u8> = (0..257u32).map(|i| b"ACGT"[(i * 5 % 9 % 4) as usize]).collect();
        assert_eq!(engine.parallel(&a, &b).unwrap(), serial_lcs(&a, &b).unwrap());
    }

    #[test]
    fn zero_min_block_does_not_fan_out_empty_blocks() {
        let config = LcsConfig {
            parallelism: Some(1),
            min_block: 0,
            split_depth: 64,
            ..LcsConfig::default()
        };
        let scheduler = QuadrantScheduler::new(config).unwrap();
        let start = Instant::now();
        assert_eq!(scheduler.lcs_length(b"AB", b"AB").unwrap(), 2);
        assert_eq!(scheduler.lcs_length(b"", b"ABC").unwrap(), 0);
        assert_eq!(scheduler.lcs_length(b"AGCAT", b"GAC").unwrap(), 2);
        assert!(start.elapsed() < Duration::from_secs(5));
    }

    #[test]
    fn capacity_is_checked_before_any_work() {
        let engine = LcsEngineBuilder::new().with_max_len(3).build().unwrap();
        assert_eq!(engine.serial(b"ABC", b"ABC").unwrap(), 3);
        let err = engine.parallel(b"ABCD", b"A").unwrap_err();
        assert!(err.is_invalid_input());
        let err = engine.serial(b"A", b"ABCD").unwrap_err();
        assert!(matches!(err, LcsError::InputTooLarge { max: 3, .. }));
    }

    #[test]
    fn zero_workers_is_rejected_by_scheduler() {
        let config = LcsConfig {
            parallelism: Some(0),
            ..LcsConfig::default()
        };
        assert!(matches!(
            QuadrantScheduler::new(config),
            Err(LcsError::InvalidParallelism(0))
        ));
    }

    #[cfg(feature = "parallel")]
    #[test]
    fn dedicated_pool_has_requested_size() {
        let engine = LcsEngineBuilder::new().with_parallelism(3).build().unwrap();
        assert_eq!(engine.workers(), 3);
    }

    #[test]
    fn compare_reports_agreement() {
        let engine = LcsEngine::new().unwrap();
        let report = engine.compare(b"ABCBDAB", b"BDCABA").unwrap();
        assert_eq!(report.serial, 4);
        assert!(report.agrees());
        if let Some(s) = report.speedup() {
            assert!(s > 0.0);
        }
    }

    #[test]
    fn speedup_handles_zero_duration() {
        let report = LcsComparison {
            serial: 1,
            parallel: 1,
            serial_elapsed: Duration::from_millis(10),
            parallel_elapsed: Duration::ZERO,
        };
        assert_eq!(report.speedup(), None);
        let report = LcsComparison {
            parallel_elapsed: Duration::from_millis(5),
            ..report
        };
        assert_eq!(report.speedup(), Some(2.0));
    }

    #[test]
    fn schedulers_accept_non_byte_elements() {
        let a: Vec<char> = "héllo wörld".chars().collect();
        let b: Vec<char> = "wörld héllo".chars().collect();
        assert_eq!(serial_lcs(&a, &b).unwrap(), parallel_lcs(&a, &b).unwrap());
        let x = [10u64, 20, 30, 40];
        let y = [20u64, 40];
        assert_eq!(parallel_lcs(&x, &y).unwrap(), 2);
    }
}
