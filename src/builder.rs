//! Configuration for [`LcsEngine`](crate::engine::LcsEngine).

use crate::engine::LcsEngine;
use crate::error::Result;
use crate::utils::check_parallelism;

/// Default recursion depth of the quadrant split: one level, four quadrants.
pub const DEFAULT_SPLIT_DEPTH: usize = 1;

/// Blocks smaller than this on either axis are not split further when
/// recursing below the top level.
pub const DEFAULT_MIN_BLOCK: usize = 64;

/// Settings shared by both schedulers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LcsConfig {
    /// Worker count for the parallel scheduler. `None` runs on rayon's
    /// global pool.
    pub parallelism: Option<usize>,
    /// Maximum accepted sequence length. `None` means no cap.
    pub max_len: Option<usize>,
    /// How many times the quadrant split is applied recursively.
    pub split_depth: usize,
    /// Smallest block side that is still split below the top level.
    pub min_block: usize,
}

impl Default for LcsConfig {
    fn default() -> Self {
        Self {
            parallelism: None,
            max_len: None,
            split_depth: DEFAULT_SPLIT_DEPTH,
            min_block: DEFAULT_MIN_BLOCK,
        }
    }
}

pub struct LcsEngineBuilder {
    config: LcsConfig,
}

impl LcsEngineBuilder {
    pub fn new() -> Self {
        Self {
            config: LcsConfig::default(),
        }
    }

    pub fn with_parallelism(mut self, workers: usize) -> Self {
        self.config.parallelism = Some(workers);
        self
    }

    pub fn with_max_len(mut self, max_len: usize) -> Self {
        self.config.max_len = Some(max_len);
        self
    }

    pub fn with_split_depth(mut self, depth: usize) -> Self {
        self.config.split_depth = depth;
        self
    }

    pub fn with_min_block(mut self, min_block: usize) -> Self {
        self.config.min_block = min_block.max(1);
        self
    }

    pub fn config(&self) -> &LcsConfig {
        &self.config
    }

    /// Validate the configuration and create the engine (and its worker
    /// pool, when a worker count was given).
    pub fn build(self) -> Result<LcsEngine> {
        if let Some(workers) = self.config.parallelism {
            check_parallelism(workers)?;
        }
        LcsEngine::with_config(self.config)
    }
}

impl Default for LcsEngineBuilder {
    fn default() -> Self {
        Self::new()
    }
}
