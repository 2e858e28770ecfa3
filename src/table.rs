//! The shared DP table.
//!
//! A single [`DpTable`] is allocated per computation with exactly
//! `(len_a + 1) * (len_b + 1)` cells, stored row-major. Cells start at zero,
//! which doubles as the empty-prefix border (row 0 and column 0) and as the
//! value of every cell no fill has reached yet.
//!
//! Cells are atomics so that quadrant fills running on different threads can
//! share the table through `&DpTable`. All accesses use `Relaxed` ordering:
//! concurrent fills write disjoint cells, and every cross-task read is
//! ordered by the fork-join that separates the writer from the reader.

use std::sync::atomic::{AtomicU32, Ordering};

use crate::error::{LcsError, Result};

/// Row-major table of LCS lengths indexed `[0..=len_a][0..=len_b]`.
#[derive(Debug)]
pub struct DpTable {
    rows: usize,
    cols: usize,
    cells: Vec<AtomicU32>,
}

impl DpTable {
    /// Allocate a zeroed table for sequences of lengths `len_a` and `len_b`.
    ///
    /// Fails with [`LcsError::InputTooLarge`] if the cell count overflows
    /// `usize` or a length does not fit the `u32` cell type.
    pub fn new(len_a: usize, len_b: usize) -> Result<Self> {
        let too_large = || LcsError::InputTooLarge {
            len_a,
            len_b,
            max: u32::MAX as usize,
        };
        if len_a.min(len_b) >= u32::MAX as usize {
            return Err(too_large());
        }
        let rows = len_a.checked_add(1).ok_or_else(too_large)?;
        let cols = len_b.checked_add(1).ok_or_else(too_large)?;
        let len = rows.checked_mul(cols).ok_or_else(too_large)?;

        let mut cells = Vec::with_capacity(len);
        cells.resize_with(len, || AtomicU32::new(0));
        Ok(Self { rows, cols, cells })
    }

    /// Number of rows, `len_a + 1`.
    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns, `len_b + 1`.
    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// True if the table was sized for sequences of these lengths.
    #[inline]
    pub fn fits(&self, len_a: usize, len_b: usize) -> bool {
        self.rows == len_a + 1 && self.cols == len_b + 1
    }

    #[inline]
    fn index(&self, i: usize, j: usize) -> usize {
        debug_assert!(i < self.rows && j < self.cols, "({i},{j}) out of bounds");
        i * self.cols + j
    }

    /// Read cell `(i, j)`.
    ///
    /// # Panics
    /// Panics if `(i, j)` lies outside the table.
    #[inline]
    pub fn get(&self, i: usize, j: usize) -> u32 {
        self.cells[self.index(i, j)].load(Ordering::Relaxed)
    }

    /// Write cell `(i, j)`.
    ///
    /// # Panics
    /// Panics if `(i, j)` lies outside the table.
    #[inline]
    pub fn set(&self, i: usize, j: usize, value: u32) {
        self.cells[self.index(i, j)].store(value, Ordering::Relaxed);
    }

    /// The value at `[len_a][len_b]`, i.e. the LCS length once the table is full.
    #[inline]
    pub fn corner(&self) -> u32 {
        self.get(self.rows - 1, self.cols - 1)
    }

    /// Zero every cell so the allocation can serve another computation of
    /// the same shape.
    pub fn reset(&mut self) {
        for cell in &mut self.cells {
            *cell.get_mut() = 0;
        }
    }

    /// Snapshot of the table as nested rows.
    pub fn to_rows(&self) -> Vec<Vec<u32>> {
        (0..self.rows)
            .map(|i| (0..self.cols).map(|j| self.get(i, j)).collect())
            .collect()
    }
}
