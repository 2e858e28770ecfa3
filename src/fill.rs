//! The table fill primitive.
//!
//! [`fill_block`] evaluates the LCS recurrence over one rectangular block in
//! row-major order (`i` outer, `j` inner, both ascending). Inside the block
//! that order guarantees `(i-1, j-1)`, `(i-1, j)` and `(i, j-1)` are final
//! before `(i, j)` is written. Cells just above and just left of the block
//! must already be final when the call starts; arranging that is the
//! scheduler's job.

use crate::blocks::Block;
use crate::error::{LcsError, Result};
use crate::table::DpTable;

/// Fill every cell of `block` using sequences `a` (rows) and `b` (columns).
///
/// An empty block is a no-op. A non-empty block that touches the zero border
/// or extends past the table, or a table not sized for `a` and `b`, is
/// rejected with [`LcsError::PreconditionViolation`] before anything is
/// written.
pub fn fill_block<T: Eq>(block: &Block, a: &[T], b: &[T], table: &DpTable) -> Result<()> {
    if block.is_empty() {
        return Ok(());
    }
    check_bounds(block, a.len(), b.len(), table)?;

    for i in block.row_start..=block.row_end {
        let ai = &a[i - 1];
        for j in block.col_start..=block.col_end {
            let value = if *ai == b[j - 1] {
                table.get(i - 1, j - 1) + 1
            } else {
                table.get(i - 1, j).max(table.get(i, j - 1))
            };
            table.set(i, j, value);
        }
    }
    Ok(())
}

fn check_bounds(block: &Block, len_a: usize, len_b: usize, table: &DpTable) -> Result<()> {
    let in_bounds = block.row_start >= 1
        && block.col_start >= 1
        && block.row_end <= len_a
        && block.col_end <= len_b
        && table.fits(len_a, len_b);
    if in_bounds {
        Ok(())
    } else {
        Err(LcsError::PreconditionViolation {
            row_start: block.row_start,
            row_end: block.row_end,
            col_start: block.col_start,
            col_end: block.col_end,
            table_rows: table.rows(),
            table_cols: table.cols(),
        })
    }
}
