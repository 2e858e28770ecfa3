//! Rectangular blocks of the DP table and the quadrant split.
//!
//! A [`Block`] is an inclusive row range times an inclusive column range.
//! Ranges whose start exceeds their end are empty, which is how degenerate
//! quadrants of short sequences are represented.

/// Inclusive rectangle `[row_start, row_end] x [col_start, col_end]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Block {
    pub row_start: usize,
    pub row_end: usize,
    pub col_start: usize,
    pub col_end: usize,
}

impl Block {
    pub fn new(row_start: usize, row_end: usize, col_start: usize, col_end: usize) -> Self {
        Self {
            row_start,
            row_end,
            col_start,
            col_end,
        }
    }

    /// The whole interior `[1, len_a] x [1, len_b]` of a table.
    pub fn full(len_a: usize, len_b: usize) -> Self {
        Self::new(1, len_a, 1, len_b)
    }

    /// Number of rows covered.
    #[inline]
    pub fn height(&self) -> usize {
        (self.row_end + 1).saturating_sub(self.row_start)
    }

    /// Number of columns covered.
    #[inline]
    pub fn width(&self) -> usize {
        (self.col_end + 1).saturating_sub(self.col_start)
    }

    /// Number of cells covered.
    #[inline]
    pub fn len(&self) -> usize {
        self.height() * self.width()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.height() == 0 || self.width() == 0
    }

    #[inline]
    pub fn contains(&self, i: usize, j: usize) -> bool {
        (self.row_start..=self.row_end).contains(&i) && (self.col_start..=self.col_end).contains(&j)
    }

    /// Split this block into four quadrants around its midpoints.
    ///
    /// With `mi = row_start + height/2` and `mj = col_start + width/2`:
    /// - I   = rows `[row_start, mi-1]`, cols `[col_start, mj-1]`
    /// - II  = rows `[mi, row_end]`,     cols `[col_start, mj-1]`
    /// - III = rows `[row_start, mi-1]`, cols `[mj, col_end]`
    /// - IV  = rows `[mi, row_end]`,     cols `[mj, col_end]`
    ///
    /// For the full table (`row_start = col_start = 1`) this places the split
    /// one past `len/2`; [`QuadrantPlan::for_lengths`] uses `len/2` itself.
    ///
    /// A 1x1 block comes back unchanged as its own IV, so callers splitting
    /// recursively must stop before a side drops below 2.
    pub fn quadrants(&self) -> QuadrantPlan {
        let mi = self.row_start + self.height() / 2;
        let mj = self.col_start + self.width() / 2;
        QuadrantPlan::split(self, mi, mj)
    }
}

/// The four quadrants of a block, in dependency order.
///
/// I has no dependency inside the block. II reads I's bottom row, III reads
/// I's rightmost column, and the two write disjoint cells, so they may run
/// concurrently. IV reads the boundary shared with both II and III.
/// Together the quadrants partition the parent block exactly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuadrantPlan {
    pub first: Block,
    pub second: Block,
    pub third: Block,
    pub fourth: Block,
}

impl QuadrantPlan {
    /// Split the full table for sequences of lengths `len_a` and `len_b`
    /// at `mi = len_a / 2`, `mj = len_b / 2`.
    ///
    /// When a midpoint is 0 the quadrants on its near side are empty and the
    /// far side starts at row (or column) 1, so the border is never written.
    pub fn for_lengths(len_a: usize, len_b: usize) -> Self {
        let full = Block::full(len_a, len_b);
        let mi = (len_a / 2).max(1);
        let mj = (len_b / 2).max(1);
        Self::split(&full, mi, mj)
    }

    /// Split `parent` so that the lower/right halves start at `mi`/`mj`.
    /// `mi` must lie in `[row_start, row_end + 1]`, likewise `mj`.
    fn split(parent: &Block, mi: usize, mj: usize) -> Self {
        debug_assert!(mi >= parent.row_start && mi <= parent.row_end + 1);
        debug_assert!(mj >= parent.col_start && mj <= parent.col_end + 1);
        Self {
            first: Block::new(parent.row_start, mi - 1, parent.col_start, mj - 1),
            second: Block::new(mi, parent.row_end, parent.col_start, mj - 1),
            third: Block::new(parent.row_start, mi - 1, mj, parent.col_end),
            fourth: Block::new(mi, parent.row_end, mj, parent.col_end),
        }
    }

    /// Quadrants as an array `[I, II, III, IV]`.
    pub fn as_array(&self) -> [Block; 4] {
        [self.first, self.second, self.third, self.fourth]
    }
}

#[cfg(test)]
mod tests {
    use super::{Block, QuadrantPlan};

    fn assert_partition(plan: &QuadrantPlan, len_a: usize, len_b: usize) {
        let quads = plan.as_array();
        for i in 1..=len_a {
            for j in 1..=len_b {
                let hits = quads.iter().filter(|q| q.contains(i, j)).count();
                assert_eq!(hits, 1, "cell ({i},{j}) covered {hits} times in {plan:?}");
            }
        }
        let total: usize = quads.iter().map(Block::len).sum();
        assert_eq!(total, len_a * len_b);
        for q in quads.iter().filter(|q| !q.is_empty()) {
            assert!(q.row_start >= 1 && q.col_start >= 1);
            assert!(q.row_end <= len_a && q.col_end <= len_b);
        }
    }

    #[test]
    fn empty_block_shapes() {
        let b = Block::new(1, 0, 1, 5);
        assert!(b.is_empty());
        assert_eq!(b.len(), 0);
        assert_eq!(Block::full(0, 0).len(), 0);
        assert_eq!(Block::full(3, 4).len(), 12);
    }

    #[test]
    fn plan_for_textbook_lengths() {
        let plan = QuadrantPlan::for_lengths(7, 6);
        assert_eq!(plan.first, Block::new(1, 2, 1, 2));
        assert_eq!(plan.second, Block::new(3, 7, 1, 2));
        assert_eq!(plan.third, Block::new(1, 2, 3, 6));
        assert_eq!(plan.fourth, Block::new(3, 7, 3, 6));
    }

    #[test]
    fn tiny_lengths_yield_empty_quadrants() {
        let plan = QuadrantPlan::for_lengths(1, 1);
        assert!(plan.first.is_empty());
        assert!(plan.second.is_empty());
        assert!(plan.third.is_empty());
        assert_eq!(plan.fourth, Block::new(1, 1, 1, 1));

        let plan = QuadrantPlan::for_lengths(0, 3);
        assert!(plan.as_array().iter().all(Block::is_empty));
    }

    #[test]
    fn plans_partition_all_small_tables() {
        for len_a in 0..=9 {
            for len_b in 0..=9 {
                assert_partition(&QuadrantPlan::for_lengths(len_a, len_b), len_a, len_b);
            }
        }
    }

    #[test]
    fn splitting_shrinks_blocks_with_both_sides_at_least_two() {
        for h in 2..=9 {
            for w in 2..=9 {
                let b = Block::new(3, 3 + h - 1, 5, 5 + w - 1);
                for q in b.quadrants().as_array() {
                    assert!(q.height() < h && q.width() < w, "{b:?} -> {q:?}");
                }
            }
        }
        let unit = Block::new(4, 4, 4, 4);
        assert_eq!(unit.quadrants().fourth, unit);
    }

    #[test]
    fn block_quadrants_partition_sub_blocks() {
        for (rs, cs) in [(1, 1), (4, 2), (5, 9)] {
            for h in 0..=6 {
                for w in 0..=6 {
                    let b = Block::new(rs, rs + h - 1, cs, cs + w - 1);
                    assert_eq!((b.height(), b.width()), (h, w));
                    let quads = b.quadrants().as_array();
                    let total: usize = quads.iter().map(Block::len).sum();
                    assert_eq!(total, b.len(), "{b:?}");
                    for q in quads.iter().filter(|q| !q.is_empty()) {
                        assert!(q.row_start >= b.row_start && q.row_end <= b.row_end);
                        assert!(q.col_start >= b.col_start && q.col_end <= b.col_end);
                    }
                }
            }
        }
    }
}
