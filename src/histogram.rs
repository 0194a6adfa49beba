use crate::error::{self, try_vec, FilterError};

/// Count table over a dense alphabet `0..K`.
///
/// The sum of all counts equals the number of samples currently represented.
#[derive(Debug, Clone, PartialEq)]
pub struct Histogram {
    counts: Vec<u32>,
    total: usize,
}

impl Histogram {
    pub fn new(levels: usize) -> error::Result<Histogram> {
        Ok(Histogram {
            counts: try_vec(levels, 0)?,
            total: 0,
        })
    }

    pub fn levels(&self) -> usize {
        self.counts.len()
    }

    pub fn total(&self) -> usize {
        self.total
    }

    pub fn counts(&self) -> &[u32] {
        &self.counts
    }

    pub fn clear(&mut self) {
        self.counts.iter_mut().for_each(|c| *c = 0);
        self.total = 0;
    }

    pub fn increment(&mut self, bin: usize) {
        self.counts[bin] += 1;
        self.total += 1;
    }

    pub fn decrement(&mut self, bin: usize) {
        self.counts[bin] -= 1;
        self.total -= 1;
    }

    /// Bin-wise adds a column histogram of `count` samples.
    pub fn add_counts(&mut self, other: &[u32], count: usize) {
        self.counts
            .iter_mut()
            .zip(other.iter())
            .for_each(|(c, o)| *c += *o);
        self.total += count;
    }

    /// Bin-wise adds `add` and removes `sub`, both holding the same number of
    /// samples, so the total is unchanged.
    pub fn add_sub_counts(&mut self, add: &[u32], sub: &[u32]) {
        self.counts
            .iter_mut()
            .zip(add.iter().zip(sub.iter()))
            .for_each(|(c, (a, s))| *c = *c + *a - *s);
    }

    /// First bin whose cumulative count strictly exceeds `threshold`.
    ///
    /// With `threshold = floor(k * gate)` this is the sample at position
    /// `threshold` of the ascending window. `None` when the histogram holds
    /// `threshold` samples or fewer.
    pub fn select(&self, threshold: usize) -> Option<usize> {
        let mut sum = 0_usize;
        for (bin, c) in self.counts.iter().enumerate() {
            sum += *c as usize;
            if sum > threshold {
                return Some(bin);
            }
        }
        None
    }
}

/// One histogram per column, stored as a single `columns x levels` table.
///
/// Column `c` counts the vertical run of samples of column `c` that lie in
/// the rows currently covered by the window.
#[derive(Debug, Clone)]
pub struct ColumnHistogramTable {
    counts: Vec<u32>,
    levels: usize,
    columns: usize,
}

impl ColumnHistogramTable {
    pub fn new(columns: usize, levels: usize) -> error::Result<ColumnHistogramTable> {
        let len = columns
            .checked_mul(levels)
            .ok_or(FilterError::Allocation(usize::MAX))?;
        Ok(ColumnHistogramTable {
            counts: try_vec(len, 0)?,
            levels,
            columns,
        })
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn levels(&self) -> usize {
        self.levels
    }

    pub fn column(&self, c: usize) -> &[u32] {
        let start = c * self.levels;
        &self.counts[start..start + self.levels]
    }

    pub fn increment(&mut self, c: usize, bin: usize) {
        self.counts[c * self.levels + bin] += 1;
    }

    /// Slides column `c` down one row: `leaving` drops out of the vertical
    /// window and `entering` joins it.
    pub fn advance(&mut self, c: usize, leaving: usize, entering: usize) {
        let start = c * self.levels;
        self.counts[start + leaving] -= 1;
        self.counts[start + entering] += 1;
    }
}
