use crate::config::FilterConfig;
use crate::error::{self, FilterError};
use crate::filter::{Configurable, WindowFilter};
use crate::grid::SampleGrid;
use crate::sample::Sample;

use std::cmp::Ordering;

/// Rank filter that keeps the window samples in a sorted buffer.
///
/// No alphabet is needed, so any ordered sample type works directly. Slower
/// than the histogram variants for large radii, but simple enough to serve as
/// a reference for them.
#[derive(Debug, Clone, Default)]
pub struct LocalSortMedianFilter {
    config: FilterConfig,
}

impl LocalSortMedianFilter {
    pub fn new(radius: usize) -> error::Result<LocalSortMedianFilter> {
        Ok(LocalSortMedianFilter {
            config: FilterConfig::new(radius)?,
        })
    }

    pub fn with_config(config: FilterConfig) -> LocalSortMedianFilter {
        LocalSortMedianFilter { config }
    }
}

/// The `(2r + 1)^2` samples of the current window in ascending order.
#[derive(Debug, Clone)]
pub struct SortedWindowBuffer<T> {
    buffer: Vec<T>,
}

impl<T: Sample> SortedWindowBuffer<T> {
    pub fn with_capacity(size: usize) -> error::Result<SortedWindowBuffer<T>> {
        let mut buffer = Vec::new();
        buffer
            .try_reserve_exact(size)
            .map_err(|_| FilterError::Allocation(size))?;
        Ok(SortedWindowBuffer { buffer })
    }

    /// Gathers the `side x side` window with top left corner `(left, top)`
    /// and sorts it.
    pub fn fill(&mut self, grid: &SampleGrid<T>, left: usize, top: usize, side: usize) {
        self.buffer.clear();
        for y in top..top + side {
            self.buffer
                .extend_from_slice(&grid.row(y)[left..left + side]);
        }
        self.buffer.sort_unstable_by(|a, b| a.sample_cmp(b));
    }

    pub fn as_slice(&self) -> &[T] {
        &self.buffer
    }

    pub fn get(&self, rank: usize) -> Option<T> {
        self.buffer.get(rank).copied()
    }

    /// Swaps one occurrence of `leaving` for `entering`, then shifts the new
    /// value left or right until the buffer is sorted again.
    pub fn replace(&mut self, leaving: T, entering: T) -> error::Result<()> {
        let mut pos = self
            .buffer
            .binary_search_by(|p| p.sample_cmp(&leaving))
            .map_err(|_| FilterError::Internal("leaving sample missing from sorted window"))?;

        self.buffer[pos] = entering;
        while pos > 0 && self.buffer[pos - 1].sample_cmp(&entering) == Ordering::Greater {
            self.buffer.swap(pos - 1, pos);
            pos -= 1;
        }
        while pos + 1 < self.buffer.len()
            && self.buffer[pos + 1].sample_cmp(&entering) == Ordering::Less
        {
            self.buffer.swap(pos, pos + 1);
            pos += 1;
        }
        Ok(())
    }
}

impl Configurable for LocalSortMedianFilter {
    fn name(&self) -> &'static str {
        "localsort"
    }

    fn config(&self) -> &FilterConfig {
        &self.config
    }

    fn config_mut(&mut self) -> &mut FilterConfig {
        &mut self.config
    }
}

impl<T: Sample> WindowFilter<T> for LocalSortMedianFilter {
    fn scan(&self, extended: &SampleGrid<T>, out: &mut SampleGrid<T>) -> error::Result<()> {
        let side = self.config.window_side();
        let rank = self.config.rank_index();
        let (width, height) = out.dimensions();

        let mut window = SortedWindowBuffer::with_capacity(self.config.window_size())?;

        for y in 0..height {
            for x in 0..width {
                if x == 0 {
                    window.fill(extended, 0, y, side);
                } else {
                    for wy in y..y + side {
                        let row = extended.row(wy);
                        window.replace(row[x - 1], row[x + side - 1])?;
                    }
                }
                out[(x, y)] = window
                    .get(rank)
                    .ok_or(FilterError::Internal("rank outside of sorted window"))?;
            }
        }
        Ok(())
    }
}
