//! Dense integer alphabets for arbitrary ordered sample types.
//!
//! Histogram based rank selection needs samples to index a count table.
//! `OrdinalTable` sorts the distinct sample values of a grid so every sample
//! can be replaced by its position in that ascending list.

use crate::error::{self, FilterError};
use crate::grid::SampleGrid;
use crate::sample::Sample;
use tracing::trace;

/// Ascending list of the distinct values present in a sample set.
#[derive(Debug, Clone, PartialEq)]
pub struct OrdinalTable<T> {
    values: Vec<T>,
}

impl<T: Sample> OrdinalTable<T> {
    /// Sorts a copy of `samples` and compacts adjacent duplicates.
    pub fn from_samples(samples: &[T]) -> error::Result<OrdinalTable<T>> {
        let mut values: Vec<T> = Vec::new();
        values
            .try_reserve_exact(samples.len())
            .map_err(|_| FilterError::Allocation(samples.len()))?;
        values.extend_from_slice(samples);
        values.sort_unstable_by(|a, b| a.sample_cmp(b));
        values.dedup_by(|a, b| a.sample_cmp(b).is_eq());
        values.shrink_to_fit();

        trace!(
            "Ordinal table holds {} distinct values out of {} samples",
            values.len(),
            samples.len()
        );
        Ok(OrdinalTable { values })
    }

    /// Number of distinct values, the alphabet size K.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn values(&self) -> &[T] {
        &self.values
    }

    /// The value at ordinal `index`.
    pub fn value(&self, index: usize) -> T {
        self.values[index]
    }

    pub fn try_ordinal(&self, v: T) -> Option<usize> {
        self.values.binary_search_by(|p| p.sample_cmp(&v)).ok()
    }

    /// Ordinal of `v`.
    ///
    /// # Panics
    ///
    /// If `v` was not part of the samples the table was built from.
    pub fn ordinal(&self, v: T) -> usize {
        match self.try_ordinal(v) {
            Some(i) => i,
            None => panic!("Sample {:?} is not present in the ordinal table", v),
        }
    }

    /// Replaces every sample of `grid` with its ordinal. `grid` must be the
    /// grid, or a reflection of the grid, the table was built from.
    pub fn map_grid(&self, grid: &SampleGrid<T>) -> error::Result<SampleGrid<u32>> {
        grid.map(|v| self.ordinal(v) as u32)
    }
}
