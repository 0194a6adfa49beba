//! Constant time median filtering for 8-bit grids.
//!
//! Keeps a histogram for every column of the extended grid, each counting the
//! `2r + 1` samples of its column that fall in the current window rows, and a
//! row histogram that is the bin-wise sum of the `2r + 1` column histograms
//! under the window. Sliding right adds one column histogram and subtracts
//! another, and sliding down touches one sample per column, so the cost per
//! pixel is bounded by the 256 bins regardless of the radius.

use crate::config::FilterConfig;
use crate::error::{self, FilterError};
use crate::filter::{Configurable, WindowFilter};
use crate::grid::SampleGrid;
use crate::histogram::{ColumnHistogramTable, Histogram};

use tracing::trace;

pub const GRAY_LEVELS: usize = 256;

#[derive(Debug, Clone, Default)]
pub struct TwoLevelMedianFilter {
    config: FilterConfig,
}

impl TwoLevelMedianFilter {
    pub fn new(radius: usize) -> error::Result<TwoLevelMedianFilter> {
        Ok(TwoLevelMedianFilter {
            config: FilterConfig::new(radius)?,
        })
    }

    pub fn with_config(config: FilterConfig) -> TwoLevelMedianFilter {
        TwoLevelMedianFilter { config }
    }
}

// Counts rows [0, side) of every column
fn init_columns(extended: &SampleGrid<u8>, columns: &mut ColumnHistogramTable, side: usize) {
    for y in 0..side {
        for (c, v) in extended.row(y).iter().enumerate() {
            columns.increment(c, *v as usize);
        }
    }
}

// Slides column `c` from rows [top - 1, top - 1 + side) to [top, top + side)
fn advance_column(
    extended: &SampleGrid<u8>,
    columns: &mut ColumnHistogramTable,
    c: usize,
    top: usize,
    side: usize,
) {
    let leaving = extended[(c, top - 1)] as usize;
    let entering = extended[(c, top + side - 1)] as usize;
    columns.advance(c, leaving, entering);
}

fn median_of(hist: &Histogram, threshold: usize) -> error::Result<u8> {
    hist.select(threshold)
        .map(|bin| bin as u8)
        .ok_or(FilterError::Internal("row histogram holds too few samples"))
}

impl Configurable for TwoLevelMedianFilter {
    fn name(&self) -> &'static str {
        "twolevel"
    }

    fn config(&self) -> &FilterConfig {
        &self.config
    }

    fn config_mut(&mut self) -> &mut FilterConfig {
        &mut self.config
    }
}

impl WindowFilter<u8> for TwoLevelMedianFilter {
    fn scan(&self, extended: &SampleGrid<u8>, out: &mut SampleGrid<u8>) -> error::Result<()> {
        let side = self.config.window_side();
        let threshold = self.config.rank_index();
        let (width, height) = out.dimensions();

        let mut columns = ColumnHistogramTable::new(extended.width(), GRAY_LEVELS)?;
        let mut hist = Histogram::new(GRAY_LEVELS)?;
        trace!(
            "Column histogram table: {} columns x {} levels",
            columns.columns(),
            columns.levels()
        );

        init_columns(extended, &mut columns, side);

        for y in 0..height {
            // Columns under the first window of the row are brought down to
            // this row before the row histogram is rebuilt from them. The
            // remaining columns are brought down as the window reaches them.
            if y > 0 {
                for c in 0..side {
                    advance_column(extended, &mut columns, c, y, side);
                }
            }

            hist.clear();
            for c in 0..side {
                hist.add_counts(columns.column(c), side);
            }
            out[(0, y)] = median_of(&hist, threshold)?;

            for x in 1..width {
                let entering = x + side - 1;
                if y > 0 {
                    advance_column(extended, &mut columns, entering, y, side);
                }
                hist.add_sub_counts(columns.column(entering), columns.column(x - 1));
                out[(x, y)] = median_of(&hist, threshold)?;
            }
        }

        Ok(())
    }
}
