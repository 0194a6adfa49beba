use crate::config::FilterConfig;
use crate::error::{self, FilterError};
use crate::filter::{Configurable, WindowFilter};
use crate::grid::SampleGrid;
use crate::histogram::Histogram;
use crate::ordinal::OrdinalTable;
use crate::sample::Sample;

use itertools::iproduct;
use tracing::trace;

/// Rank filter over a single sliding histogram.
///
/// Works for every sample type: types with a native alphabet (`u8`) index the
/// histogram directly, all others are ordinal mapped first. Each row starts
/// from a freshly counted window; moving right swaps one column of samples
/// out and one in.
#[derive(Debug, Clone, Default)]
pub struct HistogramMedianFilter {
    config: FilterConfig,
}

impl HistogramMedianFilter {
    pub fn new(radius: usize) -> error::Result<HistogramMedianFilter> {
        Ok(HistogramMedianFilter {
            config: FilterConfig::new(radius)?,
        })
    }

    pub fn with_config(config: FilterConfig) -> HistogramMedianFilter {
        HistogramMedianFilter { config }
    }
}

/// Runs the sliding histogram over a grid of bin indices and hands every
/// selected bin to `emit`.
pub(crate) fn histogram_scan<F>(
    bins: &SampleGrid<u32>,
    levels: usize,
    config: &FilterConfig,
    out_width: usize,
    out_height: usize,
    mut emit: F,
) -> error::Result<()>
where
    F: FnMut(usize, usize, usize),
{
    let side = config.window_side();
    let threshold = config.rank_index();
    let mut hist = Histogram::new(levels)?;

    for y in 0..out_height {
        for x in 0..out_width {
            if x == 0 {
                hist.clear();
                iproduct!(y..y + side, 0..side).for_each(|(wy, wx)| {
                    hist.increment(bins[(wx, wy)] as usize);
                });
            } else {
                for wy in y..y + side {
                    let row = bins.row(wy);
                    hist.decrement(row[x - 1] as usize);
                    hist.increment(row[x + side - 1] as usize);
                }
            }

            let bin = hist
                .select(threshold)
                .ok_or(FilterError::Internal("window histogram holds too few samples"))?;
            emit(x, y, bin);
        }
    }
    Ok(())
}

impl Configurable for HistogramMedianFilter {
    fn name(&self) -> &'static str {
        "histogram"
    }

    fn config(&self) -> &FilterConfig {
        &self.config
    }

    fn config_mut(&mut self) -> &mut FilterConfig {
        &mut self.config
    }
}

impl<T: Sample> WindowFilter<T> for HistogramMedianFilter {
    fn scan(&self, extended: &SampleGrid<T>, out: &mut SampleGrid<T>) -> error::Result<()> {
        let (width, height) = out.dimensions();

        match T::NATIVE_LEVELS {
            Some(levels) => {
                let bins = extended.map(|v| v.level() as u32)?;
                histogram_scan(&bins, levels, &self.config, width, height, |x, y, bin| {
                    out[(x, y)] = T::from_level(bin);
                })
            }
            None => {
                // Reflection only repeats source samples, so the extended
                // grid has the same distinct values as the source.
                let table = OrdinalTable::from_samples(extended.as_slice())?;
                trace!("Histogram alphabet of {} levels", table.len());
                let bins = table.map_grid(extended)?;
                histogram_scan(&bins, table.len(), &self.config, width, height, |x, y, bin| {
                    out[(x, y)] = table.value(bin);
                })
            }
        }
    }
}
