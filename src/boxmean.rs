use crate::config::FilterConfig;
use crate::error::{self, try_vec};
use crate::filter::{Configurable, WindowFilter};
use crate::grid::SampleGrid;
use crate::sample::Sample;

/// Box mean filter driven by per column running sums.
///
/// The vertical sums advance by one row at a time, the horizontal reduction
/// over the `2r + 1` column sums is redone for every pixel.
#[derive(Debug, Clone, Default)]
pub struct BoxMeanFilter {
    config: FilterConfig,
}

impl BoxMeanFilter {
    pub fn new(radius: usize) -> error::Result<BoxMeanFilter> {
        Ok(BoxMeanFilter {
            config: FilterConfig::new(radius)?,
        })
    }

    pub fn with_config(config: FilterConfig) -> BoxMeanFilter {
        BoxMeanFilter { config }
    }
}

// Sums column by column over rows [0, side)
fn init_column_sums<T: Sample>(extended: &SampleGrid<T>, sums: &mut [f64], side: usize) {
    for y in 0..side {
        extended
            .row(y)
            .iter()
            .zip(sums.iter_mut())
            .for_each(|(v, s)| *s += v.to_f64());
    }
}

// Moves every column sum one row down
fn advance_column_sums<T: Sample>(
    extended: &SampleGrid<T>,
    sums: &mut [f64],
    leaving_row: usize,
    entering_row: usize,
) {
    let leaving = extended.row(leaving_row);
    let entering = extended.row(entering_row);
    sums.iter_mut()
        .zip(leaving.iter().zip(entering.iter()))
        .for_each(|(s, (l, e))| *s += e.to_f64() - l.to_f64());
}

impl Configurable for BoxMeanFilter {
    fn name(&self) -> &'static str {
        "mean"
    }

    fn config(&self) -> &FilterConfig {
        &self.config
    }

    fn config_mut(&mut self) -> &mut FilterConfig {
        &mut self.config
    }
}

impl<T: Sample> WindowFilter<T> for BoxMeanFilter {
    fn scan(&self, extended: &SampleGrid<T>, out: &mut SampleGrid<T>) -> error::Result<()> {
        let side = self.config.window_side();
        let area = self.config.window_size() as f64;
        let height = out.height();

        let mut column_sums = try_vec(extended.width(), 0.0_f64)?;
        init_column_sums(extended, &mut column_sums, side);

        for y in 0..height {
            for (x, o) in out.row_mut(y).iter_mut().enumerate() {
                // Window columns are x..x + side in extended coordinates
                let sum: f64 = column_sums[x..x + side].iter().sum();
                *o = T::from_mean(sum / area);
            }
            if y + 1 < height {
                advance_column_sums(extended, &mut column_sums, y, y + side);
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_three_by_three_mean() {
        let g = SampleGrid::from_vec(vec![0_u8, 0, 0, 0, 9, 0, 0, 0, 0], 3, 3).unwrap();
        let f = BoxMeanFilter::new(1).unwrap();
        let out = f.apply(&g).unwrap();
        assert_eq!(out[(1, 1)], 1);
    }

    #[test]
    fn test_real_mean_not_rounded() {
        let g = SampleGrid::from_vec(vec![0.0_f64, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 0.0], 3, 3)
            .unwrap();
        let f = BoxMeanFilter::new(1).unwrap();
        let out = f.apply(&g).unwrap();
        approx::assert_abs_diff_eq!(out[(1, 1)], 1.0 / 9.0, epsilon = 1e-12);
    }
}
