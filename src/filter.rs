//! The entry points shared by all window filters.

use crate::border;
use crate::config::FilterConfig;
use crate::error::{self, FilterError};
use crate::grid::{checked_len, SampleGrid};
use crate::sample::Sample;
use tracing::debug;

/// Name and configuration of a window filter.
///
/// Kept apart from [`WindowFilter`] so filters that accept several sample
/// types can be configured without naming one.
pub trait Configurable {
    /// Short name used in logs and benchmark records.
    fn name(&self) -> &'static str;

    fn config(&self) -> &FilterConfig;

    fn config_mut(&mut self) -> &mut FilterConfig;

    /// Replaces radius and gate together. On error the previous configuration
    /// is kept.
    fn configure(&mut self, radius: usize, gate: f64) -> error::Result<()> {
        let config = FilterConfig::with_gate(radius, gate)?;
        *self.config_mut() = config;
        Ok(())
    }

    fn set_radius(&mut self, radius: usize) -> error::Result<()> {
        self.config_mut().set_radius(radius)
    }

    fn set_gate(&mut self, gate: f64) -> error::Result<()> {
        self.config_mut().set_gate(gate)
    }
}

/// A square window filter of configurable radius.
///
/// Implementors only provide [`WindowFilter::scan`]; validation, border
/// extension and cropping are shared. A filter holds nothing but its
/// configuration, so one instance can serve any number of calls.
pub trait WindowFilter<T: Sample>: Configurable {
    /// Filters a border extended grid. The window centred on extended pixel
    /// `(x + r, y + r)` produces output pixel `(x, y)`, and `out` has the
    /// dimensions of the unextended source.
    fn scan(&self, extended: &SampleGrid<T>, out: &mut SampleGrid<T>) -> error::Result<()>;

    /// Filters `source` into a newly allocated grid.
    fn apply(&self, source: &SampleGrid<T>) -> error::Result<SampleGrid<T>> {
        let (width, height) = source.dimensions();
        let config = self.config();
        config.validate_for(width, height)?;

        debug!(
            "{} filter: {}x{} {} samples, radius {}, gate {}",
            self.name(),
            width,
            height,
            T::TYPE_NAME,
            config.radius(),
            config.gate()
        );

        let extended = border::extend(source, config.radius())?;
        let mut out = SampleGrid::new_with_fill(width, height, source.as_slice()[0])?;
        self.scan(&extended, &mut out)?;
        Ok(out)
    }

    /// Filters `source` into the caller allocated `destination`, which must
    /// have the same dimensions. The destination is only written once the
    /// whole result is available.
    fn filter(&self, source: &SampleGrid<T>, destination: &mut SampleGrid<T>) -> error::Result<()> {
        if destination.dimensions() != source.dimensions() {
            return Err(FilterError::SizeMismatch {
                width: source.width(),
                height: source.height(),
                dest_width: destination.width(),
                dest_height: destination.height(),
            });
        }
        let out = self.apply(source)?;
        destination.copy_from(&out)
    }

    /// Flat buffer variant of [`WindowFilter::filter`] for row major data.
    fn filter_slice(
        &self,
        source: &[T],
        destination: &mut [T],
        width: usize,
        height: usize,
    ) -> error::Result<()> {
        let len = checked_len(width, height)?;
        if destination.len() != len {
            return Err(FilterError::BufferLength {
                expected: len,
                actual: destination.len(),
            });
        }
        let grid = SampleGrid::from_slice(source, width, height)?;
        let out = self.apply(&grid)?;
        destination.copy_from_slice(out.as_slice());
        Ok(())
    }
}
