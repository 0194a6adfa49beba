//! Reflective border extension.
//!
//! Every filter in this crate pads its input with the same rule before
//! scanning, so the outputs of different variants can be compared pixel for
//! pixel, borders included. The rule mirrors about the edge sample without
//! repeating it:
//!
//! ```text
//!   source:            a b c d e
//!   extended (r = 2):  c b | a b c d e | d c
//! ```

use crate::error::{self, FilterError};
use crate::grid::SampleGrid;
use tracing::trace;

/// Maps an offset relative to the first source sample onto the source index
/// it mirrors. Valid for offsets in `-(len - 1)..=2 * (len - 1)`.
pub fn reflect_index(offset: isize, len: usize) -> usize {
    let last = len as isize - 1;
    let idx = if offset < 0 {
        -offset
    } else if offset > last {
        2 * last - offset
    } else {
        offset
    };
    idx as usize
}

/// Builds a `(width + 2r) x (height + 2r)` copy of `source` whose interior
/// equals the source and whose border is filled by reflection.
///
/// Rows are first padded left and right, then the top and bottom border rows
/// are copied from the already padded rows.
pub fn extend<T: Copy>(source: &SampleGrid<T>, radius: usize) -> error::Result<SampleGrid<T>> {
    let (width, height) = source.dimensions();
    if radius >= width.min(height) {
        return Err(FilterError::RadiusTooLarge {
            radius,
            limit: width.min(height),
        });
    }

    let ext_width = width + radius * 2;
    let ext_height = height + radius * 2;
    trace!("Extending {}x{} grid to {}x{}", width, height, ext_width, ext_height);

    let mut extended = SampleGrid::new_with_fill(ext_width, ext_height, source.as_slice()[0])?;

    for y in 0..height {
        let src_row = source.row(y);
        let ext_row = extended.row_mut(y + radius);
        ext_row[radius..radius + width].copy_from_slice(src_row);
        for j in 1..=radius {
            ext_row[radius - j] = src_row[j];
            ext_row[radius + width - 1 + j] = src_row[width - 1 - j];
        }
    }

    for j in 1..=radius {
        extended.copy_row_within(radius + j, radius - j);
        extended.copy_row_within(radius + height - 1 - j, radius + height - 1 + j);
    }

    Ok(extended)
}
