use crate::error::{self, try_vec, FilterError};
use crate::sample::Sample;

use anyhow::anyhow;
use image::{open, GrayImage, Luma};
use std::ops::{Index, IndexMut};
use std::path::Path;

/// A single band, row major raster of samples.
///
/// Width and height are always positive and the buffer always holds exactly
/// `width * height` samples. Indexing is by `(x, y)`.
#[derive(Debug, Clone, PartialEq)]
pub struct SampleGrid<T> {
    buffer: Vec<T>,
    width: usize,
    height: usize,
}

/// Sample count of a `width x height` grid. Rejects empty grids and sizes
/// that do not fit in `usize`.
pub fn checked_len(width: usize, height: usize) -> error::Result<usize> {
    if width == 0 || height == 0 {
        return Err(FilterError::InvalidDimensions { width, height });
    }
    width
        .checked_mul(height)
        .ok_or(FilterError::InvalidDimensions { width, height })
}

// Copies out a rectangle whose top left corner is (left_x, top_y)
fn subframe_array<T: Copy>(
    arr: &[T],
    from_width: usize,
    left_x: usize,
    top_y: usize,
    to_width: usize,
    to_height: usize,
) -> error::Result<Vec<T>> {
    let mut new_arr: Vec<T> = Vec::new();
    new_arr
        .try_reserve_exact(to_width * to_height)
        .map_err(|_| FilterError::Allocation(to_width * to_height))?;

    for y in 0..to_height {
        let from_idx = (top_y + y) * from_width + left_x;
        new_arr.extend_from_slice(&arr[from_idx..from_idx + to_width]);
    }
    Ok(new_arr)
}

impl<T: Copy> SampleGrid<T> {
    // Creates a new grid of the requested width and height
    pub fn new_with_fill(width: usize, height: usize, fill_value: T) -> error::Result<SampleGrid<T>> {
        let len = checked_len(width, height)?;
        Ok(SampleGrid {
            buffer: try_vec(len, fill_value)?,
            width,
            height,
        })
    }

    // Wraps an existing row major vector
    pub fn from_vec(v: Vec<T>, width: usize, height: usize) -> error::Result<SampleGrid<T>> {
        let len = checked_len(width, height)?;
        if v.len() != len {
            return Err(FilterError::BufferLength {
                expected: len,
                actual: v.len(),
            });
        }
        Ok(SampleGrid {
            buffer: v,
            width,
            height,
        })
    }

    pub fn from_slice(v: &[T], width: usize, height: usize) -> error::Result<SampleGrid<T>> {
        let len = checked_len(width, height)?;
        if v.len() != len {
            return Err(FilterError::BufferLength {
                expected: len,
                actual: v.len(),
            });
        }
        let mut buffer = Vec::new();
        buffer
            .try_reserve_exact(v.len())
            .map_err(|_| FilterError::Allocation(v.len()))?;
        buffer.extend_from_slice(v);
        Ok(SampleGrid {
            buffer,
            width,
            height,
        })
    }

    // Builds a grid by evaluating `f(x, y)` for every pixel
    pub fn from_fn<F>(width: usize, height: usize, mut f: F) -> error::Result<SampleGrid<T>>
    where
        F: FnMut(usize, usize) -> T,
    {
        let len = checked_len(width, height)?;
        let mut buffer = Vec::new();
        buffer
            .try_reserve_exact(len)
            .map_err(|_| FilterError::Allocation(len))?;
        for y in 0..height {
            for x in 0..width {
                buffer.push(f(x, y));
            }
        }
        Ok(SampleGrid {
            buffer,
            width,
            height,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn dimensions(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    // Never true for a constructed grid, provided for API symmetry with len()
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    pub fn as_slice(&self) -> &[T] {
        &self.buffer
    }

    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.buffer
    }

    pub fn into_vec(self) -> Vec<T> {
        self.buffer
    }

    pub fn get(&self, x: usize, y: usize) -> Option<T> {
        if x < self.width && y < self.height {
            Some(self.buffer[y * self.width + x])
        } else {
            None
        }
    }

    pub fn put(&mut self, x: usize, y: usize, val: T) {
        self[(x, y)] = val;
    }

    pub fn row(&self, y: usize) -> &[T] {
        let start = y * self.width;
        &self.buffer[start..start + self.width]
    }

    pub fn row_mut(&mut self, y: usize) -> &mut [T] {
        let start = y * self.width;
        &mut self.buffer[start..start + self.width]
    }

    // Copies row `src_y` over row `dest_y`
    pub fn copy_row_within(&mut self, src_y: usize, dest_y: usize) {
        let start = src_y * self.width;
        self.buffer
            .copy_within(start..start + self.width, dest_y * self.width);
    }

    pub fn get_subframe(
        &self,
        left_x: usize,
        top_y: usize,
        width: usize,
        height: usize,
    ) -> error::Result<SampleGrid<T>> {
        checked_len(width, height)?;
        if width > self.width.saturating_sub(left_x) || height > self.height.saturating_sub(top_y) {
            return Err(FilterError::SizeMismatch {
                width,
                height,
                dest_width: self.width.saturating_sub(left_x),
                dest_height: self.height.saturating_sub(top_y),
            });
        }
        let v = subframe_array(&self.buffer, self.width, left_x, top_y, width, height)?;
        SampleGrid::from_vec(v, width, height)
    }

    // Overwrites every sample with those of a same sized grid
    pub fn copy_from(&mut self, other: &SampleGrid<T>) -> error::Result<()> {
        if other.dimensions() != self.dimensions() {
            return Err(FilterError::SizeMismatch {
                width: other.width,
                height: other.height,
                dest_width: self.width,
                dest_height: self.height,
            });
        }
        self.buffer.copy_from_slice(&other.buffer);
        Ok(())
    }

    pub fn map<U, F>(&self, f: F) -> error::Result<SampleGrid<U>>
    where
        F: Fn(T) -> U,
    {
        let mut buffer = Vec::new();
        buffer
            .try_reserve_exact(self.buffer.len())
            .map_err(|_| FilterError::Allocation(self.buffer.len()))?;
        buffer.extend(self.buffer.iter().map(|v| f(*v)));
        Ok(SampleGrid {
            buffer,
            width: self.width,
            height: self.height,
        })
    }
}

impl<T: Sample> SampleGrid<T> {
    pub fn min_max(&self) -> (T, T) {
        let mut mn = self.buffer[0];
        let mut mx = self.buffer[0];
        for v in self.buffer.iter().skip(1) {
            if v.sample_cmp(&mn).is_lt() {
                mn = *v;
            }
            if v.sample_cmp(&mx).is_gt() {
                mx = *v;
            }
        }
        (mn, mx)
    }
}

impl SampleGrid<u8> {
    pub fn from_image_luma8(image_data: &GrayImage) -> error::Result<SampleGrid<u8>> {
        let (width, height) = image_data.dimensions();
        SampleGrid::from_slice(image_data.as_raw(), width as usize, height as usize)
    }

    pub fn to_image_luma8(&self) -> GrayImage {
        let mut out_img = GrayImage::new(self.width as u32, self.height as u32);
        for y in 0..self.height {
            for x in 0..self.width {
                out_img.put_pixel(x as u32, y as u32, Luma([self[(x, y)]]));
            }
        }
        out_img
    }

    // Loads any format `image` understands and reduces it to a single 8-bit band
    pub fn from_file(file_path: &Path) -> anyhow::Result<SampleGrid<u8>> {
        if !file_path.exists() {
            return Err(anyhow!("File not found: {:?}", file_path));
        }
        let image_data = open(file_path)?.into_luma8();
        Ok(SampleGrid::from_image_luma8(&image_data)?)
    }

    pub fn save(&self, to_file: &Path) -> anyhow::Result<()> {
        if let Some(parent) = to_file.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                return Err(anyhow!(
                    "Unable to open output path for writing: Parent path not found. {:?}",
                    to_file
                ));
            }
        }
        self.to_image_luma8().save(to_file)?;
        Ok(())
    }
}

impl<T> Index<(usize, usize)> for SampleGrid<T> {
    type Output = T;

    fn index(&self, (x, y): (usize, usize)) -> &T {
        if x >= self.width || y >= self.height {
            panic!("Invalid pixel coordinates: ({}, {})", x, y);
        }
        &self.buffer[y * self.width + x]
    }
}

impl<T> IndexMut<(usize, usize)> for SampleGrid<T> {
    fn index_mut(&mut self, (x, y): (usize, usize)) -> &mut T {
        if x >= self.width || y >= self.height {
            panic!("Invalid pixel coordinates: ({}, {})", x, y);
        }
        &mut self.buffer[y * self.width + x]
    }
}
