//! In-memory image resource

use crate::errors::{GeoError, GeoResult};
use crate::pixel::Pixel;

use super::handler::{check_bounds, ImageResource, ResourceType};

/// Dense row-major buffer of `rows * cols` pixels
#[derive(Debug, Clone, PartialEq)]
pub struct MemoryResource<P: Pixel> {
    rows: usize,
    cols: usize,
    data: Vec<P>,
}

impl<P: Pixel> MemoryResource<P> {
    /// Allocate a zero-filled buffer
    ///
    /// Panics with a capacity overflow when `rows * cols` does not fit in
    /// memory; use [`MemoryResource::try_new`] for untrusted dimensions.
    pub fn new(rows: usize, cols: usize) -> Self {
        MemoryResource {
            rows,
            cols,
            data: vec![P::default(); rows.saturating_mul(cols)],
        }
    }

    /// Allocate a zero-filled buffer, `OutOfRange` when `rows * cols` overflows
    pub fn try_new(rows: usize, cols: usize) -> GeoResult<Self> {
        let len = pixel_count(rows, cols)?;
        Ok(MemoryResource {
            rows,
            cols,
            data: vec![P::default(); len],
        })
    }

    /// Zero-sized resource; every access fails with `Uninitialized`
    pub fn empty() -> Self {
        Self::new(0, 0)
    }

    /// Wrap existing row-major pixels
    pub fn from_pixels(rows: usize, cols: usize, data: Vec<P>) -> GeoResult<Self> {
        if data.len() != pixel_count(rows, cols)? {
            return Err(GeoError::OutOfRange(format!(
                "{} pixels cannot fill a {}x{} buffer",
                data.len(),
                rows,
                cols
            )));
        }
        Ok(MemoryResource { rows, cols, data })
    }

    /// Row-major pixel slice
    pub fn pixels(&self) -> &[P] {
        &self.data
    }

    /// Pixels of one row
    pub fn row(&self, row: usize) -> GeoResult<&[P]> {
        check_bounds(self.rows, self.cols, row, 0)?;
        let start = row * self.cols;
        Ok(&self.data[start..start + self.cols])
    }
}

/// Checked `rows * cols`
pub(crate) fn pixel_count(rows: usize, cols: usize) -> GeoResult<usize> {
    rows.checked_mul(cols)
        .ok_or_else(|| GeoError::OutOfRange(format!("{}x{} pixels overflow the address space", rows, cols)))
}

impl<P: Pixel> Default for MemoryResource<P> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<P: Pixel> ImageResource<P> for MemoryResource<P> {
    fn get(&self, row: usize, col: usize) -> GeoResult<P> {
        check_bounds(self.rows, self.cols, row, col)?;
        Ok(self.data[row * self.cols + col])
    }

    fn set(&mut self, row: usize, col: usize, pixel: P) -> GeoResult<()> {
        check_bounds(self.rows, self.cols, row, col)?;
        self.data[row * self.cols + col] = pixel;
        Ok(())
    }

    fn rows(&self) -> usize {
        self.rows
    }

    fn cols(&self) -> usize {
        self.cols
    }

    fn resource_type(&self) -> ResourceType {
        ResourceType::Memory
    }
}
