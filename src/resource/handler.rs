//! Image resource trait definition

use crate::errors::{GeoError, GeoResult};
use crate::pixel::Pixel;

/// Storage backend kind of a resource
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceType {
    /// Dense in-memory buffer
    Memory,
    /// Backed by a decode driver and a file
    Disk,
}

/// Storage backend underlying an image
///
/// `row` ranges over `[0, rows())` and `col` over `[0, cols())`. Any access on
/// a zero-sized resource fails with `Uninitialized`, any other access outside
/// the bounds with `OutOfRange`.
pub trait ImageResource<P: Pixel>: Send {
    /// Read the pixel at (`row`, `col`)
    fn get(&self, row: usize, col: usize) -> GeoResult<P>;

    /// Replace the pixel at (`row`, `col`)
    fn set(&mut self, row: usize, col: usize, pixel: P) -> GeoResult<()>;

    /// Number of rows
    fn rows(&self) -> usize;

    /// Number of columns
    fn cols(&self) -> usize;

    /// Channels per pixel
    fn channels(&self) -> usize {
        P::channels()
    }

    /// Backend kind
    fn resource_type(&self) -> ResourceType;

    /// Persist pending writes; a no-op for memory
    fn flush(&mut self) -> GeoResult<()> {
        Ok(())
    }
}

/// Validate an access against resource dimensions
pub(crate) fn check_bounds(rows: usize, cols: usize, row: usize, col: usize) -> GeoResult<()> {
    if rows == 0 || cols == 0 {
        return Err(GeoError::Uninitialized(format!(
            "access to ({}, {}) on an empty resource",
            row, col
        )));
    }
    if row >= rows || col >= cols {
        return Err(GeoError::OutOfRange(format!(
            "pixel ({}, {}) outside {}x{} resource",
            row, col, rows, cols
        )));
    }
    Ok(())
}
