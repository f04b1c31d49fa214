//! Decode driver trait definition

use std::path::Path;

use crate::channel::ChannelKind;
use crate::errors::GeoResult;
use crate::pixel::{PixelShape, RawPixel};
use crate::utils::format_utils;

/// Dimensions and sample layout of an opened or created image
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DriverHeader {
    pub rows: usize,
    pub cols: usize,
    pub shape: PixelShape,
    pub kind: ChannelKind,
}

impl DriverHeader {
    pub fn new(rows: usize, cols: usize, shape: PixelShape, kind: ChannelKind) -> Self {
        DriverHeader { rows, cols, shape, kind }
    }
}

/// Strategy trait for decoding and encoding a file format
///
/// A driver is stateful: after `open` or `create` it owns the decoded samples
/// and serves pixel reads and writes until `write` persists them.
pub trait ImageDriver: Send {
    /// Name of this driver
    fn name(&self) -> &'static str;

    /// Lowercase file extensions this driver writes and recognizes
    fn extensions(&self) -> &'static [&'static str];

    /// Check the file's magic number without decoding it
    fn probe(&self, path: &Path) -> bool;

    /// Decode the file and return its header
    fn open(&mut self, path: &Path) -> GeoResult<DriverHeader>;

    /// Start a new, zero-filled image for writing
    fn create(&mut self, header: DriverHeader) -> GeoResult<()>;

    /// Header of the opened or created image, if any
    fn header(&self) -> Option<DriverHeader>;

    /// Shape and channel kind this driver stores for the requested layout
    fn output_format(&self, shape: PixelShape, kind: ChannelKind) -> (PixelShape, ChannelKind);

    /// Read a single pixel
    fn read_pixel(&self, row: usize, col: usize) -> GeoResult<RawPixel>;

    /// Write a single pixel, converting it into the driver's sample layout
    fn write_pixel(&mut self, row: usize, col: usize, pixel: &RawPixel) -> GeoResult<()>;

    /// Encode the current samples to `path`
    fn write(&self, path: &Path) -> GeoResult<()>;

    /// Whether the path's extension belongs to this driver
    fn supports_extension(&self, path: &Path) -> bool {
        match format_utils::extension_of(path) {
            Some(ext) => self.extensions().contains(&ext.as_str()),
            None => false,
        }
    }
}
