//! Image container over a storage resource

use std::path::Path;

use log::{debug, info};

use crate::driver::DriverRegistry;
use crate::errors::{GeoError, GeoResult};
use crate::pixel::{pixel_cast, Pixel};
use crate::resource::{check_bounds, pixel_count, DiskResource, ImageResource, MemoryResource, ResourceType};

use super::metadata::{FromMetadata, MetadataContainer, MetadataValue};

/// An image: one exclusively owned resource plus optional metadata
pub struct Image<P: Pixel> {
    resource: Box<dyn ImageResource<P>>,
    metadata: Option<MetadataContainer>,
}

impl<P: Pixel> Image<P> {
    /// Create an empty (0x0) in-memory image
    pub fn new() -> Self {
        Self::from_resource(Box::new(MemoryResource::<P>::empty()))
    }

    /// Create a zero-filled in-memory image
    pub fn with_size(rows: usize, cols: usize) -> Self {
        Self::from_resource(Box::new(MemoryResource::<P>::new(rows, cols)))
    }

    /// Create a zero-filled in-memory image, `OutOfRange` when the pixel count overflows
    pub fn try_with_size(rows: usize, cols: usize) -> GeoResult<Self> {
        Ok(Self::from_resource(Box::new(MemoryResource::<P>::try_new(rows, cols)?)))
    }

    /// Create an in-memory image from row-major pixels
    pub fn from_pixels(rows: usize, cols: usize, pixels: Vec<P>) -> GeoResult<Self> {
        Ok(Self::from_resource(Box::new(MemoryResource::from_pixels(rows, cols, pixels)?)))
    }

    /// Wrap an existing resource
    pub fn from_resource(resource: Box<dyn ImageResource<P>>) -> Self {
        Image { resource, metadata: None }
    }

    /// Open a disk-backed image; pixels are served by the file's driver
    pub fn open<T: AsRef<Path>>(path: T, registry: &DriverRegistry) -> GeoResult<Self> {
        let resource = DiskResource::<P>::open(path, registry)?;
        Ok(Self::from_resource(Box::new(resource)))
    }

    /// Decode a file completely into memory
    pub fn load<T: AsRef<Path>>(path: T, registry: &DriverRegistry) -> GeoResult<Self> {
        let disk = DiskResource::<P>::open(path.as_ref(), registry)?;
        let rows = disk.rows();
        let cols = disk.cols();

        let mut pixels = Vec::with_capacity(pixel_count(rows, cols)?);
        for row in 0..rows {
            for col in 0..cols {
                pixels.push(disk.get(row, col)?);
            }
        }

        debug!("Loaded {} into memory ({}x{})", path.as_ref().display(), rows, cols);
        Self::from_pixels(rows, cols, pixels)
    }

    /// Encode the image to `path`, choosing the format from its extension
    pub fn write<T: AsRef<Path>>(&self, path: T, registry: &DriverRegistry) -> GeoResult<()> {
        let path = path.as_ref();
        let mut disk = DiskResource::<P>::create(path, self.rows(), self.cols(), registry)?;
        for row in 0..self.rows() {
            for col in 0..self.cols() {
                disk.set(row, col, self.get(row, col)?)?;
            }
        }
        disk.flush()?;
        info!("Wrote {}x{} image to {} ({})", self.cols(), self.rows(), path.display(), disk.driver_name());
        Ok(())
    }

    pub fn rows(&self) -> usize {
        self.resource.rows()
    }

    pub fn cols(&self) -> usize {
        self.resource.cols()
    }

    pub fn channels(&self) -> usize {
        self.resource.channels()
    }

    pub fn resource_type(&self) -> ResourceType {
        self.resource.resource_type()
    }

    /// Pixel at (`row`, `col`)
    pub fn get(&self, row: usize, col: usize) -> GeoResult<P> {
        self.resource.get(row, col)
    }

    /// Replace the pixel at (`row`, `col`)
    pub fn set(&mut self, row: usize, col: usize, pixel: P) -> GeoResult<()> {
        self.resource.set(row, col, pixel)
    }

    /// Pixel at a row-major linear index
    pub fn get_index(&self, index: usize) -> GeoResult<P> {
        let (row, col) = self.index_to_position(index)?;
        self.resource.get(row, col)
    }

    /// Replace the pixel at a row-major linear index
    pub fn set_index(&mut self, index: usize, pixel: P) -> GeoResult<()> {
        let (row, col) = self.index_to_position(index)?;
        self.resource.set(row, col, pixel)
    }

    fn index_to_position(&self, index: usize) -> GeoResult<(usize, usize)> {
        let rows = self.rows();
        let cols = self.cols();
        if rows == 0 || cols == 0 {
            check_bounds(rows, cols, 0, 0)?;
        }
        if index >= pixel_count(rows, cols)? {
            return Err(GeoError::OutOfRange(format!(
                "index {} outside {}x{} image",
                index, rows, cols
            )));
        }
        Ok((index / cols, index % cols))
    }

    /// Persist pending writes of a disk-backed image
    pub fn flush(&mut self) -> GeoResult<()> {
        self.resource.flush()
    }

    /// All pixels in row-major order
    pub fn to_vec(&self) -> GeoResult<Vec<P>> {
        let mut pixels = Vec::with_capacity(self.rows() * self.cols());
        for row in 0..self.rows() {
            for col in 0..self.cols() {
                pixels.push(self.get(row, col)?);
            }
        }
        Ok(pixels)
    }

    /// Convert every pixel into another pixel type, producing an in-memory image
    pub fn convert<Q: Pixel>(&self) -> GeoResult<Image<Q>> {
        let pixels = self
            .to_vec()?
            .iter()
            .map(|pixel| pixel_cast::<P, Q>(pixel))
            .collect();
        let mut converted = Image::<Q>::from_pixels(self.rows(), self.cols(), pixels)?;
        converted.metadata = self.metadata.clone();
        Ok(converted)
    }

    /// Metadata side-table, if one was attached
    pub fn metadata(&self) -> Option<&MetadataContainer> {
        self.metadata.as_ref()
    }

    /// Metadata side-table, created on first use
    pub fn metadata_mut(&mut self) -> &mut MetadataContainer {
        self.metadata.get_or_insert_with(MetadataContainer::new)
    }

    /// Replace the metadata side-table
    pub fn set_metadata(&mut self, metadata: MetadataContainer) {
        self.metadata = Some(metadata);
    }

    /// Insert or replace one metadata entry
    pub fn set_metadata_entry<V: Into<MetadataValue>>(&mut self, key: &str, value: V) {
        self.metadata_mut().set(key, value);
    }

    /// Typed metadata lookup; `Ok(None)` when absent
    pub fn metadata_value<T: FromMetadata>(&self, key: &str) -> GeoResult<Option<T>> {
        match &self.metadata {
            Some(metadata) => metadata.get_as(key),
            None => Ok(None),
        }
    }
}

impl<P: Pixel> Default for Image<P> {
    fn default() -> Self {
        Self::new()
    }
}
