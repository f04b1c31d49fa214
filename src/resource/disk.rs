//! Disk-backed image resource

use std::marker::PhantomData;
use std::path::{Path, PathBuf};

use log::{debug, warn};

use crate::channel::Channel;
use crate::driver::{DriverHeader, DriverRegistry, ImageDriver};
use crate::errors::{GeoError, GeoResult};
use crate::pixel::{Pixel, RawPixel};

use super::handler::{check_bounds, ImageResource, ResourceType};

/// Resource deferring dimensions and pixel access to a decode driver
///
/// The resource knows no file format itself. Pixels are exchanged with the
/// driver as `RawPixel`s and cast into `P` on the way out.
pub struct DiskResource<P: Pixel> {
    path: PathBuf,
    driver: Box<dyn ImageDriver>,
    header: DriverHeader,
    dirty: bool,
    _pixel: PhantomData<P>,
}

impl<P: Pixel> DiskResource<P> {
    /// Open an existing file with the first driver that accepts it
    pub fn open<T: AsRef<Path>>(path: T, registry: &DriverRegistry) -> GeoResult<Self> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(GeoError::FileNotFound(path.display().to_string()));
        }

        let driver = registry.driver_for_file(path)?;
        Self::open_with_driver(path, driver)
    }

    /// Open an existing file with an explicitly chosen driver
    pub fn open_with_driver<T: AsRef<Path>>(path: T, mut driver: Box<dyn ImageDriver>) -> GeoResult<Self> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(GeoError::FileNotFound(path.display().to_string()));
        }

        let header = driver.open(path)?;
        debug!("Disk resource {} uses driver {}", path.display(), driver.name());

        Ok(DiskResource {
            path: path.to_path_buf(),
            driver,
            header,
            dirty: false,
            _pixel: PhantomData,
        })
    }

    /// Start a new file whose format is chosen from the path's extension
    ///
    /// Nothing is written until `flush`.
    pub fn create<T: AsRef<Path>>(path: T, rows: usize, cols: usize, registry: &DriverRegistry) -> GeoResult<Self> {
        let path = path.as_ref();
        let mut driver = registry.driver_for_extension(path)?;
        driver.create(DriverHeader::new(rows, cols, P::SHAPE, <P::Chan as Channel>::KIND))?;
        let header = driver
            .header()
            .ok_or_else(|| GeoError::Uninitialized(format!("driver {} did not create an image", driver.name())))?;

        Ok(DiskResource {
            path: path.to_path_buf(),
            driver,
            header,
            dirty: true,
            _pixel: PhantomData,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Name of the driver serving this resource
    pub fn driver_name(&self) -> &'static str {
        self.driver.name()
    }

    /// Shape and channel kind as stored by the driver
    pub fn header(&self) -> DriverHeader {
        self.header
    }

    /// Whether writes are pending
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }
}

impl<P: Pixel> ImageResource<P> for DiskResource<P> {
    fn get(&self, row: usize, col: usize) -> GeoResult<P> {
        check_bounds(self.header.rows, self.header.cols, row, col)?;
        let raw = self.driver.read_pixel(row, col)?;
        Ok(raw.cast::<P>())
    }

    fn set(&mut self, row: usize, col: usize, pixel: P) -> GeoResult<()> {
        check_bounds(self.header.rows, self.header.cols, row, col)?;
        self.driver.write_pixel(row, col, &RawPixel::from_pixel(&pixel))?;
        self.dirty = true;
        Ok(())
    }

    fn rows(&self) -> usize {
        self.header.rows
    }

    fn cols(&self) -> usize {
        self.header.cols
    }

    fn resource_type(&self) -> ResourceType {
        ResourceType::Disk
    }

    fn flush(&mut self) -> GeoResult<()> {
        if self.dirty {
            self.driver.write(&self.path)?;
            self.dirty = false;
        }
        Ok(())
    }
}

impl<P: Pixel> Drop for DiskResource<P> {
    fn drop(&mut self) {
        if self.dirty {
            warn!("Disk resource {} dropped with unflushed writes", self.path.display());
        }
    }
}
