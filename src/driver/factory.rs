//! Registry for selecting decode drivers

use std::path::Path;

use log::debug;

use crate::errors::{GeoError, GeoResult};

use super::handler::ImageDriver;
use super::netpbm::NetpbmDriver;
use super::raster::RasterDriver;

/// Constructor for a fresh driver instance
pub type DriverConstructor = fn() -> Box<dyn ImageDriver>;

/// Registry of available drivers
///
/// Drivers are stateful, so the registry hands out a new instance per file.
/// Reading selects by magic number first and falls back to the extension;
/// writing selects by extension only.
pub struct DriverRegistry {
    constructors: Vec<DriverConstructor>,
}

impl DriverRegistry {
    /// Create a registry with no drivers
    pub fn empty() -> Self {
        DriverRegistry { constructors: Vec::new() }
    }

    /// Create a registry with the built-in NETPBM and raster drivers
    pub fn new() -> Self {
        let mut registry = Self::empty();
        registry.register(|| Box::new(NetpbmDriver::new()));
        registry.register(|| Box::new(RasterDriver::new()));
        registry
    }

    /// Add a driver; earlier registrations win ties
    pub fn register(&mut self, constructor: DriverConstructor) {
        self.constructors.push(constructor);
    }

    /// Names of all registered drivers
    pub fn driver_names(&self) -> Vec<&'static str> {
        self.constructors.iter().map(|create| create().name()).collect()
    }

    /// Find a driver able to read the file at `path`
    pub fn driver_for_file(&self, path: &Path) -> GeoResult<Box<dyn ImageDriver>> {
        for create in &self.constructors {
            let driver = create();
            if driver.probe(path) {
                debug!("Driver {} accepted {} by magic number", driver.name(), path.display());
                return Ok(driver);
            }
        }

        for create in &self.constructors {
            let driver = create();
            if driver.supports_extension(path) {
                debug!("Driver {} accepted {} by extension", driver.name(), path.display());
                return Ok(driver);
            }
        }

        Err(GeoError::DriverNotFound(path.display().to_string()))
    }

    /// Find a driver able to write the format implied by the path's extension
    pub fn driver_for_extension(&self, path: &Path) -> GeoResult<Box<dyn ImageDriver>> {
        self.constructors
            .iter()
            .map(|create| create())
            .find(|driver| driver.supports_extension(path))
            .ok_or_else(|| GeoError::UnknownExtension(path.display().to_string()))
    }
}

impl Default for DriverRegistry {
    fn default() -> Self {
        Self::new()
    }
}
