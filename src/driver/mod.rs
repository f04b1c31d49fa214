//! Decode drivers for disk-backed images
//!
//! This module implements strategies for reading and writing image file
//! formats behind a single capability trait.

mod factory;
pub(crate) mod grid;
mod handler;
mod netpbm;
mod raster;

pub use factory::{DriverConstructor, DriverRegistry};
pub use handler::{DriverHeader, ImageDriver};
pub use netpbm::NetpbmDriver;
pub use raster::RasterDriver;
