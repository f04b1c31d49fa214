pub mod errors;
pub mod channel;
pub mod pixel;
pub mod resource;
pub mod driver;
pub mod image;
pub mod coordinate;
pub mod colormap;
pub mod config;
pub mod utils;
pub mod commands;
pub mod api;

#[cfg(test)]
mod tests;

pub use crate::api::TerraKit;

pub use errors::{GeoError, GeoResult};
pub use channel::{range_cast, Channel, ChannelKind};
pub use pixel::{pixel_cast, Pixel, PixelGray, PixelRgb, PixelRgba, PixelShape, RawPixel};
pub use image::{Image, MetadataContainer, MetadataValue};
pub use resource::{DiskResource, ImageResource, MemoryResource, ResourceType};
pub use driver::DriverRegistry;
pub use coordinate::{
    compute_utm_zone, Coordinate, CoordinateConverter, CoordinateType, Datum, DatumTable,
    GeodeticCoordinate, Hemisphere, UtmCoordinate,
};
pub use config::Options;
