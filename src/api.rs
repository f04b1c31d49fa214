use std::path::Path;

use log::info;

use crate::colormap::ColorMap;
use crate::config::Options;
use crate::coordinate::{
    Coordinate, CoordinateConverter, CoordinateType, Datum, GeodeticCoordinate, UtmCoordinate,
};
use crate::driver::DriverRegistry;
use crate::errors::GeoResult;
use crate::image::{Image, MetadataContainer};
use crate::pixel::{Pixel, PixelGray, Rgb8};
use crate::channel::Channel;

/// Main interface to the terrakit library
///
/// Bundles the options, the datum table they select and the driver registry,
/// so callers construct them once and pass the facade around.
pub struct TerraKit {
    options: Options,
    converter: CoordinateConverter,
    registry: DriverRegistry,
}

impl TerraKit {
    /// Create an instance with default options and the built-in datums
    pub fn new() -> Self {
        TerraKit {
            options: Options::default(),
            converter: CoordinateConverter::with_builtin_datums(),
            registry: DriverRegistry::new(),
        }
    }

    /// Create an instance from explicit options
    ///
    /// # Returns
    /// A TerraKit instance, or an error if the configured datum table cannot be read
    pub fn with_options(options: Options) -> GeoResult<Self> {
        let converter = CoordinateConverter::new(options.datum_table()?);
        Ok(TerraKit {
            options,
            converter,
            registry: DriverRegistry::new(),
        })
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    pub fn converter(&self) -> &CoordinateConverter {
        &self.converter
    }

    pub fn registry(&self) -> &DriverRegistry {
        &self.registry
    }

    /// Geodetic coordinate on the configured default datum
    pub fn geodetic(&self, latitude: f64, longitude: f64, altitude: f64) -> GeoResult<GeodeticCoordinate> {
        GeodeticCoordinate::new(latitude, longitude, altitude, self.options.default_datum)
    }

    /// Project a geodetic coordinate into its UTM zone on the same datum
    pub fn to_utm(&self, coordinate: &GeodeticCoordinate) -> GeoResult<UtmCoordinate> {
        self.converter.geodetic_to_utm(coordinate, coordinate.datum())
    }

    /// Unproject a UTM coordinate on the same datum
    pub fn to_geodetic(&self, coordinate: &UtmCoordinate) -> GeoResult<GeodeticCoordinate> {
        self.converter.utm_to_geodetic(coordinate, coordinate.datum())
    }

    /// General conversion to a variant and datum
    pub fn convert(&self, coordinate: &Coordinate, target: CoordinateType, datum: Datum) -> GeoResult<Coordinate> {
        self.converter.convert(coordinate, target, datum)
    }

    /// Decode an image into memory, attaching sidecar metadata when present
    pub fn load_image<P: Pixel, T: AsRef<Path>>(&self, path: T) -> GeoResult<Image<P>> {
        let path = path.as_ref();
        let mut image = Image::<P>::load(path, &self.registry)?;
        if let Some(metadata) = MetadataContainer::read_sidecar(path)? {
            image.set_metadata(metadata);
        }
        Ok(image)
    }

    /// Encode an image; metadata goes to a GDAL `.aux.xml` sidecar
    pub fn save_image<P: Pixel, T: AsRef<Path>>(&self, image: &Image<P>, path: T) -> GeoResult<()> {
        let path = path.as_ref();
        image.write(path, &self.registry)?;
        if let Some(metadata) = image.metadata().filter(|m| !m.is_empty()) {
            metadata.write_sidecar(path)?;
        }
        info!("Saved image to {}", path.display());
        Ok(())
    }

    /// Colorize a gray image with a CSV color map file
    pub fn colorize<C: Channel, T: AsRef<Path>>(
        &self,
        image: &Image<PixelGray<C>>,
        colormap_path: T,
    ) -> GeoResult<Image<Rgb8>> {
        ColorMap::from_file(colormap_path)?.apply(image)
    }
}

impl Default for TerraKit {
    fn default() -> Self {
        Self::new()
    }
}
