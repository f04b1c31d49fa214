//! Raster driver backed by the `image` crate
//!
//! Handles the common compressed raster formats (PNG, JPEG, TIFF, BMP). Samples
//! are decoded as 8 or 16-bit gray, RGB or RGBA.

use std::path::Path;

use ::image::{DynamicImage, ImageBuffer, ImageReader, Luma, Rgb, Rgba};
use log::{debug, info};

use crate::channel::ChannelKind;
use crate::errors::{GeoError, GeoResult};
use crate::pixel::{PixelShape, RawPixel};

use super::grid::SampleGrid;
use super::handler::{DriverHeader, ImageDriver};

const EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "tif", "tiff", "bmp"];

/// Driver delegating encoding and decoding to the `image` crate
#[derive(Debug, Default)]
pub struct RasterDriver {
    grid: Option<SampleGrid>,
}

impl RasterDriver {
    pub fn new() -> Self {
        RasterDriver { grid: None }
    }

    fn grid(&self) -> GeoResult<&SampleGrid> {
        self.grid
            .as_ref()
            .ok_or_else(|| GeoError::Uninitialized("raster driver has no image open".to_string()))
    }

    /// Flatten a decoded image into a header and interleaved samples
    pub fn from_dynamic(image: &DynamicImage) -> (DriverHeader, Vec<f64>) {
        let rows = image.height() as usize;
        let cols = image.width() as usize;
        let (shape, kind, samples): (PixelShape, ChannelKind, Vec<f64>) = match image {
            DynamicImage::ImageLuma8(buf) => {
                (PixelShape::Gray, ChannelKind::UInt8, buf.as_raw().iter().map(|&s| s as f64).collect())
            }
            DynamicImage::ImageLuma16(buf) => {
                (PixelShape::Gray, ChannelKind::UInt16, buf.as_raw().iter().map(|&s| s as f64).collect())
            }
            DynamicImage::ImageRgb8(buf) => {
                (PixelShape::Rgb, ChannelKind::UInt8, buf.as_raw().iter().map(|&s| s as f64).collect())
            }
            DynamicImage::ImageRgba8(buf) => {
                (PixelShape::Rgba, ChannelKind::UInt8, buf.as_raw().iter().map(|&s| s as f64).collect())
            }
            DynamicImage::ImageLumaA8(_) => {
                let buf = image.to_rgba8();
                (PixelShape::Rgba, ChannelKind::UInt8, buf.as_raw().iter().map(|&s| s as f64).collect())
            }
            DynamicImage::ImageRgb16(_) | DynamicImage::ImageRgb32F(_) => {
                let buf = image.to_rgb16();
                (PixelShape::Rgb, ChannelKind::UInt16, buf.as_raw().iter().map(|&s| s as f64).collect())
            }
            _ => {
                let buf = image.to_rgba16();
                (PixelShape::Rgba, ChannelKind::UInt16, buf.as_raw().iter().map(|&s| s as f64).collect())
            }
        };

        (DriverHeader::new(rows, cols, shape, kind), samples)
    }

    /// Build an `image` crate buffer from the grid
    fn to_dynamic(grid: &SampleGrid) -> GeoResult<DynamicImage> {
        let header = grid.header;
        let width = header.cols as u32;
        let height = header.rows as u32;
        let too_small = || GeoError::GenericError("sample buffer does not match image size".to_string());

        let image = match (header.shape, header.kind) {
            (PixelShape::Gray, ChannelKind::UInt8) => DynamicImage::ImageLuma8(
                ImageBuffer::<Luma<u8>, _>::from_raw(width, height, to_u8(grid.samples())).ok_or_else(too_small)?,
            ),
            (PixelShape::Gray, _) => DynamicImage::ImageLuma16(
                ImageBuffer::<Luma<u16>, _>::from_raw(width, height, to_u16(grid.samples())).ok_or_else(too_small)?,
            ),
            (PixelShape::Rgb, ChannelKind::UInt8) => DynamicImage::ImageRgb8(
                ImageBuffer::<Rgb<u8>, _>::from_raw(width, height, to_u8(grid.samples())).ok_or_else(too_small)?,
            ),
            (PixelShape::Rgb, _) => DynamicImage::ImageRgb16(
                ImageBuffer::<Rgb<u16>, _>::from_raw(width, height, to_u16(grid.samples())).ok_or_else(too_small)?,
            ),
            (PixelShape::Rgba, ChannelKind::UInt8) => DynamicImage::ImageRgba8(
                ImageBuffer::<Rgba<u8>, _>::from_raw(width, height, to_u8(grid.samples())).ok_or_else(too_small)?,
            ),
            (PixelShape::Rgba, _) => DynamicImage::ImageRgba16(
                ImageBuffer::<Rgba<u16>, _>::from_raw(width, height, to_u16(grid.samples())).ok_or_else(too_small)?,
            ),
        };
        Ok(image)
    }
}

fn to_u8(samples: &[f64]) -> Vec<u8> {
    samples.iter().map(|&s| s as u8).collect()
}

fn to_u16(samples: &[f64]) -> Vec<u16> {
    samples.iter().map(|&s| s as u16).collect()
}

impl ImageDriver for RasterDriver {
    fn name(&self) -> &'static str {
        "Raster"
    }

    fn extensions(&self) -> &'static [&'static str] {
        EXTENSIONS
    }

    fn probe(&self, path: &Path) -> bool {
        let format = ImageReader::open(path)
            .and_then(|reader| reader.with_guessed_format())
            .ok()
            .and_then(|reader| reader.format());

        match format {
            Some(format) => format
                .extensions_str()
                .iter()
                .any(|ext| EXTENSIONS.contains(ext)),
            None => false,
        }
    }

    fn open(&mut self, path: &Path) -> GeoResult<DriverHeader> {
        let image = ::image::open(path)
            .map_err(|e| GeoError::GenericError(format!("Failed to decode {}: {}", path.display(), e)))?;
        let (header, samples) = Self::from_dynamic(&image);
        debug!("Decoded {:?} as {} {}", image.color(), header.shape, header.kind);
        self.grid = Some(SampleGrid::from_samples(header, samples)?);
        info!("Opened {} as {}x{} {}", path.display(), header.cols, header.rows, header.shape);
        Ok(header)
    }

    fn create(&mut self, header: DriverHeader) -> GeoResult<()> {
        let (shape, kind) = self.output_format(header.shape, header.kind);
        self.grid = Some(SampleGrid::new(DriverHeader::new(header.rows, header.cols, shape, kind))?);
        Ok(())
    }

    fn header(&self) -> Option<DriverHeader> {
        self.grid.as_ref().map(|g| g.header)
    }

    fn output_format(&self, shape: PixelShape, kind: ChannelKind) -> (PixelShape, ChannelKind) {
        let kind = match kind {
            ChannelKind::UInt8 | ChannelKind::Float01 | ChannelKind::FloatFree => ChannelKind::UInt8,
            _ => ChannelKind::UInt16,
        };
        (shape, kind)
    }

    fn read_pixel(&self, row: usize, col: usize) -> GeoResult<RawPixel> {
        self.grid()?.get(row, col)
    }

    fn write_pixel(&mut self, row: usize, col: usize, pixel: &RawPixel) -> GeoResult<()> {
        match self.grid.as_mut() {
            Some(grid) => grid.set(row, col, pixel),
            None => Err(GeoError::Uninitialized("raster driver has no image open".to_string())),
        }
    }

    fn write(&self, path: &Path) -> GeoResult<()> {
        let image = Self::to_dynamic(self.grid()?)?;
        image
            .save(path)
            .map_err(|e| GeoError::GenericError(format!("Failed to save {}: {}", path.display(), e)))?;
        info!("Wrote raster image to {}", path.display());
        Ok(())
    }
}
