//! Image conversion command
//!
//! Re-encodes an image into another format, optionally changing the pixel
//! layout (`--pixel rgb8`) or colorizing a single band (`--colormap`).

use std::path::Path;

use clap::ArgMatches;
use log::{debug, info};

use crate::channel::ChannelKind;
use crate::colormap::ColorMap;
use crate::commands::command_traits::Command;
use crate::config::Options;
use crate::driver::{DriverHeader, DriverRegistry};
use crate::errors::{GeoError, GeoResult};
use crate::image::MetadataContainer;
use crate::pixel::{PixelShape, RawPixel};
use crate::utils::format_utils::{extension_of, parse_pixel_format};
use crate::utils::logger::Logger;
use crate::utils::progress::ProgressTracker;

/// Command converting an image file
pub struct ConvertImageCommand<'a> {
    input_file: String,
    output_file: String,
    /// Requested output layout; the source layout when absent
    pixel_format: Option<(PixelShape, ChannelKind)>,
    colormap: Option<ColorMap>,
    registry: DriverRegistry,
    show_progress: bool,
    logger: &'a Logger,
}

impl<'a> ConvertImageCommand<'a> {
    pub fn new(args: &ArgMatches, options: &Options, logger: &'a Logger) -> GeoResult<Self> {
        let input_file = args
            .get_one::<String>("input")
            .ok_or_else(|| GeoError::GenericError("Missing input file".to_string()))?
            .clone();

        let mut output_file = args
            .get_one::<String>("output")
            .ok_or_else(|| GeoError::GenericError("Missing output file path for conversion".to_string()))?
            .clone();
        if extension_of(Path::new(&output_file)).is_none() {
            output_file = format!("{}.{}", output_file, options.default_extension);
            debug!("Output has no extension, writing {}", output_file);
        }

        let pixel_format = match args.get_one::<String>("pixel") {
            Some(format) => Some(parse_pixel_format(format)?),
            None => None,
        };

        let colormap = match args.get_one::<String>("colormap") {
            Some(path) => Some(ColorMap::from_file(path)?),
            None => None,
        };

        Ok(ConvertImageCommand {
            input_file,
            output_file,
            pixel_format,
            colormap,
            registry: DriverRegistry::new(),
            show_progress: !args.get_flag("quiet"),
            logger,
        })
    }

    /// Convert one decoded pixel into the output layout
    fn map_pixel(&self, pixel: &RawPixel, shape: PixelShape, kind: ChannelKind) -> GeoResult<RawPixel> {
        match &self.colormap {
            Some(colormap) => {
                let gray = pixel.convert(PixelShape::Gray, pixel.kind);
                let color = colormap.color_for(gray.samples()[0]);
                let rgb = RawPixel::new(
                    PixelShape::Rgb,
                    ChannelKind::UInt8,
                    &[color.r as f64, color.g as f64, color.b as f64],
                )?;
                Ok(rgb.convert(shape, kind))
            }
            None => Ok(pixel.convert(shape, kind)),
        }
    }

    /// Perform the conversion and return the written header
    pub fn convert(&self) -> GeoResult<DriverHeader> {
        let input = Path::new(&self.input_file);
        let output = Path::new(&self.output_file);
        if !input.is_file() {
            return Err(GeoError::FileNotFound(self.input_file.clone()));
        }

        let mut reader = self.registry.driver_for_file(input)?;
        let source = reader.open(input)?;

        let (shape, kind) = match (self.pixel_format, &self.colormap) {
            (Some(format), _) => format,
            (None, Some(_)) => (PixelShape::Rgb, ChannelKind::UInt8),
            (None, None) => (source.shape, source.kind),
        };

        let mut writer = self.registry.driver_for_extension(output)?;
        let (out_shape, out_kind) = writer.output_format(shape, kind);
        if (out_shape, out_kind) != (shape, kind) {
            info!(
                "{} cannot store {} {}, writing {} {}",
                writer.name(),
                shape,
                kind,
                out_shape,
                out_kind
            );
        }
        let header = DriverHeader::new(source.rows, source.cols, out_shape, out_kind);
        writer.create(header)?;

        let progress = if self.show_progress {
            ProgressTracker::new(source.rows as u64, "Converting")
        } else {
            ProgressTracker::hidden(source.rows as u64)
        };
        for row in 0..source.rows {
            for col in 0..source.cols {
                let pixel = reader.read_pixel(row, col)?;
                writer.write_pixel(row, col, &self.map_pixel(&pixel, out_shape, out_kind)?)?;
            }
            progress.increment(1);
        }
        progress.finish();

        writer.write(output)?;

        if let Some(metadata) = MetadataContainer::read_sidecar(input)? {
            metadata.write_sidecar(output)?;
        }
        Ok(header)
    }
}

impl<'a> Command for ConvertImageCommand<'a> {
    fn execute(&self) -> GeoResult<()> {
        info!("Converting image {} to {}", self.input_file, self.output_file);

        let header = self.convert()?;

        let message = format!(
            "Wrote {} ({}x{} {} {})",
            self.output_file, header.cols, header.rows, header.shape, header.kind
        );
        info!("{}", message);
        self.logger.log(&message)?;
        Ok(())
    }
}
