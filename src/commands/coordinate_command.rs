//! Coordinate conversion command
//!
//! Converts a geodetic coordinate to UTM or a UTM coordinate to geodetic,
//! optionally changing datum along the way.

use clap::ArgMatches;
use log::info;

use crate::commands::command_traits::Command;
use crate::config::Options;
use crate::coordinate::{
    Coordinate, CoordinateConverter, CoordinateType, Datum, GeodeticCoordinate, UtmCoordinate,
};
use crate::errors::{GeoError, GeoResult};
use crate::utils::logger::Logger;

/// Command converting a single coordinate
pub struct CoordinateCommand<'a> {
    /// Parsed input coordinate
    input: Coordinate,
    /// Datum of the result
    target_datum: Datum,
    /// Explicit UTM zone for geodetic input
    zone: Option<i32>,
    converter: CoordinateConverter,
    logger: &'a Logger,
}

impl<'a> CoordinateCommand<'a> {
    /// Create a new coordinate command
    ///
    /// Reads `--coordinate` or `--utm`, plus the optional `--datum`,
    /// `--to-datum` and `--zone`.
    pub fn new(args: &ArgMatches, options: &Options, logger: &'a Logger) -> GeoResult<Self> {
        let source_datum = match args.get_one::<String>("datum") {
            Some(name) => Datum::from_name(name)?,
            None => options.default_datum,
        };
        let target_datum = match args.get_one::<String>("to-datum") {
            Some(name) => Datum::from_name(name)?,
            None => source_datum,
        };

        let input = if let Some(text) = args.get_one::<String>("coordinate") {
            Coordinate::Geodetic(GeodeticCoordinate::parse_with_datum(text, source_datum)?)
        } else if let Some(text) = args.get_one::<String>("utm") {
            Coordinate::Utm(UtmCoordinate::parse_with_datum(text, source_datum)?)
        } else {
            return Err(GeoError::GenericError(
                "Missing coordinate. Use --coordinate 'lat,lon[,alt]' or --utm 'zoneN easting northing'".to_string(),
            ));
        };

        let zone = match args.get_one::<String>("zone") {
            Some(text) => Some(
                text.parse::<i32>()
                    .map_err(|_| GeoError::ParseError(format!("Invalid zone: {}", text)))?,
            ),
            None => None,
        };

        Ok(CoordinateCommand {
            input,
            target_datum,
            zone,
            converter: CoordinateConverter::new(options.datum_table()?),
            logger,
        })
    }

    /// Run the conversion without printing
    pub fn convert(&self) -> GeoResult<Coordinate> {
        match (&self.input, self.zone) {
            (Coordinate::Geodetic(geodetic), Some(zone)) => Ok(self
                .converter
                .geodetic_to_utm_zone(geodetic, zone, self.target_datum)?
                .into()),
            (Coordinate::Geodetic(_), None) => {
                self.converter.convert(&self.input, CoordinateType::Utm, self.target_datum)
            }
            (Coordinate::Utm(_), _) => {
                self.converter.convert(&self.input, CoordinateType::Geodetic, self.target_datum)
            }
        }
    }
}

impl<'a> Command for CoordinateCommand<'a> {
    fn execute(&self) -> GeoResult<()> {
        info!("Converting {} coordinate {}", self.input.coordinate_type(), self.input);

        let output = self.convert()?;
        let mut lines = vec![
            format!("Input:  {}", self.input),
            format!("Output: {}", output),
        ];
        if let Coordinate::Utm(utm) = &output {
            if let Some(code) = utm.epsg_code() {
                lines.push(format!("EPSG:   {}", code));
            }
        }

        for line in &lines {
            println!("{}", line);
            self.logger.log(line)?;
        }
        Ok(())
    }
}
