//! Coordinate Reference System identifiers

use crate::errors::{GeoError, GeoResult};

use super::datum::Datum;
use super::types::Hemisphere;

/// Identifier for the coordinate systems terrakit can express
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoordinateSystem {
    /// Latitude/longitude on a datum
    Geographic(Datum),
    /// UTM zone on a datum
    Utm(i32, Hemisphere, Datum),
}

impl CoordinateSystem {
    /// Get the EPSG code for this coordinate system, if one exists
    pub fn epsg_code(&self) -> Option<u32> {
        match *self {
            CoordinateSystem::Geographic(Datum::WGS84) => Some(4326),
            CoordinateSystem::Geographic(Datum::NAD83) => Some(4269),
            CoordinateSystem::Geographic(Datum::NAD27) => Some(4267),
            CoordinateSystem::Geographic(Datum::EGM96) => None,
            CoordinateSystem::Utm(zone, hemisphere, datum) => {
                if !(1..=60).contains(&zone) {
                    return None;
                }
                let zone = zone as u32;
                match (datum, hemisphere) {
                    (Datum::WGS84, Hemisphere::North) => Some(32600 + zone),
                    (Datum::WGS84, Hemisphere::South) => Some(32700 + zone),
                    // North American zones only
                    (Datum::NAD83, Hemisphere::North) if zone <= 23 => Some(26900 + zone),
                    (Datum::NAD27, Hemisphere::North) if zone <= 22 => Some(26700 + zone),
                    _ => None,
                }
            }
        }
    }

    /// Get a description of this coordinate system
    pub fn description(&self) -> String {
        let name = match *self {
            CoordinateSystem::Geographic(datum) => format!("Geographic {}", datum),
            CoordinateSystem::Utm(zone, hemisphere, datum) => {
                format!("UTM Zone {}{} {}", zone, hemisphere.letter(), datum)
            }
        };
        match self.epsg_code() {
            Some(code) => format!("{} (EPSG:{})", name, code),
            None => name,
        }
    }

    /// Create a coordinate system from an EPSG code
    pub fn from_epsg(epsg: u32) -> GeoResult<CoordinateSystem> {
        let utm = |base: u32, hemisphere, datum| {
            CoordinateSystem::Utm((epsg - base) as i32, hemisphere, datum)
        };
        match epsg {
            4326 => Ok(CoordinateSystem::Geographic(Datum::WGS84)),
            4269 => Ok(CoordinateSystem::Geographic(Datum::NAD83)),
            4267 => Ok(CoordinateSystem::Geographic(Datum::NAD27)),
            32601..=32660 => Ok(utm(32600, Hemisphere::North, Datum::WGS84)),
            32701..=32760 => Ok(utm(32700, Hemisphere::South, Datum::WGS84)),
            26901..=26923 => Ok(utm(26900, Hemisphere::North, Datum::NAD83)),
            26701..=26722 => Ok(utm(26700, Hemisphere::North, Datum::NAD27)),
            _ => Err(GeoError::NotSupported(format!("EPSG:{}", epsg))),
        }
    }

    /// Parse a coordinate system from a string (e.g. "EPSG:4326")
    pub fn from_string(crs_str: &str) -> GeoResult<CoordinateSystem> {
        let crs_str = crs_str.trim().to_uppercase();
        let code = crs_str.strip_prefix("EPSG:").unwrap_or(&crs_str);

        match code.parse::<u32>() {
            Ok(epsg) => Self::from_epsg(epsg),
            Err(_) => Err(GeoError::ParseError(format!("Unsupported CRS format: {}", crs_str))),
        }
    }
}
