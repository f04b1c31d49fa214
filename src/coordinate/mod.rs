//! Coordinate handling for geospatial data
//!
//! Geodetic and UTM value types, the datum table and the conversion engine
//! mapping between them.

mod crs;
mod datum;
mod transform;
mod types;

// Re-export key types
pub use self::crs::CoordinateSystem;
pub use self::datum::{Datum, DatumParameters, DatumTable, Ellipsoid, HelmertParams};
pub use self::transform::{
    central_meridian, compute_utm_zone, ecef_to_geodetic, geodetic_to_ecef, project, unproject,
    CoordinateConverter, FALSE_EASTING, FALSE_NORTHING_SOUTH, SCALE_FACTOR,
};
pub use self::types::{
    normalize_longitude, Coordinate, CoordinateBase, CoordinateType, GeodeticCoordinate,
    Hemisphere, UtmCoordinate,
};
