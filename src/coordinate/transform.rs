//! Datum-aware conversion between geodetic and UTM coordinates
//!
//! Projection uses the transverse Mercator series on the ellipsoid of the
//! datum the projection happens in. Datum changes go through earth-centred
//! earth-fixed (ECEF) space with the Helmert parameters of a `DatumTable`,
//! always composed through WGS84.

use log::debug;

use crate::errors::{GeoError, GeoResult};

use super::datum::{Datum, DatumTable, Ellipsoid, HelmertParams};
use super::types::{
    normalize_longitude, Coordinate, CoordinateType, GeodeticCoordinate, Hemisphere,
    UtmCoordinate,
};

/// UTM central meridian scale factor
pub const SCALE_FACTOR: f64 = 0.9996;
pub const FALSE_EASTING: f64 = 500_000.0;
/// Added to northings in the southern hemisphere
pub const FALSE_NORTHING_SOUTH: f64 = 10_000_000.0;

const FOOTPOINT_EPSILON: f64 = 1e-12;
const FOOTPOINT_MAX_ITERATIONS: usize = 16;
const ECEF_ITERATIONS: usize = 10;

/// UTM zone of a longitude; 180° wraps to zone 1
pub fn compute_utm_zone(longitude: f64) -> i32 {
    let lon = normalize_longitude(longitude);
    let zone = ((lon + 180.0) / 6.0).floor() as i32 + 1;
    if zone > 60 {
        1
    } else {
        zone.max(1)
    }
}

/// Central meridian of a zone in degrees
pub fn central_meridian(zone: i32) -> f64 {
    (zone - 1) as f64 * 6.0 - 180.0 + 3.0
}

/// Meridian arc length from the equator to `phi` (radians)
fn meridian_arc(ellipsoid: &Ellipsoid, phi: f64) -> f64 {
    let a = ellipsoid.semi_major_axis;
    let e2 = ellipsoid.eccentricity_squared();
    let e4 = e2 * e2;
    let e6 = e4 * e2;

    a * ((1.0 - e2 / 4.0 - 3.0 * e4 / 64.0 - 5.0 * e6 / 256.0) * phi
        - (3.0 * e2 / 8.0 + 3.0 * e4 / 32.0 + 45.0 * e6 / 1024.0) * (2.0 * phi).sin()
        + (15.0 * e4 / 256.0 + 45.0 * e6 / 1024.0) * (4.0 * phi).sin()
        - (35.0 * e6 / 3072.0) * (6.0 * phi).sin())
}

/// Latitude whose meridian arc equals `arc`, by Newton iteration
fn footpoint_latitude(ellipsoid: &Ellipsoid, arc: f64) -> f64 {
    let a = ellipsoid.semi_major_axis;
    let e2 = ellipsoid.eccentricity_squared();
    let e4 = e2 * e2;
    let e6 = e4 * e2;

    let mut phi = arc / (a * (1.0 - e2 / 4.0 - 3.0 * e4 / 64.0 - 5.0 * e6 / 256.0));
    for _ in 0..FOOTPOINT_MAX_ITERATIONS {
        let sin_phi = phi.sin();
        // dM/dphi is the meridional radius of curvature
        let rho = a * (1.0 - e2) / (1.0 - e2 * sin_phi * sin_phi).powf(1.5);
        let delta = (meridian_arc(ellipsoid, phi) - arc) / rho;
        phi -= delta;
        if delta.abs() < FOOTPOINT_EPSILON {
            break;
        }
    }
    phi
}

/// Forward transverse Mercator: degrees to (easting, northing)
pub fn project(
    ellipsoid: &Ellipsoid,
    latitude: f64,
    longitude: f64,
    zone: i32,
    hemisphere: Hemisphere,
) -> (f64, f64) {
    let a = ellipsoid.semi_major_axis;
    let e2 = ellipsoid.eccentricity_squared();
    let ep2 = ellipsoid.second_eccentricity_squared();

    let phi = latitude.to_radians();
    let dlon = normalize_longitude(longitude - central_meridian(zone)).to_radians();

    let sin_phi = phi.sin();
    let cos_phi = phi.cos();
    let tan_phi = phi.tan();

    let n = a / (1.0 - e2 * sin_phi * sin_phi).sqrt();
    let t = tan_phi * tan_phi;
    let c = ep2 * cos_phi * cos_phi;
    let aa = cos_phi * dlon;
    let m = meridian_arc(ellipsoid, phi);

    let easting = SCALE_FACTOR
        * n
        * (aa + (1.0 - t + c) * aa.powi(3) / 6.0
            + (5.0 - 18.0 * t + t * t + 72.0 * c - 58.0 * ep2) * aa.powi(5) / 120.0)
        + FALSE_EASTING;

    let mut northing = SCALE_FACTOR
        * (m + n
            * tan_phi
            * (aa * aa / 2.0
                + (5.0 - t + 9.0 * c + 4.0 * c * c) * aa.powi(4) / 24.0
                + (61.0 - 58.0 * t + t * t + 600.0 * c - 330.0 * ep2) * aa.powi(6) / 720.0));

    if hemisphere == Hemisphere::South {
        northing += FALSE_NORTHING_SOUTH;
    }

    (easting, northing)
}

/// Inverse transverse Mercator: (easting, northing) to degrees
pub fn unproject(
    ellipsoid: &Ellipsoid,
    easting: f64,
    northing: f64,
    zone: i32,
    hemisphere: Hemisphere,
) -> (f64, f64) {
    let a = ellipsoid.semi_major_axis;
    let e2 = ellipsoid.eccentricity_squared();
    let ep2 = ellipsoid.second_eccentricity_squared();

    let x = easting - FALSE_EASTING;
    let y = match hemisphere {
        Hemisphere::North => northing,
        Hemisphere::South => northing - FALSE_NORTHING_SOUTH,
    };

    let phi1 = footpoint_latitude(ellipsoid, y / SCALE_FACTOR);
    let sin_phi1 = phi1.sin();
    let cos_phi1 = phi1.cos();
    let tan_phi1 = phi1.tan();
    let w = 1.0 - e2 * sin_phi1 * sin_phi1;

    let n1 = a / w.sqrt();
    let r1 = a * (1.0 - e2) / w.powf(1.5);
    let t1 = tan_phi1 * tan_phi1;
    let c1 = ep2 * cos_phi1 * cos_phi1;
    let d = x / (n1 * SCALE_FACTOR);

    let phi = phi1
        - (n1 * tan_phi1 / r1)
            * (d * d / 2.0
                - (5.0 + 3.0 * t1 + 10.0 * c1 - 4.0 * c1 * c1 - 9.0 * ep2) * d.powi(4) / 24.0
                + (61.0 + 90.0 * t1 + 298.0 * c1 + 45.0 * t1 * t1 - 252.0 * ep2 - 3.0 * c1 * c1)
                    * d.powi(6)
                    / 720.0);

    let dlon = (d - (1.0 + 2.0 * t1 + c1) * d.powi(3) / 6.0
        + (5.0 - 2.0 * c1 + 28.0 * t1 - 3.0 * c1 * c1 + 8.0 * ep2 + 24.0 * t1 * t1) * d.powi(5)
            / 120.0)
        / cos_phi1;

    (
        phi.to_degrees(),
        normalize_longitude(central_meridian(zone) + dlon.to_degrees()),
    )
}

/// Geodetic degrees and height to ECEF metres
pub fn geodetic_to_ecef(ellipsoid: &Ellipsoid, latitude: f64, longitude: f64, height: f64) -> [f64; 3] {
    let a = ellipsoid.semi_major_axis;
    let e2 = ellipsoid.eccentricity_squared();
    let phi = latitude.to_radians();
    let lambda = longitude.to_radians();
    let n = a / (1.0 - e2 * phi.sin() * phi.sin()).sqrt();

    [
        (n + height) * phi.cos() * lambda.cos(),
        (n + height) * phi.cos() * lambda.sin(),
        (n * (1.0 - e2) + height) * phi.sin(),
    ]
}

/// ECEF metres to geodetic degrees and height
pub fn ecef_to_geodetic(ellipsoid: &Ellipsoid, xyz: [f64; 3]) -> (f64, f64, f64) {
    let a = ellipsoid.semi_major_axis;
    let e2 = ellipsoid.eccentricity_squared();
    let [x, y, z] = xyz;
    let p = (x * x + y * y).sqrt();
    let lambda = y.atan2(x);

    let mut phi = z.atan2(p * (1.0 - e2));
    let mut height = 0.0;
    for _ in 0..ECEF_ITERATIONS {
        let n = a / (1.0 - e2 * phi.sin() * phi.sin()).sqrt();
        height = if phi.cos().abs() > 1e-12 {
            p / phi.cos() - n
        } else {
            z.abs() - n * (1.0 - e2)
        };
        phi = z.atan2(p * (1.0 - e2 * n / (n + height)));
    }

    (phi.to_degrees(), lambda.to_degrees(), height)
}

/// Converts coordinates between variants and datums
#[derive(Debug, Clone)]
pub struct CoordinateConverter {
    datums: DatumTable,
}

impl CoordinateConverter {
    /// Converter over the given datum table
    pub fn new(datums: DatumTable) -> Self {
        CoordinateConverter { datums }
    }

    /// Converter over the built-in datum table
    pub fn with_builtin_datums() -> Self {
        Self::new(DatumTable::builtin())
    }

    pub fn datums(&self) -> &DatumTable {
        &self.datums
    }

    /// Convert to the requested variant and datum
    ///
    /// Same variant and datum returns an exact copy. UTM to UTM keeps the
    /// source zone.
    pub fn convert(&self, coordinate: &Coordinate, target: CoordinateType, datum: Datum) -> GeoResult<Coordinate> {
        if coordinate.coordinate_type() == target && coordinate.datum() == datum {
            return Ok(*coordinate);
        }

        match (coordinate, target) {
            (Coordinate::Geodetic(g), CoordinateType::Geodetic) => Ok(self.change_datum(g, datum)?.into()),
            (Coordinate::Geodetic(g), CoordinateType::Utm) => Ok(self.geodetic_to_utm(g, datum)?.into()),
            (Coordinate::Utm(u), CoordinateType::Geodetic) => Ok(self.utm_to_geodetic(u, datum)?.into()),
            (Coordinate::Utm(u), CoordinateType::Utm) => {
                let geodetic = self.utm_to_geodetic(u, datum)?;
                Ok(self.geodetic_to_utm_zone(&geodetic, u.zone(), datum)?.into())
            }
        }
    }

    /// Project into the zone containing the (datum-shifted) longitude
    pub fn geodetic_to_utm(&self, coordinate: &GeodeticCoordinate, datum: Datum) -> GeoResult<UtmCoordinate> {
        let shifted = self.change_datum(coordinate, datum)?;
        let zone = compute_utm_zone(shifted.longitude());
        self.project_on_datum(&shifted, zone)
    }

    /// Project into an explicit zone, `InvalidZone` outside [1, 60]
    pub fn geodetic_to_utm_zone(
        &self,
        coordinate: &GeodeticCoordinate,
        zone: i32,
        datum: Datum,
    ) -> GeoResult<UtmCoordinate> {
        if !(1..=60).contains(&zone) {
            return Err(GeoError::InvalidZone(zone));
        }
        let shifted = self.change_datum(coordinate, datum)?;
        self.project_on_datum(&shifted, zone)
    }

    fn project_on_datum(&self, coordinate: &GeodeticCoordinate, zone: i32) -> GeoResult<UtmCoordinate> {
        let ellipsoid = self.datums.get(coordinate.datum())?.ellipsoid;
        let hemisphere = Hemisphere::from_latitude(coordinate.latitude());
        let (easting, northing) = project(
            &ellipsoid,
            coordinate.latitude(),
            coordinate.longitude(),
            zone,
            hemisphere,
        );

        debug!(
            "Projected {:.8},{:.8} into zone {}{}: {:.3} {:.3}",
            coordinate.latitude(),
            coordinate.longitude(),
            zone,
            hemisphere.letter(),
            easting,
            northing
        );

        UtmCoordinate::new(
            zone,
            hemisphere,
            easting,
            northing,
            coordinate.altitude(),
            coordinate.datum(),
        )
    }

    /// Unproject on the UTM datum, then shift to `datum`
    pub fn utm_to_geodetic(&self, coordinate: &UtmCoordinate, datum: Datum) -> GeoResult<GeodeticCoordinate> {
        let ellipsoid = self.datums.get(coordinate.datum())?.ellipsoid;
        let (latitude, longitude) = unproject(
            &ellipsoid,
            coordinate.easting(),
            coordinate.northing(),
            coordinate.zone(),
            coordinate.hemisphere(),
        );

        // Series overshoot near the poles
        let latitude = latitude.clamp(-90.0, 90.0);
        let geodetic = GeodeticCoordinate::new(latitude, longitude, coordinate.altitude(), coordinate.datum())?;
        self.change_datum(&geodetic, datum)
    }

    /// Move a geodetic coordinate onto another datum; altitude is kept as is
    pub fn change_datum(&self, coordinate: &GeodeticCoordinate, datum: Datum) -> GeoResult<GeodeticCoordinate> {
        let source = coordinate.datum();
        if source == datum {
            return Ok(*coordinate);
        }

        let from = self.datums.get(source)?;
        let to = self.datums.get(datum)?;
        let (to_wgs84, from_wgs84) = self.datums.shift(source, datum)?;

        let xyz = geodetic_to_ecef(
            &from.ellipsoid,
            coordinate.latitude(),
            coordinate.longitude(),
            coordinate.altitude(),
        );
        let xyz = apply_shift(&to_wgs84, &from_wgs84, xyz);
        let (latitude, longitude, _) = ecef_to_geodetic(&to.ellipsoid, xyz);

        debug!(
            "Datum shift {} -> {}: {:.8},{:.8} -> {:.8},{:.8}",
            source,
            datum,
            coordinate.latitude(),
            coordinate.longitude(),
            latitude,
            longitude
        );

        GeodeticCoordinate::new(latitude.clamp(-90.0, 90.0), longitude, coordinate.altitude(), datum)
    }
}

impl Default for CoordinateConverter {
    fn default() -> Self {
        Self::with_builtin_datums()
    }
}

fn apply_shift(to_wgs84: &HelmertParams, from_wgs84: &HelmertParams, xyz: [f64; 3]) -> [f64; 3] {
    from_wgs84.apply(to_wgs84.apply(xyz))
}
