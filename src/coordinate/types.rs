//! Geodetic and UTM coordinate value types

use std::fmt;
use std::str::FromStr;

use lazy_static::lazy_static;
use regex::Regex;

use crate::errors::{GeoError, GeoResult};

use super::crs::CoordinateSystem;
use super::datum::Datum;

const NUMBER: &str = r"[-+]?(?:\d+\.?\d*|\.\d+)(?:[eE][-+]?\d+)?";

lazy_static! {
    static ref GEODETIC_PATTERN: Regex = Regex::new(&format!(
        r"^\s*({n})\s*,\s*({n})\s*(?:,\s*({n})\s*)?$",
        n = NUMBER
    ))
    .unwrap_or_else(|e| panic!("invalid geodetic pattern: {}", e));
    static ref UTM_PATTERN: Regex = Regex::new(&format!(
        r"^\s*(\d{{1,3}})\s*([NnSs])[\s,]+({n})[\s,]+({n})(?:[\s,]+({n}))?\s*$",
        n = NUMBER
    ))
    .unwrap_or_else(|e| panic!("invalid UTM pattern: {}", e));
}

/// Runtime tag for the coordinate variants
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoordinateType {
    Geodetic,
    Utm,
}

impl fmt::Display for CoordinateType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CoordinateType::Geodetic => write!(f, "Geodetic"),
            CoordinateType::Utm => write!(f, "UTM"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hemisphere {
    North,
    South,
}

impl Hemisphere {
    /// Hemisphere of a latitude; the equator counts as north
    pub fn from_latitude(latitude: f64) -> Self {
        if latitude < 0.0 {
            Hemisphere::South
        } else {
            Hemisphere::North
        }
    }

    pub fn letter(&self) -> char {
        match self {
            Hemisphere::North => 'N',
            Hemisphere::South => 'S',
        }
    }

    pub fn is_north(&self) -> bool {
        *self == Hemisphere::North
    }
}

/// Fields shared by every coordinate
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CoordinateBase {
    /// Height in metres
    pub altitude: f64,
    pub datum: Datum,
}

impl CoordinateBase {
    pub fn new(altitude: f64, datum: Datum) -> Self {
        CoordinateBase { altitude, datum }
    }
}

/// Wrap a longitude into (-180, 180]
pub fn normalize_longitude(longitude: f64) -> f64 {
    let mut lon = longitude % 360.0;
    if lon <= -180.0 {
        lon += 360.0;
    } else if lon > 180.0 {
        lon -= 360.0;
    }
    lon
}

fn check_finite(name: &str, value: f64) -> GeoResult<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(GeoError::OutOfRange(format!("{} must be finite, got {}", name, value)))
    }
}

fn check_latitude(latitude: f64) -> GeoResult<()> {
    check_finite("latitude", latitude)?;
    if !(-90.0..=90.0).contains(&latitude) {
        return Err(GeoError::OutOfRange(format!("latitude {} outside [-90, 90]", latitude)));
    }
    Ok(())
}

fn check_zone(zone: i32) -> GeoResult<()> {
    if (1..=60).contains(&zone) {
        Ok(())
    } else {
        Err(GeoError::InvalidZone(zone))
    }
}

fn parse_number(text: &str) -> GeoResult<f64> {
    text.parse::<f64>()
        .map_err(|e| GeoError::ParseError(format!("invalid number '{}': {}", text, e)))
}

/// Latitude/longitude in degrees on a datum
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeodeticCoordinate {
    base: CoordinateBase,
    latitude: f64,
    longitude: f64,
}

impl GeodeticCoordinate {
    /// Latitude must lie in [-90, 90]; longitude is wrapped into (-180, 180]
    pub fn new(latitude: f64, longitude: f64, altitude: f64, datum: Datum) -> GeoResult<Self> {
        check_latitude(latitude)?;
        check_finite("longitude", longitude)?;
        check_finite("altitude", altitude)?;
        Ok(GeodeticCoordinate {
            base: CoordinateBase::new(altitude, datum),
            latitude,
            longitude: normalize_longitude(longitude),
        })
    }

    /// Parse "lat,lon[,alt]" on the given datum
    pub fn parse_with_datum(text: &str, datum: Datum) -> GeoResult<Self> {
        let caps = GEODETIC_PATTERN.captures(text).ok_or_else(|| {
            GeoError::ParseError(format!("expected 'lat,lon[,alt]', got '{}'", text))
        })?;

        let latitude = parse_number(&caps[1])?;
        let longitude = parse_number(&caps[2])?;
        let altitude = match caps.get(3) {
            Some(m) => parse_number(m.as_str())?,
            None => 0.0,
        };
        Self::new(latitude, longitude, altitude, datum)
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    pub fn altitude(&self) -> f64 {
        self.base.altitude
    }

    pub fn datum(&self) -> Datum {
        self.base.datum
    }

    pub fn base(&self) -> &CoordinateBase {
        &self.base
    }

    /// Fails with `OutOfRange` and leaves the value untouched when invalid
    pub fn set_latitude(&mut self, latitude: f64) -> GeoResult<()> {
        check_latitude(latitude)?;
        self.latitude = latitude;
        Ok(())
    }

    pub fn set_longitude(&mut self, longitude: f64) -> GeoResult<()> {
        check_finite("longitude", longitude)?;
        self.longitude = normalize_longitude(longitude);
        Ok(())
    }

    pub fn set_altitude(&mut self, altitude: f64) -> GeoResult<()> {
        check_finite("altitude", altitude)?;
        self.base.altitude = altitude;
        Ok(())
    }

    /// Relabel the datum without moving the point
    pub fn set_datum(&mut self, datum: Datum) {
        self.base.datum = datum;
    }

    pub fn coordinate_system(&self) -> CoordinateSystem {
        CoordinateSystem::Geographic(self.datum())
    }
}

impl FromStr for GeodeticCoordinate {
    type Err = GeoError;

    /// Parse "lat,lon[,alt]" on WGS84
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_with_datum(s, Datum::WGS84)
    }
}

impl fmt::Display for GeodeticCoordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:.8}, {:.8}, {:.3} m ({})",
            self.latitude,
            self.longitude,
            self.altitude(),
            self.datum()
        )
    }
}

/// Universal Transverse Mercator position
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UtmCoordinate {
    base: CoordinateBase,
    zone: i32,
    hemisphere: Hemisphere,
    easting: f64,
    northing: f64,
}

impl UtmCoordinate {
    /// Zone must lie in [1, 60], otherwise `InvalidZone`
    pub fn new(
        zone: i32,
        hemisphere: Hemisphere,
        easting: f64,
        northing: f64,
        altitude: f64,
        datum: Datum,
    ) -> GeoResult<Self> {
        check_zone(zone)?;
        check_finite("easting", easting)?;
        check_finite("northing", northing)?;
        check_finite("altitude", altitude)?;
        Ok(UtmCoordinate {
            base: CoordinateBase::new(altitude, datum),
            zone,
            hemisphere,
            easting,
            northing,
        })
    }

    /// Parse "18N 323394 4307396 [alt]" on the given datum
    pub fn parse_with_datum(text: &str, datum: Datum) -> GeoResult<Self> {
        let caps = UTM_PATTERN.captures(text).ok_or_else(|| {
            GeoError::ParseError(format!(
                "expected 'zone[N|S] easting northing [alt]', got '{}'",
                text
            ))
        })?;

        let zone = caps[1]
            .parse::<i32>()
            .map_err(|e| GeoError::ParseError(format!("invalid zone '{}': {}", &caps[1], e)))?;
        let hemisphere = match &caps[2] {
            "S" | "s" => Hemisphere::South,
            _ => Hemisphere::North,
        };
        let easting = parse_number(&caps[3])?;
        let northing = parse_number(&caps[4])?;
        let altitude = match caps.get(5) {
            Some(m) => parse_number(m.as_str())?,
            None => 0.0,
        };
        Self::new(zone, hemisphere, easting, northing, altitude, datum)
    }

    pub fn zone(&self) -> i32 {
        self.zone
    }

    pub fn hemisphere(&self) -> Hemisphere {
        self.hemisphere
    }

    pub fn easting(&self) -> f64 {
        self.easting
    }

    pub fn northing(&self) -> f64 {
        self.northing
    }

    pub fn altitude(&self) -> f64 {
        self.base.altitude
    }

    pub fn datum(&self) -> Datum {
        self.base.datum
    }

    pub fn base(&self) -> &CoordinateBase {
        &self.base
    }

    pub fn set_zone(&mut self, zone: i32) -> GeoResult<()> {
        check_zone(zone)?;
        self.zone = zone;
        Ok(())
    }

    pub fn set_hemisphere(&mut self, hemisphere: Hemisphere) {
        self.hemisphere = hemisphere;
    }

    pub fn set_easting(&mut self, easting: f64) -> GeoResult<()> {
        check_finite("easting", easting)?;
        self.easting = easting;
        Ok(())
    }

    pub fn set_northing(&mut self, northing: f64) -> GeoResult<()> {
        check_finite("northing", northing)?;
        self.northing = northing;
        Ok(())
    }

    pub fn set_altitude(&mut self, altitude: f64) -> GeoResult<()> {
        check_finite("altitude", altitude)?;
        self.base.altitude = altitude;
        Ok(())
    }

    pub fn set_datum(&mut self, datum: Datum) {
        self.base.datum = datum;
    }

    pub fn coordinate_system(&self) -> CoordinateSystem {
        CoordinateSystem::Utm(self.zone, self.hemisphere, self.datum())
    }

    /// EPSG code of the zone (326zz / 327zz on WGS84)
    pub fn epsg_code(&self) -> Option<u32> {
        self.coordinate_system().epsg_code()
    }
}

impl FromStr for UtmCoordinate {
    type Err = GeoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_with_datum(s, Datum::WGS84)
    }
}

impl fmt::Display for UtmCoordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{} {:.3} {:.3}, {:.3} m ({})",
            self.zone,
            self.hemisphere.letter(),
            self.easting,
            self.northing,
            self.altitude(),
            self.datum()
        )
    }
}

/// Either coordinate variant, dispatched through `coordinate_type()`
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Coordinate {
    Geodetic(GeodeticCoordinate),
    Utm(UtmCoordinate),
}

impl Coordinate {
    pub fn coordinate_type(&self) -> CoordinateType {
        match self {
            Coordinate::Geodetic(_) => CoordinateType::Geodetic,
            Coordinate::Utm(_) => CoordinateType::Utm,
        }
    }

    pub fn datum(&self) -> Datum {
        match self {
            Coordinate::Geodetic(c) => c.datum(),
            Coordinate::Utm(c) => c.datum(),
        }
    }

    pub fn altitude(&self) -> f64 {
        match self {
            Coordinate::Geodetic(c) => c.altitude(),
            Coordinate::Utm(c) => c.altitude(),
        }
    }

    pub fn base(&self) -> &CoordinateBase {
        match self {
            Coordinate::Geodetic(c) => c.base(),
            Coordinate::Utm(c) => c.base(),
        }
    }

    pub fn coordinate_system(&self) -> CoordinateSystem {
        match self {
            Coordinate::Geodetic(c) => c.coordinate_system(),
            Coordinate::Utm(c) => c.coordinate_system(),
        }
    }

    pub fn as_geodetic(&self) -> Option<&GeodeticCoordinate> {
        match self {
            Coordinate::Geodetic(c) => Some(c),
            Coordinate::Utm(_) => None,
        }
    }

    pub fn as_utm(&self) -> Option<&UtmCoordinate> {
        match self {
            Coordinate::Utm(c) => Some(c),
            Coordinate::Geodetic(_) => None,
        }
    }
}

impl From<GeodeticCoordinate> for Coordinate {
    fn from(c: GeodeticCoordinate) -> Self {
        Coordinate::Geodetic(c)
    }
}

impl From<UtmCoordinate> for Coordinate {
    fn from(c: UtmCoordinate) -> Self {
        Coordinate::Utm(c)
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Coordinate::Geodetic(c) => c.fmt(f),
            Coordinate::Utm(c) => c.fmt(f),
        }
    }
}
