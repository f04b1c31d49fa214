//! Datums, ellipsoids and the datum shift table

use std::collections::HashMap;
use std::fmt;
use std::fs;

use lazy_static::lazy_static;
use log::{debug, warn};

use crate::errors::{GeoError, GeoResult};

lazy_static! {
    // Parse the built-in table once
    static ref BUILTIN_DATUMS: DatumTable = {
        let content = include_str!("../../datums.toml");
        DatumTable::from_str(content).unwrap_or_else(|e| {
            eprintln!("Warning: Failed to parse built-in datum table: {}", e);
            DatumTable::empty()
        })
    };
}

/// Geodetic reference frame of a coordinate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Datum {
    WGS84,
    NAD83,
    NAD27,
    /// Geoid model on the WGS84 ellipsoid
    EGM96,
}

impl Datum {
    pub const ALL: [Datum; 4] = [Datum::WGS84, Datum::NAD83, Datum::NAD27, Datum::EGM96];

    pub fn name(&self) -> &'static str {
        match self {
            Datum::WGS84 => "WGS84",
            Datum::NAD83 => "NAD83",
            Datum::NAD27 => "NAD27",
            Datum::EGM96 => "EGM96",
        }
    }

    /// Parse a datum name, ignoring case and separators ("wgs-84", "WGS 84")
    pub fn from_name(name: &str) -> GeoResult<Self> {
        let normalized: String = name
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .collect::<String>()
            .to_uppercase();

        match normalized.as_str() {
            "WGS84" => Ok(Datum::WGS84),
            "NAD83" => Ok(Datum::NAD83),
            "NAD27" => Ok(Datum::NAD27),
            "EGM96" => Ok(Datum::EGM96),
            _ => Err(GeoError::ParseError(format!("Unknown datum: {}", name))),
        }
    }
}

impl Default for Datum {
    fn default() -> Self {
        Datum::WGS84
    }
}

impl fmt::Display for Datum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Reference ellipsoid
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ellipsoid {
    /// Semi-major axis in metres
    pub semi_major_axis: f64,
    pub inverse_flattening: f64,
}

impl Ellipsoid {
    pub fn new(semi_major_axis: f64, inverse_flattening: f64) -> Self {
        Ellipsoid { semi_major_axis, inverse_flattening }
    }

    pub fn flattening(&self) -> f64 {
        1.0 / self.inverse_flattening
    }

    /// First eccentricity squared
    pub fn eccentricity_squared(&self) -> f64 {
        let f = self.flattening();
        f * (2.0 - f)
    }

    /// Second eccentricity squared
    pub fn second_eccentricity_squared(&self) -> f64 {
        let e2 = self.eccentricity_squared();
        e2 / (1.0 - e2)
    }
}

/// Seven-parameter Helmert transform to WGS84 (position vector convention)
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct HelmertParams {
    /// Translations in metres
    pub tx: f64,
    pub ty: f64,
    pub tz: f64,
    /// Rotations in arc-seconds
    pub rx: f64,
    pub ry: f64,
    pub rz: f64,
    /// Scale difference in parts per million
    pub scale_ppm: f64,
}

impl HelmertParams {
    pub fn from_slice(values: &[f64]) -> GeoResult<Self> {
        if values.len() != 7 {
            return Err(GeoError::ParseError(format!(
                "Helmert transform needs 7 parameters, got {}",
                values.len()
            )));
        }
        Ok(HelmertParams {
            tx: values[0],
            ty: values[1],
            tz: values[2],
            rx: values[3],
            ry: values[4],
            rz: values[5],
            scale_ppm: values[6],
        })
    }

    /// Parameters of the reverse transform (small-angle approximation)
    pub fn inverse(&self) -> Self {
        HelmertParams {
            tx: -self.tx,
            ty: -self.ty,
            tz: -self.tz,
            rx: -self.rx,
            ry: -self.ry,
            rz: -self.rz,
            scale_ppm: -self.scale_ppm,
        }
    }

    /// Apply to an earth-centred earth-fixed position
    pub fn apply(&self, xyz: [f64; 3]) -> [f64; 3] {
        let arcsec = std::f64::consts::PI / (180.0 * 3600.0);
        let (rx, ry, rz) = (self.rx * arcsec, self.ry * arcsec, self.rz * arcsec);
        let m = 1.0 + self.scale_ppm * 1e-6;
        let [x, y, z] = xyz;

        [
            self.tx + m * (x - rz * y + ry * z),
            self.ty + m * (rz * x + y - rx * z),
            self.tz + m * (-ry * x + rx * y + z),
        ]
    }
}

/// Table entry for one datum
#[derive(Debug, Clone, PartialEq)]
pub struct DatumParameters {
    pub description: String,
    pub ellipsoid: Ellipsoid,
    /// Shift to WGS84; `None` means the datum cannot be shifted
    pub to_wgs84: Option<HelmertParams>,
}

/// Pluggable table of ellipsoid and shift parameters per datum
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DatumTable {
    entries: HashMap<Datum, DatumParameters>,
}

impl DatumTable {
    /// Table with no entries
    pub fn empty() -> Self {
        Self::default()
    }

    /// The built-in table
    pub fn builtin() -> Self {
        BUILTIN_DATUMS.clone()
    }

    /// Parse a datum table from TOML
    pub fn from_str(content: &str) -> GeoResult<Self> {
        let toml_value: toml::Table = content
            .parse()
            .map_err(|e| GeoError::ParseError(format!("Failed to parse datum TOML: {}", e)))?;

        let mut table = DatumTable::empty();
        let datums = match toml_value.get("datums").and_then(|v| v.as_table()) {
            Some(datums) => datums,
            None => return Ok(table),
        };

        for (name, entry) in datums {
            let datum = match Datum::from_name(name) {
                Ok(datum) => datum,
                Err(_) => {
                    warn!("Ignoring unknown datum '{}' in datum table", name);
                    continue;
                }
            };
            table.insert(datum, Self::parse_entry(name, entry)?);
        }

        debug!("Parsed {} datum table entries", table.entries.len());
        Ok(table)
    }

    /// Load a datum table from a TOML file
    pub fn from_file(path: &str) -> GeoResult<Self> {
        let contents = fs::read_to_string(path)?;
        Self::from_str(&contents)
    }

    fn parse_entry(name: &str, entry: &toml::Value) -> GeoResult<DatumParameters> {
        let number = |key: &str| -> GeoResult<f64> {
            entry
                .get(key)
                .and_then(toml_number)
                .ok_or_else(|| GeoError::ParseError(format!("Datum {} is missing {}", name, key)))
        };

        let ellipsoid = Ellipsoid::new(number("semi_major_axis")?, number("inverse_flattening")?);
        let description = entry
            .get("description")
            .and_then(|v| v.as_str())
            .unwrap_or(name)
            .to_string();

        let to_wgs84 = match entry.get("to_wgs84").and_then(|v| v.as_array()) {
            Some(values) => {
                let values: Vec<f64> = values.iter().filter_map(toml_number).collect();
                Some(HelmertParams::from_slice(&values)?)
            }
            None => None,
        };

        Ok(DatumParameters { description, ellipsoid, to_wgs84 })
    }

    /// Add or replace a datum's parameters
    pub fn insert(&mut self, datum: Datum, parameters: DatumParameters) {
        self.entries.insert(datum, parameters);
    }

    /// Overlay another table's entries onto this one
    pub fn merge(&mut self, other: DatumTable) {
        self.entries.extend(other.entries);
    }

    /// Parameters for a datum, `NotSupported` when the table has none
    pub fn get(&self, datum: Datum) -> GeoResult<&DatumParameters> {
        self.entries
            .get(&datum)
            .ok_or_else(|| GeoError::NotSupported(format!("no parameters for datum {}", datum)))
    }

    /// Helmert transform from one datum to another, composed through WGS84
    pub fn shift(&self, from: Datum, to: Datum) -> GeoResult<(HelmertParams, HelmertParams)> {
        let unsupported = || GeoError::NotSupported(format!("datum shift from {} to {}", from, to));
        let forward = self.get(from)?.to_wgs84.ok_or_else(unsupported)?;
        let reverse = self.get(to)?.to_wgs84.ok_or_else(unsupported)?.inverse();
        Ok((forward, reverse))
    }
}

fn toml_number(value: &toml::Value) -> Option<f64> {
    value.as_float().or_else(|| value.as_integer().map(|i| i as f64))
}
