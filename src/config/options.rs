//! Runtime options loaded from TOML

use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, LevelFilter};

use crate::coordinate::{Datum, DatumTable};
use crate::errors::{GeoError, GeoResult};

/// Explicit configuration passed to the components that need it
#[derive(Debug, Clone, PartialEq)]
pub struct Options {
    /// Log file for the file logger; console logging only when absent
    pub log_file: Option<String>,
    pub log_level: LevelFilter,
    /// Datum assumed for coordinates given without one
    pub default_datum: Datum,
    /// Extra datum definitions merged over the built-in table
    pub datum_table_path: Option<PathBuf>,
    /// Extension used when an output path has none
    pub default_extension: String,
}

impl Default for Options {
    fn default() -> Self {
        Options {
            log_file: None,
            log_level: LevelFilter::Info,
            default_datum: Datum::WGS84,
            datum_table_path: None,
            default_extension: "ppm".to_string(),
        }
    }
}

impl Options {
    /// Parse options from a TOML string; missing keys keep their defaults
    pub fn from_str(content: &str) -> GeoResult<Self> {
        let toml_value: toml::Table = match content.parse() {
            Ok(value) => value,
            Err(e) => return Err(GeoError::ParseError(format!("Failed to parse TOML: {}", e))),
        };

        let mut options = Options::default();

        if let Some(logging) = toml_value.get("logging").and_then(|v| v.as_table()) {
            if let Some(file) = logging.get("file").and_then(|v| v.as_str()) {
                options.log_file = Some(file.to_string());
            }
            if let Some(level) = logging.get("level").and_then(|v| v.as_str()) {
                options.log_level = level
                    .parse::<LevelFilter>()
                    .map_err(|_| GeoError::ParseError(format!("Unknown log level: {}", level)))?;
            }
        }

        if let Some(coordinates) = toml_value.get("coordinates").and_then(|v| v.as_table()) {
            if let Some(datum) = coordinates.get("default_datum").and_then(|v| v.as_str()) {
                options.default_datum = Datum::from_name(datum)?;
            }
            if let Some(path) = coordinates.get("datum_table").and_then(|v| v.as_str()) {
                options.datum_table_path = Some(PathBuf::from(path));
            }
        }

        if let Some(image) = toml_value.get("image").and_then(|v| v.as_table()) {
            if let Some(ext) = image.get("default_extension").and_then(|v| v.as_str()) {
                options.default_extension = ext.trim_start_matches('.').to_lowercase();
            }
        }

        Ok(options)
    }

    /// Load options from a file; a relative datum table path is resolved
    /// against the file's directory
    pub fn from_file<P: AsRef<Path>>(path: P) -> GeoResult<Self> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(GeoError::FileNotFound(path.display().to_string()));
        }

        let mut options = Self::from_str(&fs::read_to_string(path)?)?;
        if let (Some(table), Some(dir)) = (options.datum_table_path.as_mut(), path.parent()) {
            if table.is_relative() {
                *table = dir.join(&*table);
            }
        }

        debug!("Loaded options from {}", path.display());
        Ok(options)
    }

    /// Built-in datum table with the configured override merged over it
    pub fn datum_table(&self) -> GeoResult<DatumTable> {
        let mut table = DatumTable::builtin();
        if let Some(path) = &self.datum_table_path {
            let content = fs::read_to_string(path).map_err(|e| match e.kind() {
                std::io::ErrorKind::NotFound => GeoError::FileNotFound(path.display().to_string()),
                _ => GeoError::IoError(e),
            })?;
            table.merge(DatumTable::from_str(&content)?);
            debug!("Merged datum table from {}", path.display());
        }
        Ok(table)
    }
}
