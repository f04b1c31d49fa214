//! Custom error types for pixel, image and coordinate processing

use std::fmt;
use std::io;

/// Error kinds reported by terrakit operations
///
/// Every variant is recoverable and reported to the immediate caller.
#[derive(Debug)]
pub enum GeoError {
    /// I/O error
    IoError(io::Error),
    /// Index or coordinate outside the valid bounds of an image or buffer
    OutOfRange(String),
    /// Operation on a zero-sized or not-yet-opened resource
    Uninitialized(String),
    /// Disk resource could not find its file
    FileNotFound(String),
    /// No registered driver can handle the file
    DriverNotFound(String),
    /// UTM zone outside [1, 60]
    InvalidZone(i32),
    /// Conversion path (datum pair, coordinate type pair) not implemented
    NotSupported(String),
    /// Output format cannot be inferred from a pathname
    UnknownExtension(String),
    /// Value present but not convertible to the requested type
    TypeConversion(String),
    /// Malformed textual input (coordinates, headers, config)
    ParseError(String),
    /// Generic error with message
    GenericError(String),
}

impl fmt::Display for GeoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GeoError::IoError(e) => write!(f, "I/O error: {}", e),
            GeoError::OutOfRange(msg) => write!(f, "Out of range: {}", msg),
            GeoError::Uninitialized(msg) => write!(f, "Uninitialized resource: {}", msg),
            GeoError::FileNotFound(path) => write!(f, "File not found: {}", path),
            GeoError::DriverNotFound(path) => write!(f, "No driver found for: {}", path),
            GeoError::InvalidZone(zone) => write!(f, "Invalid UTM zone: {} (must be 1-60)", zone),
            GeoError::NotSupported(msg) => write!(f, "Not supported: {}", msg),
            GeoError::UnknownExtension(path) => write!(f, "Unknown output extension: {}", path),
            GeoError::TypeConversion(msg) => write!(f, "Type conversion failed: {}", msg),
            GeoError::ParseError(msg) => write!(f, "Parse error: {}", msg),
            GeoError::GenericError(msg) => write!(f, "Error: {}", msg),
        }
    }
}

impl std::error::Error for GeoError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            GeoError::IoError(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for GeoError {
    fn from(error: io::Error) -> Self {
        GeoError::IoError(error)
    }
}

impl From<String> for GeoError {
    fn from(msg: String) -> Self {
        GeoError::GenericError(msg)
    }
}

/// Result type for terrakit operations
pub type GeoResult<T> = Result<T, GeoError>;
