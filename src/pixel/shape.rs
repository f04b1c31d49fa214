//! Pixel shape descriptors

use std::fmt;

use crate::errors::{GeoError, GeoResult};

/// Channel layout of a pixel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PixelShape {
    /// One luminance channel
    Gray,
    /// Red, green, blue
    Rgb,
    /// Red, green, blue, alpha
    Rgba,
}

impl PixelShape {
    /// Number of channels in this layout
    pub fn channels(&self) -> usize {
        match self {
            PixelShape::Gray => 1,
            PixelShape::Rgb => 3,
            PixelShape::Rgba => 4,
        }
    }

    /// Whether the layout carries an alpha channel
    pub fn has_alpha(&self) -> bool {
        *self == PixelShape::Rgba
    }

    /// Layout for a given channel count
    pub fn from_channels(channels: usize) -> GeoResult<Self> {
        match channels {
            1 => Ok(PixelShape::Gray),
            3 => Ok(PixelShape::Rgb),
            4 => Ok(PixelShape::Rgba),
            n => Err(GeoError::NotSupported(format!("{} channel pixels", n))),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            PixelShape::Gray => "gray",
            PixelShape::Rgb => "rgb",
            PixelShape::Rgba => "rgba",
        }
    }
}

impl fmt::Display for PixelShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}
