//! File format utilities
//!
//! Helpers for inferring formats from pathnames and format names.

use std::path::Path;

use crate::channel::ChannelKind;
use crate::errors::{GeoError, GeoResult};
use crate::pixel::PixelShape;

/// Lowercase extension of a path, if it has one
pub fn extension_of(path: &Path) -> Option<String> {
    path.extension()
        .and_then(std::ffi::OsStr::to_str)
        .map(|ext| ext.to_lowercase())
        .filter(|ext| !ext.is_empty())
}

/// Extension of an output path, failing with `UnknownExtension` when absent
pub fn require_extension(path: &Path) -> GeoResult<String> {
    extension_of(path).ok_or_else(|| GeoError::UnknownExtension(path.display().to_string()))
}

/// Parse a pixel format such as `gray8`, `rgb16` or `rgba-float01`
pub fn parse_pixel_format(format: &str) -> GeoResult<(PixelShape, ChannelKind)> {
    let format = format.trim().to_lowercase();
    let split = format
        .find(|c: char| !c.is_ascii_alphabetic())
        .ok_or_else(|| GeoError::ParseError(format!("Pixel format needs a channel kind: {}", format)))?;
    let (shape, kind) = format.split_at(split);

    let shape = match shape {
        "gray" | "grey" | "l" => PixelShape::Gray,
        "rgb" => PixelShape::Rgb,
        "rgba" => PixelShape::Rgba,
        other => return Err(GeoError::ParseError(format!("Unknown pixel shape: {}", other))),
    };
    let kind = ChannelKind::from_name(kind.trim_start_matches(|c| c == '-' || c == '_'))?;
    Ok((shape, kind))
}
