//! Colors and colormap entries

use crate::channel::ChanU8;
use crate::errors::{GeoError, GeoResult};
use crate::pixel::Rgb8;

/// Simple RGB color representation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct RgbColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl RgbColor {
    pub fn new(r: u8, g: u8, b: u8) -> Self {
        RgbColor { r, g, b }
    }

    /// Convert to hex string (#rrggbb)
    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Create from a hex string, with or without the # prefix
    pub fn from_hex(hex: &str) -> GeoResult<Self> {
        let digits = hex.trim().trim_start_matches('#');

        if digits.len() != 6 || !digits.is_ascii() {
            return Err(GeoError::ParseError(format!(
                "Invalid hex color code: {} - must be 6 hexadecimal digits",
                hex
            )));
        }

        let r = parse_hex_component(&digits[0..2], hex)?;
        let g = parse_hex_component(&digits[2..4], hex)?;
        let b = parse_hex_component(&digits[4..6], hex)?;

        Ok(RgbColor { r, g, b })
    }

    /// Linear blend towards `other`, `t` in [0, 1]
    pub fn lerp(&self, other: &RgbColor, t: f64) -> RgbColor {
        let t = t.clamp(0.0, 1.0);
        let mix = |a: u8, b: u8| (a as f64 * (1.0 - t) + b as f64 * t).round() as u8;
        RgbColor::new(mix(self.r, other.r), mix(self.g, other.g), mix(self.b, other.b))
    }

    pub fn to_pixel(&self) -> Rgb8 {
        Rgb8::new(ChanU8::new(self.r), ChanU8::new(self.g), ChanU8::new(self.b))
    }
}

fn parse_hex_component(hex_part: &str, full_hex: &str) -> GeoResult<u8> {
    u8::from_str_radix(hex_part, 16)
        .map_err(|_| GeoError::ParseError(format!("Invalid hex color: {}", full_hex)))
}

/// A value and the color it maps to
#[derive(Debug, Clone, PartialEq)]
pub struct ColorMapEntry {
    pub value: f64,
    pub label: Option<String>,
    pub color: RgbColor,
}

impl ColorMapEntry {
    pub fn new(value: f64, color: RgbColor) -> Self {
        ColorMapEntry { value, label: None, color }
    }

    pub fn with_label(value: f64, color: RgbColor, label: String) -> Self {
        ColorMapEntry { value, label: Some(label), color }
    }

    /// Parse one CSV line already split on commas
    ///
    /// Accepted layouts: `value,#rrggbb`, `value,#rrggbb,label`,
    /// `value,r,g,b` and `value,r,g,b,label`.
    pub fn from_csv_parts(parts: &[&str]) -> Option<ColorMapEntry> {
        let value = parts.first()?.parse::<f64>().ok()?;
        if !value.is_finite() {
            return None;
        }

        match parts.len() {
            2 => Some(ColorMapEntry::new(value, RgbColor::from_hex(parts[1]).ok()?)),
            3 => {
                let color = RgbColor::from_hex(parts[1]).ok()?;
                Some(ColorMapEntry::with_label(value, color, parts[2].to_string()))
            }
            4 | 5 => {
                let r = parts[1].parse::<u8>().ok()?;
                let g = parts[2].parse::<u8>().ok()?;
                let b = parts[3].parse::<u8>().ok()?;
                let color = RgbColor::new(r, g, b);
                match parts.get(4) {
                    Some(label) => Some(ColorMapEntry::with_label(value, color, label.to_string())),
                    None => Some(ColorMapEntry::new(value, color)),
                }
            }
            _ => None,
        }
    }
}
