//! Runtime channel kind descriptors
//!
//! `ChannelKind` is the closed set of channel representations. Typed channels
//! carry their kind as an associated constant; drivers that only learn the kind
//! when a file is opened use this enum and the dispatch functions below.

use std::fmt;

use crate::errors::{GeoError, GeoResult};

/// The numeric representation of a single pixel channel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChannelKind {
    /// 8-bit unsigned integer, [0, 255]
    UInt8,
    /// 12-bit unsigned integer, [0, 4095]
    UInt12,
    /// 14-bit unsigned integer, [0, 16383]
    UInt14,
    /// 16-bit unsigned integer, [0, 65535]
    UInt16,
    /// 32-bit unsigned integer, [0, 4294967295]
    UInt32,
    /// Normalized floating point, [0, 1]
    Float01,
    /// Unconstrained floating point, passed through without rescaling
    FloatFree,
}

impl ChannelKind {
    /// All kinds, in declaration order
    pub const ALL: [ChannelKind; 7] = [
        ChannelKind::UInt8,
        ChannelKind::UInt12,
        ChannelKind::UInt14,
        ChannelKind::UInt16,
        ChannelKind::UInt32,
        ChannelKind::Float01,
        ChannelKind::FloatFree,
    ];

    /// Smallest representable value
    pub fn min_value(&self) -> f64 {
        match self {
            ChannelKind::FloatFree => f64::MIN,
            _ => 0.0,
        }
    }

    /// Largest representable value
    pub fn max_value(&self) -> f64 {
        match self {
            ChannelKind::UInt8 => 255.0,
            ChannelKind::UInt12 => 4095.0,
            ChannelKind::UInt14 => 16383.0,
            ChannelKind::UInt16 => 65535.0,
            ChannelKind::UInt32 => 4_294_967_295.0,
            ChannelKind::Float01 => 1.0,
            ChannelKind::FloatFree => f64::MAX,
        }
    }

    /// Number of significant bits for integer kinds, 64 for floating point
    pub fn bit_depth(&self) -> u32 {
        match self {
            ChannelKind::UInt8 => 8,
            ChannelKind::UInt12 => 12,
            ChannelKind::UInt14 => 14,
            ChannelKind::UInt16 => 16,
            ChannelKind::UInt32 => 32,
            ChannelKind::Float01 | ChannelKind::FloatFree => 64,
        }
    }

    /// Whether values of this kind are integers
    pub fn is_integer(&self) -> bool {
        !matches!(self, ChannelKind::Float01 | ChannelKind::FloatFree)
    }

    /// Whether this kind has a finite range that participates in rescaling
    pub fn is_bounded(&self) -> bool {
        *self != ChannelKind::FloatFree
    }

    /// Short lowercase name used in CLI options and logs
    pub fn name(&self) -> &'static str {
        match self {
            ChannelKind::UInt8 => "uint8",
            ChannelKind::UInt12 => "uint12",
            ChannelKind::UInt14 => "uint14",
            ChannelKind::UInt16 => "uint16",
            ChannelKind::UInt32 => "uint32",
            ChannelKind::Float01 => "float01",
            ChannelKind::FloatFree => "float",
        }
    }

    /// Parse a kind from its short name
    pub fn from_name(name: &str) -> GeoResult<Self> {
        match name.trim().to_lowercase().as_str() {
            "uint8" | "u8" | "8" => Ok(ChannelKind::UInt8),
            "uint12" | "u12" | "12" => Ok(ChannelKind::UInt12),
            "uint14" | "u14" | "14" => Ok(ChannelKind::UInt14),
            "uint16" | "u16" | "16" => Ok(ChannelKind::UInt16),
            "uint32" | "u32" | "32" => Ok(ChannelKind::UInt32),
            "float01" | "f01" => Ok(ChannelKind::Float01),
            "float" | "floatfree" | "f64" => Ok(ChannelKind::FloatFree),
            other => Err(GeoError::ParseError(format!("Unknown channel kind: {}", other))),
        }
    }

    /// Smallest integer kind able to hold a NETPBM-style `maxval`
    pub fn for_max_sample(max_sample: u32) -> Self {
        match max_sample {
            0..=255 => ChannelKind::UInt8,
            256..=4095 => ChannelKind::UInt12,
            4096..=16383 => ChannelKind::UInt14,
            16384..=65535 => ChannelKind::UInt16,
            _ => ChannelKind::UInt32,
        }
    }

    /// Clamp a value into this kind's range, rounding half up for integer kinds
    pub fn quantize(&self, value: f64) -> f64 {
        if value.is_nan() {
            return 0.0;
        }
        let value = if self.is_integer() { (value + 0.5).floor() } else { value };
        value.clamp(self.min_value(), self.max_value())
    }
}

impl fmt::Display for ChannelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Rescale a raw value from one channel kind's range into another's
///
/// Casting a kind to itself is an identity. `FloatFree` on either side is a
/// pass-through: the value is only clamped (and rounded) into the destination.
pub fn range_cast_value(src: ChannelKind, dst: ChannelKind, value: f64) -> f64 {
    if src == dst {
        return value;
    }

    if !src.is_bounded() || !dst.is_bounded() {
        return dst.quantize(value);
    }

    let src_span = src.max_value() - src.min_value();
    let dst_span = dst.max_value() - dst.min_value();
    let scaled = dst.min_value() + (value - src.min_value()) * dst_span / src_span;

    dst.quantize(scaled)
}
