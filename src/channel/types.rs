//! Typed channel values
//!
//! Each channel type fixes its `ChannelKind`, minimum and maximum at the type
//! level. Constructors clamp, so a channel built through this API always lies
//! inside its kind's range.

use std::fmt;

use super::kind::ChannelKind;

/// A single numeric pixel component with a type-level range
pub trait Channel:
    Copy + Clone + PartialEq + PartialOrd + fmt::Debug + Default + Send + Sync + 'static
{
    /// Kind descriptor for this channel type
    const KIND: ChannelKind;

    /// Read the channel as a floating point value
    fn to_f64(self) -> f64;

    /// Build a channel from a floating point value
    ///
    /// The value is clamped into range; integer kinds truncate toward zero.
    fn from_f64(value: f64) -> Self;

    /// Smallest representable channel value
    fn min_value() -> Self {
        Self::from_f64(Self::KIND.min_value())
    }

    /// Largest representable channel value
    fn max_value() -> Self {
        Self::from_f64(Self::KIND.max_value())
    }
}

macro_rules! integer_channel {
    ($(#[$doc:meta])* $name:ident, $storage:ty, $kind:expr, $max:expr) => {
        $(#[$doc])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
        pub struct $name($storage);

        impl $name {
            /// Create a channel, clamping to the kind's maximum
            pub fn new(value: $storage) -> Self {
                $name(value.min($max))
            }

            /// Raw stored value
            pub fn value(&self) -> $storage {
                self.0
            }
        }

        impl Channel for $name {
            const KIND: ChannelKind = $kind;

            fn to_f64(self) -> f64 {
                self.0 as f64
            }

            fn from_f64(value: f64) -> Self {
                if value.is_nan() {
                    return $name(0);
                }
                $name(value.clamp(0.0, $max as f64) as $storage)
            }
        }

        impl From<$name> for f64 {
            fn from(channel: $name) -> f64 {
                channel.to_f64()
            }
        }
    };
}

integer_channel!(
    /// 8-bit unsigned channel
    ChanU8, u8, ChannelKind::UInt8, u8::MAX
);
integer_channel!(
    /// 12-bit unsigned channel stored in 16 bits
    ChanU12, u16, ChannelKind::UInt12, 4095u16
);
integer_channel!(
    /// 14-bit unsigned channel stored in 16 bits
    ChanU14, u16, ChannelKind::UInt14, 16383u16
);
integer_channel!(
    /// 16-bit unsigned channel
    ChanU16, u16, ChannelKind::UInt16, u16::MAX
);
integer_channel!(
    /// 32-bit unsigned channel
    ChanU32, u32, ChannelKind::UInt32, u32::MAX
);

/// Floating point channel normalized to [0, 1]
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default)]
pub struct ChanF01(f64);

impl ChanF01 {
    /// Create a channel, clamping into [0, 1]
    pub fn new(value: f64) -> Self {
        Self::from_f64(value)
    }

    /// Raw stored value
    pub fn value(&self) -> f64 {
        self.0
    }
}

impl Channel for ChanF01 {
    const KIND: ChannelKind = ChannelKind::Float01;

    fn to_f64(self) -> f64 {
        self.0
    }

    fn from_f64(value: f64) -> Self {
        if value.is_nan() {
            return ChanF01(0.0);
        }
        ChanF01(value.clamp(0.0, 1.0))
    }
}

/// Unconstrained floating point channel (elevations, raw measurements)
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default)]
pub struct ChanFree(f64);

impl ChanFree {
    pub fn new(value: f64) -> Self {
        ChanFree(value)
    }

    pub fn value(&self) -> f64 {
        self.0
    }
}

impl Channel for ChanFree {
    const KIND: ChannelKind = ChannelKind::FloatFree;

    fn to_f64(self) -> f64 {
        self.0
    }

    fn from_f64(value: f64) -> Self {
        ChanFree(value)
    }
}
