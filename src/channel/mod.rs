//! Channel type model
//!
//! This module defines the numeric channel kinds a pixel component can take
//! and the range-preserving cast between any two of them.

mod kind;
mod types;

pub use self::kind::{range_cast_value, ChannelKind};
pub use self::types::{ChanF01, ChanFree, ChanU12, ChanU14, ChanU16, ChanU32, ChanU8, Channel};

/// Rescale a typed channel value into another channel type's range
///
/// Integer destinations round to the nearest value, ties rounding up.
pub fn range_cast<S: Channel, D: Channel>(value: S) -> D {
    D::from_f64(range_cast_value(S::KIND, D::KIND, value.to_f64()))
}
