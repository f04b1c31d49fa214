//! Pixel model
//!
//! Gray, RGB and RGBA pixels parameterized by channel type, with indexed
//! component access and conversion between any two pixel types.

mod raw;
mod shape;
mod types;

pub use self::raw::RawPixel;
pub use self::shape::PixelShape;
pub use self::types::{Pixel, PixelGray, PixelRgb, PixelRgba};

use crate::channel::{range_cast, Channel, ChanU16, ChanU8};

/// 8-bit grayscale pixel
pub type Gray8 = PixelGray<ChanU8>;
/// 16-bit grayscale pixel
pub type Gray16 = PixelGray<ChanU16>;
/// 8-bit RGB pixel
pub type Rgb8 = PixelRgb<ChanU8>;
/// 16-bit RGB pixel
pub type Rgb16 = PixelRgb<ChanU16>;
/// 8-bit RGBA pixel
pub type Rgba8 = PixelRgba<ChanU8>;

/// Convert a pixel into another pixel type
///
/// Every channel is range-cast into the output channel type first, then the
/// shape is adapted: gray is replicated into color, color is reduced to gray
/// by an unweighted mean of R, G and B, and a missing alpha becomes opaque.
pub fn pixel_cast<I: Pixel, O: Pixel>(input: &I) -> O {
    let mut converted = [O::Chan::default(); 4];
    for (slot, channel) in converted.iter_mut().zip(input.components()) {
        *slot = range_cast::<I::Chan, O::Chan>(*channel);
    }
    O::from_shape(I::SHAPE, &converted[..I::SHAPE.channels()])
}

/// Smallest and largest component of a pixel, as floating point
pub fn component_bounds<P: Pixel>(pixel: &P) -> (f64, f64) {
    pixel
        .components()
        .iter()
        .map(|c| c.to_f64())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| (lo.min(v), hi.max(v)))
}
