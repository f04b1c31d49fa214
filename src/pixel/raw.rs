//! Runtime-typed pixels exchanged with decode drivers

use crate::channel::{range_cast_value, Channel, ChannelKind};
use crate::errors::{GeoError, GeoResult};

use super::shape::PixelShape;
use super::types::Pixel;

/// A pixel whose shape and channel kind are only known at run time
///
/// Drivers decode file samples into `RawPixel`s; typed resources cast them
/// into their own pixel type through the channel dispatch table.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RawPixel {
    pub shape: PixelShape,
    pub kind: ChannelKind,
    values: [f64; 4],
}

impl RawPixel {
    /// Create a raw pixel from samples in `kind`'s range
    pub fn new(shape: PixelShape, kind: ChannelKind, samples: &[f64]) -> GeoResult<Self> {
        if samples.len() != shape.channels() {
            return Err(GeoError::GenericError(format!(
                "{} pixel needs {} samples, got {}",
                shape,
                shape.channels(),
                samples.len()
            )));
        }
        let mut values = [0.0; 4];
        for (slot, sample) in values.iter_mut().zip(samples) {
            *slot = kind.quantize(*sample);
        }
        Ok(RawPixel { shape, kind, values })
    }

    /// Capture a typed pixel
    pub fn from_pixel<P: Pixel>(pixel: &P) -> Self {
        let mut values = [0.0; 4];
        for (slot, channel) in values.iter_mut().zip(pixel.components()) {
            *slot = channel.to_f64();
        }
        RawPixel {
            shape: P::SHAPE,
            kind: <P::Chan as Channel>::KIND,
            values,
        }
    }

    /// Samples in layout order
    pub fn samples(&self) -> &[f64] {
        &self.values[..self.shape.channels()]
    }

    /// Convert into a typed pixel, rescaling channels and adapting the shape
    pub fn cast<P: Pixel>(&self) -> P {
        let dst_kind = <P::Chan as Channel>::KIND;
        let mut converted = [P::Chan::default(); 4];
        for (slot, sample) in converted.iter_mut().zip(self.samples()) {
            *slot = P::Chan::from_f64(range_cast_value(self.kind, dst_kind, *sample));
        }
        P::from_shape(self.shape, &converted[..self.shape.channels()])
    }

    /// Rescale into another channel kind and shape without a typed pixel
    pub fn convert(&self, shape: PixelShape, kind: ChannelKind) -> RawPixel {
        let mut scaled = [0.0; 4];
        for (slot, sample) in scaled.iter_mut().zip(self.samples()) {
            *slot = range_cast_value(self.kind, kind, *sample);
        }

        let values = match (self.shape, shape) {
            (from, to) if from == to => scaled,
            (PixelShape::Gray, PixelShape::Rgb) => [scaled[0], scaled[0], scaled[0], 0.0],
            (PixelShape::Gray, PixelShape::Rgba) => {
                [scaled[0], scaled[0], scaled[0], kind.max_value()]
            }
            (PixelShape::Rgb, PixelShape::Rgba) => [scaled[0], scaled[1], scaled[2], kind.max_value()],
            (PixelShape::Rgba, PixelShape::Rgb) => [scaled[0], scaled[1], scaled[2], 0.0],
            (_, PixelShape::Gray) => {
                let mean = (scaled[0] + scaled[1] + scaled[2]) / 3.0;
                let mean = if kind.is_integer() { mean.trunc() } else { mean };
                [mean, 0.0, 0.0, 0.0]
            }
            _ => scaled,
        };

        RawPixel { shape, kind, values }
    }
}
