//! Gray, RGB and RGBA pixel types

use std::fmt;
use std::ops::Index;

use crate::channel::Channel;
use crate::errors::{GeoError, GeoResult};

use super::shape::PixelShape;

/// A fixed-shape tuple of channel values of a single kind
pub trait Pixel: Copy + Clone + PartialEq + fmt::Debug + Default + Send + Sync + 'static {
    /// Channel type of every component
    type Chan: Channel;

    /// Channel layout
    const SHAPE: PixelShape;

    /// All components in layout order
    fn components(&self) -> &[Self::Chan];

    /// Build a pixel from components laid out in `source` shape
    ///
    /// The components must already be in this pixel's channel type; the
    /// caller converts them first. This is where shape conversion happens:
    /// gray is replicated, color is averaged, alpha defaults to opaque.
    fn from_shape(source: PixelShape, components: &[Self::Chan]) -> Self;

    /// Number of channels
    fn channels() -> usize {
        Self::SHAPE.channels()
    }

    /// Component at `index`, failing with `OutOfRange` past the last channel
    fn component(&self, index: usize) -> GeoResult<Self::Chan> {
        self.components().get(index).copied().ok_or_else(|| {
            GeoError::OutOfRange(format!(
                "channel {} of a {} pixel",
                index,
                Self::SHAPE
            ))
        })
    }

    /// Replace the component at `index`
    fn set_component(&mut self, index: usize, value: Self::Chan) -> GeoResult<()>;
}

/// Unweighted mean of the first three components
fn mean_of_three<C: Channel>(components: &[C]) -> C {
    let sum: f64 = components.iter().take(3).map(|c| c.to_f64()).sum();
    C::from_f64(sum / 3.0)
}

fn component_slot<C>(channels: &mut [C], index: usize, shape: PixelShape) -> GeoResult<&mut C> {
    channels.get_mut(index).ok_or_else(|| {
        GeoError::OutOfRange(format!("channel {} of a {} pixel", index, shape))
    })
}

/// Single channel grayscale pixel
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PixelGray<C: Channel> {
    channels: [C; 1],
}

impl<C: Channel> PixelGray<C> {
    pub fn new(value: C) -> Self {
        PixelGray { channels: [value] }
    }

    pub fn gray(&self) -> C {
        self.channels[0]
    }
}

impl<C: Channel> Pixel for PixelGray<C> {
    type Chan = C;
    const SHAPE: PixelShape = PixelShape::Gray;

    fn components(&self) -> &[C] {
        &self.channels
    }

    fn from_shape(source: PixelShape, components: &[C]) -> Self {
        match source {
            PixelShape::Gray => PixelGray::new(components[0]),
            PixelShape::Rgb | PixelShape::Rgba => PixelGray::new(mean_of_three(components)),
        }
    }

    fn set_component(&mut self, index: usize, value: C) -> GeoResult<()> {
        *component_slot(&mut self.channels, index, Self::SHAPE)? = value;
        Ok(())
    }
}

/// Red, green, blue pixel
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PixelRgb<C: Channel> {
    channels: [C; 3],
}

impl<C: Channel> PixelRgb<C> {
    pub fn new(r: C, g: C, b: C) -> Self {
        PixelRgb { channels: [r, g, b] }
    }

    pub fn r(&self) -> C {
        self.channels[0]
    }

    pub fn g(&self) -> C {
        self.channels[1]
    }

    pub fn b(&self) -> C {
        self.channels[2]
    }
}

impl<C: Channel> Pixel for PixelRgb<C> {
    type Chan = C;
    const SHAPE: PixelShape = PixelShape::Rgb;

    fn components(&self) -> &[C] {
        &self.channels
    }

    fn from_shape(source: PixelShape, components: &[C]) -> Self {
        match source {
            PixelShape::Gray => PixelRgb::new(components[0], components[0], components[0]),
            PixelShape::Rgb | PixelShape::Rgba => {
                PixelRgb::new(components[0], components[1], components[2])
            }
        }
    }

    fn set_component(&mut self, index: usize, value: C) -> GeoResult<()> {
        *component_slot(&mut self.channels, index, Self::SHAPE)? = value;
        Ok(())
    }
}

/// Red, green, blue, alpha pixel
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PixelRgba<C: Channel> {
    channels: [C; 4],
}

impl<C: Channel> PixelRgba<C> {
    pub fn new(r: C, g: C, b: C, a: C) -> Self {
        PixelRgba { channels: [r, g, b, a] }
    }

    /// Fully opaque pixel
    pub fn opaque(r: C, g: C, b: C) -> Self {
        PixelRgba::new(r, g, b, C::max_value())
    }

    pub fn r(&self) -> C {
        self.channels[0]
    }

    pub fn g(&self) -> C {
        self.channels[1]
    }

    pub fn b(&self) -> C {
        self.channels[2]
    }

    pub fn a(&self) -> C {
        self.channels[3]
    }
}

impl<C: Channel> Pixel for PixelRgba<C> {
    type Chan = C;
    const SHAPE: PixelShape = PixelShape::Rgba;

    fn components(&self) -> &[C] {
        &self.channels
    }

    fn from_shape(source: PixelShape, components: &[C]) -> Self {
        match source {
            PixelShape::Gray => PixelRgba::opaque(components[0], components[0], components[0]),
            PixelShape::Rgb => PixelRgba::opaque(components[0], components[1], components[2]),
            PixelShape::Rgba => {
                PixelRgba::new(components[0], components[1], components[2], components[3])
            }
        }
    }

    fn set_component(&mut self, index: usize, value: C) -> GeoResult<()> {
        *component_slot(&mut self.channels, index, Self::SHAPE)? = value;
        Ok(())
    }
}

impl<C: Channel> Index<usize> for PixelGray<C> {
    type Output = C;

    fn index(&self, index: usize) -> &C {
        &self.channels[index]
    }
}

impl<C: Channel> Index<usize> for PixelRgb<C> {
    type Output = C;

    fn index(&self, index: usize) -> &C {
        &self.channels[index]
    }
}

impl<C: Channel> Index<usize> for PixelRgba<C> {
    type Output = C;

    fn index(&self, index: usize) -> &C {
        &self.channels[index]
    }
}
