//! Decoded sample storage shared by the drivers

use crate::errors::{GeoError, GeoResult};
use crate::pixel::RawPixel;

use super::handler::DriverHeader;

/// Row-major interleaved samples of a decoded image
#[derive(Debug, Clone)]
pub(crate) struct SampleGrid {
    pub header: DriverHeader,
    samples: Vec<f64>,
}

/// Number of interleaved samples in an image, `ParseError` when it overflows
pub(crate) fn sample_count(header: &DriverHeader) -> GeoResult<usize> {
    header
        .rows
        .checked_mul(header.cols)
        .and_then(|pixels| pixels.checked_mul(header.shape.channels()))
        .ok_or_else(|| {
            GeoError::ParseError(format!(
                "Image size {}x{} {} overflows the sample count",
                header.cols, header.rows, header.shape
            ))
        })
}

impl SampleGrid {
    /// Zero-filled grid
    pub fn new(header: DriverHeader) -> GeoResult<Self> {
        let len = sample_count(&header)?;
        Ok(SampleGrid { header, samples: vec![0.0; len] })
    }

    /// Grid over already decoded samples
    pub fn from_samples(header: DriverHeader, samples: Vec<f64>) -> GeoResult<Self> {
        let expected = sample_count(&header)?;
        if samples.len() != expected {
            return Err(GeoError::GenericError(format!(
                "Expected {} samples for a {}x{} {} image, decoded {}",
                expected, header.cols, header.rows, header.shape, samples.len()
            )));
        }
        Ok(SampleGrid { header, samples })
    }

    pub fn samples(&self) -> &[f64] {
        &self.samples
    }

    fn offset(&self, row: usize, col: usize) -> GeoResult<usize> {
        if self.header.rows == 0 || self.header.cols == 0 {
            return Err(GeoError::Uninitialized("driver holds an empty image".to_string()));
        }
        if row >= self.header.rows || col >= self.header.cols {
            return Err(GeoError::OutOfRange(format!(
                "pixel ({}, {}) outside {}x{} image",
                row, col, self.header.rows, self.header.cols
            )));
        }
        Ok((row * self.header.cols + col) * self.header.shape.channels())
    }

    pub fn get(&self, row: usize, col: usize) -> GeoResult<RawPixel> {
        let start = self.offset(row, col)?;
        let end = start + self.header.shape.channels();
        RawPixel::new(self.header.shape, self.header.kind, &self.samples[start..end])
    }

    pub fn set(&mut self, row: usize, col: usize, pixel: &RawPixel) -> GeoResult<()> {
        let start = self.offset(row, col)?;
        let converted = pixel.convert(self.header.shape, self.header.kind);
        for (slot, sample) in self.samples[start..].iter_mut().zip(converted.samples()) {
            *slot = *sample;
        }
        Ok(())
    }
}
