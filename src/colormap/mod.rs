//! Color maps for rendering single-band rasters
//!
//! Maps gray sample values to RGB colors, either as an interpolated ramp or by
//! exact/nearest entry lookup. Entries are read from simple CSV files.

mod entry;
mod map;

pub use entry::{ColorMapEntry, RgbColor};
pub use map::{ColorMap, ColorMapMode};
