//! Value-to-color mapping for gray images

use std::cmp::Ordering;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use log::{debug, info, warn};

use crate::channel::Channel;
use crate::errors::{GeoError, GeoResult};
use crate::image::Image;
use crate::pixel::{PixelGray, Rgb8};
use crate::utils::format_utils::extension_of;

use super::entry::{ColorMapEntry, RgbColor};

/// How values between entries are colored
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorMapMode {
    /// Linear interpolation between bracketing entries, clamped at the ends
    Ramp,
    /// Exact entry when present, otherwise the nearest entry
    Exact,
}

/// Sorted list of value/color entries
#[derive(Debug, Clone, PartialEq)]
pub struct ColorMap {
    entries: Vec<ColorMapEntry>,
    mode: ColorMapMode,
}

impl ColorMap {
    /// Create an empty ramp color map
    pub fn new() -> Self {
        ColorMap {
            entries: Vec::new(),
            mode: ColorMapMode::Ramp,
        }
    }

    pub fn with_mode(mode: ColorMapMode) -> Self {
        ColorMap { entries: Vec::new(), mode }
    }

    /// Add an entry, keeping entries sorted by value
    pub fn add_entry(&mut self, entry: ColorMapEntry) {
        let position = self
            .entries
            .partition_point(|e| e.value.partial_cmp(&entry.value) != Some(Ordering::Greater));
        self.entries.insert(position, entry);
    }

    pub fn entries(&self) -> &[ColorMapEntry] {
        &self.entries
    }

    pub fn mode(&self) -> ColorMapMode {
        self.mode
    }

    pub fn set_mode(&mut self, mode: ColorMapMode) {
        self.mode = mode;
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Read a color map from a CSV file
    pub fn from_csv_file<P: AsRef<Path>>(file_path: P) -> GeoResult<Self> {
        let path = file_path.as_ref();
        debug!("Reading color map from CSV file: {:?}", path);

        if !path.is_file() {
            return Err(GeoError::FileNotFound(path.display().to_string()));
        }
        let file = File::open(path)?;
        Self::from_csv_reader(BufReader::new(file))
    }

    /// Read a color map from a reader containing CSV content
    pub fn from_csv_reader<R: Read>(mut reader: R) -> GeoResult<Self> {
        let mut content = String::new();
        reader.read_to_string(&mut content)?;
        Self::from_csv_str(&content)
    }

    /// Parse CSV text; blank lines and `#` comments are skipped
    pub fn from_csv_str(content: &str) -> GeoResult<Self> {
        let mut colormap = ColorMap::new();

        for line in content.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let parts: Vec<&str> = line.split(',').map(|s| s.trim()).collect();
            match ColorMapEntry::from_csv_parts(&parts) {
                Some(entry) => colormap.add_entry(entry),
                None => warn!("Ignoring invalid CSV line: {}", line),
            }
        }

        if colormap.is_empty() {
            return Err(GeoError::ParseError("No valid color map entries found in CSV".to_string()));
        }

        debug!("Read {} entries from CSV", colormap.len());
        Ok(colormap)
    }

    /// Load a color map file, choosing the reader by extension
    pub fn from_file<P: AsRef<Path>>(file_path: P) -> GeoResult<Self> {
        let path = file_path.as_ref();
        match extension_of(path).as_deref() {
            Some("csv") | Some("txt") | None => Self::from_csv_file(path),
            Some(other) => Err(GeoError::UnknownExtension(format!(
                "color map format '{}' ({})",
                other,
                path.display()
            ))),
        }
    }

    /// Color for a value; black for an empty map
    pub fn color_for(&self, value: f64) -> RgbColor {
        let (first, last) = match (self.entries.first(), self.entries.last()) {
            (Some(first), Some(last)) => (first, last),
            _ => return RgbColor::default(),
        };

        if let Some(entry) = self.entries.iter().find(|e| e.value == value) {
            return entry.color;
        }

        match self.mode {
            ColorMapMode::Ramp => {
                if value.is_nan() || value <= first.value {
                    return first.color;
                }
                if value >= last.value {
                    return last.color;
                }
                let upper = self.entries.partition_point(|e| e.value <= value);
                let lower = &self.entries[upper - 1];
                let upper = &self.entries[upper];
                let t = (value - lower.value) / (upper.value - lower.value);
                lower.color.lerp(&upper.color, t)
            }
            ColorMapMode::Exact => self.nearest(value).color,
        }
    }

    fn nearest(&self, value: f64) -> &ColorMapEntry {
        let mut nearest = &self.entries[0];
        let mut min_distance = f64::INFINITY;
        for entry in &self.entries {
            let distance = (entry.value - value).abs();
            if distance < min_distance {
                min_distance = distance;
                nearest = entry;
            }
        }
        nearest
    }

    /// Colorize a gray image of any channel kind
    pub fn apply<C: Channel>(&self, image: &Image<PixelGray<C>>) -> GeoResult<Image<Rgb8>> {
        if self.is_empty() {
            return Err(GeoError::Uninitialized("color map has no entries".to_string()));
        }

        let mut colored = Image::<Rgb8>::with_size(image.rows(), image.cols());
        for row in 0..image.rows() {
            for col in 0..image.cols() {
                let value = image.get(row, col)?.gray().to_f64();
                colored.set(row, col, self.color_for(value).to_pixel())?;
            }
        }

        if let Some(metadata) = image.metadata() {
            colored.set_metadata(metadata.clone());
        }
        info!(
            "Applied {}-entry color map to {}x{} image",
            self.len(),
            image.cols(),
            image.rows()
        );
        Ok(colored)
    }
}

impl Default for ColorMap {
    fn default() -> Self {
        Self::new()
    }
}
