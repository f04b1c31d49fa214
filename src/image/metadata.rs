//! Metadata side-table for images
//!
//! Keys are unique strings; values are text or numbers. Typed lookups separate
//! "key absent" (`Ok(None)`) from "present but not convertible"
//! (`Err(TypeConversion)`).

use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use log::debug;
use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};
use quick_xml::{Reader, Writer};

use crate::errors::{GeoError, GeoResult};

/// A single metadata value
#[derive(Debug, Clone, PartialEq)]
pub enum MetadataValue {
    Text(String),
    Number(f64),
}

impl fmt::Display for MetadataValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MetadataValue::Text(text) => write!(f, "{}", text),
            MetadataValue::Number(number) => write!(f, "{}", number),
        }
    }
}

impl From<&str> for MetadataValue {
    fn from(value: &str) -> Self {
        MetadataValue::Text(value.to_string())
    }
}

impl From<String> for MetadataValue {
    fn from(value: String) -> Self {
        MetadataValue::Text(value)
    }
}

impl From<f64> for MetadataValue {
    fn from(value: f64) -> Self {
        MetadataValue::Number(value)
    }
}

impl From<i64> for MetadataValue {
    fn from(value: i64) -> Self {
        MetadataValue::Number(value as f64)
    }
}

impl From<i32> for MetadataValue {
    fn from(value: i32) -> Self {
        MetadataValue::Number(value as f64)
    }
}

impl From<u32> for MetadataValue {
    fn from(value: u32) -> Self {
        MetadataValue::Number(value as f64)
    }
}

/// Conversion from a stored metadata value into a requested type
pub trait FromMetadata: Sized {
    fn from_metadata(key: &str, value: &MetadataValue) -> GeoResult<Self>;
}

fn conversion_error(key: &str, value: &MetadataValue, target: &str) -> GeoError {
    GeoError::TypeConversion(format!("metadata '{}' = '{}' is not a valid {}", key, value, target))
}

impl FromMetadata for String {
    fn from_metadata(_key: &str, value: &MetadataValue) -> GeoResult<Self> {
        Ok(value.to_string())
    }
}

impl FromMetadata for f64 {
    fn from_metadata(key: &str, value: &MetadataValue) -> GeoResult<Self> {
        match value {
            MetadataValue::Number(number) => Ok(*number),
            MetadataValue::Text(text) => text
                .trim()
                .parse::<f64>()
                .map_err(|_| conversion_error(key, value, "number")),
        }
    }
}

impl FromMetadata for i64 {
    fn from_metadata(key: &str, value: &MetadataValue) -> GeoResult<Self> {
        match value {
            MetadataValue::Number(number)
                if number.fract() == 0.0 && number.abs() <= i64::MAX as f64 =>
            {
                Ok(*number as i64)
            }
            MetadataValue::Number(_) => Err(conversion_error(key, value, "integer")),
            MetadataValue::Text(text) => text
                .trim()
                .parse::<i64>()
                .map_err(|_| conversion_error(key, value, "integer")),
        }
    }
}

impl FromMetadata for u32 {
    fn from_metadata(key: &str, value: &MetadataValue) -> GeoResult<Self> {
        let integer = i64::from_metadata(key, value)?;
        u32::try_from(integer).map_err(|_| conversion_error(key, value, "unsigned 32-bit integer"))
    }
}

impl FromMetadata for bool {
    fn from_metadata(key: &str, value: &MetadataValue) -> GeoResult<Self> {
        match value {
            MetadataValue::Number(number) => Ok(*number != 0.0),
            MetadataValue::Text(text) => match text.trim().to_lowercase().as_str() {
                "true" | "yes" | "1" => Ok(true),
                "false" | "no" | "0" => Ok(false),
                _ => Err(conversion_error(key, value, "boolean")),
            },
        }
    }
}

/// Key/value metadata attached to an image
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MetadataContainer {
    entries: HashMap<String, MetadataValue>,
}

impl MetadataContainer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace an entry, returning the previous value
    pub fn set<V: Into<MetadataValue>>(&mut self, key: &str, value: V) -> Option<MetadataValue> {
        self.entries.insert(key.to_string(), value.into())
    }

    /// Raw value for a key
    pub fn get(&self, key: &str) -> Option<&MetadataValue> {
        self.entries.get(key)
    }

    /// Typed value for a key
    ///
    /// # Returns
    /// `Ok(None)` when the key is absent, `Err(TypeConversion)` when the
    /// stored value cannot be represented as `T`
    pub fn get_as<T: FromMetadata>(&self, key: &str) -> GeoResult<Option<T>> {
        match self.entries.get(key) {
            Some(value) => T::from_metadata(key, value).map(Some),
            None => Ok(None),
        }
    }

    pub fn remove(&mut self, key: &str) -> Option<MetadataValue> {
        self.entries.remove(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Keys in sorted order
    pub fn keys(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = self.entries.keys().map(|k| k.as_str()).collect();
        keys.sort_unstable();
        keys
    }

    /// Serialize as GDAL PAM metadata (`<GDALMetadata><Item name="..">`)
    ///
    /// Numeric entries carry `type="number"` so they read back as numbers.
    pub fn to_gdal_xml(&self) -> GeoResult<String> {
        let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);
        writer
            .write_event(Event::Start(BytesStart::new("GDALMetadata")))
            .map_err(xml_error)?;
        for key in self.keys() {
            let entry = &self.entries[key];
            let value = entry.to_string();
            let mut item = BytesStart::new("Item");
            item.push_attribute(("name", key));
            if let MetadataValue::Number(_) = entry {
                item.push_attribute((TYPE_ATTRIBUTE, NUMBER_TYPE));
            }
            writer
                .write_event(Event::Start(item))
                .map_err(xml_error)?;
            writer
                .write_event(Event::Text(BytesText::new(&value)))
                .map_err(xml_error)?;
            writer
                .write_event(Event::End(BytesEnd::new("Item")))
                .map_err(xml_error)?;
        }
        writer
            .write_event(Event::End(BytesEnd::new("GDALMetadata")))
            .map_err(xml_error)?;

        String::from_utf8(writer.into_inner())
            .map_err(|e| GeoError::GenericError(format!("Metadata XML is not UTF-8: {}", e)))
    }

    /// Parse GDAL PAM metadata
    ///
    /// Items marked `type="number"` are stored as numbers, everything else as
    /// the original text.
    pub fn from_gdal_xml(xml: &str) -> GeoResult<Self> {
        let mut reader = Reader::from_str(xml);
        reader.config_mut().trim_text(true);

        let parse_error = |e: String| GeoError::ParseError(format!("Invalid metadata XML: {}", e));
        let mut container = MetadataContainer::new();
        let mut current: Option<(String, bool, String)> = None;

        loop {
            match reader.read_event().map_err(|e| parse_error(e.to_string()))? {
                Event::Start(e) if e.name().as_ref() == b"Item" => {
                    current = Some((item_name(&e)?, is_number_item(&e), String::new()));
                }
                Event::Empty(e) if e.name().as_ref() == b"Item" => {
                    container.set(&item_name(&e)?, "");
                }
                Event::Text(text) => {
                    if let Some((_, _, value)) = current.as_mut() {
                        let unescaped = text.unescape().map_err(|e| parse_error(e.to_string()))?;
                        value.push_str(&unescaped);
                    }
                }
                Event::End(e) if e.name().as_ref() == b"Item" => {
                    if let Some((key, numeric, value)) = current.take() {
                        match value.trim().parse::<f64>() {
                            Ok(number) if numeric => container.set(&key, number),
                            _ => container.set(&key, value),
                        };
                    }
                }
                Event::Eof => break,
                _ => {}
            }
        }

        debug!("Parsed {} metadata entries from XML", container.len());
        Ok(container)
    }

    /// Sidecar path GDAL uses for an image (`<image>.aux.xml`)
    pub fn sidecar_path(image_path: &Path) -> PathBuf {
        let mut name = image_path.as_os_str().to_owned();
        name.push(".aux.xml");
        PathBuf::from(name)
    }

    /// Read the sidecar of an image, `Ok(None)` when there is none
    pub fn read_sidecar(image_path: &Path) -> GeoResult<Option<Self>> {
        let sidecar = Self::sidecar_path(image_path);
        if !sidecar.is_file() {
            return Ok(None);
        }
        let xml = fs::read_to_string(&sidecar)?;
        Self::from_gdal_xml(&xml).map(Some)
    }

    /// Write the entries next to an image as `<image>.aux.xml`
    pub fn write_sidecar(&self, image_path: &Path) -> GeoResult<PathBuf> {
        let sidecar = Self::sidecar_path(image_path);
        fs::write(&sidecar, self.to_gdal_xml()?)?;
        debug!("Wrote {} metadata entries to {}", self.len(), sidecar.display());
        Ok(sidecar)
    }
}

const TYPE_ATTRIBUTE: &str = "type";
const NUMBER_TYPE: &str = "number";

fn is_number_item(element: &BytesStart) -> bool {
    matches!(
        element.try_get_attribute(TYPE_ATTRIBUTE),
        Ok(Some(attribute)) if attribute.value.as_ref() == NUMBER_TYPE.as_bytes()
    )
}

fn xml_error<E: fmt::Display>(error: E) -> GeoError {
    GeoError::GenericError(format!("Failed to write metadata XML: {}", error))
}

fn item_name(element: &BytesStart) -> GeoResult<String> {
    let attribute = element
        .try_get_attribute("name")
        .map_err(|e| GeoError::ParseError(format!("Invalid metadata item: {}", e)))?
        .ok_or_else(|| GeoError::ParseError("Metadata item without a name".to_string()))?;
    let name = attribute
        .unescape_value()
        .map_err(|e| GeoError::ParseError(format!("Invalid metadata item name: {}", e)))?;
    Ok(name.into_owned())
}
