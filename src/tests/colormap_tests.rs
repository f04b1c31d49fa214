//! Tests for CSV color maps and colorizing gray images

extern crate std;

use std::io::Write;

use tempfile::tempdir;

use crate::channel::{ChanU16, ChanU8, Channel};
use crate::colormap::{ColorMap, ColorMapEntry, ColorMapMode, RgbColor};
use crate::errors::GeoError;
use crate::image::Image;
use crate::pixel::{Gray16, Gray8};

const ELEVATION_CSV: &str = "\
# elevation ramp
0,#000000,sea level

100, 255, 255, 255, peak
50,#ff0000
";

#[test]
fn test_hex_parsing() {
    std::assert_eq!(RgbColor::from_hex("#1a2B3c").unwrap(), RgbColor::new(0x1a, 0x2b, 0x3c));
    std::assert_eq!(RgbColor::from_hex("00ff00").unwrap(), RgbColor::new(0, 255, 0));
    std::assert_eq!(RgbColor::new(1, 2, 255).to_hex(), "#0102ff");
    std::assert!(matches!(RgbColor::from_hex("#12345"), Err(GeoError::ParseError(_))));
    std::assert!(RgbColor::from_hex("#gg0000").is_err());
}

#[test]
fn test_csv_layouts() {
    let hex = ColorMapEntry::from_csv_parts(&["1.5", "#010203"]).unwrap();
    std::assert_eq!(hex.value, 1.5);
    std::assert_eq!(hex.color, RgbColor::new(1, 2, 3));
    std::assert!(hex.label.is_none());

    let labelled = ColorMapEntry::from_csv_parts(&["2", "#ffffff", "snow"]).unwrap();
    std::assert_eq!(labelled.label.as_deref(), Some("snow"));

    let rgb = ColorMapEntry::from_csv_parts(&["3", "10", "20", "30"]).unwrap();
    std::assert_eq!(rgb.color, RgbColor::new(10, 20, 30));

    std::assert!(ColorMapEntry::from_csv_parts(&["x", "#ffffff"]).is_none());
    std::assert!(ColorMapEntry::from_csv_parts(&["1", "300", "0", "0"]).is_none());
    std::assert!(ColorMapEntry::from_csv_parts(&["1"]).is_none());
}

#[test]
fn test_csv_entries_are_sorted() {
    let colormap = ColorMap::from_csv_str(ELEVATION_CSV).unwrap();
    let values: Vec<f64> = colormap.entries().iter().map(|e| e.value).collect();
    std::assert_eq!(values, vec![0.0, 50.0, 100.0]);
    std::assert_eq!(colormap.entries()[0].label.as_deref(), Some("sea level"));
    std::assert_eq!(colormap.entries()[2].label.as_deref(), Some("peak"));
}

#[test]
fn test_csv_without_entries_fails() {
    let result = ColorMap::from_csv_str("# only a comment\n\nnot,a,color,map,line,at,all\n");
    std::assert!(matches!(result, Err(GeoError::ParseError(_))));
}

#[test]
fn test_ramp_interpolation() {
    let mut colormap = ColorMap::new();
    colormap.add_entry(ColorMapEntry::new(100.0, RgbColor::new(255, 255, 255)));
    colormap.add_entry(ColorMapEntry::new(0.0, RgbColor::new(0, 0, 0)));

    std::assert_eq!(colormap.color_for(0.0), RgbColor::new(0, 0, 0));
    std::assert_eq!(colormap.color_for(50.0), RgbColor::new(128, 128, 128));
    std::assert_eq!(colormap.color_for(25.0), RgbColor::new(64, 64, 64));
    std::assert_eq!(colormap.color_for(-10.0), RgbColor::new(0, 0, 0));
    std::assert_eq!(colormap.color_for(1000.0), RgbColor::new(255, 255, 255));
}

#[test]
fn test_exact_mode_uses_nearest_entry() {
    let mut colormap = ColorMap::with_mode(ColorMapMode::Exact);
    colormap.add_entry(ColorMapEntry::new(0.0, RgbColor::new(255, 0, 0)));
    colormap.add_entry(ColorMapEntry::new(10.0, RgbColor::new(0, 0, 255)));

    std::assert_eq!(colormap.color_for(10.0), RgbColor::new(0, 0, 255));
    std::assert_eq!(colormap.color_for(4.0), RgbColor::new(255, 0, 0));
    std::assert_eq!(colormap.color_for(6.0), RgbColor::new(0, 0, 255));
    std::assert_eq!(colormap.color_for(-50.0), RgbColor::new(255, 0, 0));

    colormap.set_mode(ColorMapMode::Ramp);
    std::assert_eq!(colormap.color_for(5.0), RgbColor::new(128, 0, 128));
}

#[test]
fn test_empty_map_is_black() {
    let colormap = ColorMap::default();
    std::assert!(colormap.is_empty());
    std::assert_eq!(colormap.color_for(42.0), RgbColor::default());

    let image = Image::<Gray8>::with_size(1, 1);
    std::assert!(matches!(colormap.apply(&image), Err(GeoError::Uninitialized(_))));
}

#[test]
fn test_apply_to_gray16() {
    let mut colormap = ColorMap::new();
    colormap.add_entry(ColorMapEntry::new(0.0, RgbColor::new(0, 0, 0)));
    colormap.add_entry(ColorMapEntry::new(1000.0, RgbColor::new(255, 0, 0)));

    let pixels = vec![
        Gray16::new(ChanU16::new(0)),
        Gray16::new(ChanU16::new(500)),
        Gray16::new(ChanU16::new(1000)),
        Gray16::new(ChanU16::new(65535)),
    ];
    let mut image = Image::from_pixels(2, 2, pixels).unwrap();
    image.set_metadata_entry("source", "dem");

    let colored = colormap.apply(&image).unwrap();
    std::assert_eq!((colored.rows(), colored.cols()), (2, 2));
    std::assert_eq!(colored.get(0, 0).unwrap().r().value(), 0);
    std::assert_eq!(colored.get(0, 1).unwrap().r().value(), 128);
    std::assert_eq!(colored.get(1, 0).unwrap().r().value(), 255);
    std::assert_eq!(colored.get(1, 1).unwrap().r().value(), 255);
    std::assert_eq!(colored.get(1, 1).unwrap().g().value(), 0);
    std::assert_eq!(colored.metadata_value::<String>("source").unwrap().as_deref(), Some("dem"));
}

#[test]
fn test_apply_to_gray8() {
    let mut colormap = ColorMap::with_mode(ColorMapMode::Exact);
    colormap.add_entry(ColorMapEntry::new(1.0, RgbColor::new(0, 128, 0)));
    colormap.add_entry(ColorMapEntry::new(2.0, RgbColor::new(0, 0, 200)));

    let image = Image::from_pixels(1, 2, vec![Gray8::new(ChanU8::new(1)), Gray8::new(ChanU8::new(2))])
        .unwrap();
    let colored = colormap.apply(&image).unwrap();
    std::assert_eq!(colored.get(0, 0).unwrap().g().to_f64(), 128.0);
    std::assert_eq!(colored.get(0, 1).unwrap().b().value(), 200);
}

#[test]
fn test_load_from_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("ramp.csv");
    let mut file = std::fs::File::create(&path).unwrap();
    file.write_all(ELEVATION_CSV.as_bytes()).unwrap();
    drop(file);

    let colormap = ColorMap::from_file(&path).unwrap();
    std::assert_eq!(colormap.len(), 3);
    std::assert_eq!(colormap.color_for(75.0), RgbColor::new(255, 128, 128));

    std::assert!(matches!(
        ColorMap::from_file(dir.path().join("missing.csv")),
        Err(GeoError::FileNotFound(_))
    ));
    std::assert!(matches!(
        ColorMap::from_file(dir.path().join("ramp.json")),
        Err(GeoError::UnknownExtension(_))
    ));
}
