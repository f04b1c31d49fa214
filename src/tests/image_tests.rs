//! Tests for the image container

extern crate std;

use tempfile::tempdir;

use crate::channel::{ChanU16, ChanU8};
use crate::driver::DriverRegistry;
use crate::errors::GeoError;
use crate::image::{Image, MetadataValue};
use crate::pixel::{Gray16, Gray8, Rgb8};
use crate::resource::ResourceType;

fn rgb8(r: u8, g: u8, b: u8) -> Rgb8 {
    Rgb8::new(ChanU8::new(r), ChanU8::new(g), ChanU8::new(b))
}

#[test]
fn test_image_delegates_to_resource() {
    let mut image = Image::<Rgb8>::with_size(2, 3);
    std::assert_eq!(image.rows(), 2);
    std::assert_eq!(image.cols(), 3);
    std::assert_eq!(image.channels(), 3);
    std::assert_eq!(image.resource_type(), ResourceType::Memory);

    image.set(1, 1, rgb8(1, 2, 3)).unwrap();
    std::assert_eq!(image.get(1, 1).unwrap(), rgb8(1, 2, 3));
    std::assert!(matches!(image.get(2, 0), Err(GeoError::OutOfRange(_))));
    std::assert!(matches!(image.get(0, 3), Err(GeoError::OutOfRange(_))));
}

#[test]
fn test_linear_index_is_row_major() {
    let mut image = Image::<Gray8>::with_size(2, 3);
    image.set_index(4, Gray8::new(ChanU8::new(99))).unwrap();
    std::assert_eq!(image.get(1, 1).unwrap().gray().value(), 99);
    std::assert_eq!(image.get_index(4).unwrap().gray().value(), 99);
    std::assert!(matches!(image.get_index(6), Err(GeoError::OutOfRange(_))));
}

#[test]
fn test_empty_image_uninitialized() {
    let image = Image::<Gray8>::new();
    std::assert!(matches!(image.get(0, 0), Err(GeoError::Uninitialized(_))));
    std::assert!(matches!(image.get_index(0), Err(GeoError::Uninitialized(_))));
}

#[test]
fn test_failed_set_leaves_image_unchanged() {
    let mut image = Image::<Gray8>::with_size(1, 1);
    std::assert!(image.set(3, 3, Gray8::new(ChanU8::new(7))).is_err());
    std::assert_eq!(image.to_vec().unwrap(), vec![Gray8::default()]);
}

#[test]
fn test_metadata_lookup() {
    let mut image = Image::<Gray8>::with_size(1, 1);
    std::assert!(image.metadata().is_none());
    std::assert_eq!(image.metadata_value::<f64>("missing").unwrap(), None);

    image.set_metadata_entry("elevation_units", "metres");
    image.set_metadata_entry("no_data", -9999.0);

    std::assert_eq!(image.metadata_value::<f64>("no_data").unwrap(), Some(-9999.0));
    std::assert_eq!(
        image.metadata_value::<String>("elevation_units").unwrap(),
        Some("metres".to_string())
    );
    std::assert!(matches!(
        image.metadata_value::<f64>("elevation_units"),
        Err(GeoError::TypeConversion(_))
    ));
    std::assert_eq!(
        image.metadata().unwrap().get("no_data"),
        Some(&MetadataValue::Number(-9999.0))
    );
}

#[test]
fn test_convert_whole_image() {
    let pixels = vec![Gray8::new(ChanU8::new(0)), Gray8::new(ChanU8::new(255))];
    let mut image = Image::from_pixels(1, 2, pixels).unwrap();
    image.set_metadata_entry("source", "test");

    let wide = image.convert::<Gray16>().unwrap();
    std::assert_eq!(wide.get(0, 1).unwrap(), Gray16::new(ChanU16::new(65535)));
    std::assert!(wide.metadata().is_some());

    let color = image.convert::<Rgb8>().unwrap();
    std::assert_eq!(color.get(0, 1).unwrap(), rgb8(255, 255, 255));
}

#[test]
fn test_write_then_load() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("tile.ppm");
    let registry = DriverRegistry::new();

    let pixels = vec![rgb8(255, 0, 0), rgb8(0, 255, 0), rgb8(0, 0, 255), rgb8(12, 34, 56)];
    let image = Image::from_pixels(2, 2, pixels.clone()).unwrap();
    image.write(&path, &registry).unwrap();

    let loaded = Image::<Rgb8>::load(&path, &registry).unwrap();
    std::assert_eq!(loaded.resource_type(), ResourceType::Memory);
    std::assert_eq!(loaded.to_vec().unwrap(), pixels);

    let opened = Image::<Rgb8>::open(&path, &registry).unwrap();
    std::assert_eq!(opened.resource_type(), ResourceType::Disk);
    std::assert_eq!(opened.get(1, 1).unwrap(), rgb8(12, 34, 56));
}

#[test]
fn test_write_png_through_raster_driver() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("tile.png");
    let registry = DriverRegistry::new();

    let pixels = vec![Gray16::new(ChanU16::new(1000)), Gray16::new(ChanU16::new(60000))];
    Image::from_pixels(1, 2, pixels.clone()).unwrap().write(&path, &registry).unwrap();

    let loaded = Image::<Gray16>::load(&path, &registry).unwrap();
    std::assert_eq!(loaded.to_vec().unwrap(), pixels);
}

#[test]
fn test_try_with_size() {
    let image = Image::<Gray8>::try_with_size(2, 3).unwrap();
    std::assert_eq!((image.rows(), image.cols()), (2, 3));
    std::assert!(matches!(Image::<Gray8>::try_with_size(usize::MAX, usize::MAX), Err(GeoError::OutOfRange(_))));
}
