//! End-to-end tests through the public API and the CLI commands

extern crate std;

use tempfile::tempdir;

use terrakit::channel::ChanU8;
use terrakit::commands::{cli, CommandFactory, ConvertImageCommand, CoordinateCommand, InfoCommand, TerrakitCommandFactory};
use terrakit::pixel::{Gray8, Rgb8};
use terrakit::utils::logger::Logger;
use terrakit::{ChannelKind, Coordinate, GeoError, Hemisphere, Image, Options, PixelShape, TerraKit};

fn rgb(r: u8, g: u8, b: u8) -> Rgb8 {
    Rgb8::new(ChanU8::new(r), ChanU8::new(g), ChanU8::new(b))
}

fn sample_image() -> Image<Rgb8> {
    let pixels = vec![rgb(255, 0, 0), rgb(0, 255, 0), rgb(0, 0, 255), rgb(30, 60, 90)];
    Image::from_pixels(2, 2, pixels).unwrap()
}

#[test]
fn test_ppm_is_readable_by_image_crate() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("sample.ppm");
    let kit = TerraKit::new();
    kit.save_image(&sample_image(), &path).unwrap();

    let decoded = image::open(&path).unwrap().to_rgb8();
    std::assert_eq!(decoded.dimensions(), (2, 2));
    std::assert_eq!(decoded.get_pixel(0, 0).0, [255, 0, 0]);
    std::assert_eq!(decoded.get_pixel(1, 0).0, [0, 255, 0]);
    std::assert_eq!(decoded.get_pixel(0, 1).0, [0, 0, 255]);
    std::assert_eq!(decoded.get_pixel(1, 1).0, [30, 60, 90]);
}

#[test]
fn test_save_and_load_with_sidecar() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("tagged.ppm");
    let kit = TerraKit::new();

    let mut image = sample_image();
    image.set_metadata_entry("datum", "WGS84");
    image.set_metadata_entry("utm_zone", 18);
    kit.save_image(&image, &path).unwrap();
    std::assert!(dir.path().join("tagged.ppm.aux.xml").is_file());

    let loaded: Image<Rgb8> = kit.load_image(&path).unwrap();
    std::assert_eq!(loaded.get(1, 1).unwrap(), rgb(30, 60, 90));
    std::assert_eq!(loaded.metadata_value::<String>("datum").unwrap().as_deref(), Some("WGS84"));
    std::assert_eq!(loaded.metadata_value::<i64>("utm_zone").unwrap(), Some(18));

    // Loading converts into the requested layout
    let gray: Image<Gray8> = kit.load_image(&path).unwrap();
    std::assert_eq!(gray.get(0, 0).unwrap().gray().value(), 85);
}

#[test]
fn test_disk_errors() {
    let dir = tempdir().unwrap();
    let kit = TerraKit::new();

    let missing = kit.load_image::<Rgb8, _>(dir.path().join("missing.ppm"));
    std::assert!(matches!(missing, Err(GeoError::FileNotFound(_))));

    let unknown = kit.save_image(&sample_image(), dir.path().join("sample.unknown"));
    std::assert!(matches!(unknown, Err(GeoError::UnknownExtension(_))));
}

#[test]
fn test_coordinate_round_trip() {
    let kit = TerraKit::new();
    let geodetic = kit.geodetic(38.8977, -77.0365, 17.0).unwrap();
    let utm = kit.to_utm(&geodetic).unwrap();
    std::assert_eq!((utm.zone(), utm.hemisphere()), (18, Hemisphere::North));
    std::assert_eq!(utm.epsg_code(), Some(32618));

    let back = kit.to_geodetic(&utm).unwrap();
    std::assert!((back.latitude() - geodetic.latitude()).abs() < 1e-4);
    std::assert!((back.longitude() - geodetic.longitude()).abs() < 1e-4);
    std::assert_eq!(back.altitude(), 17.0);
}

#[test]
fn test_coordinate_command() {
    let logger = Logger::disabled();
    let matches = cli()
        .try_get_matches_from(["terrakit", "--coordinate", "-33.8688,151.2093", "--to-datum", "nad27"])
        .unwrap();

    let command = CoordinateCommand::new(&matches, &Options::default(), &logger).unwrap();
    match command.convert().unwrap() {
        Coordinate::Utm(utm) => {
            std::assert_eq!(utm.zone(), 56);
            std::assert_eq!(utm.hemisphere(), Hemisphere::South);
            std::assert_eq!(utm.epsg_code(), None);
        }
        other => panic!("expected UTM output, got {}", other),
    }

    let factory = TerrakitCommandFactory::new(Options::default());
    let command = factory.create_command(&matches, &logger).unwrap();
    std::assert!(command.execute().is_ok());
}

#[test]
fn test_utm_command_with_bad_zone() {
    let logger = Logger::disabled();
    let matches = cli()
        .try_get_matches_from(["terrakit", "--utm", "61N 500000 0"])
        .unwrap();
    let result = CoordinateCommand::new(&matches, &Options::default(), &logger);
    std::assert!(matches!(result, Err(GeoError::InvalidZone(61))));
}

#[test]
fn test_convert_and_info_commands() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("color.ppm");
    let kit = TerraKit::new();
    let mut image = sample_image();
    image.set_metadata_entry("source", "integration");
    kit.save_image(&image, &input).unwrap();

    let logger = Logger::disabled();
    let output = dir.path().join("gray");
    let matches = cli()
        .try_get_matches_from([
            "terrakit",
            input.to_str().unwrap(),
            "-o",
            output.to_str().unwrap(),
            "--pixel",
            "gray8",
            "--quiet",
        ])
        .unwrap();

    let options = Options {
        default_extension: "pgm".to_string(),
        ..Options::default()
    };
    let command = ConvertImageCommand::new(&matches, &options, &logger).unwrap();
    let header = command.convert().unwrap();
    std::assert_eq!((header.rows, header.cols), (2, 2));
    std::assert_eq!((header.shape, header.kind), (PixelShape::Gray, ChannelKind::UInt8));

    let written = dir.path().join("gray.pgm");
    let gray: Image<Gray8> = kit.load_image(&written).unwrap();
    std::assert_eq!(gray.get(1, 1).unwrap().gray().value(), 60);
    std::assert_eq!(gray.metadata_value::<String>("source").unwrap().as_deref(), Some("integration"));

    let matches = cli()
        .try_get_matches_from(["terrakit", written.to_str().unwrap(), "--info"])
        .unwrap();
    let report = InfoCommand::new(&matches, &logger).unwrap().report().unwrap();
    std::assert!(report.contains(&("Driver".to_string(), "NETPBM".to_string())));
    std::assert!(report.contains(&("Size".to_string(), "2x2".to_string())));
    std::assert!(report.iter().any(|(key, value)| key == "Metadata source" && value == "integration"));
}

#[test]
fn test_factory_without_work() {
    let logger = Logger::disabled();
    let matches = cli().try_get_matches_from(["terrakit"]).unwrap();
    let factory = TerrakitCommandFactory::new(Options::default());
    std::assert!(factory.create_command(&matches, &logger).is_err());
}
