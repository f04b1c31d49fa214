//! Tests for the geodetic/UTM conversion engine

extern crate std;

use crate::coordinate::{
    compute_utm_zone, Coordinate, CoordinateConverter, CoordinateType, Datum, DatumTable,
    GeodeticCoordinate, Hemisphere, UtmCoordinate,
};
use crate::errors::GeoError;

fn white_house() -> GeodeticCoordinate {
    GeodeticCoordinate::new(38.8977, -77.0365, 17.0, Datum::WGS84).unwrap()
}

#[test]
fn test_utm_zone_boundaries() {
    std::assert_eq!(compute_utm_zone(0.0), 31);
    std::assert_eq!(compute_utm_zone(-180.0), 1);
    std::assert_eq!(compute_utm_zone(179.0), 60);
    std::assert_eq!(compute_utm_zone(180.0), 1);
    std::assert_eq!(compute_utm_zone(-77.0365), 18);
    std::assert_eq!(compute_utm_zone(-0.0001), 30);
}

#[test]
fn test_forward_projection_reference_point() {
    let converter = CoordinateConverter::default();
    let utm = converter.geodetic_to_utm(&white_house(), Datum::WGS84).unwrap();

    std::assert_eq!(utm.zone(), 18);
    std::assert_eq!(utm.hemisphere(), Hemisphere::North);
    std::assert!((utm.easting() - 323394.0).abs() <= 1.0, "easting {}", utm.easting());
    std::assert!((utm.northing() - 4307396.0).abs() <= 1.0, "northing {}", utm.northing());
    std::assert_eq!(utm.altitude(), 17.0);
    std::assert_eq!(utm.datum(), Datum::WGS84);
}

#[test]
fn test_inverse_projection_reference_point() {
    let converter = CoordinateConverter::default();
    let utm = converter.geodetic_to_utm(&white_house(), Datum::WGS84).unwrap();
    let back = converter.utm_to_geodetic(&utm, Datum::WGS84).unwrap();

    std::assert!((back.latitude() - 38.8977).abs() < 1e-4);
    std::assert!((back.longitude() + 77.0365).abs() < 1e-4);
    std::assert_eq!(back.altitude(), 17.0);
}

#[test]
fn test_southern_hemisphere() {
    let converter = CoordinateConverter::default();
    let sydney = GeodeticCoordinate::new(-33.8688, 151.2093, 0.0, Datum::WGS84).unwrap();
    let utm = converter.geodetic_to_utm(&sydney, Datum::WGS84).unwrap();

    std::assert_eq!(utm.zone(), 56);
    std::assert_eq!(utm.hemisphere(), Hemisphere::South);
    std::assert!((utm.easting() - 334369.0).abs() < 2.0, "easting {}", utm.easting());
    std::assert!((utm.northing() - 6250948.0).abs() < 2.0, "northing {}", utm.northing());

    let back = converter.utm_to_geodetic(&utm, Datum::WGS84).unwrap();
    std::assert!((back.latitude() + 33.8688).abs() < 1e-6);
    std::assert!((back.longitude() - 151.2093).abs() < 1e-6);
}

#[test]
fn test_central_meridian_on_equator() {
    let converter = CoordinateConverter::default();
    let origin = GeodeticCoordinate::new(0.0, 3.0, 0.0, Datum::WGS84).unwrap();
    let utm = converter.geodetic_to_utm(&origin, Datum::WGS84).unwrap();
    std::assert_eq!(utm.zone(), 31);
    std::assert!((utm.easting() - 500000.0).abs() < 1e-6);
    std::assert!(utm.northing().abs() < 1e-6);
}

#[test]
fn test_no_op_conversion_is_bit_identical() {
    let converter = CoordinateConverter::default();
    let input = Coordinate::Geodetic(white_house());
    let output = converter.convert(&input, CoordinateType::Geodetic, Datum::WGS84).unwrap();
    std::assert_eq!(output, input);

    let g = output.as_geodetic().unwrap();
    std::assert_eq!(g.latitude().to_bits(), 38.8977f64.to_bits());
    std::assert_eq!(g.longitude().to_bits(), (-77.0365f64).to_bits());

    let utm = Coordinate::Utm(
        UtmCoordinate::new(18, Hemisphere::North, 323394.1, 4307395.7, 1.0, Datum::NAD27).unwrap(),
    );
    std::assert_eq!(converter.convert(&utm, CoordinateType::Utm, Datum::NAD27).unwrap(), utm);
}

#[test]
fn test_explicit_zone() {
    let converter = CoordinateConverter::default();
    let utm = converter.geodetic_to_utm_zone(&white_house(), 17, Datum::WGS84).unwrap();
    std::assert_eq!(utm.zone(), 17);
    // Outside its own zone the point lies east of the false easting
    std::assert!(utm.easting() > 800000.0);

    let back = converter.utm_to_geodetic(&utm, Datum::WGS84).unwrap();
    std::assert!((back.longitude() + 77.0365).abs() < 1e-4);

    std::assert!(matches!(
        converter.geodetic_to_utm_zone(&white_house(), 0, Datum::WGS84),
        Err(GeoError::InvalidZone(0))
    ));
    std::assert!(matches!(
        converter.geodetic_to_utm_zone(&white_house(), 61, Datum::WGS84),
        Err(GeoError::InvalidZone(61))
    ));
}

#[test]
fn test_datum_shift_round_trip() {
    let converter = CoordinateConverter::default();
    let nad27 = converter.change_datum(&white_house(), Datum::NAD27).unwrap();

    std::assert_eq!(nad27.datum(), Datum::NAD27);
    std::assert_eq!(nad27.altitude(), 17.0);
    // The NAD27 shift moves points in the eastern US by tens of metres
    let moved = (nad27.latitude() - 38.8977).abs() + (nad27.longitude() + 77.0365).abs();
    std::assert!(moved > 1e-5 && moved < 1e-2, "moved {}", moved);

    let back = converter.change_datum(&nad27, Datum::WGS84).unwrap();
    std::assert!((back.latitude() - 38.8977).abs() < 1e-6);
    std::assert!((back.longitude() + 77.0365).abs() < 1e-6);
}

#[test]
fn test_nad83_is_nearly_wgs84() {
    let converter = CoordinateConverter::default();
    let nad83 = converter.change_datum(&white_house(), Datum::NAD83).unwrap();
    std::assert!((nad83.latitude() - 38.8977).abs() < 1e-6);
    std::assert!((nad83.longitude() + 77.0365).abs() < 1e-6);
}

#[test]
fn test_cross_datum_projection() {
    let converter = CoordinateConverter::default();
    let input = Coordinate::Geodetic(white_house());
    let output = converter.convert(&input, CoordinateType::Utm, Datum::NAD27).unwrap();
    let utm = output.as_utm().unwrap();
    std::assert_eq!(utm.datum(), Datum::NAD27);
    std::assert_eq!(utm.zone(), 18);
    std::assert_eq!(utm.altitude(), 17.0);

    let back = converter.convert(&output, CoordinateType::Geodetic, Datum::WGS84).unwrap();
    let back = back.as_geodetic().unwrap();
    std::assert!((back.latitude() - 38.8977).abs() < 1e-5);
    std::assert!((back.longitude() + 77.0365).abs() < 1e-5);
}

#[test]
fn test_unsupported_datum_pair() {
    let converter = CoordinateConverter::default();
    let result = converter.change_datum(&white_house(), Datum::EGM96);
    std::assert!(matches!(result, Err(GeoError::NotSupported(_))));

    // Same-datum projection needs no shift parameters
    let egm = GeodeticCoordinate::new(38.8977, -77.0365, 17.0, Datum::EGM96).unwrap();
    std::assert!(converter.geodetic_to_utm(&egm, Datum::EGM96).is_ok());
}

#[test]
fn test_empty_table_is_not_supported() {
    let converter = CoordinateConverter::new(DatumTable::empty());
    let result = converter.geodetic_to_utm(&white_house(), Datum::WGS84);
    std::assert!(matches!(result, Err(GeoError::NotSupported(_))));
}

#[test]
fn test_utm_datum_change_keeps_source_zone() {
    let converter = CoordinateConverter::default();
    let nad27 = converter.change_datum(&white_house(), Datum::NAD27).unwrap();
    // Zone 17 is one zone west of the natural zone 18
    let source = converter.geodetic_to_utm_zone(&nad27, 17, Datum::NAD27).unwrap();
    std::assert_eq!(source.datum(), Datum::NAD27);

    let output = converter.convert(&Coordinate::Utm(source), CoordinateType::Utm, Datum::WGS84).unwrap();
    let utm = output.as_utm().unwrap();
    std::assert_eq!(utm.zone(), 17);
    std::assert_eq!(utm.hemisphere(), Hemisphere::North);
    std::assert_eq!(utm.datum(), Datum::WGS84);
    std::assert_eq!(utm.altitude(), 17.0);

    let geodetic = converter.utm_to_geodetic(&source, Datum::WGS84).unwrap();
    let expected = converter.geodetic_to_utm_zone(&geodetic, 17, Datum::WGS84).unwrap();
    std::assert!((utm.easting() - expected.easting()).abs() < 1e-6);
    std::assert!((utm.northing() - expected.northing()).abs() < 1e-6);

    // The datum shift is visible in the projected position
    let moved = (utm.easting() - source.easting()).abs() + (utm.northing() - source.northing()).abs();
    std::assert!(moved > 1.0 && moved < 1000.0, "moved {}", moved);
}
