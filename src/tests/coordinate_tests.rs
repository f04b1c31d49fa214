//! Tests for coordinate value types, datums and CRS identifiers

extern crate std;

use crate::coordinate::{
    normalize_longitude, Coordinate, CoordinateSystem, CoordinateType, Datum, DatumParameters,
    DatumTable, Ellipsoid, GeodeticCoordinate, Hemisphere, UtmCoordinate,
};
use crate::errors::GeoError;

#[test]
fn test_geodetic_validation() {
    std::assert!(GeodeticCoordinate::new(90.0, 0.0, 0.0, Datum::WGS84).is_ok());
    std::assert!(matches!(
        GeodeticCoordinate::new(90.5, 0.0, 0.0, Datum::WGS84),
        Err(GeoError::OutOfRange(_))
    ));
    std::assert!(GeodeticCoordinate::new(f64::NAN, 0.0, 0.0, Datum::WGS84).is_err());

    let wrapped = GeodeticCoordinate::new(10.0, 190.0, 0.0, Datum::WGS84).unwrap();
    std::assert_eq!(wrapped.longitude(), -170.0);
    let west = GeodeticCoordinate::new(10.0, -180.0, 0.0, Datum::WGS84).unwrap();
    std::assert_eq!(west.longitude(), 180.0);
}

#[test]
fn test_normalize_longitude() {
    std::assert_eq!(normalize_longitude(0.0), 0.0);
    std::assert_eq!(normalize_longitude(180.0), 180.0);
    std::assert_eq!(normalize_longitude(-180.0), 180.0);
    std::assert_eq!(normalize_longitude(540.0), 180.0);
    std::assert_eq!(normalize_longitude(-190.0), 170.0);
}

#[test]
fn test_geodetic_setters() {
    let mut coordinate = GeodeticCoordinate::new(1.0, 2.0, 3.0, Datum::WGS84).unwrap();
    coordinate.set_latitude(-45.0).unwrap();
    coordinate.set_longitude(361.0).unwrap();
    coordinate.set_altitude(100.0).unwrap();
    coordinate.set_datum(Datum::NAD83);

    std::assert_eq!(coordinate.latitude(), -45.0);
    std::assert_eq!(coordinate.longitude(), 1.0);
    std::assert_eq!(coordinate.altitude(), 100.0);
    std::assert_eq!(coordinate.datum(), Datum::NAD83);

    // A rejected value leaves the coordinate untouched
    std::assert!(coordinate.set_latitude(-91.0).is_err());
    std::assert_eq!(coordinate.latitude(), -45.0);
}

#[test]
fn test_clone_is_independent() {
    let original = GeodeticCoordinate::new(1.0, 2.0, 3.0, Datum::WGS84).unwrap();
    let mut copy = original.clone();
    copy.set_altitude(50.0).unwrap();
    std::assert_eq!(original.altitude(), 3.0);
    std::assert_eq!(copy.altitude(), 50.0);
}

#[test]
fn test_utm_zone_validation() {
    std::assert!(UtmCoordinate::new(60, Hemisphere::North, 500000.0, 0.0, 0.0, Datum::WGS84).is_ok());
    std::assert!(matches!(
        UtmCoordinate::new(0, Hemisphere::North, 500000.0, 0.0, 0.0, Datum::WGS84),
        Err(GeoError::InvalidZone(0))
    ));
    std::assert!(matches!(
        UtmCoordinate::new(61, Hemisphere::South, 500000.0, 0.0, 0.0, Datum::WGS84),
        Err(GeoError::InvalidZone(61))
    ));

    let mut utm = UtmCoordinate::new(18, Hemisphere::North, 1.0, 2.0, 3.0, Datum::WGS84).unwrap();
    std::assert!(matches!(utm.set_zone(99), Err(GeoError::InvalidZone(99))));
    std::assert_eq!(utm.zone(), 18);
    utm.set_hemisphere(Hemisphere::South);
    utm.set_easting(10.0).unwrap();
    utm.set_northing(20.0).unwrap();
    std::assert_eq!(utm.hemisphere(), Hemisphere::South);
    std::assert_eq!((utm.easting(), utm.northing()), (10.0, 20.0));
}

#[test]
fn test_parse_geodetic() {
    let coordinate: GeodeticCoordinate = "38.8977, -77.0365, 17".parse().unwrap();
    std::assert_eq!(coordinate.latitude(), 38.8977);
    std::assert_eq!(coordinate.longitude(), -77.0365);
    std::assert_eq!(coordinate.altitude(), 17.0);
    std::assert_eq!(coordinate.datum(), Datum::WGS84);

    let flat = GeodeticCoordinate::parse_with_datum("-33.8688,151.2093", Datum::NAD83).unwrap();
    std::assert_eq!(flat.altitude(), 0.0);
    std::assert_eq!(flat.datum(), Datum::NAD83);

    std::assert!(matches!("north,west".parse::<GeodeticCoordinate>(), Err(GeoError::ParseError(_))));
    std::assert!(matches!("95,10".parse::<GeodeticCoordinate>(), Err(GeoError::OutOfRange(_))));
}

#[test]
fn test_parse_utm() {
    let utm: UtmCoordinate = "18N 323394 4307396 17".parse().unwrap();
    std::assert_eq!(utm.zone(), 18);
    std::assert_eq!(utm.hemisphere(), Hemisphere::North);
    std::assert_eq!(utm.easting(), 323394.0);
    std::assert_eq!(utm.northing(), 4307396.0);
    std::assert_eq!(utm.altitude(), 17.0);

    let south: UtmCoordinate = "56s 334368.6 6250948.3".parse().unwrap();
    std::assert_eq!(south.hemisphere(), Hemisphere::South);

    std::assert!(matches!("0N 1 2".parse::<UtmCoordinate>(), Err(GeoError::InvalidZone(0))));
    std::assert!(matches!("18X 1 2".parse::<UtmCoordinate>(), Err(GeoError::ParseError(_))));
}

#[test]
fn test_coordinate_type_dispatch() {
    let geodetic: Coordinate = GeodeticCoordinate::new(1.0, 2.0, 5.0, Datum::NAD27).unwrap().into();
    let utm: Coordinate = UtmCoordinate::new(31, Hemisphere::North, 1.0, 2.0, 7.0, Datum::WGS84)
        .unwrap()
        .into();

    std::assert_eq!(geodetic.coordinate_type(), CoordinateType::Geodetic);
    std::assert_eq!(utm.coordinate_type(), CoordinateType::Utm);
    std::assert_eq!(geodetic.datum(), Datum::NAD27);
    std::assert_eq!(utm.altitude(), 7.0);
    std::assert!(geodetic.as_geodetic().is_some());
    std::assert!(geodetic.as_utm().is_none());
}

#[test]
fn test_epsg_codes() {
    let north = UtmCoordinate::new(18, Hemisphere::North, 0.0, 0.0, 0.0, Datum::WGS84).unwrap();
    let south = UtmCoordinate::new(56, Hemisphere::South, 0.0, 0.0, 0.0, Datum::WGS84).unwrap();
    let nad83 = UtmCoordinate::new(18, Hemisphere::North, 0.0, 0.0, 0.0, Datum::NAD83).unwrap();
    std::assert_eq!(north.epsg_code(), Some(32618));
    std::assert_eq!(south.epsg_code(), Some(32756));
    std::assert_eq!(nad83.epsg_code(), Some(26918));

    std::assert_eq!(
        CoordinateSystem::from_string("EPSG:32618").unwrap(),
        CoordinateSystem::Utm(18, Hemisphere::North, Datum::WGS84)
    );
    std::assert_eq!(
        CoordinateSystem::from_epsg(4267).unwrap(),
        CoordinateSystem::Geographic(Datum::NAD27)
    );
    std::assert!(CoordinateSystem::from_epsg(3857).is_err());
    std::assert!(CoordinateSystem::Geographic(Datum::WGS84).description().contains("4326"));
}

#[test]
fn test_datum_names() {
    for datum in Datum::ALL {
        std::assert_eq!(Datum::from_name(datum.name()).unwrap(), datum);
    }
    std::assert_eq!(Datum::from_name("wgs-84").unwrap(), Datum::WGS84);
    std::assert!(Datum::from_name("ED50").is_err());
}

#[test]
fn test_builtin_datum_table() {
    let table = DatumTable::builtin();
    let wgs84 = table.get(Datum::WGS84).unwrap();
    std::assert_eq!(wgs84.ellipsoid.semi_major_axis, 6378137.0);
    std::assert!((wgs84.ellipsoid.eccentricity_squared() - 0.00669437999014).abs() < 1e-12);

    let nad27 = table.get(Datum::NAD27).unwrap();
    std::assert_eq!(nad27.ellipsoid.semi_major_axis, 6378206.4);
    std::assert_eq!(nad27.to_wgs84.unwrap().ty, 160.0);

    std::assert!(table.get(Datum::EGM96).unwrap().to_wgs84.is_none());
    std::assert!(matches!(table.shift(Datum::EGM96, Datum::WGS84), Err(GeoError::NotSupported(_))));
}

#[test]
fn test_datum_table_from_toml_and_insert() {
    let toml = r#"
        [datums.NAD27]
        semi_major_axis = 6378206.4
        inverse_flattening = 294.978698214
        to_wgs84 = [-10, 158, 187, 0, 0, 0, 0]

        [datums.ED50]
        semi_major_axis = 6378388.0
        inverse_flattening = 297.0
    "#;
    let overrides = DatumTable::from_str(toml).unwrap();
    std::assert_eq!(overrides.get(Datum::NAD27).unwrap().to_wgs84.unwrap().tz, 187.0);
    std::assert!(overrides.get(Datum::WGS84).is_err());

    let mut table = DatumTable::builtin();
    table.merge(overrides);
    std::assert_eq!(table.get(Datum::NAD27).unwrap().to_wgs84.unwrap().tx, -10.0);

    let mut empty = DatumTable::empty();
    std::assert!(matches!(empty.get(Datum::WGS84), Err(GeoError::NotSupported(_))));
    empty.insert(
        Datum::WGS84,
        DatumParameters {
            description: "custom".to_string(),
            ellipsoid: Ellipsoid::new(6378137.0, 298.257223563),
            to_wgs84: None,
        },
    );
    std::assert!(empty.get(Datum::WGS84).is_ok());

    std::assert!(DatumTable::from_str("[datums.WGS84]\nsemi_major_axis = 1.0").is_err());
}
