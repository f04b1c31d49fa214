//! Command line definition shared by the binary and its tests

use clap::{Arg, ArgAction, Command as ClapCommand};

/// Build the `terrakit` argument parser
pub fn cli() -> ClapCommand {
    ClapCommand::new("terrakit")
        .version(env!("CARGO_PKG_VERSION"))
        .author("Maurice Schilpp")
        .about("Convert coordinates between geodetic and UTM, and inspect or convert raster images")
        .arg(
            Arg::new("input")
                .help("Input image file")
                .required(false)
                .index(1),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .help("TOML options file")
                .value_name("FILE")
                .required(false),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Enable verbose output")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("quiet")
                .short('q')
                .long("quiet")
                .help("Hide the progress bar")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("coordinate")
                .long("coordinate")
                .help("Geodetic coordinate to project, 'lat,lon[,alt]'")
                .value_name("COORDINATE")
                .allow_hyphen_values(true)
                .conflicts_with("utm")
                .required(false),
        )
        .arg(
            Arg::new("utm")
                .long("utm")
                .help("UTM coordinate to unproject, 'zoneN easting northing [alt]'")
                .value_name("UTM")
                .required(false),
        )
        .arg(
            Arg::new("zone")
                .long("zone")
                .help("Force the UTM zone (1-60) for --coordinate")
                .value_name("ZONE")
                .required(false),
        )
        .arg(
            Arg::new("datum")
                .long("datum")
                .help("Datum of the input coordinate (WGS84, NAD83, NAD27, EGM96)")
                .value_name("DATUM")
                .required(false),
        )
        .arg(
            Arg::new("to-datum")
                .long("to-datum")
                .help("Datum of the output coordinate, defaults to the input datum")
                .value_name("DATUM")
                .required(false),
        )
        .arg(
            Arg::new("info")
                .short('i')
                .long("info")
                .help("Print image size, layout and metadata")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("output")
                .short('o')
                .long("output")
                .help("Output image file; the format follows the extension")
                .value_name("FILE")
                .required(false),
        )
        .arg(
            Arg::new("pixel")
                .long("pixel")
                .help("Output pixel format, e.g. gray8, gray16, rgb8, rgba8")
                .value_name("FORMAT")
                .required(false),
        )
        .arg(
            Arg::new("colormap")
                .long("colormap")
                .help("CSV color map applied to a single-band input")
                .value_name("FILE")
                .required(false),
        )
}
