//! CLI command implementations
//!
//! This module contains implementations of various commands
//! supported by the CLI application using the Command pattern.

pub mod cli;
pub mod command_traits;
pub mod convert_image_command;
pub mod coordinate_command;
pub mod info_command;

pub use cli::cli;
pub use command_traits::{Command, CommandFactory};
pub use convert_image_command::ConvertImageCommand;
pub use coordinate_command::CoordinateCommand;
pub use info_command::InfoCommand;

use clap::ArgMatches;

use crate::config::Options;
use crate::errors::{GeoError, GeoResult};
use crate::utils::logger::Logger;

/// Factory for creating command instances based on CLI arguments
pub struct TerrakitCommandFactory {
    options: Options,
}

impl TerrakitCommandFactory {
    /// Create a new factory instance
    pub fn new(options: Options) -> Self {
        TerrakitCommandFactory { options }
    }
}

impl<'a> CommandFactory<'a> for TerrakitCommandFactory {
    fn create_command(&self, args: &ArgMatches, logger: &'a Logger) -> GeoResult<Box<dyn Command + 'a>> {
        if args.contains_id("coordinate") || args.contains_id("utm") {
            Ok(Box::new(CoordinateCommand::new(args, &self.options, logger)?))
        } else if args.get_flag("info") {
            Ok(Box::new(InfoCommand::new(args, logger)?))
        } else if args.contains_id("output") {
            Ok(Box::new(ConvertImageCommand::new(args, &self.options, logger)?))
        } else if args.contains_id("input") {
            // An input alone is reported on
            Ok(Box::new(InfoCommand::new(args, logger)?))
        } else {
            Err(GeoError::GenericError(
                "Nothing to do: give --coordinate/--utm, or an input image with --info or --output".to_string(),
            ))
        }
    }
}
