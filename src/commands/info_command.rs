//! Image information command

use std::path::Path;

use clap::ArgMatches;
use log::info;

use crate::commands::command_traits::Command;
use crate::driver::DriverRegistry;
use crate::errors::{GeoError, GeoResult};
use crate::image::MetadataContainer;
use crate::utils::logger::Logger;

/// Command reporting an image's size, layout and sidecar metadata
pub struct InfoCommand<'a> {
    input_file: String,
    registry: DriverRegistry,
    logger: &'a Logger,
}

impl<'a> InfoCommand<'a> {
    pub fn new(args: &ArgMatches, logger: &'a Logger) -> GeoResult<Self> {
        let input_file = args
            .get_one::<String>("input")
            .ok_or_else(|| GeoError::GenericError("Missing input file".to_string()))?
            .clone();

        Ok(InfoCommand {
            input_file,
            registry: DriverRegistry::new(),
            logger,
        })
    }

    /// Collect the report lines
    pub fn report(&self) -> GeoResult<Vec<(String, String)>> {
        let path = Path::new(&self.input_file);
        if !path.is_file() {
            return Err(GeoError::FileNotFound(self.input_file.clone()));
        }

        let mut driver = self.registry.driver_for_file(path)?;
        let header = driver.open(path)?;

        let mut entries = vec![
            ("Driver".to_string(), driver.name().to_string()),
            ("Size".to_string(), format!("{}x{}", header.cols, header.rows)),
            ("Shape".to_string(), format!("{} ({} channels)", header.shape, header.shape.channels())),
            ("Channel".to_string(), header.kind.to_string()),
        ];

        if let Some(metadata) = MetadataContainer::read_sidecar(path)? {
            for key in metadata.keys() {
                if let Some(value) = metadata.get(key) {
                    entries.push((format!("Metadata {}", key), value.to_string()));
                }
            }
        }
        Ok(entries)
    }
}

impl<'a> Command for InfoCommand<'a> {
    fn execute(&self) -> GeoResult<()> {
        info!("Reading image information from {}", self.input_file);

        let entries = self.report()?;
        println!("Image: {}", self.input_file);
        for (key, value) in &entries {
            println!("  {}: {}", key, value);
        }

        self.logger.log_section(&format!("Image {}", self.input_file), &entries)?;
        Ok(())
    }
}
