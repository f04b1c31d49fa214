use std::process;
use log::error;

use terrakit::commands::{cli, CommandFactory, TerrakitCommandFactory};
use terrakit::config::Options;
use terrakit::utils::logger::Logger;

fn main() {
    let matches = cli().get_matches();

    let mut options = match matches.get_one::<String>("config") {
        Some(path) => match Options::from_file(path) {
            Ok(options) => options,
            Err(e) => {
                eprintln!("Error loading options: {}", e);
                process::exit(1);
            }
        },
        None => Options::default(),
    };
    if matches.get_flag("verbose") {
        options.log_level = log::LevelFilter::Debug;
    }

    let logger = match &options.log_file {
        Some(log_file) => {
            if let Err(e) = Logger::init_global_logger(&format!("{}.global", log_file), options.log_level) {
                eprintln!("Error setting up global logger: {}", e);
                process::exit(1);
            }
            match Logger::with_level(log_file, options.log_level) {
                Ok(l) => l,
                Err(e) => {
                    eprintln!("Error initializing logger: {}", e);
                    process::exit(1);
                }
            }
        }
        None => {
            env_logger::Builder::from_env(
                env_logger::Env::default().default_filter_or(options.log_level.as_str()),
            )
            .init();
            Logger::disabled()
        }
    };

    let factory = TerrakitCommandFactory::new(options);

    let command_result = factory.create_command(&matches, &logger);
    match command_result {
        Ok(command) => {
            if let Err(e) = command.execute() {
                error!("Command execution error: {}", e);
                eprintln!("Error: {}", e);
                process::exit(1);
            }
        }
        Err(e) => {
            error!("Failed to create command: {}", e);
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };
}
