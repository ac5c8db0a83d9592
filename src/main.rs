//! lifeframe CLI - Run the Game of Life in the terminal.

use std::fs::File;
use std::path::PathBuf;

use lifeframe::{AppConfig, Error};

fn main() {
    let args: Vec<String> = std::env::args().collect();

    match args.get(1).map(String::as_str) {
        Some("--example") => {
            print_example_config();
            return;
        }
        Some("-h" | "--help") => {
            print_usage(&args[0]);
            return;
        }
        _ => {}
    }

    let config = match args.get(1) {
        Some(path) => AppConfig::load(&PathBuf::from(path)),
        None => Ok(AppConfig::default()),
    };
    let config = config.unwrap_or_else(|e| exit_with(&e));

    if let Err(e) = init_logging(&config) {
        exit_with(&e);
    }

    if let Err(e) = lifeframe::run(config) {
        exit_with(&e);
    }
}

/// Initialise env_logger. The terminal is taken over by the app, so logs go
/// to `log_file` when one is configured.
fn init_logging(config: &AppConfig) -> Result<(), Error> {
    let mut builder = env_logger::Builder::from_default_env();
    if let Some(path) = &config.log_file {
        let file = File::create(path).map_err(|source| Error::LogFile {
            path: path.clone(),
            source,
        })?;
        builder.target(env_logger::Target::Pipe(Box::new(file)));
    }
    builder.init();
    Ok(())
}

fn print_usage(program: &str) {
    eprintln!("Usage: {program} [config.json]");
    eprintln!();
    eprintln!("Run Conway's Game of Life in the terminal.");
    eprintln!();
    eprintln!("Arguments:");
    eprintln!("  config.json  Optional configuration file (defaults are used otherwise)");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --example    Print the default configuration");
    eprintln!();
    eprintln!("Controls: space play/pause, s step, r reset, c clear, +/- or 1-9 speed, q quit.");
    eprintln!("Click toggles a cell; shift+click stamps a pulsar, ctrl/alt+click a glider.");
}

fn print_example_config() {
    match serde_json::to_string_pretty(&AppConfig::default()) {
        Ok(json) => println!("{json}"),
        Err(e) => exit_with(&Error::ConfigParse(e)),
    }
}

fn exit_with(error: &Error) -> ! {
    eprintln!("Error: {error}");
    std::process::exit(1);
}
