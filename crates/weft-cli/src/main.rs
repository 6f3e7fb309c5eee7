//! Weft CLI entry point.

use std::{io, process, str::FromStr};

use clap::Parser;
use log::{LevelFilter, debug, error, info};

use weft::config::ErrorStyle;
use weft_cli::{Args, error_adapter, load_config};

fn main() {
    // Install miette's pretty panic hook early for better panic reports
    miette::set_panic_hook();

    let args = Args::parse();

    let log_level = LevelFilter::from_str(&args.log_level).unwrap_or_else(|_| {
        eprintln!(
            "Invalid log level: {}. Using 'warn' instead.",
            args.log_level
        );
        LevelFilter::Warn
    });

    env_logger::Builder::from_env(env_logger::Env::default())
        .filter_level(log_level)
        .init();

    info!(log_level:?; "Starting Weft");
    debug!(args:?; "Parsed arguments");

    let config = match load_config(args.config.as_ref()) {
        Ok(config) => config,
        Err(err) => {
            error!("{}", error_adapter::render(&err, ErrorStyle::Fancy));
            process::exit(1);
        }
    };
    let style = config.output().error_style();

    if let Err(err) = weft_cli::run(&args, config, &mut io::stdout().lock()) {
        error!("{}", error_adapter::render(&err, style));
        process::exit(1);
    }

    info!("Completed successfully");
}
