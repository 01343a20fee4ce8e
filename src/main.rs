//! CLI entry point for converting images to tilesets and tilemaps

use clap::Parser;
use log::error;
use std::process::ExitCode;
use tileforge::io::cli::Cli;

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    match Cli::parse().run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::from(e.exit_code())
        }
    }
}
