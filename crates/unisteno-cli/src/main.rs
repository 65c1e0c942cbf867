use std::process::ExitCode;

use clap::Parser;
use log::debug;

use unisteno_core::{CarrierRegistry, UnistenoError};

mod cli;
mod commands;

pub type CliResult<T> = Result<T, UnistenoError>;

fn main() -> ExitCode {
    env_logger::init();

    let args = cli::CliArgs::parse();
    let registry = CarrierRegistry::with_defaults();

    match args.run(&registry) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) if e.is_no_payload_found() => {
            debug!("unveiling failed: {e:?}");
            eprintln!("no payload found or wrong password");
            ExitCode::FAILURE
        }
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
