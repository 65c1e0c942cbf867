use std::path::PathBuf;

use clap::Args;
use unisteno_core::{CarrierKind, CarrierRegistry, EngineOptions};

use crate::cli::password_or_prompt;
use crate::CliResult;

/// Unveils a hidden payload and stores it in a folder
#[derive(Args, Debug)]
pub struct UnveilArgs {
    /// Password used when the data was hidden
    #[arg(short, long, value_name = "password")]
    pub password: Option<String>,

    /// Source media that contains secret data
    #[arg(
        short = 'i',
        long = "in",
        value_name = "media source file",
        required = true
    )]
    pub media: PathBuf,

    /// Final data will be stored in that folder
    #[arg(
        short = 'o',
        long = "out",
        value_name = "output folder",
        required = true
    )]
    pub output_folder: PathBuf,
}

impl UnveilArgs {
    pub fn run(
        self,
        registry: &CarrierRegistry,
        kind: Option<CarrierKind>,
        options: EngineOptions,
    ) -> CliResult<()> {
        let password = password_or_prompt(self.password, false);

        let written = unisteno_core::commands::unveil(
            registry,
            &self.media,
            &self.output_folder,
            password,
            kind,
            options,
        )?;
        println!("{}", written.display());

        Ok(())
    }
}
