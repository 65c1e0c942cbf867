use std::path::PathBuf;

use clap::Args;
use unisteno_core::{CarrierKind, CarrierRegistry, EngineOptions};

use crate::cli::password_or_prompt;
use crate::CliResult;

/// Reports how many payload bytes a carrier can take
#[derive(Args, Debug)]
pub struct CapacityArgs {
    /// Password that would be used for hiding, it decides about encryption overhead
    #[arg(short, long, value_name = "password")]
    pub password: Option<String>,

    /// Carrier media to inspect
    #[arg(short = 'i', long = "in", value_name = "media file", required = true)]
    pub media: PathBuf,

    /// Name that would be stored along with the payload
    #[arg(short, long, value_name = "name", default_value = "")]
    pub name: String,
}

impl CapacityArgs {
    pub fn run(
        self,
        registry: &CarrierRegistry,
        kind: Option<CarrierKind>,
        options: EngineOptions,
    ) -> CliResult<()> {
        let password = password_or_prompt(self.password, false);

        let report = unisteno_core::commands::capacity(
            registry,
            &self.media,
            &self.name,
            password.as_deref(),
            kind,
            options,
        )?;

        println!("kind:            {}", report.kind);
        println!("valid units:     {}", report.valid_units);
        println!("frame overhead:  {} bytes", report.overhead_bytes);
        println!("encrypted:       {}", report.encrypted);
        println!("max payload:     {} bytes", report.max_payload_bytes);

        Ok(())
    }
}
