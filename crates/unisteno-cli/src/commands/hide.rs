use std::path::PathBuf;

use clap::Args;
use unisteno_core::{CarrierKind, CarrierRegistry, EngineOptions};

use crate::cli::password_or_prompt;
use crate::CliResult;

/// Hides a file or a message in an image, WAV audio, video frame directory or text file
#[derive(Args, Debug)]
pub struct HideArgs {
    /// Password used to place and encrypt the data
    #[arg(short, long, value_name = "password")]
    pub password: Option<String>,

    /// Carrier media such as a PNG image, a WAV file, a frame directory or a text file, used readonly.
    #[arg(short = 'i', long = "in", value_name = "media file", required = true)]
    pub media: PathBuf,

    /// Final carrier will be stored here
    #[arg(
        short = 'o',
        long = "out",
        value_name = "output media file",
        required = true
    )]
    pub write_to_file: PathBuf,

    /// File to hide in the carrier
    #[arg(
        short = 'd',
        long = "data",
        value_name = "data file",
        required_unless_present = "message",
        conflicts_with = "message"
    )]
    pub data_file: Option<PathBuf>,

    /// A text message that will be hidden
    #[arg(
        short,
        long,
        value_name = "text message",
        required_unless_present = "data_file"
    )]
    pub message: Option<String>,

    /// Name stored along with the payload, defaults to the data file name
    #[arg(short, long, value_name = "name")]
    pub name: Option<String>,
}

impl HideArgs {
    pub fn run(
        self,
        registry: &CarrierRegistry,
        kind: Option<CarrierKind>,
        options: EngineOptions,
    ) -> CliResult<()> {
        let password = password_or_prompt(self.password, true);

        let report = unisteno_core::commands::hide(
            registry,
            &self.media,
            &self.write_to_file,
            self.data_file,
            self.message,
            self.name,
            password,
            kind,
            options,
        )?;

        println!(
            "{} of {} bits used{}, written to {}",
            report.bits_written,
            report.capacity,
            if report.encrypted { " (encrypted)" } else { "" },
            self.write_to_file.display()
        );

        Ok(())
    }
}
