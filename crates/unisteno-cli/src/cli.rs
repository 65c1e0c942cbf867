use std::io::IsTerminal;

use clap::{Parser, Subcommand};
use unisteno_core::{CarrierKind, CarrierRegistry, EngineOptions, KdfParams};

use crate::commands::*;
use crate::CliResult;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct CliArgs {
    /// Treat the carrier as this kind (image, audio, video or text) instead of guessing it from the path
    #[arg(long, global = true, value_name = "kind")]
    pub kind: Option<CarrierKind>,

    /// Experimental: Argon2 memory cost in KiB, hide and unveil must use the same value
    #[arg(long = "x-kdf-memory", global = true, value_name = "KiB")]
    pub kdf_memory: Option<u32>,

    /// Experimental: Argon2 iterations, hide and unveil must use the same value
    #[arg(long = "x-kdf-iterations", global = true, value_name = "N")]
    pub kdf_iterations: Option<u32>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    Hide(hide::HideArgs),
    Unveil(unveil::UnveilArgs),
    Capacity(capacity::CapacityArgs),
}

impl CliArgs {
    pub fn options(&self) -> EngineOptions {
        let defaults = KdfParams::default();

        EngineOptions::default().with_kdf(KdfParams {
            memory_kib: self.kdf_memory.unwrap_or(defaults.memory_kib),
            iterations: self.kdf_iterations.unwrap_or(defaults.iterations),
            ..defaults
        })
    }

    pub fn run(self, registry: &CarrierRegistry) -> CliResult<()> {
        let options = self.options();

        match self.command {
            Commands::Hide(args) => args.run(registry, self.kind, options),
            Commands::Unveil(args) => args.run(registry, self.kind, options),
            Commands::Capacity(args) => args.run(registry, self.kind, options),
        }
    }
}

/// prompts for a password if stdin is a terminal, an empty answer means no password
pub fn ask_for_password(confirm: bool) -> Option<String> {
    if !std::io::stdin().is_terminal() {
        return None;
    }

    let mut prompt = dialoguer::Password::new()
        .with_prompt("Password (leave empty for none)")
        .allow_empty_password(true);
    if confirm {
        prompt = prompt.with_confirmation("Repeat password", "Passwords do not match");
    }

    prompt.interact().ok().filter(|p| !p.is_empty())
}

/// `-p` wins, otherwise the user is asked
pub fn password_or_prompt(password: Option<String>, confirm: bool) -> Option<String> {
    password.or_else(|| ask_for_password(confirm))
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn cli_definition_is_consistent() {
        CliArgs::command().debug_assert();
    }

    #[test]
    fn global_flags_go_after_the_subcommand_too() {
        let args = CliArgs::try_parse_from([
            "unisteno",
            "unveil",
            "-i",
            "stego.txt",
            "-o",
            "out",
            "--kind",
            "TEXT",
            "--x-kdf-iterations",
            "1",
        ])
        .unwrap();

        assert_eq!(args.kind, Some(CarrierKind::Text));
        assert_eq!(args.options().kdf.iterations, 1);
        assert_eq!(args.options().kdf.memory_kib, KdfParams::default().memory_kib);
    }

    #[test]
    fn hide_needs_a_file_or_a_message() {
        assert!(
            CliArgs::try_parse_from(["unisteno", "hide", "-i", "a.png", "-o", "b.png"]).is_err()
        );
        assert!(CliArgs::try_parse_from([
            "unisteno", "hide", "-i", "a.png", "-o", "b.png", "-m", "hi"
        ])
        .is_ok());
    }

    #[test]
    fn unknown_kinds_are_rejected() {
        assert!(CliArgs::try_parse_from([
            "unisteno", "--kind", "pdf", "capacity", "-i", "a.pdf"
        ])
        .is_err());
    }
}
