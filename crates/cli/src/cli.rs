// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use std::path::PathBuf;

use crate::helpers::telemetry::setup_simple_tracing;
use crate::{decrypt, encrypt, params, setup};
use anyhow::Result;
use clap::{ArgAction, Parser, Subcommand};
use ntru_config::{load_config, CliOverrides, NtruConfig};
use ntru_params::NtruPreset;
use tracing::{debug, instrument, Level};

#[derive(Parser, Debug)]
#[command(name = "ntru")]
#[command(about = "Generate NTRUEncrypt keys and encrypt or decrypt files with them", long_about = None)]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, global = true)]
    config: Option<String>,

    /// Public key file, overrides the configured one
    #[arg(long, global = true)]
    pubkey: Option<PathBuf>,

    /// Private key file, overrides the configured one
    #[arg(long, global = true)]
    privkey: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,

    /// Indicate error levels by adding additional `-v` arguments. Eg. `ntru -vvv` will give you
    /// trace level output
    #[arg(
        short,
        long,
        action = ArgAction::Count,
        global = true
    )]
    pub verbose: u8,

    /// Silence all output. This argument cannot be used alongside `-v`
    #[arg(
        short,
        long,
        action = ArgAction::SetTrue,
        conflicts_with = "verbose",
        global = true
    )]
    quiet: bool,
}

impl Cli {
    pub fn log_level(&self) -> Level {
        if self.quiet {
            Level::ERROR
        } else {
            match self.verbose {
                0 => Level::WARN,  //
                1 => Level::INFO,  // -v
                2 => Level::DEBUG, // -vv
                _ => Level::TRACE, // -vvv
            }
        }
    }

    #[instrument(skip_all)]
    pub fn execute(self) -> Result<()> {
        setup_simple_tracing(self.log_level());

        let config = self.load_config()?;
        debug!("Using configuration {:?}", config);

        match self.command {
            Commands::Setup { .. } => setup::execute(&config)?,
            Commands::Encrypt { input, output } => encrypt::execute(&config, &input, output)?,
            Commands::Decrypt { input, output } => decrypt::execute(&config, &input, output)?,
            Commands::Params => params::execute(&config),
        }

        Ok(())
    }

    pub fn load_config(&self) -> Result<NtruConfig> {
        let param_set = match &self.command {
            Commands::Setup { param_set } => *param_set,
            _ => None,
        };
        load_config(
            self.config.clone(),
            CliOverrides {
                param_set,
                pubkey_file: self.pubkey.clone(),
                privkey_file: self.privkey.clone(),
            },
        )
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate a key pair. Existing key files are moved aside first.
    Setup {
        /// Parameter set, e.g. ees401ep1. Defaults to the configured one
        param_set: Option<NtruPreset>,
    },

    /// Encrypt a file for the holder of the public key
    Encrypt {
        input: PathBuf,

        /// Defaults to the input path with `.enc` appended
        output: Option<PathBuf>,
    },

    /// Decrypt a file with the private key
    Decrypt {
        input: PathBuf,

        /// Defaults to the input path with `.dec` appended
        output: Option<PathBuf>,
    },

    /// List the available parameter sets
    Params,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_setup() {
        let cli = Cli::try_parse_from(["ntru", "setup", "EES1087EP2", "-vv"]).unwrap();
        assert_eq!(cli.log_level(), Level::DEBUG);
        assert!(matches!(
            cli.command,
            Commands::Setup {
                param_set: Some(NtruPreset::Ees1087Ep2)
            }
        ));

        assert!(Cli::try_parse_from(["ntru", "setup", "ees1ep1"]).is_err());
    }

    #[test]
    fn test_parse_global_flags() {
        let cli = Cli::try_parse_from([
            "ntru",
            "encrypt",
            "notes.txt",
            "--pubkey",
            "alice.pub",
            "--config",
            "conf.yaml",
            "-q",
        ])
        .unwrap();
        assert_eq!(cli.log_level(), Level::ERROR);
        assert_eq!(cli.pubkey, Some(PathBuf::from("alice.pub")));
        assert_eq!(cli.config.as_deref(), Some("conf.yaml"));
        match cli.command {
            Commands::Encrypt { input, output } => {
                assert_eq!(input, PathBuf::from("notes.txt"));
                assert_eq!(output, None);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_quiet_conflicts_with_verbose() {
        assert!(Cli::try_parse_from(["ntru", "params", "-q", "-v"]).is_err());
        let cli = Cli::try_parse_from(["ntru", "params"]).unwrap();
        assert_eq!(cli.log_level(), Level::WARN);
    }

    #[test]
    fn test_setup_argument_overrides_config() {
        figment::Jail::expect_with(|jail| {
            jail.create_file("ntru.config.yaml", "param_set: ees659ep1\n")?;

            let cli = Cli::try_parse_from(["ntru", "setup", "ees761ep1"]).unwrap();
            let config = cli.load_config().map_err(|e| e.to_string())?;
            assert_eq!(config.param_set, NtruPreset::Ees761Ep1);

            let cli = Cli::try_parse_from(["ntru", "--privkey", "mine.key", "params"]).unwrap();
            let config = cli.load_config().map_err(|e| e.to_string())?;
            assert_eq!(config.param_set, NtruPreset::Ees659Ep1);
            assert_eq!(config.privkey_file, PathBuf::from("mine.key"));
            Ok(())
        });
    }
}
