//! `sealctl` — operator CLI entry point.
//!
//! Startup sequence:
//! 1. Parse the command line.
//! 2. Load and validate [`config::Config`] from environment variables.
//! 3. Initialise structured JSON logging on stderr.
//! 4. Build the sealer and run the subcommand over stdin/stdout.

mod commands;
mod config;
mod telemetry;

use std::io;
use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};
use sealer::SealError;
use tracing::error;

#[derive(Parser)]
#[command(name = "sealctl")]
#[command(about = "Seal and unseal data with the configured key ring or product key")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Seal stdin and print the envelope
    Seal {
        /// Context string the data is bound to
        #[arg(long, default_value = "")]
        salt: String,
    },
    /// Unseal the envelope on stdin and write the plaintext to stdout
    Unseal {
        /// Context string the data was sealed with
        #[arg(long, default_value = "")]
        salt: String,
    },
}

fn main() -> ExitCode {
    // -----------------------------------------------------------------------
    // 1. Command line
    // -----------------------------------------------------------------------
    let cli = Cli::parse();

    // -----------------------------------------------------------------------
    // 2. Configuration
    // -----------------------------------------------------------------------
    let cfg = match config::Config::from_env() {
        Ok(cfg) => cfg,
        Err(e) => {
            // Telemetry is not yet up; write to stderr directly.
            eprintln!("ERROR: sealctl configuration invalid: {e:#}");
            return ExitCode::from(78);
        }
    };

    // -----------------------------------------------------------------------
    // 3. Telemetry
    // -----------------------------------------------------------------------
    if let Err(e) = telemetry::init(&cfg.log_level) {
        eprintln!("ERROR: {e:#}");
        return ExitCode::FAILURE;
    }

    // -----------------------------------------------------------------------
    // 4. Command
    // -----------------------------------------------------------------------
    match run(cli.command, &cfg) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %format!("{e:#}"), "sealctl failed");
            eprintln!("ERROR: {e:#}");
            e.downcast_ref::<SealError>()
                .map_or(ExitCode::FAILURE, |seal_err| ExitCode::from(seal_err.exit_code()))
        }
    }
}

fn run(command: Command, cfg: &config::Config) -> Result<()> {
    let sealer = commands::build_sealer(cfg);
    let (stdin, stdout) = (io::stdin().lock(), io::stdout().lock());
    match command {
        Command::Seal { salt } => commands::seal(&sealer, &salt, stdin, stdout),
        Command::Unseal { salt } => commands::unseal(&sealer, &salt, stdin, stdout),
    }
}
