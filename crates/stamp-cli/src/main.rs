use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser, Debug)]
#[command(name = "stamp", version, about = "Issue and verify token claims payloads")]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Issue an encoded claims payload for a subject.
    Issue {
        /// Path to the stamp YAML configuration.
        #[arg(long, env = "STAMP_CONFIG")]
        config: PathBuf,

        /// Subject identity the claims represent.
        #[arg(long)]
        subject: String,

        /// Role granted to the subject (repeatable).
        #[arg(long = "role")]
        roles: Vec<String>,

        /// Issue as if the clock read this epoch second.
        #[arg(long, allow_hyphen_values = true)]
        now: Option<i64>,
    },

    /// Verify an encoded claims payload and print the accepted claims.
    Verify {
        /// Path to the stamp YAML configuration.
        #[arg(long, env = "STAMP_CONFIG")]
        config: PathBuf,

        /// Verify as if the clock read this epoch second.
        #[arg(long, allow_hyphen_values = true)]
        now: Option<i64>,

        /// Encoded payload, or a file containing it.
        payload: String,
    },

    /// Decode a payload without verifying it.
    Inspect {
        /// Encoded payload, or a file containing it.
        payload: String,
    },

    /// Check a configuration file for consistency.
    Check {
        /// Path to the stamp YAML configuration.
        #[arg(long, env = "STAMP_CONFIG")]
        config: PathBuf,
    },
}

fn main() -> anyhow::Result<()> {
    // Logs go to stderr so stdout stays pipeable.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let output = match cli.cmd {
        Command::Issue {
            config,
            subject,
            roles,
            now,
        } => commands::token::issue(&config, &subject, roles, now)?,

        Command::Verify {
            config,
            now,
            payload,
        } => commands::token::verify(&config, &payload, now)?,

        Command::Inspect { payload } => commands::token::inspect(&payload)?,

        Command::Check { config } => commands::check::run(&config)?,
    };

    println!("{output}");
    Ok(())
}
