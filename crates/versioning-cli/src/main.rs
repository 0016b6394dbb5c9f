mod commands;
mod config;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::process::ExitCode;

use commands::{CommandOutput, ERROR_EXIT_CODE};
use config::{OutputFormat, VersioningConfig};

#[derive(Parser, Debug)]
#[command(name = "versioning")]
#[command(about = "Parse, compare and range-check Semantic Versioning 2.0.0 versions")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format (overrides versioning.toml)
    #[arg(long, global = true, value_enum)]
    format: Option<OutputFormat>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Parse a version and print its fields
    Parse {
        #[arg(value_name = "VERSION")]
        version: String,
    },
    /// Compare two versions by precedence
    Compare {
        #[arg(value_name = "LEFT")]
        left: String,
        #[arg(value_name = "RIGHT")]
        right: String,
    },
    /// Sort versions by precedence
    Sort {
        #[arg(value_name = "VERSIONS", required = true)]
        versions: Vec<String>,
        /// Sort in descending order
        #[arg(short, long)]
        reverse: bool,
    },
    /// Print the version with the lowest precedence
    Min {
        #[arg(value_name = "VERSIONS", required = true)]
        versions: Vec<String>,
    },
    /// Print the version with the highest precedence
    Max {
        #[arg(value_name = "VERSIONS", required = true)]
        versions: Vec<String>,
    },
    /// Check whether versions lie within a range such as "[1.0.0, 2.0.0)"
    #[command(after_help = "Exits with 0 if every version is in the range, 1 if any is outside, 2 on invalid input.")]
    Includes {
        #[arg(value_name = "RANGE")]
        range: String,
        #[arg(value_name = "VERSIONS", required = true)]
        versions: Vec<String>,
    },
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_timestamp(None)
        .init();
}

fn run() -> Result<u8> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let format = match cli.format {
        Some(format) => format,
        None => VersioningConfig::load_from_cwd()?
            .map(|config| config.output.format)
            .unwrap_or_default(),
    };
    log::debug!("Using {:?} output", format);

    let output: CommandOutput = match &cli.command {
        Commands::Parse { version } => commands::parse(version, format)?,
        Commands::Compare { left, right } => commands::compare(left, right, format)?,
        Commands::Sort { versions, reverse } => commands::sort(versions, *reverse, format)?,
        Commands::Min { versions } => commands::min(versions, format)?,
        Commands::Max { versions } => commands::max(versions, format)?,
        Commands::Includes { range, versions } => commands::includes(range, versions, format)?,
    };

    println!("{}", output.stdout);
    Ok(output.exit_code)
}

fn main() -> ExitCode {
    match run() {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            eprintln!("Error: {}", e);
            for cause in e.chain().skip(1) {
                eprintln!("  Caused by: {}", cause);
            }
            ExitCode::from(ERROR_EXIT_CODE)
        }
    }
}
