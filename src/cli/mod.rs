//! Command-line surface: argument parsing, logging setup and dispatch.

mod commands;
mod progress;

use anyhow::Result;
use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};
use email_verdict_core::{Config, ConfigBuilder, ExportFormat};
use std::path::PathBuf;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "email-verdict")]
#[command(version)]
#[command(about = "Validate email addresses: syntax, disposable providers and DNS deliverability")]
pub struct Cli {
    /// Path to a TOML configuration file
    #[arg(short, long, global = true, env = "EMAIL_VERDICT_CONFIG", value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Skip DNS lookups and only apply address rules for deliverability
    #[arg(long, global = true)]
    pub no_dns: bool,

    /// Per-query DNS timeout
    #[arg(long, global = true, value_name = "SECS")]
    pub dns_timeout: Option<u64>,

    /// More log output (-v info, -vv debug)
    #[arg(short, long, global = true, action = ArgAction::Count, conflicts_with = "quiet")]
    pub verbose: u8,

    /// Only log errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Verify one or more addresses and print each result as JSON
    Check {
        /// Addresses to verify
        #[arg(required = true, value_name = "EMAIL")]
        emails: Vec<String>,

        /// Print single-line JSON instead of pretty output
        #[arg(long)]
        compact: bool,
    },

    /// Verify every address in a CSV file and export the results
    Bulk(BulkArgs),
}

#[derive(Args, Debug)]
pub struct BulkArgs {
    /// CSV file with a header row containing the email column
    #[arg(short, long, value_name = "CSV")]
    pub input: PathBuf,

    /// Output file (defaults to the configured file name)
    #[arg(short, long, value_name = "FILE", conflicts_with = "stdout")]
    pub output: Option<PathBuf>,

    /// Output format (inferred from the output extension when omitted)
    #[arg(short, long, value_enum)]
    pub format: Option<FormatArg>,

    /// Name of the column holding the addresses
    #[arg(long, value_name = "NAME")]
    pub column: Option<String>,

    /// Write CSV or JSON results to stdout instead of a file
    #[arg(long)]
    pub stdout: bool,

    /// Hide the progress bar
    #[arg(long)]
    pub no_progress: bool,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum FormatArg {
    Xlsx,
    Csv,
    Json,
}

impl From<FormatArg> for ExportFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Xlsx => ExportFormat::Xlsx,
            FormatArg::Csv => ExportFormat::Csv,
            FormatArg::Json => ExportFormat::Json,
        }
    }
}

/// Installs the stderr log subscriber. `RUST_LOG` wins when set.
pub fn init_tracing(verbose: u8, quiet: bool) {
    let default_level = match (quiet, verbose) {
        (true, _) => "error",
        (false, 0) => "warn",
        (false, 1) => "info",
        (false, _) => "debug",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

impl Cli {
    fn build_config(&self) -> Result<Config> {
        let mut builder = ConfigBuilder::new();
        if let Some(ref path) = self.config {
            builder = builder.config_path(path);
        }
        if self.no_dns {
            builder = builder.check_dns(false);
        }
        if let Some(secs) = self.dns_timeout {
            builder = builder.dns_timeout(Duration::from_secs(secs));
        }
        if let Commands::Bulk(ref args) = self.command {
            if let Some(ref column) = args.column {
                builder = builder.email_column(column.clone());
            }
        }
        Ok(builder.build()?)
    }

    pub async fn run(self) -> Result<()> {
        let config = self.build_config()?;
        if let Some(ref path) = config.loaded_config_path {
            tracing::info!("Using configuration from {}", path);
        }

        match self.command {
            Commands::Check { emails, compact } => commands::check(&config, &emails, compact).await,
            Commands::Bulk(args) => commands::bulk(&config, &args).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_bulk_arguments() {
        let cli = Cli::parse_from([
            "email-verdict",
            "--no-dns",
            "bulk",
            "--input",
            "contacts.csv",
            "--format",
            "csv",
            "--column",
            "Mail",
            "-vv",
        ]);
        assert!(cli.no_dns);
        assert_eq!(cli.verbose, 2);
        match cli.command {
            Commands::Bulk(args) => {
                assert_eq!(args.input, PathBuf::from("contacts.csv"));
                assert_eq!(args.format, Some(FormatArg::Csv));
                assert_eq!(args.column.as_deref(), Some("Mail"));
                assert!(args.output.is_none());
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn check_requires_an_address() {
        assert!(Cli::try_parse_from(["email-verdict", "check"]).is_err());
    }
}
