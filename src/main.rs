/*============================================================
  Synavera Project: Syn-Pub
  Module: synpub_core::main
  Etiquette: Synavera Script Etiquette — Rust Profile v1.1.1
  ------------------------------------------------------------
  Purpose:
    Entry point for Syn-Pub Core. Fetches published metadata
    for a list of packages from the registry and prints a short
    report for each one.

  Security / Safety Notes:
    Operates within user privileges. Performs HTTPS GET
    requests only.

  Dependencies:
    clap for CLI parsing, chrono for session stamps.

  Operational Scope:
    Run directly by operators, or from scripts that want a
    quick look at the latest published versions.

  Revision History:
    2026-10-18 COD  Authored Syn-Pub Core runtime.
  ------------------------------------------------------------
  SSE Principles Observed:
    - Result-first error handling with deterministic exits
    - Structured logging following Synavera cadence
    - Configurable execution via CLI and config file
============================================================*/

mod config;
mod error;
mod logger;
mod package_info;
mod pub_api;
mod report;

use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use chrono::Utc;
use clap::{ArgAction, Parser};

use config::SynpubConfig;
use error::Result;
use logger::Logger;
use pub_api::PubClient;
use report::report_packages;

/// Command-line arguments for Syn-Pub-Core.
#[derive(Debug, Parser)]
#[command(
    name = "Syn-Pub-Core",
    version,
    author = "Synavera Systems",
    about = "Published package metadata at a glance"
)]
struct Cli {
    /// Override configuration file path.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
    /// Override the registry base URL.
    #[arg(long, value_name = "URL")]
    base_url: Option<String>,
    /// Report on these packages instead of the configured list.
    #[arg(long = "package", value_name = "PKG", action = ArgAction::Append)]
    packages: Vec<String>,
    /// Explicit log file path.
    #[arg(long, value_name = "PATH")]
    log: Option<PathBuf>,
    /// Enable verbose logging to stderr.
    #[arg(long, action = ArgAction::SetTrue)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(code) => code,
        Err(err) => {
            eprintln!("[Syn-Pub-Core] {}", err);
            err.exit_code()
        }
    }
}

async fn run() -> Result<ExitCode> {
    let cli = Cli::parse();
    let config = resolve_config(&cli)?;
    let logger = open_logger(&cli, &config)?;
    logger.info("INIT", "Syn-Pub Core awakening.");

    let client = PubClient::new(&config.registry)?;
    let mut stdout = io::stdout().lock();
    let outcome = report_packages(&client, &config.run.packages, &mut stdout, &logger).await;

    let summary = match outcome {
        Ok(summary) => summary,
        Err(err) => {
            logger.error("ABORT", err.to_string());
            logger.seal()?;
            return Err(err);
        }
    };

    logger.info(
        "SUMMARY",
        format!("reported={} failed={}", summary.reported, summary.failed),
    );
    logger.info("COMPLETE", "Registry consulted.");
    if let Some(hash) = logger.seal()? {
        logger.debug("SEAL", format!("Digest written to {}", hash.display()));
    }

    Ok(ExitCode::SUCCESS)
}

/// Layer CLI overrides on top of the file configuration.
fn resolve_config(cli: &Cli) -> Result<SynpubConfig> {
    let mut config = SynpubConfig::load_from_optional_path(cli.config.as_deref())?;
    if let Some(base_url) = &cli.base_url {
        config.registry.base_url = base_url.clone();
    }
    if !cli.packages.is_empty() {
        config.run.packages = cli.packages.clone();
    }
    config.validate()?;
    Ok(config)
}

fn open_logger(cli: &Cli, config: &SynpubConfig) -> Result<Logger> {
    let path = cli.log.clone().or_else(|| {
        config.logging.persist.then(|| {
            let session_stamp = Utc::now().format("%Y-%m-%d_%H-%M-%S");
            config.log_dir().join(format!("fetch_{session_stamp}.log"))
        })
    });
    match path {
        Some(path) => Logger::with_file(path, cli.verbose),
        None => Ok(Logger::console(cli.verbose)),
    }
}
