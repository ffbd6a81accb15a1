//! # tensorhead: print safetensors metadata as JSON
//!
//! One JSON document per input path is written to stdout, one per line.
//! Logs go to stderr (`RUST_LOG` controls the level).

use anyhow::{Context, Result};
use clap::Parser;
use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;
use tensorhead::logging::{init_tracing, init_tracing_json};
use tensorhead::{assemble_with_config, ExtractConfig};
use tracing::info;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Safetensors files to inspect
    #[arg(required = true)]
    paths: Vec<PathBuf>,

    /// JSON configuration file; missing fields keep their defaults
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Read catalog ids from `<stem>.metadata.json` when present
    #[arg(long)]
    sidecar: bool,

    /// Include the SHA-256 of the whole file (reads the tensor payload)
    #[arg(long)]
    hash: bool,

    /// Pretty-print each JSON document
    #[arg(long)]
    pretty: bool,

    /// Emit logs as JSON
    #[arg(long)]
    json_logs: bool,
}

fn load_config(cli: &Cli) -> Result<ExtractConfig> {
    let mut config = match &cli.config {
        Some(path) => ExtractConfig::from_json_file(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => ExtractConfig::default(),
    };
    if cli.sidecar {
        config.sidecar.enabled = true;
    }
    if cli.hash {
        config.hashing.enabled = true;
    }
    Ok(config)
}

fn run(cli: &Cli) -> Result<bool> {
    let config = load_config(cli)?;
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    let mut all_ok = true;

    for path in &cli.paths {
        let result = assemble_with_config(path, &config);
        all_ok &= result.is_success();
        let line = if cli.pretty {
            serde_json::to_string_pretty(&result)?
        } else {
            serde_json::to_string(&result)?
        };
        writeln!(out, "{line}").context("writing to stdout")?;
    }

    info!(files = cli.paths.len(), all_ok, "Done");
    Ok(all_ok)
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    if cli.json_logs {
        init_tracing_json();
    } else {
        init_tracing();
    }

    match run(&cli) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("tensorhead: {e:#}");
            ExitCode::FAILURE
        }
    }
}
