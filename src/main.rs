//! modflat
//!
//! Flattens a folder of Fabric mod jars: every jar embedded in another jar is
//! pulled out, one version per mod id is kept, and the kept jars are written
//! without their embedded copies.

use anyhow::{Context, Result};
use clap::Parser;
use modflat_lib::{flatten, FlattenPaths, FlattenSettings};
use std::io::Write;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "modflat")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Folder holding the top-level jars (defaults to the current directory)
    #[arg(long)]
    input: Option<PathBuf>,

    /// Scratch folder, wiped before and after the run
    #[arg(long)]
    staging: Option<PathBuf>,

    /// Folder receiving the flattened jars
    #[arg(long)]
    output: Option<PathBuf>,

    /// JSON settings file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long)]
    debug: bool,

    /// Print the report as JSON
    #[arg(long)]
    json: bool,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.debug);

    if let Err(e) = run(cli) {
        eprintln!("Error: {e:?}");
        std::process::exit(1);
    }
}

fn init_logging(debug: bool) {
    let level = if debug {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .format(|buf, record| writeln!(buf, "[{}] {}", record.level(), record.args()))
        .init();
}

fn run(cli: Cli) -> Result<()> {
    let settings = match &cli.config {
        Some(path) => FlattenSettings::load(path)
            .with_context(|| format!("Failed to load settings from {}", path.display()))?,
        None => FlattenSettings::default(),
    };

    let input = match cli.input {
        Some(input) => input,
        None => std::env::current_dir().context("Failed to resolve the current directory")?,
    };
    let mut paths = FlattenPaths::in_dir(&input);
    if let Some(staging) = cli.staging {
        paths.staging_dir = staging;
    }
    if let Some(output) = cli.output {
        paths.output_dir = output;
    }
    log::debug!("Running with {paths:?}");

    let report = flatten(&settings, &paths).context("Flatten failed")?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!();
        println!("{report}");
    }
    log::info!(
        "Wrote {} jar(s) to {}",
        report.written_count(),
        paths.output_dir.display()
    );
    Ok(())
}
