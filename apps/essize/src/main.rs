use anyhow::{Result, bail};
use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use log::{debug, info, warn};
use serde::Serialize;
use std::io::{BufWriter, Write};
use std::path::PathBuf;
use std::time::Instant;

use essize_build::{EsbuildCommand, human_size, measure_record};
use essize_core::{Lang, classify_imports, compile_probe};
use essize_package::{package_root, package_version};

#[derive(Parser)]
#[command(name = "essize")]
#[command(about = "Estimate the bundled and gzipped size of JavaScript/TypeScript imports", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Print the canonical probe snippet for each import in a source snippet
    Probe(ProbeArgs),
    /// Measure the bundled and gzipped size of each import in a source snippet
    Cost(CostArgs),
    /// Print the installed version of a package
    Version(VersionArgs),
}

#[derive(Debug, Args)]
struct ProbeArgs {
    /// Source snippet containing import/require statements
    snippet: String,

    /// Source dialect of the snippet
    #[arg(long, default_value = "ts", value_parser = ["ts", "js"])]
    lang: String,
}

#[derive(Debug, Args)]
struct CostArgs {
    /// Source snippet containing import/require statements
    snippet: String,

    /// A file inside the consuming project, used to locate its root
    #[arg(long)]
    file: PathBuf,

    /// Source dialect of the snippet
    #[arg(long, default_value = "ts", value_parser = ["ts", "js"])]
    lang: String,

    /// Path to the esbuild binary
    #[arg(long, default_value = "esbuild")]
    esbuild: PathBuf,

    /// Emit results as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Args)]
struct VersionArgs {
    /// Package name to look up
    package: String,

    /// A file inside the consuming project, used to locate its root
    #[arg(long)]
    file: PathBuf,
}

#[derive(Debug, Serialize)]
struct CostEntry {
    package: String,
    version: Option<String>,
    size: u64,
    gzip: u64,
}

fn lang_of(tag: &str) -> Lang {
    match tag {
        "js" => Lang::JavaScript,
        _ => Lang::TypeScript,
    }
}

fn main() -> Result<()> {
    env_logger::init();

    // stdio is blocked by LineWriter, use a BufWriter to reduce syscalls.
    // See https://github.com/rust-lang/rust/issues/60673
    let mut stdout = BufWriter::new(std::io::stdout());

    let cli = Cli::parse();
    debug!("Parsed CLI arguments: {:?}", cli.command);

    let start = Instant::now();

    match cli.command {
        Commands::Probe(args) => {
            let records = classify_imports(&args.snippet, lang_of(&args.lang))?;
            if records.is_empty() {
                bail!("No imports found in snippet");
            }
            for record in &records {
                writeln!(stdout, "{}", compile_probe(record))?;
            }
            stdout.flush()?;
        }
        Commands::Cost(args) => {
            let lang = lang_of(&args.lang);
            let records = classify_imports(&args.snippet, lang)?;
            if records.is_empty() {
                bail!("No imports found in snippet");
            }
            info!("Measuring {} import(s)", records.len());

            let resolve_dir = package_root(&args.file)?;
            debug!("Resolved project root: {}", resolve_dir.display());
            let bundler = EsbuildCommand::new(&args.esbuild);

            let mut entries = Vec::new();
            for record in &records {
                let measured = measure_record(record, &resolve_dir, lang, &bundler)?;
                let version = match package_version(&record.package, &args.file) {
                    Ok(v) => Some(v),
                    Err(err) => {
                        warn!("Could not determine version of '{}': {}", record.package, err);
                        None
                    }
                };
                entries.push(CostEntry {
                    package: measured.package,
                    version,
                    size: measured.size,
                    gzip: measured.gzip,
                });
            }

            if args.json {
                serde_json::to_writer_pretty(&mut stdout, &entries)?;
                writeln!(stdout)?;
            } else {
                for entry in &entries {
                    let name = match &entry.version {
                        Some(version) => format!("{}@{}", entry.package, version),
                        None => entry.package.clone(),
                    };
                    writeln!(
                        stdout,
                        "{} {} (gzip: {})",
                        name.bold(),
                        human_size(entry.size).cyan(),
                        human_size(entry.gzip).cyan()
                    )?;
                }
                let elapsed_ms = start.elapsed().as_millis();
                writeln!(
                    stdout,
                    "\n{} Finished in {}ms on {} import(s).",
                    "●".bright_blue(),
                    elapsed_ms.to_string().cyan(),
                    entries.len().to_string().cyan()
                )?;
            }
            stdout.flush()?;
        }
        Commands::Version(args) => {
            let version = package_version(&args.package, &args.file)?;
            writeln!(stdout, "{}@{}", args.package, version)?;
            stdout.flush()?;
        }
    }

    Ok(())
}
