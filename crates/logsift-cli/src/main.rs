use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use clap::Parser;
use tracing_subscriber::EnvFilter;

use logsift_core::SiftError;
use logsift_engine::Analyzer;

#[derive(Parser)]
#[command(
    name = "logsift",
    version,
    about = "Classify log lines into metric, event and request domains and write per-domain JSON summaries"
)]
struct Cli {
    /// Log file to analyze
    #[arg(long)]
    file: PathBuf,
    /// Directory for the three summary files (overrides config)
    #[arg(long)]
    out_dir: Option<PathBuf>,
    /// Optional logsift.toml
    #[arg(long)]
    config: Option<PathBuf>,
    /// Compact JSON instead of pretty-printed
    #[arg(long)]
    compact: bool,
}

fn main() {
    init_logging();
    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

/// RUST_LOG controls verbosity; classifier diagnostics land on stderr at
/// warn level by default.
fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: Cli) -> Result<(), SiftError> {
    let mut config = match cli.config {
        Some(ref path) => {
            logsift_config::load(path).map_err(|e| SiftError::Config(e.to_string()))?
        }
        None => logsift_config::SiftConfig::default(),
    };
    if let Some(dir) = cli.out_dir {
        config.output.dir = dir.display().to_string();
    }
    if cli.compact {
        config.output.pretty = false;
    }

    if !cli.file.is_file() {
        return Err(SiftError::InputNotFound(cli.file.display().to_string()));
    }

    println!("[logsift] Processing log file: {}", cli.file.display());

    let reader = BufReader::new(File::open(&cli.file)?);
    let mut analyzer = Analyzer::new();
    for line in reader.lines() {
        analyzer.offer(&line?);
    }
    let report = analyzer.finish();

    println!(
        "[logsift] {} lines read, {} classified, {} unclassified",
        report.lines_total,
        report.lines_handled,
        report.unclassified.len()
    );

    let out_dir = Path::new(&config.output.dir);
    let pretty = config.output.pretty;
    write_json(&out_dir.join(&config.output.apm), &report.summaries.apm, pretty)?;
    write_json(
        &out_dir.join(&config.output.application),
        &report.summaries.application,
        pretty,
    )?;
    write_json(
        &out_dir.join(&config.output.request),
        &report.summaries.request,
        pretty,
    )?;

    println!(
        "[logsift] Wrote {}, {} and {} to {}",
        config.output.apm,
        config.output.application,
        config.output.request,
        out_dir.display()
    );
    Ok(())
}

/// Serialize one summary to its own file. Empty summaries still produce a
/// file containing `{}`.
fn write_json<T: serde::Serialize>(path: &Path, value: &T, pretty: bool) -> Result<(), SiftError> {
    let body = if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    }
    .map_err(|e| SiftError::Serialize(e.to_string()))?;
    std::fs::write(path, body)?;
    Ok(())
}
