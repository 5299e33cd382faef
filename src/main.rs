//! batch-unpack: extract every ZIP, 7z and RAR archive found under a source path.

use batch_unpack::{ArchiveOutcome, ArchiveStatus, BatchReport, Config, Error, run_batch};
use clap::Parser;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::debug;
use tracing_subscriber::EnvFilter;

/// Exit code when the source path is invalid or the configuration cannot be loaded
const EXIT_INVALID: u8 = 1;
/// Exit code for `--strict` runs where at least one archive failed
const EXIT_FAILURES: u8 = 3;

/// Extract ZIP, 7z and RAR archives from a file or directory tree.
#[derive(Parser, Debug)]
#[command(name = "batch-unpack")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Archive file or directory to search for archives.
    #[arg(short, long)]
    source: PathBuf,

    /// Directory to extract into (created if missing).
    #[arg(short, long)]
    destination: PathBuf,

    /// Path to a JSON configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error). RUST_LOG takes precedence.
    #[arg(long, default_value = "warn")]
    log_level: String,

    /// Print the run report as JSON instead of text.
    #[arg(long)]
    json: bool,

    /// Exit with a non-zero status if any archive failed.
    #[arg(long)]
    strict: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let config = match load_config(args.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{e}");
            return ExitCode::from(EXIT_INVALID);
        }
    };
    debug!(?config, "configuration loaded");

    let on_outcome = |outcome: &ArchiveOutcome| {
        if !args.json {
            println!("{}", outcome_line(outcome));
        }
    };

    let report = match run_batch(&args.source, &args.destination, &config, on_outcome) {
        Ok(report) => report,
        Err(e @ Error::InvalidSource { .. }) => {
            eprintln!("{e}");
            return ExitCode::from(EXIT_INVALID);
        }
        Err(e) => {
            eprintln!("error: {e}");
            return ExitCode::from(EXIT_INVALID);
        }
    };

    if let Err(e) = print_report(&report, args.json) {
        eprintln!("error: {e}");
        return ExitCode::from(EXIT_INVALID);
    }

    if args.strict && !report.is_success() {
        return ExitCode::from(EXIT_FAILURES);
    }
    ExitCode::SUCCESS
}

fn load_config(path: Option<&Path>) -> batch_unpack::Result<Config> {
    match path {
        Some(path) => Config::from_file(path),
        None => Ok(Config::default()),
    }
}

/// Per-archive console line
fn outcome_line(outcome: &ArchiveOutcome) -> String {
    match &outcome.status {
        ArchiveStatus::Extracted { .. } => {
            format!("Successfully extracted file {}", outcome.path.display())
        }
        ArchiveStatus::Failed { reason, .. } => format!(
            "Unable to extract {} due to Error: {}",
            outcome.path.display(),
            reason
        ),
    }
}

fn print_report(report: &BatchReport, json: bool) -> batch_unpack::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(report)?);
    } else {
        println!("{report}");
    }
    Ok(())
}
