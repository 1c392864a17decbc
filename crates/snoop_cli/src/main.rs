//! `snoop` - scan file trees for hardcoded secrets.
//!
//! Walks a directory (or single file), runs every builtin detection rule
//! against each line, and reports findings with masked secret values.
//! Exits 1 when secrets are found and 2 on unrecoverable errors.

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

mod report;
mod runner;
mod ui;

use std::io::Write as _;
use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context as _, bail};
use clap::{CommandFactory, FromArgMatches, Parser};
use console::style;
use snoop_core::{RuleSet, Scanner, Severity, collect_files};

use crate::ui::colors;

const REPO_URL: &str = "https://github.com/snoop-scan/snoop";

/// Output format for scan results.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable terminal output.
    #[default]
    Text,
    /// Machine-readable JSON.
    Json,
}

#[derive(Debug, Parser)]
#[command(name = "snoop", version, styles = ui::clap_styles())]
struct Cli {
    /// Directory or file to scan.
    #[arg(default_value = ".")]
    path: PathBuf,

    /// Output format.
    #[arg(short, long, value_enum, default_value_t)]
    format: OutputFormat,

    /// Minimum severity level to report (low, medium, or high).
    #[arg(short, long)]
    severity: Option<Severity>,

    /// Always exit with code 0, even when secrets are found.
    #[arg(long)]
    exit_zero: bool,

    /// Number of parallel scanning threads.
    #[arg(long)]
    concurrency: Option<usize>,

    /// Disable the progress bar.
    #[arg(long)]
    no_progress: bool,

    /// Increase log verbosity (repeat for more detail).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() {
    let cli = parse_cli();

    init_tracing(cli.verbose);

    match run(&cli) {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            ui::print_error(&format!("{e:#}"));
            std::process::exit(ui::exit::ERROR);
        }
    }
}

fn parse_cli() -> Cli {
    let cmd = Cli::command().about(build_about()).after_help(build_after_help());

    let matches = cmd.get_matches();

    #[expect(clippy::expect_used, reason = "clap already validated args; this cannot fail")]
    Cli::from_arg_matches(&matches).expect("failed to parse arguments")
}

fn init_tracing(verbose: u8) {
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).without_time().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)))
        .init();
}

fn run(cli: &Cli) -> anyhow::Result<i32> {
    if let Some(threads) = cli.concurrency {
        rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build_global()
            .context("failed to configure thread pool")?;
    }

    if !cli.path.exists() {
        bail!("path '{}' does not exist", cli.path.display());
    }

    let rules = RuleSet::builtin().context("failed to compile builtin rules")?;
    let scanner = Scanner::new(rules);

    let started = Instant::now();
    let files = collect_files(&cli.path);

    let show_progress =
        cli.format == OutputFormat::Text && !cli.no_progress && console::user_attended();
    let result = runner::run_scan(&scanner, &files, cli.severity, show_progress);
    let elapsed = started.elapsed();

    for (path, reason) in &result.skipped {
        ui::print_warning(&format!("skipped {}: {reason}", path.display()));
    }

    let stdout = std::io::stdout();
    let mut writer = stdout.lock();
    match cli.format {
        OutputFormat::Text => report::write_text(&result, elapsed, &mut writer)?,
        OutputFormat::Json => report::write_json(&result, &mut writer)?,
    }
    writer.flush()?;

    if !result.findings.is_empty() && !cli.exit_zero {
        return Ok(ui::exit::FINDINGS);
    }
    Ok(0)
}

fn build_about() -> String {
    format!(
        r"
  {} is a fast, local-first scanner for hardcoded secrets.

  Detects API keys, tokens, passwords, and private keys in file
  trees before they reach your repository. Works offline. Zero
  configuration.",
        colors::accent().apply_to("snoop").bold()
    )
}

fn build_after_help() -> String {
    format!(
        r"
  {}
    snoop                          Scan current directory
    snoop src/                     Scan a specific path
    snoop . --format json          Output as JSON
    snoop . --severity high        Report high-severity findings only
    snoop . --exit-zero            Never fail the build

  Learn more: {}",
        style("Examples:").bold(),
        colors::accent().apply_to(REPO_URL).underlined()
    )
}
