//! UI helpers for consistent output formatting.

use std::time::Duration;

use console::Style;
use indicatif::{ProgressBar, ProgressStyle};
use snoop_core::Severity;

/// Single-character Unicode glyphs used as status indicators.
pub mod indicators {
    /// Error indicator (✖).
    pub const ERROR: &str = "✖";
    /// Warning indicator (⚠).
    pub const WARNING: &str = "⚠";
    /// Success indicator (✓).
    pub const SUCCESS: &str = "✓";
}

/// Semantic colour palette for terminal output.
pub mod colors {
    use console::Style;

    /// Red - errors.
    pub const fn error() -> Style {
        Style::new().red()
    }

    /// Yellow - warnings and skipped files.
    pub const fn warning() -> Style {
        Style::new().yellow()
    }

    /// Green - success messages.
    pub const fn success() -> Style {
        Style::new().green()
    }

    /// White bold - primary/headline text.
    pub const fn primary() -> Style {
        Style::new().white().bold()
    }

    /// Light grey - secondary descriptive text.
    pub const fn secondary() -> Style {
        Style::new().color256(252)
    }

    /// Dark grey - muted/contextual text.
    pub const fn muted() -> Style {
        Style::new().color256(243)
    }

    /// Cyan - accent highlights (commands, links).
    pub const fn accent() -> Style {
        Style::new().cyan()
    }
}

/// Process exit codes.
pub mod exit {
    /// Secrets were found.
    pub const FINDINGS: i32 = 1;
    /// An unrecoverable error occurred.
    pub const ERROR: i32 = 2;
}

const SEVERITY_HIGH_COLOR: u8 = 196;
const SEVERITY_MEDIUM_COLOR: u8 = 208;
const SEVERITY_LOW_COLOR: u8 = 75;

/// Returns the terminal colour style for a given severity level.
pub const fn severity_style(severity: Severity) -> Style {
    match severity {
        Severity::High => Style::new().color256(SEVERITY_HIGH_COLOR).bold(),
        Severity::Medium => Style::new().color256(SEVERITY_MEDIUM_COLOR),
        Severity::Low => Style::new().color256(SEVERITY_LOW_COLOR),
    }
}

/// Returns a severity-coloured error indicator glyph.
#[must_use]
pub fn severity_indicator(severity: Severity) -> String {
    severity_style(severity).apply_to(indicators::ERROR).to_string()
}

/// Prints a red error message to stderr.
pub fn print_error(message: &str) {
    eprintln!(
        "{} {}",
        colors::error().apply_to(indicators::ERROR),
        colors::secondary().apply_to(message)
    );
}

/// Prints a yellow warning message to stderr.
pub fn print_warning(message: &str) {
    eprintln!(
        "{} {}",
        colors::warning().apply_to(indicators::WARNING),
        colors::secondary().apply_to(message)
    );
}

/// Returns `singular` when `count` is 1, otherwise `plural`.
#[must_use]
pub const fn pluralise_word<'a>(count: usize, singular: &'a str, plural: &'a str) -> &'a str {
    if count == 1 { singular } else { plural }
}

const PROGRESS_TICK_MS: u64 = 100;

/// Creates a progress bar for file scanning with the given total file count.
#[must_use]
pub fn create_file_progress(total: usize) -> ProgressBar {
    let pb = ProgressBar::new(total as u64);

    #[expect(
        clippy::expect_used,
        reason = "static template string; failure is a programmer error"
    )]
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{bar:40.cyan/243} {percent:>3}% {pos}/{len} files ({elapsed} elapsed)")
            .expect("invalid progress template")
            .progress_chars("━━╸"),
    );

    pb.enable_steady_tick(Duration::from_millis(PROGRESS_TICK_MS));
    pb
}

#[derive(Debug, Default)]
struct SeverityCounts {
    high: usize,
    medium: usize,
    low: usize,
}

impl SeverityCounts {
    const fn increment(&mut self, severity: Severity) {
        match severity {
            Severity::High => self.high += 1,
            Severity::Medium => self.medium += 1,
            Severity::Low => self.low += 1,
        }
    }
}

/// Builds a one-line severity breakdown string (e.g. "✖ 2 high · ✖ 1 low").
#[must_use]
pub fn build_severity_summary<T, F>(items: &[T], get_severity: F) -> String
where
    F: Fn(&T) -> Severity,
{
    let mut counts = SeverityCounts::default();
    for item in items {
        counts.increment(get_severity(item));
    }

    let mut parts = Vec::with_capacity(3);
    if counts.high > 0 {
        parts.push(format_count(counts.high, "high", Severity::High));
    }
    if counts.medium > 0 {
        parts.push(format_count(counts.medium, "medium", Severity::Medium));
    }
    if counts.low > 0 {
        parts.push(format_count(counts.low, "low", Severity::Low));
    }

    parts.join(" · ")
}

fn format_count(count: usize, label: &str, severity: Severity) -> String {
    format!(
        "{} {} {}",
        severity_indicator(severity),
        colors::secondary().apply_to(count),
        colors::muted().apply_to(label)
    )
}

/// Formats an elapsed scan duration in milliseconds, switching to seconds
/// once the scan takes longer than one.
#[must_use]
pub fn format_duration(d: Duration) -> String {
    if d.as_secs() >= 1 {
        format!("{:.2}s", d.as_secs_f64())
    } else {
        format!("{:.1}ms", d.as_secs_f64() * 1_000.0)
    }
}

/// Returns the clap colour theme used by the CLI.
#[must_use]
pub fn clap_styles() -> clap::builder::Styles {
    use clap::builder::styling::{AnsiColor, Effects, Style};

    clap::builder::Styles::styled()
        .header(
            Style::new()
                .fg_color(Some(AnsiColor::Cyan.into()))
                .effects(Effects::BOLD),
        )
        .usage(
            Style::new()
                .fg_color(Some(AnsiColor::Cyan.into()))
                .effects(Effects::BOLD),
        )
        .literal(Style::new().fg_color(Some(AnsiColor::Cyan.into())))
        .placeholder(Style::new().fg_color(Some(AnsiColor::BrightBlack.into())))
        .error(
            Style::new()
                .fg_color(Some(AnsiColor::Red.into()))
                .effects(Effects::BOLD),
        )
}
