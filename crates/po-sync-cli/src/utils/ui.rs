// CLI output formatting with consistent styling using indicatif and colored.
// User-facing lines go through println!/eprintln!; diagnostics go through tracing.

use crate::core::{CompileSummary, InstallSummary, RefreshOutcome, RefreshSummary, TemplateStatus};
use colored::Colorize as _;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use tracing_subscriber::EnvFilter;

const PD_TICK: Duration = Duration::from_millis(100);

/// Environment variable holding the log filter (`warn` when unset).
pub const LOG_ENV: &str = "PO_SYNC_LOG";

static E2E_MODE: AtomicBool = AtomicBool::new(false);

/// Enable E2E mode for deterministic output (no colors, fixed durations, hidden progress bars).
pub fn set_e2e_mode(enabled: bool) {
    E2E_MODE.store(enabled, Ordering::SeqCst);
    if enabled {
        colored::control::set_override(false);
    }
}

pub fn is_e2e() -> bool {
    E2E_MODE.load(Ordering::SeqCst)
}

fn format_duration(duration: Duration) -> String {
    if is_e2e() {
        "[DURATION]".to_string()
    } else {
        // sub-millisecond precision is noise next to process spawn times
        let millis = Duration::from_millis(duration.as_millis() as u64);
        humantime::format_duration(millis).to_string()
    }
}

fn log_filter(verbosity: u8) -> EnvFilter {
    let level = match verbosity {
        0 => return EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    EnvFilter::new(level)
}

/// Install the stderr log subscriber.
///
/// `-v` flags win over `PO_SYNC_LOG`. Calling this twice is harmless.
pub fn init_logging(verbosity: u8) {
    tracing_subscriber::fmt()
        .with_env_filter(log_filter(verbosity))
        .with_writer(std::io::stderr)
        .with_ansi(!is_e2e())
        .with_target(false)
        .without_time()
        .try_init()
        .ok();
}

pub fn create_spinner(msg: &str) -> ProgressBar {
    if is_e2e() {
        return ProgressBar::hidden();
    }
    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.green} {msg}") {
        pb.set_style(style.tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"));
    }
    pb.set_message(msg.to_string());
    pb.enable_steady_tick(PD_TICK);
    pb
}

pub fn create_progress_bar(len: u64, msg: &str) -> ProgressBar {
    if is_e2e() {
        return ProgressBar::hidden();
    }
    let pb = ProgressBar::new(len);
    if let Ok(style) = ProgressStyle::default_bar()
        .template("{spinner:.green} {msg} [{bar:40.cyan/blue}] {pos}/{len}")
    {
        pb.set_style(style.progress_chars("#>-"));
    }
    pb.set_message(msg.to_string());
    pb.enable_steady_tick(PD_TICK);
    pb
}

pub fn print_header(package: &str) {
    println!("{} {}", "po-sync".dimmed(), package.bold());
}

// Pipeline stage printers

pub fn print_discovered_sources(count: usize, manifest: &Path) {
    println!(
        "{} {} {}",
        "Discovered".dimmed(),
        format!("{count} source file(s)").green(),
        format!("-> {}", manifest.display()).dimmed()
    );
}

pub fn print_template_status(status: TemplateStatus, template: &Path, duration: Duration) {
    let name = template
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    match status {
        TemplateStatus::Regenerated => println!(
            "{} {} ({})",
            "Extracted".dimmed(),
            name.green(),
            format_duration(duration).green()
        ),
        TemplateStatus::UpToDate => println!("{} {}", name.green(), "is up to date".dimmed()),
    }
}

pub fn print_no_catalogs(po_dir: &Path) {
    println!(
        "{} {}",
        "No catalogs found in".yellow(),
        po_dir.display()
    );
}

pub fn print_refresh_outcome(outcome: &RefreshOutcome) {
    match &outcome.error {
        None => println!(
            "{} {} ({})",
            format!("{}.po", outcome.locale).green(),
            "refreshed".dimmed(),
            format_duration(outcome.duration).green()
        ),
        Some(error) => eprintln!(
            "{} {}: {}",
            "Refresh failed for".red(),
            format!("{}.po", outcome.locale).white().bold(),
            error
        ),
    }
}

pub fn print_would_refresh(locale: &str) {
    println!("{} {}.po", "Would update".yellow(), locale);
}

pub fn print_refresh_summary(summary: &RefreshSummary) {
    let failed = summary.failed();
    let failed_text = format!("{failed} failed");
    println!(
        "{} {} succeeded, {}",
        "Refresh:".green(),
        summary.succeeded(),
        if failed > 0 {
            failed_text.red()
        } else {
            failed_text.normal()
        }
    );
}

pub fn print_compile_summary(summary: &CompileSummary) {
    println!(
        "{} compiled {}, up to date {}",
        "Compile:".green(),
        summary.compiled.len(),
        summary.up_to_date.len()
    );
}

pub fn print_install_summary(summary: &InstallSummary, root: &Path) {
    for path in &summary.installed {
        println!("{} {}", "Installed".dimmed(), path.display());
    }
    println!(
        "{} installed {}, skipped {} {}",
        "Install:".green(),
        summary.installed.len(),
        summary.skipped.len(),
        format!("({})", root.display()).dimmed()
    );
}

pub fn print_removed(path: &Path) {
    println!("{} {}", "Removed".dimmed(), path.display());
}

pub fn print_clean_summary(count: usize) {
    if count == 0 {
        println!("{}", "Nothing to clean.".dimmed());
    } else {
        println!("{} {} file(s) removed", "Done:".green(), count);
    }
}

pub fn print_locale_not_found(locale: &str, available: &str) {
    eprintln!(
        "{} '{}'. Available locales: {}",
        "Locale not found:".red(),
        locale.white().bold(),
        available.cyan()
    );
}

pub fn print_diff(old: &str, new: &str) {
    // Colors are suppressed by `colored::control::set_override(false)` in e2e mode.
    use similar::{ChangeTag, TextDiff};

    let diff = TextDiff::from_lines(old, new);

    for (idx, group) in diff.grouped_ops(3).iter().enumerate() {
        if idx > 0 {
            println!("{}", "  ...".dimmed());
        }
        for op in group {
            for change in diff.iter_changes(op) {
                let sign = match change.tag() {
                    ChangeTag::Delete => "-",
                    ChangeTag::Insert => "+",
                    ChangeTag::Equal => " ",
                };
                let line = format!("{sign} {change}");
                match change.tag() {
                    ChangeTag::Delete => print!("{}", line.red()),
                    ChangeTag::Insert => print!("{}", line.green()),
                    ChangeTag::Equal => print!("{}", line.dimmed()),
                }
            }
        }
    }
}
