//! `refresh-po`: merge the existing catalogs against the current template.

use crate::commands::{LoadedProject, ProjectArgs};
use crate::core::CliError;
use crate::pipeline::{discover_catalogs, refresh_catalogs, select_catalogs};
use crate::utils::ui;
use clap::Parser;

/// Arguments for the refresh-po command.
#[derive(Debug, Clone, Default, Parser)]
pub struct RefreshPoArgs {
    /// Only refresh these locale(s) (can be specified multiple times).
    #[arg(short, long)]
    pub locale: Vec<String>,

    /// Show how each catalog would change without writing it.
    #[arg(long)]
    pub dry_run: bool,
}

/// Run the refresh-po command.
pub fn run_refresh_po(project: &ProjectArgs, args: &RefreshPoArgs) -> Result<(), CliError> {
    let loaded = LoadedProject::load(project)?;

    ui::print_header(&loaded.project.package);
    refresh(&loaded, &args.locale, args.dry_run)
}

/// Refresh the selected catalogs, printing one line per catalog and a summary.
pub(crate) fn refresh(
    loaded: &LoadedProject,
    locales: &[String],
    dry_run: bool,
) -> Result<(), CliError> {
    let project = &loaded.project;

    let catalogs = match select_catalogs(discover_catalogs(&project.po_dir)?, locales) {
        Ok(catalogs) => catalogs,
        Err(CliError::LocaleNotFound(err)) => {
            ui::print_locale_not_found(&err.locale, &err.available);
            return Err(err.into());
        },
        Err(err) => return Err(err),
    };

    if catalogs.is_empty() {
        ui::print_no_catalogs(&project.po_dir);
        return Ok(());
    }

    let pb = ui::create_progress_bar(catalogs.len() as u64, "Refreshing catalogs...");
    let summary = refresh_catalogs(project, &catalogs, &loaded.toolchain, dry_run, |outcome| {
        pb.set_message(format!("Refreshing {}.po", outcome.locale));
        pb.suspend(|| match &outcome.preview {
            Some(preview) if preview.has_changes() => {
                ui::print_would_refresh(&outcome.locale);
                preview.print();
            },
            Some(_) => {},
            None => ui::print_refresh_outcome(outcome),
        });
        pb.inc(1);
    });
    pb.finish_and_clear();

    ui::print_refresh_summary(&summary?);
    Ok(())
}
