//! `update-po`: regenerate the template, then refresh every catalog.

use crate::commands::{LoadedProject, ProjectArgs, prepare_template, refresh_po};
use crate::core::CliError;
use crate::utils::ui;
use clap::Parser;

/// Arguments for the update-po command.
#[derive(Debug, Clone, Default, Parser)]
pub struct UpdatePoArgs {
    /// Regenerate the template even when no source changed.
    #[arg(long)]
    pub force: bool,

    /// Show how each catalog would change without writing it.
    #[arg(long)]
    pub dry_run: bool,
}

/// Run the update-po command.
///
/// Succeeds even when some catalogs fail to merge; those are reported and
/// left as they were.
pub fn run_update_po(project: &ProjectArgs, args: &UpdatePoArgs) -> Result<(), CliError> {
    let loaded = LoadedProject::load(project)?;

    ui::print_header(&loaded.project.package);
    prepare_template(&loaded, args.force)?;
    refresh_po::refresh(&loaded, &[], args.dry_run)
}
