//! `all`: discovery, template generation and compilation.

use crate::commands::{LoadedProject, ProjectArgs, prepare_template};
use crate::core::{Catalog, CliError};
use crate::pipeline::{compile_catalogs, discover_catalogs};
use crate::utils::ui;
use clap::Parser;

/// Arguments for the all command.
#[derive(Debug, Clone, Default, Parser)]
pub struct AllArgs {
    /// Regenerate the template even when no source changed.
    #[arg(long)]
    pub force: bool,
}

/// Run the all command.
pub fn run_all(project: &ProjectArgs, args: &AllArgs) -> Result<(), CliError> {
    let loaded = LoadedProject::load(project)?;
    build(&loaded, args.force)?;
    Ok(())
}

/// Bring the template and every compiled catalog up to date.
///
/// Returns the catalogs found in the catalog directory.
pub(crate) fn build(loaded: &LoadedProject, force: bool) -> Result<Vec<Catalog>, CliError> {
    ui::print_header(&loaded.project.package);
    prepare_template(loaded, force)?;

    let catalogs = discover_catalogs(&loaded.project.po_dir)?;
    if catalogs.is_empty() {
        ui::print_no_catalogs(&loaded.project.po_dir);
        return Ok(catalogs);
    }

    let spinner = ui::create_spinner("Compiling catalogs...");
    let summary = compile_catalogs(&catalogs, &loaded.toolchain);
    spinner.finish_and_clear();

    ui::print_compile_summary(&summary?);
    Ok(catalogs)
}
