//! `report`: completeness statistics for every catalog.

use crate::commands::{LoadedProject, ProjectArgs};
use crate::core::CliError;
use crate::pipeline::{discover_catalogs, report_statistics};

/// Run the report command.
pub fn run_report(project: &ProjectArgs) -> Result<(), CliError> {
    let loaded = LoadedProject::load(project)?;
    let catalogs = discover_catalogs(&loaded.project.po_dir)?;

    let mut stdout = std::io::stdout().lock();
    report_statistics(&catalogs, &loaded.toolchain, &mut stdout)?;
    Ok(())
}
