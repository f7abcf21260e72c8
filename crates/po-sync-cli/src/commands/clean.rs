//! `clean` and `distclean`: remove generated files.

use crate::commands::{LoadedProject, ProjectArgs};
use crate::core::CliError;
use crate::pipeline::{CleanLevel, clean};
use crate::utils::ui;

/// Remove compiled catalogs, editor backups and `.depend`.
pub fn run_clean(project: &ProjectArgs) -> Result<(), CliError> {
    run(project, CleanLevel::Soft)
}

/// Everything `clean` removes plus the manifest, the template and the build state.
pub fn run_distclean(project: &ProjectArgs) -> Result<(), CliError> {
    run(project, CleanLevel::Full)
}

fn run(project: &ProjectArgs, level: CleanLevel) -> Result<(), CliError> {
    let loaded = LoadedProject::load(project)?;

    let removed = clean(&loaded.project, level)?;
    for path in &removed {
        ui::print_removed(path);
    }
    ui::print_clean_summary(removed.len());
    Ok(())
}
