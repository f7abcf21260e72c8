//! `install`: build, then copy the compiled catalogs into the locale tree.

use crate::commands::{LoadedProject, ProjectArgs, all};
use crate::core::CliError;
use crate::pipeline::install_catalogs;
use crate::utils::ui;
use clap::Parser;
use std::path::PathBuf;

/// Arguments for the install command.
#[derive(Debug, Clone, Default, Parser)]
pub struct InstallArgs {
    /// Regenerate the template even when no source changed.
    #[arg(long)]
    pub force: bool,

    /// Staging directory prepended to the install root.
    #[arg(long, env = "DESTDIR")]
    pub dest_dir: Option<PathBuf>,
}

/// Run the install command.
pub fn run_install(project: &ProjectArgs, args: &InstallArgs) -> Result<(), CliError> {
    let loaded = LoadedProject::load(project)?;
    let catalogs = all::build(&loaded, args.force)?;

    let dest_dir = args.dest_dir.as_deref().filter(|d| !d.as_os_str().is_empty());
    let root = loaded.project.effective_install_root(dest_dir);
    let summary = install_catalogs(&loaded.project, &catalogs, dest_dir)?;

    ui::print_install_summary(&summary, &root);
    Ok(())
}
