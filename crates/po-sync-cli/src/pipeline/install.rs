//! Copy compiled catalogs into the locale tree.

use crate::core::{Catalog, InstallSummary, Project};
use anyhow::{Context as _, Result};
use fs_err as fs;
use std::path::Path;

/// Install every compiled catalog below the project's install root.
///
/// Each compiled catalog lands at
/// `<root>/<locale>/<messages_dir>/<package>.mo`, where `<root>` is the
/// install root re-rooted under `dest_dir` when one is given. Locales
/// without a compiled catalog are skipped and no directory is created for
/// them.
pub fn install_catalogs(
    project: &Project,
    catalogs: &[Catalog],
    dest_dir: Option<&Path>,
) -> Result<InstallSummary> {
    let root = project.effective_install_root(dest_dir);
    let file_name = project.installed_file_name();
    let mut summary = InstallSummary::default();

    for catalog in catalogs {
        let compiled = catalog.compiled_path();
        if !compiled.is_file() {
            tracing::debug!(locale = %catalog.locale, "no compiled catalog, skipping install");
            summary.skipped.push(catalog.locale.clone());
            continue;
        }

        let target_dir = root.join(&catalog.locale).join(&project.messages_dir);
        create_install_dir(&target_dir)
            .with_context(|| format!("Failed to create {}", target_dir.display()))?;

        let target = target_dir.join(&file_name);
        fs::copy(&compiled, &target)?;
        set_mode(&target, 0o644)?;

        tracing::info!(locale = %catalog.locale, target = %target.display(), "installed");
        summary.installed.push(target);
    }

    Ok(summary)
}

fn create_install_dir(dir: &Path) -> std::io::Result<()> {
    if dir.is_dir() {
        return Ok(());
    }

    #[cfg(unix)]
    {
        use std::os::unix::fs::DirBuilderExt as _;
        std::fs::DirBuilder::new()
            .recursive(true)
            .mode(0o755)
            .create(dir)
    }

    #[cfg(not(unix))]
    {
        fs::create_dir_all(dir)
    }
}

#[cfg(unix)]
fn set_mode(path: &Path, mode: u32) -> std::io::Result<()> {
    use std::os::unix::fs::PermissionsExt as _;
    fs::set_permissions(path, std::fs::Permissions::from_mode(mode))
}

#[cfg(not(unix))]
fn set_mode(_path: &Path, _mode: u32) -> std::io::Result<()> {
    Ok(())
}
