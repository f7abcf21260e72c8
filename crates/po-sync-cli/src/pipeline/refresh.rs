//! Catalog refresh: merge every catalog against the template, one at a time.
//!
//! Each catalog is an independent transaction. It is backed up, merged into a
//! temporary file, and only a complete merge result is renamed over the live
//! catalog. A failing merge restores the backup and the run moves on.

use super::CatalogBackup;
use crate::core::{
    Catalog, CliError, DryRunDiff, LocaleNotFoundError, Project, RefreshOutcome, RefreshSummary,
    TemplateNotFoundError,
};
use crate::toolchain::Toolchain;
use anyhow::{Context as _, Result, anyhow};
use fs_err as fs;
use std::path::Path;
use std::time::Instant;

/// Refresh `catalogs` against the project's template.
///
/// Only a missing template is fatal. Per-catalog failures are reported through
/// `on_outcome` and the returned summary.
pub fn refresh_catalogs(
    project: &Project,
    catalogs: &[Catalog],
    toolchain: &dyn Toolchain,
    dry_run: bool,
    mut on_outcome: impl FnMut(&RefreshOutcome),
) -> Result<RefreshSummary, CliError> {
    let template = project.template_path();
    if !template.exists() {
        return Err(TemplateNotFoundError { path: template }.into());
    }

    let mut summary = RefreshSummary::default();
    for catalog in catalogs {
        let outcome = refresh_catalog(catalog, &template, toolchain, dry_run);
        on_outcome(&outcome);
        summary.outcomes.push(outcome);
    }

    Ok(summary)
}

/// Refresh a single catalog, rolling it back if the merge fails.
pub fn refresh_catalog(
    catalog: &Catalog,
    template: &Path,
    toolchain: &dyn Toolchain,
    dry_run: bool,
) -> RefreshOutcome {
    let start = Instant::now();
    let result = merge_with_rollback(catalog, template, toolchain, dry_run);
    let duration = start.elapsed();

    match result {
        Ok(preview) => {
            tracing::info!(locale = %catalog.locale, "catalog refreshed");
            RefreshOutcome::success(catalog.locale.clone(), duration, preview)
        },
        Err(err) => {
            tracing::warn!(locale = %catalog.locale, "catalog refresh failed: {err:#}");
            RefreshOutcome::failure(catalog.locale.clone(), duration, format!("{err:#}"))
        },
    }
}

fn merge_with_rollback(
    catalog: &Catalog,
    template: &Path,
    toolchain: &dyn Toolchain,
    dry_run: bool,
) -> Result<Option<DryRunDiff>> {
    let backup = CatalogBackup::acquire(catalog)
        .with_context(|| format!("Failed to back up {}", catalog.path.display()))?;

    let dir = catalog.path.parent().unwrap_or(Path::new("."));
    let merged = tempfile::Builder::new()
        .prefix(".po-sync-")
        .suffix(".tmp")
        .tempfile_in(dir)
        .context("Failed to create merge output file")?;

    toolchain
        .merge(backup.path(), template, merged.path())
        .map_err(|err| anyhow!(err.summary()))?;

    if merged.as_file().metadata()?.len() == 0 {
        return Err(anyhow!("merge produced an empty catalog"));
    }

    if dry_run {
        let before = fs::read_to_string(&catalog.path)?;
        let after = fs::read_to_string(merged.path())?;
        backup.commit()?;
        return Ok(Some(DryRunDiff::new(before, after)));
    }

    // NamedTempFile is created 0600; keep the catalog's own permissions
    fs::set_permissions(merged.path(), fs::metadata(&catalog.path)?.permissions())?;
    merged
        .persist(&catalog.path)
        .map_err(|err| err.error)
        .with_context(|| format!("Failed to replace {}", catalog.path.display()))?;

    // the live catalog already holds the merge result, so this is not a failure
    let backup_path = backup.path().to_path_buf();
    if let Err(err) = backup.commit() {
        tracing::warn!(
            backup = %backup_path.display(),
            "catalog refreshed but its backup could not be removed: {err}"
        );
    }
    Ok(None)
}

/// Keep only the catalogs for the requested locales; an empty request keeps all.
pub fn select_catalogs(catalogs: Vec<Catalog>, locales: &[String]) -> Result<Vec<Catalog>, CliError> {
    if locales.is_empty() {
        return Ok(catalogs);
    }

    if let Some(missing) = locales
        .iter()
        .find(|locale| !catalogs.iter().any(|c| &c.locale == *locale))
    {
        let available: Vec<&str> = catalogs.iter().map(|c| c.locale.as_str()).collect();
        return Err(LocaleNotFoundError {
            locale: missing.clone(),
            available: if available.is_empty() {
                "none".to_string()
            } else {
                available.join(", ")
            },
        }
        .into());
    }

    Ok(catalogs
        .into_iter()
        .filter(|c| locales.contains(&c.locale))
        .collect())
}
