//! Source and catalog discovery.

use crate::core::{BACKUP_SUFFIX, Catalog};
use anyhow::{Context as _, Result};
use fs_err as fs;
use indexmap::IndexSet;
use path_slash::PathExt as _;
use po_sync_toml::SourcePattern;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Source files feeding the template, relative to the project root.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct SourceFileSet {
    files: Vec<PathBuf>,
}

impl SourceFileSet {
    /// Relative paths in manifest order.
    pub fn files(&self) -> &[PathBuf] {
        &self.files
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Manifest text: one forward-slash path per line.
    pub fn to_manifest(&self) -> String {
        self.files
            .iter()
            .map(|path| format!("{}\n", path.to_slash_lossy()))
            .collect()
    }
}

/// Expand the source patterns below `root`.
///
/// Pattern order is kept, matches of a single pattern are sorted, and a file
/// matched by several patterns is listed once, at its first position.
pub fn discover_sources(root: &Path, patterns: &[SourcePattern]) -> Result<SourceFileSet> {
    let mut files: IndexSet<PathBuf> = IndexSet::new();

    for pattern in patterns {
        match pattern {
            SourcePattern::File(path) => {
                if root.join(path).is_file() {
                    files.insert(path.clone());
                } else {
                    tracing::warn!(pattern = %pattern, "source file does not exist, skipping");
                }
            },
            SourcePattern::Extension {
                dir,
                extension,
                recursive,
            } => {
                let search_dir = root.join(dir);
                if !search_dir.is_dir() {
                    tracing::debug!(pattern = %pattern, "source directory does not exist");
                    continue;
                }

                let max_depth = if *recursive { usize::MAX } else { 1 };
                for entry in WalkDir::new(&search_dir)
                    .min_depth(1)
                    .max_depth(max_depth)
                    .sort_by_file_name()
                {
                    let entry = entry.with_context(|| {
                        format!("Failed to scan {} for sources", search_dir.display())
                    })?;
                    let path = entry.path();
                    if entry.file_type().is_file()
                        && path.extension().is_some_and(|e| e == extension.as_str())
                    {
                        let relative = path.strip_prefix(root).with_context(|| {
                            format!("Failed to make {} relative to the root", path.display())
                        })?;
                        files.insert(relative.to_path_buf());
                    }
                }
            },
        }
    }

    Ok(SourceFileSet {
        files: files.into_iter().collect(),
    })
}

/// Overwrite the manifest with the current source list.
pub fn write_manifest(path: &Path, sources: &SourceFileSet) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, sources.to_manifest())?;
    Ok(())
}

/// List the catalogs currently present in `po_dir`, sorted by locale.
///
/// Refresh backups (`*.old.po`) are not catalogs.
pub fn discover_catalogs(po_dir: &Path) -> Result<Vec<Catalog>> {
    let mut catalogs = Vec::new();

    if !po_dir.exists() {
        return Ok(catalogs);
    }

    for entry in fs::read_dir(po_dir).context("Failed to read catalog directory")? {
        let entry = entry?;
        if !entry.file_type()?.is_file() {
            continue;
        }
        let Some(name) = entry.file_name().to_str().map(str::to_owned) else {
            continue;
        };
        if name.ends_with(BACKUP_SUFFIX) {
            continue;
        }
        if let Some(locale) = name.strip_suffix(".po")
            && !locale.is_empty()
        {
            catalogs.push(Catalog::new(po_dir, locale));
        }
    }

    catalogs.sort_by(|a, b| a.locale.cmp(&b.locale));
    Ok(catalogs)
}
