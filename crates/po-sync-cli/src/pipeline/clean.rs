//! Removal of generated files from the catalog directory.

use crate::core::Project;
use anyhow::{Context as _, Result};
use fs_err as fs;
use std::path::PathBuf;

const DEPEND_FILE: &str = ".depend";

/// How much `clean` removes.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum CleanLevel {
    /// Compiled catalogs, editor backups and `.depend`.
    Soft,
    /// Everything `Soft` removes plus the manifest, the template and the build state.
    Full,
}

/// Delete generated files, returning what was removed.
///
/// Catalogs and the configuration file are never touched.
pub fn clean(project: &Project, level: CleanLevel) -> Result<Vec<PathBuf>> {
    let mut removed = Vec::new();
    let po_dir = &project.po_dir;

    if po_dir.is_dir() {
        let mut entries: Vec<PathBuf> = fs::read_dir(po_dir)?
            .map(|entry| entry.map(|e| e.path()))
            .collect::<Result<_, _>>()?;
        entries.sort();

        for path in entries {
            if path.is_file() && is_soft_clean_target(&path) {
                fs::remove_file(&path)?;
                removed.push(path);
            }
        }
    }

    if level == CleanLevel::Full {
        for path in [project.manifest_path(), project.template_path()] {
            if path.is_file() {
                fs::remove_file(&path)?;
                removed.push(path);
            }
        }

        let state_dir = project.state_dir();
        if state_dir.is_dir() {
            fs::remove_dir_all(&state_dir)
                .with_context(|| format!("Failed to remove {}", state_dir.display()))?;
            removed.push(state_dir);
        }
    }

    for path in &removed {
        tracing::debug!(path = %path.display(), "removed");
    }
    Ok(removed)
}

fn is_soft_clean_target(path: &std::path::Path) -> bool {
    let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
        return false;
    };
    name == DEPEND_FILE || name.ends_with('~') || name.ends_with(".mo")
}
