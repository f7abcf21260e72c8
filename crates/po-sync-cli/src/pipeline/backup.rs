//! Scoped backup of a catalog while it is being refreshed.

use crate::core::Catalog;
use fs_err as fs;
use std::io;
use std::path::{Path, PathBuf};

/// Copy of a live catalog taken before it is touched.
///
/// Dropping the guard without calling [`CatalogBackup::commit`] moves the
/// backup back over the live catalog, so every exit path that does not
/// commit (early returns, `?`, panics) restores the pre-refresh content.
#[derive(Debug)]
#[must_use = "dropping the backup immediately restores the catalog"]
pub struct CatalogBackup {
    live: PathBuf,
    backup: PathBuf,
    armed: bool,
}

impl CatalogBackup {
    /// Copy the catalog to `<locale>.old.po`, replacing any stale backup.
    pub fn acquire(catalog: &Catalog) -> io::Result<Self> {
        let backup = catalog.backup_path();
        fs::copy(&catalog.path, &backup)?;

        Ok(Self {
            live: catalog.path.clone(),
            backup,
            armed: true,
        })
    }

    /// The backup file.
    pub fn path(&self) -> &Path {
        &self.backup
    }

    /// Keep whatever is now in the live catalog and delete the backup.
    pub fn commit(mut self) -> io::Result<()> {
        self.armed = false;
        fs::remove_file(&self.backup)
    }

    /// Put the backup back in place, reporting failures instead of logging them.
    pub fn restore(mut self) -> io::Result<()> {
        self.armed = false;
        fs::rename(&self.backup, &self.live)
    }
}

impl Drop for CatalogBackup {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }

        if let Err(err) = fs::rename(&self.backup, &self.live) {
            tracing::error!(
                backup = %self.backup.display(),
                catalog = %self.live.display(),
                "failed to restore catalog from backup: {err}"
            );
        } else {
            tracing::debug!(catalog = %self.live.display(), "catalog restored from backup");
        }
    }
}
