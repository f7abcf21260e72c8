//! The catalog pipeline: discovery, template, refresh, compile and install.

mod backup;
mod clean;
mod compile;
mod discovery;
mod install;
mod refresh;
mod report;
mod stamp;
mod template;

pub use backup::CatalogBackup;
pub use clean::{CleanLevel, clean};
pub use compile::{compile_catalogs, needs_compile};
pub use discovery::{SourceFileSet, discover_catalogs, discover_sources, write_manifest};
pub use install::install_catalogs;
pub use refresh::{refresh_catalog, refresh_catalogs, select_catalogs};
pub use report::report_statistics;
pub use stamp::TemplateStamp;
pub use template::ensure_template;

use std::path::Path;
use std::time::SystemTime;

/// Modification time of `path`, `None` if it is missing or unreadable.
pub(crate) fn modified_time(path: &Path) -> Option<SystemTime> {
    std::fs::metadata(path).and_then(|m| m.modified()).ok()
}
