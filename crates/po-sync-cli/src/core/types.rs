use super::DryRunDiff;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Suffix of the backup a catalog is copied to while it is being refreshed.
pub const BACKUP_SUFFIX: &str = ".old.po";

/// A per-locale translation catalog (`<po_dir>/<locale>.po`).
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Catalog {
    /// Locale identifier, the file name without `.po`.
    pub locale: String,
    /// Path to the live catalog.
    pub path: PathBuf,
}

impl Catalog {
    /// Create a catalog entry for `<dir>/<locale>.po`.
    pub fn new(dir: &Path, locale: &str) -> Self {
        Self {
            locale: locale.to_string(),
            path: dir.join(format!("{locale}.po")),
        }
    }

    fn sibling(&self, file_name: String) -> PathBuf {
        self.path.with_file_name(file_name)
    }

    /// The compiled form next to the catalog (`<locale>.mo`).
    pub fn compiled_path(&self) -> PathBuf {
        self.sibling(format!("{}.mo", self.locale))
    }

    /// The backup taken while refreshing (`<locale>.old.po`).
    pub fn backup_path(&self) -> PathBuf {
        self.sibling(format!("{}{}", self.locale, BACKUP_SUFFIX))
    }

    /// The catalog's file name, as shown in reports.
    pub fn file_name(&self) -> String {
        format!("{}.po", self.locale)
    }
}

/// What happened to the template during a run.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum TemplateStatus {
    /// The extractor ran and wrote a new template.
    Regenerated,
    /// Nothing changed since the last extraction; the extractor was not run.
    UpToDate,
}

/// Result of refreshing a single catalog.
#[derive(Clone, Debug)]
pub struct RefreshOutcome {
    /// The locale of the catalog.
    pub locale: String,
    /// How long the merge took.
    pub duration: Duration,
    /// Error message if the merge failed and the catalog was rolled back.
    pub error: Option<String>,
    /// Before/after text when running as a dry run.
    pub preview: Option<DryRunDiff>,
}

impl RefreshOutcome {
    /// Create a new successful result.
    pub fn success(locale: String, duration: Duration, preview: Option<DryRunDiff>) -> Self {
        Self {
            locale,
            duration,
            error: None,
            preview,
        }
    }

    /// Create a new error result.
    pub fn failure(locale: String, duration: Duration, error: String) -> Self {
        Self {
            locale,
            duration,
            error: Some(error),
            preview: None,
        }
    }

    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }
}

/// Per-catalog results of a refresh run, in catalog order.
#[derive(Clone, Debug, Default)]
pub struct RefreshSummary {
    pub outcomes: Vec<RefreshOutcome>,
}

impl RefreshSummary {
    pub fn succeeded(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_success()).count()
    }

    pub fn failed(&self) -> usize {
        self.outcomes.len() - self.succeeded()
    }
}

/// Locales touched by a compilation pass.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct CompileSummary {
    /// Catalogs that were (re)compiled.
    pub compiled: Vec<String>,
    /// Catalogs whose compiled form was already newer.
    pub up_to_date: Vec<String>,
}

/// Locales handled by an install pass.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct InstallSummary {
    /// Installed files, one per locale.
    pub installed: Vec<PathBuf>,
    /// Locales without a compiled catalog.
    pub skipped: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_paths() {
        let catalog = Catalog::new(Path::new("/p/po"), "pt_BR");

        assert_eq!(catalog.path, PathBuf::from("/p/po/pt_BR.po"));
        assert_eq!(catalog.compiled_path(), PathBuf::from("/p/po/pt_BR.mo"));
        assert_eq!(catalog.backup_path(), PathBuf::from("/p/po/pt_BR.old.po"));
        assert_eq!(catalog.file_name(), "pt_BR.po");
    }

    #[test]
    fn test_refresh_summary_counts() {
        let summary = RefreshSummary {
            outcomes: vec![
                RefreshOutcome::success("fr".into(), Duration::ZERO, None),
                RefreshOutcome::failure("de".into(), Duration::ZERO, "boom".into()),
                RefreshOutcome::success("it".into(), Duration::ZERO, None),
            ],
        };

        assert_eq!(summary.succeeded(), 2);
        assert_eq!(summary.failed(), 1);
    }
}
