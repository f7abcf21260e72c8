//! Resolved project layout.

use crate::core::{CliError, ConfigNotFoundError, ConfigParseError, InvalidConfigError};
use fs_err as fs;
use miette::NamedSource;
use po_sync_toml::{PoSyncConfig, PoSyncConfigError, SourcePattern};
use std::path::{Component, Path, PathBuf};

/// File the source manifest is written to, inside the catalog directory.
pub const MANIFEST_FILE: &str = "POTFILES.in";

/// Directory (inside the catalog directory) holding po-sync's own build state.
pub const STATE_DIR: &str = ".po-sync";

/// Everything the pipeline needs to know about one project, with paths resolved.
#[derive(Clone, Debug)]
pub struct Project {
    /// The project root; source patterns are relative to it.
    pub root: PathBuf,
    /// Gettext domain.
    pub package: String,
    /// Directory holding catalogs, template and manifest.
    pub po_dir: PathBuf,
    /// Source patterns in manifest order.
    pub sources: Vec<SourcePattern>,
    /// Root of the installed locale tree.
    pub install_root: PathBuf,
    /// Per-locale subdirectory receiving the compiled catalog.
    pub messages_dir: String,
}

impl Project {
    /// Resolve a configuration against a project root.
    pub fn from_config(root: &Path, config: &PoSyncConfig) -> Self {
        Self {
            root: root.to_path_buf(),
            package: config.package.clone(),
            po_dir: config.po_dir_from_base(root),
            sources: config.sources.clone(),
            install_root: if config.install_root.is_relative() {
                root.join(&config.install_root)
            } else {
                config.install_root.clone()
            },
            messages_dir: config.messages_dir.clone(),
        }
    }

    /// `<po_dir>/POTFILES.in`
    pub fn manifest_path(&self) -> PathBuf {
        self.po_dir.join(MANIFEST_FILE)
    }

    /// `<po_dir>/<package>.pot`
    pub fn template_path(&self) -> PathBuf {
        self.po_dir.join(format!("{}.pot", self.package))
    }

    /// `<po_dir>/.po-sync`
    pub fn state_dir(&self) -> PathBuf {
        self.po_dir.join(STATE_DIR)
    }

    /// File name every compiled catalog is installed under.
    pub fn installed_file_name(&self) -> String {
        format!("{}.mo", self.package)
    }

    /// Install root, re-rooted under `dest_dir` when staging.
    pub fn effective_install_root(&self, dest_dir: Option<&Path>) -> PathBuf {
        match dest_dir {
            Some(dest) => dest.join(
                self.install_root
                    .components()
                    .filter(|c| !matches!(c, Component::RootDir | Component::Prefix(_)))
                    .collect::<PathBuf>(),
            ),
            None => self.install_root.clone(),
        }
    }
}

/// Load a configuration file, turning failures into diagnostics.
pub fn load_config(path: &Path) -> Result<PoSyncConfig, CliError> {
    if !path.exists() {
        return Err(ConfigNotFoundError {
            expected_path: path.to_path_buf(),
        }
        .into());
    }

    let content = fs::read_to_string(path)?;

    match PoSyncConfig::from_toml_str(&content) {
        Ok(config) => Ok(config),
        Err(PoSyncConfigError::ParseError(err)) => Err(ConfigParseError {
            span: err.span().map(Into::into),
            help: err.message().to_string(),
            src: NamedSource::new(path.display().to_string(), content),
        }
        .into()),
        Err(err) => Err(InvalidConfigError {
            path: path.to_path_buf(),
            help: err.to_string(),
        }
        .into()),
    }
}
