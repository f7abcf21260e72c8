#![doc = include_str!("../README.md")]

use fs_err as fs;
use path_slash::{PathBufExt as _, PathExt as _};
use serde::{Deserialize, Serialize};
use std::env;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;

/// Name of the configuration file looked up in the project root.
pub const CONFIG_FILE_NAME: &str = "po-sync.toml";

/// Environment variable that overrides the configuration file location.
pub const CONFIG_PATH_ENV: &str = "PO_SYNC_CONFIG";

#[derive(Debug, Error)]
pub enum PoSyncConfigError {
    /// Configuration file not found.
    #[error("{} not found at {}", CONFIG_FILE_NAME, path.display())]
    NotFound {
        /// Where the file was expected.
        path: PathBuf,
    },
    /// Failed to read configuration file.
    #[error("Failed to read configuration file: {0}")]
    ReadError(#[from] std::io::Error),
    /// Failed to parse configuration file.
    #[error("Failed to parse configuration file: {0}")]
    ParseError(#[from] toml::de::Error),
    /// The package name cannot be used as a file base name.
    #[error("Invalid package name '{name}': {reason}")]
    InvalidPackage {
        /// The rejected package name.
        name: String,
        /// Why it was rejected.
        reason: String,
    },
    /// The messages subdirectory is not a single path segment.
    #[error("Invalid messages_dir '{name}': must be a single directory name")]
    InvalidMessagesDir {
        /// The rejected directory name.
        name: String,
    },
    /// No source patterns were configured.
    #[error("`sources` must list at least one source pattern")]
    NoSources,
    /// A source pattern could not be understood.
    #[error("Invalid source pattern '{pattern}': {reason}")]
    InvalidSourcePattern {
        /// The raw pattern.
        pattern: String,
        /// Why it was rejected.
        reason: String,
    },
}

/// One entry of the `sources` list.
///
/// Patterns are always relative to the project root and written with
/// forward slashes.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(try_from = "String", into = "String")]
pub enum SourcePattern {
    /// A single named file, e.g. `molecule.py`.
    File(PathBuf),
    /// Every file with `extension` inside `dir`, e.g. `molecule/*.py`.
    ///
    /// With `recursive` set (`molecule/**/*.py`) subdirectories are searched too.
    /// An empty `dir` means the project root.
    Extension {
        /// Directory to search.
        dir: PathBuf,
        /// File extension without the leading dot.
        extension: String,
        /// Whether to descend into subdirectories.
        recursive: bool,
    },
}

fn has_wildcard(s: &str) -> bool {
    s.contains(['*', '?', '[', ']'])
}

impl FromStr for SourcePattern {
    type Err = PoSyncConfigError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let invalid = |reason: &str| PoSyncConfigError::InvalidSourcePattern {
            pattern: raw.to_string(),
            reason: reason.to_string(),
        };

        let pattern = raw.trim();
        if pattern.is_empty() {
            return Err(invalid("pattern is empty"));
        }
        if pattern.starts_with('/') || Path::new(pattern).is_absolute() {
            return Err(invalid("pattern must be relative to the project root"));
        }
        if pattern.split('/').any(|segment| segment == "..") {
            return Err(invalid("pattern must stay inside the project root"));
        }

        let (dir, leaf) = pattern.rsplit_once('/').unwrap_or(("", pattern));
        let (dir, recursive) = match dir.strip_suffix("**") {
            Some(rest) if rest.is_empty() || rest.ends_with('/') => {
                (rest.trim_end_matches('/'), true)
            },
            _ => (dir, false),
        };

        if let Some(extension) = leaf.strip_prefix("*.") {
            if extension.is_empty() || has_wildcard(extension) {
                return Err(invalid("extension after `*.` must be literal"));
            }
            if has_wildcard(dir) {
                return Err(invalid("wildcards are only supported in the file name"));
            }
            return Ok(SourcePattern::Extension {
                dir: PathBuf::from_slash(dir),
                extension: extension.to_string(),
                recursive,
            });
        }

        if recursive || has_wildcard(pattern) {
            return Err(invalid(
                "only `<dir>/*.<ext>` and `<dir>/**/*.<ext>` wildcards are supported",
            ));
        }

        Ok(SourcePattern::File(PathBuf::from_slash(pattern)))
    }
}

impl TryFrom<String> for SourcePattern {
    type Error = PoSyncConfigError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<SourcePattern> for String {
    fn from(pattern: SourcePattern) -> Self {
        pattern.to_string()
    }
}

impl fmt::Display for SourcePattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourcePattern::File(path) => write!(f, "{}", path.to_slash_lossy()),
            SourcePattern::Extension {
                dir,
                extension,
                recursive,
            } => {
                let mut prefix = dir.to_slash_lossy().into_owned();
                if *recursive {
                    prefix = if prefix.is_empty() {
                        "**".to_string()
                    } else {
                        format!("{prefix}/**")
                    };
                }
                if prefix.is_empty() {
                    write!(f, "*.{extension}")
                } else {
                    write!(f, "{prefix}/*.{extension}")
                }
            },
        }
    }
}

/// Paths (or bare names resolved through `PATH`) of the external gettext tools.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct ToolPaths {
    /// String extractor that writes `<package>.pot`.
    pub extractor: PathBuf,
    /// Catalog merge tool.
    pub merger: PathBuf,
    /// Binary catalog compiler, also used for statistics.
    pub compiler: PathBuf,
}

impl Default for ToolPaths {
    fn default() -> Self {
        Self {
            extractor: PathBuf::from("intltool-update"),
            merger: PathBuf::from("msgmerge"),
            compiler: PathBuf::from("msgfmt"),
        }
    }
}

fn default_po_dir() -> PathBuf {
    PathBuf::from("po")
}

fn default_install_root() -> PathBuf {
    PathBuf::from("/usr/share/locale")
}

fn default_messages_dir() -> String {
    "LC_MESSAGES".to_string()
}

/// The configuration for `po-sync`.
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct PoSyncConfig {
    /// Gettext domain: base name of the template and of every installed catalog.
    pub package: String,
    /// Directory holding the catalogs, the template and the manifest.
    #[serde(default = "default_po_dir")]
    pub po_dir: PathBuf,
    /// Source patterns scanned for translatable strings, in manifest order.
    pub sources: Vec<SourcePattern>,
    /// Root of the installed locale tree.
    #[serde(default = "default_install_root")]
    pub install_root: PathBuf,
    /// Per-locale subdirectory that receives the compiled catalog.
    #[serde(default = "default_messages_dir")]
    pub messages_dir: String,
    /// External tool overrides.
    #[serde(default)]
    pub tools: ToolPaths,
}

impl PoSyncConfig {
    /// Reads and validates the configuration from a path.
    pub fn read_from_path<P: AsRef<Path>>(path: P) -> Result<Self, PoSyncConfigError> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(PoSyncConfigError::NotFound {
                path: path.to_path_buf(),
            });
        }

        let content = fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Parses and validates configuration text.
    pub fn from_toml_str(content: &str) -> Result<Self, PoSyncConfigError> {
        let config: PoSyncConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Returns where the configuration for `project_root` is read from.
    ///
    /// `PO_SYNC_CONFIG` wins when set and non-empty.
    pub fn config_path_for(project_root: &Path) -> PathBuf {
        match env::var_os(CONFIG_PATH_ENV) {
            Some(path) if !path.is_empty() => PathBuf::from(path),
            _ => project_root.join(CONFIG_FILE_NAME),
        }
    }

    /// Reads the configuration belonging to a project root.
    pub fn from_project_dir(project_root: &Path) -> Result<Self, PoSyncConfigError> {
        Self::read_from_path(Self::config_path_for(project_root))
    }

    /// Returns the catalog directory resolved against a base directory.
    pub fn po_dir_from_base(&self, base_dir: &Path) -> PathBuf {
        base_dir.join(&self.po_dir)
    }

    /// Checks the values serde cannot.
    pub fn validate(&self) -> Result<(), PoSyncConfigError> {
        validate_package(&self.package)?;

        if self.messages_dir.is_empty()
            || self.messages_dir.contains(['/', '\\'])
            || self.messages_dir == "."
            || self.messages_dir == ".."
        {
            return Err(PoSyncConfigError::InvalidMessagesDir {
                name: self.messages_dir.clone(),
            });
        }

        if self.sources.is_empty() {
            return Err(PoSyncConfigError::NoSources);
        }

        Ok(())
    }
}

/// Checks that a package name is usable as a file base name.
pub fn validate_package(name: &str) -> Result<(), PoSyncConfigError> {
    let reason = if name.trim().is_empty() {
        Some("package must not be empty")
    } else if name.contains(['/', '\\']) {
        Some("package must not contain path separators")
    } else if name == "." || name == ".." {
        Some("package must be a file name")
    } else {
        None
    };

    match reason {
        Some(reason) => Err(PoSyncConfigError::InvalidPackage {
            name: name.to_string(),
            reason: reason.to_string(),
        }),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serial_test::serial;
    use std::fs;
    use tempfile::TempDir;

    const MINIMAL: &str = r#"
package = "molecule"
sources = ["molecule/*.py", "molecule/specs/*.py", "molecule.py"]
"#;

    #[test]
    fn test_read_from_path_applies_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join(CONFIG_FILE_NAME);
        fs::write(&config_path, MINIMAL).unwrap();

        let config = PoSyncConfig::read_from_path(&config_path).unwrap();

        assert_eq!(config.package, "molecule");
        assert_eq!(config.po_dir, PathBuf::from("po"));
        assert_eq!(config.install_root, PathBuf::from("/usr/share/locale"));
        assert_eq!(config.messages_dir, "LC_MESSAGES");
        assert_eq!(config.tools, ToolPaths::default());
        assert_eq!(config.sources.len(), 3);
        assert_eq!(
            config.sources[2],
            SourcePattern::File(PathBuf::from("molecule.py"))
        );
    }

    #[test]
    fn test_read_from_path_file_not_found() {
        let result = PoSyncConfig::read_from_path("/non/existent/po-sync.toml");
        assert!(matches!(result, Err(PoSyncConfigError::NotFound { .. })));
    }

    #[test]
    fn test_read_from_path_unknown_key() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join(CONFIG_FILE_NAME);
        fs::write(
            &config_path,
            "package = \"x\"\nsources = [\"a.py\"]\nassets_dir = \"i18n\"\n",
        )
        .unwrap();

        let result = PoSyncConfig::read_from_path(&config_path);
        assert!(matches!(result, Err(PoSyncConfigError::ParseError(_))));
    }

    #[test]
    fn test_tool_overrides_are_partial() {
        let config = PoSyncConfig::from_toml_str(
            r#"
package = "molecule"
sources = ["molecule.py"]

[tools]
merger = "/opt/gettext/bin/msgmerge"
"#,
        )
        .unwrap();

        assert_eq!(
            config.tools.merger,
            PathBuf::from("/opt/gettext/bin/msgmerge")
        );
        assert_eq!(config.tools.compiler, PathBuf::from("msgfmt"));
        assert_eq!(config.tools.extractor, PathBuf::from("intltool-update"));
    }

    #[test]
    fn test_empty_sources_rejected() {
        let result = PoSyncConfig::from_toml_str("package = \"x\"\nsources = []\n");
        assert!(matches!(result, Err(PoSyncConfigError::NoSources)));
    }

    #[test]
    fn test_bad_messages_dir_rejected() {
        let result = PoSyncConfig::from_toml_str(
            "package = \"x\"\nsources = [\"a.py\"]\nmessages_dir = \"a/b\"\n",
        );
        assert!(matches!(
            result,
            Err(PoSyncConfigError::InvalidMessagesDir { .. })
        ));
    }

    #[rstest]
    #[case("")]
    #[case("   ")]
    #[case("po/molecule")]
    #[case("..")]
    fn test_invalid_package(#[case] name: &str) {
        assert!(matches!(
            validate_package(name),
            Err(PoSyncConfigError::InvalidPackage { .. })
        ));
    }

    #[test]
    fn test_invalid_pattern_surfaces_as_parse_error() {
        let result = PoSyncConfig::from_toml_str("package = \"x\"\nsources = [\"src/a*.py\"]\n");
        assert!(matches!(result, Err(PoSyncConfigError::ParseError(_))));
    }

    #[rstest]
    #[case("molecule.py", SourcePattern::File(PathBuf::from("molecule.py")))]
    #[case(
        "molecule/*.py",
        SourcePattern::Extension { dir: PathBuf::from("molecule"), extension: "py".into(), recursive: false }
    )]
    #[case(
        "src/**/*.rs",
        SourcePattern::Extension { dir: PathBuf::from("src"), extension: "rs".into(), recursive: true }
    )]
    #[case(
        "*.c",
        SourcePattern::Extension { dir: PathBuf::new(), extension: "c".into(), recursive: false }
    )]
    #[case(
        "**/*.c",
        SourcePattern::Extension { dir: PathBuf::new(), extension: "c".into(), recursive: true }
    )]
    fn test_parse_source_pattern(#[case] raw: &str, #[case] expected: SourcePattern) {
        let parsed: SourcePattern = raw.parse().unwrap();
        assert_eq!(parsed, expected);
        assert_eq!(parsed.to_string(), raw);
    }

    #[rstest]
    #[case("")]
    #[case("/usr/src/a.py")]
    #[case("../molecule.py")]
    #[case("src/a*.py")]
    #[case("src/*/x.py")]
    #[case("src/**")]
    #[case("src/*.")]
    fn test_reject_source_pattern(#[case] raw: &str) {
        assert!(matches!(
            raw.parse::<SourcePattern>(),
            Err(PoSyncConfigError::InvalidSourcePattern { .. })
        ));
    }

    #[test]
    fn test_po_dir_from_base() {
        let config = PoSyncConfig::from_toml_str(MINIMAL).unwrap();
        assert_eq!(
            config.po_dir_from_base(Path::new("/work/molecule")),
            PathBuf::from("/work/molecule/po")
        );
    }

    #[test]
    #[serial]
    fn test_config_path_defaults_to_project_root() {
        temp_env::with_var_unset(CONFIG_PATH_ENV, || {
            assert_eq!(
                PoSyncConfig::config_path_for(Path::new("/work")),
                PathBuf::from("/work").join(CONFIG_FILE_NAME)
            );
        });
    }

    #[test]
    #[serial]
    fn test_config_path_env_override() {
        let temp_dir = TempDir::new().unwrap();
        let alt = temp_dir.path().join("alt.toml");
        fs::write(&alt, MINIMAL).unwrap();

        temp_env::with_var(CONFIG_PATH_ENV, Some(alt.as_os_str()), || {
            assert_eq!(PoSyncConfig::config_path_for(Path::new("/work")), alt);
            let config = PoSyncConfig::from_project_dir(Path::new("/work")).unwrap();
            assert_eq!(config.package, "molecule");
        });
    }
}
