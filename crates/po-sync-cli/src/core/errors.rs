//! CLI error types using miette for Rust-style diagnostics.

// Fields in these structs are read by miette's Diagnostic derive macro
#![allow(unused)]

use crate::toolchain::ToolError;
use miette::{Diagnostic, NamedSource, SourceSpan};
use std::path::PathBuf;
use thiserror::Error;

/// Error when the po-sync.toml configuration file is not found.
#[derive(Debug, Diagnostic, Error)]
#[error("po-sync.toml configuration file not found at {}", expected_path.display())]
#[diagnostic(
    code(po_sync::config::not_found),
    help(
        "Create a po-sync.toml file in your project root, for example:\n\n  \
          package = \"myapp\"\n  \
          po_dir = \"po\"\n  \
          sources = [\"src/*.py\", \"myapp.py\"]\n"
    )
)]
pub struct ConfigNotFoundError {
    /// The path where the config was expected.
    pub expected_path: PathBuf,
}

/// Error when parsing the po-sync.toml configuration file.
#[derive(Debug, Diagnostic, Error)]
#[error("failed to parse po-sync.toml configuration")]
#[diagnostic(code(po_sync::config::parse_error))]
pub struct ConfigParseError {
    /// The source content of the config file.
    #[source_code]
    pub src: NamedSource<String>,

    /// The span where the error occurred.
    #[label("error occurred here")]
    pub span: Option<SourceSpan>,

    /// The underlying parse error message.
    #[help]
    pub help: String,
}

/// Error when the configuration parses but holds unusable values.
#[derive(Debug, Diagnostic, Error)]
#[error("invalid configuration in {}", path.display())]
#[diagnostic(code(po_sync::config::invalid))]
pub struct InvalidConfigError {
    /// The configuration file.
    pub path: PathBuf,

    /// What is wrong.
    #[help]
    pub help: String,
}

/// Error when a requested locale has no catalog.
#[derive(Debug, Diagnostic, Error)]
#[error("locale '{locale}' not found")]
#[diagnostic(
    code(po_sync::catalog::locale_not_found),
    help("Available locales: {available}")
)]
pub struct LocaleNotFoundError {
    /// The locale that was specified but not found.
    pub locale: String,
    /// Comma-separated list of available locales.
    pub available: String,
}

/// Error when catalogs are refreshed before a template exists.
#[derive(Debug, Diagnostic, Error)]
#[error("translation template not found: {}", path.display())]
#[diagnostic(
    code(po_sync::template::not_found),
    help("Run `po-sync update-po` to extract the template and refresh the catalogs")
)]
pub struct TemplateNotFoundError {
    /// Where the template was expected.
    pub path: PathBuf,
}

#[derive(Debug, Diagnostic, Error)]
pub enum CliError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    ConfigNotFound(#[from] ConfigNotFoundError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    ConfigParse(#[from] ConfigParseError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    InvalidConfig(#[from] InvalidConfigError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    LocaleNotFound(#[from] LocaleNotFoundError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    TemplateNotFound(#[from] TemplateNotFoundError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Tool(#[from] ToolError),

    #[error("IO error: {0}")]
    #[diagnostic(code(po_sync::io))]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    #[diagnostic(code(po_sync::other))]
    Other(String),
}

impl CliError {
    /// Process exit code for this error.
    ///
    /// Tool failures carry the tool's own status; everything else is 1.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Tool(err) => err.exit_code(),
            _ => 1,
        }
    }
}

impl From<anyhow::Error> for CliError {
    fn from(err: anyhow::Error) -> Self {
        match err.downcast::<ToolError>() {
            Ok(tool) => CliError::Tool(tool),
            Err(err) => CliError::Other(format!("{err:#}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Context as _;

    #[test]
    fn test_tool_exit_code_survives_anyhow() {
        let result: anyhow::Result<()> = Err(ToolError::Failed {
            tool: "intltool-update".to_string(),
            code: Some(2),
            stderr: String::new(),
        }
        .into());

        let err = CliError::from(result.unwrap_err());
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn test_context_is_kept_for_other_errors() {
        let result: anyhow::Result<()> =
            Err(std::io::Error::from(std::io::ErrorKind::PermissionDenied).into());
        let err = CliError::from(result.context("Failed to read po").unwrap_err());

        assert_eq!(err.exit_code(), 1);
        assert!(err.to_string().starts_with("Failed to read po"));
    }
}
