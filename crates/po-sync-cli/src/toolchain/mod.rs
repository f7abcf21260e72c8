//! External gettext tools.
//!
//! The pipeline never spawns a process directly; it talks to a [`Toolchain`].
//! [`GettextToolchain`] runs the real programs, tests substitute a fake.

mod error;
#[cfg(test)]
pub(crate) mod fake;
mod gettext;

pub use error::ToolError;
pub use gettext::GettextToolchain;

use std::path::Path;

/// Inputs for a template extraction run.
#[derive(Clone, Copy, Debug)]
pub struct ExtractRequest<'a> {
    /// Catalog directory; the extractor runs inside it.
    pub po_dir: &'a Path,
    /// Manifest listing the source files, one per line.
    pub manifest: &'a Path,
    /// Gettext domain.
    pub package: &'a str,
    /// Template file the extractor is expected to write.
    pub output: &'a Path,
}

/// The capabilities the pipeline needs from gettext.
pub trait Toolchain {
    /// Writes the template for the sources listed in the manifest.
    fn extract(&self, request: &ExtractRequest<'_>) -> Result<(), ToolError>;

    /// Merges `definitions` against `reference`, writing the result to `output`.
    ///
    /// `definitions` itself must not be modified.
    fn merge(&self, definitions: &Path, reference: &Path, output: &Path) -> Result<(), ToolError>;

    /// Compiles a catalog into its binary form.
    fn compile(&self, catalog: &Path, output: &Path) -> Result<(), ToolError>;

    /// Returns a one-line completeness summary for a catalog.
    fn statistics(&self, catalog: &Path) -> Result<String, ToolError>;
}
