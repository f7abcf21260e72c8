//! In-process [`Toolchain`] used by the pipeline tests.

use super::{ExtractRequest, ToolError, Toolchain};
use std::cell::RefCell;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) enum ToolCall {
    Extract,
    Merge(PathBuf),
    Compile(PathBuf),
    Statistics(PathBuf),
}

/// Writes predictable files instead of running gettext.
///
/// - extraction writes `template` to the requested output,
/// - merging writes the definitions followed by the reference,
/// - compiling writes `compiled:` followed by the catalog text,
/// - statistics count the `msgid` lines.
#[derive(Debug)]
pub(crate) struct FakeToolchain {
    pub(crate) template: String,
    pub(crate) extract_exit: Option<i32>,
    /// Locales whose merge fails after scribbling over the output file.
    pub(crate) failing_merges: HashSet<String>,
    /// Locales whose compilation fails.
    pub(crate) failing_compiles: HashSet<String>,
    /// Compilation succeeds without writing anything.
    pub(crate) compile_writes_nothing: bool,
    pub(crate) calls: RefCell<Vec<ToolCall>>,
}

impl Default for FakeToolchain {
    fn default() -> Self {
        Self {
            template: "msgid \"hello\"\nmsgstr \"\"\n".to_string(),
            extract_exit: None,
            failing_merges: HashSet::new(),
            failing_compiles: HashSet::new(),
            compile_writes_nothing: false,
            calls: RefCell::new(Vec::new()),
        }
    }
}

fn locale_of(path: &Path) -> String {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    name.trim_end_matches(".po")
        .trim_end_matches(".old")
        .to_string()
}

fn failure(tool: &str, code: i32, message: String) -> ToolError {
    ToolError::Failed {
        tool: tool.to_string(),
        code: Some(code),
        stderr: message,
    }
}

impl FakeToolchain {
    pub(crate) fn failing_merge(locales: &[&str]) -> Self {
        Self {
            failing_merges: locales.iter().map(|l| l.to_string()).collect(),
            ..Self::default()
        }
    }

    pub(crate) fn calls(&self) -> Vec<ToolCall> {
        self.calls.borrow().clone()
    }

    pub(crate) fn extract_count(&self) -> usize {
        self.calls
            .borrow()
            .iter()
            .filter(|c| matches!(c, ToolCall::Extract))
            .count()
    }
}

impl Toolchain for FakeToolchain {
    fn extract(&self, request: &ExtractRequest<'_>) -> Result<(), ToolError> {
        self.calls.borrow_mut().push(ToolCall::Extract);
        if let Some(code) = self.extract_exit {
            return Err(failure("fake-extract", code, "extraction failed".into()));
        }
        fs::write(request.output, &self.template).map_err(|source| ToolError::Spawn {
            tool: "fake-extract".to_string(),
            source,
        })
    }

    fn merge(&self, definitions: &Path, reference: &Path, output: &Path) -> Result<(), ToolError> {
        self.calls
            .borrow_mut()
            .push(ToolCall::Merge(definitions.to_path_buf()));

        let locale = locale_of(definitions);
        if self.failing_merges.contains(&locale) {
            let _ = fs::write(output, "partial garbage");
            return Err(failure("fake-merge", 1, format!("{locale}: syntax error")));
        }

        let old = fs::read_to_string(definitions).unwrap_or_default();
        let template = fs::read_to_string(reference).unwrap_or_default();
        fs::write(output, format!("{old}{template}")).map_err(|source| ToolError::Spawn {
            tool: "fake-merge".to_string(),
            source,
        })
    }

    fn compile(&self, catalog: &Path, output: &Path) -> Result<(), ToolError> {
        self.calls
            .borrow_mut()
            .push(ToolCall::Compile(catalog.to_path_buf()));

        let locale = locale_of(catalog);
        if self.failing_compiles.contains(&locale) {
            return Err(failure("fake-compile", 2, format!("{locale}: fatal error")));
        }
        if self.compile_writes_nothing {
            return Ok(());
        }

        let text = fs::read_to_string(catalog).unwrap_or_default();
        fs::write(output, format!("compiled:{text}")).map_err(|source| ToolError::Spawn {
            tool: "fake-compile".to_string(),
            source,
        })
    }

    fn statistics(&self, catalog: &Path) -> Result<String, ToolError> {
        self.calls
            .borrow_mut()
            .push(ToolCall::Statistics(catalog.to_path_buf()));

        let text = fs::read_to_string(catalog)
            .map_err(|_| failure("fake-stats", 1, "cannot read catalog".into()))?;
        let count = text.lines().filter(|l| l.starts_with("msgid")).count();
        Ok(format!("{count} translated messages."))
    }
}
