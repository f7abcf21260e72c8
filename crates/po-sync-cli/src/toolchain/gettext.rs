use super::{ExtractRequest, ToolError, Toolchain};
use po_sync_toml::ToolPaths;
use std::ffi::OsString;
use std::path::Path;
use std::process::{Command, Output};

#[cfg(windows)]
const NULL_DEVICE: &str = "NUL";
#[cfg(not(windows))]
const NULL_DEVICE: &str = "/dev/null";

/// Runs `intltool-update`, `msgmerge` and `msgfmt` (or their configured replacements).
#[derive(Clone, Debug)]
pub struct GettextToolchain {
    tools: ToolPaths,
}

impl GettextToolchain {
    pub fn new(tools: ToolPaths) -> Self {
        Self { tools }
    }

    pub fn tools(&self) -> &ToolPaths {
        &self.tools
    }
}

fn output_file_arg(path: &Path) -> OsString {
    let mut arg = OsString::from("--output-file=");
    arg.push(path);
    arg
}

/// Run a prepared command, turning a spawn error or non-zero exit into a [`ToolError`].
fn run(tool: &Path, cmd: &mut Command) -> Result<Output, ToolError> {
    tracing::debug!(command = ?cmd, "running external tool");

    let output = cmd.output().map_err(|source| ToolError::Spawn {
        tool: tool.display().to_string(),
        source,
    })?;

    if output.status.success() {
        Ok(output)
    } else {
        Err(ToolError::Failed {
            tool: tool.display().to_string(),
            code: output.status.code(),
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        })
    }
}

impl Toolchain for GettextToolchain {
    fn extract(&self, request: &ExtractRequest<'_>) -> Result<(), ToolError> {
        let tool = &self.tools.extractor;
        // intltool-update reads POTFILES.in from, and writes <package>.pot into, its working directory
        run(
            tool,
            Command::new(tool)
                .arg(format!("--gettext-package={}", request.package))
                .arg("--pot")
                .current_dir(request.po_dir),
        )?;

        if !request.output.exists() {
            return Err(ToolError::MissingOutput {
                tool: tool.display().to_string(),
                path: request.output.to_path_buf(),
            });
        }

        Ok(())
    }

    fn merge(&self, definitions: &Path, reference: &Path, output: &Path) -> Result<(), ToolError> {
        let tool = &self.tools.merger;
        run(
            tool,
            Command::new(tool)
                .arg("--quiet")
                .arg(output_file_arg(output))
                .arg(definitions)
                .arg(reference),
        )?;

        // a zero exit with nothing written must never replace a catalog
        let written = std::fs::metadata(output).is_ok_and(|m| m.len() > 0);
        if !written {
            return Err(ToolError::MissingOutput {
                tool: tool.display().to_string(),
                path: output.to_path_buf(),
            });
        }

        Ok(())
    }

    fn compile(&self, catalog: &Path, output: &Path) -> Result<(), ToolError> {
        let tool = &self.tools.compiler;
        run(
            tool,
            Command::new(tool).arg(output_file_arg(output)).arg(catalog),
        )
        .map(drop)
    }

    fn statistics(&self, catalog: &Path) -> Result<String, ToolError> {
        let tool = &self.tools.compiler;
        let output = run(
            tool,
            Command::new(tool)
                .arg("--verbose")
                .arg("--statistics")
                .arg(output_file_arg(Path::new(NULL_DEVICE)))
                .arg(catalog),
        )?;

        // msgfmt reports statistics on stderr
        let stderr = String::from_utf8_lossy(&output.stderr);
        let text = if stderr.trim().is_empty() {
            String::from_utf8_lossy(&output.stdout).into_owned()
        } else {
            stderr.into_owned()
        };

        Ok(text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect::<Vec<_>>()
            .join(" "))
    }
}
