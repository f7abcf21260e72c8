use miette::Diagnostic;
use std::path::PathBuf;
use thiserror::Error;

/// Exit code reported when a tool could not be started at all.
const SPAWN_FAILURE_EXIT_CODE: i32 = 127;

/// Failure of an external gettext tool.
#[derive(Debug, Diagnostic, Error)]
pub enum ToolError {
    /// The process could not be started.
    #[error("failed to run `{tool}`")]
    #[diagnostic(
        code(po_sync::tool::spawn),
        help("Install `{tool}` or point po-sync at it with the matching tool override")
    )]
    Spawn {
        /// Tool path as configured.
        tool: String,
        /// The underlying spawn error.
        #[source]
        source: std::io::Error,
    },

    /// The process ran and reported failure.
    #[error("`{tool}` {}", describe_exit(.code))]
    #[diagnostic(code(po_sync::tool::failed))]
    Failed {
        /// Tool path as configured.
        tool: String,
        /// Exit code, `None` when terminated by a signal.
        code: Option<i32>,
        /// Captured standard error.
        #[help]
        stderr: String,
    },

    /// The process succeeded but did not write the file it is expected to produce.
    #[error("`{tool}` did not produce {}", path.display())]
    #[diagnostic(code(po_sync::tool::missing_output))]
    MissingOutput {
        /// Tool path as configured.
        tool: String,
        /// The expected output.
        path: PathBuf,
    },
}

fn describe_exit(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("exited with status {code}"),
        None => "was terminated by a signal".to_string(),
    }
}

impl ToolError {
    /// The process exit code po-sync reports for this failure.
    pub fn exit_code(&self) -> i32 {
        match self {
            ToolError::Spawn { .. } => SPAWN_FAILURE_EXIT_CODE,
            ToolError::Failed {
                code: Some(code), ..
            } if *code != 0 => *code,
            ToolError::Failed { .. } | ToolError::MissingOutput { .. } => 1,
        }
    }

    /// Short single-line description used in per-catalog status lines.
    pub fn summary(&self) -> String {
        match self {
            ToolError::Failed { stderr, .. } if !stderr.is_empty() => {
                let first_line = stderr.lines().next().unwrap_or_default();
                format!("{self}: {first_line}")
            },
            _ => self.to_string(),
        }
    }
}
