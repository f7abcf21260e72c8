use crate::core::CliError;

/// `depend` exists for build systems that call it; there is nothing to compute.
pub fn run_depend() -> Result<(), CliError> {
    tracing::debug!("depend: nothing to do");
    Ok(())
}
