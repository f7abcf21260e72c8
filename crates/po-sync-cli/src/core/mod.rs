//! Core types, errors, and shared functionality.

mod dry_run;
mod errors;
mod project;
mod types;

pub use dry_run::DryRunDiff;
pub use errors::*;
pub use project::*;
pub use types::*;
