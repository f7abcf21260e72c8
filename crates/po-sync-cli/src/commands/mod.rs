//! CLI command implementations.

mod all;
mod clean;
mod common;
mod depend;
mod install;
mod refresh_po;
mod report;
mod update_po;

pub use all::{AllArgs, run_all};
pub use clean::{run_clean, run_distclean};
pub use common::{LoadedProject, ProjectArgs, prepare_template};
pub use depend::run_depend;
pub use install::{InstallArgs, run_install};
pub use refresh_po::{RefreshPoArgs, run_refresh_po};
pub use report::run_report;
pub use update_po::{UpdatePoArgs, run_update_po};
