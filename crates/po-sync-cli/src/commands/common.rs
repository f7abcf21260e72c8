use crate::core::{CliError, InvalidConfigError, Project, TemplateStatus, load_config};
use crate::pipeline::{discover_sources, ensure_template, write_manifest};
use crate::toolchain::GettextToolchain;
use crate::utils::ui;
use clap::Args;
use po_sync_toml::{PoSyncConfig, validate_package};
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Project selection and configuration overrides shared by every command.
///
/// Each override wins over the environment variable named in its help text,
/// which wins over `po-sync.toml`.
#[derive(Debug, Clone, Default, Args)]
pub struct ProjectArgs {
    /// Path to the project root containing po-sync.toml (defaults to current directory).
    #[arg(short, long, global = true)]
    pub path: Option<PathBuf>,

    /// Gettext domain; names the template and the installed catalogs.
    #[arg(long, global = true, env = "PO_SYNC_PACKAGE")]
    pub package: Option<String>,

    /// Root of the locale tree catalogs are installed into.
    #[arg(long, global = true, env = "PO_SYNC_INSTALL_ROOT")]
    pub install_root: Option<PathBuf>,

    /// Template extraction tool.
    #[arg(long, global = true, env = "INTLTOOL_UPDATE")]
    pub extractor: Option<PathBuf>,

    /// Catalog merge tool.
    #[arg(long, global = true, env = "MSGMERGE")]
    pub merger: Option<PathBuf>,

    /// Catalog compiler.
    #[arg(long, global = true, env = "MSGFMT")]
    pub compiler: Option<PathBuf>,
}

/// A project resolved from `po-sync.toml` and the command-line overrides.
#[derive(Debug, Clone)]
pub struct LoadedProject {
    pub project: Project,
    pub toolchain: GettextToolchain,
}

impl LoadedProject {
    /// Load the configuration below `args.path` and apply the overrides.
    pub fn load(args: &ProjectArgs) -> Result<Self, CliError> {
        let root = args.path.clone().unwrap_or_else(|| PathBuf::from("."));
        let root = fs_err::canonicalize(&root)?;

        let config_path = PoSyncConfig::config_path_for(&root);
        let mut config = load_config(&config_path)?;
        apply_overrides(&mut config, args);

        validate_package(&config.package).map_err(|err| InvalidConfigError {
            path: config_path.clone(),
            help: err.to_string(),
        })?;

        let mut tools = config.tools.clone();
        for tool in [&mut tools.extractor, &mut tools.merger, &mut tools.compiler] {
            *tool = resolve_tool(&root, tool);
        }

        Ok(Self {
            project: Project::from_config(&root, &config),
            toolchain: GettextToolchain::new(tools),
        })
    }
}

fn apply_overrides(config: &mut PoSyncConfig, args: &ProjectArgs) {
    if let Some(package) = &args.package {
        config.package = package.clone();
    }
    if let Some(install_root) = &args.install_root {
        config.install_root = install_root.clone();
    }
    if let Some(extractor) = &args.extractor {
        config.tools.extractor = extractor.clone();
    }
    if let Some(merger) = &args.merger {
        config.tools.merger = merger.clone();
    }
    if let Some(compiler) = &args.compiler {
        config.tools.compiler = compiler.clone();
    }
}

/// Anchor relative tool paths like `tools/msgfmt` at the project root.
///
/// The extractor runs inside the catalog directory, so a relative path with a
/// directory part would otherwise resolve differently per tool. Bare names
/// are left for `PATH` lookup.
fn resolve_tool(root: &Path, tool: &Path) -> PathBuf {
    if tool.is_relative() && tool.components().count() > 1 {
        root.join(tool)
    } else {
        tool.to_path_buf()
    }
}

/// Discovery and template generation, the shared prefix of `all` and `update-po`.
pub fn prepare_template(
    loaded: &LoadedProject,
    force: bool,
) -> Result<TemplateStatus, CliError> {
    let project = &loaded.project;

    let sources = discover_sources(&project.root, &project.sources)?;
    write_manifest(&project.manifest_path(), &sources)?;
    ui::print_discovered_sources(sources.len(), &project.manifest_path());

    let spinner = ui::create_spinner("Extracting template...");
    let start = Instant::now();
    let status = ensure_template(project, &sources, &loaded.toolchain, force);
    spinner.finish_and_clear();

    let status = status?;
    ui::print_template_status(status, &project.template_path(), start.elapsed());
    Ok(status)
}
