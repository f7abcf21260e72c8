use clap::{ArgAction, Parser, Subcommand};
use po_sync_cli::commands::{
    AllArgs, InstallArgs, ProjectArgs, RefreshPoArgs, UpdatePoArgs, run_all, run_clean,
    run_depend, run_distclean, run_install, run_refresh_po, run_report, run_update_po,
};
use po_sync_cli::utils::ui;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "po-sync")]
#[command(about = "Keep gettext translation catalogs in sync with the sources")]
#[command(version)]
struct Cli {
    #[command(flatten)]
    project: ProjectArgs,

    /// Deterministic output (no colors, fixed durations, hidden progress bars).
    #[arg(long, global = true, hide = true)]
    e2e: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace); overrides PO_SYNC_LOG.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Regenerate the template if needed and compile every catalog (default)
    All(AllArgs),

    /// Regenerate the template, then merge every catalog against it
    UpdatePo(UpdatePoArgs),

    /// Merge the existing catalogs against the current template
    RefreshPo(RefreshPoArgs),

    /// Print completeness statistics for every catalog
    Report,

    /// Remove compiled catalogs, editor backups and .depend
    Clean,

    /// Like clean, and also remove the manifest, the template and build state
    Distclean,

    /// Does nothing; kept for build systems that call it
    Depend,

    /// Run `all`, then install the compiled catalogs into the locale tree
    Install(InstallArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    ui::set_e2e_mode(cli.e2e);
    let color = !cli.e2e;
    miette::set_hook(Box::new(move |_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(color)
                .unicode(color)
                .context_lines(2)
                .tab_width(4)
                .color(color)
                .build(),
        )
    }))
    .ok();

    ui::init_logging(cli.verbose);

    let project = &cli.project;
    let result = match cli.command.unwrap_or(Commands::All(AllArgs::default())) {
        Commands::All(args) => run_all(project, &args),
        Commands::UpdatePo(args) => run_update_po(project, &args),
        Commands::RefreshPo(args) => run_refresh_po(project, &args),
        Commands::Report => run_report(project),
        Commands::Clean => run_clean(project),
        Commands::Distclean => run_distclean(project),
        Commands::Depend => run_depend(),
        Commands::Install(args) => run_install(project, &args),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            let code = err.exit_code().clamp(1, 255) as u8;
            eprintln!("{:?}", miette::Report::new(err));
            ExitCode::from(code)
        },
    }
}
