use anyhow::Context;
use clap::Parser;

mod cli;
mod commands;
mod context;
mod output;

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        if is_storage_fault(&error) {
            tracing::error!(error = ?error, "registry storage failure");
        }
        eprintln!("survey error: {error:#}");
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();
    init_tracing(cli.quiet, cli.verbose)?;

    let flags = cli.global_flags();

    if let cli::Commands::Init(args) = &cli.command {
        return commands::init::handle(args, &flags).await;
    }

    let cwd = std::env::current_dir().context("failed to read current directory")?;
    let project_root = context::resolve_project_root(flags.project.as_deref(), &cwd)?;
    let _ = dotenvy::from_path(project_root.join(".env"));
    let config = survey_config::SurveyConfig::load_for_project(&project_root)
        .context("failed to load survey configuration")?;

    let ctx = context::AppContext::init(project_root, config, flags.operator.clone())
        .await
        .context("failed to initialize survey application context")?;

    commands::dispatch::dispatch(cli.command, &ctx, &flags).await
}

/// Storage faults are logged in full; validation, duplicate and not-found
/// errors are only printed.
fn is_storage_fault(error: &anyhow::Error) -> bool {
    error.chain().any(|cause| {
        cause
            .downcast_ref::<survey_db::error::DatabaseError>()
            .is_some_and(|db| !db.is_user_error())
    })
}

fn init_tracing(quiet: bool, verbose: bool) -> anyhow::Result<()> {
    let level = if quiet {
        "error"
    } else if verbose {
        "debug"
    } else {
        "warn"
    };

    let filter = tracing_subscriber::EnvFilter::try_from_env("SURVEY_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|error| anyhow::anyhow!("failed to initialize tracing subscriber: {error}"))?;

    Ok(())
}
