use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use color_eyre::Result;
use color_eyre::eyre::{WrapErr, eyre};
use procreap::config::{self, Config, LayoutChoice};
use procreap::monitor::Monitor;
use procreap::system::collector::{Collector, PsLister};
use procreap::system::kill::SignalTerminator;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "procreap",
    version,
    about = "Periodically terminate processes whose command line matches a pattern"
)]
struct Cli {
    /// Regular expression matched anywhere in each process's command line
    #[arg(allow_hyphen_values = true)]
    pattern: String,

    /// Path to config file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Column layout requested from the process lister
    #[arg(long, value_enum)]
    layout: Option<LayoutChoice>,

    /// Process lister program
    #[arg(long)]
    lister: Option<String>,

    /// Report matching processes without terminating them
    #[arg(long, default_value_t = false)]
    dry_run: bool,

    /// Log filter, e.g. `debug` or `procreap=trace` (overrides RUST_LOG)
    #[arg(long)]
    log: Option<String>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            let _ = err.print();
            return if err.use_stderr() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    if let Err(err) = color_eyre::install() {
        eprintln!("{err}");
        return ExitCode::FAILURE;
    }

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err:?}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config = load_config_for_cli(&cli)?;
    init_tracing(cli.log.as_deref(), &config.general.log_filter)?;

    let layout = config.lister.layout.resolve();
    let collector = Collector::new(PsLister::new(config.lister.program.as_str()), layout);
    let mut monitor = Monitor::new(&cli.pattern, collector, SignalTerminator::new())?
        .with_dry_run(config.general.dry_run);

    info!(
        pattern = monitor.pattern(),
        ?layout,
        lister = %config.lister.program,
        pid = monitor.self_pid(),
        dry_run = config.general.dry_run,
        "watching for matching processes"
    );

    monitor.run_until(shutdown_signal()).await;
    info!("interrupted, exiting");
    Ok(())
}

fn load_config_for_cli(cli: &Cli) -> Result<Config> {
    let mut config = match &cli.config {
        Some(path) => config::load_config_from_path(path)?,
        None => config::load_config()?,
    };

    if let Some(layout) = cli.layout {
        config.lister.layout = layout;
    }
    if let Some(ref program) = cli.lister {
        config.lister.program = program.clone();
    }
    if cli.dry_run {
        config.general.dry_run = true;
    }

    Ok(config)
}

fn init_tracing(cli_filter: Option<&str>, config_filter: &str) -> Result<()> {
    let filter = match cli_filter {
        Some(directives) => EnvFilter::try_new(directives)
            .wrap_err_with(|| format!("invalid --log filter `{directives}`"))?,
        None => EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(config_filter))?,
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| eyre!("failed to set tracing subscriber: {e}"))
}

/// Resolves on Ctrl-C. If the handler cannot be installed the monitor runs
/// until the process is killed from outside.
async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!(error = %err, "cannot listen for Ctrl-C");
        std::future::pending::<()>().await;
    }
}
