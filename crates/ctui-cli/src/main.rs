//! ctui - terminal UI for the `container` CLI

use anyhow::Context;
use clap::Parser;
use ctui_config::Preferences;
use ctui_core::{CheckDaemonStatusBuilder, CommandBuilder};
use ctui_provider::{
    check_cli, describe_failure, parse_daemon_status, AuditLog, CommandExecutor, DryRunExecutor,
    LoggingExecutor, RealExecutor, CONTAINER_CLI,
};
use ctui_tui::AppContext;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

#[derive(Parser)]
#[command(name = "ctui")]
#[command(author, version, about = "Container Manager", long_about = None)]
struct Cli {
    /// Show commands without running them
    #[arg(long)]
    dry_run: bool,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    let preferences = Preferences::load().context("Could not load preferences")?;

    if !cli.dry_run {
        check_cli(CONTAINER_CLI).await.with_context(|| {
            format!(
                "{} is required; install Apple's container tool or run with --dry-run",
                CONTAINER_CLI
            )
        })?;
    }

    let executor = build_executor(cli.dry_run, &preferences);

    if !cli.dry_run {
        warn_if_daemon_stopped(executor.as_ref()).await;
    }

    let ctx = AppContext::new(preferences, cli.dry_run, env!("CARGO_PKG_VERSION"));
    ctui_tui::run(executor, ctx).await?;
    Ok(())
}

/// Real or dry-run executor, audited when the log location resolves
fn build_executor(dry_run: bool, preferences: &Preferences) -> Arc<dyn CommandExecutor> {
    let inner: Arc<dyn CommandExecutor> = if dry_run {
        Arc::new(DryRunExecutor::new())
    } else {
        Arc::new(RealExecutor::new())
    };

    let audit = Preferences::audit_log_path()
        .map_err(anyhow::Error::from)
        .and_then(|path| Ok(AuditLog::new(path, preferences.log_retention_days)?));
    match audit {
        Ok(log) => {
            tracing::debug!("Auditing commands to {}", log.path().display());
            Arc::new(LoggingExecutor::new(inner, Arc::new(log)))
        }
        Err(e) => {
            eprintln!("Warning: command audit log disabled: {:#}", e);
            inner
        }
    }
}

async fn warn_if_daemon_stopped(executor: &dyn CommandExecutor) {
    let command = match CheckDaemonStatusBuilder.build() {
        Ok(command) => command,
        Err(e) => {
            tracing::debug!("Skipping daemon status check: {}", e);
            return;
        }
    };
    match executor.execute(&command).await {
        Ok(output) if parse_daemon_status(&output.stdout).running => {}
        Ok(_) => eprintln!(
            "Warning: container system is not running; start it with `{} system start` or press 'm' in ctui",
            CONTAINER_CLI
        ),
        Err(e) => eprintln!(
            "Warning: container system is not running: {}",
            describe_failure(&e)
        ),
    }
}
