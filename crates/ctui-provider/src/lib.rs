//! Command execution and output parsing for the `container` CLI
//!
//! This crate never talks to a daemon directly. It runs the CLI as a child
//! process (or pretends to, in dry-run mode), audits each run, and parses
//! the CLI's tabular text back into typed records.

mod audit;
mod build_file;
mod cli_check;
mod command;
mod dry_run;
mod error;
mod humanize;
mod parse;
mod real;
mod types;

pub use audit::{AuditEntry, AuditLog, AuditSink, LoggingExecutor};
pub use build_file::detect_build_file;
pub use cli_check::check_cli;
pub use command::{Command, CONTAINER_CLI};
pub use dry_run::DryRunExecutor;
pub use error::*;
pub use humanize::{describe_failure, humanize};
pub use parse::{parse_container_list, parse_daemon_status, parse_image_list, parse_port_mappings};
pub use real::RealExecutor;
pub use types::*;

use async_trait::async_trait;
use tokio::sync::mpsc;

/// Strategy for running a [`Command`]
///
/// Failed runs return `Err` with the captured [`CommandOutput`] attached,
/// see [`ProviderError::output`].
#[async_trait]
pub trait CommandExecutor: Send + Sync {
    /// Run to completion and capture stdout and stderr
    async fn execute(&self, command: &Command) -> Result<CommandOutput>;

    /// Run while forwarding stdout lines as they arrive
    ///
    /// Dropping the returned future stops the command.
    async fn stream(
        &self,
        command: &Command,
        lines: mpsc::UnboundedSender<String>,
    ) -> Result<CommandOutput> {
        let output = self.execute(command).await?;
        for line in output.stdout.lines() {
            let _ = lines.send(line.to_string());
        }
        Ok(output)
    }

    /// Whether commands are only previewed
    fn is_dry_run(&self) -> bool {
        false
    }
}
