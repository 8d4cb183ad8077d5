//! Executor that only reports what it would run

use crate::{Command, CommandExecutor, CommandOutput, Result};
use async_trait::async_trait;
use std::time::Instant;

#[derive(Debug, Clone, Default)]
pub struct DryRunExecutor;

impl DryRunExecutor {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl CommandExecutor for DryRunExecutor {
    async fn execute(&self, command: &Command) -> Result<CommandOutput> {
        let start = Instant::now();
        tracing::info!("dry-run: {}", command);
        Ok(CommandOutput::success(
            format!("dry-run: {}", command),
            start.elapsed(),
        ))
    }

    fn is_dry_run(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::CommandStatus;
    use tokio::sync::mpsc;

    #[tokio::test]
    async fn test_dry_run_reports_command() {
        let exec = DryRunExecutor::new();
        let output = exec
            .execute(&Command::container(["delete", "abc"]))
            .await
            .unwrap();
        assert_eq!(output.stdout, "dry-run: container delete abc");
        assert_eq!(output.exit_code, 0);
        assert_eq!(output.status, CommandStatus::Success);
        assert!(output.stderr.is_empty());
    }

    #[tokio::test]
    async fn test_dry_run_stream_sends_preview_line() {
        let exec = DryRunExecutor::new();
        let (tx, mut rx) = mpsc::unbounded_channel();
        exec.stream(&Command::container(["logs", "-f", "abc"]), tx)
            .await
            .unwrap();
        assert_eq!(
            rx.recv().await.as_deref(),
            Some("dry-run: container logs -f abc")
        );
    }
}
