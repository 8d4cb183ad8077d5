//! Executor that spawns the container CLI

use crate::{Command, CommandExecutor, CommandOutput, CommandStatus, ProviderError, Result};
use async_trait::async_trait;
use std::process::{ExitStatus, Stdio};
use std::time::{Duration, Instant};
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio::sync::mpsc;

/// Runs commands as child processes
///
/// Children are killed when the running future is dropped, so aborting a
/// streaming task also ends a `logs -f` follower.
#[derive(Debug, Clone, Default)]
pub struct RealExecutor;

impl RealExecutor {
    pub fn new() -> Self {
        Self
    }

    fn process(command: &Command) -> tokio::process::Command {
        let mut cmd = tokio::process::Command::new(&command.executable);
        cmd.args(&command.args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);
        cmd
    }

    fn spawn_error(command: &Command, source: std::io::Error, duration: Duration) -> ProviderError {
        ProviderError::Spawn {
            program: command.executable.clone(),
            output: CommandOutput {
                exit_code: -1,
                stderr: source.to_string(),
                duration,
                status: CommandStatus::Error,
                ..Default::default()
            },
            source,
        }
    }

    fn finish(
        command: &Command,
        status: ExitStatus,
        stdout: String,
        stderr: String,
        duration: Duration,
    ) -> Result<CommandOutput> {
        // Signals carry no exit code
        let exit_code = status.code().unwrap_or(-1);
        let mut output = CommandOutput {
            exit_code,
            stdout,
            stderr,
            duration,
            status: CommandStatus::Success,
        };

        if status.success() {
            tracing::debug!("{} finished in {:?}", command, duration);
            Ok(output)
        } else {
            tracing::debug!("{} exited with code {}", command, exit_code);
            output.status = CommandStatus::Error;
            Err(ProviderError::Exit {
                program: command.executable.clone(),
                output,
            })
        }
    }

    async fn read_stream_lines<R>(
        stream: Option<R>,
        lines: Option<&mpsc::UnboundedSender<String>>,
    ) -> std::io::Result<String>
    where
        R: AsyncRead + Unpin,
    {
        let Some(stream) = stream else {
            return Ok(String::new());
        };

        // Lines are split on raw bytes so stray non-UTF-8 output is replaced, not fatal
        let mut reader = BufReader::new(stream);
        let mut buf = Vec::new();
        let mut collected = String::new();
        loop {
            buf.clear();
            if reader.read_until(b'\n', &mut buf).await? == 0 {
                break;
            }
            if buf.last() == Some(&b'\n') {
                buf.pop();
                if buf.last() == Some(&b'\r') {
                    buf.pop();
                }
            }
            let line = String::from_utf8_lossy(&buf).into_owned();
            collected.push_str(&line);
            collected.push('\n');
            if let Some(tx) = lines {
                let _ = tx.send(line);
            }
        }
        Ok(collected)
    }
}

#[async_trait]
impl CommandExecutor for RealExecutor {
    async fn execute(&self, command: &Command) -> Result<CommandOutput> {
        tracing::debug!("Running {}", command);
        let start = Instant::now();

        let output = Self::process(command)
            .output()
            .await
            .map_err(|e| Self::spawn_error(command, e, start.elapsed()))?;

        Self::finish(
            command,
            output.status,
            String::from_utf8_lossy(&output.stdout).to_string(),
            String::from_utf8_lossy(&output.stderr).to_string(),
            start.elapsed(),
        )
    }

    async fn stream(
        &self,
        command: &Command,
        lines: mpsc::UnboundedSender<String>,
    ) -> Result<CommandOutput> {
        tracing::debug!("Streaming {}", command);
        let start = Instant::now();

        let mut child = Self::process(command)
            .spawn()
            .map_err(|e| Self::spawn_error(command, e, start.elapsed()))?;

        let stdout = child.stdout.take();
        let stderr = child.stderr.take();
        let (stdout, stderr) = tokio::join!(
            Self::read_stream_lines(stdout, Some(&lines)),
            Self::read_stream_lines(stderr, None),
        );

        let status = child
            .wait()
            .await
            .map_err(|e| Self::spawn_error(command, e, start.elapsed()))?;
        let stdout = stdout.map_err(|e| Self::spawn_error(command, e, start.elapsed()))?;
        let stderr = stderr.map_err(|e| Self::spawn_error(command, e, start.elapsed()))?;

        Self::finish(command, status, stdout, stderr, start.elapsed())
    }
}
