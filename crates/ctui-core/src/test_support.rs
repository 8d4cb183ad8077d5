//! Test support utilities for ctui-core
//!
//! Provides a scripted [`MockExecutor`] so builders, shell detection and
//! the TUI can be exercised without the `container` CLI installed.

use async_trait::async_trait;
use ctui_provider::{Command, CommandExecutor, CommandOutput, CommandStatus, ProviderError, Result};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Scripted result for matching commands
#[derive(Debug, Clone)]
pub enum MockResponse {
    Success { stdout: String },
    Failure { exit_code: i32, stderr: String },
}

impl MockResponse {
    fn into_result(self, command: &Command) -> Result<CommandOutput> {
        match self {
            Self::Success { stdout } => Ok(CommandOutput::success(stdout, Duration::from_millis(1))),
            Self::Failure { exit_code, stderr } => Err(ProviderError::Exit {
                program: command.executable.clone(),
                output: CommandOutput {
                    exit_code,
                    stderr,
                    duration: Duration::from_millis(1),
                    status: CommandStatus::Error,
                    ..Default::default()
                },
            }),
        }
    }
}

/// Executor that records commands and replies from a script
///
/// Rules match on an exact argument vector; the most recently added rule
/// wins. Unmatched commands get the default response.
pub struct MockExecutor {
    pub calls: Arc<Mutex<Vec<Command>>>,
    rules: Arc<Mutex<Vec<(Vec<String>, MockResponse)>>>,
    default: Arc<Mutex<MockResponse>>,
    dry_run: bool,
}

impl Default for MockExecutor {
    fn default() -> Self {
        Self::new()
    }
}

impl MockExecutor {
    /// Every command succeeds with empty output unless scripted
    pub fn new() -> Self {
        Self {
            calls: Arc::new(Mutex::new(Vec::new())),
            rules: Arc::new(Mutex::new(Vec::new())),
            default: Arc::new(Mutex::new(MockResponse::Success {
                stdout: String::new(),
            })),
            dry_run: false,
        }
    }

    /// Every unscripted command fails with `exit_code`
    pub fn failing_by_default(exit_code: i32) -> Self {
        let mock = Self::new();
        *mock.default.lock().unwrap() = MockResponse::Failure {
            exit_code,
            stderr: String::new(),
        };
        mock
    }

    /// Report itself as a dry-run executor
    pub fn dry_run(mut self) -> Self {
        self.dry_run = true;
        self
    }

    /// Succeed with `stdout` for commands with exactly `args`
    pub fn respond<S: AsRef<str>>(&self, args: &[S], stdout: &str) {
        self.push_rule(
            args,
            MockResponse::Success {
                stdout: stdout.to_string(),
            },
        );
    }

    /// Fail with `exit_code` and `stderr` for commands with exactly `args`
    pub fn fail<S: AsRef<str>>(&self, args: &[S], exit_code: i32, stderr: &str) {
        self.push_rule(
            args,
            MockResponse::Failure {
                exit_code,
                stderr: stderr.to_string(),
            },
        );
    }

    fn push_rule<S: AsRef<str>>(&self, args: &[S], response: MockResponse) {
        let args = args.iter().map(|a| a.as_ref().to_string()).collect();
        self.rules.lock().unwrap().push((args, response));
    }

    /// All commands executed so far
    pub fn calls(&self) -> Vec<Command> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    /// Whether a command with exactly `args` was executed
    pub fn was_called<S: AsRef<str>>(&self, args: &[S]) -> bool {
        self.calls.lock().unwrap().iter().any(|c| {
            c.args.len() == args.len() && c.args.iter().zip(args).all(|(a, b)| a == b.as_ref())
        })
    }

    fn response_for(&self, command: &Command) -> MockResponse {
        let rules = self.rules.lock().unwrap();
        rules
            .iter()
            .rev()
            .find(|(args, _)| *args == command.args)
            .map(|(_, response)| response.clone())
            .unwrap_or_else(|| self.default.lock().unwrap().clone())
    }
}

#[async_trait]
impl CommandExecutor for MockExecutor {
    async fn execute(&self, command: &Command) -> Result<CommandOutput> {
        self.calls.lock().unwrap().push(command.clone());
        self.response_for(command).into_result(command)
    }

    fn is_dry_run(&self) -> bool {
        self.dry_run
    }
}

/// Container list output in the fixed-width layout
pub fn container_table(rows: &[(&str, &str, &str, &str)]) -> String {
    let mut out = format!(
        "{:<14}{:<16}{:<12}{:<12}{:<10}{}\n",
        "CONTAINER ID", "IMAGE", "COMMAND", "CREATED", "STATUS", "PORTS"
    );
    for (id, image, name, status) in rows {
        out.push_str(&format!(
            "{:<14}{:<16}{:<12}{:<12}{:<10}{}\n",
            id, image, name, "1 hour ago", status, ""
        ));
    }
    out
}

/// Image list output with NAME, TAG and DIGEST columns
pub fn image_table(rows: &[(&str, &str, &str)]) -> String {
    let mut out = format!("{:<24}{:<10}{}\n", "NAME", "TAG", "DIGEST");
    for (name, tag, digest) in rows {
        out.push_str(&format!("{:<24}{:<10}{}\n", name, tag, digest));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use ctui_provider::{parse_container_list, parse_image_list, ContainerStatus};

    #[tokio::test]
    async fn test_mock_scripted_and_default() {
        let mock = MockExecutor::new();
        mock.respond(&["list", "--all"], "rows");
        mock.fail(&["start", "x"], 2, "boom");

        let out = mock.execute(&Command::container(["list", "--all"])).await.unwrap();
        assert_eq!(out.stdout, "rows");

        let err = mock.execute(&Command::container(["start", "x"])).await.unwrap_err();
        assert_eq!(err.exit_code(), Some(2));

        let out = mock.execute(&Command::container(["other"])).await.unwrap();
        assert!(out.stdout.is_empty());

        assert!(mock.was_called(&["start", "x"]));
        assert_eq!(mock.call_count(), 3);
    }

    #[test]
    fn test_fixture_tables_parse() {
        let containers = parse_container_list(&container_table(&[
            ("abc", "nginx:latest", "web", "running"),
            ("def", "redis:7", "cache", "stopped"),
        ]))
        .unwrap();
        assert_eq!(containers.len(), 2);
        assert_eq!(containers[0].name, "web");
        assert_eq!(containers[1].status, ContainerStatus::Stopped);

        let images = parse_image_list(&image_table(&[("nginx", "latest", "sha256:1")])).unwrap();
        assert_eq!(images[0].reference(), "nginx:latest");
    }
}
