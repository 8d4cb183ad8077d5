//! Command audit log
//!
//! Every executed command is appended to a JSON-lines file. Entries older
//! than the retention window are dropped on the first write of a session
//! and then at most once a day.

use crate::{Command, CommandExecutor, CommandOutput, CommandStatus, ProviderError, Result};
use async_trait::async_trait;
use chrono::{DateTime, Duration as ChronoDuration, Utc};
use serde::{Deserialize, Serialize};
use std::fs::OpenOptions;
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::Instant;
use tokio::sync::mpsc;

/// One audited command run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditEntry {
    pub command: String,
    pub dry_run: bool,
    pub exit_code: i32,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub stdout: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub stderr: String,
    pub start_time: DateTime<Utc>,
    pub duration_ms: u64,
    pub status: CommandStatus,
}

impl AuditEntry {
    /// Build an entry for a finished run; the start time is now minus the run duration
    pub fn from_output(command: &Command, output: &CommandOutput, dry_run: bool) -> Self {
        let elapsed = ChronoDuration::from_std(output.duration).unwrap_or_else(|_| ChronoDuration::zero());
        Self {
            command: command.to_string(),
            dry_run,
            exit_code: output.exit_code,
            stdout: output.stdout.clone(),
            stderr: output.stderr.clone(),
            start_time: Utc::now() - elapsed,
            duration_ms: output.duration.as_millis() as u64,
            status: output.status,
        }
    }
}

/// Destination for audit entries
pub trait AuditSink: Send + Sync {
    fn write(&self, entry: &AuditEntry) -> Result<()>;
}

/// Audit log stored as one JSON object per line
#[derive(Debug)]
pub struct AuditLog {
    path: PathBuf,
    retention_days: u32,
    /// Serializes file access; holds the time of the last rotation
    last_rotation: Mutex<Option<DateTime<Utc>>>,
}

impl AuditLog {
    /// Open a log at `path`; a retention of 0 disables rotation
    pub fn new(path: impl Into<PathBuf>, retention_days: u32) -> Result<Self> {
        let path = path.into();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|e| audit_error(&path, e))?;
            }
        }
        Ok(Self {
            path,
            retention_days,
            last_rotation: Mutex::new(None),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read every entry currently in the log, skipping malformed lines
    pub fn entries(&self) -> Result<Vec<AuditEntry>> {
        let _guard = self.last_rotation.lock().unwrap_or_else(|e| e.into_inner());
        self.read_entries()
    }

    fn read_entries(&self) -> Result<Vec<AuditEntry>> {
        let file = match std::fs::File::open(&self.path) {
            Ok(f) => f,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(audit_error(&self.path, e)),
        };

        let mut entries = Vec::new();
        for line in BufReader::new(file).lines() {
            let line = line.map_err(|e| audit_error(&self.path, e))?;
            if line.trim().is_empty() {
                continue;
            }
            match serde_json::from_str::<AuditEntry>(&line) {
                Ok(entry) => entries.push(entry),
                Err(e) => tracing::warn!("Skipping malformed audit line: {}", e),
            }
        }
        Ok(entries)
    }

    /// Rewrite the log keeping only entries inside the retention window
    fn rotate(&self) -> Result<()> {
        if self.retention_days == 0 || !self.path.exists() {
            return Ok(());
        }

        let cutoff = Utc::now() - ChronoDuration::days(i64::from(self.retention_days));
        let entries = self.read_entries()?;
        let total = entries.len();
        let kept: Vec<_> = entries
            .into_iter()
            .filter(|e| e.start_time.timestamp() == 0 || e.start_time > cutoff)
            .collect();

        if kept.len() == total {
            return Ok(());
        }

        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);
        {
            let mut file = std::fs::File::create(&tmp).map_err(|e| audit_error(&tmp, e))?;
            for entry in &kept {
                let line = serde_json::to_string(entry)?;
                writeln!(file, "{}", line).map_err(|e| audit_error(&tmp, e))?;
            }
        }
        std::fs::rename(&tmp, &self.path).map_err(|e| audit_error(&self.path, e))?;

        tracing::debug!("Rotated audit log, dropped {} entries", total - kept.len());
        Ok(())
    }
}

impl AuditSink for AuditLog {
    fn write(&self, entry: &AuditEntry) -> Result<()> {
        let mut last_rotation = self.last_rotation.lock().unwrap_or_else(|e| e.into_inner());
        let now = Utc::now();
        if last_rotation.map_or(true, |at| now - at >= ChronoDuration::days(1)) {
            self.rotate()?;
            *last_rotation = Some(now);
        }

        let line = serde_json::to_string(entry)?;
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|e| audit_error(&self.path, e))?;
        writeln!(file, "{}", line).map_err(|e| audit_error(&self.path, e))
    }
}

fn audit_error(path: &Path, source: std::io::Error) -> ProviderError {
    ProviderError::Audit {
        path: path.to_path_buf(),
        source,
    }
}

/// Executor decorator that audits every run of the wrapped executor
///
/// Audit failures never change the result of the command.
pub struct LoggingExecutor {
    inner: Arc<dyn CommandExecutor>,
    sink: Arc<dyn AuditSink>,
}

impl LoggingExecutor {
    pub fn new(inner: Arc<dyn CommandExecutor>, sink: Arc<dyn AuditSink>) -> Self {
        Self { inner, sink }
    }

    fn record(&self, command: &Command, result: &Result<CommandOutput>) {
        let output = match result {
            Ok(output) => output,
            Err(e) => match e.output() {
                Some(output) => output,
                None => return,
            },
        };
        self.record_output(command, output);
    }

    fn record_output(&self, command: &Command, output: &CommandOutput) {
        let entry = AuditEntry::from_output(command, output, self.inner.is_dry_run());
        if let Err(e) = self.sink.write(&entry) {
            tracing::warn!("Failed to write audit entry: {}", e);
        }
    }
}

/// Audits a streamed run as cancelled if it is dropped before finishing
struct CancelGuard<'a> {
    executor: &'a LoggingExecutor,
    command: &'a Command,
    start: Instant,
    finished: bool,
}

impl Drop for CancelGuard<'_> {
    fn drop(&mut self) {
        if self.finished {
            return;
        }
        let output = CommandOutput {
            exit_code: -1,
            duration: self.start.elapsed(),
            status: CommandStatus::Cancelled,
            ..Default::default()
        };
        self.executor.record_output(self.command, &output);
    }
}

#[async_trait]
impl CommandExecutor for LoggingExecutor {
    async fn execute(&self, command: &Command) -> Result<CommandOutput> {
        let result = self.inner.execute(command).await;
        self.record(command, &result);
        result
    }

    async fn stream(
        &self,
        command: &Command,
        lines: mpsc::UnboundedSender<String>,
    ) -> Result<CommandOutput> {
        let mut guard = CancelGuard {
            executor: self,
            command,
            start: Instant::now(),
            finished: false,
        };
        let result = self.inner.stream(command, lines).await;
        guard.finished = true;
        self.record(command, &result);
        result
    }

    fn is_dry_run(&self) -> bool {
        self.inner.is_dry_run()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DryRunExecutor;
    use std::time::Duration;

    fn entry_at(start_time: DateTime<Utc>) -> AuditEntry {
        AuditEntry {
            command: "container list --all".to_string(),
            dry_run: false,
            exit_code: 0,
            stdout: String::new(),
            stderr: String::new(),
            start_time,
            duration_ms: 5,
            status: CommandStatus::Success,
        }
    }

    #[derive(Default)]
    struct RecordingSink {
        entries: Mutex<Vec<AuditEntry>>,
    }

    impl AuditSink for RecordingSink {
        fn write(&self, entry: &AuditEntry) -> Result<()> {
            self.entries.lock().unwrap().push(entry.clone());
            Ok(())
        }
    }

    struct FailingSink;

    impl AuditSink for FailingSink {
        fn write(&self, _entry: &AuditEntry) -> Result<()> {
            Err(ProviderError::Invalid("disk full".to_string()))
        }
    }

    struct FailingExecutor;

    #[async_trait]
    impl CommandExecutor for FailingExecutor {
        async fn execute(&self, command: &Command) -> Result<CommandOutput> {
            Err(ProviderError::Exit {
                program: command.executable.clone(),
                output: CommandOutput {
                    exit_code: 2,
                    stderr: "boom".to_string(),
                    duration: Duration::from_millis(10),
                    status: CommandStatus::Error,
                    ..Default::default()
                },
            })
        }
    }

    #[test]
    fn test_entry_json_field_names() {
        let entry = entry_at(Utc::now());
        let json = serde_json::to_string(&entry).unwrap();
        assert!(json.contains("\"dryRun\":false"));
        assert!(json.contains("\"exitCode\":0"));
        assert!(json.contains("\"durationMs\":5"));
        assert!(json.contains("\"startTime\""));
        assert!(json.contains("\"status\":\"success\""));
        // Empty streams are omitted
        assert!(!json.contains("stdout"));
        assert!(!json.contains("stderr"));
    }

    #[test]
    fn test_entry_start_time_precedes_now() {
        let output = CommandOutput::success("ok", Duration::from_secs(2));
        let entry = AuditEntry::from_output(&Command::container(["list"]), &output, false);
        assert!(entry.start_time <= Utc::now() - ChronoDuration::seconds(1));
        assert_eq!(entry.duration_ms, 2000);
    }

    #[test]
    fn test_write_appends_json_lines() {
        let tmp = tempfile::tempdir().unwrap();
        let log = AuditLog::new(tmp.path().join("logs").join("command.log"), 7).unwrap();

        log.write(&entry_at(Utc::now())).unwrap();
        log.write(&entry_at(Utc::now())).unwrap();

        let content = std::fs::read_to_string(log.path()).unwrap();
        assert_eq!(content.lines().count(), 2);
        assert_eq!(log.entries().unwrap().len(), 2);
    }

    #[test]
    fn test_rotation_drops_old_entries() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("command.log");

        let earlier = AuditLog::new(&path, 7).unwrap();
        earlier.write(&entry_at(Utc::now() - ChronoDuration::days(30))).unwrap();
        earlier.write(&entry_at(DateTime::<Utc>::UNIX_EPOCH)).unwrap();
        assert_eq!(earlier.entries().unwrap().len(), 2);

        // A new session rotates on its first write
        let log = AuditLog::new(&path, 7).unwrap();
        log.write(&entry_at(Utc::now())).unwrap();

        let entries = log.entries().unwrap();
        assert_eq!(entries.len(), 2);
        assert!(entries.iter().any(|e| e.start_time.timestamp() == 0));
        assert!(!tmp.path().join("command.log.tmp").exists());
    }

    #[test]
    fn test_rotation_runs_once_per_session() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("command.log");
        std::fs::write(&path, "").unwrap();

        let log = AuditLog::new(&path, 7).unwrap();
        log.write(&entry_at(Utc::now())).unwrap();
        log.write(&entry_at(Utc::now() - ChronoDuration::days(30))).unwrap();
        log.write(&entry_at(Utc::now())).unwrap();

        assert_eq!(log.entries().unwrap().len(), 3);
    }

    #[test]
    fn test_zero_retention_keeps_everything() {
        let tmp = tempfile::tempdir().unwrap();
        let log = AuditLog::new(tmp.path().join("command.log"), 0).unwrap();

        log.write(&entry_at(Utc::now() - ChronoDuration::days(365))).unwrap();
        log.write(&entry_at(Utc::now())).unwrap();

        assert_eq!(log.entries().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_logging_executor_records_dry_run() {
        let sink = Arc::new(RecordingSink::default());
        let exec = LoggingExecutor::new(Arc::new(DryRunExecutor::new()), sink.clone());

        let output = exec
            .execute(&Command::container(["stop", "abc"]))
            .await
            .unwrap();
        assert_eq!(output.stdout, "dry-run: container stop abc");

        let entries = sink.entries.lock().unwrap();
        assert_eq!(entries.len(), 1);
        assert!(entries[0].dry_run);
        assert_eq!(entries[0].command, "container stop abc");
    }

    #[tokio::test]
    async fn test_logging_executor_records_failures() {
        let sink = Arc::new(RecordingSink::default());
        let exec = LoggingExecutor::new(Arc::new(FailingExecutor), sink.clone());

        let err = exec
            .execute(&Command::container(["start", "abc"]))
            .await
            .unwrap_err();
        assert_eq!(err.exit_code(), Some(2));

        let entries = sink.entries.lock().unwrap();
        assert_eq!(entries[0].exit_code, 2);
        assert_eq!(entries[0].status, CommandStatus::Error);
        assert_eq!(entries[0].stderr, "boom");
    }

    struct HangingExecutor;

    #[async_trait]
    impl CommandExecutor for HangingExecutor {
        async fn execute(&self, _command: &Command) -> Result<CommandOutput> {
            std::future::pending().await
        }
    }

    #[tokio::test]
    async fn test_logging_executor_records_aborted_stream() {
        let sink = Arc::new(RecordingSink::default());
        let exec = Arc::new(LoggingExecutor::new(Arc::new(HangingExecutor), sink.clone()));

        let task = {
            let exec = exec.clone();
            tokio::spawn(async move {
                let (tx, _rx) = mpsc::unbounded_channel();
                exec.stream(&Command::container(["logs", "-f", "abc"]), tx).await
            })
        };
        // Let the task start and park inside the hanging run
        tokio::task::yield_now().await;
        assert!(sink.entries.lock().unwrap().is_empty());

        task.abort();
        assert!(task.await.unwrap_err().is_cancelled());

        let entries = sink.entries.lock().unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].command, "container logs -f abc");
        assert_eq!(entries[0].status, CommandStatus::Cancelled);
        assert_eq!(entries[0].exit_code, -1);
    }

    #[tokio::test]
    async fn test_logging_executor_records_finished_stream_once() {
        let sink = Arc::new(RecordingSink::default());
        let exec = LoggingExecutor::new(Arc::new(DryRunExecutor::new()), sink.clone());

        let (tx, _rx) = mpsc::unbounded_channel();
        exec.stream(&Command::container(["image", "pull", "alpine"]), tx)
            .await
            .unwrap();

        let entries = sink.entries.lock().unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].status, CommandStatus::Success);
    }

    #[tokio::test]
    async fn test_logging_executor_ignores_sink_errors() {
        let exec = LoggingExecutor::new(Arc::new(DryRunExecutor::new()), Arc::new(FailingSink));
        let output = exec.execute(&Command::container(["list", "--all"])).await;
        assert!(output.is_ok());
    }
}
