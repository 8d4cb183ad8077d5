//! One builder per CLI operation
//!
//! Builders validate their inputs and produce a [`Command`] with an exact
//! argument vector. Single-token fields (ids, references, tags, shells)
//! are trimmed and must not contain whitespace; path fields are trimmed
//! and only required to be non-blank.

use crate::{CoreError, Result};
use ctui_provider::Command;

/// Validate inputs and emit the command for one CLI operation
pub trait CommandBuilder {
    /// Check inputs without building
    fn validate(&self) -> Result<()> {
        Ok(())
    }

    /// Arguments after the executable; only called once validation passed
    fn args(&self) -> Vec<String>;

    fn build(&self) -> Result<Command> {
        self.validate()?;
        Ok(Command::container(self.args()))
    }
}

/// Trim a single-token field and reject blank or whitespace-bearing values
pub fn normalize_token(field: &str, value: &str) -> Result<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(CoreError::validation(field, "is required"));
    }
    if trimmed.chars().any(char::is_whitespace) {
        return Err(CoreError::validation(field, "must not contain whitespace"));
    }
    Ok(trimmed.to_string())
}

/// Trim a free-text field and reject blank values
pub fn normalize_text(field: &str, value: &str) -> Result<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(CoreError::validation(field, "is required"));
    }
    Ok(trimmed.to_string())
}

/// Trimmed token for argument building; validation has already run
fn token(value: &str) -> String {
    value.trim().to_string()
}

fn fixed(args: &[&str]) -> Vec<String> {
    args.iter().map(|a| a.to_string()).collect()
}

/// `list --all`
#[derive(Debug, Clone, Default)]
pub struct ListContainersBuilder;

impl CommandBuilder for ListContainersBuilder {
    fn args(&self) -> Vec<String> {
        fixed(&["list", "--all"])
    }
}

/// `start <id>`
#[derive(Debug, Clone)]
pub struct StartContainerBuilder {
    pub container_id: String,
}

impl StartContainerBuilder {
    pub fn new(container_id: impl Into<String>) -> Self {
        Self {
            container_id: container_id.into(),
        }
    }
}

impl CommandBuilder for StartContainerBuilder {
    fn validate(&self) -> Result<()> {
        normalize_token("container id", &self.container_id).map(drop)
    }

    fn args(&self) -> Vec<String> {
        vec!["start".to_string(), token(&self.container_id)]
    }
}

/// `stop <id>`
#[derive(Debug, Clone)]
pub struct StopContainerBuilder {
    pub container_id: String,
}

impl StopContainerBuilder {
    pub fn new(container_id: impl Into<String>) -> Self {
        Self {
            container_id: container_id.into(),
        }
    }
}

impl CommandBuilder for StopContainerBuilder {
    fn validate(&self) -> Result<()> {
        normalize_token("container id", &self.container_id).map(drop)
    }

    fn args(&self) -> Vec<String> {
        vec!["stop".to_string(), token(&self.container_id)]
    }
}

/// `delete <id>`
#[derive(Debug, Clone)]
pub struct DeleteContainerBuilder {
    pub container_id: String,
}

impl DeleteContainerBuilder {
    pub fn new(container_id: impl Into<String>) -> Self {
        Self {
            container_id: container_id.into(),
        }
    }
}

impl CommandBuilder for DeleteContainerBuilder {
    fn validate(&self) -> Result<()> {
        normalize_token("container id", &self.container_id).map(drop)
    }

    fn args(&self) -> Vec<String> {
        vec!["delete".to_string(), token(&self.container_id)]
    }
}

/// `logs -f <id>`
#[derive(Debug, Clone)]
pub struct ContainerLogsBuilder {
    pub container_id: String,
}

impl ContainerLogsBuilder {
    pub fn new(container_id: impl Into<String>) -> Self {
        Self {
            container_id: container_id.into(),
        }
    }
}

impl CommandBuilder for ContainerLogsBuilder {
    fn validate(&self) -> Result<()> {
        normalize_token("container id", &self.container_id).map(drop)
    }

    fn args(&self) -> Vec<String> {
        vec!["logs".to_string(), "-f".to_string(), token(&self.container_id)]
    }
}

/// `exec -it <id> <shell>`
#[derive(Debug, Clone)]
pub struct ExecShellBuilder {
    pub container_id: String,
    pub shell: String,
}

impl ExecShellBuilder {
    pub fn new(container_id: impl Into<String>, shell: impl Into<String>) -> Self {
        Self {
            container_id: container_id.into(),
            shell: shell.into(),
        }
    }
}

impl CommandBuilder for ExecShellBuilder {
    fn validate(&self) -> Result<()> {
        normalize_token("container id", &self.container_id)?;
        normalize_token("shell", &self.shell)?;
        Ok(())
    }

    fn args(&self) -> Vec<String> {
        vec![
            "exec".to_string(),
            "-it".to_string(),
            token(&self.container_id),
            token(&self.shell),
        ]
    }
}

/// `build -t <tag> -f <file> <context>`
#[derive(Debug, Clone)]
pub struct BuildImageBuilder {
    pub tag: String,
    pub file_path: String,
    pub context_path: String,
}

impl BuildImageBuilder {
    pub fn new(
        tag: impl Into<String>,
        file_path: impl Into<String>,
        context_path: impl Into<String>,
    ) -> Self {
        Self {
            tag: tag.into(),
            file_path: file_path.into(),
            context_path: context_path.into(),
        }
    }
}

impl CommandBuilder for BuildImageBuilder {
    fn validate(&self) -> Result<()> {
        normalize_token("tag", &self.tag)?;
        normalize_text("file path", &self.file_path)?;
        normalize_text("context path", &self.context_path)?;
        Ok(())
    }

    fn args(&self) -> Vec<String> {
        vec![
            "build".to_string(),
            "-t".to_string(),
            token(&self.tag),
            "-f".to_string(),
            self.file_path.trim().to_string(),
            self.context_path.trim().to_string(),
        ]
    }
}

/// `image pull <ref>`
#[derive(Debug, Clone)]
pub struct PullImageBuilder {
    pub reference: String,
}

impl PullImageBuilder {
    pub fn new(reference: impl Into<String>) -> Self {
        Self {
            reference: reference.into(),
        }
    }
}

impl CommandBuilder for PullImageBuilder {
    fn validate(&self) -> Result<()> {
        normalize_token("image reference", &self.reference).map(drop)
    }

    fn args(&self) -> Vec<String> {
        vec!["image".to_string(), "pull".to_string(), token(&self.reference)]
    }
}

/// `image list`
#[derive(Debug, Clone, Default)]
pub struct ImageListBuilder;

impl CommandBuilder for ImageListBuilder {
    fn args(&self) -> Vec<String> {
        fixed(&["image", "list"])
    }
}

/// `image inspect <ref>`
#[derive(Debug, Clone)]
pub struct ImageInspectBuilder {
    pub reference: String,
}

impl ImageInspectBuilder {
    pub fn new(reference: impl Into<String>) -> Self {
        Self {
            reference: reference.into(),
        }
    }
}

impl CommandBuilder for ImageInspectBuilder {
    fn validate(&self) -> Result<()> {
        normalize_token("image reference", &self.reference).map(drop)
    }

    fn args(&self) -> Vec<String> {
        vec!["image".to_string(), "inspect".to_string(), token(&self.reference)]
    }
}

/// `image rm <ref>`
#[derive(Debug, Clone)]
pub struct ImageDeleteBuilder {
    pub reference: String,
}

impl ImageDeleteBuilder {
    pub fn new(reference: impl Into<String>) -> Self {
        Self {
            reference: reference.into(),
        }
    }
}

impl CommandBuilder for ImageDeleteBuilder {
    fn validate(&self) -> Result<()> {
        normalize_token("image reference", &self.reference).map(drop)
    }

    fn args(&self) -> Vec<String> {
        vec!["image".to_string(), "rm".to_string(), token(&self.reference)]
    }
}

/// `image prune`
#[derive(Debug, Clone, Default)]
pub struct ImagePruneBuilder;

impl CommandBuilder for ImagePruneBuilder {
    fn args(&self) -> Vec<String> {
        fixed(&["image", "prune"])
    }
}

/// `system status`
#[derive(Debug, Clone, Default)]
pub struct CheckDaemonStatusBuilder;

impl CommandBuilder for CheckDaemonStatusBuilder {
    fn args(&self) -> Vec<String> {
        fixed(&["system", "status"])
    }
}

/// `system start`
#[derive(Debug, Clone, Default)]
pub struct StartDaemonBuilder;

impl CommandBuilder for StartDaemonBuilder {
    fn args(&self) -> Vec<String> {
        fixed(&["system", "start"])
    }
}

/// `system stop`
#[derive(Debug, Clone, Default)]
pub struct StopDaemonBuilder;

impl CommandBuilder for StopDaemonBuilder {
    fn args(&self) -> Vec<String> {
        fixed(&["system", "stop"])
    }
}
