//! Domain records parsed from the container CLI

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::{ProviderError, Result};

/// Tag used by the CLI when an image has no tag
pub const UNTAGGED: &str = "<none>";

/// Execution state of a command
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CommandStatus {
    #[default]
    Pending,
    Running,
    Success,
    Error,
    Cancelled,
}

impl std::fmt::Display for CommandStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Pending => "pending",
            Self::Running => "running",
            Self::Success => "success",
            Self::Error => "error",
            Self::Cancelled => "cancelled",
        };
        write!(f, "{}", s)
    }
}

/// Captured output of one command execution
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CommandOutput {
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
    pub duration: Duration,
    pub status: CommandStatus,
}

impl CommandOutput {
    /// Output of a run that finished with exit code 0
    pub fn success(stdout: impl Into<String>, duration: Duration) -> Self {
        Self {
            exit_code: 0,
            stdout: stdout.into(),
            stderr: String::new(),
            duration,
            status: CommandStatus::Success,
        }
    }
}

/// Container lifecycle state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContainerStatus {
    Running,
    Stopped,
    Paused,
    Created,
    Unknown,
}

impl From<&str> for ContainerStatus {
    fn from(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "running" => Self::Running,
            "stopped" | "exited" => Self::Stopped,
            "paused" => Self::Paused,
            "created" => Self::Created,
            _ => Self::Unknown,
        }
    }
}

impl std::fmt::Display for ContainerStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Running => "running",
            Self::Stopped => "stopped",
            Self::Paused => "paused",
            Self::Created => "created",
            Self::Unknown => "unknown",
        };
        write!(f, "{}", s)
    }
}

/// Host-to-container port binding
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PortMapping {
    pub host_port: u16,
    pub container_port: u16,
    pub protocol: String,
}

impl PortMapping {
    pub fn validate(&self) -> Result<()> {
        if self.host_port == 0 {
            return Err(ProviderError::Invalid("host port out of range".to_string()));
        }
        if self.container_port == 0 {
            return Err(ProviderError::Invalid(
                "container port out of range".to_string(),
            ));
        }
        if self.protocol.trim().is_empty() {
            return Err(ProviderError::Invalid("protocol is required".to_string()));
        }
        Ok(())
    }
}

impl std::fmt::Display for PortMapping {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}->{}/{}",
            self.host_port, self.container_port, self.protocol
        )
    }
}

/// A container as reported by the list command
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Container {
    pub id: String,
    pub name: String,
    pub image: String,
    pub status: ContainerStatus,
    pub created: String,
    pub ports: Vec<PortMapping>,
}

impl Container {
    pub fn validate(&self) -> Result<()> {
        if self.id.trim().is_empty() {
            return Err(ProviderError::Invalid("container id is required".to_string()));
        }
        if self.name.trim().is_empty() {
            return Err(ProviderError::Invalid(
                "container name is required".to_string(),
            ));
        }
        Ok(())
    }

    /// Name shown to the operator, falling back to the id
    pub fn display_name(&self) -> &str {
        if self.name.trim().is_empty() {
            &self.id
        } else {
            &self.name
        }
    }

    pub fn is_running(&self) -> bool {
        self.status == ContainerStatus::Running
    }

    /// Short form of the id for tables
    pub fn short_id(&self) -> &str {
        match self.id.char_indices().nth(12) {
            Some((idx, _)) => &self.id[..idx],
            None => &self.id,
        }
    }
}

/// A local image
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Image {
    pub name: String,
    pub tag: String,
    pub digest: String,
}

impl Image {
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(ProviderError::Invalid("image name is required".to_string()));
        }
        if self.tag.trim().is_empty() {
            return Err(ProviderError::Invalid("image tag is required".to_string()));
        }
        let digest = self.digest.trim();
        if !digest.is_empty() && !digest.starts_with("sha256:") {
            return Err(ProviderError::Invalid(
                "image digest must start with sha256:".to_string(),
            ));
        }
        Ok(())
    }

    /// `name:tag`, else `name@digest`, else the bare name
    pub fn reference(&self) -> String {
        let name = self.name.trim();
        let tag = self.tag.trim();
        let digest = self.digest.trim();
        if !tag.is_empty() && tag != UNTAGGED {
            format!("{}:{}", name, tag)
        } else if !digest.is_empty() {
            format!("{}@{}", name, digest)
        } else {
            name.to_string()
        }
    }
}

/// Daemon state derived from `system status`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DaemonStatus {
    pub running: bool,
    /// Not reported by the status command; always empty
    pub version: String,
    pub last_checked: DateTime<Utc>,
}

/// Kind of build script
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BuildFileType {
    Containerfile,
    Dockerfile,
}

impl BuildFileType {
    /// Recognize a build file by its file name
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.file_name()?.to_str()? {
            "Containerfile" => Some(Self::Containerfile),
            "Dockerfile" => Some(Self::Dockerfile),
            _ => None,
        }
    }

    pub fn file_name(&self) -> &'static str {
        match self {
            Self::Containerfile => "Containerfile",
            Self::Dockerfile => "Dockerfile",
        }
    }
}

/// A build file and the directory it builds from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildSource {
    pub file_path: PathBuf,
    pub file_type: BuildFileType,
    pub working_directory: PathBuf,
    /// Only meaningful after [`BuildSource::with_computed_exists`]
    pub exists: bool,
}

impl BuildSource {
    pub fn new(file_path: impl Into<PathBuf>, file_type: BuildFileType) -> Self {
        let file_path = file_path.into();
        let working_directory = file_path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default();
        Self {
            file_path,
            file_type,
            working_directory,
            exists: false,
        }
    }

    /// Check that the working directory and file both exist
    pub fn validate(&self) -> Result<()> {
        if self.file_path.as_os_str().to_string_lossy().trim().is_empty() {
            return Err(ProviderError::Invalid("file path is required".to_string()));
        }
        if self
            .working_directory
            .as_os_str()
            .to_string_lossy()
            .trim()
            .is_empty()
        {
            return Err(ProviderError::Invalid(
                "working directory is required".to_string(),
            ));
        }
        if !self.working_directory.is_dir() {
            return Err(ProviderError::Invalid(
                "working directory is not a directory".to_string(),
            ));
        }
        if !self.file_path.exists() {
            return Err(ProviderError::Invalid(
                "build file does not exist".to_string(),
            ));
        }
        Ok(())
    }

    /// Copy with `exists` recomputed and a blank working directory filled in
    pub fn with_computed_exists(mut self) -> Self {
        if self.file_path.as_os_str().is_empty() {
            return self;
        }
        self.exists = self.file_path.exists();
        if self.working_directory.as_os_str().is_empty() {
            if let Some(parent) = self.file_path.parent() {
                self.working_directory = parent.to_path_buf();
            }
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn image(name: &str, tag: &str, digest: &str) -> Image {
        Image {
            name: name.to_string(),
            tag: tag.to_string(),
            digest: digest.to_string(),
        }
    }

    #[test]
    fn test_image_reference_prefers_tag() {
        assert_eq!(image("nginx", "latest", "sha256:abc").reference(), "nginx:latest");
    }

    #[test]
    fn test_image_reference_untagged_uses_digest() {
        assert_eq!(image("nginx", UNTAGGED, "sha256:abc").reference(), "nginx@sha256:abc");
        assert_eq!(image("nginx", "", "sha256:abc").reference(), "nginx@sha256:abc");
    }

    #[test]
    fn test_image_reference_bare_name() {
        assert_eq!(image("nginx", UNTAGGED, "").reference(), "nginx");
    }

    #[test]
    fn test_image_validate_digest_prefix() {
        assert!(image("nginx", "latest", "md5:abc").validate().is_err());
        assert!(image("nginx", "latest", "sha256:abc").validate().is_ok());
        assert!(image("", "latest", "").validate().is_err());
    }

    #[test]
    fn test_container_status_mapping() {
        assert_eq!(ContainerStatus::from("Running"), ContainerStatus::Running);
        assert_eq!(ContainerStatus::from("exited"), ContainerStatus::Stopped);
        assert_eq!(ContainerStatus::from("STOPPED"), ContainerStatus::Stopped);
        assert_eq!(ContainerStatus::from("paused"), ContainerStatus::Paused);
        assert_eq!(ContainerStatus::from("created"), ContainerStatus::Created);
        assert_eq!(ContainerStatus::from("Up 3 hours"), ContainerStatus::Unknown);
        assert_eq!(ContainerStatus::from(""), ContainerStatus::Unknown);
    }

    #[test]
    fn test_port_mapping_validate() {
        let mut mapping = PortMapping {
            host_port: 8080,
            container_port: 80,
            protocol: "tcp".to_string(),
        };
        assert!(mapping.validate().is_ok());

        mapping.host_port = 0;
        assert!(mapping.validate().is_err());

        mapping.host_port = 8080;
        mapping.protocol = String::new();
        assert!(mapping.validate().is_err());
    }

    #[test]
    fn test_container_validate_and_display_name() {
        let mut container = Container {
            id: "abc123".to_string(),
            name: String::new(),
            image: "nginx".to_string(),
            status: ContainerStatus::Running,
            created: String::new(),
            ports: Vec::new(),
        };
        assert!(container.validate().is_err());
        assert_eq!(container.display_name(), "abc123");

        container.name = "web".to_string();
        assert!(container.validate().is_ok());
        assert_eq!(container.display_name(), "web");
    }

    #[test]
    fn test_short_id() {
        let container = Container {
            id: "0123456789abcdef".to_string(),
            name: "web".to_string(),
            image: "nginx".to_string(),
            status: ContainerStatus::Running,
            created: String::new(),
            ports: Vec::new(),
        };
        assert_eq!(container.short_id(), "0123456789ab");
    }

    #[test]
    fn test_build_source_validate_and_exists() {
        let tmp = tempfile::tempdir().unwrap();
        let file = tmp.path().join("Containerfile");
        std::fs::write(&file, "FROM scratch\n").unwrap();

        let source = BuildSource::new(&file, BuildFileType::Containerfile);
        assert_eq!(source.working_directory, tmp.path());
        assert!(!source.exists, "exists is not computed eagerly");
        source.validate().unwrap();

        let computed = source.with_computed_exists();
        assert!(computed.exists);
    }

    #[test]
    fn test_build_source_missing_file() {
        let tmp = tempfile::tempdir().unwrap();
        let source = BuildSource::new(tmp.path().join("Dockerfile"), BuildFileType::Dockerfile);
        assert!(source.validate().is_err());
        assert!(!source.with_computed_exists().exists);
    }

    #[test]
    fn test_build_source_fills_working_directory() {
        let tmp = tempfile::tempdir().unwrap();
        let file = tmp.path().join("Dockerfile");
        let source = BuildSource {
            file_path: file,
            file_type: BuildFileType::Dockerfile,
            working_directory: PathBuf::new(),
            exists: false,
        };
        assert!(source.validate().is_err());
        assert_eq!(source.with_computed_exists().working_directory, tmp.path());
    }

    #[test]
    fn test_build_file_type_from_path() {
        assert_eq!(
            BuildFileType::from_path(Path::new("/src/Containerfile")),
            Some(BuildFileType::Containerfile)
        );
        assert_eq!(
            BuildFileType::from_path(Path::new("Dockerfile")),
            Some(BuildFileType::Dockerfile)
        );
        assert_eq!(BuildFileType::from_path(Path::new("Makefile")), None);
    }
}
