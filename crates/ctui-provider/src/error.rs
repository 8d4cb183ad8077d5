//! Error types for command execution and output parsing

use crate::CommandOutput;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProviderError {
    /// The process could not be started or its pipes failed
    #[error("Failed to run {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
        output: CommandOutput,
    },

    /// The process ran and exited with a non-zero code
    #[error("{program} exited with code {}", .output.exit_code)]
    Exit {
        program: String,
        output: CommandOutput,
    },

    #[error("{0}")]
    Parse(String),

    #[error("Invalid value: {0}")]
    Invalid(String),

    #[error("{0} CLI not found in PATH")]
    CliNotFound(String),

    #[error("{program} CLI is not usable: {message}")]
    CliUnavailable { program: String, message: String },

    #[error("No Containerfile or Dockerfile found in {0}")]
    NoBuildFile(PathBuf),

    #[error("Audit log error at {path}: {source}")]
    Audit {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

impl ProviderError {
    /// Captured output, present for execution failures
    pub fn output(&self) -> Option<&CommandOutput> {
        match self {
            Self::Spawn { output, .. } | Self::Exit { output, .. } => Some(output),
            _ => None,
        }
    }

    /// Exit code for execution failures, -1 when the process never ran
    pub fn exit_code(&self) -> Option<i32> {
        self.output().map(|o| o.exit_code)
    }
}

pub type Result<T> = std::result::Result<T, ProviderError>;
