//! Error types for ctui-core

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    /// Builder input rejected before any command was built
    #[error("{field} {reason}")]
    Validation { field: String, reason: String },

    #[error("no supported shell found in container {0:?}")]
    NoShell(String),
}

impl CoreError {
    pub(crate) fn validation(field: &str, reason: &str) -> Self {
        Self::Validation {
            field: field.to_string(),
            reason: reason.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, CoreError>;
