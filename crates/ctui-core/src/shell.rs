//! Shell detection inside a running container

use crate::builders::normalize_token;
use crate::{CoreError, Result};
use ctui_provider::{Command, CommandExecutor};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Probe arguments run via `exec <id> ...` and the shell each one selects
const PROBES: &[(&[&str], &str)] = &[
    (&["which", "bash"], "bash"),
    (&["which", "sh"], "sh"),
    (&["test", "-x", "/bin/sh"], "/bin/sh"),
    (&["test", "-x", "/bin/bash"], "/bin/bash"),
    (&["which", "ash"], "ash"),
];

/// Finds a usable shell per container and remembers it
///
/// Results are cached for the lifetime of the detector and never
/// invalidated, even if the container is later recreated.
pub struct ShellDetector {
    executor: Arc<dyn CommandExecutor>,
    cache: Mutex<HashMap<String, String>>,
}

impl ShellDetector {
    pub fn new(executor: Arc<dyn CommandExecutor>) -> Self {
        Self {
            executor,
            cache: Mutex::new(HashMap::new()),
        }
    }

    /// Shell previously detected for `container_id`
    pub fn cached(&self, container_id: &str) -> Option<String> {
        self.cache
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .get(container_id.trim())
            .cloned()
    }

    /// Detect the first available shell, probing only on a cache miss
    pub async fn detect(&self, container_id: &str) -> Result<String> {
        let id = normalize_token("container id", container_id)?;
        if let Some(shell) = self.cached(&id) {
            tracing::debug!("Using cached shell {} for {}", shell, id);
            return Ok(shell);
        }

        for (probe, shell) in PROBES {
            let command = Command::container(
                ["exec", id.as_str()].into_iter().chain(probe.iter().copied()),
            );
            match self.executor.execute(&command).await {
                Ok(output) if output.exit_code == 0 => {
                    tracing::debug!("Detected shell {} in {}", shell, id);
                    self.cache
                        .lock()
                        .unwrap_or_else(|e| e.into_inner())
                        .insert(id, shell.to_string());
                    return Ok(shell.to_string());
                }
                Ok(output) => {
                    tracing::debug!("Probe {} exited with {}", command, output.exit_code);
                }
                Err(e) => {
                    tracing::debug!("Probe {} failed: {}", command, e);
                }
            }
        }

        Err(CoreError::NoShell(id))
    }
}
