//! Startup probe for the container CLI

use crate::{Command, CommandExecutor, ProviderError, RealExecutor, Result};

/// Verify that `executable` is installed and answers `system version`
pub async fn check_cli(executable: &str) -> Result<()> {
    let probe = Command::new(executable, ["system", "version"]);
    match RealExecutor::new().execute(&probe).await {
        Ok(output) => {
            tracing::debug!("{} version: {}", executable, output.stdout.trim());
            Ok(())
        }
        Err(ProviderError::Spawn { source, .. })
            if source.kind() == std::io::ErrorKind::NotFound =>
        {
            Err(ProviderError::CliNotFound(executable.to_string()))
        }
        Err(e) => {
            let message = match e.output().map(|o| o.stderr.trim()) {
                Some(stderr) if !stderr.is_empty() => stderr.to_string(),
                _ => e.to_string(),
            };
            Err(ProviderError::CliUnavailable {
                program: executable.to_string(),
                message,
            })
        }
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_missing_cli_is_not_found() {
        let err = check_cli("ctui-no-such-cli").await.unwrap_err();
        assert!(matches!(err, ProviderError::CliNotFound(_)));
        assert!(err.to_string().contains("not found in PATH"));
    }

    #[tokio::test]
    async fn test_failing_cli_is_unavailable() {
        // `false` ignores its arguments and exits 1
        let err = check_cli("false").await.unwrap_err();
        match err {
            ProviderError::CliUnavailable { program, message } => {
                assert_eq!(program, "false");
                assert!(message.contains("exited with code 1"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
