//! Turn raw CLI error text into one-line operator messages

use crate::ProviderError;

/// Substrings checked in order; the first rule with any match wins
const RULES: &[(&[&str], &str)] = &[
    (
        &["not found", "no such container", "manifest unknown"],
        "resource not found; check the name or reference",
    ),
    (&["already running"], "container is already running"),
    (
        &["already stopped", "not running"],
        "container is already stopped",
    ),
    (
        &["permission", "sudo"],
        "permission denied; check your privileges",
    ),
    (
        &["daemon", "connection"],
        "container daemon is not running; start it from the Daemon screen",
    ),
    (
        &["unauthorized", "authentication"],
        "authentication required; check registry credentials",
    ),
    (
        &["builder", "buildkit"],
        "builder is not running; start it and retry",
    ),
    (&["invalid reference format"], "invalid image reference"),
    (
        &["no such file", "file not found"],
        "build file or context path not found",
    ),
];

/// Map a CLI error message to a short, actionable description
pub fn humanize(message: &str) -> String {
    let trimmed = message.trim();
    if trimmed.is_empty() {
        return "unknown error".to_string();
    }

    let lower = trimmed.to_lowercase();
    for (needles, friendly) in RULES {
        if needles.iter().any(|n| lower.contains(n)) {
            return friendly.to_string();
        }
    }
    if lower.contains("not a directory") && lower.contains("context") {
        return "build context must be a directory".to_string();
    }

    trimmed.to_string()
}

/// Describe a failed command, preferring the captured stderr
pub fn describe_failure(err: &ProviderError) -> String {
    let stderr = err.output().map(|o| o.stderr.trim()).unwrap_or_default();
    if stderr.is_empty() {
        humanize(&err.to_string())
    } else {
        humanize(stderr)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{CommandOutput, CommandStatus};

    #[test]
    fn test_humanize_known_messages() {
        assert_eq!(
            humanize("Error: No such container: abc"),
            "resource not found; check the name or reference"
        );
        assert_eq!(
            humanize("container abc is already running"),
            "container is already running"
        );
        assert_eq!(
            humanize("Permission denied (publickey)"),
            "permission denied; check your privileges"
        );
        assert_eq!(
            humanize("XPC connection error: Connection invalid"),
            "container daemon is not running; start it from the Daemon screen"
        );
        assert_eq!(
            humanize("401 Unauthorized"),
            "authentication required; check registry credentials"
        );
        assert_eq!(
            humanize("BuildKit is not available"),
            "builder is not running; start it and retry"
        );
        assert_eq!(
            humanize("invalid reference format: repository name must be lowercase"),
            "invalid image reference"
        );
        assert_eq!(
            humanize("open /tmp/ctx/Containerfile: no such file or directory"),
            "build file or context path not found"
        );
        assert_eq!(
            humanize("build context /tmp/x is not a directory"),
            "build context must be a directory"
        );
    }

    #[test]
    fn test_humanize_first_match_wins() {
        // "not running" would also match the daemon rule
        assert_eq!(
            humanize("daemon: container is not running"),
            "container is already stopped"
        );
    }

    #[test]
    fn test_humanize_passthrough_and_blank() {
        assert_eq!(humanize("  something odd  "), "something odd");
        assert_eq!(humanize(""), "unknown error");
        assert_eq!(humanize(" \n "), "unknown error");
    }

    #[test]
    fn test_describe_failure_prefers_stderr() {
        let err = ProviderError::Exit {
            program: "container".to_string(),
            output: CommandOutput {
                exit_code: 1,
                stderr: "Error: manifest unknown\n".to_string(),
                status: CommandStatus::Error,
                ..Default::default()
            },
        };
        assert_eq!(
            describe_failure(&err),
            "resource not found; check the name or reference"
        );
    }

    #[test]
    fn test_describe_failure_falls_back_to_error_text() {
        let err = ProviderError::Exit {
            program: "container".to_string(),
            output: CommandOutput {
                exit_code: 7,
                status: CommandStatus::Error,
                ..Default::default()
            },
        };
        assert_eq!(describe_failure(&err), "container exited with code 7");
    }
}
