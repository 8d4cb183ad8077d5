//! Command values handed to executors

/// Name of the container CLI every command targets
pub const CONTAINER_CLI: &str = "container";

/// An executable plus its ordered arguments
///
/// Built once and never mutated; the [`std::fmt::Display`] form quotes
/// arguments so that it can be split back into the same argv.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Command {
    pub executable: String,
    pub args: Vec<String>,
}

impl Command {
    pub fn new<I, S>(executable: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            executable: executable.into(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }

    /// Command against the `container` CLI
    pub fn container<I, S>(args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(CONTAINER_CLI, args)
    }

    /// Executable followed by arguments
    pub fn argv(&self) -> Vec<&str> {
        std::iter::once(self.executable.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect()
    }

    /// Parse a display string back into a command
    pub fn from_display(s: &str) -> Option<Self> {
        let mut words = shell_words::split(s).ok()?.into_iter();
        let executable = words.next()?;
        Some(Self {
            executable,
            args: words.collect(),
        })
    }
}

impl std::fmt::Display for Command {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", shell_words::join(self.argv()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_plain_args() {
        let cmd = Command::container(["list", "--all"]);
        assert_eq!(cmd.to_string(), "container list --all");
    }

    #[test]
    fn test_display_quotes_awkward_args() {
        let cmd = Command::container(["build", "-t", "my app", "-f", "", "."]);
        let shown = cmd.to_string();
        assert!(shown.contains("'my app'"));
        assert!(shown.contains("''"));
    }

    #[test]
    fn test_display_roundtrips_through_split() {
        let cases = [
            vec!["exec", "-it", "abc", "/bin/sh"],
            vec!["build", "-t", "a b", "-f", "/tmp/dir with space/Containerfile", "."],
            vec!["logs", "it's", "tab\there", "new\nline", "\"quoted\""],
            vec![""],
        ];
        for args in cases {
            let cmd = Command::container(args);
            let parsed = Command::from_display(&cmd.to_string()).unwrap();
            assert_eq!(parsed, cmd);
        }
    }

    #[test]
    fn test_from_display_empty_is_none() {
        assert!(Command::from_display("").is_none());
    }
}
