//! Confirmation protocols gating commands before execution
//!
//! A confirmation starts in [`ConfirmState::AwaitingInput`] and moves to
//! `Confirmed` or `Cancelled` exactly once; further input is ignored.

use crate::ConfirmPolicy;
use ctui_provider::Command;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmState {
    AwaitingInput,
    Confirmed,
    Cancelled,
}

/// Input events a confirmation reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmInput {
    Char(char),
    Backspace,
    Submit,
    Cancel,
}

/// Yes/no confirmation for reversible actions
#[derive(Debug, Clone)]
pub struct PreviewConfirm {
    command: Command,
    state: ConfirmState,
}

impl PreviewConfirm {
    pub fn new(command: Command) -> Self {
        Self {
            command,
            state: ConfirmState::AwaitingInput,
        }
    }

    pub fn handle(&mut self, input: ConfirmInput) -> ConfirmState {
        if self.state != ConfirmState::AwaitingInput {
            return self.state;
        }
        self.state = match input {
            ConfirmInput::Char('y' | 'Y') | ConfirmInput::Submit => ConfirmState::Confirmed,
            ConfirmInput::Char('n' | 'N') | ConfirmInput::Cancel => ConfirmState::Cancelled,
            _ => ConfirmState::AwaitingInput,
        };
        self.state
    }

    pub fn state(&self) -> ConfirmState {
        self.state
    }

    pub fn command(&self) -> &Command {
        &self.command
    }
}

/// Confirmation that requires typing an exact, case-sensitive value
#[derive(Debug, Clone)]
pub struct TypedConfirm {
    command: Command,
    expected: String,
    typed: String,
    mismatch: bool,
    state: ConfirmState,
}

impl TypedConfirm {
    pub fn new(command: Command, expected: impl Into<String>) -> Self {
        Self {
            command,
            expected: expected.into(),
            typed: String::new(),
            mismatch: false,
            state: ConfirmState::AwaitingInput,
        }
    }

    pub fn handle(&mut self, input: ConfirmInput) -> ConfirmState {
        if self.state != ConfirmState::AwaitingInput {
            return self.state;
        }
        match input {
            ConfirmInput::Char(c) => {
                self.typed.push(c);
                self.mismatch = false;
            }
            ConfirmInput::Backspace => {
                self.typed.pop();
                self.mismatch = false;
            }
            ConfirmInput::Submit => {
                // Only the typed side is trimmed
                if self.typed.trim() == self.expected {
                    self.state = ConfirmState::Confirmed;
                } else {
                    self.mismatch = true;
                }
            }
            ConfirmInput::Cancel => self.state = ConfirmState::Cancelled,
        }
        self.state
    }

    pub fn state(&self) -> ConfirmState {
        self.state
    }

    pub fn command(&self) -> &Command {
        &self.command
    }

    pub fn expected(&self) -> &str {
        &self.expected
    }

    pub fn typed(&self) -> &str {
        &self.typed
    }

    /// Last submission did not match
    pub fn is_mismatch(&self) -> bool {
        self.mismatch
    }
}

/// A pending confirmation of either kind
#[derive(Debug, Clone)]
pub enum Confirmation {
    Preview(PreviewConfirm),
    Typed(TypedConfirm),
}

impl Confirmation {
    /// Confirmation required by `policy`, or `None` when the command may run directly
    pub fn for_policy(policy: ConfirmPolicy, command: Command, expected: &str) -> Option<Self> {
        match policy {
            ConfirmPolicy::None => None,
            ConfirmPolicy::Preview => Some(Self::Preview(PreviewConfirm::new(command))),
            ConfirmPolicy::TypeToConfirm => {
                Some(Self::Typed(TypedConfirm::new(command, expected)))
            }
        }
    }

    pub fn handle(&mut self, input: ConfirmInput) -> ConfirmState {
        match self {
            Self::Preview(c) => c.handle(input),
            Self::Typed(c) => c.handle(input),
        }
    }

    pub fn state(&self) -> ConfirmState {
        match self {
            Self::Preview(c) => c.state(),
            Self::Typed(c) => c.state(),
        }
    }

    pub fn command(&self) -> &Command {
        match self {
            Self::Preview(c) => c.command(),
            Self::Typed(c) => c.command(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn command() -> Command {
        Command::container(["delete", "prod-db"])
    }

    fn type_str(confirm: &mut TypedConfirm, text: &str) {
        for c in text.chars() {
            confirm.handle(ConfirmInput::Char(c));
        }
    }

    #[test]
    fn test_preview_yes_and_enter_confirm() {
        for input in [ConfirmInput::Char('y'), ConfirmInput::Char('Y'), ConfirmInput::Submit] {
            let mut confirm = PreviewConfirm::new(command());
            assert_eq!(confirm.handle(input), ConfirmState::Confirmed);
        }
    }

    #[test]
    fn test_preview_no_and_escape_cancel() {
        for input in [ConfirmInput::Char('n'), ConfirmInput::Char('N'), ConfirmInput::Cancel] {
            let mut confirm = PreviewConfirm::new(command());
            assert_eq!(confirm.handle(input), ConfirmState::Cancelled);
        }
    }

    #[test]
    fn test_preview_ignores_other_keys() {
        let mut confirm = PreviewConfirm::new(command());
        assert_eq!(confirm.handle(ConfirmInput::Char('x')), ConfirmState::AwaitingInput);
        assert_eq!(confirm.handle(ConfirmInput::Backspace), ConfirmState::AwaitingInput);
    }

    #[test]
    fn test_typed_is_case_sensitive() {
        let mut confirm = TypedConfirm::new(command(), "prod-db");
        type_str(&mut confirm, "PROD-DB");
        assert_eq!(confirm.handle(ConfirmInput::Submit), ConfirmState::AwaitingInput);
        assert!(confirm.is_mismatch());
    }

    #[test]
    fn test_typed_exact_match_confirms() {
        let mut confirm = TypedConfirm::new(command(), "prod-db");
        type_str(&mut confirm, "  prod-db ");
        assert_eq!(confirm.handle(ConfirmInput::Submit), ConfirmState::Confirmed);
    }

    #[test]
    fn test_typed_expected_is_not_trimmed() {
        let mut confirm = TypedConfirm::new(command(), " prod-db");
        type_str(&mut confirm, " prod-db");
        assert_eq!(confirm.handle(ConfirmInput::Submit), ConfirmState::AwaitingInput);
    }

    #[test]
    fn test_typed_mismatch_clears_on_edit() {
        let mut confirm = TypedConfirm::new(command(), "prune");
        type_str(&mut confirm, "prunee");
        confirm.handle(ConfirmInput::Submit);
        assert!(confirm.is_mismatch());

        confirm.handle(ConfirmInput::Backspace);
        assert!(!confirm.is_mismatch());
        assert_eq!(confirm.typed(), "prune");
        assert_eq!(confirm.handle(ConfirmInput::Submit), ConfirmState::Confirmed);
    }

    #[test]
    fn test_typed_escape_always_cancels() {
        let mut confirm = TypedConfirm::new(command(), "prod-db");
        assert_eq!(confirm.handle(ConfirmInput::Cancel), ConfirmState::Cancelled);

        let mut confirm = TypedConfirm::new(command(), "prod-db");
        type_str(&mut confirm, "prod-db");
        assert_eq!(confirm.handle(ConfirmInput::Cancel), ConfirmState::Cancelled);
        // Terminal states do not move
        assert_eq!(confirm.handle(ConfirmInput::Submit), ConfirmState::Cancelled);
    }

    #[test]
    fn test_for_policy() {
        assert!(Confirmation::for_policy(ConfirmPolicy::None, command(), "").is_none());
        assert!(matches!(
            Confirmation::for_policy(ConfirmPolicy::Preview, command(), ""),
            Some(Confirmation::Preview(_))
        ));
        let typed = Confirmation::for_policy(ConfirmPolicy::TypeToConfirm, command(), "prod-db");
        match typed {
            Some(Confirmation::Typed(c)) => assert_eq!(c.expected(), "prod-db"),
            other => panic!("unexpected confirmation: {other:?}"),
        }
    }
}
