//! Detects a shell, then hands the terminal to `exec -it`

use super::{block, Action, ScreenView};
use crate::context::AppContext;
use crate::nav::ScreenId;
use crossterm::event::{KeyCode, KeyEvent};
use ctui_core::{CommandBuilder, ExecShellBuilder};
use ctui_provider::Container;
use ratatui::{prelude::*, widgets::Paragraph};

#[derive(Debug, Clone, PartialEq, Eq)]
enum Phase {
    Detecting,
    Launching(String),
    Failed(String),
}

pub struct ContainerShellScreen {
    container: Container,
    phase: Phase,
}

impl ContainerShellScreen {
    pub fn new(container: Container) -> Self {
        Self {
            container,
            phase: Phase::Detecting,
        }
    }
}

impl ScreenView for ContainerShellScreen {
    fn id(&self) -> ScreenId {
        ScreenId::ContainerShell
    }

    fn init(&mut self, _ctx: &AppContext) -> Action {
        self.phase = Phase::Detecting;
        Action::DetectShell(self.container.id.clone())
    }

    fn handle_key(&mut self, key: KeyEvent, _ctx: &AppContext, _busy: bool) -> Action {
        match key.code {
            KeyCode::Esc | KeyCode::Char('q') => Action::BackToSubmenu,
            _ => Action::None,
        }
    }

    fn on_shell(&mut self, result: Result<String, String>, _ctx: &AppContext) -> Action {
        let shell = match result {
            Ok(shell) => shell,
            Err(message) => {
                self.phase = Phase::Failed(message.clone());
                return Action::Notify(message);
            }
        };
        match ExecShellBuilder::new(&self.container.id, shell).build() {
            Ok(command) => {
                self.phase = Phase::Launching(command.to_string());
                Action::Interactive(command)
            }
            Err(e) => {
                self.phase = Phase::Failed(e.to_string());
                Action::Notify(e.to_string())
            }
        }
    }

    fn hints(&self) -> &'static str {
        "Esc: Back"
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect, ctx: &AppContext, _busy: bool) {
        let theme = &ctx.theme;
        let line = match &self.phase {
            Phase::Detecting => Line::from(Span::styled(
                "Detecting shell...",
                Style::default().fg(theme.muted),
            )),
            Phase::Launching(command) => Line::from(vec![
                Span::raw("Launching "),
                Span::styled(command.clone(), Style::default().fg(theme.accent)),
            ]),
            Phase::Failed(message) => {
                Line::from(Span::styled(message.clone(), Style::default().fg(theme.error)))
            }
        };
        let title = format!("Shell: {}", self.container.display_name());
        frame.render_widget(Paragraph::new(line).block(block(title, theme)), area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ctui_provider::ContainerStatus;

    fn screen() -> ContainerShellScreen {
        ContainerShellScreen::new(Container {
            id: "abc123".to_string(),
            name: "web".to_string(),
            image: "alpine".to_string(),
            status: ContainerStatus::Running,
            created: String::new(),
            ports: Vec::new(),
        })
    }

    #[test]
    fn test_detected_shell_launches_exec() {
        let mut shell = screen();
        assert_eq!(
            shell.init(&AppContext::default()),
            Action::DetectShell("abc123".to_string())
        );
        match shell.on_shell(Ok("sh".to_string()), &AppContext::default()) {
            Action::Interactive(command) => {
                assert_eq!(command.args, vec!["exec", "-it", "abc123", "sh"]);
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_detection_failure_is_reported() {
        let mut shell = screen();
        let message = "no supported shell found in container \"abc123\"".to_string();
        assert_eq!(
            shell.on_shell(Err(message.clone()), &AppContext::default()),
            Action::Notify(message)
        );
    }
}
