//! Details and actions for one container

use super::{block, draw_menu, status_color, Action, Request, ScreenView};
use crate::context::AppContext;
use crate::nav::{ScreenChange, ScreenId, Selection};
use crate::widgets::SelectableList;
use crossterm::event::{KeyCode, KeyEvent};
use ctui_core::{Operation, StartContainerBuilder, StopContainerBuilder};
use ctui_provider::{describe_failure, CommandOutput, Container, ContainerStatus};
use ratatui::{prelude::*, widgets::Paragraph};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MenuItem {
    Start,
    Stop,
    Logs,
    Shell,
    Back,
}

impl MenuItem {
    fn label(&self) -> &'static str {
        match self {
            Self::Start => "Start container",
            Self::Stop => "Stop container",
            Self::Logs => "Tail logs",
            Self::Shell => "Open shell",
            Self::Back => "Back",
        }
    }
}

pub struct ContainerMenuScreen {
    container: Container,
    items: SelectableList<MenuItem>,
}

impl ContainerMenuScreen {
    pub fn new(container: Container) -> Self {
        let items = if container.is_running() {
            vec![MenuItem::Stop, MenuItem::Logs, MenuItem::Shell, MenuItem::Back]
        } else {
            vec![MenuItem::Start, MenuItem::Logs, MenuItem::Back]
        };
        Self {
            container,
            items: SelectableList::from_items(items),
        }
    }

    pub fn container(&self) -> &Container {
        &self.container
    }

    /// Option labels in display order
    pub fn options(&self) -> Vec<&'static str> {
        self.items.items().iter().map(MenuItem::label).collect()
    }

    fn activate(&self, item: MenuItem) -> Action {
        let id = &self.container.id;
        match item {
            MenuItem::Start => {
                Request::build(Operation::StartContainer, &StartContainerBuilder::new(id)).into()
            }
            MenuItem::Stop => {
                Request::build(Operation::StopContainer, &StopContainerBuilder::new(id)).into()
            }
            MenuItem::Logs => Action::Navigate(ScreenChange::push(ScreenId::ContainerLogs)),
            MenuItem::Shell => Action::Navigate(ScreenChange::push(ScreenId::ContainerShell)),
            MenuItem::Back => Action::Back,
        }
    }

    /// Re-enter with the new status so the options match it
    fn with_status(&self, status: ContainerStatus) -> Action {
        let mut updated = self.container.clone();
        updated.status = status;
        Action::Navigate(ScreenChange::to(ScreenId::ContainerMenu).with(Selection::Container(updated)))
    }
}

impl ScreenView for ContainerMenuScreen {
    fn id(&self) -> ScreenId {
        ScreenId::ContainerMenu
    }

    fn handle_key(&mut self, key: KeyEvent, _ctx: &AppContext, _busy: bool) -> Action {
        if self.items.handle_nav_key(key.code) {
            return Action::None;
        }
        match key.code {
            KeyCode::Enter => match self.items.selected_item() {
                Some(item) => self.activate(*item),
                None => Action::None,
            },
            KeyCode::Esc | KeyCode::Char('q') => Action::Back,
            _ => Action::None,
        }
    }

    fn on_output(
        &mut self,
        op: Operation,
        result: ctui_provider::Result<CommandOutput>,
        _ctx: &AppContext,
    ) -> Action {
        let name = self.container.display_name().to_string();
        match (op, result) {
            (Operation::StartContainer, Ok(_)) => Action::Batch(vec![
                Action::Notify(format!("Started {}", name)),
                self.with_status(ContainerStatus::Running),
            ]),
            (Operation::StopContainer, Ok(_)) => Action::Batch(vec![
                Action::Notify(format!("Stopped {}", name)),
                self.with_status(ContainerStatus::Stopped),
            ]),
            (op, Err(e)) => Action::Notify(format!("{} failed: {}", op.label(), describe_failure(&e))),
            _ => Action::None,
        }
    }

    fn hints(&self) -> &'static str {
        "j/k: Navigate  Enter: Select  Esc: Back"
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect, ctx: &AppContext, _busy: bool) {
        let theme = &ctx.theme;
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(8), Constraint::Min(3)])
            .split(area);

        let c = &self.container;
        let ports = if c.ports.is_empty() {
            "-".to_string()
        } else {
            c.ports.iter().map(|p| p.to_string()).collect::<Vec<_>>().join(", ")
        };
        let label = |text: &'static str| Span::styled(format!("{:<9}", text), Style::default().fg(theme.muted));
        let details = vec![
            Line::from(vec![label("ID"), Span::raw(c.short_id().to_string())]),
            Line::from(vec![label("Name"), Span::raw(c.display_name().to_string())]),
            Line::from(vec![label("Image"), Span::raw(c.image.clone())]),
            Line::from(vec![
                label("Status"),
                Span::styled(c.status.to_string(), Style::default().fg(status_color(c.status, theme))),
            ]),
            Line::from(vec![label("Created"), Span::raw(c.created.clone())]),
            Line::from(vec![label("Ports"), Span::raw(ports)]),
        ];
        frame.render_widget(
            Paragraph::new(details).block(block(format!("Container: {}", c.display_name()), theme)),
            chunks[0],
        );

        draw_menu(frame, chunks[1], "Actions", &mut self.items, |i| i.label().to_string(), theme);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn container(status: ContainerStatus) -> Container {
        Container {
            id: "abc123".to_string(),
            name: "web".to_string(),
            image: "nginx".to_string(),
            status,
            created: String::new(),
            ports: Vec::new(),
        }
    }

    fn press(screen: &mut ContainerMenuScreen, code: KeyCode) -> Action {
        screen.handle_key(KeyEvent::new(code, KeyModifiers::NONE), &AppContext::default(), false)
    }

    #[test]
    fn test_options_follow_status() {
        let running = ContainerMenuScreen::new(container(ContainerStatus::Running));
        assert_eq!(running.options(), vec!["Stop container", "Tail logs", "Open shell", "Back"]);

        let stopped = ContainerMenuScreen::new(container(ContainerStatus::Stopped));
        assert_eq!(stopped.options(), vec!["Start container", "Tail logs", "Back"]);
    }

    #[test]
    fn test_select_logs_pushes() {
        let mut screen = ContainerMenuScreen::new(container(ContainerStatus::Running));
        press(&mut screen, KeyCode::Char('j'));
        assert_eq!(
            press(&mut screen, KeyCode::Enter),
            Action::Navigate(ScreenChange::push(ScreenId::ContainerLogs))
        );
    }

    #[test]
    fn test_start_success_reenters_with_running_status() {
        let mut screen = ContainerMenuScreen::new(container(ContainerStatus::Stopped));
        let action = screen.on_output(
            Operation::StartContainer,
            Ok(CommandOutput::success("", Default::default())),
            &AppContext::default(),
        );
        let Action::Batch(actions) = action else {
            panic!("expected batch");
        };
        match &actions[1] {
            Action::Navigate(change) => {
                assert!(!change.push);
                match &change.selection {
                    Some(Selection::Container(c)) => assert!(c.is_running()),
                    other => panic!("unexpected selection {:?}", other),
                }
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_esc_goes_back() {
        let mut screen = ContainerMenuScreen::new(container(ContainerStatus::Stopped));
        assert_eq!(press(&mut screen, KeyCode::Esc), Action::Back);
    }
}
