//! Root screen: every container with its status and ports

use super::{block, header_style, status_color, Action, Request, ScreenView};
use crate::context::AppContext;
use crate::nav::{ScreenChange, ScreenId, Selection};
use crate::widgets::SelectableList;
use crossterm::event::{KeyCode, KeyEvent};
use ctui_core::{
    DeleteContainerBuilder, ListContainersBuilder, Operation, StartContainerBuilder,
    StopContainerBuilder,
};
use ctui_provider::{
    describe_failure, parse_container_list, CommandOutput, Container, ContainerStatus,
};
use ratatui::{
    prelude::*,
    widgets::{Cell, Paragraph, Row, Table},
};

pub struct ContainerListScreen {
    containers: SelectableList<Container>,
    loaded: bool,
    error: Option<String>,
}

impl Default for ContainerListScreen {
    fn default() -> Self {
        Self::new()
    }
}

impl ContainerListScreen {
    pub fn new() -> Self {
        Self {
            containers: SelectableList::new(),
            loaded: false,
            error: None,
        }
    }

    pub fn containers(&self) -> &[Container] {
        self.containers.items()
    }

    pub fn selected(&self) -> Option<&Container> {
        self.containers.selected_item()
    }

    fn refresh() -> Action {
        Request::build(Operation::RefreshContainers, &ListContainersBuilder).into()
    }

    fn on_selected(&self, f: impl FnOnce(&Container) -> Action) -> Action {
        match self.containers.selected_item() {
            Some(container) => f(container),
            None => Action::Notify("No container selected".to_string()),
        }
    }
}

impl ScreenView for ContainerListScreen {
    fn id(&self) -> ScreenId {
        ScreenId::ContainerList
    }

    fn init(&mut self, _ctx: &AppContext) -> Action {
        Self::refresh()
    }

    fn handle_key(&mut self, key: KeyEvent, _ctx: &AppContext, _busy: bool) -> Action {
        if self.containers.handle_nav_key(key.code) {
            return Action::None;
        }

        match key.code {
            KeyCode::Enter => self.on_selected(|c| {
                Action::Navigate(
                    ScreenChange::push(ScreenId::ContainerMenu)
                        .with(Selection::Container(c.clone())),
                )
            }),
            KeyCode::Char('s') => self.on_selected(|c| {
                Request::build(Operation::StartContainer, &StartContainerBuilder::new(&c.id)).into()
            }),
            KeyCode::Char('t') => self.on_selected(|c| {
                Request::build(Operation::StopContainer, &StopContainerBuilder::new(&c.id)).into()
            }),
            KeyCode::Char('d') => self.on_selected(|c| {
                if c.status != ContainerStatus::Stopped {
                    return Action::Notify("container must be stopped to delete".to_string());
                }
                Request::build(Operation::DeleteContainer, &DeleteContainerBuilder::new(&c.id))
                    .map(|r| r.expecting(c.display_name()))
                    .into()
            }),
            KeyCode::Char('r') => Self::refresh(),
            KeyCode::Char('i') => Action::Navigate(ScreenChange::push(ScreenId::ImageList)),
            KeyCode::Char('m') => Action::Navigate(ScreenChange::push(ScreenId::Daemon)),
            KeyCode::Char('?') => Action::Navigate(ScreenChange::push(ScreenId::Help)),
            KeyCode::Char('q') | KeyCode::Esc => Action::Quit,
            _ => Action::None,
        }
    }

    fn on_output(
        &mut self,
        op: Operation,
        result: ctui_provider::Result<CommandOutput>,
        _ctx: &AppContext,
    ) -> Action {
        match (op, result) {
            (Operation::RefreshContainers, Ok(output)) => {
                self.loaded = true;
                match parse_container_list(&output.stdout) {
                    Ok(containers) => {
                        self.error = None;
                        self.containers.set_items(containers);
                    }
                    Err(e) => self.error = Some(e.to_string()),
                }
                Action::None
            }
            (Operation::RefreshContainers, Err(e)) => {
                self.loaded = true;
                self.error = Some(describe_failure(&e));
                Action::None
            }
            (op, Ok(_)) => Action::Batch(vec![
                Action::Notify(format!("{} succeeded", op.label())),
                Self::refresh(),
            ]),
            (op, Err(e)) => Action::Batch(vec![
                Action::Notify(format!("{} failed: {}", op.label(), describe_failure(&e))),
                Self::refresh(),
            ]),
        }
    }

    fn on_tick(&mut self, ctx: &AppContext) -> Action {
        if ctx.preferences.refresh_on_focus {
            Self::refresh()
        } else {
            Action::None
        }
    }

    fn hints(&self) -> &'static str {
        "j/k: Navigate  Enter: Open  s: Start  t: Stop  d: Delete  r: Refresh  i: Images  m: Daemon  ?: Help  q: Quit"
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect, ctx: &AppContext, busy: bool) {
        let theme = &ctx.theme;
        let title = format!("Containers ({})", self.containers.len());

        if let Some(error) = &self.error {
            let text = Paragraph::new(Line::from(Span::styled(
                error.clone(),
                Style::default().fg(theme.error),
            )))
            .block(block(title, theme));
            frame.render_widget(text, area);
            return;
        }

        if self.containers.is_empty() {
            let message = if !self.loaded && busy {
                "Loading containers..."
            } else {
                "No containers found."
            };
            let text = Paragraph::new(Line::from(Span::styled(
                message,
                Style::default().fg(theme.muted),
            )))
            .alignment(Alignment::Center)
            .block(block(title, theme));
            frame.render_widget(text, area);
            return;
        }

        let header = Row::new(vec!["NAME", "STATUS", "IMAGE", "PORTS"])
            .style(header_style(theme))
            .height(1);

        let rows: Vec<Row> = self
            .containers
            .items()
            .iter()
            .map(|c| {
                let ports = c
                    .ports
                    .iter()
                    .map(|p| p.to_string())
                    .collect::<Vec<_>>()
                    .join(", ");
                Row::new(vec![
                    Cell::from(c.display_name().to_string()),
                    Cell::from(c.status.to_string())
                        .style(Style::default().fg(status_color(c.status, theme))),
                    Cell::from(c.image.clone()),
                    Cell::from(ports),
                ])
            })
            .collect();

        let widths = [
            Constraint::Percentage(25),
            Constraint::Length(10),
            Constraint::Percentage(35),
            Constraint::Min(10),
        ];

        let table = Table::new(rows, widths)
            .header(header)
            .block(block(title, theme))
            .highlight_style(
                Style::default()
                    .bg(theme.highlight_bg)
                    .fg(theme.highlight_fg)
                    .add_modifier(Modifier::BOLD),
            )
            .highlight_symbol("▶ ");

        frame.render_stateful_widget(table, area, self.containers.table_state_mut());
    }
}
