//! Follows `logs -f` for one container until the screen is left

use super::{Action, Request, ScreenView};
use crate::context::AppContext;
use crate::nav::ScreenId;
use crate::widgets::OutputPane;
use crossterm::event::{KeyCode, KeyEvent};
use ctui_core::{ContainerLogsBuilder, Operation};
use ctui_provider::{describe_failure, CommandOutput, Container};
use ratatui::prelude::*;

pub struct LogsScreen {
    container: Container,
    pane: OutputPane,
    ended: Option<String>,
}

impl LogsScreen {
    pub fn new(container: Container) -> Self {
        Self {
            container,
            pane: OutputPane::new(),
            ended: None,
        }
    }

    pub fn lines(&self) -> &[String] {
        self.pane.lines()
    }
}

impl ScreenView for LogsScreen {
    fn id(&self) -> ScreenId {
        ScreenId::ContainerLogs
    }

    fn init(&mut self, _ctx: &AppContext) -> Action {
        self.pane.clear();
        self.ended = None;
        Request::build(Operation::FollowLogs, &ContainerLogsBuilder::new(&self.container.id))
            .map(Request::streamed)
            .into()
    }

    fn handle_key(&mut self, key: KeyEvent, _ctx: &AppContext, _busy: bool) -> Action {
        match key.code {
            KeyCode::Esc | KeyCode::Char('q') => Action::Back,
            code => {
                self.pane.handle_key(code);
                Action::None
            }
        }
    }

    fn on_line(&mut self, line: String) {
        self.pane.push(line);
    }

    fn on_output(
        &mut self,
        _op: Operation,
        result: ctui_provider::Result<CommandOutput>,
        _ctx: &AppContext,
    ) -> Action {
        self.ended = Some(match result {
            Ok(_) => "log stream ended".to_string(),
            Err(e) => describe_failure(&e),
        });
        Action::None
    }

    fn hints(&self) -> &'static str {
        "j/k: Scroll  PgUp/PgDn: Page  g/G: Top/Bottom  Esc: Back"
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect, ctx: &AppContext, _busy: bool) {
        let mut title = format!("Logs: {}", self.container.display_name());
        if let Some(ended) = &self.ended {
            title.push_str(&format!(" ({})", ended));
        }
        let border = if self.ended.is_some() {
            ctx.theme.muted
        } else {
            ctx.theme.accent
        };
        self.pane.render(frame, area, &title, border);
    }
}
