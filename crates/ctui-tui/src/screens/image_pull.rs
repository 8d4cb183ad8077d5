//! Pull an image by reference with streamed progress

use super::{block, Action, Request, ScreenView};
use crate::context::AppContext;
use crate::nav::ScreenId;
use crate::widgets::{OutputPane, TextInputState};
use crossterm::event::{KeyCode, KeyEvent};
use ctui_core::{Operation, PullImageBuilder};
use ctui_provider::{describe_failure, CommandOutput};
use ratatui::{prelude::*, widgets::Paragraph};

pub struct ImagePullScreen {
    input: TextInputState,
    pane: OutputPane,
}

impl Default for ImagePullScreen {
    fn default() -> Self {
        Self::new()
    }
}

impl ImagePullScreen {
    pub fn new() -> Self {
        Self {
            input: TextInputState::new(),
            pane: OutputPane::new(),
        }
    }

    pub fn reference(&self) -> &str {
        self.input.value()
    }

    pub fn lines(&self) -> &[String] {
        self.pane.lines()
    }
}

impl ScreenView for ImagePullScreen {
    fn id(&self) -> ScreenId {
        ScreenId::ImagePull
    }

    fn handle_key(&mut self, key: KeyEvent, _ctx: &AppContext, busy: bool) -> Action {
        match key.code {
            KeyCode::Esc if busy => Action::Notify("Pull in progress".to_string()),
            KeyCode::Esc => Action::Back,
            KeyCode::Enter if busy => Action::None,
            KeyCode::Enter => {
                let action: Action = Request::build(
                    Operation::PullImage,
                    &PullImageBuilder::new(self.input.value()),
                )
                .map(Request::streamed)
                .into();
                if matches!(action, Action::Execute(_)) {
                    self.pane.clear();
                }
                action
            }
            KeyCode::PageUp | KeyCode::PageDown => {
                self.pane.handle_key(key.code);
                Action::None
            }
            _ => {
                if !busy {
                    self.input.handle_key(key);
                }
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
        match result {
            Ok(_) => Action::Notify(format!("Pulled {}", self.input.value().trim())),
            Err(e) => {
                let message = describe_failure(&e);
                self.pane.push(format!("error: {}", message));
                Action::Notify(format!("Pull failed: {}", message))
            }
        }
    }

    fn hints(&self) -> &'static str {
        "Type a reference  Enter: Pull  PgUp/PgDn: Scroll  Esc: Back"
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect, ctx: &AppContext, busy: bool) {
        let theme = &ctx.theme;
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(3), Constraint::Min(3)])
            .split(area);

        let input = Paragraph::new(self.input.spans(!busy, theme.text))
            .block(block("Image reference (e.g. docker.io/library/alpine:latest)", theme));
        frame.render_widget(input, chunks[0]);

        let border = if busy { theme.warning } else { theme.border };
        let title = if busy { "Pulling..." } else { "Output" };
        self.pane.render(frame, chunks[1], title, border);
    }
}
