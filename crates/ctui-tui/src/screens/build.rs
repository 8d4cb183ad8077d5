//! Build an image from the chosen file; the context is the file's directory

use super::{block, Action, Request, ScreenView};
use crate::context::AppContext;
use crate::nav::ScreenId;
use crate::widgets::{OutputPane, TextInputState};
use crossterm::event::{KeyCode, KeyEvent};
use ctui_core::{BuildImageBuilder, Operation};
use ctui_provider::{describe_failure, BuildFileType, BuildSource, CommandOutput};
use ratatui::{prelude::*, widgets::Paragraph};
use std::path::Path;

pub struct BuildScreen {
    source: BuildSource,
    tag: TextInputState,
    pane: OutputPane,
}

impl BuildScreen {
    pub fn new(file: &Path) -> Self {
        let file_type = BuildFileType::from_path(file).unwrap_or(BuildFileType::Containerfile);
        Self {
            source: BuildSource::new(file, file_type).with_computed_exists(),
            tag: TextInputState::new(),
            pane: OutputPane::new(),
        }
    }

    pub fn source(&self) -> &BuildSource {
        &self.source
    }

    fn start(&mut self) -> Action {
        if let Err(e) = self.source.validate() {
            return Action::Notify(e.to_string());
        }
        let builder = BuildImageBuilder::new(
            self.tag.value(),
            self.source.file_path.display().to_string(),
            self.source.working_directory.display().to_string(),
        );
        let action: Action = Request::build(Operation::BuildImage, &builder)
            .map(Request::streamed)
            .into();
        if matches!(action, Action::Execute(_)) {
            self.pane.clear();
        }
        action
    }
}

impl ScreenView for BuildScreen {
    fn id(&self) -> ScreenId {
        ScreenId::Build
    }

    fn init(&mut self, _ctx: &AppContext) -> Action {
        self.source = self.source.clone().with_computed_exists();
        Action::None
    }

    fn handle_key(&mut self, key: KeyEvent, _ctx: &AppContext, busy: bool) -> Action {
        match key.code {
            KeyCode::Esc if busy => Action::Notify("Build in progress".to_string()),
            KeyCode::Esc => Action::Back,
            KeyCode::Enter if busy => Action::None,
            KeyCode::Enter => self.start(),
            KeyCode::PageUp | KeyCode::PageDown => {
                self.pane.handle_key(key.code);
                Action::None
            }
            _ => {
                if !busy {
                    self.tag.handle_key(key);
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
            Ok(_) => Action::Notify(format!("Built {}", self.tag.value().trim())),
            Err(e) => {
                let message = describe_failure(&e);
                self.pane.push(format!("error: {}", message));
                Action::Notify(format!("Build failed: {}", message))
            }
        }
    }

    fn hints(&self) -> &'static str {
        "Type a tag  Enter: Build  PgUp/PgDn: Scroll  Esc: Back"
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect, ctx: &AppContext, busy: bool) {
        let theme = &ctx.theme;
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(4),
                Constraint::Length(3),
                Constraint::Min(3),
            ])
            .split(area);

        let muted = Style::default().fg(theme.muted);
        let file_style = if self.source.exists {
            Style::default().fg(theme.text)
        } else {
            Style::default().fg(theme.error)
        };
        let info = vec![
            Line::from(vec![
                Span::styled("File     ", muted),
                Span::styled(self.source.file_path.display().to_string(), file_style),
            ]),
            Line::from(vec![
                Span::styled("Context  ", muted),
                Span::raw(self.source.working_directory.display().to_string()),
            ]),
        ];
        frame.render_widget(
            Paragraph::new(info).block(block(format!("Build ({})", self.source.file_type.file_name()), theme)),
            chunks[0],
        );

        let input = Paragraph::new(self.tag.spans(!busy, theme.text)).block(block("Tag (e.g. myapp:latest)", theme));
        frame.render_widget(input, chunks[1]);

        let border = if busy { theme.warning } else { theme.border };
        let title = if busy { "Building..." } else { "Output" };
        self.pane.render(frame, chunks[2], title, border);
    }
}
