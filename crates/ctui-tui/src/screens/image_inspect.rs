//! Output of `image inspect`

use super::{Action, Request, ScreenView};
use crate::context::AppContext;
use crate::nav::ScreenId;
use crate::widgets::OutputPane;
use crossterm::event::{KeyCode, KeyEvent};
use ctui_core::{ImageInspectBuilder, Operation};
use ctui_provider::{describe_failure, CommandOutput, Image};
use ratatui::prelude::*;

const EMPTY: &str = "No inspection output.";

pub struct ImageInspectScreen {
    image: Image,
    pane: OutputPane,
    failed: bool,
}

impl ImageInspectScreen {
    pub fn new(image: Image) -> Self {
        Self {
            image,
            pane: OutputPane::new(),
            failed: false,
        }
    }

    pub fn lines(&self) -> &[String] {
        self.pane.lines()
    }
}

/// stdout, else stderr, else a placeholder
fn inspection_text(output: &CommandOutput) -> &str {
    if !output.stdout.trim().is_empty() {
        &output.stdout
    } else if !output.stderr.trim().is_empty() {
        &output.stderr
    } else {
        EMPTY
    }
}

impl ScreenView for ImageInspectScreen {
    fn id(&self) -> ScreenId {
        ScreenId::ImageInspect
    }

    fn init(&mut self, _ctx: &AppContext) -> Action {
        self.pane.clear();
        self.failed = false;
        Request::build(Operation::InspectImage, &ImageInspectBuilder::new(self.image.reference())).into()
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

    fn on_output(
        &mut self,
        _op: Operation,
        result: ctui_provider::Result<CommandOutput>,
        _ctx: &AppContext,
    ) -> Action {
        match result {
            Ok(output) => self.pane.set_text(inspection_text(&output)),
            Err(e) => {
                self.failed = true;
                self.pane.set_text(&describe_failure(&e));
            }
        }
        Action::None
    }

    fn hints(&self) -> &'static str {
        "j/k: Scroll  PgUp/PgDn: Page  g/G: Top/Bottom  Esc: Back"
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect, ctx: &AppContext, _busy: bool) {
        let border = if self.failed { ctx.theme.error } else { ctx.theme.accent };
        let title = format!("Inspect: {}", self.image.reference());
        self.pane.render(frame, area, &title, border);
    }
}
