//! Actions for one image

use super::{block, draw_menu, Action, Request, ScreenView};
use crate::context::AppContext;
use crate::nav::{ScreenChange, ScreenId};
use crate::widgets::SelectableList;
use crossterm::event::{KeyCode, KeyEvent};
use ctui_core::{ImageDeleteBuilder, Operation};
use ctui_provider::{describe_failure, CommandOutput, Image};
use ratatui::{prelude::*, widgets::Paragraph};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MenuItem {
    Inspect,
    Delete,
    Back,
}

impl MenuItem {
    fn label(&self) -> &'static str {
        match self {
            Self::Inspect => "Inspect image",
            Self::Delete => "Delete image",
            Self::Back => "Back",
        }
    }
}

pub struct ImageMenuScreen {
    image: Image,
    items: SelectableList<MenuItem>,
}

impl ImageMenuScreen {
    pub fn new(image: Image) -> Self {
        Self {
            image,
            items: SelectableList::from_items(vec![MenuItem::Inspect, MenuItem::Delete, MenuItem::Back]),
        }
    }

    fn activate(&self, item: MenuItem) -> Action {
        match item {
            MenuItem::Inspect => Action::Navigate(ScreenChange::push(ScreenId::ImageInspect)),
            MenuItem::Delete => {
                let reference = self.image.reference();
                Request::build(Operation::DeleteImage, &ImageDeleteBuilder::new(reference.clone()))
                    .map(|r| r.expecting(reference))
                    .into()
            }
            MenuItem::Back => Action::Back,
        }
    }
}

impl ScreenView for ImageMenuScreen {
    fn id(&self) -> ScreenId {
        ScreenId::ImageMenu
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
        match result {
            Ok(_) => Action::Batch(vec![
                Action::Notify(format!("Deleted {}", self.image.reference())),
                Action::Back,
            ]),
            Err(e) => Action::Notify(format!("{} failed: {}", op.label(), describe_failure(&e))),
        }
    }

    fn hints(&self) -> &'static str {
        "j/k: Navigate  Enter: Select  Esc: Back"
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect, ctx: &AppContext, _busy: bool) {
        let theme = &ctx.theme;
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(5), Constraint::Min(3)])
            .split(area);

        let muted = Style::default().fg(theme.muted);
        let digest = if self.image.digest.is_empty() {
            "-".to_string()
        } else {
            self.image.digest.clone()
        };
        let details = vec![
            Line::from(vec![Span::styled("Name     ", muted), Span::raw(self.image.name.clone())]),
            Line::from(vec![Span::styled("Tag      ", muted), Span::raw(self.image.tag.clone())]),
            Line::from(vec![Span::styled("Digest   ", muted), Span::raw(digest)]),
        ];
        frame.render_widget(
            Paragraph::new(details).block(block(format!("Image: {}", self.image.reference()), theme)),
            chunks[0],
        );

        draw_menu(frame, chunks[1], "Actions", &mut self.items, |i| i.label().to_string(), theme);
    }
}
