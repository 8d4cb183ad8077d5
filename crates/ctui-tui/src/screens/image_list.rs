//! Local images

use super::{block, header_style, Action, Request, ScreenView};
use crate::context::AppContext;
use crate::nav::{ScreenChange, ScreenId, Selection};
use crate::widgets::SelectableList;
use crossterm::event::{KeyCode, KeyEvent};
use ctui_core::{ImageListBuilder, ImagePruneBuilder, Operation};
use ctui_provider::{describe_failure, parse_image_list, CommandOutput, Image};
use ratatui::{
    prelude::*,
    widgets::{Cell, Paragraph, Row, Table},
};

/// Hex characters of a digest shown in the table
const DIGEST_CHARS: usize = 12;

/// `sha256:0123456789abcdef...` becomes `0123456789ab`
pub(crate) fn short_digest(digest: &str) -> &str {
    let hex = digest.strip_prefix("sha256:").unwrap_or(digest);
    match hex.char_indices().nth(DIGEST_CHARS) {
        Some((idx, _)) => &hex[..idx],
        None => hex,
    }
}

pub struct ImageListScreen {
    images: SelectableList<Image>,
    loaded: bool,
    error: Option<String>,
}

impl Default for ImageListScreen {
    fn default() -> Self {
        Self::new()
    }
}

impl ImageListScreen {
    pub fn new() -> Self {
        Self {
            images: SelectableList::new(),
            loaded: false,
            error: None,
        }
    }

    pub fn images(&self) -> &[Image] {
        self.images.items()
    }

    fn refresh() -> Action {
        Request::build(Operation::ListImages, &ImageListBuilder).into()
    }
}

impl ScreenView for ImageListScreen {
    fn id(&self) -> ScreenId {
        ScreenId::ImageList
    }

    fn init(&mut self, _ctx: &AppContext) -> Action {
        Self::refresh()
    }

    fn handle_key(&mut self, key: KeyEvent, _ctx: &AppContext, _busy: bool) -> Action {
        if self.images.handle_nav_key(key.code) {
            return Action::None;
        }

        match key.code {
            KeyCode::Enter => match self.images.selected_item() {
                Some(image) => Action::Navigate(
                    ScreenChange::push(ScreenId::ImageMenu).with(Selection::Image(image.clone())),
                ),
                None => Action::Notify("No image selected".to_string()),
            },
            KeyCode::Char('p') => Action::Navigate(ScreenChange::push(ScreenId::ImagePull)),
            KeyCode::Char('b') => Action::Navigate(ScreenChange::push(ScreenId::FilePicker)),
            KeyCode::Char('n') => Request::build(Operation::PruneImages, &ImagePruneBuilder)
                .map(|r| r.expecting("prune"))
                .into(),
            KeyCode::Char('r') => Self::refresh(),
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
        match (op, result) {
            (Operation::ListImages, Ok(output)) => {
                self.loaded = true;
                match parse_image_list(&output.stdout) {
                    Ok(images) => {
                        self.error = None;
                        self.images.set_items(images);
                    }
                    Err(e) => self.error = Some(e.to_string()),
                }
                Action::None
            }
            (Operation::ListImages, Err(e)) => {
                self.loaded = true;
                self.error = Some(describe_failure(&e));
                Action::None
            }
            (Operation::PruneImages, Ok(_)) => Action::Batch(vec![
                Action::Notify("Pruned unused images".to_string()),
                Self::refresh(),
            ]),
            (op, Err(e)) => Action::Notify(format!("{} failed: {}", op.label(), describe_failure(&e))),
            _ => Action::None,
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
        "j/k: Navigate  Enter: Open  p: Pull  b: Build  n: Prune  r: Refresh  Esc: Back"
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect, ctx: &AppContext, busy: bool) {
        let theme = &ctx.theme;
        let title = format!("Images ({})", self.images.len());

        if let Some(error) = &self.error {
            let text = Paragraph::new(Span::styled(error.clone(), Style::default().fg(theme.error)))
                .block(block(title, theme));
            frame.render_widget(text, area);
            return;
        }

        if self.images.is_empty() {
            let message = if !self.loaded && busy {
                "Loading images..."
            } else {
                "No images found."
            };
            let text = Paragraph::new(Span::styled(message, Style::default().fg(theme.muted)))
                .alignment(Alignment::Center)
                .block(block(title, theme));
            frame.render_widget(text, area);
            return;
        }

        let header = Row::new(vec!["NAME", "TAG", "DIGEST"]).style(header_style(theme));
        let rows: Vec<Row> = self
            .images
            .items()
            .iter()
            .map(|image| {
                Row::new(vec![
                    Cell::from(image.name.clone()),
                    Cell::from(image.tag.clone()),
                    Cell::from(short_digest(&image.digest).to_string())
                        .style(Style::default().fg(theme.muted)),
                ])
            })
            .collect();

        let widths = [
            Constraint::Percentage(50),
            Constraint::Percentage(20),
            Constraint::Min(DIGEST_CHARS as u16),
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

        frame.render_stateful_widget(table, area, self.images.table_state_mut());
    }
}
