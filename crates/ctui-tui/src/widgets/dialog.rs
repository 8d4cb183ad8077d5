//! Modal dialog builder
//!
//! Used for confirmation prompts; lines are added in order and the dialog
//! is sized to fit them.

use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

/// Builder for creating modal dialogs
pub struct DialogBuilder<'a> {
    title: String,
    lines: Vec<Line<'a>>,
    width: u16,
    border_color: Color,
}

impl<'a> DialogBuilder<'a> {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            lines: Vec::new(),
            width: 60,
            border_color: Color::Yellow,
        }
    }

    pub fn width(mut self, w: u16) -> Self {
        self.width = w;
        self
    }

    pub fn border_color(mut self, color: Color) -> Self {
        self.border_color = color;
        self
    }

    pub fn message(mut self, text: impl Into<String>) -> Self {
        self.lines.push(Line::from(text.into()));
        self
    }

    pub fn styled_message(mut self, line: Line<'a>) -> Self {
        self.lines.push(line);
        self
    }

    pub fn empty_line(mut self) -> Self {
        self.lines.push(Line::from(""));
        self
    }

    /// Command preview, highlighted
    pub fn command(mut self, rendered: impl Into<String>, color: Color) -> Self {
        self.lines.push(Line::from(Span::styled(
            format!("$ {}", rendered.into()),
            Style::default().fg(color).bold(),
        )));
        self
    }

    /// Text entry line with a trailing cursor
    pub fn input(mut self, value: impl Into<String>, color: Color) -> Self {
        self.lines.push(Line::from(vec![
            Span::raw("> "),
            Span::styled(value.into(), Style::default().fg(color)),
            Span::styled("_", Style::default().add_modifier(Modifier::SLOW_BLINK)),
        ]));
        self
    }

    /// Help text at the bottom
    pub fn help(mut self, text: impl Into<String>) -> Self {
        self.lines.push(Line::from(Span::styled(
            text.into(),
            Style::default().fg(Color::DarkGray),
        )));
        self
    }

    /// Render the dialog centered in the given area
    pub fn render(self, frame: &mut Frame, area: Rect) {
        let inner_width = self.width.saturating_sub(2).max(1) as usize;
        // Long command previews wrap; reserve room for them
        let wrapped: usize = self
            .lines
            .iter()
            .map(|l| l.width().max(1).div_ceil(inner_width))
            .sum();
        let height = wrapped as u16 + 2;
        let dialog_area = centered_rect(self.width, height, area);

        frame.render_widget(Clear, dialog_area);

        let dialog = Paragraph::new(self.lines)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: false })
            .block(
                Block::default()
                    .title(format!(" {} ", self.title))
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(self.border_color)),
            );

        frame.render_widget(dialog, dialog_area);
    }
}

/// Calculate a centered rectangle within an area
pub fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    Rect {
        x: area.x + (area.width.saturating_sub(width)) / 2,
        y: area.y + (area.height.saturating_sub(height)) / 2,
        width: width.min(area.width),
        height: height.min(area.height),
    }
}
