//! Scrollable command output with ANSI colors
//!
//! Shared by the logs, inspect, pull and build screens. While following,
//! the view sticks to the newest line; scrolling up detaches it and
//! scrolling back to the bottom re-attaches.

use ansi_to_tui::IntoText;
use crossterm::event::KeyCode;
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState},
};

/// Lines kept before the oldest are discarded
pub const DEFAULT_MAX_LINES: usize = 5000;

#[derive(Debug, Clone)]
pub struct OutputPane {
    lines: Vec<String>,
    scroll: usize,
    follow: bool,
    max_lines: usize,
    /// Inner height from the last render, used for paging
    viewport: usize,
}

impl Default for OutputPane {
    fn default() -> Self {
        Self::new()
    }
}

impl OutputPane {
    pub fn new() -> Self {
        Self::with_max_lines(DEFAULT_MAX_LINES)
    }

    pub fn with_max_lines(max_lines: usize) -> Self {
        Self {
            lines: Vec::new(),
            scroll: 0,
            follow: true,
            max_lines: max_lines.max(1),
            viewport: 1,
        }
    }

    pub fn push(&mut self, line: impl Into<String>) {
        // Carriage returns redraw progress bars in place
        let line = line.into().replace('\r', "");
        self.lines.push(line);
        if self.lines.len() > self.max_lines {
            let excess = self.lines.len() - self.max_lines;
            self.lines.drain(..excess);
            self.scroll = self.scroll.saturating_sub(excess);
        }
    }

    /// Replace the content with `text`, one entry per line
    pub fn set_text(&mut self, text: &str) {
        self.clear();
        for line in text.lines() {
            self.push(line);
        }
        self.follow = false;
    }

    pub fn clear(&mut self) {
        self.lines.clear();
        self.scroll = 0;
        self.follow = true;
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn is_following(&self) -> bool {
        self.follow
    }

    fn max_scroll(&self) -> usize {
        self.lines.len().saturating_sub(self.viewport)
    }

    /// Scroll offset that will be drawn
    pub fn offset(&self) -> usize {
        if self.follow {
            self.max_scroll()
        } else {
            self.scroll.min(self.max_scroll())
        }
    }

    fn scroll_to(&mut self, offset: usize) {
        let max = self.max_scroll();
        self.scroll = offset.min(max);
        self.follow = self.scroll >= max;
    }

    /// Scrolling keys; returns false for keys the pane does not use
    pub fn handle_key(&mut self, code: KeyCode) -> bool {
        let current = self.offset();
        let page = self.viewport.max(1);
        match code {
            KeyCode::Char('j') | KeyCode::Down => self.scroll_to(current + 1),
            KeyCode::Char('k') | KeyCode::Up => self.scroll_to(current.saturating_sub(1)),
            KeyCode::PageDown => self.scroll_to(current + page),
            KeyCode::PageUp => self.scroll_to(current.saturating_sub(page)),
            KeyCode::Char('g') | KeyCode::Home => self.scroll_to(0),
            KeyCode::Char('G') | KeyCode::End => self.scroll_to(usize::MAX),
            _ => return false,
        }
        true
    }

    pub fn render(&mut self, frame: &mut Frame, area: Rect, title: &str, border: Color) {
        self.viewport = area.height.saturating_sub(2).max(1) as usize;
        let scroll = self.offset();
        let total = self.lines.len();

        let text: Vec<Line> = self
            .lines
            .iter()
            .enumerate()
            .skip(scroll)
            .take(self.viewport)
            .map(|(i, line)| {
                let number = Span::styled(format!("{:>5} ", i + 1), Style::default().fg(Color::DarkGray));
                match line.into_text() {
                    Ok(text) => {
                        let mut spans = vec![number];
                        if let Some(first) = text.lines.into_iter().next() {
                            spans.extend(first.spans);
                        }
                        Line::from(spans)
                    }
                    Err(_) => Line::from(vec![number, Span::raw(line.clone())]),
                }
            })
            .collect();

        let position = if total > 0 {
            format!(" {} [{}/{}]{} ", title, (scroll + 1).min(total), total, if self.follow { " follow" } else { "" })
        } else {
            format!(" {} ", title)
        };

        let output = Paragraph::new(text).block(
            Block::default()
                .title(position)
                .borders(Borders::ALL)
                .border_style(Style::default().fg(border)),
        );
        frame.render_widget(output, area);

        if total > self.viewport {
            let scrollbar = Scrollbar::new(ScrollbarOrientation::VerticalRight)
                .begin_symbol(Some("▲"))
                .end_symbol(Some("▼"));
            let mut state = ScrollbarState::new(self.max_scroll()).position(scroll);
            let scrollbar_area = Rect {
                x: area.x + area.width.saturating_sub(1),
                y: area.y + 1,
                width: 1,
                height: area.height.saturating_sub(2),
            };
            frame.render_stateful_widget(scrollbar, scrollbar_area, &mut state);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pane_with(lines: usize, viewport: usize) -> OutputPane {
        let mut pane = OutputPane::new();
        pane.viewport = viewport;
        for i in 0..lines {
            pane.push(format!("line {}", i));
        }
        pane
    }

    #[test]
    fn test_follows_new_lines() {
        let mut pane = pane_with(20, 5);
        assert_eq!(pane.offset(), 15);
        pane.push("more");
        assert_eq!(pane.offset(), 16);
    }

    #[test]
    fn test_scroll_up_detaches_and_bottom_reattaches() {
        let mut pane = pane_with(20, 5);
        pane.handle_key(KeyCode::Char('k'));
        assert!(!pane.is_following());
        assert_eq!(pane.offset(), 14);

        pane.push("more");
        assert_eq!(pane.offset(), 14);

        pane.handle_key(KeyCode::Char('G'));
        assert!(pane.is_following());
    }

    #[test]
    fn test_paging_is_clamped() {
        let mut pane = pane_with(12, 5);
        pane.handle_key(KeyCode::Char('g'));
        assert_eq!(pane.offset(), 0);
        pane.handle_key(KeyCode::PageDown);
        assert_eq!(pane.offset(), 5);
        pane.handle_key(KeyCode::PageDown);
        assert_eq!(pane.offset(), 7);
        pane.handle_key(KeyCode::PageUp);
        pane.handle_key(KeyCode::PageUp);
        assert_eq!(pane.offset(), 0);
    }

    #[test]
    fn test_max_lines_drops_oldest() {
        let mut pane = OutputPane::with_max_lines(3);
        for i in 0..5 {
            pane.push(format!("{}", i));
        }
        assert_eq!(pane.lines(), &["2", "3", "4"]);
    }

    #[test]
    fn test_carriage_returns_stripped() {
        let mut pane = OutputPane::new();
        pane.push("50%\r100%");
        assert_eq!(pane.lines()[0], "50%100%");
    }

    #[test]
    fn test_set_text_starts_at_top() {
        let mut pane = OutputPane::new();
        pane.viewport = 2;
        pane.set_text("a\nb\nc\nd");
        assert_eq!(pane.offset(), 0);
        assert_eq!(pane.lines().len(), 4);
    }
}
