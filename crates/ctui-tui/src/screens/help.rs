use super::{block, Action, ScreenView};
use crate::context::AppContext;
use crate::nav::ScreenId;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{prelude::*, widgets::Paragraph};

const SECTIONS: &[(&str, &[(&str, &str)])] = &[
    (
        "Containers",
        &[
            ("j/k", "Move selection"),
            ("Enter", "Open container actions"),
            ("s / t", "Start / stop"),
            ("d", "Delete a stopped container"),
            ("r", "Refresh"),
            ("i", "Images"),
            ("m", "Container system"),
            ("q", "Quit"),
        ],
    ),
    (
        "Images",
        &[
            ("Enter", "Open image actions"),
            ("p", "Pull an image"),
            ("b", "Build from a Containerfile or Dockerfile"),
            ("n", "Prune unused images"),
        ],
    ),
    (
        "Everywhere",
        &[
            ("Esc", "Back"),
            ("Ctrl+C", "Quit"),
            ("y / Enter", "Accept a preview"),
            ("n / Esc", "Cancel a confirmation"),
        ],
    ),
];

pub struct HelpScreen;

impl Default for HelpScreen {
    fn default() -> Self {
        Self::new()
    }
}

impl HelpScreen {
    pub fn new() -> Self {
        Self
    }
}

impl ScreenView for HelpScreen {
    fn id(&self) -> ScreenId {
        ScreenId::Help
    }

    fn handle_key(&mut self, key: KeyEvent, _ctx: &AppContext, _busy: bool) -> Action {
        match key.code {
            KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('?') => Action::Back,
            _ => Action::None,
        }
    }

    fn hints(&self) -> &'static str {
        "Esc: Back"
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect, ctx: &AppContext, _busy: bool) {
        let theme = &ctx.theme;
        let mut lines = vec![
            Line::from(vec![
                Span::styled("ctui ", Style::default().fg(theme.accent).bold()),
                Span::styled(format!("v{}", ctx.version), Style::default().fg(theme.muted)),
            ]),
            Line::from(""),
        ];
        for (section, keys) in SECTIONS {
            lines.push(Line::from(Span::styled(*section, Style::default().fg(theme.warning).bold())));
            for (key, description) in keys.iter() {
                lines.push(Line::from(vec![
                    Span::styled(format!("  {:<12}", key), Style::default().fg(theme.accent)),
                    Span::raw(*description),
                ]));
            }
            lines.push(Line::from(""));
        }
        if ctx.dry_run {
            lines.push(Line::from(Span::styled(
                "Dry run: commands are shown but never executed",
                Style::default().fg(theme.warning),
            )));
        }

        frame.render_widget(Paragraph::new(lines).block(block("Help", theme)), area);
    }
}
