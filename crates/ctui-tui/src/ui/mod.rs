//! UI rendering for the TUI application

mod dialogs;
mod header_footer;

use crate::app::App;
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph},
};

use dialogs::*;
use header_footer::*;

/// Main draw function
pub fn draw(frame: &mut Frame, app: &mut App) {
    let area = frame.size();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header with breadcrumb
            Constraint::Min(0),    // Active screen
            Constraint::Length(4), // Status bar and key hints
        ])
        .split(area);

    draw_header(frame, app, chunks[0]);

    let busy = app.is_busy();
    app.screen.view().draw(frame, chunks[1], &app.ctx, busy);

    draw_footer(frame, app, chunks[2]);

    if app.confirmation.is_some() {
        draw_confirmation(frame, app, area);
    }
}
