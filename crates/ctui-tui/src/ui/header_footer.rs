use super::*;

pub const DOTS_SPINNER: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

pub fn spinner_frame(index: usize) -> &'static str {
    DOTS_SPINNER[index % DOTS_SPINNER.len()]
}

/// Title plus the path of screens leading to the current one
pub(super) fn draw_header(frame: &mut Frame, app: &App, area: Rect) {
    let theme = &app.ctx.theme;
    let nav = app.navigator();

    let mut spans = Vec::new();
    for id in nav.stack().entries() {
        spans.push(Span::styled(id.label(), Style::default().fg(theme.muted)));
        spans.push(Span::styled(" › ", Style::default().fg(theme.muted)));
    }
    spans.push(Span::styled(
        nav.current().label(),
        Style::default().fg(theme.text).bold(),
    ));

    let header = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .title(" ctui - Container Manager ")
            .title_style(Style::default().fg(theme.accent).bold())
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.accent)),
    );
    frame.render_widget(header, area);
}

/// Status line (screen, activity, pending command, mode, message) over key hints
pub(super) fn draw_footer(frame: &mut Frame, app: &App, area: Rect) {
    let theme = &app.ctx.theme;
    let mut status = vec![Span::styled(
        format!("[{}]", app.current_screen().label()),
        Style::default().fg(theme.accent),
    )];

    if app.is_busy() {
        status.push(Span::raw(" "));
        status.push(Span::styled(
            spinner_frame(app.spinner_index()),
            Style::default().fg(theme.warning),
        ));
    }
    if let Some(confirmation) = app.confirmation() {
        status.push(Span::styled(
            format!(" $ {}", confirmation.command()),
            Style::default().fg(theme.warning),
        ));
    }
    if app.ctx.dry_run {
        status.push(Span::styled(
            " [DRY RUN]",
            Style::default().fg(theme.warning).bold(),
        ));
    }
    if let Some(message) = app.message() {
        status.push(Span::styled(" │ ", Style::default().fg(theme.muted)));
        status.push(Span::styled(message.to_string(), Style::default().fg(theme.text)));
    }

    let hints = if app.confirmation().is_some() {
        "Enter: Confirm  Esc: Cancel"
    } else {
        app.screen().view_ref().hints()
    };

    let footer = Paragraph::new(vec![
        Line::from(status),
        Line::from(Span::styled(hints, Style::default().fg(theme.muted))),
    ])
    .block(Block::default().borders(Borders::ALL).border_style(Style::default().fg(theme.border)));

    frame.render_widget(footer, area);
}
