use super::*;
use crate::widgets::DialogBuilder;
use ctui_core::Confirmation;

/// Modal for the pending confirmation
pub(super) fn draw_confirmation(frame: &mut Frame, app: &App, area: Rect) {
    let Some((confirmation, request)) = app.confirmation.as_ref() else {
        return;
    };
    let theme = &app.ctx.theme;
    let op = request.op;

    let dialog = DialogBuilder::new(op.label())
        .width(70)
        .message(op.description())
        .empty_line()
        .command(confirmation.command().to_string(), theme.warning);

    let dialog = match confirmation {
        Confirmation::Preview(_) => dialog
            .border_color(theme.warning)
            .empty_line()
            .help("y/Enter: Run  n/Esc: Cancel"),
        Confirmation::Typed(typed) => {
            let dialog = dialog
                .border_color(theme.error)
                .empty_line()
                .styled_message(Line::from(vec![
                    Span::raw("Type "),
                    Span::styled(typed.expected().to_string(), Style::default().fg(theme.error).bold()),
                    Span::raw(" to confirm"),
                ]))
                .input(typed.typed().to_string(), theme.text);
            let dialog = if typed.is_mismatch() {
                dialog.styled_message(Line::from(Span::styled(
                    "input does not match",
                    Style::default().fg(theme.error),
                )))
            } else {
                dialog.empty_line()
            };
            dialog.help("Enter: Confirm  Esc: Cancel")
        }
    };

    dialog.render(frame, area);
}
