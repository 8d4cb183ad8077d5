//! Container system status and start/stop

use super::{block, Action, Request, ScreenView};
use crate::context::AppContext;
use crate::nav::ScreenId;
use crossterm::event::{KeyCode, KeyEvent};
use ctui_core::{CheckDaemonStatusBuilder, Operation, StartDaemonBuilder, StopDaemonBuilder};
use ctui_provider::{describe_failure, parse_daemon_status, CommandOutput, DaemonStatus};
use ratatui::{prelude::*, widgets::Paragraph};

pub struct DaemonScreen {
    status: Option<DaemonStatus>,
    error: Option<String>,
}

impl Default for DaemonScreen {
    fn default() -> Self {
        Self::new()
    }
}

impl DaemonScreen {
    pub fn new() -> Self {
        Self {
            status: None,
            error: None,
        }
    }

    pub fn status(&self) -> Option<&DaemonStatus> {
        self.status.as_ref()
    }

    fn check() -> Action {
        Request::build(Operation::CheckDaemonStatus, &CheckDaemonStatusBuilder).into()
    }
}

impl ScreenView for DaemonScreen {
    fn id(&self) -> ScreenId {
        ScreenId::Daemon
    }

    fn init(&mut self, _ctx: &AppContext) -> Action {
        Self::check()
    }

    fn handle_key(&mut self, key: KeyEvent, _ctx: &AppContext, _busy: bool) -> Action {
        match key.code {
            KeyCode::Char('s') => Request::build(Operation::StartDaemon, &StartDaemonBuilder).into(),
            KeyCode::Char('t') => Request::build(Operation::StopDaemon, &StopDaemonBuilder)
                .map(|r| r.expecting("stop"))
                .into(),
            KeyCode::Char('r') => Self::check(),
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
            (Operation::CheckDaemonStatus, Ok(output)) => {
                self.error = None;
                self.status = Some(parse_daemon_status(&output.stdout));
                Action::None
            }
            // A failing status command means the services are not up
            (Operation::CheckDaemonStatus, Err(e)) => {
                let stdout = e.output().map(|o| o.stdout.clone()).unwrap_or_default();
                let mut status = parse_daemon_status(&stdout);
                status.running = false;
                self.status = Some(status);
                self.error = Some(describe_failure(&e));
                Action::None
            }
            (op, Ok(_)) => Action::Batch(vec![
                Action::Notify(format!("{} succeeded", op.label())),
                Self::check(),
            ]),
            (op, Err(e)) => Action::Batch(vec![
                Action::Notify(format!("{} failed: {}", op.label(), describe_failure(&e))),
                Self::check(),
            ]),
        }
    }

    fn hints(&self) -> &'static str {
        "s: Start  t: Stop  r: Refresh  Esc: Back"
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect, ctx: &AppContext, busy: bool) {
        let theme = &ctx.theme;
        let muted = Style::default().fg(theme.muted);

        let mut lines = match &self.status {
            None if busy => vec![Line::from(Span::styled("Checking status...", muted))],
            None => vec![Line::from(Span::styled("Status unknown", muted))],
            Some(status) => {
                let (label, color) = if status.running {
                    ("running", theme.success)
                } else {
                    ("stopped", theme.error)
                };
                vec![
                    Line::from(vec![
                        Span::styled("Status        ", muted),
                        Span::styled(label, Style::default().fg(color).bold()),
                    ]),
                    Line::from(vec![
                        Span::styled("Last checked  ", muted),
                        Span::raw(
                            status
                                .last_checked
                                .with_timezone(&chrono::Local)
                                .format("%Y-%m-%d %H:%M:%S")
                                .to_string(),
                        ),
                    ]),
                ]
            }
        };
        if let Some(error) = &self.error {
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled(error.clone(), Style::default().fg(theme.error))));
        }

        frame.render_widget(Paragraph::new(lines).block(block("Container system", theme)), area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;
    use ctui_provider::{CommandStatus, ProviderError};

    #[test]
    fn test_stop_requires_typing_stop() {
        let mut screen = DaemonScreen::new();
        let key = KeyEvent::new(KeyCode::Char('t'), KeyModifiers::NONE);
        match screen.handle_key(key, &AppContext::default(), false) {
            Action::Execute(request) => {
                assert_eq!(request.op, Operation::StopDaemon);
                assert_eq!(request.command.args, vec!["system", "stop"]);
                assert_eq!(request.expected, "stop");
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_status_output_parsed() {
        let mut screen = DaemonScreen::new();
        screen.on_output(
            Operation::CheckDaemonStatus,
            Ok(CommandOutput::success("apiserver is running", Default::default())),
            &AppContext::default(),
        );
        assert!(screen.status().map(|s| s.running).unwrap_or(false));
    }

    #[test]
    fn test_failed_status_means_stopped() {
        let mut screen = DaemonScreen::new();
        let err = ProviderError::Exit {
            program: "container".to_string(),
            output: CommandOutput {
                exit_code: 1,
                stdout: "apiserver is running".to_string(),
                stderr: "XPC connection error".to_string(),
                status: CommandStatus::Error,
                ..Default::default()
            },
        };
        screen.on_output(Operation::CheckDaemonStatus, Err(err), &AppContext::default());
        assert_eq!(screen.status().map(|s| s.running), Some(false));
    }

    #[test]
    fn test_start_success_rechecks() {
        let mut screen = DaemonScreen::new();
        let action = screen.on_output(
            Operation::StartDaemon,
            Ok(CommandOutput::success("", Default::default())),
            &AppContext::default(),
        );
        let Action::Batch(actions) = action else {
            panic!("expected batch");
        };
        assert!(matches!(&actions[1], Action::Execute(r) if r.op == Operation::CheckDaemonStatus));
    }
}
