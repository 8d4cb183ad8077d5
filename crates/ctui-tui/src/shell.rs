//! Handing the terminal to an interactive command
//!
//! The TUI leaves the alternate screen and raw mode, the child inherits
//! stdin/stdout/stderr, and the TUI is restored once the child exits.

use crossterm::{
    cursor, execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ctui_provider::Command;
use ratatui::prelude::*;
use std::io::{self, Write};
use std::process::Stdio;

/// Reset terminal to sane state using stty
#[cfg(unix)]
pub async fn reset_terminal() {
    let _ = tokio::process::Command::new("stty")
        .arg("sane")
        .stdin(Stdio::inherit())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .await;
    let _ = io::stdout().flush();
}

#[cfg(not(unix))]
pub async fn reset_terminal() {
    let _ = io::stdout().flush();
}

fn suspend<B: Backend + Write>(terminal: &mut Terminal<B>) -> io::Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, cursor::Show)?;
    Ok(())
}

fn restore<B: Backend + Write>(terminal: &mut Terminal<B>) -> io::Result<()> {
    enable_raw_mode()?;
    execute!(terminal.backend_mut(), EnterAlternateScreen, cursor::Hide)?;
    terminal.clear()
}

/// Run `command` in the foreground and return its exit code
///
/// The terminal is restored even when the command cannot be started.
pub async fn run_interactive<B: Backend + Write>(
    terminal: &mut Terminal<B>,
    command: &Command,
) -> io::Result<i32> {
    tracing::info!("Starting interactive session: {}", command);
    suspend(terminal)?;

    let status = tokio::process::Command::new(&command.executable)
        .args(&command.args)
        .stdin(Stdio::inherit())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .status()
        .await;

    reset_terminal().await;
    restore(terminal)?;

    let code = status?.code().unwrap_or(-1);
    tracing::info!("Interactive session ended with code {}", code);
    Ok(code)
}
