//! TUI application for ctui
//!
//! Built with Ratatui. Screens describe what should happen; the [`App`]
//! runs commands through the configured executor and routes results back.

pub mod app;
pub mod context;
mod event;
pub mod nav;
pub mod screens;
mod shell;
pub mod theme;
pub mod ui;
pub mod widgets;

pub use app::{App, AppError, AppEvent, AppResult};
pub use context::AppContext;
pub use event::{Event, EventHandler};
pub use nav::{NavRequest, Navigator, ScreenChange, ScreenId, Selection};
pub use screens::{Action, Request, Screen};
pub use theme::Theme;

use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ctui_provider::CommandExecutor;
use ratatui::prelude::*;
use std::io;
use std::sync::Arc;
use tracing::subscriber::DefaultGuard;
use tracing_subscriber::layer::SubscriberExt;

/// Discard log output on this thread until the guard is dropped
///
/// Tasks spawned by [`App`] and [`EventHandler`] inherit this dispatcher, so
/// commands running on runtime worker threads stay quiet as well.
pub fn silence_logs() -> DefaultGuard {
    tracing::subscriber::set_default(
        tracing_subscriber::registry().with(tracing_subscriber::layer::Identity::new()),
    )
}

/// Run the TUI application
pub async fn run(executor: Arc<dyn CommandExecutor>, ctx: AppContext) -> AppResult<()> {
    // Log lines would corrupt the display
    let _guard = silence_logs();

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(executor, ctx);
    let res = app.run(&mut terminal).await;

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    res
}
