//! Screens and the actions they hand back to the app
//!
//! Every screen owns only its own state. Input, command results and ticks
//! are fed in through [`ScreenView`]; screens never run commands themselves
//! and instead return an [`Action`] for the app to carry out.

mod build;
mod container_list;
mod container_menu;
mod container_shell;
mod daemon;
mod file_picker;
mod help;
mod image_inspect;
mod image_list;
mod image_menu;
mod image_pull;
mod logs;

pub use build::BuildScreen;
pub use container_list::ContainerListScreen;
pub use container_menu::ContainerMenuScreen;
pub use container_shell::ContainerShellScreen;
pub use daemon::DaemonScreen;
pub use file_picker::FilePickerScreen;
pub use help::HelpScreen;
pub use image_inspect::ImageInspectScreen;
pub use image_list::ImageListScreen;
pub use image_menu::ImageMenuScreen;
pub use image_pull::ImagePullScreen;
pub use logs::LogsScreen;

use crate::context::AppContext;
use crate::nav::{Navigator, ScreenChange, ScreenId};
use crate::theme::Theme;
use crate::widgets::SelectableList;
use crossterm::event::KeyEvent;
use ctui_core::{CommandBuilder, CoreError, Operation};
use ctui_provider::{Command, CommandOutput, ContainerStatus};
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Cell, Row, Table},
};

/// A command a screen wants to run
#[derive(Debug, Clone, PartialEq)]
pub struct Request {
    pub op: Operation,
    pub command: Command,
    /// Text the user must type when the operation needs typed confirmation
    pub expected: String,
    /// Forward output lines while the command runs
    pub stream: bool,
}

impl Request {
    pub fn new(op: Operation, command: Command) -> Self {
        Self {
            op,
            command,
            expected: String::new(),
            stream: false,
        }
    }

    /// Validate `builder` and wrap its command
    pub fn build(op: Operation, builder: &impl CommandBuilder) -> Result<Self, CoreError> {
        Ok(Self::new(op, builder.build()?))
    }

    pub fn streamed(mut self) -> Self {
        self.stream = true;
        self
    }

    pub fn expecting(mut self, expected: impl Into<String>) -> Self {
        self.expected = expected.into();
        self
    }
}

/// What the app should do after a screen handled an event
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    None,
    Navigate(ScreenChange),
    Back,
    BackToSubmenu,
    Execute(Request),
    DetectShell(String),
    /// Hand the terminal to an interactive command
    Interactive(Command),
    Notify(String),
    Batch(Vec<Action>),
    Quit,
}

impl From<Result<Request, CoreError>> for Action {
    fn from(result: Result<Request, CoreError>) -> Self {
        match result {
            Ok(request) => Action::Execute(request),
            Err(e) => Action::Notify(e.to_string()),
        }
    }
}

/// Per-screen capabilities used by the app
pub trait ScreenView {
    fn id(&self) -> ScreenId;

    /// Runs on every entry, including re-entry through "back"
    fn init(&mut self, _ctx: &AppContext) -> Action {
        Action::None
    }

    /// `busy` is true while a command started from this screen is running
    fn handle_key(&mut self, key: KeyEvent, ctx: &AppContext, busy: bool) -> Action;

    fn on_output(
        &mut self,
        _op: Operation,
        _result: ctui_provider::Result<CommandOutput>,
        _ctx: &AppContext,
    ) -> Action {
        Action::None
    }

    fn on_line(&mut self, _line: String) {}

    fn on_shell(&mut self, _result: Result<String, String>, _ctx: &AppContext) -> Action {
        Action::None
    }

    /// Periodic hook while idle
    fn on_tick(&mut self, _ctx: &AppContext) -> Action {
        Action::None
    }

    /// Key reference shown in the footer
    fn hints(&self) -> &'static str;

    fn draw(&mut self, frame: &mut Frame, area: Rect, ctx: &AppContext, busy: bool);
}

/// The active screen
pub enum Screen {
    ContainerList(ContainerListScreen),
    ContainerMenu(ContainerMenuScreen),
    ContainerLogs(LogsScreen),
    ContainerShell(ContainerShellScreen),
    ImageList(ImageListScreen),
    ImageMenu(ImageMenuScreen),
    ImageInspect(ImageInspectScreen),
    ImagePull(ImagePullScreen),
    FilePicker(FilePickerScreen),
    Build(BuildScreen),
    Daemon(DaemonScreen),
    Help(HelpScreen),
}

impl Screen {
    /// Fresh state for `id`, seeded from the navigator's retained selections
    pub fn create(id: ScreenId, nav: &Navigator) -> Self {
        let container = nav.container().cloned();
        let image = nav.image().cloned();
        match (id, container, image, nav.build_file()) {
            (ScreenId::ContainerMenu, Some(c), _, _) => Self::ContainerMenu(ContainerMenuScreen::new(c)),
            (ScreenId::ContainerLogs, Some(c), _, _) => Self::ContainerLogs(LogsScreen::new(c)),
            (ScreenId::ContainerShell, Some(c), _, _) => {
                Self::ContainerShell(ContainerShellScreen::new(c))
            }
            (ScreenId::ImageList, ..) => Self::ImageList(ImageListScreen::new()),
            (ScreenId::ImageMenu, _, Some(i), _) => Self::ImageMenu(ImageMenuScreen::new(i)),
            (ScreenId::ImageInspect, _, Some(i), _) => Self::ImageInspect(ImageInspectScreen::new(i)),
            (ScreenId::ImagePull, ..) => Self::ImagePull(ImagePullScreen::new()),
            (ScreenId::FilePicker, ..) => Self::FilePicker(FilePickerScreen::new()),
            (ScreenId::Build, _, _, Some(path)) => Self::Build(BuildScreen::new(path)),
            (ScreenId::Daemon, ..) => Self::Daemon(DaemonScreen::new()),
            (ScreenId::Help, ..) => Self::Help(HelpScreen::new()),
            _ => Self::ContainerList(ContainerListScreen::new()),
        }
    }

    pub fn view(&mut self) -> &mut dyn ScreenView {
        match self {
            Self::ContainerList(s) => s,
            Self::ContainerMenu(s) => s,
            Self::ContainerLogs(s) => s,
            Self::ContainerShell(s) => s,
            Self::ImageList(s) => s,
            Self::ImageMenu(s) => s,
            Self::ImageInspect(s) => s,
            Self::ImagePull(s) => s,
            Self::FilePicker(s) => s,
            Self::Build(s) => s,
            Self::Daemon(s) => s,
            Self::Help(s) => s,
        }
    }

    pub fn view_ref(&self) -> &dyn ScreenView {
        match self {
            Self::ContainerList(s) => s,
            Self::ContainerMenu(s) => s,
            Self::ContainerLogs(s) => s,
            Self::ContainerShell(s) => s,
            Self::ImageList(s) => s,
            Self::ImageMenu(s) => s,
            Self::ImageInspect(s) => s,
            Self::ImagePull(s) => s,
            Self::FilePicker(s) => s,
            Self::Build(s) => s,
            Self::Daemon(s) => s,
            Self::Help(s) => s,
        }
    }

    pub fn id(&self) -> ScreenId {
        self.view_ref().id()
    }
}

pub(crate) fn header_style(theme: &Theme) -> Style {
    Style::default().fg(theme.accent).bold()
}

pub(crate) fn status_color(status: ContainerStatus, theme: &Theme) -> Color {
    match status {
        ContainerStatus::Running => theme.success,
        ContainerStatus::Stopped => theme.muted,
        ContainerStatus::Paused | ContainerStatus::Created => theme.warning,
        ContainerStatus::Unknown => theme.error,
    }
}

/// Titled block using the theme's border color
pub(crate) fn block(title: impl Into<String>, theme: &Theme) -> Block<'static> {
    Block::default()
        .title(format!(" {} ", title.into()))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.border))
}

/// One-column option table used by the submenus
pub(crate) fn draw_menu<T>(
    frame: &mut Frame,
    area: Rect,
    title: &str,
    list: &mut SelectableList<T>,
    label: impl Fn(&T) -> String,
    theme: &Theme,
) {
    let rows: Vec<Row> = list
        .items()
        .iter()
        .map(|item| Row::new(vec![Cell::from(label(item))]))
        .collect();

    let table = Table::new(rows, [Constraint::Percentage(100)])
        .block(block(title, theme))
        .highlight_style(
            Style::default()
                .bg(theme.highlight_bg)
                .fg(theme.highlight_fg)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("▶ ");

    frame.render_stateful_widget(table, area, list.table_state_mut());
}
