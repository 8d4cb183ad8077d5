//! Application state and the event loop
//!
//! The app owns the navigator, the active screen and any pending
//! confirmation. Commands run as background tasks; their results come back
//! as [`AppEvent`]s tagged with the navigation epoch they were started in,
//! so results for a screen that has since been left are dropped.

use crate::context::AppContext;
use crate::event::{Event, EventHandler};
use crate::nav::{NavRequest, Navigator, ScreenId};
use crate::screens::{Action, Request, Screen};
use crate::{shell, ui};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ctui_core::{ConfirmInput, ConfirmState, Confirmation, Operation, ShellDetector};
use ctui_provider::{describe_failure, Command, CommandExecutor, CommandOutput};
use ratatui::prelude::*;
use std::future::Future;
use std::io;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::instrument::WithSubscriber;

/// Application error type
#[derive(Debug, Error)]
pub enum AppError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type AppResult<T> = Result<T, AppError>;

const TICK_RATE: Duration = Duration::from_millis(250);

/// Ticks between idle refreshes (about five seconds)
const REFRESH_TICKS: u64 = 20;

/// Messages from background tasks
#[derive(Debug)]
pub enum AppEvent {
    Completed {
        epoch: u64,
        op: Operation,
        result: ctui_provider::Result<CommandOutput>,
    },
    Line {
        epoch: u64,
        line: String,
    },
    ShellDetected {
        epoch: u64,
        result: Result<String, String>,
    },
    /// A task ended, whether it completed or was aborted
    Finished,
}

/// Sends [`AppEvent::Finished`] when the owning task ends or is dropped
struct DoneGuard(mpsc::UnboundedSender<AppEvent>);

impl Drop for DoneGuard {
    fn drop(&mut self) {
        let _ = self.0.send(AppEvent::Finished);
    }
}

/// Main application state
pub struct App {
    pub ctx: AppContext,
    executor: Arc<dyn CommandExecutor>,
    shells: Arc<ShellDetector>,
    pub(crate) nav: Navigator,
    pub(crate) screen: Screen,
    pub(crate) confirmation: Option<(Confirmation, Request)>,
    pub(crate) message: Option<String>,
    /// Jobs started since the last navigation
    active_jobs: usize,
    /// Spawned tasks that have not finished yet, across all epochs
    in_flight: usize,
    spinner: usize,
    ticks: u64,
    tx: mpsc::UnboundedSender<AppEvent>,
    rx: mpsc::UnboundedReceiver<AppEvent>,
    stream_task: Option<JoinHandle<()>>,
    pending_interactive: Option<Command>,
    should_quit: bool,
}

impl App {
    /// Create the app on the container list and start loading it
    ///
    /// Must be called inside a tokio runtime.
    pub fn new(executor: Arc<dyn CommandExecutor>, ctx: AppContext) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        let nav = Navigator::new();
        let screen = Screen::create(nav.current(), &nav);
        let mut app = Self {
            ctx,
            shells: Arc::new(ShellDetector::new(executor.clone())),
            executor,
            nav,
            screen,
            confirmation: None,
            message: None,
            active_jobs: 0,
            in_flight: 0,
            spinner: 0,
            ticks: 0,
            tx,
            rx,
            stream_task: None,
            pending_interactive: None,
            should_quit: false,
        };
        let action = app.screen.view().init(&app.ctx);
        app.perform(action);
        app
    }

    /// App with default preferences for tests
    pub fn new_for_testing(executor: Arc<dyn CommandExecutor>) -> Self {
        Self::new(executor, AppContext::default())
    }

    pub fn current_screen(&self) -> ScreenId {
        self.nav.current()
    }

    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    pub fn navigator(&self) -> &Navigator {
        &self.nav
    }

    pub fn confirmation(&self) -> Option<&Confirmation> {
        self.confirmation.as_ref().map(|(c, _)| c)
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// A command started from the current screen is still running
    pub fn is_busy(&self) -> bool {
        self.active_jobs > 0
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn spinner_index(&self) -> usize {
        self.spinner
    }

    pub fn pending_interactive(&self) -> Option<&Command> {
        self.pending_interactive.as_ref()
    }

    /// Main run loop
    pub async fn run<B: Backend + io::Write>(&mut self, terminal: &mut Terminal<B>) -> AppResult<()> {
        let mut events = EventHandler::new(TICK_RATE);

        while !self.should_quit {
            terminal.draw(|frame| ui::draw(frame, self))?;

            if let Some(command) = self.pending_interactive.take() {
                events.pause().await;
                let outcome = shell::run_interactive(terminal, &command).await;
                events.resume();
                match outcome {
                    Ok(0) => {}
                    Ok(code) => self.message = Some(format!("Shell exited with code {}", code)),
                    Err(e) => {
                        tracing::warn!("Interactive session failed: {}", e);
                        self.message = Some(format!("Shell failed: {}", e));
                    }
                }
                self.navigate(NavRequest::BackToSubmenu);
                continue;
            }

            tokio::select! {
                event = events.next() => {
                    if let Some(e) = event {
                        self.handle_event(e)?;
                    }
                }
                event = self.rx.recv() => {
                    if let Some(e) = event {
                        self.handle_app_event(e);
                    }
                }
            }
        }

        if let Some(task) = self.stream_task.take() {
            task.abort();
        }
        Ok(())
    }

    pub fn handle_event(&mut self, event: Event) -> AppResult<()> {
        match event {
            Event::Tick => self.on_tick(),
            Event::Key(key) => self.handle_key(key),
            Event::Resize(_, _) => {}
        }
        Ok(())
    }

    /// Feed one key and wait for every command it started to finish
    pub async fn send_key(&mut self, code: KeyCode, modifiers: KeyModifiers) -> AppResult<()> {
        self.handle_event(Event::Key(KeyEvent::new(code, modifiers)))?;
        self.settle().await;
        Ok(())
    }

    /// Process background results until no task is running
    pub async fn settle(&mut self) {
        while self.in_flight > 0 {
            match self.rx.recv().await {
                Some(event) => self.handle_app_event(event),
                None => break,
            }
        }
        while let Ok(event) = self.rx.try_recv() {
            self.handle_app_event(event);
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.should_quit = true;
            return;
        }

        if self.confirmation.is_some() {
            self.handle_confirmation_key(key);
            return;
        }

        self.message = None;
        let busy = self.is_busy();
        let action = self.screen.view().handle_key(key, &self.ctx, busy);
        self.perform(action);
    }

    fn handle_confirmation_key(&mut self, key: KeyEvent) {
        let Some((confirmation, _)) = self.confirmation.as_mut() else {
            return;
        };
        let input = match key.code {
            KeyCode::Esc => ConfirmInput::Cancel,
            KeyCode::Enter => ConfirmInput::Submit,
            KeyCode::Backspace => ConfirmInput::Backspace,
            KeyCode::Char(c) => ConfirmInput::Char(c),
            _ => return,
        };

        match confirmation.handle(input) {
            ConfirmState::AwaitingInput => {}
            ConfirmState::Confirmed => {
                if let Some((_, request)) = self.confirmation.take() {
                    self.dispatch(request);
                }
            }
            ConfirmState::Cancelled => {
                if let Some((_, request)) = self.confirmation.take() {
                    tracing::debug!("Cancelled {}", request.op);
                }
                self.message = Some("Cancelled".to_string());
            }
        }
    }

    fn on_tick(&mut self) {
        self.spinner = self.spinner.wrapping_add(1);
        self.ticks += 1;
        if self.ticks % REFRESH_TICKS == 0 && !self.is_busy() && self.confirmation.is_none() {
            let action = self.screen.view().on_tick(&self.ctx);
            self.perform(action);
        }
    }

    /// Carry out what a screen asked for
    fn perform(&mut self, action: Action) {
        match action {
            Action::None => {}
            Action::Navigate(change) => self.navigate(NavRequest::Change(change)),
            Action::Back => self.navigate(NavRequest::Back),
            Action::BackToSubmenu => self.navigate(NavRequest::BackToSubmenu),
            Action::Execute(request) => self.request(request),
            Action::DetectShell(container_id) => self.detect_shell(container_id),
            Action::Interactive(command) => {
                if self.ctx.dry_run || self.executor.is_dry_run() {
                    self.message = Some(format!("dry-run: {}", command));
                    self.navigate(NavRequest::BackToSubmenu);
                } else {
                    self.pending_interactive = Some(command);
                }
            }
            Action::Notify(message) => self.message = Some(message),
            Action::Batch(actions) => {
                for action in actions {
                    self.perform(action);
                }
            }
            Action::Quit => self.should_quit = true,
        }
    }

    fn navigate(&mut self, request: NavRequest) {
        if let Some(task) = self.stream_task.take() {
            task.abort();
        }
        self.confirmation = None;
        let target = self.nav.apply(request);
        self.active_jobs = 0;
        self.screen = Screen::create(target, &self.nav);
        let action = self.screen.view().init(&self.ctx);
        self.perform(action);
    }

    /// Gate a request behind its confirmation policy
    fn request(&mut self, request: Request) {
        if self.is_busy() {
            self.message = Some("Another command is still running".to_string());
            return;
        }
        let policy = request.op.policy(self.ctx.confirm_destructive());
        match Confirmation::for_policy(policy, request.command.clone(), &request.expected) {
            Some(confirmation) => self.confirmation = Some((confirmation, request)),
            None => self.dispatch(request),
        }
    }

    fn spawn_job<F>(&mut self, job: F) -> JoinHandle<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        self.in_flight += 1;
        self.active_jobs += 1;
        let guard = DoneGuard(self.tx.clone());
        // Jobs log through the dispatcher active here, not the global one
        tokio::spawn(
            async move {
                let _guard = guard;
                job.await;
            }
            .with_current_subscriber(),
        )
    }

    fn dispatch(&mut self, request: Request) {
        let Request {
            op, command, stream, ..
        } = request;
        let epoch = self.nav.epoch();
        let executor = self.executor.clone();
        let tx = self.tx.clone();
        tracing::info!("Running {}: {}", op, command);

        if stream {
            let handle = self.spawn_job(async move {
                let (line_tx, mut line_rx) = mpsc::unbounded_channel();
                let run = executor.stream(&command, line_tx);
                tokio::pin!(run);
                let result = loop {
                    tokio::select! {
                        Some(line) = line_rx.recv() => {
                            let _ = tx.send(AppEvent::Line { epoch, line });
                        }
                        result = &mut run => break result,
                    }
                };
                while let Ok(line) = line_rx.try_recv() {
                    let _ = tx.send(AppEvent::Line { epoch, line });
                }
                let _ = tx.send(AppEvent::Completed { epoch, op, result });
            });
            if let Some(previous) = self.stream_task.replace(handle) {
                previous.abort();
            }
        } else {
            self.spawn_job(async move {
                let result = executor.execute(&command).await;
                let _ = tx.send(AppEvent::Completed { epoch, op, result });
            });
        }
    }

    fn detect_shell(&mut self, container_id: String) {
        let epoch = self.nav.epoch();
        let shells = self.shells.clone();
        let tx = self.tx.clone();
        self.spawn_job(async move {
            let result = shells.detect(&container_id).await.map_err(|e| e.to_string());
            let _ = tx.send(AppEvent::ShellDetected { epoch, result });
        });
    }

    pub fn handle_app_event(&mut self, event: AppEvent) {
        let current = self.nav.epoch();
        match event {
            AppEvent::Finished => self.in_flight = self.in_flight.saturating_sub(1),
            AppEvent::Completed { epoch, op, .. } if epoch != current => {
                tracing::debug!("Dropping stale result for {}", op);
            }
            AppEvent::Completed { op, result, .. } => {
                self.active_jobs = self.active_jobs.saturating_sub(1);
                if let Err(e) = &result {
                    tracing::warn!("{} failed: {}", op, describe_failure(e));
                }
                let action = self.screen.view().on_output(op, result, &self.ctx);
                self.perform(action);
            }
            AppEvent::Line { epoch, line } => {
                if epoch == current {
                    self.screen.view().on_line(line);
                }
            }
            AppEvent::ShellDetected { epoch, result } => {
                if epoch == current {
                    self.active_jobs = self.active_jobs.saturating_sub(1);
                    let action = self.screen.view().on_shell(result, &self.ctx);
                    self.perform(action);
                }
            }
        }
    }
}
