//! Directory browser for choosing a Containerfile or Dockerfile

use super::{block, Action, ScreenView};
use crate::context::AppContext;
use crate::nav::{ScreenChange, ScreenId, Selection};
use crate::widgets::SelectableList;
use crossterm::event::{KeyCode, KeyEvent};
use ctui_provider::{detect_build_file, BuildFileType};
use ratatui::{
    prelude::*,
    widgets::{Cell, Row, Table},
};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum EntryKind {
    Parent,
    Dir,
    File,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Entry {
    kind: EntryKind,
    name: String,
    path: PathBuf,
}

pub struct FilePickerScreen {
    dir: PathBuf,
    entries: SelectableList<Entry>,
    error: Option<String>,
}

impl Default for FilePickerScreen {
    fn default() -> Self {
        Self::new()
    }
}

impl FilePickerScreen {
    /// Starts in the working directory
    pub fn new() -> Self {
        let dir = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
        Self::in_dir(dir)
    }

    pub fn in_dir(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            entries: SelectableList::new(),
            error: None,
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Entry names in display order
    pub fn names(&self) -> Vec<&str> {
        self.entries.items().iter().map(|e| e.name.as_str()).collect()
    }

    fn load(&mut self) {
        let mut entries = Vec::new();
        if let Some(parent) = self.dir.parent() {
            entries.push(Entry {
                kind: EntryKind::Parent,
                name: "..".to_string(),
                path: parent.to_path_buf(),
            });
        }

        match std::fs::read_dir(&self.dir) {
            Ok(read) => {
                self.error = None;
                for entry in read.flatten() {
                    let path = entry.path();
                    let kind = if path.is_dir() { EntryKind::Dir } else { EntryKind::File };
                    entries.push(Entry {
                        kind,
                        name: entry.file_name().to_string_lossy().into_owned(),
                        path,
                    });
                }
            }
            Err(e) => {
                tracing::warn!("Cannot read {}: {}", self.dir.display(), e);
                self.error = Some(format!("cannot read {}: {}", self.dir.display(), e));
            }
        }

        entries.sort_by(|a, b| a.kind.cmp(&b.kind).then_with(|| a.name.cmp(&b.name)));
        self.entries = SelectableList::from_items(entries);
        // Put the cursor on a build file when the directory has one
        self.entries
            .select_where(|e| BuildFileType::from_path(&e.path).is_some());
    }

    fn enter_dir(&mut self, dir: PathBuf) {
        self.dir = dir;
        self.load();
    }

    fn choose(path: PathBuf) -> Action {
        Action::Navigate(ScreenChange::push(ScreenId::Build).with(Selection::BuildFile(path)))
    }

    fn activate(&mut self) -> Action {
        let Some(entry) = self.entries.selected_item().cloned() else {
            return Action::None;
        };
        match entry.kind {
            EntryKind::Parent | EntryKind::Dir => {
                self.enter_dir(entry.path);
                Action::None
            }
            EntryKind::File if BuildFileType::from_path(&entry.path).is_some() => Self::choose(entry.path),
            EntryKind::File => Action::Notify(format!(
                "unsupported file: {} (choose a Containerfile or Dockerfile)",
                entry.name
            )),
        }
    }

    /// Prefer the configured file name, then the standard detection order
    fn auto_detect(&self, ctx: &AppContext) -> Action {
        let preferred = self.dir.join(ctx.preferences.default_build_file.trim());
        if preferred.is_file() && BuildFileType::from_path(&preferred).is_some() {
            return Self::choose(preferred);
        }
        match detect_build_file(&self.dir) {
            Ok(source) => Self::choose(source.file_path),
            Err(e) => Action::Notify(e.to_string()),
        }
    }
}

impl ScreenView for FilePickerScreen {
    fn id(&self) -> ScreenId {
        ScreenId::FilePicker
    }

    fn init(&mut self, _ctx: &AppContext) -> Action {
        self.load();
        Action::None
    }

    fn handle_key(&mut self, key: KeyEvent, ctx: &AppContext, _busy: bool) -> Action {
        if self.entries.handle_nav_key(key.code) {
            return Action::None;
        }
        match key.code {
            KeyCode::Enter | KeyCode::Char('l') => self.activate(),
            KeyCode::Backspace | KeyCode::Char('h') => {
                if let Some(parent) = self.dir.parent().map(Path::to_path_buf) {
                    self.enter_dir(parent);
                }
                Action::None
            }
            KeyCode::Char('a') => self.auto_detect(ctx),
            KeyCode::Esc | KeyCode::Char('q') => Action::Back,
            _ => Action::None,
        }
    }

    fn hints(&self) -> &'static str {
        "j/k: Navigate  Enter: Open/Select  h: Up  a: Auto-detect  Esc: Back"
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect, ctx: &AppContext, _busy: bool) {
        let theme = &ctx.theme;
        let rows: Vec<Row> = self
            .entries
            .items()
            .iter()
            .map(|entry| {
                let (label, style) = match entry.kind {
                    EntryKind::Parent => ("../".to_string(), Style::default().fg(theme.muted)),
                    EntryKind::Dir => (format!("{}/", entry.name), Style::default().fg(theme.accent)),
                    EntryKind::File if BuildFileType::from_path(&entry.path).is_some() => {
                        (entry.name.clone(), Style::default().fg(theme.success).bold())
                    }
                    EntryKind::File => (entry.name.clone(), Style::default().fg(theme.text)),
                };
                Row::new(vec![Cell::from(label).style(style)])
            })
            .collect();

        let mut title = self.dir.display().to_string();
        if let Some(error) = &self.error {
            title = format!("{} ({})", title, error);
        }

        let table = Table::new(rows, [Constraint::Percentage(100)])
            .block(block(title, theme))
            .highlight_style(Style::default().bg(theme.highlight_bg).fg(theme.highlight_fg))
            .highlight_symbol("▶ ");
        frame.render_stateful_widget(table, area, self.entries.table_state_mut());
    }
}
