//! Screen identifiers and the navigation stack

use ctui_provider::{Container, Image};
use std::path::PathBuf;

/// One identifier per screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScreenId {
    ContainerList,
    ContainerMenu,
    ContainerLogs,
    ContainerShell,
    ImageList,
    ImageMenu,
    ImageInspect,
    ImagePull,
    FilePicker,
    Build,
    Daemon,
    Help,
}

impl ScreenId {
    pub fn label(&self) -> &'static str {
        match self {
            Self::ContainerList => "Containers",
            Self::ContainerMenu => "Container",
            Self::ContainerLogs => "Logs",
            Self::ContainerShell => "Shell",
            Self::ImageList => "Images",
            Self::ImageMenu => "Image",
            Self::ImageInspect => "Inspect",
            Self::ImagePull => "Pull",
            Self::FilePicker => "Select build file",
            Self::Build => "Build",
            Self::Daemon => "Daemon",
            Self::Help => "Help",
        }
    }

    /// Submenus reachable through "back to submenu"
    pub fn is_submenu(&self) -> bool {
        matches!(self, Self::ContainerMenu | Self::ImageMenu)
    }
}

/// Stack of screens to return to
#[derive(Debug, Clone, Default)]
pub struct NavStack {
    entries: Vec<ScreenId>,
}

impl NavStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, id: ScreenId) {
        self.entries.push(id);
    }

    /// Pop the top entry, or return `fallback` when empty
    pub fn pop(&mut self, fallback: ScreenId) -> ScreenId {
        self.entries.pop().unwrap_or(fallback)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Remove entries down to and including the topmost `id`
    pub fn unwind_to(&mut self, id: ScreenId) {
        if let Some(pos) = self.entries.iter().rposition(|e| *e == id) {
            self.entries.truncate(pos);
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[ScreenId] {
        &self.entries
    }
}

/// Entity carried into the target screen
#[derive(Debug, Clone, PartialEq)]
pub enum Selection {
    Container(Container),
    Image(Image),
    BuildFile(PathBuf),
}

/// Request to show another screen
#[derive(Debug, Clone, PartialEq)]
pub struct ScreenChange {
    pub target: ScreenId,
    /// Push the current screen so that "back" returns to it
    pub push: bool,
    pub selection: Option<Selection>,
}

impl ScreenChange {
    /// Replace the current screen
    pub fn to(target: ScreenId) -> Self {
        Self {
            target,
            push: false,
            selection: None,
        }
    }

    /// Open `target` on top of the current screen
    pub fn push(target: ScreenId) -> Self {
        Self {
            target,
            push: true,
            selection: None,
        }
    }

    pub fn with(mut self, selection: Selection) -> Self {
        self.selection = Some(selection);
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum NavRequest {
    Change(ScreenChange),
    Back,
    BackToSubmenu,
}

/// Tracks the active screen, the back stack and retained selections
///
/// Each transition bumps the epoch so that results of work started on a
/// previous screen can be recognized and dropped.
#[derive(Debug, Clone)]
pub struct Navigator {
    current: ScreenId,
    stack: NavStack,
    last_container: Option<Container>,
    last_image: Option<Image>,
    last_submenu: Option<ScreenId>,
    build_file: Option<PathBuf>,
    epoch: u64,
}

impl Default for Navigator {
    fn default() -> Self {
        Self::new()
    }
}

impl Navigator {
    pub fn new() -> Self {
        Self {
            current: ScreenId::ContainerList,
            stack: NavStack::new(),
            last_container: None,
            last_image: None,
            last_submenu: None,
            build_file: None,
            epoch: 0,
        }
    }

    pub fn current(&self) -> ScreenId {
        self.current
    }

    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    pub fn stack(&self) -> &NavStack {
        &self.stack
    }

    pub fn container(&self) -> Option<&Container> {
        self.last_container.as_ref()
    }

    pub fn image(&self) -> Option<&Image> {
        self.last_image.as_ref()
    }

    pub fn build_file(&self) -> Option<&PathBuf> {
        self.build_file.as_ref()
    }

    /// Apply a request and return the screen that is now active
    pub fn apply(&mut self, request: NavRequest) -> ScreenId {
        let target = match request {
            NavRequest::Change(change) => {
                if let Some(selection) = change.selection {
                    self.select(selection);
                }
                if change.push {
                    self.stack.push(self.current);
                }
                change.target
            }
            NavRequest::Back => self.stack.pop(ScreenId::ContainerList),
            NavRequest::BackToSubmenu => match self.last_submenu {
                Some(submenu) => {
                    self.stack.unwind_to(submenu);
                    submenu
                }
                None => ScreenId::ContainerList,
            },
        };

        let target = self.resolve(target);
        if target == ScreenId::ContainerList {
            self.stack.clear();
        }
        if target.is_submenu() {
            self.last_submenu = Some(target);
        }

        tracing::debug!("Navigate {:?} -> {:?}", self.current, target);
        self.current = target;
        self.epoch += 1;
        target
    }

    fn select(&mut self, selection: Selection) {
        match selection {
            Selection::Container(c) => self.last_container = Some(c),
            Selection::Image(i) => self.last_image = Some(i),
            Selection::BuildFile(p) => self.build_file = Some(p),
        }
    }

    /// Screens that need an entity fall back to the root list without one
    fn resolve(&self, target: ScreenId) -> ScreenId {
        let missing = match target {
            ScreenId::ContainerMenu | ScreenId::ContainerLogs | ScreenId::ContainerShell => {
                self.last_container.is_none()
            }
            ScreenId::ImageMenu | ScreenId::ImageInspect => self.last_image.is_none(),
            ScreenId::Build => self.build_file.is_none(),
            _ => false,
        };
        if missing {
            tracing::warn!("No selection for {:?}, returning to container list", target);
            ScreenId::ContainerList
        } else {
            target
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ctui_provider::ContainerStatus;

    fn container(id: &str) -> Container {
        Container {
            id: id.to_string(),
            name: id.to_string(),
            image: "nginx".to_string(),
            status: ContainerStatus::Running,
            created: String::new(),
            ports: Vec::new(),
        }
    }

    #[test]
    fn test_stack_pop_order_and_fallback() {
        let mut stack = NavStack::new();
        stack.push(ScreenId::ImageList);
        stack.push(ScreenId::ImageMenu);
        assert_eq!(stack.pop(ScreenId::ContainerList), ScreenId::ImageMenu);
        assert_eq!(stack.pop(ScreenId::ContainerList), ScreenId::ImageList);
        assert_eq!(stack.pop(ScreenId::ContainerList), ScreenId::ContainerList);
        assert!(stack.is_empty());
    }

    #[test]
    fn test_unwind_to() {
        let mut stack = NavStack::new();
        stack.push(ScreenId::ContainerList);
        stack.push(ScreenId::ContainerMenu);
        stack.unwind_to(ScreenId::ContainerMenu);
        assert_eq!(stack.entries(), &[ScreenId::ContainerList]);

        stack.unwind_to(ScreenId::Help);
        assert_eq!(stack.len(), 1);
    }

    #[test]
    fn test_push_then_back() {
        let mut nav = Navigator::new();
        nav.apply(NavRequest::Change(ScreenChange::push(ScreenId::ImageList)));
        nav.apply(NavRequest::Change(ScreenChange::push(ScreenId::ImagePull)));
        assert_eq!(nav.stack().len(), 2);

        assert_eq!(nav.apply(NavRequest::Back), ScreenId::ImageList);
        assert_eq!(nav.apply(NavRequest::Back), ScreenId::ContainerList);
        assert_eq!(nav.apply(NavRequest::Back), ScreenId::ContainerList);
    }

    #[test]
    fn test_entering_root_clears_stack() {
        let mut nav = Navigator::new();
        nav.apply(NavRequest::Change(ScreenChange::push(ScreenId::ImageList)));
        nav.apply(NavRequest::Change(ScreenChange::push(ScreenId::Help)));
        nav.apply(NavRequest::Change(ScreenChange::push(ScreenId::ContainerList)));
        assert!(nav.stack().is_empty());
    }

    #[test]
    fn test_back_to_submenu_uses_retained_selection() {
        let mut nav = Navigator::new();
        nav.apply(NavRequest::Change(
            ScreenChange::push(ScreenId::ContainerMenu).with(Selection::Container(container("abc"))),
        ));
        nav.apply(NavRequest::Change(ScreenChange::push(ScreenId::ContainerShell)));

        assert_eq!(nav.apply(NavRequest::BackToSubmenu), ScreenId::ContainerMenu);
        assert_eq!(nav.container().map(|c| c.id.as_str()), Some("abc"));
        // The submenu is no longer on the stack; back goes to the list
        assert_eq!(nav.apply(NavRequest::Back), ScreenId::ContainerList);
    }

    #[test]
    fn test_back_to_submenu_without_submenu_goes_home() {
        let mut nav = Navigator::new();
        nav.apply(NavRequest::Change(ScreenChange::push(ScreenId::Daemon)));
        assert_eq!(nav.apply(NavRequest::BackToSubmenu), ScreenId::ContainerList);
    }

    #[test]
    fn test_missing_selection_falls_back_to_root() {
        let mut nav = Navigator::new();
        let target = nav.apply(NavRequest::Change(ScreenChange::push(ScreenId::ContainerMenu)));
        assert_eq!(target, ScreenId::ContainerList);
        assert!(nav.stack().is_empty());
    }

    #[test]
    fn test_every_transition_bumps_epoch() {
        let mut nav = Navigator::new();
        let start = nav.epoch();
        nav.apply(NavRequest::Change(ScreenChange::push(ScreenId::Help)));
        nav.apply(NavRequest::Back);
        nav.apply(NavRequest::Back);
        assert_eq!(nav.epoch(), start + 3);
    }
}
