//! Items plus a selection index kept in sync with a ratatui TableState

use crossterm::event::KeyCode;
use ratatui::widgets::TableState;

#[derive(Debug, Clone)]
pub struct SelectableList<T> {
    items: Vec<T>,
    selected: usize,
    table_state: TableState,
}

impl<T> Default for SelectableList<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> SelectableList<T> {
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            selected: 0,
            table_state: TableState::default(),
        }
    }

    /// Create from an existing Vec, selecting the first item
    pub fn from_items(items: Vec<T>) -> Self {
        let mut list = Self::new();
        list.set_items(items);
        list
    }

    /// Replace all items, clamping the selection to the new length
    pub fn set_items(&mut self, items: Vec<T>) {
        self.items = items;
        if self.items.is_empty() {
            self.selected = 0;
            self.table_state.select(None);
        } else {
            self.selected = self.selected.min(self.items.len() - 1);
            self.table_state.select(Some(self.selected));
        }
    }

    /// Move selection to the next item (wraps around)
    pub fn select_next(&mut self) {
        if self.items.is_empty() {
            return;
        }
        self.selected = (self.selected + 1) % self.items.len();
        self.table_state.select(Some(self.selected));
    }

    /// Move selection to the previous item (wraps around)
    pub fn select_prev(&mut self) {
        if self.items.is_empty() {
            return;
        }
        self.selected = self.selected.checked_sub(1).unwrap_or(self.items.len() - 1);
        self.table_state.select(Some(self.selected));
    }

    /// j/k and arrow keys; returns true when the key moved the selection
    pub fn handle_nav_key(&mut self, code: KeyCode) -> bool {
        match code {
            KeyCode::Char('j') | KeyCode::Down => self.select_next(),
            KeyCode::Char('k') | KeyCode::Up => self.select_prev(),
            _ => return false,
        }
        true
    }

    pub fn select(&mut self, index: usize) {
        if self.items.is_empty() {
            return;
        }
        self.selected = index.min(self.items.len() - 1);
        self.table_state.select(Some(self.selected));
    }

    /// Select the first item matching a predicate; returns true if found
    pub fn select_where<F>(&mut self, predicate: F) -> bool
    where
        F: Fn(&T) -> bool,
    {
        match self.items.iter().position(predicate) {
            Some(idx) => {
                self.select(idx);
                true
            }
            None => false,
        }
    }

    pub fn selected_item(&self) -> Option<&T> {
        self.items.get(self.selected)
    }

    pub fn selected_index(&self) -> usize {
        self.selected
    }

    /// Needed by `render_stateful_widget`
    pub fn table_state_mut(&mut self) -> &mut TableState {
        &mut self.table_state
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_items_selects_first() {
        let list = SelectableList::from_items(vec!["web", "db"]);
        assert_eq!(list.selected_item(), Some(&"web"));
    }

    #[test]
    fn test_navigation_wraps() {
        let mut list = SelectableList::from_items(vec![1, 2, 3]);
        list.handle_nav_key(KeyCode::Char('k'));
        assert_eq!(list.selected_index(), 2);
        list.handle_nav_key(KeyCode::Down);
        assert_eq!(list.selected_index(), 0);
        assert!(!list.handle_nav_key(KeyCode::Enter));
    }

    #[test]
    fn test_set_items_clamps_selection() {
        let mut list = SelectableList::from_items(vec![1, 2, 3]);
        list.select(2);
        list.set_items(vec![1]);
        assert_eq!(list.selected_index(), 0);

        list.set_items(Vec::new());
        assert!(list.selected_item().is_none());
        list.select_next();
        assert!(list.is_empty());
    }

    #[test]
    fn test_select_where() {
        let mut list = SelectableList::from_items(vec!["a", "b", "c"]);
        assert!(list.select_where(|s| *s == "c"));
        assert_eq!(list.selected_index(), 2);
        assert!(!list.select_where(|s| *s == "z"));
        assert_eq!(list.selected_index(), 2);
    }
}
