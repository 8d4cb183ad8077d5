//! Reusable widget abstractions for the TUI

mod dialog;
mod output;
mod selectable_list;
mod text_input;

pub use dialog::{centered_rect, DialogBuilder};
pub use output::OutputPane;
pub use selectable_list::SelectableList;
pub use text_input::TextInputState;
