//! User preferences for ctui
//!
//! This crate handles the preferences file (`~/.config/ctui/config.toml`)
//! and the directories ctui keeps its state in.

mod error;
mod preferences;

pub use error::*;
pub use preferences::*;
