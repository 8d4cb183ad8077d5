//! Settings shared by every screen

use crate::theme::Theme;
use ctui_config::Preferences;

/// Read-only context passed to screens and the UI
#[derive(Debug, Clone)]
pub struct AppContext {
    pub preferences: Preferences,
    pub theme: Theme,
    /// Commands are previewed, never run
    pub dry_run: bool,
    pub version: String,
}

impl AppContext {
    pub fn new(preferences: Preferences, dry_run: bool, version: impl Into<String>) -> Self {
        let theme = Theme::for_mode(preferences.theme());
        Self {
            preferences,
            theme,
            dry_run,
            version: version.into(),
        }
    }

    /// Whether irreversible operations require typing a confirmation value
    pub fn confirm_destructive(&self) -> bool {
        self.preferences.confirm_destructive_actions
    }
}

impl Default for AppContext {
    fn default() -> Self {
        Self {
            preferences: Preferences::default(),
            theme: Theme::dark(),
            dry_run: false,
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}
