//! Color palettes for dark and light terminals

use ctui_config::ThemeMode;
use ratatui::style::Color;

/// Colors used across all screens
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    pub accent: Color,
    pub text: Color,
    pub muted: Color,
    pub border: Color,
    pub highlight_bg: Color,
    pub highlight_fg: Color,
    pub success: Color,
    pub warning: Color,
    pub error: Color,
}

impl Theme {
    pub fn dark() -> Self {
        Self {
            accent: Color::Cyan,
            text: Color::White,
            muted: Color::DarkGray,
            border: Color::Gray,
            highlight_bg: Color::DarkGray,
            highlight_fg: Color::White,
            success: Color::Green,
            warning: Color::Yellow,
            error: Color::Red,
        }
    }

    pub fn light() -> Self {
        Self {
            accent: Color::Blue,
            text: Color::Black,
            muted: Color::Gray,
            border: Color::DarkGray,
            highlight_bg: Color::Blue,
            highlight_fg: Color::White,
            success: Color::Green,
            warning: Color::Magenta,
            error: Color::Red,
        }
    }

    /// Palette for a configured mode; `auto` inspects `COLORFGBG`
    pub fn for_mode(mode: ThemeMode) -> Self {
        match mode {
            ThemeMode::Dark => Self::dark(),
            ThemeMode::Light => Self::light(),
            ThemeMode::Auto => {
                let colorfgbg = std::env::var("COLORFGBG").unwrap_or_default();
                if background_is_light(&colorfgbg) {
                    Self::light()
                } else {
                    Self::dark()
                }
            }
        }
    }
}

/// `COLORFGBG` is `fg;bg` (sometimes `fg;x;bg`); 7 and 15 are light backgrounds
fn background_is_light(colorfgbg: &str) -> bool {
    matches!(colorfgbg.rsplit(';').next(), Some("7" | "15"))
}
