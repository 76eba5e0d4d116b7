//! Theme and style system for Rivulex
//!
//! One global palette (dark, light or no-color) read by every screen and
//! widget through [`theme()`].

use crate::models::{AccessMode, Severity};
use ratatui::style::{Color, Modifier, Style};
use std::str::FromStr;
use std::sync::{PoisonError, RwLock};

/// Marker shown next to the focused row
pub const FOCUS_SYMBOL: &str = "» ";

static THEME: RwLock<Theme> = RwLock::new(Theme {
    theme_type: ThemeType::Dark,
    primary: Color::Red,
    secondary: Color::Cyan,
    success: Color::Green,
    warning: Color::Yellow,
    error: Color::Red,
    text: Color::White,
    text_muted: Color::DarkGray,
    text_emphasis: Color::LightYellow,
    border: Color::DarkGray,
    border_focused: Color::LightRed,
});

/// Install the global theme (startup, or after a config change)
pub fn init_theme(theme_type: ThemeType) {
    let mut theme = THEME.write().unwrap_or_else(PoisonError::into_inner);
    *theme = Theme::new(theme_type);
}

/// Current theme
pub fn theme() -> Theme {
    THEME.read().unwrap_or_else(PoisonError::into_inner).clone()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ThemeType {
    #[default]
    Dark,
    Light,
    /// No colors at all (`NO_COLOR` or `theme = "nocolor"`)
    NoColor,
}

impl ThemeType {
    /// Theme from config, forced to `NoColor` when `no_color` is set.
    pub fn resolve(configured: &str, no_color: bool) -> Self {
        if no_color {
            ThemeType::NoColor
        } else {
            configured.parse().unwrap_or_default()
        }
    }
}

impl FromStr for ThemeType {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.to_lowercase().as_str() {
            "light" => ThemeType::Light,
            "nocolor" | "no-color" | "no_color" => ThemeType::NoColor,
            _ => ThemeType::Dark,
        })
    }
}

#[derive(Debug, Clone)]
pub struct Theme {
    pub theme_type: ThemeType,

    /// Brand accent (titles, primary buttons)
    pub primary: Color,
    /// General-access accent
    pub secondary: Color,

    pub success: Color,
    pub warning: Color,
    pub error: Color,

    pub text: Color,
    pub text_muted: Color,
    pub text_emphasis: Color,

    pub border: Color,
    pub border_focused: Color,
}

impl Theme {
    pub fn new(theme_type: ThemeType) -> Self {
        match theme_type {
            ThemeType::Dark => Self::dark(),
            ThemeType::Light => Self::light(),
            ThemeType::NoColor => Self::no_color(),
        }
    }

    pub fn dark() -> Self {
        Self {
            theme_type: ThemeType::Dark,
            primary: Color::Red,
            secondary: Color::Cyan,
            success: Color::Green,
            warning: Color::Yellow,
            error: Color::Red,
            text: Color::White,
            text_muted: Color::DarkGray,
            text_emphasis: Color::LightYellow,
            border: Color::DarkGray,
            border_focused: Color::LightRed,
        }
    }

    pub fn light() -> Self {
        Self {
            theme_type: ThemeType::Light,
            primary: Color::Rgb(185, 28, 28),
            secondary: Color::Blue,
            success: Color::Green,
            warning: Color::Rgb(194, 65, 12), // orange, readable on white
            error: Color::Red,
            text: Color::Black,
            text_muted: Color::DarkGray,
            text_emphasis: Color::Rgb(161, 98, 7),
            border: Color::DarkGray,
            border_focused: Color::Rgb(185, 28, 28),
        }
    }

    /// Style helpers avoid fg/bg entirely in this mode.
    pub fn no_color() -> Self {
        Self {
            theme_type: ThemeType::NoColor,
            primary: Color::Reset,
            secondary: Color::Reset,
            success: Color::Reset,
            warning: Color::Reset,
            error: Color::Reset,
            text: Color::Reset,
            text_muted: Color::Reset,
            text_emphasis: Color::Reset,
            border: Color::Reset,
            border_focused: Color::Reset,
        }
    }

    fn is_plain(&self) -> bool {
        self.theme_type == ThemeType::NoColor
    }

    fn fg_or(&self, color: Color, fallback: Modifier) -> Style {
        if self.is_plain() {
            Style::default().add_modifier(fallback)
        } else {
            Style::default().fg(color)
        }
    }

    pub fn title_style(&self) -> Style {
        self.fg_or(self.primary, Modifier::BOLD)
            .add_modifier(Modifier::BOLD)
    }

    pub fn text_style(&self) -> Style {
        self.fg_or(self.text, Modifier::empty())
    }

    pub fn muted_style(&self) -> Style {
        self.fg_or(self.text_muted, Modifier::DIM)
    }

    pub fn emphasis_style(&self) -> Style {
        self.fg_or(self.text_emphasis, Modifier::BOLD)
    }

    pub fn success_style(&self) -> Style {
        self.fg_or(self.success, Modifier::BOLD)
    }

    pub fn warning_style(&self) -> Style {
        self.fg_or(self.warning, Modifier::BOLD)
    }

    pub fn error_style(&self) -> Style {
        self.fg_or(self.error, Modifier::BOLD | Modifier::UNDERLINED)
    }

    pub fn border_style(&self) -> Style {
        self.fg_or(self.border, Modifier::empty())
    }

    pub fn border_focused_style(&self) -> Style {
        self.fg_or(self.border_focused, Modifier::BOLD)
    }

    /// Focused row / selected option
    pub fn highlight_style(&self) -> Style {
        if self.is_plain() {
            return Style::default().add_modifier(Modifier::BOLD | Modifier::REVERSED);
        }
        Style::default()
            .fg(self.border_focused)
            .add_modifier(Modifier::BOLD)
    }

    pub fn disabled_style(&self) -> Style {
        self.fg_or(self.text_muted, Modifier::DIM)
    }

    /// Alert color: high → error, medium → warning, low → emphasis
    pub fn severity_style(&self, severity: Severity) -> Style {
        match severity {
            Severity::High => self.error_style(),
            Severity::Medium => self.warning_style(),
            Severity::Low => self.emphasis_style(),
            Severity::Unknown => self.muted_style(),
        }
    }

    /// Accent for the active access mode
    pub fn access_style(&self, mode: AccessMode) -> Style {
        let color = match mode {
            AccessMode::Company => self.primary,
            AccessMode::General => self.secondary,
        };
        self.fg_or(color, Modifier::BOLD).add_modifier(Modifier::BOLD)
    }
}
