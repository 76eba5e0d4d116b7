//! Preset keymaps: Standard, Emacs
//!
//! Each preset binds every action. Plain character keys are left free for
//! typing into form fields.

use super::{Action, KeyBinding};
use serde::{Deserialize, Serialize};

/// Available keymap presets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum KeymapPreset {
    /// Arrows, Enter, Esc, Ctrl shortcuts
    #[default]
    Standard,
    /// Emacs-style cursor and field movement (Ctrl+N/P, Ctrl+A/E)
    Emacs,
}

impl KeymapPreset {
    pub fn bindings(&self) -> Vec<KeyBinding> {
        match self {
            KeymapPreset::Standard => standard_bindings(),
            KeymapPreset::Emacs => emacs_bindings(),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            KeymapPreset::Standard => "Standard",
            KeymapPreset::Emacs => "Emacs",
        }
    }
}

fn standard_bindings() -> Vec<KeyBinding> {
    vec![
        // Navigation
        KeyBinding::new("up", Action::MoveUp),
        KeyBinding::new("down", Action::MoveDown),
        KeyBinding::new("left", Action::MoveLeft),
        KeyBinding::new("right", Action::MoveRight),
        KeyBinding::new("home", Action::Home),
        KeyBinding::new("end", Action::End),
        // Selection
        KeyBinding::new("enter", Action::Confirm),
        KeyBinding::new("esc", Action::Cancel),
        KeyBinding::new("space", Action::ToggleSelect),
        // Global
        KeyBinding::new("ctrl+c", Action::Quit),
        // Actions
        KeyBinding::new("ctrl+t", Action::SwitchAccessMode),
        KeyBinding::new("ctrl+p", Action::TogglePasswordVisibility),
        KeyBinding::new("ctrl+n", Action::CreateAccount),
        KeyBinding::new("ctrl+o", Action::OpenSafetyRouting),
        KeyBinding::new("ctrl+r", Action::Refresh),
        KeyBinding::new("ctrl+s", Action::Save),
        // Text editing
        KeyBinding::new("backspace", Action::Backspace),
        KeyBinding::new("delete", Action::DeleteChar),
        // Field navigation
        KeyBinding::new("tab", Action::NextTab),
        KeyBinding::new("shift+tab", Action::PrevTab),
    ]
}

fn emacs_bindings() -> Vec<KeyBinding> {
    vec![
        // Navigation - emacs style + arrows
        KeyBinding::new("ctrl+p", Action::MoveUp),
        KeyBinding::new("up", Action::MoveUp),
        KeyBinding::new("ctrl+n", Action::MoveDown),
        KeyBinding::new("down", Action::MoveDown),
        KeyBinding::new("ctrl+b", Action::MoveLeft),
        KeyBinding::new("left", Action::MoveLeft),
        KeyBinding::new("ctrl+f", Action::MoveRight),
        KeyBinding::new("right", Action::MoveRight),
        KeyBinding::new("ctrl+a", Action::Home),
        KeyBinding::new("home", Action::Home),
        KeyBinding::new("ctrl+e", Action::End),
        KeyBinding::new("end", Action::End),
        // Selection
        KeyBinding::new("enter", Action::Confirm),
        KeyBinding::new("ctrl+g", Action::Cancel), // C-g is cancel in emacs
        KeyBinding::new("esc", Action::Cancel),
        KeyBinding::new("space", Action::ToggleSelect),
        // Global
        KeyBinding::new("ctrl+c", Action::Quit),
        // Actions (Ctrl+N/P are taken by movement)
        KeyBinding::new("ctrl+t", Action::SwitchAccessMode),
        KeyBinding::new("alt+p", Action::TogglePasswordVisibility),
        KeyBinding::new("alt+n", Action::CreateAccount),
        KeyBinding::new("ctrl+o", Action::OpenSafetyRouting),
        KeyBinding::new("ctrl+r", Action::Refresh),
        KeyBinding::new("ctrl+s", Action::Save),
        // Text editing
        KeyBinding::new("backspace", Action::Backspace),
        KeyBinding::new("ctrl+d", Action::DeleteChar), // Forward delete (Emacs standard)
        KeyBinding::new("delete", Action::DeleteChar),
        // Field navigation
        KeyBinding::new("tab", Action::NextTab),
        KeyBinding::new("shift+tab", Action::PrevTab),
    ]
}
