//! Action enum for all user-triggered actions
//!
//! These represent semantic actions that can be triggered by keyboard shortcuts.

use serde::{Deserialize, Serialize};

/// All possible user actions in the application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    // ============ Navigation ============
    /// Focus the previous field
    MoveUp,
    /// Focus the next field
    MoveDown,
    /// Move the cursor left, or step a selector backwards
    MoveLeft,
    /// Move the cursor right, or step a selector forwards
    MoveRight,
    /// Jump to start of input
    Home,
    /// Jump to end of input
    End,

    // ============ Selection & Confirmation ============
    /// Submit the current form (Enter)
    Confirm,
    /// Go back (Esc)
    Cancel,
    /// Toggle the focused checkbox or selector (Space)
    ToggleSelect,

    // ============ Global ============
    /// Quit the application
    Quit,

    // ============ Screen-specific actions ============
    /// Switch between company and general access
    SwitchAccessMode,
    /// Show or hide the password
    TogglePasswordVisibility,
    /// Open the sign-up screen
    CreateAccount,
    /// Open the safety routing screen
    OpenSafetyRouting,
    /// Fetch safety alerts and route data
    Refresh,
    /// Save / submit (Ctrl+S)
    Save,

    // ============ Text editing ============
    /// Delete character before cursor
    Backspace,
    /// Delete character at cursor
    DeleteChar,

    // ============ Tab/Field navigation ============
    /// Move to next field
    NextTab,
    /// Move to previous field
    PrevTab,
}

impl Action {
    /// Get a human-readable description of this action
    pub fn description(&self) -> &'static str {
        match self {
            Action::MoveUp => "Previous field",
            Action::MoveDown => "Next field",
            Action::MoveLeft => "Move left",
            Action::MoveRight => "Move right",
            Action::Home => "Home",
            Action::End => "End",
            Action::Confirm => "Submit",
            Action::Cancel => "Back",
            Action::ToggleSelect => "Toggle",
            Action::Quit => "Quit",
            Action::SwitchAccessMode => "Switch access type",
            Action::TogglePasswordVisibility => "Show/hide password",
            Action::CreateAccount => "Create new account",
            Action::OpenSafetyRouting => "Safety routing",
            Action::Refresh => "Refresh alerts",
            Action::Save => "Save",
            Action::Backspace => "Backspace",
            Action::DeleteChar => "Delete character",
            Action::NextTab => "Next field",
            Action::PrevTab => "Previous field",
        }
    }

    /// Get action category for grouping in help display
    pub fn category(&self) -> &'static str {
        match self {
            Action::MoveUp
            | Action::MoveDown
            | Action::MoveLeft
            | Action::MoveRight
            | Action::Home
            | Action::End => "Navigation",

            Action::Confirm | Action::Cancel | Action::ToggleSelect => "Selection",

            Action::Quit => "Global",

            Action::SwitchAccessMode
            | Action::TogglePasswordVisibility
            | Action::CreateAccount
            | Action::OpenSafetyRouting
            | Action::Refresh
            | Action::Save => "Actions",

            Action::Backspace | Action::DeleteChar => "Text Editing",

            Action::NextTab | Action::PrevTab => "Field Navigation",
        }
    }
}
