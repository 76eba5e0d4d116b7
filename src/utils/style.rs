use crate::styles::theme;
use ratatui::prelude::*;

pub fn focused_border_style() -> Style {
    theme().border_focused_style()
}

pub fn unfocused_border_style() -> Style {
    theme().border_style()
}

pub fn disabled_border_style() -> Style {
    theme().disabled_style()
}

pub fn input_placeholder_style() -> Style {
    theme().muted_style()
}

pub fn input_text_style() -> Style {
    theme().text_style()
}

pub fn disabled_text_style() -> Style {
    theme().disabled_style()
}
