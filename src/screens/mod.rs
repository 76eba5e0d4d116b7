//! Screen controllers for the application.
//!
//! Each screen owns its form state and background handles, and implements
//! the [`Screen`] trait.
//!
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │                    App                       │
//! │  match current_screen {                      │
//! │    Login         => login.handle_event(..)   │
//! │    SignUp        => sign_up.handle_event(..) │
//! │    SafetyRouting => safety.handle_event(..)  │
//! │  }                                           │
//! └──────────────────────────────────────────────┘
//! ```

pub mod login;
pub mod safety_routing;
pub mod screen_trait;
pub mod sign_up;

pub use login::LoginScreen;
pub use safety_routing::SafetyRoutingScreen;
pub use screen_trait::{RenderContext, Screen, ScreenAction, ScreenContext};
pub use sign_up::SignUpScreen;

use crate::styles::{theme, FOCUS_SYMBOL};
use ratatui::prelude::*;

/// Next or previous entry of `order`, wrapping around.
pub(crate) fn cycle_focus<T: Copy + PartialEq>(order: &[T], current: T, forward: bool) -> T {
    let len = order.len();
    let index = order.iter().position(|f| *f == current).unwrap_or(0);
    let next = if forward {
        (index + 1) % len
    } else {
        (index + len - 1) % len
    };
    order[next]
}

/// Centered rectangle of at most `width` x `height`.
pub(crate) fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

/// `[ Label ]` button line. Disabled buttons render muted.
pub(crate) fn button(label: &str, focused: bool, enabled: bool) -> Line<'static> {
    let t = theme();
    let style = if !enabled {
        t.disabled_style()
    } else if focused {
        t.highlight_style().add_modifier(Modifier::REVERSED)
    } else {
        t.title_style()
    };
    let marker = if focused { FOCUS_SYMBOL } else { "  " };
    Line::from(vec![
        Span::styled(marker.to_string(), t.highlight_style()),
        Span::styled(format!("[ {} ]", label), style),
    ])
    .alignment(Alignment::Center)
}

/// `[x] Label` checkbox line.
pub(crate) fn checkbox(label: &str, checked: bool, focused: bool) -> Line<'static> {
    let t = theme();
    let mark = if checked { "[x]" } else { "[ ]" };
    let style = if focused {
        t.highlight_style()
    } else {
        t.text_style()
    };
    let marker = if focused { FOCUS_SYMBOL } else { "  " };
    Line::from(vec![
        Span::styled(marker.to_string(), t.highlight_style()),
        Span::styled(format!("{} {}", mark, label), style),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cycle_focus_wraps() {
        let order = [1, 2, 3];
        assert_eq!(cycle_focus(&order, 3, true), 1);
        assert_eq!(cycle_focus(&order, 1, false), 3);
        assert_eq!(cycle_focus(&order, 2, true), 3);
    }

    #[test]
    fn test_centered_clamps() {
        let area = Rect::new(0, 0, 40, 10);
        assert_eq!(centered(area, 20, 4), Rect::new(10, 3, 20, 4));
        assert_eq!(centered(area, 80, 40), area);
    }
}
