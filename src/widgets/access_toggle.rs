//! Company / General access switch.

use crate::models::AccessMode;
use crate::styles::theme;
use ratatui::prelude::*;
use ratatui::widgets::{Block, BorderType, Borders, Paragraph, Widget};

pub struct AccessToggle {
    mode: AccessMode,
    focused: bool,
}

impl AccessToggle {
    pub fn new(mode: AccessMode) -> Self {
        Self {
            mode,
            focused: false,
        }
    }

    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    fn option(&self, mode: AccessMode) -> Span<'static> {
        let t = theme();
        let label = match mode {
            AccessMode::Company => " Company ",
            AccessMode::General => " General ",
        };
        if mode == self.mode {
            Span::styled(
                format!("[{}]", label),
                t.access_style(mode).add_modifier(Modifier::REVERSED),
            )
        } else {
            Span::styled(format!(" {} ", label), t.muted_style())
        }
    }
}

impl Widget for AccessToggle {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let t = theme();
        let border = if self.focused {
            t.border_focused_style()
        } else {
            t.border_style()
        };
        let line = Line::from(vec![
            self.option(AccessMode::Company),
            Span::raw(" "),
            self.option(AccessMode::General),
        ]);
        Paragraph::new(line)
            .alignment(Alignment::Center)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Rounded)
                    .border_style(border)
                    .title(" Access "),
            )
            .render(area, buf);
    }
}

/// Bordered bullet list describing what an access mode includes.
pub struct AccessFeatures {
    mode: AccessMode,
    heading: &'static str,
    features: &'static [&'static str],
}

impl AccessFeatures {
    /// Panel shown on the login screen.
    pub fn login(mode: AccessMode) -> Self {
        let (heading, features) = mode.login_features();
        Self {
            mode,
            heading,
            features,
        }
    }

    /// Card shown on the sign-up screen.
    pub fn plan(mode: AccessMode) -> Self {
        Self {
            mode,
            heading: mode.title(),
            features: mode.plan_features(),
        }
    }

    fn lines(&self) -> Vec<Line<'static>> {
        let style = theme().access_style(self.mode);
        self.features
            .iter()
            .map(|feature| Line::from(Span::styled(format!("\u{2022} {}", feature), style)))
            .collect()
    }
}

impl Widget for AccessFeatures {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let t = theme();
        let title = format!(" {} ", self.heading);
        Paragraph::new(self.lines())
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Rounded)
                    .border_style(t.border_style())
                    .title(Span::styled(title, t.access_style(self.mode))),
            )
            .render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rendered(widget: AccessFeatures) -> String {
        let area = Rect::new(0, 0, 48, 6);
        let mut buf = Buffer::empty(area);
        widget.render(area, &mut buf);
        buf.content().iter().map(|c| c.symbol()).collect()
    }

    #[test]
    fn test_login_panel_follows_mode() {
        let company = rendered(AccessFeatures::login(AccessMode::Company));
        assert!(company.contains("Full Access Includes"));
        assert!(company.contains("Damage Assessment Tools"));
        assert!(!company.contains("Community Updates"));

        let general = rendered(AccessFeatures::login(AccessMode::General));
        assert!(general.contains("Your Access Includes"));
        assert!(general.contains("Community Updates"));
    }

    #[test]
    fn test_plan_card_follows_mode() {
        let company = rendered(AccessFeatures::plan(AccessMode::Company));
        assert!(company.contains("Company Access"));
        assert!(company.contains("Priority support"));

        let general = rendered(AccessFeatures::plan(AccessMode::General));
        assert!(general.contains("General Access"));
        assert!(general.contains("Limited storage"));
    }
}
