//! One-line banner for the last submission result.

use crate::models::SubmissionResult;
use crate::styles::theme;
use ratatui::prelude::*;
use ratatui::widgets::{Paragraph, Widget, Wrap};

pub struct StatusLine<'a> {
    result: Option<&'a SubmissionResult>,
    busy: Option<&'a str>,
}

impl<'a> StatusLine<'a> {
    pub fn new(result: Option<&'a SubmissionResult>) -> Self {
        Self { result, busy: None }
    }

    /// Text shown instead of the result while a request is outstanding
    pub fn busy(mut self, busy: bool, label: &'a str) -> Self {
        self.busy = busy.then_some(label);
        self
    }

    fn line(&self) -> Option<Line<'a>> {
        let t = theme();
        if let Some(label) = self.busy {
            return Some(Line::from(Span::styled(format!("⏳ {}", label), t.emphasis_style())));
        }
        self.result.map(|result| {
            let (icon, style) = if result.success {
                ("✔", t.success_style())
            } else {
                ("✘", t.error_style())
            };
            Line::from(Span::styled(format!("{} {}", icon, result.message), style))
        })
    }
}

impl Widget for StatusLine<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if let Some(line) = self.line() {
            Paragraph::new(line)
                .alignment(Alignment::Center)
                .wrap(Wrap { trim: true })
                .render(area, buf);
        }
    }
}
