use crate::styles::theme;
use anyhow::Result;
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Padding, Paragraph, Wrap};

/// Common header for all screens: brand, screen title and a description
pub struct Header;

impl Header {
    /// Returns the height used.
    pub fn render(frame: &mut Frame, area: Rect, title: &str, description: &str) -> Result<u16> {
        let t = theme();
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(t.border_focused_style())
            .title(Line::from(vec![
                Span::styled(" RIVULEX ", t.title_style()),
                Span::styled(format!("· {} ", title), t.text_style()),
            ]))
            .title_alignment(Alignment::Center)
            .padding(Padding::horizontal(1));

        let inner = block.inner(area);
        frame.render_widget(block, area);
        frame.render_widget(
            Paragraph::new(description)
                .style(t.muted_style())
                .alignment(Alignment::Center)
                .wrap(Wrap { trim: true }),
            inner,
        );

        Ok(area.height)
    }
}
