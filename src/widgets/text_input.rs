//! Text input widget for rendering TextInput instances.
//!
//! Handles focus/disabled border styling, placeholders, password masking and
//! cursor placement.

use crate::utils::text_input::TextInput;
use crate::utils::{
    disabled_border_style, disabled_text_style, focused_border_style, input_placeholder_style,
    input_text_style, unfocused_border_style,
};
use ratatui::prelude::*;
use ratatui::widgets::{Block, BorderType, Borders, Paragraph};

/// # Example
/// ```
/// use rivulex::utils::TextInput;
/// use rivulex::widgets::TextInputWidget;
///
/// let input = TextInput::with_text("john@gmail.com");
/// let widget = TextInputWidget::new(&input)
///     .title("Email")
///     .placeholder("you@example.com")
///     .focused(true);
/// // frame.render_text_input_widget(widget, area);
/// ```
pub struct TextInputWidget<'a> {
    input: &'a TextInput,
    title: Option<&'a str>,
    placeholder: Option<&'a str>,
    focused: bool,
    disabled: bool,
    /// Mask the text (passwords)
    masked: bool,
}

impl<'a> TextInputWidget<'a> {
    pub fn new(input: &'a TextInput) -> Self {
        Self {
            input,
            title: None,
            placeholder: None,
            focused: false,
            disabled: false,
            masked: false,
        }
    }

    pub fn title(mut self, title: &'a str) -> Self {
        self.title = Some(title);
        self
    }

    pub fn placeholder(mut self, placeholder: &'a str) -> Self {
        self.placeholder = Some(placeholder);
        self
    }

    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    pub fn masked(mut self, masked: bool) -> Self {
        self.masked = masked;
        self
    }

    fn display_text(&self) -> String {
        let text = self.input.text();
        if text.is_empty() {
            self.placeholder.unwrap_or("").to_string()
        } else if self.masked {
            "•".repeat(text.chars().count())
        } else {
            text.to_string()
        }
    }

    fn text_style(&self) -> Style {
        if self.disabled {
            disabled_text_style()
        } else if self.input.text().is_empty() {
            input_placeholder_style()
        } else {
            input_text_style()
        }
    }

    fn border_style(&self) -> Style {
        if self.disabled {
            disabled_border_style()
        } else if self.focused {
            focused_border_style()
        } else {
            unfocused_border_style()
        }
    }

    fn create_block(&self) -> Block<'a> {
        let mut block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(self.border_style());
        if let Some(title) = self.title {
            block = block.title(format!(" {} ", title));
        }
        block
    }

    /// Visible slice start so the cursor stays inside `width` columns.
    fn scroll_offset(&self, width: usize) -> usize {
        let cursor = self.input.cursor();
        if width == 0 {
            0
        } else {
            cursor.saturating_sub(width.saturating_sub(1))
        }
    }
}

impl Widget for TextInputWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = self.create_block();
        let inner = block.inner(area);
        let offset = if self.input.text().is_empty() {
            0
        } else {
            self.scroll_offset(inner.width as usize)
        };
        let visible: String = self.display_text().chars().skip(offset).collect();
        Paragraph::new(visible)
            .block(block)
            .style(self.text_style())
            .render(area, buf);
    }
}

/// Renders a `TextInputWidget` and places the terminal cursor when focused.
pub trait TextInputWidgetExt {
    fn render_text_input_widget(&mut self, widget: TextInputWidget, area: Rect);
}

impl TextInputWidgetExt for Frame<'_> {
    fn render_text_input_widget(&mut self, widget: TextInputWidget, area: Rect) {
        let show_cursor = widget.focused && !widget.disabled;
        let inner = widget.create_block().inner(area);
        let width = inner.width as usize;
        let column = widget.input.cursor() - widget.scroll_offset(width);

        self.render_widget(widget, area);

        if show_cursor && inner.width > 0 {
            let x = inner.x + column.min(width - 1) as u16;
            self.set_cursor_position((x, inner.y));
        }
    }
}
