//! Mock route map drawn on a ratatui canvas.
//!
//! Coordinates use a 300x200 space with the origin at the top left; they are
//! flipped when drawn because the canvas y axis points up.

use crate::styles::theme;
use ratatui::prelude::*;
use ratatui::symbols::Marker;
use ratatui::widgets::canvas::{Canvas, Circle, Line as CanvasLine};
use ratatui::widgets::{Block, BorderType, Borders, Widget};

const WIDTH: f64 = 300.0;
const HEIGHT: f64 = 200.0;

/// Quadratic curve segments of the route: (start, control, end)
const ROUTE: [((f64, f64), (f64, f64), (f64, f64)); 2] = [
    ((60.0, 60.0), (120.0, 100.0), (180.0, 80.0)),
    ((180.0, 80.0), (220.0, 70.0), (240.0, 120.0)),
];

const LABELS: [(f64, f64, &str); 3] = [
    (12.0, 18.0, "LINCOLN"),
    (170.0, 170.0, "LOWER TOWN HEIGHTS"),
    (20.0, 150.0, "STREET"),
];

const SAMPLES_PER_SEGMENT: usize = 16;

/// Sample the route into a polyline.
pub fn route_points() -> Vec<(f64, f64)> {
    let mut points = Vec::with_capacity(ROUTE.len() * SAMPLES_PER_SEGMENT + 1);
    for (i, (p0, p1, p2)) in ROUTE.iter().enumerate() {
        // Skip t = 0 after the first segment; it repeats the previous end.
        let first = usize::from(i > 0);
        for step in first..=SAMPLES_PER_SEGMENT {
            let t = step as f64 / SAMPLES_PER_SEGMENT as f64;
            let u = 1.0 - t;
            let x = u * u * p0.0 + 2.0 * u * t * p1.0 + t * t * p2.0;
            let y = u * u * p0.1 + 2.0 * u * t * p1.1 + t * t * p2.1;
            points.push((x, y));
        }
    }
    points
}

pub struct RouteMap<'a> {
    caption: Option<&'a str>,
    loading: bool,
}

impl<'a> RouteMap<'a> {
    pub fn new() -> Self {
        Self {
            caption: None,
            loading: false,
        }
    }

    /// Text under the title, e.g. a route summary
    pub fn caption(mut self, caption: &'a str) -> Self {
        self.caption = Some(caption);
        self
    }

    pub fn loading(mut self, loading: bool) -> Self {
        self.loading = loading;
        self
    }
}

impl Default for RouteMap<'_> {
    fn default() -> Self {
        Self::new()
    }
}

impl Widget for RouteMap<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let t = theme();
        let mut block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(t.border_style())
            .title(Span::styled(" Map ", t.title_style()));
        if let Some(caption) = self.caption {
            block = block.title_bottom(Span::styled(format!(" {} ", caption), t.muted_style()));
        }
        if self.loading {
            block = block.title_top(
                Line::from(Span::styled(" refreshing… ", t.emphasis_style())).right_aligned(),
            );
        }

        let route_color = t.primary;
        let label_style = t.muted_style();
        let points = route_points();

        Canvas::default()
            .block(block)
            .marker(Marker::Braille)
            .x_bounds([0.0, WIDTH])
            .y_bounds([0.0, HEIGHT])
            .paint(|ctx| {
                for pair in points.windows(2) {
                    let (x1, y1) = pair[0];
                    let (x2, y2) = pair[1];
                    ctx.draw(&CanvasLine::new(x1, HEIGHT - y1, x2, HEIGHT - y2, route_color));
                }
                ctx.layer();
                for (x, y) in [ROUTE[0].0, ROUTE[ROUTE.len() - 1].2] {
                    for radius in [6.0, 3.0] {
                        ctx.draw(&Circle {
                            x,
                            y: HEIGHT - y,
                            radius,
                            color: route_color,
                        });
                    }
                }
                for (x, y, label) in LABELS {
                    ctx.print(x, HEIGHT - y, Span::styled(label, label_style));
                }
            })
            .render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_route_starts_and_ends_on_markers() {
        let points = route_points();
        assert_eq!(points.len(), 2 * SAMPLES_PER_SEGMENT + 1);
        assert_eq!(points[0], (60.0, 60.0));
        assert_eq!(points[points.len() - 1], (240.0, 120.0));
        assert!(points
            .iter()
            .all(|(x, y)| (0.0..=WIDTH).contains(x) && (0.0..=HEIGHT).contains(y)));
    }

    #[test]
    fn test_renders_labels() {
        let area = Rect::new(0, 0, 60, 20);
        let mut buf = Buffer::empty(area);
        RouteMap::new().caption("Via Lincoln St").render(area, &mut buf);
        let text: String = buf.content().iter().map(|c| c.symbol()).collect();
        assert!(text.contains("LINCOLN"));
        assert!(text.contains("Via Lincoln St"));
    }
}
