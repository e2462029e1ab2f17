//! Bar figure rendered as a ratatui bar chart, one palette-colored bar per category.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::Line,
    widgets::{Bar, BarChart, BarGroup, Widget},
};

use crate::charts::{text_color_on, BarFigure};
use crate::config::Theme;

const BAR_GAP: u16 = 2;

pub struct BarFigureWidget<'a> {
    figure: &'a BarFigure,
    theme: &'a Theme,
}

impl<'a> BarFigureWidget<'a> {
    pub fn new(figure: &'a BarFigure, theme: &'a Theme) -> Self {
        Self { figure, theme }
    }

    /// Wide enough for the longest annotation, but never wider than the area allows.
    fn bar_width(&self, area: Rect) -> u16 {
        let n = self.figure.bars.len().max(1) as u16;
        let available = area.width.saturating_sub(BAR_GAP * n) / n;
        let wanted = self
            .figure
            .bars
            .iter()
            .map(|b| b.label.chars().count().max(b.category.chars().count()) as u16)
            .max()
            .unwrap_or(1)
            + 2;
        wanted.min(available).max(1)
    }
}

/// Bar height on the terminal's integer scale; revenue is rounded to whole units.
pub fn bar_height(value: f64) -> u64 {
    if value.is_finite() && value > 0.0 {
        value.round() as u64
    } else {
        0
    }
}

impl Widget for BarFigureWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let bars: Vec<Bar> = self
            .figure
            .bars
            .iter()
            .map(|b| {
                let color = self.theme.palette(b.color);
                let text = self.theme.palette(text_color_on(b.color));
                Bar::default()
                    .value(bar_height(b.value))
                    .text_value(b.label.clone())
                    .label(Line::from(b.category))
                    .style(Style::default().fg(color))
                    .value_style(
                        Style::default()
                            .fg(text)
                            .bg(color)
                            .add_modifier(Modifier::BOLD),
                    )
            })
            .collect();

        BarChart::default()
            .data(BarGroup::default().bars(&bars))
            .bar_width(self.bar_width(area))
            .bar_gap(BAR_GAP)
            .label_style(Style::default().fg(self.theme.get("text_primary")))
            .render(area, buf);
    }
}
