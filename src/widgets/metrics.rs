use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

use crate::config::Theme;
use crate::summary::{format_thousands, SummaryMetrics};

/// Rows / Columns / Missing cells, side by side.
pub struct MetricsBar<'a> {
    metrics: Option<&'a SummaryMetrics>,
    theme: &'a Theme,
}

impl<'a> MetricsBar<'a> {
    pub fn new(metrics: Option<&'a SummaryMetrics>, theme: &'a Theme) -> Self {
        Self { metrics, theme }
    }
}

impl Widget for MetricsBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let values = match self.metrics {
            Some(m) => [m.rows, m.columns, m.missing_cells].map(format_thousands),
            None => ["-", "-", "-"].map(String::from),
        };
        let layout = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Ratio(1, 3); 3])
            .split(area);

        for ((name, value), cell) in ["Rows", "Columns", "Missing cells"]
            .iter()
            .zip(values)
            .zip(layout.iter())
        {
            let line = Line::from(vec![
                Span::styled(
                    format!("{}: ", name),
                    Style::default().fg(self.theme.get("text_secondary")),
                ),
                Span::styled(
                    value,
                    Style::default()
                        .fg(self.theme.get("text_primary"))
                        .add_modifier(Modifier::BOLD),
                ),
            ]);
            Paragraph::new(line)
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .border_style(Style::default().fg(self.theme.get("table_border"))),
                )
                .centered()
                .render(*cell, buf);
        }
    }
}
