use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Rect},
    style::{Modifier, Style},
    widgets::{Paragraph, Row, Table, Widget},
};

use crate::config::Theme;
use crate::summary::Preview;

/// First rows of the filtered view as a plain table.
pub struct PreviewTable<'a> {
    preview: &'a Preview,
    theme: &'a Theme,
}

impl<'a> PreviewTable<'a> {
    pub fn new(preview: &'a Preview, theme: &'a Theme) -> Self {
        Self { preview, theme }
    }

    /// Widest of header and cells, capped so one long column cannot push the rest off screen.
    fn column_widths(&self) -> Vec<Constraint> {
        (0..self.preview.headers.len())
            .map(|i| {
                let widest = self
                    .preview
                    .rows
                    .iter()
                    .filter_map(|r| r.get(i))
                    .chain(std::iter::once(&self.preview.headers[i]))
                    .map(|s| s.chars().count())
                    .max()
                    .unwrap_or(1);
                Constraint::Length(widest.min(30) as u16)
            })
            .collect()
    }
}

impl Widget for PreviewTable<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if self.preview.rows.is_empty() {
            Paragraph::new("No rows match the current filters")
                .style(Style::default().fg(self.theme.get("dimmed")))
                .render(area, buf);
            return;
        }

        let header = Row::new(self.preview.headers.iter().map(String::as_str)).style(
            Style::default()
                .fg(self.theme.get("table_header"))
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
        );
        let rows = self
            .preview
            .rows
            .iter()
            .map(|r| Row::new(r.iter().map(String::as_str)));

        Table::new(rows, self.column_widths())
            .header(header)
            .column_spacing(2)
            .render(area, buf);
    }
}
