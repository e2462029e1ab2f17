use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Rect},
    style::{Modifier, Style},
    widgets::{Cell, Row, Table, Widget},
};

use crate::charts::{text_color_on, HeatmapFigure};
use crate::config::Theme;

/// Heatmap figure rendered as a table whose cells are filled with their scale color.
pub struct HeatmapWidget<'a> {
    figure: &'a HeatmapFigure,
    theme: &'a Theme,
}

impl<'a> HeatmapWidget<'a> {
    pub fn new(figure: &'a HeatmapFigure, theme: &'a Theme) -> Self {
        Self { figure, theme }
    }
}

impl Widget for HeatmapWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let header_style = Style::default()
            .fg(self.theme.get("table_header"))
            .add_modifier(Modifier::BOLD);
        let label_width = self
            .figure
            .row_labels
            .iter()
            .map(|l| l.len())
            .max()
            .unwrap_or(0) as u16;

        let header = Row::new(
            std::iter::once(Cell::from(""))
                .chain(self.figure.col_labels.iter().map(|c| Cell::from(*c))),
        )
        .style(header_style);

        let rows = self
            .figure
            .row_labels
            .iter()
            .enumerate()
            .map(|(r, label)| {
                let cells = self.figure.annotations[r].iter().enumerate().map(|(c, text)| {
                    let fill = self.figure.cell_color(r, c);
                    Cell::from(text.as_str()).style(
                        Style::default()
                            .bg(self.theme.palette(fill))
                            .fg(self.theme.palette(text_color_on(fill))),
                    )
                });
                Row::new(std::iter::once(Cell::from(*label).style(header_style)).chain(cells))
                    .height(2)
            });

        let widths = std::iter::once(Constraint::Length(label_width + 1)).chain(
            self.figure
                .col_labels
                .iter()
                .map(|_| Constraint::Fill(1)),
        );

        Table::new(rows, widths)
            .header(header)
            .column_spacing(1)
            .render(area, buf);
    }
}
