//! One chart slot: heading, then the figure, or the warning that replaces it.

use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Paragraph, Widget, Wrap},
};

use crate::charts::Figure;
use crate::config::Theme;
use crate::dashboard::{ChartOutcome, ChartReport};
use crate::widgets::bar_chart::BarFigureWidget;
use crate::widgets::heatmap::HeatmapWidget;

pub struct ChartPanel<'a> {
    chart: &'a ChartReport,
    theme: &'a Theme,
}

impl<'a> ChartPanel<'a> {
    pub fn new(chart: &'a ChartReport, theme: &'a Theme) -> Self {
        Self { chart, theme }
    }
}

impl Widget for ChartPanel<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let mut block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(self.theme.get("table_border")))
            .title(format!(" {} ", self.chart.heading));

        if let ChartOutcome::Rendered {
            saved_to: Some(path),
            ..
        } = &self.chart.outcome
        {
            block = block.title_bottom(
                Line::from(format!(" saved: {} ", path.display()))
                    .right_aligned()
                    .style(Style::default().fg(self.theme.get("success"))),
            );
        }
        let inner = block.inner(area);
        block.render(area, buf);

        match &self.chart.outcome {
            ChartOutcome::Warning { message } => {
                render_warning(message, self.theme, inner, buf);
            }
            ChartOutcome::Rendered {
                figure,
                save_warning,
                ..
            } => {
                let mut figure_area = inner;
                if let Some(message) = save_warning {
                    let parts = Layout::default()
                        .direction(Direction::Vertical)
                        .constraints([Constraint::Fill(1), Constraint::Length(1)])
                        .split(inner);
                    figure_area = parts[0];
                    render_warning(message, self.theme, parts[1], buf);
                }
                match figure {
                    Figure::Bar(bar) => BarFigureWidget::new(bar, self.theme).render(figure_area, buf),
                    Figure::Heatmap(heat) => {
                        HeatmapWidget::new(heat, self.theme).render(figure_area, buf)
                    }
                }
            }
        }
    }
}

fn render_warning(message: &str, theme: &Theme, area: Rect, buf: &mut Buffer) {
    Paragraph::new(format!("⚠ {}", message))
        .style(
            Style::default()
                .fg(theme.get("warning"))
                .add_modifier(Modifier::BOLD),
        )
        .wrap(Wrap { trim: true })
        .render(area, buf);
}
