use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

use crate::config::Theme;
use crate::sidebar::{Sidebar, SidebarFocus};

/// Filters panel: one labelled value per selector plus the save checkbox.
pub struct SidebarView<'a> {
    sidebar: &'a Sidebar,
    output_dir: String,
    theme: &'a Theme,
}

impl<'a> SidebarView<'a> {
    pub fn new(sidebar: &'a Sidebar, output_dir: String, theme: &'a Theme) -> Self {
        Self {
            sidebar,
            output_dir,
            theme,
        }
    }
}

impl Widget for SidebarView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let focus_color = self.theme.get("sidebar_focus");
        let text_primary = self.theme.get("text_primary");
        let text_secondary = self.theme.get("text_secondary");

        let mut lines = Vec::new();
        for (i, selector) in self.sidebar.selectors.iter().enumerate() {
            let focused = self.sidebar.focus == SidebarFocus::Selector(i);
            lines.push(Line::from(Span::styled(
                selector.field.label(),
                Style::default().fg(text_secondary),
            )));
            let value_style = if focused {
                Style::default().fg(focus_color).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(text_primary)
            };
            lines.push(Line::from(vec![
                Span::styled(if focused { "◀ " } else { "  " }, value_style),
                Span::styled(selector.current().label().to_string(), value_style),
                Span::styled(if focused { " ▶" } else { "" }, value_style),
                Span::styled(
                    format!("  ({}/{})", selector.selected + 1, selector.options.len()),
                    Style::default().fg(text_secondary),
                ),
            ]));
            lines.push(Line::default());
        }

        let save_focused = self.sidebar.focus == SidebarFocus::SaveCharts;
        let checkbox = if self.sidebar.save_charts { "[x]" } else { "[ ]" };
        let save_style = if save_focused {
            Style::default().fg(focus_color).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(text_primary)
        };
        lines.push(Line::from(Span::styled(
            format!("{} Save charts to {}", checkbox, self.output_dir),
            save_style,
        )));

        Paragraph::new(lines)
            .wrap(ratatui::widgets::Wrap { trim: false })
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(self.theme.get("table_border")))
                    .title(" Filters "),
            )
            .render(area, buf);
    }
}
