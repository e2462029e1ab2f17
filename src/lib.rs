use crossterm::event::{KeyCode, KeyEvent, KeyEventKind};
use log::{debug, warn};
use std::sync::mpsc::Sender;

use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Tabs, Wrap};
use ratatui::{buffer::Buffer, layout::Rect, widgets::Widget};

pub mod cache;
pub mod categories;
pub mod chart_export;
pub mod charts;
pub mod cli;
pub mod config;
pub mod dashboard;
pub mod dataset;
pub mod error;
pub mod error_display;
pub mod filter;
pub mod logging;
pub mod sidebar;
pub mod summary;
pub mod widgets;

pub use cache::CacheManager;
pub use chart_export::{save_figure, ChartExportFormat, ExportOptions};
pub use charts::{ChartKind, ChartOptions, ChartSpec, Figure, CHARTS};
pub use cli::Args;
pub use config::{AppConfig, ColorParser, ConfigManager, Theme};
pub use dashboard::{
    ChartOutcome, ChartReport, Dashboard, DashboardReport, DashboardSettings, SectionReport,
    DASHBOARD_TITLE, SECTIONS,
};
pub use dataset::{load_dataset, DatasetCache, LoadOptions};
pub use error::DashboardError;
pub use filter::{apply_filters, filter_options, FilterField, FilterSelections, Selection};
pub use summary::{preview, Preview, SummaryMetrics};

use dashboard::log_report;
use sidebar::{Sidebar, SidebarAction};
use widgets::chart_panel::ChartPanel;
use widgets::controls::Controls;
use widgets::debug::DebugState;
use widgets::metrics::MetricsBar;
use widgets::preview::PreviewTable;
use widgets::sidebar::SidebarView;

/// Application name used for config/cache directories and other app-specific paths
pub const APP_NAME: &str = "rfmdash";

const SIDEBAR_WIDTH: u16 = 36;
const PREVIEW_TAB_TITLE: &str = "Data Preview";

#[derive(Debug, Clone)]
pub enum AppEvent {
    Key(KeyEvent),
    /// Read selector choices from the dataset, then render
    Open,
    /// Run one render cycle with the current sidebar state
    Render,
    Exit,
    Crash(String),
    Resize(u16, u16), // resized (width, height)
}

pub struct App {
    events: Sender<AppEvent>,
    dashboard: Dashboard,
    sidebar: Sidebar,
    /// Selections requested on the command line, applied once the choices are known
    pending_selections: Option<FilterSelections>,
    options_loaded: bool,
    tab: usize,
    report: Option<DashboardReport>,
    fatal: Option<String>,
    theme: Theme,
    debug: DebugState,
}

impl App {
    pub fn new(events: Sender<AppEvent>, dashboard: Dashboard, theme: Theme) -> App {
        App {
            events,
            dashboard,
            sidebar: Sidebar::new(false),
            pending_selections: None,
            options_loaded: false,
            tab: 0,
            report: None,
            fatal: None,
            theme,
            debug: DebugState::default(),
        }
    }

    pub fn with_save_charts(mut self, save: bool) -> Self {
        self.sidebar.save_charts = save;
        self
    }

    pub fn with_initial_selections(mut self, selections: FilterSelections) -> Self {
        self.pending_selections = Some(selections);
        self
    }

    pub fn enable_debug(&mut self) {
        self.debug.enabled = true;
    }

    pub fn send_event(&mut self, event: AppEvent) -> color_eyre::Result<()> {
        self.events.send(event)?;
        Ok(())
    }

    pub fn sidebar(&self) -> &Sidebar {
        &self.sidebar
    }

    pub fn report(&self) -> Option<&DashboardReport> {
        self.report.as_ref()
    }

    /// Message of the error that stopped the last render cycle
    pub fn fatal_error(&self) -> Option<&str> {
        self.fatal.as_deref()
    }

    pub fn tab(&self) -> usize {
        self.tab
    }

    fn tab_count() -> usize {
        SECTIONS.len() + 1
    }

    fn load_filter_options(&mut self) {
        for field in FilterField::ALL {
            match self.dashboard.filter_options(field) {
                Ok(options) => self.sidebar.set_options(field, options),
                Err(e) => {
                    debug!("filter options unavailable: {}", e);
                    return;
                }
            }
        }
        self.options_loaded = true;

        if let Some(pending) = self.pending_selections.take() {
            for field in FilterField::ALL {
                let wanted = pending.get(field);
                if !wanted.is_all() && !self.sidebar.select(field, wanted) {
                    warn!(
                        "{} \"{}\" is not in the data; keeping All",
                        field.label(),
                        wanted.label()
                    );
                }
            }
        }
    }

    fn render_cycle(&mut self) {
        if !self.options_loaded {
            self.load_filter_options();
        }
        let selections = self.sidebar.selections();
        match self
            .dashboard
            .render_cycle(&selections, self.sidebar.save_charts)
        {
            Ok(report) => {
                log_report(&report);
                self.fatal = None;
                self.report = Some(report);
            }
            Err(e) => {
                warn!("render cycle failed: {}", e);
                self.fatal = Some(e.to_string());
                self.report = None;
            }
        }
        self.debug.num_cycles = self.dashboard.cycles();
        self.debug.num_reads = self.dashboard.cache().reads();
    }

    fn key(&mut self, event: &KeyEvent) -> Option<AppEvent> {
        if event.kind != KeyEventKind::Press {
            return None;
        }
        self.debug.on_key(event);

        match event.code {
            KeyCode::Char('q') | KeyCode::Esc => Some(AppEvent::Exit),
            KeyCode::Tab => {
                self.tab = (self.tab + 1) % Self::tab_count();
                self.debug.last_action = "next_tab".to_string();
                None
            }
            KeyCode::BackTab => {
                self.tab = (self.tab + Self::tab_count() - 1) % Self::tab_count();
                self.debug.last_action = "prev_tab".to_string();
                None
            }
            KeyCode::Char(c @ '1'..='9') => {
                let index = c as usize - '1' as usize;
                if index < Self::tab_count() {
                    self.tab = index;
                    self.debug.last_action = format!("tab_{}", c);
                }
                None
            }
            _ => match self.sidebar.handle_key(event) {
                SidebarAction::Changed => {
                    self.debug.last_action = "selection_changed".to_string();
                    Some(AppEvent::Render)
                }
                SidebarAction::Moved => {
                    self.debug.last_action = "focus_moved".to_string();
                    None
                }
                SidebarAction::Ignored => None,
            },
        }
    }

    pub fn event(&mut self, event: &AppEvent) -> Option<AppEvent> {
        self.debug.num_events += 1;
        match event {
            AppEvent::Key(key) => self.key(key),
            AppEvent::Open => {
                self.load_filter_options();
                Some(AppEvent::Render)
            }
            AppEvent::Render => {
                self.render_cycle();
                None
            }
            AppEvent::Resize(_, _) => None,
            AppEvent::Exit | AppEvent::Crash(_) => None,
        }
    }

    fn render_title(&self, area: Rect, buf: &mut Buffer) {
        let data = self.dashboard.settings().data_path.display().to_string();
        Paragraph::new(Line::from(vec![
            Span::styled(
                DASHBOARD_TITLE,
                Style::default()
                    .fg(self.theme.get("primary"))
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!("  {}", data),
                Style::default().fg(self.theme.get("text_secondary")),
            ),
        ]))
        .render(area, buf);
    }

    fn render_fatal(&self, message: &str, area: Rect, buf: &mut Buffer) {
        Paragraph::new(message.to_string())
            .style(
                Style::default()
                    .fg(self.theme.get("error"))
                    .add_modifier(Modifier::BOLD),
            )
            .wrap(Wrap { trim: true })
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(self.theme.get("error")))
                    .title(" Error "),
            )
            .render(area, buf);
    }

    fn render_content(&self, area: Rect, buf: &mut Buffer) {
        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(1), Constraint::Fill(1)])
            .split(area);

        let titles: Vec<&str> = SECTIONS
            .iter()
            .map(|s| s.title)
            .chain(std::iter::once(PREVIEW_TAB_TITLE))
            .collect();
        Tabs::new(titles)
            .select(self.tab)
            .style(Style::default().fg(self.theme.get("text_secondary")))
            .highlight_style(
                Style::default()
                    .fg(self.theme.get("primary"))
                    .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
            )
            .divider(" | ")
            .render(layout[0], buf);

        let Some(report) = &self.report else {
            Paragraph::new("Loading...")
                .style(Style::default().fg(self.theme.get("dimmed")))
                .render(layout[1], buf);
            return;
        };

        match report.sections.get(self.tab) {
            Some(section) => {
                let parts = Layout::default()
                    .direction(Direction::Vertical)
                    .constraints([Constraint::Length(2), Constraint::Fill(1)])
                    .split(layout[1]);
                Paragraph::new(section.description)
                    .style(Style::default().fg(self.theme.get("text_secondary")))
                    .wrap(Wrap { trim: true })
                    .render(parts[0], buf);

                let n = section.charts.len().max(1) as u32;
                let slots = Layout::default()
                    .direction(Direction::Horizontal)
                    .constraints((0..n).map(|_| Constraint::Ratio(1, n)))
                    .split(parts[1]);
                for (chart, slot) in section.charts.iter().zip(slots.iter()) {
                    ChartPanel::new(chart, &self.theme).render(*slot, buf);
                }
            }
            None => {
                let block = Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(self.theme.get("table_border")))
                    .title(format!(
                        " {} (first {} rows) ",
                        PREVIEW_TAB_TITLE,
                        self.dashboard.settings().preview_rows
                    ));
                let inner = block.inner(layout[1]);
                block.render(layout[1], buf);
                PreviewTable::new(&report.preview, &self.theme).render(inner, buf);
            }
        }
    }
}

impl Widget for &mut App {
    fn render(self, area: Rect, buf: &mut Buffer) {
        self.debug.num_frames += 1;

        let fatal = self.fatal.clone();
        let mut constraints = vec![Constraint::Length(1)];
        if fatal.is_none() {
            constraints.push(Constraint::Length(3)); // Metrics
        }
        constraints.push(Constraint::Fill(1));
        constraints.push(Constraint::Length(1)); // Controls
        if self.debug.enabled {
            constraints.push(Constraint::Length(1));
        }
        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints(constraints)
            .split(area);

        self.render_title(layout[0], buf);

        let controls_index = if let Some(message) = &fatal {
            self.render_fatal(message, layout[1], buf);
            2
        } else {
            MetricsBar::new(self.report.as_ref().map(|r| &r.metrics), &self.theme)
                .render(layout[1], buf);

            let main = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Length(SIDEBAR_WIDTH), Constraint::Fill(1)])
                .split(layout[2]);
            SidebarView::new(
                &self.sidebar,
                self.dashboard.settings().output_dir.display().to_string(),
                &self.theme,
            )
            .render(main[0], buf);
            self.render_content(main[1], buf);
            3
        };

        let controls = Controls::new()
            .with_row_count(self.report.as_ref().map(|r| r.metrics.rows))
            .with_dimmed(fatal.is_some())
            .with_bg(self.theme.get("controls_bg"))
            .with_fg(self.theme.get("dimmed"), self.theme.get("text_primary"));
        (&controls).render(layout[controls_index], buf);

        if self.debug.enabled {
            (&self.debug).render(layout[layout.len() - 1], buf);
        }
    }
}
