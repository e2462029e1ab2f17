//! One render cycle: load, filter, summarize, then build (and optionally save) every chart.

use log::{debug, info, warn};
use serde::Serialize;
use std::fmt;
use std::path::{Path, PathBuf};

use crate::chart_export::{save_figure, ExportOptions};
use crate::charts::{missing_columns_warning, ChartKind, ChartOptions, ChartSpec, Figure};
use crate::config::AppConfig;
use crate::dataset::{DatasetCache, LoadOptions};
use crate::error::DashboardError;
use crate::error_display::user_message_from_write;
use crate::filter::{apply_filters, filter_options, FilterField, FilterSelections, Selection};
use crate::summary::{format_thousands, preview, Preview, SummaryMetrics};
use crate::Args;

pub const DASHBOARD_TITLE: &str = "Automobile Sales Analytics Dashboard";

/// A titled group of charts with its explanatory text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SectionSpec {
    pub title: &'static str,
    pub description: &'static str,
    pub charts: &'static [ChartKind],
}

pub const SECTIONS: [SectionSpec; 3] = [
    SectionSpec {
        title: "Customer Value Overview",
        description: "This section highlights how customers are distributed across RFM value \
                      tiers and how much revenue each tier contributes.",
        charts: &[ChartKind::ValueTierCount, ChartKind::ValueTierRevenue],
    },
    SectionSpec {
        title: "Logistics Risk & Reliability",
        description: "This section shows how customers are distributed across shipping \
                      reliability buckets, helping identify operational risk.",
        charts: &[ChartKind::ShipBucketCount],
    },
    SectionSpec {
        title: "Value × Logistics Interaction",
        description: "This heatmap shows how customer value tiers intersect with shipping \
                      reliability, revealing high-value customers at operational risk.",
        charts: &[ChartKind::ValueShipHeatmap],
    },
];

/// Everything a render cycle needs besides the selections.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardSettings {
    pub data_path: PathBuf,
    pub load_options: LoadOptions,
    pub output_dir: PathBuf,
    pub chart_options: ChartOptions,
    pub export_options: ExportOptions,
    pub preview_rows: usize,
}

impl DashboardSettings {
    pub fn new(data_path: impl Into<PathBuf>) -> Self {
        Self {
            data_path: data_path.into(),
            load_options: LoadOptions::default(),
            output_dir: PathBuf::from("assets/screenshots"),
            chart_options: ChartOptions::default(),
            export_options: ExportOptions::default(),
            preview_rows: 25,
        }
    }

    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }

    pub fn with_load_options(mut self, options: LoadOptions) -> Self {
        self.load_options = options;
        self
    }

    /// CLI values win over config values, which win over built-in defaults.
    pub fn from_args_and_config(args: &Args, config: &AppConfig) -> Self {
        let data_path = args
            .path
            .clone()
            .unwrap_or_else(|| PathBuf::from(&config.data.path));
        let output_dir = args
            .output_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from(&config.output.dir));
        Self {
            data_path,
            load_options: LoadOptions::from_args_and_config(args, config),
            output_dir,
            chart_options: ChartOptions {
                currency_symbol: config.output.currency_symbol.clone(),
            },
            export_options: ExportOptions {
                bar_size: (config.output.bar_size[0], config.output.bar_size[1]),
                heatmap_size: (config.output.heatmap_size[0], config.output.heatmap_size[1]),
            },
            preview_rows: config.display.preview_rows,
        }
    }

    /// Where `spec`'s image goes when saving is enabled.
    pub fn output_path(&self, spec: &ChartSpec) -> PathBuf {
        self.output_dir.join(spec.file_name)
    }
}

/// Result of one chart in one cycle.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ChartOutcome {
    Rendered {
        figure: Figure,
        saved_to: Option<PathBuf>,
        /// Set when saving was requested but failed; the figure is still shown.
        save_warning: Option<String>,
    },
    Warning {
        message: String,
    },
}

impl ChartOutcome {
    pub fn figure(&self) -> Option<&Figure> {
        match self {
            ChartOutcome::Rendered { figure, .. } => Some(figure),
            ChartOutcome::Warning { .. } => None,
        }
    }

    /// The missing-column warning or the save failure, if any.
    pub fn warning(&self) -> Option<&str> {
        match self {
            ChartOutcome::Rendered { save_warning, .. } => save_warning.as_deref(),
            ChartOutcome::Warning { message } => Some(message),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartReport {
    pub kind: ChartKind,
    pub heading: String,
    #[serde(flatten)]
    pub outcome: ChartOutcome,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SectionReport {
    pub title: &'static str,
    pub description: &'static str,
    pub charts: Vec<ChartReport>,
}

/// Output of a successful render cycle.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardReport {
    pub data_path: PathBuf,
    pub selections: FilterSelections,
    pub metrics: SummaryMetrics,
    pub preview: Preview,
    pub sections: Vec<SectionReport>,
}

impl DashboardReport {
    pub fn charts(&self) -> impl Iterator<Item = &ChartReport> {
        self.sections.iter().flat_map(|s| s.charts.iter())
    }

    pub fn chart(&self, kind: ChartKind) -> Option<&ChartReport> {
        self.charts().find(|c| c.kind == kind)
    }

    pub fn saved_paths(&self) -> Vec<&Path> {
        self.charts()
            .filter_map(|c| match &c.outcome {
                ChartOutcome::Rendered {
                    saved_to: Some(p), ..
                } => Some(p.as_path()),
                _ => None,
            })
            .collect()
    }

    pub fn warnings(&self) -> Vec<&str> {
        self.charts().filter_map(|c| c.outcome.warning()).collect()
    }
}

pub struct Dashboard {
    settings: DashboardSettings,
    cache: DatasetCache,
    cycles: usize,
}

impl Dashboard {
    pub fn new(settings: DashboardSettings) -> Self {
        Self {
            settings,
            cache: DatasetCache::new(),
            cycles: 0,
        }
    }

    pub fn settings(&self) -> &DashboardSettings {
        &self.settings
    }

    pub fn cache(&self) -> &DatasetCache {
        &self.cache
    }

    /// Render cycles run so far, failed ones included.
    pub fn cycles(&self) -> usize {
        self.cycles
    }

    /// Selector choices for `field`, drawn from the unfiltered table.
    pub fn filter_options(&mut self, field: FilterField) -> Result<Vec<Selection>, DashboardError> {
        let df = self
            .cache
            .get_or_load(&self.settings.data_path, &self.settings.load_options)?;
        Ok(filter_options(&df, field)?)
    }

    /// Run the whole pipeline once. Only a missing or unreadable file (or a polars failure while
    /// filtering) fails the cycle; per-chart problems become warnings in the report.
    pub fn render_cycle(
        &mut self,
        selections: &FilterSelections,
        save: bool,
    ) -> Result<DashboardReport, DashboardError> {
        self.cycles += 1;
        let path = self.settings.data_path.clone();
        // Checked every cycle, even when the table is cached.
        if !path.exists() {
            warn!("dataset {} does not exist", path.display());
            return Err(DashboardError::DatasetNotFound(path));
        }
        let full = self.cache.get_or_load(&path, &self.settings.load_options)?;

        let view = apply_filters(&full, selections)?;
        debug!(
            "cycle {}: {} of {} rows after filters",
            self.cycles,
            view.height(),
            full.height()
        );
        let metrics = SummaryMetrics::compute(&view)?;
        let preview = preview(&view, self.settings.preview_rows)?;

        let sections = SECTIONS
            .iter()
            .map(|section| SectionReport {
                title: section.title,
                description: section.description,
                charts: section
                    .charts
                    .iter()
                    .map(|kind| self.chart_report(kind.spec(), &view, save))
                    .collect(),
            })
            .collect();

        Ok(DashboardReport {
            data_path: path,
            selections: selections.clone(),
            metrics,
            preview,
            sections,
        })
    }

    fn chart_report(
        &self,
        spec: &ChartSpec,
        view: &polars::prelude::DataFrame,
        save: bool,
    ) -> ChartReport {
        ChartReport {
            kind: spec.kind,
            heading: spec.heading(),
            outcome: self.chart_outcome(spec, view, save),
        }
    }

    fn chart_outcome(
        &self,
        spec: &ChartSpec,
        view: &polars::prelude::DataFrame,
        save: bool,
    ) -> ChartOutcome {
        let missing = spec.missing_columns(view);
        if !missing.is_empty() {
            let message = missing_columns_warning(&missing);
            debug!("chart {} skipped: {}", spec.number, message);
            return ChartOutcome::Warning { message };
        }

        let figure = match spec.build(view, &self.settings.chart_options) {
            Ok(figure) => figure,
            Err(e) => {
                warn!("chart {} failed: {}", spec.number, e);
                return ChartOutcome::Warning {
                    message: crate::error_display::user_message_from_polars(&e),
                };
            }
        };

        let target = save.then(|| self.settings.output_path(spec));
        let (saved_to, save_warning) =
            match save_figure(&figure, target.as_deref(), &self.settings.export_options) {
                Ok(saved) => (saved, None),
                Err(report) => {
                    let message = match target.as_deref() {
                        Some(path) => user_message_from_write(&report, path),
                        None => report.to_string(),
                    };
                    warn!("saving chart {} failed: {}", spec.number, message);
                    (None, Some(message))
                }
            };

        ChartOutcome::Rendered {
            figure,
            saved_to,
            save_warning,
        }
    }
}

impl fmt::Display for DashboardReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", DASHBOARD_TITLE)?;
        writeln!(f, "Data: {}", self.data_path.display())?;
        let filters: Vec<String> = FilterField::ALL
            .iter()
            .map(|field| format!("{} = {}", field.label(), self.selections.get(*field).label()))
            .collect();
        writeln!(f, "Filters: {}", filters.join(", "))?;
        writeln!(
            f,
            "Rows: {}  Columns: {}  Missing cells: {}",
            format_thousands(self.metrics.rows),
            format_thousands(self.metrics.columns),
            format_thousands(self.metrics.missing_cells)
        )?;

        for section in &self.sections {
            writeln!(f)?;
            writeln!(f, "== {} ==", section.title)?;
            writeln!(f, "{}", section.description)?;
            for chart in &section.charts {
                writeln!(f)?;
                writeln!(f, "{}", chart.heading)?;
                match &chart.outcome {
                    ChartOutcome::Warning { message } => writeln!(f, "  warning: {}", message)?,
                    ChartOutcome::Rendered {
                        figure,
                        saved_to,
                        save_warning,
                    } => {
                        write_figure(f, figure)?;
                        if let Some(path) = saved_to {
                            writeln!(f, "  saved: {}", path.display())?;
                        }
                        if let Some(message) = save_warning {
                            writeln!(f, "  warning: {}", message)?;
                        }
                    }
                }
            }
        }
        Ok(())
    }
}

fn write_figure(f: &mut fmt::Formatter<'_>, figure: &Figure) -> fmt::Result {
    match figure {
        Figure::Bar(bar) => {
            let width = bar.bars.iter().map(|b| b.category.len()).max().unwrap_or(0);
            for b in &bar.bars {
                writeln!(f, "  {:<width$}  {}", b.category, b.label, width = width)?;
            }
        }
        Figure::Heatmap(heat) => {
            let width = heat.row_labels.iter().map(|l| l.len()).max().unwrap_or(0);
            write!(f, "  {:<width$}", "", width = width)?;
            for col in &heat.col_labels {
                write!(f, "  {:>12}", col)?;
            }
            writeln!(f)?;
            for (label, row) in heat.row_labels.iter().zip(&heat.annotations) {
                write!(f, "  {:<width$}", label, width = width)?;
                for cell in row {
                    write!(f, "  {:>12}", cell)?;
                }
                writeln!(f)?;
            }
        }
    }
    Ok(())
}

/// Log a one-line summary of a finished cycle.
pub fn log_report(report: &DashboardReport) {
    info!(
        "rendered {} rows, {} charts, {} warnings, {} saved",
        report.metrics.rows,
        report.charts().filter(|c| c.outcome.figure().is_some()).count(),
        report.warnings().len(),
        report.saved_paths().len()
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::charts::CHARTS;

    #[test]
    fn sections_cover_every_chart_once_in_order() {
        let kinds: Vec<ChartKind> = SECTIONS.iter().flat_map(|s| s.charts.iter().copied()).collect();
        let expected: Vec<ChartKind> = CHARTS.iter().map(|c| c.kind).collect();
        assert_eq!(kinds, expected);
    }

    #[test]
    fn output_paths_use_fixed_names() {
        let settings = DashboardSettings::new("data.csv").with_output_dir("out");
        assert_eq!(
            settings.output_path(ChartKind::ValueShipHeatmap.spec()),
            PathBuf::from("out/04_value_tier_x_shipping_heatmap.png")
        );
    }

    #[test]
    fn missing_file_fails_every_cycle() {
        let dir = tempfile::tempdir().unwrap();
        let mut dashboard = Dashboard::new(DashboardSettings::new(dir.path().join("rfm.csv")));
        for _ in 0..2 {
            let err = dashboard
                .render_cycle(&FilterSelections::new(), false)
                .unwrap_err();
            assert!(matches!(err, DashboardError::DatasetNotFound(_)));
        }
        assert_eq!(dashboard.cycles(), 2);
    }

    #[test]
    fn text_report_lists_bars_and_warnings() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rfm.csv");
        std::fs::write(
            &path,
            "value_tier\nHigh Value\nHigh Value\nMid Value\nLow Value\n",
        )
        .unwrap();
        let mut dashboard = Dashboard::new(DashboardSettings::new(&path));
        let report = dashboard
            .render_cycle(&FilterSelections::new(), false)
            .unwrap();
        let text = report.to_string();
        assert!(text.starts_with(DASHBOARD_TITLE));
        assert!(text.contains("Rows: 4  Columns: 1  Missing cells: 0"));
        assert!(text.contains("  High Value  50.0%"));
        assert!(text.contains("warning: Missing column: monetary_sales"));
        assert!(text.contains("warning: Missing column: ship_bucket"));
        assert!(text.contains("== Value × Logistics Interaction =="));
    }
}
