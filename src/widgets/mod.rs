pub mod bar_chart;
pub mod chart_panel;
pub mod controls;
pub mod debug;
pub mod heatmap;
pub mod metrics;
pub mod preview;
pub mod sidebar;
