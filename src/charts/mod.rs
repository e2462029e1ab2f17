//! Chart descriptors and the figure models the four builders produce.
//!
//! Builders are pure: table in, [`Figure`] out. Drawing a figure (terminal widget or image file)
//! happens elsewhere.

use polars::prelude::*;
use serde::Serialize;

use crate::categories::{Rgb, MONETARY_SALES_COLUMN, SHIP_BUCKET, VALUE_TIER};

pub mod bars;
pub mod heatmap;

pub use bars::{format_currency, format_percent, Bar, BarFigure};
pub use heatmap::HeatmapFigure;

/// What a builder produced.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Figure {
    Bar(BarFigure),
    Heatmap(HeatmapFigure),
}

impl Figure {
    pub fn title(&self) -> &str {
        match self {
            Figure::Bar(f) => f.title,
            Figure::Heatmap(f) => f.title,
        }
    }
}

/// Label formatting knobs that come from configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChartOptions {
    pub currency_symbol: String,
}

impl Default for ChartOptions {
    fn default() -> Self {
        Self {
            currency_symbol: "£".to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartKind {
    ValueTierCount,
    ValueTierRevenue,
    ShipBucketCount,
    ValueShipHeatmap,
}

/// Static description of one chart: what it needs and where it is saved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChartSpec {
    pub kind: ChartKind,
    pub number: u8,
    pub subtitle: &'static str,
    pub required_columns: &'static [&'static str],
    pub file_name: &'static str,
}

pub const CHARTS: [ChartSpec; 4] = [
    ChartSpec {
        kind: ChartKind::ValueTierCount,
        number: 1,
        subtitle: "Customer Distribution by RFM Value Tier",
        required_columns: &[VALUE_TIER.column],
        file_name: "01_customer_distribution_by_value_tier.png",
    },
    ChartSpec {
        kind: ChartKind::ValueTierRevenue,
        number: 2,
        subtitle: "Total Revenue Contribution by RFM Value Tier",
        required_columns: &[VALUE_TIER.column, MONETARY_SALES_COLUMN],
        file_name: "02_revenue_by_value_tier.png",
    },
    ChartSpec {
        kind: ChartKind::ShipBucketCount,
        number: 3,
        subtitle: "Customer Distribution by Shipping Reliability",
        required_columns: &[SHIP_BUCKET.column],
        file_name: "03_customer_distribution_by_shipping.png",
    },
    ChartSpec {
        kind: ChartKind::ValueShipHeatmap,
        number: 4,
        subtitle: "Value Tier × Shipping Reliability Heatmap (%)",
        required_columns: &[VALUE_TIER.column, SHIP_BUCKET.column],
        file_name: "04_value_tier_x_shipping_heatmap.png",
    },
];

impl ChartKind {
    pub fn spec(self) -> &'static ChartSpec {
        match self {
            ChartKind::ValueTierCount => &CHARTS[0],
            ChartKind::ValueTierRevenue => &CHARTS[1],
            ChartKind::ShipBucketCount => &CHARTS[2],
            ChartKind::ValueShipHeatmap => &CHARTS[3],
        }
    }
}

impl ChartSpec {
    /// "Chart 1: Customer Distribution by RFM Value Tier"
    pub fn heading(&self) -> String {
        format!("Chart {}: {}", self.number, self.subtitle)
    }

    /// Required columns that `df` lacks, in declaration order.
    pub fn missing_columns(&self, df: &DataFrame) -> Vec<&'static str> {
        self.required_columns
            .iter()
            .copied()
            .filter(|c| df.get_column_index(c).is_none())
            .collect()
    }

    /// Run the builder. Callers check [`ChartSpec::missing_columns`] first.
    pub fn build(&self, df: &DataFrame, options: &ChartOptions) -> PolarsResult<Figure> {
        Ok(match self.kind {
            ChartKind::ValueTierCount => Figure::Bar(bars::category_count_chart(
                df,
                &VALUE_TIER,
                "Customer Distribution by RFM Value Tier",
            )?),
            ChartKind::ValueTierRevenue => Figure::Bar(bars::value_tier_revenue_chart(
                df,
                &options.currency_symbol,
            )?),
            ChartKind::ShipBucketCount => Figure::Bar(bars::category_count_chart(
                df,
                &SHIP_BUCKET,
                "Customer Distribution by Shipping Reliability",
            )?),
            ChartKind::ValueShipHeatmap => Figure::Heatmap(heatmap::value_vs_shipping_heatmap(df)?),
        })
    }
}

/// Inline warning shown instead of a chart whose columns are absent.
pub fn missing_columns_warning(missing: &[&str]) -> String {
    match missing {
        [one] => format!("Missing column: {}", one),
        many => format!("Missing columns: {}", many.join(", ")),
    }
}

/// Readable text color on top of `background`.
pub fn text_color_on(background: Rgb) -> Rgb {
    if background.luminance() > 0.5 {
        Rgb(0x26, 0x26, 0x26)
    } else {
        Rgb(0xFF, 0xFF, 0xFF)
    }
}
