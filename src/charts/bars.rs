//! Bar chart builders: customers per category and revenue per value tier.

use polars::prelude::*;
use serde::Serialize;

use crate::categories::{Dimension, Rgb, MONETARY_SALES_COLUMN, VALUE_TIER};
use crate::summary::group_digits;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Bar {
    pub category: &'static str,
    pub color: Rgb,
    pub value: f64,
    /// Annotation drawn above the bar.
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BarFigure {
    pub title: &'static str,
    pub x_label: &'static str,
    pub y_label: &'static str,
    /// One bar per category of the dimension, in its fixed order.
    pub bars: Vec<Bar>,
}

impl BarFigure {
    pub fn max_value(&self) -> f64 {
        self.bars
            .iter()
            .map(|b| b.value)
            .filter(|v| v.is_finite())
            .fold(0.0, f64::max)
    }
}

/// Per-category aggregate of `df` grouped by `dimension`, in the dimension's order: the row count
/// when `value` is `None`, otherwise the sum of `value`. Categories absent from `df` (or outside the
/// fixed order) get 0.
fn totals_by_category(
    df: &DataFrame,
    dimension: &Dimension,
    value: Option<Expr>,
) -> PolarsResult<Vec<f64>> {
    let mut select = vec![col(dimension.column).cast(DataType::String).alias("category")];
    let aggregate = match value {
        Some(expr) => {
            select.push(expr.alias("value"));
            col("value").sum()
        }
        None => len(),
    };

    let grouped = df
        .clone()
        .lazy()
        .select(select)
        .group_by([col("category")])
        .agg([aggregate.alias("total")])
        .collect()?;

    let mut totals = vec![0.0; dimension.len()];
    let categories = grouped.column("category")?.str()?;
    let values = grouped.column("total")?.cast(&DataType::Float64)?;
    for (category, value) in categories.into_iter().zip(values.f64()?.into_iter()) {
        if let Some(idx) = category.and_then(|c| dimension.position(c)) {
            totals[idx] = value.unwrap_or(0.0);
        }
    }
    Ok(totals)
}

/// Rows per category of `dimension`, in its fixed order (zero for absent categories).
pub fn count_by_category(df: &DataFrame, dimension: &Dimension) -> PolarsResult<Vec<usize>> {
    let counts = totals_by_category(df, dimension, None)?;
    Ok(counts.into_iter().map(|c| c as usize).collect())
}

/// Sum of `monetary_sales` per value tier; nulls and unparseable values are skipped.
pub fn revenue_by_value_tier(df: &DataFrame) -> PolarsResult<Vec<f64>> {
    totals_by_category(
        df,
        &VALUE_TIER,
        Some(col(MONETARY_SALES_COLUMN).cast(DataType::Float64)),
    )
}

/// `count / total * 100` with one decimal; `0.0%` when the table is empty.
pub fn format_percent(count: usize, total: usize) -> String {
    let percent = if total == 0 {
        0.0
    } else {
        count as f64 / total as f64 * 100.0
    };
    format!("{:.1}%", percent)
}

/// Whole currency units with thousands separators: `£1,234,567`.
pub fn format_currency(value: f64, symbol: &str) -> String {
    if !value.is_finite() {
        return format!("{}{}", symbol, value);
    }
    let rounded = value.round();
    let sign = if rounded < 0.0 { "-" } else { "" };
    let digits = format!("{:.0}", rounded.abs());
    format!("{}{}{}", symbol, sign, group_digits(&digits))
}

/// Customers per category with percentage-of-rows annotations.
///
/// The denominator is every row of `df`, including rows whose category is null or outside the
/// fixed order.
pub fn category_count_chart(
    df: &DataFrame,
    dimension: &Dimension,
    title: &'static str,
) -> PolarsResult<BarFigure> {
    let total = df.height();
    let counts = count_by_category(df, dimension)?;
    let bars = dimension
        .categories
        .iter()
        .zip(counts)
        .map(|(category, count)| Bar {
            category: category.label,
            color: category.color,
            value: count as f64,
            label: format_percent(count, total),
        })
        .collect();
    Ok(BarFigure {
        title,
        x_label: dimension.axis_label,
        y_label: "Number of Customers",
        bars,
    })
}

pub fn value_tier_revenue_chart(df: &DataFrame, currency_symbol: &str) -> PolarsResult<BarFigure> {
    let revenue = revenue_by_value_tier(df)?;
    let bars = VALUE_TIER
        .categories
        .iter()
        .zip(revenue)
        .map(|(category, value)| Bar {
            category: category.label,
            color: category.color,
            value,
            label: format_currency(value, currency_symbol),
        })
        .collect();
    Ok(BarFigure {
        title: "Total Revenue Contribution by RFM Value Tier",
        x_label: VALUE_TIER.axis_label,
        y_label: "Total Revenue",
        bars,
    })
}
