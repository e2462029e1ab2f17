//! Value tier x shipping bucket contingency table, normalized per value tier.

use polars::prelude::*;
use serde::Serialize;

use crate::categories::{ylgnbu, Rgb, SHIP_BUCKET, VALUE_TIER};

/// Annotation for an undefined cell (value tier with no rows).
pub const UNDEFINED_LABEL: &str = "n/a";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HeatmapFigure {
    pub title: &'static str,
    pub x_label: &'static str,
    pub y_label: &'static str,
    pub colorbar_label: &'static str,
    pub row_labels: Vec<&'static str>,
    pub col_labels: Vec<&'static str>,
    /// Row-major percentages; NaN where the row total is zero (serialized as `null`).
    pub cells: Vec<Vec<f64>>,
    pub annotations: Vec<Vec<String>>,
}

impl HeatmapFigure {
    /// Finite min and max over all cells, the color scale bounds.
    pub fn value_range(&self) -> Option<(f64, f64)> {
        self.cells
            .iter()
            .flatten()
            .copied()
            .filter(|v| v.is_finite())
            .fold(None, |acc, v| match acc {
                None => Some((v, v)),
                Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
            })
    }

    pub fn cell_color(&self, row: usize, col: usize) -> Rgb {
        let value = self.cells[row][col];
        match self.value_range() {
            Some((lo, hi)) if hi > lo => ylgnbu((value - lo) / (hi - lo)),
            Some(_) => ylgnbu(if value.is_finite() { 0.5 } else { f64::NAN }),
            None => ylgnbu(f64::NAN),
        }
    }
}

/// Counts per (value tier, shipping bucket) over rows where both cells are non-null, plus the
/// per-tier total over every bucket present in the data (not only the known ones).
pub fn contingency_counts(df: &DataFrame) -> PolarsResult<(Vec<Vec<u64>>, Vec<u64>)> {
    let grouped = df
        .clone()
        .lazy()
        .select([
            col(VALUE_TIER.column).cast(DataType::String).alias("tier"),
            col(SHIP_BUCKET.column).cast(DataType::String).alias("bucket"),
        ])
        .drop_nulls(None)
        .group_by([col("tier"), col("bucket")])
        .agg([len().alias("count")])
        .collect()?;

    let mut counts = vec![vec![0u64; SHIP_BUCKET.len()]; VALUE_TIER.len()];
    let mut row_totals = vec![0u64; VALUE_TIER.len()];

    let tiers = grouped.column("tier")?.str()?;
    let buckets = grouped.column("bucket")?.str()?;
    let n = grouped.column("count")?.cast(&DataType::UInt64)?;
    for ((tier, bucket), count) in tiers
        .into_iter()
        .zip(buckets.into_iter())
        .zip(n.u64()?.into_iter())
    {
        let (Some(tier), Some(bucket), Some(count)) = (tier, bucket, count) else {
            continue;
        };
        let Some(r) = VALUE_TIER.position(tier) else {
            continue;
        };
        row_totals[r] += count;
        if let Some(c) = SHIP_BUCKET.position(bucket) {
            counts[r][c] += count;
        }
    }
    Ok((counts, row_totals))
}

/// `cell / row_total * 100`; a zero row total leaves the whole row NaN.
pub fn row_percentages(counts: &[Vec<u64>], row_totals: &[u64]) -> Vec<Vec<f64>> {
    counts
        .iter()
        .zip(row_totals)
        .map(|(row, &total)| {
            row.iter()
                .map(|&c| {
                    if total == 0 {
                        f64::NAN
                    } else {
                        c as f64 / total as f64 * 100.0
                    }
                })
                .collect()
        })
        .collect()
}

pub fn format_cell(value: f64) -> String {
    if value.is_finite() {
        format!("{:.1}%", value)
    } else {
        UNDEFINED_LABEL.to_string()
    }
}

pub fn value_vs_shipping_heatmap(df: &DataFrame) -> PolarsResult<HeatmapFigure> {
    let (counts, totals) = contingency_counts(df)?;
    let cells = row_percentages(&counts, &totals);
    let annotations = cells
        .iter()
        .map(|row| row.iter().map(|&v| format_cell(v)).collect())
        .collect();

    Ok(HeatmapFigure {
        title: "Value Tier × Shipping Reliability (%)",
        x_label: SHIP_BUCKET.axis_label,
        y_label: VALUE_TIER.axis_label,
        colorbar_label: "% of Customers in Value Tier",
        row_labels: VALUE_TIER.labels().collect(),
        col_labels: SHIP_BUCKET.labels().collect(),
        cells,
        annotations,
    })
}
