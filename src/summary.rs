//! Row/column/missing-cell metrics and the data preview.

use polars::prelude::*;
use serde::Serialize;
use std::borrow::Cow;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SummaryMetrics {
    pub rows: usize,
    pub columns: usize,
    pub missing_cells: usize,
}

impl SummaryMetrics {
    pub fn compute(df: &DataFrame) -> PolarsResult<Self> {
        Ok(Self {
            rows: df.height(),
            columns: df.width(),
            missing_cells: missing_cells(df)?,
        })
    }
}

/// Null cells plus empty-string cells over the whole table.
pub fn missing_cells(df: &DataFrame) -> PolarsResult<usize> {
    let mut missing = 0;
    for column in df.get_columns() {
        missing += column.null_count();
        if column.dtype() == &DataType::String {
            missing += column
                .str()?
                .into_iter()
                .filter(|v| matches!(v, Some(s) if s.is_empty()))
                .count();
        }
    }
    Ok(missing)
}

/// First rows of a table rendered as strings; nulls are empty cells.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Preview {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

pub fn preview(df: &DataFrame, max_rows: usize) -> PolarsResult<Preview> {
    let head = df.head(Some(max_rows));
    let headers = head
        .get_column_names()
        .iter()
        .map(|n| n.to_string())
        .collect();

    let mut rows = vec![Vec::with_capacity(head.width()); head.height()];
    for column in head.get_columns() {
        for (row_index, row) in rows.iter_mut().enumerate() {
            let value = column.get(row_index)?;
            let text: Cow<str> = if matches!(value, AnyValue::Null) {
                Cow::Borrowed("")
            } else {
                value.str_value()
            };
            row.push(text.into_owned());
        }
    }
    Ok(Preview { headers, rows })
}

/// `1234567` -> `1,234,567`.
pub fn format_thousands(n: usize) -> String {
    group_digits(&n.to_string())
}

/// Insert `,` every three digits from the right of an unsigned digit string.
pub(crate) fn group_digits(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
