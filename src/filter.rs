//! Sidebar filters: equality predicates on country, value tier and shipping bucket.

use log::debug;
use polars::prelude::*;
use serde::Serialize;
use std::collections::BTreeSet;

use crate::categories::{MAIN_COUNTRY_COLUMN, SHIP_BUCKET, VALUE_TIER};

/// Label of the "no filter" choice.
pub const ALL_LABEL: &str = "All";

/// One selector's current choice.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Selection {
    #[default]
    All,
    Value(String),
}

impl Selection {
    pub fn value(v: impl Into<String>) -> Self {
        Self::Value(v.into())
    }

    /// Parse a user-supplied choice; "All" (any case) or an empty string means no filter.
    pub fn parse(s: &str) -> Self {
        let trimmed = s.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case(ALL_LABEL) {
            Self::All
        } else {
            Self::Value(trimmed.to_string())
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Self::All => ALL_LABEL,
            Self::Value(v) => v,
        }
    }

    pub fn is_all(&self) -> bool {
        matches!(self, Self::All)
    }
}

impl Serialize for Selection {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterField {
    MainCountry,
    ValueTier,
    ShipBucket,
}

impl FilterField {
    pub const ALL: [Self; 3] = [Self::MainCountry, Self::ValueTier, Self::ShipBucket];

    pub fn column(self) -> &'static str {
        match self {
            Self::MainCountry => MAIN_COUNTRY_COLUMN,
            Self::ValueTier => VALUE_TIER.column,
            Self::ShipBucket => SHIP_BUCKET.column,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::MainCountry => "Main Country",
            Self::ValueTier => "Value Tier",
            Self::ShipBucket => "Shipping Bucket",
        }
    }
}

/// Current choice of every selector.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FilterSelections {
    pub country: Selection,
    pub value_tier: Selection,
    pub ship_bucket: Selection,
}

impl FilterSelections {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, field: FilterField, selection: Selection) -> Self {
        self.set(field, selection);
        self
    }

    pub fn get(&self, field: FilterField) -> &Selection {
        match field {
            FilterField::MainCountry => &self.country,
            FilterField::ValueTier => &self.value_tier,
            FilterField::ShipBucket => &self.ship_bucket,
        }
    }

    pub fn set(&mut self, field: FilterField, selection: Selection) {
        match field {
            FilterField::MainCountry => self.country = selection,
            FilterField::ValueTier => self.value_tier = selection,
            FilterField::ShipBucket => self.ship_bucket = selection,
        }
    }

    /// `(column, value)` pairs that actually constrain `df`. Selections whose column is absent
    /// are dropped, which is the same as "All".
    pub fn active_predicates<'a>(&'a self, df: &DataFrame) -> Vec<(&'static str, &'a str)> {
        FilterField::ALL
            .iter()
            .filter_map(|&field| match self.get(field) {
                Selection::Value(v) if df.get_column_index(field.column()).is_some() => {
                    Some((field.column(), v.as_str()))
                }
                _ => None,
            })
            .collect()
    }
}

/// Rows of `df` matching every active predicate, in original order. Columns are untouched.
pub fn apply_filters(df: &DataFrame, selections: &FilterSelections) -> PolarsResult<DataFrame> {
    let predicates = selections.active_predicates(df);
    let Some(predicate) = predicates
        .iter()
        .map(|(column, value)| col(*column).cast(DataType::String).eq(lit(*value)))
        .reduce(|acc, e| acc.and(e))
    else {
        return Ok(df.clone());
    };

    let filtered = df.clone().lazy().filter(predicate).collect()?;
    debug!(
        "filters {:?} kept {} of {} rows",
        predicates,
        filtered.height(),
        df.height()
    );
    Ok(filtered)
}

/// Choices for one selector: "All" first, then the values it can take.
///
/// Value tiers use the fixed tier order; the other fields list the column's distinct non-null
/// values sorted ascending. A field whose column is absent only offers "All".
pub fn filter_options(df: &DataFrame, field: FilterField) -> PolarsResult<Vec<Selection>> {
    let mut options = vec![Selection::All];
    let Ok(column) = df.column(field.column()) else {
        return Ok(options);
    };

    if field == FilterField::ValueTier {
        options.extend(VALUE_TIER.labels().map(Selection::value));
        return Ok(options);
    }

    let as_str = column.cast(&DataType::String)?;
    let distinct: BTreeSet<&str> = as_str
        .str()?
        .into_iter()
        .flatten()
        .filter(|v| !v.is_empty())
        .collect();
    options.extend(distinct.into_iter().map(Selection::value));
    Ok(options)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> DataFrame {
        df!(
            "main_country" => &[Some("UK"), Some("France"), None, Some("UK"), Some("Germany")],
            "value_tier" => &["High Value", "Low Value", "High Value", "Mid Value", "High Value"],
            "ship_bucket" => &["Reliable", "Critical", "Reliable", "Reliable", "Unreliable"],
            "monetary_sales" => &[100.0, 20.0, 55.0, 70.0, 10.0]
        )
        .unwrap()
    }

    #[test]
    fn all_sentinels_return_identical_table() {
        let df = sample();
        let out = apply_filters(&df, &FilterSelections::new()).unwrap();
        assert!(out.equals_missing(&df));
    }

    #[test]
    fn predicates_are_anded_and_order_preserved() {
        let df = sample();
        let selections = FilterSelections::new()
            .with(FilterField::ValueTier, Selection::value("High Value"))
            .with(FilterField::ShipBucket, Selection::value("Reliable"));
        let out = apply_filters(&df, &selections).unwrap();
        assert_eq!(out.height(), 2);
        assert_eq!(out.width(), df.width());
        let sales: Vec<Option<f64>> = out
            .column("monetary_sales")
            .unwrap()
            .f64()
            .unwrap()
            .into_iter()
            .collect();
        assert_eq!(sales, [Some(100.0), Some(55.0)]);
    }

    #[test]
    fn null_cells_never_match_a_value() {
        let df = sample();
        let selections = FilterSelections::new().with(FilterField::MainCountry, Selection::value("UK"));
        let out = apply_filters(&df, &selections).unwrap();
        assert_eq!(out.height(), 2);
    }

    #[test]
    fn unknown_value_gives_empty_view_with_same_columns() {
        let df = sample();
        let selections =
            FilterSelections::new().with(FilterField::MainCountry, Selection::value("Spain"));
        let out = apply_filters(&df, &selections).unwrap();
        assert_eq!(out.height(), 0);
        assert_eq!(out.get_column_names(), df.get_column_names());
    }

    #[test]
    fn absent_column_disables_filter() {
        let df = sample().drop("main_country").unwrap();
        let selections =
            FilterSelections::new().with(FilterField::MainCountry, Selection::value("France"));
        assert!(selections.active_predicates(&df).is_empty());
        let out = apply_filters(&df, &selections).unwrap();
        assert_eq!(out.height(), df.height());
    }

    #[test]
    fn options_are_sorted_with_all_first() {
        let df = sample();
        let labels = |field| {
            filter_options(&df, field)
                .unwrap()
                .iter()
                .map(|s| s.label().to_string())
                .collect::<Vec<_>>()
        };
        assert_eq!(labels(FilterField::MainCountry), ["All", "France", "Germany", "UK"]);
        assert_eq!(
            labels(FilterField::ValueTier),
            ["All", "High Value", "Mid Value", "Low Value"]
        );
        assert_eq!(
            labels(FilterField::ShipBucket),
            ["All", "Critical", "Reliable", "Unreliable"]
        );
    }

    #[test]
    fn options_for_absent_column_only_all() {
        let df = df!("value_tier" => &["High Value"]).unwrap();
        assert_eq!(
            filter_options(&df, FilterField::ShipBucket).unwrap(),
            [Selection::All]
        );
    }

    #[test]
    fn selection_parse() {
        assert_eq!(Selection::parse("all"), Selection::All);
        assert_eq!(Selection::parse("  "), Selection::All);
        assert_eq!(Selection::parse(" France "), Selection::value("France"));
    }
}
