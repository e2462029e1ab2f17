//! Dataset loading and the per-path memo cache.

use log::{debug, info};
use polars::prelude::*;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::cli::Args;
use crate::config::AppConfig;
use crate::error::DashboardError;

/// How to parse the delimited input file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadOptions {
    pub delimiter: u8,
    pub has_header: bool,
    /// Extra tokens read as null (empty fields are always null).
    pub null_values: Vec<String>,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            delimiter: b',',
            has_header: true,
            null_values: Vec::new(),
        }
    }
}

impl LoadOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    pub fn with_has_header(mut self, has_header: bool) -> Self {
        self.has_header = has_header;
        self
    }

    pub fn with_null_value(mut self, value: impl Into<String>) -> Self {
        self.null_values.push(value.into());
        self
    }

    /// Create LoadOptions from CLI args and config, with CLI args taking precedence
    pub fn from_args_and_config(args: &Args, config: &AppConfig) -> Self {
        let mut opts = LoadOptions::new();
        opts.delimiter = args
            .delimiter
            .or(config.data.delimiter)
            .unwrap_or(opts.delimiter);

        // CLI no_header flag overrides config
        opts.has_header = match args.no_header {
            Some(no_header) => !no_header,
            None => config.data.has_header.unwrap_or(true),
        };

        // Null tokens accumulate: config first, then CLI
        opts.null_values = config.data.null_values.clone();
        for v in &args.null_value {
            if !opts.null_values.contains(v) {
                opts.null_values.push(v.clone());
            }
        }
        opts
    }
}

/// Read the whole file into memory. No schema validation happens here; consumers check the
/// columns they need.
pub fn load_dataset(path: &Path, options: &LoadOptions) -> Result<DataFrame, DashboardError> {
    if !path.exists() {
        return Err(DashboardError::DatasetNotFound(path.to_path_buf()));
    }

    let null_values = if options.null_values.is_empty() {
        None
    } else {
        Some(NullValues::AllColumns(
            options
                .null_values
                .iter()
                .map(|v| PlSmallStr::from(v.as_str()))
                .collect(),
        ))
    };
    let delimiter = options.delimiter;

    let read_options = CsvReadOptions::default()
        .with_has_header(options.has_header)
        .map_parse_options(|opts| {
            opts.with_separator(delimiter)
                .with_null_values(null_values.clone())
        });

    let read_err = |source: PolarsError| DashboardError::Read {
        path: path.to_path_buf(),
        source,
    };
    let df = read_options
        .try_into_reader_with_file_path(Some(path.into()))
        .map_err(read_err)?
        .finish()
        .map_err(read_err)?;

    info!(
        "loaded {} ({} rows, {} columns)",
        path.display(),
        df.height(),
        df.width()
    );
    Ok(df)
}

/// Memo of loaded datasets keyed by path. Entries are never evicted or refreshed: the data path
/// is fixed for the life of the process.
#[derive(Default)]
pub struct DatasetCache {
    entries: HashMap<PathBuf, Arc<DataFrame>>,
    reads: usize,
}

impl DatasetCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached table for `path`, reading it on first access.
    pub fn get_or_load(
        &mut self,
        path: &Path,
        options: &LoadOptions,
    ) -> Result<Arc<DataFrame>, DashboardError> {
        if let Some(df) = self.entries.get(path) {
            debug!("dataset cache hit for {}", path.display());
            return Ok(Arc::clone(df));
        }

        self.reads += 1;
        let df = Arc::new(load_dataset(path, options)?);
        self.entries.insert(path.to_path_buf(), Arc::clone(&df));
        Ok(df)
    }

    pub fn contains(&self, path: &Path) -> bool {
        self.entries.contains_key(path)
    }

    /// Number of times storage was actually read.
    pub fn reads(&self) -> usize {
        self.reads
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn write_csv(dir: &Path, name: &str, body: &str) -> PathBuf {
        let path = dir.join(name);
        fs::write(&path, body).unwrap();
        path
    }

    #[test]
    fn load_reads_all_rows_and_columns() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_csv(
            dir.path(),
            "rfm.csv",
            "main_country,value_tier,monetary_sales\nFrance,High Value,10.5\nUK,Low Value,3\n",
        );
        let df = load_dataset(&path, &LoadOptions::default()).unwrap();
        assert_eq!(df.shape(), (2, 3));
        assert_eq!(
            df.get_column_names_str(),
            ["main_country", "value_tier", "monetary_sales"]
        );
    }

    #[test]
    fn load_missing_file_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.csv");
        match load_dataset(&missing, &LoadOptions::default()) {
            Err(DashboardError::DatasetNotFound(p)) => assert_eq!(p, missing),
            other => panic!("expected DatasetNotFound, got {:?}", other.map(|d| d.shape())),
        }
    }

    #[test]
    fn load_with_delimiter_and_null_token() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_csv(
            dir.path(),
            "rfm.tsv",
            "value_tier\tmonetary_sales\nHigh Value\tNA\nMid Value\t4\n",
        );
        let opts = LoadOptions::new()
            .with_delimiter(b'\t')
            .with_null_value("NA");
        let df = load_dataset(&path, &opts).unwrap();
        assert_eq!(df.width(), 2);
        assert_eq!(df.column("monetary_sales").unwrap().null_count(), 1);
    }

    #[test]
    fn cache_reads_storage_once_per_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_csv(dir.path(), "rfm.csv", "value_tier\nHigh Value\n");
        let mut cache = DatasetCache::new();

        let first = cache.get_or_load(&path, &LoadOptions::default()).unwrap();
        // Deleting the file proves the second call never touches storage.
        fs::remove_file(&path).unwrap();
        let second = cache.get_or_load(&path, &LoadOptions::default()).unwrap();

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(cache.reads(), 1);
        assert!(cache.contains(&path));
    }

    #[test]
    fn cache_does_not_store_failures() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("later.csv");
        let mut cache = DatasetCache::new();
        assert!(cache.get_or_load(&path, &LoadOptions::default()).is_err());
        assert!(!cache.contains(&path));

        fs::write(&path, "value_tier\nLow Value\n").unwrap();
        let df = cache.get_or_load(&path, &LoadOptions::default()).unwrap();
        assert_eq!(df.height(), 1);
    }
}
