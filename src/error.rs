use polars::prelude::PolarsError;
use std::path::PathBuf;
use thiserror::Error;

use crate::error_display::user_message_from_polars;

/// Errors that halt a render cycle.
///
/// A missing chart column is not an error: the dashboard turns it into an inline warning.
#[derive(Debug, Error)]
pub enum DashboardError {
    #[error("File not found: {}", .0.display())]
    DatasetNotFound(PathBuf),

    #[error("Failed to read {}: {}", .path.display(), user_message_from_polars(.source))]
    Read {
        path: PathBuf,
        #[source]
        source: PolarsError,
    },

    #[error(transparent)]
    Polars(#[from] PolarsError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl DashboardError {
    /// True for the errors that mean "there is nothing to show at all".
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::DatasetNotFound(_) | Self::Read { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn not_found_message_names_path() {
        let err = DashboardError::DatasetNotFound(Path::new("data/rfm_output.csv").to_path_buf());
        assert_eq!(err.to_string(), "File not found: data/rfm_output.csv");
        assert!(err.is_fatal());
    }

    #[test]
    fn read_error_uses_friendly_polars_message() {
        let err = DashboardError::Read {
            path: PathBuf::from("x.csv"),
            source: PolarsError::NoData("empty CSV".into()),
        };
        let msg = err.to_string();
        assert!(msg.starts_with("Failed to read x.csv: "), "{}", msg);
        assert!(msg.contains("No data"), "{}", msg);
    }
}
