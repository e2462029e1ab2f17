//! User-facing error message formatting.
//!
//! Uses typed error matching (PolarsError variants, io::ErrorKind) rather than
//! string parsing to produce actionable messages.

use polars::prelude::PolarsError;
use std::io;
use std::path::Path;

/// Format a PolarsError as a user-facing message by matching on its variant.
pub fn user_message_from_polars(err: &PolarsError) -> String {
    use polars::prelude::PolarsError as PE;

    match err {
        PE::ColumnNotFound(msg) => format!(
            "Column not found: {}. Check spelling and that the column exists.",
            msg
        ),
        PE::IO { error, msg } => {
            user_message_from_io(error.as_ref(), msg.as_ref().map(|m| m.as_ref()))
        }
        PE::NoData(msg) => format!("No data: {}", msg),
        PE::SchemaMismatch(msg) => format!("Schema mismatch: {}", msg),
        PE::ShapeMismatch(msg) => format!("Row shape mismatch: {}", msg),
        PE::InvalidOperation(msg) => format!("Operation not allowed: {}", msg),
        PE::ComputeError(msg) => simplify_compute_message(msg),
        PE::Context { error, msg } => {
            let inner = user_message_from_polars(error);
            format!("{}: {}", msg, inner)
        }
        #[allow(unreachable_patterns)]
        _ => err.to_string(),
    }
}

/// Format an io::Error as a user-facing message by matching on ErrorKind.
pub fn user_message_from_io(err: &io::Error, context: Option<&str>) -> String {
    use std::io::ErrorKind;

    let base: String = match err.kind() {
        ErrorKind::NotFound => "File or directory not found.".to_string(),
        ErrorKind::PermissionDenied => "Permission denied. Check read access.".to_string(),
        ErrorKind::InvalidData | ErrorKind::InvalidInput => {
            "Invalid or corrupted data.".to_string()
        }
        ErrorKind::UnexpectedEof => "Unexpected end of file.".to_string(),
        ErrorKind::OutOfMemory => "Out of memory.".to_string(),
        ErrorKind::Other => {
            let msg = err.to_string();
            if msg.contains("No space left") {
                return "No space left on device. Free up disk space and try again.".to_string();
            }
            if msg.contains("Is a directory") {
                return "Path is a directory, not a file.".to_string();
            }
            return if context.is_some() {
                format!("I/O error: {}", msg)
            } else {
                msg
            };
        }
        _ => err.to_string(),
    };

    match context {
        Some(ctx) if !ctx.is_empty() => format!("{} {}", base, ctx),
        _ => base,
    }
}

/// Format a failed write of `path` (a saved chart). The io::Error in the chain decides the reason.
pub fn user_message_from_write(report: &color_eyre::eyre::Report, path: &Path) -> String {
    use std::io::ErrorKind;

    let reason = report
        .chain()
        .find_map(|cause| cause.downcast_ref::<io::Error>())
        .map(|err| match err.kind() {
            ErrorKind::PermissionDenied => "Permission denied. Check write access.".to_string(),
            ErrorKind::NotFound => "Directory not found.".to_string(),
            ErrorKind::NotADirectory => "A parent of the path is not a directory.".to_string(),
            ErrorKind::StorageFull => {
                "No space left on device. Free up disk space and try again.".to_string()
            }
            _ => err.to_string(),
        })
        .unwrap_or_else(|| {
            let display = report.to_string();
            display
                .lines()
                .next()
                .unwrap_or("An error occurred")
                .trim()
                .to_string()
        });
    format!("Could not write {}: {}", path.display(), reason)
}

/// Light cleanup for ComputeError messages: keep the first line, drop the polars hint suffix.
fn simplify_compute_message(msg: &str) -> String {
    let first = msg.lines().next().unwrap_or(msg).trim();
    match first.find(". Try ") {
        Some(idx) => first[..idx + 1].to_string(),
        None => first.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_message_from_io_not_found() {
        let err = io::Error::new(io::ErrorKind::NotFound, "No such file");
        let msg = user_message_from_io(&err, None);
        assert!(
            msg.contains("not found"),
            "expected 'not found', got: {}",
            msg
        );
    }

    #[test]
    fn test_user_message_from_io_permission_denied() {
        let err = io::Error::new(io::ErrorKind::PermissionDenied, "Permission denied");
        let msg = user_message_from_io(&err, Some("(rfm_output.csv)"));
        assert_eq!(msg, "Permission denied. Check read access. (rfm_output.csv)");
    }

    #[test]
    fn test_user_message_from_polars_column_not_found() {
        let err = PolarsError::ColumnNotFound("value_tier".into());
        let msg = user_message_from_polars(&err);
        assert!(msg.starts_with("Column not found: value_tier"), "{}", msg);
    }

    #[test]
    fn test_simplify_compute_message_drops_hint() {
        let raw = "could not parse `abc` as dtype i64 at column 'monetary_sales'. Try increasing infer_schema_length\nmore context";
        assert_eq!(
            simplify_compute_message(raw),
            "could not parse `abc` as dtype i64 at column 'monetary_sales'."
        );
    }

    #[test]
    fn test_write_failure_names_the_target() {
        let report = color_eyre::eyre::Report::new(io::Error::new(
            io::ErrorKind::PermissionDenied,
            "denied",
        ));
        assert_eq!(
            user_message_from_write(&report, Path::new("out/01.png")),
            "Could not write out/01.png: Permission denied. Check write access."
        );

        let report = color_eyre::eyre::eyre!("backend failed\ndetails");
        assert_eq!(
            user_message_from_write(&report, Path::new("out/04.png")),
            "Could not write out/04.png: backend failed"
        );
    }
}
