//! Command-line arguments live in the `rfmdash-cli` crate so the build script and `gen_docs`
//! can render them without depending on the application.

pub use rfmdash_cli::Args;

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn parses_report_flags_and_selections() {
        let args = Args::try_parse_from([
            "rfmdash",
            "data.csv",
            "--report",
            "--json",
            "--value-tier",
            "High Value",
            "--null-value",
            "NA",
            "--null-value",
            "-",
        ])
        .unwrap();
        assert_eq!(args.path.as_deref(), Some(std::path::Path::new("data.csv")));
        assert!(args.report && args.json);
        assert_eq!(args.value_tier.as_deref(), Some("High Value"));
        assert_eq!(args.null_value, ["NA", "-"]);
    }

    #[test]
    fn json_requires_report() {
        assert!(Args::try_parse_from(["rfmdash", "--json"]).is_err());
    }
}
