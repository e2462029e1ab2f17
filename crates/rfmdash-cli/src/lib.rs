//! Shared CLI definitions for rfmdash.
//!
//! Used by the main application and by the build script (manpage) and
//! gen_docs binary (command-line-options markdown).

use clap::{CommandFactory, Parser};

/// Command-line arguments for rfmdash
#[derive(Clone, Parser, Debug)]
#[command(
    name = "rfmdash",
    version,
    about = "Customer segmentation dashboard in the terminal",
    long_about = include_str!("../long_about.txt")
)]
pub struct Args {
    /// Path to the RFM output file. Defaults to [data] path from the config
    /// (data/Cleaned-Data/rfm_output.csv)
    #[arg(value_name = "PATH")]
    pub path: Option<std::path::PathBuf>,

    /// Specify the delimiter to use when reading the file
    #[arg(long = "delimiter")]
    pub delimiter: Option<u8>,

    /// Specify that the file has no header
    #[arg(long = "no-header")]
    pub no_header: Option<bool>,

    /// Treat this value as null when reading the file. Use once per value, e.g. --null-value NA --null-value "-"
    #[arg(long = "null-value", value_name = "VAL")]
    pub null_value: Vec<String>,

    /// Directory chart images are written to (default: assets/screenshots)
    #[arg(long = "output-dir", value_name = "DIR")]
    pub output_dir: Option<std::path::PathBuf>,

    /// Start with "save charts" enabled
    #[arg(long = "save-charts", action)]
    pub save_charts: bool,

    /// Initial Main Country selection
    #[arg(long = "country", value_name = "COUNTRY")]
    pub country: Option<String>,

    /// Initial Value Tier selection (e.g. "High Value")
    #[arg(long = "value-tier", value_name = "TIER")]
    pub value_tier: Option<String>,

    /// Initial Shipping Bucket selection (e.g. "Critical")
    #[arg(long = "ship-bucket", value_name = "BUCKET")]
    pub ship_bucket: Option<String>,

    /// Run a single render cycle, print the report to stdout and exit
    #[arg(long = "report", action)]
    pub report: bool,

    /// With --report, print the report as JSON
    #[arg(long = "json", requires = "report", action)]
    pub json: bool,

    /// Enable debug mode to show operational information
    #[arg(long = "debug", action)]
    pub debug: bool,

    /// Clear all cache data (log file) and exit
    #[arg(long = "clear-cache", action)]
    pub clear_cache: bool,

    /// Generate default configuration file at ~/.config/rfmdash/config.toml
    #[arg(long = "generate-config", action)]
    pub generate_config: bool,

    /// Force overwrite existing config file when using --generate-config
    #[arg(long = "force", requires = "generate_config", action)]
    pub force: bool,
}

/// Escape `|` and newlines for use in markdown table cells.
fn escape_table_cell(s: &str) -> String {
    s.replace('|', "\\|").replace(['\n', '\r'], " ")
}

/// Render command-line options as markdown.
///
/// Used by the gen_docs binary; output is written to stdout.
pub fn render_options_markdown() -> String {
    let mut cmd = Args::command();
    cmd.build();

    let mut out = String::from("# Command Line Options\n\n");

    out.push_str("## Usage\n\n```\n");
    let usage = cmd.render_usage();
    out.push_str(&usage.to_string());
    out.push_str("\n```\n\n");

    out.push_str("## Options\n\n");
    out.push_str("| Option | Description |\n");
    out.push_str("|--------|-------------|\n");

    for arg in cmd.get_arguments() {
        let id = arg.get_id().as_ref().to_string();
        if id == "help" || id == "version" {
            continue;
        }

        let placeholder: String = arg
            .get_value_names()
            .map(|names| {
                names
                    .iter()
                    .map(|n: &clap::builder::Str| format!("<{}>", n.as_ref() as &str))
                    .collect::<Vec<_>>()
                    .join(" ")
            })
            .unwrap_or_default();

        let option_str = if arg.is_positional() {
            if arg.is_required_set() {
                placeholder
            } else {
                format!("[{placeholder}]")
            }
        } else {
            let mut parts = Vec::new();
            if let Some(s) = arg.get_short() {
                parts.push(format!("-{s}"));
            }
            if let Some(l) = arg.get_long() {
                parts.push(format!("--{l}"));
            }
            let op = parts.join(", ");
            if !arg.get_action().takes_values() || placeholder.is_empty() {
                op
            } else {
                format!("{op} {placeholder}")
            }
        };

        let help = arg
            .get_help()
            .map(|h| escape_table_cell(&h.to_string()))
            .unwrap_or_else(|| "-".to_string());

        out.push_str(&format!("| `{option_str}` | {help} |\n"));
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn args_parse_defaults() {
        let args = Args::try_parse_from(["rfmdash"]).unwrap();
        assert!(args.path.is_none());
        assert!(!args.save_charts);
        assert!(!args.report);
        assert!(args.null_value.is_empty());
    }

    #[test]
    fn args_parse_selections_and_report() {
        let args = Args::try_parse_from([
            "rfmdash",
            "data.csv",
            "--country",
            "France",
            "--value-tier",
            "High Value",
            "--report",
            "--json",
        ])
        .unwrap();
        assert_eq!(args.path.as_deref(), Some(std::path::Path::new("data.csv")));
        assert_eq!(args.country.as_deref(), Some("France"));
        assert_eq!(args.value_tier.as_deref(), Some("High Value"));
        assert!(args.report && args.json);
    }

    #[test]
    fn json_requires_report() {
        assert!(Args::try_parse_from(["rfmdash", "--json"]).is_err());
    }

    #[test]
    fn options_markdown_lists_flags() {
        let md = render_options_markdown();
        assert!(md.starts_with("# Command Line Options"));
        assert!(md.contains("`--save-charts`"));
        assert!(md.contains("`--output-dir <DIR>`"));
        assert!(md.contains("`[PATH]`"));
        assert!(!md.contains("--help"));
    }
}
