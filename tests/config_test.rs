use clap::Parser;
use rfmdash::config::{AppConfig, ConfigManager};
use rfmdash::{Args, DashboardSettings};
use std::path::PathBuf;

fn manager_with(contents: Option<&str>) -> (tempfile::TempDir, ConfigManager) {
    let dir = tempfile::tempdir().unwrap();
    let manager = ConfigManager::with_dir(dir.path().to_path_buf());
    if let Some(contents) = contents {
        std::fs::write(manager.config_path("config.toml"), contents).unwrap();
    }
    (dir, manager)
}

#[test]
fn test_load_config_with_no_file() {
    let (_dir, manager) = manager_with(None);
    let config = AppConfig::load_from(&manager).unwrap();
    assert_eq!(config, AppConfig::default());
    assert_eq!(config.data.path, "data/Cleaned-Data/rfm_output.csv");
    assert_eq!(config.output.dir, "assets/screenshots");
}

#[test]
fn test_generated_template_loads_as_defaults() {
    let (_dir, manager) = manager_with(None);
    let path = manager.write_default_config(false).unwrap();
    assert!(path.ends_with("config.toml"));
    assert_eq!(AppConfig::load_from(&manager).unwrap(), AppConfig::default());
}

#[test]
fn test_write_config_without_force_fails_if_exists() {
    let (_dir, manager) = manager_with(Some("version = \"0.1\"\n"));
    let err = manager.write_default_config(false).unwrap_err();
    assert!(err.to_string().contains("--force"));

    manager.write_default_config(true).unwrap();
    let content = std::fs::read_to_string(manager.config_path("config.toml")).unwrap();
    assert_eq!(content, manager.generate_default_config());
}

#[test]
fn test_partial_user_config_overrides_only_what_it_sets() {
    let (_dir, manager) = manager_with(Some(
        r##"
[data]
path = "exports/rfm.csv"
null_values = ["NA"]

[output]
save_charts = true
currency_symbol = "$"

[theme.colors]
primary = "#ff8800"
"##,
    ));
    let config = AppConfig::load_from(&manager).unwrap();
    let defaults = AppConfig::default();

    assert_eq!(config.data.path, "exports/rfm.csv");
    assert_eq!(config.data.null_values, ["NA"]);
    assert!(config.output.save_charts);
    assert_eq!(config.output.currency_symbol, "$");
    assert_eq!(config.output.dir, defaults.output.dir);
    assert_eq!(config.output.bar_size, defaults.output.bar_size);
    assert_eq!(config.display, defaults.display);
    assert_eq!(config.theme.colors.primary, "#ff8800");
    assert_eq!(config.theme.colors.error, defaults.theme.colors.error);
}

#[test]
fn test_invalid_values_are_rejected() {
    for bad in [
        "version = \"2.0\"\n",
        "[output]\nbar_size = [100, 750]\n",
        "[display]\npreview_rows = 0\n",
        "[performance]\nevent_poll_interval_ms = 0\n",
        "[theme.colors]\nprimary = \"#12345\"\n",
        "[theme.colors]\nwarning = \"not_a_color\"\n",
        "[data]\npath = \"   \"\n",
    ] {
        let (_dir, manager) = manager_with(Some(bad));
        assert!(AppConfig::load_from(&manager).is_err(), "accepted: {}", bad);
    }
}

#[test]
fn test_theme_has_only_the_slots_widgets_use() {
    let (_dir, manager) = manager_with(Some(
        "[theme]\ncolor_mode = \"dark\"\n\n[theme.colors]\nsecondary = \"blue\"\ntext_inverse = \"black\"\n",
    ));
    assert_eq!(AppConfig::load_from(&manager).unwrap(), AppConfig::default());

    let template = manager.generate_default_config();
    for dropped in ["color_mode", "\nsecondary =", "text_inverse"] {
        assert!(!template.contains(dropped), "template still has {}", dropped);
    }
    let names: Vec<&str> = AppConfig::default()
        .theme
        .colors
        .entries()
        .iter()
        .map(|(name, _)| *name)
        .collect();
    assert!(names.contains(&"controls_bg"));
    assert!(!names.contains(&"secondary"));
}

#[test]
fn test_unparseable_file_names_the_path() {
    let (_dir, manager) = manager_with(Some("[output\n"));
    let err = AppConfig::load_from(&manager).unwrap_err();
    assert!(err.to_string().contains("Failed to parse config file"));
}

#[test]
fn test_cli_args_override_config() {
    let mut config = AppConfig::default();
    config.data.path = "from_config.csv".to_string();
    config.data.delimiter = Some(b';');
    config.data.null_values = vec!["NA".to_string()];
    config.output.dir = "config_out".to_string();
    config.display.preview_rows = 5;

    let args = Args::parse_from([
        "rfmdash",
        "cli.csv",
        "--no-header",
        "true",
        "--null-value",
        "-",
        "--null-value",
        "NA",
    ]);
    let settings = DashboardSettings::from_args_and_config(&args, &config);

    assert_eq!(settings.data_path, PathBuf::from("cli.csv"));
    assert_eq!(settings.output_dir, PathBuf::from("config_out"));
    assert_eq!(settings.load_options.delimiter, b';');
    assert!(!settings.load_options.has_header);
    assert_eq!(settings.load_options.null_values, ["NA", "-"]);
    assert_eq!(settings.preview_rows, 5);

    let args = Args::parse_from(["rfmdash", "--output-dir", "cli_out"]);
    let settings = DashboardSettings::from_args_and_config(&args, &config);
    assert_eq!(settings.data_path, PathBuf::from("from_config.csv"));
    assert_eq!(settings.output_dir, PathBuf::from("cli_out"));
    assert!(settings.load_options.has_header);
}

#[test]
fn test_export_sizes_come_from_config() {
    let mut config = AppConfig::default();
    config.output.bar_size = [800, 400];
    config.output.currency_symbol = "€".to_string();
    let args = Args::parse_from(["rfmdash"]);

    let settings = DashboardSettings::from_args_and_config(&args, &config);
    assert_eq!(settings.export_options.bar_size, (800, 400));
    assert_eq!(settings.export_options.heatmap_size, (1200, 750));
    assert_eq!(settings.chart_options.currency_symbol, "€");
}
