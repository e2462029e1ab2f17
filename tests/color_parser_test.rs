use ratatui::style::Color;
use rfmdash::categories::{Rgb, SHIP_BUCKET, VALUE_TIER};
use rfmdash::config::{rgb_to_256_color, rgb_to_basic_ansi, AppConfig, ColorParser, Theme};

fn true_color() -> ColorParser {
    ColorParser::with_capabilities(true, true)
}

#[test]
fn test_parse_named_colors() {
    let parser = true_color();

    assert_eq!(parser.parse("red").unwrap(), Color::Red);
    assert_eq!(parser.parse("CYAN").unwrap(), Color::Cyan);
    assert_eq!(parser.parse("  yellow ").unwrap(), Color::Yellow);
    assert_eq!(parser.parse("bright_red").unwrap(), Color::Indexed(9));
    assert_eq!(parser.parse("bright green").unwrap(), Color::Indexed(10));
    assert_eq!(parser.parse("dark_gray").unwrap(), Color::Indexed(8));
    assert_eq!(parser.parse("light grey").unwrap(), Color::Indexed(7));
    assert_eq!(parser.parse("reset").unwrap(), Color::Reset);
}

#[test]
fn test_parse_indexed_colors() {
    let parser = true_color();

    assert_eq!(parser.parse("indexed(236)").unwrap(), Color::Indexed(236));
    assert_eq!(parser.parse("INDEXED(0)").unwrap(), Color::Indexed(0));
    assert!(parser.parse("indexed(256)").is_err());
    assert!(parser.parse("indexed(abc)").is_err());
    assert!(parser.parse("indexed()").is_err());
}

#[test]
fn test_parse_hex_follows_capabilities() {
    assert_eq!(
        true_color().parse("#1b5e20").unwrap(),
        Color::Rgb(0x1b, 0x5e, 0x20)
    );
    assert_eq!(
        ColorParser::with_capabilities(false, true)
            .parse("#ff0000")
            .unwrap(),
        Color::Indexed(196)
    );
    assert_eq!(
        ColorParser::with_capabilities(false, false)
            .parse("#FF0000")
            .unwrap(),
        Color::Red
    );
}

#[test]
fn test_parse_rejects_bad_input() {
    let parser = true_color();

    assert!(parser.parse("#ff00").is_err());
    assert!(parser.parse("#gggggg").is_err());
    assert!(parser.parse("ff0000").is_err());
    let err = parser.parse("unknowncolor").unwrap_err();
    assert!(err.to_string().contains("Unknown color"));
}

#[test]
fn test_rgb_to_256_color() {
    assert_eq!(rgb_to_256_color(0, 0, 0), 16);
    assert_eq!(rgb_to_256_color(255, 255, 255), 231);
    assert_eq!(rgb_to_256_color(255, 0, 0), 196);
    assert_eq!(rgb_to_256_color(0, 0, 255), 21);
    let gray = rgb_to_256_color(128, 128, 128);
    assert!((232..=255).contains(&gray));
}

#[test]
fn test_rgb_to_basic_ansi() {
    assert_eq!(rgb_to_basic_ansi(10, 10, 10), Color::Black);
    assert_eq!(rgb_to_basic_ansi(250, 250, 250), Color::White);
    assert_eq!(rgb_to_basic_ansi(200, 30, 30), Color::Red);
    assert_eq!(rgb_to_basic_ansi(200, 200, 30), Color::Yellow);
}

#[test]
fn test_theme_palette_uses_category_colors() {
    let config = AppConfig::default();
    let theme = Theme::with_parser(&config.theme, true_color()).unwrap();

    for category in VALUE_TIER.categories.iter().chain(SHIP_BUCKET.categories) {
        let Rgb(r, g, b) = category.color;
        assert_eq!(theme.palette(category.color), Color::Rgb(r, g, b));
    }
    assert_eq!(theme.get("primary"), Color::Cyan);
    assert_eq!(theme.get("controls_bg"), Color::Indexed(236));
    assert_eq!(theme.get("no_such_color"), Color::Reset);
}

#[test]
fn test_theme_rejects_invalid_color() {
    let mut config = AppConfig::default();
    config.theme.colors.warning = "not_a_color".to_string();

    assert!(Theme::with_parser(&config.theme, true_color()).is_err());
}
