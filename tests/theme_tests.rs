use candlewick::error::ChartError;
use candlewick::render::{Color, Theme, parse_hex_color};

#[test]
fn hex_literals_parse_to_normalized_channels() {
    let color = parse_hex_color("#ff8000").expect("color");
    assert!((color.red - 1.0).abs() <= 1e-9);
    assert!((color.green - 128.0 / 255.0).abs() <= 1e-9);
    assert_eq!(color.blue, 0.0);
    assert_eq!(color.alpha, 1.0);

    let translucent = parse_hex_color("#00000080").expect("color");
    assert!((translucent.alpha - 128.0 / 255.0).abs() <= 1e-9);
}

#[test]
fn malformed_literals_are_rejected() {
    assert!(parse_hex_color("ff8000").is_err());
    assert!(parse_hex_color("#ff80").is_err());
    assert!(parse_hex_color("#zzzzzz").is_err());
}

#[test]
fn tokens_resolve_against_the_theme_table() {
    let mut theme = Theme::empty();
    theme
        .set_token("--accent", Color::rgb(0.1, 0.2, 0.3))
        .expect("token");

    assert_eq!(theme.resolve("--accent").expect("resolve"), Color::rgb(0.1, 0.2, 0.3));
    assert_eq!(
        theme.resolve("#336699").expect("resolve"),
        parse_hex_color("#336699").expect("color")
    );
}

#[test]
fn unknown_tokens_are_reported_by_name() {
    let theme = Theme::empty();
    let result = theme.resolve("--missing");
    assert!(matches!(result, Err(ChartError::UnknownColorToken(name)) if name == "--missing"));
}

#[test]
fn token_names_must_carry_the_prefix() {
    let mut theme = Theme::empty();
    assert!(theme.set_token("accent", Color::rgb(0.0, 0.0, 0.0)).is_err());
}

#[test]
fn default_theme_covers_the_chart_palette() {
    let theme = Theme::default();
    for token in ["--up", "--down", "--grid", "--label", "--crosshair", "--panel", "--text"] {
        assert!(theme.resolve(token).is_ok(), "missing token {token}");
    }
}
