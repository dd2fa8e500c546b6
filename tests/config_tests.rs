use pulse_chart::ChartConfig;
use pulse_chart::api::RenderStyle;
use pulse_chart::render::Color;

#[test]
fn config_round_trips_through_json() {
    let config = ChartConfig::default()
        .with_visible_window_size(120)
        .with_default_band(60.0, 140.0)
        .with_zoom_debounce_ms(150);

    let json = config.to_json_pretty().expect("serialize");
    let parsed = ChartConfig::from_json_str(&json).expect("parse");
    assert_eq!(parsed.visible_window_size, 120);
    assert_eq!(parsed.default_min_value, 60.0);
    assert_eq!(parsed.default_max_value, 140.0);
    assert_eq!(parsed.zoom_debounce_ms, 150);
    assert_eq!(
        parsed.style.background_color.to_rgba8(),
        config.style.background_color.to_rgba8()
    );
}

#[test]
fn empty_json_yields_defaults() {
    let config = ChartConfig::from_json_str("{}").expect("parse");
    assert_eq!(config, ChartConfig::default());
    assert_eq!(config.visible_window_size, 60);
    assert_eq!(config.min_visible_points, 10);
    assert_eq!(config.pan_threshold_px, 30.0);
    assert_eq!(config.zoom_threshold_px, 10.0);
    assert_eq!(config.style.series_stroke_width, 2.0);
}

#[test]
fn inverted_default_band_is_rejected() {
    let config = ChartConfig::default().with_default_band(100.0, 70.0);
    assert!(config.validate().is_err());
    assert!(config.range_defaults().is_err());
}

#[test]
fn malformed_json_is_rejected() {
    assert!(ChartConfig::from_json_str("{ \"visible_window_size\": ").is_err());
    assert!(ChartConfig::from_json_str(r#"{ "zoom_threshold_px": -1.0 }"#).is_err());
}

#[test]
fn style_rejects_non_positive_stroke() {
    let style = RenderStyle {
        series_stroke_width: 0.0,
        ..RenderStyle::default()
    };
    assert!(style.validate().is_err());
    assert!(ChartConfig::default().with_style(style).validate().is_err());
}

#[test]
fn style_rejects_out_of_range_color() {
    let style = RenderStyle {
        background_color: Color::rgb(1.5, 0.0, 0.0),
        ..RenderStyle::default()
    };
    assert!(style.validate().is_err());
}
