use hoverchart::viz::{self, to_svg_string};
use hoverchart::{ChartConfig, ChartController, Loader};
use std::fs;

const WEIGHT: &str = "tests/data/weight.json";

#[test]
fn render_static_chart_to_svg() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("weight.svg");

    let chart = viz::render_to_file(WEIGHT, "weight", 600, None, ChartConfig::default(), &out)
        .unwrap();
    assert!(!chart.tooltip().is_visible());

    let svg = fs::read_to_string(&out).unwrap();
    assert!(svg.starts_with("<svg") || svg.contains("<svg id=\"weight\""));
    assert!(svg.contains("id=\"weight\""));
    assert!(svg.contains("Body weight"));
    assert!(svg.contains("Weight"));
    assert!(svg.contains("Date"));
    // Labels come out at the configured 12px, not shrunk by the backend.
    assert!(svg.contains("font-size=\"12\""));
    // Tooltip is hidden until the pointer enters.
    assert!(!svg.contains(" kg<"));
}

#[test]
fn hover_snapshot_includes_tooltip_labels() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("hover.svg");

    // 10px right of 2021-03-05 on a 510px-wide plot area.
    let chart = viz::render_to_file(
        WEIGHT,
        "weight",
        600,
        Some(117.0),
        ChartConfig::default(),
        &out,
    )
    .unwrap();
    assert!(chart.tooltip().is_visible());

    let svg = fs::read_to_string(&out).unwrap();
    assert!(svg.contains("17 kg"));
    assert!(svg.contains("05 Mar"));
}

#[test]
fn custom_config_changes_geometry() {
    let config = ChartConfig::from_toml_str(
        r#"
        max_plot_height = 100.0
        [margins]
        left = 100.0
        "#,
    )
    .unwrap();
    let chart = ChartController::load(&Loader::default(), WEIGHT, "c", 800, config).unwrap();
    assert_eq!(chart.layout().plot_width, 670.0);
    assert_eq!(chart.layout().plot_height, 100.0);

    let svg = to_svg_string(chart.surface()).unwrap();
    assert!(svg.contains("id=\"c\""));
}

#[test]
fn missing_source_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("never.svg");
    let err = viz::render_to_file(
        "tests/data/does-not-exist.json",
        "x",
        600,
        None,
        ChartConfig::default(),
        &out,
    );
    assert!(err.is_err());
    assert!(!out.exists());
}
