use std::f64::consts::TAU;

use approx::assert_relative_eq;
use budget_charts::BudgetPageConfig;
use budget_charts::core::{Palette, PieSort};

#[test]
fn empty_json_yields_home_page_defaults() {
    let config = BudgetPageConfig::from_json_str("{}").expect("defaults");
    assert_eq!(config.endpoint.url(), "http://localhost:3000/budget");
    assert_eq!(config.endpoint.timeout_ms, None);
    assert_eq!(config.pie.surface_id.as_str(), "myChart");
    assert_eq!(config.arc.surface_id.as_str(), "d3Graph");
    assert_eq!(config.pie.palette, Palette::default_pie());
    assert_eq!(config.arc.palette, Palette::default_arc());
    assert!(config.pie.show_legend);
    assert_relative_eq!(config.arc.inner_radius_ratio, 0.5);
    assert_relative_eq!(config.arc.layout.end_angle, TAU);
    assert_eq!(config.arc.layout.sort, PieSort::Input);
}

#[test]
fn partial_json_overrides_only_named_fields() {
    let config = BudgetPageConfig::from_json_str(
        r##"{
            "endpoint": { "base_url": "https://budget.example.org/", "timeout_ms": 2500 },
            "pie": { "palette": ["#112233", "#445566"], "show_legend": false },
            "arc": { "surface_id": "donut", "layout": { "sort": "value_descending" } }
        }"##,
    )
    .expect("partial config");

    assert_eq!(config.endpoint.url(), "https://budget.example.org/budget");
    assert_eq!(config.endpoint.timeout_ms, Some(2500));
    assert_eq!(config.pie.palette.len(), 2);
    assert!(!config.pie.show_legend);
    assert_relative_eq!(config.pie.border_width, 2.0);
    assert_eq!(config.arc.surface_id.as_str(), "donut");
    assert_eq!(config.arc.layout.sort, PieSort::ValueDescending);
    assert_relative_eq!(config.arc.layout.start_angle, 0.0);
    assert_relative_eq!(config.arc.layout.end_angle, TAU);
}

#[test]
fn invalid_values_are_rejected() {
    assert!(BudgetPageConfig::from_json_str(r#"{"arc":{"inner_radius_ratio":1.0}}"#).is_err());
    assert!(BudgetPageConfig::from_json_str(r#"{"pie":{"palette":[]}}"#).is_err());
    assert!(BudgetPageConfig::from_json_str(r#"{"pie":{"border_color":"red"}}"#).is_err());
    assert!(BudgetPageConfig::from_json_str(r#"{"endpoint":{"base_url":"  "}}"#).is_err());
    assert!(BudgetPageConfig::from_json_str("not json").is_err());
    assert!(
        BudgetPageConfig::from_json_str(
            r#"{"arc":{"layout":{"start_angle":6.2831853,"end_angle":0}}}"#
        )
        .is_err()
    );
}

#[test]
fn builder_output_survives_json() {
    let config = BudgetPageConfig::new()
        .with_endpoint("http://127.0.0.1:8080", "api/budget")
        .with_timeout_ms(Some(1000))
        .with_pie_surface("pie")
        .with_arc_surface("arc")
        .with_pie_legend(false)
        .with_arc_inner_radius_ratio(0.25)
        .with_arc_sort(PieSort::ValueDescending);
    config.validate().expect("valid builder config");

    let json = config.to_json_pretty().expect("serialize");
    let restored = BudgetPageConfig::from_json_str(&json).expect("deserialize");

    assert_eq!(restored.endpoint, config.endpoint);
    assert_eq!(restored.pie.surface_id, config.pie.surface_id);
    assert_eq!(restored.arc.surface_id, config.arc.surface_id);
    assert_eq!(restored.pie.palette, config.pie.palette);
    assert_eq!(restored.pie.show_legend, config.pie.show_legend);
    assert_eq!(restored.arc.layout.sort, PieSort::ValueDescending);
    assert_relative_eq!(restored.arc.inner_radius_ratio, 0.25);
}

#[test]
fn reversed_layout_range_fails_validation() {
    let mut config = BudgetPageConfig::new();
    config.pie.layout = config.pie.layout.with_angles(TAU, 0.0);
    assert!(config.validate().is_err());
}
