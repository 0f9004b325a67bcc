use std::f64::consts::TAU;

use approx::assert_relative_eq;
use budget_charts::ChartError;
use budget_charts::api::{PieChartOptions, PieChartRenderer, SurfaceTree};
use budget_charts::core::{BudgetCategory, ChartDataset, Palette, SurfaceId, Viewport};
use budget_charts::render::{NullRenderer, SvgRenderer};

fn dataset(pairs: &[(&str, f64)]) -> ChartDataset {
    let categories: Vec<BudgetCategory> = pairs
        .iter()
        .map(|(title, amount)| BudgetCategory::new(*title, *amount))
        .collect();
    ChartDataset::from_categories(&categories, &Palette::default_pie())
}

#[test]
fn pie_slices_follow_amount_share() {
    let tree = SurfaceTree::home_page();
    let renderer = PieChartRenderer::bind(&tree, PieChartOptions::default()).expect("bind");
    let frame = renderer
        .build_frame(&dataset(&[("Rent", 1000.0), ("Food", 500.0)]))
        .expect("frame");

    assert_eq!(frame.wedges.len(), 2);
    assert!(frame.wedges.iter().all(|wedge| wedge.inner_radius == 0.0));
    assert_relative_eq!(frame.covered_angle(), TAU, epsilon = 1e-9);
    assert_relative_eq!(
        frame.wedges[0].span() / frame.wedges[1].span(),
        2.0,
        epsilon = 1e-9
    );
    assert_eq!(frame.texts.len(), 2);
    assert_eq!(frame.texts[0].text, "Rent");
}

#[test]
fn slice_colors_follow_palette_index() {
    let tree = SurfaceTree::home_page();
    let renderer = PieChartRenderer::bind(&tree, PieChartOptions::default()).expect("bind");
    let data = dataset(&[("A", 1.0), ("B", 1.0), ("C", 1.0)]);
    let frame = renderer.build_frame(&data).expect("frame");
    for (wedge, expected) in frame.wedges.iter().zip(&data.background_colors) {
        assert_eq!(wedge.fill_color, *expected);
    }
}

#[test]
fn rerender_disposes_previous_instance() {
    let tree = SurfaceTree::home_page();
    let renderer = PieChartRenderer::bind(&tree, PieChartOptions::default()).expect("bind");
    let mut backend = NullRenderer::default();
    let data = dataset(&[("Rent", 1000.0), ("Food", 500.0)]);

    let first = renderer.render(&data, &mut backend).expect("first render");
    assert_eq!(first.disposed_instance_id, None);
    let second = renderer.render(&data, &mut backend).expect("second render");
    assert_eq!(second.disposed_instance_id, Some(first.instance_id));

    let canvas = renderer.canvas().borrow();
    assert_eq!(canvas.disposed_count(), 1);
    assert_eq!(
        canvas.attached().map(|instance| instance.id),
        Some(second.instance_id)
    );
    assert_eq!(backend.render_calls, 2);
}

#[test]
fn empty_dataset_renders_empty_chart() {
    let tree = SurfaceTree::home_page();
    let renderer = PieChartRenderer::bind(&tree, PieChartOptions::default()).expect("bind");
    let mut backend = NullRenderer::default();
    let summary = renderer
        .render(&dataset(&[]), &mut backend)
        .expect("empty render succeeds");
    assert_eq!(summary.slice_count, 0);
    assert!(summary.proportions.is_empty());
    let canvas = renderer.canvas().borrow();
    let instance = canvas.attached().expect("instance attached");
    assert!(instance.frame.is_empty());
}

#[test]
fn zero_amounts_draw_no_wedges() {
    let tree = SurfaceTree::home_page();
    let renderer = PieChartRenderer::bind(&tree, PieChartOptions::default()).expect("bind");
    let frame = renderer
        .build_frame(&dataset(&[("Idle", 0.0), ("Rent", 0.0)]))
        .expect("frame");
    assert!(frame.wedges.is_empty());
}

#[test]
fn missing_canvas_fails_binding() {
    let tree = SurfaceTree::new();
    let err = PieChartRenderer::bind(&tree, PieChartOptions::default()).expect_err("no canvas");
    match err {
        ChartError::SurfaceMissing { surface_id, .. } => assert_eq!(surface_id, "myChart"),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn tiny_canvas_is_rejected() {
    let mut tree = SurfaceTree::new();
    tree.insert_canvas("small", Viewport::new(12, 12));
    let options = PieChartOptions {
        surface_id: SurfaceId::from("small"),
        ..PieChartOptions::default()
    };
    let renderer = PieChartRenderer::bind(&tree, options).expect("bind");
    assert!(renderer.build_frame(&dataset(&[("Rent", 1.0)])).is_err());
}

#[test]
fn svg_backend_emits_one_path_per_slice() {
    let tree = SurfaceTree::home_page();
    let renderer = PieChartRenderer::bind(
        &tree,
        PieChartOptions {
            show_legend: false,
            ..PieChartOptions::default()
        },
    )
    .expect("bind");
    let mut backend = SvgRenderer::new();
    renderer
        .render(&dataset(&[("Rent", 3.0), ("Food", 1.0)]), &mut backend)
        .expect("render");
    let paths = backend
        .nodes()
        .iter()
        .filter(|node| node.tag == "path")
        .count();
    assert_eq!(paths, 2);
    assert!(backend.document().is_some());
}
