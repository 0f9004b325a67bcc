use approx::assert_relative_eq;
use budget_charts::ChartError;
use budget_charts::api::{ArcChartOptions, ArcChartRenderer, SurfaceTree};
use budget_charts::core::{BudgetCategory, PieSort, SurfaceId, Viewport};

fn categories() -> Vec<BudgetCategory> {
    vec![
        BudgetCategory::new("Rent", 1000.0),
        BudgetCategory::new("Food", 500.0),
    ]
}

#[test]
fn two_categories_produce_arcs_in_two_to_one_ratio() {
    let tree = SurfaceTree::home_page();
    let renderer = ArcChartRenderer::bind(&tree, ArcChartOptions::default()).expect("bind");
    let summary = renderer.render(&categories()).expect("render");

    assert_eq!(summary.arc_count, 2);
    assert_relative_eq!(summary.spans[0] / summary.spans[1], 2.0, epsilon = 1e-9);

    let container = renderer.container().borrow();
    assert_eq!(container.children().len(), 2);
    for node in container.children() {
        assert_eq!(node.tag, "path");
        assert_eq!(node.attr("transform"), Some("translate(300,200)"));
    }
    assert_eq!(container.children()[0].attr("data-title"), Some("Rent"));
}

#[test]
fn rendering_twice_keeps_only_second_pass() {
    let tree = SurfaceTree::home_page();
    let renderer = ArcChartRenderer::bind(&tree, ArcChartOptions::default()).expect("bind");
    renderer.render(&categories()).expect("first render");

    let second = vec![
        BudgetCategory::new("Gym", 50.0),
        BudgetCategory::new("Books", 25.0),
        BudgetCategory::new("Travel", 25.0),
    ];
    let summary = renderer.render(&second).expect("second render");
    assert_eq!(summary.removed_children, 2);

    let container = renderer.container().borrow();
    let titles: Vec<&str> = container
        .children()
        .iter()
        .filter_map(|node| node.attr("data-title"))
        .collect();
    assert_eq!(titles, vec!["Gym", "Books", "Travel"]);
}

#[test]
fn same_title_gets_same_color_within_a_pass() {
    let tree = SurfaceTree::home_page();
    let renderer = ArcChartRenderer::bind(&tree, ArcChartOptions::default()).expect("bind");
    let graphics = renderer
        .layout(&[
            BudgetCategory::new("Food", 10.0),
            BudgetCategory::new("Rent", 10.0),
            BudgetCategory::new("Food", 5.0),
        ])
        .expect("layout");
    assert_eq!(graphics[0].color, graphics[2].color);
    assert_ne!(graphics[0].color, graphics[1].color);
}

#[test]
fn donut_paths_have_inner_ring() {
    let tree = SurfaceTree::home_page();
    let renderer = ArcChartRenderer::bind(&tree, ArcChartOptions::default()).expect("bind");
    let shape = renderer.shape().expect("shape");
    assert_relative_eq!(shape.outer_radius, 190.0);
    assert_relative_eq!(shape.inner_radius, 95.0);

    let graphics = renderer.layout(&categories()).expect("layout");
    for graphic in &graphics {
        assert!(!graphic.path.contains("L0,0"));
        assert!(graphic.path.ends_with('Z'));
    }
}

#[test]
fn empty_list_clears_container() {
    let tree = SurfaceTree::home_page();
    let renderer = ArcChartRenderer::bind(&tree, ArcChartOptions::default()).expect("bind");
    renderer.render(&categories()).expect("render");
    let summary = renderer.render(&[]).expect("empty render");
    assert_eq!(summary.arc_count, 0);
    assert!(renderer.container().borrow().children().is_empty());
}

#[test]
fn descending_sort_moves_largest_first() {
    let tree = SurfaceTree::home_page();
    let mut options = ArcChartOptions::default();
    options.layout.sort = PieSort::ValueDescending;
    let renderer = ArcChartRenderer::bind(&tree, options).expect("bind");
    let graphics = renderer
        .layout(&[
            BudgetCategory::new("Small", 1.0),
            BudgetCategory::new("Large", 9.0),
        ])
        .expect("layout");
    assert_eq!(graphics[1].slice.start_angle, 0.0);
    assert!(graphics[0].slice.start_angle > 0.0);
}

#[test]
fn missing_container_fails_binding() {
    let mut tree = SurfaceTree::new();
    tree.insert_canvas("d3Graph", Viewport::new(600, 400));
    let err = ArcChartRenderer::bind(&tree, ArcChartOptions::default()).expect_err("wrong kind");
    assert!(matches!(err, ChartError::SurfaceMissing { .. }));
}

#[test]
fn invalid_inner_ratio_leaves_container_untouched() {
    let mut tree = SurfaceTree::new();
    let container = tree.insert_svg("donut", Viewport::new(300, 300));
    let options = ArcChartOptions {
        surface_id: SurfaceId::from("donut"),
        inner_radius_ratio: 1.5,
        ..ArcChartOptions::default()
    };
    let renderer = ArcChartRenderer::bind(&tree, options).expect("bind");
    assert!(renderer.render(&categories()).is_err());
    assert!(container.borrow().children().is_empty());
}
