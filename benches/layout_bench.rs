use budget_charts::api::{ArcChartOptions, ArcChartRenderer, SurfaceTree};
use budget_charts::core::{
    ArcShape, BudgetCategory, BudgetSnapshot, ChartDataset, Palette, PieLayout, PieSort,
};
use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;

fn categories(count: usize) -> Vec<BudgetCategory> {
    (0..count)
        .map(|i| BudgetCategory::new(format!("category-{i}"), 10.0 + (i % 97) as f64 * 3.5))
        .collect()
}

fn bench_reshape_10k(c: &mut Criterion) {
    let categories = categories(10_000);
    let palette = Palette::default_pie();

    c.bench_function("reshape_10k", |b| {
        b.iter(|| {
            let dataset =
                ChartDataset::from_categories(black_box(&categories), black_box(&palette));
            let _ = dataset.proportions();
        })
    });
}

fn bench_pie_layout_10k(c: &mut Criterion) {
    let values: Vec<f64> = categories(10_000).iter().map(BudgetCategory::weight).collect();
    let input = PieLayout::default();
    let sorted = PieLayout::default().with_sort(PieSort::ValueDescending);

    c.bench_function("pie_layout_input_order_10k", |b| {
        b.iter(|| {
            let _ = input.compute(black_box(&values)).expect("layout");
        })
    });
    c.bench_function("pie_layout_descending_10k", |b| {
        b.iter(|| {
            let _ = sorted.compute(black_box(&values)).expect("layout");
        })
    });
}

fn bench_arc_paths_1k(c: &mut Criterion) {
    let values: Vec<f64> = categories(1_000).iter().map(BudgetCategory::weight).collect();
    let slices = PieLayout::default().compute(&values).expect("layout");
    let shape = ArcShape::new(95.0, 190.0).expect("valid shape");

    c.bench_function("arc_svg_paths_1k", |b| {
        b.iter(|| {
            for slice in &slices {
                let _ = shape.svg_path(black_box(*slice));
            }
        })
    });
}

fn bench_snapshot_to_arc_chart_2k(c: &mut Criterion) {
    let document = serde_json::json!({
        "myBudget": categories(2_000)
            .iter()
            .map(|category| serde_json::json!({"title": category.title, "budget": category.amount}))
            .collect::<Vec<_>>()
    })
    .to_string();
    let tree = SurfaceTree::home_page();
    let renderer = ArcChartRenderer::bind(&tree, ArcChartOptions::default()).expect("bind");

    c.bench_function("snapshot_to_arc_chart_2k", |b| {
        b.iter(|| {
            let snapshot = BudgetSnapshot::from_json_str(black_box(&document)).expect("parse");
            let _ = renderer.render(&snapshot.categories).expect("render");
        })
    });
}

criterion_group!(
    benches,
    bench_reshape_10k,
    bench_pie_layout_10k,
    bench_arc_paths_1k,
    bench_snapshot_to_arc_chart_2k
);
criterion_main!(benches);
