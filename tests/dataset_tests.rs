use budget_charts::core::{BudgetCategory, BudgetDocument, ChartDataset, Palette};

#[test]
fn rent_and_food_reshape_into_aligned_sequences() {
    let body = r#"{"myBudget":[{"title":"Rent","budget":1000},{"title":"Food","budget":500}]}"#;
    let categories = BudgetDocument::parse_categories(body).expect("valid document");
    let palette = Palette::default_pie();
    let dataset = ChartDataset::from_categories(&categories, &palette);

    assert_eq!(dataset.data, vec![1000.0, 500.0]);
    assert_eq!(dataset.labels, vec!["Rent".to_owned(), "Food".to_owned()]);
    assert_eq!(
        dataset.background_colors,
        vec![palette.color_for_index(0), palette.color_for_index(1)]
    );
    dataset.validate().expect("aligned dataset");
}

#[test]
fn palette_colors_cycle_past_palette_length() {
    let palette = Palette::from_hex_list(&["#ff0000", "#00ff00"]).expect("palette");
    let categories: Vec<BudgetCategory> = (0..5)
        .map(|i| BudgetCategory::new(format!("c{i}"), 1.0))
        .collect();
    let dataset = ChartDataset::from_categories(&categories, &palette);
    let hex: Vec<String> = dataset
        .background_colors
        .iter()
        .map(|color| color.to_hex())
        .collect();
    assert_eq!(hex, vec!["#ff0000", "#00ff00", "#ff0000", "#00ff00", "#ff0000"]);
}

#[test]
fn empty_list_reshapes_to_empty_dataset() {
    let categories = BudgetDocument::parse_categories(r#"{"myBudget":[]}"#).expect("valid");
    let dataset = ChartDataset::from_categories(&categories, &Palette::default_pie());
    assert!(dataset.is_empty());
    assert!(dataset.proportions().is_empty());
    assert_eq!(dataset.total(), 0.0);
}

#[test]
fn misaligned_dataset_fails_validation() {
    let mut dataset = ChartDataset::from_categories(
        &[BudgetCategory::new("Rent", 1.0)],
        &Palette::default_pie(),
    );
    dataset.labels.push("Orphan".to_owned());
    assert!(dataset.validate().is_err());
}

#[test]
fn document_serializes_with_wire_field_names() {
    let document = BudgetDocument::new(vec![BudgetCategory::new("Gym", 25.0)]);
    let json = document.to_json_pretty().expect("serialize");
    assert!(json.contains("\"myBudget\""));
    assert!(json.contains("\"budget\": 25.0"));
}
