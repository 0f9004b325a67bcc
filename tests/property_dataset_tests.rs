use approx::assert_relative_eq;
use budget_charts::core::{BudgetCategory, ChartDataset, Palette};
use proptest::prelude::*;

proptest! {
    #[test]
    fn reshape_preserves_length_and_order(
        amounts in prop::collection::vec(0.0f64..100_000.0, 0..64)
    ) {
        let categories: Vec<BudgetCategory> = amounts
            .iter()
            .enumerate()
            .map(|(i, amount)| BudgetCategory::new(format!("category-{i}"), *amount))
            .collect();
        let dataset = ChartDataset::from_categories(&categories, &Palette::default_pie());

        prop_assert_eq!(dataset.data.len(), categories.len());
        prop_assert_eq!(dataset.labels.len(), categories.len());
        prop_assert_eq!(dataset.background_colors.len(), categories.len());
        for (i, category) in categories.iter().enumerate() {
            prop_assert_eq!(dataset.data[i], category.amount);
            prop_assert_eq!(&dataset.labels[i], &category.title);
        }
    }

    #[test]
    fn proportions_sum_to_one_when_total_is_positive(
        amounts in prop::collection::vec(0.01f64..50_000.0, 1..64)
    ) {
        let categories: Vec<BudgetCategory> = amounts
            .iter()
            .map(|amount| BudgetCategory::new("x", *amount))
            .collect();
        let dataset = ChartDataset::from_categories(&categories, &Palette::default_pie());
        let sum: f64 = dataset.proportions().iter().sum();
        assert_relative_eq!(sum, 1.0, epsilon = 1e-9);
    }

    #[test]
    fn proportions_sum_to_one_for_amounts_near_f64_max(
        amounts in prop::collection::vec(1e300f64..f64::MAX, 2..16)
    ) {
        let categories: Vec<BudgetCategory> = amounts
            .iter()
            .map(|amount| BudgetCategory::new("huge", *amount))
            .collect();
        let dataset = ChartDataset::from_categories(&categories, &Palette::default_pie());
        let sum: f64 = dataset.proportions().iter().sum();
        assert_relative_eq!(sum, 1.0, epsilon = 1e-9);
    }
}
