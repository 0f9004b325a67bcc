use std::f64::consts::TAU;

use budget_charts::core::{PieLayout, PieSort};
use proptest::prelude::*;

proptest! {
    #[test]
    fn spans_cover_full_circle_and_stay_proportional(
        values in prop::collection::vec(0.01f64..10_000.0, 1..48),
        descending in any::<bool>()
    ) {
        let sort = if descending { PieSort::ValueDescending } else { PieSort::Input };
        let slices = PieLayout::default().with_sort(sort).compute(&values).expect("layout");
        prop_assert_eq!(slices.len(), values.len());

        let total: f64 = values.iter().sum();
        let covered: f64 = slices.iter().map(|slice| slice.span()).sum();
        prop_assert!((covered - TAU).abs() <= 1e-9);

        for (i, slice) in slices.iter().enumerate() {
            prop_assert_eq!(slice.index, i);
            let expected = values[i] / total * TAU;
            prop_assert!((slice.span() - expected).abs() <= 1e-9);
            prop_assert!(slice.start_angle >= -1e-12);
            prop_assert!(slice.end_angle <= TAU + 1e-9);
        }
    }

    #[test]
    fn input_order_slices_are_contiguous(
        values in prop::collection::vec(0.0f64..1_000.0, 2..32)
    ) {
        let slices = PieLayout::default().compute(&values).expect("layout");
        for pair in slices.windows(2) {
            prop_assert!((pair[0].end_angle - pair[1].start_angle).abs() <= 1e-12);
        }
    }
}
