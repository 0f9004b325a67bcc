use serde::{Deserialize, Serialize};

use crate::core::category::{BudgetCategory, sanitize_weight};
use crate::core::palette::{Color, Palette};
use crate::error::{ChartError, ChartResult};

/// Pie-chart input: index-aligned amounts, titles and slice colors.
///
/// Built in full from one response and never patched afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartDataset {
    pub data: Vec<f64>,
    pub labels: Vec<String>,
    pub background_colors: Vec<Color>,
}

impl ChartDataset {
    #[must_use]
    pub fn from_categories(categories: &[BudgetCategory], palette: &Palette) -> Self {
        let mut data = Vec::with_capacity(categories.len());
        let mut labels = Vec::with_capacity(categories.len());
        let mut background_colors = Vec::with_capacity(categories.len());
        for (index, category) in categories.iter().enumerate() {
            data.push(category.amount);
            labels.push(category.title.clone());
            background_colors.push(palette.color_for_index(index));
        }
        Self {
            data,
            labels,
            background_colors,
        }
    }

    /// Checks that amounts, titles and colors stay index aligned.
    pub fn validate(&self) -> ChartResult<()> {
        if self.labels.len() != self.data.len() || self.background_colors.len() != self.data.len()
        {
            return Err(ChartError::InvalidData(format!(
                "dataset sequences must align: data={}, labels={}, colors={}",
                self.data.len(),
                self.labels.len(),
                self.background_colors.len()
            )));
        }
        Ok(())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Sum of slice weights (negative and non-finite amounts count as zero).
    ///
    /// May overflow to infinity for amounts near `f64::MAX`; `proportions` does not.
    #[must_use]
    pub fn total(&self) -> f64 {
        self.data.iter().copied().map(sanitize_weight).sum()
    }

    /// Share of the total per slice. All zeros when the total is zero.
    #[must_use]
    pub fn proportions(&self) -> Vec<f64> {
        let weights: Vec<f64> = self.data.iter().copied().map(sanitize_weight).collect();
        let largest = weights.iter().copied().fold(0.0, f64::max);
        if largest <= 0.0 {
            return vec![0.0; weights.len()];
        }
        let relative: Vec<f64> = weights.iter().map(|weight| weight / largest).collect();
        let total: f64 = relative.iter().sum();
        relative.iter().map(|weight| weight / total).collect()
    }
}
