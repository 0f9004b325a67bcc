use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

/// One budget line item as served by the budget endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetCategory {
    pub title: String,
    #[serde(rename = "budget")]
    pub amount: f64,
}

impl BudgetCategory {
    #[must_use]
    pub fn new(title: impl Into<String>, amount: f64) -> Self {
        Self {
            title: title.into(),
            amount,
        }
    }

    pub fn from_decimal(title: impl Into<String>, amount: Decimal) -> ChartResult<Self> {
        let amount = amount.to_f64().ok_or_else(|| {
            ChartError::InvalidData("budget amount cannot be represented as f64".to_owned())
        })?;
        Ok(Self::new(title, amount))
    }

    /// Amount used as slice weight. Negative and non-finite amounts weigh nothing.
    #[must_use]
    pub fn weight(&self) -> f64 {
        sanitize_weight(self.amount)
    }
}

#[must_use]
pub(crate) fn sanitize_weight(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        0.0
    }
}

/// Wire shape of the budget document: `{ "myBudget": [ { "title", "budget" }, ... ] }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetDocument {
    #[serde(rename = "myBudget", default)]
    pub my_budget: Option<Vec<BudgetCategory>>,
}

impl BudgetDocument {
    #[must_use]
    pub fn new(categories: Vec<BudgetCategory>) -> Self {
        Self {
            my_budget: Some(categories),
        }
    }

    /// Decodes a response body, requiring a non-null `myBudget` list.
    pub fn parse_categories(body: &str) -> ChartResult<Vec<BudgetCategory>> {
        let document: Self = serde_json::from_str(body)
            .map_err(|e| ChartError::Schema(format!("failed to decode budget document: {e}")))?;
        document.into_categories()
    }

    pub fn into_categories(self) -> ChartResult<Vec<BudgetCategory>> {
        self.my_budget
            .ok_or_else(|| ChartError::Schema("field `myBudget` is missing or null".to_owned()))
    }

    pub fn to_json_pretty(&self) -> ChartResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| {
            ChartError::InvalidData(format!("failed to serialize budget document: {e}"))
        })
    }
}

/// Categories from one successful read, stamped with arrival time.
#[derive(Debug, Clone, PartialEq)]
pub struct BudgetSnapshot {
    pub categories: Vec<BudgetCategory>,
    pub fetched_at: DateTime<Utc>,
}

impl BudgetSnapshot {
    #[must_use]
    pub fn new(categories: Vec<BudgetCategory>) -> Self {
        Self {
            categories,
            fetched_at: Utc::now(),
        }
    }

    pub fn from_json_str(body: &str) -> ChartResult<Self> {
        BudgetDocument::parse_categories(body).map(Self::new)
    }

    #[must_use]
    pub fn total(&self) -> f64 {
        self.categories.iter().map(BudgetCategory::weight).sum()
    }
}
