//! budget-charts: fetches a personal budget document and renders it twice,
//! as a proportional pie chart and as a donut arc chart.
//!
//! `core` holds pure data and geometry, `render` turns frames into pixels or
//! SVG, and `api` owns surfaces, the budget read and the page lifecycle.

pub mod api;
pub mod core;
pub mod error;
pub mod render;
pub mod telemetry;

#[cfg(feature = "gtk4-adapter")]
pub mod platform_gtk;

pub use api::{BudgetPage, BudgetPageConfig};
pub use error::{ChartError, ChartResult};
