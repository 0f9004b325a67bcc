pub mod arc;
pub mod category;
pub mod dataset;
pub mod palette;
pub mod pie_layout;
pub mod types;

pub use arc::{ArcShape, polar};
pub use category::{BudgetCategory, BudgetDocument, BudgetSnapshot};
pub use dataset::ChartDataset;
pub use palette::{Color, OrdinalColorScale, Palette};
pub use pie_layout::{ArcSlice, PieLayout, PieSort};
pub use types::{Point, SurfaceId, SurfaceKind, Viewport};
