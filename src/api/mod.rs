//! Stateful side of the crate: surfaces, chart renderers, the budget read
//! and the page lifecycle tying them together.

mod arc_chart;
mod cancellation;
mod config;
mod diagnostics;
mod fetch;
mod page;
mod pie_chart;
mod source;
mod surface;

pub use arc_chart::{ArcChartOptions, ArcChartRenderer, ArcGraphic, ArcRenderSummary};
pub use cancellation::CancellationToken;
pub use config::BudgetPageConfig;
pub use diagnostics::{
    Diagnostic, DiagnosticLog, DiagnosticSink, PipelineStage, TracingDiagnosticSink,
};
pub use fetch::{FetchAdapter, PendingFetch};
pub use page::{BudgetPage, MountStatus, RenderReport, RenderStatus};
pub use pie_chart::{PieChartOptions, PieChartRenderer, PieRenderSummary};
#[cfg(feature = "http-source")]
pub use source::HttpBudgetSource;
pub use source::{BudgetSource, EndpointConfig, FileBudgetSource, StaticBudgetSource};
pub use surface::{
    AttachOutcome, CanvasHandle, CanvasSurface, DEFAULT_ARC_SURFACE_ID, DEFAULT_PIE_SURFACE_ID,
    PieChartInstance, Surface, SurfaceTree, SvgContainer, SvgContainerHandle,
};
