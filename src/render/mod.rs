mod frame;
mod null_renderer;
mod primitives;
mod svg;

pub use crate::core::Color;
pub use frame::RenderFrame;
pub use null_renderer::NullRenderer;
pub use primitives::{RectPrimitive, TextHAlign, TextPrimitive, WedgePrimitive};
pub use svg::{SvgNode, SvgRenderer, svg_document};

use crate::error::ChartResult;

/// Contract implemented by any rendering backend.
///
/// Backends receive a fully materialized, deterministic `RenderFrame` so
/// drawing code remains isolated from budget data and page lifecycle.
pub trait Renderer {
    fn render(&mut self, frame: &RenderFrame) -> ChartResult<()>;
}

#[cfg(feature = "cairo-backend")]
mod cairo_backend;
#[cfg(feature = "cairo-backend")]
pub use cairo_backend::{CairoContextRenderer, CairoRenderStats, CairoRenderer};
