use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::{
    ArcShape, ArcSlice, BudgetCategory, Color, Palette, PieLayout, Point, SurfaceId,
};
use crate::error::{ChartError, ChartResult};
use crate::render::SvgNode;

use super::surface::{DEFAULT_ARC_SURFACE_ID, SurfaceTree, SvgContainerHandle};

/// Presentation options of the donut arc chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArcChartOptions {
    #[serde(default = "default_arc_surface_id")]
    pub surface_id: SurfaceId,
    #[serde(default = "Palette::default_arc")]
    pub palette: Palette,
    /// Inner radius as a share of the outer radius, in `[0, 1)`.
    #[serde(default = "default_inner_radius_ratio")]
    pub inner_radius_ratio: f64,
    #[serde(default = "default_margin_px")]
    pub margin_px: f64,
    #[serde(default)]
    pub layout: PieLayout,
}

impl Default for ArcChartOptions {
    fn default() -> Self {
        Self {
            surface_id: default_arc_surface_id(),
            palette: Palette::default_arc(),
            inner_radius_ratio: default_inner_radius_ratio(),
            margin_px: default_margin_px(),
            layout: PieLayout::default(),
        }
    }
}

fn default_arc_surface_id() -> SurfaceId {
    SurfaceId::from(DEFAULT_ARC_SURFACE_ID)
}

fn default_inner_radius_ratio() -> f64 {
    0.5
}

fn default_margin_px() -> f64 {
    10.0
}

/// One laid-out category of the donut chart.
#[derive(Debug, Clone, PartialEq)]
pub struct ArcGraphic {
    pub title: String,
    pub slice: ArcSlice,
    pub color: Color,
    pub path: String,
}

/// What one arc chart draw pass produced.
#[derive(Debug, Clone, PartialEq)]
pub struct ArcRenderSummary {
    pub arc_count: usize,
    pub removed_children: usize,
    pub spans: Vec<f64>,
}

/// Draws budget categories as annular arcs into a bound SVG container.
///
/// Every render clears the container first, so re-rendering never stacks arcs.
#[derive(Debug)]
pub struct ArcChartRenderer {
    container: SvgContainerHandle,
    options: ArcChartOptions,
}

impl ArcChartRenderer {
    #[must_use]
    pub fn new(container: SvgContainerHandle, options: ArcChartOptions) -> Self {
        Self { container, options }
    }

    /// Resolves `options.surface_id` in the tree once.
    pub fn bind(tree: &SurfaceTree, options: ArcChartOptions) -> ChartResult<Self> {
        let container = tree.svg(&options.surface_id)?;
        debug!(surface_id = %options.surface_id, "bound arc chart container");
        Ok(Self::new(container, options))
    }

    #[must_use]
    pub fn options(&self) -> &ArcChartOptions {
        &self.options
    }

    #[must_use]
    pub fn container(&self) -> &SvgContainerHandle {
        &self.container
    }

    pub fn shape(&self) -> ChartResult<ArcShape> {
        let ratio = self.options.inner_radius_ratio;
        if !ratio.is_finite() || !(0.0..1.0).contains(&ratio) {
            return Err(ChartError::InvalidData(format!(
                "inner radius ratio must be in [0, 1), got {ratio}"
            )));
        }
        let viewport = self.container.borrow().viewport();
        let outer = viewport.max_radius() - self.options.margin_px;
        ArcShape::new(outer * ratio, outer).map_err(|_| {
            ChartError::InvalidData(format!(
                "svg container {}x{} is too small for the arc chart",
                viewport.width, viewport.height
            ))
        })
    }

    /// Lays out `categories` without touching the container.
    ///
    /// Colors come from a fresh ordinal scale keyed on title, so repeated titles
    /// share a color within one pass.
    pub fn layout(&self, categories: &[BudgetCategory]) -> ChartResult<Vec<ArcGraphic>> {
        let shape = self.shape()?;
        let amounts: Vec<f64> = categories.iter().map(|category| category.amount).collect();
        let slices = self.options.layout.compute(&amounts)?;
        let mut scale = self.options.palette.ordinal_scale();

        Ok(categories
            .iter()
            .zip(slices)
            .map(|(category, slice)| ArcGraphic {
                title: category.title.clone(),
                slice,
                color: scale.color_for(&category.title),
                path: shape.svg_path(slice),
            })
            .collect())
    }

    /// Clears the container and draws one arc per category at its center.
    pub fn render(&self, categories: &[BudgetCategory]) -> ChartResult<ArcRenderSummary> {
        let graphics = self.layout(categories)?;
        let mut container = self.container.borrow_mut();
        let center: Point = container.viewport().center();
        let transform = format!("translate({},{})", center.x, center.y);

        let removed_children = container.clear();
        let mut spans = Vec::with_capacity(graphics.len());
        for graphic in &graphics {
            spans.push(graphic.slice.span());
            container.append(
                SvgNode::path(graphic.path.as_str(), graphic.color)
                    .with_attr("transform", transform.as_str())
                    .with_attr("data-title", graphic.title.as_str()),
            );
        }
        debug!(
            surface_id = %self.options.surface_id,
            arc_count = graphics.len(),
            removed_children,
            "rendered arc chart"
        );
        Ok(ArcRenderSummary {
            arc_count: graphics.len(),
            removed_children,
            spans,
        })
    }
}
