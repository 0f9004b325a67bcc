use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::{ArcShape, ChartDataset, Color, Palette, PieLayout, Point, SurfaceId, Viewport};
use crate::error::{ChartError, ChartResult};
use crate::render::{RectPrimitive, RenderFrame, Renderer, TextHAlign, TextPrimitive, WedgePrimitive};

use super::surface::{CanvasHandle, DEFAULT_PIE_SURFACE_ID, SurfaceTree};

const PIE_MARGIN_PX: f64 = 10.0;
const LEGEND_WIDTH_PX: f64 = 160.0;
const LEGEND_PADDING_PX: f64 = 8.0;
const LEGEND_SWATCH_PX: f64 = 12.0;
const LEGEND_ROW_HEIGHT_PX: f64 = 20.0;
const UNTITLED_LABEL: &str = "(untitled)";

/// Presentation options of the pie chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PieChartOptions {
    #[serde(default = "default_pie_surface_id")]
    pub surface_id: SurfaceId,
    #[serde(default = "Palette::default_pie")]
    pub palette: Palette,
    #[serde(default = "default_show_legend")]
    pub show_legend: bool,
    #[serde(default = "default_border_width")]
    pub border_width: f64,
    #[serde(default = "default_border_color")]
    pub border_color: Color,
    #[serde(default = "default_legend_font_size")]
    pub legend_font_size_px: f64,
    #[serde(default)]
    pub layout: PieLayout,
}

impl Default for PieChartOptions {
    fn default() -> Self {
        Self {
            surface_id: default_pie_surface_id(),
            palette: Palette::default_pie(),
            show_legend: default_show_legend(),
            border_width: default_border_width(),
            border_color: default_border_color(),
            legend_font_size_px: default_legend_font_size(),
            layout: PieLayout::default(),
        }
    }
}

fn default_pie_surface_id() -> SurfaceId {
    SurfaceId::from(DEFAULT_PIE_SURFACE_ID)
}

fn default_show_legend() -> bool {
    true
}

fn default_border_width() -> f64 {
    2.0
}

fn default_border_color() -> Color {
    Color::rgb(1.0, 1.0, 1.0)
}

fn default_legend_font_size() -> f64 {
    12.0
}

/// What one pie chart draw pass produced.
#[derive(Debug, Clone, PartialEq)]
pub struct PieRenderSummary {
    pub instance_id: u64,
    pub disposed_instance_id: Option<u64>,
    pub slice_count: usize,
    pub proportions: Vec<f64>,
}

/// Draws a proportional pie chart of a `ChartDataset` onto a bound canvas.
#[derive(Debug)]
pub struct PieChartRenderer {
    canvas: CanvasHandle,
    options: PieChartOptions,
}

impl PieChartRenderer {
    #[must_use]
    pub fn new(canvas: CanvasHandle, options: PieChartOptions) -> Self {
        Self { canvas, options }
    }

    /// Resolves `options.surface_id` in the tree once.
    pub fn bind(tree: &SurfaceTree, options: PieChartOptions) -> ChartResult<Self> {
        let canvas = tree.canvas(&options.surface_id)?;
        debug!(surface_id = %options.surface_id, "bound pie chart canvas");
        Ok(Self::new(canvas, options))
    }

    #[must_use]
    pub fn options(&self) -> &PieChartOptions {
        &self.options
    }

    #[must_use]
    pub fn canvas(&self) -> &CanvasHandle {
        &self.canvas
    }

    /// Builds the draw frame for `dataset` without touching the canvas.
    pub fn build_frame(&self, dataset: &ChartDataset) -> ChartResult<RenderFrame> {
        dataset.validate()?;
        let viewport = self.canvas.borrow().viewport();
        if !viewport.is_valid() {
            return Err(ChartError::InvalidViewport {
                width: viewport.width,
                height: viewport.height,
            });
        }

        let width = f64::from(viewport.width);
        let height = f64::from(viewport.height);
        let legend_width = if self.options.show_legend && !dataset.is_empty() {
            LEGEND_WIDTH_PX.min(width / 3.0)
        } else {
            0.0
        };
        let plot_width = width - legend_width;
        let radius = plot_width.min(height) / 2.0 - PIE_MARGIN_PX;
        let shape = ArcShape::new(0.0, radius).map_err(|_| ChartError::InvalidData(format!(
            "canvas {}x{} is too small for a pie chart",
            viewport.width, viewport.height
        )))?;
        let center = Point::new(plot_width / 2.0, height / 2.0);

        let mut frame = RenderFrame::new(viewport);
        for slice in self.options.layout.compute(&dataset.data)? {
            if slice.is_empty() {
                continue;
            }
            let wedge = WedgePrimitive::new(
                center,
                shape,
                slice,
                dataset.background_colors[slice.index],
            )
            .with_stroke(self.options.border_color, self.options.border_width);
            frame.wedges.push(wedge);
        }

        if legend_width > 0.0 {
            push_legend(&mut frame, dataset, plot_width, &self.options);
        }
        Ok(frame)
    }

    /// Draws `dataset` through `backend` and attaches the result to the canvas,
    /// disposing any chart previously attached there.
    pub fn render<R: Renderer>(
        &self,
        dataset: &ChartDataset,
        backend: &mut R,
    ) -> ChartResult<PieRenderSummary> {
        let frame = self.build_frame(dataset)?;
        backend.render(&frame)?;
        let slice_count = frame.wedges.len();
        let outcome = self
            .canvas
            .borrow_mut()
            .attach(frame, dataset.clone());
        debug!(
            surface_id = %self.options.surface_id,
            instance_id = outcome.instance_id,
            slice_count,
            "rendered pie chart"
        );
        Ok(PieRenderSummary {
            instance_id: outcome.instance_id,
            disposed_instance_id: outcome.disposed_instance_id,
            slice_count,
            proportions: dataset.proportions(),
        })
    }

    #[must_use]
    pub fn viewport(&self) -> Viewport {
        self.canvas.borrow().viewport()
    }
}

fn push_legend(
    frame: &mut RenderFrame,
    dataset: &ChartDataset,
    left: f64,
    options: &PieChartOptions,
) {
    let text_color = Color::rgb(0.2, 0.2, 0.2);
    let x = left + LEGEND_PADDING_PX;
    for (row, (label, color)) in dataset
        .labels
        .iter()
        .zip(&dataset.background_colors)
        .enumerate()
    {
        let top = LEGEND_PADDING_PX + row as f64 * LEGEND_ROW_HEIGHT_PX;
        frame.rects.push(RectPrimitive::new(
            x,
            top,
            LEGEND_SWATCH_PX,
            LEGEND_SWATCH_PX,
            *color,
        ));
        let text = if label.is_empty() {
            UNTITLED_LABEL
        } else {
            label.as_str()
        };
        frame.texts.push(TextPrimitive::new(
            text,
            x + LEGEND_SWATCH_PX + LEGEND_PADDING_PX,
            top + LEGEND_SWATCH_PX / 2.0,
            options.legend_font_size_px,
            text_color,
            TextHAlign::Left,
        ));
    }
}
