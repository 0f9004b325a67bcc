use std::cell::RefCell;
use std::rc::Rc;

use indexmap::IndexMap;
use tracing::debug;

use crate::core::{ChartDataset, SurfaceId, SurfaceKind, Viewport};
use crate::error::{ChartError, ChartResult};
use crate::render::{RenderFrame, SvgNode, svg_document};

pub const DEFAULT_PIE_SURFACE_ID: &str = "myChart";
pub const DEFAULT_ARC_SURFACE_ID: &str = "d3Graph";

pub type CanvasHandle = Rc<RefCell<CanvasSurface>>;
pub type SvgContainerHandle = Rc<RefCell<SvgContainer>>;

/// A pie chart currently attached to a canvas.
#[derive(Debug, Clone, PartialEq)]
pub struct PieChartInstance {
    pub id: u64,
    pub frame: RenderFrame,
    pub dataset: ChartDataset,
}

/// Result of attaching a chart instance to a canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttachOutcome {
    pub instance_id: u64,
    pub disposed_instance_id: Option<u64>,
}

/// Bitmap drawing surface holding at most one pie chart instance.
#[derive(Debug)]
pub struct CanvasSurface {
    viewport: Viewport,
    attached: Option<PieChartInstance>,
    next_instance_id: u64,
    disposed_count: usize,
}

impl CanvasSurface {
    #[must_use]
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            attached: None,
            next_instance_id: 1,
            disposed_count: 0,
        }
    }

    #[must_use]
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    #[must_use]
    pub fn attached(&self) -> Option<&PieChartInstance> {
        self.attached.as_ref()
    }

    /// Number of chart instances disposed on this canvas so far.
    #[must_use]
    pub fn disposed_count(&self) -> usize {
        self.disposed_count
    }

    /// Attaches a new chart instance, disposing whichever one was attached before.
    pub fn attach(&mut self, frame: RenderFrame, dataset: ChartDataset) -> AttachOutcome {
        let disposed_instance_id = self.dispose();
        let instance_id = self.next_instance_id;
        self.next_instance_id += 1;
        self.attached = Some(PieChartInstance {
            id: instance_id,
            frame,
            dataset,
        });
        AttachOutcome {
            instance_id,
            disposed_instance_id,
        }
    }

    /// Disposes the attached instance. Returns its id when one was attached.
    pub fn dispose(&mut self) -> Option<u64> {
        let instance = self.attached.take()?;
        self.disposed_count += 1;
        debug!(instance_id = instance.id, "dispose pie chart instance");
        Some(instance.id)
    }
}

/// Vector container whose children are replaced on each arc chart render.
#[derive(Debug)]
pub struct SvgContainer {
    viewport: Viewport,
    children: Vec<SvgNode>,
}

impl SvgContainer {
    #[must_use]
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            children: Vec::new(),
        }
    }

    #[must_use]
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    #[must_use]
    pub fn children(&self) -> &[SvgNode] {
        &self.children
    }

    pub fn append(&mut self, node: SvgNode) {
        self.children.push(node);
    }

    /// Removes all children and returns how many were removed.
    pub fn clear(&mut self) -> usize {
        let removed = self.children.len();
        self.children.clear();
        removed
    }

    #[must_use]
    pub fn to_document(&self) -> String {
        svg_document(self.viewport, &self.children)
    }
}

#[derive(Debug, Clone)]
pub enum Surface {
    Canvas(CanvasHandle),
    Svg(SvgContainerHandle),
}

impl Surface {
    #[must_use]
    pub fn kind(&self) -> SurfaceKind {
        match self {
            Self::Canvas(_) => SurfaceKind::Canvas,
            Self::Svg(_) => SurfaceKind::Svg,
        }
    }
}

/// The UI tree: named drawing surfaces the chart renderers bind to.
#[derive(Debug, Clone, Default)]
pub struct SurfaceTree {
    surfaces: IndexMap<SurfaceId, Surface>,
}

impl SurfaceTree {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Tree of the budget home page: a 700x400 canvas and a 600x400 SVG container.
    #[must_use]
    pub fn home_page() -> Self {
        let mut tree = Self::new();
        tree.insert_canvas(DEFAULT_PIE_SURFACE_ID, Viewport::new(700, 400));
        tree.insert_svg(DEFAULT_ARC_SURFACE_ID, Viewport::new(600, 400));
        tree
    }

    pub fn insert_canvas(&mut self, id: impl Into<SurfaceId>, viewport: Viewport) -> CanvasHandle {
        let handle = Rc::new(RefCell::new(CanvasSurface::new(viewport)));
        self.surfaces
            .insert(id.into(), Surface::Canvas(Rc::clone(&handle)));
        handle
    }

    pub fn insert_svg(&mut self, id: impl Into<SurfaceId>, viewport: Viewport) -> SvgContainerHandle {
        let handle = Rc::new(RefCell::new(SvgContainer::new(viewport)));
        self.surfaces.insert(id.into(), Surface::Svg(Rc::clone(&handle)));
        handle
    }

    pub fn remove(&mut self, id: &SurfaceId) -> Option<Surface> {
        self.surfaces.shift_remove(id)
    }

    #[must_use]
    pub fn get(&self, id: &SurfaceId) -> Option<&Surface> {
        self.surfaces.get(id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.surfaces.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.surfaces.is_empty()
    }

    pub fn canvas(&self, id: &SurfaceId) -> ChartResult<CanvasHandle> {
        match self.surfaces.get(id) {
            Some(Surface::Canvas(handle)) => Ok(Rc::clone(handle)),
            _ => Err(missing(id, SurfaceKind::Canvas)),
        }
    }

    pub fn svg(&self, id: &SurfaceId) -> ChartResult<SvgContainerHandle> {
        match self.surfaces.get(id) {
            Some(Surface::Svg(handle)) => Ok(Rc::clone(handle)),
            _ => Err(missing(id, SurfaceKind::Svg)),
        }
    }
}

fn missing(id: &SurfaceId, expected: SurfaceKind) -> ChartError {
    ChartError::SurfaceMissing {
        surface_id: id.to_string(),
        expected,
    }
}

#[cfg(test)]
mod tests {
    use super::{CanvasSurface, DEFAULT_ARC_SURFACE_ID, DEFAULT_PIE_SURFACE_ID, SurfaceTree};
    use crate::core::{ChartDataset, SurfaceId, Viewport};
    use crate::error::ChartError;
    use crate::render::RenderFrame;

    fn empty_dataset() -> ChartDataset {
        ChartDataset {
            data: Vec::new(),
            labels: Vec::new(),
            background_colors: Vec::new(),
        }
    }

    #[test]
    fn home_page_exposes_both_surfaces() {
        let tree = SurfaceTree::home_page();
        assert!(tree.canvas(&SurfaceId::from(DEFAULT_PIE_SURFACE_ID)).is_ok());
        assert!(tree.svg(&SurfaceId::from(DEFAULT_ARC_SURFACE_ID)).is_ok());
    }

    #[test]
    fn wrong_kind_counts_as_missing() {
        let tree = SurfaceTree::home_page();
        let err = tree
            .svg(&SurfaceId::from(DEFAULT_PIE_SURFACE_ID))
            .expect_err("canvas is not an svg container");
        assert!(matches!(err, ChartError::SurfaceMissing { .. }));
    }

    #[test]
    fn attach_disposes_previous_instance() {
        let mut canvas = CanvasSurface::new(Viewport::new(10, 10));
        let first = canvas.attach(RenderFrame::new(Viewport::new(10, 10)), empty_dataset());
        assert_eq!(first.disposed_instance_id, None);
        let second = canvas.attach(RenderFrame::new(Viewport::new(10, 10)), empty_dataset());
        assert_eq!(second.disposed_instance_id, Some(first.instance_id));
        assert_eq!(canvas.disposed_count(), 1);
        assert_eq!(canvas.attached().map(|instance| instance.id), Some(second.instance_id));
    }
}
