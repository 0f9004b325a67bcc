use std::cell::RefCell;
use std::rc::Rc;

use gtk4 as gtk;
use gtk4::prelude::*;
use tracing::warn;

use crate::api::CanvasHandle;
use crate::error::{ChartError, ChartResult};
use crate::render::{CairoContextRenderer, CairoRenderer};

/// Paints the pie chart attached to a canvas surface inside a GTK `DrawingArea`.
pub struct GtkCanvasAdapter {
    drawing_area: gtk::DrawingArea,
    canvas: CanvasHandle,
}

impl GtkCanvasAdapter {
    pub fn new(canvas: CanvasHandle) -> ChartResult<Self> {
        let viewport = canvas.borrow().viewport();
        let width = i32::try_from(viewport.width).map_err(|_| ChartError::InvalidViewport {
            width: viewport.width,
            height: viewport.height,
        })?;
        let height = i32::try_from(viewport.height).map_err(|_| ChartError::InvalidViewport {
            width: viewport.width,
            height: viewport.height,
        })?;
        let renderer = Rc::new(RefCell::new(CairoRenderer::new(width, height)?));

        let drawing_area = gtk::DrawingArea::new();
        drawing_area.set_content_width(width);
        drawing_area.set_content_height(height);

        let draw_canvas = Rc::clone(&canvas);
        drawing_area.set_draw_func(move |_, context, _, _| {
            let surface = draw_canvas.borrow();
            let Some(instance) = surface.attached() else {
                return;
            };
            if let Err(err) = renderer
                .borrow_mut()
                .render_on_cairo_context(context, &instance.frame)
            {
                warn!(error = %err, instance_id = instance.id, "failed to paint pie chart");
            }
        });

        Ok(Self {
            drawing_area,
            canvas,
        })
    }

    #[must_use]
    pub fn drawing_area(&self) -> &gtk::DrawingArea {
        &self.drawing_area
    }

    #[must_use]
    pub fn canvas(&self) -> &CanvasHandle {
        &self.canvas
    }

    /// Schedules a repaint, typically after the page delivered new data.
    pub fn queue_redraw(&self) {
        self.drawing_area.queue_draw();
    }
}
