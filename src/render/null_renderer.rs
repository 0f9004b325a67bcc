use crate::error::ChartResult;
use crate::render::{RenderFrame, Renderer};

/// No-op renderer used by tests and headless hosts.
///
/// It still validates frame content so invalid geometry is caught before a
/// real backend sees it.
#[derive(Debug, Default)]
pub struct NullRenderer {
    pub last_wedge_count: usize,
    pub last_text_count: usize,
    pub render_calls: usize,
}

impl Renderer for NullRenderer {
    fn render(&mut self, frame: &RenderFrame) -> ChartResult<()> {
        frame.validate()?;
        self.last_wedge_count = frame.wedges.len();
        self.last_text_count = frame.texts.len();
        self.render_calls += 1;
        Ok(())
    }
}
