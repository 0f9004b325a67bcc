use indexmap::IndexMap;

use crate::core::{Color, Viewport};
use crate::error::ChartResult;
use crate::render::{RenderFrame, Renderer, TextHAlign};

/// One SVG element with ordered attributes and optional text content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SvgNode {
    pub tag: String,
    pub attributes: IndexMap<String, String>,
    pub text: Option<String>,
}

impl SvgNode {
    #[must_use]
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            attributes: IndexMap::new(),
            text: None,
        }
    }

    #[must_use]
    pub fn path(d: impl Into<String>, fill: Color) -> Self {
        Self::new("path")
            .with_attr("d", d)
            .with_attr("fill", fill.to_hex())
    }

    #[must_use]
    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    #[must_use]
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    #[must_use]
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    #[must_use]
    pub fn to_markup(&self) -> String {
        let mut out = String::new();
        out.push_str(&format!("<{}", self.tag));
        for (name, value) in &self.attributes {
            out.push_str(&format!(" {name}=\"{}\"", escape(value)));
        }
        match &self.text {
            Some(text) => {
                out.push_str(&format!(">{}</{}>", escape(text), self.tag));
            }
            None => out.push_str("/>"),
        }
        out
    }
}

/// Wraps child nodes into a standalone SVG document.
#[must_use]
pub fn svg_document(viewport: Viewport, nodes: &[SvgNode]) -> String {
    let mut out = format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{}\" height=\"{}\" viewBox=\"0 0 {} {}\">",
        viewport.width, viewport.height, viewport.width, viewport.height
    );
    for node in nodes {
        out.push('\n');
        out.push_str(&node.to_markup());
    }
    out.push_str("\n</svg>\n");
    out
}

fn escape(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(ch),
        }
    }
    out
}

fn fmt_px(value: f64) -> String {
    let text = format!("{value:.2}");
    text.trim_end_matches('0').trim_end_matches('.').to_owned()
}

/// Renderer that turns a frame into SVG nodes.
#[derive(Debug, Default)]
pub struct SvgRenderer {
    viewport: Option<Viewport>,
    nodes: Vec<SvgNode>,
}

impl SvgRenderer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn nodes(&self) -> &[SvgNode] {
        &self.nodes
    }

    /// Last rendered frame as an SVG document; `None` before the first render.
    #[must_use]
    pub fn document(&self) -> Option<String> {
        self.viewport
            .map(|viewport| svg_document(viewport, &self.nodes))
    }
}

impl Renderer for SvgRenderer {
    fn render(&mut self, frame: &RenderFrame) -> ChartResult<()> {
        frame.validate()?;
        let mut nodes = Vec::with_capacity(frame.wedges.len() + frame.rects.len() + frame.texts.len());

        for wedge in &frame.wedges {
            let mut node = SvgNode::path(wedge.shape().svg_path(wedge.slice()), wedge.fill_color)
                .with_attr(
                    "transform",
                    format!(
                        "translate({},{})",
                        fmt_px(wedge.center.x),
                        fmt_px(wedge.center.y)
                    ),
                );
            if wedge.stroke_width > 0.0 {
                node = node
                    .with_attr("stroke", wedge.stroke_color.to_hex())
                    .with_attr("stroke-width", fmt_px(wedge.stroke_width));
            }
            nodes.push(node);
        }

        for rect in &frame.rects {
            nodes.push(
                SvgNode::new("rect")
                    .with_attr("x", fmt_px(rect.x))
                    .with_attr("y", fmt_px(rect.y))
                    .with_attr("width", fmt_px(rect.width))
                    .with_attr("height", fmt_px(rect.height))
                    .with_attr("fill", rect.fill_color.to_hex()),
            );
        }

        for text in &frame.texts {
            let anchor = match text.h_align {
                TextHAlign::Left => "start",
                TextHAlign::Center => "middle",
                TextHAlign::Right => "end",
            };
            nodes.push(
                SvgNode::new("text")
                    .with_attr("x", fmt_px(text.x))
                    .with_attr("y", fmt_px(text.y))
                    .with_attr("font-size", fmt_px(text.font_size_px))
                    .with_attr("fill", text.color.to_hex())
                    .with_attr("text-anchor", anchor)
                    .with_text(text.text.clone()),
            );
        }

        self.viewport = Some(frame.viewport);
        self.nodes = nodes;
        Ok(())
    }
}
