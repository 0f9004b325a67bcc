use crate::core::{ArcShape, ArcSlice, Color, Point};
use crate::error::{ChartError, ChartResult};

/// Draw command for one annular sector in pixel space.
///
/// Angles use the layout convention: radians, `0` at 12 o'clock, clockwise.
/// A pie slice is a wedge with `inner_radius == 0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WedgePrimitive {
    pub center: Point,
    pub inner_radius: f64,
    pub outer_radius: f64,
    pub start_angle: f64,
    pub end_angle: f64,
    pub fill_color: Color,
    pub stroke_color: Color,
    pub stroke_width: f64,
}

impl WedgePrimitive {
    #[must_use]
    pub fn new(center: Point, shape: ArcShape, slice: ArcSlice, fill_color: Color) -> Self {
        let (start_angle, end_angle) = ArcShape::visible_angles(slice);
        Self {
            center,
            inner_radius: shape.inner_radius,
            outer_radius: shape.outer_radius,
            start_angle,
            end_angle,
            fill_color,
            stroke_color: Color::rgb(1.0, 1.0, 1.0),
            stroke_width: 0.0,
        }
    }

    #[must_use]
    pub fn with_stroke(mut self, stroke_color: Color, stroke_width: f64) -> Self {
        self.stroke_color = stroke_color;
        self.stroke_width = stroke_width;
        self
    }

    #[must_use]
    pub fn span(self) -> f64 {
        self.end_angle - self.start_angle
    }

    /// Slice view of the wedge, already stripped of padding.
    #[must_use]
    pub fn slice(self) -> ArcSlice {
        ArcSlice {
            index: 0,
            value: 0.0,
            start_angle: self.start_angle,
            end_angle: self.end_angle,
            pad_angle: 0.0,
        }
    }

    #[must_use]
    pub fn shape(self) -> ArcShape {
        ArcShape {
            inner_radius: self.inner_radius,
            outer_radius: self.outer_radius,
        }
    }

    pub fn validate(self) -> ChartResult<()> {
        if !self.center.x.is_finite() || !self.center.y.is_finite() {
            return Err(ChartError::InvalidData(
                "wedge center must be finite".to_owned(),
            ));
        }
        if !self.inner_radius.is_finite()
            || !self.outer_radius.is_finite()
            || self.inner_radius < 0.0
            || self.outer_radius <= self.inner_radius
        {
            return Err(ChartError::InvalidData(
                "wedge radii must satisfy 0 <= inner < outer".to_owned(),
            ));
        }
        if !self.start_angle.is_finite() || !self.end_angle.is_finite() {
            return Err(ChartError::InvalidData(
                "wedge angles must be finite".to_owned(),
            ));
        }
        if !self.stroke_width.is_finite() || self.stroke_width < 0.0 {
            return Err(ChartError::InvalidData(
                "wedge stroke width must be finite and >= 0".to_owned(),
            ));
        }
        self.fill_color.validate()?;
        self.stroke_color.validate()
    }
}

/// Filled rectangle in pixel space, used for legend swatches.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RectPrimitive {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub fill_color: Color,
}

impl RectPrimitive {
    #[must_use]
    pub const fn new(x: f64, y: f64, width: f64, height: f64, fill_color: Color) -> Self {
        Self {
            x,
            y,
            width,
            height,
            fill_color,
        }
    }

    pub fn validate(self) -> ChartResult<()> {
        if !self.x.is_finite() || !self.y.is_finite() {
            return Err(ChartError::InvalidData(
                "rect coordinates must be finite".to_owned(),
            ));
        }
        if !self.width.is_finite() || !self.height.is_finite() || self.width < 0.0 || self.height < 0.0
        {
            return Err(ChartError::InvalidData(
                "rect size must be finite and >= 0".to_owned(),
            ));
        }
        self.fill_color.validate()
    }
}

/// Horizontal text alignment relative to `TextPrimitive::x`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextHAlign {
    Left,
    Center,
    Right,
}

/// Draw command for one label in pixel space.
#[derive(Debug, Clone, PartialEq)]
pub struct TextPrimitive {
    pub text: String,
    pub x: f64,
    pub y: f64,
    pub font_size_px: f64,
    pub color: Color,
    pub h_align: TextHAlign,
}

impl TextPrimitive {
    #[must_use]
    pub fn new(
        text: impl Into<String>,
        x: f64,
        y: f64,
        font_size_px: f64,
        color: Color,
        h_align: TextHAlign,
    ) -> Self {
        Self {
            text: text.into(),
            x,
            y,
            font_size_px,
            color,
            h_align,
        }
    }

    pub fn validate(&self) -> ChartResult<()> {
        if self.text.is_empty() {
            return Err(ChartError::InvalidData(
                "text primitive must not be empty".to_owned(),
            ));
        }
        if !self.x.is_finite() || !self.y.is_finite() {
            return Err(ChartError::InvalidData(
                "text coordinates must be finite".to_owned(),
            ));
        }
        if !self.font_size_px.is_finite() || self.font_size_px <= 0.0 {
            return Err(ChartError::InvalidData(
                "font size must be finite and > 0".to_owned(),
            ));
        }
        self.color.validate()
    }
}
