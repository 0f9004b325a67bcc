use std::f64::consts::{PI, TAU};

use serde::{Deserialize, Serialize};

use crate::core::pie_layout::ArcSlice;
use crate::core::types::Point;
use crate::error::{ChartError, ChartResult};

const ANGLE_EPSILON: f64 = 1e-12;

/// Annular sector generator shared by the donut chart and pie wedges.
///
/// A pie wedge is an arc shape with `inner_radius == 0`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ArcShape {
    pub inner_radius: f64,
    pub outer_radius: f64,
}

impl ArcShape {
    pub fn new(inner_radius: f64, outer_radius: f64) -> ChartResult<Self> {
        if !inner_radius.is_finite() || !outer_radius.is_finite() {
            return Err(ChartError::InvalidData(
                "arc radii must be finite".to_owned(),
            ));
        }
        if inner_radius < 0.0 || outer_radius <= inner_radius {
            return Err(ChartError::InvalidData(format!(
                "arc radii must satisfy 0 <= inner < outer (inner={inner_radius}, outer={outer_radius})"
            )));
        }
        Ok(Self {
            inner_radius,
            outer_radius,
        })
    }

    /// Drawn angular range of a slice, with the pad split across both edges.
    #[must_use]
    pub fn visible_angles(slice: ArcSlice) -> (f64, f64) {
        let half_pad = slice.pad_angle / 2.0;
        let (start, end) = (slice.start_angle + half_pad, slice.end_angle - half_pad);
        if end < start {
            let mid = slice.mid_angle();
            (mid, mid)
        } else {
            (start, end)
        }
    }

    /// Label anchor at mid-angle and mid-radius, relative to the arc center.
    #[must_use]
    pub fn centroid(self, slice: ArcSlice) -> Point {
        let radius = (self.inner_radius + self.outer_radius) / 2.0;
        polar(radius, slice.mid_angle())
    }

    /// Whether `point` (relative to the arc center) falls inside the slice.
    #[must_use]
    pub fn contains(self, slice: ArcSlice, point: Point) -> bool {
        let distance = point.x.hypot(point.y);
        if distance < self.inner_radius || distance > self.outer_radius {
            return false;
        }
        let (start, end) = Self::visible_angles(slice);
        if end - start >= TAU - ANGLE_EPSILON {
            return true;
        }
        let angle = point.x.atan2(-point.y).rem_euclid(TAU);
        let offset = (angle - start).rem_euclid(TAU);
        offset <= end - start
    }

    /// SVG path data for the slice, relative to the arc center.
    #[must_use]
    pub fn svg_path(self, slice: ArcSlice) -> String {
        let (start, end) = Self::visible_angles(slice);
        let span = end - start;
        let (outer, inner) = (self.outer_radius, self.inner_radius);
        let mut path = String::new();

        if span <= ANGLE_EPSILON {
            path.push_str("M0,0Z");
            return path;
        }

        if span >= TAU - ANGLE_EPSILON {
            let top = polar(outer, start);
            let bottom = polar(outer, start + PI);
            path.push_str(&format!(
                "M{},{}A{},{},0,1,1,{},{}A{},{},0,1,1,{},{}",
                num(top.x),
                num(top.y),
                num(outer),
                num(outer),
                num(bottom.x),
                num(bottom.y),
                num(outer),
                num(outer),
                num(top.x),
                num(top.y)
            ));
            if inner > 0.0 {
                let inner_top = polar(inner, start);
                let inner_bottom = polar(inner, start + PI);
                path.push_str(&format!(
                    "M{},{}A{},{},0,1,0,{},{}A{},{},0,1,0,{},{}",
                    num(inner_top.x),
                    num(inner_top.y),
                    num(inner),
                    num(inner),
                    num(inner_bottom.x),
                    num(inner_bottom.y),
                    num(inner),
                    num(inner),
                    num(inner_top.x),
                    num(inner_top.y)
                ));
            }
            path.push('Z');
            return path;
        }

        let large_arc = u8::from(span > PI);
        let outer_start = polar(outer, start);
        let outer_end = polar(outer, end);
        path.push_str(&format!(
            "M{},{}A{},{},0,{},1,{},{}",
            num(outer_start.x),
            num(outer_start.y),
            num(outer),
            num(outer),
            large_arc,
            num(outer_end.x),
            num(outer_end.y)
        ));
        if inner > 0.0 {
            let inner_end = polar(inner, end);
            let inner_start = polar(inner, start);
            path.push_str(&format!(
                "L{},{}A{},{},0,{},0,{},{}",
                num(inner_end.x),
                num(inner_end.y),
                num(inner),
                num(inner),
                large_arc,
                num(inner_start.x),
                num(inner_start.y)
            ));
        } else {
            path.push_str("L0,0");
        }
        path.push('Z');
        path
    }
}

/// Point at `radius` and `angle` (0 at 12 o'clock, clockwise, y pointing down).
#[must_use]
pub fn polar(radius: f64, angle: f64) -> Point {
    Point::new(radius * angle.sin(), -radius * angle.cos())
}

fn num(value: f64) -> String {
    let rounded = (value * 1000.0).round() / 1000.0;
    let rounded = if rounded == 0.0 { 0.0 } else { rounded };
    let text = format!("{rounded:.3}");
    text.trim_end_matches('0').trim_end_matches('.').to_owned()
}
