use std::cmp::Reverse;
use std::f64::consts::TAU;

use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::core::category::sanitize_weight;
use crate::error::{ChartError, ChartResult};

/// Order in which slices are laid around the circle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PieSort {
    /// Slices follow input order.
    #[default]
    Input,
    /// Largest value first; ties keep input order.
    ValueDescending,
}

/// One category's angular span.
///
/// Angles are radians, `0` at 12 o'clock, increasing clockwise.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ArcSlice {
    pub index: usize,
    pub value: f64,
    pub start_angle: f64,
    pub end_angle: f64,
    pub pad_angle: f64,
}

impl ArcSlice {
    #[must_use]
    pub fn span(self) -> f64 {
        self.end_angle - self.start_angle
    }

    #[must_use]
    pub fn mid_angle(self) -> f64 {
        (self.start_angle + self.end_angle) / 2.0
    }

    #[must_use]
    pub fn is_empty(self) -> bool {
        self.span().abs() <= f64::EPSILON
    }
}

/// Partitions an angular range into spans proportional to each value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PieLayout {
    #[serde(default)]
    pub start_angle: f64,
    #[serde(default = "full_turn")]
    pub end_angle: f64,
    #[serde(default)]
    pub pad_angle: f64,
    #[serde(default)]
    pub sort: PieSort,
}

impl Default for PieLayout {
    fn default() -> Self {
        Self {
            start_angle: 0.0,
            end_angle: full_turn(),
            pad_angle: 0.0,
            sort: PieSort::Input,
        }
    }
}

fn full_turn() -> f64 {
    TAU
}

impl PieLayout {
    #[must_use]
    pub fn with_sort(mut self, sort: PieSort) -> Self {
        self.sort = sort;
        self
    }

    #[must_use]
    pub fn with_pad_angle(mut self, pad_angle: f64) -> Self {
        self.pad_angle = pad_angle;
        self
    }

    #[must_use]
    pub fn with_angles(mut self, start_angle: f64, end_angle: f64) -> Self {
        self.start_angle = start_angle;
        self.end_angle = end_angle;
        self
    }

    pub fn validate(self) -> ChartResult<()> {
        if !self.start_angle.is_finite() || !self.end_angle.is_finite() {
            return Err(ChartError::InvalidData(
                "pie layout angles must be finite".to_owned(),
            ));
        }
        if self.end_angle < self.start_angle {
            return Err(ChartError::InvalidData(format!(
                "pie layout end angle must not precede start angle (start={}, end={})",
                self.start_angle, self.end_angle
            )));
        }
        if !self.pad_angle.is_finite() || self.pad_angle < 0.0 {
            return Err(ChartError::InvalidData(
                "pie pad angle must be finite and >= 0".to_owned(),
            ));
        }
        Ok(())
    }

    /// Lays out `values` and returns one slice per value, in input order.
    ///
    /// Negative and non-finite values weigh nothing. When the total is zero every
    /// slice collapses onto `start_angle`.
    pub fn compute(self, values: &[f64]) -> ChartResult<Vec<ArcSlice>> {
        self.validate()?;

        let weights: Vec<f64> = values.iter().copied().map(sanitize_weight).collect();
        let dropped = values
            .iter()
            .zip(&weights)
            .filter(|(raw, weight)| **raw != **weight)
            .count();
        if dropped > 0 {
            warn!(dropped, "pie layout treats negative or non-finite values as zero");
        }

        let count = weights.len();
        if count == 0 {
            return Ok(Vec::new());
        }

        // Weights relative to the largest one keep the sum finite near f64::MAX.
        let largest = weights.iter().copied().fold(0.0, f64::max);
        let relative: Vec<f64> = if largest > 0.0 {
            weights.iter().map(|weight| weight / largest).collect()
        } else {
            vec![0.0; count]
        };
        let total: f64 = relative.iter().sum();
        let full = (self.end_angle - self.start_angle).min(TAU);
        let (pad, scale) = if total > 0.0 {
            let pad = self.pad_angle.min(full / count as f64);
            (pad, (full - count as f64 * pad) / total)
        } else {
            (0.0, 0.0)
        };

        let mut order: Vec<usize> = (0..count).collect();
        if self.sort == PieSort::ValueDescending {
            order.sort_by_key(|&index| Reverse(OrderedFloat(weights[index])));
        }

        let mut slices = vec![
            ArcSlice {
                index: 0,
                value: 0.0,
                start_angle: self.start_angle,
                end_angle: self.start_angle,
                pad_angle: 0.0,
            };
            count
        ];
        let mut cursor = self.start_angle;
        for index in order {
            let end = cursor + relative[index] * scale + pad;
            slices[index] = ArcSlice {
                index,
                value: weights[index],
                start_angle: cursor,
                end_angle: end,
                pad_angle: pad,
            };
            cursor = end;
        }
        Ok(slices)
    }
}
