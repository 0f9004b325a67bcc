use serde::{Deserialize, Serialize};

use crate::core::{Palette, PieSort, SurfaceId};
use crate::error::{ChartError, ChartResult};

use super::arc_chart::ArcChartOptions;
use super::pie_chart::PieChartOptions;
use super::source::EndpointConfig;

/// Page bootstrap configuration.
///
/// Serializable so hosts can keep the page setup in a JSON file; every field
/// falls back to the home page defaults.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct BudgetPageConfig {
    #[serde(default)]
    pub endpoint: EndpointConfig,
    #[serde(default)]
    pub pie: PieChartOptions,
    #[serde(default)]
    pub arc: ArcChartOptions,
}

impl BudgetPageConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_endpoint(mut self, base_url: impl Into<String>, path: impl Into<String>) -> Self {
        self.endpoint.base_url = base_url.into();
        self.endpoint.path = path.into();
        self
    }

    #[must_use]
    pub fn with_timeout_ms(mut self, timeout_ms: Option<u64>) -> Self {
        self.endpoint.timeout_ms = timeout_ms;
        self
    }

    #[must_use]
    pub fn with_pie_surface(mut self, surface_id: impl Into<SurfaceId>) -> Self {
        self.pie.surface_id = surface_id.into();
        self
    }

    #[must_use]
    pub fn with_arc_surface(mut self, surface_id: impl Into<SurfaceId>) -> Self {
        self.arc.surface_id = surface_id.into();
        self
    }

    #[must_use]
    pub fn with_pie_palette(mut self, palette: Palette) -> Self {
        self.pie.palette = palette;
        self
    }

    #[must_use]
    pub fn with_arc_palette(mut self, palette: Palette) -> Self {
        self.arc.palette = palette;
        self
    }

    #[must_use]
    pub fn with_pie_legend(mut self, show_legend: bool) -> Self {
        self.pie.show_legend = show_legend;
        self
    }

    #[must_use]
    pub fn with_arc_inner_radius_ratio(mut self, ratio: f64) -> Self {
        self.arc.inner_radius_ratio = ratio;
        self
    }

    #[must_use]
    pub fn with_arc_sort(mut self, sort: PieSort) -> Self {
        self.arc.layout.sort = sort;
        self
    }

    pub fn validate(&self) -> ChartResult<()> {
        if self.endpoint.base_url.trim().is_empty() {
            return Err(ChartError::InvalidData(
                "endpoint base url must not be empty".to_owned(),
            ));
        }
        if self.pie.surface_id.as_str().is_empty() || self.arc.surface_id.as_str().is_empty() {
            return Err(ChartError::InvalidData(
                "surface ids must not be empty".to_owned(),
            ));
        }
        let ratio = self.arc.inner_radius_ratio;
        if !ratio.is_finite() || !(0.0..1.0).contains(&ratio) {
            return Err(ChartError::InvalidData(format!(
                "arc inner radius ratio must be in [0, 1), got {ratio}"
            )));
        }
        if !self.arc.margin_px.is_finite() || self.arc.margin_px < 0.0 {
            return Err(ChartError::InvalidData(
                "arc margin must be finite and >= 0".to_owned(),
            ));
        }
        if !self.pie.border_width.is_finite() || self.pie.border_width < 0.0 {
            return Err(ChartError::InvalidData(
                "pie border width must be finite and >= 0".to_owned(),
            ));
        }
        self.pie.border_color.validate()?;
        self.pie.layout.validate()?;
        self.arc.layout.validate()
    }

    pub fn from_json_str(input: &str) -> ChartResult<Self> {
        let config: Self = serde_json::from_str(input)
            .map_err(|e| ChartError::InvalidData(format!("failed to parse page config: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json_pretty(&self) -> ChartResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| ChartError::InvalidData(format!("failed to serialize page config: {e}")))
    }
}
