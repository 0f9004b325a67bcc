use thiserror::Error;

use crate::core::SurfaceKind;

pub type ChartResult<T> = Result<T, ChartError>;

#[derive(Debug, Error)]
pub enum ChartError {
    #[error("invalid viewport size: width={width}, height={height}")]
    InvalidViewport { width: u32, height: u32 },

    #[error("invalid data: {0}")]
    InvalidData(String),

    /// Network or request failure while reading the budget document.
    #[error("transport error: {0}")]
    Transport(String),

    /// Response arrived but the expected budget field is missing, null or undecodable.
    #[error("schema error: {0}")]
    Schema(String),

    #[error("surface `{surface_id}` not found (expected {expected})")]
    SurfaceMissing {
        surface_id: String,
        expected: SurfaceKind,
    },

    #[error("operation cancelled")]
    Cancelled,
}

impl ChartError {
    /// Short stable tag used in logs and diagnostics.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::InvalidViewport { .. } => "invalid_viewport",
            Self::InvalidData(_) => "invalid_data",
            Self::Transport(_) => "transport",
            Self::Schema(_) => "schema",
            Self::SurfaceMissing { .. } => "surface_missing",
            Self::Cancelled => "cancelled",
        }
    }
}
