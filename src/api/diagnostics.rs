use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use serde::{Deserialize, Serialize};
use tracing::error;

use crate::error::ChartError;

/// Pipeline step a failure was observed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PipelineStage {
    Bind,
    Fetch,
    PieRender,
    ArcRender,
}

impl fmt::Display for PipelineStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Bind => "bind",
            Self::Fetch => "fetch",
            Self::PieRender => "pie_render",
            Self::ArcRender => "arc_render",
        };
        f.write_str(name)
    }
}

/// One reported failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub stage: PipelineStage,
    pub kind: String,
    pub message: String,
}

impl Diagnostic {
    #[must_use]
    pub fn from_error(stage: PipelineStage, err: &ChartError) -> Self {
        Self {
            stage,
            kind: err.kind().to_owned(),
            message: err.to_string(),
        }
    }
}

/// Terminal destination of pipeline failures. Nothing is propagated further.
pub trait DiagnosticSink {
    fn report(&mut self, stage: PipelineStage, err: &ChartError);
}

/// Default sink: one `error!` event per failure.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingDiagnosticSink;

impl DiagnosticSink for TracingDiagnosticSink {
    fn report(&mut self, stage: PipelineStage, err: &ChartError) {
        error!(%stage, kind = err.kind(), error = %err, "budget chart pipeline failure");
    }
}

/// Sink that logs like `TracingDiagnosticSink` and keeps every report for the host.
///
/// Clones share the same log.
#[derive(Debug, Clone, Default)]
pub struct DiagnosticLog {
    entries: Rc<RefCell<Vec<Diagnostic>>>,
}

impl DiagnosticLog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn entries(&self) -> Vec<Diagnostic> {
        self.entries.borrow().clone()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }

    pub fn clear(&self) {
        self.entries.borrow_mut().clear();
    }
}

impl DiagnosticSink for DiagnosticLog {
    fn report(&mut self, stage: PipelineStage, err: &ChartError) {
        TracingDiagnosticSink.report(stage, err);
        self.entries
            .borrow_mut()
            .push(Diagnostic::from_error(stage, err));
    }
}
