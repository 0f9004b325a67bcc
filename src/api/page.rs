use std::sync::Arc;

use tracing::debug;

use crate::core::{BudgetSnapshot, ChartDataset};
use crate::error::{ChartError, ChartResult};
use crate::render::{NullRenderer, Renderer};

use super::arc_chart::{ArcChartRenderer, ArcRenderSummary};
use super::cancellation::CancellationToken;
use super::config::BudgetPageConfig;
use super::diagnostics::{DiagnosticSink, PipelineStage, TracingDiagnosticSink};
use super::fetch::{FetchAdapter, PendingFetch};
use super::pie_chart::{PieChartRenderer, PieRenderSummary};
use super::source::BudgetSource;
use super::surface::SurfaceTree;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MountStatus {
    /// Surfaces were bound and one fetch was started.
    Started,
    /// A fetch from an earlier mount is still running; nothing was done.
    AlreadyInFlight,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderStatus {
    /// The response was reshaped and handed to both renderers.
    Rendered,
    /// Transport or schema failure; nothing was drawn.
    FetchFailed,
    /// The response arrived after unmount and was ignored.
    Dropped,
}

/// Outcome of delivering one fetch result to the page.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderReport {
    pub status: RenderStatus,
    pub pie: Option<PieRenderSummary>,
    pub arc: Option<ArcRenderSummary>,
}

impl RenderReport {
    fn without_charts(status: RenderStatus) -> Self {
        Self {
            status,
            pie: None,
            arc: None,
        }
    }
}

struct Mount {
    token: CancellationToken,
    pending: Option<PendingFetch>,
    pie: Option<PieChartRenderer>,
    arc: Option<ArcChartRenderer>,
}

/// The budget home page: binds both chart surfaces, reads the budget once per
/// mount and draws the pie and arc charts from the response.
///
/// Single-threaded: the read runs on a worker, everything else happens on the
/// thread that owns the page and polls it.
pub struct BudgetPage<R: Renderer = NullRenderer> {
    config: BudgetPageConfig,
    source: Arc<dyn BudgetSource>,
    backend: R,
    sink: Box<dyn DiagnosticSink>,
    mount: Option<Mount>,
}

impl<R: Renderer> BudgetPage<R> {
    pub fn new(
        config: BudgetPageConfig,
        source: Arc<dyn BudgetSource>,
        backend: R,
    ) -> ChartResult<Self> {
        config.validate()?;
        Ok(Self {
            config,
            source,
            backend,
            sink: Box::new(TracingDiagnosticSink),
            mount: None,
        })
    }

    /// Page reading from `config.endpoint` over HTTP.
    #[cfg(feature = "http-source")]
    pub fn from_config(config: BudgetPageConfig, backend: R) -> ChartResult<Self> {
        let source = super::source::HttpBudgetSource::from_endpoint(&config.endpoint)?;
        Self::new(config, Arc::new(source), backend)
    }

    #[must_use]
    pub fn with_sink(mut self, sink: impl DiagnosticSink + 'static) -> Self {
        self.sink = Box::new(sink);
        self
    }

    #[must_use]
    pub fn config(&self) -> &BudgetPageConfig {
        &self.config
    }

    #[must_use]
    pub fn backend(&self) -> &R {
        &self.backend
    }

    #[must_use]
    pub fn into_backend(self) -> R {
        self.backend
    }

    #[must_use]
    pub fn is_mounted(&self) -> bool {
        self.mount.is_some()
    }

    #[must_use]
    pub fn is_fetch_in_flight(&self) -> bool {
        self.mount
            .as_ref()
            .is_some_and(|mount| mount.pending.is_some())
    }

    /// Binds both surfaces in `tree` and starts the budget read.
    ///
    /// A surface that cannot be bound is reported once; the other chart still
    /// renders when data arrives.
    pub fn mount(&mut self, tree: &SurfaceTree) -> MountStatus {
        if self.is_fetch_in_flight() {
            debug!("mount ignored: budget fetch already in flight");
            return MountStatus::AlreadyInFlight;
        }
        if let Some(previous) = self.mount.take() {
            previous.token.cancel();
        }

        let pie = match PieChartRenderer::bind(tree, self.config.pie.clone()) {
            Ok(renderer) => Some(renderer),
            Err(err) => {
                self.sink.report(PipelineStage::Bind, &err);
                None
            }
        };
        let arc = match ArcChartRenderer::bind(tree, self.config.arc.clone()) {
            Ok(renderer) => Some(renderer),
            Err(err) => {
                self.sink.report(PipelineStage::Bind, &err);
                None
            }
        };

        let token = CancellationToken::new();
        let pending = FetchAdapter::spawn(Arc::clone(&self.source), token.clone());
        self.mount = Some(Mount {
            token,
            pending: Some(pending),
            pie,
            arc,
        });
        debug!("budget page mounted");
        MountStatus::Started
    }

    /// Cancels the mount. A response that arrives afterwards is ignored.
    ///
    /// Charts already drawn stay on their surfaces.
    pub fn unmount(&mut self) {
        if let Some(mount) = self.mount.take() {
            mount.token.cancel();
            debug!(
                fetch_in_flight = mount.pending.is_some(),
                "budget page unmounted"
            );
        }
    }

    /// Delivers the fetch result if it is ready; `None` while still waiting or
    /// when nothing is in flight.
    pub fn poll(&mut self) -> Option<RenderReport> {
        let mount = self.mount.as_mut()?;
        let result = mount.pending.as_ref()?.try_take()?;
        mount.pending = None;
        Some(self.deliver(result))
    }

    /// Blocks until the in-flight fetch completes and delivers it.
    pub fn wait(&mut self) -> Option<RenderReport> {
        let pending = self.mount.as_mut()?.pending.take()?;
        let result = pending.wait();
        Some(self.deliver(result))
    }

    /// Delivers a result obtained by the host instead of the page's own read.
    ///
    /// Any read still in flight for this mount is abandoned.
    pub fn complete(&mut self, result: ChartResult<BudgetSnapshot>) -> RenderReport {
        if let Some(mount) = self.mount.as_mut() {
            mount.pending = None;
        }
        self.deliver(result)
    }

    fn deliver(&mut self, result: ChartResult<BudgetSnapshot>) -> RenderReport {
        let Self {
            config,
            backend,
            sink,
            mount,
            ..
        } = self;

        let Some(mount) = mount.as_ref().filter(|mount| !mount.token.is_cancelled()) else {
            debug!("dropping budget response: page is not mounted");
            return RenderReport::without_charts(RenderStatus::Dropped);
        };

        let snapshot = match result {
            Ok(snapshot) => snapshot,
            Err(ChartError::Cancelled) => {
                return RenderReport::without_charts(RenderStatus::Dropped);
            }
            Err(err) => {
                sink.report(PipelineStage::Fetch, &err);
                return RenderReport::without_charts(RenderStatus::FetchFailed);
            }
        };

        let dataset = ChartDataset::from_categories(&snapshot.categories, &config.pie.palette);
        debug!(
            categories = dataset.len(),
            fetched_at = %snapshot.fetched_at,
            "reshaped budget response"
        );

        let pie = mount.pie.as_ref().and_then(|renderer| {
            renderer
                .render(&dataset, backend)
                .map_err(|err| sink.report(PipelineStage::PieRender, &err))
                .ok()
        });
        let arc = mount.arc.as_ref().and_then(|renderer| {
            renderer
                .render(&snapshot.categories)
                .map_err(|err| sink.report(PipelineStage::ArcRender, &err))
                .ok()
        });

        RenderReport {
            status: RenderStatus::Rendered,
            pie,
            arc,
        }
    }
}
