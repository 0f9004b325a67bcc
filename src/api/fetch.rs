use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;

use tracing::{debug, warn};

use crate::core::BudgetSnapshot;
use crate::error::{ChartError, ChartResult};

use super::cancellation::CancellationToken;
use super::source::BudgetSource;

/// Issues the single budget read for a page mount.
///
/// The read runs on a worker thread so the UI loop only ever polls; the
/// result is checked against the mount's cancellation token on delivery.
#[derive(Debug, Clone, Copy, Default)]
pub struct FetchAdapter;

impl FetchAdapter {
    /// Starts one read of `source` in the background.
    #[must_use]
    pub fn spawn(source: Arc<dyn BudgetSource>, token: CancellationToken) -> PendingFetch {
        let (sender, receiver) = mpsc::channel();
        let origin = source.describe();
        debug!(%origin, "starting budget fetch");

        let worker_sender = sender.clone();
        let spawned = thread::Builder::new()
            .name("budget-fetch".to_owned())
            .spawn(move || {
                let result = source.fetch();
                // The page may have gone away; nobody listening is fine.
                let _ = worker_sender.send(result);
            });
        if let Err(err) = spawned {
            warn!(error = %err, "failed to spawn budget fetch worker");
            let _ = sender.send(Err(ChartError::Transport(format!(
                "failed to spawn fetch worker: {err}"
            ))));
        }

        PendingFetch { receiver, token }
    }
}

/// A budget read that has been started but not yet delivered.
#[derive(Debug)]
pub struct PendingFetch {
    receiver: Receiver<ChartResult<BudgetSnapshot>>,
    token: CancellationToken,
}

impl PendingFetch {
    #[must_use]
    pub fn token(&self) -> &CancellationToken {
        &self.token
    }

    /// Non-blocking check; `None` while the read is still running.
    pub fn try_take(&self) -> Option<ChartResult<BudgetSnapshot>> {
        match self.receiver.try_recv() {
            Ok(result) => Some(self.gate(result)),
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => Some(Err(worker_lost())),
        }
    }

    /// Blocks until the read completes.
    pub fn wait(self) -> ChartResult<BudgetSnapshot> {
        let result = self.receiver.recv().unwrap_or_else(|_| Err(worker_lost()));
        self.gate(result)
    }

    fn gate(&self, result: ChartResult<BudgetSnapshot>) -> ChartResult<BudgetSnapshot> {
        if self.token.is_cancelled() {
            debug!("dropping budget response that arrived after cancellation");
            return Err(ChartError::Cancelled);
        }
        result
    }
}

fn worker_lost() -> ChartError {
    ChartError::Transport("fetch worker exited without a result".to_owned())
}
