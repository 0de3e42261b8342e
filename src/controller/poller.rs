// Standard library imports
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;

// External crate imports
use log::{debug, error, info, warn};
use tokio::sync::broadcast;
use tokio::task::JoinHandle;
use tokio::time::{sleep, timeout, Duration};

// Internal crate imports
use crate::domain::model::snapshot::OrderTable;
use crate::infrastructure::exchange::tradeservices::{ApiError, TradeApiRequester};

use super::update_callback::OrderUpdateCallback;

/// Periodically pulls the full order list and hands every row to a callback.
///
/// Rows are re-delivered on every cycle whether or not they changed.
pub struct OrderPoller {
    api: Arc<TradeApiRequester>,
    callback: OrderUpdateCallback,
    interval: Duration,
}

impl OrderPoller {
    pub fn new(api: Arc<TradeApiRequester>, callback: OrderUpdateCallback, interval: Duration) -> Self {
        Self {
            api,
            callback,
            interval,
        }
    }

    /// One fetch-and-dispatch cycle. Returns the number of rows delivered.
    pub async fn poll_once(&self) -> Result<usize, ApiError> {
        let table = OrderTable::from_json(&self.api.get_orders().await?);
        let mut delivered = 0;

        for row in table {
            // A panicking callback must not take the poller down with it
            match catch_unwind(AssertUnwindSafe(|| (self.callback)(&row))) {
                Ok(()) => delivered += 1,
                Err(_) => error!("Order update callback panicked for order {:?}", row.cl_ord_id()),
            }
        }

        Ok(delivered)
    }

    /// Sleep, poll, repeat until a shutdown signal arrives.
    pub async fn run(&self, mut shutdown: broadcast::Receiver<()>) {
        info!("Order poller started, interval {:?}", self.interval);

        loop {
            tokio::select! {
                _ = sleep(self.interval) => {
                    match self.poll_once().await {
                        Ok(n) => debug!("Poll cycle delivered {} order updates", n),
                        Err(e) => error!("Poll cycle failed: {}", e),
                    }
                }
                _ = shutdown.recv() => {
                    info!("Order poller received shutdown signal");
                    return;
                }
            }
        }
    }

    /// Start the poll loop on the current tokio runtime.
    pub fn spawn(self) -> PollerHandle {
        let (shutdown_tx, shutdown_rx) = broadcast::channel::<()>(1);
        let handle = tokio::spawn(async move { self.run(shutdown_rx).await });

        PollerHandle {
            shutdown_tx,
            handle: Some(handle),
        }
    }
}

/// Owner of a running poller. Dropping it stops the task.
pub struct PollerHandle {
    shutdown_tx: broadcast::Sender<()>,
    handle: Option<JoinHandle<()>>,
}

impl PollerHandle {
    pub fn is_running(&self) -> bool {
        self.handle.as_ref().is_some_and(|h| !h.is_finished())
    }

    /// Signal the loop and wait briefly for it to exit, aborting it otherwise.
    pub async fn shutdown(mut self) {
        if self.shutdown_tx.send(()).is_err() {
            debug!("Order poller already stopped");
        }

        if let Some(mut handle) = self.handle.take() {
            match timeout(Duration::from_secs(2), &mut handle).await {
                Ok(Ok(())) => info!("Order poller stopped"),
                Ok(Err(e)) => error!("Order poller task failed: {:?}", e),
                Err(_) => {
                    warn!("Order poller did not stop in time, aborting");
                    handle.abort();
                }
            }
        }
    }
}

impl Drop for PollerHandle {
    fn drop(&mut self) {
        if let Some(handle) = self.handle.take() {
            let _ = self.shutdown_tx.send(());
            handle.abort();
        }
    }
}
