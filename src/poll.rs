use std::cell::Cell;
use std::future::Future;
use std::rc::Rc;
use std::time::Duration;

use crate::api::types::{ApiError, Scan, ScanStatus};
use crate::api::ApiClient;
use crate::utils::time::sleep;

/// Cadence between status fetches, measured from completion of the previous
/// fetch so a slow response never overlaps the next one.
pub const POLL_INTERVAL: Duration = Duration::from_secs(2);

/// Where the poller fetches scan snapshots from. The remote call layer is
/// the production source; tests script their own.
pub trait ScanSource {
    fn fetch_scan(&self, id: &str) -> impl Future<Output = Result<Scan, ApiError>>;
}

impl ScanSource for ApiClient {
    fn fetch_scan(&self, id: &str) -> impl Future<Output = Result<Scan, ApiError>> {
        self.scan(id)
    }
}

impl<S: ScanSource> ScanSource for Rc<S> {
    fn fetch_scan(&self, id: &str) -> impl Future<Output = Result<Scan, ApiError>> {
        (**self).fetch_scan(id)
    }
}

impl<S: ScanSource> ScanSource for &S {
    fn fetch_scan(&self, id: &str) -> impl Future<Output = Result<Scan, ApiError>> {
        (**self).fetch_scan(id)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollState {
    Idle,
    Polling,
    Completed,
    Failed,
    Cancelled,
    /// A fetch failed. Not a scan failure; the job may still be running
    /// server-side.
    Faulted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollOutcome {
    Terminal(ScanStatus),
    Cancelled,
}

/// Drives repeated status fetches for one scan until it reaches a terminal
/// status, a fetch fails, or the caller cancels. One instance polls one
/// job; there is never more than one fetch in flight.
pub struct ScanPoller<S> {
    source: S,
    interval: Duration,
    state: Rc<Cell<PollState>>,
    cancelled: Rc<Cell<bool>>,
}

/// Cheap clone of the poller's control surface, for callers that need to
/// cancel from elsewhere (for example a component teardown).
#[derive(Clone)]
pub struct PollHandle {
    state: Rc<Cell<PollState>>,
    cancelled: Rc<Cell<bool>>,
}

impl PollHandle {
    pub fn state(&self) -> PollState {
        self.state.get()
    }

    /// Cooperative cancellation. After this returns, no further update is
    /// delivered; an in-flight fetch completes but its result is discarded.
    pub fn cancel(&self) {
        self.cancelled.set(true);
        if matches!(self.state.get(), PollState::Idle | PollState::Polling) {
            self.state.set(PollState::Cancelled);
        }
    }
}

impl<S: ScanSource> ScanPoller<S> {
    pub fn new(source: S) -> Self {
        Self::with_interval(source, POLL_INTERVAL)
    }

    pub fn with_interval(source: S, interval: Duration) -> Self {
        Self {
            source,
            interval,
            state: Rc::new(Cell::new(PollState::Idle)),
            cancelled: Rc::new(Cell::new(false)),
        }
    }

    pub fn handle(&self) -> PollHandle {
        PollHandle {
            state: Rc::clone(&self.state),
            cancelled: Rc::clone(&self.cancelled),
        }
    }

    pub fn state(&self) -> PollState {
        self.state.get()
    }

    pub fn cancel(&self) {
        self.handle().cancel();
    }

    /// Polls until terminal, cancelled, or faulted. `on_update` receives
    /// every successfully fetched snapshot, in order; fetches are strictly
    /// sequential.
    pub async fn run<F>(&self, scan_id: &str, mut on_update: F) -> Result<PollOutcome, ApiError>
    where
        F: FnMut(Scan),
    {
        if self.cancelled.get() {
            self.state.set(PollState::Cancelled);
            return Ok(PollOutcome::Cancelled);
        }
        if self.state.get() != PollState::Idle {
            return Err(ApiError::controller_fault("Poller already started"));
        }
        self.state.set(PollState::Polling);

        loop {
            sleep(self.interval).await;
            if self.cancelled.get() {
                self.state.set(PollState::Cancelled);
                return Ok(PollOutcome::Cancelled);
            }

            let fetched = self.source.fetch_scan(scan_id).await;

            // A cancel that landed while the fetch was in flight wins; the
            // result is discarded unseen.
            if self.cancelled.get() {
                self.state.set(PollState::Cancelled);
                return Ok(PollOutcome::Cancelled);
            }

            match fetched {
                Ok(scan) => {
                    let status = scan.status;
                    on_update(scan);
                    match status {
                        ScanStatus::Completed => {
                            self.state.set(PollState::Completed);
                            return Ok(PollOutcome::Terminal(status));
                        }
                        ScanStatus::Failed => {
                            self.state.set(PollState::Failed);
                            return Ok(PollOutcome::Terminal(status));
                        }
                        ScanStatus::Pending | ScanStatus::Running => {}
                    }
                }
                Err(err) => {
                    log::error!("Error polling scan status: {}", err);
                    self.state.set(PollState::Faulted);
                    return Err(ApiError::controller_fault(err.error));
                }
            }
        }
    }
}
