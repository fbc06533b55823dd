//! Observable loading/error state shared by the operations of one accessor.

use std::future::Future;

use tokio::sync::watch;
use tracing::warn;

use crate::error::{display_message, FetchError};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestState {
    pub loading: bool,
    pub error: Option<String>,
}

/// Holds the latest [`RequestState`] and notifies subscribers on every
/// transition. Concurrent operations write to the same cell; the last write
/// wins.
#[derive(Debug)]
pub struct RequestStateCell {
    tx: watch::Sender<RequestState>,
}

impl Default for RequestStateCell {
    fn default() -> Self {
        Self::new()
    }
}

impl RequestStateCell {
    pub fn new() -> Self {
        let (tx, _) = watch::channel(RequestState::default());
        Self { tx }
    }

    pub fn snapshot(&self) -> RequestState {
        self.tx.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<RequestState> {
        self.tx.subscribe()
    }

    fn begin(&self) -> LoadingGuard<'_> {
        self.tx.send_replace(RequestState {
            loading: true,
            error: None,
        });
        LoadingGuard { cell: self }
    }

    /// Runs one tracked request: resets the state, awaits `request`, records a
    /// display message on failure and clears `loading` on every exit path,
    /// including the future being dropped mid-flight.
    pub async fn track<T, F>(
        &self,
        operation: &'static str,
        fallback: &str,
        request: F,
    ) -> Option<T>
    where
        F: Future<Output = Result<T, FetchError>>,
    {
        let guard = self.begin();
        match request.await {
            Ok(value) => Some(value),
            Err(err) => {
                warn!(
                    operation,
                    endpoint = err.endpoint(),
                    status = err.status().map(|status| status.as_u16()),
                    "panel request failed: {err}"
                );
                guard.fail(display_message(&err, fallback));
                None
            }
        }
    }
}

struct LoadingGuard<'a> {
    cell: &'a RequestStateCell,
}

impl LoadingGuard<'_> {
    fn fail(&self, message: String) {
        self.cell.tx.send_modify(|state| state.error = Some(message));
    }
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        self.cell.tx.send_modify(|state| state.loading = false);
    }
}
