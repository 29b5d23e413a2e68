//! # Async Load Worker
//!
//! Runs the dashboard's single record fetch on the tokio runtime and hands the
//! outcome back to the UI thread, which polls for it between frames.
use std::fmt::{Debug, Formatter};
use std::sync::Arc;

use futures::FutureExt;
use tokio::task::{JoinError, JoinHandle};
use tracing::{debug, error};

use crate::api::{Record, RecordSource};
use crate::error::LoadError;

pub type LoadOutcome = Result<Vec<Record>, LoadError>;

/// One in-flight load
///
/// Dropping the worker before the load finishes leaves the task running and
/// discards its result.
pub struct LoadWorker {
    handle: Option<JoinHandle<LoadOutcome>>,
}

impl Debug for LoadWorker {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), std::fmt::Error> {
        f.debug_struct("LoadWorker").field("pending", &self.is_pending()).finish()
    }
}

impl LoadWorker {
    /// Spawn the load. Must be called from within a tokio runtime.
    pub fn spawn(source: Arc<dyn RecordSource>) -> Self {
        debug!("Spawning record load");
        let handle = tokio::spawn(async move { source.load().await });
        Self { handle: Some(handle) }
    }

    /// Whether the outcome has not been taken yet
    pub fn is_pending(&self) -> bool {
        self.handle.is_some()
    }

    /// Take the outcome if the load has finished. Yields it at most once.
    pub fn poll(&mut self) -> Option<LoadOutcome> {
        let handle = self.handle.as_mut()?;
        let joined = handle.now_or_never()?;
        self.handle = None;
        Some(settle(joined))
    }

    /// Wait for the outcome. Returns `None` if it was already taken.
    pub async fn wait(&mut self) -> Option<LoadOutcome> {
        let handle = self.handle.take()?;
        Some(settle(handle.await))
    }
}

fn settle(joined: Result<LoadOutcome, JoinError>) -> LoadOutcome {
    match joined {
        Ok(outcome) => outcome,
        Err(err) if err.is_panic() => {
            error!(error = %err, "Record load panicked");
            Err(LoadError::Panicked(err.to_string()))
        },
        Err(err) => {
            error!(error = %err, "Record load did not complete");
            Err(LoadError::Source(err.to_string()))
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::fallback_records;
    use async_trait::async_trait;
    use std::time::Duration;

    struct StaticSource(Vec<Record>);

    #[async_trait]
    impl RecordSource for StaticSource {
        async fn load(&self) -> LoadOutcome {
            Ok(self.0.clone())
        }
    }

    struct PanickingSource;

    #[async_trait]
    impl RecordSource for PanickingSource {
        async fn load(&self) -> LoadOutcome {
            panic!("unexpected runtime error");
        }
    }

    struct SlowSource;

    #[async_trait]
    impl RecordSource for SlowSource {
        async fn load(&self) -> LoadOutcome {
            tokio::time::sleep(Duration::from_secs(30)).await;
            Ok(Vec::new())
        }
    }

    #[tokio::test]
    async fn test_worker_yields_once() {
        let mut worker = LoadWorker::spawn(Arc::new(StaticSource(fallback_records())));
        assert!(worker.is_pending());

        assert_eq!(worker.wait().await, Some(Ok(fallback_records())));
        assert!(!worker.is_pending());
        assert_eq!(worker.wait().await, None);
        assert_eq!(worker.poll(), None);
    }

    #[tokio::test]
    async fn test_worker_poll_eventually_ready() {
        let mut worker = LoadWorker::spawn(Arc::new(StaticSource(Vec::new())));

        let mut outcome = None;
        for _ in 0..100 {
            outcome = worker.poll();
            if outcome.is_some() {
                break;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }

        assert_eq!(outcome, Some(Ok(Vec::new())));
        assert_eq!(worker.poll(), None);
    }

    #[tokio::test]
    async fn test_worker_panic_becomes_error() {
        let mut worker = LoadWorker::spawn(Arc::new(PanickingSource));
        let outcome = worker.wait().await;
        assert!(matches!(outcome, Some(Err(LoadError::Panicked(_)))));
    }

    #[tokio::test]
    async fn test_worker_pending_until_done() {
        let mut worker = LoadWorker::spawn(Arc::new(SlowSource));
        assert_eq!(worker.poll(), None);
        assert!(worker.is_pending());
        drop(worker);
    }
}
