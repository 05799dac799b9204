//! Worker completion barrier
//!
//! Counts outstanding workers. Each worker holds an `Arrival` guard; dropping
//! the guard decrements the counter, and the last decrement wakes the single
//! waiter. Because arrival happens on drop, a worker that panics still
//! arrives.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::Notify;

#[derive(Debug)]
struct Inner {
    outstanding: AtomicUsize,
    all_arrived: Notify,
}

/// Completion barrier over a fixed number of workers
#[derive(Debug, Clone)]
pub struct CompletionBarrier {
    inner: Arc<Inner>,
}

impl CompletionBarrier {
    /// Creates a barrier expecting `workers` arrivals
    pub fn new(workers: usize) -> Self {
        Self {
            inner: Arc::new(Inner {
                outstanding: AtomicUsize::new(workers),
                all_arrived: Notify::new(),
            }),
        }
    }

    /// Hands out the guard for one worker
    ///
    /// Exactly one guard must be created per expected worker.
    pub fn arrival(&self) -> Arrival {
        Arrival {
            inner: Some(self.inner.clone()),
        }
    }

    /// Number of workers that have not arrived yet
    pub fn outstanding(&self) -> usize {
        self.inner.outstanding.load(Ordering::Acquire)
    }

    /// Waits until every worker has arrived
    ///
    /// Returns immediately for a barrier created with zero workers.
    pub async fn wait(&self) {
        loop {
            if self.outstanding() == 0 {
                return;
            }
            // notify_one stores a permit, so a wakeup between the check and
            // this await is not lost
            self.inner.all_arrived.notified().await;
        }
    }
}

/// Proof of one pending worker; dropping it marks the worker as done
#[derive(Debug)]
pub struct Arrival {
    inner: Option<Arc<Inner>>,
}

impl Arrival {
    /// Marks the worker as done now instead of at drop
    pub fn arrive(mut self) {
        self.arrive_inner();
    }

    fn arrive_inner(&mut self) {
        if let Some(inner) = self.inner.take() {
            let previous = inner.outstanding.fetch_sub(1, Ordering::AcqRel);
            if previous == 1 {
                inner.all_arrived.notify_one();
            }
        }
    }
}

impl Drop for Arrival {
    fn drop(&mut self) {
        self.arrive_inner();
    }
}
