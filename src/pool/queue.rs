//! Domain queue shared by the fetch workers

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, PoisonError};

/// FIFO queue of domains, drained concurrently by the workers
///
/// Cloning is cheap and yields a handle to the same queue. The queue is
/// populated completely before any worker starts, so an empty queue means
/// the work is done; there is no waiting for new entries.
#[derive(Debug, Clone, Default)]
pub struct DomainQueue {
    inner: Arc<Mutex<VecDeque<String>>>,
}

impl DomainQueue {
    /// Creates an empty queue
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a queue holding `domains` in iteration order
    pub fn from_domains<I>(domains: I) -> Self
    where
        I: IntoIterator<Item = String>,
    {
        Self {
            inner: Arc::new(Mutex::new(domains.into_iter().collect())),
        }
    }

    /// Appends a domain at the back of the queue
    pub fn enqueue(&self, domain: String) {
        self.lock().push_back(domain);
    }

    /// Removes and returns the domain at the front, or `None` once drained
    ///
    /// Each entry is handed to exactly one caller, however many workers
    /// call this concurrently.
    pub fn try_dequeue(&self) -> Option<String> {
        self.lock().pop_front()
    }

    /// Number of domains still queued
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Whether the queue has been drained
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, VecDeque<String>> {
        // a worker panicking mid-push/pop cannot leave the deque inconsistent
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
