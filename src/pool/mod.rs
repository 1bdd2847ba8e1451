//! Bounded fetch worker pool
//!
//! This module contains the concurrent core of the tool:
//! - The domain queue the workers drain
//! - The fetch worker loop
//! - The pool driver that sizes, launches and joins the workers

mod coordinator;
mod queue;
mod worker;

pub use coordinator::{run_pool, worker_count, PoolOptions, PoolResults, MAX_WORKERS};
pub use queue::DomainQueue;
