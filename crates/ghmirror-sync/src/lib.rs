//! The Reconciliation Engine: orchestrates full sync, incremental refresh,
//! error classification, and bounded-parallel comment prefetch between
//! [`ghmirror_remote::Fetcher`] and [`ghmirror_store::Store`].

pub mod engine;
pub mod error;
pub mod progress;
pub mod workers;

pub use engine::Engine;
pub use error::{ReconcileError, Result, Severity};
pub use progress::{Phase, SyncProgress};
pub use workers::{WorkerError, DEFAULT_COMMENT_WORKERS};
