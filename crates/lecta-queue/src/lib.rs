//! Redis Streams job queue.
//!
//! This crate provides:
//! - Job enqueueing with idempotency dedup
//! - Worker consumption via consumer groups
//! - Retry counters and a dead-letter stream

pub mod error;
pub mod job;
pub mod queue;

pub use error::{QueueError, QueueResult};
pub use job::{ProcessLectureJob, QueueJob};
pub use queue::{JobQueue, QueueConfig};
