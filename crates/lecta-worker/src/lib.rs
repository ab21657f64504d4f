//! Lecture processing worker.
//!
//! This crate provides:
//! - Job executor for lecture processing jobs
//! - The transcription/analysis/notes pipeline
//! - Built-in LDA topic modeling
//! - Graceful shutdown

pub mod config;
pub mod error;
pub mod executor;
pub mod lda;
pub mod processor;

pub use config::WorkerConfig;
pub use error::{WorkerError, WorkerResult};
pub use executor::JobExecutor;
pub use processor::ProcessingContext;
