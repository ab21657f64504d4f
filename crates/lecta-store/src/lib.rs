//! SQLite persistence for the Lecta backend.
//!
//! This crate provides:
//! - Pool initialization with schema creation (WAL, foreign keys, busy timeout)
//! - The lecture repository (create/read/update of the `lectures` table)
//! - Analytics queries over completed lectures

pub mod analytics;
pub mod db;
pub mod error;
pub mod lectures;

pub use analytics::Analytics;
pub use db::init_database;
pub use error::{StoreError, StoreResult};
pub use lectures::{AnalysisSections, LectureStore};
