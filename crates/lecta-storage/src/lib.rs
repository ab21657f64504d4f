//! Local-disk file storage.
//!
//! This crate provides:
//! - Upload staging directories for lecture audio and syllabus documents
//! - Filename sanitization
//! - The syllabus result archive (timestamped JSON, latest-first retrieval)

pub mod error;
pub mod results;
pub mod uploads;

pub use error::{StorageError, StorageResult};
pub use results::ResultsStore;
pub use uploads::{sanitize_filename, UploadStore};
