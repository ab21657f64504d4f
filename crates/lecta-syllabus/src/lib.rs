//! Syllabus document handling.
//!
//! This crate provides:
//! - Text extraction from uploaded PDF and DOCX syllabi
//! - Roadmap flattening into a deduplicated topic list
//! - Coverage reconciliation against stored lecture topics

pub mod coverage;
pub mod error;
pub mod extract;

pub use coverage::{compute_coverage, flatten_roadmap};
pub use error::{SyllabusError, SyllabusResult};
pub use extract::extract_text;
