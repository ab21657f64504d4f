//! Syllabus error types.

use thiserror::Error;

pub type SyllabusResult<T> = Result<T, SyllabusError>;

#[derive(Debug, Error)]
pub enum SyllabusError {
    #[error("Unsupported file type: {0}. Please upload PDF or DOCX.")]
    UnsupportedFormat(String),

    #[error("Text extraction failed: {0}")]
    ExtractionFailed(String),

    #[error("Document contains no extractable text")]
    EmptyDocument,

    #[error("Archive error: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl SyllabusError {
    pub fn extraction_failed(msg: impl Into<String>) -> Self {
        Self::ExtractionFailed(msg.into())
    }
}
