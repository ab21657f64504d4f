//! Application services.

pub mod syllabus;

pub use syllabus::SyllabusService;
