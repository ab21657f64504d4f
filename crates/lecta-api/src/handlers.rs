//! Request handlers.

pub mod analytics;
pub mod health;
pub mod lectures;
pub mod syllabus;

pub use analytics::*;
pub use health::*;
pub use lectures::*;
pub use syllabus::*;
