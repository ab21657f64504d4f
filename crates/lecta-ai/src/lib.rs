//! Client for the hosted AI endpoints.
//!
//! This crate provides:
//! - Audio transcription via the OpenAI-compatible `/audio/transcriptions` endpoint
//! - Chat completions via `/chat/completions`
//! - Prompt builders for the analysis, notes and roadmap passes
//! - Salvage parsing for models that wrap JSON in markdown fences

pub mod client;
pub mod error;
pub mod json;
pub mod prompts;

pub use client::{AiClient, AiConfig, ANALYSIS_MODEL, ROADMAP_MODEL, TRANSCRIPTION_MODEL};
pub use error::{AiError, AiResult};
pub use json::extract_json;
