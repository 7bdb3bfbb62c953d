//! Gemini REST integration for Draftsmith.
//!
//! This crate owns everything wire-level: prompt construction, the HTTP
//! client, and the [`draftsmith_core::ComposerAgent`] implementation that
//! the application layer consumes.

pub mod composer;
pub mod config;
pub mod gemini;
pub mod prompts;

pub use composer::GeminiComposer;
pub use config::{GeminiConfig, SecretConfig};
pub use gemini::{DEFAULT_GEMINI_MODEL, GeminiClient, GenerationConfig};
