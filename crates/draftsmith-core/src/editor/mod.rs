//! Editor domain module.
//!
//! This module contains the drafting session state, the events that change
//! it, and export rendering.
//!
//! # Module Structure
//!
//! - `event`: State transition events (`EditorEvent`)
//! - `state`: The session state and transition function (`EditorState`)
//! - `markdown`: Markdown export of the draft

mod event;
mod markdown;
mod state;

// Re-export public API
pub use event::EditorEvent;
pub use markdown::render_markdown;
pub use state::{EditorState, REFERENCE_SEPARATOR};
