pub mod agent;
pub mod config;
pub mod editor;
pub mod error;
pub mod paragraph;
pub mod reference;
pub mod settings;
pub mod status;
pub mod structure;

// Re-export common error type
pub use error::{DraftError, Result};

// Re-export core domain types
pub use agent::ComposerAgent;
pub use editor::{EditorEvent, EditorState};
pub use paragraph::{Paragraph, ParagraphDraft};
pub use reference::{Reference, SummaryState};
pub use settings::GenerationSettings;
pub use status::OpStatus;
pub use structure::{StructureCatalog, StructureTemplate};
