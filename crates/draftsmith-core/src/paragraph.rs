//! Paragraph domain model.
//!
//! This module contains the paragraph entities that make up a draft article
//! in the application's domain layer.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A single paragraph of the working draft.
///
/// Paragraphs are the unit of selection, editing, and AI rewriting. The
/// `explanation` describes the paragraph's structural purpose (for example
/// "grab the reader's attention") and is produced by the model during
/// regeneration or seeded by the outline skeleton.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Paragraph {
    /// Unique paragraph identifier (UUID format)
    pub id: String,
    /// Short heading for the paragraph
    pub title: String,
    /// Body text (may be empty for an outline slot that has not been filled)
    pub content: String,
    /// One-sentence description of this paragraph's role in the article
    pub explanation: String,
}

impl Paragraph {
    /// Creates a new paragraph with a generated ID.
    pub fn new(
        title: impl Into<String>,
        content: impl Into<String>,
        explanation: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            title: title.into(),
            content: content.into(),
            explanation: explanation.into(),
        }
    }

    /// Creates the empty placeholder paragraph inserted by the add command.
    pub fn placeholder() -> Self {
        Self::new("New Paragraph", "", "Add your content here.")
    }

    /// Whether the paragraph has no body text yet.
    pub fn is_empty(&self) -> bool {
        self.content.trim().is_empty()
    }
}

/// The standard three-part outline a fresh draft starts from.
///
/// These slots carry guidance in their explanations but no content, so a
/// brand-new draft regenerates into the skeleton rather than calling the
/// generation backend with nothing to work from.
pub fn skeleton_outline() -> Vec<Paragraph> {
    vec![
        Paragraph::new(
            "Introduction",
            "",
            "Introduce the main topic and grab the reader's attention.",
        ),
        Paragraph::new(
            "Development",
            "",
            "Elaborate on the main points, providing details and evidence.",
        ),
        Paragraph::new(
            "Conclusion",
            "",
            "Summarize the key points and provide a concluding thought.",
        ),
    ]
}

/// A paragraph as produced by the generation backend, before it is adopted
/// into the draft.
///
/// Drafts have no identity of their own. Assigning IDs is the editor's job,
/// which keeps the backend response format decoupled from draft state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParagraphDraft {
    /// Short heading for the paragraph
    pub title: String,
    /// One-sentence description of this paragraph's role in the article
    pub explanation: String,
    /// Full rewritten body text
    pub content: String,
}

impl ParagraphDraft {
    /// Adopts the draft into the editor by assigning a fresh ID.
    pub fn into_paragraph(self) -> Paragraph {
        Paragraph {
            id: Uuid::new_v4().to_string(),
            title: self.title,
            content: self.content,
            explanation: self.explanation,
        }
    }
}
