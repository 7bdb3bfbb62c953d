use serde::{Deserialize, Serialize};

use crate::paragraph::Paragraph;
use crate::reference::Reference;

/// State transitions of the drafting editor.
///
/// Events carry fully-formed entities (IDs already assigned), so applying an
/// event is deterministic. Whoever emits the event creates the entity.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EditorEvent {
    /// Whole-article regeneration has been dispatched.
    RegenerationStarted,
    /// Regeneration finished; these paragraphs replace the current draft.
    RegenerationCompleted {
        paragraphs: Vec<Paragraph>,
    },
    /// Regeneration failed; the current draft stays untouched.
    RegenerationFailed {
        message: String,
    },
    /// A single-paragraph rewrite has been dispatched.
    RewriteStarted {
        paragraph_id: String,
    },
    /// A rewrite finished with new body text for the paragraph.
    RewriteCompleted {
        paragraph_id: String,
        content: String,
    },
    /// A rewrite failed; the failure sticks to the paragraph.
    RewriteFailed {
        paragraph_id: String,
        message: String,
    },
    /// A new reference entered the collection with its summary pending.
    SummaryRequested {
        reference: Reference,
    },
    /// Summarization produced a title for the reference.
    SummaryCompleted {
        reference_id: String,
        summary: String,
    },
    /// Summarization failed; the reference keeps its original text.
    SummaryFailed {
        reference_id: String,
        message: String,
    },
    /// The user focused a paragraph (or cleared focus with `None`).
    ParagraphSelected {
        paragraph_id: Option<String>,
    },
    /// The user edited a paragraph's body by hand.
    ParagraphEdited {
        paragraph_id: String,
        content: String,
    },
    /// A new paragraph was appended to the draft.
    ParagraphAdded {
        paragraph: Paragraph,
    },
    /// A paragraph was deleted.
    ParagraphRemoved {
        paragraph_id: String,
    },
    /// A reference was deleted.
    ReferenceRemoved {
        reference_id: String,
    },
}
