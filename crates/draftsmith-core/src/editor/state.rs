//! Editor state and its transition function.
//!
//! All drafting state lives in one value, and every change goes through
//! [`EditorState::apply`]. The transition function is pure: given the same
//! state and event it always produces the same result, which keeps the whole
//! workflow testable without any backend in the loop.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::event::EditorEvent;
use crate::paragraph::{Paragraph, skeleton_outline};
use crate::reference::{Reference, SummaryState};
use crate::status::OpStatus;

/// Separator between reference texts when they are combined into one
/// source document for regeneration.
pub const REFERENCE_SEPARATOR: &str = "\n\n---\n\n";

/// The complete state of a drafting session.
///
/// Invariants maintained by [`apply`](Self::apply):
/// - `selected_paragraph_id` always names an existing paragraph, or is `None`
/// - at most one entry in `rewrites` is pending at a time (callers gate
///   dispatch, and transitions never spawn a second pending entry)
/// - a settled summary never reverts to pending
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditorState {
    /// The working draft, in article order
    pub paragraphs: Vec<Paragraph>,
    /// Source material, newest first
    pub references: Vec<Reference>,
    /// The paragraph currently focused for editing, if any
    pub selected_paragraph_id: Option<String>,
    /// Status of whole-article regeneration
    pub regeneration: OpStatus,
    /// Per-paragraph rewrite status, keyed by paragraph ID
    pub rewrites: HashMap<String, OpStatus>,
}

impl Default for EditorState {
    fn default() -> Self {
        Self::new()
    }
}

impl EditorState {
    /// Creates a fresh session: the three-part outline skeleton with the
    /// first slot selected and no references.
    pub fn new() -> Self {
        let paragraphs = skeleton_outline();
        let selected_paragraph_id = paragraphs.first().map(|p| p.id.clone());
        Self {
            paragraphs,
            references: Vec::new(),
            selected_paragraph_id,
            regeneration: OpStatus::Idle,
            rewrites: HashMap::new(),
        }
    }

    /// Applies one event, mutating the state in place.
    ///
    /// Events referring to entities that no longer exist (for example a
    /// rewrite settling after its paragraph was deleted) are dropped
    /// silently. Nothing in flight is ever cancelled, so late settlements
    /// are an expected arrival, not an error.
    pub fn apply(&mut self, event: EditorEvent) {
        match event {
            EditorEvent::RegenerationStarted => {
                self.regeneration = OpStatus::Pending;
            }
            EditorEvent::RegenerationCompleted { paragraphs } => {
                self.selected_paragraph_id = paragraphs.first().map(|p| p.id.clone());
                self.paragraphs = paragraphs;
                self.rewrites.clear();
                self.regeneration = OpStatus::Fulfilled;
            }
            EditorEvent::RegenerationFailed { message } => {
                self.regeneration = OpStatus::Failed(message);
            }
            EditorEvent::RewriteStarted { paragraph_id } => {
                if self.paragraph(&paragraph_id).is_some() {
                    self.rewrites.insert(paragraph_id, OpStatus::Pending);
                }
            }
            EditorEvent::RewriteCompleted {
                paragraph_id,
                content,
            } => {
                if let Some(paragraph) = self.paragraph_mut(&paragraph_id) {
                    paragraph.content = content;
                    self.rewrites.insert(paragraph_id, OpStatus::Fulfilled);
                }
            }
            EditorEvent::RewriteFailed {
                paragraph_id,
                message,
            } => {
                if self.paragraph(&paragraph_id).is_some() {
                    self.rewrites.insert(paragraph_id, OpStatus::Failed(message));
                }
            }
            EditorEvent::SummaryRequested { reference } => {
                self.references.insert(0, reference);
            }
            EditorEvent::SummaryCompleted {
                reference_id,
                summary,
            } => {
                if let Some(reference) = self.reference_mut(&reference_id) {
                    if reference.summary.is_pending() {
                        reference.summary = SummaryState::Ready(summary);
                    }
                }
            }
            EditorEvent::SummaryFailed {
                reference_id,
                message,
            } => {
                if let Some(reference) = self.reference_mut(&reference_id) {
                    if reference.summary.is_pending() {
                        reference.summary = SummaryState::Failed(message);
                    }
                }
            }
            EditorEvent::ParagraphSelected { paragraph_id } => {
                match paragraph_id {
                    Some(id) if self.paragraph(&id).is_some() => {
                        self.selected_paragraph_id = Some(id);
                    }
                    Some(_) => {}
                    None => self.selected_paragraph_id = None,
                }
            }
            EditorEvent::ParagraphEdited {
                paragraph_id,
                content,
            } => {
                if let Some(paragraph) = self.paragraph_mut(&paragraph_id) {
                    paragraph.content = content;
                }
            }
            EditorEvent::ParagraphAdded { paragraph } => {
                self.selected_paragraph_id = Some(paragraph.id.clone());
                self.paragraphs.push(paragraph);
            }
            EditorEvent::ParagraphRemoved { paragraph_id } => {
                self.paragraphs.retain(|p| p.id != paragraph_id);
                self.rewrites.remove(&paragraph_id);
                if self.selected_paragraph_id.as_deref() == Some(paragraph_id.as_str()) {
                    self.selected_paragraph_id = None;
                }
            }
            EditorEvent::ReferenceRemoved { reference_id } => {
                self.references.retain(|r| r.id != reference_id);
            }
        }
    }

    // ============================================================================
    // Queries
    // ============================================================================

    /// Looks up a paragraph by ID.
    pub fn paragraph(&self, id: &str) -> Option<&Paragraph> {
        self.paragraphs.iter().find(|p| p.id == id)
    }

    fn paragraph_mut(&mut self, id: &str) -> Option<&mut Paragraph> {
        self.paragraphs.iter_mut().find(|p| p.id == id)
    }

    /// Looks up a reference by ID.
    pub fn reference(&self, id: &str) -> Option<&Reference> {
        self.references.iter().find(|r| r.id == id)
    }

    fn reference_mut(&mut self, id: &str) -> Option<&mut Reference> {
        self.references.iter_mut().find(|r| r.id == id)
    }

    /// The currently selected paragraph, if any.
    pub fn selected_paragraph(&self) -> Option<&Paragraph> {
        self.selected_paragraph_id
            .as_deref()
            .and_then(|id| self.paragraph(id))
    }

    /// Whether whole-article regeneration is in flight.
    pub fn is_regenerating(&self) -> bool {
        self.regeneration.is_pending()
    }

    /// Whether a rewrite of this paragraph is in flight.
    pub fn is_rewriting(&self, paragraph_id: &str) -> bool {
        self.rewrites
            .get(paragraph_id)
            .map(|status| status.is_pending())
            .unwrap_or(false)
    }

    /// The sticky failure message for a paragraph's last rewrite, if any.
    pub fn rewrite_failure(&self, paragraph_id: &str) -> Option<&str> {
        self.rewrites
            .get(paragraph_id)
            .and_then(|status| status.failure())
    }

    /// Whether any reference summary is still in flight.
    pub fn has_pending_summary(&self) -> bool {
        self.references.iter().any(|r| r.summary.is_pending())
    }

    /// All reference texts joined into one source document.
    ///
    /// Uses the verbatim original text of every reference regardless of its
    /// summary state, in current display order.
    pub fn combined_reference_text(&self) -> String {
        self.references
            .iter()
            .map(|r| r.original_content.as_str())
            .collect::<Vec<_>>()
            .join(REFERENCE_SEPARATOR)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::paragraph::ParagraphDraft;

    fn drafts(titles: &[&str]) -> Vec<Paragraph> {
        titles
            .iter()
            .map(|t| {
                ParagraphDraft {
                    title: t.to_string(),
                    explanation: format!("{t} section"),
                    content: format!("{t} body"),
                }
                .into_paragraph()
            })
            .collect()
    }

    #[test]
    fn test_new_session_starts_with_skeleton_selected() {
        let state = EditorState::new();
        assert_eq!(state.paragraphs.len(), 3);
        assert_eq!(
            state.selected_paragraph_id.as_deref(),
            Some(state.paragraphs[0].id.as_str())
        );
        assert!(state.references.is_empty());
        assert_eq!(state.regeneration, OpStatus::Idle);
    }

    #[test]
    fn test_regeneration_replaces_draft_and_selects_first() {
        let mut state = EditorState::new();
        state.apply(EditorEvent::RegenerationStarted);
        assert!(state.is_regenerating());

        let new_paragraphs = drafts(&["Hook", "Argument", "Close"]);
        let first_id = new_paragraphs[0].id.clone();
        state.apply(EditorEvent::RegenerationCompleted {
            paragraphs: new_paragraphs,
        });

        assert_eq!(state.paragraphs.len(), 3);
        assert_eq!(state.paragraphs[0].title, "Hook");
        assert_eq!(state.selected_paragraph_id.as_deref(), Some(first_id.as_str()));
        assert_eq!(state.regeneration, OpStatus::Fulfilled);
    }

    #[test]
    fn test_regeneration_with_empty_result_clears_selection() {
        let mut state = EditorState::new();
        state.apply(EditorEvent::RegenerationStarted);
        state.apply(EditorEvent::RegenerationCompleted { paragraphs: vec![] });

        assert!(state.paragraphs.is_empty());
        assert_eq!(state.selected_paragraph_id, None);
    }

    #[test]
    fn test_regeneration_failure_keeps_draft_intact() {
        let mut state = EditorState::new();
        let before = state.paragraphs.clone();
        let selected = state.selected_paragraph_id.clone();

        state.apply(EditorEvent::RegenerationStarted);
        state.apply(EditorEvent::RegenerationFailed {
            message: "quota exceeded".to_string(),
        });

        assert_eq!(state.paragraphs, before);
        assert_eq!(state.selected_paragraph_id, selected);
        assert_eq!(state.regeneration.failure(), Some("quota exceeded"));
    }

    #[test]
    fn test_restarting_regeneration_clears_previous_failure() {
        let mut state = EditorState::new();
        state.apply(EditorEvent::RegenerationFailed {
            message: "boom".to_string(),
        });
        state.apply(EditorEvent::RegenerationStarted);
        assert_eq!(state.regeneration, OpStatus::Pending);
        assert_eq!(state.regeneration.failure(), None);
    }

    #[test]
    fn test_rewrite_lifecycle_updates_one_paragraph() {
        let mut state = EditorState::new();
        let id = state.paragraphs[1].id.clone();

        state.apply(EditorEvent::RewriteStarted {
            paragraph_id: id.clone(),
        });
        assert!(state.is_rewriting(&id));

        state.apply(EditorEvent::RewriteCompleted {
            paragraph_id: id.clone(),
            content: "Sharper middle section.".to_string(),
        });

        assert!(!state.is_rewriting(&id));
        assert_eq!(state.paragraph(&id).unwrap().content, "Sharper middle section.");
        // untouched neighbors keep their content
        assert!(state.paragraphs[0].content.is_empty());
    }

    #[test]
    fn test_rewrite_failure_sticks_to_its_paragraph() {
        let mut state = EditorState::new();
        let failing = state.paragraphs[0].id.clone();
        let other = state.paragraphs[1].id.clone();

        state.apply(EditorEvent::RewriteStarted {
            paragraph_id: failing.clone(),
        });
        state.apply(EditorEvent::RewriteFailed {
            paragraph_id: failing.clone(),
            message: "model overloaded".to_string(),
        });

        assert_eq!(state.rewrite_failure(&failing), Some("model overloaded"));
        assert_eq!(state.rewrite_failure(&other), None);
        assert!(!state.is_rewriting(&failing));

        // a later rewrite on another paragraph leaves the old failure visible
        state.apply(EditorEvent::RewriteStarted {
            paragraph_id: other.clone(),
        });
        assert!(state.is_rewriting(&other));
        assert_eq!(state.rewrite_failure(&failing), Some("model overloaded"));
    }

    #[test]
    fn test_rewrite_restart_clears_previous_failure() {
        let mut state = EditorState::new();
        let id = state.paragraphs[0].id.clone();

        state.apply(EditorEvent::RewriteFailed {
            paragraph_id: id.clone(),
            message: "boom".to_string(),
        });
        state.apply(EditorEvent::RewriteStarted {
            paragraph_id: id.clone(),
        });

        assert_eq!(state.rewrite_failure(&id), None);
        assert!(state.is_rewriting(&id));
    }

    #[test]
    fn test_rewrite_settlement_after_deletion_is_dropped() {
        let mut state = EditorState::new();
        let id = state.paragraphs[0].id.clone();

        state.apply(EditorEvent::RewriteStarted {
            paragraph_id: id.clone(),
        });
        state.apply(EditorEvent::ParagraphRemoved {
            paragraph_id: id.clone(),
        });
        state.apply(EditorEvent::RewriteCompleted {
            paragraph_id: id.clone(),
            content: "ghost".to_string(),
        });

        assert_eq!(state.paragraphs.len(), 2);
        assert!(state.paragraph(&id).is_none());
        assert!(state.rewrites.is_empty());
    }

    #[test]
    fn test_new_reference_is_prepended_pending() {
        let mut state = EditorState::new();
        let first = Reference::new("first text");
        let second = Reference::new("second text");

        state.apply(EditorEvent::SummaryRequested { reference: first });
        state.apply(EditorEvent::SummaryRequested { reference: second });

        assert_eq!(state.references.len(), 2);
        assert_eq!(state.references[0].original_content, "second text");
        assert!(state.references[0].summary.is_pending());
        assert!(state.has_pending_summary());
    }

    #[test]
    fn test_summary_settles_by_id() {
        let mut state = EditorState::new();
        let kept = Reference::new("kept");
        let failed = Reference::new("failed");
        let kept_id = kept.id.clone();
        let failed_id = failed.id.clone();

        state.apply(EditorEvent::SummaryRequested { reference: kept });
        state.apply(EditorEvent::SummaryRequested { reference: failed });
        state.apply(EditorEvent::SummaryCompleted {
            reference_id: kept_id.clone(),
            summary: "Kept Title".to_string(),
        });
        state.apply(EditorEvent::SummaryFailed {
            reference_id: failed_id.clone(),
            message: "Failed to summarize".to_string(),
        });

        assert_eq!(
            state.reference(&kept_id).unwrap().summary.title(),
            Some("Kept Title")
        );
        assert_eq!(
            state.reference(&failed_id).unwrap().summary,
            SummaryState::Failed("Failed to summarize".to_string())
        );
        assert!(!state.has_pending_summary());
    }

    #[test]
    fn test_settled_summary_ignores_late_events() {
        let mut state = EditorState::new();
        let reference = Reference::new("text");
        let id = reference.id.clone();

        state.apply(EditorEvent::SummaryRequested { reference });
        state.apply(EditorEvent::SummaryCompleted {
            reference_id: id.clone(),
            summary: "Title".to_string(),
        });
        state.apply(EditorEvent::SummaryFailed {
            reference_id: id.clone(),
            message: "late failure".to_string(),
        });

        assert_eq!(state.reference(&id).unwrap().summary.title(), Some("Title"));
    }

    #[test]
    fn test_summary_settlement_after_removal_is_dropped() {
        let mut state = EditorState::new();
        let reference = Reference::new("text");
        let id = reference.id.clone();

        state.apply(EditorEvent::SummaryRequested { reference });
        state.apply(EditorEvent::ReferenceRemoved {
            reference_id: id.clone(),
        });
        state.apply(EditorEvent::SummaryCompleted {
            reference_id: id,
            summary: "Title".to_string(),
        });

        assert!(state.references.is_empty());
    }

    #[test]
    fn test_selection_follows_additions_and_deletions() {
        let mut state = EditorState::new();
        let added = Paragraph::placeholder();
        let added_id = added.id.clone();

        state.apply(EditorEvent::ParagraphAdded { paragraph: added });
        assert_eq!(state.paragraphs.len(), 4);
        assert_eq!(state.selected_paragraph_id.as_deref(), Some(added_id.as_str()));

        state.apply(EditorEvent::ParagraphRemoved {
            paragraph_id: added_id,
        });
        assert_eq!(state.paragraphs.len(), 3);
        assert_eq!(state.selected_paragraph_id, None);
    }

    #[test]
    fn test_deleting_unselected_paragraph_keeps_selection() {
        let mut state = EditorState::new();
        let selected = state.selected_paragraph_id.clone();
        let other = state.paragraphs[2].id.clone();

        state.apply(EditorEvent::ParagraphRemoved {
            paragraph_id: other,
        });

        assert_eq!(state.paragraphs.len(), 2);
        assert_eq!(state.selected_paragraph_id, selected);
    }

    #[test]
    fn test_selecting_unknown_paragraph_is_ignored() {
        let mut state = EditorState::new();
        let before = state.selected_paragraph_id.clone();

        state.apply(EditorEvent::ParagraphSelected {
            paragraph_id: Some("no-such-id".to_string()),
        });
        assert_eq!(state.selected_paragraph_id, before);

        state.apply(EditorEvent::ParagraphSelected { paragraph_id: None });
        assert_eq!(state.selected_paragraph_id, None);
    }

    #[test]
    fn test_manual_edit_replaces_content() {
        let mut state = EditorState::new();
        let id = state.paragraphs[0].id.clone();

        state.apply(EditorEvent::ParagraphEdited {
            paragraph_id: id.clone(),
            content: "Hand-written opening.".to_string(),
        });

        assert_eq!(state.paragraph(&id).unwrap().content, "Hand-written opening.");
    }

    #[test]
    fn test_combined_reference_text_uses_display_order() {
        let mut state = EditorState::new();
        state.apply(EditorEvent::SummaryRequested {
            reference: Reference::new("oldest"),
        });
        state.apply(EditorEvent::SummaryRequested {
            reference: Reference::new("newest"),
        });

        assert_eq!(state.combined_reference_text(), "newest\n\n---\n\noldest");
    }

    #[test]
    fn test_combined_reference_text_empty_without_references() {
        let state = EditorState::new();
        assert_eq!(state.combined_reference_text(), "");
    }

    #[test]
    fn test_regeneration_clears_rewrite_records() {
        let mut state = EditorState::new();
        let id = state.paragraphs[0].id.clone();
        state.apply(EditorEvent::RewriteFailed {
            paragraph_id: id.clone(),
            message: "boom".to_string(),
        });

        state.apply(EditorEvent::RegenerationCompleted {
            paragraphs: drafts(&["Fresh"]),
        });

        assert!(state.rewrites.is_empty());
        assert_eq!(state.rewrite_failure(&id), None);
    }
}
