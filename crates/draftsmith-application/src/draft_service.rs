//! Draft service implementation.
//!
//! This module provides the `DraftService` which orchestrates the drafting
//! workflow: it gates concurrent operations, dispatches work to the
//! generation backend, and folds every outcome back into the shared
//! [`EditorState`].

use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::{info, warn};

use draftsmith_core::editor::{EditorEvent, EditorState, render_markdown};
use draftsmith_core::paragraph::{Paragraph, skeleton_outline};
use draftsmith_core::reference::Reference;
use draftsmith_core::settings::GenerationSettings;
use draftsmith_core::structure::{StructureCatalog, StructureTemplate};
use draftsmith_core::{ComposerAgent, DraftError, Result};

/// Fallback shown when a summarization failure carries no usable message.
const SUMMARY_FAILURE_FALLBACK: &str = "Failed to summarize";

/// Orchestrates all drafting operations over one shared session.
///
/// # Concurrency
///
/// Three independent gates protect the backend-facing operations:
/// - whole-article regeneration: one at a time
/// - paragraph rewriting: one at a time per paragraph; different
///   paragraphs rewrite concurrently
/// - reference summarization: one submission at a time
///
/// A refused call returns [`DraftError::Busy`] and leaves the session
/// untouched. Operations already in flight always settle into state by
/// entity ID, so nothing is ever cancelled or lost.
///
/// The state lock is never held across a backend call: the service
/// snapshots what it needs, releases the lock, awaits the backend, then
/// re-acquires it to fold the outcome in.
pub struct DraftService {
    /// Drafting session state, shared with read-only consumers
    state: Arc<RwLock<EditorState>>,
    /// Generation backend
    composer: Arc<dyn ComposerAgent>,
    /// Structure template catalog (fixed at construction)
    catalog: StructureCatalog,
    /// Generation settings, adjustable between operations
    settings: Arc<RwLock<GenerationSettings>>,
}

impl DraftService {
    /// Creates a service over a fresh drafting session.
    pub fn new(
        composer: Arc<dyn ComposerAgent>,
        catalog: StructureCatalog,
        settings: GenerationSettings,
    ) -> Self {
        Self {
            state: Arc::new(RwLock::new(EditorState::new())),
            composer,
            catalog,
            settings: Arc::new(RwLock::new(settings)),
        }
    }

    /// A point-in-time copy of the session state.
    pub async fn snapshot(&self) -> EditorState {
        self.state.read().await.clone()
    }

    /// The current generation settings.
    pub async fn settings(&self) -> GenerationSettings {
        self.settings.read().await.clone()
    }

    /// The structure template catalog.
    pub fn catalog(&self) -> &StructureCatalog {
        &self.catalog
    }

    /// Renders the current draft as Markdown.
    pub async fn export_markdown(&self) -> String {
        render_markdown(&*self.state.read().await)
    }

    // ============================================================================
    // Backend-facing operations
    // ============================================================================

    /// Regenerates the whole article using the named structure template.
    ///
    /// With no reference text collected, the draft resets to the outline
    /// skeleton immediately and the backend is never called. Otherwise the
    /// combined reference text is restructured by the backend and the
    /// resulting paragraphs replace the draft, with the first one selected.
    ///
    /// A backend failure is recorded in the session (the draft stays as it
    /// was) and also returned to the caller.
    pub async fn regenerate(&self, structure_name: &str) -> Result<()> {
        let template = self
            .catalog
            .get(structure_name)
            .cloned()
            .ok_or_else(|| DraftError::not_found("structure", structure_name))?;
        let settings = self.settings().await;

        // Gate and snapshot under one lock, then release before the call.
        let source_text = {
            let mut state = self.state.write().await;
            if state.is_regenerating() {
                return Err(DraftError::busy("regenerate"));
            }

            let source_text = state.combined_reference_text();
            if source_text.trim().is_empty() {
                info!("[regenerate] no reference text, resetting draft to outline skeleton");
                state.apply(EditorEvent::RegenerationCompleted {
                    paragraphs: skeleton_outline(),
                });
                return Ok(());
            }

            state.apply(EditorEvent::RegenerationStarted);
            source_text
        };

        info!(
            "[regenerate] dispatching structure '{}' over {} reference chars",
            template.name,
            source_text.len()
        );
        let outcome = self
            .composer
            .compose_article(&source_text, &template.instruction, &settings)
            .await;

        let mut state = self.state.write().await;
        match outcome {
            Ok(drafts) => {
                let paragraphs: Vec<Paragraph> =
                    drafts.into_iter().map(|d| d.into_paragraph()).collect();
                info!("[regenerate] completed with {} paragraphs", paragraphs.len());
                state.apply(EditorEvent::RegenerationCompleted { paragraphs });
                Ok(())
            }
            Err(err) => {
                warn!("[regenerate] failed: {}", err);
                state.apply(EditorEvent::RegenerationFailed {
                    message: err.user_message(),
                });
                Err(err)
            }
        }
    }

    /// Rewrites one paragraph according to a free-form instruction.
    ///
    /// A blank instruction settles the paragraph in place without calling
    /// the backend (clearing any previous rewrite failure). A backend
    /// failure sticks to the paragraph and is also returned.
    pub async fn rewrite(&self, paragraph_id: &str, instruction: &str) -> Result<()> {
        let language = self.settings.read().await.language.clone();

        let content = {
            let mut state = self.state.write().await;
            let paragraph = state
                .paragraph(paragraph_id)
                .ok_or_else(|| DraftError::not_found("paragraph", paragraph_id))?;
            let content = paragraph.content.clone();

            if state.is_rewriting(paragraph_id) {
                return Err(DraftError::busy("rewrite"));
            }

            state.apply(EditorEvent::RewriteStarted {
                paragraph_id: paragraph_id.to_string(),
            });

            if instruction.trim().is_empty() {
                state.apply(EditorEvent::RewriteCompleted {
                    paragraph_id: paragraph_id.to_string(),
                    content,
                });
                return Ok(());
            }

            content
        };

        info!("[rewrite] dispatching rewrite for paragraph {}", paragraph_id);
        let outcome = self
            .composer
            .rewrite_paragraph(&content, instruction, &language)
            .await;

        let mut state = self.state.write().await;
        match outcome {
            Ok(new_content) => {
                state.apply(EditorEvent::RewriteCompleted {
                    paragraph_id: paragraph_id.to_string(),
                    content: new_content,
                });
                Ok(())
            }
            Err(err) => {
                warn!("[rewrite] failed for paragraph {}: {}", paragraph_id, err);
                state.apply(EditorEvent::RewriteFailed {
                    paragraph_id: paragraph_id.to_string(),
                    message: err.user_message(),
                });
                Err(err)
            }
        }
    }

    /// Adds reference material and summarizes it into a display title.
    ///
    /// The reference appears at the top of the collection immediately, with
    /// its summary pending; the title (or a failure message) settles onto it
    /// by ID when the backend answers. Blank input is ignored and returns
    /// `None`.
    pub async fn add_reference(&self, content: &str) -> Result<Option<String>> {
        if content.trim().is_empty() {
            return Ok(None);
        }

        let reference = {
            let mut state = self.state.write().await;
            if state.has_pending_summary() {
                return Err(DraftError::busy("summarize"));
            }

            let reference = Reference::new(content);
            state.apply(EditorEvent::SummaryRequested {
                reference: reference.clone(),
            });
            reference
        };

        info!("[add_reference] summarizing reference {}", reference.id);
        let outcome = self.composer.summarize(content).await;

        let mut state = self.state.write().await;
        match outcome {
            Ok(summary) => {
                state.apply(EditorEvent::SummaryCompleted {
                    reference_id: reference.id.clone(),
                    summary,
                });
                Ok(Some(reference.id))
            }
            Err(err) => {
                warn!(
                    "[add_reference] summarization failed for {}: {}",
                    reference.id, err
                );
                let message = match &err {
                    DraftError::Backend(message) => message.clone(),
                    _ => SUMMARY_FAILURE_FALLBACK.to_string(),
                };
                state.apply(EditorEvent::SummaryFailed {
                    reference_id: reference.id.clone(),
                    message,
                });
                Err(err)
            }
        }
    }

    // ============================================================================
    // Local operations
    // ============================================================================

    /// Focuses a paragraph for subsequent editing, or clears focus.
    pub async fn select_paragraph(&self, paragraph_id: Option<&str>) -> Result<()> {
        let mut state = self.state.write().await;
        if let Some(id) = paragraph_id {
            if state.paragraph(id).is_none() {
                return Err(DraftError::not_found("paragraph", id));
            }
        }
        state.apply(EditorEvent::ParagraphSelected {
            paragraph_id: paragraph_id.map(str::to_string),
        });
        Ok(())
    }

    /// Replaces a paragraph's body with hand-written text.
    pub async fn edit_paragraph(&self, paragraph_id: &str, content: &str) -> Result<()> {
        let mut state = self.state.write().await;
        if state.paragraph(paragraph_id).is_none() {
            return Err(DraftError::not_found("paragraph", paragraph_id));
        }
        state.apply(EditorEvent::ParagraphEdited {
            paragraph_id: paragraph_id.to_string(),
            content: content.to_string(),
        });
        Ok(())
    }

    /// Appends an empty placeholder paragraph and selects it.
    pub async fn add_paragraph(&self) -> Paragraph {
        let paragraph = Paragraph::placeholder();
        let mut state = self.state.write().await;
        state.apply(EditorEvent::ParagraphAdded {
            paragraph: paragraph.clone(),
        });
        paragraph
    }

    /// Deletes a paragraph.
    ///
    /// Allowed even while a rewrite of that paragraph is in flight; the
    /// late settlement is dropped when it arrives.
    pub async fn remove_paragraph(&self, paragraph_id: &str) -> Result<()> {
        let mut state = self.state.write().await;
        if state.paragraph(paragraph_id).is_none() {
            return Err(DraftError::not_found("paragraph", paragraph_id));
        }
        state.apply(EditorEvent::ParagraphRemoved {
            paragraph_id: paragraph_id.to_string(),
        });
        Ok(())
    }

    /// Deletes a reference.
    ///
    /// Allowed even while its summary is pending; the late settlement is
    /// dropped when it arrives.
    pub async fn remove_reference(&self, reference_id: &str) -> Result<()> {
        let mut state = self.state.write().await;
        if state.reference(reference_id).is_none() {
            return Err(DraftError::not_found("reference", reference_id));
        }
        state.apply(EditorEvent::ReferenceRemoved {
            reference_id: reference_id.to_string(),
        });
        Ok(())
    }

    // ============================================================================
    // Settings
    // ============================================================================

    /// Sets the target word count and returns the clamped value.
    pub async fn set_word_count(&self, words: u32) -> u32 {
        let mut settings = self.settings.write().await;
        settings.set_word_count(words);
        settings.word_count
    }

    /// Sets the output language. Blank input is ignored.
    pub async fn set_language(&self, language: &str) {
        self.settings.write().await.set_language(language);
    }

    /// All structure templates, in display order.
    pub fn structures(&self) -> &[StructureTemplate] {
        self.catalog.all()
    }
}
