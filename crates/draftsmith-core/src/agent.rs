//! Generation backend trait.

use async_trait::async_trait;

use crate::DraftError;
use crate::paragraph::ParagraphDraft;
use crate::settings::GenerationSettings;

/// The generative backend the drafting workflow talks to.
///
/// Implementations wrap a concrete model API. The trait speaks in domain
/// terms (drafts, instructions, settings) so services never see request or
/// response wire formats.
#[async_trait]
pub trait ComposerAgent: Send + Sync {
    /// Restructures `source_text` into a full article per `instruction`.
    ///
    /// Returns the ordered paragraphs of the restructured article.
    async fn compose_article(
        &self,
        source_text: &str,
        instruction: &str,
        settings: &GenerationSettings,
    ) -> Result<Vec<ParagraphDraft>, DraftError>;

    /// Rewrites one paragraph's body according to `instruction`.
    ///
    /// Returns the rewritten body as plain text.
    async fn rewrite_paragraph(
        &self,
        content: &str,
        instruction: &str,
        language: &str,
    ) -> Result<String, DraftError>;

    /// Produces a short title (at most about ten words) for `text`.
    async fn summarize(&self, text: &str) -> Result<String, DraftError>;
}
