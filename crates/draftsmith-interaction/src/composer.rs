//! Gemini-backed implementation of the drafting backend.

use async_trait::async_trait;
use tracing::{debug, info};

use draftsmith_core::settings::GenerationSettings;
use draftsmith_core::{ComposerAgent, DraftError, ParagraphDraft, Result};

use crate::gemini::{GeminiClient, GenerationConfig};
use crate::prompts::{
    article_response_schema, build_article_prompt, build_rewrite_prompt, build_summary_prompt,
};

/// Returned when the model answers with valid JSON that is not an array.
pub const ARRAY_STRUCTURE_ERROR: &str = "API did not return a valid array structure.";
/// Returned when the model's answer cannot be decoded into paragraphs.
pub const PARSE_ERROR: &str = "Failed to parse the structured article from the AI response.";
/// Placeholder title for summarizing empty input.
pub const EMPTY_CONTENT_TITLE: &str = "Empty Content";

/// [`ComposerAgent`] backed by the Gemini REST API.
///
/// Blank-input contracts are honored locally: an empty rewrite instruction
/// returns the paragraph unchanged, and empty text summarizes to a fixed
/// placeholder. Neither path touches the network.
pub struct GeminiComposer {
    client: GeminiClient,
}

impl GeminiComposer {
    /// Creates a composer over an existing client.
    pub fn new(client: GeminiClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ComposerAgent for GeminiComposer {
    async fn compose_article(
        &self,
        source_text: &str,
        instruction: &str,
        settings: &GenerationSettings,
    ) -> Result<Vec<ParagraphDraft>> {
        let prompt = build_article_prompt(
            source_text,
            instruction,
            settings.word_count,
            &settings.language,
        );
        let config = GenerationConfig::json_with_schema(article_response_schema());

        info!(
            "[compose_article] requesting structured article, language={}, words={}",
            settings.language, settings.word_count
        );
        let raw = self.client.generate(&prompt, Some(config)).await?;
        parse_article_drafts(&raw)
    }

    async fn rewrite_paragraph(
        &self,
        content: &str,
        instruction: &str,
        language: &str,
    ) -> Result<String> {
        if content.trim().is_empty() || instruction.trim().is_empty() {
            debug!("[rewrite_paragraph] blank content or instruction, keeping original");
            return Ok(content.to_string());
        }

        let prompt = build_rewrite_prompt(content, instruction, language);
        info!("[rewrite_paragraph] requesting rewrite, language={}", language);
        let raw = self.client.generate(&prompt, None).await?;
        Ok(raw.trim().to_string())
    }

    async fn summarize(&self, text: &str) -> Result<String> {
        if text.trim().is_empty() {
            return Ok(EMPTY_CONTENT_TITLE.to_string());
        }

        let prompt = build_summary_prompt(text);
        info!("[summarize] requesting reference title");
        let raw = self.client.generate(&prompt, None).await?;
        Ok(raw.trim().to_string())
    }
}

/// Decodes the model's structured-output answer into paragraph drafts.
///
/// Distinguishes the two failure shapes: syntactically valid JSON of the
/// wrong shape, and output that cannot be decoded at all.
fn parse_article_drafts(raw: &str) -> Result<Vec<ParagraphDraft>> {
    let value: serde_json::Value = serde_json::from_str(raw.trim())
        .map_err(|_| DraftError::backend(PARSE_ERROR))?;

    if !value.is_array() {
        return Err(DraftError::backend(ARRAY_STRUCTURE_ERROR));
    }

    serde_json::from_value(value).map_err(|_| DraftError::backend(PARSE_ERROR))
}
