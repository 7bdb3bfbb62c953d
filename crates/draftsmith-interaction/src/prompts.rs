//! Prompt construction for the drafting operations.
//!
//! Each builder assembles the full single-turn prompt for one operation.
//! Source material is fenced between `---` markers so instructions and
//! content never blur together.

use serde_json::json;

/// Builds the whole-article restructuring prompt.
///
/// The numbered instruction block pins down the four generation parameters:
/// source content, target structure, output language, and target length.
pub fn build_article_prompt(
    text: &str,
    structure_instruction: &str,
    word_count: u32,
    language: &str,
) -> String {
    format!(
        "Original Text:\n\
        ---\n\
        {text}\n\
        ---\n\
        \n\
        Instructions:\n\
        1. Content: Use the Original Text as the primary source of information.\n\
        2. Structure: {structure_instruction}\n\
        3. Language: The entire output must be in {language}.\n\
        4. Length: The total length of the article should be approximately {word_count} words.\n\
        \n\
        Rewrite the original text following all instructions.\n\
        The output must be structured as an array of paragraphs, each with a title, \
        a one-sentence explanation of its purpose, and the rewritten content.\n\
        Do not include any introductory or concluding remarks outside of the JSON structure.\n"
    )
}

/// Builds the single-paragraph rewrite prompt.
pub fn build_rewrite_prompt(content: &str, instruction: &str, language: &str) -> String {
    format!(
        "Original Paragraph Content:\n\
        ---\n\
        {content}\n\
        ---\n\
        \n\
        Instruction: {instruction}\n\
        Language: The rewritten paragraph must be in {language}.\n\
        \n\
        Rewrite the paragraph based on the instruction and language requirement.\n\
        Only return the rewritten paragraph content as a single block of text.\n\
        Do not add any extra titles, explanations, or formatting.\n\
        Do not use markdown.\n"
    )
}

/// Builds the reference summarization prompt.
pub fn build_summary_prompt(text: &str) -> String {
    format!(
        "Summarize the following text into a short, descriptive title of no more than 10 words.\n\
        This title will be used to label the text in a list.\n\
        Do not add any introductory phrases like \"This text is about...\" or \"Summary:\".\n\
        Just return the title.\n\
        \n\
        Text:\n\
        ---\n\
        {text}\n\
        ---\n"
    )
}

/// The response schema for article generation: an array of paragraph objects.
///
/// Uses the Gemini structured-output schema format (uppercase type names).
pub fn article_response_schema() -> serde_json::Value {
    json!({
        "type": "ARRAY",
        "items": {
            "type": "OBJECT",
            "properties": {
                "title": {
                    "type": "STRING",
                    "description": "A concise title for the paragraph.",
                },
                "explanation": {
                    "type": "STRING",
                    "description": "A brief, one-sentence explanation of this paragraph's purpose or focus.",
                },
                "content": {
                    "type": "STRING",
                    "description": "The full, rewritten content for this paragraph.",
                },
            },
            "required": ["title", "explanation", "content"],
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_article_prompt_includes_all_parameters() {
        let prompt = build_article_prompt(
            "Some source material.",
            "Tell it as a story.",
            750,
            "Chinese",
        );

        assert!(prompt.contains("Some source material."));
        assert!(prompt.contains("2. Structure: Tell it as a story."));
        assert!(prompt.contains("The entire output must be in Chinese."));
        assert!(prompt.contains("approximately 750 words"));
        assert!(prompt.contains("Do not include any introductory or concluding remarks"));
    }

    #[test]
    fn test_build_article_prompt_fences_source_text() {
        let prompt = build_article_prompt("FENCED", "s", 500, "English");
        assert!(prompt.contains("Original Text:\n---\nFENCED\n---\n"));
    }

    #[test]
    fn test_build_rewrite_prompt_includes_instruction_and_language() {
        let prompt = build_rewrite_prompt("Old body.", "Make it punchier.", "English");

        assert!(prompt.contains("Old body."));
        assert!(prompt.contains("Instruction: Make it punchier."));
        assert!(prompt.contains("The rewritten paragraph must be in English."));
        assert!(prompt.contains("Do not use markdown."));
    }

    #[test]
    fn test_build_summary_prompt_constrains_output() {
        let prompt = build_summary_prompt("A long reference text.");

        assert!(prompt.contains("no more than 10 words"));
        assert!(prompt.contains("Just return the title."));
        assert!(prompt.contains("A long reference text."));
    }

    #[test]
    fn test_article_response_schema_shape() {
        let schema = article_response_schema();

        assert_eq!(schema["type"], "ARRAY");
        assert_eq!(schema["items"]["type"], "OBJECT");
        for field in ["title", "explanation", "content"] {
            assert_eq!(schema["items"]["properties"][field]["type"], "STRING");
        }
        assert_eq!(
            schema["items"]["required"],
            json!(["title", "explanation", "content"])
        );
    }
}
