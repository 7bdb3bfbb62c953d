//! Generation settings shared by all drafting operations.

use serde::{Deserialize, Serialize};

/// Lower bound for the target word count.
pub const MIN_WORD_COUNT: u32 = 100;
/// Upper bound for the target word count.
pub const MAX_WORD_COUNT: u32 = 2000;
/// Target word count used when none is configured.
pub const DEFAULT_WORD_COUNT: u32 = 500;
/// Output language used when none is configured.
pub const DEFAULT_LANGUAGE: &str = "English";

/// Tunable knobs applied to article generation and paragraph rewriting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationSettings {
    /// Approximate length of a regenerated article, in words
    #[serde(default = "default_word_count")]
    pub word_count: u32,
    /// Output language for generated text (free-form, e.g. "English")
    #[serde(default = "default_language")]
    pub language: String,
}

fn default_word_count() -> u32 {
    DEFAULT_WORD_COUNT
}

fn default_language() -> String {
    DEFAULT_LANGUAGE.to_string()
}

impl Default for GenerationSettings {
    fn default() -> Self {
        Self {
            word_count: DEFAULT_WORD_COUNT,
            language: DEFAULT_LANGUAGE.to_string(),
        }
    }
}

impl GenerationSettings {
    /// Sets the target word count, clamped to the supported range.
    pub fn set_word_count(&mut self, words: u32) {
        self.word_count = words.clamp(MIN_WORD_COUNT, MAX_WORD_COUNT);
    }

    /// Sets the output language. Blank input is ignored.
    pub fn set_language(&mut self, language: impl Into<String>) {
        let language = language.into();
        if !language.trim().is_empty() {
            self.language = language;
        }
    }
}
