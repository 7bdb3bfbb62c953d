//! Reference material domain model.
//!
//! References are the source snippets an article is drafted from. Each one
//! carries its full original text plus an AI-generated short title used for
//! display in lists.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Lifecycle of a reference's AI-generated summary title.
///
/// A reference enters the collection with its summary pending and settles
/// exactly once, to either a ready title or a failure message. The original
/// text stays usable for article generation in every state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum SummaryState {
    /// Summarization has been requested and is in flight.
    Pending,
    /// The short title returned by the model.
    Ready(String),
    /// Summarization failed with a user-facing message.
    Failed(String),
}

impl SummaryState {
    /// Check if summarization is still in flight
    pub fn is_pending(&self) -> bool {
        matches!(self, Self::Pending)
    }

    /// The ready title, if summarization succeeded.
    pub fn title(&self) -> Option<&str> {
        match self {
            Self::Ready(title) => Some(title),
            _ => None,
        }
    }
}

/// A piece of source material feeding the draft.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reference {
    /// Unique reference identifier (UUID format)
    pub id: String,
    /// The full pasted text, kept verbatim
    pub original_content: String,
    /// Current state of the AI-generated summary title
    pub summary: SummaryState,
    /// Timestamp when the reference was added (ISO 8601 format)
    pub created_at: String,
}

impl Reference {
    /// Creates a new reference with its summary pending.
    pub fn new(original_content: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            original_content: original_content.into(),
            summary: SummaryState::Pending,
            created_at: Utc::now().to_rfc3339(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_reference_starts_pending() {
        let reference = Reference::new("The sky is blue because of Rayleigh scattering.");
        assert!(reference.summary.is_pending());
        assert!(!reference.id.is_empty());
        assert!(!reference.created_at.is_empty());
    }

    #[test]
    fn test_summary_title_accessor() {
        assert_eq!(SummaryState::Pending.title(), None);
        assert_eq!(
            SummaryState::Ready("Rayleigh Scattering".to_string()).title(),
            Some("Rayleigh Scattering")
        );
        assert_eq!(SummaryState::Failed("oops".to_string()).title(), None);
    }
}
