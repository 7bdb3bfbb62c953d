//! Markdown rendering of the working draft.

use super::state::EditorState;

/// Renders the draft as a Markdown document.
///
/// Each paragraph becomes a `##` section. Slots that have no body yet fall
/// back to their explanation in italics, so an exported outline still reads
/// as a plan rather than a row of bare headings.
pub fn render_markdown(state: &EditorState) -> String {
    let mut sections = Vec::with_capacity(state.paragraphs.len());
    for paragraph in &state.paragraphs {
        let body = if paragraph.is_empty() {
            format!("*{}*", paragraph.explanation.trim())
        } else {
            paragraph.content.trim().to_string()
        };
        sections.push(format!("## {}\n\n{}", paragraph.title.trim(), body));
    }
    let mut document = sections.join("\n\n");
    if !document.is_empty() {
        document.push('\n');
    }
    document
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::editor::event::EditorEvent;

    #[test]
    fn test_render_filled_draft() {
        let mut state = EditorState::new();
        let id = state.paragraphs[0].id.clone();
        state.apply(EditorEvent::ParagraphEdited {
            paragraph_id: id,
            content: "Opening line.".to_string(),
        });

        let markdown = render_markdown(&state);
        assert!(markdown.starts_with("## Introduction\n\nOpening line.\n\n## Development"));
        assert!(markdown.ends_with('\n'));
    }

    #[test]
    fn test_empty_slots_render_explanation() {
        let state = EditorState::new();
        let markdown = render_markdown(&state);
        assert!(markdown.contains("*Introduce the main topic and grab the reader's attention.*"));
    }

    #[test]
    fn test_render_empty_draft() {
        let mut state = EditorState::new();
        state.apply(EditorEvent::RegenerationCompleted { paragraphs: vec![] });
        assert_eq!(render_markdown(&state), "");
    }
}
