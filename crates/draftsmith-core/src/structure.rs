//! Article structure templates.
//!
//! A structure template pairs a display label with the restructuring
//! instruction handed to the generation backend. The built-in catalog covers
//! the common editorial shapes; user-defined templates can be layered on top
//! from configuration.

use serde::{Deserialize, Serialize};

/// Where a structure template was defined.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub enum TemplateSource {
    Builtin,
    User,
}

impl Default for TemplateSource {
    fn default() -> Self {
        TemplateSource::User
    }
}

/// A named article structure and the instruction that produces it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructureTemplate {
    /// Short key used to select the template (e.g. "narrative")
    pub name: String,
    /// Human-readable label for listings
    pub label: String,
    /// The restructuring instruction sent to the model
    pub instruction: String,
    /// Where this template came from
    #[serde(default)]
    pub source: TemplateSource,
}

impl StructureTemplate {
    /// Creates a user-defined template.
    pub fn new(
        name: impl Into<String>,
        label: impl Into<String>,
        instruction: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            label: label.into(),
            instruction: instruction.into(),
            source: TemplateSource::User,
        }
    }

    fn builtin(name: &str, label: &str, instruction: &str) -> Self {
        Self {
            name: name.to_string(),
            label: label.to_string(),
            instruction: instruction.to_string(),
            source: TemplateSource::Builtin,
        }
    }
}

/// The built-in structure catalog, in display order.
pub fn builtin_templates() -> Vec<StructureTemplate> {
    vec![
        StructureTemplate::builtin(
            "narrative",
            "Basic Narrative",
            "Restructure the text into a basic narrative with an introduction, a development/body, and a conclusion. The introduction should grab the reader's attention. The body should elaborate on the main points. The conclusion should summarize and leave a lasting impression.",
        ),
        StructureTemplate::builtin(
            "problem-solution",
            "Problem-Analysis-Solution",
            "Restructure the text to follow a \"Problem-Analysis-Solution\" format. The first paragraph should clearly state a problem. The second should analyze the causes and effects of this problem. The third should propose a concrete solution.",
        ),
        StructureTemplate::builtin(
            "storytelling",
            "Storytelling",
            "Rewrite the text using a \"Storytelling Structure\". Start with a relatable story or anecdote. Introduce a conflict or turning point in the middle. End with a key takeaway or moral from the story.",
        ),
        StructureTemplate::builtin(
            "informational",
            "Informational",
            "Organize the text into an \"Informational Structure\". The first paragraph must provide necessary background context. The middle paragraph should detail the key facts or main points clearly. The final paragraph should offer a forward-looking perspective or discuss future implications.",
        ),
        StructureTemplate::builtin(
            "contrast",
            "Contrast",
            "Reformat the text to follow a \"Contrast Structure\". The first paragraph should describe the current situation or a common problem. The second paragraph should paint a picture of an ideal, improved state. The third paragraph must outline the steps or bridge needed to get from the current state to the ideal state.",
        ),
        StructureTemplate::builtin(
            "before-after-bridge",
            "Before-After-Bridge",
            "Before (undesired state); P2 = After (ideal outcome + quantified); P3 = Bridge (the single key step/tool).",
        ),
    ]
}

/// An ordered collection of structure templates, keyed by name.
///
/// User templates loaded from configuration shadow built-ins with the same
/// name, so a config entry can replace a stock instruction without growing
/// the list.
#[derive(Debug, Clone, Default)]
pub struct StructureCatalog {
    templates: Vec<StructureTemplate>,
}

impl StructureCatalog {
    /// Creates a catalog seeded with the built-in templates.
    pub fn with_builtins() -> Self {
        Self {
            templates: builtin_templates(),
        }
    }

    /// Adds a template, replacing any existing one with the same name.
    pub fn upsert(&mut self, template: StructureTemplate) {
        if let Some(existing) = self.templates.iter_mut().find(|t| t.name == template.name) {
            *existing = template;
        } else {
            self.templates.push(template);
        }
    }

    /// Looks up a template by name.
    pub fn get(&self, name: &str) -> Option<&StructureTemplate> {
        self.templates.iter().find(|t| t.name == name)
    }

    /// All templates in display order.
    pub fn all(&self) -> &[StructureTemplate] {
        &self.templates
    }

    /// Number of templates in the catalog.
    pub fn len(&self) -> usize {
        self.templates.len()
    }

    /// Whether the catalog is empty.
    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}
