//! Prompt construction for the relevance request.

use crate::config::PipelineConfig;
use crate::model::Section;

/// Marker appended to a section body cut off at the truncation limit.
const TRUNCATION_MARKER: &str = "...";

/// Builds the natural-language relevance request for one document.
pub struct PromptBuilder {
    truncate_chars: usize,
}

impl PromptBuilder {
    /// Create a builder with the default truncation length.
    pub fn new() -> Self {
        Self {
            truncate_chars: PipelineConfig::default().truncate_chars,
        }
    }

    /// Create a builder using the configured truncation length.
    pub fn from_config(config: &PipelineConfig) -> Self {
        Self {
            truncate_chars: config.truncate_chars,
        }
    }

    /// Render the request: role framing, persona, task, document name, and
    /// every section with its body truncated to the configured length.
    pub fn build(
        &self,
        persona: &str,
        task: &str,
        document_name: &str,
        sections: &[Section],
    ) -> String {
        let mut prompt = format!(
            "You are an intelligent document analyst.\n\
             Persona: {persona}\n\
             Task: {task}\n\
             Document: {document_name}\n\
             \n\
             Extract and rank the most relevant sections related to the task, providing for each:\n\
             - section_title (h1 heading)\n\
             - page_number\n\
             - a concise summary focused on the persona's job-to-be-done.\n\
             \n\
             Return a JSON array where each entry is an object with keys:\n\
             \"section_title\", \"page_number\", and \"summary\".\n\
             \n\
             Here are the sections:\n"
        );

        for section in sections {
            prompt.push_str(&format!(
                "\nSection Title: {} (Page {})\n",
                section.section_title, section.page_number
            ));
            prompt.push_str(&truncate(&section.section_text, self.truncate_chars));
            prompt.push('\n');
        }

        prompt.push_str("\nPlease respond with the JSON array only.\n");
        prompt
    }
}

impl Default for PromptBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Keep the first `limit` characters, appending a marker when anything was
/// dropped. Counts characters, not bytes, so multi-byte text never splits.
fn truncate(text: &str, limit: usize) -> String {
    if text.chars().count() <= limit {
        return text.to_string();
    }
    let mut kept: String = text.chars().take(limit).collect();
    kept.push_str(TRUNCATION_MARKER);
    kept
}

#[cfg(test)]
mod tests {
    use super::*;

    fn section(title: &str, page: u32, body: &str) -> Section {
        Section {
            document: "doc.pdf".into(),
            page_number: page,
            section_title: title.into(),
            section_text: body.into(),
        }
    }

    #[test]
    fn test_prompt_carries_persona_task_and_sections() {
        let sections = vec![section("Intro", 1, "Some body text.")];
        let prompt = PromptBuilder::new().build("HR professional", "Create forms", "doc.pdf", &sections);

        assert!(prompt.contains("Persona: HR professional"));
        assert!(prompt.contains("Task: Create forms"));
        assert!(prompt.contains("Document: doc.pdf"));
        assert!(prompt.contains("Section Title: Intro (Page 1)"));
        assert!(prompt.contains("Some body text."));
        assert!(prompt.contains("JSON array only"));
    }

    #[test]
    fn test_long_body_truncated_with_marker() {
        let body = "x".repeat(1500);
        let sections = vec![section("Long", 2, &body)];
        let prompt = PromptBuilder::new().build("P", "T", "doc.pdf", &sections);

        let expected = format!("{}...", "x".repeat(1200));
        assert!(prompt.contains(&expected));
        assert!(!prompt.contains(&"x".repeat(1201)));
    }

    #[test]
    fn test_short_body_unmodified() {
        let body = "y".repeat(1000);
        let sections = vec![section("Short", 3, &body)];
        let prompt = PromptBuilder::new().build("P", "T", "doc.pdf", &sections);

        assert!(prompt.contains(&body));
        assert!(!prompt.contains(&format!("{}...", body)));
    }

    #[test]
    fn test_truncate_counts_chars_not_bytes() {
        let text = "é".repeat(10);
        assert_eq!(truncate(&text, 10), text);
        assert_eq!(truncate(&text, 5), format!("{}...", "é".repeat(5)));
    }
}
