//! Section types produced by extraction and the model call.

use serde::{Deserialize, Serialize};

/// A heading-delimited section extracted from one PDF page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Section {
    /// Source file name.
    pub document: String,

    /// Page number (1-indexed).
    pub page_number: u32,

    /// Heading text, never empty. Pages without a detectable heading use
    /// `"Page {N}"`.
    pub section_title: String,

    /// Body text. Does not re-contain a leading duplicate of the title.
    pub section_text: String,
}

/// A section the model judged relevant, with its summary.
///
/// The page number comes back from the model and may be `-1` when the
/// response omitted or mangled it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredSection {
    pub document: String,
    pub section_title: String,
    pub page_number: i32,
    pub summary: String,
}

impl ScoredSection {
    /// De-duplication key: two entries with the same key are the same section.
    pub fn key(&self) -> (&str, &str, i32) {
        (&self.document, &self.section_title, self.page_number)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scored_section_key() {
        let a = ScoredSection {
            document: "a.pdf".into(),
            section_title: "Intro".into(),
            page_number: 1,
            summary: "first".into(),
        };
        let b = ScoredSection {
            summary: "second".into(),
            ..a.clone()
        };
        assert_eq!(a.key(), b.key());
    }
}
