//! Per-document section extraction.

use std::path::Path;

use log::{debug, warn};

use crate::config::PipelineConfig;
use crate::error::{Error, Result};
use crate::heading::analyze_page;
use crate::model::Section;
use crate::parser::{extract_page_content, LopdfBackend, PdfBackend};

/// Extracts one [`Section`] per page of a PDF document.
///
/// The largest text on each page becomes the section title and the rest of
/// the page text the section body. There is no cross-page merging; a section
/// never spans multiple pages.
pub struct SectionExtractor {
    heading_epsilon: f32,
}

impl SectionExtractor {
    /// Create an extractor with the default heading epsilon.
    pub fn new() -> Self {
        Self {
            heading_epsilon: PipelineConfig::default().heading_epsilon,
        }
    }

    /// Create an extractor using the configured heading epsilon.
    pub fn from_config(config: &PipelineConfig) -> Self {
        Self {
            heading_epsilon: config.heading_epsilon,
        }
    }

    /// Extract sections from a PDF file.
    ///
    /// The `document` field of each section is the file name portion of the
    /// path.
    pub fn extract_file<P: AsRef<Path>>(&self, path: P) -> Result<Vec<Section>> {
        let path = path.as_ref();
        let document = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .ok_or_else(|| Error::MissingInput(path.to_path_buf()))?;

        crate::detect::detect_version_from_path(path)?;
        let backend = LopdfBackend::load_file(path)?;
        self.extract(&backend, &document)
    }

    /// Extract sections from an already-loaded backend.
    pub fn extract<B: PdfBackend>(&self, backend: &B, document: &str) -> Result<Vec<Section>> {
        let mut sections = Vec::new();

        for (page_number, page_id) in backend.pages() {
            let content = match extract_page_content(backend, page_number, page_id) {
                Ok(content) => content,
                Err(e) => {
                    // A broken page does not fail the document.
                    warn!("{document}: failed to read page {page_number}: {e}");
                    continue;
                }
            };

            let page_text = content.raw_text();
            match analyze_page(
                &content.blocks,
                &page_text,
                page_number,
                self.heading_epsilon,
            ) {
                Some((section_title, section_text)) => sections.push(Section {
                    document: document.to_string(),
                    page_number,
                    section_title,
                    section_text,
                }),
                None => debug!("{document}: page {page_number} has no text blocks, skipping"),
            }
        }

        Ok(sections)
    }
}

impl Default for SectionExtractor {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::{Operand, PageId, PdfOp};
    use std::collections::BTreeMap;

    /// Backend stub serving a fixed set of pages.
    struct FixturePdf {
        // page number → content ops
        pages: BTreeMap<u32, Vec<PdfOp>>,
    }

    impl PdfBackend for FixturePdf {
        fn pages(&self) -> BTreeMap<u32, PageId> {
            self.pages.keys().map(|&n| (n, (n, 0))).collect()
        }

        fn content_ops(&self, page: PageId) -> crate::Result<Vec<PdfOp>> {
            Ok(self.pages[&page.0].clone())
        }

        fn decode_text(&self, _page: PageId, _font: &[u8], bytes: &[u8]) -> String {
            String::from_utf8_lossy(bytes).to_string()
        }
    }

    fn text_object(font_size: f32, text: &str) -> Vec<PdfOp> {
        vec![
            PdfOp {
                name: "BT".into(),
                args: vec![],
            },
            PdfOp {
                name: "Tf".into(),
                args: vec![Operand::Name(b"F1".to_vec()), Operand::Real(font_size)],
            },
            PdfOp {
                name: "Tj".into(),
                args: vec![Operand::Str(text.as_bytes().to_vec())],
            },
            PdfOp {
                name: "ET".into(),
                args: vec![],
            },
        ]
    }

    fn page_ops(objects: &[(f32, &str)]) -> Vec<PdfOp> {
        objects
            .iter()
            .flat_map(|(size, text)| text_object(*size, text))
            .collect()
    }

    #[test]
    fn test_one_section_per_page_in_order() {
        let mut pages = BTreeMap::new();
        pages.insert(1, page_ops(&[(18.0, "Overview"), (11.0, "First page body.")]));
        pages.insert(2, page_ops(&[(18.0, "Details"), (11.0, "Second page body.")]));
        let backend = FixturePdf { pages };

        let sections = SectionExtractor::new().extract(&backend, "doc.pdf").unwrap();
        assert_eq!(sections.len(), 2);
        assert_eq!(sections[0].page_number, 1);
        assert_eq!(sections[0].section_title, "Overview");
        assert_eq!(sections[0].section_text, "First page body.");
        assert_eq!(sections[1].section_title, "Details");
        assert_eq!(sections[1].document, "doc.pdf");
    }

    #[test]
    fn test_textless_page_is_skipped() {
        let mut pages = BTreeMap::new();
        pages.insert(1, vec![]);
        pages.insert(2, page_ops(&[(14.0, "Only Page With Text")]));
        let backend = FixturePdf { pages };

        let sections = SectionExtractor::new().extract(&backend, "doc.pdf").unwrap();
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].page_number, 2);
    }

    #[test]
    fn test_whitespace_heading_falls_back_to_page_label() {
        let mut pages = BTreeMap::new();
        // Largest block is whitespace: no candidate title anywhere.
        pages.insert(1, page_ops(&[(20.0, "   "), (11.0, "")]));
        let backend = FixturePdf { pages };

        let sections = SectionExtractor::new().extract(&backend, "doc.pdf").unwrap();
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].section_title, "Page 1");
    }

    #[test]
    fn test_all_pages_empty_yields_no_sections() {
        let mut pages = BTreeMap::new();
        pages.insert(1, vec![]);
        let backend = FixturePdf { pages };

        let sections = SectionExtractor::new().extract(&backend, "doc.pdf").unwrap();
        assert!(sections.is_empty());
    }
}
