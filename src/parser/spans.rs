//! Content-stream walk producing text spans grouped into blocks.
//!
//! Each BT..ET text object becomes one [`PageBlock`]. Positions are not
//! tracked; the heading heuristic only needs font sizes and reading order.

use crate::error::Result;
use crate::heading::{PageBlock, TextSpan};

use super::backend::{Operand, PageId, PdfBackend, PdfOp};

/// Kerning adjustment (in 1/1000 text space units) large enough to imply a
/// word space inside a TJ array.
const TJ_SPACE_THRESHOLD: f32 = 200.0;

/// The decomposed text content of one page.
#[derive(Debug, Clone)]
pub struct PageContent {
    /// Page number (1-indexed).
    pub number: u32,
    /// Text blocks in content-stream order.
    pub blocks: Vec<PageBlock>,
}

impl PageContent {
    /// The page's plain text: block texts joined by newlines.
    pub fn raw_text(&self) -> String {
        self.blocks
            .iter()
            .map(|b| b.text())
            .filter(|t| !t.is_empty())
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// True when the page has no text blocks at all. A page of
    /// whitespace-only blocks is not empty; the heading fallback deals
    /// with those.
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }
}

/// Extract the text blocks of a page through the backend.
pub fn extract_page_content<B: PdfBackend>(
    backend: &B,
    number: u32,
    page: PageId,
) -> Result<PageContent> {
    let ops = backend.content_ops(page)?;
    Ok(PageContent {
        number,
        blocks: walk_ops(backend, page, &ops),
    })
}

/// Walk content operations, collecting spans per BT..ET text object.
fn walk_ops<B: PdfBackend>(backend: &B, page: PageId, ops: &[PdfOp]) -> Vec<PageBlock> {
    let mut blocks = Vec::new();
    let mut current: Vec<TextSpan> = Vec::new();
    let mut in_text_object = false;
    let mut font_name: Vec<u8> = Vec::new();
    let mut font_size: f32 = 12.0;

    for op in ops {
        match op.name.as_str() {
            "BT" => {
                in_text_object = true;
                // Flush a previous unterminated text object.
                if !current.is_empty() {
                    blocks.push(PageBlock::new(std::mem::take(&mut current)));
                }
            }
            "ET" => {
                in_text_object = false;
                if !current.is_empty() {
                    blocks.push(PageBlock::new(std::mem::take(&mut current)));
                }
            }
            "Tf" => {
                if op.args.len() >= 2 {
                    if let Operand::Name(name) = &op.args[0] {
                        font_name = name.clone();
                    }
                    font_size = op.args[1].as_number().unwrap_or(12.0);
                }
            }
            "Tj" => {
                if in_text_object {
                    if let Some(Operand::Str(bytes)) = op.args.first() {
                        push_span(&mut current, backend, page, &font_name, bytes, font_size);
                    }
                }
            }
            "TJ" => {
                if in_text_object {
                    if let Some(Operand::Array(items)) = op.args.first() {
                        let text = combine_tj_array(backend, page, &font_name, items);
                        if !text.is_empty() {
                            current.push(TextSpan::new(text, font_size));
                        }
                    }
                }
            }
            "'" | "\"" => {
                if in_text_object {
                    // The quote operators carry the string first ("'") or
                    // third ("\"", after word/char spacing).
                    let idx = if op.name == "\"" { 2 } else { 0 };
                    if let Some(Operand::Str(bytes)) = op.args.get(idx) {
                        push_span(&mut current, backend, page, &font_name, bytes, font_size);
                    }
                }
            }
            _ => {}
        }
    }

    // Unterminated text object: keep what was collected.
    if !current.is_empty() {
        blocks.push(PageBlock::new(current));
    }

    blocks
}

fn push_span<B: PdfBackend>(
    spans: &mut Vec<TextSpan>,
    backend: &B,
    page: PageId,
    font_name: &[u8],
    bytes: &[u8],
    font_size: f32,
) {
    let text = backend.decode_text(page, font_name, bytes);
    if !text.is_empty() {
        spans.push(TextSpan::new(text, font_size));
    }
}

/// Combine a TJ array into one string, turning large negative kerning
/// adjustments into word spaces.
fn combine_tj_array<B: PdfBackend>(
    backend: &B,
    page: PageId,
    font_name: &[u8],
    items: &[Operand],
) -> String {
    let mut combined = String::new();

    for item in items {
        match item {
            Operand::Str(bytes) => {
                combined.push_str(&backend.decode_text(page, font_name, bytes));
            }
            Operand::Int(_) | Operand::Real(_) => {
                let adjustment = -item.as_number().unwrap_or(0.0);
                if adjustment > TJ_SPACE_THRESHOLD
                    && !combined.is_empty()
                    && !combined.ends_with(' ')
                {
                    combined.push(' ');
                }
            }
            _ => {}
        }
    }

    combined
}
