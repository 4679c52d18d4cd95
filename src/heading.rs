//! Font-size heading heuristic.
//!
//! The largest text on a page is treated as its h1 heading. The heuristic is
//! a set of pure functions over an abstract block representation so it can
//! be unit-tested against synthetic fixtures, independent of any PDF
//! library's object model.

/// A text span with its font size.
#[derive(Debug, Clone)]
pub struct TextSpan {
    /// The text content, as decoded from the page.
    pub text: String,
    /// Font size in points.
    pub font_size: f32,
}

impl TextSpan {
    pub fn new(text: impl Into<String>, font_size: f32) -> Self {
        Self {
            text: text.into(),
            font_size,
        }
    }
}

/// An ordered group of spans, roughly one text object on the page.
#[derive(Debug, Clone, Default)]
pub struct PageBlock {
    pub spans: Vec<TextSpan>,
}

impl PageBlock {
    pub fn new(spans: Vec<TextSpan>) -> Self {
        Self { spans }
    }

    /// Maximum font size over all spans, whitespace-only spans included.
    ///
    /// Returns 0.0 for a block with no spans.
    pub fn max_font_size(&self) -> f32 {
        self.spans
            .iter()
            .map(|s| s.font_size)
            .fold(0.0, f32::max)
    }

    /// Space-joined non-empty span texts, trimmed.
    pub fn text(&self) -> String {
        self.spans
            .iter()
            .map(|s| s.text.trim())
            .filter(|t| !t.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Maximum font size across all blocks on a page.
pub fn page_max_font_size(blocks: &[PageBlock]) -> f32 {
    blocks.iter().map(|b| b.max_font_size()).fold(0.0, f32::max)
}

/// Texts of all blocks whose own maximum font size ties the page maximum.
///
/// A tie is a difference strictly below `epsilon`; a difference of exactly
/// `epsilon` does not qualify. Blocks with empty text never qualify, even
/// when their font size ties (their whitespace spans still count toward the
/// page maximum).
pub fn heading_candidates(blocks: &[PageBlock], epsilon: f32) -> Vec<String> {
    let max = page_max_font_size(blocks);
    blocks
        .iter()
        .filter(|b| (b.max_font_size() - max).abs() < epsilon)
        .map(|b| b.text())
        .filter(|t| !t.is_empty())
        .collect()
}

/// The chosen heading: the first candidate in block order.
///
/// Document block order is assumed roughly top-to-bottom, left-to-right, so
/// first-wins picks the topmost of the tied largest blocks.
pub fn select_heading(blocks: &[PageBlock], epsilon: f32) -> Option<String> {
    heading_candidates(blocks, epsilon).into_iter().next()
}

/// Derive the section body from the page text and the chosen heading.
///
/// If the page text starts with the exact heading string, the heading is
/// stripped and the remainder trimmed; otherwise the text is returned
/// unmodified, accepting a duplicated heading over a fragile fuzzy match.
pub fn strip_heading(page_text: &str, title: &str) -> String {
    match page_text.strip_prefix(title) {
        Some(rest) => rest.trim().to_string(),
        None => page_text.to_string(),
    }
}

/// Split a page into its heading and body.
///
/// Returns `None` when the page has no blocks at all. When blocks exist but
/// none yields a heading candidate, the title falls back to `"Page {N}"`
/// and the body is the full page text.
pub fn analyze_page(
    blocks: &[PageBlock],
    page_text: &str,
    page_number: u32,
    epsilon: f32,
) -> Option<(String, String)> {
    if blocks.is_empty() {
        return None;
    }

    let page_text = page_text.trim();
    match select_heading(blocks, epsilon) {
        Some(title) => {
            let body = strip_heading(page_text, &title);
            Some((title, body))
        }
        None => Some((format!("Page {}", page_number), page_text.to_string())),
    }
}
