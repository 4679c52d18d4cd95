//! PDF backend abstraction.
//!
//! A [`PdfBackend`] hands the extractor decoded content-stream operations
//! and font-aware text decoding, keeping the concrete PDF library (lopdf)
//! out of the section logic so the heuristic can run against stub backends
//! in tests.

use std::collections::BTreeMap;

use crate::error::{Error, Result};

/// Page identifier: (object number, generation number).
pub type PageId = (u32, u16);

/// An operand of a content-stream operation, reduced to what the text walk
/// cares about.
#[derive(Debug, Clone)]
pub enum Operand {
    Int(i64),
    Real(f32),
    Name(Vec<u8>),
    Str(Vec<u8>),
    Array(Vec<Operand>),
    Other,
}

impl Operand {
    /// Numeric value of an `Int` or `Real` operand.
    pub fn as_number(&self) -> Option<f32> {
        match self {
            Operand::Int(i) => Some(*i as f32),
            Operand::Real(r) => Some(*r),
            Operand::Other | Operand::Name(_) | Operand::Str(_) | Operand::Array(_) => None,
        }
    }
}

/// A decoded content-stream operation.
#[derive(Debug, Clone)]
pub struct PdfOp {
    pub name: String,
    pub args: Vec<Operand>,
}

/// Read access to a PDF document.
pub trait PdfBackend {
    /// All pages as (page_number → PageId), 1-indexed.
    fn pages(&self) -> BTreeMap<u32, PageId>;

    /// The decoded content-stream operations of a page.
    fn content_ops(&self, page: PageId) -> Result<Vec<PdfOp>>;

    /// Decode string bytes using the named font's encoding on the given
    /// page, falling back to plain decoding when the encoding is unknown.
    fn decode_text(&self, page: PageId, font_name: &[u8], bytes: &[u8]) -> String;
}

/// Encoding-less string decoding: UTF-16BE when the BOM announces it,
/// otherwise UTF-8, otherwise Latin-1.
pub fn decode_plain(bytes: &[u8]) -> String {
    if let Some(rest) = bytes.strip_prefix(&[0xFE, 0xFF]) {
        let units: Vec<u16> = rest
            .chunks_exact(2)
            .map(|pair| u16::from_be_bytes([pair[0], pair[1]]))
            .collect();
        return String::from_utf16_lossy(&units);
    }
    match std::str::from_utf8(bytes) {
        Ok(s) => s.to_string(),
        Err(_) => bytes.iter().map(|&b| b as char).collect(),
    }
}

use lopdf::{Document as LopdfDocument, Object};

/// [`PdfBackend`] backed by `lopdf::Document`.
pub struct LopdfBackend {
    doc: LopdfDocument,
}

impl LopdfBackend {
    /// Load a document from a file path.
    pub fn load_file<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        let doc = LopdfDocument::load(path).map_err(|e| match e {
            lopdf::Error::Decryption(_) => Error::Encrypted,
            _ => Error::from(e),
        })?;
        Ok(Self { doc })
    }

    /// Decompressed bytes of one referenced content stream.
    fn stream_bytes(&self, reference: PageId) -> Result<Vec<u8>> {
        match self.doc.get_object(reference) {
            // Uncompressed streams have no Filter entry, which makes
            // `decompressed_content` error; fall back to the raw bytes.
            Ok(Object::Stream(s)) => Ok(s
                .decompressed_content()
                .unwrap_or_else(|_| s.content.clone())),
            _ => Err(Error::PdfParse("content reference is not a stream".into())),
        }
    }

    /// Concatenated content-stream bytes for a page. `Contents` may be a
    /// single stream reference or an array of them.
    fn page_bytes(&self, page: PageId) -> Result<Vec<u8>> {
        let page_dict = self
            .doc
            .get_dictionary(page)
            .map_err(|e| Error::PdfParse(e.to_string()))?;
        let contents = page_dict
            .get(b"Contents")
            .map_err(|e| Error::PdfParse(e.to_string()))?;

        match contents {
            Object::Reference(r) => self.stream_bytes(*r),
            Object::Array(parts) => {
                let mut bytes = Vec::new();
                for part in parts {
                    if let Object::Reference(r) = part {
                        if let Ok(data) = self.stream_bytes(*r) {
                            bytes.extend_from_slice(&data);
                            bytes.push(b' ');
                        }
                    }
                }
                Ok(bytes)
            }
            _ => Err(Error::PdfParse("invalid Contents entry".into())),
        }
    }
}

impl PdfBackend for LopdfBackend {
    fn pages(&self) -> BTreeMap<u32, PageId> {
        self.doc.get_pages()
    }

    fn content_ops(&self, page: PageId) -> Result<Vec<PdfOp>> {
        let data = self.page_bytes(page)?;
        let content = lopdf::content::Content::decode(&data)
            .map_err(|e| Error::PdfParse(e.to_string()))?;

        Ok(content
            .operations
            .into_iter()
            .map(|op| PdfOp {
                name: op.operator,
                args: op.operands.iter().map(convert_object).collect(),
            })
            .collect())
    }

    fn decode_text(&self, page: PageId, font_name: &[u8], bytes: &[u8]) -> String {
        if let Ok(fonts) = self.doc.get_page_fonts(page) {
            if let Some(font_dict) = fonts.get(font_name) {
                if let Ok(enc) = font_dict.get_font_encoding(&self.doc) {
                    if let Ok(text) = LopdfDocument::decode_text(&enc, bytes) {
                        return text;
                    }
                }
            }
        }
        decode_plain(bytes)
    }
}

fn convert_object(obj: &Object) -> Operand {
    match obj {
        Object::Integer(i) => Operand::Int(*i),
        Object::Real(r) => Operand::Real(*r),
        Object::Name(n) => Operand::Name(n.clone()),
        Object::String(b, _) => Operand::Str(b.clone()),
        Object::Array(arr) => Operand::Array(arr.iter().map(convert_object).collect()),
        _ => Operand::Other,
    }
}
