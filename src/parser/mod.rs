//! PDF parsing: backend abstraction and span extraction.

mod backend;
mod spans;

pub use backend::{decode_plain, LopdfBackend, Operand, PageId, PdfBackend, PdfOp};
pub use spans::{extract_page_content, PageContent};
