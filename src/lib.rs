//! # pdfrank
//!
//! Persona-driven PDF section extraction and relevance ranking.
//!
//! Given a batch of PDF documents, a persona, and a job-to-be-done, this
//! library splits each page into a heading and body using a font-size
//! heuristic, asks an LLM service to rank and summarize the sections most
//! relevant to the task, and consolidates the per-document results into a
//! single ranked JSON report.
//!
//! ## Quick Start
//!
//! ```no_run
//! use pdfrank::{GeminiClient, Pipeline, PipelineConfig};
//! use std::path::Path;
//!
//! fn main() -> pdfrank::Result<()> {
//!     let config = PipelineConfig::default();
//!     let client = GeminiClient::from_env(&config)?;
//!     let pipeline = Pipeline::new(client, config);
//!
//!     let report = pipeline.run(Path::new("./collection"), Path::new("output.json"))?;
//!     println!("Ranked {} sections", report.extracted_sections.len());
//!     Ok(())
//! }
//! ```
//!
//! ## Design
//!
//! - **Heading heuristic**: the largest text on a page is its heading; ties
//!   within a small epsilon are all candidates, first in reading order wins.
//!   Pure functions over abstract blocks ([`heading`]).
//! - **Tolerant model decoding**: direct JSON parse, then bracketed-array
//!   extraction, then an explicit "no result" ([`llm`]).
//! - **Two-phase ranking**: one representative section per document first,
//!   then backfill, de-duplicated and capped at top-N ([`rank`]).
//! - Per-document failures never abort the run; fatal preconditions are
//!   checked before any document is touched ([`pipeline`]).

pub mod config;
pub mod detect;
pub mod error;
pub mod extract;
pub mod heading;
pub mod llm;
pub mod model;
pub mod parser;
pub mod pipeline;
pub mod prompt;
pub mod rank;

// Re-export commonly used types
pub use config::PipelineConfig;
pub use error::{Error, Result};
pub use extract::SectionExtractor;
pub use llm::{GeminiClient, ModelClient, ModelReply, RankedSection};
pub use model::{
    ExtractedSection, Manifest, Report, ReportMetadata, ScoredSection, Section,
    SubsectionAnalysis,
};
pub use pipeline::{write_report, Pipeline};
pub use prompt::PromptBuilder;

use std::path::Path;

/// Extract sections from a PDF file with default settings.
///
/// # Example
///
/// ```no_run
/// use pdfrank::extract_sections;
///
/// let sections = extract_sections("document.pdf").unwrap();
/// for section in &sections {
///     println!("p{}: {}", section.page_number, section.section_title);
/// }
/// ```
pub fn extract_sections<P: AsRef<Path>>(path: P) -> Result<Vec<Section>> {
    SectionExtractor::new().extract_file(path)
}

/// Extract sections from a PDF file with a custom configuration.
pub fn extract_sections_with_config<P: AsRef<Path>>(
    path: P,
    config: &PipelineConfig,
) -> Result<Vec<Section>> {
    SectionExtractor::from_config(config).extract_file(path)
}
