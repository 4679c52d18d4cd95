//! Final report types.
//!
//! Field declaration order is load-bearing: `serde_json` serializes struct
//! fields in declaration order, and the report contract fixes the key order
//! as `metadata`, `extracted_sections`, `subsection_analysis`.

use serde::{Deserialize, Serialize};

/// One ranked section in the final report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractedSection {
    pub document: String,
    pub section_title: String,
    /// 1-based rank, unique and contiguous across the report.
    pub importance_rank: u32,
    pub page_number: i32,
}

/// Summary entry, index-aligned with [`ExtractedSection`] by rank order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubsectionAnalysis {
    pub document: String,
    pub refined_text: String,
    pub page_number: i32,
}

/// Report metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportMetadata {
    /// Input file names in manifest order.
    pub input_documents: Vec<String>,
    pub persona: String,
    pub job_to_be_done: String,
    /// ISO-8601 timestamp captured when the report was built.
    pub processing_timestamp: String,
}

/// The consolidated cross-document report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Report {
    pub metadata: ReportMetadata,
    pub extracted_sections: Vec<ExtractedSection>,
    pub subsection_analysis: Vec<SubsectionAnalysis>,
}

impl Report {
    /// Serialize the report as pretty-printed JSON.
    pub fn to_json(&self) -> crate::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
