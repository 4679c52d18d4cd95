//! Data model for manifests, sections, and the final report.

mod manifest;
mod report;
mod section;

pub use manifest::{DocumentRef, JobToBeDone, Manifest, Persona};
pub use report::{ExtractedSection, Report, ReportMetadata, SubsectionAnalysis};
pub use section::{ScoredSection, Section};
