//! Input manifest types.
//!
//! The manifest (`inputs.json`) names the document set and frames the
//! analysis with a persona and a job-to-be-done. Persona and task are
//! optional; missing values fall back to placeholder strings so a sparse
//! manifest still produces a report.

use serde::Deserialize;

/// Fallback persona when the manifest omits one.
pub const UNKNOWN_PERSONA: &str = "Unknown Persona";

/// Fallback task when the manifest omits one.
pub const UNKNOWN_TASK: &str = "Unknown Task";

/// A document entry in the manifest.
#[derive(Debug, Clone, Deserialize)]
pub struct DocumentRef {
    /// PDF file name, resolved relative to the `PDFs/` directory.
    /// An entry without a filename is tolerated and skipped.
    #[serde(default)]
    pub filename: String,

    /// Optional display title. Accepted but unused.
    #[serde(default)]
    pub title: Option<String>,
}

/// The persona framing the analysis. The role may be absent inside the
/// object; it falls back like a missing persona does.
#[derive(Debug, Clone, Deserialize)]
pub struct Persona {
    #[serde(default)]
    pub role: Option<String>,
}

/// The task the persona needs done. Same fallback rules as [`Persona`].
#[derive(Debug, Clone, Deserialize)]
pub struct JobToBeDone {
    #[serde(default)]
    pub task: Option<String>,
}

/// The parsed input manifest.
#[derive(Debug, Clone, Deserialize)]
pub struct Manifest {
    #[serde(default)]
    pub persona: Option<Persona>,

    #[serde(default)]
    pub job_to_be_done: Option<JobToBeDone>,

    #[serde(default)]
    pub documents: Vec<DocumentRef>,
}

impl Manifest {
    /// Parse a manifest from JSON text.
    pub fn from_json(json: &str) -> crate::Result<Self> {
        let manifest: Manifest = serde_json::from_str(json)?;
        Ok(manifest)
    }

    /// The persona role, or a placeholder when the persona or its role is
    /// absent.
    pub fn persona_role(&self) -> &str {
        self.persona
            .as_ref()
            .and_then(|p| p.role.as_deref())
            .unwrap_or(UNKNOWN_PERSONA)
    }

    /// The job-to-be-done task, or a placeholder when absent.
    pub fn task(&self) -> &str {
        self.job_to_be_done
            .as_ref()
            .and_then(|j| j.task.as_deref())
            .unwrap_or(UNKNOWN_TASK)
    }

    /// Document file names in manifest order.
    pub fn filenames(&self) -> Vec<String> {
        self.documents.iter().map(|d| d.filename.clone()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_manifest() {
        let json = r#"{
            "persona": {"role": "Travel Planner"},
            "job_to_be_done": {"task": "Plan a trip"},
            "documents": [
                {"filename": "a.pdf", "title": "Doc A"},
                {"filename": "b.pdf"}
            ]
        }"#;
        let manifest = Manifest::from_json(json).unwrap();
        assert_eq!(manifest.persona_role(), "Travel Planner");
        assert_eq!(manifest.task(), "Plan a trip");
        assert_eq!(manifest.filenames(), vec!["a.pdf", "b.pdf"]);
    }

    #[test]
    fn test_missing_persona_and_task() {
        let json = r#"{"documents": [{"filename": "a.pdf"}]}"#;
        let manifest = Manifest::from_json(json).unwrap();
        assert_eq!(manifest.persona_role(), UNKNOWN_PERSONA);
        assert_eq!(manifest.task(), UNKNOWN_TASK);
    }

    #[test]
    fn test_empty_persona_and_job_objects() {
        // Keys present but empty inside: same fallbacks as fully absent.
        let json = r#"{"persona": {}, "job_to_be_done": {},
                       "documents": [{"filename": "a.pdf"}]}"#;
        let manifest = Manifest::from_json(json).unwrap();
        assert_eq!(manifest.persona_role(), UNKNOWN_PERSONA);
        assert_eq!(manifest.task(), UNKNOWN_TASK);
    }

    #[test]
    fn test_empty_documents() {
        let manifest = Manifest::from_json("{}").unwrap();
        assert!(manifest.documents.is_empty());
    }
}
