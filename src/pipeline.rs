//! Sequential pipeline driver.
//!
//! Orchestrates extraction, prompting, scoring, and consolidation over a
//! document set. Strictly sequential: each document's extraction, prompt
//! build, and model call complete before the next document begins.

use std::fs;
use std::path::Path;

use log::{info, warn};

use crate::config::PipelineConfig;
use crate::error::{Error, Result};
use crate::extract::SectionExtractor;
use crate::llm::{score_document, ModelClient};
use crate::model::{Manifest, Report, ScoredSection};
use crate::prompt::PromptBuilder;
use crate::rank::build_report;

/// Manifest file name expected inside the input folder.
pub const MANIFEST_NAME: &str = "inputs.json";

/// PDF subdirectory name expected inside the input folder.
pub const PDF_DIR_NAME: &str = "PDFs";

/// The extraction and ranking pipeline.
pub struct Pipeline<C: ModelClient> {
    config: PipelineConfig,
    client: C,
}

impl<C: ModelClient> Pipeline<C> {
    pub fn new(client: C, config: PipelineConfig) -> Self {
        Self { config, client }
    }

    /// Process an input folder and return the consolidated report.
    ///
    /// The folder must contain `inputs.json` and a `PDFs/` subdirectory;
    /// their absence, or an empty document list, is fatal. Everything that
    /// goes wrong with an individual document is logged and skipped.
    pub fn process(&self, input_folder: &Path) -> Result<Report> {
        self.process_with_progress(input_folder, |_| {})
    }

    /// Like [`Pipeline::process`], invoking `progress` with each document's
    /// file name as processing of that document begins.
    pub fn process_with_progress(
        &self,
        input_folder: &Path,
        mut progress: impl FnMut(&str),
    ) -> Result<Report> {
        let manifest_path = input_folder.join(MANIFEST_NAME);
        if !manifest_path.is_file() {
            return Err(Error::MissingInput(manifest_path));
        }

        let pdf_dir = input_folder.join(PDF_DIR_NAME);
        if !pdf_dir.is_dir() {
            return Err(Error::MissingInput(pdf_dir));
        }

        let manifest = Manifest::from_json(&fs::read_to_string(&manifest_path)?)?;
        if manifest.documents.is_empty() {
            return Err(Error::Manifest(format!(
                "no documents listed in {MANIFEST_NAME}"
            )));
        }

        let persona = manifest.persona_role();
        let task = manifest.task();
        let extractor = SectionExtractor::from_config(&self.config);
        let prompts = PromptBuilder::from_config(&self.config);

        let mut all_scored: Vec<ScoredSection> = Vec::new();

        for doc in &manifest.documents {
            let filename = doc.filename.as_str();
            if filename.is_empty() {
                continue;
            }
            progress(filename);

            let pdf_path = pdf_dir.join(filename);
            if !pdf_path.is_file() {
                warn!("PDF file not found: {filename} — skipping");
                continue;
            }

            info!("Processing {filename}...");

            let sections = match extractor.extract_file(&pdf_path) {
                Ok(sections) => sections,
                Err(e) => {
                    warn!("{filename}: extraction failed: {e} — skipping");
                    continue;
                }
            };
            if sections.is_empty() {
                warn!("No sections extracted from {filename}");
                continue;
            }

            let prompt = prompts.build(persona, task, filename, &sections);
            all_scored.extend(score_document(&self.client, &prompt, filename));
        }

        Ok(build_report(
            &manifest.filenames(),
            persona,
            task,
            &all_scored,
            self.config.top_n,
        ))
    }

    /// Process an input folder and write the report JSON to `output_path`.
    pub fn run(&self, input_folder: &Path, output_path: &Path) -> Result<Report> {
        let report = self.process(input_folder)?;
        write_report(&report, output_path)?;
        Ok(report)
    }
}

/// Write a report as pretty-printed JSON.
pub fn write_report(report: &Report, path: &Path) -> Result<()> {
    fs::write(path, report.to_json()?)?;
    info!("Output saved to {}", path.display());
    Ok(())
}
