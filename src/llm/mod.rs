//! Relevance model client.
//!
//! The model is an external, non-deterministic collaborator. This module
//! pins down the contract the pipeline needs from it: a prompt goes in, raw
//! text comes out, and [`score_document`] turns that text into scored
//! sections — or into nothing, because a per-document model failure is a
//! soft failure.

mod parse;

pub use parse::{parse_reply, ModelReply, RankedSection};

use log::warn;
use serde_json::json;

use crate::config::PipelineConfig;
use crate::error::{Error, Result};
use crate::model::ScoredSection;

/// Environment variable holding the model service credential.
pub const API_KEY_VAR: &str = "GOOGLE_API_KEY";

const API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";

/// A text-in, text-out model service.
pub trait ModelClient {
    /// Send a prompt and return the model's raw text response.
    fn generate(&self, prompt: &str) -> Result<String>;
}

/// [`ModelClient`] backed by the Gemini `generateContent` REST endpoint.
///
/// Requests use deterministic sampling (temperature 0 by default) and a
/// bounded output-token budget.
pub struct GeminiClient {
    http: reqwest::blocking::Client,
    api_key: String,
    model: String,
    temperature: f32,
    max_output_tokens: u32,
}

impl GeminiClient {
    /// Create a client with an explicit API key.
    pub fn new(api_key: impl Into<String>, config: &PipelineConfig) -> Self {
        Self {
            http: reqwest::blocking::Client::new(),
            api_key: api_key.into(),
            model: config.model.clone(),
            temperature: config.temperature,
            max_output_tokens: config.max_output_tokens,
        }
    }

    /// Create a client from the `GOOGLE_API_KEY` environment variable.
    ///
    /// A missing credential is a fatal precondition, checked before any
    /// document processing starts.
    pub fn from_env(config: &PipelineConfig) -> Result<Self> {
        let api_key =
            std::env::var(API_KEY_VAR).map_err(|_| Error::MissingCredential(API_KEY_VAR))?;
        if api_key.is_empty() {
            return Err(Error::MissingCredential(API_KEY_VAR));
        }
        Ok(Self::new(api_key, config))
    }
}

impl ModelClient for GeminiClient {
    fn generate(&self, prompt: &str) -> Result<String> {
        let url = format!("{}/{}:generateContent", API_BASE, self.model);

        let body = json!({
            "contents": [{"parts": [{"text": prompt}]}],
            "generationConfig": {
                "temperature": self.temperature,
                "maxOutputTokens": self.max_output_tokens,
            }
        });

        let response = self
            .http
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .header("Content-Type", "application/json")
            .json(&body)
            .send()?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().unwrap_or_default();
            return Err(Error::ModelRequest(format!("HTTP {status}: {detail}")));
        }

        let payload: serde_json::Value = response.json()?;
        let text = payload
            .get("candidates")
            .and_then(|c| c.get(0))
            .and_then(|c| c.pointer("/content/parts/0/text"))
            .and_then(serde_json::Value::as_str)
            .ok_or_else(|| Error::ModelRequest("response carried no text candidate".into()))?;

        Ok(text.trim().to_string())
    }
}

/// Ask the model to score one document's sections.
///
/// Every failure mode — transport error, unparseable reply, empty result —
/// collapses to an empty list with a diagnostic, so the caller's document
/// loop keeps going.
pub fn score_document<C: ModelClient>(
    client: &C,
    prompt: &str,
    document: &str,
) -> Vec<ScoredSection> {
    let raw = match client.generate(prompt) {
        Ok(raw) => raw,
        Err(e) => {
            warn!("{document}: model call failed: {e}");
            return Vec::new();
        }
    };

    match parse_reply(&raw) {
        ModelReply::Parsed(items) => {
            if items.is_empty() {
                warn!("{document}: model returned no relevant sections");
            }
            items
                .into_iter()
                .map(|item| ScoredSection {
                    document: document.to_string(),
                    section_title: item.section_title,
                    page_number: item.page_number,
                    summary: item.summary,
                })
                .collect()
        }
        ModelReply::Unparsed(raw) => {
            warn!("{document}: model response was not parseable as a JSON array: {raw}");
            Vec::new()
        }
    }
}
