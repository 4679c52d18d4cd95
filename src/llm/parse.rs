//! Tolerant decoding of model responses.
//!
//! Models asked for "the JSON array only" still wrap it in prose or code
//! fences often enough that the decoder is a chain of fallback strategies:
//! direct JSON parse, then — only when the response is not valid JSON at
//! all — extraction of the first bracketed substring. A response that
//! parses to a non-array (a wrapper object, a bare string) is rejected
//! without salvage: the model did not answer in the requested shape.
//! Callers only ever see [`ModelReply::Parsed`] or [`ModelReply::Unparsed`].

use std::sync::OnceLock;

use regex::Regex;
use serde_json::Value;

/// One ranked entry from a model response.
#[derive(Debug, Clone, PartialEq)]
pub struct RankedSection {
    pub section_title: String,
    pub page_number: i32,
    pub summary: String,
}

/// Decoded model response.
#[derive(Debug, Clone)]
pub enum ModelReply {
    /// The response yielded a JSON array; items carry default substitutions
    /// for missing fields.
    Parsed(Vec<RankedSection>),
    /// Nothing parseable was found; the raw text is kept for diagnostics.
    Unparsed(String),
}

impl ModelReply {
    /// The parsed items, or `None` for an unparsed reply.
    pub fn items(self) -> Option<Vec<RankedSection>> {
        match self {
            ModelReply::Parsed(items) => Some(items),
            ModelReply::Unparsed(_) => None,
        }
    }
}

/// First `[...]` substring, non-greedy, spanning lines.
fn array_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"(?s)\[.*?\]").expect("valid regex"))
}

/// Decode a raw model response.
pub fn parse_reply(raw: &str) -> ModelReply {
    // 1. The whole response is valid JSON: accept an array, reject anything
    //    else outright. A wrapper object is not scanned for embedded arrays;
    //    the model did not answer in the requested shape.
    match serde_json::from_str::<Value>(raw) {
        Ok(Value::Array(items)) => {
            return ModelReply::Parsed(items.iter().map(ranked_from_value).collect());
        }
        Ok(_) => return ModelReply::Unparsed(raw.to_string()),
        Err(_) => {}
    }

    // 2. Not JSON at all: the array may be embedded in surrounding prose.
    if let Some(found) = array_pattern().find(raw) {
        if let Ok(Value::Array(items)) = serde_json::from_str::<Value>(found.as_str()) {
            return ModelReply::Parsed(items.iter().map(ranked_from_value).collect());
        }
    }

    ModelReply::Unparsed(raw.to_string())
}

/// Convert one array element, substituting defaults for anything missing:
/// empty title, page -1, empty summary.
fn ranked_from_value(value: &Value) -> RankedSection {
    RankedSection {
        section_title: value
            .get("section_title")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string(),
        page_number: value
            .get("page_number")
            .and_then(Value::as_i64)
            .and_then(|n| i32::try_from(n).ok())
            .unwrap_or(-1),
        summary: value
            .get("summary")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string(),
    }
}
