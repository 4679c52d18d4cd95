//! Pipeline configuration.
//!
//! Every tunable that affects extraction or ranking lives here so tests can
//! vary them without touching process-wide state.

/// Configuration for the extraction and ranking pipeline.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Number of top sections to keep in the final report.
    pub top_n: usize,

    /// Model identifier sent to the relevance service.
    pub model: String,

    /// Maximum section body length (in characters) included in the prompt.
    pub truncate_chars: usize,

    /// Font-size tolerance when detecting ties for the largest font on a page.
    ///
    /// Two blocks whose maximum font sizes differ by strictly less than this
    /// value are both treated as heading candidates.
    pub heading_epsilon: f32,

    /// Sampling temperature for the model call.
    pub temperature: f32,

    /// Output-length budget for the model call, in tokens.
    pub max_output_tokens: u32,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            top_n: 5,
            model: "gemini-2.0-flash".to_string(),
            truncate_chars: 1200,
            heading_epsilon: 0.01,
            temperature: 0.0,
            max_output_tokens: 1500,
        }
    }
}

impl PipelineConfig {
    /// Create a configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the number of top sections in the final report.
    pub fn with_top_n(mut self, n: usize) -> Self {
        self.top_n = n;
        self
    }

    /// Set the model identifier.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Set the prompt body truncation length.
    pub fn with_truncate_chars(mut self, chars: usize) -> Self {
        self.truncate_chars = chars;
        self
    }

    /// Set the heading tie-detection epsilon.
    pub fn with_heading_epsilon(mut self, epsilon: f32) -> Self {
        self.heading_epsilon = epsilon;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = PipelineConfig::default();
        assert_eq!(config.top_n, 5);
        assert_eq!(config.truncate_chars, 1200);
        assert_eq!(config.heading_epsilon, 0.01);
        assert_eq!(config.temperature, 0.0);
    }

    #[test]
    fn test_builder_chain() {
        let config = PipelineConfig::new()
            .with_top_n(10)
            .with_model("gemini-2.5-pro")
            .with_truncate_chars(800);
        assert_eq!(config.top_n, 10);
        assert_eq!(config.model, "gemini-2.5-pro");
        assert_eq!(config.truncate_chars, 800);
    }
}
