//! Segment enrichment configuration.

use std::time::Duration;

/// Environment variable holding the Gemini API key.
pub const API_KEY_VAR: &str = "GEMINI_API_KEY";

/// Environment variable overriding the model name.
pub const MODEL_VAR: &str = "STRAITS_GEMINI_MODEL";

/// Default model.
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";

/// Default Gemini REST endpoint.
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Settings for segment enrichment.
#[derive(Clone)]
pub struct SegmentConfig {
    /// API key; enrichment is skipped without one
    pub api_key: Option<String>,
    /// Model name
    pub model: String,
    /// API base URL
    pub base_url: String,
    /// Records per prompt
    pub batch_size: usize,
    /// Pause after each successful batch
    pub pause: Duration,
    /// Characters of business summary sent per record
    pub summary_chars: usize,
    /// HTTP request timeout
    pub timeout: Duration,
}

impl std::fmt::Debug for SegmentConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SegmentConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .field("batch_size", &self.batch_size)
            .field("pause", &self.pause)
            .field("summary_chars", &self.summary_chars)
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl Default for SegmentConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            batch_size: 20,
            pause: Duration::from_secs(1),
            summary_chars: 500,
            timeout: Duration::from_secs(60),
        }
    }
}

impl SegmentConfig {
    /// Load from the process environment, reading `.env` first if present.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable lookup. Blank values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let defaults = Self::default();
        Self {
            api_key: get(API_KEY_VAR),
            model: get(MODEL_VAR).unwrap_or(defaults.model),
            ..defaults
        }
    }

    /// Whether a model call can be made at all.
    pub const fn is_enabled(&self) -> bool {
        self.api_key.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults() {
        let config = SegmentConfig::default();
        assert_eq!(config.model, "gemini-2.5-flash");
        assert_eq!(config.batch_size, 20);
        assert_eq!(config.summary_chars, 500);
        assert!(!config.is_enabled());
    }

    #[test]
    fn test_from_lookup() {
        let vars: HashMap<&str, &str> =
            [(API_KEY_VAR, "secret"), (MODEL_VAR, " gemini-2.0-pro ")].into();
        let config = SegmentConfig::from_lookup(|k| vars.get(k).map(ToString::to_string));

        assert_eq!(config.api_key.as_deref(), Some("secret"));
        assert_eq!(config.model, "gemini-2.0-pro");
        assert!(config.is_enabled());
        assert!(!format!("{config:?}").contains("secret"));
    }

    #[test]
    fn test_blank_values_are_unset() {
        let config = SegmentConfig::from_lookup(|_| Some("  ".to_string()));
        assert_eq!(config.api_key, None);
        assert_eq!(config.model, DEFAULT_MODEL);
    }
}
