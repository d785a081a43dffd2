//! Button configuration
//!
//! Loads the template and sanitizer limits from YAML. Every field is optional
//! and falls back to the built-in defaults:
//!
//! ```yaml
//! default_html: '<a href="{target}" class="{class}">{label}</a>'
//! label_max_length: 255
//! markup_max_length: 16384
//! url_schemes: [http, https, mailto, tel, ftp]
//! ```

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;
use tracing::info;

use crate::error::ConfigError;

/// Template installed on every new button.
pub const DEFAULT_HTML: &str = r#"<a href="{target}" class="{class}">{label}</a>"#;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ButtonConfig {
    /// Markup template assigned to `html` at construction.
    pub default_html: String,
    /// Character limit applied by the text sanitizer.
    pub label_max_length: usize,
    /// Character limit applied by the markup-preserving sanitizer.
    pub markup_max_length: usize,
    /// URL schemes the URL sanitizer keeps; anything else is dropped.
    pub url_schemes: Vec<String>,
}

impl Default for ButtonConfig {
    fn default() -> Self {
        Self {
            default_html: DEFAULT_HTML.to_string(),
            label_max_length: 255,
            markup_max_length: 16384,
            url_schemes: ["http", "https", "mailto", "tel", "ftp"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

impl ButtonConfig {
    /// Parse and validate a YAML document.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        let mut config: ButtonConfig = serde_yaml::from_str(yaml)?;
        config.url_schemes = config
            .url_schemes
            .iter()
            .map(|s| s.trim().to_ascii_lowercase())
            .filter(|s| !s.is_empty())
            .collect();
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a YAML file.
    ///
    /// The underlying [`std::io::Error`] or [`ConfigError`] stays reachable
    /// through `downcast_ref`.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading button configuration from {}", path.display());

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;

        let config = Self::from_yaml_str(&content)
            .with_context(|| format!("Failed to parse {}", path.display()))?;

        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.default_html.trim().is_empty() {
            return Err(ConfigError::Invalid("default_html must not be empty".into()));
        }
        if self.label_max_length == 0 {
            return Err(ConfigError::Invalid(
                "label_max_length must be positive".into(),
            ));
        }
        if self.markup_max_length == 0 {
            return Err(ConfigError::Invalid(
                "markup_max_length must be positive".into(),
            ));
        }
        Ok(())
    }

    /// Whether the URL sanitizer keeps `scheme` (case-insensitive).
    pub fn allows_scheme(&self, scheme: &str) -> bool {
        self.url_schemes
            .iter()
            .any(|s| s.eq_ignore_ascii_case(scheme))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_empty_document_uses_defaults() {
        let config = ButtonConfig::from_yaml_str("{}").unwrap();
        assert_eq!(config, ButtonConfig::default());
        assert_eq!(config.default_html, DEFAULT_HTML);
    }

    #[test]
    fn test_partial_override() {
        let config = ButtonConfig::from_yaml_str(
            r#"
label_max_length: 40
url_schemes: [HTTPS, " mailto "]
"#,
        )
        .unwrap();
        assert_eq!(config.label_max_length, 40);
        assert_eq!(config.markup_max_length, 16384);
        assert_eq!(config.url_schemes, vec!["https", "mailto"]);
        assert!(config.allows_scheme("HTTPS"));
        assert!(!config.allows_scheme("http"));
    }

    #[test]
    fn test_rejects_zero_limits() {
        let err = ButtonConfig::from_yaml_str("label_max_length: 0").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));

        let err = ButtonConfig::from_yaml_str("markup_max_length: 0").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_rejects_blank_template() {
        let err = ButtonConfig::from_yaml_str("default_html: '  '").unwrap_err();
        assert!(err.to_string().contains("default_html"));
    }

    #[test]
    fn test_parse_error() {
        let err = ButtonConfig::from_yaml_str("label_max_length: [").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"default_html: '<button class="{{class}}">{{label}}</button>'"#
        )
        .unwrap();

        let config = ButtonConfig::load(file.path()).unwrap();
        assert_eq!(
            config.default_html,
            r#"<button class="{class}">{label}</button>"#
        );
    }

    #[test]
    fn test_load_missing_file() {
        let err = ButtonConfig::load("/nonexistent/button.yaml").unwrap_err();
        assert!(err.to_string().contains("Failed to read"));
        let io = err.downcast_ref::<std::io::Error>().unwrap();
        assert_eq!(io.kind(), std::io::ErrorKind::NotFound);
    }

    #[test]
    fn test_load_invalid_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "label_max_length: 0").unwrap();

        let err = ButtonConfig::load(file.path()).unwrap_err();
        assert!(err.to_string().contains("Failed to parse"));
        assert!(matches!(
            err.downcast_ref::<ConfigError>(),
            Some(ConfigError::Invalid(_))
        ));
    }
}
