//! Error types for button property assignment and configuration loading.

use thiserror::Error;

/// Errors raised synchronously by [`Button::set`](crate::Button::set).
///
/// Target resolution misses (unknown page id or path) are not errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ButtonError {
    /// A textual property was given something other than a string or null.
    #[error("button property '{key}' only accepts string values (got {found})")]
    InvalidPropertyValue { key: String, found: &'static str },

    /// A derived or internal property was assigned directly.
    #[error("modifying property '{key}' is not allowed; use 'target' instead")]
    ImmutableProperty { key: String },
}

impl ButtonError {
    /// The property key the failed assignment targeted.
    pub fn key(&self) -> &str {
        match self {
            ButtonError::InvalidPropertyValue { key, .. } => key,
            ButtonError::ImmutableProperty { key } => key,
        }
    }

    pub fn is_immutable(&self) -> bool {
        matches!(self, ButtonError::ImmutableProperty { .. })
    }
}

/// Errors raised while parsing a [`ButtonConfig`](crate::ButtonConfig).
///
/// Reading the file is left to [`ButtonConfig::load`](crate::ButtonConfig::load),
/// which reports I/O failures with path context.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}
