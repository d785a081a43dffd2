//! Input sanitizers
//!
//! Every textual property passes through a [`Sanitizer`] before it is stored.
//! [`DefaultSanitizer`] is the stock implementation; hosts with their own
//! filtering rules plug in a different one through the button context.

use once_cell::sync::Lazy;
use regex::Regex;
use url::Url;

use crate::config::ButtonConfig;

static TAG_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]*>").expect("valid tag regex"));

static SCHEME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([A-Za-z][A-Za-z0-9+.\-]*):").expect("valid scheme regex"));

pub trait Sanitizer: Send + Sync {
    /// Single-line plain text. Must be idempotent.
    fn text(&self, value: &str) -> String;

    /// Multi-line text that keeps markup intact.
    fn text_preserve_markup(&self, value: &str) -> String;

    /// A URL safe to place in an `href`, or empty when rejected.
    fn url_safe(&self, value: &str) -> String;

    /// Characters valid in a page path selector.
    fn selector_safe(&self, value: &str) -> String;
}

#[derive(Debug, Clone)]
pub struct DefaultSanitizer {
    config: ButtonConfig,
}

impl Default for DefaultSanitizer {
    fn default() -> Self {
        Self::from_config(&ButtonConfig::default())
    }
}

impl DefaultSanitizer {
    pub fn from_config(config: &ButtonConfig) -> Self {
        Self {
            config: config.clone(),
        }
    }

    fn absolute_url(&self, value: &str) -> String {
        match Url::parse(value) {
            Ok(url) if self.config.allows_scheme(url.scheme()) => url.to_string(),
            _ => String::new(),
        }
    }
}

impl Sanitizer for DefaultSanitizer {
    fn text(&self, value: &str) -> String {
        let stripped = TAG_RE.replace_all(value, "");
        let flattened: String = stripped
            .chars()
            .map(|c| if c.is_control() { ' ' } else { c })
            .collect();
        let truncated = truncate_chars(flattened.trim(), self.config.label_max_length);
        truncated.trim_end().to_string()
    }

    fn text_preserve_markup(&self, value: &str) -> String {
        let normalized = value.replace("\r\n", "\n").replace('\r', "\n");
        let cleaned: String = normalized
            .chars()
            .filter(|c| !c.is_control() || *c == '\n' || *c == '\t')
            .collect();
        let truncated = truncate_chars(cleaned.trim(), self.config.markup_max_length);
        truncated.trim_end().to_string()
    }

    fn url_safe(&self, value: &str) -> String {
        let compact: String = value.chars().filter(|c| is_url_char(*c)).collect();
        if compact.is_empty() || is_relative(&compact) {
            return compact;
        }

        if let Some(caps) = SCHEME_RE.captures(&compact) {
            let scheme = &caps[1];
            if !self.config.allows_scheme(scheme) {
                return String::new();
            }
            return self.absolute_url(&compact);
        }

        // `example.com/page` reads as a host. Bare words such as `page/sub`
        // or `&#106;avascript:` have no safe reading and are dropped.
        let first_segment = compact.split(['/', '?', '#']).next().unwrap_or_default();
        if first_segment.contains('.') && !first_segment.starts_with('.') {
            return self.absolute_url(&format!("http://{}", compact));
        }

        String::new()
    }

    fn selector_safe(&self, value: &str) -> String {
        value
            .trim()
            .chars()
            .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '/' | '_' | '.' | '-'))
            .collect()
    }
}

/// Relative references keep their leading character, so entity-encoded text
/// after it can never decode into a scheme.
fn is_relative(value: &str) -> bool {
    value.starts_with(['/', '#', '?']) || value.starts_with("./") || value.starts_with("../")
}

fn is_url_char(c: char) -> bool {
    c.is_alphanumeric()
        || matches!(
            c,
            '-' | '.'
                | '_'
                | '~'
                | ':'
                | '/'
                | '?'
                | '#'
                | '['
                | ']'
                | '@'
                | '!'
                | '$'
                | '&'
                | '\''
                | '('
                | ')'
                | '*'
                | '+'
                | ','
                | ';'
                | '='
                | '%'
        )
}

fn truncate_chars(value: &str, max: usize) -> &str {
    match value.char_indices().nth(max) {
        Some((idx, _)) => &value[..idx],
        None => value,
    }
}
