//! link-button: renderable CMS link buttons
//!
//! A [`Button`] holds the properties of one hyperlink (label, target, CSS
//! class, markup template) and renders them to HTML. Targets may be page ids,
//! page paths or arbitrary URLs; pages are resolved through the host's
//! [`ContentRepository`], and labels may carry per-language translations
//! picked for the viewer at render time.
//!
//! Key concepts:
//! - Validation happens on write: [`Button::set`] sanitizes text and rejects
//!   bad values, so rendering never fails
//! - Collaborators (repository, sanitizer, languages) are injected through
//!   [`ButtonContext`], never looked up globally
//! - Rendering is a pipeline: template substitution, then any
//!   [`PostProcessor`]s the caller registered
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use link_button::{Button, ButtonContext, Page, PageTree};
//!
//! let pages = PageTree::new().with_page(Page::new(42, "/about/"));
//! let mut button = Button::new(ButtonContext::new(Arc::new(pages)));
//! button.set("label", "About us").unwrap();
//! button.set("target", "42").unwrap();
//!
//! assert_eq!(button.to_string(), r#"<a href="/about/" class="">About us</a>"#);
//! ```

pub mod button;
pub mod config;
pub mod content;
pub mod error;
pub mod language;
pub mod render;
pub mod sanitizer;
pub mod store;
pub mod template;

pub use button::{label_key, Button, ButtonContext, Target};
pub use config::{ButtonConfig, DEFAULT_HTML};
pub use content::{ContentNode, ContentRepository, Page, PageTree};
pub use error::{ButtonError, ConfigError};
pub use language::{Language, LanguageSupport, Languages};
pub use render::{PostProcessor, RenderPipeline, Wrap};
pub use sanitizer::{DefaultSanitizer, Sanitizer};
pub use store::PropertyStore;
pub use template::{placeholders, populate_tags};
