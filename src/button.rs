//! Button entity
//!
//! A `Button` is a property bag describing one rendered link. Writes go
//! through [`Button::set`], which validates and sanitizes them; `target` is
//! resolved against the content repository so the stored URL is either a
//! page URL or a sanitized raw URL. Rendering fills the `html` template with
//! the current properties and runs the post-processing pipeline.
//!
//! ```
//! use std::sync::Arc;
//! use link_button::{Button, ButtonContext, PageTree};
//!
//! let mut button = Button::new(ButtonContext::new(Arc::new(PageTree::new())));
//! button.set("label", "Go").unwrap();
//! button.set("target", "/foo").unwrap();
//! button.set("class", "btn").unwrap();
//! assert_eq!(button.render(), r#"<a href="/foo" class="btn">Go</a>"#);
//! ```

use std::fmt;
use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, warn};

use crate::config::ButtonConfig;
use crate::content::{ContentNode, ContentRepository, Page};
use crate::error::ButtonError;
use crate::language::{Language, LanguageSupport};
use crate::render::{PostProcessor, RenderPipeline};
use crate::sanitizer::{DefaultSanitizer, Sanitizer};
use crate::store::{traverse, PropertyStore};
use crate::template::populate_tags;

pub const LABEL: &str = "label";
pub const TARGET: &str = "target";
pub const HTTP_TARGET: &str = "httpTarget";
pub const CLASS: &str = "class";
pub const HTML: &str = "html";
pub const URL: &str = "url";
pub const HTTP_URL: &str = "httpUrl";
pub const TARGET_PAGE: &str = "targetPage";

/// Properties only the target setter may write.
const RESERVED: &[&str] = &[TARGET_PAGE, HTTP_TARGET, HTTP_URL, URL];

/// Name of the translated label property for a language, e.g. `label1011`.
pub fn label_key(language_id: u64) -> String {
    format!("{}{}", LABEL, language_id)
}

/// Collaborators and settings shared by every button built from it.
#[derive(Clone)]
pub struct ButtonContext {
    pub repository: Arc<dyn ContentRepository>,
    pub sanitizer: Arc<dyn Sanitizer>,
    pub languages: Option<Arc<dyn LanguageSupport>>,
    pub config: ButtonConfig,
    pub pipeline: RenderPipeline,
}

impl fmt::Debug for ButtonContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ButtonContext")
            .field("localized", &self.languages.is_some())
            .field("config", &self.config)
            .field("pipeline", &self.pipeline)
            .finish_non_exhaustive()
    }
}

impl ButtonContext {
    /// Context with the default sanitizer, config and no localization.
    pub fn new(repository: Arc<dyn ContentRepository>) -> Self {
        let config = ButtonConfig::default();
        Self {
            repository,
            sanitizer: Arc::new(DefaultSanitizer::from_config(&config)),
            languages: None,
            config,
            pipeline: RenderPipeline::new(),
        }
    }

    /// Replace the config; the default sanitizer is rebuilt from it.
    pub fn with_config(mut self, config: ButtonConfig) -> Self {
        self.sanitizer = Arc::new(DefaultSanitizer::from_config(&config));
        self.config = config;
        self
    }

    pub fn with_sanitizer(mut self, sanitizer: Arc<dyn Sanitizer>) -> Self {
        self.sanitizer = sanitizer;
        self
    }

    pub fn with_languages(mut self, languages: Arc<dyn LanguageSupport>) -> Self {
        self.languages = Some(languages);
        self
    }

    pub fn with_post_processor(mut self, processor: impl PostProcessor + 'static) -> Self {
        self.pipeline.push(processor);
        self
    }
}

/// What a `target` assignment points at before resolution.
#[derive(Debug, Clone)]
pub enum Target {
    /// Page id.
    Id(u64),
    /// Digits are treated as a page id, anything else as a path or URL.
    Raw(String),
    /// An already resolved page.
    Node(Box<dyn ContentNode>),
}

impl Target {
    fn from_value(value: Value) -> Result<Self, ButtonError> {
        match value {
            Value::String(s) => Ok(Target::Raw(s)),
            Value::Null => Ok(Target::Raw(String::new())),
            Value::Number(n) => Ok(match n.as_u64() {
                Some(id) => Target::Id(id),
                None => Target::Raw(n.to_string()),
            }),
            other => Err(ButtonError::InvalidPropertyValue {
                key: TARGET.to_string(),
                found: value_kind(&other),
            }),
        }
    }
}

impl From<&str> for Target {
    fn from(value: &str) -> Self {
        Target::Raw(value.to_string())
    }
}

impl From<String> for Target {
    fn from(value: String) -> Self {
        Target::Raw(value)
    }
}

impl From<u64> for Target {
    fn from(id: u64) -> Self {
        Target::Id(id)
    }
}

impl From<Box<dyn ContentNode>> for Target {
    fn from(node: Box<dyn ContentNode>) -> Self {
        Target::Node(node)
    }
}

impl From<Page> for Target {
    fn from(page: Page) -> Self {
        Target::Node(Box::new(page))
    }
}

enum Resolution {
    Node(Box<dyn ContentNode>),
    Url(String),
}

#[derive(Clone)]
pub struct Button {
    context: ButtonContext,
    store: PropertyStore,
    target_page: Option<Box<dyn ContentNode>>,
    pipeline: RenderPipeline,
}

impl fmt::Debug for Button {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Button")
            .field("store", &self.store)
            .field("target_page", &self.target_page)
            .field("pipeline", &self.pipeline)
            .finish_non_exhaustive()
    }
}

impl Button {
    pub fn new(context: ButtonContext) -> Self {
        let mut store = PropertyStore::with_reserved(RESERVED);
        store.set_derived(LABEL, Value::from(""));
        store.set_derived(TARGET, Value::from(""));
        store.set_derived(HTTP_TARGET, Value::from(""));
        store.set_derived(CLASS, Value::from(""));
        store.set_derived(HTML, Value::from(context.config.default_html.as_str()));

        let pipeline = context.pipeline.clone();
        let mut button = Self {
            context,
            store,
            target_page: None,
            pipeline,
        };
        button.populate_language_properties();
        button
    }

    /// Validated property assignment.
    ///
    /// `target` is resolved to a page or a sanitized URL; textual properties
    /// are sanitized; derived properties are rejected.
    pub fn set(&mut self, key: &str, value: impl Into<Value>) -> Result<(), ButtonError> {
        let value = value.into();

        if RESERVED.iter().any(|r| *r == key) || key.starts_with("targetPage.") {
            return Err(ButtonError::ImmutableProperty {
                key: key.to_string(),
            });
        }

        if key == TARGET {
            let target = Target::from_value(value)?;
            self.set_target(target);
            return Ok(());
        }

        if self.is_text_key(key) {
            let text = match &value {
                Value::String(s) => s.as_str(),
                Value::Null => "",
                other => {
                    return Err(ButtonError::InvalidPropertyValue {
                        key: key.to_string(),
                        found: value_kind(other),
                    })
                }
            };
            self.set_text(key, text);
            return Ok(());
        }

        self.store.set(key, value)
    }

    /// Chaining form of [`Button::set`].
    pub fn with(mut self, key: &str, value: impl Into<Value>) -> Result<Self, ButtonError> {
        self.set(key, value)?;
        Ok(self)
    }

    pub fn set_label(&mut self, label: &str) {
        self.set_text(LABEL, label);
    }

    /// Set the translated label shown to viewers of `language_id`.
    ///
    /// Ignored unless `language_id` is a configured non-default language.
    pub fn set_label_for(&mut self, language_id: u64, label: &str) {
        let key = label_key(language_id);
        if !self.is_text_key(&key) {
            warn!(language_id, "no translated label slot for language, ignoring");
            return;
        }
        self.set_text(&key, label);
    }

    pub fn set_class(&mut self, class: &str) {
        self.set_text(CLASS, class);
    }

    pub fn set_html(&mut self, html: &str) {
        self.set_text(HTML, html);
    }

    pub fn add_post_processor(&mut self, processor: impl PostProcessor + 'static) {
        self.pipeline.push(processor);
    }

    /// Resolve and store a target.
    pub fn set_target(&mut self, target: impl Into<Target>) {
        match self.resolve(target.into()) {
            Resolution::Node(node) => {
                let (local, http) = match self.path_language() {
                    Some(language) => (node.local_url(&language), node.local_http_url(&language)),
                    None => (node.url(), node.http_url()),
                };
                debug!(page_id = node.id(), url = %local, "button target resolved to page");
                self.store.set_derived(TARGET, Value::from(local));
                self.store.set_derived(HTTP_TARGET, Value::from(http));
                self.target_page = Some(node);
            }
            Resolution::Url(url) => {
                debug!(url = %url, "button target is a plain url");
                self.target_page = None;
                self.store.set_derived(TARGET, Value::from(url.as_str()));
                self.store.set_derived(HTTP_TARGET, Value::from(url));
            }
        }
    }

    /// Read a property.
    ///
    /// `url`/`httpUrl` alias the stored targets, `targetPage` yields the page
    /// id and `targetPage.<field>` reads from the page.
    pub fn get(&self, key: &str) -> Option<Value> {
        match key {
            URL => self.store.get(TARGET).cloned(),
            HTTP_URL => self.store.get(HTTP_TARGET).cloned(),
            TARGET_PAGE => self.target_page.as_ref().map(|p| Value::from(p.id())),
            _ => {
                if let Some(path) = key.strip_prefix("targetPage.") {
                    return self.page_field(path);
                }
                match self.store.get(key) {
                    Some(value) => Some(value.clone()),
                    None if key.contains('.') => self.store.get_dot(key),
                    None => None,
                }
            }
        }
    }

    pub fn label(&self) -> &str {
        self.store.get_str(LABEL).unwrap_or_default()
    }

    pub fn label_for(&self, language_id: u64) -> Option<&str> {
        self.store.get_str(&label_key(language_id))
    }

    pub fn url(&self) -> &str {
        self.store.get_str(TARGET).unwrap_or_default()
    }

    pub fn http_url(&self) -> &str {
        self.store.get_str(HTTP_TARGET).unwrap_or_default()
    }

    pub fn class(&self) -> &str {
        self.store.get_str(CLASS).unwrap_or_default()
    }

    pub fn html(&self) -> &str {
        self.store.get_str(HTML).unwrap_or_default()
    }

    pub fn target_page(&self) -> Option<&dyn ContentNode> {
        self.target_page.as_deref()
    }

    pub fn properties(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.store.iter()
    }

    /// Label for the current viewer: the translation when one is set and
    /// non-empty, otherwise the default label.
    pub fn display_label(&self) -> &str {
        if let Some(languages) = &self.context.languages {
            if !languages.viewer_is_default() {
                let key = label_key(languages.viewer_language().id);
                if let Some(label) = self.store.get_str(&key).filter(|l| !l.is_empty()) {
                    return label;
                }
            }
        }
        self.label()
    }

    /// Fill the template without post-processing.
    pub fn render_base(&self) -> String {
        let label = self.display_label();
        populate_tags(self.html(), |name| {
            if name == LABEL {
                Some(Value::from(label))
            } else {
                self.get(name)
            }
        })
    }

    pub fn render(&self) -> String {
        self.pipeline.run(self.render_base(), self)
    }

    fn resolve(&self, target: Target) -> Resolution {
        match target {
            Target::Node(node) => Resolution::Node(node),
            Target::Id(id) => self.resolve_id(id),
            Target::Raw(raw) if is_page_id(&raw) => match raw.parse::<u64>() {
                Ok(id) => self.resolve_id(id),
                Err(_) => {
                    warn!(value = %raw, "numeric button target out of range, clearing");
                    Resolution::Url(String::new())
                }
            },
            Target::Raw(raw) => {
                // Only a clean path is looked up; anchors and queries stay URLs.
                let trimmed = raw.trim();
                let path = self.context.sanitizer.selector_safe(trimmed);
                let node = if !path.is_empty() && path == trimmed {
                    self.context.repository.find_by_path(&path)
                } else {
                    None
                };
                match node {
                    Some(node) => Resolution::Node(node),
                    None => Resolution::Url(self.context.sanitizer.url_safe(&raw)),
                }
            }
        }
    }

    fn resolve_id(&self, id: u64) -> Resolution {
        match self.context.repository.find_by_id(id) {
            Some(node) => Resolution::Node(node),
            None => {
                warn!(page_id = id, "button target page not found, clearing");
                Resolution::Url(String::new())
            }
        }
    }

    fn page_field(&self, path: &str) -> Option<Value> {
        let page = self.target_page.as_ref()?;
        match path.split_once('.') {
            Some((field, rest)) => traverse(&page.field(field)?, rest),
            None => page.field(path),
        }
    }

    fn set_text(&mut self, key: &str, text: &str) {
        let clean = if key == HTML {
            self.context.sanitizer.text_preserve_markup(text)
        } else {
            self.context.sanitizer.text(text)
        };
        self.store.set_derived(key, Value::from(clean));
    }

    fn is_text_key(&self, key: &str) -> bool {
        if matches!(key, LABEL | CLASS | HTML) {
            return true;
        }
        match &self.context.languages {
            Some(languages) => languages
                .other_languages()
                .iter()
                .any(|l| label_key(l.id) == key),
            None => false,
        }
    }

    /// Viewer language when pages carry localized path segments.
    fn path_language(&self) -> Option<Language> {
        self.context
            .languages
            .as_ref()
            .filter(|l| l.page_names())
            .map(|l| l.viewer_language().clone())
    }

    fn populate_language_properties(&mut self) {
        let Some(languages) = self.context.languages.clone() else {
            return;
        };
        if !languages.page_names() {
            return;
        }
        let viewer = languages.viewer_language();
        let non_default = !languages.viewer_is_default();

        self.store.set_derived("language", Value::from(viewer.name.as_str()));
        self.store.set_derived("langID", Value::from(viewer.id));
        self.store.set_derived("lang", Value::from(viewer.segment.as_str()));
        self.store
            .set_derived("langNonDefault", Value::from(if non_default { "1" } else { "" }));
        for language in languages.languages() {
            let flag = if language.id == viewer.id { "1" } else { "" };
            self.store.set_derived(
                format!("langFor{}", capitalize(&language.name)),
                Value::from(flag),
            );
        }
    }
}

impl fmt::Display for Button {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

fn is_page_id(value: &str) -> bool {
    !value.is_empty() && value.bytes().all(|b| b.is_ascii_digit())
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
