//! Content repository collaborator
//!
//! A button target may resolve to a content node ("page") living in the host
//! repository. The host exposes lookups through [`ContentRepository`] and
//! URL/field accessors through [`ContentNode`]. [`Page`] and [`PageTree`]
//! are the in-memory implementations.

use std::collections::{BTreeMap, HashMap};
use std::fmt;

use serde_json::{Map, Value};

use crate::language::Language;

/// A resolved content node.
pub trait ContentNode: fmt::Debug + Send + Sync {
    fn id(&self) -> u64;

    /// Hierarchical path, e.g. `/about/team/`.
    fn path(&self) -> &str;

    /// Root-relative URL.
    fn url(&self) -> String;

    /// Root-relative URL localized for `language`.
    fn local_url(&self, language: &Language) -> String;

    /// Absolute URL including scheme and host.
    fn http_url(&self) -> String;

    /// Absolute URL localized for `language`.
    fn local_http_url(&self, language: &Language) -> String;

    /// Named field value, used for `targetPage.<field>` lookups.
    fn field(&self, name: &str) -> Option<Value>;

    fn clone_node(&self) -> Box<dyn ContentNode>;
}

impl Clone for Box<dyn ContentNode> {
    fn clone(&self) -> Self {
        self.clone_node()
    }
}

pub trait ContentRepository: Send + Sync {
    fn find_by_id(&self, id: u64) -> Option<Box<dyn ContentNode>>;

    fn find_by_path(&self, path: &str) -> Option<Box<dyn ContentNode>>;
}

/// In-memory content node.
#[derive(Debug, Clone, PartialEq)]
pub struct Page {
    pub id: u64,
    pub path: String,
    /// Scheme and host prefix for absolute URLs, e.g. `https://example.com`.
    pub host: String,
    /// Full localized paths keyed by language id.
    pub localized_paths: BTreeMap<u64, String>,
    pub fields: Map<String, Value>,
}

impl Page {
    pub fn new(id: u64, path: impl Into<String>) -> Self {
        Self {
            id,
            path: normalize_path(&path.into()),
            host: String::new(),
            localized_paths: BTreeMap::new(),
            fields: Map::new(),
        }
    }

    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_localized_path(mut self, language_id: u64, path: impl Into<String>) -> Self {
        self.localized_paths
            .insert(language_id, normalize_path(&path.into()));
        self
    }

    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(name.into(), value.into());
        self
    }
}

impl ContentNode for Page {
    fn id(&self) -> u64 {
        self.id
    }

    fn path(&self) -> &str {
        &self.path
    }

    fn url(&self) -> String {
        self.path.clone()
    }

    /// Explicit localized path first, then the language segment as a prefix.
    fn local_url(&self, language: &Language) -> String {
        if let Some(path) = self.localized_paths.get(&language.id) {
            return path.clone();
        }
        if language.segment.is_empty() {
            self.path.clone()
        } else {
            format!("/{}{}", language.segment.trim_matches('/'), self.path)
        }
    }

    fn http_url(&self) -> String {
        format!("{}{}", self.host, self.url())
    }

    fn local_http_url(&self, language: &Language) -> String {
        format!("{}{}", self.host, self.local_url(language))
    }

    fn field(&self, name: &str) -> Option<Value> {
        match name {
            "id" => Some(Value::from(self.id)),
            "path" => Some(Value::from(self.path.as_str())),
            "url" => Some(Value::from(self.url())),
            "httpUrl" => Some(Value::from(self.http_url())),
            _ => self.fields.get(name).cloned(),
        }
    }

    fn clone_node(&self) -> Box<dyn ContentNode> {
        Box::new(self.clone())
    }
}

/// In-memory repository indexed by id and path.
#[derive(Debug, Clone, Default)]
pub struct PageTree {
    pages: HashMap<u64, Page>,
    by_path: HashMap<String, u64>,
}

impl PageTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a page, replacing any page with the same id.
    pub fn insert(&mut self, page: Page) {
        if let Some(previous) = self.pages.get(&page.id) {
            self.by_path.remove(&previous.path);
        }
        self.by_path.insert(page.path.clone(), page.id);
        self.pages.insert(page.id, page);
    }

    pub fn with_page(mut self, page: Page) -> Self {
        self.insert(page);
        self
    }

    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }
}

impl ContentRepository for PageTree {
    fn find_by_id(&self, id: u64) -> Option<Box<dyn ContentNode>> {
        self.pages.get(&id).map(|p| p.clone_node())
    }

    fn find_by_path(&self, path: &str) -> Option<Box<dyn ContentNode>> {
        if path.trim().is_empty() {
            return None;
        }
        let id = self.by_path.get(&normalize_path(path))?;
        self.find_by_id(*id)
    }
}

/// Normalize to a leading and trailing slash: `about/team` → `/about/team/`.
fn normalize_path(path: &str) -> String {
    let trimmed = path.trim().trim_matches('/');
    if trimmed.is_empty() {
        "/".to_string()
    } else {
        format!("/{}/", trimmed)
    }
}
