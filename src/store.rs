//! Ordered property store
//!
//! A small insertion-ordered map from property name to JSON value, with a set
//! of reserved keys that external writes may not touch. Derived values are
//! written through [`PropertyStore::set_derived`], which skips the check.

use indexmap::IndexMap;
use serde_json::Value;

use crate::error::ButtonError;

#[derive(Debug, Clone, Default)]
pub struct PropertyStore {
    values: IndexMap<String, Value>,
    reserved: Vec<&'static str>,
}

impl PropertyStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store whose `reserved` keys reject external writes.
    pub fn with_reserved(reserved: &[&'static str]) -> Self {
        Self {
            values: IndexMap::new(),
            reserved: reserved.to_vec(),
        }
    }

    pub fn is_reserved(&self, key: &str) -> bool {
        self.reserved.iter().any(|r| *r == key)
    }

    /// Store `value` under `key` unless the key is reserved.
    pub fn set(&mut self, key: impl Into<String>, value: Value) -> Result<(), ButtonError> {
        let key = key.into();
        if self.is_reserved(&key) {
            return Err(ButtonError::ImmutableProperty { key });
        }
        self.values.insert(key, value);
        Ok(())
    }

    /// Store a derived value, bypassing the reserved-key check.
    pub(crate) fn set_derived(&mut self, key: impl Into<String>, value: Value) {
        self.values.insert(key.into(), value);
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    /// String form of a stored value, if it is a string.
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.values.get(key).and_then(Value::as_str)
    }

    /// Dotted-path lookup: `a.b.0` reads field `b` of the object stored under
    /// `a`, then index `0` of that array.
    pub fn get_dot(&self, path: &str) -> Option<Value> {
        let (head, rest) = match path.split_once('.') {
            Some((head, rest)) => (head, Some(rest)),
            None => (path, None),
        };
        let value = self.values.get(head)?;
        match rest {
            Some(rest) => traverse(value, rest),
            None => Some(value.clone()),
        }
    }

    pub fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.values.shift_remove(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Walk a dotted path into a JSON value. Array segments must be indices.
pub fn traverse(value: &Value, path: &str) -> Option<Value> {
    let mut current = value;
    for segment in path.split('.') {
        current = match current {
            Value::Object(map) => map.get(segment)?,
            Value::Array(items) => items.get(segment.parse::<usize>().ok()?)?,
            _ => return None,
        };
    }
    Some(current.clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_preserves_insertion_order() {
        let mut store = PropertyStore::new();
        store.set("label", json!("Go")).unwrap();
        store.set("target", json!("/foo")).unwrap();
        store.set("class", json!("btn")).unwrap();
        store.set("label", json!("Stop")).unwrap();

        let keys: Vec<_> = store.keys().collect();
        assert_eq!(keys, vec!["label", "target", "class"]);
        assert_eq!(store.get_str("label"), Some("Stop"));
    }

    #[test]
    fn test_reserved_key_rejected() {
        let mut store = PropertyStore::with_reserved(&["httpUrl"]);
        let err = store.set("httpUrl", json!("x")).unwrap_err();
        assert!(err.is_immutable());
        assert!(!store.contains("httpUrl"));

        store.set_derived("httpUrl", json!("http://example.com/"));
        assert_eq!(store.get_str("httpUrl"), Some("http://example.com/"));
    }

    #[test]
    fn test_get_dot() {
        let mut store = PropertyStore::new();
        store
            .set("meta", json!({"author": {"name": "Ada"}, "tags": ["a", "b"]}))
            .unwrap();

        assert_eq!(store.get_dot("meta.author.name"), Some(json!("Ada")));
        assert_eq!(store.get_dot("meta.tags.1"), Some(json!("b")));
        assert_eq!(store.get_dot("meta.tags.x"), None);
        assert_eq!(store.get_dot("meta.missing"), None);
        assert_eq!(store.get_dot("missing.field"), None);
    }

    #[test]
    fn test_remove_keeps_order() {
        let mut store = PropertyStore::new();
        store.set("a", json!(1)).unwrap();
        store.set("b", json!(2)).unwrap();
        store.set("c", json!(3)).unwrap();
        assert_eq!(store.remove("b"), Some(json!(2)));
        assert_eq!(store.keys().collect::<Vec<_>>(), vec!["a", "c"]);
        assert_eq!(store.len(), 2);
    }
}
