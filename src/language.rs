//! Localization collaborator
//!
//! Buttons never reach for a global "current user". The viewer's language and
//! the configured language set are handed in through [`LanguageSupport`].

/// A configured site language.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Language {
    pub id: u64,
    /// Name used in `langFor<Name>` properties, e.g. `german`.
    pub name: String,
    /// Localized path segment, e.g. `de`. Empty for the default language.
    pub segment: String,
}

impl Language {
    pub fn new(id: u64, name: impl Into<String>, segment: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            segment: segment.into(),
        }
    }
}

pub trait LanguageSupport: Send + Sync {
    /// Every configured language, default first.
    fn languages(&self) -> &[Language];

    fn default_language(&self) -> &Language;

    /// Language of the viewer the button is rendered for.
    fn viewer_language(&self) -> &Language;

    /// Whether pages carry per-language path segments.
    fn page_names(&self) -> bool;

    /// Languages other than the default, in configured order.
    fn other_languages(&self) -> Vec<&Language> {
        let default_id = self.default_language().id;
        self.languages()
            .iter()
            .filter(|l| l.id != default_id)
            .collect()
    }

    fn viewer_is_default(&self) -> bool {
        self.viewer_language().id == self.default_language().id
    }
}

/// Static language configuration for one viewer.
#[derive(Debug, Clone)]
pub struct Languages {
    languages: Vec<Language>,
    viewer: usize,
    page_names: bool,
}

impl Languages {
    /// Create a language set; the first entry is the default and the initial
    /// viewer language.
    ///
    /// Returns `None` when `languages` is empty.
    pub fn new(languages: Vec<Language>) -> Option<Self> {
        if languages.is_empty() {
            return None;
        }
        Some(Self {
            languages,
            viewer: 0,
            page_names: false,
        })
    }

    /// Enable localized path segments.
    pub fn with_page_names(mut self, enabled: bool) -> Self {
        self.page_names = enabled;
        self
    }

    /// Switch the viewer language. Unknown ids keep the current viewer.
    pub fn with_viewer(mut self, language_id: u64) -> Self {
        if let Some(index) = self.languages.iter().position(|l| l.id == language_id) {
            self.viewer = index;
        }
        self
    }

    pub fn find(&self, language_id: u64) -> Option<&Language> {
        self.languages.iter().find(|l| l.id == language_id)
    }
}

impl LanguageSupport for Languages {
    fn languages(&self) -> &[Language] {
        &self.languages
    }

    fn default_language(&self) -> &Language {
        &self.languages[0]
    }

    fn viewer_language(&self) -> &Language {
        &self.languages[self.viewer]
    }

    fn page_names(&self) -> bool {
        self.page_names
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Languages {
        Languages::new(vec![
            Language::new(1010, "default", ""),
            Language::new(1011, "german", "de"),
            Language::new(1012, "french", "fr"),
        ])
        .unwrap()
    }

    #[test]
    fn test_default_is_first() {
        let langs = sample();
        assert_eq!(langs.default_language().id, 1010);
        assert_eq!(langs.viewer_language().id, 1010);
        assert!(langs.viewer_is_default());
        assert!(!langs.page_names());
    }

    #[test]
    fn test_other_languages() {
        let langs = sample();
        let ids: Vec<_> = langs.other_languages().iter().map(|l| l.id).collect();
        assert_eq!(ids, vec![1011, 1012]);
    }

    #[test]
    fn test_with_viewer() {
        let langs = sample().with_viewer(1012);
        assert_eq!(langs.viewer_language().name, "french");
        assert!(!langs.viewer_is_default());

        let langs = langs.with_viewer(9999);
        assert_eq!(langs.viewer_language().name, "french");
    }

    #[test]
    fn test_empty_rejected() {
        assert!(Languages::new(vec![]).is_none());
    }
}
