//! Link directives collected while rewriting.

/// Ordered list of link URLs, one per resolved specifier.
///
/// Duplicates are kept: a module imported twice is linked twice, and the
/// browser loads each HTML import once.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DirectiveCollector {
    urls: Vec<String>,
}

impl DirectiveCollector {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a link URL.
    pub fn record(&mut self, url: impl Into<String>) {
        self.urls.push(url.into());
    }

    /// All recorded URLs in insertion order.
    #[must_use]
    pub fn all(&self) -> &[String] {
        &self.urls
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.urls.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.urls.is_empty()
    }

    #[must_use]
    pub fn into_vec(self) -> Vec<String> {
        self.urls
    }
}
