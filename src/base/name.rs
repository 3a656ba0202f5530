//! Hierarchical names.
//!
//! A name is a dot-separated sequence of labels written most-specific-first
//! (`www.a.b`). Resolution walks it most-general-first, so the cache keys
//! derived here are the *suffix names*: dotted joins of the reversed labels
//! up to some depth (`b`, `b.a`, `b.a.www`).

use std::fmt;

/// A hierarchical name to resolve.
///
/// Lightweight wrapper around the external textual form; provides the
/// label views the resolver walks.
#[derive(Clone, Hash, Eq, PartialEq)]
pub struct Name {
    host: Box<str>,
}

impl Name {
    /// Creates a new [`Name`] from any string-like type.
    #[inline]
    pub fn new(host: impl Into<Box<str>>) -> Self {
        Self { host: host.into() }
    }

    /// View the name as a string slice (external, most-specific-first form).
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.host
    }

    /// Labels in external order, most specific first. The empty name has no
    /// labels.
    pub fn labels(&self) -> impl DoubleEndedIterator<Item = &str> {
        self.host.split('.').filter(|label| !label.is_empty())
    }

    /// Labels in resolution order, most general (root-side) first.
    pub fn labels_root_first(&self) -> impl Iterator<Item = &str> {
        self.labels().rev()
    }

    /// Number of labels.
    pub fn label_count(&self) -> usize {
        self.labels().count()
    }

    /// The root-first dotted join of all labels — the form used as a cache
    /// key and compared against reverse-lookup answers. `www.a.b` becomes
    /// `b.a.www`.
    pub fn cache_key(&self) -> String {
        let labels: Vec<&str> = self.labels_root_first().collect();
        labels.join(".")
    }

    /// Suffix names at every depth, shortest to longest: element `i` is the
    /// cache key for the first `i + 1` root-first labels.
    pub fn suffix_keys(&self) -> Vec<String> {
        let labels: Vec<&str> = self.labels_root_first().collect();
        (0..labels.len()).map(|i| labels[..=i].join(".")).collect()
    }
}

impl From<&str> for Name {
    fn from(value: &str) -> Self {
        Name::new(value)
    }
}

impl From<String> for Name {
    fn from(value: String) -> Self {
        Name::new(value)
    }
}

impl fmt::Debug for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.host, f)
    }
}

impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.host, f)
    }
}
