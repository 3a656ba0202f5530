//! Deterministic in-memory authority.
//!
//! An oracle over a hand-built name hierarchy, used by tests and as a
//! reference [`Authority`] implementation. Lookups are computed
//! synchronously against immutable maps and answered through a future that
//! optionally sleeps first, so tests can steer races under tokio's paused
//! clock.

use super::{Authority, Forwarding, Reversing};
use crate::base::{Addr, Name, ResolveError};
use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

/// In-memory implementation of [`Authority`].
///
/// Built mutably via [`insert`](Self::insert), then shared behind an `Arc`.
/// Every root address answers the same set of top-level labels, so
/// concurrent callers may start from any root interchangeably.
///
/// # Example
///
/// ```rust,ignore
/// let mut authority = MemoryAuthority::new(vec!["10.0.0.1".parse()?]);
/// authority.insert("b", "10.0.1.1".parse()?)?;
/// authority.insert("a.b", "10.0.2.1".parse()?)?;
/// let authority = Arc::new(authority);
/// ```
pub struct MemoryAuthority {
    roots: Vec<Addr>,
    /// Children of the logical root, shared by every root address.
    root_children: HashMap<String, Addr>,
    /// Children of each interior node, keyed by the node's address.
    children: HashMap<Addr, HashMap<String, Addr>>,
    /// Full external name owning each address.
    names: HashMap<Addr, Name>,
    /// Address registered under each full external name.
    by_name: HashMap<String, Addr>,
    latency: Duration,
    forward_calls: AtomicUsize,
    reverse_calls: AtomicUsize,
}

impl MemoryAuthority {
    /// Creates an authority with the given root server addresses.
    ///
    /// # Panics
    ///
    /// Panics if `roots` is empty; the resolution contract requires at
    /// least one root.
    pub fn new(roots: Vec<Addr>) -> Self {
        assert!(!roots.is_empty(), "authority requires at least one root server");
        Self {
            roots,
            root_children: HashMap::new(),
            children: HashMap::new(),
            names: HashMap::new(),
            by_name: HashMap::new(),
            latency: Duration::ZERO,
            forward_calls: AtomicUsize::new(0),
            reverse_calls: AtomicUsize::new(0),
        }
    }

    /// Answers every lookup only after sleeping for `latency`.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    /// Registers `addr` under the full external name `name` (`"www.a.b"`).
    ///
    /// The parent node (`"a.b"`) must already be registered, except for
    /// single-label names, which attach under the roots. Fails with
    /// [`ResolveError::NotFound`] if the parent is missing.
    pub fn insert(&mut self, name: &str, addr: Addr) -> Result<(), ResolveError> {
        let name = Name::new(name);
        let mut labels = name.labels();
        let leaf = labels.next().ok_or(ResolveError::NotFound)?.to_string();
        let parent: Vec<&str> = labels.collect();

        if parent.is_empty() {
            self.root_children.insert(leaf, addr);
        } else {
            let parent_addr = *self
                .by_name
                .get(&parent.join("."))
                .ok_or(ResolveError::NotFound)?;
            self.children.entry(parent_addr).or_default().insert(leaf, addr);
        }

        self.by_name.insert(name.as_str().to_string(), addr);
        self.names.insert(addr, name);
        Ok(())
    }

    /// Number of forward lookups issued so far.
    pub fn forward_calls(&self) -> usize {
        self.forward_calls.load(Ordering::Relaxed)
    }

    /// Number of reverse lookups issued so far.
    pub fn reverse_calls(&self) -> usize {
        self.reverse_calls.load(Ordering::Relaxed)
    }

    fn child_of(&self, server: Addr, label: &str) -> Option<Addr> {
        if self.roots.contains(&server) {
            return self.root_children.get(label).copied();
        }
        self.children.get(&server)?.get(label).copied()
    }

    fn answer<T: Send + 'static>(
        &self,
        outcome: Result<T, ResolveError>,
    ) -> Pin<Box<dyn Future<Output = Result<T, ResolveError>> + Send>> {
        let latency = self.latency;
        Box::pin(async move {
            if !latency.is_zero() {
                tokio::time::sleep(latency).await;
            }
            outcome
        })
    }
}

impl Authority for MemoryAuthority {
    fn root_servers(&self) -> Vec<Addr> {
        self.roots.clone()
    }

    fn forward(&self, server: Addr, label: &str) -> Forwarding {
        self.forward_calls.fetch_add(1, Ordering::Relaxed);
        let outcome = self.child_of(server, label).ok_or(ResolveError::NotFound);
        self.answer(outcome)
    }

    fn reverse(&self, server: Addr) -> Reversing {
        self.reverse_calls.fetch_add(1, Ordering::Relaxed);
        let outcome = self.names.get(&server).cloned().ok_or(ResolveError::NotFound);
        self.answer(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn addr(text: &str) -> Addr {
        text.parse().unwrap()
    }

    fn sample() -> MemoryAuthority {
        let mut authority = MemoryAuthority::new(vec![addr("10.0.0.1"), addr("10.0.0.2")]);
        authority.insert("b", addr("10.0.1.1")).unwrap();
        authority.insert("a.b", addr("10.0.2.1")).unwrap();
        authority.insert("www.a.b", addr("10.0.3.1")).unwrap();
        authority
    }

    #[tokio::test]
    async fn test_forward_walks_one_label() {
        let authority = sample();
        let b = authority.forward(addr("10.0.0.1"), "b").await.unwrap();
        assert_eq!(b, addr("10.0.1.1"));
        let a = authority.forward(b, "a").await.unwrap();
        assert_eq!(a, addr("10.0.2.1"));
    }

    #[tokio::test]
    async fn test_all_roots_are_equivalent() {
        let authority = sample();
        let via_first = authority.forward(addr("10.0.0.1"), "b").await.unwrap();
        let via_second = authority.forward(addr("10.0.0.2"), "b").await.unwrap();
        assert_eq!(via_first, via_second);
    }

    #[tokio::test]
    async fn test_forward_not_found() {
        let authority = sample();
        assert_eq!(
            authority.forward(addr("10.0.0.1"), "missing").await,
            Err(ResolveError::NotFound)
        );
        assert_eq!(
            authority.forward(addr("99.99.99.99"), "b").await,
            Err(ResolveError::NotFound)
        );
    }

    #[tokio::test]
    async fn test_reverse_returns_full_name() {
        let authority = sample();
        let name = authority.reverse(addr("10.0.3.1")).await.unwrap();
        assert_eq!(name.as_str(), "www.a.b");
        assert_eq!(
            authority.reverse(addr("99.99.99.99")).await,
            Err(ResolveError::NotFound)
        );
    }

    #[test]
    fn test_insert_requires_parent() {
        let mut authority = MemoryAuthority::new(vec![addr("10.0.0.1")]);
        assert_eq!(
            authority.insert("a.missing", addr("10.0.2.1")),
            Err(ResolveError::NotFound)
        );
    }

    #[tokio::test]
    async fn test_call_counters() {
        let authority = sample();
        let _ = authority.forward(addr("10.0.0.1"), "b").await;
        let _ = authority.forward(addr("10.0.0.1"), "b").await;
        let _ = authority.reverse(addr("10.0.1.1")).await;
        assert_eq!(authority.forward_calls(), 2);
        assert_eq!(authority.reverse_calls(), 1);
    }
}
