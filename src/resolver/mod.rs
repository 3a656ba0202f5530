//! Concurrent resolution core.
//!
//! Resolves a fully-qualified hierarchical name into an [`Addr`] by walking
//! a chain of authoritative servers one label at a time, starting from a
//! root picked round-robin across concurrent callers.
//!
//! Per label the resolver consults the shared [`ResolutionCache`] from the
//! most specific remaining suffix downward. A fresh entry is trusted
//! outright and skips the walk past it. Stale entries are revalidated in
//! the background through reverse lookups racing a bounded wait window
//! against the always-available authoritative fallback; validations that
//! outlive the window are abandoned, not cancelled, and their late cache
//! effects stay correct because every cache mutation is a single atomic
//! entry operation.

use crate::authority::Authority;
use crate::base::{Addr, Name, ResolveError};
use crate::cache::ResolutionCache;
use futures::stream::{FuturesUnordered, StreamExt};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::timeout;

/// Upper bound on waiting for the first revalidation to finish.
pub const VALIDATION_WAIT: Duration = Duration::from_millis(110);

/// Extra window, after the first revalidation lands, for stragglers.
pub const VALIDATION_GRACE: Duration = Duration::from_millis(10);

/// Round-robin picker over the root server list.
///
/// A process-wide monotonically increasing counter, read modulo the root
/// count, so concurrent resolutions spread across every root. It only ever
/// increments; overflow wraps and is not an error.
#[derive(Debug, Default)]
pub struct RootSelector {
    next: AtomicUsize,
}

impl RootSelector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Index of the root the next resolution should start from.
    pub fn next_index(&self, root_count: usize) -> usize {
        self.next.fetch_add(1, Ordering::Relaxed) % root_count
    }
}

/// Depth and address of a suffix whose reverse lookup confirmed it.
type ValidationOutcome = Option<(usize, Addr)>;

/// Label-by-label resolver over an authoritative hierarchy.
///
/// Cheap to clone; clones share the cache and the root-selection counter,
/// and each `resolve` call runs as an independent unit of concurrent work.
#[derive(Clone)]
pub struct Resolver {
    authority: Arc<dyn Authority>,
    cache: Arc<ResolutionCache>,
    roots: Arc<[Addr]>,
    selector: Arc<RootSelector>,
}

impl Resolver {
    /// Creates a resolver with its own empty cache.
    pub fn new(authority: Arc<dyn Authority>) -> Self {
        Self::with_cache(authority, Arc::new(ResolutionCache::new()))
    }

    /// Creates a resolver sharing an existing cache.
    ///
    /// The root server list is read once here; the authority keeps it
    /// stable for the process lifetime.
    pub fn with_cache(authority: Arc<dyn Authority>, cache: Arc<ResolutionCache>) -> Self {
        let roots: Arc<[Addr]> = authority.root_servers().into();
        Self {
            authority,
            cache,
            roots,
            selector: Arc::new(RootSelector::new()),
        }
    }

    /// The cache shared by this resolver and its clones.
    pub fn cache(&self) -> &ResolutionCache {
        &self.cache
    }

    /// Resolves `name` to its address.
    ///
    /// Fails with [`ResolveError::NotFound`] the first time any label along
    /// the chain is unknown at its server; nothing is cached for the
    /// failing suffix or anything past it.
    pub async fn resolve(&self, name: &str) -> Result<Addr, ResolveError> {
        let name = Name::new(name);
        let labels: Vec<String> = name.labels_root_first().map(str::to_string).collect();
        if labels.is_empty() {
            return Err(ResolveError::NotFound);
        }
        let suffixes = name.suffix_keys();

        let mut current = self.roots[self.selector.next_index(self.roots.len())];
        tracing::debug!(name = %name, root = %current, "resolving");

        let mut i = 0;
        while i < labels.len() {
            // Most specific remaining suffix first. A fresh hit wins outright;
            // stale hits all queue background revalidation.
            let mut validations = FuturesUnordered::new();
            let mut shortcut: Option<(usize, Addr)> = None;
            for depth in (i..labels.len()).rev() {
                let Some(entry) = self.cache.get(&suffixes[depth]) else {
                    continue;
                };
                if entry.is_fresh(self.cache.ttl()) {
                    tracing::debug!(suffix = %suffixes[depth], addr = %entry.addr, "fresh cache hit");
                    shortcut = Some((depth, entry.addr));
                    break;
                }
                tracing::debug!(suffix = %suffixes[depth], addr = %entry.addr, "stale entry, revalidating");
                validations.push(self.spawn_validation(depth, suffixes[depth].clone(), entry.addr));
            }

            if shortcut.is_none() {
                // No trusted entry: issue the authoritative fallback before
                // waiting on any revalidation, so a cold or invalidated cache
                // pays nothing beyond the lookup's own latency.
                let fallback = self.spawn_forward(current, labels[i].clone());

                if !validations.is_empty() {
                    shortcut = collect_validations(&mut validations).await;
                }

                if shortcut.is_none() {
                    current = fallback.await.map_err(|_| ResolveError::TaskFailed)??;
                    self.cache.insert(suffixes[i].as_str(), current);
                    tracing::debug!(suffix = %suffixes[i], addr = %current, "authoritative answer");
                    i += 1;
                    continue;
                }
                // A revalidated suffix beat the fallback; the fallback task is
                // left to finish on its own and its answer goes unused.
            }

            if let Some((depth, addr)) = shortcut {
                current = addr;
                i = depth + 1;
            }
        }

        // The full name as given gets its own entry, even when a suffix
        // entry already covers it.
        self.cache.insert(name.as_str(), current);
        tracing::debug!(name = %name, addr = %current, "resolved");
        Ok(current)
    }

    fn spawn_forward(&self, server: Addr, label: String) -> JoinHandle<Result<Addr, ResolveError>> {
        let authority = Arc::clone(&self.authority);
        tokio::spawn(async move { authority.forward(server, &label).await })
    }

    /// Revalidates one stale entry: a reverse lookup on the cached address
    /// must map back to exactly the suffix it was cached under.
    ///
    /// The cache effect is applied by the task itself, so a task abandoned
    /// by its wait window still refreshes or evicts the entry when it
    /// eventually finishes. A lookup error proves nothing and leaves the
    /// entry untouched.
    fn spawn_validation(
        &self,
        depth: usize,
        suffix: String,
        cached: Addr,
    ) -> JoinHandle<ValidationOutcome> {
        let authority = Arc::clone(&self.authority);
        let cache = Arc::clone(&self.cache);
        tokio::spawn(async move {
            match authority.reverse(cached).await {
                Ok(name) if name.cache_key() == suffix => {
                    cache.refresh(&suffix);
                    tracing::debug!(suffix = %suffix, addr = %cached, "revalidated");
                    Some((depth, cached))
                }
                Ok(other) => {
                    cache.remove(&suffix);
                    tracing::debug!(suffix = %suffix, actual = %other, "stale mapping evicted");
                    None
                }
                Err(_) => {
                    tracing::debug!(suffix = %suffix, "revalidation unverifiable");
                    None
                }
            }
        })
    }
}

/// Waits for revalidations within the bounded window and returns the
/// longest (most specific) confirmed suffix, if any.
///
/// Waits up to [`VALIDATION_WAIT`] for the first task to finish, then
/// grants [`VALIDATION_GRACE`] for near-simultaneous ones to land. Tasks
/// still pending afterwards are abandoned for this step.
async fn collect_validations(
    pending: &mut FuturesUnordered<JoinHandle<ValidationOutcome>>,
) -> ValidationOutcome {
    let mut confirmed: Vec<(usize, Addr)> = Vec::new();

    match timeout(VALIDATION_WAIT, pending.next()).await {
        Ok(Some(Ok(Some(hit)))) => confirmed.push(hit),
        Ok(Some(_)) => {} // finished without a usable match; grace still applies
        Ok(None) => return None,
        Err(_) => return None, // window elapsed with nothing finished
    }

    let grace = tokio::time::sleep(VALIDATION_GRACE);
    tokio::pin!(grace);
    loop {
        tokio::select! {
            outcome = pending.next() => match outcome {
                Some(Ok(Some(hit))) => confirmed.push(hit),
                Some(_) => {}
                None => break,
            },
            _ = &mut grace => break,
        }
    }

    confirmed.into_iter().max_by_key(|(depth, _)| *depth)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::authority::MemoryAuthority;

    fn addr(text: &str) -> Addr {
        text.parse().unwrap()
    }

    #[test]
    fn test_root_selector_rotates() {
        let selector = RootSelector::new();
        assert_eq!(selector.next_index(3), 0);
        assert_eq!(selector.next_index(3), 1);
        assert_eq!(selector.next_index(3), 2);
        assert_eq!(selector.next_index(3), 0);
    }

    #[test]
    fn test_root_selector_wraps_on_overflow() {
        let selector = RootSelector {
            next: AtomicUsize::new(usize::MAX),
        };
        let at_max = selector.next_index(3);
        assert_eq!(at_max, usize::MAX % 3);
        // fetch_add wrapped the counter to zero
        assert_eq!(selector.next_index(3), 0);
    }

    #[tokio::test]
    async fn test_empty_name_is_not_found() {
        let mut authority = MemoryAuthority::new(vec![addr("10.0.0.1")]);
        authority.insert("a", addr("10.0.1.1")).unwrap();
        let resolver = Resolver::new(Arc::new(authority));

        assert_eq!(resolver.resolve("").await, Err(ResolveError::NotFound));
        assert!(resolver.cache().is_empty());
    }

    #[tokio::test]
    async fn test_single_label_resolution() {
        let mut authority = MemoryAuthority::new(vec![addr("10.0.0.1")]);
        authority.insert("a", addr("10.0.1.1")).unwrap();
        let resolver = Resolver::new(Arc::new(authority));

        assert_eq!(resolver.resolve("a").await, Ok(addr("10.0.1.1")));
        assert_eq!(resolver.cache().get("a").unwrap().addr, addr("10.0.1.1"));
    }
}
