//! Authoritative server boundary.
//!
//! The resolution core never owns the name hierarchy; it talks to an
//! authoritative side through the [`Authority`] trait: an ordered list of
//! root servers, a single-label forward lookup, and a reverse
//! (address-to-name) lookup. Both lookups are asynchronous and may fail
//! with [`ResolveError::NotFound`].
//!
//! Implementations must be thread-safe: the resolver holds several
//! outstanding calls at once and waits on subsets of them with a timeout.

mod memory;

pub use memory::MemoryAuthority;

use crate::base::{Addr, Name, ResolveError};
use std::{future::Future, pin::Pin, sync::Arc};

/// Alias for the `Future` returned by a forward lookup.
pub type Forwarding = Pin<Box<dyn Future<Output = Result<Addr, ResolveError>> + Send>>;

/// Alias for the `Future` returned by a reverse lookup.
pub type Reversing = Pin<Box<dyn Future<Output = Result<Name, ResolveError>> + Send>>;

/// An authoritative view of the name hierarchy.
///
/// # Design Notes
///
/// - `&self` methods only: lookups run concurrently without mutable access.
/// - Boxed futures keep the trait object-safe, so resolvers can hold an
///   `Arc<dyn Authority>`.
pub trait Authority: Send + Sync {
    /// The root server addresses. Non-empty and stable for the process
    /// lifetime; every root answers top-level labels identically.
    fn root_servers(&self) -> Vec<Addr>;

    /// Resolves one label at the given server, yielding the child address.
    ///
    /// Fails with [`ResolveError::NotFound`] if the server is unknown or
    /// has no child matching `label`.
    fn forward(&self, server: Addr, label: &str) -> Forwarding;

    /// Maps an address back to the full name of the node owning it.
    ///
    /// Fails with [`ResolveError::NotFound`] if the address is unknown.
    fn reverse(&self, server: Addr) -> Reversing;
}

/// Blanket implementation for Arc-wrapped authorities.
impl<A: Authority + ?Sized> Authority for Arc<A> {
    fn root_servers(&self) -> Vec<Addr> {
        (**self).root_servers()
    }

    fn forward(&self, server: Addr, label: &str) -> Forwarding {
        (**self).forward(server, label)
    }

    fn reverse(&self, server: Addr) -> Reversing {
        (**self).reverse(server)
    }
}
