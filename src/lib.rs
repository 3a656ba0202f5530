//! # hiernet
//!
//! An async hierarchical name resolution library.
//!
//! `hiernet` resolves fully-qualified dotted names (`www.a.b`) into
//! fixed-width addresses by walking a chain of authoritative servers one
//! label at a time, starting from a root. Concurrent resolutions share a
//! revalidating cache and spread their starting points round-robin across
//! the root servers.
//!
//! ## Features
//!
//! - **Concurrent cache**: lock-free shared map of name-to-address results
//!   with TTL-based trust
//! - **Background revalidation**: stale entries are confirmed via reverse
//!   lookups racing a bounded wait window against the authoritative path
//! - **Root load distribution**: an atomic round-robin counter spreads
//!   concurrent callers across every root server
//! - **Pluggable authority**: the name hierarchy lives behind the
//!   [`Authority`](authority::Authority) trait
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use hiernet::authority::MemoryAuthority;
//! use hiernet::resolver::Resolver;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() {
//!     let mut authority = MemoryAuthority::new(vec!["10.0.0.1".parse().unwrap()]);
//!     authority.insert("b", "10.0.1.1".parse().unwrap()).unwrap();
//!     authority.insert("a.b", "10.0.2.1".parse().unwrap()).unwrap();
//!
//!     let resolver = Resolver::new(Arc::new(authority));
//!     let addr = resolver.resolve("a.b").await.unwrap();
//!     println!("a.b -> {addr}");
//! }
//! ```
//!
//! ## Modules
//!
//! - [`base`] - Address codec, name handling, and error definitions
//! - [`authority`] - The authoritative-server boundary and in-memory oracle
//! - [`cache`] - The shared, TTL-aware resolution cache
//! - [`resolver`] - The concurrent resolution core

pub mod authority;
pub mod base;
pub mod cache;
pub mod resolver;

pub use authority::Authority;
pub use base::{Addr, AddrParseError, Name, ResolveError};
pub use cache::ResolutionCache;
pub use resolver::Resolver;
