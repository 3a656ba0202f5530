use thiserror::Error;

/// Errors surfaced by [`resolve`](crate::resolver::Resolver::resolve).
#[derive(Debug, Error, PartialEq, Eq, Clone, Copy)]
pub enum ResolveError {
    /// The authoritative side does not know the queried server, label, or
    /// address. Fatal when raised by the mandatory forward lookup for the
    /// label currently being resolved.
    #[error("name not found")]
    NotFound,
    /// A spawned lookup task was lost before producing a result.
    #[error("lookup task failed")]
    TaskFailed,
}

/// Errors from constructing an [`Addr`](crate::base::Addr) out of bytes or
/// a dotted string.
#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum AddrParseError {
    #[error("expected 4 bytes, got {0}")]
    WrongByteCount(usize),
    #[error("expected 4 dotted components, got {0}")]
    WrongComponentCount(usize),
    #[error("invalid address component `{0}`")]
    InvalidComponent(String),
}
