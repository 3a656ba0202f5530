//! Base types and error handling.
//!
//! Provides the foundational vocabulary of the crate:
//! - [`Addr`]: the fixed-width address type and its codec
//! - [`Name`]: hierarchical names and their suffix/cache-key forms
//! - [`ResolveError`] / [`AddrParseError`]: the error taxonomy

pub mod addr;
pub mod error;
pub mod name;

pub use addr::Addr;
pub use error::{AddrParseError, ResolveError};
pub use name::Name;
