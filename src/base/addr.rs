//! Fixed-width address type and codec.
//!
//! Addresses are 32-bit values rendered as four dot-separated byte values.
//! Construction from bytes or from a dotted string is exact: any length or
//! range violation is rejected.

use crate::base::error::AddrParseError;
use std::fmt;
use std::str::FromStr;

/// A fixed-width address in the resolution hierarchy.
///
/// Equality is bitwise. The canonical textual form is the dotted quad
/// produced by [`Display`](fmt::Display), e.g. `10.0.3.7`.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Addr(u32);

impl Addr {
    /// Builds an address from its four octets, most significant first.
    #[inline]
    pub const fn from_octets(octets: [u8; 4]) -> Self {
        Self(u32::from_be_bytes(octets))
    }

    /// Builds an address from a byte slice.
    ///
    /// Fails unless the slice is exactly 4 bytes long.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, AddrParseError> {
        match <[u8; 4]>::try_from(bytes) {
            Ok(octets) => Ok(Self::from_octets(octets)),
            Err(_) => Err(AddrParseError::WrongByteCount(bytes.len())),
        }
    }

    /// The four octets of the address, most significant first.
    #[inline]
    pub const fn octets(self) -> [u8; 4] {
        self.0.to_be_bytes()
    }

    /// The raw 32-bit value.
    #[inline]
    pub const fn to_bits(self) -> u32 {
        self.0
    }
}

impl FromStr for Addr {
    type Err = AddrParseError;

    /// Parses a dotted quad. Exactly four numeric components, each in
    /// 0–255; anything else is rejected.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let components: Vec<&str> = s.split('.').collect();
        if components.len() != 4 {
            return Err(AddrParseError::WrongComponentCount(components.len()));
        }

        let mut octets = [0u8; 4];
        for (slot, component) in octets.iter_mut().zip(&components) {
            if component.is_empty() || !component.bytes().all(|b| b.is_ascii_digit()) {
                return Err(AddrParseError::InvalidComponent(component.to_string()));
            }
            *slot = component
                .parse::<u8>()
                .map_err(|_| AddrParseError::InvalidComponent(component.to_string()))?;
        }
        Ok(Self::from_octets(octets))
    }
}

impl fmt::Display for Addr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [a, b, c, d] = self.octets();
        write!(f, "{a}.{b}.{c}.{d}")
    }
}

impl fmt::Debug for Addr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

impl From<[u8; 4]> for Addr {
    fn from(octets: [u8; 4]) -> Self {
        Self::from_octets(octets)
    }
}
