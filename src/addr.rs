//! Address and prefix text conversions.
//!
//! # Responsibilities
//! - Convert dotted-quad text to the 32-bit key form and back
//! - Parse and display CIDR prefixes (`10.0.0.0/8`)
//!
//! # Design Decisions
//! - Keys are plain `u32`, most significant octet first
//! - A bare address parses as a `/32` prefix
//! - Host bits below the prefix length are kept as written; the trie ignores them

use std::fmt;
use std::net::Ipv4Addr;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Widest prefix a 32-bit key supports.
pub const MAX_PREFIX_LEN: u8 = 32;

/// Errors produced while parsing address text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AddrError {
    /// Not a dotted-quad IPv4 address.
    #[error("invalid address: {0}")]
    InvalidAddress(String),

    /// Prefix text is not of the form `address/len`.
    #[error("invalid prefix: {0}")]
    InvalidPrefix(String),

    /// Prefix length is not a number in `0..=32`.
    #[error("invalid prefix length: {0}")]
    InvalidPrefixLength(String),
}

/// Parse a dotted-quad address into its integer key.
pub fn parse_ipv4(s: &str) -> Result<u32, AddrError> {
    s.trim()
        .parse::<Ipv4Addr>()
        .map(u32::from)
        .map_err(|_| AddrError::InvalidAddress(s.to_string()))
}

/// Format an integer key as a dotted-quad address.
pub fn format_ipv4(address: u32) -> String {
    Ipv4Addr::from(address).to_string()
}

/// Network mask for a prefix length (`/0` is the empty mask).
pub fn mask(len: u8) -> u32 {
    match len {
        0 => 0,
        len if len >= MAX_PREFIX_LEN => u32::MAX,
        len => u32::MAX << (MAX_PREFIX_LEN - len),
    }
}

/// An address block: base address plus prefix length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Prefix {
    pub address: u32,
    pub len: u8,
}

impl Prefix {
    /// Create a prefix. Lengths above 32 are rejected.
    pub fn new(address: u32, len: u8) -> Result<Self, AddrError> {
        if len > MAX_PREFIX_LEN {
            return Err(AddrError::InvalidPrefixLength(len.to_string()));
        }
        Ok(Self { address, len })
    }

    /// The base address with host bits cleared.
    pub fn network(&self) -> u32 {
        self.address & mask(self.len)
    }

    /// True if bits below the prefix length are set in the base address.
    pub fn has_host_bits(&self) -> bool {
        self.address != self.network()
    }

    /// True if `address` lies inside this block.
    pub fn contains(&self, address: u32) -> bool {
        address & mask(self.len) == self.network()
    }
}

impl fmt::Display for Prefix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", Ipv4Addr::from(self.address), self.len)
    }
}

impl FromStr for Prefix {
    type Err = AddrError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let (addr, len) = match s.split_once('/') {
            Some((addr, len)) => (addr, Some(len)),
            None => (s, None),
        };

        let address = parse_ipv4(addr).map_err(|_| AddrError::InvalidPrefix(s.to_string()))?;
        let len = match len {
            Some(len) => len
                .parse::<u8>()
                .ok()
                .filter(|len| *len <= MAX_PREFIX_LEN)
                .ok_or_else(|| AddrError::InvalidPrefixLength(s.to_string()))?,
            None => MAX_PREFIX_LEN,
        };

        Ok(Self { address, len })
    }
}

impl TryFrom<String> for Prefix {
    type Error = AddrError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<Prefix> for String {
    fn from(prefix: Prefix) -> Self {
        prefix.to_string()
    }
}
