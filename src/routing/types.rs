//! Route types and error definitions.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::addr::{Prefix, MAX_PREFIX_LEN};

/// Forwarding target (egress port / next-hop id) for strong typing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Target(pub u32);

impl From<u32> for Target {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl From<Target> for u32 {
    fn from(target: Target) -> Self {
        target.0
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Reserved lookup code for "no route matches".
pub const NO_MATCH: i64 = -1;

/// Convert a lookup result to its integer code form.
pub fn to_code(result: Option<Target>) -> i64 {
    result.map(|t| i64::from(t.0)).unwrap_or(NO_MATCH)
}

/// Errors that can occur while building a route table.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouteError {
    /// Prefix length outside `0..=32`.
    #[error("prefix length {0} out of range 0..=32")]
    InvalidPrefixLength(u8),
}

/// A single route: address block and where it forwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Route {
    pub address: u32,
    pub prefix_len: u8,
    pub target: Target,
}

impl Route {
    pub fn new(address: u32, prefix_len: u8, target: impl Into<Target>) -> Result<Self, RouteError> {
        check_prefix_len(prefix_len)?;
        Ok(Self {
            address,
            prefix_len,
            target: target.into(),
        })
    }

    pub fn prefix(&self) -> Prefix {
        Prefix {
            address: self.address,
            len: self.prefix_len,
        }
    }
}

impl From<(Prefix, Target)> for Route {
    fn from((prefix, target): (Prefix, Target)) -> Self {
        Self {
            address: prefix.address,
            prefix_len: prefix.len,
            target,
        }
    }
}

/// The route that won a lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RouteMatch {
    pub prefix: Prefix,
    pub target: Target,
}

pub(crate) fn check_prefix_len(prefix_len: u8) -> Result<(), RouteError> {
    if prefix_len > MAX_PREFIX_LEN {
        return Err(RouteError::InvalidPrefixLength(prefix_len));
    }
    Ok(())
}

/// Bit of `address` consumed at trie depth `depth` (0 = most significant).
#[inline]
pub(crate) fn bit_at(address: u32, depth: u8) -> usize {
    ((address >> (31 - u32::from(depth))) & 1) as usize
}
