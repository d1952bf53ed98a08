//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Load phase:
//!     Route (address, prefix_len, target)
//!     → matcher.rs (validate, clear cache)
//!     → trie.rs (one node per prefix bit, target on the last node)
//!
//! finalize_routes():
//!     trie.rs → flat.rs (pre-order node table, index children)
//!
//! Query phase:
//!     address
//!     → cache.rs (exact-address hit?)
//!     → flat.rs / trie.rs (walk MSB first, keep deepest target)
//!     → Some(Target) or None
//! ```
//!
//! # Design Decisions
//! - Most specific prefix wins; shorter prefixes are shadowed, never removed
//! - Lookups are bounded by 32 steps
//! - Deterministic: same route set always yields the same answer

pub mod cache;
pub mod flat;
pub mod matcher;
pub mod trie;
pub mod types;

pub use cache::{CacheStats, LookupCache};
pub use flat::FlatTrie;
pub use matcher::LongestPrefixMatcher;
pub use trie::PrefixTrie;
pub use types::{to_code, Route, RouteError, RouteMatch, Target, NO_MATCH};
