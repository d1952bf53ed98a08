//! Longest-prefix route matcher.
//!
//! # Responsibilities
//! - Register routes during the load phase
//! - Freeze the trie into its lookup-optimized form on finalize
//! - Answer lookups through the cache, falling back to a trie walk
//!
//! # Design Decisions
//! - `lookup` takes `&self`; the matcher is `Sync` and can be shared across threads
//! - `add_route` takes `&mut self`, so mutation cannot overlap shared lookups
//! - Every insertion clears the cache and drops the frozen trie
//! - "No match" is `None`; the `-1` sentinel only exists in `lookup_code`

use crate::addr::Prefix;
use crate::config::{CacheConfig, RouterConfig};
use crate::observability::metrics;
use crate::routing::cache::{CacheStats, LookupCache};
use crate::routing::flat::FlatTrie;
use crate::routing::trie::PrefixTrie;
use crate::routing::types::{to_code, Route, RouteError, RouteMatch, Target};

/// Route table answering longest-prefix-match lookups over IPv4 keys.
#[derive(Debug, Default)]
pub struct LongestPrefixMatcher {
    trie: PrefixTrie,
    frozen: Option<FlatTrie>,
    cache: LookupCache,
}

impl LongestPrefixMatcher {
    /// Create an empty matcher with the default cache.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_cache(config: &CacheConfig) -> Self {
        Self {
            trie: PrefixTrie::new(),
            frozen: None,
            cache: LookupCache::from_config(config),
        }
    }

    /// Build a matcher from a sequence of routes.
    pub fn from_routes<I>(routes: I) -> Result<Self, RouteError>
    where
        I: IntoIterator<Item = Route>,
    {
        let mut matcher = Self::new();
        for route in routes {
            matcher.add(route)?;
        }
        Ok(matcher)
    }

    /// Build and finalize a matcher from a loaded configuration.
    pub fn from_config(config: &RouterConfig) -> Result<Self, RouteError> {
        let mut matcher = Self::with_cache(&config.cache);
        for route in &config.routes {
            matcher.add_route(route.prefix.address, route.prefix.len, route.target)?;
        }
        matcher.finalize_routes();
        Ok(matcher)
    }

    /// Register a route. Rejects prefix lengths above 32 without inserting anything.
    pub fn add_route(
        &mut self,
        address: u32,
        prefix_len: u8,
        target: impl Into<Target>,
    ) -> Result<(), RouteError> {
        let target = target.into();
        let previous = self.trie.insert(address, prefix_len, target)?;

        if let Some(previous) = previous.filter(|p| *p != target) {
            let prefix = Prefix { address, len: prefix_len };
            tracing::debug!(
                %prefix,
                %previous,
                %target,
                "Route target replaced"
            );
        }

        // Results cached before this insertion may now be wrong.
        self.cache.clear();
        if self.frozen.take().is_some() {
            tracing::debug!("Route added after finalize; lookups fall back to the trie");
        }
        metrics::record_route_added();
        Ok(())
    }

    pub fn add(&mut self, route: Route) -> Result<(), RouteError> {
        self.add_route(route.address, route.prefix_len, route.target)
    }

    /// Signal the end of the load phase. Safe to skip or to call repeatedly.
    pub fn finalize_routes(&mut self) {
        if self.frozen.is_some() {
            return;
        }
        let frozen = FlatTrie::from(&self.trie);
        tracing::info!(
            routes = self.trie.len(),
            nodes = frozen.node_count(),
            "Route table finalized"
        );
        metrics::record_trie_nodes(frozen.node_count());
        self.frozen = Some(frozen);
    }

    /// Forwarding target of the most specific route containing `address`.
    pub fn lookup(&self, address: u32) -> Option<Target> {
        self.cache.get_or_compute(address, || self.walk(address))
    }

    /// Lookup in integer form: the target id, or `-1` if nothing matches.
    pub fn lookup_code(&self, address: u32) -> i64 {
        to_code(self.lookup(address))
    }

    /// The winning route and its prefix. Bypasses the cache.
    pub fn longest_match(&self, address: u32) -> Option<RouteMatch> {
        match &self.frozen {
            Some(frozen) => frozen.longest_match(address),
            None => self.trie.longest_match(address),
        }
    }

    /// All registered routes, shorter prefixes first within each block.
    pub fn routes(&self) -> Vec<(Prefix, Target)> {
        self.trie.routes()
    }

    pub fn route_count(&self) -> usize {
        self.trie.len()
    }

    pub fn is_finalized(&self) -> bool {
        self.frozen.is_some()
    }

    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }

    fn walk(&self, address: u32) -> Option<Target> {
        match &self.frozen {
            Some(frozen) => frozen.lookup(address),
            None => self.trie.lookup(address),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::addr::parse_ipv4;

    fn ip(s: &str) -> u32 {
        parse_ipv4(s).unwrap()
    }

    fn example_matcher() -> LongestPrefixMatcher {
        let mut m = LongestPrefixMatcher::new();
        m.add_route(ip("10.0.0.0"), 8, 1u32).unwrap();
        m.add_route(ip("10.1.0.0"), 16, 2u32).unwrap();
        m.add_route(ip("0.0.0.0"), 0, 9u32).unwrap();
        m
    }

    #[test]
    fn test_lookup_example() {
        let mut m = example_matcher();
        m.finalize_routes();

        assert_eq!(m.lookup(ip("10.1.2.3")), Some(Target(2)));
        assert_eq!(m.lookup(ip("10.2.2.3")), Some(Target(1)));
        assert_eq!(m.lookup(ip("192.168.1.1")), Some(Target(9)));

        m.add_route(ip("10.1.2.0"), 24, 3u32).unwrap();
        assert_eq!(m.lookup(ip("10.1.2.3")), Some(Target(3)));
        assert_eq!(m.lookup(ip("10.1.9.9")), Some(Target(2)));
    }

    #[test]
    fn test_lookup_without_finalize() {
        let m = example_matcher();
        assert!(!m.is_finalized());
        assert_eq!(m.lookup(ip("10.2.2.3")), Some(Target(1)));
    }

    #[test]
    fn test_no_match_code() {
        let mut m = LongestPrefixMatcher::new();
        m.add_route(ip("10.0.0.0"), 8, 0u32).unwrap();
        assert_eq!(m.lookup_code(ip("10.0.0.1")), 0);
        assert_eq!(m.lookup_code(ip("11.0.0.1")), -1);
        assert_eq!(m.lookup(ip("11.0.0.1")), None);
    }

    #[test]
    fn test_invalid_prefix_rejected() {
        let mut m = LongestPrefixMatcher::new();
        assert_eq!(
            m.add_route(0, 33, 1u32),
            Err(RouteError::InvalidPrefixLength(33))
        );
        assert_eq!(m.route_count(), 0);
        assert_eq!(m.lookup(0), None);
    }

    #[test]
    fn test_insert_after_lookup_clears_cache() {
        let mut m = LongestPrefixMatcher::new();
        m.add_route(ip("10.0.0.0"), 8, 1u32).unwrap();
        assert_eq!(m.lookup(ip("10.1.2.3")), Some(Target(1)));
        assert_eq!(m.cache_stats().entries, 1);

        m.add_route(ip("10.1.0.0"), 16, 2u32).unwrap();
        assert_eq!(m.cache_stats().entries, 0);
        assert_eq!(m.lookup(ip("10.1.2.3")), Some(Target(2)));
    }

    #[test]
    fn test_add_after_finalize_unfreezes() {
        let mut m = example_matcher();
        m.finalize_routes();
        assert!(m.is_finalized());

        m.add_route(ip("192.168.0.0"), 16, 4u32).unwrap();
        assert!(!m.is_finalized());
        assert_eq!(m.lookup(ip("192.168.1.1")), Some(Target(4)));

        m.finalize_routes();
        assert_eq!(m.lookup(ip("192.168.1.1")), Some(Target(4)));
    }

    #[test]
    fn test_longest_match_explains_result() {
        let mut m = example_matcher();
        m.finalize_routes();
        let hit = m.longest_match(ip("10.1.2.3")).unwrap();
        assert_eq!(hit.prefix.to_string(), "10.1.0.0/16");
        assert_eq!(hit.target, Target(2));
    }

    #[test]
    fn test_from_routes() {
        let routes = vec![
            Route::new(ip("10.0.0.0"), 8, 1u32).unwrap(),
            Route::new(ip("10.0.0.0"), 8, 5u32).unwrap(),
        ];
        let m = LongestPrefixMatcher::from_routes(routes).unwrap();
        assert_eq!(m.route_count(), 1);
        assert_eq!(m.lookup(ip("10.3.3.3")), Some(Target(5)));
    }
}
