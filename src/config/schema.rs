//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the router.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

use crate::addr::Prefix;
use crate::routing::types::Target;

/// Root configuration for the route table.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct RouterConfig {
    /// Reject sloppy route tables (host bits set, conflicting duplicates)
    /// instead of warning about them.
    pub strict: bool,

    /// Route definitions mapping address blocks to forwarding targets.
    pub routes: Vec<RouteConfig>,

    /// Lookup cache settings.
    pub cache: CacheConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// A single route entry.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct RouteConfig {
    /// Address block in CIDR form (e.g., "10.0.0.0/8").
    pub prefix: Prefix,

    /// Forwarding target id (egress port / next hop).
    pub target: Target,

    /// Optional label for logging.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl RouteConfig {
    pub fn new(prefix: Prefix, target: impl Into<Target>) -> Self {
        Self {
            prefix,
            target: target.into(),
            name: None,
        }
    }
}

/// Lookup cache configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Enable the per-address result cache.
    pub enabled: bool,

    /// Stop storing new results once this many addresses are cached.
    /// Unbounded when absent.
    pub max_entries: Option<usize>,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            max_entries: None,
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Install the Prometheus recorder.
    pub metrics_enabled: bool,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_enabled: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = RouterConfig::default();
        assert!(!config.strict);
        assert!(config.routes.is_empty());
        assert!(config.cache.enabled);
        assert_eq!(config.cache.max_entries, None);
        assert_eq!(config.observability.log_level, "info");
    }

    #[test]
    fn test_deserialize_minimal() {
        let config: RouterConfig = toml::from_str(
            r#"
            [[routes]]
            prefix = "10.0.0.0/8"
            target = 1
            "#,
        )
        .unwrap();
        assert_eq!(config.routes.len(), 1);
        assert_eq!(config.routes[0].prefix.to_string(), "10.0.0.0/8");
        assert_eq!(config.routes[0].target, Target(1));
        assert!(config.cache.enabled);
    }

    #[test]
    fn test_deserialize_rejects_bad_prefix() {
        let result: Result<RouterConfig, _> = toml::from_str(
            r#"
            [[routes]]
            prefix = "10.0.0.0/40"
            target = 1
            "#,
        );
        assert!(result.is_err());
    }
}
