//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Detect routes whose base address has host bits set
//! - Detect the same prefix declared with different targets
//! - Validate value ranges (cache capacity > 0)
//!
//! # Design Decisions
//! - Returns all findings, not just the first
//! - Validation is a pure function: RouterConfig → Result<warnings, errors>
//! - Sloppy route tables are warnings unless `strict` is set; last duplicate wins

use std::collections::HashMap;

use thiserror::Error;

use crate::addr::Prefix;
use crate::config::schema::RouterConfig;
use crate::routing::types::Target;

/// A semantic problem found in a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("route {prefix} has bits set below its prefix length")]
    HostBitsSet { prefix: Prefix },

    #[error("route {prefix} declared with targets {first} and {second}")]
    ConflictingDuplicate {
        prefix: Prefix,
        first: Target,
        second: Target,
    },

    #[error("cache.max_entries must be greater than zero")]
    ZeroCacheCapacity,
}

impl ValidationError {
    /// Whether this finding rejects the configuration.
    pub fn is_fatal(&self, strict: bool) -> bool {
        match self {
            ValidationError::ZeroCacheCapacity => true,
            ValidationError::HostBitsSet { .. } | ValidationError::ConflictingDuplicate { .. } => {
                strict
            }
        }
    }
}

/// Validate a configuration.
///
/// Returns the non-fatal findings on success, or every fatal one on failure.
pub fn validate_config(config: &RouterConfig) -> Result<Vec<ValidationError>, Vec<ValidationError>> {
    let mut findings = Vec::new();

    if config.cache.max_entries == Some(0) {
        findings.push(ValidationError::ZeroCacheCapacity);
    }

    let mut seen: HashMap<(u32, u8), Target> = HashMap::new();
    for route in &config.routes {
        let prefix = route.prefix;
        if prefix.has_host_bits() {
            findings.push(ValidationError::HostBitsSet { prefix });
        }

        let key = (prefix.network(), prefix.len);
        if let Some(first) = seen.insert(key, route.target) {
            if first != route.target {
                findings.push(ValidationError::ConflictingDuplicate {
                    prefix: Prefix {
                        address: prefix.network(),
                        len: prefix.len,
                    },
                    first,
                    second: route.target,
                });
            }
        }
    }

    let (fatal, warnings): (Vec<_>, Vec<_>) = findings
        .into_iter()
        .partition(|finding| finding.is_fatal(config.strict));

    if fatal.is_empty() {
        Ok(warnings)
    } else {
        Err(fatal)
    }
}
