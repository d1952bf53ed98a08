//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! route file (TOML or plain route list)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → RouterConfig (validated, immutable)
//!     → LongestPrefixMatcher::from_config
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; routes are not reloaded at runtime
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{accept_config, load_config, read_config, ConfigError};
pub use schema::CacheConfig;
pub use schema::ObservabilityConfig;
pub use schema::RouteConfig;
pub use schema::RouterConfig;
