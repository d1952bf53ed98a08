//! Longest-prefix-match route lookup library.

pub mod addr;
pub mod config;
pub mod observability;
pub mod routing;

pub use addr::Prefix;
pub use config::RouterConfig;
pub use routing::{LongestPrefixMatcher, Route, RouteError, Target};
