//! Configuration loading from disk.
//!
//! Two formats are accepted, chosen by file extension:
//! - `*.toml`: a full [`RouterConfig`]
//! - anything else: a plain route list, one `<cidr> <target>` per line

use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::addr::Prefix;
use crate::config::schema::{RouteConfig, RouterConfig};
use crate::config::validation::{validate_config, ValidationError};

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Parse error on line {line}: {message}")]
    Line { line: usize, message: String },

    #[error("Validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Load and validate a route table from disk.
pub fn load_config(path: &Path) -> Result<RouterConfig, ConfigError> {
    let config = read_config(path)?;
    accept_config(&config, path)?;
    Ok(config)
}

/// Read and deserialize a route table without semantic checks.
pub fn read_config(path: &Path) -> Result<RouterConfig, ConfigError> {
    let content = fs::read_to_string(path)?;

    let config = match path.extension().and_then(|e| e.to_str()) {
        Some("toml") => toml::from_str(&content)?,
        _ => RouterConfig {
            routes: parse_route_list(&content)?,
            ..Default::default()
        },
    };
    Ok(config)
}

/// Validate a config read from `path`, logging non-fatal findings.
pub fn accept_config(config: &RouterConfig, path: &Path) -> Result<(), ConfigError> {
    let warnings = validate_config(config).map_err(ConfigError::Validation)?;
    for warning in &warnings {
        tracing::warn!(path = %path.display(), "{}", warning);
    }

    tracing::info!(
        path = %path.display(),
        routes = config.routes.len(),
        "Route table loaded"
    );
    Ok(())
}

/// Parse a plain-text route list.
///
/// Blank lines and `#` comments are skipped.
pub fn parse_route_list(content: &str) -> Result<Vec<RouteConfig>, ConfigError> {
    let mut routes = Vec::new();

    for (index, raw) in content.lines().enumerate() {
        let line_err = |message: String| ConfigError::Line {
            line: index + 1,
            message,
        };

        let line = raw.split('#').next().unwrap_or_default().trim();
        if line.is_empty() {
            continue;
        }

        let mut fields = line.split_whitespace();
        let (Some(prefix), Some(target), None) = (fields.next(), fields.next(), fields.next())
        else {
            return Err(line_err(format!("expected `<prefix> <target>`, got `{}`", line)));
        };

        let prefix: Prefix = prefix.parse().map_err(|e| line_err(format!("{}", e)))?;
        let target: u32 = target
            .parse()
            .map_err(|_| line_err(format!("invalid target `{}`", target)))?;

        routes.push(RouteConfig::new(prefix, target));
    }

    Ok(routes)
}
