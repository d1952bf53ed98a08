//! lpm-router: longest-prefix-match route lookups.
//!
//! # Architecture Overview
//!
//! ```text
//!     route file ──▶ config::loader ──▶ config::validation
//!                                              │
//!                                              ▼
//!                               routing::LongestPrefixMatcher
//!                               ┌──────────────────────────┐
//!     address ────────────────▶ │ cache ─miss─▶ trie walk  │ ───▶ target / -1
//!                               └──────────────────────────┘
//! ```
//!
//! Results go to stdout, logs and metrics to stderr.

use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use serde::Serialize;

use lpm_router::addr::{format_ipv4, parse_ipv4, Prefix};
use lpm_router::config::{accept_config, read_config, RouterConfig};
use lpm_router::observability::{logging, metrics};
use lpm_router::routing::{to_code, LongestPrefixMatcher, Target};

#[derive(Parser)]
#[command(name = "lpm-router")]
#[command(about = "Longest-prefix-match route lookups over IPv4 route tables", long_about = None)]
struct Cli {
    /// Route table: TOML, or one `<cidr> <target>` per line.
    #[arg(short, long)]
    routes: Option<PathBuf>,

    /// Log level override (trace, debug, info, warn, error).
    #[arg(long)]
    log_level: Option<String>,

    /// Disable the lookup cache.
    #[arg(long)]
    no_cache: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Look up one or more addresses
    Lookup {
        #[arg(required = true)]
        addresses: Vec<String>,

        /// Print one JSON object per address
        #[arg(long)]
        json: bool,
    },
    /// Look up addresses read one per line from a file (`-` for stdin)
    Batch {
        input: String,

        /// Print cache statistics to stderr when done
        #[arg(long)]
        stats: bool,

        /// Print Prometheus metrics to stderr when done
        #[arg(long)]
        metrics: bool,
    },
    /// Print the loaded route table
    Routes,
}

#[derive(Serialize)]
struct LookupOutput {
    address: String,
    target: Option<Target>,
    prefix: Option<Prefix>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = match &cli.routes {
        Some(path) => read_config(path)?,
        None => RouterConfig::default(),
    };
    if let Some(level) = &cli.log_level {
        config.observability.log_level = level.clone();
    }
    if cli.no_cache {
        config.cache.enabled = false;
    }

    logging::init_logging(&config.observability);
    tracing::debug!("lpm-router v{} starting", env!("CARGO_PKG_VERSION"));

    match &cli.routes {
        Some(path) => accept_config(&config, path)?,
        None => tracing::warn!("No route table given; every lookup will miss"),
    }

    let wants_metrics = matches!(cli.command, Commands::Batch { metrics: true, .. });
    let metrics_handle = if wants_metrics || config.observability.metrics_enabled {
        Some(metrics::init_metrics()?)
    } else {
        None
    };

    let matcher = LongestPrefixMatcher::from_config(&config)?;

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());

    match cli.command {
        Commands::Lookup { addresses, json } => {
            for text in &addresses {
                let address = parse_ipv4(text)?;
                let hit = matcher.longest_match(address);
                if json {
                    let output = LookupOutput {
                        address: format_ipv4(address),
                        target: hit.map(|m| m.target),
                        prefix: hit.map(|m| m.prefix),
                    };
                    writeln!(out, "{}", serde_json::to_string(&output)?)?;
                } else {
                    match hit {
                        Some(m) => writeln!(
                            out,
                            "{} -> {} via {}",
                            format_ipv4(address),
                            m.target,
                            m.prefix
                        )?,
                        None => writeln!(out, "{} -> no match", format_ipv4(address))?,
                    }
                }
            }
        }
        Commands::Batch { input, stats, .. } => {
            let reader: Box<dyn BufRead> = if input == "-" {
                Box::new(BufReader::new(io::stdin()))
            } else {
                Box::new(BufReader::new(File::open(&input)?))
            };

            let mut count = 0u64;
            for (index, line) in reader.lines().enumerate() {
                let line = line?;
                let text = line.trim();
                if text.is_empty() {
                    continue;
                }
                let address = parse_ipv4(text)
                    .map_err(|e| format!("line {}: {}", index + 1, e))?;
                writeln!(out, "{}", to_code(matcher.lookup(address)))?;
                count += 1;
            }
            out.flush()?;
            tracing::info!(lookups = count, "Batch complete");

            if stats {
                let s = matcher.cache_stats();
                eprintln!(
                    "lookups: {}  cache hits: {}  misses: {}  entries: {}",
                    count, s.hits, s.misses, s.entries
                );
            }
        }
        Commands::Routes => {
            for (prefix, target) in matcher.routes() {
                writeln!(out, "{} {}", prefix, target)?;
            }
        }
    }
    out.flush()?;

    if let Some(handle) = metrics_handle {
        eprint!("{}", handle.render());
    }

    Ok(())
}
