//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! All subsystems produce:
//!     → logging.rs (structured log events via `tracing`)
//!     → metrics.rs (counters, gauges via the `metrics` facade)
//!
//! Consumers:
//!     → stderr log output (EnvFilter controlled)
//!     → Prometheus text rendering (CLI `batch --metrics`)
//! ```
//!
//! # Design Decisions
//! - Structured fields rather than formatted messages
//! - Metrics are cheap (atomic increments) and no-ops without a recorder
//! - Nothing is recorded per trie step, only per lookup

pub mod logging;
pub mod metrics;
