//! Metrics collection and exposition.
//!
//! # Metrics
//! - `lpm_lookups_total` (counter): lookups by cache outcome (`hit`/`miss`)
//! - `lpm_routes_added_total` (counter): accepted route insertions
//! - `lpm_cache_clears_total` (counter): cache invalidations caused by insertion
//! - `lpm_cache_entries` (gauge): cached addresses
//! - `lpm_trie_nodes` (gauge): nodes in the finalized trie

use metrics_exporter_prometheus::{BuildError, PrometheusBuilder, PrometheusHandle};

pub fn record_lookup(cache_hit: bool) {
    let outcome = if cache_hit { "hit" } else { "miss" };
    ::metrics::counter!("lpm_lookups_total", "cache" => outcome).increment(1);
}

pub fn record_route_added() {
    ::metrics::counter!("lpm_routes_added_total").increment(1);
}

pub fn record_cache_clear() {
    ::metrics::counter!("lpm_cache_clears_total").increment(1);
}

pub fn record_cache_size(entries: usize) {
    ::metrics::gauge!("lpm_cache_entries").set(entries as f64);
}

pub fn record_trie_nodes(nodes: usize) {
    ::metrics::gauge!("lpm_trie_nodes").set(nodes as f64);
}

/// Install the Prometheus recorder as the global recorder.
///
/// The returned handle renders the text exposition format on demand; no
/// listener is started.
pub fn init_metrics() -> Result<PrometheusHandle, BuildError> {
    let handle = PrometheusBuilder::new().install_recorder()?;
    tracing::debug!("Prometheus recorder installed");
    Ok(handle)
}
