//! Concurrent lookups against a shared, finalized matcher.

use std::sync::Arc;
use std::thread;
use std::time::Instant;

use lpm_router::LongestPrefixMatcher;

mod common;

#[test]
fn test_concurrent_lookups_agree_with_reference() {
    let mut rng = common::rng(7);
    let routes = common::random_routes(&mut rng, 500);
    let addresses = Arc::new(common::random_addresses(&mut rng, &routes, 2_000));
    let expected: Vec<_> = addresses
        .iter()
        .map(|&a| common::reference_lookup(&routes, a))
        .collect();

    let mut matcher = LongestPrefixMatcher::from_routes(routes).unwrap();
    matcher.finalize_routes();
    let matcher = Arc::new(matcher);

    let threads = 8;
    let start = Instant::now();
    let handles: Vec<_> = (0..threads)
        .map(|_| {
            let matcher = Arc::clone(&matcher);
            let addresses = Arc::clone(&addresses);
            // Every thread walks the same addresses so misses race on the same keys.
            thread::spawn(move || {
                addresses
                    .iter()
                    .map(|&a| matcher.lookup(a))
                    .collect::<Vec<_>>()
            })
        })
        .collect();

    for handle in handles {
        let results = handle.join().unwrap();
        assert_eq!(results, expected);
    }

    let stats = matcher.cache_stats();
    let total = (threads * addresses.len()) as u64;
    assert_eq!(stats.hits + stats.misses, total);

    let mut distinct = addresses.to_vec();
    distinct.sort_unstable();
    distinct.dedup();
    assert_eq!(stats.entries, distinct.len());

    println!(
        "{} lookups on {} threads in {:?} ({} misses)",
        total,
        threads,
        start.elapsed(),
        stats.misses
    );
}

#[test]
fn test_scoped_threads_share_matcher_by_reference() {
    let mut rng = common::rng(99);
    let routes = common::random_routes(&mut rng, 100);
    let addresses = common::random_addresses(&mut rng, &routes, 500);

    let mut matcher = LongestPrefixMatcher::from_routes(routes.iter().copied()).unwrap();
    matcher.finalize_routes();

    thread::scope(|s| {
        for chunk in addresses.chunks(100) {
            let matcher = &matcher;
            let routes = &routes;
            s.spawn(move || {
                for &a in chunk {
                    assert_eq!(matcher.lookup(a), common::reference_lookup(routes, a));
                }
            });
        }
    });
}
