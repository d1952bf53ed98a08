//! Shared utilities for integration and load testing.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use lpm_router::addr::{mask, parse_ipv4};
use lpm_router::{Route, Target};

/// Parse a dotted-quad address, panicking on bad test input.
pub fn ip(s: &str) -> u32 {
    parse_ipv4(s).unwrap()
}

/// Seeded generator so failures reproduce.
pub fn rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

/// Random routes clustered under a few /8s so prefixes overlap often.
pub fn random_routes(rng: &mut StdRng, count: usize) -> Vec<Route> {
    const BASES: [u32; 4] = [0x0A00_0000, 0xAC10_0000, 0xC0A8_0000, 0x0800_0000];

    (0..count)
        .map(|_| {
            let base = BASES[rng.gen_range(0..BASES.len())];
            let address = base | (rng.gen::<u32>() & 0x00FF_FFFF);
            let prefix_len = if rng.gen_bool(0.05) { 0 } else { rng.gen_range(1..=32) };
            Route::new(address, prefix_len, rng.gen_range(0..64u32)).unwrap()
        })
        .collect()
}

/// Random addresses, half of them drawn from inside the given routes.
#[allow(dead_code)]
pub fn random_addresses(rng: &mut StdRng, routes: &[Route], count: usize) -> Vec<u32> {
    (0..count)
        .map(|_| {
            if !routes.is_empty() && rng.gen_bool(0.5) {
                let route = routes[rng.gen_range(0..routes.len())];
                let m = mask(route.prefix_len);
                (route.address & m) | (rng.gen::<u32>() & !m)
            } else {
                rng.gen()
            }
        })
        .collect()
}

/// Brute-force longest-prefix match: scan every route, longest matching length
/// wins, and among identical prefixes the last inserted wins.
pub fn reference_lookup(routes: &[Route], address: u32) -> Option<Target> {
    let mut best: Option<(u8, Target)> = None;
    for route in routes {
        let m = mask(route.prefix_len);
        if address & m != route.address & m {
            continue;
        }
        match best {
            Some((len, _)) if len > route.prefix_len => {}
            _ => best = Some((route.prefix_len, route.target)),
        }
    }
    best.map(|(_, target)| target)
}
