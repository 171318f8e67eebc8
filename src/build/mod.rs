//! The static builder: turns a key set into an immutable
//! [`Snapshot`] via 3-hypergraph peeling, with seed retry and table growth
//! on failure.

mod peel;

use std::collections::HashSet;

use log::{info, warn};

use crate::config::Config;
use crate::consts::{GROWTH_FACTOR, MAX_GROWTH_ROUNDS, SEEDS_PER_ROUND};
use crate::error::{Error, Result};
use crate::hash::{fingerprint, indices};
use crate::metrics::Metrics;
use crate::snapshot::Snapshot;

/// Build a [`Snapshot`] from `keys` under `cfg`. `n == 0` returns the empty
/// snapshot directly with no peeling work.
pub(crate) fn build(keys: &HashSet<Vec<u8>>, cfg: &Config, metrics: &Metrics) -> Result<Snapshot> {
    let n = keys.len();
    let bits = cfg.fingerprint_bits;
    metrics.record_build_started();

    if n == 0 {
        metrics.record_build_finished(0);
        return Ok(Snapshot::empty(0, bits));
    }

    let keys_vec: Vec<&Vec<u8>> = keys.iter().collect();
    let mut m = std::cmp::max(1, (n as f64 * cfg.load_factor).ceil() as u64);

    info!("xor-filter build starting: n={} initial_m={} bits={}", n, m, bits);

    let mut rounds_used = 0u32;
    for round in 0..MAX_GROWTH_ROUNDS {
        rounds_used = round + 1;
        for attempt in 0..SEEDS_PER_ROUND {
            let seed: u64 = rand::random();
            let edges: Vec<(u64, u64, u64)> = keys_vec
                .iter()
                .map(|k| indices(k.as_slice(), seed, m))
                .collect();

            if let Some(peel_log) = peel::try_peel(&edges, m) {
                let table = assign(&keys_vec, &edges, seed, m, bits, cfg.fingerprint_mask(), &peel_log);
                info!(
                    "xor-filter build finished: n={} m={} seed={} rounds={} retries_in_final_round={}",
                    n, m, seed, rounds_used, attempt
                );
                metrics.record_build_finished(rounds_used);
                return Ok(Snapshot {
                    seed,
                    bits,
                    mask: cfg.fingerprint_mask(),
                    m,
                    table,
                    keys: keys.clone(),
                });
            }
            metrics.record_build_retry();
        }

        let grown = ((m as f64) * GROWTH_FACTOR).ceil() as u64;
        warn!("xor-filter peeling failed {} seeds at m={}, growing to m={}", SEEDS_PER_ROUND, m, grown);
        m = grown;
    }

    Err(Error::BuildFailure { rounds: rounds_used })
}

/// Reverse-pass assignment: walk the peel log back to
/// front, each step fully determined by the two already-assigned sibling
/// slots of the peeled edge.
fn assign(
    keys_vec: &[&Vec<u8>],
    edges: &[(u64, u64, u64)],
    seed: u64,
    m: u64,
    bits: u8,
    mask: u32,
    peel_log: &[(u32, u64)],
) -> Vec<u16> {
    let _ = bits;
    let mut table = vec![0u16; m as usize];

    for &(e, v) in peel_log.iter().rev() {
        let (a, b, c) = edges[e as usize];
        let mut others = Vec::with_capacity(2);
        let mut skipped_v = false;
        for endpoint in [a, b, c] {
            if !skipped_v && endpoint == v {
                skipped_v = true;
                continue;
            }
            others.push(endpoint);
        }
        // `others` always has exactly two entries: each edge has three
        // endpoints and we skip exactly one occurrence of `v`.
        let u1 = others[0] as usize;
        let u2 = others[1] as usize;

        let fp = fingerprint(keys_vec[e as usize].as_slice(), seed) & mask;
        let value = fp ^ (table[u1] as u32) ^ (table[u2] as u32);
        table[v as usize] = value as u16;
    }

    table
}
