//! Per-run seed derivation.

use xxhash_rust::xxh3::xxh3_64_with_seed;

use opsim_core::types::SeriesKey;

/// Seed for one (facility, metric, scenario) run.
///
/// A pure function of the global seed and the combination's identity, so a
/// run reproduces regardless of which other runs execute or in what order.
/// Fields are NUL-separated to keep ("ab","c") and ("a","bc") apart.
pub fn derive_run_seed(global_seed: u64, key: &SeriesKey, scenario: &str) -> u64 {
    let mut identity =
        Vec::with_capacity(key.facility.len() + key.metric.len() + scenario.len() + 2);
    identity.extend_from_slice(key.facility.as_bytes());
    identity.push(0);
    identity.extend_from_slice(key.metric.as_bytes());
    identity.push(0);
    identity.extend_from_slice(scenario.as_bytes());
    xxh3_64_with_seed(&identity, global_seed)
}

/// Seed for path `index` of a run.
///
/// Runs with nearby seeds get unrelated path seeds, never shifted copies.
pub fn derive_path_seed(run_seed: u64, index: u64) -> u64 {
    xxh3_64_with_seed(&index.to_le_bytes(), run_seed)
}
