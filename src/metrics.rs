//! Lightweight in-process counters for filter lifecycle events.
//!
//! Instance-scoped rather than global statics: each `Filter` owns its own
//! `Metrics`, since a process may reasonably hold more than one independent
//! filter and conflating their counts would be misleading.

use std::sync::atomic::{AtomicU64, Ordering};

/// Read-only snapshot of a filter's cumulative counters, returned by
/// [`crate::Filter::metrics`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MetricsSnapshot {
    /// Number of static builds performed (initial build + every rebuild).
    pub builds_total: u64,
    /// Number of rebuilds triggered by the overlay's rebuild policy or by
    /// an explicit `compact()`.
    pub rebuilds_total: u64,
    /// Number of failed seed attempts across all builds (peeling retries).
    pub build_retry_rounds_total: u64,
    /// Number of `contains` calls served.
    pub queries_total: u64,
}

/// Instance-scoped atomic counters backing [`MetricsSnapshot`].
#[derive(Debug, Default)]
pub struct Metrics {
    builds_total: AtomicU64,
    rebuilds_total: AtomicU64,
    build_retry_rounds_total: AtomicU64,
    queries_total: AtomicU64,
}

impl Metrics {
    pub(crate) fn record_build_started(&self) {
        self.builds_total.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_build_finished(&self, _rounds_used: u32) {
        // Rounds used is logged at the call site; nothing additional to
        // count here beyond the build itself (recorded on start so a build
        // that returns `Error::BuildFailure` is still reflected).
    }

    pub(crate) fn record_build_retry(&self) {
        self.build_retry_rounds_total.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_rebuild(&self) {
        self.rebuilds_total.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_query(&self) {
        self.queries_total.fetch_add(1, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            builds_total: self.builds_total.load(Ordering::Relaxed),
            rebuilds_total: self.rebuilds_total.load(Ordering::Relaxed),
            build_retry_rounds_total: self.build_retry_rounds_total.load(Ordering::Relaxed),
            queries_total: self.queries_total.load(Ordering::Relaxed),
        }
    }
}
