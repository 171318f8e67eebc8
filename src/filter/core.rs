//! The concurrency façade: the `Filter` struct and its published-reference
//! cells.

use std::collections::HashSet;
use std::sync::{Arc, Mutex, RwLock};

use log::info;

use crate::build;
use crate::canonical::AsKey;
use crate::config::Config;
use crate::consts::DEFAULT_LOAD_FACTOR;
use crate::error::Result;
use crate::metrics::{Metrics, MetricsSnapshot};
use crate::overlay::Overlay;
use crate::snapshot::Snapshot;

/// A dynamic, concurrent-safe approximate membership filter.
///
/// Readers (`contains`, `size`, `is_empty`) never block: each one clones an
/// `Arc` out of a `RwLock` cell and releases the lock before doing any
/// hashing or lookup work. Writers (`add`, `remove`, `add_all`,
/// `remove_all`, `compact`) are serialized by a single mutex.
#[derive(Debug)]
pub struct Filter {
    pub(super) snapshot: RwLock<Arc<Snapshot>>,
    pub(super) overlay: RwLock<Arc<Overlay>>,
    pub(super) writer_lock: Mutex<()>,
    pub(super) config: Config,
    metrics: Metrics,
}

impl Filter {
    /// A fresh, empty filter under the default [`Config`]. `capacity` is
    /// advisory only — there is no pre-sizing without keys to build from;
    /// constructing with `capacity == 0` (or any value, since no initial
    /// key set is supplied here) yields the empty snapshot with no build
    /// work.
    pub fn new(capacity: usize) -> Self {
        Self::with_config(capacity, Config::default()).expect("default config always validates")
    }

    /// As [`Filter::new`], but with an explicit, validated [`Config`].
    pub fn with_config(_capacity: usize, config: Config) -> Result<Self> {
        config.validate()?;
        Ok(Filter {
            snapshot: RwLock::new(Arc::new(Snapshot::empty(0, config.fingerprint_bits))),
            overlay: RwLock::new(Arc::new(Overlay::empty())),
            writer_lock: Mutex::new(()),
            config,
            metrics: Metrics::default(),
        })
    }

    /// Build a filter directly from an initial key set, skipping the
    /// empty-then-add-all path.
    pub fn from_keys<K: AsKey>(keys: &[K], config: Config) -> Result<Self> {
        config.validate()?;
        let metrics = Metrics::default();
        let key_set: HashSet<Vec<u8>> = keys.iter().map(|k| k.as_key_bytes().into_owned()).collect();
        let snapshot = build::build(&key_set, &config, &metrics)?;
        Ok(Filter {
            snapshot: RwLock::new(Arc::new(snapshot)),
            overlay: RwLock::new(Arc::new(Overlay::empty())),
            writer_lock: Mutex::new(()),
            config,
            metrics,
        })
    }

    #[inline]
    pub(crate) fn current_snapshot(&self) -> Arc<Snapshot> {
        Arc::clone(&self.snapshot.read().expect("snapshot lock poisoned"))
    }

    #[inline]
    pub(crate) fn current_overlay(&self) -> Arc<Overlay> {
        Arc::clone(&self.overlay.read().expect("overlay lock poisoned"))
    }

    #[inline]
    pub(crate) fn publish_snapshot(&self, snapshot: Snapshot) {
        *self.snapshot.write().expect("snapshot lock poisoned") = Arc::new(snapshot);
    }

    #[inline]
    pub(crate) fn publish_overlay(&self, overlay: Overlay) {
        *self.overlay.write().expect("overlay lock poisoned") = Arc::new(overlay);
    }

    pub(crate) fn metrics_handle(&self) -> &Metrics {
        &self.metrics
    }

    pub(crate) fn config(&self) -> &Config {
        &self.config
    }

    /// Construct directly from a restored snapshot/overlay pair (used by the
    /// persistence loader). Does not rebuild.
    pub(crate) fn from_parts(snapshot: Snapshot, overlay: Overlay, config: Config) -> Self {
        Filter {
            snapshot: RwLock::new(Arc::new(snapshot)),
            overlay: RwLock::new(Arc::new(overlay)),
            writer_lock: Mutex::new(()),
            config,
            metrics: Metrics::default(),
        }
    }

    /// Read-only cumulative counters for diagnostics and tests.
    pub fn metrics(&self) -> MetricsSnapshot {
        self.metrics.snapshot()
    }

    /// Rebuild the current effective set into a fresh snapshot and clear
    /// the overlay, regardless of the rebuild-threshold policy. Runs under
    /// the writer lock like every other mutation.
    pub fn compact(&self) -> Result<()> {
        let _guard = self.writer_lock.lock().expect("writer lock poisoned");
        self.rebuild_locked()
    }

    /// Must be called with `writer_lock` held.
    pub(super) fn rebuild_locked(&self) -> Result<()> {
        let snapshot = self.current_snapshot();
        let overlay = self.current_overlay();

        let mut new_keys = snapshot.keys().clone();
        for k in overlay.pending_adds() {
            new_keys.insert(k.clone());
        }
        for k in overlay.pending_removes() {
            new_keys.remove(k);
        }

        info!(
            "xor-filter rebuild starting: old_keys={} new_keys={}",
            snapshot.keys().len(),
            new_keys.len()
        );

        // Rebuilds always use the default load factor, not whatever the
        // instance was configured with. Only the initial build honors a
        // caller-supplied load factor.
        let rebuild_config = Config {
            load_factor: DEFAULT_LOAD_FACTOR,
            ..self.config
        };
        let new_snapshot = build::build(&new_keys, &rebuild_config, &self.metrics)?;
        // Publication order matters: the new snapshot must be visible
        // before the overlay is cleared, or a reader could transiently see
        // neither the stale overlay entry nor the new snapshot's key.
        self.publish_snapshot(new_snapshot);
        self.publish_overlay(Overlay::empty());
        self.metrics.record_rebuild();

        info!("xor-filter rebuild finished: keys={}", new_keys.len());
        Ok(())
    }

    pub(super) fn maybe_rebuild_locked(&self) -> Result<()> {
        if !self.config.auto_rebuild {
            return Ok(());
        }
        let snapshot = self.current_snapshot();
        let overlay = self.current_overlay();
        let pending = overlay.pending_count() as u64;
        let threshold = std::cmp::max(
            self.config.rebuild_min_pending,
            (snapshot.keys().len() as f64 * self.config.rebuild_ratio).ceil() as u64,
        );
        if pending >= threshold {
            self.rebuild_locked()?;
        }
        Ok(())
    }
}
