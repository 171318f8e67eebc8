//! Overlay mutation operations: `add`, `remove`, `add_all`,
//! `remove_all`.

use log::debug;

use crate::canonical::AsKey;
use crate::error::Result;
use crate::overlay::Overlay;
use crate::snapshot::Snapshot;

use super::core::Filter;

impl Filter {
    /// Adds `value` to the effective set. Returns `true` iff the call
    /// changed the effective set.
    pub fn add<K: AsKey + ?Sized>(&self, value: &K) -> Result<bool> {
        let _guard = self.writer_lock.lock().expect("writer lock poisoned");
        let snapshot = self.current_snapshot();
        let mut new_overlay = (*self.current_overlay()).clone();
        let changed = apply_add(&snapshot, &mut new_overlay, value.as_key_bytes().into_owned());
        self.publish_overlay(new_overlay);
        debug!(
            "xor-filter add: pending_adds={} pending_removes={}",
            self.current_overlay().pending_adds().len(),
            self.current_overlay().pending_removes().len()
        );
        if changed {
            self.maybe_rebuild_locked()?;
        }
        Ok(changed)
    }

    /// Removes `value` from the effective set. Returns `true` iff the call
    /// changed the effective set.
    pub fn remove<K: AsKey + ?Sized>(&self, value: &K) -> Result<bool> {
        let _guard = self.writer_lock.lock().expect("writer lock poisoned");
        let snapshot = self.current_snapshot();
        let mut new_overlay = (*self.current_overlay()).clone();
        let changed = apply_remove(&snapshot, &mut new_overlay, value.as_key_bytes().into_owned());
        self.publish_overlay(new_overlay);
        debug!(
            "xor-filter remove: pending_adds={} pending_removes={}",
            self.current_overlay().pending_adds().len(),
            self.current_overlay().pending_removes().len()
        );
        if changed {
            self.maybe_rebuild_locked()?;
        }
        Ok(changed)
    }

    /// Batch add: mutates a single overlay copy and runs the rebuild policy
    /// once at the end, not once per key.
    pub fn add_all<K: AsKey>(&self, values: &[K]) -> Result<usize> {
        let _guard = self.writer_lock.lock().expect("writer lock poisoned");
        let snapshot = self.current_snapshot();
        let mut new_overlay = (*self.current_overlay()).clone();
        let mut count = 0usize;
        for v in values {
            if apply_add(&snapshot, &mut new_overlay, v.as_key_bytes().into_owned()) {
                count += 1;
            }
        }
        self.publish_overlay(new_overlay);
        debug!(
            "xor-filter add_all: pending_adds={} pending_removes={}",
            self.current_overlay().pending_adds().len(),
            self.current_overlay().pending_removes().len()
        );
        if count > 0 {
            self.maybe_rebuild_locked()?;
        }
        Ok(count)
    }

    /// Batch remove: mutates a single overlay copy and runs the rebuild
    /// policy once at the end, not once per key.
    pub fn remove_all<K: AsKey>(&self, values: &[K]) -> Result<usize> {
        let _guard = self.writer_lock.lock().expect("writer lock poisoned");
        let snapshot = self.current_snapshot();
        let mut new_overlay = (*self.current_overlay()).clone();
        let mut count = 0usize;
        for v in values {
            if apply_remove(&snapshot, &mut new_overlay, v.as_key_bytes().into_owned()) {
                count += 1;
            }
        }
        self.publish_overlay(new_overlay);
        debug!(
            "xor-filter remove_all: pending_adds={} pending_removes={}",
            self.current_overlay().pending_adds().len(),
            self.current_overlay().pending_removes().len()
        );
        if count > 0 {
            self.maybe_rebuild_locked()?;
        }
        Ok(count)
    }
}

/// Applies a single `add` decision to `overlay` in place, following the
/// same per-key contract `add` documents. Left as a free function so
/// `add_all` can fold many keys into one overlay copy instead of
/// publishing (and rebuilding) after each one.
fn apply_add(snapshot: &Snapshot, overlay: &mut Overlay, k: Vec<u8>) -> bool {
    if snapshot.keys().contains(&k) {
        overlay.pending_removes.remove(&k);
        false
    } else if overlay.pending_adds.contains(&k) {
        false
    } else {
        overlay.pending_adds.insert(k);
        true
    }
}

/// Applies a single `remove` decision to `overlay` in place; see
/// [`apply_add`].
fn apply_remove(snapshot: &Snapshot, overlay: &mut Overlay, k: Vec<u8>) -> bool {
    if overlay.pending_adds.remove(&k) {
        true
    } else if snapshot.keys().contains(&k) && overlay.pending_removes.insert(k) {
        true
    } else {
        false
    }
}
