//! Query engine: lock-free `contains`, `size`, `is_empty`.

use crate::canonical::AsKey;

use super::core::Filter;

impl Filter {
    /// `contains` never takes the writer lock; it reads the overlay and
    /// snapshot cells independently. Under a concurrent rebuild the
    /// publication order (new snapshot before cleared overlay) guarantees
    /// no false negative for a key effectively present at call time.
    pub fn contains<K: AsKey + ?Sized>(&self, value: &K) -> bool {
        self.metrics_handle().record_query();
        let k = value.as_key_bytes();

        let adds = self.current_overlay();
        if adds.pending_adds().contains(k.as_ref()) {
            return true;
        }
        if adds.pending_removes().contains(k.as_ref()) {
            return false;
        }

        let snapshot = self.current_snapshot();
        snapshot.test(k.as_ref())
    }

    /// `|snapshot.keys| + |pending_adds| − |pending_removes|`. Readable
    /// without the writer lock; the two cells are read independently so the
    /// result may be mildly stale under concurrent writes but never
    /// negative, per the overlay invariants.
    pub fn size(&self) -> usize {
        let snapshot = self.current_snapshot();
        let overlay = self.current_overlay();
        snapshot.keys().len() + overlay.pending_adds().len() - overlay.pending_removes().len()
    }

    pub fn is_empty(&self) -> bool {
        self.size() == 0
    }
}
