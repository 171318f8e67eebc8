//! The dynamic overlay: pending-add / pending-remove sets layered over an
//! immutable snapshot.

use std::collections::HashSet;

/// The pending-adds / pending-removes pair published as a unit. Held as a
/// copy-on-write value: every mutation produces a new `Overlay` that
/// replaces the old one atomically (see `crate::filter::core`).
#[derive(Debug, Clone, Default)]
pub struct Overlay {
    pub(crate) pending_adds: HashSet<Vec<u8>>,
    pub(crate) pending_removes: HashSet<Vec<u8>>,
}

impl Overlay {
    pub fn empty() -> Self {
        Overlay {
            pending_adds: HashSet::new(),
            pending_removes: HashSet::new(),
        }
    }

    #[inline]
    pub fn pending_adds(&self) -> &HashSet<Vec<u8>> {
        &self.pending_adds
    }

    #[inline]
    pub fn pending_removes(&self) -> &HashSet<Vec<u8>> {
        &self.pending_removes
    }

    #[inline]
    pub fn pending_count(&self) -> usize {
        self.pending_adds.len() + self.pending_removes.len()
    }

    /// Overlay invariants: `pending_adds ∩ pending_removes = ∅`,
    /// `pending_adds ∩ snapshot_keys = ∅`, `pending_removes ⊆ snapshot_keys`.
    #[cfg(test)]
    pub(crate) fn check_invariants(&self, snapshot_keys: &HashSet<Vec<u8>>) -> bool {
        self.pending_adds.is_disjoint(&self.pending_removes)
            && self.pending_adds.is_disjoint(snapshot_keys)
            && self.pending_removes.is_subset(snapshot_keys)
    }
}
