//! Centralized, validated construction parameters for [`crate::Filter`].
//!
//! Unlike a storage engine's tunables, these are not read from the process
//! environment: a filter's on-disk correctness must not depend on the
//! environment of the process that later opens it. Every field is
//! either a constructor argument, persisted as part of the snapshot where it
//! affects the wire format (`fingerprint_bits`), or otherwise carried as part
//! of the in-memory `Config` the caller supplies.

use std::fmt;

use crate::consts::{
    DEFAULT_AUTO_REBUILD, DEFAULT_FINGERPRINT_BITS, DEFAULT_LOAD_FACTOR, DEFAULT_REBUILD_MIN_PENDING,
    DEFAULT_REBUILD_RATIO, MAX_FINGERPRINT_BITS, MIN_FINGERPRINT_BITS,
};
use crate::error::{Error, Result};

/// Construction and rebuild-policy parameters for a [`crate::Filter`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Config {
    /// Fingerprint width in bits. Must be in `[4, 16]`.
    pub fingerprint_bits: u8,

    /// Table-to-key load factor used by the static builder.
    pub load_factor: f64,

    /// Whether overlay mutations automatically trigger a rebuild once the
    /// pending-operation threshold is crossed.
    pub auto_rebuild: bool,

    /// `R` in `threshold = max(rebuild_min_pending, ceil(|snapshot.keys| * R))`.
    pub rebuild_ratio: f64,

    /// Floor of the rebuild threshold, regardless of snapshot size.
    pub rebuild_min_pending: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            fingerprint_bits: DEFAULT_FINGERPRINT_BITS,
            load_factor: DEFAULT_LOAD_FACTOR,
            auto_rebuild: DEFAULT_AUTO_REBUILD,
            rebuild_ratio: DEFAULT_REBUILD_RATIO,
            rebuild_min_pending: DEFAULT_REBUILD_MIN_PENDING,
        }
    }
}

impl Config {
    /// Fluent setters (builder-style) to override specific fields.

    pub fn with_fingerprint_bits(mut self, bits: u8) -> Self {
        self.fingerprint_bits = bits;
        self
    }

    pub fn with_load_factor(mut self, load_factor: f64) -> Self {
        self.load_factor = load_factor;
        self
    }

    pub fn with_auto_rebuild(mut self, on: bool) -> Self {
        self.auto_rebuild = on;
        self
    }

    pub fn with_rebuild_ratio(mut self, ratio: f64) -> Self {
        self.rebuild_ratio = ratio;
        self
    }

    pub fn with_rebuild_min_pending(mut self, min_pending: u64) -> Self {
        self.rebuild_min_pending = min_pending;
        self
    }

    /// Validate every field, returning `Error::InvalidArgument` on the first
    /// violation found. Called by every `Filter` constructor and by
    /// `Filter::with_config`.
    pub fn validate(&self) -> Result<()> {
        if self.fingerprint_bits < MIN_FINGERPRINT_BITS || self.fingerprint_bits > MAX_FINGERPRINT_BITS {
            return Err(Error::invalid_argument(format!(
                "fingerprint_bits must be in [{}, {}], got {}",
                MIN_FINGERPRINT_BITS, MAX_FINGERPRINT_BITS, self.fingerprint_bits
            )));
        }
        if !(self.load_factor > 1.0) {
            return Err(Error::invalid_argument(format!(
                "load_factor must be > 1.0, got {}",
                self.load_factor
            )));
        }
        if !(self.rebuild_ratio > 0.0) {
            return Err(Error::invalid_argument(format!(
                "rebuild_ratio must be > 0.0, got {}",
                self.rebuild_ratio
            )));
        }
        Ok(())
    }

    /// `mask = (1 << bits) - 1`, precomputed once validation has passed.
    pub(crate) fn fingerprint_mask(&self) -> u32 {
        (1u32 << self.fingerprint_bits) - 1
    }
}

impl fmt::Display for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Config {{ fingerprint_bits: {}, load_factor: {}, auto_rebuild: {}, rebuild_ratio: {}, rebuild_min_pending: {} }}",
            self.fingerprint_bits,
            self.load_factor,
            self.auto_rebuild,
            self.rebuild_ratio,
            self.rebuild_min_pending
        )
    }
}
