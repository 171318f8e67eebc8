//! Binary persistence codec: encode/decode a filter's snapshot and overlay
//! to a self-describing byte stream.
//!
//! `save` writes the current snapshot and overlay verbatim; `load`
//! reconstructs a filter with that exact snapshot and overlay and does not
//! rebuild — the overlay is preserved as-is.

mod decode;
mod encode;

use std::path::Path;

use log::info;

use crate::error::Result;
use crate::filter::Filter;

impl Filter {
    /// Write this filter's current snapshot and overlay to `path`.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let bytes = encode::encode(self)?;
        std::fs::write(path, &bytes)?;
        info!("xor-filter saved: path={} bytes={}", path.display(), bytes.len());
        Ok(())
    }

    /// Reconstruct a filter from a file written by [`Filter::save`]. The
    /// loaded filter's `Config` is the default except for `fingerprint_bits`,
    /// which is restored from the file (it determines the wire format).
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let bytes = std::fs::read(path)?;
        let filter = decode::decode(&bytes)?;
        info!("xor-filter loaded: path={} bytes={}", path.display(), bytes.len());
        Ok(filter)
    }
}
