//! A dynamic XOR-filter approximate membership set.
//!
//! Keys are absorbed into an immutable, peeled XOR-filter table (the
//! snapshot) with a mutable pending-add/pending-remove overlay layered on
//! top. Reads never block; writes are serialized by a single lock and
//! occasionally fold the overlay back into a fresh snapshot.

mod build;
pub mod canonical;
pub mod config;
mod consts;
pub mod error;
mod filter;
mod hash;
pub mod metrics;
mod overlay;
mod persist;
pub mod snapshot;

pub use canonical::AsKey;
pub use config::Config;
pub use error::{Error, Result};
pub use filter::Filter;
pub use metrics::MetricsSnapshot;
pub use snapshot::Snapshot;
